//! Phrases in, cluster reports out.

use neumes::{
    calculate_results, p_cutoff_path_stub, AnalysisConfig, AnalysisType, ClusterReport,
    HealthCheck, Linkage, Metric, ModalCategory, ModalGrouping, Phrase, ResultDescriptor, Unit,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn corpus() -> Vec<Phrase> {
    let raw = [
        ("dorian_1", "D4 F4 A4 G4 F4 E4 D4", ModalCategory::DAuthentic),
        ("dorian_2", "D4 E4 F4 G4 F4 E4 D4", ModalCategory::DAuthentic),
        ("dorian_3", "A4 C5 A4 G4 A4 F4 D4", ModalCategory::DAuthentic),
        ("dorian_4", "A4 B-4 A4 G4 F4 E4 D4", ModalCategory::DAuthentic),
        ("dorian_5", "C4 D4 F4 E4 D4", ModalCategory::DAuthentic),
        ("hypodorian_1", "A3 C4 D4 E4 D4", ModalCategory::DPlagal),
        ("hypodorian_2", "C4 D4 F4 E4 D4", ModalCategory::DPlagal),
        ("mixolydian_1", "G4 B4 D5 C5 B4 A4 G4", ModalCategory::GAuthentic),
        ("mixolydian_2", "D5 C5 B4 A4 G4", ModalCategory::GAuthentic),
        ("mixolydian_3", "G4 A4 B4 C5 D5 C5 A4 G4", ModalCategory::GAuthentic),
    ];
    raw.into_iter()
        .map(|(name, notes, mode)| Phrase::parse(name, notes, mode).unwrap())
        .collect()
}

#[test]
fn batch_builds_healthy_trees_for_populated_modes() {
    init();
    let items = corpus();
    let config = AnalysisConfig::default();
    let outcome = calculate_results("sequences", &items, AnalysisType::PcFreqs, &config);

    let populated = ModalGrouping::new(&items).non_empty().count();
    assert_eq!(populated, 3);
    assert_eq!(outcome.results.len(), populated * Unit::ALL.len());
    assert_eq!(outcome.failures.len(), (8 - populated) * Unit::ALL.len());

    for (descriptor, tree) in &outcome.results {
        assert!(tree.is_healthy(), "{}", tree.health_check());
        assert_eq!(descriptor.repertoire, "sequences");
        let bucket_size = items
            .iter()
            .filter(|p| neumes::AnalysisItem::modal_category(*p) == descriptor.modal_category)
            .count();
        assert_eq!(tree.num_items(), bucket_size);
    }
}

#[test]
fn cuts_partition_every_bucket() -> neumes::Result<()> {
    init();
    let items = corpus();
    let config = AnalysisConfig::from_toml_str(
        r#"
        p_cutoff = 0.6
        linkage = "complete"
        metric = "cityblock"
        "#,
    )?;
    assert_eq!(config.metric, Metric::Cityblock);
    assert_eq!(config.linkage, Linkage::Complete);

    let outcome = calculate_results("sequences", &items, AnalysisType::PcFreqs, &config);
    for (descriptor, tree) in &outcome.results {
        let report = ClusterReport::from_tree(tree, config.p_cutoff, config.include_leaf_nodes)?;
        let mut members: Vec<&str> = report
            .clusters
            .iter()
            .flat_map(|c| c.members.iter().map(String::as_str))
            .collect();
        members.sort_unstable();
        let mut expected: Vec<&str> = tree.leaf_order().iter().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(members, expected, "{}", descriptor.description());

        for cluster in &report.clusters {
            let total: f64 = cluster.avg_distribution.iter().map(|(_, v)| v).sum();
            assert!((total - 100.0).abs() < 1e-9);
        }
    }
    Ok(())
}

#[test]
fn mode_degree_profiles_line_up_across_modes() -> neumes::Result<()> {
    init();
    let items = corpus();
    let outcome = calculate_results("sequences", &items, AnalysisType::PcFreqs, &AnalysisConfig::default());

    let key = |mode| ResultDescriptor::new("sequences", AnalysisType::PcFreqs, Unit::ModeDegree, mode);
    let dorian = outcome.results.get(&key(ModalCategory::DAuthentic)).expect("dorian tree");
    let mixolydian = outcome.results.get(&key(ModalCategory::GAuthentic)).expect("mixolydian tree");
    assert_eq!(dorian.alphabet(), mixolydian.alphabet());

    // Every phrase ends on its final.
    for tree in [dorian, mixolydian] {
        let root = tree.root().avg_distribution();
        assert!(root.get("1").unwrap_or(0.0) > 0.0);
    }
    // Dorian has a minor third above the final, mixolydian a major one.
    assert!(dorian.root().avg_distribution().get("b3") > Some(0.0));
    assert_eq!(mixolydian.root().avg_distribution().get("b3"), Some(0.0));
    assert!(mixolydian.root().avg_distribution().get("3") > Some(0.0));
    Ok(())
}

#[test]
fn reports_serialize_for_export() -> neumes::Result<()> {
    init();
    let items = corpus();
    let config = AnalysisConfig::default();
    let outcome = calculate_results("sequences", &items, AnalysisType::PcFreqs, &config);

    let root = std::path::Path::new("/tmp/out").join(p_cutoff_path_stub(config.p_cutoff));
    for (descriptor, report) in outcome.results.reports(config.p_cutoff, config.include_leaf_nodes)? {
        let path = descriptor.full_output_path(&root, "clusters.json");
        assert!(path.starts_with("/tmp/out/p_cutoff_0.40/sequences/pc_freqs"));

        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["p_cutoff"], 0.4);
        assert_eq!(
            json["clusters"].as_array().map(Vec::len),
            Some(report.clusters.len())
        );
    }
    Ok(())
}

#[test]
fn leap_analysis_only_runs_on_pitch_classes() {
    init();
    let items = corpus();
    let outcome = calculate_results("sequences", &items, AnalysisType::LeapsL5, &AnalysisConfig::default());
    assert_eq!(outcome.results.len(), 3);
    for (descriptor, tree) in &outcome.results {
        assert_eq!(descriptor.unit, Unit::PitchClass);
        assert_eq!(tree.alphabet().len(), 14);
    }
}

#[test]
fn tendency_runs_in_both_units() -> neumes::Result<()> {
    init();
    let items = corpus();
    let outcome = calculate_results("sequences", &items, AnalysisType::Tendency, &AnalysisConfig::default());
    assert_eq!(outcome.results.len(), 3 * Unit::ALL.len());

    for (descriptor, tree) in &outcome.results {
        assert!(tree.is_healthy(), "{}", tree.health_check());
        assert_eq!(descriptor.analysis.output_path_stub(), "tendency");
        let alphabet = tree.alphabet();
        assert_eq!(alphabet.len(), alphabet.row_len() * alphabet.row_len());
        for row in tree.root().avg_distribution().row_sums() {
            assert!((-1e-9..=100.0 + 1e-9).contains(&row));
        }
    }

    // No dorian phrase moves from the final straight to the fourth.
    let key = ResultDescriptor::new("sequences", AnalysisType::Tendency, Unit::ModeDegree, ModalCategory::DAuthentic);
    let dorian = outcome.results.get(&key).expect("dorian tendency tree");
    let leaf = dorian.node(0).expect("first leaf");
    assert_eq!(leaf.avg_distribution().get("1_4"), Some(0.0));

    let report = ClusterReport::from_tree(dorian, 1.0, true)?;
    assert_eq!(report.symbols.len(), 144);
    Ok(())
}
