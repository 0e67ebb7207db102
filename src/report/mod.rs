//! Results of batch analyses and the reports exporters consume.
//!
//! ```text
//!  items ──► ModalGrouping ──► (category × unit) ──► ClusterTree
//!                                     │                   │
//!                              ResultDescriptor    get_nodes_below_cutoff
//!                                     │                   │
//!                                     └──► AnalysisResults ──► ClusterReport
//! ```
//!
//! Rendering and file writes stay with the caller; this module only decides
//! what goes where. [`ResultDescriptor::output_dir`] and
//! [`p_cutoff_path_stub`] give the directory layout, [`ClusterReport`] the
//! content.

mod batch;
mod descriptor;
mod summary;

pub use batch::{calculate_results, AnalysisResults, BatchFailure, BatchOutcome};
pub use descriptor::{p_cutoff_path_stub, ResultDescriptor};
pub use summary::{ClusterReport, ClusterSummary};
