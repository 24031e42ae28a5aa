//! `tabmerge-recon`: keyed two-table comparison engine.
//!
//! Pure engine crate: receives raw tables, returns comparison reports.
//! No CLI dependencies. Delimited-text reading/writing lives in `table_io`.

pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod history;
pub mod model;
pub mod policy;
pub mod reconcile;
pub mod report;
pub mod session;
pub mod table_io;

pub use columns::plan_columns;
pub use config::MergeConfig;
pub use dataset::{build_dataset, dataset_to_table};
pub use error::{ConversionError, MergeError};
pub use history::{History, HistoryState};
pub use model::{Cell, Dataset, Record, Report, ReportDocument, Table};
pub use policy::{Policy, PolicyOption};
pub use reconcile::reconcile_row;
pub use report::{generate_report, preview_report};
pub use session::{MergeSession, Side};
