//! UI-facing API functions, grouped by area.

pub mod analytics_apis;
pub mod backup_apis;
pub mod entry_apis;
pub mod mappers;
pub mod peptide_apis;

pub use analytics_apis::*;
pub use backup_apis::*;
pub use entry_apis::*;
pub use peptide_apis::*;
