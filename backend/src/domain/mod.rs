//! # Domain Module
//!
//! Contains all business logic for the wellness journal application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how journal entries are recorded, reconciled, and analyzed.
//! It operates independently of any specific UI framework or storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **entry_service**: Entry CRUD, the one-entry-per-date invariant, and
//!   conflict handling
//! - **peptide_service**: The reusable peptide template registry and its
//!   per-session administered flags
//! - **analytics_service**: Window filtering, score averages, peptide dose
//!   aggregation, and time-series projection
//! - **backup_service**: Export/import, the deduplicating restore merge, and
//!   backup reminders
//! - **session**: Transient UI selection state (analytics window, entry
//!   being edited)
//! - **commands**: Internal command/query/result types used by the services
//! - **models**: Domain entities and their validation rules
//!
//! ## Business Rules
//!
//! - At most one entry exists per calendar date at all times
//! - Scores are integers in 1..=10; validation happens before any mutation
//! - Replacing an existing date's entry requires explicit confirmation from
//!   the caller
//! - Restore never overwrites existing entries; duplicate dates are skipped
//! - The entry history is kept sorted newest-first after every mutation

pub mod analytics_service;
pub mod backup_service;
pub mod commands;
pub mod entry_service;
pub mod errors;
pub mod models;
pub mod peptide_service;
pub mod session;

pub use analytics_service::AnalyticsService;
pub use backup_service::BackupService;
pub use entry_service::EntryService;
pub use errors::JournalError;
pub use peptide_service::PeptideService;
pub use session::Session;
