//! # Wellness Journal Backend
//!
//! Contains all non-UI logic for the wellness journal application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for journal entries, the peptide
//!   registry, analytics and backup/restore
//! - **Storage**: Data persistence mechanisms (JSON blob files)
//! - **IO**: Interface layer that exposes functionality to the UI
//!
//! The backend is UI-agnostic: the same entry points serve a desktop shell,
//! a web view or a CLI without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (forms, lists, charts)
//!     ↓
//! IO Layer (callable API functions, DTO mapping)
//!     ↓
//! Domain Layer (services, business rules)
//!     ↓
//! Storage Layer (JSON blob persistence)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::info;

use crate::domain::{
    AnalyticsService, BackupService, EntryService, PeptideService, Session,
};
use crate::storage::json::JsonConnection;
use crate::storage::Connection;

/// Main application state that holds all services plus the UI session.
pub struct AppState<C: Connection> {
    pub entry_service: EntryService<C>,
    pub peptide_service: PeptideService<C>,
    pub analytics_service: AnalyticsService,
    pub backup_service: BackupService<C>,
    pub session: Arc<Mutex<Session>>,
}

/// Initialize the backend against the default data directory.
pub fn initialize_backend() -> Result<AppState<JsonConnection>> {
    info!("Setting up storage");
    let connection = JsonConnection::new_default()?;
    initialize_backend_with(connection)
}

/// Initialize the backend against a specific storage connection.
///
/// Used by tests and by shells that manage their own data directory.
pub fn initialize_backend_with<C: Connection>(connection: C) -> Result<AppState<C>> {
    let connection = Arc::new(connection);

    info!("Setting up domain services");
    let entry_service = EntryService::new(connection.clone())?;
    let peptide_service = PeptideService::new(connection.clone())?;
    let analytics_service = AnalyticsService::new();
    let backup_service = BackupService::new(connection.clone());

    info!(
        "Backend ready with {} stored entries",
        entry_service.entry_count()
    );

    Ok(AppState {
        entry_service,
        peptide_service,
        analytics_service,
        backup_service,
        session: Arc::new(Mutex::new(Session::default())),
    })
}
