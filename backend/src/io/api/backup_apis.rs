//! # API for backup and restore
//!
//! Entry points for the export/import panel and the backup reminder toast.

use log::info;

use crate::domain::errors::JournalError;
use crate::storage::Connection;
use crate::AppState;
use shared::{
    BackupReminderResponse, ExportDataResponse, ExportToPathRequest, ExportToPathResponse,
    ImportDataRequest, ImportDataResponse,
};

/// Serialize the full journal for the UI to hand off as a download.
pub fn export_data<C: Connection>(
    state: &AppState<C>,
) -> Result<ExportDataResponse, JournalError> {
    let result = state
        .backup_service
        .export_data(&state.entry_service, &state.peptide_service)?;

    Ok(ExportDataResponse {
        json_content: result.json_content,
        filename: result.filename,
        entry_count: result.entry_count,
    })
}

/// Write a backup file straight to disk, optionally into a user-chosen
/// directory.
pub fn export_to_path<C: Connection>(
    state: &AppState<C>,
    request: ExportToPathRequest,
) -> Result<ExportToPathResponse, JournalError> {
    info!(
        "api::export_to_path - custom: {}",
        request.custom_path.is_some()
    );

    let result = state.backup_service.export_to_path(
        request.custom_path,
        &state.entry_service,
        &state.peptide_service,
    )?;

    Ok(ExportToPathResponse {
        success: result.success,
        message: result.message,
        file_path: result.file_path,
        entry_count: result.entry_count,
    })
}

/// Restore from a pasted or uploaded backup payload.
pub fn import_data<C: Connection>(
    state: &AppState<C>,
    request: ImportDataRequest,
) -> Result<ImportDataResponse, JournalError> {
    info!("api::import_data - {} bytes", request.json_content.len());

    let result = state.backup_service.import_data(
        &request.json_content,
        &state.entry_service,
        &state.peptide_service,
    )?;

    Ok(ImportDataResponse {
        added_count: result.added_count,
        skipped_count: result.skipped_count,
        entry_count: result.entry_count,
        success_message: "Data imported successfully!".to_string(),
    })
}

/// Reminder text to toast on startup, if a backup is due.
pub fn check_backup_reminder<C: Connection>(
    state: &AppState<C>,
) -> Result<BackupReminderResponse, JournalError> {
    let reminder = state
        .backup_service
        .check_backup_reminder(state.entry_service.entry_count())?;

    Ok(BackupReminderResponse { reminder })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_backend_with;
    use crate::storage::json::test_utils::TestEnvironment;
    use shared::{EntryScores, SaveEntryRequest};

    fn save(state: &crate::AppState<crate::storage::json::JsonConnection>, date: &str) {
        crate::io::api::entry_apis::save_entry(
            state,
            SaveEntryRequest {
                date: date.to_string(),
                scores: EntryScores {
                    wellness: 8,
                    energy: 6,
                    pain: 4,
                    sleep: 7,
                    mobility: 6,
                },
                notes: None,
                overwrite: false,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_export_import_between_backends() {
        let source_env = TestEnvironment::new().unwrap();
        let source = initialize_backend_with(source_env.connection.clone()).unwrap();
        save(&source, "2024-01-15");
        save(&source, "2024-01-14");

        let export = export_data(&source).unwrap();
        assert_eq!(export.entry_count, 2);

        let target_env = TestEnvironment::new().unwrap();
        let target = initialize_backend_with(target_env.connection.clone()).unwrap();
        save(&target, "2024-01-15");

        let response = import_data(
            &target,
            ImportDataRequest {
                json_content: export.json_content,
            },
        )
        .unwrap();

        assert_eq!(response.added_count, 1);
        assert_eq!(response.skipped_count, 1);
        assert_eq!(response.entry_count, 2);
        assert_eq!(response.success_message, "Data imported successfully!");
    }

    #[test]
    fn test_invalid_import_reports_format_error() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        let result = import_data(
            &state,
            ImportDataRequest {
                json_content: "{\"version\": 1}".to_string(),
            },
        );
        assert!(matches!(result, Err(JournalError::InvalidFormat(_))));
    }

    #[test]
    fn test_reminder_quiet_after_export() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        export_data(&state).unwrap();
        let response = check_backup_reminder(&state).unwrap();
        assert_eq!(response.reminder, None);
    }
}
