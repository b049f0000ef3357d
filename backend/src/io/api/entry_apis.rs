//! # API for journal entries
//!
//! Entry points for the entry form and the history view.

use log::info;

use crate::domain::commands::entries::{SaveEntryCommand, SaveEntryResult, UpdateEntryCommand};
use crate::domain::errors::JournalError;
use crate::io::api::mappers::EntryMapper;
use crate::storage::Connection;
use crate::AppState;
use shared::{
    BeginEditRequest, BeginEditResponse, DeleteEntryRequest, DeleteEntryResponse,
    EntryListResponse, SaveEntryRequest, SaveEntryResponse, UpdateEntryRequest,
    UpdateEntryResponse,
};

/// Save a new entry from the entry form.
///
/// The administered doses are snapshotted from the registry's checked
/// templates. On success the registry flags are reset for the next day's
/// entry; on a conflict nothing changes and the UI is expected to ask the
/// user and re-submit with `overwrite = true`.
pub fn save_entry<C: Connection>(
    state: &AppState<C>,
    request: SaveEntryRequest,
) -> Result<SaveEntryResponse, JournalError> {
    info!("api::save_entry - date: {}", request.date);

    let command = SaveEntryCommand {
        date: EntryMapper::parse_date(&request.date)?,
        scores: EntryMapper::scores_to_domain(request.scores),
        notes: request.notes.filter(|n| !n.trim().is_empty()),
        peptides: state.peptide_service.snapshot_administered(),
        overwrite: request.overwrite,
    };

    match state.entry_service.save_entry(command)? {
        SaveEntryResult::Saved(entry) => {
            state.peptide_service.reset_administered_flags();
            Ok(SaveEntryResponse::Saved {
                entry: EntryMapper::to_dto(entry),
                success_message: "Entry saved!".to_string(),
            })
        }
        SaveEntryResult::Conflict { date } => Ok(SaveEntryResponse::Conflict {
            date: date.format("%Y-%m-%d").to_string(),
        }),
    }
}

/// Update the entry currently being edited.
pub fn update_entry<C: Connection>(
    state: &AppState<C>,
    request: UpdateEntryRequest,
) -> Result<UpdateEntryResponse, JournalError> {
    info!("api::update_entry - id: {}", request.id);

    let command = UpdateEntryCommand {
        id: request.id,
        date: EntryMapper::parse_date(&request.date)?,
        scores: EntryMapper::scores_to_domain(request.scores),
        notes: request.notes.filter(|n| !n.trim().is_empty()),
        peptides: state.peptide_service.snapshot_administered(),
    };

    let entry = state.entry_service.update_entry(command)?;

    state.peptide_service.reset_administered_flags();
    state.session.lock().unwrap().editing_entry_id = None;

    Ok(UpdateEntryResponse {
        entry: EntryMapper::to_dto(entry),
        success_message: "Entry updated!".to_string(),
    })
}

/// Delete an entry from the history view.
pub fn delete_entry<C: Connection>(
    state: &AppState<C>,
    request: DeleteEntryRequest,
) -> Result<DeleteEntryResponse, JournalError> {
    info!("api::delete_entry - id: {}", request.id);

    let removed = state.entry_service.delete_entry(&request.id)?;

    Ok(DeleteEntryResponse {
        deleted_id: removed.id,
        success_message: "Entry deleted".to_string(),
    })
}

/// The full history, newest first.
pub fn list_entries<C: Connection>(state: &AppState<C>) -> EntryListResponse {
    EntryListResponse {
        entries: state
            .entry_service
            .list_entries()
            .into_iter()
            .map(EntryMapper::to_dto)
            .collect(),
    }
}

/// Start editing an entry: remembers the edit target in the session and
/// re-marks the registry checkboxes from the entry's logged doses so the
/// form can be populated.
pub fn begin_edit_entry<C: Connection>(
    state: &AppState<C>,
    request: BeginEditRequest,
) -> Result<BeginEditResponse, JournalError> {
    info!("api::begin_edit_entry - id: {}", request.id);

    let entry = state.entry_service.get_entry(&request.id)?;

    state.peptide_service.mark_administered_from(&entry);
    state.session.lock().unwrap().editing_entry_id = Some(entry.id.clone());

    Ok(BeginEditResponse {
        entry: EntryMapper::to_dto(entry),
    })
}

/// Abandon the edit flow, clearing the edit target and the registry flags.
pub fn cancel_edit<C: Connection>(state: &AppState<C>) {
    state.session.lock().unwrap().editing_entry_id = None;
    state.peptide_service.reset_administered_flags();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_backend_with;
    use crate::storage::json::test_utils::TestEnvironment;
    use shared::EntryScores;

    fn request(date: &str, wellness: u8) -> SaveEntryRequest {
        SaveEntryRequest {
            date: date.to_string(),
            scores: EntryScores {
                wellness,
                energy: 6,
                pain: 4,
                sleep: 7,
                mobility: 6,
            },
            notes: None,
            overwrite: false,
        }
    }

    #[test]
    fn test_save_entry_snapshots_checked_peptides_and_resets_flags() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        state.peptide_service.toggle_administered(0).unwrap();

        let response = save_entry(&state, request("2024-01-15", 7)).unwrap();
        let entry = match response {
            SaveEntryResponse::Saved { entry, .. } => entry,
            SaveEntryResponse::Conflict { date } => panic!("unexpected conflict for {}", date),
        };

        assert_eq!(entry.peptides.len(), 1);
        assert_eq!(entry.peptides[0].name, "BPC-157");

        // Flags reset after the submit.
        assert!(state.peptide_service.list().iter().all(|p| !p.administered));
    }

    #[test]
    fn test_save_entry_conflict_surfaced_to_caller() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        save_entry(&state, request("2024-01-15", 7)).unwrap();
        let response = save_entry(&state, request("2024-01-15", 3)).unwrap();
        assert_eq!(
            response,
            SaveEntryResponse::Conflict {
                date: "2024-01-15".to_string()
            }
        );

        // Re-submitting with confirmation replaces.
        let mut confirmed = request("2024-01-15", 3);
        confirmed.overwrite = true;
        let response = save_entry(&state, confirmed).unwrap();
        assert!(matches!(response, SaveEntryResponse::Saved { .. }));
        assert_eq!(state.entry_service.entry_count(), 1);
    }

    #[test]
    fn test_blank_notes_stored_as_absent() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        let mut req = request("2024-01-15", 7);
        req.notes = Some("   ".to_string());
        save_entry(&state, req).unwrap();

        let entries = list_entries(&state).entries;
        assert!(entries[0].notes.is_none());
    }

    #[test]
    fn test_begin_edit_marks_registry_and_session() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        state.peptide_service.toggle_administered(1).unwrap();
        save_entry(&state, request("2024-01-15", 7)).unwrap();

        let id = list_entries(&state).entries[0].id.clone();
        let response = begin_edit_entry(
            &state,
            BeginEditRequest { id: id.clone() },
        )
        .unwrap();

        assert_eq!(response.entry.id, id);
        assert_eq!(
            state.session.lock().unwrap().editing_entry_id,
            Some(id)
        );

        let rows = state.peptide_service.list();
        assert!(!rows[0].administered);
        assert!(rows[1].administered, "TB-500 was logged on the entry");

        cancel_edit(&state);
        assert!(state.session.lock().unwrap().editing_entry_id.is_none());
        assert!(state.peptide_service.list().iter().all(|p| !p.administered));
    }

    #[test]
    fn test_update_entry_clears_edit_target() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        save_entry(&state, request("2024-01-15", 7)).unwrap();
        let id = list_entries(&state).entries[0].id.clone();
        begin_edit_entry(&state, BeginEditRequest { id: id.clone() }).unwrap();

        let response = update_entry(
            &state,
            UpdateEntryRequest {
                id,
                date: "2024-01-15".to_string(),
                scores: EntryScores {
                    wellness: 9,
                    energy: 6,
                    pain: 4,
                    sleep: 7,
                    mobility: 6,
                },
                notes: Some("better after rest".to_string()),
            },
        )
        .unwrap();

        assert_eq!(response.entry.scores.wellness, 9);
        assert!(state.session.lock().unwrap().editing_entry_id.is_none());
    }

    #[test]
    fn test_delete_unknown_entry_is_not_found() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        let result = delete_entry(
            &state,
            DeleteEntryRequest {
                id: "entry::0".to_string(),
            },
        );
        assert!(matches!(result, Err(JournalError::NotFound(_))));
    }
}
