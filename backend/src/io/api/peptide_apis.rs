//! # API for the peptide registry
//!
//! Entry points for the peptide checklist on the entry form.

use log::info;

use crate::domain::errors::JournalError;
use crate::io::api::mappers::PeptideMapper;
use crate::storage::Connection;
use crate::AppState;
use shared::{AddPeptideRequest, PeptideIndexRequest, RegistryListResponse};

/// Current registry rows, in display order.
pub fn list_peptides<C: Connection>(state: &AppState<C>) -> RegistryListResponse {
    registry_response(state)
}

/// Flip the "administered today" checkbox of one row.
pub fn toggle_peptide<C: Connection>(
    state: &AppState<C>,
    request: PeptideIndexRequest,
) -> Result<RegistryListResponse, JournalError> {
    state.peptide_service.toggle_administered(request.index)?;
    Ok(registry_response(state))
}

/// Add a template to the registry; new templates start checked.
pub fn add_peptide<C: Connection>(
    state: &AppState<C>,
    request: AddPeptideRequest,
) -> Result<RegistryListResponse, JournalError> {
    info!("api::add_peptide - name: {}", request.name);

    state
        .peptide_service
        .add_template(PeptideMapper::template_to_domain(shared::PeptideTemplate {
            name: request.name,
            dosage: request.dosage,
            unit: request.unit,
            site: request.site,
        }))?;

    Ok(registry_response(state))
}

/// Remove a registry row.
pub fn remove_peptide<C: Connection>(
    state: &AppState<C>,
    request: PeptideIndexRequest,
) -> Result<RegistryListResponse, JournalError> {
    info!("api::remove_peptide - index: {}", request.index);

    state.peptide_service.remove_template(request.index)?;
    Ok(registry_response(state))
}

fn registry_response<C: Connection>(state: &AppState<C>) -> RegistryListResponse {
    RegistryListResponse {
        peptides: state
            .peptide_service
            .list()
            .into_iter()
            .map(PeptideMapper::registry_item_to_dto)
            .collect(),
    }
}
