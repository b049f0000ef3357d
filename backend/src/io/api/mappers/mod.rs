//! DTO ↔ domain mapping.

pub mod entry_mapper;
pub mod peptide_mapper;

pub use entry_mapper::EntryMapper;
pub use peptide_mapper::PeptideMapper;
