//! Domain entities for the wellness journal.

pub mod entry;
pub mod peptide;
