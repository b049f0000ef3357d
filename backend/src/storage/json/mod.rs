//! JSON blob storage backend.
//!
//! One pretty-printed JSON file per logical key in the data directory:
//! `entries.json`, `peptides.json`, and `meta.json`. Writes go through a
//! temp file and an atomic rename so a crash mid-write never corrupts the
//! stored collection.

pub mod connection;
pub mod entry_repository;
pub mod meta_repository;
pub mod peptide_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use entry_repository::EntryRepository;
pub use meta_repository::MetaRepository;
pub use peptide_repository::PeptideRepository;
