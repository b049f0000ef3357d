//! # Storage Module
//!
//! Data persistence for the wellness journal.
//!
//! The domain layer only sees the abstraction in [`traits`]: typed
//! repositories created from a [`Connection`] factory. The concrete
//! implementation in [`json`] stores each collection as one JSON blob file
//! in the data directory, which keeps the on-disk format identical to the
//! backup interchange format.

pub mod json;
pub mod traits;

pub use traits::{meta_keys, Connection, EntryStorage, MetaStorage, PeptideStorage};
