//! # IO Module
//!
//! Provides the interface layer between the user interface and the domain
//! logic.
//!
//! This module is the adapter layer that translates UI requests into domain
//! operations and formats domain responses for UI consumption. The entry
//! points are plain callable functions over [`crate::AppState`]; no wire
//! protocol is involved, the UI shell links against this crate and calls
//! them directly.
//!
//! ## Key Responsibilities
//!
//! - **Entry Points**: One function per UI-facing operation
//! - **DTO Mapping**: Converting between `shared` DTOs and domain objects
//! - **Session Handling**: Applying the current analytics window and edit
//!   selection
//! - **Error Translation**: Domain errors stay typed (`JournalError`); the
//!   shell renders them via `Display`

pub mod api;

pub use api::*;
