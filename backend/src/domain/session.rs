//! Transient UI selection state.
//!
//! One active journal plus the user's current view selections: the
//! analytics window and, while the edit flow is open, the id of the entry
//! being edited. Constructed once at startup and threaded through the io
//! layer; no free-floating module state.

use crate::domain::commands::analytics::AnalyticsWindow;

#[derive(Debug, Clone)]
pub struct Session {
    pub selected_window: AnalyticsWindow,
    pub editing_entry_id: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            // The analytics view opens on the last week.
            selected_window: AnalyticsWindow::Days(7),
            editing_entry_id: None,
        }
    }
}
