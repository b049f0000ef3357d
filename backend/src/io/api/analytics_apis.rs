//! # API for the analytics view
//!
//! The summary cards, the peptide usage table, and the chart projections,
//! all computed over the session's selected window.

use chrono::{Local, NaiveDate};
use log::info;

use crate::domain::commands::analytics::AnalyticsWindow;
use crate::domain::models::entry::JournalEntry;
use crate::storage::Connection;
use crate::AppState;
use shared::{
    AnalyticsSummaryResponse, PeptideUsageResponse, PeptideUsageRow,
    SetAnalyticsWindowRequest, TimeSeriesResponse,
};

use super::mappers::PeptideMapper;

/// Change the analytics window for the session. `days = None` selects
/// all time.
pub fn set_analytics_window<C: Connection>(
    state: &AppState<C>,
    request: SetAnalyticsWindowRequest,
) {
    let window = match request.days {
        Some(days) => AnalyticsWindow::Days(days),
        None => AnalyticsWindow::AllTime,
    };

    info!("api::set_analytics_window - {:?}", window);
    state.session.lock().unwrap().selected_window = window;
}

/// Averages for the summary cards over the selected window.
pub fn get_analytics_summary<C: Connection>(state: &AppState<C>) -> AnalyticsSummaryResponse {
    let filtered = filtered_entries(state, Local::now().date_naive());
    let summary = state.analytics_service.summarize(&filtered);

    AnalyticsSummaryResponse {
        avg_wellness: summary.avg_wellness,
        avg_energy: summary.avg_energy,
        avg_pain: summary.avg_pain,
        entry_count: summary.entry_count,
    }
}

/// Per-peptide dose aggregates over the selected window, most frequently
/// dosed first.
pub fn get_peptide_usage<C: Connection>(state: &AppState<C>) -> PeptideUsageResponse {
    let filtered = filtered_entries(state, Local::now().date_naive());

    PeptideUsageResponse {
        rows: state
            .analytics_service
            .aggregate_peptides(&filtered)
            .into_iter()
            .map(|usage| PeptideUsageRow {
                name: usage.name,
                dose_count: usage.dose_count,
                total_dosage: usage.total_dosage,
                unit: PeptideMapper::unit_to_dto(usage.unit),
            })
            .collect(),
    }
}

/// Chart-ready score series over the selected window, oldest first.
pub fn get_time_series<C: Connection>(state: &AppState<C>) -> TimeSeriesResponse {
    let filtered = filtered_entries(state, Local::now().date_naive());
    let series = state.analytics_service.time_series(&filtered);

    TimeSeriesResponse {
        labels: series
            .labels
            .iter()
            .map(|date| date.format("%b %-d").to_string())
            .collect(),
        wellness: series.wellness,
        energy: series.energy,
        pain: series.pain,
        sleep: series.sleep,
        mobility: series.mobility,
    }
}

fn filtered_entries<C: Connection>(state: &AppState<C>, today: NaiveDate) -> Vec<JournalEntry> {
    let window = state.session.lock().unwrap().selected_window;
    let entries = state.entry_service.list_entries();
    state
        .analytics_service
        .filter_by_window(&entries, window, today)
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
    fn test_window_selection_applies_to_summary() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        // Ancient entry falls outside the default 7-day window.
        save(&state, "2020-01-01");

        let summary = get_analytics_summary(&state);
        assert_eq!(summary.entry_count, 0);
        assert_eq!(summary.avg_wellness, None);

        set_analytics_window(&state, SetAnalyticsWindowRequest { days: None });
        let summary = get_analytics_summary(&state);
        assert_eq!(summary.entry_count, 1);
        assert_eq!(summary.avg_wellness, Some(8.0));
    }

    #[test]
    fn test_time_series_labels_read_left_to_right() {
        let env = TestEnvironment::new().unwrap();
        let state = initialize_backend_with(env.connection.clone()).unwrap();

        save(&state, "2024-01-05");
        save(&state, "2024-01-03");
        set_analytics_window(&state, SetAnalyticsWindowRequest { days: None });

        let series = get_time_series(&state);
        assert_eq!(series.labels, vec!["Jan 3", "Jan 5"]);
        assert_eq!(series.wellness, vec![8, 8]);
    }
}
