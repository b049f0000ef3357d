//! Analytics domain logic: derived views over the journal history.
//!
//! Everything here is a pure computation over a slice of entries and an
//! explicit reference date, so the same code serves the UI (with "today")
//! and the tests (with a fixed date). Note the ordering difference from the
//! history view: analytics output is oldest-first because charts read
//! left-to-right chronologically.

use chrono::{Duration, NaiveDate};

use crate::domain::commands::analytics::{
    AnalyticsWindow, PeptideUsage, ScoreSummary, TimeSeries,
};
use crate::domain::models::entry::JournalEntry;

#[derive(Clone, Default)]
pub struct AnalyticsService {}

impl AnalyticsService {
    pub fn new() -> Self {
        Self {}
    }

    /// Entries within the window, sorted ascending by date.
    ///
    /// `Days(n)` covers the last `n` calendar days ending at `today`: an
    /// entry dated exactly `today - n` falls outside the window.
    pub fn filter_by_window(
        &self,
        entries: &[JournalEntry],
        window: AnalyticsWindow,
        today: NaiveDate,
    ) -> Vec<JournalEntry> {
        let mut filtered: Vec<JournalEntry> = match window {
            AnalyticsWindow::AllTime => entries.to_vec(),
            AnalyticsWindow::Days(n) => {
                let cutoff = today - Duration::days(i64::from(n));
                entries.iter().filter(|e| e.date > cutoff).cloned().collect()
            }
        };

        filtered.sort_by(|a, b| a.date.cmp(&b.date));
        filtered
    }

    /// Averages for the summary cards, rounded to one decimal place.
    /// An empty window yields `None` averages, never zeros.
    pub fn summarize(&self, filtered: &[JournalEntry]) -> ScoreSummary {
        if filtered.is_empty() {
            return ScoreSummary {
                avg_wellness: None,
                avg_energy: None,
                avg_pain: None,
                entry_count: 0,
            };
        }

        let average = |score: fn(&JournalEntry) -> u8| -> f64 {
            let sum: u32 = filtered.iter().map(|e| u32::from(score(e))).sum();
            round_one_decimal(f64::from(sum) / filtered.len() as f64)
        };

        ScoreSummary {
            avg_wellness: Some(average(|e| e.scores.wellness)),
            avg_energy: Some(average(|e| e.scores.energy)),
            avg_pain: Some(average(|e| e.scores.pain)),
            entry_count: filtered.len(),
        }
    }

    /// Dose aggregates grouped by peptide name, most frequently dosed
    /// first. Every occurrence counts: a peptide logged twice in one entry
    /// counts twice. The unit is whichever was seen first for that name.
    pub fn aggregate_peptides(&self, filtered: &[JournalEntry]) -> Vec<PeptideUsage> {
        let mut usage: Vec<PeptideUsage> = Vec::new();

        for entry in filtered {
            for dose in &entry.peptides {
                match usage.iter_mut().find(|u| u.name == dose.name) {
                    Some(existing) => {
                        existing.dose_count += 1;
                        existing.total_dosage += dose.dosage;
                    }
                    None => usage.push(PeptideUsage {
                        name: dose.name.clone(),
                        dose_count: 1,
                        total_dosage: dose.dosage,
                        unit: dose.unit,
                    }),
                }
            }
        }

        // Stable sort keeps first-seen order between equal counts.
        usage.sort_by(|a, b| b.dose_count.cmp(&a.dose_count));
        usage
    }

    /// Chart projection: one label per entry with positionally aligned
    /// score series.
    pub fn time_series(&self, filtered: &[JournalEntry]) -> TimeSeries {
        let mut series = TimeSeries::default();

        for entry in filtered {
            series.labels.push(entry.date);
            series.wellness.push(entry.scores.wellness);
            series.energy.push(entry.scores.energy);
            series.pain.push(entry.scores.pain);
            series.sleep.push(entry.scores.sleep);
            series.mobility.push(entry.scores.mobility);
        }

        series
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
