use chrono::NaiveDate;

use crate::domain::errors::JournalError;
use crate::domain::models::entry::{JournalEntry, ScoreSet};
use crate::io::api::mappers::peptide_mapper::PeptideMapper;
use shared::{Entry as EntryDto, EntryScores};

pub struct EntryMapper;

impl EntryMapper {
    pub fn to_dto(entry: JournalEntry) -> EntryDto {
        EntryDto {
            id: entry.id,
            date: entry.date.format("%Y-%m-%d").to_string(),
            scores: Self::scores_to_dto(entry.scores),
            peptides: entry
                .peptides
                .into_iter()
                .map(PeptideMapper::dose_to_dto)
                .collect(),
            notes: entry.notes,
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }

    pub fn scores_to_domain(dto: EntryScores) -> ScoreSet {
        ScoreSet {
            wellness: dto.wellness,
            energy: dto.energy,
            pain: dto.pain,
            sleep: dto.sleep,
            mobility: dto.mobility,
        }
    }

    pub fn scores_to_dto(scores: ScoreSet) -> EntryScores {
        EntryScores {
            wellness: scores.wellness,
            energy: scores.energy,
            pain: scores.pain,
            sleep: scores.sleep,
            mobility: scores.mobility,
        }
    }

    /// Parse a DTO date string. The date is a required field; an empty or
    /// malformed value is a validation failure, not a format error.
    pub fn parse_date(date: &str) -> Result<NaiveDate, JournalError> {
        if date.trim().is_empty() {
            return Err(JournalError::Validation("date is required".to_string()));
        }
        date.parse().map_err(|_| {
            JournalError::Validation(format!("invalid date: {} (expected YYYY-MM-DD)", date))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            EntryMapper::parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );

        assert!(matches!(
            EntryMapper::parse_date(""),
            Err(JournalError::Validation(_))
        ));
        assert!(matches!(
            EntryMapper::parse_date("15/01/2024"),
            Err(JournalError::Validation(_))
        ));
    }
}
