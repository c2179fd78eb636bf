//! Batch scoring with per-record error recovery
//!
//! A record whose inference fails is kept with an `Error` category and no
//! score; the rest of the batch is unaffected.

use crate::config::ScoringConfig;
use crate::dataset::UniversityRecord;
use gemscore_fuzzy::{Category, EmployabilityScorer, InferenceResult};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

/// Category label written for records that could not be scored
pub const ERROR_LABEL: &str = "Error";

/// Outcome of scoring one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    Scored(InferenceResult),
    Failed(String),
}

/// A record together with its employability outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub record: UniversityRecord,
    pub outcome: Outcome,
}

impl ScoredRecord {
    pub fn score(&self) -> Option<f64> {
        match &self.outcome {
            Outcome::Scored(result) => Some(result.score),
            Outcome::Failed(_) => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match &self.outcome {
            Outcome::Scored(result) => Some(result.category),
            Outcome::Failed(_) => None,
        }
    }

    /// Category name, or `Error` for failed records
    pub fn category_label(&self) -> &'static str {
        self.category().map_or(ERROR_LABEL, Category::as_str)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Scored(_))
    }
}

fn score_one(
    scorer: &EmployabilityScorer,
    record: UniversityRecord,
    missing_value: f64,
) -> ScoredRecord {
    let request = record.request(missing_value);
    let outcome = match scorer.score(&request) {
        Ok(result) => Outcome::Scored(result),
        Err(err) => {
            warn!(
                "Could not score '{}' (rank {}): {}",
                record.institution, record.rank, err
            );
            Outcome::Failed(err.to_string())
        }
    };
    ScoredRecord { record, outcome }
}

/// Score every record, keeping input order
pub fn score_records(
    records: Vec<UniversityRecord>,
    scorer: &EmployabilityScorer,
    config: &ScoringConfig,
) -> Vec<ScoredRecord> {
    info!("Processing {} universities...", records.len());
    let missing_value = config.missing_value;

    let scored: Vec<ScoredRecord> = if config.parallel {
        records
            .into_par_iter()
            .map(|record| score_one(scorer, record, missing_value))
            .collect()
    } else {
        records
            .into_iter()
            .map(|record| score_one(scorer, record, missing_value))
            .collect()
    };

    let failed = scored.iter().filter(|r| !r.is_valid()).count();
    if failed > 0 {
        warn!("{} of {} records could not be scored", failed, scored.len());
    }
    scored
}

/// Error message of a failed record
pub fn failure_reason(record: &ScoredRecord) -> Option<&str> {
    match &record.outcome {
        Outcome::Failed(reason) => Some(reason),
        Outcome::Scored(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: i64, scores: [Option<f64>; 5]) -> UniversityRecord {
        UniversityRecord {
            rank,
            institution: format!("University {rank}"),
            country: "Testland".to_string(),
            scores,
        }
    }

    fn sample() -> Vec<UniversityRecord> {
        vec![
            record(1, [Some(100.0); 5]),
            // Neither rule 1 nor rule 5 can fire and every other rule is
            // silent: no centroid
            record(2, [Some(50.0), Some(100.0), Some(75.0), Some(30.0), Some(50.0)]),
            record(3, [Some(0.0), Some(0.0), None, None, None]),
            record(4, [None; 5]),
        ]
    }

    #[test]
    fn test_failed_record_does_not_abort_batch() {
        let scorer = EmployabilityScorer::new();
        let scored = score_records(sample(), &scorer, &ScoringConfig::default());

        assert_eq!(scored.len(), 4);
        assert_eq!(scored[0].score(), Some(83.33));
        assert_eq!(scored[0].category_label(), "Excellent");

        assert_eq!(scored[1].score(), None);
        assert_eq!(scored[1].category_label(), ERROR_LABEL);
        assert!(failure_reason(&scored[1]).unwrap().contains("no rule fired"));

        assert_eq!(scored[2].score(), Some(13.33));
        assert_eq!(scored[2].category_label(), "Poor");
    }

    #[test]
    fn test_missing_scores_use_configured_fallback() {
        let scorer = EmployabilityScorer::new();
        let scored = score_records(sample(), &scorer, &ScoringConfig::default());

        assert_eq!(scored[3].score(), Some(50.0));
        assert_eq!(scored[3].category(), Some(Category::Average));
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let scorer = EmployabilityScorer::new();
        let records: Vec<_> = (0..200)
            .map(|i| {
                let v = (i * 17 % 101) as f64;
                record(i, [Some(v), Some(100.0 - v), Some(40.0), Some(v), Some(60.0)])
            })
            .collect();

        let sequential = score_records(records.clone(), &scorer, &ScoringConfig::default());
        let parallel = score_records(
            records,
            &scorer,
            &ScoringConfig {
                parallel: true,
                ..ScoringConfig::default()
            },
        );

        assert_eq!(sequential, parallel);
    }
}
