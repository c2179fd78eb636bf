//! Scoring and categorization
//!
//! Wraps one inference call and maps the crisp score onto the four ordinal
//! employability categories.

use crate::engine::InferenceEngine;
use crate::error::Result;
use crate::request::InferenceRequest;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Employability category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Poor,
    Average,
    Good,
    Excellent,
}

impl Category {
    /// All categories from worst to best
    pub const ALL: [Category; 4] = [
        Category::Poor,
        Category::Average,
        Category::Good,
        Category::Excellent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Poor => "Poor",
            Category::Average => "Average",
            Category::Good => "Good",
            Category::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Map a score onto its category.
///
/// Lower bounds are inclusive: 80 is Excellent, 60 Good, 40 Average.
/// Total over all reals; NaN falls through to Poor.
pub fn categorize(score: f64) -> Category {
    if score >= 80.0 {
        Category::Excellent
    } else if score >= 60.0 {
        Category::Good
    } else if score >= 40.0 {
        Category::Average
    } else {
        Category::Poor
    }
}

/// Score and category of one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceResult {
    pub score: f64,
    pub category: Category,
}

impl InferenceResult {
    pub fn from_score(score: f64) -> Self {
        Self {
            score,
            category: categorize(score),
        }
    }
}

/// Employability scorer
///
/// Holds one immutable [`InferenceEngine`]; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct EmployabilityScorer {
    engine: InferenceEngine,
}

impl EmployabilityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: InferenceEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Score one record
    pub fn score(&self, request: &InferenceRequest) -> Result<InferenceResult> {
        let score = self.engine.infer(request)?;
        let result = InferenceResult::from_score(score);
        debug!("Scored {:.2} ({})", result.score, result.category);
        Ok(result)
    }
}
