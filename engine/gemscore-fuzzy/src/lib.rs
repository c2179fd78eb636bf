//! # gemscore-fuzzy - Graduate Employability Fuzzy Inference
//!
//! A fixed Mamdani fuzzy inference system that turns five normalized
//! university ranking indicators into a graduate employability score.
//!
//! ## Model
//!
//! - **Inputs** (universe `[0, 100]`): academic reputation, employer
//!   reputation, faculty/student ratio, citations per paper, staff with PhD.
//!   Each has the labels `low (0,0,50)`, `medium (0,50,100)` and
//!   `high (50,100,100)`.
//! - **Output** (universe `[0, 100]`): employability with `poor (0,0,40)`,
//!   `average (20,50,80)`, `good (60,80,100)` and `excellent (80,100,100)`.
//! - **Rules**: eight fixed rules, see [`rules::RuleBase::employability`].
//! - **Operators**: min for AND, max for OR, max aggregation, centroid
//!   defuzzification.
//!
//! ## Example
//!
//! ```rust
//! use gemscore_fuzzy::{Category, EmployabilityScorer, InferenceRequest};
//!
//! let scorer = EmployabilityScorer::new();
//! let result = scorer.score(&InferenceRequest::new(100.0, 100.0, 100.0, 100.0, 100.0))?;
//!
//! assert_eq!(result.score, 83.33);
//! assert_eq!(result.category, Category::Excellent);
//! # Ok::<(), gemscore_fuzzy::FuzzyError>(())
//! ```
//!
//! ## Errors
//!
//! - [`FuzzyError::InvalidInput`] for NaN or infinite inputs
//! - [`FuzzyError::Inference`] when no rule fires and the centroid is
//!   undefined
//!
//! Neither is recovered internally; batch callers decide what a failed record
//! becomes.

pub mod engine;
pub mod error;
pub mod membership;
pub mod request;
pub mod rules;
pub mod scoring;
pub mod variable;

pub use engine::{Activation, InferenceEngine, InferenceTrace};
pub use error::{FuzzyError, Result};
pub use membership::{trimf, Triangular};
pub use request::{InferenceRequest, InputVariable, DEFAULT_SCORE};
pub use rules::{Antecedent, FuzzifiedInputs, FuzzyRule, RuleBase};
pub use scoring::{categorize, Category, EmployabilityScorer, InferenceResult};
pub use variable::{Degrees, InputTerm, Label, LinguisticVariable, OutputTerm, Universe};
