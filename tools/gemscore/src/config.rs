//! Tool configuration
//!
//! Loaded from an optional TOML file. Every section and field has a default,
//! so a file only needs the values that differ from a QS Asia 2025 export:
//!
//! ```toml
//! [input]
//! header_rows = 2
//!
//! [columns]
//! rank = "2026"
//!
//! [scoring]
//! missing_value = 50.0
//! parallel = true
//!
//! [report]
//! top_n = 10
//! ```
//!
//! Membership functions and rules are not configurable.

use crate::error::{DatasetError, Result};
use gemscore_fuzzy::{InputVariable, DEFAULT_SCORE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default results file name
pub const DEFAULT_OUTPUT: &str = "QS_Asia_2025_Employability_Results.csv";

/// Complete tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    pub input: InputConfig,
    pub columns: ColumnConfig,
    pub scoring: ScoringConfig,
    pub report: ReportConfig,
    pub output: OutputConfig,
}

/// Layout of the rankings CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Header rows at the top of the file; columns are located in the last one
    pub header_rows: usize,
    /// Rows to drop right after the header
    pub skip_rows_after_header: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            header_rows: 2,
            skip_rows_after_header: 0,
        }
    }
}

/// Header labels of the columns that are read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub rank: String,
    pub institution: String,
    pub country: String,
    pub academic_reputation: String,
    pub employer_reputation: String,
    pub faculty_student_ratio: String,
    pub citations_per_paper: String,
    pub staff_phd: String,
}

impl ColumnConfig {
    /// Header label of an indicator column
    pub fn indicator(&self, variable: InputVariable) -> &str {
        match variable {
            InputVariable::AcademicReputation => &self.academic_reputation,
            InputVariable::EmployerReputation => &self.employer_reputation,
            InputVariable::FacultyStudentRatio => &self.faculty_student_ratio,
            InputVariable::CitationsPerPaper => &self.citations_per_paper,
            InputVariable::StaffPhd => &self.staff_phd,
        }
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            rank: "2025".to_string(),
            institution: "Institution Name".to_string(),
            country: "Country/ Territory".to_string(),
            academic_reputation: "Academic Reputation".to_string(),
            employer_reputation: "Employer Reputation".to_string(),
            faculty_student_ratio: "Faculty Student".to_string(),
            citations_per_paper: "Citations per Paper".to_string(),
            staff_phd: "Staff with PhD".to_string(),
        }
    }
}

/// Batch scoring options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Substitute for missing or non-numeric indicator cells
    pub missing_value: f64,
    /// Score records on the rayon thread pool
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            missing_value: DEFAULT_SCORE,
            parallel: false,
        }
    }
}

/// Console report options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows in the ranking table
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_n: 20 }
    }
}

/// Results file options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl ToolConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ToolConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.header_rows == 0 {
            return Err(DatasetError::InvalidConfig(
                "input.header_rows must be at least 1".to_string(),
            ));
        }
        if !self.scoring.missing_value.is_finite() {
            return Err(DatasetError::InvalidConfig(format!(
                "scoring.missing_value must be finite, got {}",
                self.scoring.missing_value
            )));
        }
        let labels = [
            ("rank", &self.columns.rank),
            ("institution", &self.columns.institution),
            ("country", &self.columns.country),
        ];
        for (key, label) in labels {
            if label.trim().is_empty() {
                return Err(DatasetError::InvalidConfig(format!(
                    "columns.{key} must not be empty"
                )));
            }
        }
        for variable in InputVariable::ALL {
            if self.columns.indicator(variable).trim().is_empty() {
                return Err(DatasetError::InvalidConfig(format!(
                    "columns.{variable} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
