//! Crisp inputs of one inference call

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value substituted for a missing or non-numeric indicator
pub const DEFAULT_SCORE: f64 = 50.0;

/// The five ranking indicators fed into the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputVariable {
    AcademicReputation,
    EmployerReputation,
    FacultyStudentRatio,
    CitationsPerPaper,
    StaffPhd,
}

impl InputVariable {
    pub const ALL: [InputVariable; 5] = [
        InputVariable::AcademicReputation,
        InputVariable::EmployerReputation,
        InputVariable::FacultyStudentRatio,
        InputVariable::CitationsPerPaper,
        InputVariable::StaffPhd,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Key used in requests and rule text
    pub fn as_str(self) -> &'static str {
        match self {
            InputVariable::AcademicReputation => "academic_reputation",
            InputVariable::EmployerReputation => "employer_reputation",
            InputVariable::FacultyStudentRatio => "faculty_student_ratio",
            InputVariable::CitationsPerPaper => "citations_per_paper",
            InputVariable::StaffPhd => "staff_phd",
        }
    }

    /// Human readable name for reports
    pub fn title(self) -> &'static str {
        match self {
            InputVariable::AcademicReputation => "Academic Reputation",
            InputVariable::EmployerReputation => "Employer Reputation",
            InputVariable::FacultyStudentRatio => "Faculty Student Ratio",
            InputVariable::CitationsPerPaper => "Citations per Paper",
            InputVariable::StaffPhd => "Staff with PhD",
        }
    }
}

impl fmt::Display for InputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Crisp indicator scores for one university.
///
/// Values are nominally in `[0, 100]`; anything outside saturates during
/// fuzzification. Non-finite values are rejected by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub academic_reputation: f64,
    pub employer_reputation: f64,
    pub faculty_student_ratio: f64,
    pub citations_per_paper: f64,
    pub staff_phd: f64,
}

impl InferenceRequest {
    pub fn new(
        academic_reputation: f64,
        employer_reputation: f64,
        faculty_student_ratio: f64,
        citations_per_paper: f64,
        staff_phd: f64,
    ) -> Self {
        Self {
            academic_reputation,
            employer_reputation,
            faculty_student_ratio,
            citations_per_paper,
            staff_phd,
        }
    }

    /// Every indicator at the same value
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    /// Build a request from possibly missing values, substituting `fallback`
    /// for every `None`.
    pub fn from_optional(values: [Option<f64>; 5], fallback: f64) -> Self {
        let mut request = Self::uniform(fallback);
        for (variable, value) in InputVariable::ALL.into_iter().zip(values) {
            if let Some(v) = value {
                request.set(variable, v);
            }
        }
        request
    }

    pub fn get(&self, variable: InputVariable) -> f64 {
        match variable {
            InputVariable::AcademicReputation => self.academic_reputation,
            InputVariable::EmployerReputation => self.employer_reputation,
            InputVariable::FacultyStudentRatio => self.faculty_student_ratio,
            InputVariable::CitationsPerPaper => self.citations_per_paper,
            InputVariable::StaffPhd => self.staff_phd,
        }
    }

    pub fn set(&mut self, variable: InputVariable, value: f64) {
        let slot = match variable {
            InputVariable::AcademicReputation => &mut self.academic_reputation,
            InputVariable::EmployerReputation => &mut self.employer_reputation,
            InputVariable::FacultyStudentRatio => &mut self.faculty_student_ratio,
            InputVariable::CitationsPerPaper => &mut self.citations_per_paper,
            InputVariable::StaffPhd => &mut self.staff_phd,
        };
        *slot = value;
    }

    /// `(variable, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (InputVariable, f64)> + '_ {
        InputVariable::ALL.into_iter().map(move |v| (v, self.get(v)))
    }
}

impl Default for InferenceRequest {
    fn default() -> Self {
        Self::uniform(DEFAULT_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_optional_fills_missing_with_fallback() {
        let request = InferenceRequest::from_optional(
            [Some(91.5), None, Some(12.0), None, Some(100.0)],
            DEFAULT_SCORE,
        );

        assert_eq!(request.academic_reputation, 91.5);
        assert_eq!(request.employer_reputation, 50.0);
        assert_eq!(request.faculty_student_ratio, 12.0);
        assert_eq!(request.citations_per_paper, 50.0);
        assert_eq!(request.staff_phd, 100.0);
    }

    #[test]
    fn test_get_set_by_variable() {
        let mut request = InferenceRequest::default();
        request.set(InputVariable::CitationsPerPaper, 77.0);

        assert_eq!(request.get(InputVariable::CitationsPerPaper), 77.0);
        assert_eq!(request.citations_per_paper, 77.0);
        assert_eq!(request.iter().count(), 5);
    }

    #[test]
    fn test_deserialize_from_named_keys() {
        let json = r#"{
            "academic_reputation": 80.0,
            "employer_reputation": 70.0,
            "faculty_student_ratio": 30.0,
            "citations_per_paper": 60.0,
            "staff_phd": 90.0
        }"#;
        let request: InferenceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request, InferenceRequest::new(80.0, 70.0, 30.0, 60.0, 90.0));
    }

    #[test]
    fn test_variable_names_match_request_keys() {
        let json = serde_json::to_value(InferenceRequest::default()).unwrap();
        for variable in InputVariable::ALL {
            assert!(json.get(variable.as_str()).is_some(), "{variable}");
        }
    }
}
