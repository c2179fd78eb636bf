//! Results CSV writer

use crate::batch::ScoredRecord;
use crate::error::{DatasetError, Result};
use gemscore_fuzzy::InputVariable;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One output row; `None` is written as an empty cell
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    #[serde(rename = "Rank")]
    rank: i64,
    #[serde(rename = "Institution")]
    institution: &'a str,
    #[serde(rename = "Country")]
    country: &'a str,
    #[serde(rename = "Academic_Reputation")]
    academic_reputation: Option<f64>,
    #[serde(rename = "Employer_Reputation")]
    employer_reputation: Option<f64>,
    #[serde(rename = "Faculty_Student_Ratio")]
    faculty_student_ratio: Option<f64>,
    #[serde(rename = "Citations_per_Paper")]
    citations_per_paper: Option<f64>,
    #[serde(rename = "Staff_with_PhD")]
    staff_phd: Option<f64>,
    #[serde(rename = "Employability_Score")]
    score: Option<f64>,
    #[serde(rename = "Employability_Category")]
    category: &'static str,
}

impl<'a> From<&'a ScoredRecord> for ResultRow<'a> {
    fn from(scored: &'a ScoredRecord) -> Self {
        let record = &scored.record;
        Self {
            rank: record.rank,
            institution: &record.institution,
            country: &record.country,
            academic_reputation: record.score(InputVariable::AcademicReputation),
            employer_reputation: record.score(InputVariable::EmployerReputation),
            faculty_student_ratio: record.score(InputVariable::FacultyStudentRatio),
            citations_per_paper: record.score(InputVariable::CitationsPerPaper),
            staff_phd: record.score(InputVariable::StaffPhd),
            score: scored.score(),
            category: scored.category_label(),
        }
    }
}

/// Write all records, failed ones included, to `writer`
pub fn write_results<W: Write>(writer: W, records: &[ScoredRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for scored in records {
        csv_writer.serialize(ResultRow::from(scored))?;
    }
    csv_writer
        .flush()
        .map_err(|e| DatasetError::Csv(csv::Error::from(e)))?;
    Ok(())
}

/// Write the results file at `path` (UTF-8)
pub fn export_results<P: AsRef<Path>>(path: P, records: &[ScoredRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| DatasetError::io(path, e))?;
    write_results(std::io::BufWriter::new(file), records)?;
    info!("Results saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Outcome;
    use crate::dataset::UniversityRecord;
    use gemscore_fuzzy::InferenceResult;

    fn records() -> Vec<ScoredRecord> {
        vec![
            ScoredRecord {
                record: UniversityRecord {
                    rank: 1,
                    institution: "Peking University".to_string(),
                    country: "China (Mainland)".to_string(),
                    scores: [Some(100.0), Some(99.8), None, Some(88.1), Some(100.0)],
                },
                outcome: Outcome::Scored(InferenceResult::from_score(83.33)),
            },
            ScoredRecord {
                record: UniversityRecord {
                    rank: 2,
                    institution: "Institute, of Commas".to_string(),
                    country: "Japan".to_string(),
                    scores: [Some(50.0), Some(100.0), Some(75.0), Some(30.0), Some(50.0)],
                },
                outcome: Outcome::Failed("Inference failed".to_string()),
            },
        ]
    }

    #[test]
    fn test_write_results_layout() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &records()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Rank,Institution,Country,Academic_Reputation,Employer_Reputation,Faculty_Student_Ratio,Citations_per_Paper,Staff_with_PhD,Employability_Score,Employability_Category"
        );
        assert_eq!(
            lines[1],
            "1,Peking University,China (Mainland),100.0,99.8,,88.1,100.0,83.33,Excellent"
        );
        assert_eq!(
            lines[2],
            "2,\"Institute, of Commas\",Japan,50.0,100.0,75.0,30.0,50.0,,Error"
        );
    }

    #[test]
    fn test_export_results_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        export_results(&path, &records()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][9], "Error");
        assert_eq!(&rows[1][8], "");
    }
}
