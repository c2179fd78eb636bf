//! Console report: ranking table, category distribution and score statistics

use crate::batch::ScoredRecord;
use gemscore_fuzzy::{Category, InputVariable};
use ndarray::Array1;
use serde::Serialize;
use std::cmp::Ordering;
use std::io::{self, Write};

const RULE_WIDTH: usize = 100;

/// Descriptive statistics over the valid scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two scores
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Count and share of one category among the valid records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    pub percentage: f64,
}

/// Statistics over the scored records, `None` when nothing was scored
pub fn summarize(records: &[ScoredRecord]) -> Option<SummaryStatistics> {
    let scores: Array1<f64> = records.iter().filter_map(ScoredRecord::score).collect();
    let count = scores.len();
    let mean = scores.mean()?;

    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = if count % 2 == 1 {
        sorted[count / 2]
    } else {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    };

    Some(SummaryStatistics {
        count,
        mean,
        median,
        std_dev: (count > 1).then(|| scores.std(1.0)),
        min: sorted[0],
        max: sorted[count - 1],
    })
}

/// Category counts ordered by count, most frequent first. Ties list the
/// better category first. Categories with no records are omitted.
pub fn category_distribution(records: &[ScoredRecord]) -> Vec<CategoryShare> {
    let valid = records.iter().filter(|r| r.is_valid()).count();
    let mut shares: Vec<CategoryShare> = Category::ALL
        .iter()
        .rev()
        .map(|&category| {
            let count = records
                .iter()
                .filter(|r| r.category() == Some(category))
                .count();
            CategoryShare {
                category,
                count,
                percentage: if valid == 0 {
                    0.0
                } else {
                    count as f64 / valid as f64 * 100.0
                },
            }
        })
        .filter(|share| share.count > 0)
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// The `n` best scored records, highest score first; equal scores keep
/// their input order
pub fn top_n(records: &[ScoredRecord], n: usize) -> Vec<&ScoredRecord> {
    let mut valid: Vec<&ScoredRecord> = records.iter().filter(|r| r.is_valid()).collect();
    valid.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(Ordering::Equal)
    });
    valid.truncate(n);
    valid
}

fn fmt_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Write the ranking table of the `n` best records
pub fn write_top_table<W: Write>(
    out: &mut W,
    records: &[ScoredRecord],
    n: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "{:>5}  {:<40} {:<18} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7}  {}",
        "Rank", "Institution", "Country", "AR", "ER", "FSR", "CPP", "PhD", "Score", "Category"
    )?;
    for scored in top_n(records, n) {
        let record = &scored.record;
        writeln!(
            out,
            "{:>5}  {:<40} {:<18} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7.2}  {}",
            record.rank,
            truncate(&record.institution, 40),
            truncate(&record.country, 18),
            fmt_cell(record.score(InputVariable::AcademicReputation)),
            fmt_cell(record.score(InputVariable::EmployerReputation)),
            fmt_cell(record.score(InputVariable::FacultyStudentRatio)),
            fmt_cell(record.score(InputVariable::CitationsPerPaper)),
            fmt_cell(record.score(InputVariable::StaffPhd)),
            scored.score().unwrap_or(f64::NAN),
            scored.category_label(),
        )?;
    }
    Ok(())
}

/// Write the summary statistics section
pub fn write_summary<W: Write>(out: &mut W, records: &[ScoredRecord]) -> io::Result<()> {
    writeln!(out, "Employability Category Distribution:")?;
    for share in category_distribution(records) {
        writeln!(
            out,
            "  {:<12}: {:>4} ({:>5.1}%)",
            share.category.as_str(),
            share.count,
            share.percentage
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Employability Score Statistics:")?;
    match summarize(records) {
        Some(stats) => {
            writeln!(out, "  Mean:   {:.2}", stats.mean)?;
            writeln!(out, "  Median: {:.2}", stats.median)?;
            match stats.std_dev {
                Some(std) => writeln!(out, "  Std:    {std:.2}")?,
                None => writeln!(out, "  Std:    n/a")?,
            }
            writeln!(out, "  Min:    {:.2}", stats.min)?;
            writeln!(out, "  Max:    {:.2}", stats.max)?;
        }
        None => writeln!(out, "  No records could be scored")?,
    }

    let failed = records.len() - records.iter().filter(|r| r.is_valid()).count();
    if failed > 0 {
        writeln!(out)?;
        writeln!(out, "Records that could not be scored: {failed}")?;
    }
    Ok(())
}

/// Write the full report: banner, model attributes, ranking and summary
pub fn write_report<W: Write>(
    out: &mut W,
    source: &str,
    records: &[ScoredRecord],
    n: usize,
) -> io::Result<()> {
    banner(
        out,
        "FUZZY INFERENCE SYSTEM FOR SDG 4: GRADUATE EMPLOYABILITY ASSESSMENT",
    )?;
    writeln!(out, "Source: {source}")?;
    writeln!(out, "✓ Loaded {} universities", records.len())?;
    writeln!(out)?;

    banner(out, "ATTRIBUTES USED IN THE MODEL:")?;
    for (i, variable) in InputVariable::ALL.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, variable.title())?;
    }
    writeln!(out)?;

    banner(
        out,
        &format!("TOP {n} UNIVERSITIES BY EMPLOYABILITY SCORE"),
    )?;
    writeln!(out)?;
    write_top_table(out, records, n)?;
    writeln!(out)?;

    banner(out, "SUMMARY STATISTICS")?;
    writeln!(out)?;
    write_summary(out, records)
}
