//! # gemscore CLI Tool
//!
//! Command-line front end for the graduate employability fuzzy model. It reads
//! a QS rankings export, scores every university, prints a ranking report and
//! writes the results to CSV.
//!
//! ## Commands
//!
//! - `score`: score a rankings CSV, print the report and export the results
//! - `evaluate`: score one set of indicator values, optionally with the full
//!   inference trace
//! - `rules`: print the membership functions and the rule base
//!
//! ## Quick Start
//!
//! ```bash
//! # Score the export and write QS_Asia_2025_Employability_Results.csv
//! gemscore score dataset.csv
//!
//! # Top 10 only, custom output, scored in parallel
//! gemscore score dataset.csv --top 10 --output results.csv --parallel
//!
//! # One university by hand; omitted indicators default to 50
//! gemscore evaluate --academic-reputation 92 --employer-reputation 88 --explain
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemscore_fuzzy::{
    EmployabilityScorer, InferenceRequest, InputTerm, InputVariable, Label, OutputTerm,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod report;

pub use config::ToolConfig;
pub use error::DatasetError;

/// gemscore application
#[derive(Parser, Debug)]
#[command(name = "gemscore")]
#[command(about = "Graduate employability scoring with a fuzzy inference model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every university in a rankings export
    Score {
        /// Rankings CSV (Latin-1)
        input: PathBuf,
        /// Results CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Rows in the ranking table
        #[arg(short = 'n', long)]
        top: Option<usize>,
        /// Score records in parallel
        #[arg(long)]
        parallel: bool,
        /// Print the report without writing the results file
        #[arg(long)]
        no_export: bool,
    },
    /// Score a single set of indicator values
    Evaluate {
        #[arg(long)]
        academic_reputation: Option<f64>,
        #[arg(long)]
        employer_reputation: Option<f64>,
        #[arg(long)]
        faculty_student_ratio: Option<f64>,
        #[arg(long)]
        citations_per_paper: Option<f64>,
        #[arg(long)]
        staff_phd: Option<f64>,
        /// Print fuzzified degrees, rule strengths and output activation
        #[arg(long)]
        explain: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the membership functions and rules of the model
    Rules,
}

impl Cli {
    /// Effective log level from `--verbose`, `--quiet` and `--log-level`
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            return tracing::Level::DEBUG;
        }
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::INFO,
        }
    }
}

/// Install the stderr log subscriber. Stdout is left to the report.
pub fn init_logging(cli: &Cli) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .try_init();
}

/// Run a command, writing its output to stdout
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &mut out)
}

/// Run a command, writing its output to `out`
pub fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = ToolConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Score {
            input,
            output,
            top,
            parallel,
            no_export,
        } => {
            let mut config = config;
            if let Some(output) = output {
                config.output.path = output;
            }
            if let Some(top) = top {
                config.report.top_n = top;
            }
            config.scoring.parallel |= parallel;
            score_command(&input, &config, !no_export, out)
        }
        Commands::Evaluate {
            academic_reputation,
            employer_reputation,
            faculty_student_ratio,
            citations_per_paper,
            staff_phd,
            explain,
            json,
        } => {
            let request = InferenceRequest::from_optional(
                [
                    academic_reputation,
                    employer_reputation,
                    faculty_student_ratio,
                    citations_per_paper,
                    staff_phd,
                ],
                config.scoring.missing_value,
            );
            evaluate_command(&request, explain, json, out)
        }
        Commands::Rules => rules_command(out),
    }
}

fn score_command<W: Write>(
    input: &Path,
    config: &ToolConfig,
    export: bool,
    out: &mut W,
) -> Result<()> {
    let records = dataset::read_rankings(input, config)
        .with_context(|| format!("Failed to read rankings from '{}'", input.display()))?;

    let scorer = EmployabilityScorer::new();
    let scored = batch::score_records(records, &scorer, &config.scoring);

    report::write_report(
        out,
        &input.display().to_string(),
        &scored,
        config.report.top_n,
    )?;

    if export {
        let path = &config.output.path;
        export::export_results(path, &scored)
            .with_context(|| format!("Failed to write results to '{}'", path.display()))?;
        writeln!(out)?;
        writeln!(out, "✓ Results saved to: {}", path.display())?;
        writeln!(out, "✓ Output contains {} universities", scored.len())?;
    }

    info!("Scoring complete");
    Ok(())
}

fn evaluate_command<W: Write>(
    request: &InferenceRequest,
    explain: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let scorer = EmployabilityScorer::new();

    if explain {
        let trace = scorer.engine().explain(request)?;
        let result = gemscore_fuzzy::InferenceResult::from_score(trace.score);
        if json {
            let value = serde_json::json!({ "result": result, "trace": trace });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            return Ok(());
        }

        writeln!(out, "Fuzzified inputs:")?;
        for variable in InputVariable::ALL {
            let degrees = trace.fuzzified.of(variable);
            write!(out, "  {:<22} {:>7.2} ", variable.as_str(), request.get(variable))?;
            for term in InputTerm::ALL {
                write!(out, " {}={:.3}", term, degrees.get(*term))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "Rules:")?;
        for (i, (rule, strength)) in scorer
            .engine()
            .rules()
            .iter()
            .zip(&trace.firing_strengths)
            .enumerate()
        {
            writeln!(out, "  {:>2}. [{:.3}] {}", i + 1, strength, rule)?;
        }

        writeln!(out, "Output activation:")?;
        for (term, level) in trace.activation.iter() {
            writeln!(out, "  {:<10} {:.3}", term, level)?;
        }
        writeln!(out, "Centroid: {:.6}", trace.raw_score)?;
        writeln!(out, "Employability: {:.2} ({})", result.score, result.category)?;
        return Ok(());
    }

    let result = scorer.score(request)?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        writeln!(out, "Employability: {:.2} ({})", result.score, result.category)?;
    }
    Ok(())
}

fn rules_command<W: Write>(out: &mut W) -> Result<()> {
    let scorer = EmployabilityScorer::new();
    let engine = scorer.engine();

    writeln!(out, "Input terms (all five indicators, universe 0-100):")?;
    let indicator = engine.input_variable(InputVariable::AcademicReputation);
    for (term, mf) in indicator.terms() {
        writeln!(out, "  {:<10} ({}, {}, {})", term, mf.a, mf.b, mf.c)?;
    }

    writeln!(out, "Output terms (employability, universe 0-100):")?;
    for term in OutputTerm::ALL {
        let mf = engine.output_variable().term(*term);
        writeln!(out, "  {:<10} ({}, {}, {})", term, mf.a, mf.b, mf.c)?;
    }

    writeln!(out, "Rules:")?;
    for (i, rule) in engine.rules().iter().enumerate() {
        writeln!(out, "  {:>2}. {}", i + 1, rule)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_command() {
        let cli = Cli::try_parse_from([
            "gemscore",
            "score",
            "rankings.csv",
            "--top",
            "5",
            "--parallel",
            "--log-level",
            "warn",
        ])
        .unwrap();

        match cli.command {
            Commands::Score {
                ref input,
                top,
                parallel,
                no_export,
                ..
            } => {
                assert_eq!(input, &PathBuf::from("rankings.csv"));
                assert_eq!(top, Some(5));
                assert!(parallel);
                assert!(!no_export);
            }
            ref other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_verbose_and_quiet_override_log_level() {
        let verbose = Cli::try_parse_from(["gemscore", "-v", "rules"]).unwrap();
        assert_eq!(verbose.log_level(), tracing::Level::DEBUG);

        let quiet = Cli::try_parse_from(["gemscore", "rules", "--quiet"]).unwrap();
        assert_eq!(quiet.log_level(), tracing::Level::ERROR);

        assert!(Cli::try_parse_from(["gemscore", "-v", "-q", "rules"]).is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let cli = Cli::try_parse_from(["gemscore", "--log-level", "chatty", "rules"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_evaluate_arguments() {
        let cli = Cli::try_parse_from([
            "gemscore",
            "evaluate",
            "--academic-reputation",
            "92.5",
            "--staff-phd",
            "40",
            "--explain",
        ])
        .unwrap();

        match cli.command {
            Commands::Evaluate {
                academic_reputation,
                employer_reputation,
                staff_phd,
                explain,
                json,
                ..
            } => {
                assert_eq!(academic_reputation, Some(92.5));
                assert_eq!(employer_reputation, None);
                assert_eq!(staff_phd, Some(40.0));
                assert!(explain);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
