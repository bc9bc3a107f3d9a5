//! CLI entrypoint for the inetutil conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inetutil_harness::fixtures::{FixtureSet, decode_hex, encode_hex};
use inetutil_harness::structured_log::{ArtifactIndex, LogEmitter, now_utc, validate_log_file};
use inetutil_harness::{
    ConformanceReport, HarnessError, StrategySelection, TestRunner, VerificationSummary,
};
use inetutil_platform::{AddressFamily, Strategy};

/// Address conversion tooling for inetutil.
#[derive(Debug, Parser)]
#[command(name = "inetutil-harness")]
#[command(about = "Conformance testing harness for inetutil")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert address text to packed bytes (printed as hex).
    Pton {
        /// Address family: inet, inet6, AF_INET, AF_INET6 or a raw code.
        family: String,
        /// Address text.
        text: String,
        /// Strategy (native|resolver). Defaults to INETUTIL_STRATEGY, then the build default.
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Convert packed bytes (hex) to canonical address text.
    Ntop {
        /// Address family: inet, inet6, AF_INET, AF_INET6 or a raw code.
        family: String,
        /// Packed address as hex, separators `:` `-` `_` allowed.
        bytes: String,
    },
    /// Verify strategies against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Strategy (native|resolver|both). Defaults to INETUTIL_STRATEGY, then the build default.
        #[arg(long)]
        strategy: Option<String>,
        /// Output report path (markdown; JSON is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        /// Log file path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn raw_family(family: &str) -> Result<i32, Box<dyn std::error::Error>> {
    if let Some(family) = AddressFamily::from_str_loose(family) {
        return Ok(family.raw());
    }
    family
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("unknown address family '{family}'").into())
}

fn single_strategy(flag: Option<&str>) -> Result<Strategy, Box<dyn std::error::Error>> {
    match StrategySelection::from_flag_or_env(flag) {
        StrategySelection::One(strategy) => Ok(strategy),
        StrategySelection::Both => Err("'both' is only valid for verify".into()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Pton {
            family,
            text,
            strategy,
        } => {
            let af = raw_family(&family)?;
            let strategy = single_strategy(strategy.as_deref())?;
            let backend = strategy
                .backend()
                .ok_or(HarnessError::StrategyUnavailable(strategy.name()))?;
            match backend.pton(af, &text) {
                Ok(bytes) => println!("{}", encode_hex(&bytes)),
                Err(err) => {
                    let class = if err.is_recoverable() { "value" } else { "fatal" };
                    return Err(format!("{} error ({}): {err}", class, err.kind()).into());
                }
            }
        }
        Command::Ntop { family, bytes } => {
            let af = raw_family(&family)?;
            let bytes = decode_hex(&bytes)?;
            let text = inetutil_platform::inet_ntop(af, &bytes)
                .map_err(|err| format!("{} error: {err}", err.kind()))?;
            println!("{text}");
        }
        Command::Verify {
            fixture,
            strategy,
            report,
            log,
            timestamp,
        } => {
            let selection = StrategySelection::from_flag_or_env(strategy.as_deref());
            eprintln!(
                "Verifying {} against fixtures in {}",
                selection.label(),
                fixture.display()
            );
            let fixture_sets = FixtureSet::load_dir(&fixture)?;

            let run_id = format!("verify-{}", selection.label());
            let mut emitter = log
                .as_deref()
                .map(|path| LogEmitter::to_file(path, &run_id))
                .transpose()?;

            let mut results = Vec::new();
            for strategy in selection.strategies() {
                let runner = TestRunner::new("fixture-verify", strategy)?;
                for set in &fixture_sets {
                    match emitter.as_mut() {
                        Some(emitter) => results.extend(runner.run_logged(set, emitter)?),
                        None => results.extend(runner.run(set)),
                    }
                }
            }
            if let Some(emitter) = emitter.as_mut() {
                emitter.flush()?;
            }

            // Stable ordering for reproducible reports.
            results.sort_by(|a, b| {
                a.symbol
                    .cmp(&b.symbol)
                    .then_with(|| a.family.cmp(&b.family))
                    .then_with(|| a.case_name.cmp(&b.case_name))
                    .then_with(|| a.strategy.cmp(&b.strategy))
            });

            let report_doc = ConformanceReport {
                title: String::from("inetutil Conformance Report"),
                strategy: selection.label(),
                timestamp: timestamp.unwrap_or_else(now_utc),
                summary: VerificationSummary::from_results(results),
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}, host_mismatches={}",
                report_doc.summary.total,
                report_doc.summary.passed,
                report_doc.summary.failed,
                report_doc.summary.host_mismatches
            );
            for failure in report_doc.summary.failures() {
                eprintln!("FAIL {} [{}]", failure.case_name, failure.strategy);
            }

            if let Some(report_path) = report {
                let mut index = ArtifactIndex::new(&run_id);
                eprintln!("Writing report to {}", report_path.display());
                let markdown = report_doc.to_markdown();
                std::fs::write(&report_path, &markdown)?;
                index.add_bytes(report_path.display().to_string(), "report", markdown.as_bytes());

                let json_path = report_path.with_extension("json");
                let json = report_doc.to_json();
                std::fs::write(&json_path, &json)?;
                index.add_bytes(json_path.display().to_string(), "report", json.as_bytes());

                if let Some(log_path) = &log {
                    index.add_file(log_path, "log")?;
                }
                let index_path = report_path.with_extension("artifacts.json");
                std::fs::write(&index_path, index.to_json()?)?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            if !errors.is_empty() {
                return Err(format!(
                    "{} validation error(s) in {} line(s) of {}",
                    errors.len(),
                    lines,
                    log.display()
                )
                .into());
            }
            eprintln!("{}: {lines} valid line(s)", log.display());
        }
    }

    Ok(())
}
