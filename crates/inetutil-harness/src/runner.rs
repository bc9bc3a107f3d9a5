//! Test execution engine.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Instant;

use inetutil_core::{AF_INET, AF_INET6, AddressBackend};
use inetutil_platform::Strategy;

use crate::diff;
use crate::error::HarnessError;
use crate::fixtures::{FixtureCase, FixtureSet, Function, decode_hex, encode_hex};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Runs fixture sets against one parsing strategy.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    pub strategy: Strategy,
    backend: Box<dyn AddressBackend + Send + Sync>,
}

/// What one case produced.
struct Execution {
    actual: String,
    errno: Option<i32>,
    latency_ns: u64,
    /// `(agrees, host rendering)` for `inet_pton` cases of a known family.
    host: Option<(bool, String)>,
}

impl TestRunner {
    /// Create a runner, failing if `strategy` is not available here.
    pub fn new(campaign: impl Into<String>, strategy: Strategy) -> Result<Self, HarnessError> {
        let backend = strategy
            .backend()
            .ok_or(HarnessError::StrategyUnavailable(strategy.name()))?;
        Ok(Self {
            campaign: campaign.into(),
            strategy,
            backend,
        })
    }

    /// Run all fixtures in a set and return results.
    #[must_use]
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| self.verify(case, &self.execute(case)))
            .collect()
    }

    /// Like [`run`](Self::run), also emitting one log entry per case plus
    /// start and end markers.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        emitter: &mut LogEmitter,
    ) -> Result<Vec<VerificationResult>, HarnessError> {
        emitter.emit_entry(
            LogEntry::new(String::new(), LogLevel::Info, "run_start")
                .with_strategy(self.strategy.name())
                .with_details(serde_json::json!({
                    "campaign": self.campaign,
                    "suite": fixture_set.family,
                    "cases": fixture_set.cases.len(),
                })),
        )?;

        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let run = self.execute(case);
            let result = self.verify(case, &run);

            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new(String::new(), level, "case_result")
                .with_strategy(self.strategy.name())
                .with_call(case.function.symbol(), case.family.clone())
                .with_outcome(outcome)
                .with_latency_ns(run.latency_ns)
                .with_details(serde_json::json!({
                    "case": case.name,
                    "expected": result.expected,
                    "actual": result.actual,
                    "host_parity": result.host_parity,
                }));
            if let Some(errno) = run.errno {
                entry = entry.with_errno(errno);
            }
            emitter.emit_entry(entry)?;
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.passed).count();
        emitter.emit_entry(
            LogEntry::new(
                String::new(),
                if failed == 0 {
                    LogLevel::Info
                } else {
                    LogLevel::Warn
                },
                "run_end",
            )
            .with_strategy(self.strategy.name())
            .with_details(serde_json::json!({
                "total": results.len(),
                "failed": failed,
            })),
        )?;
        Ok(results)
    }

    fn execute(&self, case: &FixtureCase) -> Execution {
        let af = match case.raw_family() {
            Ok(af) => af,
            Err(err) => {
                return Execution {
                    actual: format!("unsupported:{err}"),
                    errno: None,
                    latency_ns: 0,
                    host: None,
                };
            }
        };

        let start = Instant::now();
        let outcome = match case.function {
            Function::InetPton => self.backend.pton(af, &case.input).map(|b| encode_hex(&b)),
            Function::InetNtop => match decode_hex(&case.input) {
                Ok(bytes) => self.backend.ntop(af, &bytes),
                Err(err) => {
                    return Execution {
                        actual: format!("unsupported:{err}"),
                        errno: None,
                        latency_ns: 0,
                        host: None,
                    };
                }
            },
        };
        let latency_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

        let (actual, errno) = match outcome {
            Ok(out) => (out, None),
            Err(err) => (format!("error:{}", err.kind()), Some(err.errno())),
        };
        let host = match case.function {
            Function::InetPton => host_pton(af, &case.input).map(|host| match host {
                Some(bytes) => {
                    let host = encode_hex(&bytes);
                    (errno.is_none() && host == actual, host)
                }
                None => (errno.is_some(), String::from("error")),
            }),
            Function::InetNtop => None,
        };

        Execution {
            actual,
            errno,
            latency_ns,
            host,
        }
    }

    fn verify(&self, case: &FixtureCase, run: &Execution) -> VerificationResult {
        let expected = case.expected();
        let passed = run.actual == expected;

        let mut notes = Vec::new();
        if let Some((false, host)) = &run.host {
            notes.push(format!(
                "host parity mismatch: host={host}, impl={}",
                run.actual
            ));
        }
        let diff = if !passed {
            Some(diff::render_diff(&expected, &run.actual))
        } else if !notes.is_empty() {
            Some(notes.join("\n"))
        } else {
            None
        };

        VerificationResult {
            case_name: case.name.clone(),
            symbol: case.function.symbol().to_string(),
            family: case.family.clone(),
            strategy: self.strategy.name().to_string(),
            passed,
            expected,
            actual: run.actual.clone(),
            diff,
            host_parity: run.host.as_ref().map(|(agrees, _)| *agrees),
        }
    }
}

/// Parses with `std::net`. `None` when the family has no host parser,
/// `Some(None)` when the host rejects the text.
fn host_pton(af: i32, text: &str) -> Option<Option<Vec<u8>>> {
    match af {
        AF_INET => Some(text.parse::<Ipv4Addr>().ok().map(|a| a.octets().to_vec())),
        AF_INET6 => Some(text.parse::<Ipv6Addr>().ok().map(|a| a.octets().to_vec())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(cases: &str) -> FixtureSet {
        FixtureSet::from_json(&format!(
            r#"{{"version":"v1","family":"inet/unit","captured_at":"2026-02-09T00:00:00Z","cases":[{cases}]}}"#
        ))
        .expect("valid fixture json")
    }

    #[test]
    fn native_runner_passes_pton_and_ntop() {
        let set = fixture(
            r#"{"name":"v4","function":"inet_pton","family":"AF_INET","input":"192.0.2.1","expected_output":"c0000201"},
               {"name":"v6","function":"inet_ntop","family":"AF_INET6","input":"20010db8000000000000000000000001","expected_output":"2001:db8::1"}"#,
        );
        let results = TestRunner::new("unit", Strategy::Native).unwrap().run(&set);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
        assert_eq!(results[0].host_parity, Some(true));
        assert_eq!(results[1].host_parity, None);
        assert_eq!(results[0].strategy, "native");
    }

    #[test]
    fn error_kinds_are_compared() {
        let set = fixture(
            r#"{"name":"bad","function":"inet_pton","family":"inet","input":"1.2.3.256","expected_error":"InvalidAddressFormat"},
               {"name":"short","function":"inet_ntop","family":"inet6","input":"0001","expected_error":"InvalidLength"},
               {"name":"af","function":"inet_pton","family":"99","input":"1.2.3.4","expected_error":"UnsupportedFamily"}"#,
        );
        let results = TestRunner::new("unit", Strategy::Native).unwrap().run(&set);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
        assert_eq!(results[0].host_parity, Some(true));
        assert_eq!(results[2].host_parity, None);
    }

    #[test]
    fn mismatch_produces_diff() {
        let set = fixture(
            r#"{"name":"wrong","function":"inet_ntop","family":"inet6","input":"00000000000000000000000000000001","expected_output":"0::1"}"#,
        );
        let results = TestRunner::new("unit", Strategy::Native).unwrap().run(&set);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, "::1");
        assert!(results[0].diff.as_deref().unwrap().contains("+::1"));
    }

    #[test]
    fn run_logged_emits_valid_jsonl() {
        let set = fixture(
            r#"{"name":"v4","function":"inet_pton","family":"AF_INET","input":"10.0.0.1","expected_output":"0a000001"},
               {"name":"bad","function":"inet_pton","family":"AF_INET","input":"10.0.0","expected_error":"InvalidAddressFormat"}"#,
        );
        let runner = TestRunner::new("unit", Strategy::Native).unwrap();
        let mut emitter = LogEmitter::to_buffer("unit-run");
        let results = runner.run_logged(&set, &mut emitter).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(emitter.emitted(), 4);

        let text = String::from_utf8(emitter.buffered().to_vec()).unwrap();
        let (lines, errors) = crate::structured_log::validate_log_text(&text);
        assert_eq!(lines, 4);
        assert!(errors.is_empty(), "{errors:?}");
        let second: serde_json::Value = serde_json::from_str(text.lines().nth(2).unwrap()).unwrap();
        assert_eq!(second["errno"], 22);
        assert_eq!(second["outcome"], "pass");
    }

    #[test]
    fn host_parser_covers_known_families_only() {
        assert_eq!(host_pton(AF_INET, "1.2.3.4"), Some(Some(vec![1, 2, 3, 4])));
        assert_eq!(host_pton(AF_INET, "1.2.3"), Some(None));
        assert_eq!(host_pton(99, "1.2.3.4"), None);
    }
}
