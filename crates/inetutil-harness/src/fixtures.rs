//! Fixture loading and management.
//!
//! Packed addresses travel as lowercase hex strings (`"7f000001"`), so both
//! functions use plain strings for input and expected output.

use std::path::Path;

use inetutil_core::AddressFamily;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Function a case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    InetPton,
    InetNtop,
}

impl Function {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::InetPton => "inet_pton",
            Self::InetNtop => "inet_ntop",
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    pub function: Function,
    /// Symbolic family (`AF_INET`, `inet6`, ...) or a raw `AF_*` code.
    pub family: String,
    /// Address text for `inet_pton`, hex bytes for `inet_ntop`.
    pub input: String,
    /// Hex bytes for `inet_pton`, address text for `inet_ntop`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Expected error kind, e.g. `InvalidAddressFormat`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
}

impl FixtureCase {
    /// Raw `AF_*` code for the case's family.
    pub fn raw_family(&self) -> Result<i32, HarnessError> {
        if let Some(family) = AddressFamily::from_str_loose(&self.family) {
            return Ok(family.raw());
        }
        self.family.trim().parse::<i32>().map_err(|_| {
            HarnessError::invalid_fixture(&self.name, format!("unknown family '{}'", self.family))
        })
    }

    /// The outcome string the runner compares against: the expected output
    /// or `error:<Kind>`.
    #[must_use]
    pub fn expected(&self) -> String {
        match (&self.expected_output, &self.expected_error) {
            (Some(out), _) => out.clone(),
            (None, Some(kind)) => format!("error:{kind}"),
            (None, None) => String::new(),
        }
    }

    /// Checks that exactly one expectation is present and the family parses.
    pub fn validate(&self) -> Result<(), HarnessError> {
        match (&self.expected_output, &self.expected_error) {
            (Some(_), Some(_)) => {
                return Err(HarnessError::invalid_fixture(
                    &self.name,
                    "both expected_output and expected_error are set",
                ));
            }
            (None, None) => {
                return Err(HarnessError::invalid_fixture(
                    &self.name,
                    "one of expected_output or expected_error is required",
                ));
            }
            _ => {}
        }
        if self.function == Function::InetNtop {
            decode_hex(&self.input)?;
        }
        self.raw_family().map(|_| ())
    }
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Suite name, e.g. `inet/pton`.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let load = || -> Result<Self, HarnessError> {
            let content = std::fs::read_to_string(path)?;
            let set = Self::from_json(&content)?;
            set.validate()?;
            Ok(set)
        };
        load().map_err(|source| HarnessError::FixtureFile {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Loads every `*.json` fixture in `dir`, sorted by file name.
    pub fn load_dir(dir: &Path) -> Result<Vec<Self>, HarnessError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(HarnessError::NoFixtures(dir.to_path_buf()));
        }
        paths.iter().map(|path| Self::from_file(path)).collect()
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        self.cases.iter().try_for_each(FixtureCase::validate)
    }
}

/// Decodes a hex byte string. `:`, `-`, `_` and whitespace separators are
/// ignored, so `"7f:00:00:01"` and `"7f000001"` are the same input.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HarnessError> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !matches!(b, b':' | b'-' | b'_') && !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(HarnessError::InvalidHex(text.to_string()));
    }
    digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16);
            let lo = (pair[1] as char).to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi * 16 + lo) as u8),
                _ => Err(HarnessError::InvalidHex(text.to_string())),
            }
        })
        .collect()
}

/// Lowercase hex with no separators.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
