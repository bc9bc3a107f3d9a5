//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{}: {source}", path.display())]
    FixtureFile {
        path: PathBuf,
        #[source]
        source: Box<HarnessError>,
    },
    #[error("no fixture JSON files found in {}", .0.display())]
    NoFixtures(PathBuf),
    #[error("fixture case '{case}': {reason}")]
    InvalidFixture { case: String, reason: String },
    #[error("strategy '{0}' is not available on this platform")]
    StrategyUnavailable(&'static str),
    #[error("invalid byte string '{0}': expected hex digits")]
    InvalidHex(String),
}

impl HarnessError {
    pub(crate) fn invalid_fixture(case: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFixture {
            case: case.to_string(),
            reason: reason.into(),
        }
    }
}
