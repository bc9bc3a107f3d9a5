//! Run-time strategy selection for the harness.
//!
//! Precedence: `--strategy` flag, then `INETUTIL_STRATEGY`, then the compiled
//! default. A value that does not name a strategy falls back to the compiled
//! default rather than failing the run.

use inetutil_platform::Strategy;

/// Environment variable consulted when no flag is given.
pub const STRATEGY_ENV: &str = "INETUTIL_STRATEGY";

/// Which strategies a harness run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategySelection {
    One(Strategy),
    /// Every strategy available in this build.
    Both,
}

impl StrategySelection {
    /// Parse from string (case-insensitive). Unknown values yield the
    /// compiled default.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        let lowered = s.trim().to_ascii_lowercase();
        if matches!(lowered.as_str(), "both" | "all") {
            return Self::Both;
        }
        Strategy::from_str_loose(&lowered).map_or_else(Self::default, Self::One)
    }

    /// Applies flag > environment > default precedence.
    #[must_use]
    pub fn resolve(flag: Option<&str>, env: Option<&str>) -> Self {
        flag.or(env)
            .map_or_else(Self::default, Self::from_str_loose)
    }

    /// Resolves against the process environment.
    #[must_use]
    pub fn from_flag_or_env(flag: Option<&str>) -> Self {
        let env = std::env::var(STRATEGY_ENV).ok();
        Self::resolve(flag, env.as_deref())
    }

    /// Strategies to run, in report order. `Both` skips unavailable ones.
    #[must_use]
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            Self::One(strategy) => vec![strategy],
            Self::Both => Strategy::ALL
                .into_iter()
                .filter(|s| s.available())
                .collect(),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        self.strategies()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl Default for StrategySelection {
    fn default() -> Self {
        Self::One(Strategy::compiled_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_selection() {
        assert_eq!(
            StrategySelection::from_str_loose("native"),
            StrategySelection::One(Strategy::Native)
        );
        assert_eq!(
            StrategySelection::from_str_loose("RESOLVER"),
            StrategySelection::One(Strategy::Resolver)
        );
        assert_eq!(
            StrategySelection::from_str_loose("both"),
            StrategySelection::Both
        );
        assert_eq!(
            StrategySelection::from_str_loose("bogus"),
            StrategySelection::default()
        );
    }

    #[test]
    fn flag_beats_env() {
        assert_eq!(
            StrategySelection::resolve(Some("native"), Some("resolver")),
            StrategySelection::One(Strategy::Native)
        );
    }

    #[test]
    fn env_used_without_flag() {
        assert_eq!(
            StrategySelection::resolve(None, Some("both")),
            StrategySelection::Both
        );
    }

    #[test]
    fn default_without_flag_or_env() {
        assert_eq!(
            StrategySelection::resolve(None, None),
            StrategySelection::One(Strategy::compiled_default())
        );
    }

    #[test]
    fn unknown_flag_falls_back_to_default_not_env() {
        assert_eq!(
            StrategySelection::resolve(Some("fast"), Some("both")),
            StrategySelection::default()
        );
    }

    #[test]
    fn both_lists_available_strategies() {
        let all = StrategySelection::Both.strategies();
        assert_eq!(all[0], Strategy::Native);
        assert!(all.iter().all(|s| s.available()));
        #[cfg(any(unix, windows))]
        assert_eq!(StrategySelection::Both.label(), "native+resolver");
    }
}
