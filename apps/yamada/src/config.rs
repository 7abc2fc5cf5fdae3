//! # Configuration File
//!
//! Optional TOML file with per-command defaults:
//!
//! ```toml
//! [simplify]
//! n_tries = 40
//! strategy = "random"
//! seed = 7
//!
//! [enumerate]
//! reject_r6 = true
//! mirror_symmetric = true
//! ```
//!
//! A value given on the command line always wins over the file, and the
//! file wins over the built-in default.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;
use yamada_core::primitives::DEFAULT_R3_TRIES;
use yamada_core::{R3Strategy, Result, SimplifyOptions, YamadaError};

/// Seed used by the random strategy when none is configured.
pub const DEFAULT_SEED: u64 = 0;

/// Maximum size of a configuration file (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// R3 selection named on the command line or in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyName {
    RoundRobin,
    Random,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimplifySection {
    pub n_tries: Option<usize>,
    pub strategy: Option<StrategyName>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnumerateSection {
    pub reject_r6: Option<bool>,
    /// Hold the first crossing fixed, halving the assignments.
    pub mirror_symmetric: Option<bool>,
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub simplify: SimplifySection,
    pub enumerate: EnumerateSection,
}

impl Config {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            YamadaError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(YamadaError::InvalidInput(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            YamadaError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| YamadaError::InvalidInput(format!("Invalid config: {e}")))
    }

    /// Resolve simplification knobs against command-line overrides.
    #[must_use]
    pub fn simplify_options(
        &self,
        n_tries: Option<usize>,
        strategy: Option<StrategyName>,
        seed: Option<u64>,
    ) -> SimplifyOptions {
        let section = &self.simplify;
        let n_tries = n_tries.or(section.n_tries).unwrap_or(DEFAULT_R3_TRIES);
        let strategy = match strategy.or(section.strategy) {
            Some(StrategyName::Random) => R3Strategy::Random {
                seed: seed.or(section.seed).unwrap_or(DEFAULT_SEED),
            },
            Some(StrategyName::RoundRobin) | None => R3Strategy::RoundRobin,
        };
        SimplifyOptions { n_tries, strategy }
    }

    /// `(reject_r6, mirror_symmetric)` after command-line overrides.
    #[must_use]
    pub fn enumerate_flags(
        &self,
        reject_r6: Option<bool>,
        mirror_symmetric: Option<bool>,
    ) -> (bool, bool) {
        let section = &self.enumerate;
        (
            reject_r6.or(section.reject_r6).unwrap_or(false),
            mirror_symmetric.or(section.mirror_symmetric).unwrap_or(true),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.simplify_options(None, None, None), SimplifyOptions::default());
        assert_eq!(config.enumerate_flags(None, None), (false, true));
    }

    #[test]
    fn file_values_apply() {
        let config = Config::from_toml(
            "[simplify]\nn_tries = 5\nstrategy = \"random\"\nseed = 9\n\n[enumerate]\nreject_r6 = true\n",
        )
        .expect("parse");
        let options = config.simplify_options(None, None, None);
        assert_eq!(options.n_tries, 5);
        assert_eq!(options.strategy, R3Strategy::Random { seed: 9 });
        assert_eq!(config.enumerate_flags(None, None), (true, true));
    }

    #[test]
    fn command_line_wins() {
        let config = Config::from_toml("[simplify]\nn_tries = 5\nstrategy = \"random\"\n")
            .expect("parse");
        let options = config.simplify_options(Some(2), Some(StrategyName::RoundRobin), None);
        assert_eq!(options.n_tries, 2);
        assert_eq!(options.strategy, R3Strategy::RoundRobin);
        assert_eq!(config.enumerate_flags(Some(true), Some(false)), (true, false));
    }

    #[test]
    fn random_without_seed_uses_default_seed() {
        let config = Config::default();
        let options = config.simplify_options(None, Some(StrategyName::Random), None);
        assert_eq!(options.strategy, R3Strategy::Random { seed: DEFAULT_SEED });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml("[simplify]\ntries = 3\n"),
            Err(YamadaError::InvalidInput(_))
        ));
    }
}
