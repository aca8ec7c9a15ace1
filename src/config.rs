//! Engine configuration
//!
//! Configuration is read from `isolation.toml` and can be overridden with
//! `ISOLATION_*` environment variables. Every field has a default, so a
//! missing file or a partial file is fine.
//!
//! ```toml
//! heuristic = "extended_mobility"
//! time_threshold_ms = 10.0
//! mcts_iterations = 10000
//!
//! [mode]
//! kind = "minimax"
//! depth = 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::eval::Heuristic;
use crate::search::tt::DEFAULT_MAX_BLOCKED;

/// Standard locations to search for the configuration file
pub const CONFIG_SEARCH_PATHS: &[&str] = &["isolation.toml", "../isolation.toml"];

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "ISOLATION_CONFIG";

/// How the engine turns a position into a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchMode {
    /// Alpha-beta at depth 1, 2, 3, ... until the deadline
    #[default]
    IterativeDeepening,
    /// Plain minimax (no pruning) at a fixed depth
    Minimax {
        #[serde(default = "default_fixed_depth")]
        depth: u32,
    },
}

fn default_fixed_depth() -> u32 {
    3
}

/// Configuration for the search engine and the desktop app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Highest depth iterative deepening will try
    pub search_depth_cap: u32,

    /// Abort the search once fewer milliseconds than this remain
    pub time_threshold_ms: f64,

    /// Tree-search iterations per Monte Carlo evaluation
    pub mcts_iterations: u32,

    /// Leaf evaluation strategy
    pub heuristic: Heuristic,

    pub mode: SearchMode,

    /// Use the symmetric transposition cache in alpha-beta
    pub use_cache: bool,

    /// Cache only positions with at most this many blocked cells
    pub cache_max_blocked: usize,

    /// Seed for tie-breaking and rollouts; entropy when `None`
    pub seed: Option<u64>,

    /// Per-move time budget used by the desktop app
    pub time_limit_ms: u64,

    /// Board size used by the desktop app
    pub board_width: usize,
    pub board_height: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth_cap: 100,
            time_threshold_ms: 10.0,
            mcts_iterations: 10_000,
            heuristic: Heuristic::ExtendedMobility,
            mode: SearchMode::IterativeDeepening,
            use_cache: true,
            cache_max_blocked: DEFAULT_MAX_BLOCKED,
            seed: None,
            time_limit_ms: 1000,
            board_width: crate::board::DEFAULT_SIZE,
            board_height: crate::board::DEFAULT_SIZE,
        }
    }
}

impl EngineConfig {
    /// Deterministic, fast config for tests.
    pub fn for_testing() -> Self {
        Self {
            mcts_iterations: 200,
            seed: Some(42),
            time_threshold_ms: 0.0,
            ..Self::default()
        }
    }

    /// Parse a TOML document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the document is not valid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builder pattern: set the leaf heuristic.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Builder pattern: set the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder pattern: set the iterative deepening ceiling.
    pub fn with_depth_cap(mut self, depth: u32) -> Self {
        self.search_depth_cap = depth;
        self
    }

    /// Builder pattern: set the abort threshold.
    pub fn with_time_threshold_ms(mut self, ms: f64) -> Self {
        self.time_threshold_ms = ms;
        self
    }

    /// Builder pattern: set the Monte Carlo iteration budget.
    pub fn with_mcts_iterations(mut self, n: u32) -> Self {
        self.mcts_iterations = n;
        self
    }

    /// Builder pattern: enable or disable the transposition cache.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    /// Builder pattern: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set the per-move time budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }
}

/// Load the configuration.
///
/// Searches for the file in this order:
/// 1. Path in the `ISOLATION_CONFIG` environment variable
/// 2. `isolation.toml` in the current directory
/// 3. `../isolation.toml`
///
/// Environment overrides are applied afterwards. Unreadable or invalid
/// files fall back to the defaults with a warning.
pub fn load_config() -> EngineConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path.display());
            return load_from_path(path);
        }
        warn!("{}={} not found, searching defaults", CONFIG_ENV_VAR, path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    debug!("No isolation.toml found, using built-in defaults");
    apply_env_overrides(EngineConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> EngineConfig {
    let config = match std::fs::read_to_string(path) {
        Ok(content) => EngineConfig::from_toml_str(&content).unwrap_or_else(|e| {
            warn!("Failed to parse {}: {}, using defaults", path.display(), e);
            EngineConfig::default()
        }),
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            EngineConfig::default()
        }
    };
    apply_env_overrides(config)
}

/// Apply `ISOLATION_*` environment variables to a configuration.
pub fn apply_env_overrides(config: EngineConfig) -> EngineConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

macro_rules! override_parse {
    ($config:ident . $field:ident, $lookup:expr, $key:expr) => {
        if let Some(raw) = $lookup($key) {
            match raw.parse() {
                Ok(v) => $config.$field = v,
                Err(_) => warn!("Ignoring {}={:?}: not a valid value", $key, raw),
            }
        }
    };
}

/// Apply overrides from an arbitrary key lookup.
pub fn apply_overrides<F>(mut config: EngineConfig, lookup: F) -> EngineConfig
where
    F: Fn(&str) -> Option<String>,
{
    override_parse!(config.search_depth_cap, lookup, "ISOLATION_SEARCH_DEPTH_CAP");
    override_parse!(config.time_threshold_ms, lookup, "ISOLATION_TIME_THRESHOLD_MS");
    override_parse!(config.mcts_iterations, lookup, "ISOLATION_MCTS_ITERATIONS");
    override_parse!(config.use_cache, lookup, "ISOLATION_USE_CACHE");
    override_parse!(config.time_limit_ms, lookup, "ISOLATION_TIME_LIMIT_MS");

    if let Some(raw) = lookup("ISOLATION_SEED") {
        match raw.parse() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => warn!("Ignoring ISOLATION_SEED={:?}: not a number", raw),
        }
    }
    if let Some(raw) = lookup("ISOLATION_HEURISTIC") {
        match Heuristic::ALL.iter().find(|h| heuristic_key(**h) == raw) {
            Some(&h) => config.heuristic = h,
            None => warn!("Ignoring ISOLATION_HEURISTIC={:?}: unknown heuristic", raw),
        }
    }
    config
}

fn heuristic_key(heuristic: Heuristic) -> &'static str {
    match heuristic {
        Heuristic::Mobility => "mobility",
        Heuristic::ExtendedMobility => "extended_mobility",
        Heuristic::Distance => "distance",
        Heuristic::MonteCarlo => "monte_carlo",
    }
}
