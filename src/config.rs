//! Engine configuration

use crate::error::ConfigError;

/// Which search backend the decision policy delegates to after the
/// tactical stages fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Negamax with alpha-beta pruning, iterative deepening and a
    /// transposition table.
    AlphaBeta,
    /// Monte Carlo Tree Search with UCB1 selection and light playouts.
    Mcts,
}

/// Configuration for the decision engine.
///
/// All knobs have sensible defaults; use the `with_*` setters to adjust
/// individual values.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget per decision, in milliseconds. The search aborts
    /// its current pass when the budget runs out.
    pub time_budget_ms: u64,

    /// Hard depth cap for iterative deepening.
    pub max_depth: i8,

    /// Search backend used once the tactical stages fall through.
    pub mode: SearchMode,

    /// Transposition table entry bound. The table is cleared wholesale
    /// when it grows past this, capping memory over a long game.
    pub tt_capacity: usize,

    /// UCB1 exploration constant for MCTS. sqrt(2) is the textbook value.
    pub exploration: f64,

    /// RNG seed for MCTS playouts. Fixed seed = reproducible searches.
    pub seed: u64,

    /// Whether the opening book short-circuits the first plies.
    pub opening_book: bool,

    /// Number of initial plies covered by the opening book.
    pub opening_plies: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 500,
            max_depth: 8,
            mode: SearchMode::AlphaBeta,
            tt_capacity: 100_000,
            exploration: std::f64::consts::SQRT_2,
            seed: 0x5eed_4a11,
            opening_book: true,
            opening_plies: 2,
        }
    }
}

impl EngineConfig {
    /// Fast configuration for tests: shallow depth, short budget.
    pub fn for_testing() -> Self {
        Self {
            time_budget_ms: 100,
            max_depth: 4,
            tt_capacity: 10_000,
            ..Self::default()
        }
    }

    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    pub fn with_max_depth(mut self, depth: i8) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_budget_ms == 0 {
            return Err(ConfigError::Invalid("time_budget_ms must be > 0".into()));
        }
        if self.max_depth <= 0 {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        if self.tt_capacity == 0 {
            return Err(ConfigError::Invalid("tt_capacity must be > 0".into()));
        }
        if self.exploration <= 0.0 {
            return Err(ConfigError::Invalid("exploration must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, SearchMode::AlphaBeta);
    }

    #[test]
    fn test_builder_setters() {
        let config = EngineConfig::default()
            .with_max_depth(6)
            .with_mode(SearchMode::Mcts)
            .with_time_budget_ms(250);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.mode, SearchMode::Mcts);
        assert_eq!(config.time_budget_ms, 250);
    }

    #[test]
    fn test_validation_rejects_zero_budget() {
        let config = EngineConfig::default().with_time_budget_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_testing_config_is_valid() {
        assert!(EngineConfig::for_testing().validate().is_ok());
    }
}
