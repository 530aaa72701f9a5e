//! Engine configuration.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_EXPLORATION, DEFAULT_NUM_SIM, DEFAULT_PLY_LIMIT};
use crate::error::ConfigError;

/// Which rollout policy playouts use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PolicyKind {
    /// Uniformly random legal moves.
    #[default]
    Random,
    /// Legal moves sampled by pattern weight.
    PatternWeighted,
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "pattern" | "patternweighted" | "pattern_weighted" => Ok(PolicyKind::PatternWeighted),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Random => write!(f, "random"),
            PolicyKind::PatternWeighted => write!(f, "pattern"),
        }
    }
}

/// How the simulation budget is spread over candidate moves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AllocatorKind {
    /// Every candidate gets `num_sim` simulations.
    #[default]
    FixedSplit,
    /// UCB1 bandit over a total budget of `num_sim` per candidate.
    Bandit,
}

impl FromStr for AllocatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" | "rr" | "round_robin" => Ok(AllocatorKind::FixedSplit),
            "bandit" | "ucb" => Ok(AllocatorKind::Bandit),
            _ => Err(ConfigError::UnknownAllocator(s.to_string())),
        }
    }
}

impl fmt::Display for AllocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocatorKind::FixedSplit => write!(f, "fixed"),
            AllocatorKind::Bandit => write!(f, "bandit"),
        }
    }
}

/// Configuration for one move decision.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Rollout policy used inside playouts.
    pub policy: PolicyKind,

    /// Simulations per candidate move. The bandit spends
    /// `candidates * num_sim` in total.
    pub num_sim: u32,

    /// Maximum plies per playout.
    pub ply_limit: usize,

    /// Budget allocation strategy.
    pub allocator: AllocatorKind,

    /// UCB exploration constant `C`.
    pub exploration: f64,

    /// Seed for the engine's RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Random,
            num_sim: DEFAULT_NUM_SIM,
            ply_limit: DEFAULT_PLY_LIMIT,
            allocator: AllocatorKind::FixedSplit,
            exploration: DEFAULT_EXPLORATION,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Reject values no search could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_sim == 0 {
            return Err(ConfigError::ZeroSimulations);
        }
        if self.ply_limit == 0 {
            return Err(ConfigError::ZeroPlyLimit);
        }
        if !(self.exploration.is_finite() && self.exploration > 0.0) {
            return Err(ConfigError::BadExploration(self.exploration));
        }
        Ok(())
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_sim = n;
        self
    }

    pub fn with_ply_limit(mut self, limit: usize) -> Self {
        self.ply_limit = limit;
        self
    }

    pub fn with_allocator(mut self, allocator: AllocatorKind) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.num_sim, 100);
        assert_eq!(config.ply_limit, 100);
        assert!((config.exploration - 0.4).abs() < 1e-12);
        assert_eq!(config.allocator, AllocatorKind::FixedSplit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_simulations(10)
            .with_allocator(AllocatorKind::Bandit)
            .with_policy(PolicyKind::PatternWeighted)
            .with_seed(7);
        assert_eq!(config.num_sim, 10);
        assert_eq!(config.allocator, AllocatorKind::Bandit);
        assert_eq!(config.policy, PolicyKind::PatternWeighted);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let base = EngineConfig::default();
        assert_eq!(
            base.clone().with_simulations(0).validate(),
            Err(ConfigError::ZeroSimulations)
        );
        assert_eq!(
            base.clone().with_ply_limit(0).validate(),
            Err(ConfigError::ZeroPlyLimit)
        );
        assert!(base.clone().with_exploration(0.0).validate().is_err());
        assert!(base.clone().with_exploration(-1.0).validate().is_err());
        assert!(base.with_exploration(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!("random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert_eq!("Pattern".parse::<PolicyKind>(), Ok(PolicyKind::PatternWeighted));
        assert_eq!("ucb".parse::<AllocatorKind>(), Ok(AllocatorKind::Bandit));
        assert_eq!("rr".parse::<AllocatorKind>(), Ok(AllocatorKind::FixedSplit));
        assert!("greedy".parse::<PolicyKind>().is_err());
        assert!("greedy".parse::<AllocatorKind>().is_err());
    }
}
