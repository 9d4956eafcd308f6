//! Solver configuration and JSON game files.
//!
//! [`SolverConfig`] controls how the analysis runs (degree of altruism and
//! the pre-flight size limit). [`GameConfig`] describes a complete game as
//! loaded from a JSON file, so games can be changed without recompiling.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::acfg::error::{AcfgError, AcfgResult, ConfigError};
use crate::acfg::game::FriendshipNetwork;
use crate::acfg::partition::bell_number;
use crate::acfg::utility::Degree;

/// Default limit on the number of coalition structures (Bell(10) fits).
pub const DEFAULT_MAX_STRUCTURES: u64 = 200_000;

/// Configuration for the ACFG solver.
///
/// # Example
/// ```
/// use acfg_solver::acfg::{Degree, SolverConfig};
///
/// let config = SolverConfig::default().with_degree(Degree::Altruistic);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Degree of altruism used for every utility.
    #[serde(default)]
    pub degree: Degree,

    /// Maximum number of coalition structures to enumerate.
    ///
    /// The number of structures is the Bell number of the player count and
    /// is checked before the utility table is built. `None` disables the
    /// check.
    #[serde(default = "default_max_structures")]
    pub max_structures: Option<u64>,
}

fn default_max_structures() -> Option<u64> {
    Some(DEFAULT_MAX_STRUCTURES)
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            degree: Degree::default(),
            max_structures: default_max_structures(),
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the degree of altruism.
    pub fn with_degree(mut self, degree: Degree) -> Self {
        self.degree = degree;
        self
    }

    /// Builder method: set the structure limit.
    pub fn with_max_structures(mut self, limit: u64) -> Self {
        self.max_structures = Some(limit);
        self
    }

    /// Builder method: disable the structure limit.
    pub fn unlimited(mut self) -> Self {
        self.max_structures = None;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_structures == Some(0) {
            return Err(ConfigError::InvalidStructureLimit(0));
        }
        Ok(())
    }

    /// Pre-flight check: the number of structures for `players` players.
    ///
    /// # Errors
    /// [`AcfgError::TooManyStructures`] if the Bell number exceeds the limit
    /// (or overflows `u128`).
    pub fn check_size(&self, players: usize) -> AcfgResult<u128> {
        let structures = bell_number(players).unwrap_or(u128::MAX);
        if let Some(limit) = self.max_structures {
            if structures > limit as u128 {
                return Err(AcfgError::TooManyStructures {
                    players,
                    structures,
                    limit,
                });
            }
            if structures > (limit / 2) as u128 {
                warn!(
                    players,
                    structures,
                    limit,
                    "structure count close to the configured limit"
                );
            }
        }
        Ok(structures)
    }
}

/// A complete game description as stored in a JSON file.
///
/// ```json
/// {
///   "name": "two pairs",
///   "players": [0, 1, 2, 3],
///   "friends": { "0": [1], "1": [0], "2": [3], "3": [2] },
///   "degree": "AL"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Display name of the game.
    #[serde(default = "default_name")]
    pub name: String,
    /// The player set `N`, in utility-vector order.
    pub players: Vec<usize>,
    /// The friendship relation `F`; missing players have no friends.
    #[serde(default)]
    pub friends: BTreeMap<usize, Vec<usize>>,
    /// Degree of altruism.
    #[serde(default)]
    pub degree: Degree,
    /// Structure limit; see [`SolverConfig::max_structures`].
    #[serde(default = "default_max_structures")]
    pub max_structures: Option<u64>,
    /// Optional path for the JSON analysis report.
    #[serde(default)]
    pub output: Option<String>,
}

fn default_name() -> String {
    "ACFG".to_string()
}

impl GameConfig {
    /// Load a game from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a game from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the game description.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.solver_config().validate()?;
        self.network()?;
        Ok(())
    }

    /// Build the friendship network.
    pub fn network(&self) -> AcfgResult<FriendshipNetwork<usize>> {
        FriendshipNetwork::new(
            self.players.clone(),
            self.friends.iter().map(|(p, f)| (*p, f.clone())),
        )
    }

    /// Solver settings carried by the game file.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            degree: self.degree,
            max_structures: self.max_structures,
        }
    }
}
