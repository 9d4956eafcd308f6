//! Error types for game construction, table lookups and configuration.

use thiserror::Error;

/// Errors raised while building or querying an ACFG.
///
/// Player identifiers are carried in their `Debug` form so the error type
/// stays independent of the player type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcfgError {
    /// The player set is empty.
    #[error("player set is empty")]
    EmptyPlayerSet,

    /// A player appears more than once in the player set or in a structure.
    #[error("player {0} appears more than once")]
    DuplicatePlayer(String),

    /// A friend list references a player outside the player set.
    #[error("player {player} lists unknown friend {friend}")]
    UnknownFriend {
        /// Owner of the friend list.
        player: String,
        /// The offending friend entry.
        friend: String,
    },

    /// A player is not part of the game (or not covered by a structure).
    #[error("unknown player {0}")]
    UnknownPlayer(String),

    /// A coalition structure contains an empty coalition.
    #[error("coalition structure contains an empty coalition")]
    EmptyCoalition,

    /// A coalition structure does not cover every player exactly once.
    #[error("not a partition of the player set: {0}")]
    NotAPartition(String),

    /// A structure has no entry in the utility table.
    #[error("no utility entry for structure {0}")]
    MissingStructure(String),

    /// The degree of altruism is not one of `SF`, `EQ`, `AL`.
    #[error("invalid degree of altruism {0:?} (expected SF, EQ or AL)")]
    InvalidDegree(String),

    /// A random network density is NaN or infinite.
    #[error("friendship density must be finite, got {0}")]
    InvalidDensity(String),

    /// The number of coalition structures exceeds the configured limit.
    #[error("{players} players give {structures} coalition structures, limit is {limit}")]
    TooManyStructures {
        /// Number of players.
        players: usize,
        /// Bell number of the player count (`u128::MAX` on overflow).
        structures: u128,
        /// Configured limit.
        limit: u64,
    },
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for the expected schema.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The structure limit must be positive.
    #[error("Structure limit must be positive, got {0}")]
    InvalidStructureLimit(u64),

    /// The described game is malformed.
    #[error("Invalid game: {0}")]
    Game(#[from] AcfgError),
}

/// Result alias for ACFG operations.
pub type AcfgResult<T> = Result<T, AcfgError>;
