//! Altruistic coalition formation games (ACFG).
//!
//! This module implements a brute-force analysis engine for coalition
//! formation games in which players care about their friends.
//!
//! # Overview
//!
//! A game consists of a player set `N`, a friendship relation `F` and a
//! degree of altruism. The engine:
//! 1. Enumerates every partition of `N` (there are `Bell(|N|)` of them)
//! 2. Computes each player's utility for every partition
//! 3. Searches the resulting table for core-stable and popular structures
//!
//! # Usage
//!
//! ```
//! use acfg_solver::acfg::{AcfgSolver, Degree, FriendshipNetwork, SolverConfig};
//!
//! // Two pairs of mutual friends.
//! let network = FriendshipNetwork::new(
//!     vec![0, 1, 2, 3],
//!     vec![(0, vec![1]), (1, vec![0]), (2, vec![3]), (3, vec![2])],
//! )
//! .unwrap();
//!
//! let config = SolverConfig::default().with_degree(Degree::Altruistic);
//! let mut solver = AcfgSolver::new(network, config).unwrap();
//!
//! let popular = solver.find_popular(true).unwrap().unwrap();
//! assert_eq!(popular.to_vec(), vec![vec![0, 1], vec![2, 3]]);
//! ```
//!
//! # Stability notions
//!
//! ```text
//! core-stable           no coalition can deviate with all members strictly better off
//! strictly core-stable  no coalition can deviate as a weak Pareto improvement
//! popular               never loses a majority vote against another structure
//! strictly popular      wins the majority vote against every other structure
//! ```
//!
//! Everything is exhaustive: table construction is `O(Bell(n) * n^2)` and the
//! popularity search `O(Bell(n)^2 * n)`, which bounds practical games to
//! around ten players.

pub mod config;
pub mod error;
pub mod game;
pub mod partition;
pub mod popularity;
pub mod report;
pub mod solver;
pub mod stability;
pub mod structure;
pub mod table;
pub mod utility;

// Re-export main types for convenient access
pub use config::{GameConfig, SolverConfig, DEFAULT_MAX_STRUCTURES};
pub use error::{AcfgError, AcfgResult, ConfigError};
pub use game::{FriendshipNetwork, Player};
pub use partition::{bell_number, partitions, Partitions};
pub use popularity::{compare_structures, find_popular_structure, popular_structures};
pub use report::{AnalysisReport, SearchKind};
pub use solver::{AcfgSolver, SearchStats};
pub use stability::{all_coalitions, core_stable_structures, find_core_stable_structure};
pub use structure::CoalitionStructure;
pub use table::{TableExport, TableRow, UtilityTable};
pub use utility::{coalition_value, structure_utility, Degree, Utility};
