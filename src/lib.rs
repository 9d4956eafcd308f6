//! # ACFG Solver
//!
//! Exhaustive analysis of altruistic coalition formation games: players
//! partition themselves into coalitions, value coalitions by their friends
//! and non-friends, and care (to a chosen degree) about how their friends
//! fare.
//!
//! ## Features
//!
//! - **Partition Enumeration**: Lazy, duplicate-free generation of all set partitions
//! - **Canonical Structures**: Order-independent, hashable coalition structures
//! - **Three Degrees of Altruism**: Selfish-first, equal treatment, altruistic
//! - **Stability Searches**: (Strict) core stability and (strict) popularity
//! - **Pre-flight Checks**: Bell-number size limit before anything is enumerated
//!
//! ## Quick Start
//!
//! ```ignore
//! use acfg_solver::acfg::{AcfgSolver, GameConfig};
//!
//! // 1. Describe a game
//! let game = GameConfig::from_json_file("configs/two_pairs.json")?;
//!
//! // 2. Create a solver
//! let mut solver = AcfgSolver::new(game.network()?, game.solver_config())?;
//!
//! // 3. Search
//! let stable = solver.find_core_stable(false)?;
//! let popular = solver.find_popular(true)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐    ┌──────────────────────┐    ┌───────────────┐
//! │ Partition         │ -> │ Coalition Structure  │ -> │ Utility Model │
//! │ Generator         │    │ (canonical set-sets) │    │ (SF / EQ / AL)│
//! └───────────────────┘    └──────────────────────┘    └───────────────┘
//!                                                              │
//!                                                              ▼
//!                                                    ┌───────────────────┐
//!                                                    │  Utility Table    │
//!                                                    └───────────────────┘
//!                                                       │             │
//!                                                       ▼             ▼
//!                                              ┌───────────┐   ┌────────────┐
//!                                              │ Stability │   │ Popularity │
//!                                              └───────────┘   └────────────┘
//! ```

#![warn(missing_docs)]

/// Altruistic coalition formation game engine.
pub mod acfg;

// Re-export commonly used types at crate root for convenience
pub use acfg::{
    AcfgError, AcfgSolver, CoalitionStructure, Degree, FriendshipNetwork, GameConfig,
    SolverConfig, UtilityTable,
};
