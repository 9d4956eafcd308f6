//! ACFG solver: owns a game, builds its utility table once and runs the
//! stability and popularity searches against it.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::acfg::config::SolverConfig;
use crate::acfg::error::{AcfgResult, ConfigError};
use crate::acfg::game::{FriendshipNetwork, Player};
use crate::acfg::popularity::find_popular_structure_with_callback;
use crate::acfg::report::{AnalysisReport, SearchKind};
use crate::acfg::stability::find_core_stable_structure;
use crate::acfg::structure::CoalitionStructure;
use crate::acfg::table::UtilityTable;

/// The main ACFG solver.
///
/// The utility table is built lazily on the first search (or explicitly via
/// [`AcfgSolver::build_table_with_callback`]) and reused afterwards.
///
/// # Example
/// ```
/// use acfg_solver::acfg::{AcfgSolver, FriendshipNetwork, SolverConfig};
///
/// let network = FriendshipNetwork::new(vec![0, 1, 2], vec![(0, vec![1]), (1, vec![0])]).unwrap();
/// let mut solver = AcfgSolver::new(network, SolverConfig::default()).unwrap();
///
/// let stable = solver.find_core_stable(false).unwrap();
/// assert!(stable.is_some());
/// ```
pub struct AcfgSolver<P: Player> {
    /// The game being analysed.
    network: FriendshipNetwork<P>,

    /// Configuration for the solver.
    config: SolverConfig,

    /// Utility table, once built.
    table: Option<UtilityTable<P>>,

    /// Statistics tracking.
    stats: SearchStats,
}

impl<P: Player> AcfgSolver<P> {
    /// Create a new solver for the given game.
    pub fn new(network: FriendshipNetwork<P>, config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            network,
            config,
            table: None,
            stats: SearchStats::default(),
        })
    }

    /// Utility table, building it if needed.
    pub fn table(&mut self) -> AcfgResult<&UtilityTable<P>> {
        self.build_table_with_callback(u64::MAX, |_| {})
    }

    /// Build the utility table (if not built yet), reporting progress every
    /// `callback_interval` structures.
    ///
    /// # Errors
    /// [`AcfgError::TooManyStructures`](crate::acfg::AcfgError::TooManyStructures)
    /// if the game exceeds the configured structure limit.
    pub fn build_table_with_callback<F>(
        &mut self,
        callback_interval: u64,
        callback: F,
    ) -> AcfgResult<&UtilityTable<P>>
    where
        F: FnMut(u64),
    {
        let table = match self.table.take() {
            Some(table) => table,
            None => {
                self.config.check_size(self.network.len())?;
                let start = Instant::now();
                let table = UtilityTable::build_with_callback(
                    &self.network,
                    self.config.degree,
                    callback_interval,
                    callback,
                )?;
                self.stats.structures = table.len();
                self.stats.table_seconds = start.elapsed().as_secs_f64();
                table
            }
        };
        let table: &UtilityTable<P> = self.table.insert(table);
        Ok(table)
    }

    /// First (strictly, if `strict`) core-stable structure.
    pub fn find_core_stable(&mut self, strict: bool) -> AcfgResult<Option<CoalitionStructure<P>>> {
        let start = Instant::now();
        let table = self.table()?;
        let result = find_core_stable_structure(table, strict)?;

        // Non-empty proper subsets of N.
        self.stats.coalitions = 1usize
            .checked_shl(self.network.len() as u32)
            .map_or(usize::MAX, |c| c.saturating_sub(2));
        self.stats.core_searches += 1;
        self.stats.search_seconds += start.elapsed().as_secs_f64();
        Ok(result)
    }

    /// First (strictly, if `strict`) popular structure.
    pub fn find_popular(&mut self, strict: bool) -> AcfgResult<Option<CoalitionStructure<P>>> {
        self.find_popular_with_callback(strict, |_| {})
    }

    /// Like [`AcfgSolver::find_popular`], calling `callback` with the number
    /// of candidates examined so far.
    pub fn find_popular_with_callback<F>(
        &mut self,
        strict: bool,
        callback: F,
    ) -> AcfgResult<Option<CoalitionStructure<P>>>
    where
        F: FnMut(u64),
    {
        let start = Instant::now();
        let table = self.table()?;
        let result = find_popular_structure_with_callback(table, strict, callback);

        self.stats.popular_searches += 1;
        self.stats.search_seconds += start.elapsed().as_secs_f64();
        Ok(result)
    }

    /// Run all four searches and collect the results.
    pub fn analyze(&mut self, name: &str) -> AcfgResult<AnalysisReport<P>> {
        self.analyze_with_callback(name, |_| {})
    }

    /// Run all four searches; `callback` receives popularity-search progress.
    pub fn analyze_with_callback<F>(
        &mut self,
        name: &str,
        mut callback: F,
    ) -> AcfgResult<AnalysisReport<P>>
    where
        F: FnMut(u64),
    {
        let start = Instant::now();
        let structures = self.table()?.len();
        let mut report = AnalysisReport::new(
            name,
            self.network.players().to_vec(),
            self.config.degree,
            structures,
        );

        for &kind in SearchKind::all() {
            let result = match kind {
                SearchKind::CoreStable | SearchKind::StrictlyCoreStable => {
                    self.find_core_stable(kind.is_strict())?
                }
                SearchKind::Popular | SearchKind::StrictlyPopular => {
                    self.find_popular_with_callback(kind.is_strict(), &mut callback)?
                }
            };
            info!(
                search = kind.label(),
                found = result.is_some(),
                "search finished"
            );
            report.set(kind, result.as_ref());
        }

        report.elapsed_seconds = start.elapsed().as_secs_f64();
        Ok(report)
    }

    /// The game being analysed.
    pub fn network(&self) -> &FriendshipNetwork<P> {
        &self.network
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Whether the utility table has been built.
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }
}

/// Statistics tracked across table construction and searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of coalition structures in the table.
    pub structures: usize,

    /// Number of deviating coalitions checked per structure.
    pub coalitions: usize,

    /// Core-stability searches run.
    pub core_searches: u64,

    /// Popularity searches run.
    pub popular_searches: u64,

    /// Time spent building the table (in seconds).
    pub table_seconds: f64,

    /// Total time spent in searches (in seconds).
    pub search_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acfg::error::AcfgError;
    use crate::acfg::utility::Degree;

    fn pairs_network() -> FriendshipNetwork<u32> {
        FriendshipNetwork::new(
            vec![0, 1, 2, 3],
            vec![(0, vec![1]), (1, vec![0]), (2, vec![3]), (3, vec![2])],
        )
        .unwrap()
    }

    #[test]
    fn test_table_is_built_once() {
        let mut solver = AcfgSolver::new(pairs_network(), SolverConfig::default()).unwrap();
        assert!(!solver.has_table());

        let mut calls = 0;
        solver.build_table_with_callback(1, |_| calls += 1).unwrap();
        assert_eq!(calls, 15);

        // Already built: the callback is not invoked again.
        let mut again = 0;
        let len = solver.build_table_with_callback(1, |_| again += 1).unwrap().len();
        assert_eq!(len, 15);
        assert_eq!(again, 0);
        assert_eq!(solver.stats().structures, 15);
    }

    #[test]
    fn test_searches_update_stats() {
        let config = SolverConfig::default().with_degree(Degree::Altruistic);
        let mut solver = AcfgSolver::new(pairs_network(), config).unwrap();
        let pairs = CoalitionStructure::new(vec![vec![0u32, 1], vec![2, 3]]);

        assert_eq!(solver.find_core_stable(true).unwrap(), Some(pairs.clone()));
        assert_eq!(solver.find_popular(false).unwrap(), Some(pairs));
        assert_eq!(solver.stats().core_searches, 1);
        assert_eq!(solver.stats().popular_searches, 1);
        assert_eq!(solver.stats().coalitions, 14);
    }

    #[test]
    fn test_analyze() {
        let mut solver = AcfgSolver::new(pairs_network(), SolverConfig::default()).unwrap();
        let report = solver.analyze("pairs").unwrap();
        let expected = Some(vec![vec![0u32, 1], vec![2, 3]]);

        assert_eq!(report.structures, 15);
        assert_eq!(report.degree, Degree::SelfishFirst);
        for &kind in SearchKind::all() {
            assert_eq!(report.get(kind), expected.as_ref(), "{:?}", kind);
        }
    }

    #[test]
    fn test_structure_limit() {
        let config = SolverConfig::default().with_max_structures(10);
        let mut solver = AcfgSolver::new(pairs_network(), config).unwrap();
        assert!(matches!(
            solver.find_popular(true),
            Err(AcfgError::TooManyStructures { structures: 15, .. })
        ));
        assert!(!solver.has_table());

        let bad = SolverConfig::default().with_max_structures(0);
        assert!(AcfgSolver::new(pairs_network(), bad).is_err());
    }
}
