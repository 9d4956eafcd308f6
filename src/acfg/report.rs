//! Analysis report: the outcome of every search on one game.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::acfg::game::Player;
use crate::acfg::structure::CoalitionStructure;
use crate::acfg::utility::Degree;

/// Results of the four searches for a single game and degree.
///
/// Structures are stored in nested-list form; `None` means no structure
/// with the property exists.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<P> {
    /// Name of the analysed game.
    pub name: String,
    /// Players in utility-vector order.
    pub players: Vec<P>,
    /// Degree of altruism.
    pub degree: Degree,
    /// Number of coalition structures enumerated.
    pub structures: usize,
    /// First core-stable structure.
    pub core_stable: Option<Vec<Vec<P>>>,
    /// First strictly core-stable structure.
    pub strictly_core_stable: Option<Vec<Vec<P>>>,
    /// First popular structure.
    pub popular: Option<Vec<Vec<P>>>,
    /// The strictly popular structure.
    pub strictly_popular: Option<Vec<Vec<P>>>,
    /// Total time spent on table construction and searches.
    pub elapsed_seconds: f64,
}

impl<P: Player> AnalysisReport<P> {
    /// Create an empty report.
    pub fn new(name: &str, players: Vec<P>, degree: Degree, structures: usize) -> Self {
        Self {
            name: name.to_string(),
            players,
            degree,
            structures,
            core_stable: None,
            strictly_core_stable: None,
            popular: None,
            strictly_popular: None,
            elapsed_seconds: 0.0,
        }
    }

    /// Record a search result.
    pub fn set(&mut self, kind: SearchKind, structure: Option<&CoalitionStructure<P>>) {
        let value = structure.map(CoalitionStructure::to_vec);
        match kind {
            SearchKind::CoreStable => self.core_stable = value,
            SearchKind::StrictlyCoreStable => self.strictly_core_stable = value,
            SearchKind::Popular => self.popular = value,
            SearchKind::StrictlyPopular => self.strictly_popular = value,
        }
    }

    /// Result of a search in nested-list form.
    pub fn get(&self, kind: SearchKind) -> Option<&Vec<Vec<P>>> {
        match kind {
            SearchKind::CoreStable => self.core_stable.as_ref(),
            SearchKind::StrictlyCoreStable => self.strictly_core_stable.as_ref(),
            SearchKind::Popular => self.popular.as_ref(),
            SearchKind::StrictlyPopular => self.strictly_popular.as_ref(),
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== {} ({}) ===", self.name, self.degree);
        println!("Players: {:?}", self.players);
        println!("Coalition structures: {}", self.structures);
        for &kind in SearchKind::all() {
            match self.get(kind) {
                Some(s) => println!("{:<22} {:?}", kind.label(), s),
                None => println!("{:<22} none found", kind.label()),
            }
        }
        println!("Time: {:.2}s", self.elapsed_seconds);
    }
}

impl<P: Serialize> AnalysisReport<P> {
    /// Save the report as pretty-printed JSON.
    pub fn save_json<Q: AsRef<Path>>(&self, path: Q) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

/// The stability and popularity notions searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    /// No coalition can deviate with every member strictly better off.
    CoreStable,
    /// No coalition can deviate as a weak Pareto improvement.
    StrictlyCoreStable,
    /// Never loses a majority vote.
    Popular,
    /// Wins every majority vote.
    StrictlyPopular,
}

impl SearchKind {
    /// All search kinds, in report order.
    pub fn all() -> &'static [SearchKind] {
        &[
            SearchKind::CoreStable,
            SearchKind::StrictlyCoreStable,
            SearchKind::Popular,
            SearchKind::StrictlyPopular,
        ]
    }

    /// Whether this is the strict variant.
    pub fn is_strict(&self) -> bool {
        matches!(self, SearchKind::StrictlyCoreStable | SearchKind::StrictlyPopular)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::CoreStable => "Core-stable:",
            SearchKind::StrictlyCoreStable => "Strictly core-stable:",
            SearchKind::Popular => "Popular:",
            SearchKind::StrictlyPopular => "Strictly popular:",
        }
    }
}
