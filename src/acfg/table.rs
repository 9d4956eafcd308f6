//! Utility table: every coalition structure mapped to all players' utilities.
//!
//! The table is built once per `(N, F, degree)` and is read-only afterwards.
//! Entries keep the order in which the partition generator produced them,
//! which fixes the iteration order of every search.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::acfg::error::{AcfgError, AcfgResult};
use crate::acfg::game::{FriendshipNetwork, Player};
use crate::acfg::partition::{bell_number, partitions};
use crate::acfg::structure::CoalitionStructure;
use crate::acfg::utility::{structure_utility, Degree, Utility};

/// Mapping from coalition structure to the vector of players' utilities.
///
/// Utility vectors are indexed by the player order of the network the table
/// was built from.
#[derive(Debug, Clone)]
pub struct UtilityTable<P: Player> {
    players: Vec<P>,
    player_index: FxHashMap<P, usize>,
    degree: Degree,
    entries: Vec<(CoalitionStructure<P>, Vec<Utility>)>,
    index: FxHashMap<CoalitionStructure<P>, usize>,
}

impl<P: Player> UtilityTable<P> {
    /// Build the table for every partition of the network's players.
    pub fn build(network: &FriendshipNetwork<P>, degree: Degree) -> AcfgResult<Self> {
        Self::build_with_callback(network, degree, u64::MAX, |_| {})
    }

    /// Build the table, calling `callback` with the number of entries every
    /// `callback_interval` structures.
    pub fn build_with_callback<F>(
        network: &FriendshipNetwork<P>,
        degree: Degree,
        callback_interval: u64,
        mut callback: F,
    ) -> AcfgResult<Self>
    where
        F: FnMut(u64),
    {
        let players = network.players().to_vec();
        let capacity = bell_number(players.len())
            .and_then(|b| usize::try_from(b).ok())
            .unwrap_or(0)
            .min(1 << 20);
        debug!(
            players = players.len(),
            degree = %degree,
            "building utility table"
        );

        let player_index = players
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        let mut table = Self {
            players,
            player_index,
            degree,
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        };

        let interval = callback_interval.max(1);
        for (count, partition) in (1u64..).zip(partitions(&table.players)) {
            let structure = CoalitionStructure::new(partition);
            let utilities = table
                .players
                .iter()
                .map(|p| structure_utility(&structure, network, p, degree))
                .collect::<AcfgResult<Vec<_>>>()?;
            table.insert(structure, utilities);

            if count % interval == 0 {
                callback(count);
            }
        }

        info!(
            structures = table.len(),
            degree = %degree,
            "utility table ready"
        );
        Ok(table)
    }

    /// Add an entry; an already present structure keeps its first vector.
    fn insert(&mut self, structure: CoalitionStructure<P>, utilities: Vec<Utility>) {
        if self.index.contains_key(&structure) {
            debug!(%structure, "duplicate structure ignored");
            return;
        }
        self.index.insert(structure.clone(), self.entries.len());
        self.entries.push((structure, utilities));
    }

    /// Number of structures in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Players in utility-vector order.
    pub fn players(&self) -> &[P] {
        &self.players
    }

    /// Degree of altruism the table was built with.
    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// Position of `player` in utility vectors.
    pub fn player_index(&self, player: &P) -> AcfgResult<usize> {
        self.player_index
            .get(player)
            .copied()
            .ok_or_else(|| AcfgError::UnknownPlayer(format!("{:?}", player)))
    }

    /// Utility vector of `structure`.
    pub fn utilities(&self, structure: &CoalitionStructure<P>) -> AcfgResult<&[Utility]> {
        self.index
            .get(structure)
            .map(|&i| self.entries[i].1.as_slice())
            .ok_or_else(|| AcfgError::MissingStructure(structure.to_string()))
    }

    /// Utility of `structure` for a single player.
    pub fn utility(&self, structure: &CoalitionStructure<P>, player: &P) -> AcfgResult<Utility> {
        let i = self.player_index(player)?;
        Ok(self.utilities(structure)?[i])
    }

    /// Check whether `structure` has an entry.
    pub fn contains(&self, structure: &CoalitionStructure<P>) -> bool {
        self.index.contains_key(structure)
    }

    /// Entries in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (&CoalitionStructure<P>, &[Utility])> {
        self.entries.iter().map(|(s, u)| (s, u.as_slice()))
    }

    /// Structures in construction order.
    pub fn structures(&self) -> impl Iterator<Item = &CoalitionStructure<P>> {
        self.entries.iter().map(|(s, _)| s)
    }

    /// Export to a serializable format.
    pub fn export(&self) -> TableExport<P> {
        TableExport {
            degree: self.degree,
            players: self.players.clone(),
            rows: self
                .entries
                .iter()
                .map(|(s, u)| TableRow {
                    structure: s.to_vec(),
                    utilities: u.clone(),
                })
                .collect(),
        }
    }
}

impl<P: Player + Serialize> UtilityTable<P> {
    /// Save the table as pretty-printed JSON.
    pub fn save_json<Q: AsRef<Path>>(&self, path: Q) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.export())?;
        fs::write(path, json)
    }
}

/// Serializable export format for a utility table.
#[derive(Debug, Clone, Serialize)]
pub struct TableExport<P> {
    /// Degree of altruism.
    pub degree: Degree,
    /// Player order of the utility vectors.
    pub players: Vec<P>,
    /// One row per coalition structure, in construction order.
    pub rows: Vec<TableRow<P>>,
}

/// A single exported table row.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow<P> {
    /// Structure in nested-list form.
    pub structure: Vec<Vec<P>>,
    /// Utilities in player order.
    pub utilities: Vec<Utility>,
}
