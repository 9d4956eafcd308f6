//! Canonical coalition structures.
//!
//! A coalition structure is stored as a set of sets, so two structures are
//! equal (and hash equally) exactly when they induce the same coalitions,
//! regardless of the order of coalitions or of players inside them.
//! Structures are immutable: a coalition move produces a new structure.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::acfg::error::{AcfgError, AcfgResult};
use crate::acfg::game::Player;
use crate::acfg::table::UtilityTable;
use crate::acfg::utility::Utility;

/// A partition of the players into disjoint, non-empty coalitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CoalitionStructure<P: Ord> {
    coalitions: BTreeSet<BTreeSet<P>>,
}

impl<P: Player> CoalitionStructure<P> {
    /// Canonicalize a collection of coalitions.
    ///
    /// No validation is performed beyond dropping empty coalitions; use
    /// [`CoalitionStructure::try_new`] for untrusted input.
    pub fn new<I, C>(collection: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = P>,
    {
        let coalitions = collection
            .into_iter()
            .map(|c| c.into_iter().collect::<BTreeSet<P>>())
            .filter(|c| !c.is_empty())
            .collect();
        Self { coalitions }
    }

    /// Canonicalize a collection of coalitions, checking that it partitions
    /// `players`.
    ///
    /// # Errors
    /// - [`AcfgError::EmptyCoalition`] if any coalition is empty
    /// - [`AcfgError::DuplicatePlayer`] if coalitions overlap or repeat a player
    /// - [`AcfgError::UnknownPlayer`] if a coalition contains a foreign player
    /// - [`AcfgError::NotAPartition`] if some player is not covered
    pub fn try_new<I, C>(collection: I, players: &[P]) -> AcfgResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = P>,
    {
        let universe: BTreeSet<&P> = players.iter().collect();
        let mut seen: BTreeSet<P> = BTreeSet::new();
        let mut coalitions = BTreeSet::new();

        for c in collection {
            let mut coalition = BTreeSet::new();
            for p in c {
                if !universe.contains(&p) {
                    return Err(AcfgError::UnknownPlayer(format!("{:?}", p)));
                }
                if !seen.insert(p.clone()) {
                    return Err(AcfgError::DuplicatePlayer(format!("{:?}", p)));
                }
                coalition.insert(p);
            }
            if coalition.is_empty() {
                return Err(AcfgError::EmptyCoalition);
            }
            coalitions.insert(coalition);
        }

        if let Some(missing) = players.iter().find(|p| !seen.contains(*p)) {
            return Err(AcfgError::NotAPartition(format!(
                "player {:?} is in no coalition",
                missing
            )));
        }

        Ok(Self { coalitions })
    }

    /// The coalitions, in canonical order.
    pub fn coalitions(&self) -> impl Iterator<Item = &BTreeSet<P>> {
        self.coalitions.iter()
    }

    /// Number of coalitions.
    pub fn len(&self) -> usize {
        self.coalitions.len()
    }

    /// True for the structure with no coalitions.
    pub fn is_empty(&self) -> bool {
        self.coalitions.is_empty()
    }

    /// The coalition containing `player`.
    pub fn coalition_of(&self, player: &P) -> Option<&BTreeSet<P>> {
        self.coalitions.iter().find(|c| c.contains(player))
    }

    /// Nested-list form of the structure.
    pub fn to_vec(&self) -> Vec<Vec<P>> {
        self.coalitions
            .iter()
            .map(|c| c.iter().cloned().collect())
            .collect()
    }

    /// Let `coalition` deviate: its members leave their coalitions and form
    /// a new one.
    ///
    /// Coalitions emptied by the move disappear. Moving the empty coalition
    /// or an existing coalition yields an equal structure.
    pub fn move_coalition(&self, coalition: &[P]) -> Self {
        let target: BTreeSet<P> = coalition.iter().cloned().collect();
        let mut coalitions: BTreeSet<BTreeSet<P>> = self
            .coalitions
            .iter()
            .map(|c| c.difference(&target).cloned().collect::<BTreeSet<P>>())
            .filter(|c| !c.is_empty())
            .collect();
        if !target.is_empty() {
            coalitions.insert(target);
        }
        Self { coalitions }
    }

    /// Utilities before and after `coalition` deviates, for each member.
    fn deviation_utilities(
        &self,
        table: &UtilityTable<P>,
        coalition: &[P],
    ) -> AcfgResult<Vec<(Utility, Utility)>> {
        let moved = self.move_coalition(coalition);
        let before = table.utilities(self)?;
        let after = table.utilities(&moved)?;
        coalition
            .iter()
            .map(|p| {
                let i = table.player_index(p)?;
                Ok((before[i], after[i]))
            })
            .collect()
    }

    /// Check whether `coalition` blocks this structure: every member is
    /// strictly better off after deviating.
    pub fn is_blocked_by(&self, table: &UtilityTable<P>, coalition: &[P]) -> AcfgResult<bool> {
        let utilities = self.deviation_utilities(table, coalition)?;
        Ok(utilities.iter().all(|(before, after)| before < after))
    }

    /// Check whether `coalition` weakly blocks this structure: no member is
    /// worse off and at least one is strictly better off.
    pub fn is_weakly_blocked_by(
        &self,
        table: &UtilityTable<P>,
        coalition: &[P],
    ) -> AcfgResult<bool> {
        let utilities = self.deviation_utilities(table, coalition)?;
        let mut improved = false;
        for (before, after) in utilities {
            if before > after {
                return Ok(false);
            }
            if before < after {
                improved = true;
            }
        }
        Ok(improved)
    }

    /// First coalition in `all_coalitions` that (weakly, if `strict`) blocks
    /// this structure.
    pub fn blocking_coalition<'c>(
        &self,
        table: &UtilityTable<P>,
        all_coalitions: &'c [Vec<P>],
        strict: bool,
    ) -> AcfgResult<Option<&'c [P]>> {
        for c in all_coalitions {
            let blocked = if strict {
                self.is_weakly_blocked_by(table, c)?
            } else {
                self.is_blocked_by(table, c)?
            };
            if blocked {
                return Ok(Some(c.as_slice()));
            }
        }
        Ok(None)
    }

    /// Check (strict, if `strict`) core stability against every coalition in
    /// `all_coalitions`.
    pub fn is_core_stable(
        &self,
        table: &UtilityTable<P>,
        all_coalitions: &[Vec<P>],
        strict: bool,
    ) -> AcfgResult<bool> {
        Ok(self
            .blocking_coalition(table, all_coalitions, strict)?
            .is_none())
    }
}

impl<P: Player> fmt::Display for CoalitionStructure<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acfg::game::FriendshipNetwork;
    use crate::acfg::utility::Degree;
    use itertools::Itertools;
    use rustc_hash::FxHashSet;

    fn gamma() -> CoalitionStructure<u32> {
        CoalitionStructure::new(vec![vec![0, 1, 2], vec![3, 4], vec![5]])
    }

    #[test]
    fn test_construct_structure() {
        let delta = CoalitionStructure::new(vec![vec![5], vec![4, 3], vec![2, 0, 1]]);
        assert_eq!(gamma(), delta);

        let mut set = FxHashSet::default();
        set.insert(gamma());
        assert!(set.contains(&delta));
    }

    #[test]
    fn test_canonical_under_permutations() {
        let blocks = vec![vec![0u32, 1, 2], vec![3, 4], vec![5]];
        let reference = CoalitionStructure::new(blocks.clone());

        for order in (0..blocks.len()).permutations(blocks.len()) {
            for first in blocks[0].iter().copied().permutations(3) {
                for second in blocks[1].iter().copied().permutations(2) {
                    let inner = [first.clone(), second.clone(), blocks[2].clone()];
                    let permuted: Vec<Vec<u32>> = order.iter().map(|&i| inner[i].clone()).collect();
                    assert_eq!(CoalitionStructure::new(permuted), reference, "{:?}", order);
                }
            }
        }
    }

    #[test]
    fn test_move_empty_coalition() {
        assert_eq!(gamma().move_coalition(&[]), gamma());
    }

    #[test]
    fn test_move_existing_coalition() {
        assert_eq!(gamma().move_coalition(&[0, 1, 2]), gamma());
    }

    #[test]
    fn test_move_all_coalitions() {
        let expected = CoalitionStructure::new(vec![vec![0u32, 1, 2, 3, 4, 5]]);
        assert_eq!(gamma().move_coalition(&[0, 1, 2, 3, 4, 5]), expected);
    }

    #[test]
    fn test_move_coalition() {
        let original = gamma();
        let expected = CoalitionStructure::new(vec![vec![0u32, 1], vec![2, 3], vec![4], vec![5]]);
        assert_eq!(original.move_coalition(&[3, 2]), expected);
        // The receiver is untouched.
        assert_eq!(original, gamma());
    }

    #[test]
    fn test_move_empties_a_block() {
        // 5 leaves its singleton, which disappears; 3 leaves {3, 4}.
        let expected = CoalitionStructure::new(vec![vec![0u32, 1, 2], vec![4], vec![3, 5]]);
        assert_eq!(gamma().move_coalition(&[5, 3]), expected);
    }

    #[test]
    fn test_move_unknown_player_is_added() {
        let moved = gamma().move_coalition(&[9]);
        assert_eq!(moved.len(), 4);
        assert_eq!(moved.coalition_of(&9).map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_try_new_validation() {
        let players = [0u32, 1, 2, 3];
        assert!(CoalitionStructure::try_new(vec![vec![0, 1], vec![2, 3]], &players).is_ok());
        assert_eq!(
            CoalitionStructure::try_new(vec![vec![0, 1, 2, 3], vec![]], &players).unwrap_err(),
            AcfgError::EmptyCoalition
        );
        assert!(matches!(
            CoalitionStructure::try_new(vec![vec![0, 1], vec![1, 2, 3]], &players),
            Err(AcfgError::DuplicatePlayer(_))
        ));
        assert!(matches!(
            CoalitionStructure::try_new(vec![vec![0, 1], vec![2]], &players),
            Err(AcfgError::NotAPartition(_))
        ));
        assert!(matches!(
            CoalitionStructure::try_new(vec![vec![0, 1, 2, 3, 8]], &players),
            Err(AcfgError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_display_and_accessors() {
        let cs = gamma();
        assert_eq!(cs.to_string(), "[[0, 1, 2], [3, 4], [5]]");
        assert_eq!(cs.len(), 3);
        assert_eq!(cs.coalition_of(&4).map(|c| c.len()), Some(2));
        assert!(cs.coalition_of(&6).is_none());
        assert_eq!(serde_json::to_string(&cs).unwrap(), "[[0,1,2],[3,4],[5]]");
    }

    #[test]
    fn test_blocking_coalitions() {
        // Two mutual friends and a stranger.
        let net = FriendshipNetwork::new(vec![0u32, 1, 2], vec![(0, vec![1]), (1, vec![0])]).unwrap();
        let table = UtilityTable::build(&net, Degree::SelfishFirst).unwrap();

        let apart = CoalitionStructure::new(vec![vec![0u32], vec![1], vec![2]]);
        assert!(apart.is_blocked_by(&table, &[0, 1]).unwrap());
        assert!(apart.is_weakly_blocked_by(&table, &[0, 1]).unwrap());
        // Player 2 would only gain strangers.
        assert!(!apart.is_blocked_by(&table, &[0, 1, 2]).unwrap());

        let together = CoalitionStructure::new(vec![vec![0u32, 1], vec![2]]);
        let coalitions = vec![vec![0u32], vec![1], vec![2], vec![0, 1], vec![0, 2], vec![1, 2]];
        assert!(together.is_core_stable(&table, &coalitions, false).unwrap());
        assert!(together.is_core_stable(&table, &coalitions, true).unwrap());
        assert_eq!(
            apart.blocking_coalition(&table, &coalitions, false).unwrap(),
            Some(&[0u32, 1][..])
        );
    }

    #[test]
    fn test_weak_blocking_without_strict_gain() {
        // 0 and 2 both like 1, who likes nobody.
        let net = FriendshipNetwork::new(vec![0u32, 1, 2], vec![(0, vec![1]), (2, vec![1])]).unwrap();
        let table = UtilityTable::build(&net, Degree::SelfishFirst).unwrap();

        // Moving {1, 2} leaves 1 as badly off as before but helps 2.
        let cs = CoalitionStructure::new(vec![vec![0u32, 1], vec![2]]);
        assert!(cs.is_weakly_blocked_by(&table, &[1, 2]).unwrap());
        assert!(!cs.is_blocked_by(&table, &[1, 2]).unwrap());
        // A move that changes nothing never blocks.
        assert!(!cs.is_weakly_blocked_by(&table, &[2]).unwrap());
    }
}
