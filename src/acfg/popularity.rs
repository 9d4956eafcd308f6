//! Popularity search.
//!
//! Structure `A` is compared to `B` by letting every player vote: `+1` if it
//! strictly prefers `A`, `-1` if it strictly prefers `B`, `0` otherwise. A
//! structure is popular if it never loses such a vote against any other
//! structure, and strictly popular if it wins every vote.

use std::cmp::Ordering;

use tracing::debug;

use crate::acfg::game::Player;
use crate::acfg::structure::CoalitionStructure;
use crate::acfg::table::UtilityTable;
use crate::acfg::utility::Utility;

/// Majority comparison of two utility vectors.
///
/// Returns `1` if more players strictly prefer `a`, `-1` if more strictly
/// prefer `b`, and `0` on a tie.
pub fn compare_structures(a: &[Utility], b: &[Utility]) -> i32 {
    let votes: i64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| match x.cmp(y) {
            Ordering::Greater => 1,
            Ordering::Less => -1,
            Ordering::Equal => 0,
        })
        .sum();
    votes.signum() as i32
}

/// Check whether a comparison outcome keeps a candidate qualified.
fn qualifies(outcome: i32, strict: bool) -> bool {
    if strict {
        outcome == 1
    } else {
        outcome >= 0
    }
}

/// Check whether the entry at `candidate` is (strictly) popular.
fn is_popular<P: Player>(
    table: &UtilityTable<P>,
    candidate: usize,
    utilities: &[Utility],
    strict: bool,
) -> bool {
    table
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != candidate)
        .all(|(_, (_, other))| qualifies(compare_structures(utilities, other), strict))
}

/// First (strictly, if `strict`) popular structure in table order.
pub fn find_popular_structure<P: Player>(
    table: &UtilityTable<P>,
    strict: bool,
) -> Option<CoalitionStructure<P>> {
    find_popular_structure_with_callback(table, strict, |_| {})
}

/// Like [`find_popular_structure`], calling `callback` with the number of
/// candidates examined so far after each candidate.
pub fn find_popular_structure_with_callback<P, F>(
    table: &UtilityTable<P>,
    strict: bool,
    mut callback: F,
) -> Option<CoalitionStructure<P>>
where
    P: Player,
    F: FnMut(u64),
{
    debug!(structures = table.len(), strict, "searching for popular structure");

    for (i, (structure, utilities)) in table.iter().enumerate() {
        let popular = is_popular(table, i, utilities, strict);
        callback(i as u64 + 1);
        if popular {
            return Some(structure.clone());
        }
    }
    None
}

/// Every (strictly, if `strict`) popular structure, in table order.
///
/// At most one structure can be strictly popular.
pub fn popular_structures<P: Player>(
    table: &UtilityTable<P>,
    strict: bool,
) -> Vec<CoalitionStructure<P>> {
    table
        .iter()
        .enumerate()
        .filter(|(i, (_, utilities))| is_popular(table, *i, utilities, strict))
        .map(|(_, (structure, _))| structure.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acfg::game::FriendshipNetwork;
    use crate::acfg::utility::Degree;

    #[test]
    fn test_compare_structures() {
        assert_eq!(compare_structures(&[0, 10, 15, -5], &[5, 10, 10, -10]), 1);
    }

    #[test]
    fn test_compare_structures_eq() {
        assert_eq!(compare_structures(&[0, 10, 15, -5], &[5, 10, 10, -5]), 0);
    }

    #[test]
    fn test_compare_structures_antisymmetric() {
        let vectors: [&[Utility]; 4] = [
            &[0, 10, 15, -5],
            &[5, 10, 10, -10],
            &[5, 10, 10, -5],
            &[-1, -1, 30, 0],
        ];
        for a in vectors {
            assert_eq!(compare_structures(a, a), 0);
            for b in vectors {
                assert_eq!(compare_structures(a, b), -compare_structures(b, a));
            }
        }
    }

    #[test]
    fn test_popular_pairs() {
        let net = FriendshipNetwork::new(
            vec![0u32, 1, 2, 3],
            vec![(0, vec![1]), (1, vec![0]), (2, vec![3]), (3, vec![2])],
        )
        .unwrap();
        let pairs = CoalitionStructure::new(vec![vec![0u32, 1], vec![2, 3]]);

        for &degree in Degree::all() {
            let table = UtilityTable::build(&net, degree).unwrap();
            assert_eq!(find_popular_structure(&table, false), Some(pairs.clone()));
            assert_eq!(find_popular_structure(&table, true), Some(pairs.clone()));
            assert_eq!(popular_structures(&table, true), vec![pairs.clone()]);
        }
    }

    #[test]
    fn test_single_player_is_popular() {
        let net = FriendshipNetwork::new(vec![7u32], Vec::<(u32, Vec<u32>)>::new()).unwrap();
        let table = UtilityTable::build(&net, Degree::Equal).unwrap();
        // With no alternatives the lone structure qualifies vacuously.
        let only = CoalitionStructure::new(vec![vec![7u32]]);
        assert_eq!(find_popular_structure(&table, true), Some(only.clone()));
        assert_eq!(find_popular_structure(&table, false), Some(only));
    }

    #[test]
    fn test_tie_is_popular_but_not_strict() {
        // Nobody has friends: every player prefers being alone, so the
        // all-singletons structure wins every vote.
        let net = FriendshipNetwork::new(vec![0u32, 1], Vec::<(u32, Vec<u32>)>::new()).unwrap();
        let table = UtilityTable::build(&net, Degree::SelfishFirst).unwrap();
        let alone = CoalitionStructure::new(vec![vec![0u32], vec![1]]);
        assert_eq!(find_popular_structure(&table, true), Some(alone.clone()));

        // 0 likes 1, 1 likes nobody: 0 prefers together, 1 prefers apart.
        let net = FriendshipNetwork::new(vec![0u32, 1], vec![(0, vec![1])]).unwrap();
        let table = UtilityTable::build(&net, Degree::SelfishFirst).unwrap();
        assert_eq!(popular_structures(&table, false).len(), 2);
        assert_eq!(find_popular_structure(&table, true), None);

        let mut seen = 0;
        let found = find_popular_structure_with_callback(&table, false, |n| seen = n);
        assert!(found.is_some());
        assert_eq!(seen, 1);
    }
}
