//! Core stability search.
//!
//! A structure is core-stable if no coalition can deviate so that all of its
//! members are strictly better off, and strictly core-stable if no coalition
//! can deviate so that nobody is worse off and somebody is better off.
//! Deviating coalitions range over every non-empty proper subset of `N`.

use itertools::Itertools;
use tracing::debug;

use crate::acfg::error::AcfgResult;
use crate::acfg::game::Player;
use crate::acfg::structure::CoalitionStructure;
use crate::acfg::table::UtilityTable;

/// Every non-empty proper subset of `players`, by increasing size.
///
/// Within a size, subsets appear in lexicographic order of player positions.
pub fn all_coalitions<P: Player>(players: &[P]) -> Vec<Vec<P>> {
    (1..players.len())
        .flat_map(|size| players.iter().cloned().combinations(size))
        .collect()
}

/// First structure in table order that is (strictly, if `strict`) core-stable.
pub fn find_core_stable_structure<P: Player>(
    table: &UtilityTable<P>,
    strict: bool,
) -> AcfgResult<Option<CoalitionStructure<P>>> {
    let coalitions = all_coalitions(table.players());
    debug!(
        structures = table.len(),
        coalitions = coalitions.len(),
        strict,
        "searching for core-stable structure"
    );

    for structure in table.structures() {
        if structure.is_core_stable(table, &coalitions, strict)? {
            return Ok(Some(structure.clone()));
        }
    }
    Ok(None)
}

/// Every (strictly, if `strict`) core-stable structure, in table order.
pub fn core_stable_structures<P: Player>(
    table: &UtilityTable<P>,
    strict: bool,
) -> AcfgResult<Vec<CoalitionStructure<P>>> {
    let coalitions = all_coalitions(table.players());
    let mut stable = Vec::new();
    for structure in table.structures() {
        if structure.is_core_stable(table, &coalitions, strict)? {
            stable.push(structure.clone());
        }
    }
    Ok(stable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acfg::game::FriendshipNetwork;
    use crate::acfg::utility::Degree;

    #[test]
    fn test_all_coalitions() {
        let c = all_coalitions(&[1u32, 2, 3]);
        assert_eq!(
            c,
            vec![vec![1], vec![2], vec![3], vec![1, 2], vec![1, 3], vec![2, 3]]
        );
        assert!(all_coalitions(&[5u32]).is_empty());
        // 2^n - 2 proper non-empty subsets.
        assert_eq!(all_coalitions(&[0u32, 1, 2, 3, 4, 5]).len(), 62);
    }

    #[test]
    fn test_mutual_pairs_are_core_stable() {
        // Two disjoint pairs of mutual friends.
        let net = FriendshipNetwork::new(
            vec![0u32, 1, 2, 3],
            vec![(0, vec![1]), (1, vec![0]), (2, vec![3]), (3, vec![2])],
        )
        .unwrap();
        let pairs = CoalitionStructure::new(vec![vec![0u32, 1], vec![2, 3]]);

        for &degree in Degree::all() {
            let table = UtilityTable::build(&net, degree).unwrap();
            for strict in [false, true] {
                let found = find_core_stable_structure(&table, strict).unwrap();
                assert_eq!(found.as_ref(), Some(&pairs), "{} strict={}", degree, strict);
            }
            let all = core_stable_structures(&table, true).unwrap();
            assert_eq!(all, vec![pairs.clone()]);
        }
    }

    #[test]
    fn test_no_friends_everyone_alone() {
        let net = FriendshipNetwork::new(vec![0u32, 1, 2], Vec::<(u32, Vec<u32>)>::new()).unwrap();
        let table = UtilityTable::build(&net, Degree::SelfishFirst).unwrap();
        let alone = CoalitionStructure::new(vec![vec![0u32], vec![1], vec![2]]);
        assert_eq!(
            find_core_stable_structure(&table, true).unwrap(),
            Some(alone.clone())
        );
        assert_eq!(core_stable_structures(&table, false).unwrap(), vec![alone]);
    }

    #[test]
    fn test_strict_implies_non_strict() {
        let net = FriendshipNetwork::new(
            vec![0u32, 1, 2, 3],
            vec![(0, vec![1, 2]), (1, vec![2]), (2, vec![0]), (3, vec![0])],
        )
        .unwrap();
        for &degree in Degree::all() {
            let table = UtilityTable::build(&net, degree).unwrap();
            let weak = core_stable_structures(&table, false).unwrap();
            for s in core_stable_structures(&table, true).unwrap() {
                assert!(weak.contains(&s));
            }
        }
    }

    #[test]
    fn test_no_core_stable_structure() {
        let net = FriendshipNetwork::new(
            vec![0u32, 1, 2, 3, 4],
            vec![
                (0, vec![4]),
                (1, vec![2]),
                (2, vec![4]),
                (3, vec![0, 2, 4]),
                (4, vec![1]),
            ],
        )
        .unwrap();
        let table = UtilityTable::build(&net, Degree::Altruistic).unwrap();

        assert_eq!(find_core_stable_structure(&table, false).unwrap(), None);
        assert!(core_stable_structures(&table, false).unwrap().is_empty());
        // Every strictly core-stable structure is core-stable.
        assert_eq!(find_core_stable_structure(&table, true).unwrap(), None);
    }
}
