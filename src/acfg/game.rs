//! Players and the friendship network of an ACFG.
//!
//! A game is fully described by its player set `N` and a (not necessarily
//! symmetric) friendship relation `F`. The degree of altruism is chosen
//! separately, see [`Degree`](crate::acfg::utility::Degree).

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::acfg::error::{AcfgError, AcfgResult};

/// Trait for player identifiers.
///
/// Players are opaque: they only need identity (hash/eq), a total order for
/// canonical coalition structures, and `Debug` for error messages.
pub trait Player: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> Player for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// The player set `N` together with the friendship relation `F`.
///
/// Player order is preserved: it fixes the position of each player in every
/// utility vector.
#[derive(Debug, Clone)]
pub struct FriendshipNetwork<P: Player> {
    players: Vec<P>,
    friends: FxHashMap<P, Vec<P>>,
    index: FxHashMap<P, usize>,
}

impl<P: Player> FriendshipNetwork<P> {
    /// Create a network, validating that every friend is a known player.
    ///
    /// Players without an entry in `friends` have no friends.
    ///
    /// # Errors
    /// - [`AcfgError::EmptyPlayerSet`] if `players` is empty
    /// - [`AcfgError::DuplicatePlayer`] if a player is listed twice, or has
    ///   two friend lists
    /// - [`AcfgError::UnknownPlayer`] if `friends` has a key outside `players`
    /// - [`AcfgError::UnknownFriend`] if a friend list references an unknown player
    pub fn new<I>(players: Vec<P>, friends: I) -> AcfgResult<Self>
    where
        I: IntoIterator<Item = (P, Vec<P>)>,
    {
        if players.is_empty() {
            return Err(AcfgError::EmptyPlayerSet);
        }

        let mut index = FxHashMap::with_capacity_and_hasher(players.len(), Default::default());
        for (i, p) in players.iter().enumerate() {
            if index.insert(p.clone(), i).is_some() {
                return Err(AcfgError::DuplicatePlayer(format!("{:?}", p)));
            }
        }

        let mut friend_map = FxHashMap::default();
        for (player, list) in friends {
            if !index.contains_key(&player) {
                return Err(AcfgError::UnknownPlayer(format!("{:?}", player)));
            }
            if let Some(friend) = list.iter().find(|f| !index.contains_key(*f)) {
                return Err(AcfgError::UnknownFriend {
                    player: format!("{:?}", player),
                    friend: format!("{:?}", friend),
                });
            }
            if friend_map.contains_key(&player) {
                return Err(AcfgError::DuplicatePlayer(format!("{:?}", player)));
            }
            friend_map.insert(player, list);
        }

        Ok(Self {
            players,
            friends: friend_map,
            index,
        })
    }

    /// Players in their fixed order.
    pub fn players(&self) -> &[P] {
        &self.players
    }

    /// Number of players `n`.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false for a validated network; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Friends of `player`, empty if it has none or is unknown.
    pub fn friends_of(&self, player: &P) -> &[P] {
        self.friends.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Position of `player` in utility vectors.
    pub fn index_of(&self, player: &P) -> Option<usize> {
        self.index.get(player).copied()
    }

    /// Check whether `player` belongs to the game.
    pub fn contains(&self, player: &P) -> bool {
        self.index.contains_key(player)
    }

    /// Check whether the friendship relation is symmetric.
    pub fn is_symmetric(&self) -> bool {
        self.players.iter().all(|p| {
            self.friends_of(p)
                .iter()
                .all(|f| self.friends_of(f).contains(p))
        })
    }

    /// Total number of (directed) friendship links.
    pub fn link_count(&self) -> usize {
        self.players
            .iter()
            .map(|p| {
                self.friends_of(p)
                    .iter()
                    .filter(|f| *f != p)
                    .collect::<FxHashSet<_>>()
                    .len()
            })
            .sum()
    }
}

impl FriendshipNetwork<usize> {
    /// Generate a random network on players `0..n`.
    ///
    /// Every ordered pair `(i, j)` with `i != j` becomes a friendship with
    /// probability `density` (clamped to `[0, 1]`).
    ///
    /// # Errors
    /// [`AcfgError::InvalidDensity`] if `density` is NaN or infinite.
    pub fn random<R: Rng>(n: usize, density: f64, rng: &mut R) -> AcfgResult<Self> {
        if !density.is_finite() {
            return Err(AcfgError::InvalidDensity(density.to_string()));
        }
        let density = density.clamp(0.0, 1.0);
        let players: Vec<usize> = (0..n).collect();
        let friends: Vec<(usize, Vec<usize>)> = players
            .iter()
            .map(|&i| {
                let list = (0..n)
                    .filter(|&j| j != i && rng.gen_bool(density))
                    .collect();
                (i, list)
            })
            .collect();
        Self::new(players, friends)
    }
}
