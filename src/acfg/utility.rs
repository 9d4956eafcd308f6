//! Utility model for altruistic coalition formation games.
//!
//! A player values a coalition by counting its co-members: every friend is
//! worth `+n`, every other member `-1`. Scaling friends by the player count
//! makes a single friend outweigh any number of non-friends.
//!
//! The utility of a whole coalition structure blends the player's own value
//! with the value of its worst-off friend, according to the degree of
//! altruism:
//!
//! ```text
//! SF (selfish first):  M * own + min_friend
//! EQ (equal treatment): min(own, min_friend)
//! AL (altruistic):      own + M * min_friend
//! ```
//!
//! with `M = n^2` and `min_friend = 0` for players without friends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::acfg::error::{AcfgError, AcfgResult};
use crate::acfg::game::{FriendshipNetwork, Player};
use crate::acfg::structure::CoalitionStructure;

/// Numeric utility a player assigns to a coalition or structure.
pub type Utility = i64;

/// Degree of altruism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Degree {
    /// Selfish first: own coalition dominates, friends break ties.
    #[default]
    #[serde(rename = "SF")]
    SelfishFirst,
    /// Equal treatment: the minimum of own and worst friend's value.
    #[serde(rename = "EQ")]
    Equal,
    /// Altruistic treatment: worst friend's value dominates.
    #[serde(rename = "AL")]
    Altruistic,
}

impl Degree {
    /// All degrees, in `SF`, `EQ`, `AL` order.
    pub fn all() -> &'static [Degree] {
        &[Degree::SelfishFirst, Degree::Equal, Degree::Altruistic]
    }

    /// Short code used in game files (`SF`, `EQ`, `AL`).
    pub fn code(&self) -> &'static str {
        match self {
            Degree::SelfishFirst => "SF",
            Degree::Equal => "EQ",
            Degree::Altruistic => "AL",
        }
    }

    /// Combine a player's own value with its worst friend's value.
    pub fn combine(&self, own_value: Utility, min_friend_value: Utility, n: usize) -> Utility {
        let m = (n * n) as Utility;
        match self {
            Degree::SelfishFirst => m * own_value + min_friend_value,
            Degree::Equal => own_value.min(min_friend_value),
            Degree::Altruistic => own_value + m * min_friend_value,
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Degree {
    type Err = AcfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SF" => Ok(Degree::SelfishFirst),
            "EQ" => Ok(Degree::Equal),
            "AL" => Ok(Degree::Altruistic),
            _ => Err(AcfgError::InvalidDegree(s.to_string())),
        }
    }
}

/// Value of `coalition` for `player` in a game with `n` players.
///
/// The player itself is skipped, so a singleton (or a coalition the player
/// shares with nobody) is worth 0.
pub fn coalition_value<'a, P, I>(coalition: I, n: usize, player: &P, friends: &[P]) -> Utility
where
    P: Player + 'a,
    I: IntoIterator<Item = &'a P>,
{
    coalition
        .into_iter()
        .filter(|p| *p != player)
        .map(|p| if friends.contains(p) { n as Utility } else { -1 })
        .sum()
}

/// Value of `player`'s own coalition within `structure`.
fn own_coalition_value<P: Player>(
    structure: &CoalitionStructure<P>,
    network: &FriendshipNetwork<P>,
    player: &P,
) -> AcfgResult<Utility> {
    let coalition = structure
        .coalition_of(player)
        .ok_or_else(|| AcfgError::UnknownPlayer(format!("{:?}", player)))?;
    Ok(coalition_value(
        coalition,
        network.len(),
        player,
        network.friends_of(player),
    ))
}

/// Utility of `structure` for `player` under the given degree of altruism.
///
/// Each friend's value is taken in the friend's own coalition.
///
/// # Errors
/// [`AcfgError::UnknownPlayer`] if the player or one of its friends is not
/// covered by `structure`.
pub fn structure_utility<P: Player>(
    structure: &CoalitionStructure<P>,
    network: &FriendshipNetwork<P>,
    player: &P,
    degree: Degree,
) -> AcfgResult<Utility> {
    let own_value = own_coalition_value(structure, network, player)?;

    let mut min_friend_value: Option<Utility> = None;
    for friend in network.friends_of(player) {
        let v = own_coalition_value(structure, network, friend)?;
        min_friend_value = Some(min_friend_value.map_or(v, |m| m.min(v)));
    }

    Ok(degree.combine(own_value, min_friend_value.unwrap_or(0), network.len()))
}
