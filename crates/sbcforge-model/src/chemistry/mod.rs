//! Chemistry engine.
//!
//! Group tiers come from a step function over the weighted count of
//! positioned squad members of the group. A candidate's chemistry is the sum
//! of its club, league and nation tiers clamped to 3, a fixed value for
//! exception rarities, and 0 off the pitch.
//!
//! [`compile`] encodes this into the model; [`evaluate`] computes it directly
//! for a known assignment with the same tables.

pub mod compile;
pub mod evaluate;


use sbcforge_config::ChemistryConfig;
use sbcforge_core::{Candidate, GroupKind, Roster, RosterIndex};

pub use evaluate::{evaluate_chemistry, ChemistryReport};

use crate::variables::BUCKETS;

/// Lowest qualifying count of each bucket.
fn lower_bounds(kind: GroupKind) -> [u32; BUCKETS] {
    match kind {
        GroupKind::Club => [0, 2, 4, 7],
        GroupKind::League => [0, 3, 5, 8],
        GroupKind::Nation => [0, 2, 5, 8],
    }
}

/// Bucket boundaries of one group.
///
/// # Example
///
/// ```
/// use sbcforge_core::GroupKind;
/// use sbcforge_model::chemistry::StepFunction;
///
/// let club = StepFunction::new(GroupKind::Club, 11);
/// assert_eq!(club.range(2), Some((4, 6)));
/// assert_eq!(club.range(3), Some((7, 11)));
/// assert_eq!(club.tier(3), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepFunction {
    lower: [u32; BUCKETS],
    top: u32,
}

impl StepFunction {
    /// Step function of `kind` whose last bucket ends at `top`.
    pub fn new(kind: GroupKind, top: u32) -> Self {
        Self {
            lower: lower_bounds(kind),
            top,
        }
    }

    /// Inclusive count range of bucket `k`, or `None` when the group can
    /// never reach it.
    pub fn range(&self, k: usize) -> Option<(u32, u32)> {
        let lb = self.lower[k];
        let ub = match self.lower.get(k + 1) {
            Some(&next) => (next - 1).min(self.top),
            None => self.top,
        };
        (lb <= ub).then_some((lb, ub))
    }

    /// Tier reached by a qualifying count. Counts past `top` stay in the
    /// last bucket.
    pub fn tier(&self, count: u32) -> u8 {
        self.lower
            .iter()
            .rposition(|&lb| count >= lb)
            .map_or(0, |k| k as u8)
    }
}

/// Tier of a group with qualifying `count` in a squad of `squad_size`.
pub fn bucket_tier(kind: GroupKind, count: u32, squad_size: usize) -> u8 {
    let top = (squad_size as u32).max(count);
    StepFunction::new(kind, top).tier(count)
}

/// How one candidate takes part in chemistry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChemistryProfile {
    /// Chemistry held regardless of group tiers.
    pub fixed: Option<u8>,
    /// Contribution to club, league and nation counts.
    pub weights: [u32; 3],
    /// Counts toward every league.
    pub every_league: bool,
}

impl ChemistryProfile {
    const DEFAULT: ChemistryProfile = ChemistryProfile {
        fixed: None,
        weights: [1, 1, 1],
        every_league: false,
    };

    pub fn of(candidate: &Candidate, config: &ChemistryConfig) -> Self {
        match config.exception_for(&candidate.rarity) {
            Some(exception) => Self {
                fixed: exception.fixed_chemistry,
                weights: GroupKind::ALL.map(|kind| exception.weight(kind)),
                every_league: exception.every_league,
            },
            None => Self::DEFAULT,
        }
    }

    pub fn weight(&self, kind: GroupKind) -> u32 {
        self.weights[kind_slot(kind)]
    }
}

pub(crate) fn kind_slot(kind: GroupKind) -> usize {
    match kind {
        GroupKind::Club => 0,
        GroupKind::League => 1,
        GroupKind::Nation => 2,
    }
}

pub(crate) fn profiles(roster: &Roster, config: &ChemistryConfig) -> Vec<ChemistryProfile> {
    roster
        .iter()
        .map(|candidate| ChemistryProfile::of(candidate, config))
        .collect()
}

/// Weighted contributors of every group of `kind`, by group id.
///
/// A group's members contribute their weight; `every_league` candidates
/// also contribute to every other league.
pub(crate) fn contributors(
    index: &RosterIndex,
    profiles: &[ChemistryProfile],
    kind: GroupKind,
) -> Vec<Vec<(usize, u32)>> {
    let groups = index.group(kind);
    let roaming: Vec<usize> = if kind == GroupKind::League {
        (0..profiles.len())
            .filter(|&i| profiles[i].every_league && profiles[i].weight(kind) > 0)
            .collect()
    } else {
        Vec::new()
    };

    groups
        .iter()
        .map(|(g, _, members)| {
            let mut list: Vec<(usize, u32)> = members
                .iter()
                .map(|&i| (i, profiles[i].weight(kind)))
                .filter(|&(_, w)| w > 0)
                .collect();
            for &i in &roaming {
                if index.group_of(kind, i) != g {
                    list.push((i, profiles[i].weight(kind)));
                }
            }
            list.sort_unstable_by_key(|&(i, _)| i);
            list
        })
        .collect()
}

/// Upper end of a group's last bucket.
pub(crate) fn bucket_top(contributors: &[(usize, u32)], squad_size: usize) -> u32 {
    let reachable: u32 = contributors.iter().map(|&(_, w)| w).sum();
    (squad_size as u32).max(reachable)
}
