//! Chemistry of a known assignment, computed without a solver.

use sbcforge_config::RuleConfig;
use sbcforge_core::{GroupKind, Roster, RosterIndex};

use super::{bucket_top, contributors, kind_slot, profiles, StepFunction};
use crate::variables::MAX_CHEMISTRY;

/// Group tiers and per-candidate chemistry of one assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChemistryReport {
    tiers: [Vec<u8>; 3],
    /// Chemistry of every roster row; 0 off the pitch.
    pub chemistry: Vec<u8>,
    pub total: u32,
}

impl ChemistryReport {
    /// Tier of group `group` of `kind`.
    pub fn tier(&self, kind: GroupKind, group: usize) -> u8 {
        self.tiers[kind_slot(kind)][group]
    }

    pub fn tiers(&self, kind: GroupKind) -> &[u8] {
        &self.tiers[kind_slot(kind)]
    }
}

/// Evaluates chemistry for the rows flagged in `on_pitch`.
///
/// Uses the same step functions and exception table as the compiled model,
/// so the result matches the chemistry a solver reports for that squad.
/// Candidates past the end of `on_pitch` count as off the pitch.
///
/// # Example
///
/// ```
/// use sbcforge_config::RuleConfig;
/// use sbcforge_core::{Candidate, Roster, RosterIndex};
/// use sbcforge_model::chemistry::evaluate_chemistry;
///
/// let roster: Roster = (0..4)
///     .map(|i| Candidate::new(format!("P{i}"), "Arsenal", "Premier League", "England", "CB", 80, 100))
///     .collect();
/// let index = RosterIndex::build(&roster);
/// let report = evaluate_chemistry(&roster, &index, &RuleConfig::default(), &[true; 4]);
///
/// // club tier 2, league tier 1, nation tier 1
/// assert_eq!(report.chemistry, vec![3, 3, 3, 3]);
/// assert_eq!(report.total, 12);
/// ```
pub fn evaluate_chemistry(
    roster: &Roster,
    index: &RosterIndex,
    rules: &RuleConfig,
    on_pitch: &[bool],
) -> ChemistryReport {
    let profiles = profiles(roster, &rules.chemistry);
    let placed = |i: usize| on_pitch.get(i).copied().unwrap_or(false);

    let tiers = GroupKind::ALL.map(|kind| {
        contributors(index, &profiles, kind)
            .iter()
            .map(|list| {
                let count: u32 = list
                    .iter()
                    .filter(|&&(i, _)| placed(i))
                    .map(|&(_, w)| w)
                    .sum();
                StepFunction::new(kind, bucket_top(list, rules.squad_size)).tier(count)
            })
            .collect::<Vec<_>>()
    });

    let chemistry: Vec<u8> = profiles
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            if !placed(i) {
                return 0;
            }
            profile.fixed.unwrap_or_else(|| {
                let sum: u8 = GroupKind::ALL
                    .into_iter()
                    .filter(|&kind| profile.weight(kind) > 0)
                    .map(|kind| tiers[kind_slot(kind)][index.group_of(kind, i)])
                    .sum();
                sum.min(MAX_CHEMISTRY as u8)
            })
        })
        .collect();

    let total = chemistry.iter().map(|&c| u32::from(c)).sum();
    ChemistryReport {
        tiers,
        chemistry,
        total,
    }
}
