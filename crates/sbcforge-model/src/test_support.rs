//! Completes a model assignment from a chosen squad, for checking that the
//! compiled constraints accept exactly the squads they should.

use sbcforge_config::RuleConfig;
use sbcforge_core::{Attribute, GroupKind, Roster};

use crate::chemistry::{evaluate_chemistry, ChemistryProfile};
use crate::compiler::CompiledModel;

fn kind_and_group(s: &str) -> (GroupKind, usize) {
    for kind in GroupKind::ALL {
        if let Some(rest) = s.strip_prefix(kind.as_str()) {
            return (kind, rest.parse().unwrap());
        }
    }
    panic!("no group kind in {s}");
}

/// Values of every model variable when `picks` are selected and
/// `positioned` are positioned.
pub(crate) fn complete_with(
    compiled: &CompiledModel,
    roster: &Roster,
    rules: &RuleConfig,
    picks: &[usize],
    positioned: &[usize],
) -> Vec<i64> {
    let n = roster.len();
    let mut select = vec![false; n];
    for &i in picks {
        select[i] = true;
    }
    let mut position = vec![false; n];
    for &i in positioned {
        position[i] = true;
    }
    let on_pitch: Vec<bool> = (0..n).map(|i| select[i] && position[i]).collect();
    let report = evaluate_chemistry(roster, &compiled.index, rules, &on_pitch);

    let tier_sum = |i: usize| -> i64 {
        let profile = ChemistryProfile::of(&roster.candidates()[i], &rules.chemistry);
        GroupKind::ALL
            .into_iter()
            .filter(|&kind| profile.weight(kind) > 0)
            .map(|kind| i64::from(report.tier(kind, compiled.index.group_of(kind, i))))
            .sum()
    };
    let raw = |i: usize| -> i64 {
        let profile = ChemistryProfile::of(&roster.candidates()[i], &rules.chemistry);
        profile
            .fixed
            .map_or_else(|| tier_sum(i).min(3), i64::from)
    };
    let group_count = |kind: GroupKind, g: usize| -> usize {
        compiled
            .index
            .group(kind)
            .members(g)
            .iter()
            .filter(|&&i| select[i])
            .count()
    };

    let squad = rules.squad_size as i64;
    let total_rating: i64 = picks
        .iter()
        .map(|&i| i64::from(roster.candidates()[i].rating))
        .sum();
    let highest_cost = (0..n)
        .map(|i| if select[i] { roster.candidates()[i].cost } else { 0 })
        .max()
        .unwrap_or(0);
    let duplicates: Vec<Vec<usize>> = compiled
        .index
        .attribute(Attribute::Name)
        .iter()
        .map(|(_, _, rows)| {
            rows.iter()
                .copied()
                .filter(|&i| roster.candidates()[i].duplicate)
                .collect::<Vec<_>>()
        })
        .filter(|rows| !rows.is_empty())
        .collect();

    compiled
        .model
        .vars()
        .iter()
        .map(|def| {
            let name = def.name.as_str();
            let index = |prefix: &str| {
                name.strip_prefix(prefix)
                    .and_then(|s| s.parse::<usize>().ok())
            };
            if let Some(i) = index("select") {
                i64::from(select[i])
            } else if let Some(i) = index("position") {
                i64::from(position[i])
            } else if let Some(i) = index("on_pitch") {
                i64::from(on_pitch[i])
            } else if let Some(i) = index("raw_chem") {
                raw(i)
            } else if let Some(i) = index("chem") {
                i64::from(report.chemistry[i])
            } else if let Some(i) = index("within_cap") {
                i64::from(tier_sum(i) <= 3)
            } else if let Some(i) = index("excess") {
                let rating = i64::from(roster.candidates()[i].rating);
                (squad * rating * i64::from(select[i]) - total_rating).max(0)
            } else if let Some(d) = index("duplicate_picked") {
                i64::from(duplicates[d].iter().any(|&i| select[i]))
            } else if name == "max_cost" {
                highest_cost
            } else if let Some(rest) = name.strip_prefix("tier_") {
                let (kind, g) = kind_and_group(rest);
                i64::from(report.tier(kind, g))
            } else if let Some(rest) = name.strip_prefix("bucket_") {
                let (head, k) = rest.rsplit_once('_').unwrap();
                let (kind, g) = kind_and_group(head);
                i64::from(usize::from(report.tier(kind, g)) == k.parse::<usize>().unwrap())
            } else if let Some(rest) = name.strip_prefix("min_group_") {
                let (kind, g) = kind_and_group(rest);
                let min = rules.group(kind).min_per_group.unwrap();
                i64::from(group_count(kind, g) >= min)
            } else if let Some(rest) = name.strip_prefix("used_") {
                let (kind, g) = kind_and_group(rest);
                i64::from(group_count(kind, g) >= 1)
            } else {
                panic!("unexpected variable {name}")
            }
        })
        .collect()
}

/// Values of every model variable when `picks` are selected and positioned.
pub(crate) fn complete(
    compiled: &CompiledModel,
    roster: &Roster,
    rules: &RuleConfig,
    picks: &[usize],
) -> Vec<i64> {
    complete_with(compiled, roster, rules, picks, picks)
}
