//! Tests for rule compilation.
//!
//! Each test completes a model assignment from a chosen squad of the
//! `mixed_clubs` fixture and checks whether the compiled model accepts it.
//!
//! | row | name | club  | league | nation | role | rating | rarity | cost |
//! |-----|------|-------|--------|--------|------|--------|--------|------|
//! | 0   | Ana  | North | Alpha  | Aland  | GK   | 70     | Common | 100  |
//! | 1   | Bo   | North | Alpha  | Bland  | CB   | 72     | Common | 200  |
//! | 2   | Cy   | South | Alpha  | Aland  | CB   | 74     | Common | 300  |
//! | 3   | Di   | South | Beta   | Cland  | ST   | 76     | Rare   | 400  |
//! | 4   | Twin | East  | Beta   | Bland  | ST   | 78     | TOTW   | 500  |
//! | 5   | Twin | East  | Beta   | Bland  | CM   | 78     | TOTW   | 500  |

use sbcforge_config::{
    CountKind, DuplicatePriority, FormationMode, IncludeRule, ObjectiveMode, RuleConfig, RuleKind,
    RuleSet, SquadRatingFormula, TierMinimum, UniqueCount,
};
use sbcforge_core::{GroupKind, SbcError};
use sbcforge_test::mixed_clubs;

use crate::compile;
use crate::test_support::{complete, complete_with};

/// Three-player squads with the formation rule switched off.
fn base() -> RuleConfig {
    RuleConfig::new()
        .with_squad_size(3)
        .with_custom_formation(["GK", "CB", "ST"])
        .with_enabled_rules(RuleSet::all().without(RuleKind::Formation))
}

fn accepts(rules: &RuleConfig, picks: &[usize]) -> bool {
    let roster = mixed_clubs();
    let compiled = compile(&roster, rules).unwrap();
    let values = complete(&compiled, &roster, rules, picks);
    compiled.model.is_satisfied_by(&values)
}

fn accepts_positioned(rules: &RuleConfig, picks: &[usize], positioned: &[usize]) -> bool {
    let roster = mixed_clubs();
    let compiled = compile(&roster, rules).unwrap();
    let values = complete_with(&compiled, &roster, rules, picks, positioned);
    compiled.model.is_satisfied_by(&values)
}

#[test]
fn test_squad_size() {
    assert!(accepts(&base(), &[0, 1, 2]));
    assert!(!accepts(&base(), &[0, 1]));
    assert!(!accepts(&base(), &[0, 1, 2, 3]));
}

#[test]
fn test_unique_names() {
    assert!(!accepts(&base(), &[0, 4, 5]));

    let rules = base().with_enabled_rules(
        RuleSet::all()
            .without(RuleKind::Formation)
            .without(RuleKind::UniqueNames),
    );
    assert!(accepts(&rules, &[0, 4, 5]));
}

#[test]
fn test_strict_formation() {
    let rules = base().with_enabled_rules(RuleSet::all());
    assert!(accepts(&rules, &[0, 1, 3]));
    // two centre backs for one CB slot
    assert!(!accepts(&rules, &[0, 1, 2]));
    // CM is not a slot of the formation
    assert!(!accepts(&rules, &[0, 1, 5]));
    // every selected row is positioned
    assert!(!accepts_positioned(&rules, &[0, 1, 3], &[0, 1]));
}

#[test]
fn test_flexible_formation() {
    let rules = base()
        .with_enabled_rules(RuleSet::all())
        .with_formation_mode(FormationMode::Flexible);

    assert!(accepts_positioned(&rules, &[0, 1, 5], &[0, 1]));
    assert!(accepts_positioned(&rules, &[0, 1, 2], &[0, 1]));
    assert!(!accepts_positioned(&rules, &[0, 1, 2], &[0, 1, 2]));
    assert!(!accepts_positioned(&rules, &[0, 1, 5], &[0, 1, 5]));
}

#[test]
fn test_disabled_formation_positions_selection() {
    assert!(!accepts_positioned(&base(), &[0, 1, 2], &[0, 1]));
}

#[test]
fn test_group_include() {
    let mut rules = base();
    rules.club.include.push(IncludeRule {
        values: vec!["North".into(), "East".into()],
        count: 3,
    });

    assert!(accepts(&rules, &[0, 1, 4]));
    assert!(!accepts(&rules, &[0, 2, 3]));
}

#[test]
fn test_unknown_include_value_is_reported() {
    let mut rules = base();
    rules.league.include.push(IncludeRule {
        values: vec!["Alpha".into(), "Gamma".into()],
        count: 2,
    });

    let compiled = compile(&mixed_clubs(), &rules).unwrap();
    assert_eq!(compiled.report.unknown_values, vec!["league:Gamma".to_string()]);
    assert!(accepts(&rules, &[0, 1, 3]));
    assert!(!accepts(&rules, &[0, 3, 4]));
}

#[test]
fn test_max_per_group() {
    let mut rules = base();
    rules.club.max_per_group = Some(1);

    assert!(accepts(&rules, &[0, 2, 4]));
    assert!(!accepts(&rules, &[0, 1, 4]));
}

#[test]
fn test_min_per_group() {
    let mut rules = base();
    rules.league.min_per_group = Some(3);

    assert!(accepts(&rules, &[0, 1, 2]));
    assert!(!accepts(&rules, &[0, 1, 3]));
}

#[test]
fn test_unique_count() {
    let with = |count, kind| {
        let mut rules = base();
        rules.group_mut(GroupKind::Nation).unique = Some(UniqueCount { count, kind });
        rules
    };

    // nations of [0, 1, 2]: Aland, Bland; of [0, 1, 3]: Aland, Bland, Cland
    assert!(accepts(&with(2, CountKind::Exactly), &[0, 1, 2]));
    assert!(!accepts(&with(2, CountKind::Exactly), &[0, 1, 3]));
    assert!(accepts(&with(2, CountKind::Max), &[0, 1, 2]));
    assert!(!accepts(&with(2, CountKind::Max), &[0, 1, 3]));
    assert!(accepts(&with(3, CountKind::Min), &[0, 1, 3]));
    assert!(!accepts(&with(3, CountKind::Min), &[0, 1, 2]));
}

#[test]
fn test_tier_minimum_with_rarity_class() {
    let rules = base()
        .with_rarity_class("Special", ["Rare", "TOTW"])
        .with_tier_minimum(TierMinimum::rarity("Special", 2));

    assert!(accepts(&rules, &[0, 3, 4]));
    assert!(!accepts(&rules, &[0, 1, 3]));
}

#[test]
fn test_tier_minimum_quality_and_rarity() {
    let gold_totw = base().with_tier_minimum(TierMinimum::quality_rarity("Gold", "TOTW", 1));
    assert!(accepts(&gold_totw, &[0, 1, 4]));
    assert!(!accepts(&gold_totw, &[0, 1, 3]));

    let silver = base().with_tier_minimum(TierMinimum::quality("Silver", 1));
    assert!(!accepts(&silver, &[0, 1, 2]));
}

#[test]
fn test_rating_minimum() {
    let rules = base().with_rating_minimum(76, 2);

    assert!(accepts(&rules, &[0, 3, 4]));
    assert!(!accepts(&rules, &[0, 1, 3]));
}

#[test]
fn test_squad_rating_formulas() {
    let rating = |target, formula| base().with_squad_rating(target, formula);

    // 72, 76, 78: average 75.3, weighted 76.4
    assert!(accepts(&rating(75, SquadRatingFormula::Average), &[1, 3, 4]));
    assert!(!accepts(&rating(76, SquadRatingFormula::Average), &[1, 3, 4]));
    assert!(accepts(&rating(76, SquadRatingFormula::Weighted), &[1, 3, 4]));
    assert!(!accepts(&rating(77, SquadRatingFormula::Weighted), &[1, 3, 4]));

    // 70, 78, 78: average 75.3, weighted 77.1
    let twins = |target, formula| {
        rating(target, formula).with_enabled_rules(
            RuleSet::all()
                .without(RuleKind::Formation)
                .without(RuleKind::UniqueNames),
        )
    };
    assert!(!accepts(&twins(77, SquadRatingFormula::Average), &[0, 4, 5]));
    assert!(accepts(&twins(77, SquadRatingFormula::Weighted), &[0, 4, 5]));
    assert!(!accepts(&twins(78, SquadRatingFormula::Weighted), &[0, 4, 5]));
}

#[test]
fn test_fixed_and_removed() {
    let fixed = base().with_fixed("Di");
    assert!(accepts(&fixed, &[0, 1, 3]));
    assert!(!accepts(&fixed, &[0, 1, 2]));

    let removed = base().with_removed("Ana");
    assert!(accepts(&removed, &[1, 2, 3]));
    assert!(!accepts(&removed, &[0, 1, 2]));
}

#[test]
fn test_missing_identities_are_reported() {
    let rules = base().with_fixed("Nobody").with_removed("Ghost").with_fixed("Bo");
    let compiled = compile(&mixed_clubs(), &rules).unwrap();

    assert_eq!(compiled.report.missing_fixed, vec!["Nobody".to_string()]);
    assert_eq!(compiled.report.missing_removed, vec!["Ghost".to_string()]);
    assert!(accepts(&rules, &[0, 1, 2]));
}

#[test]
fn test_duplicate_priority() {
    for priority in [
        DuplicatePriority::All,
        DuplicatePriority::AtLeastHalf,
        DuplicatePriority::AtLeastOne,
    ] {
        let rules = base().with_duplicate_priority(priority);
        assert!(accepts(&rules, &[0, 1, 5]), "{priority:?}");
        // row 4 shares the identity but is not the spare copy
        assert!(!accepts(&rules, &[0, 1, 4]), "{priority:?}");
    }
    assert!(accepts(&base(), &[0, 1, 4]));
}

#[test]
fn test_cost_ceiling() {
    let rules = base().with_max_cost(600);
    assert!(accepts(&rules, &[0, 1, 2]));
    assert!(!accepts(&rules, &[0, 1, 3]));

    let off = rules.with_enabled_rules(
        RuleSet::all()
            .without(RuleKind::Formation)
            .without(RuleKind::CostCeiling),
    );
    assert!(accepts(&off, &[0, 1, 3]));
}

#[test]
fn test_objectives() {
    let roster = mixed_clubs();

    let none = base().without_objective();
    assert!(compile(&roster, &none).unwrap().model.objective().is_none());

    let highest = base().with_objective(ObjectiveMode::MinimizeMax);
    assert!(accepts(&highest, &[0, 1, 4]));

    let mut two = base();
    two.objectives = vec![ObjectiveMode::MinimizeTotal, ObjectiveMode::MaximizeTotal];
    assert!(matches!(compile(&roster, &two), Err(SbcError::ModelInvalid(_))));
}
