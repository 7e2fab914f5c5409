//! Tests for rule configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [rules]
        squad_size = 11
        formation = "3-4-3"
        fixed = ["Saka"]
        removed = ["Rice"]
        duplicate_priority = "at_least_half"
        max_cost = 50000

        [rules.club]
        include = [{ values = ["Real Madrid", "Arsenal"], count = 3 }]
        max_per_group = 2
        min_per_group = 2
        unique = { count = 5, kind = "exactly" }

        [rules.league]
        include = [{ values = ["Premier League", "LaLiga"], count = 11 }]

        [[rules.tier_minimums]]
        quality = "Gold"
        rarity = "TOTW"
        count = 1

        [[rules.tier_minimums]]
        rarity = "Rare"
        count = 11

        [rules.rarity_classes]
        Rare = ["Rare", "TOTW"]

        [[rules.rating_minimums]]
        rating = 83
        count = 1

        [rules.squad_rating]
        target = 81
        formula = "average"

        [rules.chemistry]
        min_total = 24

        [[rules.chemistry.exceptions]]
        rarity = "Icon"
        fixed_chemistry = 3
        club_weight = 0
        nation_weight = 0
        every_league = true

        [solver]
        time_limit_seconds = 30
        workers = 4
    "#;

    let config = SbcConfig::from_toml_str(toml).unwrap();
    let rules = &config.rules;
    assert_eq!(rules.formation, "3-4-3");
    assert_eq!(rules.club.include[0].count, 3);
    assert_eq!(rules.club.max_per_group, Some(2));
    assert_eq!(
        rules.club.unique,
        Some(UniqueCount {
            count: 5,
            kind: CountKind::Exactly
        })
    );
    assert_eq!(rules.league.include[0].values.len(), 2);
    assert_eq!(rules.tier_minimums.len(), 2);
    assert_eq!(rules.rarity_values("Rare"), vec!["Rare", "TOTW"]);
    assert_eq!(rules.rarity_values("Common"), vec!["Common"]);
    assert_eq!(rules.squad_rating.unwrap().formula, SquadRatingFormula::Average);
    assert_eq!(rules.duplicate_priority, DuplicatePriority::AtLeastHalf);
    assert_eq!(rules.max_cost, Some(50000));
    assert_eq!(
        rules.chemistry.exception_for("Icon"),
        Some(&ChemistryException::icon("Icon"))
    );
    assert_eq!(config.solver.workers, 4);
    assert_eq!(config.solver.unimproved_time_limit(), None);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        rules:
          formation: "4-4-2"
          formation_mode: flexible
          objectives: [maximize_total]
          chemistry:
            min_total: 20
            min_per_player: 1
        solver:
          unimproved_seconds: 5
    "#;

    let config = SbcConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.rules.formation_mode, FormationMode::Flexible);
    assert_eq!(config.rules.objectives, vec![ObjectiveMode::MaximizeTotal]);
    assert_eq!(config.rules.chemistry.min_per_player, 1);
    assert_eq!(
        config.solver.unimproved_time_limit(),
        Some(Duration::from_secs(5))
    );
}

#[test]
fn test_defaults() {
    let rules = RuleConfig::default();
    assert_eq!(rules.squad_size, 11);
    assert_eq!(rules.formation_mode, FormationMode::Strict);
    assert_eq!(rules.objectives, vec![ObjectiveMode::MinimizeTotal]);
    assert_eq!(rules.duplicate_priority, DuplicatePriority::None);
    assert!(RuleKind::ALL.iter().all(|&r| rules.enabled_rules.is_enabled(r)));
    assert_eq!(rules.resolve_formation().unwrap().name(), "4-3-3");
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = SbcConfig::from_toml_str("").unwrap();
    assert_eq!(config.rules, RuleConfig::default());
    assert_eq!(config.solver, SolveSettings::default());
}

#[test]
fn test_builder() {
    let rules = RuleConfig::new()
        .with_formation("5-3-2")
        .with_squad_rating(84, SquadRatingFormula::Weighted)
        .with_chemistry_min(22)
        .with_fixed("Kane")
        .with_enabled_rules(RuleSet::all().without(RuleKind::Chemistry));

    assert_eq!(rules.resolve_formation().unwrap().count("CB"), 3);
    assert_eq!(rules.squad_rating.unwrap().target, 84);
    assert_eq!(rules.chemistry.min_total, 22);
    assert_eq!(rules.fixed, vec!["Kane".to_string()]);
    assert!(!rules.enabled_rules.is_enabled(RuleKind::Chemistry));
    assert!(rules.enabled_rules.is_enabled(RuleKind::SquadSize));
}

#[test]
fn test_custom_formation_overrides_name() {
    let rules = RuleConfig::new().with_custom_formation(["GK", "CB", "ST"]);
    let formation = rules.resolve_formation().unwrap();
    assert_eq!(formation.len(), 3);
    assert_eq!(formation.name(), "custom");
}

#[test]
fn test_enabled_rules_from_toml() {
    let rules =
        RuleConfig::from_toml_str(r#"enabled_rules = ["squad_size", "formation"]"#).unwrap();
    assert!(rules.enabled_rules.is_enabled(RuleKind::Formation));
    assert!(!rules.enabled_rules.is_enabled(RuleKind::UniqueNames));
    assert_eq!(rules.enabled_rules.iter().count(), 2);
}

#[test]
fn test_validate_rejects_bad_values() {
    assert!(RuleConfig::new().validate().is_ok());
    assert!(matches!(
        RuleConfig::new().with_squad_size(0).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        RuleConfig::new().with_formation("9-9-9").validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        RuleConfig::new().with_chemistry_per_player(4).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        RuleConfig::new()
            .with_chemistry_exception(ChemistryException::multiplier("Hero", 5, 1, 2, 1))
            .validate(),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_exception_weights() {
    let icon = ChemistryException::icon("Icon");
    assert_eq!(icon.weight(GroupKind::Club), 0);
    assert_eq!(icon.weight(GroupKind::League), 1);
    assert!(icon.every_league);

    let hero = ChemistryException::multiplier("Hero", 3, 1, 2, 1);
    assert_eq!(hero.weight(GroupKind::League), 2);
    assert!(!hero.every_league);
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        SbcConfig::load("/nonexistent/sbc.toml"),
        Err(ConfigError::Io(_))
    ));
}
