//! Tests for domain types.

use super::*;

fn cb(name: &str) -> Candidate {
    Candidate::new(name, "ClubA", "Premier League", "England", "CB", 80, 1000)
}

#[test]
fn test_every_named_formation_has_eleven_slots() {
    for name in FORMATION_NAMES {
        let formation = Formation::named(name).unwrap();
        assert_eq!(formation.len(), 11, "formation {name}");
        assert_eq!(formation.count("GK"), 1, "formation {name}");
    }
}

#[test]
fn test_three_four_three_uses_wingers() {
    let formation = Formation::named("3-4-3").unwrap();
    assert_eq!(formation.count("LW"), 1);
    assert_eq!(formation.count("RW"), 1);
    assert_eq!(formation.count("CAM"), 0);
}

#[test]
fn test_unknown_formation() {
    let err = Formation::named("2-2-6").unwrap_err();
    assert!(matches!(err, crate::SbcError::UnknownFormation(name) if name == "2-2-6"));
}

#[test]
fn test_label_counts_first_seen_order() {
    let formation = Formation::named("4-4-2").unwrap();
    let counts = formation.label_counts();
    assert_eq!(
        counts,
        vec![("GK", 1), ("LB", 1), ("CB", 2), ("RB", 1), ("LM", 1), ("CM", 2), ("RM", 1), ("ST", 2)]
    );
    assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 11);
}

#[test]
fn test_expand_alternate_roles() {
    let roster = Roster::new(vec![
        cb("Stones").with_alternate_roles(["CDM", "CB", "RB"]).with_source_row(7),
        cb("Maguire"),
    ]);

    let expanded = roster.expand_alternate_roles();

    let roles: Vec<(&str, &str)> = expanded
        .iter()
        .map(|c| (c.name.as_str(), c.role.as_str()))
        .collect();
    assert_eq!(
        roles,
        vec![("Stones", "CB"), ("Stones", "CDM"), ("Stones", "RB"), ("Maguire", "CB")]
    );
    assert!(expanded.iter().filter(|c| c.name == "Stones").all(|c| c.source_row == 7));
}

#[test]
fn test_retain_positions() {
    let roster = Roster::new(vec![
        cb("Dias"),
        Candidate::new("Rodri", "ClubB", "LaLiga", "Spain", "CDM", 85, 3000),
    ]);
    let formation = Formation::named("4-4-2").unwrap();

    let kept = roster.retain_positions(&formation);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept.candidates()[0].name, "Dias");
}

#[test]
fn test_group_value() {
    let candidate = cb("White");
    assert_eq!(candidate.group_value(GroupKind::Club), "ClubA");
    assert_eq!(candidate.group_value(GroupKind::League), "Premier League");
    assert_eq!(candidate.group_value(GroupKind::Nation), "England");
}
