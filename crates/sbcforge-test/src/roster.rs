//! Roster fixtures.

use sbcforge_core::{Candidate, Roster};

/// Formation used by [`worked_scenario`].
pub const WORKED_SCENARIO_FORMATION: &str = "4-4-2";

/// Shorthand for a Gold Common candidate.
pub fn card(
    name: &str,
    club: &str,
    league: &str,
    nation: &str,
    role: &str,
    rating: u32,
    cost: i64,
) -> Candidate {
    Candidate::new(name, club, league, nation, role, rating, cost)
}

/// Fourteen candidates for a 4-4-2 squad of eleven.
///
/// Three ClubA centre backs compete for two CB slots, three strikers for
/// two ST slots and three central midfielders for two CM slots, giving 27
/// formation-complete squads. With a weighted squad rating of 80 and a
/// chemistry minimum of 20 the cheapest valid squad costs 3820; the plain
/// average formula raises it to 4460.
pub fn worked_scenario() -> Roster {
    vec![
        card("Keeper", "ClubA", "LeagueX", "NationP", "GK", 80, 300),
        card("Left Back", "ClubA", "LeagueX", "NationP", "LB", 79, 250),
        card("Centre One", "ClubA", "LeagueX", "NationP", "CB", 82, 700),
        card("Centre Two", "ClubA", "LeagueX", "NationQ", "CB", 78, 200),
        card("Centre Three", "ClubA", "LeagueX", "NationQ", "CB", 80, 400),
        card("Right Back", "ClubB", "LeagueX", "NationQ", "RB", 79, 250),
        card("Left Mid", "ClubB", "LeagueX", "NationP", "LM", 81, 500),
        card("Mid One", "ClubB", "LeagueX", "NationQ", "CM", 83, 900),
        card("Mid Two", "ClubC", "LeagueY", "NationR", "CM", 77, 150),
        card("Mid Three", "ClubB", "LeagueX", "NationP", "CM", 80, 350),
        card("Right Mid", "ClubB", "LeagueX", "NationQ", "RM", 80, 300),
        card("Striker One", "ClubC", "LeagueY", "NationR", "ST", 84, 1000),
        card("Striker Two", "ClubB", "LeagueX", "NationP", "ST", 79, 260),
        card("Striker Three", "ClubC", "LeagueY", "NationR", "ST", 76, 120),
    ]
    .into_iter()
    .enumerate()
    .map(|(row, candidate)| candidate.with_source_row(row))
    .collect()
}

/// `size` candidates of one club, league and nation, all in `role`.
pub fn single_club(size: usize, role: &str) -> Roster {
    (0..size)
        .map(|i| {
            let name = format!("Solo{i}");
            card(&name, "Solo FC", "Solo League", "Sololand", role, 75, 100 + i as i64)
        })
        .collect()
}

/// Six candidates over three clubs, two leagues and three nations.
///
/// Rows 4 and 5 share the identity "Twin"; row 5 is a spare duplicate.
pub fn mixed_clubs() -> Roster {
    Roster::new(vec![
        card("Ana", "North", "Alpha", "Aland", "GK", 70, 100),
        card("Bo", "North", "Alpha", "Bland", "CB", 72, 200),
        card("Cy", "South", "Alpha", "Aland", "CB", 74, 300),
        card("Di", "South", "Beta", "Cland", "ST", 76, 400).with_rarity("Rare"),
        card("Twin", "East", "Beta", "Bland", "ST", 78, 500).with_rarity("TOTW"),
        card("Twin", "East", "Beta", "Bland", "CM", 78, 500)
            .with_rarity("TOTW")
            .with_duplicate(true),
    ])
}
