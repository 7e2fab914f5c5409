//! Domain types: candidates, rosters and formations.

mod formation;

#[cfg(test)]
mod tests;

pub use formation::{Formation, FORMATION_NAMES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One selectable roster row.
///
/// A card with alternate roles may appear several times in a roster, once
/// per role, sharing `name` and `source_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    /// Identity key used for deduplication.
    pub name: String,
    pub club: String,
    pub league: String,
    pub nation: String,
    /// Role label this row is eligible for (e.g. "CB").
    pub role: String,
    pub rating: u32,
    /// Quality tier, e.g. "Gold".
    pub quality: String,
    /// Rarity tier, e.g. "Rare", "TOTW", "Icon".
    pub rarity: String,
    pub cost: i64,
    /// Row id in the ingested source table.
    pub source_row: usize,
    /// Spare duplicate of a card already owned.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duplicate: bool,
    /// Other role labels this card may be played in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub alternate_roles: Vec<String>,
}

impl Candidate {
    /// Creates a candidate with default quality "Gold" and rarity "Common".
    pub fn new(
        name: impl Into<String>,
        club: impl Into<String>,
        league: impl Into<String>,
        nation: impl Into<String>,
        role: impl Into<String>,
        rating: u32,
        cost: i64,
    ) -> Self {
        Self {
            name: name.into(),
            club: club.into(),
            league: league.into(),
            nation: nation.into(),
            role: role.into(),
            rating,
            quality: "Gold".to_string(),
            rarity: "Common".to_string(),
            cost,
            source_row: 0,
            duplicate: false,
            alternate_roles: Vec::new(),
        }
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_source_row(mut self, row: usize) -> Self {
        self.source_row = row;
        self
    }

    pub fn with_duplicate(mut self, duplicate: bool) -> Self {
        self.duplicate = duplicate;
        self
    }

    pub fn with_alternate_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.alternate_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the group value of this candidate for a chemistry group kind.
    pub fn group_value(&self, kind: GroupKind) -> &str {
        match kind {
            GroupKind::Club => &self.club,
            GroupKind::League => &self.league,
            GroupKind::Nation => &self.nation,
        }
    }
}

/// Chemistry group kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupKind {
    Club,
    League,
    Nation,
}

impl GroupKind {
    /// All group kinds in compilation order.
    pub const ALL: [GroupKind; 3] = [GroupKind::Club, GroupKind::League, GroupKind::Nation];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupKind::Club => "club",
            GroupKind::League => "league",
            GroupKind::Nation => "nation",
        }
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, immutable collection of candidates indexed `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    candidates: Vec<Candidate>,
}

impl Roster {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Returns a roster with one extra row per alternate role of each card.
    ///
    /// The primary row keeps its position; alternates follow it directly,
    /// so expansion is stable for identical input.
    pub fn expand_alternate_roles(&self) -> Roster {
        let mut expanded = Vec::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            expanded.push(candidate.clone());
            for role in &candidate.alternate_roles {
                if *role == candidate.role {
                    continue;
                }
                let mut alternate = candidate.clone();
                alternate.role = role.clone();
                expanded.push(alternate);
            }
        }
        Roster::new(expanded)
    }

    /// Returns a roster without rows whose role is absent from `formation`.
    pub fn retain_positions(&self, formation: &Formation) -> Roster {
        Roster::new(
            self.candidates
                .iter()
                .filter(|c| formation.contains(&c.role))
                .cloned()
                .collect(),
        )
    }
}

impl FromIterator<Candidate> for Roster {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Roster::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
