//! Roster indexing.
//!
//! Maps every attribute value to a dense id (first-seen order) and groups
//! candidate indices by that id, so rule compilation can look up the rows of
//! a club, a league, a role label or an identity without scanning the roster.

use std::collections::HashMap;

use crate::domain::{Candidate, GroupKind, Roster};

/// Indexed candidate attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Club,
    League,
    Nation,
    Role,
    Rating,
    Quality,
    Rarity,
    Name,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Club,
        Attribute::League,
        Attribute::Nation,
        Attribute::Role,
        Attribute::Rating,
        Attribute::Quality,
        Attribute::Rarity,
        Attribute::Name,
    ];

    fn key(self, candidate: &Candidate) -> String {
        match self {
            Attribute::Club => candidate.club.clone(),
            Attribute::League => candidate.league.clone(),
            Attribute::Nation => candidate.nation.clone(),
            Attribute::Role => candidate.role.clone(),
            Attribute::Rating => candidate.rating.to_string(),
            Attribute::Quality => candidate.quality.clone(),
            Attribute::Rarity => candidate.rarity.clone(),
            Attribute::Name => candidate.name.clone(),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl From<GroupKind> for Attribute {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Club => Attribute::Club,
            GroupKind::League => Attribute::League,
            GroupKind::Nation => Attribute::Nation,
        }
    }
}

/// Dense value ids and member lists for one attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeIndex {
    ids: HashMap<String, usize>,
    values: Vec<String>,
    members: Vec<Vec<usize>>,
    of_candidate: Vec<usize>,
}

impl AttributeIndex {
    fn insert(&mut self, key: String, candidate: usize) {
        let id = match self.ids.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.values.len();
                self.ids.insert(key.clone(), id);
                self.values.push(key);
                self.members.push(Vec::new());
                id
            }
        };
        self.members[id].push(candidate);
        self.of_candidate.push(id);
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn id_of(&self, value: &str) -> Option<usize> {
        self.ids.get(value).copied()
    }

    pub fn value_of(&self, id: usize) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// Candidate indices of value `id` in roster order.
    pub fn members(&self, id: usize) -> &[usize] {
        self.members.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidate indices of `value`; empty when the value is absent.
    pub fn members_of_value(&self, value: &str) -> &[usize] {
        self.id_of(value).map(|id| self.members(id)).unwrap_or(&[])
    }

    /// Value id of the candidate at `index`.
    pub fn id_of_candidate(&self, index: usize) -> usize {
        self.of_candidate[index]
    }

    /// Iterates `(id, value, members)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &[usize])> {
        self.values
            .iter()
            .zip(&self.members)
            .enumerate()
            .map(|(id, (value, members))| (id, value.as_str(), members.as_slice()))
    }
}

/// Attribute indices over a roster.
///
/// # Example
///
/// ```
/// use sbcforge_core::{Attribute, Candidate, Roster, RosterIndex};
///
/// let roster = Roster::new(vec![
///     Candidate::new("Saka", "Arsenal", "Premier League", "England", "RW", 87, 900),
///     Candidate::new("Pedri", "Barcelona", "LaLiga", "Spain", "CM", 86, 800),
///     Candidate::new("Rice", "Arsenal", "Premier League", "England", "CDM", 87, 700),
/// ]);
/// let index = RosterIndex::build(&roster);
///
/// let clubs = index.attribute(Attribute::Club);
/// assert_eq!(clubs.len(), 2);
/// assert_eq!(clubs.members_of_value("Arsenal"), &[0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterIndex {
    attributes: Vec<AttributeIndex>,
    len: usize,
}

impl RosterIndex {
    /// Builds every attribute index in one pass over the roster.
    pub fn build(roster: &Roster) -> Self {
        let mut attributes = vec![AttributeIndex::default(); Attribute::ALL.len()];
        for (i, candidate) in roster.iter().enumerate() {
            for attribute in Attribute::ALL {
                attributes[attribute.slot()].insert(attribute.key(candidate), i);
            }
        }
        Self {
            attributes,
            len: roster.len(),
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> &AttributeIndex {
        &self.attributes[attribute.slot()]
    }

    pub fn group(&self, kind: GroupKind) -> &AttributeIndex {
        self.attribute(kind.into())
    }

    /// Group id of the candidate at `index` for a chemistry group kind.
    pub fn group_of(&self, kind: GroupKind, index: usize) -> usize {
        self.group(kind).id_of_candidate(index)
    }

    /// Number of indexed candidates.
    pub fn candidate_count(&self) -> usize {
        self.len
    }
}
