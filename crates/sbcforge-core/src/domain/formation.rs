//! Formation templates.

use crate::error::{Result, SbcError};

/// Names of the built-in formation templates.
pub const FORMATION_NAMES: &[&str] = &[
    "3-4-1-2",
    "3-4-2-1",
    "3-1-4-2",
    "3-4-3",
    "3-5-2",
    "4-1-2-1-2",
    "4-1-2-1-2[2]",
    "4-1-4-1",
    "4-2-3-1",
    "4-2-3-1[2]",
    "4-2-2-2",
    "4-2-4",
    "4-3-1-2",
    "4-1-3-2",
    "4-3-2-1",
    "4-3-3",
    "4-3-3[2]",
    "4-3-3[3]",
    "4-3-3[4]",
    "4-3-3[5]",
    "4-4-1-1",
    "4-4-1-1[2]",
    "4-4-2",
    "4-4-2[2]",
    "4-5-1",
    "4-5-1[2]",
    "5-2-1-2",
    "5-2-2-1",
    "5-3-2",
    "5-4-1",
];

fn template(name: &str) -> Option<[&'static str; 11]> {
    let labels = match name {
        "3-4-1-2" => ["GK", "CB", "CB", "CB", "LM", "CM", "CM", "RM", "CAM", "ST", "ST"],
        "3-4-2-1" => ["GK", "CB", "CB", "CB", "LM", "CM", "CM", "RM", "CF", "ST", "CF"],
        "3-1-4-2" => ["GK", "CB", "CB", "CB", "LM", "CM", "CDM", "CM", "RM", "ST", "ST"],
        "3-4-3" => ["GK", "CB", "CB", "CB", "LM", "CM", "CM", "RM", "LW", "ST", "RW"],
        "3-5-2" => ["GK", "CB", "CB", "CB", "CDM", "CDM", "LM", "CAM", "RM", "ST", "ST"],
        "4-1-2-1-2" => ["GK", "LB", "CB", "CB", "RB", "CDM", "LM", "CAM", "RM", "ST", "ST"],
        "4-1-2-1-2[2]" => ["GK", "LB", "CB", "CB", "RB", "CDM", "CM", "CAM", "CM", "ST", "ST"],
        "4-1-4-1" => ["GK", "LB", "CB", "CB", "RB", "CDM", "LM", "CM", "CM", "RM", "ST"],
        "4-2-3-1" => ["GK", "LB", "CB", "CB", "RB", "CDM", "CDM", "CAM", "CAM", "CAM", "ST"],
        "4-2-3-1[2]" => ["GK", "LB", "CB", "CB", "RB", "CDM", "CDM", "CAM", "LM", "ST", "RM"],
        "4-2-2-2" => ["GK", "LB", "CB", "CB", "RB", "CDM", "CDM", "CAM", "CAM", "ST", "ST"],
        "4-2-4" => ["GK", "LB", "CB", "CB", "RB", "CM", "CM", "LW", "ST", "ST", "RW"],
        "4-3-1-2" => ["GK", "CB", "CB", "LB", "RB", "CM", "CM", "CM", "CAM", "ST", "ST"],
        "4-1-3-2" => ["GK", "LB", "CB", "CB", "RB", "CDM", "LM", "CM", "RM", "ST", "ST"],
        "4-3-2-1" => ["GK", "LB", "CB", "CB", "RB", "CM", "CM", "CM", "CF", "ST", "CF"],
        "4-3-3" => ["GK", "LB", "CB", "CB", "RB", "CM", "CM", "CM", "LW", "ST", "RW"],
        "4-3-3[2]" => ["GK", "LB", "CB", "CB", "RB", "CM", "CDM", "CM", "LW", "ST", "RW"],
        "4-3-3[3]" => ["GK", "LB", "CB", "CB", "RB", "CDM", "CDM", "CM", "LW", "ST", "RW"],
        "4-3-3[4]" => ["GK", "LB", "CB", "CB", "RB", "CM", "CM", "CAM", "LW", "ST", "RW"],
        "4-3-3[5]" => ["GK", "LB", "CB", "CB", "RB", "CDM", "CM", "CM", "LW", "CF", "RW"],
        "4-4-1-1" => ["GK", "LB", "CB", "CB", "RB", "CM", "CM", "LM", "CF", "RM", "ST"],
        "4-4-1-1[2]" => ["GK", "LB", "CB", "CB", "RB", "CM", "CM", "LM", "CAM", "RM", "ST"],
        "4-4-2" => ["GK", "LB", "CB", "CB", "RB", "LM", "CM", "CM", "RM", "ST", "ST"],
        "4-4-2[2]" => ["GK", "LB", "CB", "CB", "RB", "LM", "CDM", "CDM", "RM", "ST", "ST"],
        "4-5-1" => ["GK", "CB", "CB", "LB", "RB", "CM", "LM", "CAM", "CAM", "RM", "ST"],
        "4-5-1[2]" => ["GK", "CB", "CB", "LB", "RB", "CM", "LM", "CM", "CM", "RM", "ST"],
        "5-2-1-2" => ["GK", "LWB", "CB", "CB", "CB", "RWB", "CM", "CM", "CAM", "ST", "ST"],
        "5-2-2-1" => ["GK", "LWB", "CB", "CB", "CB", "RWB", "CM", "CM", "LW", "ST", "RW"],
        "5-3-2" => ["GK", "LWB", "CB", "CB", "CB", "RWB", "CM", "CDM", "CM", "ST", "ST"],
        "5-4-1" => ["GK", "LWB", "CB", "CB", "CB", "RWB", "CM", "CM", "LM", "RM", "ST"],
        _ => return None,
    };
    Some(labels)
}

/// An ordered list of role-label slots.
///
/// The required count of a label is the number of times it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formation {
    name: String,
    slots: Vec<String>,
}

impl Formation {
    /// Looks up a built-in template by name.
    ///
    /// # Errors
    ///
    /// Returns [`SbcError::UnknownFormation`] for names outside
    /// [`FORMATION_NAMES`].
    ///
    /// # Example
    ///
    /// ```
    /// use sbcforge_core::Formation;
    ///
    /// let formation = Formation::named("4-4-2").unwrap();
    /// assert_eq!(formation.len(), 11);
    /// assert_eq!(formation.count("CB"), 2);
    /// assert_eq!(formation.count("CAM"), 0);
    /// ```
    pub fn named(name: &str) -> Result<Self> {
        let labels = template(name).ok_or_else(|| SbcError::UnknownFormation(name.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            slots: labels.iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Creates a custom formation from slot labels.
    pub fn from_labels<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            slots: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Required count of `label`.
    pub fn count(&self, label: &str) -> usize {
        self.slots.iter().filter(|s| *s == label).count()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s == label)
    }

    /// Distinct labels in first-seen order with their required counts.
    pub fn label_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for slot in &self.slots {
            match counts.iter_mut().find(|(label, _)| *label == slot.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((slot.as_str(), 1)),
            }
        }
        counts
    }
}
