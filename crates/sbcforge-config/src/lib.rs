//! Configuration system for SbcForge.
//!
//! Load the challenge rules and solve settings from TOML or YAML so a new
//! squad building challenge needs no code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use sbcforge_config::{FormationMode, ObjectiveMode, SbcConfig};
//! use std::time::Duration;
//!
//! let config = SbcConfig::from_toml_str(r#"
//!     [rules]
//!     squad_size = 11
//!     formation = "4-4-2"
//!     formation_mode = "flexible"
//!     objectives = ["minimize_total"]
//!
//!     [rules.club]
//!     max_per_group = 3
//!
//!     [rules.chemistry]
//!     min_total = 24
//!
//!     [solver]
//!     time_limit_seconds = 60
//!     unimproved_seconds = 10
//! "#).unwrap();
//!
//! assert_eq!(config.rules.formation_mode, FormationMode::Flexible);
//! assert_eq!(config.rules.objectives, vec![ObjectiveMode::MinimizeTotal]);
//! assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(60)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use sbcforge_config::SbcConfig;
//!
//! let config = SbcConfig::load("sbc.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Duration;

use sbcforge_core::{Formation, GroupKind, SbcError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SbcError {
    fn from(err: ConfigError) -> Self {
        SbcError::Config(err.to_string())
    }
}

/// Rules plus solve settings, as stored in one configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SbcConfig {
    #[serde(default)]
    pub rules: RuleConfig,

    #[serde(default)]
    pub solver: SolveSettings,
}

impl SbcConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }
}

/// The full rule set of one squad building challenge.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RuleConfig {
    /// Number of players to select.
    #[serde(default = "default_squad_size")]
    pub squad_size: usize,

    /// Name of a built-in formation template.
    #[serde(default = "default_formation")]
    pub formation: String,

    /// Custom slot labels; overrides `formation` when set.
    #[serde(default)]
    pub custom_formation: Option<Vec<String>>,

    #[serde(default)]
    pub formation_mode: FormationMode,

    #[serde(default)]
    pub club: GroupRules,

    #[serde(default)]
    pub league: GroupRules,

    #[serde(default)]
    pub nation: GroupRules,

    /// Quality and/or rarity minimums.
    #[serde(default)]
    pub tier_minimums: Vec<TierMinimum>,

    /// Named rarity classes, e.g. `Rare = ["Rare", "TOTW", "Icon"]`.
    #[serde(default)]
    pub rarity_classes: BTreeMap<String, Vec<String>>,

    /// "Minimum OVR of X: at least Y players" rules.
    #[serde(default)]
    pub rating_minimums: Vec<RatingMinimum>,

    #[serde(default)]
    pub squad_rating: Option<SquadRatingRule>,

    #[serde(default)]
    pub chemistry: ChemistryConfig,

    /// Requested objective modes; at most one may be given.
    #[serde(default = "default_objectives")]
    pub objectives: Vec<ObjectiveMode>,

    /// Ceiling on the total cost of the squad.
    #[serde(default)]
    pub max_cost: Option<i64>,

    /// Identities that must be in the squad.
    #[serde(default)]
    pub fixed: Vec<String>,

    /// Identities that must not be in the squad.
    #[serde(default)]
    pub removed: Vec<String>,

    #[serde(default)]
    pub duplicate_priority: DuplicatePriority,

    #[serde(default)]
    pub enabled_rules: RuleSet,
}

fn default_squad_size() -> usize {
    11
}

fn default_formation() -> String {
    "4-3-3".to_string()
}

fn default_objectives() -> Vec<ObjectiveMode> {
    vec![ObjectiveMode::MinimizeTotal]
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            squad_size: default_squad_size(),
            formation: default_formation(),
            custom_formation: None,
            formation_mode: FormationMode::default(),
            club: GroupRules::default(),
            league: GroupRules::default(),
            nation: GroupRules::default(),
            tier_minimums: Vec::new(),
            rarity_classes: BTreeMap::new(),
            rating_minimums: Vec::new(),
            squad_rating: None,
            chemistry: ChemistryConfig::default(),
            objectives: default_objectives(),
            max_cost: None,
            fixed: Vec::new(),
            removed: Vec::new(),
            duplicate_priority: DuplicatePriority::default(),
            enabled_rules: RuleSet::default(),
        }
    }
}

impl RuleConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses rules from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parses rules from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_squad_size(mut self, squad_size: usize) -> Self {
        self.squad_size = squad_size;
        self
    }

    pub fn with_formation(mut self, name: impl Into<String>) -> Self {
        self.formation = name.into();
        self.custom_formation = None;
        self
    }

    pub fn with_custom_formation<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_formation = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_formation_mode(mut self, mode: FormationMode) -> Self {
        self.formation_mode = mode;
        self
    }

    /// Replaces the requested objectives with a single mode.
    pub fn with_objective(mut self, mode: ObjectiveMode) -> Self {
        self.objectives = vec![mode];
        self
    }

    /// Requests no objective: any feasible squad will do.
    pub fn without_objective(mut self) -> Self {
        self.objectives.clear();
        self
    }

    pub fn with_max_cost(mut self, max_cost: i64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    pub fn with_squad_rating(mut self, target: u32, formula: SquadRatingFormula) -> Self {
        self.squad_rating = Some(SquadRatingRule { target, formula });
        self
    }

    pub fn with_chemistry_min(mut self, min_total: u32) -> Self {
        self.chemistry.min_total = min_total;
        self
    }

    pub fn with_chemistry_per_player(mut self, min_per_player: u8) -> Self {
        self.chemistry.min_per_player = min_per_player;
        self
    }

    pub fn with_chemistry_exception(mut self, exception: ChemistryException) -> Self {
        self.chemistry.exceptions.push(exception);
        self
    }

    pub fn with_rating_minimum(mut self, rating: u32, count: usize) -> Self {
        self.rating_minimums.push(RatingMinimum { rating, count });
        self
    }

    pub fn with_tier_minimum(mut self, minimum: TierMinimum) -> Self {
        self.tier_minimums.push(minimum);
        self
    }

    pub fn with_rarity_class<I, S>(mut self, class: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rarity_classes
            .insert(class.into(), members.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fixed(mut self, name: impl Into<String>) -> Self {
        self.fixed.push(name.into());
        self
    }

    pub fn with_removed(mut self, name: impl Into<String>) -> Self {
        self.removed.push(name.into());
        self
    }

    pub fn with_duplicate_priority(mut self, priority: DuplicatePriority) -> Self {
        self.duplicate_priority = priority;
        self
    }

    pub fn with_enabled_rules(mut self, rules: RuleSet) -> Self {
        self.enabled_rules = rules;
        self
    }

    /// Returns the rules of one chemistry group kind.
    pub fn group(&self, kind: GroupKind) -> &GroupRules {
        match kind {
            GroupKind::Club => &self.club,
            GroupKind::League => &self.league,
            GroupKind::Nation => &self.nation,
        }
    }

    pub fn group_mut(&mut self, kind: GroupKind) -> &mut GroupRules {
        match kind {
            GroupKind::Club => &mut self.club,
            GroupKind::League => &mut self.league,
            GroupKind::Nation => &mut self.nation,
        }
    }

    /// Resolves the formation template.
    ///
    /// # Errors
    ///
    /// Returns [`SbcError::UnknownFormation`] when neither a custom formation
    /// nor a known template name is configured.
    pub fn resolve_formation(&self) -> Result<Formation, SbcError> {
        match &self.custom_formation {
            Some(labels) => Ok(Formation::from_labels("custom", labels.iter().cloned())),
            None => Formation::named(&self.formation),
        }
    }

    /// Rarity values matched by `rarity`: the class members when `rarity`
    /// names a class, otherwise the value itself.
    pub fn rarity_values<'a>(&'a self, rarity: &'a str) -> Vec<&'a str> {
        match self.rarity_classes.get(rarity) {
            Some(members) => members.iter().map(String::as_str).collect(),
            None => vec![rarity],
        }
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.squad_size == 0 {
            return Err(ConfigError::Invalid("squad_size must be positive".into()));
        }
        self.resolve_formation()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.chemistry.min_per_player > 3 {
            return Err(ConfigError::Invalid(format!(
                "chemistry.min_per_player is {}, maximum is 3",
                self.chemistry.min_per_player
            )));
        }
        for exception in &self.chemistry.exceptions {
            if exception.fixed_chemistry.is_some_and(|c| c > 3) {
                return Err(ConfigError::Invalid(format!(
                    "fixed chemistry of rarity `{}` exceeds 3",
                    exception.rarity
                )));
            }
        }
        if let Some(rule) = &self.squad_rating {
            if rule.target > 99 {
                return Err(ConfigError::Invalid(format!(
                    "squad rating target {} exceeds 99",
                    rule.target
                )));
            }
        }
        Ok(())
    }
}

/// How formation occupancy is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationMode {
    /// Every slot label is filled exactly by candidates of that label.
    #[default]
    Strict,

    /// Selected candidates may sit outside the formation; only positioned
    /// candidates count toward chemistry.
    Flexible,
}

/// Count comparison for unique-group rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountKind {
    Max,
    #[default]
    Min,
    Exactly,
}

/// Rules over one group kind (club, league or nation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupRules {
    /// "At least K players from these values" rules.
    #[serde(default)]
    pub include: Vec<IncludeRule>,

    /// "Same club/league/nation count: max X".
    #[serde(default)]
    pub max_per_group: Option<usize>,

    /// "Same club/league/nation count: min X".
    #[serde(default)]
    pub min_per_group: Option<usize>,

    /// "Clubs/leagues/nations: max, min or exactly X".
    #[serde(default)]
    pub unique: Option<UniqueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IncludeRule {
    pub values: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UniqueCount {
    pub count: usize,
    #[serde(default)]
    pub kind: CountKind,
}

/// Minimum number of players matching a quality and/or rarity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TierMinimum {
    #[serde(default)]
    pub quality: Option<String>,
    /// Rarity value or rarity class name.
    #[serde(default)]
    pub rarity: Option<String>,
    pub count: usize,
}

impl TierMinimum {
    pub fn rarity(rarity: impl Into<String>, count: usize) -> Self {
        Self {
            quality: None,
            rarity: Some(rarity.into()),
            count,
        }
    }

    pub fn quality(quality: impl Into<String>, count: usize) -> Self {
        Self {
            quality: Some(quality.into()),
            rarity: None,
            count,
        }
    }

    pub fn quality_rarity(
        quality: impl Into<String>,
        rarity: impl Into<String>,
        count: usize,
    ) -> Self {
        Self {
            quality: Some(quality.into()),
            rarity: Some(rarity.into()),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RatingMinimum {
    pub rating: u32,
    pub count: usize,
}

/// Squad rating formula variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SquadRatingFormula {
    /// Plain average; cheap and conservative.
    Average,

    /// Published formula crediting above-average ratings a second time.
    #[default]
    Weighted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SquadRatingRule {
    pub target: u32,
    #[serde(default)]
    pub formula: SquadRatingFormula,
}

/// Chemistry requirements and the rarity exception table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChemistryConfig {
    /// Squad total chemistry minimum; 0 disables it.
    #[serde(default)]
    pub min_total: u32,

    /// Chemistry minimum of every selected player.
    #[serde(default)]
    pub min_per_player: u8,

    #[serde(default)]
    pub exceptions: Vec<ChemistryException>,
}

impl ChemistryConfig {
    /// Returns the exception entry of `rarity`, if any.
    pub fn exception_for(&self, rarity: &str) -> Option<&ChemistryException> {
        self.exceptions.iter().find(|e| e.rarity == rarity)
    }
}

/// Chemistry behavior of one rarity tier.
///
/// Weights scale the candidate's contribution to the qualifying count of its
/// club, league and nation; a weight of 0 leaves that group untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChemistryException {
    pub rarity: String,

    /// Chemistry the candidate always has when positioned.
    #[serde(default)]
    pub fixed_chemistry: Option<u8>,

    #[serde(default = "default_weight")]
    pub club_weight: u32,

    #[serde(default = "default_weight")]
    pub league_weight: u32,

    #[serde(default = "default_weight")]
    pub nation_weight: u32,

    /// Contributes `league_weight` to every league instead of its own only.
    #[serde(default)]
    pub every_league: bool,
}

fn default_weight() -> u32 {
    1
}

impl ChemistryException {
    /// Icon-style tier: full chemistry, counts once for every league and
    /// never for clubs or nations.
    pub fn icon(rarity: impl Into<String>) -> Self {
        Self {
            rarity: rarity.into(),
            fixed_chemistry: Some(3),
            club_weight: 0,
            league_weight: 1,
            nation_weight: 0,
            every_league: true,
        }
    }

    /// Multiplier tier with a fixed chemistry value and per-group weights.
    pub fn multiplier(
        rarity: impl Into<String>,
        fixed_chemistry: u8,
        club_weight: u32,
        league_weight: u32,
        nation_weight: u32,
    ) -> Self {
        Self {
            rarity: rarity.into(),
            fixed_chemistry: Some(fixed_chemistry),
            club_weight,
            league_weight,
            nation_weight,
            every_league: false,
        }
    }

    /// Weight toward groups of `kind`.
    pub fn weight(&self, kind: GroupKind) -> u32 {
        match kind {
            GroupKind::Club => self.club_weight,
            GroupKind::League => self.league_weight,
            GroupKind::Nation => self.nation_weight,
        }
    }
}

/// Objective modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveMode {
    MinimizeTotal,
    MinimizeMax,
    MaximizeTotal,
}

/// How strongly duplicate cards are pushed into the squad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePriority {
    All,
    AtLeastHalf,
    AtLeastOne,
    #[default]
    None,
}

/// Compilable rule kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    SquadSize,
    UniqueNames,
    Formation,
    GroupInclude,
    GroupMax,
    GroupMinPerGroup,
    GroupUnique,
    TierMinimum,
    RatingMinimum,
    SquadRating,
    Chemistry,
    FixedCandidates,
    RemovedCandidates,
    DuplicatePriority,
    CostCeiling,
}

impl RuleKind {
    pub const ALL: [RuleKind; 15] = [
        RuleKind::SquadSize,
        RuleKind::UniqueNames,
        RuleKind::Formation,
        RuleKind::GroupInclude,
        RuleKind::GroupMax,
        RuleKind::GroupMinPerGroup,
        RuleKind::GroupUnique,
        RuleKind::TierMinimum,
        RuleKind::RatingMinimum,
        RuleKind::SquadRating,
        RuleKind::Chemistry,
        RuleKind::FixedCandidates,
        RuleKind::RemovedCandidates,
        RuleKind::DuplicatePriority,
        RuleKind::CostCeiling,
    ];
}

/// The set of rules compiled into the model. Defaults to every rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeSet<RuleKind>);

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl RuleSet {
    pub fn all() -> Self {
        Self(RuleKind::ALL.into_iter().collect())
    }

    pub fn only<I: IntoIterator<Item = RuleKind>>(rules: I) -> Self {
        Self(rules.into_iter().collect())
    }

    pub fn without(mut self, rule: RuleKind) -> Self {
        self.0.remove(&rule);
        self
    }

    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        self.0.contains(&rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.0.iter().copied()
    }
}

/// Solve limits handed to the solver adapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolveSettings {
    /// Maximum seconds to spend solving.
    #[serde(default)]
    pub time_limit_seconds: Option<u64>,

    /// Worker threads for batch solving.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum seconds without an improved incumbent.
    #[serde(default)]
    pub unimproved_seconds: Option<u64>,

    /// Log solver progress events.
    #[serde(default)]
    pub log_progress: bool,
}

fn default_workers() -> usize {
    1
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            time_limit_seconds: None,
            workers: default_workers(),
            unimproved_seconds: None,
            log_progress: false,
        }
    }
}

impl SolveSettings {
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.time_limit_seconds = Some(seconds);
        self
    }

    pub fn with_unimproved_seconds(mut self, seconds: u64) -> Self {
        self.unimproved_seconds = Some(seconds);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_seconds
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests;
