//! Reads a squad back out of a solved model.

use sbcforge_core::Roster;
use sbcforge_model::rating::squad_rating;
use sbcforge_model::CompiledModel;

use crate::status::SolveStatus;

/// One selected candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    /// Row in the compiled roster.
    pub index: usize,
    pub name: String,
    pub role: String,
    pub chemistry: u8,
    /// Whether the candidate counts towards the formation.
    pub positioned: bool,
}

/// The selected squad with its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub picks: Vec<Pick>,
    pub total_chemistry: u32,
    pub total_cost: i64,
    /// Squad rating by the published formula.
    pub squad_rating: f64,
}

impl Assignment {
    /// Selected roster rows in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.picks.iter().map(|pick| pick.index).collect()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

/// Builds the [`Assignment`] for a solved model.
///
/// Returns `None` unless the status carries a solution and `values` covers
/// every model variable.
pub fn extract(
    roster: &Roster,
    compiled: &CompiledModel,
    status: SolveStatus,
    values: &[i64],
) -> Option<Assignment> {
    if !status.has_solution() || values.len() != compiled.model.vars().len() {
        return None;
    }
    let vars = &compiled.variables;

    let mut picks = Vec::new();
    let mut ratings = Vec::new();
    let mut total_cost = 0;
    for (index, candidate) in roster.iter().enumerate().take(vars.candidate_count()) {
        if values[vars.select[index].index()] != 1 {
            continue;
        }
        let chemistry = values[vars.chem[index].index()].clamp(0, 3) as u8;
        picks.push(Pick {
            index,
            name: candidate.name.clone(),
            role: candidate.role.clone(),
            chemistry,
            positioned: values[vars.position[index].index()] == 1,
        });
        ratings.push(candidate.rating);
        total_cost += candidate.cost;
    }

    Some(Assignment {
        total_chemistry: picks.iter().map(|p| u32::from(p.chemistry)).sum(),
        total_cost,
        squad_rating: squad_rating(&ratings),
        picks,
    })
}
