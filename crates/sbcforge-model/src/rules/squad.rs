//! Squad shape: size, identity uniqueness and formation occupancy.

use sbcforge_config::FormationMode;
use sbcforge_core::Attribute;

use super::RuleContext;
use crate::model::{LinearExpr, Model};

pub(super) fn squad_size(ctx: &RuleContext<'_>, model: &mut Model) {
    let all = LinearExpr::sum(ctx.vars.select.iter().copied());
    model.add_eq(all, ctx.squad_size());
}

/// At most one row per identity; singleton identities need no constraint.
pub(super) fn unique_names(ctx: &RuleContext<'_>, model: &mut Model) {
    for (_, _, rows) in ctx.index.attribute(Attribute::Name).iter() {
        if rows.len() > 1 {
            model.add_le(ctx.selected(rows), 1);
        }
    }
}

pub(super) fn formation(ctx: &RuleContext<'_>, model: &mut Model) {
    let roles = ctx.index.attribute(Attribute::Role);
    let vars = ctx.vars;

    match ctx.rules.formation_mode {
        FormationMode::Strict => {
            for (label, count) in ctx.formation.label_counts() {
                model.add_eq(ctx.selected(roles.members_of_value(label)), count as i64);
            }
            for (i, candidate) in ctx.roster.iter().enumerate() {
                if !ctx.formation.contains(&candidate.role) {
                    model.add_eq(LinearExpr::var(vars.select[i]), 0);
                }
            }
            position_follows_selection(ctx, model);
        }
        FormationMode::Flexible => {
            for (label, count) in ctx.formation.label_counts() {
                let positioned = LinearExpr::sum(
                    roles
                        .members_of_value(label)
                        .iter()
                        .map(|&i| vars.on_pitch[i]),
                );
                model.add_le(positioned, count as i64);
            }
            for (i, candidate) in ctx.roster.iter().enumerate() {
                if !ctx.formation.contains(&candidate.role) {
                    model.add_eq(LinearExpr::var(vars.position[i]), 0);
                }
            }
        }
    }
}

/// Every selected row is positioned and no other row is.
pub(crate) fn position_follows_selection(ctx: &RuleContext<'_>, model: &mut Model) {
    let vars = ctx.vars;
    for (&select, &position) in vars.select.iter().zip(&vars.position) {
        model.add_eq(LinearExpr::var(select).minus(&LinearExpr::var(position)), 0);
    }
}
