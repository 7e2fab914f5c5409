//! Rules keyed by card identity: fixed, removed and duplicate cards.

use sbcforge_config::DuplicatePriority;
use sbcforge_core::Attribute;
use tracing::warn;

use super::RuleContext;
use crate::compiler::CompileReport;
use crate::model::{LinearExpr, Model};

/// Every fixed identity is in the squad exactly once.
pub(super) fn fixed(ctx: &RuleContext<'_>, model: &mut Model, report: &mut CompileReport) {
    let names = ctx.index.attribute(Attribute::Name);
    for name in &ctx.rules.fixed {
        let rows = names.members_of_value(name);
        if rows.is_empty() {
            warn!(name = %name, "fixed candidate not in roster");
            report.missing_fixed.push(name.clone());
            continue;
        }
        model.add_eq(ctx.selected(rows), 1);
    }
}

/// No removed identity is in the squad.
pub(super) fn removed(ctx: &RuleContext<'_>, model: &mut Model, report: &mut CompileReport) {
    let names = ctx.index.attribute(Attribute::Name);
    for name in &ctx.rules.removed {
        let rows = names.members_of_value(name);
        if rows.is_empty() {
            warn!(name = %name, "removed candidate not in roster");
            report.missing_removed.push(name.clone());
            continue;
        }
        model.add_eq(ctx.selected(rows), 0);
    }
}

/// Pushes spare duplicate cards into the squad.
pub(super) fn duplicate_priority(ctx: &RuleContext<'_>, model: &mut Model) {
    let priority = ctx.rules.duplicate_priority;
    if priority == DuplicatePriority::None {
        return;
    }

    let duplicates: Vec<Vec<usize>> = ctx
        .index
        .attribute(Attribute::Name)
        .iter()
        .map(|(_, _, rows)| {
            rows.iter()
                .copied()
                .filter(|&i| ctx.roster.candidates()[i].duplicate)
                .collect::<Vec<_>>()
        })
        .filter(|rows| !rows.is_empty())
        .collect();
    if duplicates.is_empty() {
        return;
    }

    let required = match priority {
        DuplicatePriority::All => {
            for rows in &duplicates {
                model.add_eq(ctx.selected(rows), 1);
            }
            return;
        }
        DuplicatePriority::AtLeastHalf => duplicates.len().div_ceil(2),
        DuplicatePriority::AtLeastOne => 1,
        DuplicatePriority::None => return,
    };

    let mut picked = LinearExpr::new();
    for (d, rows) in duplicates.iter().enumerate() {
        let flag = model.new_bool(format!("duplicate_picked{d}"));
        model.add_ge_if(ctx.selected(rows), 1, &[flag.is_true()]);
        picked.add_term(flag, 1);
    }
    model.add_ge(picked, required as i64);
}
