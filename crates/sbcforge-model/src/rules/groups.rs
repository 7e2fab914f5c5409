//! Club, league and nation rules over selection counts.

use sbcforge_config::CountKind;
use sbcforge_core::GroupKind;
use tracing::warn;

use super::{reify_at_least, RuleContext};
use crate::compiler::CompileReport;
use crate::model::{LinearExpr, Model};

/// "At least K players from these clubs/leagues/nations".
pub(super) fn include(ctx: &RuleContext<'_>, model: &mut Model, report: &mut CompileReport) {
    for kind in GroupKind::ALL {
        let groups = ctx.index.group(kind);
        for rule in &ctx.rules.group(kind).include {
            let mut rows = Vec::new();
            for value in &rule.values {
                match groups.id_of(value) {
                    Some(id) => rows.extend_from_slice(groups.members(id)),
                    None => {
                        warn!(kind = %kind, value = %value, "include value not in roster");
                        report.unknown_values.push(format!("{kind}:{value}"));
                    }
                }
            }
            rows.sort_unstable();
            rows.dedup();
            model.add_ge(ctx.selected(&rows), rule.count as i64);
        }
    }
}

/// "Same club/league/nation count: max X".
pub(super) fn max_per_group(ctx: &RuleContext<'_>, model: &mut Model) {
    for kind in GroupKind::ALL {
        let Some(max) = ctx.rules.group(kind).max_per_group else {
            continue;
        };
        for (_, _, rows) in ctx.index.group(kind).iter() {
            if rows.len() > max {
                model.add_le(ctx.selected(rows), max as i64);
            }
        }
    }
}

/// "Same club/league/nation count: min X": some group reaches X players.
pub(super) fn min_per_group(ctx: &RuleContext<'_>, model: &mut Model) {
    for kind in GroupKind::ALL {
        let Some(min) = ctx.rules.group(kind).min_per_group else {
            continue;
        };
        let mut reached = LinearExpr::new();
        for (g, _, rows) in ctx.index.group(kind).iter() {
            if rows.len() < min {
                continue;
            }
            let flag = model.new_bool(format!("min_group_{kind}{g}"));
            reify_at_least(model, flag, ctx.selected(rows), min as i64);
            reached.add_term(flag, 1);
        }
        model.add_ge(reached, 1);
    }
}

/// "Clubs/leagues/nations: max, min or exactly M".
pub(super) fn unique_count(ctx: &RuleContext<'_>, model: &mut Model) {
    for kind in GroupKind::ALL {
        let Some(unique) = ctx.rules.group(kind).unique else {
            continue;
        };
        let mut used = LinearExpr::new();
        for (g, _, rows) in ctx.index.group(kind).iter() {
            let flag = model.new_bool(format!("used_{kind}{g}"));
            reify_at_least(model, flag, ctx.selected(rows), 1);
            used.add_term(flag, 1);
        }
        let m = unique.count as i64;
        match unique.kind {
            CountKind::Max => model.add_le(used, m),
            CountKind::Min => model.add_ge(used, m),
            CountKind::Exactly => model.add_eq(used, m),
        }
    }
}
