//! Quality, rarity and rating rules.

use sbcforge_config::SquadRatingFormula;

use super::RuleContext;
use crate::model::{LinearExpr, Model};

/// Quality and/or rarity minimums. A rarity may name a rarity class.
pub(super) fn tier_minimums(ctx: &RuleContext<'_>, model: &mut Model) {
    for minimum in &ctx.rules.tier_minimums {
        let rarities = minimum
            .rarity
            .as_deref()
            .map(|rarity| ctx.rules.rarity_values(rarity));
        let rows: Vec<usize> = ctx
            .roster
            .iter()
            .enumerate()
            .filter(|(_, c)| minimum.quality.as_ref().map_or(true, |q| *q == c.quality))
            .filter(|(_, c)| {
                rarities
                    .as_ref()
                    .map_or(true, |values| values.contains(&c.rarity.as_str()))
            })
            .map(|(i, _)| i)
            .collect();
        model.add_ge(ctx.selected(&rows), minimum.count as i64);
    }
}

/// "Min OVR of X: at least Y players".
pub(super) fn rating_minimums(ctx: &RuleContext<'_>, model: &mut Model) {
    for minimum in &ctx.rules.rating_minimums {
        let rows: Vec<usize> = ctx
            .roster
            .iter()
            .enumerate()
            .filter(|(_, c)| c.rating >= minimum.rating)
            .map(|(i, _)| i)
            .collect();
        model.add_ge(ctx.selected(&rows), minimum.count as i64);
    }
}

/// Squad rating minimum.
///
/// `Weighted` scales the published formula by N² to stay integral:
/// `N·S + Σ max(N·rating_i·select_i − S, 0) >= target·N²`.
pub(super) fn squad_rating(ctx: &RuleContext<'_>, model: &mut Model) {
    let Some(rule) = ctx.rules.squad_rating else {
        return;
    };
    let n = ctx.squad_size();
    let target = i64::from(rule.target);
    let total = LinearExpr::weighted(
        ctx.roster
            .iter()
            .enumerate()
            .map(|(i, c)| (ctx.select(i), i64::from(c.rating))),
    );

    match rule.formula {
        SquadRatingFormula::Average => model.add_ge(total, target * n),
        SquadRatingFormula::Weighted => {
            let mut scaled = LinearExpr::new();
            for &(var, coef) in total.terms() {
                scaled.add_term(var, coef * n);
            }
            let mut adjusted = scaled.clone();
            for (i, candidate) in ctx.roster.iter().enumerate() {
                let above = i64::from(candidate.rating) * n;
                let excess = model.new_int(format!("excess{i}"), 0, above);
                let lead = LinearExpr::term(ctx.select(i), above).minus(&total);
                model.add_max_equality(excess, vec![lead, LinearExpr::constant(0)]);
                adjusted.add_term(excess, 1);
            }
            model.add_ge(adjusted, target * n * n);
        }
    }
}
