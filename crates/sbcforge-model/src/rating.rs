//! Squad rating formulas.

use sbcforge_config::SquadRatingFormula;

/// Squad rating by the published formula: the sum of ratings plus every
/// rating's excess over the average, divided by the squad size.
///
/// ```
/// use sbcforge_model::rating::squad_rating;
///
/// assert_eq!(squad_rating(&[80, 80, 80]), 80.0);
/// // average 80, excess 10 from the 90
/// assert_eq!(squad_rating(&[70, 80, 90]), 250.0 / 3.0);
/// ```
pub fn squad_rating(ratings: &[u32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let n = ratings.len() as f64;
    let total: f64 = ratings.iter().map(|&r| f64::from(r)).sum();
    let average = total / n;
    let excess: f64 = ratings
        .iter()
        .map(|&r| (f64::from(r) - average).max(0.0))
        .sum();
    (total + excess) / n
}

pub fn average_rating(ratings: &[u32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64
}

/// Exact integer check of a squad rating target, as compiled into models.
pub fn meets_target(ratings: &[u32], target: u32, formula: SquadRatingFormula) -> bool {
    let n = ratings.len() as i64;
    let total: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    let target = i64::from(target);
    match formula {
        SquadRatingFormula::Average => total >= target * n,
        SquadRatingFormula::Weighted => {
            let excess: i64 = ratings
                .iter()
                .map(|&r| (n * i64::from(r) - total).max(0))
                .sum();
            n * total + excess >= target * n * n
        }
    }
}
