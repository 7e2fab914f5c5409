use sbcforge_config::SquadRatingFormula;

use crate::rating::{average_rating, meets_target, squad_rating};

#[test]
fn test_weighted_rating_credits_excess() {
    let ratings = [70, 78, 78];
    assert!((average_rating(&ratings) - 75.333).abs() < 0.01);
    assert!((squad_rating(&ratings) - 77.111).abs() < 0.01);
}

#[test]
fn test_meets_target_matches_float_formula() {
    let squads: [&[u32]; 4] = [
        &[70, 78, 78],
        &[72, 76, 78],
        &[80; 11],
        &[84, 83, 82, 81, 80, 80, 79, 79, 79, 78, 77],
    ];
    for ratings in squads {
        for target in 70..=85 {
            assert_eq!(
                meets_target(ratings, target, SquadRatingFormula::Weighted),
                squad_rating(ratings) >= f64::from(target) - 1e-9,
                "{ratings:?} {target}"
            );
            assert_eq!(
                meets_target(ratings, target, SquadRatingFormula::Average),
                average_rating(ratings) >= f64::from(target) - 1e-9,
                "{ratings:?} {target}"
            );
        }
    }
}

#[test]
fn test_empty_squad() {
    assert_eq!(squad_rating(&[]), 0.0);
    assert!(meets_target(&[], 80, SquadRatingFormula::Weighted));
}
