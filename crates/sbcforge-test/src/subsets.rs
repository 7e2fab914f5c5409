//! Exhaustive subset enumeration.

use std::collections::HashMap;

use sbcforge_core::{Formation, Roster};

/// Iterates every `k`-subset of `0..n` in lexicographic order.
pub fn combinations(n: usize, k: usize) -> Combinations {
    Combinations {
        n,
        current: (k <= n).then(|| (0..k).collect()),
    }
}

pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let k = current.len();

        let mut next = current.clone();
        let pivot = (0..k).rev().find(|&i| next[i] < self.n - k + i);
        if let Some(i) = pivot {
            next[i] += 1;
            for j in i + 1..k {
                next[j] = next[j - 1] + 1;
            }
            self.current = Some(next);
        }
        Some(current)
    }
}

/// Whether `picks` fill every slot of `formation` exactly.
pub fn fills_formation(roster: &Roster, formation: &Formation, picks: &[usize]) -> bool {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &i in picks {
        *counts.entry(roster.candidates()[i].role.as_str()).or_default() += 1;
    }
    formation
        .label_counts()
        .into_iter()
        .all(|(label, count)| counts.remove(label).unwrap_or(0) == count)
        && counts.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinations_count() {
        assert_eq!(combinations(5, 2).count(), 10);
        assert_eq!(combinations(4, 4).collect::<Vec<_>>(), vec![vec![0, 1, 2, 3]]);
        assert_eq!(combinations(3, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(combinations(2, 3).count(), 0);
    }

    #[test]
    fn test_combinations_order() {
        let all: Vec<_> = combinations(4, 2).collect();
        assert_eq!(all[0], vec![0, 1]);
        assert_eq!(all[1], vec![0, 2]);
        assert_eq!(all[5], vec![2, 3]);
    }
}
