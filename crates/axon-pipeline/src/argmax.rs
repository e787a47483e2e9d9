//! Argmax decision
//!
//! Pure scan over the 10 class scores. Tie-break is fixed: the lowest index
//! among equal maxima wins (first-seen, scanning 0→9).

use axon_models::CLASSES;
use axon_num::Score;

/// Index of the maximum score, lowest index winning ties.
pub fn argmax(scores: &[Score; CLASSES]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_maximum() {
        let mut scores = [0; CLASSES];
        scores[7] = 42;
        scores[3] = 41;
        assert_eq!(argmax(&scores), 7);
    }

    #[test]
    fn tie_break_is_lowest_index() {
        let mut scores = [3; CLASSES];
        scores[0] = 5;
        scores[1] = 5;
        assert_eq!(argmax(&scores), 0);

        let mut scores = [-1; CLASSES];
        scores[4] = 9;
        scores[8] = 9;
        assert_eq!(argmax(&scores), 4);
    }

    #[test]
    fn all_equal_yields_class_zero() {
        assert_eq!(argmax(&[-7; CLASSES]), 0);
    }

    #[test]
    fn negative_scores() {
        let scores = [-10, -2, -30, -2, -50, -60, -70, -80, -90, -100];
        assert_eq!(argmax(&scores), 1);
    }
}
