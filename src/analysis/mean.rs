//! Exact intensity means
//!
//! Intensities are integers, so a mean is kept as an exact `sum / count`
//! fraction and only rounded at the end. Rounding is half-to-even at one
//! decimal on the exact value, which keeps results free of binary
//! floating-point artifacts (5.65 rounds to 5.6, 5.75 to 5.8).

use std::cmp::Ordering;

/// Running sum and count of intensities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mean {
    sum: i64,
    count: i64,
}

impl Mean {
    pub fn add(&mut self, value: u8) {
        self.sum += value as i64;
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Mean rounded to one decimal; 0 when empty
    pub fn rounded(&self) -> f64 {
        round_tenths(self.sum, self.count)
    }

    /// `self - other` rounded to one decimal, treating an empty side as 0
    pub fn difference(&self, other: &Mean) -> f64 {
        let (numerator, denominator) = match (self.count, other.count) {
            (0, 0) => (0, 1),
            (0, _) => (-other.sum, other.count),
            (_, 0) => (self.sum, self.count),
            _ => (
                self.sum * other.count - other.sum * self.count,
                self.count * other.count,
            ),
        };
        round_tenths(numerator, denominator)
    }
}

/// Round `numerator / denominator` to one decimal, half to even
///
/// A zero denominator yields 0. Never returns negative zero.
pub fn round_tenths(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    let negative = (numerator < 0) != (denominator < 0);
    let scaled = numerator.unsigned_abs() as u128 * 10;
    let divisor = denominator.unsigned_abs() as u128;

    let mut tenths = scaled / divisor;
    let remainder = scaled % divisor;

    match (remainder * 2).cmp(&divisor) {
        Ordering::Greater => tenths += 1,
        Ordering::Equal if tenths % 2 == 1 => tenths += 1,
        _ => {}
    }

    if tenths == 0 {
        return 0.0;
    }

    let value = tenths as f64 / 10.0;
    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_of(values: &[u8]) -> Mean {
        let mut mean = Mean::default();
        for &v in values {
            mean.add(v);
        }
        mean
    }

    #[test]
    fn test_round_tenths_basic() {
        assert_eq!(round_tenths(17, 3), 5.7);
        assert_eq!(round_tenths(11, 2), 5.5);
        assert_eq!(round_tenths(6, 1), 6.0);
        assert_eq!(round_tenths(0, 5), 0.0);
        assert_eq!(round_tenths(3, 0), 0.0);
    }

    #[test]
    fn test_round_half_to_even() {
        // 5.65 -> 5.6, 5.75 -> 5.8, 0.25 -> 0.2, 0.35 -> 0.4
        assert_eq!(round_tenths(113, 20), 5.6);
        assert_eq!(round_tenths(115, 20), 5.8);
        assert_eq!(round_tenths(1, 4), 0.2);
        assert_eq!(round_tenths(7, 20), 0.4);
    }

    #[test]
    fn test_round_negative() {
        assert_eq!(round_tenths(-1, 2), -0.5);
        assert_eq!(round_tenths(-17, 3), -5.7);
        assert_eq!(round_tenths(1, -4), -0.2);
        assert_eq!(round_tenths(-1, 40), 0.0);
        assert!(round_tenths(-1, 40).is_sign_positive());
    }

    #[test]
    fn test_mean_rounded() {
        assert_eq!(mean_of(&[8, 6, 3]).rounded(), 5.7);
        assert_eq!(mean_of(&[]).rounded(), 0.0);
        assert_eq!(mean_of(&[10]).rounded(), 10.0);
    }

    #[test]
    fn test_difference_uses_unrounded_means() {
        // 31/6 - 41/8 = 1/24, while the rounded means differ by 0.1
        let a = mean_of(&[6, 5, 5, 5, 5, 5]);
        let b = mean_of(&[6, 5, 5, 5, 5, 5, 5, 5]);
        assert_eq!(a.rounded(), 5.2);
        assert_eq!(b.rounded(), 5.1);
        assert_eq!(a.difference(&b), 0.0);
    }

    #[test]
    fn test_difference_with_empty_sides() {
        let with_others = mean_of(&[6]);
        let alone = mean_of(&[8, 3]);
        let empty = Mean::default();

        assert_eq!(with_others.difference(&alone), 0.5);
        assert_eq!(alone.difference(&with_others), -0.5);
        assert_eq!(empty.difference(&alone), -5.5);
        assert_eq!(with_others.difference(&empty), 6.0);
        assert_eq!(empty.difference(&empty), 0.0);
    }
}
