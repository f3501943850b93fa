//! Aspect-ratio labels for arrangement grids.
//!
//! An arrangement is `cols` feathers wide and `rows` feathers tall, and each
//! grid row is twice as tall as a column is wide. The physical ratio is
//! therefore `cols / (rows * 2)`.
//!
//! The label is the best fraction `n:d` with `d` in `1..=10`. Denominators are
//! scanned in ascending order and only a strictly smaller error replaces the
//! current best, so the smallest denominator wins ties. When even the best fit
//! is off by `0.05` or more, the ratio is printed as a decimal `"r:1"`.
//!
//! ```
//! # use painting_gallery::aspect::aspect_ratio;
//! assert_eq!(aspect_ratio(4, 1).unwrap(), "2:1");
//! assert_eq!(aspect_ratio(5, 4).unwrap(), "5:8");
//! assert_eq!(aspect_ratio(7, 3).unwrap(), "7:6");
//! assert_eq!(aspect_ratio(21, 10).unwrap(), "1.05:1");
//! ```

use std::num::NonZeroU32;
use thiserror::Error;

/// Largest denominator tried by the fraction search.
pub const MAX_DENOMINATOR: u32 = 10;

/// A fraction is accepted only when its error is below this bound.
pub const FRACTION_TOLERANCE: f64 = 0.05;

/// Grid rows are this many column-widths tall.
const ROW_HEIGHT_FACTOR: f64 = 2.0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectError {
    #[error("grid must have at least one row")]
    ZeroRows,
    #[error("grid must have at least one column")]
    ZeroCols,
}

/// Best simple fraction found for a ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: u32,
    /// Absolute distance between the fraction and the ratio.
    pub error: f64,
}

/// Scan denominators `1..=MAX_DENOMINATOR` for the closest `n/d`.
pub fn best_fraction(ratio: f64) -> Fraction {
    let mut best = Fraction {
        numerator: 0,
        denominator: 1,
        error: f64::INFINITY,
    };
    for d in 1..=MAX_DENOMINATOR {
        let n = (ratio * f64::from(d)).round() as i64;
        let error = (ratio - n as f64 / f64::from(d)).abs();
        if error < best.error {
            best = Fraction {
                numerator: n,
                denominator: d,
                error,
            };
        }
    }
    best
}

/// Label for a grid shape known to be non-degenerate.
pub fn normalize(cols: NonZeroU32, rows: NonZeroU32) -> String {
    let ratio = f64::from(cols.get()) / (f64::from(rows.get()) * ROW_HEIGHT_FACTOR);
    let best = best_fraction(ratio);
    if best.error < FRACTION_TOLERANCE {
        format!("{}:{}", best.numerator, best.denominator)
    } else {
        format!("{ratio:.2}:1")
    }
}

/// Label for raw grid dimensions, rejecting empty grids.
pub fn aspect_ratio(cols: u32, rows: u32) -> Result<String, AspectError> {
    let rows = NonZeroU32::new(rows).ok_or(AspectError::ZeroRows)?;
    let cols = NonZeroU32::new(cols).ok_or(AspectError::ZeroCols)?;
    Ok(normalize(cols, rows))
}

/// Plain width / height ratio for spirit paintings.
pub fn physical_ratio(width: u32, height: u32) -> Option<f64> {
    (height != 0).then(|| f64::from(width) / f64::from(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_grid_is_two_to_one() {
        assert_eq!(aspect_ratio(4, 1).unwrap(), "2:1");
    }

    #[test]
    fn exact_eighths() {
        assert_eq!(aspect_ratio(5, 4).unwrap(), "5:8");
    }

    #[test]
    fn seven_by_three_is_exact_in_sixths() {
        assert_eq!(aspect_ratio(7, 3).unwrap(), "7:6");
    }

    #[test]
    fn halfway_between_tenths_falls_back_to_decimal() {
        // 1 / 20 sits exactly between 0/1 and 1/10.
        assert_eq!(aspect_ratio(1, 10).unwrap(), "0.05:1");
        // 21 / 20 sits between 1/1 and 11/10.
        assert_eq!(aspect_ratio(21, 10).unwrap(), "1.05:1");
    }

    #[test]
    fn near_fits_round_to_small_fraction() {
        // 13 / 22 = 0.5909 is within 0.01 of 3/5.
        assert_eq!(aspect_ratio(13, 11).unwrap(), "3:5");
    }

    #[test]
    fn square_grid_is_one_to_two() {
        assert_eq!(aspect_ratio(1, 1).unwrap(), "1:2");
        assert_eq!(aspect_ratio(3, 3).unwrap(), "1:2");
    }

    #[test]
    fn ties_keep_smallest_denominator() {
        // 2.0 is hit exactly at d = 1; later 4/2, 6/3 never replace it.
        let f = best_fraction(2.0);
        assert_eq!((f.numerator, f.denominator), (2, 1));
        assert_eq!(f.error, 0.0);
    }

    #[test]
    fn zero_rows_is_rejected() {
        assert_eq!(aspect_ratio(4, 0), Err(AspectError::ZeroRows));
    }

    #[test]
    fn zero_cols_is_rejected() {
        assert_eq!(aspect_ratio(0, 4), Err(AspectError::ZeroCols));
    }

    #[test]
    fn exact_fractions_within_bound_are_reproduced() {
        for rows in 1..=5u32 {
            for cols in 1..=20u32 {
                let ratio = f64::from(cols) / (f64::from(rows) * 2.0);
                let best = best_fraction(ratio);
                let label = aspect_ratio(cols, rows).unwrap();
                if best.error == 0.0 {
                    assert_eq!(label, format!("{}:{}", best.numerator, best.denominator));
                }
            }
        }
    }

    #[test]
    fn physical_ratio_guards_zero_height() {
        assert_eq!(physical_ratio(18, 24), Some(0.75));
        assert_eq!(physical_ratio(18, 0), None);
    }
}
