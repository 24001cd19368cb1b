//! Exact values of the trigonometric functions at multiples of 30 and 45 degrees.

use crate::symbolic::expr::SymExpr;
use rug::Rational;

/// `sqrt(n)/d`
fn root_over(n: i64, d: i64) -> SymExpr {
    SymExpr::number(Rational::from((1, d))) * SymExpr::integer(n).sqrt()
}

/// The sine of an angle between 0 and 90 degrees, inclusive.
fn sin_first_quadrant(degrees: i64) -> Option<SymExpr> {
    match degrees {
        0 => Some(SymExpr::integer(0)),
        30 => Some(SymExpr::number(Rational::from((1, 2)))),
        45 => Some(root_over(2, 2)),
        60 => Some(root_over(3, 2)),
        90 => Some(SymExpr::integer(1)),
        _ => None,
    }
}

/// The sine of an angle in degrees.
pub fn sin(degrees: i64) -> Option<SymExpr> {
    let degrees = degrees.rem_euclid(360);
    if degrees >= 180 {
        sin(degrees - 180).map(|value| -value)
    } else if degrees > 90 {
        sin_first_quadrant(180 - degrees)
    } else {
        sin_first_quadrant(degrees)
    }
}

/// The cosine of an angle in degrees.
pub fn cos(degrees: i64) -> Option<SymExpr> {
    sin(degrees + 90)
}

/// The tangent of an angle in degrees. The tangent of 90 degrees is undefined.
pub fn tan(degrees: i64) -> Option<SymExpr> {
    match degrees.rem_euclid(180) {
        0 => Some(SymExpr::integer(0)),
        30 => Some(root_over(3, 3)),
        45 => Some(SymExpr::integer(1)),
        60 => Some(SymExpr::integer(3).sqrt()),
        120 => Some(-SymExpr::integer(3).sqrt()),
        135 => Some(SymExpr::integer(-1)),
        150 => Some(-root_over(3, 3)),
        _ => None,
    }
}
