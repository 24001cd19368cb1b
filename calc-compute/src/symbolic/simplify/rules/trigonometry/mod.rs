//! Simplification rules for trigonometric functions.

mod table;

use calc_parser::ast::Constant;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// Functions with `f(-x) = -f(x)`.
const ODD_FUNCTIONS: [&str; 6] = ["sin", "tan", "asin", "atan", "sinh", "tanh"];

/// Functions with `f(-x) = f(x)`.
const EVEN_FUNCTIONS: [&str; 2] = ["cos", "cosh"];

/// If the expression is a rational multiple of `pi` that is a whole number of degrees, returns
/// that number of degrees.
///
/// `pi/6` -> `30`
fn degrees(arg: &SymExpr) -> Option<i64> {
    let multiple = if arg.is_zero() {
        Rational::new()
    } else if arg.is_constant(Constant::Pi) {
        Rational::from(1)
    } else if let SymExpr::Mul(factors) = arg {
        match factors.as_slice() {
            [SymExpr::Primary(Primary::Number(n)), pi] | [pi, SymExpr::Primary(Primary::Number(n))]
                if pi.is_constant(Constant::Pi) => n.clone(),
            _ => return None,
        }
    } else {
        return None;
    };

    let degrees: Rational = multiple * 180;
    if *degrees.denom() != 1 {
        return None;
    }
    degrees.numer().to_i64()
}

/// If the expression has a negative numeric coefficient, returns the expression with the sign
/// of the coefficient flipped.
///
/// `-3x` -> `3x`
fn negated(expr: &SymExpr) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Number(n)) if *n < 0 => Some(SymExpr::number(-n.clone())),
        SymExpr::Mul(factors) => {
            let idx = factors.iter()
                .position(|factor| factor.as_number().is_some_and(|n| *n < 0))?;
            let mut new_factors = factors.clone();
            let flipped = -new_factors.remove(idx);
            if !flipped.is_one() {
                new_factors.insert(idx, flipped);
            }
            Some(SymExpr::Mul(new_factors).downgrade())
        },
        _ => None,
    }
}

/// `f(-x) = -f(x)` for odd functions
/// `f(-x) = f(x)` for even functions
pub fn odd_even(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let SymExpr::Primary(Primary::Call(name, args)) = expr else {
        return None;
    };
    let [arg] = args.as_slice() else {
        return None;
    };

    let opt = if ODD_FUNCTIONS.contains(&name.as_str()) {
        -SymExpr::call(name.clone(), vec![negated(arg)?])
    } else if EVEN_FUNCTIONS.contains(&name.as_str()) {
        SymExpr::call(name.clone(), vec![negated(arg)?])
    } else {
        return None;
    };

    step_collector.push(Step::OddEven);
    Some(opt)
}

/// `sin(x)`, for `x` a multiple of 30 or 45 degrees
pub fn sin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "sin", |args| table::sin(degrees(args.first()?)?))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Sin);
    Some(opt)
}

/// `cos(x)`, for `x` a multiple of 30 or 45 degrees
pub fn cos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "cos", |args| table::cos(degrees(args.first()?)?))?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// `tan(x)`, for `x` a multiple of 30 or 45 degrees
pub fn tan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "tan", |args| table::tan(degrees(args.first()?)?))?;

    step_collector.push(Step::Tan);
    Some(opt)
}

/// Applies all trigonometric rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    odd_even(expr, step_collector)
        .or_else(|| sin(expr, step_collector))
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
}
