//! Simplification rules for powers.

use calc_parser::ast::Constant;
use crate::primitive::exact_root;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer, Rational};

/// Numeric powers with larger exponents are left alone.
const MAX_EXPONENT: u32 = 1024;

/// Perfect powers are searched for with factors up to this value.
const MAX_ROOT_FACTOR: u32 = 10_000;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::integer(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::integer(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, for positive numbers `a`
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.as_number().is_some_and(|n| *n > 0) {
            Some(SymExpr::integer(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Computes `base^exp` exactly, or rewrites it into a simpler form with a smaller exponent.
///
/// Returns [`None`] if the power is already in its simplest form, or is not a real number.
fn exact_power(base: &Rational, exp: &Rational) -> Option<SymExpr> {
    let p = exp.numer().to_i32()?;
    let q = exp.denom().to_u32()?;
    if p.unsigned_abs() > MAX_EXPONENT || q > MAX_EXPONENT || *base == 0 {
        return None;
    }

    if q == 1 {
        return Some(SymExpr::number(base.clone().pow(p)));
    }

    // perfect roots: `4^(3/2) = 8`, `(-8)^(1/3) = -2`
    if let (Some(numer), Some(denom)) = (exact_root(base.numer(), q), exact_root(base.denom(), q)) {
        return Some(SymExpr::number(Rational::from((numer, denom)).pow(p)));
    }
    if *base < 0 {
        return None;
    }

    // split off the whole part of the exponent: `2^(3/2) = 2*2^(1/2)`
    let q_signed = q as i32;
    let whole = p.div_euclid(q_signed);
    if whole != 0 {
        let rem = p.rem_euclid(q_signed);
        return Some(
            SymExpr::number(base.clone().pow(whole))
                * SymExpr::pow(SymExpr::number(base.clone()), SymExpr::number(Rational::from((rem, q_signed))))
        );
    }

    // split fractions: `(2/3)^(1/2) = 2^(1/2)*3^(-1/2)`
    if *base.denom() != 1 {
        return Some(
            SymExpr::pow(SymExpr::number(Rational::from(base.numer())), SymExpr::number(exp.clone()))
                * SymExpr::pow(SymExpr::number(Rational::from(base.denom())), SymExpr::number(-exp.clone()))
        );
    }

    // pull perfect powers out of roots: `12^(1/2) = 2*3^(1/2)`
    if p == 1 {
        let n = base.numer();
        let mut largest = None;
        for k in 2..=MAX_ROOT_FACTOR {
            let power = Integer::from(k).pow(q);
            if power > *n {
                break;
            }
            if n.is_divisible(&power) {
                largest = Some((k, power));
            }
        }

        if let Some((k, power)) = largest {
            let rest = Integer::from(n / &power);
            return Some(
                SymExpr::integer(i64::from(k))
                    * SymExpr::pow(SymExpr::number(Rational::from(rest)), SymExpr::number(exp.clone()))
            );
        }
    }

    None
}

/// Evaluates powers of numbers exactly where possible.
///
/// `2^3 = 8`
/// `4^(1/2) = 2`
/// `8^(1/2) = 2*2^(1/2)`
pub fn rational_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        exact_power(lhs.as_number()?, rhs.as_number()?)
    })?;

    step_collector.push(Step::RationalPower);
    Some(opt)
}

/// Returns true if the expression is known to be a positive constant.
fn is_positive_constant(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => *n > 0,
        SymExpr::Primary(Primary::Constant(c)) => matches!(c, Constant::Pi | Constant::E),
        _ => false,
    }
}

/// `(a^b)^c = a^(b*c)`, for integers `c` or positive constants `a`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, exp) = lhs {
            if rhs.is_integer() || is_positive_constant(base) {
                return Some(SymExpr::pow(*base.clone(), *exp.clone() * rhs.clone()));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `(a*b)^c = a^c*b^c`, for integers `c`
///
/// Positive numeric factors are pulled out for any exponent: `(4x)^(1/2) = 2*x^(1/2)`.
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Mul(factors) = lhs else {
            return None;
        };

        if rhs.is_integer() {
            let new_factors = factors.iter()
                .map(|factor| SymExpr::pow(factor.clone(), rhs.clone()))
                .collect::<Vec<_>>();
            return Some(SymExpr::Mul(new_factors));
        }

        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.as_number().is_some_and(|n| *n > 0));
        if positive.is_empty() || rest.is_empty() {
            return None;
        }
        Some(
            SymExpr::pow(SymExpr::Mul(positive).downgrade(), rhs.clone())
                * SymExpr::pow(SymExpr::Mul(rest).downgrade(), rhs.clone())
        )
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// `e^log(a) = a`
/// `e^(b*log(a)) = a^b`
pub fn exp_log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !lhs.is_constant(Constant::E) {
            return None;
        }

        if let Some([arg]) = rhs.as_call("log") {
            return Some(arg.clone());
        }

        let SymExpr::Mul(factors) = rhs else {
            return None;
        };
        let idx = factors.iter().position(|factor| matches!(factor.as_call("log"), Some([_])))?;
        let mut rest = factors.clone();
        let log = rest.remove(idx);
        let [arg] = log.as_call("log")? else {
            return None;
        };
        Some(SymExpr::pow(arg.clone(), SymExpr::Mul(rest).downgrade()))
    })?;

    step_collector.push(Step::ExpLog);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| rational_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| exp_log(expr, step_collector))
}
