//! Integration by parts, `∫u dv = u v - ∫v du`.

use crate::symbolic::{
    derivative::derivative,
    expr::SymExpr,
    polynomial::Polynomial,
    simplify::simplify,
};
use super::{integrate, linear};

/// Functions whose repeated antiderivatives stay the same size, so that they make a good `dv`.
const CYCLIC_FUNCTIONS: [&str; 4] = ["sin", "cos", "sinh", "cosh"];

/// How the non-polynomial factor of the integrand is treated.
enum Part {
    /// The factor is integrated and the polynomial is differentiated, reducing its degree.
    Dv,

    /// The factor is differentiated into a rational function, and the polynomial is integrated.
    U,
}

/// Decides how to integrate a product of a polynomial with the given factor.
fn classify(factor: &SymExpr, var: &str) -> Option<Part> {
    match factor {
        SymExpr::Exp(base, exp) if !base.contains_symbol(var) => {
            linear(exp, var).map(|_| Part::Dv)
        },
        factor => {
            if let Some([arg]) = factor.as_call("log") {
                return linear(arg, var).map(|_| Part::U);
            }
            let arg = CYCLIC_FUNCTIONS.iter()
                .find_map(|name| match factor.as_call(name) {
                    Some([arg]) => Some(arg),
                    _ => None,
                })?;
            linear(arg, var).map(|_| Part::Dv)
        },
    }
}

/// Integrates the product of a polynomial and a single exponential, trigonometric or logarithmic
/// factor by parts.
pub(super) fn by_parts(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = f else {
        return None;
    };

    let (polynomial, other): (Vec<_>, Vec<_>) = factors.iter()
        .cloned()
        .partition(|factor| Polynomial::from_expr(factor, var).is_some());
    let [other] = other.as_slice() else {
        return None;
    };
    if polynomial.is_empty() {
        return None;
    }
    let polynomial = SymExpr::Mul(polynomial).downgrade();

    let (u, dv) = match classify(other, var)? {
        Part::Dv => (polynomial, other.clone()),
        Part::U => (other.clone(), polynomial),
    };

    log::trace!("integrating {} by parts with u = {}", f, u);
    let v = simplify(&integrate(&dv, var, depth + 1)?);
    let du = derivative(&u, var).ok()?;
    let rest = integrate(&simplify(&(v.clone() * du)), var, depth + 1)?;
    Some(u * v - rest)
}
