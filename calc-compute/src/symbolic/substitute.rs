//! Substitution of symbols and subexpressions.

use crate::symbolic::expr::{Primary, SymExpr};

/// Replaces every occurrence of the given symbol with the given value. No simplification is done.
pub fn substitute(expr: &SymExpr, symbol: &str, value: &SymExpr) -> SymExpr {
    replace(expr, &SymExpr::symbol(symbol), value)
}

/// Replaces every subexpression that is strictly equal to `target` with `replacement`. No
/// simplification is done, but sums and products are flattened.
pub fn replace(expr: &SymExpr, target: &SymExpr, replacement: &SymExpr) -> SymExpr {
    if expr == target {
        return replacement.clone();
    }

    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| replace(arg, target, replacement))
                .collect();
            SymExpr::call(name.clone(), args)
        },
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::new());
            for term in terms {
                sum += replace(term, target, replacement);
            }
            sum.downgrade()
        },
        SymExpr::Mul(factors) => {
            let mut product = SymExpr::Mul(Vec::new());
            for factor in factors {
                product *= replace(factor, target, replacement);
            }
            product.downgrade()
        },
        SymExpr::Exp(base, exp) => SymExpr::pow(
            replace(base, target, replacement),
            replace(exp, target, replacement),
        ),
    }
}

#[cfg(test)]
mod tests {
    use calc_parser::parse_plain;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        SymExpr::try_from(parse_plain(input).unwrap()).unwrap()
    }

    #[test]
    fn substitute_symbol() {
        let expr = parse("x**2 + sin(x) + y");
        assert_eq!(substitute(&expr, "x", &parse("t + 1")), parse("(t + 1)**2 + sin(t + 1) + y"));
    }

    #[test]
    fn replace_subexpression() {
        let expr = parse("cos(x**2)*x");
        assert_eq!(replace(&expr, &parse("x**2"), &SymExpr::symbol("u")), parse("cos(u)*x"));
    }

    #[test]
    fn substitution_flattens() {
        let expr = parse("x + y");
        assert_eq!(substitute(&expr, "x", &parse("a + b")), parse("a + b + y"));
    }
}
