//! Simplification rules for logarithms.

use calc_parser::ast::Constant;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};

/// `log(1) = 0`
/// `log(e) = 1`
/// `log(e^a) = a`
pub fn log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| {
        let [arg] = args else {
            return None;
        };

        if arg.is_one() {
            Some(SymExpr::integer(0))
        } else if arg.is_constant(Constant::E) {
            Some(SymExpr::integer(1))
        } else if let SymExpr::Exp(base, exp) = arg {
            if base.is_constant(Constant::E) {
                Some(*exp.clone())
            } else {
                None
            }
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Log);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    log(expr, step_collector)
}
