use super::{Primary, SymExpr};

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first), including the arguments of function calls.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a SymExpr>,
    last_visited: Option<&'a SymExpr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a SymExpr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a SymExpr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression matches the last visited expression.
    fn is_last_visited(&self, expr: &'a SymExpr) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, expr),
            None => false,
        }
    }

    /// Visits the current expression if all of its children were visited, otherwise schedules
    /// the children.
    fn descend(&mut self, children: &'a [SymExpr]) -> Option<Option<&'a SymExpr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                for child in children.iter().rev() {
                    self.stack.push(child);
                }
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            let visited = match expr {
                SymExpr::Primary(Primary::Call(_, args)) => self.descend(args),
                SymExpr::Primary(_) => Some(self.visit()),
                SymExpr::Add(terms) => self.descend(terms),
                SymExpr::Mul(factors) => self.descend(factors),
                SymExpr::Exp(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        Some(self.visit())
                    } else {
                        self.stack.push(rhs);
                        self.stack.push(lhs);
                        None
                    }
                },
            };

            if let Some(visited) = visited {
                return visited;
            }
        }
    }
}
