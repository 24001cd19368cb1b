pub mod binary;
pub mod calculus;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use calculus::{Bounds, Derivative, Integral, Sum};
pub use call::Call;
pub use expr::Expr;
pub use literal::{Constant, LitConst, LitNum, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;
