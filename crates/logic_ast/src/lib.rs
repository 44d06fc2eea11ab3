pub mod error;
pub mod expression;
pub mod variables;
pub mod visitor;

pub use error::AstError;
pub use expression::Expr;
pub use variables::VariableSet;
pub use visitor::{VariableCollector, Visitor};
