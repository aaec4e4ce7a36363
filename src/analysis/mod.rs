mod closure;
mod selector;

pub use closure::{ClosureEngine, UndefinedCall};
pub use selector::{Selector, Verdict};
