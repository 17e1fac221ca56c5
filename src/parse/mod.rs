//! Best-effort shell command decomposition: operator splitting with a
//! limited quoting model, substitution extraction, and word tokenization.

mod shell;
mod tokenize;
mod types;

pub use shell::{extract_substitutions, split, split_operators};
pub use tokenize::{is_assignment, leading_token, tokenize};
pub use types::{Operator, SplitCommand};
