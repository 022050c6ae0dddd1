pub mod token;
pub mod error;
pub mod validator;
pub mod evaluator;
pub mod history;
pub mod session;

pub use error::{ErrorKind, ValidationError};
pub use evaluator::{evaluate, Evaluator};
pub use history::{History, HistoryEntry};
pub use session::{Button, Calculator, Key, Outcome};
pub use token::*;
pub use validator::validate;

/// Longest equation the input line holds, in characters.
pub const MAX_EQUATION_LEN: usize = 25;
/// `ANS` is refused once the line is this long.
pub const ANS_CUTOFF: usize = 22;
pub const ANSWER_PLACEHOLDER: &str = "ANS";
pub const DEFAULT_HISTORY_ROWS: usize = 5;
pub const DECIMAL_PLACES: i32 = 3;
