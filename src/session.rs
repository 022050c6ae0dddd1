use log::{debug, info};

use crate::{
    error::ValidationError,
    evaluator::evaluate,
    history::{History, HistoryEntry},
    token::Op,
    validator::validate,
    ANSWER_PLACEHOLDER, ANS_CUTOFF, MAX_EQUATION_LEN,
};

/// Something that can be typed into the input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    Digit(char),
    Decimal,
    Operator(Op),
    Answer,
}

impl Key {
    /// Maps a single typed character to a key. `ANS` has no single character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Key::Digit(c)),
            '.' => Some(Key::Decimal),
            c => Op::from_char(c).map(Key::Operator),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Digit(c) => write!(f, "{}", c),
            Key::Decimal => write!(f, "."),
            Key::Operator(op) => write!(f, "{}", op),
            Key::Answer => write!(f, "{}", ANSWER_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Button {
    Clear,
    Equals,
    Backspace,
    Key(Key),
}

/// What a button press produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Edited,
    LineCleared,
    HistoryCleared,
    Computed(HistoryEntry),
    /// `=` on an empty line.
    Nothing,
}

/// The calculator as a user drives it: an input line plus the history rows.
///
/// Only characters the validator accepts ever reach the line, an operator
/// pressed first is prefixed with `ANS`, and the line never grows past
/// [`MAX_EQUATION_LEN`].
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    input: String,
    history: History,
}

impl Calculator {
    pub fn new(history_rows: usize) -> Self {
        Self {
            input: String::new(),
            history: History::new(history_rows),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn press(&mut self, button: Button) -> Result<Outcome, ValidationError> {
        debug!("pressed {:?}", button);
        match button {
            Button::Clear => Ok(self.clear()),
            Button::Equals => self.operate(),
            Button::Backspace => {
                self.backspace();
                Ok(Outcome::Edited)
            }
            Button::Key(key) => {
                self.append(key);
                Ok(Outcome::Edited)
            }
        }
    }

    /// Types a key, silently ignoring it when the line has no room.
    pub fn append(&mut self, key: Key) {
        if self.input.len() >= MAX_EQUATION_LEN {
            return;
        }
        match key {
            Key::Operator(_) if self.input.is_empty() => self.append(Key::Answer),
            Key::Answer if self.input.len() >= ANS_CUTOFF => return,
            _ => {}
        }
        self.input.push_str(&key.to_string());
    }

    /// Removes the last key, taking `ANS` off as a whole.
    pub fn backspace(&mut self) {
        if self.input.ends_with(ANSWER_PLACEHOLDER) {
            self.input.truncate(self.input.len() - ANSWER_PLACEHOLDER.len());
        } else {
            self.input.pop();
        }
    }

    /// Clears the line, or the history when the line is already empty.
    pub fn clear(&mut self) -> Outcome {
        if self.input.is_empty() {
            self.history.clear();
            Outcome::HistoryCleared
        } else {
            self.input.clear();
            Outcome::LineCleared
        }
    }

    /// Evaluates the line and records it.
    ///
    /// The line is cleared afterwards whether or not evaluation succeeded;
    /// on failure the history is left untouched.
    pub fn operate(&mut self) -> Result<Outcome, ValidationError> {
        let equation = std::mem::take(&mut self.input);

        let result = validate(&equation)
            .and_then(|tokens| evaluate(&tokens, self.history.last_answer()))
            .inspect_err(|err| {
                debug!("rejected {:?} at byte {}: {}", equation, err.offset(), err)
            })?;

        match result {
            Some(result) => {
                info!("{} = {}", equation, result);
                let entry = HistoryEntry { equation, result };
                self.history.push(entry.clone());
                Ok(Outcome::Computed(entry))
            }
            None => Ok(Outcome::Nothing),
        }
    }
}
