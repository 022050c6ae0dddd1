use log::{debug, trace};

use crate::{
    error::{ErrorKind, ValidationError},
    token::{Op, Token, TokenKind, Tokens},
    DECIMAL_PLACES,
};

/// Where the reduction stands between operands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// No operand has been finished yet.
    AccumulatingOperand,
    /// `solution` is waiting for the right-hand operand of `op`.
    AwaitingOperator { solution: f64, op: Op },
}

/// The operand being collected: raw characters, or a substituted `ANS`.
#[derive(Debug, Default)]
struct Operand {
    chars: String,
    answer: Option<f64>,
    start: usize,
    len: usize,
}

impl Operand {
    fn push(&mut self, token: &Token<'_>, c: char) {
        if self.len == 0 {
            self.start = token.offset;
        }
        self.chars.push(c);
        self.len = token.offset + token.slice.len() - self.start;
    }

    fn substitute(&mut self, token: &Token<'_>, value: f64) {
        self.start = token.offset;
        self.len = token.slice.len();
        self.answer = Some(value);
    }

    fn finish(&mut self, source: &str, at: &Token<'_>) -> Result<f64, ValidationError> {
        let value = match self.answer {
            Some(value) => Ok(value),
            None => self.chars.parse::<f64>().map_err(|_| {
                let (offset, len) = if self.len == 0 {
                    (at.offset, at.slice.len())
                } else {
                    (self.start, self.len)
                };
                ValidationError::new(ErrorKind::MalformedNumber, source, offset, len)
            }),
        };
        self.chars.clear();
        self.answer = None;
        value
    }
}

/// Reduces a validated equation strictly left to right, ignoring precedence.
///
/// `ANS` is replaced by `last_answer`, or `0` when there is none yet.
pub struct Evaluator {
    last_answer: f64,
}

impl Evaluator {
    pub fn new(last_answer: Option<f64>) -> Self {
        Self {
            last_answer: last_answer.unwrap_or(0.0),
        }
    }

    /// Returns `Ok(None)` for an empty equation.
    pub fn eval(&self, tokens: &Tokens<'_>) -> Result<Option<f64>, ValidationError> {
        let last = match tokens.iter().last() {
            Some(token) => *token,
            None => return Ok(None),
        };

        let source = tokens.source();
        let mut state = State::AccumulatingOperand;
        let mut operand = Operand::default();

        for token in tokens {
            match token.kind {
                TokenKind::Digit(c) => operand.push(token, c),
                TokenKind::Decimal => operand.push(token, '.'),
                TokenKind::AnswerRef => operand.substitute(token, self.last_answer),
                TokenKind::Operator(op) => {
                    let value = operand.finish(source, token)?;
                    let solution = fold(state, value, source, &operand)?;
                    state = State::AwaitingOperator { solution, op };
                    operand.len = 0;
                }
            }
        }

        let value = operand.finish(source, &last)?;
        let solution = fold(state, value, source, &operand)?;

        let rounded = round_to(solution, DECIMAL_PLACES);
        debug!("{} = {}", source, rounded);
        Ok(Some(rounded))
    }
}

pub fn evaluate(tokens: &Tokens<'_>, last_answer: Option<f64>) -> Result<Option<f64>, ValidationError> {
    Evaluator::new(last_answer).eval(tokens)
}

/// Combines the finished operand with whatever the state holds.
fn fold(state: State, value: f64, source: &str, operand: &Operand) -> Result<f64, ValidationError> {
    match state {
        State::AccumulatingOperand => Ok(value),
        State::AwaitingOperator { solution, op } => {
            trace!("{} {} {}", solution, op, value);
            compute(op, solution, value).ok_or_else(|| {
                ValidationError::new(ErrorKind::DivideByZero, source, operand.start, operand.len)
            })
        }
    }
}

/// Applies one operator. `None` means division by zero.
pub fn compute(op: Op, solution: f64, value: f64) -> Option<f64> {
    match op {
        Op::Plus => Some(add(solution, value)),
        Op::Minus => Some(minus(solution, value)),
        Op::Star => Some(mult(solution, value)),
        Op::Slash => div(solution, value),
        Op::Percent => Some(modulo(solution, value)),
    }
}

/// Rounds half away from zero. A result that rounds to zero is always `0`, never `-0`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// Basic arithmetic operations.
fn add(a: f64, b: f64) -> f64 {
    a + b
}

fn minus(a: f64, b: f64) -> f64 {
    a - b
}

fn mult(a: f64, b: f64) -> f64 {
    a * b
}

fn div(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    Some(a / b)
}

fn modulo(a: f64, b: f64) -> f64 {
    a % b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate;

    fn eval_input(input: &str, last_answer: Option<f64>) -> Result<Option<f64>, ErrorKind> {
        let tokens = validate(input).unwrap();
        evaluate(&tokens, last_answer).map_err(|err| err.kind())
    }

    #[test]
    fn test_single_number() {
        assert_eq!(Ok(Some(42.0)), eval_input("42", None));
        assert_eq!(Ok(Some(3.25)), eval_input("3.25", None));
        assert_eq!(Ok(Some(5.0)), eval_input("5.0", None));
    }

    #[test]
    fn test_add() {
        assert_eq!(Ok(Some(353.0)), eval_input("12+331+10", None));
    }

    #[test]
    fn test_minus() {
        assert_eq!(Ok(Some(20.0)), eval_input("50-20-10", None));
        assert_eq!(Ok(Some(-3.0)), eval_input("2-5", None));
    }

    #[test]
    fn test_mult() {
        assert_eq!(Ok(Some(24.0)), eval_input("2*3*4", None));
    }

    #[test]
    fn test_div() {
        assert_eq!(Ok(Some(10.0)), eval_input("100/2/5", None));
    }

    #[test]
    fn test_modulo() {
        assert_eq!(Ok(Some(1.0)), eval_input("10%3", None));
        assert_eq!(Ok(Some(0.5)), eval_input("5.5%1", None));
    }

    #[test]
    fn test_modulo_keeps_dividend_sign() {
        assert_eq!(Ok(Some(-2.0)), eval_input("ANS%3", Some(-8.0)));
    }

    #[test]
    fn test_operand_with_bare_decimal_point() {
        assert_eq!(Ok(Some(7.0)), eval_input("5.+2", None));
        assert_eq!(Ok(Some(5.2)), eval_input("5+.2", None));
    }

    #[test]
    fn test_no_negative_zero() {
        let result = eval_input("1-1.0001", None).unwrap().unwrap();
        assert_eq!(result.to_string(), "0");
        let result = eval_input("ANS*0", Some(-2.0)).unwrap().unwrap();
        assert_eq!(result.to_string(), "0");
    }

    #[test]
    fn test_left_to_right() {
        assert_eq!(Ok(Some(20.0)), eval_input("2+3*4", None));
        assert_eq!(Ok(Some(3.0)), eval_input("10-4/2", None));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(Err(ErrorKind::DivideByZero), eval_input("5/0", None));
        assert_eq!(Err(ErrorKind::DivideByZero), eval_input("1+2/0.0*3", None));
        assert_eq!(Err(ErrorKind::DivideByZero), eval_input("5/ANS", None));
    }

    #[test]
    fn test_divide_by_zero_points_at_divisor() {
        let tokens = validate("8/00").unwrap();
        let err = evaluate(&tokens, None).unwrap_err();
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_answer_substitution() {
        assert_eq!(Ok(Some(10.0)), eval_input("ANS+3", Some(7.0)));
        assert_eq!(Ok(Some(3.0)), eval_input("ANS+3", None));
        assert_eq!(Ok(Some(7.0)), eval_input("ANS", Some(7.0)));
    }

    #[test]
    fn test_answer_last() {
        assert_eq!(Ok(Some(3.5)), eval_input("2+ANS", Some(1.5)));
        assert_eq!(Ok(Some(9.0)), eval_input("ANS*ANS", Some(-3.0)));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Ok(Some(3.333)), eval_input("10/3", None));
        assert_eq!(Ok(Some(0.667)), eval_input("2/3", None));
        assert_eq!(Ok(Some(0.3)), eval_input("0.1+0.2", None));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
        assert_eq!(round_to(-1.23456, 3), -1.235);
        assert_eq!(round_to(7.0, 3), 7.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(Ok(None), eval_input("", Some(4.0)));
    }

    #[test]
    fn test_compute() {
        assert_eq!(compute(Op::Plus, 5.0, 3.0), Some(8.0));
        assert_eq!(compute(Op::Minus, 5.0, 3.0), Some(2.0));
        assert_eq!(compute(Op::Star, 5.0, 3.0), Some(15.0));
        assert_eq!(compute(Op::Slash, 6.0, 3.0), Some(2.0));
        assert_eq!(compute(Op::Slash, 6.0, 0.0), None);
        assert_eq!(compute(Op::Percent, 10.0, 3.0), Some(1.0));
    }
}
