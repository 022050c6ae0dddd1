use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Equation can not begin with operator!")]
    LeadingOperator,
    #[error("Equation can not begin with decimal!")]
    LeadingDecimal,
    #[error("Equation can not end with operator!")]
    TrailingOperator,
    #[error("Equation can not end with decimal!")]
    TrailingDecimal,
    #[error("Operator can not be followed by an operator!")]
    ConsecutiveOperators,
    #[error("Can not have multiple decimals in number!")]
    RepeatedDecimal,
    #[error("Decimal must be followed by number!")]
    DecimalAfterOperator,
    #[error("ANS must be followed by an operator!")]
    AnswerNotFollowedByOperator,
    #[error("Number must be followed by operator or decimal!")]
    MissingOperatorBeforeAnswer,
    #[error("Can not divide by 0!")]
    DivideByZero,
    #[error("Unexpected character in equation!")]
    UnexpectedCharacter,
    #[error("Equation can not be longer than 25 characters!")]
    EquationTooLong,
    #[error("Malformed number in equation!")]
    MalformedNumber,
}

/// A rejected equation, pointing at the characters that broke the rule.
#[derive(Diagnostic, Debug, Clone, Error)]
#[error("{kind}")]
pub struct ValidationError {
    kind: ErrorKind,
    #[source_code]
    src: String,
    #[label("here")]
    span: SourceSpan,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, source: &str, offset: usize, len: usize) -> Self {
        Self {
            kind,
            src: source.to_string(),
            span: (offset, len).into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_comes_from_kind() {
        let err = ValidationError::new(ErrorKind::DivideByZero, "5/0", 2, 1);
        assert_eq!(err.to_string(), "Can not divide by 0!");
        assert_eq!(err.kind(), ErrorKind::DivideByZero);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_too_long_message_names_limit() {
        assert_eq!(
            ErrorKind::EquationTooLong.to_string(),
            "Equation can not be longer than 25 characters!"
        );
    }
}
