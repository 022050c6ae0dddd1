use log::{debug, trace};

use crate::{
    error::{ErrorKind, ValidationError},
    token::{Op, Token, TokenKind, Tokens},
    ANSWER_PLACEHOLDER, MAX_EQUATION_LEN,
};

/// Splits an equation into tokens, one character at a time except for `ANS`.
#[derive(Debug)]
struct Scanner<'a> {
    source: &'a str,
    rest: &'a str,
    byte: usize,
    peeked: Option<Result<Token<'a>, ValidationError>>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            source: input,
            rest: input,
            byte: 0,
            peeked: None,
        }
    }

    fn peek(&mut self) -> Option<&Result<Token<'a>, ValidationError>> {
        if self.peeked.is_some() {
            return self.peeked.as_ref();
        }

        self.peeked = self.next();
        self.peeked.as_ref()
    }

    /// Kind of the upcoming token: `None` at the end of input,
    /// `Some(None)` when the upcoming character is not a valid token.
    fn peek_kind(&mut self) -> Option<Option<TokenKind>> {
        self.peek().map(|next| next.as_ref().ok().map(|token| token.kind))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, ValidationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(next) = self.peeked.take() {
            return Some(next);
        }

        let mut chars = self.rest.chars();
        let c = chars.next()?;
        let offset = self.byte;

        if self.rest.starts_with(ANSWER_PLACEHOLDER) {
            let slice = &self.rest[..ANSWER_PLACEHOLDER.len()];
            self.rest = &self.rest[ANSWER_PLACEHOLDER.len()..];
            self.byte += ANSWER_PLACEHOLDER.len();
            return Some(Ok(Token {
                slice,
                offset,
                kind: TokenKind::AnswerRef,
            }));
        }

        let slice = &self.rest[..c.len_utf8()];
        self.rest = chars.as_str();
        self.byte += c.len_utf8();

        let kind = match c {
            '0'..='9' => TokenKind::Digit(c),
            '.' => TokenKind::Decimal,
            c => match Op::from_char(c) {
                Some(op) => TokenKind::Operator(op),
                None => {
                    return Some(Err(ValidationError::new(
                        ErrorKind::UnexpectedCharacter,
                        self.source,
                        offset,
                        c.len_utf8(),
                    )))
                }
            },
        };

        Some(Ok(Token { slice, offset, kind }))
    }
}

/// Checks an equation against the calculator grammar and returns its tokens.
///
/// The scan stops at the first broken rule. For each token the rules are
/// tried in a fixed order: leading operator/decimal, trailing
/// operator/decimal, operator followed by an operator, repeated decimal,
/// decimal not followed by a number, `ANS` not followed by an operator,
/// number running into `ANS`.
///
/// An empty equation is valid and yields no tokens.
pub fn validate(raw: &str) -> Result<Tokens<'_>, ValidationError> {
    if let Some((cutoff, _)) = raw.char_indices().nth(MAX_EQUATION_LEN) {
        return Err(ValidationError::new(
            ErrorKind::EquationTooLong,
            raw,
            cutoff,
            raw.len() - cutoff,
        ));
    }

    let mut scanner = Scanner::new(raw);
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut has_decimal = false;

    while let Some(token) = scanner.next() {
        let token = token?;
        let previous = tokens.last().map(|token| token.kind);
        let next = scanner.peek_kind();
        trace!("checking {:?} (previous {:?}, next {:?})", token, previous, next);

        let fail = |kind: ErrorKind| {
            Err(ValidationError::new(
                kind,
                raw,
                token.offset,
                token.slice.len(),
            ))
        };

        let is_first = previous.is_none();
        let is_last = next.is_none();
        let after_operator = tokens.last().is_some_and(Token::is_operator);
        let next_is_answer = matches!(next, Some(Some(TokenKind::AnswerRef)));

        match token.kind {
            TokenKind::Operator(_) => {
                if is_first {
                    return fail(ErrorKind::LeadingOperator);
                }
                if is_last {
                    return fail(ErrorKind::TrailingOperator);
                }
                if matches!(next, Some(Some(TokenKind::Operator(_)))) {
                    return fail(ErrorKind::ConsecutiveOperators);
                }
                has_decimal = false;
            }
            TokenKind::Decimal => {
                if is_first {
                    return fail(ErrorKind::LeadingDecimal);
                }
                if is_last {
                    return fail(ErrorKind::TrailingDecimal);
                }
                if has_decimal {
                    return fail(ErrorKind::RepeatedDecimal);
                }
                if (after_operator && !matches!(next, Some(Some(TokenKind::Digit(_)))))
                    || next_is_answer
                {
                    return fail(ErrorKind::DecimalAfterOperator);
                }
                has_decimal = true;
            }
            TokenKind::AnswerRef => {
                if !is_last && !matches!(next, Some(Some(TokenKind::Operator(_)))) {
                    return fail(ErrorKind::AnswerNotFollowedByOperator);
                }
            }
            TokenKind::Digit(_) => {
                if next_is_answer {
                    return fail(ErrorKind::MissingOperatorBeforeAnswer);
                }
            }
        }

        tokens.push(token);
    }

    debug!("accepted {:?} as {} tokens", raw, tokens.len());
    Ok(Tokens::new(raw, tokens))
}
