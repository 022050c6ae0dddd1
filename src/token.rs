#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Minus),
            '*' => Some(Op::Star),
            '/' => Some(Op::Slash),
            '%' => Some(Op::Percent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Op::Plus => "+",
                Op::Minus => "-",
                Op::Star => "*",
                Op::Slash => "/",
                Op::Percent => "%",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Digit(char),
    Decimal,
    Operator(Op),
    AnswerRef,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub slice: &'a str,
    pub offset: usize,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn is_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Operator(_))
    }
}

impl<'a> std::fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slice)
    }
}

/// An accepted token sequence.
///
/// Only the validator builds one, so every `Tokens` upholds the grammar:
/// no leading, trailing or doubled operators, one decimal point per number,
/// and `ANS` always followed by an operator unless it is last.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokens<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(source: &'a str, tokens: Vec<Token<'a>>) -> Self {
        Self { source, tokens }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }
}

impl<'t, 'a> IntoIterator for &'t Tokens<'a> {
    type Item = &'t Token<'a>;
    type IntoIter = std::slice::Iter<'t, Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Canonical string form: the token slices joined back together.
impl std::fmt::Display for Tokens<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_from_char() {
        assert_eq!(Op::from_char('+'), Some(Op::Plus));
        assert_eq!(Op::from_char('-'), Some(Op::Minus));
        assert_eq!(Op::from_char('*'), Some(Op::Star));
        assert_eq!(Op::from_char('/'), Some(Op::Slash));
        assert_eq!(Op::from_char('%'), Some(Op::Percent));
        assert_eq!(Op::from_char('.'), None);
        assert_eq!(Op::from_char('^'), None);
    }

    #[test]
    fn test_op_display() {
        let rendered: String = [Op::Plus, Op::Minus, Op::Star, Op::Slash, Op::Percent]
            .iter()
            .map(|op| op.to_string())
            .collect();
        assert_eq!(rendered, "+-*/%");
    }

    #[test]
    fn test_tokens_display_joins_slices() {
        let source = "ANS+1";
        let tokens = Tokens::new(
            source,
            vec![
                Token {
                    slice: "ANS",
                    offset: 0,
                    kind: TokenKind::AnswerRef,
                },
                Token {
                    slice: "+",
                    offset: 3,
                    kind: TokenKind::Operator(Op::Plus),
                },
                Token {
                    slice: "1",
                    offset: 4,
                    kind: TokenKind::Digit('1'),
                },
            ],
        );

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.to_string(), source);
        assert!(tokens.iter().nth(1).unwrap().is_operator());
    }
}
