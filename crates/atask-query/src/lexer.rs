//! Lexer (tokenizer) for query expressions.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::LexError;

/// A comparison operator as it appears in the source text.
///
/// `:` and `=` are lexically distinct but both mean equality to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpToken {
    /// `:`
    Colon,
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `>`
    Greater,
    /// `<`
    Less,
}

impl OpToken {
    /// Returns the operator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            OpToken::Colon => ":",
            OpToken::Equals => "=",
            OpToken::NotEquals => "!=",
            OpToken::Greater => ">",
            OpToken::Less => "<",
        }
    }
}

/// The kind of a token, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare word: a field name or an unquoted value.
    Ident(String),
    /// A quoted value with the quotes stripped.
    Quoted(String),
    /// A comparison operator.
    Op(OpToken),
    /// Opening parenthesis `(`.
    OpenParen,
    /// Closing parenthesis `)`.
    CloseParen,
    /// The `AND` keyword (any case).
    And,
    /// The `OR` keyword (any case).
    Or,
    /// The `NOT` keyword (any case).
    Not,
}

/// A token with its source text and position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token.
    pub kind: TokenKind,
    /// The raw source text, including quotes for quoted values.
    pub text: String,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Returns true for characters that end a bare word.
fn is_delimiter(c: char) -> bool {
    c.is_ascii_whitespace()
        || c.is_control()
        || matches!(c, ':' | '=' | '!' | '>' | '<' | '(' | ')')
}

/// Lexer for tokenizing query expressions.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consumes and returns the next character, updating position.
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            self.position += ch.len_utf8();
        }
        c
    }

    /// Skips ASCII whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.next_char();
        }
    }

    /// Reads the maximal run of non-delimiter characters.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            word.push(c);
            self.next_char();
        }
        word
    }

    /// Reads a quoted value. Escapes are not interpreted.
    fn read_quoted(&mut self, quote: char, start: usize) -> Result<Token, LexError> {
        self.next_char(); // opening quote

        let mut value = String::new();
        loop {
            match self.next_char() {
                Some(c) if c == quote => break,
                Some(c) => value.push(c),
                None => return Err(LexError::unterminated(quote, start)),
            }
        }

        Ok(Token {
            text: format!("{quote}{value}{quote}"),
            kind: TokenKind::Quoted(value),
            position: start,
        })
    }

    /// Builds a single-character token, consuming the character.
    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        let c = self.next_char().map(String::from).unwrap_or_default();
        Token {
            kind,
            text: c,
            position: start,
        }
    }

    /// Returns the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let start = self.position;

        let token = match c {
            '(' => self.single(TokenKind::OpenParen, start),
            ')' => self.single(TokenKind::CloseParen, start),
            ':' => self.single(TokenKind::Op(OpToken::Colon), start),
            '=' => self.single(TokenKind::Op(OpToken::Equals), start),
            '>' => self.single(TokenKind::Op(OpToken::Greater), start),
            '<' => self.single(TokenKind::Op(OpToken::Less), start),
            '!' => {
                self.next_char();
                if self.peek() != Some('=') {
                    return Err(LexError::illegal('!', start));
                }
                self.next_char();
                Token {
                    kind: TokenKind::Op(OpToken::NotEquals),
                    text: "!=".to_string(),
                    position: start,
                }
            }
            '"' | '\'' => self.read_quoted(c, start)?,
            _ if c.is_control() => return Err(LexError::illegal(c, start)),
            _ => {
                let word = self.read_word();
                let kind = if word.eq_ignore_ascii_case("and") {
                    TokenKind::And
                } else if word.eq_ignore_ascii_case("or") {
                    TokenKind::Or
                } else if word.eq_ignore_ascii_case("not") {
                    TokenKind::Not
                } else {
                    TokenKind::Ident(word.clone())
                };
                Token {
                    kind,
                    text: word,
                    position: start,
                }
            }
        };

        Ok(Some(token))
    }

    /// Collects all tokens, stopping at the first error.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenizes a query string.
///
/// # Errors
///
/// Returns a [`LexError`] for the first illegal character or unterminated
/// quoted value.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.to_string())
    }

    #[test]
    fn test_tokenize_comparison() {
        assert_eq!(
            kinds("status:open"),
            vec![ident("status"), TokenKind::Op(OpToken::Colon), ident("open")]
        );
    }

    #[test]
    fn test_tokenize_all_operators() {
        assert_eq!(
            kinds("a:1 b=2 c!=3 d>4 e<5"),
            vec![
                ident("a"),
                TokenKind::Op(OpToken::Colon),
                ident("1"),
                ident("b"),
                TokenKind::Op(OpToken::Equals),
                ident("2"),
                ident("c"),
                TokenKind::Op(OpToken::NotEquals),
                ident("3"),
                ident("d"),
                TokenKind::Op(OpToken::Greater),
                ident("4"),
                ident("e"),
                TokenKind::Op(OpToken::Less),
                ident("5"),
            ]
        );
    }

    #[test]
    fn test_tokenize_keywords_case_insensitive() {
        assert_eq!(
            kinds("and AND And or OR not NoT"),
            vec![
                TokenKind::And,
                TokenKind::And,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::Not,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("android"), vec![ident("android")]);
        assert_eq!(kinds("notes"), vec![ident("notes")]);
    }

    #[test]
    fn test_tokenize_parentheses() {
        assert_eq!(
            kinds("(a:1)"),
            vec![
                TokenKind::OpenParen,
                ident("a"),
                TokenKind::Op(OpToken::Colon),
                ident("1"),
                TokenKind::CloseParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_without_spaces() {
        assert_eq!(
            kinds("NOT(a:1)OR b:2"),
            vec![
                TokenKind::Not,
                TokenKind::OpenParen,
                ident("a"),
                TokenKind::Op(OpToken::Colon),
                ident("1"),
                TokenKind::CloseParen,
                TokenKind::Or,
                ident("b"),
                TokenKind::Op(OpToken::Colon),
                ident("2"),
            ]
        );
    }

    #[test]
    fn test_tokenize_word_with_punctuation() {
        assert_eq!(
            kinds("due-date:2026-10-19"),
            vec![
                ident("due-date"),
                TokenKind::Op(OpToken::Colon),
                ident("2026-10-19")
            ]
        );
        assert_eq!(kinds("project_id"), vec![ident("project_id")]);
        assert_eq!(kinds("café"), vec![ident("café")]);
    }

    #[test]
    fn test_tokenize_quoted_values() {
        assert_eq!(
            kinds(r#"title:"weekly review""#),
            vec![
                ident("title"),
                TokenKind::Op(OpToken::Colon),
                TokenKind::Quoted("weekly review".to_string()),
            ]
        );
        assert_eq!(
            kinds("title:'a \"b\" (c)'"),
            vec![
                ident("title"),
                TokenKind::Op(OpToken::Colon),
                TokenKind::Quoted("a \"b\" (c)".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_keyword_is_not_keyword() {
        assert_eq!(kinds("\"AND\""), vec![TokenKind::Quoted("AND".to_string())]);
    }

    #[test]
    fn test_escapes_are_not_interpreted() {
        assert_eq!(
            kinds(r#""a\b""#),
            vec![TokenKind::Quoted(r"a\b".to_string())]
        );
    }

    #[test]
    fn test_quote_inside_word_is_literal() {
        assert_eq!(kinds("don't"), vec![ident("don't")]);
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("  a:1  AND b!=\"x y\"").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2, 3, 4, 7, 11, 12, 14]);
        assert_eq!(tokens[6].text, "\"x y\"");
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let tokens = tokenize("title:é OR x:1").unwrap();
        assert_eq!(tokens[3].position, 9);
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize(" \t\n ").unwrap().is_empty());
    }

    #[test]
    fn test_lone_bang_is_illegal() {
        let err = tokenize("status!open").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter);
        assert_eq!(err.character, '!');
        assert_eq!(err.position, 6);
    }

    #[test]
    fn test_control_character_is_illegal() {
        let err = tokenize("a:1 \u{7}").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter);
        assert_eq!(err.character, '\u{7}');
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = tokenize("title:\"open ended").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedQuote);
        assert_eq!(err.character, '"');
        assert_eq!(err.position, 6);
    }

    #[test]
    fn test_token_display_is_source_text() {
        let tokens = tokenize("a != 'b'").unwrap();
        let texts: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(texts, vec!["a", "!=", "'b'"]);
    }
}
