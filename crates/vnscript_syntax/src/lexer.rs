//! The lexer converts VNScript source text into tokens.
//!
//! Positions are byte offsets into the source. The lexer never fails: input it
//! cannot classify becomes a `BadToken` with a diagnostic, and scanning resumes
//! at the next character.

use crate::facts::keyword_kind;
use crate::syntax_kind::SyntaxKind;
use crate::token::{LiteralValue, SyntaxToken};
use vnscript_core::text::{TextPos, TextSpan};
use vnscript_diagnostics::{messages, DiagnosticCollection};

/// Scans tokens one at a time from a source string.
pub struct Lexer<'t> {
    /// The source text being scanned.
    text: &'t str,
    /// Current byte position in the text.
    pos: usize,
    /// Start of the current token.
    start: usize,
    /// The kind of the current token.
    kind: SyntaxKind,
    /// Decoded literal value of the current token.
    value: Option<LiteralValue>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'t> Lexer<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            pos: 0,
            start: 0,
            kind: SyntaxKind::BadToken,
            value: None,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Take the diagnostics reported so far.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn lookahead(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    #[inline]
    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pos += c.len_utf8();
        }
    }

    /// Consume the current character and set the token kind.
    fn single(&mut self, kind: SyntaxKind) {
        self.advance();
        self.kind = kind;
    }

    /// Consume one character, plus `second` if it follows, choosing the kind
    /// accordingly.
    fn single_or_double(&mut self, second: char, single: SyntaxKind, double: SyntaxKind) {
        self.advance();
        if self.current() == Some(second) {
            self.advance();
            self.kind = double;
        } else {
            self.kind = single;
        }
    }

    fn span_from(&self, start: usize) -> TextSpan {
        TextSpan::from_bounds(start as TextPos, self.pos as TextPos)
    }

    /// Scan the next token. Returns `EndOfFileToken` forever once the input
    /// is exhausted.
    pub fn lex(&mut self) -> SyntaxToken {
        self.start = self.pos;
        self.kind = SyntaxKind::BadToken;
        self.value = None;

        match self.current() {
            None => self.kind = SyntaxKind::EndOfFileToken,
            Some('+') => self.single(SyntaxKind::PlusToken),
            Some('-') => self.single(SyntaxKind::MinusToken),
            Some('*') => self.single_or_double(
                '*',
                SyntaxKind::AsteriskToken,
                SyntaxKind::AsteriskAsteriskToken,
            ),
            Some('/') => self.single(SyntaxKind::SlashToken),
            Some('(') => self.single(SyntaxKind::OpenParenthesisToken),
            Some(')') => self.single(SyntaxKind::CloseParenthesisToken),
            Some('{') => self.single(SyntaxKind::OpenBraceToken),
            Some('}') => self.single(SyntaxKind::CloseBraceToken),
            Some('~') => self.single(SyntaxKind::TildeToken),
            Some('^') => self.single(SyntaxKind::HatToken),
            Some('&') => self.single_or_double(
                '&',
                SyntaxKind::AmpersandToken,
                SyntaxKind::AmpersandAmpersandToken,
            ),
            Some('|') => {
                self.single_or_double('|', SyntaxKind::PipeToken, SyntaxKind::PipePipeToken)
            }
            Some('=') => {
                self.single_or_double('=', SyntaxKind::EqualsToken, SyntaxKind::EqualsEqualsToken)
            }
            Some('!') => {
                self.single_or_double('=', SyntaxKind::BangToken, SyntaxKind::BangEqualsToken)
            }
            Some('<') => self.single_or_double(
                '=',
                SyntaxKind::LessToken,
                SyntaxKind::LessOrEqualsToken,
            ),
            Some('>') => self.single_or_double(
                '=',
                SyntaxKind::GreaterToken,
                SyntaxKind::GreaterOrEqualsToken,
            ),
            Some('"') => self.scan_string(),
            Some(c) if c.is_ascii_digit() => self.scan_number(),
            Some(c) if c.is_whitespace() => self.scan_whitespace(),
            Some(c) if c.is_alphabetic() => self.scan_identifier_or_keyword(),
            Some(c) => {
                self.advance();
                let span = self.span_from(self.start);
                self.diagnostics
                    .report(span, &messages::BAD_CHARACTER_0, &[c.to_string().as_str()]);
            }
        }

        let text = &self.text[self.start..self.pos];
        let token = SyntaxToken::new(self.kind, self.start as TextPos, text)
            .with_value(self.value.take());
        tracing::trace!(kind = %token.kind, position = token.position, "lexed token");
        token
    }

    fn scan_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
        self.kind = SyntaxKind::WhitespaceToken;
    }

    fn scan_number(&mut self) {
        while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.text[self.start..self.pos];
        let value = match text.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                let span = self.span_from(self.start);
                self.diagnostics
                    .report(span, &messages::THE_NUMBER_0_ISNT_A_VALID_1, &[text, "Int"]);
                0
            }
        };

        self.kind = SyntaxKind::NumberToken;
        self.value = Some(LiteralValue::Int(value));
    }

    fn scan_identifier_or_keyword(&mut self) {
        while matches!(self.current(), Some(c) if c.is_alphabetic()) {
            self.advance();
        }

        self.kind = keyword_kind(&self.text[self.start..self.pos]);
        self.value = match self.kind {
            SyntaxKind::TrueKeyword => Some(LiteralValue::Bool(true)),
            SyntaxKind::FalseKeyword => Some(LiteralValue::Bool(false)),
            _ => None,
        };
    }

    fn scan_string(&mut self) {
        // Opening quote.
        self.advance();
        let mut value = String::new();

        loop {
            match self.current() {
                None | Some('\n') | Some('\r') => {
                    let span = TextSpan::new(self.start as TextPos, 1);
                    self.diagnostics
                        .report(span, &messages::UNTERMINATED_STRING_LITERAL, &[]);
                    break;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_start = self.pos;
                    match self.lookahead() {
                        None | Some('\n') | Some('\r') => {
                            // Leave the backslash; the next iteration reports
                            // the unterminated literal.
                            self.advance();
                        }
                        Some(escaped) => {
                            self.advance();
                            self.advance();
                            match escaped {
                                '"' => value.push('"'),
                                '\\' => value.push('\\'),
                                'n' => value.push('\n'),
                                't' => value.push('\t'),
                                other => {
                                    let span = self.span_from(escape_start);
                                    let sequence = &self.text[escape_start..self.pos];
                                    self.diagnostics.report(
                                        span,
                                        &messages::UNRECOGNIZED_ESCAPE_SEQUENCE_0,
                                        &[sequence],
                                    );
                                    value.push(other);
                                }
                            }
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        self.kind = SyntaxKind::StringToken;
        self.value = Some(LiteralValue::String(value));
    }
}

impl Iterator for Lexer<'_> {
    type Item = SyntaxToken;

    /// Yields every token including whitespace, stopping after end of file.
    fn next(&mut self) -> Option<SyntaxToken> {
        if self.start == self.pos && self.kind == SyntaxKind::EndOfFileToken {
            return None;
        }
        Some(self.lex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        Lexer::new(text).map(|token| token.kind).collect()
    }

    #[test]
    fn test_iterator_ends_after_end_of_file() {
        assert_eq!(
            kinds("a+1"),
            vec![
                SyntaxKind::IdentifierToken,
                SyntaxKind::PlusToken,
                SyntaxKind::NumberToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
        assert_eq!(kinds(""), vec![SyntaxKind::EndOfFileToken]);
    }

    #[test]
    fn test_end_of_file_token_is_empty_at_text_end() {
        let mut lexer = Lexer::new("ab");
        lexer.lex();
        let eof = lexer.lex();
        assert_eq!(eof.kind, SyntaxKind::EndOfFileToken);
        assert_eq!(eof.span(), TextSpan::new(2, 0));
    }
}
