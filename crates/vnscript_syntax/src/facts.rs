//! Operator precedence, keywords and fixed token text.

use crate::syntax_kind::SyntaxKind;

/// Precedence of a prefix operator, or 0 if `kind` is not one.
pub fn unary_operator_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::PlusToken
        | SyntaxKind::MinusToken
        | SyntaxKind::BangToken
        | SyntaxKind::TildeToken => 7,
        _ => 0,
    }
}

/// Precedence of a binary operator, or 0 if `kind` is not one.
///
/// Higher values bind tighter.
pub fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::AsteriskAsteriskToken => 6,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken => 5,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 4,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::BangEqualsToken
        | SyntaxKind::LessToken
        | SyntaxKind::LessOrEqualsToken
        | SyntaxKind::GreaterToken
        | SyntaxKind::GreaterOrEqualsToken => 3,
        SyntaxKind::AmpersandToken | SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::PipeToken | SyntaxKind::PipePipeToken | SyntaxKind::HatToken => 1,
        _ => 0,
    }
}

/// Classify an identifier-shaped word as a keyword or a plain identifier.
pub fn keyword_kind(text: &str) -> SyntaxKind {
    match text {
        "true" => SyntaxKind::TrueKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "let" => SyntaxKind::LetKeyword,
        "var" => SyntaxKind::VarKeyword,
        "if" => SyntaxKind::IfKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "while" => SyntaxKind::WhileKeyword,
        "for" => SyntaxKind::ForKeyword,
        "to" => SyntaxKind::ToKeyword,
        _ => SyntaxKind::IdentifierToken,
    }
}

/// The source text of tokens whose spelling never varies.
pub fn fixed_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::AsteriskAsteriskToken => "**",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::BangToken => "!",
        SyntaxKind::TildeToken => "~",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::AmpersandAmpersandToken => "&&",
        SyntaxKind::PipeToken => "|",
        SyntaxKind::PipePipeToken => "||",
        SyntaxKind::HatToken => "^",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::EqualsEqualsToken => "==",
        SyntaxKind::BangEqualsToken => "!=",
        SyntaxKind::LessToken => "<",
        SyntaxKind::LessOrEqualsToken => "<=",
        SyntaxKind::GreaterToken => ">",
        SyntaxKind::GreaterOrEqualsToken => ">=",
        SyntaxKind::OpenParenthesisToken => "(",
        SyntaxKind::CloseParenthesisToken => ")",
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::FalseKeyword => "false",
        SyntaxKind::TrueKeyword => "true",
        SyntaxKind::LetKeyword => "let",
        SyntaxKind::VarKeyword => "var",
        SyntaxKind::IfKeyword => "if",
        SyntaxKind::ElseKeyword => "else",
        SyntaxKind::WhileKeyword => "while",
        SyntaxKind::ForKeyword => "for",
        SyntaxKind::ToKeyword => "to",
        _ => return None,
    };
    Some(text)
}
