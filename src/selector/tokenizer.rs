//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `^=` beats a stray `^`, `*=` beats `*`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `:not` matches [`Token::PseudoClass`], not a colon followed by an ident
//! - `*=` matches [`Token::SubstringMatch`], not `Star` + `Equals`

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// Pseudo-class name: `:not`, `:first-child`.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// `^=` attribute prefix operator.
    #[token("^=")]
    PrefixMatch,

    /// `$=` attribute suffix operator.
    #[token("$=")]
    SuffixMatch,

    /// `*=` attribute substring operator.
    #[token("*=")]
    SubstringMatch,

    /// `~=` attribute word operator.
    #[token("~=")]
    IncludesMatch,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier: tag names, class names, ids, attribute names.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `=`
    #[token("=")]
    Equals,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,
}

/// Tokenize a selector string into `(Token, text)` pairs.
///
/// Characters that do not form a token are dropped; the parser reports them
/// through its own span-aware lexing.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}
