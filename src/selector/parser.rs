//! Recursive descent selector parser.
//!
//! Parses selector text into a [`SelectorList`]. Uses the logos-based
//! tokenizer from [`crate::selector::tokenizer`]; whitespace is dropped by
//! the lexer, so descendant combinators are recovered from token spans.

use std::str::FromStr;

use logos::Logos;

use crate::selector::model::*;
use crate::selector::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("invalid character at byte {0}")]
    InvalidCharacter(usize),
    #[error("empty selector")]
    Empty,
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, ParseError> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (idx, (result, span)) in lexer.spanned().enumerate() {
        let token = result.map_err(|()| ParseError::InvalidCharacter(span.start))?;
        tokens.push(PToken {
            text: input[span.clone()].to_string(),
            token,
            pos: idx,
            byte_start: span.start,
            byte_end: span.end,
        });
    }

    Ok(tokens)
}

/// Parse a comma-separated selector group.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, ParseError> {
    let tokens = tokenize_with_spans(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let mut selectors = vec![parser.parse_selector()?];
    while parser.peek().is_some_and(|t| t.token == Token::Comma) {
        parser.advance();
        selectors.push(parser.parse_selector()?);
    }

    if let Some(tok) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            position: tok.pos,
            message: format!("unexpected trailing {:?} '{}'", tok.token, tok.text),
        });
    }

    Ok(SelectorList { selectors })
}

impl FromStr for SelectorList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector_list(s)
    }
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.byte_start == prev.byte_end)
    }

    fn starts_compound(token: &Token) -> bool {
        matches!(
            token,
            Token::Ident
                | Token::Hash
                | Token::Dot
                | Token::Star
                | Token::PseudoClass
                | Token::BracketOpen
        )
    }

    /// Parse a single selector: compound selectors joined by combinators.
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token the compound did not consume was
                // separated by whitespace: descendant combinator.
                Some(t) if Self::starts_compound(&t.token) => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector. `.class`, `#id`, `[attr]` and `:pseudo` are
    /// only appended when they touch the previous token.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, ParseError> {
        let mut components = Vec::new();

        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Ident) => {
                let tok = self.advance().ok_or_else(|| eof("type selector"))?;
                components.push(SelectorComponent::Type(tok.text.to_ascii_lowercase()));
            }
            Some(Token::Star) => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(_) => match self.parse_subclass_selector()? {
                Some(component) => components.push(component),
                None => {
                    return Err(ParseError::UnexpectedToken {
                        position: self.current_pos(),
                        message: "expected selector part".into(),
                    })
                }
            },
            None => return Err(eof("selector part")),
        }

        while self.is_adjacent() {
            match self.parse_subclass_selector()? {
                Some(component) => components.push(component),
                None => break,
            }
        }

        Ok(CompoundSelector { components })
    }

    /// Parse `.class`, `#id`, `[attr...]` or `:pseudo`. Returns `None` without
    /// consuming anything if the next token starts none of them.
    fn parse_subclass_selector(&mut self) -> Result<Option<SelectorComponent>, ParseError> {
        let component = match self.peek().map(|t| t.token.clone()) {
            Some(Token::Dot) => {
                self.advance();
                SelectorComponent::Class(self.expect_name("class name after '.'")?)
            }
            Some(Token::Hash) => {
                self.advance();
                SelectorComponent::Id(self.expect_name("id after '#'")?)
            }
            Some(Token::BracketOpen) => {
                self.advance();
                SelectorComponent::Attribute(self.parse_attribute()?)
            }
            Some(Token::PseudoClass) => SelectorComponent::PseudoClass(self.parse_pseudo_class()?),
            _ => return Ok(None),
        };
        Ok(Some(component))
    }

    fn expect_name(&mut self, what: &str) -> Result<String, ParseError> {
        let tok = self.advance().ok_or_else(|| eof(what))?;
        if tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            });
        }
        Ok(tok.text)
    }

    /// Parse the inside of `[...]`, after the opening bracket.
    fn parse_attribute(&mut self) -> Result<AttributeSelector, ParseError> {
        let name = self.expect_name("attribute name")?.to_ascii_lowercase();

        let op_tok = self.advance().ok_or_else(|| eof("']' or attribute operator"))?;
        let make_op: fn(String) -> AttributeOp = match op_tok.token {
            Token::BracketClose => {
                return Ok(AttributeSelector {
                    name,
                    op: AttributeOp::Exists,
                })
            }
            Token::Equals => AttributeOp::Equals,
            Token::PrefixMatch => AttributeOp::Prefix,
            Token::SuffixMatch => AttributeOp::Suffix,
            Token::SubstringMatch => AttributeOp::Substring,
            Token::IncludesMatch => AttributeOp::Includes,
            other => {
                return Err(ParseError::UnexpectedToken {
                    position: op_tok.pos,
                    message: format!("expected attribute operator, got {other:?} '{}'", op_tok.text),
                })
            }
        };

        let value_tok = self.advance().ok_or_else(|| eof("attribute value"))?;
        let value = match value_tok.token {
            Token::StringLiteral | Token::StringLiteralSingle => {
                value_tok.text[1..value_tok.text.len() - 1].to_string()
            }
            Token::Ident | Token::Number => value_tok.text,
            other => {
                return Err(ParseError::UnexpectedToken {
                    position: value_tok.pos,
                    message: format!("expected attribute value, got {other:?} '{}'", value_tok.text),
                })
            }
        };
        self.expect(&Token::BracketClose)?;

        Ok(AttributeSelector {
            name,
            op: make_op(value),
        })
    }

    fn parse_pseudo_class(&mut self) -> Result<PseudoClass, ParseError> {
        let tok = self.advance().ok_or_else(|| eof("pseudo-class"))?;
        let name = tok.text[1..].to_ascii_lowercase();
        match name.as_str() {
            "not" => {
                if !self.is_adjacent() {
                    return Err(ParseError::UnexpectedToken {
                        position: self.current_pos(),
                        message: "expected '(' directly after ':not'".into(),
                    });
                }
                self.expect(&Token::ParenOpen)?;
                let mut inner = vec![self.parse_compound_selector()?];
                while self.peek().is_some_and(|t| t.token == Token::Comma) {
                    self.advance();
                    inner.push(self.parse_compound_selector()?);
                }
                self.expect(&Token::ParenClose)?;
                Ok(PseudoClass::Not(inner))
            }
            "first-child" => Ok(PseudoClass::FirstChild),
            "last-child" => Ok(PseudoClass::LastChild),
            "empty" => Ok(PseudoClass::Empty),
            _ => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("unsupported pseudo-class ':{name}'"),
            }),
        }
    }
}

fn eof(what: &str) -> ParseError {
    ParseError::UnexpectedEof(format!("expected {what}"))
}
