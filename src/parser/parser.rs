//! The token cursor every production reads from.
//!
//! `Parser` owns the token stream, the full source text (for diagnostics),
//! the scope resolver applied to every identifier, and the lookup tables
//! that map a lookahead kind to its statement or expression handler.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Stmt,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    scope::resolver::{IdentityResolver, ScopeResolver},
    Position, Span,
};

use super::{
    grammar::top_stmt_list,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The full input the tokens were read from
    source: Rc<String>,
    /// Binds every identifier read to the name it denotes
    resolver: Box<dyn ScopeResolver>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser that leaves identifiers as written.
    pub fn new(tokens: Vec<Token>, source: Rc<String>) -> Self {
        Parser::with_resolver(tokens, source, Box::new(IdentityResolver))
    }

    pub fn with_resolver(mut tokens: Vec<Token>, source: Rc<String>, resolver: Box<dyn ScopeResolver>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(Position::null);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            source,
            resolver,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the lookahead without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the lookahead.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Consumes the lookahead and returns it. The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let consumed = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[consumed]
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    /// Consumes the lookahead if it is of `expected_kind`, otherwise raises a
    /// syntax error naming the expected token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.is(expected_kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.syntax_error(expected_kind.as_str()))
        }
    }

    /// A syntax error at the lookahead.
    pub fn syntax_error(&self, expected: &str) -> Error {
        Error::syntax(expected, self.current_token(), Rc::clone(&self.source))
    }

    /// Resolves a name token against the current module context.
    pub fn resolve_scope(&self, token: &Token) -> String {
        self.resolver.resolve_scope(token)
    }

    pub fn source(&self) -> Rc<String> {
        Rc::clone(&self.source)
    }

    /// Returns the position of the lookahead.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns where the most recently consumed token ends.
    pub fn get_previous_end(&self) -> Position {
        if self.pos == 0 {
            self.get_position()
        } else {
            self.tokens[self.pos - 1].span.end.clone()
        }
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a token stream into its top-level statements.
///
/// The first syntax error aborts the parse; trailing input that starts no
/// statement is an error expecting `statement`.
pub fn parse(tokens: Vec<Token>, source: Rc<String>) -> Result<Vec<Stmt>, Error> {
    let mut parser = Parser::new(tokens, source);
    top_stmt_list(&mut parser).collect()
}

/// Like [`parse`], resolving every identifier through `resolver`.
pub fn parse_with_resolver(
    tokens: Vec<Token>,
    source: Rc<String>,
    resolver: Box<dyn ScopeResolver>,
) -> Result<Vec<Stmt>, Error> {
    let mut parser = Parser::with_resolver(tokens, source, resolver);
    top_stmt_list(&mut parser).collect()
}
