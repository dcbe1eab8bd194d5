use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    source: Option<Rc<String>>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            source: None,
        }
    }

    /// Builds the syntax error raised whenever the parser cannot match the
    /// lookahead: what was expected, the token actually found, where it was
    /// found and the whole input it was found in.
    pub fn syntax(expected: impl Into<String>, found: &Token, source: Rc<String>) -> Self {
        Error {
            internal_error: ErrorImpl::UnexpectedToken {
                expected: expected.into(),
                found: found.value.clone(),
            },
            position: found.span.start.clone(),
            source: Some(source),
        }
    }

    /// Attaches the source text to an error raised away from the token stream.
    pub fn with_source(mut self, source: Rc<String>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_source(&self) -> Option<&Rc<String>> {
        self.source.as_ref()
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn expected(&self) -> Option<&str> {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => Some(expected),
            _ => None,
        }
    }

    pub fn found(&self) -> Option<&str> {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { found, .. } => Some(found),
            _ => None,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::UnexpectedToken { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::SymbolAlreadyDeclared { .. } => "SymbolAlreadyDeclared",
            ErrorImpl::UndefinedLabel { .. } => "UndefinedLabel",
            ErrorImpl::VariadicNotLast { .. } => "VariadicNotLast",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::SymbolAlreadyDeclared { symbol } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", symbol))
            }
            ErrorImpl::UndefinedLabel { label } => {
                ErrorTip::Suggestion(format!("no label `{}` in this scope", label))
            }
            ErrorImpl::VariadicNotLast { parameter } => ErrorTip::Suggestion(format!(
                "variadic parameter `{}` must be the last parameter",
                parameter
            )),
            ErrorImpl::DuplicateParameter { parameter } => {
                ErrorTip::Suggestion(format!("parameter `{}` is declared twice", parameter))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("syntax error: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("symbol {symbol:?} already declared")]
    SymbolAlreadyDeclared { symbol: String },
    #[error("label {label:?} not declared")]
    UndefinedLabel { label: String },
    #[error("variadic parameter {parameter:?} is not the last parameter")]
    VariadicNotLast { parameter: String },
    #[error("parameter {parameter:?} declared more than once")]
    DuplicateParameter { parameter: String },
}
