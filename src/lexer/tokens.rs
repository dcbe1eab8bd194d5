use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("def", TokenKind::Def);
        map.insert("module", TokenKind::Module);
        map.insert("open", TokenKind::Open);
        map.insert("as", TokenKind::As);
        map.insert("const", TokenKind::Const);
        map.insert("class", TokenKind::Class);
        map.insert("model", TokenKind::Model);
        map.insert("final", TokenKind::Final);
        map.insert("native", TokenKind::Native);
        map.insert("rec", TokenKind::Rec);
        map.insert("end", TokenKind::End);
        map.insert("begin", TokenKind::Begin);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("foreach", TokenKind::Foreach);
        map.insert("in", TokenKind::In);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("goto", TokenKind::Goto);
        map.insert("label", TokenKind::Label);
        map.insert("global", TokenKind::Global);
        map.insert("print", TokenKind::Print);
        map.insert("raise", TokenKind::Raise);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("nil", TokenKind::Nil);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Bind,      // :-
    Equals,    // =
    NotEquals, // <>
    Bang,      // !, the empty parameter list

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Ellipsis,
    Semicolon,
    Colon,
    Comma,
    Hash,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Def,
    Module,
    Open,
    As,
    Const,
    Class,
    Model,
    Final,
    Native,
    Rec,
    End,
    Begin,
    If,
    Elif,
    Else,
    While,
    Foreach,
    In,
    Break,
    Continue,
    Goto,
    Label,
    Global,
    Print,
    Raise,
    Return,
    True,
    False,
    Nil,
    And,
    Or,
    Not,
}

impl TokenKind {
    /// The text used for this kind in diagnostics: the literal spelling for
    /// punctuation and keywords, a category name otherwise.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Bind => ":-",
            TokenKind::Equals => "=",
            TokenKind::NotEquals => "<>",
            TokenKind::Bang => "!",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Dot => ".",
            TokenKind::Ellipsis => "...",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Hash => "#",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Def => "def",
            TokenKind::Module => "module",
            TokenKind::Open => "open",
            TokenKind::As => "as",
            TokenKind::Const => "const",
            TokenKind::Class => "class",
            TokenKind::Model => "model",
            TokenKind::Final => "final",
            TokenKind::Native => "native",
            TokenKind::Rec => "rec",
            TokenKind::End => "end",
            TokenKind::Begin => "begin",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Foreach => "foreach",
            TokenKind::In => "in",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Goto => "goto",
            TokenKind::Label => "label",
            TokenKind::Global => "global",
            TokenKind::Print => "print",
            TokenKind::Raise => "raise",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {:?},\nvalue: {}}}", self.kind, self.value)
    }
}
