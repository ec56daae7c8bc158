use std::rc::Rc;

use thiserror::Error;

use crate::token::{Token, TokenType};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanErrKind {
    #[error("Unterminated string literal.")]
    UnterminatedString,
    #[error("Unexpected character '{0}'.")]
    UnexpectedChar(char),
    #[error("Malformed function declaration: {0}.")]
    MalformedFunction(&'static str),
    #[error("Malformed print: {0}.")]
    MalformedPrint(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}, column {column}] {kind}")]
pub struct ScanErr {
    pub kind: ScanErrKind,
    pub line: usize,
    pub column: usize,
}

impl ScanErr {
    pub fn new(kind: ScanErrKind, line: usize, column: usize) -> Self {
        ScanErr { kind, line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrKind {
    #[error("Expected {0}")]
    ExpectedToken(TokenType),
    #[error("Expected {0} to close {1} from line {2}")]
    Unclosed(TokenType, TokenType, usize),
    #[error("Expected a comparison operator")]
    ExpectedComparison,
    #[error("Unexpected token")]
    UnexpectedToken,
    #[error("Undefined function '{0}'")]
    UndefinedFunction(Rc<str>),
    #[error("'{name}' expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: Rc<str>,
        expected: String,
        got: usize,
    },
    #[error("Function '{0}' is already defined")]
    AlreadyDefined(Rc<str>),
    #[error("'{0}' is a built-in function and cannot be redefined")]
    ReservedName(Rc<str>),
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(Rc<str>),
    #[error("Expression nested deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}, column {column}] {kind}, found {found} '{text}'.")]
pub struct ParseErr {
    pub kind: ParseErrKind,
    pub found: TokenType,
    pub text: Rc<str>,
    pub line: usize,
    pub column: usize,
}

impl ParseErr {
    pub fn new(kind: ParseErrKind, at: &Token) -> Self {
        ParseErr {
            kind,
            found: at.data,
            text: at.text.clone(),
            line: at.line,
            column: at.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Undefined variable '{0}'.")]
    UndefinedVariable(Rc<str>),
    #[error("Undefined function '{0}'.")]
    UndefinedFunction(Rc<str>),
    #[error("'{name}' expects {expected} arguments, got {got}.")]
    Arity {
        name: Rc<str>,
        expected: String,
        got: usize,
    },
    #[error("Condition must be a boolean, got {0}.")]
    NonBooleanCondition(&'static str),
    #[error("Invalid operands for '{op}': {left} and {right}.")]
    TypeError {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("'{0}' expects numeric arguments, got {1}.")]
    ExpectedNumber(&'static str, &'static str),
    #[error("Invalid argument to '{0}': {1}.")]
    InvalidArgument(&'static str, String),
    #[error("Evaluation nested deeper than {0} levels.")]
    DepthExceeded(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretErr {
    #[error(transparent)]
    Scan(#[from] ScanErr),
    #[error(transparent)]
    Parse(#[from] ParseErr),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
