use std::{fmt, rc::Rc};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub data: TokenType,
    pub text: Rc<str>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(data: TokenType, text: impl Into<Rc<str>>, line: usize, column: usize) -> Self {
        Token {
            data,
            text: text.into(),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Minus,
    Plus,
    Star,
    Slash,
    Caret,
    Percent,

    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    // `=>` or `flinq`
    FatArrow,
    // `->` or `llinq`
    Arrow,

    Identifier,
    FunctionName,
    Parameter,
    String,
    Number,

    Print,
    Const,
    Let,
    Function,
    If,
    Then,
    Else,
    In,

    Eof,
}

impl TokenType {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::EqualEqual
                | Self::BangEqual
                | Self::Greater
                | Self::GreaterEqual
                | Self::Less
                | Self::LessEqual
        )
    }

    pub fn keyword(word: &str) -> Option<TokenType> {
        let kw = match word {
            "print" => Self::Print,
            "const" => Self::Const,
            "flinq" => Self::FatArrow,
            "llinq" => Self::Arrow,
            "let" => Self::Let,
            "function" => Self::Function,
            "if" => Self::If,
            "then" => Self::Then,
            "else" => Self::Else,
            "in" => Self::In,
            _ => return None,
        };
        Some(kw)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Minus => "'-'",
            Self::Plus => "'+'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Caret => "'^'",
            Self::Percent => "'%'",
            Self::Bang => "'!'",
            Self::BangEqual => "'!='",
            Self::Equal => "'='",
            Self::EqualEqual => "'=='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::FatArrow => "'=>'",
            Self::Arrow => "'->'",
            Self::Identifier => "identifier",
            Self::FunctionName => "function name",
            Self::Parameter => "parameter",
            Self::String => "string",
            Self::Number => "number",
            Self::Print => "'print'",
            Self::Const => "'const'",
            Self::Let => "'let'",
            Self::Function => "'function'",
            Self::If => "'if'",
            Self::Then => "'then'",
            Self::Else => "'else'",
            Self::In => "'in'",
            Self::Eof => "end of input",
        };
        f.write_str(s)
    }
}
