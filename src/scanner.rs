use crate::error::{ScanErr, ScanErrKind};
use crate::token::*;

struct Scanner<'a> {
    str: &'a [char],
    index: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(str: &'a [char]) -> Self {
        Self {
            str,
            index: 0,
            line: 1,
            column: 1,
            tokens: vec![],
        }
    }

    // `\r` is the line separator of the language; `\n` is plain whitespace.
    fn advance(&mut self) -> Option<char> {
        let c = self.str.get(self.index).copied()?;
        self.index += 1;
        if c == '\r' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    // "match" is a keyword in the metalanguage already.
    fn match_next(&mut self, c: char) -> bool {
        let res = self.peek() == Some(c);
        if res {
            self.advance();
        }
        res
    }

    fn peek(&self) -> Option<char> {
        self.str.get(self.index).copied()
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn error(&self, kind: ScanErrKind) -> ScanErr {
        ScanErr::new(kind, self.line, self.column)
    }

    fn lexeme(&self, start: usize) -> String {
        self.str[start..self.index].iter().collect()
    }

    fn push(&mut self, data: TokenType, text: impl Into<std::rc::Rc<str>>, (line, column): (usize, usize)) {
        self.tokens.push(Token::new(data, text, line, column));
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn word(&mut self) -> String {
        let start = self.index;
        while self.peek().is_some_and(char::is_alphanumeric) {
            self.advance();
        }
        self.lexeme(start)
    }

    /// Scans a single lexeme. Returns `false` once the input is exhausted.
    fn scan_token(&mut self) -> Result<bool, ScanErr> {
        let pos = self.position();
        let start = self.index;
        let Some(c) = self.advance() else {
            return Ok(false);
        };

        let tok = match c {
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            '[' => TokenType::LeftBracket,
            ']' => TokenType::RightBracket,
            ',' => TokenType::Comma,
            ':' => TokenType::Colon,
            ';' => TokenType::Semicolon,
            '.' => TokenType::Dot,
            '+' => TokenType::Plus,
            '*' => TokenType::Star,
            '^' => TokenType::Caret,
            '%' => TokenType::Percent,
            '/' => {
                if self.match_next('/') {
                    while !matches!(self.peek(), Some('\r') | None) {
                        self.advance();
                    }
                    return Ok(true);
                }
                TokenType::Slash
            }
            '-' => {
                if self.match_next('>') {
                    TokenType::Arrow
                } else {
                    TokenType::Minus
                }
            }
            '=' => {
                if self.match_next('>') {
                    TokenType::FatArrow
                } else if self.match_next('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                }
            }
            '!' => {
                if self.match_next('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                }
            }
            '>' => {
                if self.match_next('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                }
            }
            '<' => {
                if self.match_next('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                }
            }
            '"' => {
                let contents = self.index;
                while self.peek().is_some_and(|x| x != '"') {
                    self.advance();
                }

                if self.peek().is_none() {
                    return Err(ScanErr::new(ScanErrKind::UnterminatedString, pos.0, pos.1));
                }

                let string = self.lexeme(contents);
                // Consume closing " after taking the contents.
                self.advance();
                self.push(TokenType::String, string, pos);
                return Ok(true);
            }
            '0'..='9' => {
                while self.peek().is_some_and(|x| x.is_ascii_digit()) {
                    self.advance();
                }
                if self.match_next('.') {
                    while self.peek().is_some_and(|x| x.is_ascii_digit()) {
                        self.advance();
                    }
                }
                TokenType::Number
            }
            c if c.is_alphabetic() => {
                while self.peek().is_some_and(char::is_alphanumeric) {
                    self.advance();
                }

                let word = self.lexeme(start);
                match TokenType::keyword(&word) {
                    Some(TokenType::Function) => {
                        self.push(TokenType::Function, word, pos);
                        self.function()?;
                        return Ok(true);
                    }
                    Some(TokenType::Print) => {
                        self.push(TokenType::Print, word, pos);
                        self.print()?;
                        return Ok(true);
                    }
                    Some(kw) => kw,
                    None => TokenType::Identifier,
                }
            }
            c if c.is_whitespace() => return Ok(true),
            c => {
                return Err(ScanErr::new(ScanErrKind::UnexpectedChar(c), pos.0, pos.1));
            }
        };

        let text = self.lexeme(start);
        self.push(tok, text, pos);
        Ok(true)
    }

    // function <name>(<param>, ...) => <body>
    fn function(&mut self) -> Result<(), ScanErr> {
        self.skip_whitespace();
        let pos = self.position();
        let name = self.word();
        if !name.starts_with(char::is_alphabetic) {
            return Err(self.error(ScanErrKind::MalformedFunction("expected a function name")));
        }
        self.push(TokenType::FunctionName, name, pos);

        self.skip_whitespace();
        let pos = self.position();
        if !self.match_next('(') {
            return Err(self.error(ScanErrKind::MalformedFunction(
                "expected '(' after the function name",
            )));
        }
        self.push(TokenType::LeftParen, "(", pos);

        self.skip_whitespace();
        let mut pos = self.position();
        if !self.match_next(')') {
            loop {
                self.skip_whitespace();
                let param_pos = self.position();
                let param = self.word();
                if !param.starts_with(char::is_alphabetic) {
                    return Err(self.error(ScanErrKind::MalformedFunction(
                        "expected a parameter name",
                    )));
                }
                self.push(TokenType::Parameter, param, param_pos);

                self.skip_whitespace();
                pos = self.position();
                if self.match_next(',') {
                    self.push(TokenType::Comma, ",", pos);
                } else if self.match_next(')') {
                    break;
                } else {
                    return Err(self.error(ScanErrKind::MalformedFunction(
                        "expected ',' or ')' in the parameter list",
                    )));
                }
            }
        }
        self.push(TokenType::RightParen, ")", pos);

        self.skip_whitespace();
        let pos = self.position();
        if self.match_next('=') && self.match_next('>') {
            self.push(TokenType::FatArrow, "=>", pos);
        } else if self.word() == "flinq" {
            self.push(TokenType::FatArrow, "flinq", pos);
        } else {
            return Err(self.error(ScanErrKind::MalformedFunction(
                "expected '=>' after the parameter list",
            )));
        }

        Ok(())
    }

    // print(<expr>): scans until the parenthesis opened here is closed.
    fn print(&mut self) -> Result<(), ScanErr> {
        self.skip_whitespace();
        let pos = self.position();
        if !self.match_next('(') {
            return Err(self.error(ScanErrKind::MalformedPrint("expected '(' after print")));
        }
        self.push(TokenType::LeftParen, "(", pos);

        let mut depth = 1usize;
        while depth > 0 {
            let before = self.tokens.len();
            if !self.scan_token()? {
                return Err(self.error(ScanErrKind::MalformedPrint("missing closing ')'")));
            }
            for tok in &self.tokens[before..] {
                match tok.data {
                    TokenType::LeftParen => depth += 1,
                    TokenType::RightParen => depth -= 1,
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

/// Splits one statement into tokens, always terminated by [`TokenType::Eof`].
pub fn scan(code: &str) -> Result<Vec<Token>, ScanErr> {
    let chars = code.chars().collect::<Vec<_>>();
    let mut scanner = Scanner::new(&chars);

    while scanner.scan_token()? {}

    let pos = scanner.position();
    scanner.push(TokenType::Eof, "", pos);
    Ok(scanner.tokens)
}
