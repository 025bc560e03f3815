//! Lenient parser — JONC text into a `Value` tree.
//!
//! JONC is JSON relaxed the way hand-written configuration files actually
//! look. On top of standard JSON the parser accepts:
//!
//! - `//` line comments and `/* … */` block comments; a comment immediately
//!   preceding an object key is attached to that entry
//! - single- *or* double-quoted strings
//! - unquoted object keys (`[A-Za-z_][A-Za-z0-9_]*`)
//! - optional commas: object entries and array elements may be separated by
//!   whitespace alone, and trailing commas are fine
//!
//! # Key design decisions
//!
//! - **Comment attribution**: comments are collected while skipping trivia
//!   before a key and joined with `\n`; comments anywhere else (inside
//!   arrays, between key and value) are discarded.
//! - **Int/float split**: numeric literals without a fraction or exponent
//!   parse to `Primitive::Int`; anything else to `Primitive::Float`. Integer
//!   literals that overflow `i64` fall back to `Float`.
//! - **Line tracking**: the cursor counts newlines as they are consumed, so
//!   every error carries the 1-based line it was detected on.

use crate::error::{ParseError, Result};
use crate::value::{Object, Primitive, Value};

/// Parse JONC text into a value tree.
///
/// The document root may be any value, not just an object.
///
/// # Example
/// ```rust
/// use jonc_core::parse;
///
/// let doc = parse("{ // retry budget\n attempts: 3 }").unwrap();
/// let object = doc.as_object().unwrap();
/// assert_eq!(object.comment("attempts"), Some("retry budget"));
/// ```
pub fn parse(text: &str) -> Result<Value> {
    let mut parser = Parser::new(text);
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if let Some(c) = parser.peek() {
        return Err(parser.syntax(format!("unexpected character '{c}' after document")));
    }
    Ok(value)
}

/// Parse JONC text whose root must be an object.
pub fn parse_object(text: &str) -> Result<Object> {
    match parse(text)? {
        Value::Object(object) => Ok(object),
        _ => Err(ParseError::Syntax {
            line: 1,
            message: "document root is not an object".to_string(),
        }),
    }
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn syntax(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn unexpected_end(&self, message: impl Into<String>) -> ParseError {
        ParseError::UnexpectedEnd {
            line: self.line,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.syntax(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.unexpected_end(format!("expected '{expected}'"))),
        }
    }

    /// Skip whitespace and comments, returning the joined text of any
    /// comments encountered. Callers that don't care about attribution use
    /// [`Parser::skip_trivia`].
    fn collect_trivia(&mut self) -> Result<Option<String>> {
        let mut comment: Option<String> = None;
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let text = self.parse_comment()?;
                    match &mut comment {
                        Some(buffer) => {
                            buffer.push('\n');
                            buffer.push_str(&text);
                        }
                        None => comment = Some(text),
                    }
                }
                _ => return Ok(comment),
            }
        }
    }

    fn skip_trivia(&mut self) -> Result<()> {
        self.collect_trivia().map(|_| ())
    }

    /// Consume a `//` or `/* */` comment, returning its trimmed text.
    fn parse_comment(&mut self) -> Result<String> {
        self.bump();
        match self.bump() {
            Some('/') => {
                let mut text = String::new();
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
                Ok(text.trim().to_string())
            }
            Some('*') => {
                let mut text = String::new();
                loop {
                    let Some(c) = self.bump() else {
                        return Err(self.unexpected_end("unterminated block comment"));
                    };
                    if c == '*' && self.peek() == Some('/') {
                        self.bump();
                        return Ok(text.trim().to_string());
                    }
                    text.push(c);
                }
            }
            _ => Err(self.syntax("unexpected character '/'")),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            None => Err(self.unexpected_end("expected a value")),
            Some('{') => Ok(Value::Object(self.parse_object()?)),
            Some('[') => Ok(Value::Array(self.parse_array()?)),
            Some('"') | Some('\'') => Ok(Value::Primitive(Primitive::Str(self.parse_string()?))),
            Some(c) if c == '-' || c.is_ascii_digit() => {
                Ok(Value::Primitive(self.parse_number()?))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.parse_ident();
                match word.as_str() {
                    "true" => Ok(Value::Primitive(Primitive::Bool(true))),
                    "false" => Ok(Value::Primitive(Primitive::Bool(false))),
                    "null" => Ok(Value::Null),
                    other => Err(self.syntax(format!("unexpected identifier '{other}'"))),
                }
            }
            Some(c) => Err(self.syntax(format!("unexpected character '{c}'"))),
        }
    }

    fn parse_object(&mut self) -> Result<Object> {
        self.expect('{')?;
        let mut object = Object::new();
        loop {
            let comment = self.collect_trivia()?;
            match self.peek() {
                None => return Err(self.unexpected_end("unterminated object")),
                Some('}') => {
                    self.bump();
                    return Ok(object);
                }
                Some(',') => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            match comment {
                Some(comment) => object.insert_with_comment(key, value, comment),
                None => object.insert(key, value),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Vec<Value>> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                None => return Err(self.unexpected_end("unterminated array")),
                Some(']') => {
                    self.bump();
                    return Ok(items);
                }
                Some(',') => {
                    self.bump();
                }
                _ => items.push(self.parse_value()?),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Ok(self.parse_ident()),
            Some(c) => Err(self.syntax(format!("expected an object key, found '{c}'"))),
            None => Err(self.unexpected_end("expected an object key")),
        }
    }

    fn parse_ident(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = self.bump().expect("caller checked for a quote");
        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.unexpected_end("unterminated string"));
            };
            match c {
                c if c == quote => return Ok(out),
                '\\' => out.push(self.parse_escape()?),
                '\n' => return Err(self.syntax("newline inside string literal")),
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let Some(c) = self.bump() else {
            return Err(self.unexpected_end("unterminated escape sequence"));
        };
        Ok(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            '\\' => '\\',
            '/' => '/',
            '\'' => '\'',
            '"' => '"',
            'u' => return self.parse_unicode_escape(),
            other => return Err(self.syntax(format!("unknown escape sequence '\\{other}'"))),
        })
    }

    /// `\uXXXX`, combining surrogate pairs into a single character.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.hex4()?;
        if (0xD800..0xDC00).contains(&first) {
            if self.bump() != Some('\\') || self.bump() != Some('u') {
                return Err(self.syntax("high surrogate not followed by a low surrogate escape"));
            }
            let second = self.hex4()?;
            if !(0xDC00..0xE000).contains(&second) {
                return Err(self.syntax("invalid low surrogate"));
            }
            let combined = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
            char::from_u32(combined).ok_or_else(|| self.syntax("invalid unicode escape"))
        } else if (0xDC00..0xE000).contains(&first) {
            Err(self.syntax("unpaired low surrogate"))
        } else {
            char::from_u32(first).ok_or_else(|| self.syntax("invalid unicode escape"))
        }
    }

    fn hex4(&mut self) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let Some(c) = self.bump() else {
                return Err(self.unexpected_end("unterminated unicode escape"));
            };
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.syntax(format!("invalid hex digit '{c}' in unicode escape")))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Primitive> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        let mut seen_dot = false;
        let mut seen_exp = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {
                    text.push(c);
                    self.bump();
                }
                '.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    text.push(c);
                    self.bump();
                }
                'e' | 'E' if !seen_exp => {
                    seen_exp = true;
                    text.push(c);
                    self.bump();
                    if let Some(sign @ ('+' | '-')) = self.peek() {
                        text.push(sign);
                        self.bump();
                    }
                }
                _ => break,
            }
        }
        if seen_dot || seen_exp {
            let value: f64 = text
                .parse()
                .map_err(|_| self.syntax(format!("invalid number '{text}'")))?;
            Ok(Primitive::Float(value))
        } else if let Ok(value) = text.parse::<i64>() {
            Ok(Primitive::Int(value))
        } else {
            // Integer literal beyond i64 range: keep it, as a float.
            let value: f64 = text
                .parse()
                .map_err(|_| self.syntax(format!("invalid number '{text}'")))?;
            Ok(Primitive::Float(value))
        }
    }
}
