// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! SQL Tokenizer
//!
//! The tokenizer (a.k.a. lexer) converts a string into a sequence of tokens.
//!
//! Tokens are produced lazily by iterating a [`Tokenizer`]. Lexing depends
//! on the [`SharedSettings`] of the session: the current delimiter, the
//! quoting modes of `sql_mode`, and the server version of the [`Dialect`]
//! for conditional comments. A `DELIMITER` directive changes the settings
//! while tokenizing, so a token stream can not be restarted from an
//! arbitrary offset.
//!
//! Malformed input never stops the tokenizer: it yields a token of kind
//! [`TokenKind::INVALID`] carrying a [`LexError`] and carries on.

mod char_class;
mod token;

use log::{debug, trace};

pub use self::token::{LexError, LexErrorKind, Location, Token, TokenKind};

use self::char_class::{CONTROL, HEX_DIGIT, IDENT, OPERATOR, SYMBOL, WHITESPACE};
use crate::dialect::Dialect;
use crate::keywords::Keyword;
use crate::settings::{SharedSettings, SqlMode};

/// Read position in the source text.
#[derive(Debug, Clone, Copy)]
struct State<'a> {
    source: &'a str,
    offset: usize,
    line: u64,
    col: u64,
}

impl<'a> State<'a> {
    fn new(source: &'a str) -> Self {
        State {
            source,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consume `n` characters.
    fn skip(&mut self, n: usize) {
        for _ in 0..n {
            self.next();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    fn location(&self) -> Location {
        Location::new(self.offset, self.line, self.col)
    }

    /// Source text from byte offset `start` up to the read position.
    fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.offset]
    }

    fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.next();
        }
        self.slice_from(start)
    }
}

/// SQL Tokenizer
pub struct Tokenizer<'a> {
    dialect: &'a dyn Dialect,
    settings: SharedSettings,
    state: State<'a>,
    with_whitespace: bool,
    /// Whether a `+`/`-` directly before a digit is a sign: true unless the
    /// last significant token was an operand.
    sign_allowed: bool,
    /// Whether the last significant token names something, so a following
    /// `.` qualifies the name rather than starting a number.
    after_name: bool,
    /// No significant token since the last delimiter.
    statement_start: bool,
    /// A `DELIMITER` directive waits for its new delimiter.
    expect_delimiter_value: bool,
    /// Guard of the live conditional comment being lexed.
    conditional: Option<String>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a new SQL tokenizer for the specified SQL statement
    ///
    /// ```
    /// # use mysqlparser::tokenizer::{Token, TokenKind, Tokenizer};
    /// # use mysqlparser::dialect::MySqlDialect;
    /// # let dialect = MySqlDialect::default();
    /// let query = r#"SELECT 'foo'"#;
    ///
    /// let tokens = Tokenizer::new(&dialect, &query).tokenize();
    ///
    /// assert_eq!(tokens.len(), 3);
    /// assert!(tokens[0].is_keyword(mysqlparser::keywords::Keyword::SELECT));
    /// assert!(tokens[1].is(TokenKind::WHITESPACE));
    /// assert_eq!(tokens[2].kind, TokenKind::STRING);
    /// assert_eq!(tokens[2].text, "foo");
    /// ```
    pub fn new(dialect: &'a dyn Dialect, query: &'a str) -> Self {
        Self {
            dialect,
            settings: SharedSettings::default(),
            state: State::new(query),
            with_whitespace: true,
            sign_allowed: true,
            after_name: false,
            statement_start: true,
            expect_delimiter_value: false,
            conditional: None,
            finished: false,
        }
    }

    /// Lex under the given session settings. `DELIMITER` directives write
    /// the new delimiter back into them.
    pub fn with_settings(mut self, settings: SharedSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set whether whitespace tokens are produced (default: true).
    pub fn with_whitespace(mut self, with_whitespace: bool) -> Self {
        self.with_whitespace = with_whitespace;
        self
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Tokenize the remaining input, including [`TokenKind::INVALID`] tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Tokenize the remaining input, failing on the first invalid token.
    pub fn tokenize_strict(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];
        for token in self.by_ref() {
            if let Some(error) = token.error {
                return Err(error);
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn error_token(
        &self,
        start: Location,
        kind: LexErrorKind,
        text: impl Into<String>,
        original: &str,
    ) -> Token {
        let text = text.into();
        let error = LexError::new(kind, original, start);
        Token::new(TokenKind::INVALID, text, start)
            .with_original(original)
            .with_error(error)
    }

    fn no_backslash_escapes(&self) -> bool {
        self.settings.has_mode(SqlMode::NO_BACKSLASH_ESCAPES)
    }

    fn at_delimiter(&self) -> bool {
        let settings = self.settings.borrow();
        !settings.delimiter.is_empty() && self.state.starts_with(&settings.delimiter)
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        char_class::is(ch, IDENT) || self.dialect.is_identifier_part(ch)
    }

    /// Get the next token, or `None` at the end of input.
    fn next_token(&mut self) -> Option<Token> {
        let start = self.state.location();
        let ch = self.state.peek()?;

        if self.expect_delimiter_value {
            if ch == ' ' || ch == '\t' {
                let text = self.state.take_while(|c| c == ' ' || c == '\t');
                return Some(Token::new(TokenKind::WHITESPACE, text, start));
            }
            self.expect_delimiter_value = false;
            return Some(self.tokenize_delimiter_value(start));
        }

        if self.conditional.is_some() && self.state.starts_with("*/") {
            self.state.skip(2);
            let mut token = Token::new(TokenKind::COMMENT | TokenKind::CONDITIONAL, "*/", start);
            token.conditional = self.conditional.take();
            return Some(token);
        }

        if self.at_delimiter() {
            let delimiter = self.settings.delimiter();
            self.state.skip(delimiter.chars().count());
            return Some(Token::new(TokenKind::DELIMITER, delimiter, start));
        }

        let token = match ch {
            _ if char_class::is(ch, WHITESPACE) => {
                let text = self.state.take_while(|c| char_class::is(c, WHITESPACE));
                Token::new(TokenKind::WHITESPACE, text, start)
            }
            '\'' => self.tokenize_string(start, '\''),
            '"' if self.settings.has_mode(SqlMode::ANSI_QUOTES) => {
                self.tokenize_quoted_name(start, '"')
            }
            '"' => self.tokenize_string(start, '"'),
            '`' => self.tokenize_quoted_name(start, '`'),
            '@' => self.tokenize_variable(start),
            '?' => {
                self.state.next();
                Token::new(TokenKind::PLACEHOLDER, "?", start)
            }
            '#' => self.tokenize_line_comment(start),
            '/' if self.state.starts_with("/*") => self.tokenize_block_comment(start),
            '/' if self.state.starts_with("//") => self.tokenize_line_comment(start),
            '-' if self.state.starts_with("--")
                && self
                    .state
                    .peek_nth(2)
                    .map_or(true, |c| char_class::is(c, WHITESPACE | CONTROL)) =>
            {
                self.tokenize_line_comment(start)
            }
            '-' | '+' if self.sign_allowed && self.starts_number(1) => {
                self.tokenize_number(start, true)
            }
            ':' if self.state.starts_with(":=") => {
                self.state.skip(2);
                Token::new(TokenKind::OPERATOR, ":=", start)
            }
            '.' if !self.after_name && self.starts_number(0) => self.tokenize_number(start, false),
            '0'..='9' => {
                if let Some(token) = self.tokenize_uuid(start) {
                    token
                } else if let Some(token) = self.tokenize_ipv4(start) {
                    token
                } else {
                    self.tokenize_number(start, false)
                }
            }
            'x' | 'X' | 'b' | 'B' | 'n' | 'N' if self.state.peek_nth(1) == Some('\'') => {
                self.tokenize_prefixed_string(start, ch)
            }
            _ if char_class::is(ch, HEX_DIGIT) && self.state.peek_nth(8) == Some('-') => self
                .tokenize_uuid(start)
                .unwrap_or_else(|| self.tokenize_word(start)),
            _ if self.dialect.is_identifier_start(ch) => self.tokenize_word(start),
            _ if char_class::is(ch, SYMBOL) => {
                self.state.next();
                Token::new(TokenKind::SYMBOL, ch, start)
            }
            _ if char_class::is(ch, OPERATOR) => self.tokenize_operator(start),
            _ => {
                self.state.next();
                let text = self.state.slice_from(start.offset);
                self.error_token(start, LexErrorKind::InvalidCharacter, text, text)
            }
        };
        Some(token)
    }

    /// Whether a number starts `n` characters ahead: a digit, or a `.`
    /// followed by a digit.
    fn starts_number(&self, n: usize) -> bool {
        match self.state.peek_nth(n) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self
                .state
                .peek_nth(n + 1)
                .map_or(false, |c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn tokenize_operator(&mut self, start: Location) -> Token {
        self.state.next();
        while let Some(ch) = self.state.peek() {
            if !char_class::is(ch, OPERATOR) || self.at_delimiter() {
                break;
            }
            let candidate = &self.state.source[start.offset..self.state.offset + ch.len_utf8()];
            if !self.dialect.is_operator(candidate) {
                break;
            }
            self.state.next();
        }
        let text = self.state.slice_from(start.offset);
        Token::new(TokenKind::OPERATOR, text, start)
    }

    /// Unsigned integers, decimals and floats, `0x` hex and `0b` bit
    /// literals. A signed number includes its leading `+`/`-`.
    fn tokenize_number(&mut self, start: Location, signed: bool) -> Token {
        if signed {
            self.state.next();
        } else if self.state.starts_with("0x") || self.state.starts_with("0b") {
            if let Some(token) = self.tokenize_prefixed_number(start) {
                return token;
            }
        }

        let digits_start = self.state.offset;
        self.state.take_while(|c| c.is_ascii_digit());
        let mut kind = TokenKind::INTEGER;

        if self.state.peek() == Some('.') {
            self.state.next();
            self.state.take_while(|c| c.is_ascii_digit());
            kind = TokenKind::DECIMAL;
        }

        if matches!(self.state.peek(), Some('e') | Some('E')) {
            let before_exponent = self.state;
            self.state.next();
            if matches!(self.state.peek(), Some('+') | Some('-')) {
                self.state.next();
            }
            if self.state.take_while(|c| c.is_ascii_digit()).is_empty() {
                if kind == TokenKind::DECIMAL {
                    let text = self.state.slice_from(start.offset);
                    return self.error_token(start, LexErrorKind::MalformedNumber, text, text);
                }
                if !signed {
                    // `1e` and `1ea` are identifiers
                    self.state = before_exponent;
                    return self.tokenize_word_from(start);
                }
                self.state = before_exponent;
            } else {
                kind = TokenKind::FLOAT;
            }
        }

        if kind == TokenKind::INTEGER && !signed {
            if let Some(ch) = self.state.peek() {
                if self.is_identifier_part(ch) && !self.at_delimiter() {
                    // identifiers may begin with digits: `1abc`
                    return self.tokenize_word_from(start);
                }
            }
        }

        let raw = self.state.slice_from(start.offset);
        let unsigned = &self.state.source[digits_start..self.state.offset];
        let text = if unsigned.starts_with('.') {
            format!("{}0{}", &raw[..raw.len() - unsigned.len()], unsigned)
        } else {
            raw.to_string()
        };
        Token::new(kind, text, start).with_original(raw)
    }

    /// `0x1F` and `0b101`. Returns `None`, without consuming anything, when
    /// the text is an identifier instead, such as `0x1g` or `0b12`.
    fn tokenize_prefixed_number(&mut self, start: Location) -> Option<Token> {
        let saved = self.state;
        let (kind, valid): (TokenKind, fn(char) -> bool) = match self.state.peek_nth(1) {
            Some('x') => (TokenKind::HEX, |c: char| c.is_ascii_hexdigit()),
            _ => (TokenKind::BIT, |c: char| c == '0' || c == '1'),
        };
        self.state.skip(2);
        let digits = self.state.take_while(valid);
        let glued = self
            .state
            .peek()
            .map_or(false, |c| self.is_identifier_part(c) && !self.at_delimiter());
        if digits.is_empty() || glued {
            self.state = saved;
            return None;
        }
        let raw = self.state.slice_from(start.offset);
        Some(Token::new(kind, digits, start).with_original(raw))
    }

    /// `X'1F'`, `B'101'` and `N'text'`.
    fn tokenize_prefixed_string(&mut self, start: Location, prefix: char) -> Token {
        if matches!(prefix, 'n' | 'N') {
            self.state.next();
            let mut token = self.tokenize_string(start, '\'');
            if !token.is(TokenKind::INVALID) {
                token.kind |= TokenKind::NATIONAL;
            }
            return token;
        }

        self.state.skip(2);
        let content = self.state.take_while(|c| c != '\'');
        if self.state.next().is_none() {
            let raw = self.state.slice_from(start.offset);
            return self.error_token(start, LexErrorKind::UnterminatedString, content, raw);
        }
        let raw = self.state.slice_from(start.offset);
        let (kind, valid) = if matches!(prefix, 'x' | 'X') {
            (
                TokenKind::HEX,
                content.len() % 2 == 0 && content.chars().all(|c| c.is_ascii_hexdigit()),
            )
        } else {
            (TokenKind::BIT, content.chars().all(|c| c == '0' || c == '1'))
        };
        if !valid {
            return self.error_token(start, LexErrorKind::MalformedNumber, content, raw);
        }
        Token::new(kind, content, start).with_original(raw)
    }

    /// `8-4-4-4-12` hex digit groups, not followed by identifier characters.
    fn tokenize_uuid(&mut self, start: Location) -> Option<Token> {
        const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
        let bytes = self.state.rest().as_bytes();
        let mut pos = 0;
        for (i, &len) in GROUPS.iter().enumerate() {
            if i > 0 {
                if bytes.get(pos) != Some(&b'-') {
                    return None;
                }
                pos += 1;
            }
            let group = bytes.get(pos..pos + len)?;
            if !group.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            pos += len;
        }
        if let Some(&next) = bytes.get(pos) {
            if next == b'-' || self.is_identifier_part(next as char) {
                return None;
            }
        }
        self.state.skip(pos);
        let text = self.state.slice_from(start.offset);
        Some(Token::new(TokenKind::UUID, text, start))
    }

    /// Four dot separated groups of at most three digits, each below 256.
    fn tokenize_ipv4(&mut self, start: Location) -> Option<Token> {
        let bytes = self.state.rest().as_bytes();
        let mut pos = 0;
        for i in 0..4 {
            if i > 0 {
                if bytes.get(pos) != Some(&b'.') {
                    return None;
                }
                pos += 1;
            }
            let len = bytes[pos..].iter().take_while(|b| b.is_ascii_digit()).count();
            if len == 0 || len > 3 {
                return None;
            }
            let group = &self.state.rest()[pos..pos + len];
            if group.parse::<u16>().map_or(true, |n| n > 255) {
                return None;
            }
            pos += len;
        }
        if let Some(&next) = bytes.get(pos) {
            if next == b'.' || self.is_identifier_part(next as char) {
                return None;
            }
        }
        self.state.skip(pos);
        let text = self.state.slice_from(start.offset);
        Some(Token::new(TokenKind::IPV4, text, start))
    }

    /// Read a quoted value after its opening quote. A doubled quote stands
    /// for the quote itself. Returns the partial value on end of input.
    fn scan_quoted(&mut self, quote: char, backslash_escapes: bool) -> Result<String, String> {
        let mut value = String::new();
        loop {
            let Some(ch) = self.state.next() else {
                return Err(value);
            };
            match ch {
                _ if ch == quote => {
                    if self.state.peek() == Some(quote) {
                        self.state.next();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                '\\' if backslash_escapes => {
                    let Some(escaped) = self.state.next() else {
                        value.push('\\');
                        return Err(value);
                    };
                    match escaped {
                        '0' => value.push('\0'),
                        'b' => value.push('\u{8}'),
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        'Z' => value.push('\u{1a}'),
                        // kept for LIKE patterns
                        '%' | '_' => {
                            value.push('\\');
                            value.push(escaped);
                        }
                        c => value.push(c),
                    }
                }
                _ => value.push(ch),
            }
        }
    }

    /// `'...'`, or `"..."` outside of `ANSI_QUOTES` mode.
    fn tokenize_string(&mut self, start: Location, quote: char) -> Token {
        self.state.next();
        let backslash = !self.no_backslash_escapes();
        match self.scan_quoted(quote, backslash) {
            Ok(value) => {
                let raw = self.state.slice_from(start.offset);
                Token::new(TokenKind::STRING, value, start).with_original(raw)
            }
            Err(partial) => {
                let raw = self.state.slice_from(start.offset);
                self.error_token(start, LexErrorKind::UnterminatedString, partial, raw)
            }
        }
    }

    /// `` `name` ``, or `"name"` in `ANSI_QUOTES` mode.
    fn tokenize_quoted_name(&mut self, start: Location, quote: char) -> Token {
        self.state.next();
        match self.scan_quoted(quote, false) {
            Ok(value) => {
                let raw = self.state.slice_from(start.offset);
                Token::new(TokenKind::NAME | TokenKind::QUOTED, value, start).with_original(raw)
            }
            Err(partial) => {
                let raw = self.state.slice_from(start.offset);
                self.error_token(start, LexErrorKind::UnterminatedString, partial, raw)
            }
        }
    }

    /// `@name`, `@'name'`, `@@name`; a lone `@` is a symbol.
    fn tokenize_variable(&mut self, start: Location) -> Token {
        self.state.next();
        let system = self.state.peek() == Some('@');
        if system {
            self.state.next();
        }
        let kind = if system {
            TokenKind::SYSTEM_VARIABLE
        } else {
            TokenKind::VARIABLE
        };

        let name = match self.state.peek() {
            Some(q @ ('\'' | '"' | '`')) if !system || q == '`' => {
                self.state.next();
                let backslash = q != '`' && !self.no_backslash_escapes();
                match self.scan_quoted(q, backslash) {
                    Ok(value) => value,
                    Err(partial) => {
                        let raw = self.state.slice_from(start.offset);
                        return self.error_token(
                            start,
                            LexErrorKind::UnterminatedString,
                            partial,
                            raw,
                        );
                    }
                }
            }
            _ => {
                let mut name = String::new();
                while let Some(ch) = self.state.peek() {
                    let allowed = self.is_identifier_part(ch) || (!system && ch == '.');
                    if !allowed || (!name.is_empty() && self.at_delimiter()) {
                        break;
                    }
                    name.push(ch);
                    self.state.next();
                }
                name
            }
        };

        let raw = self.state.slice_from(start.offset);
        if name.is_empty() && raw.len() == 1 {
            return Token::new(TokenKind::SYMBOL, "@", start);
        }
        if name.is_empty() {
            return self.error_token(start, LexErrorKind::InvalidCharacter, raw, raw);
        }
        Token::new(kind, name, start).with_original(raw)
    }

    /// `# ...`, `// ...` and `-- ...` up to, not including, the newline.
    fn tokenize_line_comment(&mut self, start: Location) -> Token {
        let text = self.state.take_while(|c| c != '\n');
        Token::new(TokenKind::COMMENT, text, start)
    }

    /// `/* ... */`, or the opening marker of a live conditional comment.
    fn tokenize_block_comment(&mut self, start: Location) -> Token {
        if self.conditional.is_none() {
            if let Some(guard) = self.conditional_guard() {
                let (tag, version) = guard;
                let live = version.map_or(true, |v| self.dialect.satisfies(v));
                debug!(
                    "conditional comment /*{} is {}",
                    tag,
                    if live { "live" } else { "skipped" }
                );
                if live {
                    self.state.skip(2 + tag.chars().count());
                    let text = self.state.slice_from(start.offset);
                    let mut token =
                        Token::new(TokenKind::COMMENT | TokenKind::CONDITIONAL, text, start);
                    token.conditional = Some(tag.clone());
                    self.conditional = Some(tag);
                    return token;
                }
            }
        }

        self.state.skip(2);
        let mut nested = self.conditional.is_some();
        loop {
            if self.state.starts_with("*/") {
                self.state.skip(2);
                break;
            }
            if self.state.starts_with("/*") {
                nested = true;
                self.state.skip(2);
                continue;
            }
            if self.state.next().is_none() {
                let text = self.state.slice_from(start.offset);
                return self.error_token(start, LexErrorKind::UnterminatedComment, text, text);
            }
        }
        let text = self.state.slice_from(start.offset);
        if nested {
            return self.error_token(start, LexErrorKind::NestedComment, text, text);
        }
        Token::new(TokenKind::COMMENT, text, start)
    }

    /// The marker and version after `/*` if it opens a conditional comment,
    /// e.g. `("!80002", Some(80002))` for `/*!80002`.
    fn conditional_guard(&self) -> Option<(String, Option<u32>)> {
        let after = &self.state.rest()[2..];
        let marker = self
            .dialect
            .conditional_comment_markers()
            .iter()
            .find(|m| after.starts_with(**m))?;
        let digits = after[marker.len()..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 5 || digits == 6 {
            let version = &after[marker.len()..marker.len() + digits];
            Some((format!("{marker}{version}"), version.parse().ok()))
        } else {
            Some((marker.to_string(), None))
        }
    }

    /// A bare word: keyword, identifier, or the `DELIMITER` directive.
    fn tokenize_word(&mut self, start: Location) -> Token {
        self.state.next();
        self.tokenize_word_from(start)
    }

    /// Continue a word that started at `start`, up to a glued delimiter.
    fn tokenize_word_from(&mut self, start: Location) -> Token {
        while let Some(ch) = self.state.peek() {
            if !self.is_identifier_part(ch) || self.at_delimiter() {
                break;
            }
            self.state.next();
        }
        let word = self.state.slice_from(start.offset);

        let keyword = Keyword::lookup(word);
        if keyword == Keyword::NoKeyword {
            return Token::new(TokenKind::NAME, word, start);
        }

        let mut kind = TokenKind::NAME | TokenKind::KEYWORD;
        if self.dialect.is_reserved(keyword) {
            kind |= TokenKind::RESERVED;
        }
        if self.dialect.is_operator_keyword(keyword) {
            kind |= TokenKind::OPERATOR_KEYWORD;
        }
        if keyword == Keyword::DELIMITER && self.statement_start {
            self.expect_delimiter_value = true;
        }
        Token::new(kind, keyword.as_str(), start)
            .with_original(word)
            .with_keyword(keyword)
    }

    /// The new delimiter of a `DELIMITER` directive: everything up to the
    /// next whitespace, taken verbatim.
    fn tokenize_delimiter_value(&mut self, start: Location) -> Token {
        let value = self.state.take_while(|c| !char_class::is(c, WHITESPACE));
        if value.is_empty() {
            return self.error_token(start, LexErrorKind::MissingDelimiter, "", "");
        }
        if self.dialect.is_reserved(Keyword::lookup(value)) {
            return self.error_token(start, LexErrorKind::ReservedDelimiter, value, value);
        }
        debug!("delimiter changed to {}", value);
        self.settings.set_delimiter(value);
        Token::new(TokenKind::DELIMITER_VALUE, value, start)
    }

    /// Update the lookback state after `token` was produced.
    fn observe(&mut self, token: &Token) {
        let kind = token.kind;
        if kind.intersects(TokenKind::TRIVIA) {
            return;
        }
        if token.ends_statement() {
            self.statement_start = true;
            self.sign_allowed = true;
            self.after_name = false;
            return;
        }
        self.statement_start = false;
        self.after_name = (kind.contains(TokenKind::NAME) && !kind.contains(TokenKind::RESERVED))
            || kind.contains(TokenKind::QUOTED);
        self.sign_allowed = if kind.contains(TokenKind::OPERATOR) {
            true
        } else if kind.contains(TokenKind::SYMBOL) {
            !matches!(token.text.as_str(), ")" | "]" | "}")
        } else if kind.contains(TokenKind::KEYWORD) {
            kind.contains(TokenKind::OPERATOR_KEYWORD)
                || (kind.contains(TokenKind::RESERVED) && !token.keyword.ends_operand())
        } else {
            false
        };
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.finished {
                return None;
            }
            let start = self.state.location();
            let token = match self.next_token() {
                Some(token) => token,
                None if self.expect_delimiter_value => {
                    self.expect_delimiter_value = false;
                    self.error_token(start, LexErrorKind::MissingDelimiter, "", "")
                }
                None if self.conditional.is_some() => {
                    let mut token = self.error_token(
                        start,
                        LexErrorKind::UnterminatedComment,
                        "",
                        "",
                    );
                    token.conditional = self.conditional.take();
                    token
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };
            let mut token = token;
            if token.conditional.is_none() {
                token.conditional = self.conditional.clone();
            }
            self.observe(&token);
            trace!("token: {:?}", token);
            if !self.with_whitespace && token.kind == TokenKind::WHITESPACE {
                continue;
            }
            return Some(token);
        }
    }
}

/// Reconstruct source text from tokens.
pub fn serialize_tokens<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> String {
    tokens.into_iter().map(Token::source_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{server_version, MariaDbDialect, MySqlDialect};
    use crate::settings::SessionSettings;

    fn lex(sql: &str) -> Vec<Token> {
        let dialect = MySqlDialect::default();
        Tokenizer::new(&dialect, sql).with_whitespace(false).tokenize()
    }

    fn lex_with_mode(sql: &str, mode: SqlMode) -> Vec<Token> {
        let dialect = MySqlDialect::default();
        let settings = SharedSettings::new(SessionSettings::default().with_sql_mode(mode));
        Tokenizer::new(&dialect, sql)
            .with_settings(settings)
            .with_whitespace(false)
            .tokenize()
    }

    fn compare(expected: Vec<(TokenKind, &str)>, actual: Vec<Token>) {
        let actual: Vec<(TokenKind, String)> =
            actual.into_iter().map(|t| (t.kind, t.text)).collect();
        let expected: Vec<(TokenKind, String)> = expected
            .into_iter()
            .map(|(k, t)| (k, t.to_string()))
            .collect();
        assert_eq!(expected, actual);
    }

    const KW: TokenKind = TokenKind::NAME.union(TokenKind::KEYWORD);
    const RESERVED: TokenKind = KW.union(TokenKind::RESERVED);
    const OP_KW: TokenKind = RESERVED.union(TokenKind::OPERATOR_KEYWORD);

    #[test]
    fn tokenize_select_1() {
        compare(
            vec![(RESERVED, "SELECT"), (TokenKind::INTEGER, "1")],
            lex("select 1"),
        );
    }

    #[test]
    fn tokenize_whitespace_runs() {
        let dialect = MySqlDialect::default();
        let tokens = Tokenizer::new(&dialect, "a \t\n b").tokenize();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::WHITESPACE);
        assert_eq!(tokens[1].text, " \t\n ");
        assert_eq!(tokens[2].location, Location::new(5, 2, 2));
    }

    #[test]
    fn tokenize_keywords_keep_original_case() {
        let tokens = lex("Select x LIKE");
        assert_eq!(tokens[0].text, "SELECT");
        assert_eq!(tokens[0].original.as_deref(), Some("Select"));
        assert_eq!(tokens[0].keyword, Keyword::SELECT);
        assert_eq!(tokens[1].kind, TokenKind::NAME);
        assert_eq!(tokens[2].kind, OP_KW);
        assert_eq!(tokens[2].original, None);
    }

    #[test]
    fn tokenize_reserved_depends_on_version() {
        let mysql57 = MySqlDialect::new(server_version(5, 7, 44));
        let tokens = Tokenizer::new(&mysql57, "window").tokenize();
        assert_eq!(tokens[0].kind, KW);

        let tokens = lex("window");
        assert_eq!(tokens[0].kind, RESERVED);
    }

    #[test]
    fn tokenize_decimal_without_leading_digit() {
        let tokens = lex(".5");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::DECIMAL);
        assert_eq!(tokens[0].text, "0.5");
        assert_eq!(tokens[0].original.as_deref(), Some(".5"));

        compare(vec![(TokenKind::FLOAT, "0.5e3")], lex(".5e3"));
        compare(vec![(TokenKind::DECIMAL, "1.")], lex("1."));
    }

    #[test]
    fn tokenize_number_kinds() {
        compare(
            vec![
                (TokenKind::INTEGER, "12"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::DECIMAL, "1.25"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::FLOAT, "1e10"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::FLOAT, "1.5E-3"),
            ],
            lex("12,1.25,1e10,1.5E-3"),
        );
    }

    #[test]
    fn tokenize_exponent_without_digits() {
        let tokens = lex("1.5e");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::INVALID);
        assert_eq!(
            tokens[0].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::MalformedNumber)
        );

        // no decimal point: the digits start an identifier
        compare(vec![(TokenKind::NAME, "1e")], lex("1e"));
        compare(
            vec![(TokenKind::NAME, "1e"), (TokenKind::OPERATOR, "+")],
            lex("1e+"),
        );
        compare(vec![(TokenKind::NAME, "123abc")], lex("123abc"));
    }

    #[test]
    fn tokenize_no_sign_after_operand_keyword() {
        compare(
            vec![
                (RESERVED, "NULL"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::INTEGER, "1"),
            ],
            lex("NULL-1"),
        );
        compare(
            vec![
                (RESERVED, "TRUE"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::INTEGER, "1"),
            ],
            lex("TRUE -1"),
        );
        compare(
            vec![
                (RESERVED, "CURRENT_TIMESTAMP"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::INTEGER, "1"),
            ],
            lex("CURRENT_TIMESTAMP-1"),
        );
        compare(
            vec![
                (OP_KW, "AND"),
                (TokenKind::INTEGER, "-1"),
                (RESERVED, "WHERE"),
                (TokenKind::INTEGER, "+2"),
            ],
            lex("AND -1 WHERE +2"),
        );
    }

    #[test]
    fn tokenize_sign_depends_on_previous_token() {
        compare(
            vec![
                (TokenKind::INTEGER, "10"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::INTEGER, "20"),
            ],
            lex("10-20"),
        );
        compare(
            vec![
                (RESERVED, "SELECT"),
                (TokenKind::INTEGER, "-1"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::DECIMAL, "+0.5"),
            ],
            lex("SELECT -1, +.5"),
        );
        compare(
            vec![
                (TokenKind::NAME, "a"),
                (TokenKind::OPERATOR, "="),
                (TokenKind::INTEGER, "-1"),
            ],
            lex("a=-1"),
        );
        compare(
            vec![
                (TokenKind::SYMBOL, "("),
                (TokenKind::NAME, "a"),
                (TokenKind::SYMBOL, ")"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::INTEGER, "1"),
            ],
            lex("(a)-1"),
        );
    }

    #[test]
    fn tokenize_hex_and_bit() {
        let tokens = lex("0x1F X'0a' b'101' 0b11");
        compare(
            vec![
                (TokenKind::HEX, "1F"),
                (TokenKind::HEX, "0a"),
                (TokenKind::BIT, "101"),
                (TokenKind::BIT, "11"),
            ],
            tokens.clone(),
        );
        assert_eq!(tokens[1].source_text(), "X'0a'");

        compare(vec![(TokenKind::NAME, "0b1x")], lex("0b1x"));
        compare(vec![(TokenKind::NAME, "0x1g")], lex("0x1g"));
        compare(vec![(TokenKind::NAME, "0x")], lex("0x"));

        let tokens = lex("X'1G'");
        assert_eq!(
            tokens[0].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::MalformedNumber)
        );
        let tokens = lex("x'abc'");
        assert_eq!(tokens[0].kind, TokenKind::INVALID);
    }

    #[test]
    fn tokenize_uuid_and_ipv4() {
        compare(
            vec![
                (TokenKind::UUID, "123e4567-e89b-12d3-a456-426614174000"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::UUID, "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::IPV4, "192.168.0.1"),
            ],
            lex("123e4567-e89b-12d3-a456-426614174000,a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11,192.168.0.1"),
        );
        compare(
            vec![(TokenKind::DECIMAL, "1.2"), (TokenKind::DECIMAL, "0.3")],
            lex("1.2.3"),
        );
        assert_eq!(lex("300.1.1.1")[0].kind, TokenKind::DECIMAL);
    }

    #[test]
    fn tokenize_quote_escaping() {
        let tokens = lex(r#"'it''s' 'say "hi"' "a\"b" 'x\ny' 'a\%'"#);
        compare(
            vec![
                (TokenKind::STRING, "it's"),
                (TokenKind::STRING, "say \"hi\""),
                (TokenKind::STRING, "a\"b"),
                (TokenKind::STRING, "x\ny"),
                (TokenKind::STRING, "a\\%"),
            ],
            tokens.clone(),
        );
        assert_eq!(tokens[0].source_text(), "'it''s'");
    }

    #[test]
    fn tokenize_no_backslash_escapes() {
        compare(
            vec![(TokenKind::STRING, r"a\"), (TokenKind::NAME, "b")],
            lex_with_mode(r"'a\' b", SqlMode::NO_BACKSLASH_ESCAPES),
        );
    }

    #[test]
    fn tokenize_ansi_quotes() {
        compare(
            vec![(TokenKind::STRING, "a")],
            lex(r#""a""#),
        );
        compare(
            vec![(TokenKind::NAME | TokenKind::QUOTED, "a\"b")],
            lex_with_mode(r#""a""b""#, SqlMode::ANSI_QUOTES),
        );
    }

    #[test]
    fn tokenize_backtick_names() {
        let tokens = lex(r"`select` `a``b` `c\n`");
        compare(
            vec![
                (TokenKind::NAME | TokenKind::QUOTED, "select"),
                (TokenKind::NAME | TokenKind::QUOTED, "a`b"),
                (TokenKind::NAME | TokenKind::QUOTED, r"c\n"),
            ],
            tokens.clone(),
        );
        assert_eq!(tokens[0].keyword, Keyword::NoKeyword);
    }

    #[test]
    fn tokenize_unterminated_string() {
        let dialect = MySqlDialect::default();
        let tokens = Tokenizer::new(&dialect, "SELECT 'abc").tokenize();
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::INVALID);
        assert_eq!(last.text, "abc");
        assert_eq!(last.source_text(), "'abc");
        let error = last.error.as_ref().unwrap();
        assert_eq!(error.kind, LexErrorKind::UnterminatedString);
        assert_eq!(error.location, Location::new(7, 1, 8));

        let err = Tokenizer::new(&dialect, "SELECT 'abc")
            .tokenize_strict()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn tokenize_continues_after_errors() {
        let tokens = lex("a \u{1} b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, TokenKind::INVALID);
        assert_eq!(tokens[2].text, "b");
    }

    #[test]
    fn tokenize_operators_longest_valid() {
        compare(
            vec![
                (TokenKind::NAME, "a"),
                (TokenKind::OPERATOR, "<=>"),
                (TokenKind::NAME, "b"),
                (TokenKind::OPERATOR, "!="),
                (TokenKind::NAME, "c"),
                (TokenKind::OPERATOR, "&&"),
                (TokenKind::NAME, "d"),
                (TokenKind::OPERATOR, "<>"),
                (TokenKind::OPERATOR, "="),
                (TokenKind::NAME, "e"),
                (TokenKind::OPERATOR, ":="),
                (TokenKind::NAME, "f"),
                (TokenKind::OPERATOR, "->>"),
                (TokenKind::STRING, "$.x"),
            ],
            lex("a<=>b!=c&&d<>=e:=f->>'$.x'"),
        );
    }

    #[test]
    fn tokenize_comments() {
        let dialect = MySqlDialect::default();
        let sql = "a # one\nb -- two\nc --d\n/* three */ e // four";
        let tokens: Vec<Token> = Tokenizer::new(&dialect, sql)
            .tokenize()
            .into_iter()
            .filter(|t| !t.is(TokenKind::WHITESPACE))
            .collect();
        compare(
            vec![
                (TokenKind::NAME, "a"),
                (TokenKind::COMMENT, "# one"),
                (TokenKind::NAME, "b"),
                (TokenKind::COMMENT, "-- two"),
                (TokenKind::NAME, "c"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::OPERATOR, "-"),
                (TokenKind::NAME, "d"),
                (TokenKind::COMMENT, "/* three */"),
                (TokenKind::NAME, "e"),
                (TokenKind::COMMENT, "// four"),
            ],
            tokens,
        );
    }

    #[test]
    fn tokenize_nested_and_unterminated_comments() {
        let tokens = lex("/* a /* b */ c");
        assert_eq!(
            tokens[0].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::NestedComment)
        );
        assert_eq!(tokens[0].text, "/* a /* b */");
        assert_eq!(tokens[1].text, "c");

        let tokens = lex("/* a");
        assert_eq!(
            tokens[0].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::UnterminatedComment)
        );
    }

    #[test]
    fn tokenize_live_conditional_comment() {
        let tokens = lex("SELECT /*!80000 STRAIGHT_JOIN */ 1");
        compare(
            vec![
                (RESERVED, "SELECT"),
                (TokenKind::COMMENT | TokenKind::CONDITIONAL, "/*!80000"),
                (RESERVED, "STRAIGHT_JOIN"),
                (TokenKind::COMMENT | TokenKind::CONDITIONAL, "*/"),
                (TokenKind::INTEGER, "1"),
            ],
            tokens.clone(),
        );
        assert_eq!(tokens[0].conditional, None);
        assert_eq!(tokens[2].conditional.as_deref(), Some("!80000"));
        assert_eq!(tokens[3].conditional.as_deref(), Some("!80000"));
        assert_eq!(tokens[4].conditional, None);
    }

    #[test]
    fn tokenize_skipped_conditional_comment() {
        let tokens = lex("SELECT /*!90000 x */ 1");
        compare(
            vec![
                (RESERVED, "SELECT"),
                (TokenKind::COMMENT, "/*!90000 x */"),
                (TokenKind::INTEGER, "1"),
            ],
            tokens,
        );
    }

    #[test]
    fn tokenize_unversioned_conditional_comment() {
        let tokens = lex("/*! x */");
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[1].conditional.as_deref(), Some("!"));
    }

    #[test]
    fn tokenize_mariadb_conditional_comment() {
        let sql = "/*M!100100 x */";
        compare(
            vec![(TokenKind::COMMENT, sql)],
            lex(sql),
        );

        let dialect = MariaDbDialect::default();
        let tokens = Tokenizer::new(&dialect, sql).with_whitespace(false).tokenize();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].conditional.as_deref(), Some("M!100100"));
    }

    #[test]
    fn tokenize_unterminated_conditional_comment() {
        let tokens = lex("/*!80000 x");
        let last = tokens.last().unwrap();
        assert_eq!(
            last.error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::UnterminatedComment)
        );
    }

    #[test]
    fn tokenize_variables_and_placeholders() {
        compare(
            vec![
                (TokenKind::VARIABLE, "a"),
                (TokenKind::VARIABLE, "my var"),
                (TokenKind::SYSTEM_VARIABLE, "global"),
                (TokenKind::SYMBOL, "."),
                (TokenKind::NAME, "max_connections"),
                (TokenKind::PLACEHOLDER, "?"),
                (TokenKind::STRING, "u"),
                (TokenKind::VARIABLE, "localhost"),
            ],
            lex("@a @'my var' @@global.max_connections ? 'u'@'localhost'"),
        );
    }

    #[test]
    fn tokenize_national_string() {
        let tokens = lex("N'abc'");
        assert_eq!(tokens[0].kind, TokenKind::STRING | TokenKind::NATIONAL);
        assert_eq!(tokens[0].text, "abc");
        assert_eq!(tokens[0].source_text(), "N'abc'");
    }

    #[test]
    fn tokenize_qualified_name_with_digits() {
        compare(
            vec![
                (TokenKind::NAME, "t1"),
                (TokenKind::SYMBOL, "."),
                (TokenKind::NAME, "1col"),
            ],
            lex("t1.1col"),
        );
    }

    #[test]
    fn tokenize_delimiter_directive() {
        let dialect = MySqlDialect::default();
        let settings = SharedSettings::default();
        let sql = "DELIMITER $$\nSELECT 1$$\nDELIMITER ;\nSELECT 2;";
        let tokens = Tokenizer::new(&dialect, sql)
            .with_settings(settings.clone())
            .with_whitespace(false)
            .tokenize();
        compare(
            vec![
                (KW, "DELIMITER"),
                (TokenKind::DELIMITER_VALUE, "$$"),
                (RESERVED, "SELECT"),
                (TokenKind::INTEGER, "1"),
                (TokenKind::DELIMITER, "$$"),
                (KW, "DELIMITER"),
                (TokenKind::DELIMITER_VALUE, ";"),
                (RESERVED, "SELECT"),
                (TokenKind::INTEGER, "2"),
                (TokenKind::DELIMITER, ";"),
            ],
            tokens,
        );
        assert_eq!(settings.delimiter(), ";");
    }

    #[test]
    fn tokenize_delimiter_glued_to_name() {
        let dialect = MySqlDialect::default();
        let settings = SharedSettings::new(SessionSettings::default().with_delimiter("$$"));
        let tokens = Tokenizer::new(&dialect, "SELECT a$$; b")
            .with_settings(settings)
            .with_whitespace(false)
            .tokenize();
        compare(
            vec![
                (RESERVED, "SELECT"),
                (TokenKind::NAME, "a"),
                (TokenKind::DELIMITER, "$$"),
                (TokenKind::SYMBOL, ";"),
                (TokenKind::NAME, "b"),
            ],
            tokens,
        );
    }

    #[test]
    fn tokenize_delimiter_word_mid_statement() {
        compare(
            vec![
                (RESERVED, "SELECT"),
                (KW, "DELIMITER"),
                (TokenKind::SYMBOL, ","),
                (TokenKind::NAME, "x"),
            ],
            lex("SELECT delimiter, x"),
        );
    }

    #[test]
    fn tokenize_delimiter_errors() {
        let tokens = lex("DELIMITER\nSELECT 1;");
        assert_eq!(
            tokens[1].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::MissingDelimiter)
        );
        assert_eq!(tokens[2].text, "SELECT");

        let tokens = lex("DELIMITER");
        assert_eq!(
            tokens[1].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::MissingDelimiter)
        );

        let tokens = lex("DELIMITER select");
        assert_eq!(
            tokens[1].error.as_ref().map(|e| e.kind),
            Some(LexErrorKind::ReservedDelimiter)
        );
    }

    #[test]
    fn tokenize_round_trip() {
        let dialect = MySqlDialect::default();
        let sql = "SELECT `a`, 'it''s', .5, x'0F' /*!80000 y */ -- c\n FROM t WHERE a<=>-1;";
        let tokens = Tokenizer::new(&dialect, sql).tokenize();
        assert!(tokens.iter().all(|t| t.error.is_none()));
        assert_eq!(serialize_tokens(&tokens), sql);
    }
}
