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

//! Token, token kinds and lexer errors.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::keywords::Keyword;

/// A set of token facets.
///
/// A token usually carries several facets at once, e.g. `LIKE` is
/// `NAME | KEYWORD | RESERVED | OPERATOR_KEYWORD`. Grammar code tests
/// membership with [`TokenKind::intersects`] or [`TokenKind::contains`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenKind(u32);

macro_rules! token_kinds {
    ($($(#[$doc:meta])* $name:ident = $bit:expr,)*) => {
        impl TokenKind {
            $($(#[$doc])* pub const $name: TokenKind = TokenKind(1 << $bit);)*

            const NAMES: &'static [(&'static str, TokenKind)] = &[
                $((stringify!($name), TokenKind::$name),)*
            ];
        }
    };
}

token_kinds! {
    /// Run of spaces, tabs and newlines.
    WHITESPACE = 0,
    /// Line or block comment, including the markers of a live conditional comment.
    COMMENT = 1,
    /// Opening `/*!NNNNN` or closing `*/` of a live conditional comment.
    CONDITIONAL = 2,
    /// The current statement delimiter.
    DELIMITER = 3,
    /// New delimiter captured after a `DELIMITER` directive.
    DELIMITER_VALUE = 4,
    /// Structural character: `( ) , ; . [ ] { } :`.
    SYMBOL = 5,
    OPERATOR = 6,
    /// Identifier shaped: bare words, keywords and quoted identifiers.
    NAME = 7,
    /// Identifier written in backticks (or double quotes in `ANSI_QUOTES` mode).
    QUOTED = 8,
    KEYWORD = 9,
    RESERVED = 10,
    OPERATOR_KEYWORD = 11,
    STRING = 12,
    /// `N'...'` national character string.
    NATIONAL = 13,
    INTEGER = 14,
    DECIMAL = 15,
    FLOAT = 16,
    /// `0x1F` or `X'1F'`.
    HEX = 17,
    /// `0b101` or `B'101'`.
    BIT = 18,
    UUID = 19,
    IPV4 = 20,
    /// `@name`, `@'name'`.
    VARIABLE = 21,
    /// `@@name`.
    SYSTEM_VARIABLE = 22,
    /// `?`
    PLACEHOLDER = 23,
    /// Text the lexer could not make sense of, see [`Token::error`].
    INVALID = 24,
    /// Past the last token.
    EOF = 25,
}

impl TokenKind {
    pub const NONE: TokenKind = TokenKind(0);
    /// Whitespace and comments, skipped by the parser by default.
    pub const TRIVIA: TokenKind = TokenKind(Self::WHITESPACE.0 | Self::COMMENT.0);
    pub const NUMBER: TokenKind = TokenKind(Self::INTEGER.0 | Self::DECIMAL.0 | Self::FLOAT.0);
    pub const LITERAL: TokenKind = TokenKind(
        Self::STRING.0 | Self::NUMBER.0 | Self::HEX.0 | Self::BIT.0 | Self::UUID.0 | Self::IPV4.0,
    );

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every facet of `other` is present.
    pub const fn contains(self, other: TokenKind) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any facet of `other` is present.
    pub const fn intersects(self, other: TokenKind) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: TokenKind) -> TokenKind {
        TokenKind(self.0 | other.0)
    }

    pub const fn without(self, other: TokenKind) -> TokenKind {
        TokenKind(self.0 & !other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TokenKind {
    type Output = TokenKind;

    fn bitor(self, rhs: TokenKind) -> TokenKind {
        self.union(rhs)
    }
}

impl BitOrAssign for TokenKind {
    fn bitor_assign(&mut self, rhs: TokenKind) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut delim = "";
        for (name, kind) in Self::NAMES {
            if self.contains(*kind) {
                write!(f, "{delim}{name}")?;
                delim = "|";
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TokenKind({self})")
    }
}

/// Position of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// Line number, starting from 1
    pub line: u64,
    /// Line column, starting from 1
    pub column: u64,
}

impl Location {
    pub fn new(offset: usize, line: u64, column: u64) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The location just past `text` when it starts here.
    pub fn after(&self, text: &str) -> Location {
        let offset = self.offset + text.len();
        match text.rfind('\n') {
            Some(newline) => Location::new(
                offset,
                self.line + text.matches('\n').count() as u64,
                text[newline + 1..].chars().count() as u64 + 1,
            ),
            None => Location::new(offset, self.line, self.column + text.chars().count() as u64),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 {
            return Ok(());
        }
        write!(f, " at Line: {}, Column: {}", self.line, self.column)
    }
}

/// What went wrong while lexing an [`TokenKind::INVALID`] token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LexErrorKind {
    /// `1.5e`, `X'1G'`, `B'102'`
    MalformedNumber,
    UnterminatedString,
    UnterminatedComment,
    /// Control character or a character that starts no token.
    InvalidCharacter,
    /// `/*` inside a block comment.
    NestedComment,
    /// `DELIMITER` without a new delimiter on the same line.
    MissingDelimiter,
    /// `DELIMITER` followed by a reserved word.
    ReservedDelimiter,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            LexErrorKind::MalformedNumber => "malformed number",
            LexErrorKind::UnterminatedString => "string not finished",
            LexErrorKind::UnterminatedComment => "comment not finished",
            LexErrorKind::InvalidCharacter => "invalid character",
            LexErrorKind::NestedComment => "nested comments are not supported",
            LexErrorKind::MissingDelimiter => "missing delimiter",
            LexErrorKind::ReservedDelimiter => "reserved word used as delimiter",
        })
    }
}

/// Lexer error, attached to the [`TokenKind::INVALID`] token it produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub location: Location,
}

impl LexError {
    pub fn new(kind: LexErrorKind, message: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}{}", self.kind, self.message, self.location)
    }
}

impl std::error::Error for LexError {}

/// A lexed token. Tokens are never modified once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Normalized value: unquoted and unescaped strings and names,
    /// upper-case keywords, `0.5` for `.5`.
    pub text: String,
    /// Source text, when it differs from `text`.
    pub original: Option<String>,
    pub location: Location,
    /// Guard of the conditional comment the token was lexed in, as written
    /// after `/*`, e.g. `!80002` or `M!100100`.
    pub conditional: Option<String>,
    pub error: Option<LexError>,
    /// The keyword this token spells, `NoKeyword` otherwise.
    pub keyword: Keyword,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: Location) -> Self {
        Token {
            kind,
            text: text.into(),
            original: None,
            location,
            conditional: None,
            error: None,
            keyword: Keyword::NoKeyword,
        }
    }

    /// The synthetic token returned past the end of input.
    pub fn eof(location: Location) -> Self {
        Token::new(TokenKind::EOF, "", location)
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        let original = original.into();
        if original != self.text {
            self.original = Some(original);
        }
        self
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keyword = keyword;
        self
    }

    pub fn with_error(mut self, error: LexError) -> Self {
        self.kind = TokenKind::INVALID;
        self.error = Some(error);
        self
    }

    /// Exact source text of the token.
    pub fn source_text(&self) -> &str {
        self.original.as_deref().unwrap_or(&self.text)
    }

    /// Whether the token has any facet of `kind`.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind.intersects(kind)
    }

    pub fn is_eof(&self) -> bool {
        self.kind.contains(TokenKind::EOF)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword == keyword && keyword != Keyword::NoKeyword
    }

    /// Whether the token is the symbol or operator `text`.
    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind.intersects(TokenKind::SYMBOL | TokenKind::OPERATOR) && self.text == text
    }

    /// Whether the token closes a statement: a delimiter, the new delimiter
    /// of a `DELIMITER` directive, or the error of a failed directive.
    pub fn ends_statement(&self) -> bool {
        self.kind
            .intersects(TokenKind::DELIMITER | TokenKind::DELIMITER_VALUE)
            || matches!(
                self.error.as_ref().map(|e| e.kind),
                Some(LexErrorKind::MissingDelimiter | LexErrorKind::ReservedDelimiter)
            )
    }

    /// Whether the token can name an object without quoting.
    pub fn is_bare_name(&self) -> bool {
        self.kind.contains(TokenKind::NAME)
            && !self.kind.intersects(TokenKind::RESERVED | TokenKind::QUOTED)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_eof() {
            return f.write_str("EOF");
        }
        f.write_str(self.source_text())
    }
}
