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

//! MySQL Parser
//!
//! A [`Parser`] owns the tokens of one statement and hands them out through
//! the cursor primitives in `tokens.rs`. Grammar rules that may fail without
//! consuming input go through [`Parser::accept`], [`Parser::peek`] and
//! [`Parser::maybe_parse`]; hard requirements go through [`Parser::expect`]
//! and fail with [`ParserError::UnexpectedToken`].

mod dispatch;
mod expr;
mod identifier;
mod keyword;
mod set;
mod subquery;
mod tokens;
mod value;

use core::fmt;

use log::debug;

pub use self::dispatch::{OpaqueStatementParser, StatementParser};
pub use self::subquery::{OpaqueSubqueryParser, SubqueryParser};

use crate::ast::*;
use crate::dialect::*;
use crate::keywords::Keyword;
use crate::session::Session;
use crate::settings::SharedSettings;
use crate::tokenizer::*;

#[macro_export]
macro_rules! parser_err {
    ($MSG:expr, $loc:expr) => {
        Err($crate::parser::ParserError::ParserError($MSG.to_string(), $loc))
    };
}

/// A token, keyword or construct that would have been accepted where
/// parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expected {
    /// Any token having a facet of the kind.
    Kind(TokenKind),
    Keyword(Keyword),
    /// A symbol or operator with this text.
    Symbol(String),
    /// A grammar construct, e.g. "an expression".
    Description(String),
}

impl Expected {
    /// Whether `token` satisfies this expectation.
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Expected::Kind(kind) => token.kind.intersects(*kind),
            Expected::Keyword(keyword) => token.is_keyword(*keyword),
            Expected::Symbol(text) => token.is_symbol(text),
            Expected::Description(_) => false,
        }
    }
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Expected::Kind(kind)
    }
}

impl From<Keyword> for Expected {
    fn from(keyword: Keyword) -> Self {
        Expected::Keyword(keyword)
    }
}

impl From<&str> for Expected {
    fn from(symbol: &str) -> Self {
        Expected::Symbol(symbol.to_string())
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{kind}"),
            Expected::Keyword(keyword) => write!(f, "{keyword}"),
            Expected::Symbol(symbol) => write!(f, "'{symbol}'"),
            Expected::Description(description) => f.write_str(description),
        }
    }
}

/// Write `items` as `X`, `X or Y`, or `one of X, Y or Z`.
fn write_alternatives(f: &mut fmt::Formatter, items: &[Expected]) -> fmt::Result {
    match items {
        [] => f.write_str("nothing"),
        [only] => write!(f, "{only}"),
        [init @ .., last] => {
            f.write_str("one of ")?;
            for (i, item) in init.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, " or {last}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// An `expect*` primitive met a token outside the acceptable set.
    UnexpectedToken {
        expected: Vec<Expected>,
        found: String,
        location: Location,
    },
    /// A construct that can not be parsed, e.g. a function call with a
    /// four-part name.
    ParserError(String, Location),
    TokenizerError(LexError),
    RecursionLimitExceeded,
}

impl From<LexError> for ParserError {
    fn from(e: LexError) -> Self {
        ParserError::TokenizerError(e)
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("sql parser error: ")?;
        match self {
            ParserError::UnexpectedToken {
                expected,
                found,
                location,
            } => {
                f.write_str("Expected: ")?;
                write_alternatives(f, expected)?;
                write!(f, ", found: {found}{location}")
            }
            ParserError::ParserError(message, location) => write!(f, "{message}{location}"),
            ParserError::TokenizerError(e) => write!(f, "{e}"),
            ParserError::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
        }
    }
}

impl std::error::Error for ParserError {}

// By default, allow expressions up to this deep before erroring
const DEFAULT_REMAINING_DEPTH: usize = 50;

mod recursion {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::ParserError;

    /// Tracks remaining recursion depth. This value is decremented on
    /// each call to [`RecursionCounter::try_decrease()`], when it reaches 0 an error will
    /// be returned.
    ///
    /// Note: Uses an [`std::rc::Rc`] and [`std::cell::Cell`] in order to satisfy the Rust
    /// borrow checker so the automatic [`DepthGuard`] decrement a
    /// reference to the counter.
    pub(crate) struct RecursionCounter {
        remaining_depth: Rc<Cell<usize>>,
    }

    impl RecursionCounter {
        /// Creates a [`RecursionCounter`] with the specified maximum
        /// depth
        pub fn new(remaining_depth: usize) -> Self {
            Self {
                remaining_depth: Rc::new(remaining_depth.into()),
            }
        }

        /// Decreases the remaining depth by 1.
        ///
        /// Returns [`Err`] if the remaining depth falls to 0.
        ///
        /// Returns a [`DepthGuard`] which will adds 1 to the
        /// remaining depth upon drop;
        pub fn try_decrease(&self) -> Result<DepthGuard, ParserError> {
            let old_value = self.remaining_depth.get();
            // ran out of space
            if old_value == 0 {
                Err(ParserError::RecursionLimitExceeded)
            } else {
                self.remaining_depth.set(old_value - 1);
                Ok(DepthGuard::new(Rc::clone(&self.remaining_depth)))
            }
        }
    }

    /// Guard that increases the remaining depth by 1 on drop
    pub struct DepthGuard {
        remaining_depth: Rc<Cell<usize>>,
    }

    impl DepthGuard {
        fn new(remaining_depth: Rc<Cell<usize>>) -> Self {
            Self { remaining_depth }
        }
    }

    impl Drop for DepthGuard {
        fn drop(&mut self) {
            let old_value = self.remaining_depth.get();
            self.remaining_depth.set(old_value + 1);
        }
    }
}

use recursion::RecursionCounter;

/// Options that control how the [`Parser`] parses SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting depth of expressions.
    pub recursion_limit: usize,
    /// Whether the last statement of the input may omit its delimiter.
    /// Defaults to `true`.
    pub trailing_delimiter_optional: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_REMAINING_DEPTH,
            trailing_delimiter_optional: true,
        }
    }
}

impl ParserOptions {
    /// Create a new [`ParserOptions`] instance with default values
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    /// Set if the final statement may end at the end of input instead of
    /// at a delimiter.
    ///
    /// ```
    /// # use mysqlparser::{parser::{Parser, ParserError, ParserOptions}, dialect::MySqlDialect};
    /// # fn main() -> Result<(), ParserError> {
    /// let dialect = MySqlDialect::default();
    /// let options = ParserOptions::new().with_trailing_delimiter_optional(false);
    /// let result = Parser::new(&dialect)
    ///   .with_options(options)
    ///   .parse_statements("SELECT 1; SELECT 2");
    /// assert!(result.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_trailing_delimiter_optional(mut self, optional: bool) -> Self {
        self.trailing_delimiter_optional = optional;
        self
    }
}

/// The parser of one statement, or of an expression.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    /// The index of the first unprocessed token in `self.tokens`
    index: usize,
    /// Token kinds skipped before every cursor operation
    skip: TokenKind,
    /// Returned for reads past the last token
    eof: Token,
    dialect: &'a dyn Dialect,
    settings: SharedSettings,
    subquery_parser: &'a dyn SubqueryParser,
    options: ParserOptions,
    /// Ensure the stack does not overflow by limiting recursion depth.
    recursion_counter: RecursionCounter,
    /// Placeholders (`?`) seen so far
    placeholders: usize,
}

static OPAQUE_SUBQUERIES: OpaqueSubqueryParser = OpaqueSubqueryParser;

impl<'a> Parser<'a> {
    /// Create a parser for a [`Dialect`]
    ///
    /// See also [`Parser::parse_sql`]
    ///
    /// Example:
    /// ```
    /// # use mysqlparser::{parser::{Parser, ParserError}, dialect::MySqlDialect};
    /// # fn main() -> Result<(), ParserError> {
    /// let dialect = MySqlDialect::default();
    /// let expr = Parser::new(&dialect)
    ///   .try_with_sql("a + 1 > b")?
    ///   .parse_expr()?;
    /// assert_eq!(expr.to_string(), "a + 1 > b");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            tokens: vec![],
            index: 0,
            skip: TokenKind::TRIVIA,
            eof: Token::eof(Location::default()),
            dialect,
            settings: SharedSettings::default(),
            subquery_parser: &OPAQUE_SUBQUERIES,
            options: ParserOptions::default(),
            recursion_counter: RecursionCounter::new(DEFAULT_REMAINING_DEPTH),
            placeholders: 0,
        }
    }

    /// Specify the maximum recursion limit while parsing.
    ///
    /// [`Parser`] prevents stack overflows by returning
    /// [`ParserError::RecursionLimitExceeded`] if the parser exceeds
    /// this depth while processing the query.
    ///
    /// Example:
    /// ```
    /// # use mysqlparser::{parser::{Parser, ParserError}, dialect::MySqlDialect};
    /// # fn main() -> Result<(), ParserError> {
    /// let dialect = MySqlDialect::default();
    /// let result = Parser::new(&dialect)
    ///   .with_recursion_limit(1)
    ///   .try_with_sql("((1))")?
    ///   .parse_expr();
    /// assert_eq!(result, Err(ParserError::RecursionLimitExceeded));
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.options.recursion_limit = recursion_limit;
        self.recursion_counter = RecursionCounter::new(recursion_limit);
        self
    }

    /// Specify additional parser options
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.recursion_counter = RecursionCounter::new(options.recursion_limit);
        self.options = options;
        self
    }

    /// Parse against the given session settings. Directives such as
    /// `SET sql_mode` write back into them.
    pub fn with_settings(mut self, settings: SharedSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Resolve subqueries with `subquery_parser` instead of keeping them as
    /// opaque text.
    pub fn with_subquery_parser(mut self, subquery_parser: &'a dyn SubqueryParser) -> Self {
        self.subquery_parser = subquery_parser;
        self
    }

    /// Reset this parser to parse the specified token stream
    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|t| t.location.after(t.source_text()))
            .unwrap_or_default();
        self.tokens = tokens;
        self.eof = Token::eof(end);
        self.index = 0;
        self.placeholders = 0;
        self
    }

    /// Tokenize the sql string and sets this [`Parser`]'s state to
    /// parse the resulting tokens
    ///
    /// Returns an error if there was an error tokenizing the SQL string.
    ///
    /// See example on [`Parser::new()`] for an example
    pub fn try_with_sql(self, sql: &str) -> Result<Self, ParserError> {
        debug!("Parsing sql '{}'...", sql);
        let tokens = Tokenizer::new(self.dialect, sql)
            .with_settings(self.settings.clone())
            .tokenize_strict()?;
        Ok(self.with_tokens(tokens))
    }

    /// Parse potentially multiple statements, failing on the first error
    ///
    /// Example
    /// ```
    /// # use mysqlparser::{parser::{Parser, ParserError}, dialect::MySqlDialect};
    /// # fn main() -> Result<(), ParserError> {
    /// let dialect = MySqlDialect::default();
    /// let statements = Parser::new(&dialect)
    ///   .parse_statements("SELECT a FROM foo; SET NAMES utf8mb4")?;
    /// assert_eq!(statements.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_statements(&self, sql: &str) -> Result<Vec<Statement>, ParserError> {
        Session::new(self.dialect)
            .with_settings(self.settings.clone())
            .with_options(self.options.clone())
            .with_subquery_parser(self.subquery_parser)
            .parse(sql)
            .into_iter()
            .collect()
    }

    /// Convenience method to parse a string with one or more SQL
    /// statements into produce an Abstract Syntax Tree (AST).
    ///
    /// Example
    /// ```
    /// # use mysqlparser::{parser::{Parser, ParserError}, dialect::MySqlDialect};
    /// # fn main() -> Result<(), ParserError> {
    /// let dialect = MySqlDialect::default();
    /// let statements = Parser::parse_sql(
    ///   &dialect, "DELIMITER $$\nSELECT 1$$\nDELIMITER ;\nSELECT 2;"
    /// )?;
    /// assert_eq!(statements.len(), 4);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_sql(dialect: &dyn Dialect, sql: &str) -> Result<Vec<Statement>, ParserError> {
        Parser::new(dialect).parse_statements(sql)
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Consume the parser and return its underlying token buffer
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recursion_limit() {
        let sql = "(".repeat(20) + "1" + &")".repeat(20);
        let dialect = MySqlDialect::default();
        let result = Parser::new(&dialect)
            .with_recursion_limit(10)
            .try_with_sql(&sql)
            .and_then(|mut parser| parser.parse_expr());
        assert_eq!(result, Err(ParserError::RecursionLimitExceeded));

        let result = Parser::new(&dialect)
            .with_recursion_limit(30)
            .try_with_sql(&sql)
            .and_then(|mut parser| parser.parse_expr());
        assert!(result.is_ok());
    }

    #[test]
    fn test_recursion_counter_recovers() {
        let dialect = MySqlDialect::default();
        let mut parser = Parser::new(&dialect)
            .with_recursion_limit(5)
            .try_with_sql("(((1))) + (((2)))")
            .unwrap();
        assert_eq!(parser.parse_expr().unwrap().to_string(), "(((1))) + (((2)))");
    }

    #[test]
    fn test_eof_location_after_multiline_token() {
        let dialect = MySqlDialect::default();
        let mut parser = Parser::new(&dialect)
            .try_with_sql("1 /* x\nyz */")
            .unwrap();
        parser.next_token();
        assert!(parser.peek_token().is_eof());
        assert_eq!(parser.peek_token().location, Location::new(12, 2, 6));

        let mut parser = Parser::new(&dialect).try_with_sql("'a\nb' ").unwrap();
        parser.next_token();
        assert_eq!(parser.peek_token().location, Location::new(7, 2, 4));
    }

    #[test]
    fn test_error_display() {
        let err = ParserError::UnexpectedToken {
            expected: vec![
                Expected::Kind(TokenKind::NAME),
                Expected::Keyword(Keyword::SELECT),
                Expected::Symbol("(".into()),
            ],
            found: "+".into(),
            location: Location::new(7, 1, 8),
        };
        assert_eq!(
            err.to_string(),
            "sql parser error: Expected: one of NAME, SELECT or '(', found: + at Line: 1, Column: 8"
        );
        let err = ParserError::UnexpectedToken {
            expected: vec![Expected::Description("an expression".into())],
            found: "EOF".into(),
            location: Location::default(),
        };
        assert_eq!(
            err.to_string(),
            "sql parser error: Expected: an expression, found: EOF"
        );
    }

    #[test]
    fn test_tokenizer_error_is_reported() {
        let dialect = MySqlDialect::default();
        let err = Parser::new(&dialect).try_with_sql("SELECT 'abc").err();
        assert!(matches!(
            err,
            Some(ParserError::TokenizerError(LexError {
                kind: LexErrorKind::UnterminatedString,
                ..
            }))
        ));
    }
}
