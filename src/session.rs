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

//! Multi-statement driver.
//!
//! A [`Session`] lexes a script one statement at a time: the tokenizer is
//! pulled up to the next delimiter, that statement is parsed, and only then
//! is the following text lexed. `DELIMITER` and `SET sql_mode` directives
//! therefore change how everything after them is read.

use log::debug;

use crate::ast::Statement;
use crate::dialect::Dialect;
use crate::parser::{
    OpaqueStatementParser, OpaqueSubqueryParser, Parser, ParserError, ParserOptions,
    StatementParser, SubqueryParser,
};
use crate::settings::SharedSettings;
use crate::tokenizer::{Token, TokenKind, Tokenizer};

static OPAQUE_STATEMENTS: OpaqueStatementParser = OpaqueStatementParser;
static OPAQUE_SUBQUERIES: OpaqueSubqueryParser = OpaqueSubqueryParser;

/// Parses a script of statements under one set of session settings.
///
/// ```
/// # use mysqlparser::{dialect::MySqlDialect, session::Session};
/// let dialect = MySqlDialect::default();
/// let results = Session::new(&dialect).parse("SELECT 1; SELECT 'oops; SELECT 3");
/// assert_eq!(results.len(), 2);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub struct Session<'a> {
    dialect: &'a dyn Dialect,
    settings: SharedSettings,
    options: ParserOptions,
    subquery_parser: &'a dyn SubqueryParser,
    statement_parser: &'a dyn StatementParser,
}

impl<'a> Session<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            settings: SharedSettings::default(),
            options: ParserOptions::default(),
            subquery_parser: &OPAQUE_SUBQUERIES,
            statement_parser: &OPAQUE_STATEMENTS,
        }
    }

    /// Start from the given settings. They are updated in place as
    /// directives are parsed.
    pub fn with_settings(mut self, settings: SharedSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_subquery_parser(mut self, subquery_parser: &'a dyn SubqueryParser) -> Self {
        self.subquery_parser = subquery_parser;
        self
    }

    pub fn with_statement_parser(mut self, statement_parser: &'a dyn StatementParser) -> Self {
        self.statement_parser = statement_parser;
        self
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Parse every statement of `sql`. A statement that fails to lex or
    /// parse yields an error in its slot; the statements after it are
    /// still parsed.
    pub fn parse(&self, sql: &str) -> Vec<Result<Statement, ParserError>> {
        let mut tokenizer = Tokenizer::new(self.dialect, sql).with_settings(self.settings.clone());
        let mut results = vec![];
        while let Some(chunk) = next_chunk(&mut tokenizer) {
            if chunk
                .iter()
                .all(|token| token.kind.intersects(TokenKind::TRIVIA | TokenKind::DELIMITER))
            {
                continue;
            }
            let result = self.parse_chunk(chunk);
            if let Err(e) = &result {
                debug!("statement {} failed: {}", results.len(), e);
            }
            results.push(result);
        }
        results
    }

    /// Parse every statement of `sql`, failing on the first error.
    pub fn parse_all(&self, sql: &str) -> Result<Vec<Statement>, ParserError> {
        self.parse(sql).into_iter().collect()
    }

    fn parse_chunk(&self, chunk: Vec<Token>) -> Result<Statement, ParserError> {
        if let Some(error) = chunk.iter().find_map(|token| token.error.clone()) {
            return Err(ParserError::TokenizerError(error));
        }
        Parser::new(self.dialect)
            .with_settings(self.settings.clone())
            .with_options(self.options.clone())
            .with_subquery_parser(self.subquery_parser)
            .with_tokens(chunk)
            .parse_statement(self.statement_parser)
    }
}

/// Pull tokens up to and including the next token that ends a statement.
fn next_chunk(tokens: &mut impl Iterator<Item = Token>) -> Option<Vec<Token>> {
    let mut chunk = vec![];
    for token in tokens.by_ref() {
        let end = token.ends_statement();
        chunk.push(token);
        if end {
            break;
        }
    }
    if chunk.is_empty() {
        None
    } else {
        Some(chunk)
    }
}
