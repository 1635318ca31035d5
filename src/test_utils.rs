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

/// This module contains internal utilities used for testing the library.
/// While technically public, the library's users are not supposed to rely
/// on this module, as it will change without notice.
//
// Integration tests (i.e. everything under `tests/`) import this
// via `mysqlparser::test_utils::*`.

use core::fmt::Debug;

use crate::ast::*;
use crate::dialect::*;
use crate::parser::{Parser, ParserError, ParserOptions};
use crate::session::Session;
use crate::settings::{SessionSettings, SharedSettings, SqlMode};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Tests use the methods on this struct to invoke the parser on one or
/// multiple dialects.
pub struct TestedDialects {
    pub dialects: Vec<Box<dyn Dialect>>,
    pub options: Option<ParserOptions>,
    /// Session settings every parse starts from.
    pub settings: SessionSettings,
}

impl TestedDialects {
    /// Create a TestedDialects with default options and the given dialects.
    pub fn new(dialects: Vec<Box<dyn Dialect>>) -> Self {
        Self {
            dialects,
            options: None,
            settings: SessionSettings::default(),
        }
    }

    pub fn new_with_options(dialects: Vec<Box<dyn Dialect>>, options: ParserOptions) -> Self {
        Self {
            dialects,
            options: Some(options),
            settings: SessionSettings::default(),
        }
    }

    /// Start every parse with `sql_mode` set to `mode`.
    pub fn with_sql_mode(mut self, mode: SqlMode) -> Self {
        self.settings.sql_mode = mode;
        self
    }

    fn new_parser<'a>(&self, dialect: &'a dyn Dialect) -> Parser<'a> {
        let parser =
            Parser::new(dialect).with_settings(SharedSettings::new(self.settings.clone()));
        if let Some(options) = &self.options {
            parser.with_options(options.clone())
        } else {
            parser
        }
    }

    /// Run the given function for all of `self.dialects`, assert that they
    /// return the same result, and return that result.
    pub fn one_of_identical_results<F, T: Debug + PartialEq>(&self, f: F) -> T
    where
        F: Fn(&dyn Dialect) -> T,
    {
        let parse_results = self.dialects.iter().map(|dialect| (dialect, f(&**dialect)));
        parse_results
            .fold(None, |s, (dialect, parsed)| {
                if let Some((prev_dialect, prev_parsed)) = s {
                    assert_eq!(
                        prev_parsed, parsed,
                        "Parse results with {prev_dialect:?} are different from {dialect:?}"
                    );
                }
                Some((dialect, parsed))
            })
            .expect("tested dialects cannot be empty")
            .1
    }

    pub fn run_parser_method<F, T: Debug + PartialEq>(&self, sql: &str, f: F) -> T
    where
        F: Fn(&mut Parser) -> T,
    {
        self.one_of_identical_results(|dialect| {
            let mut parser = self.new_parser(dialect).try_with_sql(sql).unwrap();
            f(&mut parser)
        })
    }

    /// Parses a single SQL string into multiple statements, ensuring
    /// the result is the same for all tested dialects.
    pub fn parse_sql_statements(&self, sql: &str) -> Result<Vec<Statement>, ParserError> {
        self.one_of_identical_results(|dialect| {
            self.session(dialect).parse(sql).into_iter().collect()
        })
    }

    /// Per-statement results of running `sql` through a [`Session`],
    /// ensuring they are the same for all tested dialects.
    pub fn parse_session(&self, sql: &str) -> Vec<Result<Statement, ParserError>> {
        self.one_of_identical_results(|dialect| self.session(dialect).parse(sql))
    }

    fn session<'a>(&self, dialect: &'a dyn Dialect) -> Session<'a> {
        Session::new(dialect)
            .with_settings(SharedSettings::new(self.settings.clone()))
            .with_options(self.options.clone().unwrap_or_default())
    }

    /// Ensures that `sql` parses as a single [Statement] for all tested
    /// dialects.
    ///
    /// If `canonical` is non empty,this function additionally asserts
    /// that:
    ///
    /// 1. parsing `sql` results in the same [`Statement`] as parsing
    ///    `canonical`.
    ///
    /// 2. re-serializing the result of parsing `sql` produces the same
    ///    `canonical` sql string
    pub fn one_statement_parses_to(&self, sql: &str, canonical: &str) -> Statement {
        let mut statements = self.parse_sql_statements(sql).expect(sql);
        assert_eq!(statements.len(), 1);
        if !canonical.is_empty() && sql != canonical {
            assert_eq!(self.parse_sql_statements(canonical).unwrap(), statements);
        }

        let only_statement = statements.pop().unwrap();

        if !canonical.is_empty() {
            assert_eq!(canonical, only_statement.to_string())
        }
        only_statement
    }

    /// Ensures that `sql` parses as a single [Statement], and that
    /// re-serializing the parse result produces the same `sql`
    /// string (is not modified after a serialization round-trip).
    pub fn verified_stmt(&self, sql: &str) -> Statement {
        self.one_statement_parses_to(sql, sql)
    }

    /// Parse `sql` as a whole expression, ensuring the result is the same
    /// for all tested dialects.
    pub fn parse_expr(&self, sql: &str) -> Result<Expr, ParserError> {
        self.run_parser_method(sql, |parser| {
            let expr = parser.parse_expr()?;
            if parser.at_statement_end() {
                Ok(expr)
            } else {
                parser.expected("end of expression", parser.peek_token())
            }
        })
    }

    /// Ensures that `sql` parses as an [`Expr`], and that
    /// re-serializing the parse result produces canonical
    pub fn expr_parses_to(&self, sql: &str, canonical: &str) -> Expr {
        let ast = self.parse_expr(sql).expect(sql);
        assert_eq!(canonical, &ast.to_string());
        ast
    }

    /// Ensures that `sql` parses as an expression, and that
    /// re-serializing the parse result produces the same `sql`
    /// string (is not modified after a serialization round-trip).
    pub fn verified_expr(&self, sql: &str) -> Expr {
        self.expr_parses_to(sql, sql)
    }
}

/// MySQL 5.7, MySQL 8.0 and MariaDB.
pub fn all_dialects() -> TestedDialects {
    TestedDialects::new(vec![
        Box::new(MySqlDialect::new(server_version(5, 7, 44))),
        Box::new(MySqlDialect::default()),
        Box::new(MariaDbDialect::default()),
    ])
}

/// The default MySQL 8.0 dialect only.
pub fn mysql() -> TestedDialects {
    TestedDialects::new(vec![Box::new(MySqlDialect::default())])
}

pub fn only<T>(v: impl IntoIterator<Item = T>) -> T {
    let mut iter = v.into_iter();
    if let (Some(item), None) = (iter.next(), iter.next()) {
        item
    } else {
        panic!("only called on collection without exactly one item")
    }
}

/// Creates an integer or decimal literal, kept as written
pub fn number(n: &str) -> Expr {
    if n.contains(['e', 'E']) {
        Expr::Value(Value::Float(n.to_string()))
    } else if n.contains('.') {
        Expr::Value(Value::Decimal(n.to_string()))
    } else {
        Expr::Value(Value::Integer(n.to_string()))
    }
}

pub fn string(s: &str) -> Expr {
    Expr::Value(Value::SingleQuotedString(s.to_string()))
}

pub fn ident(name: &str) -> Expr {
    Expr::column(name)
}

pub fn call(function: &str, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Function(Function {
        name: ObjectName(vec![Ident::new(function)]),
        args: FunctionArgs::List {
            distinct: false,
            args: args.into_iter().collect(),
        },
    })
}
