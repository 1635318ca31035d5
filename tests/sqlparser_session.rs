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

#![warn(clippy::all)]
//! Test scripts of several statements: splitting at delimiters, session
//! directives changing how later statements are read, and per-statement
//! error containment.

use matches::assert_matches;

use mysqlparser::ast::*;
use mysqlparser::dialect::{MariaDbDialect, MySqlDialect};
use mysqlparser::parser::{OpaqueStatementParser, Parser, ParserError, StatementParser};
use mysqlparser::session::Session;
use mysqlparser::settings::{SharedSettings, SqlMode};
use mysqlparser::test_utils::*;
use mysqlparser::tokenizer::LexErrorKind;
use pretty_assertions::assert_eq;

/// Parses `DO expr [, expr ...]` and keeps everything else opaque.
struct DoParser;

impl StatementParser for DoParser {
    fn parse_statement(
        &self,
        parser: &mut Parser,
        kind: StatementKind,
    ) -> Result<Statement, ParserError> {
        if kind != StatementKind::Do {
            return OpaqueStatementParser.parse_statement(parser, kind);
        }
        parser.expect_keyword(mysqlparser::keywords::Keyword::DO)?;
        let exprs = parser.parse_comma_separated(Parser::parse_expr)?;
        let exprs: Vec<String> = exprs.iter().map(ToString::to_string).collect();
        Ok(Statement::Opaque {
            kind,
            sql: format!("DO {}", exprs.join(", ")),
        })
    }
}

fn opaque(kind: StatementKind, sql: &str) -> Statement {
    Statement::Opaque {
        kind,
        sql: sql.to_string(),
    }
}

fn kinds(results: &[Result<Statement, ParserError>]) -> Vec<Option<StatementKind>> {
    results
        .iter()
        .map(|result| match result {
            Ok(Statement::Opaque { kind, .. }) => Some(*kind),
            Ok(Statement::Set { .. }) => Some(StatementKind::Set),
            Ok(Statement::SetNames { .. }) => Some(StatementKind::SetNames),
            Ok(Statement::SetCharacterSet { .. }) => Some(StatementKind::SetCharacterSet),
            Ok(Statement::Delimiter { .. }) => Some(StatementKind::Delimiter),
            Err(_) => None,
        })
        .collect()
}

#[test]
fn parse_script_statement_kinds() {
    let sql = "\
        USE db;\n\
        CREATE TABLE t (a INT);\n\
        INSERT INTO t VALUES (1);\n\
        SET NAMES utf8mb4;\n\
        START TRANSACTION;\n\
        UPDATE t SET a = 2;\n\
        COMMIT;\n\
        DROP PREPARE stmt;\n\
        frobnicate;";
    let results = all_dialects().parse_session(sql);
    assert_eq!(
        kinds(&results),
        vec![
            Some(StatementKind::Use),
            Some(StatementKind::CreateTable),
            Some(StatementKind::Insert),
            Some(StatementKind::SetNames),
            Some(StatementKind::StartTransaction),
            Some(StatementKind::Update),
            Some(StatementKind::Commit),
            Some(StatementKind::Deallocate),
            Some(StatementKind::Unknown),
        ]
    );
}

#[test]
fn parse_stored_program_with_custom_delimiter() {
    let sql = "DELIMITER //\n\
               CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW BEGIN SET NEW.a = 1; END//\n\
               DELIMITER ;\n\
               SHOW TRIGGERS;";
    let statements = all_dialects().parse_sql_statements(sql).unwrap();
    assert_eq!(
        statements,
        vec![
            Statement::Delimiter {
                delimiter: "//".to_string()
            },
            opaque(
                StatementKind::CreateTrigger,
                "CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW BEGIN SET NEW.a = 1; END"
            ),
            Statement::Delimiter {
                delimiter: ";".to_string()
            },
            opaque(StatementKind::Show, "SHOW TRIGGERS"),
        ]
    );
}

#[test]
fn parse_sql_mode_applies_to_following_statements() {
    let results = all_dialects()
        .parse_session("SET @x = 'a' || 'b'; SET sql_mode = 'PIPES_AS_CONCAT'; SET @y = 'a' || 'b'");
    let ops: Vec<BinaryOperator> = results
        .into_iter()
        .filter_map(|result| match result.unwrap() {
            Statement::Set { mut assignments } => match assignments.remove(0).value {
                Expr::BinaryOp { op, .. } => Some(op),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(ops, vec![BinaryOperator::Or, BinaryOperator::StringConcat]);
}

#[test]
fn parse_sql_mode_default_resets() {
    let dialect = MySqlDialect::default();
    let settings = SharedSettings::default();
    let session = Session::new(&dialect).with_settings(settings.clone());
    let results = session.parse("SET SESSION sql_mode = 'ANSI'; SET @@sql_mode = DEFAULT");
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(settings.sql_mode(), SqlMode::default());

    session.parse("SET LOCAL sql_mode = 'NO_BACKSLASH_ESCAPES'");
    assert!(settings.has_mode(SqlMode::NO_BACKSLASH_ESCAPES));
    session.parse("SET GLOBAL sql_mode = ''");
    assert!(settings.has_mode(SqlMode::NO_BACKSLASH_ESCAPES));
}

#[test]
fn parse_no_backslash_escapes_changes_string_lexing() {
    let results = all_dialects()
        .parse_session(r"SET @a = 'x\ny'; SET sql_mode = 'NO_BACKSLASH_ESCAPES'; SET @b = 'x\ny'");
    let values: Vec<String> = results
        .into_iter()
        .filter_map(|result| match result.unwrap() {
            Statement::Set { mut assignments } => match assignments.remove(0).value {
                Expr::Value(Value::SingleQuotedString(s)) => Some(s),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(values, vec!["x\ny".to_string(), "x\\ny".to_string()]);
}

#[test]
fn parse_charset_directives() {
    let dialect = MySqlDialect::default();
    let session = Session::new(&dialect);
    let results = session.parse("SET NAMES utf8mb4 COLLATE utf8mb4_bin; SET CHARSET latin1");
    assert_eq!(
        results[0].as_ref().unwrap().to_string(),
        "SET NAMES utf8mb4 COLLATE utf8mb4_bin"
    );
    assert_eq!(
        results[1].as_ref().unwrap().to_string(),
        "SET CHARACTER SET latin1"
    );
    let settings = session.settings().snapshot();
    assert_eq!(settings.charset.as_deref(), Some("latin1"));
    assert_eq!(settings.collation, None);
}

#[test]
fn parse_custom_statement_parser() {
    let dialect = MySqlDialect::default();
    let results = Session::new(&dialect)
        .with_statement_parser(&DoParser)
        .parse("DO 1+1, @a := 2; DO 1 +; SHOW TABLES");
    assert_eq!(results[0], Ok(opaque(StatementKind::Do, "DO 1 + 1, @a := 2")));
    assert_eq!(
        results[1].as_ref().unwrap_err().to_string(),
        "sql parser error: Expected: an expression, found: ; at Line: 1, Column: 24"
    );
    assert_eq!(results[2], Ok(opaque(StatementKind::Show, "SHOW TABLES")));
}

#[test]
fn parse_unfinished_statement_from_custom_parser() {
    let dialect = MySqlDialect::default();
    let results = Session::new(&dialect)
        .with_statement_parser(&DoParser)
        .parse("DO 1 2;");
    assert_matches!(&results[0], Err(ParserError::UnexpectedToken { found, .. }) if found == "2");
}

#[test]
fn parse_lex_errors_are_contained() {
    let results = all_dialects().parse_session("SELECT 1; SELECT 1.5e; SELECT /* open");
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(opaque(StatementKind::Select, "SELECT 1")));
    assert_matches!(&results[1], Err(ParserError::TokenizerError(_)));
    assert_matches!(&results[2], Err(ParserError::TokenizerError(_)));
}

#[test]
fn parse_failed_delimiter_directive_ends_its_statement() {
    let results = all_dialects().parse_session("DELIMITER\nSET @a = 1;\nSET @b = 2;");
    assert_eq!(results.len(), 3);
    assert_matches!(
        &results[0],
        Err(ParserError::TokenizerError(e)) if e.kind == LexErrorKind::MissingDelimiter
    );
    assert_eq!(results[1].as_ref().map(ToString::to_string), Ok("SET @a = 1".to_string()));
    assert_eq!(results[2].as_ref().map(ToString::to_string), Ok("SET @b = 2".to_string()));

    let results = all_dialects().parse_session("DELIMITER SELECT\nSET @a = 1;\nSET @b = 2;");
    assert_eq!(results.len(), 3);
    assert_matches!(
        &results[0],
        Err(ParserError::TokenizerError(e)) if e.kind == LexErrorKind::ReservedDelimiter
    );
    assert_eq!(results[1].as_ref().map(ToString::to_string), Ok("SET @a = 1".to_string()));
    assert_eq!(results[2].as_ref().map(ToString::to_string), Ok("SET @b = 2".to_string()));
}

#[test]
fn parse_set_with_unspaced_minus_after_null() {
    let results = all_dialects().parse_session("SET @a = NULL -1; SET @b = TRUE+1;");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().map(ToString::to_string), Ok("SET @a = NULL - 1".to_string()));
    assert_eq!(results[1].as_ref().map(ToString::to_string), Ok("SET @b = TRUE + 1".to_string()));
}

#[test]
fn parse_statement_in_conditional_comment() {
    let sql = "/*M!100100 SET @a = 1 */;";
    let mariadb = TestedDialects::new(vec![Box::new(MariaDbDialect::default())]);
    let mysql = TestedDialects::new(vec![Box::new(MySqlDialect::default())]);
    mariadb.one_statement_parses_to(sql, "SET @a = 1");
    assert_eq!(mysql.parse_sql_statements(sql).unwrap(), vec![]);
}
