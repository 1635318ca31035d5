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

//! The seam between expressions and the statement grammar: subqueries are
//! parsed by whatever [`SubqueryParser`] the [`Parser`] was given.

use super::*;

/// Parses the query inside `(...)`, `IN (...)`, `EXISTS (...)` and
/// `op ALL (...)`.
pub trait SubqueryParser {
    /// Parse a query starting at the cursor, stopping before the `)` that
    /// closes it.
    fn parse_subquery(&self, parser: &mut Parser) -> Result<Subquery, ParserError>;
}

/// Keeps a subquery as its source text.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpaqueSubqueryParser;

impl SubqueryParser for OpaqueSubqueryParser {
    fn parse_subquery(&self, parser: &mut Parser) -> Result<Subquery, ParserError> {
        let kind = parser.classify_statement();
        let sql = parser.parse_balanced_text()?;
        if sql.is_empty() {
            return parser.expected("a subquery", parser.peek_token());
        }
        Ok(Subquery(Box::new(Statement::Opaque { kind, sql })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use pretty_assertions::assert_eq;

    /// Accepts `SELECT <expr>` only.
    struct SelectExpr;

    impl SubqueryParser for SelectExpr {
        fn parse_subquery(&self, parser: &mut Parser) -> Result<Subquery, ParserError> {
            parser.expect_keyword(Keyword::SELECT)?;
            let expr = parser.parse_expr()?;
            Ok(Subquery(Box::new(Statement::Opaque {
                kind: StatementKind::Select,
                sql: format!("SELECT {expr}"),
            })))
        }
    }

    fn opaque(kind: StatementKind, sql: &str) -> Subquery {
        Subquery(Box::new(Statement::Opaque {
            kind,
            sql: sql.to_string(),
        }))
    }

    #[test]
    fn test_opaque_subquery_keeps_text() {
        let expr = all_dialects().verified_expr("a IN (SELECT b FROM t WHERE c IN (1, 2))");
        assert_eq!(
            expr,
            Expr::InSubquery {
                expr: Box::new(ident("a")),
                subquery: opaque(StatementKind::Select, "SELECT b FROM t WHERE c IN (1, 2)"),
                negated: false,
                spelling: Spelling::from("IN"),
            }
        );
    }

    #[test]
    fn test_nested_query_parentheses() {
        let expr = all_dialects().verified_expr("((SELECT 1) UNION (SELECT 2))");
        assert_eq!(
            expr,
            Expr::Subquery(opaque(
                StatementKind::Select,
                "(SELECT 1) UNION (SELECT 2)"
            ))
        );

        let expr = all_dialects().verified_expr("((SELECT 1) + 1)");
        assert_eq!(
            expr,
            Expr::Nested(Box::new(Expr::binary(
                Expr::Subquery(opaque(StatementKind::Select, "SELECT 1")),
                BinaryOperator::Plus,
                number("1"),
            )))
        );
    }

    #[test]
    fn test_placeholders_inside_opaque_subquery_are_counted() {
        let expr = all_dialects().verified_expr("(SELECT ?) + ?");
        match expr {
            Expr::BinaryOp { right, .. } => assert_eq!(*right, Expr::Placeholder(1)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_subquery() {
        let err = all_dialects().parse_expr("EXISTS (SELECT 1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "sql parser error: Expected: ')', found: EOF at Line: 1, Column: 17"
        );
    }

    #[test]
    fn test_custom_subquery_parser() {
        let dialect = crate::dialect::MySqlDialect::default();
        let expr = Parser::new(&dialect)
            .with_subquery_parser(&SelectExpr)
            .try_with_sql("x = ANY (SELECT 1 + 1)")
            .unwrap()
            .parse_expr()
            .unwrap();
        assert_eq!(expr.to_string(), "x = ANY (SELECT 1 + 1)");
        assert!(matches!(expr, Expr::Quantified { .. }));
    }
}
