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

//! Directives that change the session: `DELIMITER` and `SET`.

use log::warn;

use super::*;

use crate::settings::SqlMode;

impl<'a> Parser<'a> {
    /// Parse `DELIMITER <value>`. The lexer has already switched to the new
    /// delimiter; the parser's settings are updated too.
    pub fn parse_delimiter(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::DELIMITER)?;
        let token = self.peek_token();
        if let Some(error) = &token.error {
            return Err(ParserError::TokenizerError(error.clone()));
        }
        let value = self.expect(TokenKind::DELIMITER_VALUE, None)?;
        debug!("delimiter: {}", value.text);
        self.settings.set_delimiter(value.text.clone());
        Ok(Statement::Delimiter {
            delimiter: value.text,
        })
    }

    /// Parse a `SET` statement: variable assignments, `SET NAMES` or
    /// `SET CHARACTER SET`. A session `sql_mode` assignment takes effect
    /// immediately.
    pub fn parse_set(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword(Keyword::SET)?;
        if self.parse_keyword(Keyword::NAMES) {
            return self.parse_set_names();
        }
        if self.parse_keywords(&[Keyword::CHARACTER, Keyword::SET])
            || self.parse_keyword(Keyword::CHARSET)
        {
            return self.parse_set_character_set();
        }

        let assignments = self.parse_comma_separated(Parser::parse_set_assignment)?;
        self.apply_sql_mode(&assignments);
        Ok(Statement::Set { assignments })
    }

    /// Parse `target {= | :=} value`.
    pub fn parse_set_assignment(&mut self) -> Result<SetAssignment, ParserError> {
        let target = self.parse_set_target()?;
        self.expect_any(&[Expected::from("="), Expected::from(":=")])?;
        let value = self.parse_expr()?;
        Ok(SetAssignment { target, value })
    }

    fn parse_set_target(&mut self) -> Result<SetTarget, ParserError> {
        if let Some(token) = self.accept(TokenKind::VARIABLE, None) {
            return Ok(SetTarget::UserVariable(Self::user_variable(token)));
        }
        if let Some(token) = self.accept(TokenKind::SYSTEM_VARIABLE, None) {
            let (scope, name) = self.parse_system_variable(token)?;
            return Ok(SetTarget::SystemVariable {
                scope,
                name,
                sigil: true,
            });
        }
        let scope_follows = Self::is_identifier_token(self.peek_nth_token(1));
        let scope = if scope_follows {
            self.parse_keyword_enum::<VariableScope>()
        } else {
            None
        };
        Ok(SetTarget::SystemVariable {
            scope,
            name: self.parse_identifier()?,
            sigil: false,
        })
    }

    /// Apply assignments to the session `sql_mode`. A scope keyword carries
    /// over to the following assignments written without one.
    fn apply_sql_mode(&self, assignments: &[SetAssignment]) {
        let mut carried = None;
        for assignment in assignments {
            let target = &assignment.target;
            if let SetTarget::SystemVariable {
                scope: Some(scope),
                sigil: false,
                ..
            } = target
            {
                carried = Some(*scope);
            }
            let carried_global = matches!(
                target,
                SetTarget::SystemVariable {
                    scope: None,
                    sigil: false,
                    ..
                }
            ) && carried.map_or(false, |scope| !scope.affects_session());
            if !target.is_session_sql_mode() || carried_global {
                continue;
            }
            let sql_mode = match &assignment.value {
                Expr::Value(Value::SingleQuotedString(modes))
                | Expr::Value(Value::IntroducedString { value: modes, .. }) => {
                    SqlMode::parse(modes)
                }
                Expr::Value(Value::Default) => SqlMode::default(),
                Expr::Identifier(ObjectName(parts)) if parts.len() == 1 => {
                    SqlMode::parse(&parts[0].value)
                }
                other => {
                    warn!("sql_mode left unchanged, can not evaluate: {other}");
                    continue;
                }
            };
            debug!("sql_mode: {:?}", sql_mode);
            self.settings.set_sql_mode(sql_mode);
        }
    }

    /// Parse the rest of `SET NAMES {charset [COLLATE collation] | DEFAULT}`.
    fn parse_set_names(&mut self) -> Result<Statement, ParserError> {
        let (charset, collation) = if self.parse_keyword(Keyword::DEFAULT) {
            (None, None)
        } else {
            let charset = self.parse_charset_name()?;
            let collation = if self.parse_keyword(Keyword::COLLATE) {
                Some(self.parse_charset_name()?)
            } else {
                None
            };
            (Some(charset), collation)
        };
        self.settings.update(|settings| {
            settings.charset = charset.as_ref().map(|c| c.value.clone());
            settings.collation = collation.as_ref().map(|c| c.value.clone());
        });
        Ok(Statement::SetNames { charset, collation })
    }

    /// Parse the rest of `SET {CHARACTER SET | CHARSET} {charset | DEFAULT}`.
    fn parse_set_character_set(&mut self) -> Result<Statement, ParserError> {
        let charset = if self.parse_keyword(Keyword::DEFAULT) {
            None
        } else {
            Some(self.parse_charset_name()?)
        };
        self.settings.update(|settings| {
            settings.charset = charset.as_ref().map(|c| c.value.clone());
            settings.collation = None;
        });
        Ok(Statement::SetCharacterSet { charset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SessionSettings, SharedSettings};
    use crate::test_utils::*;
    use pretty_assertions::assert_eq;

    fn parse_set_with(settings: &SharedSettings, sql: &str) -> Statement {
        let dialect = crate::dialect::MySqlDialect::default();
        Parser::new(&dialect)
            .with_settings(settings.clone())
            .try_with_sql(sql)
            .unwrap()
            .parse_set()
            .unwrap()
    }

    #[test]
    fn test_set_assignments() {
        let stmt = all_dialects().run_parser_method(
            "SET @a := 1, GLOBAL max_connections = 10, @@session.autocommit = ON",
            |parser| parser.parse_set().unwrap(),
        );
        assert_eq!(
            stmt,
            Statement::Set {
                assignments: vec![
                    SetAssignment {
                        target: SetTarget::UserVariable(Ident::new("a")),
                        value: number("1"),
                    },
                    SetAssignment {
                        target: SetTarget::SystemVariable {
                            scope: Some(VariableScope::Global),
                            name: Ident::new("max_connections"),
                            sigil: false,
                        },
                        value: number("10"),
                    },
                    SetAssignment {
                        target: SetTarget::SystemVariable {
                            scope: Some(VariableScope::Session),
                            name: Ident::new("autocommit"),
                            sigil: true,
                        },
                        value: Expr::Value(Value::On),
                    },
                ],
            }
        );
        assert_eq!(
            stmt.to_string(),
            "SET @a = 1, GLOBAL max_connections = 10, @@SESSION.autocommit = ON"
        );
    }

    #[test]
    fn test_set_sql_mode_updates_settings() {
        let settings = SharedSettings::default();
        parse_set_with(&settings, "SET sql_mode = 'ANSI_QUOTES,PIPES_AS_CONCAT'");
        assert!(settings.has_mode(SqlMode::ANSI_QUOTES));
        assert!(settings.has_mode(SqlMode::PIPES_AS_CONCAT));

        parse_set_with(&settings, "SET SESSION sql_mode = DEFAULT");
        assert_eq!(settings.sql_mode(), SqlMode::default());

        parse_set_with(&settings, "SET @@sql_mode = TRADITIONAL");
        assert_eq!(settings.sql_mode(), SqlMode::TRADITIONAL);
    }

    #[test]
    fn test_global_sql_mode_leaves_session_alone() {
        let settings = SharedSettings::default();
        parse_set_with(&settings, "SET GLOBAL sql_mode = 'ANSI'");
        parse_set_with(&settings, "SET GLOBAL a = 1, sql_mode = 'ANSI'");
        parse_set_with(&settings, "SET @@global.sql_mode = 'ANSI'");
        assert_eq!(settings.sql_mode(), SqlMode::NONE);

        parse_set_with(&settings, "SET @sql_mode = 'ANSI'");
        assert_eq!(settings.sql_mode(), SqlMode::NONE);
    }

    #[test]
    fn test_unevaluable_sql_mode_is_ignored() {
        let settings =
            SharedSettings::new(SessionSettings::default().with_sql_mode(SqlMode::ANSI_QUOTES));
        parse_set_with(&settings, "SET sql_mode = CONCAT(@@sql_mode, ',IGNORE_SPACE')");
        assert_eq!(settings.sql_mode(), SqlMode::ANSI_QUOTES);
    }

    #[test]
    fn test_set_names() {
        let settings = SharedSettings::default();
        let stmt = parse_set_with(&settings, "SET NAMES utf8mb4 COLLATE utf8mb4_bin");
        assert_eq!(stmt.to_string(), "SET NAMES utf8mb4 COLLATE utf8mb4_bin");
        assert_eq!(settings.borrow().charset.as_deref(), Some("utf8mb4"));
        assert_eq!(settings.borrow().collation.as_deref(), Some("utf8mb4_bin"));

        let stmt = parse_set_with(&settings, "SET CHARSET latin1");
        assert_eq!(
            stmt,
            Statement::SetCharacterSet {
                charset: Some(Ident::new("latin1"))
            }
        );
        assert_eq!(settings.borrow().charset.as_deref(), Some("latin1"));
        assert_eq!(settings.borrow().collation, None);

        parse_set_with(&settings, "SET NAMES DEFAULT");
        assert_eq!(settings.borrow().charset, None);
    }

    #[test]
    fn test_delimiter() {
        let stmt = all_dialects().run_parser_method("DELIMITER $$", |parser| {
            let stmt = parser.parse_delimiter().unwrap();
            assert_eq!(parser.settings().delimiter(), "$$");
            stmt
        });
        assert_eq!(
            stmt,
            Statement::Delimiter {
                delimiter: "$$".to_string()
            }
        );
    }
}
