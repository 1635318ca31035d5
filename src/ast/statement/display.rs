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

use super::*;

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::With => "WITH",
            StatementKind::Values => "VALUES",
            StatementKind::Table => "TABLE",
            StatementKind::Insert => "INSERT",
            StatementKind::Replace => "REPLACE",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::CreateTable => "CREATE TABLE",
            StatementKind::CreateView => "CREATE VIEW",
            StatementKind::CreateFunction => "CREATE FUNCTION",
            StatementKind::CreateProcedure => "CREATE PROCEDURE",
            StatementKind::CreateTrigger => "CREATE TRIGGER",
            StatementKind::CreateEvent => "CREATE EVENT",
            StatementKind::CreateIndex => "CREATE INDEX",
            StatementKind::CreateDatabase => "CREATE DATABASE",
            StatementKind::CreateUser => "CREATE USER",
            StatementKind::CreateRole => "CREATE ROLE",
            StatementKind::AlterTable => "ALTER TABLE",
            StatementKind::AlterView => "ALTER VIEW",
            StatementKind::AlterDatabase => "ALTER DATABASE",
            StatementKind::AlterUser => "ALTER USER",
            StatementKind::AlterEvent => "ALTER EVENT",
            StatementKind::AlterFunction => "ALTER FUNCTION",
            StatementKind::AlterProcedure => "ALTER PROCEDURE",
            StatementKind::Drop => "DROP",
            StatementKind::Rename => "RENAME",
            StatementKind::Truncate => "TRUNCATE",
            StatementKind::Set => "SET",
            StatementKind::SetNames => "SET NAMES",
            StatementKind::SetCharacterSet => "SET CHARACTER SET",
            StatementKind::SetTransaction => "SET TRANSACTION",
            StatementKind::SetPassword => "SET PASSWORD",
            StatementKind::SetRole => "SET ROLE",
            StatementKind::Delimiter => "DELIMITER",
            StatementKind::Use => "USE",
            StatementKind::Show => "SHOW",
            StatementKind::Explain => "EXPLAIN",
            StatementKind::StartTransaction => "START TRANSACTION",
            StatementKind::Commit => "COMMIT",
            StatementKind::Rollback => "ROLLBACK",
            StatementKind::Savepoint => "SAVEPOINT",
            StatementKind::Grant => "GRANT",
            StatementKind::Revoke => "REVOKE",
            StatementKind::Call => "CALL",
            StatementKind::Do => "DO",
            StatementKind::Lock => "LOCK",
            StatementKind::Unlock => "UNLOCK",
            StatementKind::Flush => "FLUSH",
            StatementKind::Kill => "KILL",
            StatementKind::TableMaintenance => "table maintenance",
            StatementKind::Prepare => "PREPARE",
            StatementKind::Execute => "EXECUTE",
            StatementKind::Deallocate => "DEALLOCATE",
            StatementKind::Load => "LOAD",
            StatementKind::Handler => "HANDLER",
            StatementKind::Unknown => "unknown statement",
        })
    }
}

impl fmt::Display for SetTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetTarget::UserVariable(name) => write!(f, "@{name}"),
            SetTarget::SystemVariable {
                scope,
                name,
                sigil: true,
            } => match scope {
                Some(scope) => write!(f, "@@{scope}.{name}"),
                None => write!(f, "@@{name}"),
            },
            SetTarget::SystemVariable {
                scope,
                name,
                sigil: false,
            } => match scope {
                Some(scope) => write!(f, "{scope} {name}"),
                None => write!(f, "{name}"),
            },
        }
    }
}

impl fmt::Display for SetAssignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Delimiter { delimiter } => write!(f, "DELIMITER {delimiter}"),
            Statement::Set { assignments } => {
                write!(f, "SET {}", display_comma_separated(assignments))
            }
            Statement::SetNames { charset, collation } => {
                f.write_str("SET NAMES ")?;
                match charset {
                    Some(charset) => write!(f, "{charset}")?,
                    None => f.write_str("DEFAULT")?,
                }
                if let Some(collation) = collation {
                    write!(f, " COLLATE {collation}")?;
                }
                Ok(())
            }
            Statement::SetCharacterSet { charset } => match charset {
                Some(charset) => write!(f, "SET CHARACTER SET {charset}"),
                None => f.write_str("SET CHARACTER SET DEFAULT"),
            },
            Statement::Opaque { sql, .. } => f.write_str(sql),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_display() {
        let stmt = Statement::Set {
            assignments: vec![
                SetAssignment {
                    target: SetTarget::SystemVariable {
                        scope: Some(VariableScope::Global),
                        name: Ident::new("max_connections"),
                        sigil: false,
                    },
                    value: Expr::value(Value::Integer("10".into())),
                },
                SetAssignment {
                    target: SetTarget::UserVariable(Ident::new("x")),
                    value: Expr::value(Value::Null),
                },
            ],
        };
        assert_eq!(stmt.to_string(), "SET GLOBAL max_connections = 10, @x = NULL");
    }

    #[test]
    fn test_session_sql_mode_target() {
        let target = |scope, name: &str| SetTarget::SystemVariable {
            scope,
            name: Ident::new(name),
            sigil: true,
        };
        assert!(target(None, "SQL_MODE").is_session_sql_mode());
        assert!(target(Some(VariableScope::Local), "sql_mode").is_session_sql_mode());
        assert!(!target(Some(VariableScope::Global), "sql_mode").is_session_sql_mode());
        assert!(!target(None, "autocommit").is_session_sql_mode());
    }

    #[test]
    fn test_statement_kind() {
        let opaque = Statement::Opaque {
            kind: StatementKind::Show,
            sql: "SHOW TABLES".into(),
        };
        assert_eq!(opaque.kind(), StatementKind::Show);
        assert_eq!(opaque.to_string(), "SHOW TABLES");
        let names = Statement::SetNames {
            charset: Some(Ident::new("utf8mb4")),
            collation: None,
        };
        assert_eq!(names.kind(), StatementKind::SetNames);
    }
}
