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

mod display;

use super::*;

keyword_enum! {
    /// Scope of a system variable.
    pub enum VariableScope {
        Global = GLOBAL,
        Session = SESSION,
        Local = LOCAL,
        Persist = PERSIST,
        PersistOnly = PERSIST_ONLY,
    }
}

impl VariableScope {
    /// Whether an assignment in this scope changes the current session.
    pub fn affects_session(&self) -> bool {
        matches!(self, VariableScope::Session | VariableScope::Local)
    }
}

/// What kind of statement starts at a position, decided by looking ahead
/// a bounded number of tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatementKind {
    Select,
    /// `WITH ... SELECT`
    With,
    Values,
    /// `TABLE t`
    Table,
    Insert,
    Replace,
    Update,
    Delete,
    CreateTable,
    CreateView,
    CreateFunction,
    CreateProcedure,
    CreateTrigger,
    CreateEvent,
    CreateIndex,
    CreateDatabase,
    CreateUser,
    CreateRole,
    AlterTable,
    AlterView,
    AlterDatabase,
    AlterUser,
    AlterEvent,
    AlterFunction,
    AlterProcedure,
    Drop,
    Rename,
    Truncate,
    Set,
    SetNames,
    SetCharacterSet,
    SetTransaction,
    SetPassword,
    SetRole,
    Delimiter,
    Use,
    Show,
    /// `EXPLAIN`, `DESCRIBE`, `DESC`
    Explain,
    /// `START TRANSACTION`, `BEGIN`
    StartTransaction,
    Commit,
    Rollback,
    Savepoint,
    Grant,
    Revoke,
    Call,
    Do,
    Lock,
    Unlock,
    Flush,
    Kill,
    /// `ANALYZE`, `OPTIMIZE`, `CHECK`, `REPAIR`, `CHECKSUM TABLE`
    TableMaintenance,
    Prepare,
    Execute,
    Deallocate,
    Load,
    Handler,
    /// A statement starting with a word no rule knows.
    Unknown,
}

impl StatementKind {
    /// Whether the statement is a query that may appear as a subquery.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            StatementKind::Select | StatementKind::With | StatementKind::Values | StatementKind::Table
        )
    }
}

/// Left-hand side of a `SET` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SetTarget {
    /// `@name`
    UserVariable(Ident),
    /// `[scope] name` or, with `sigil`, `@@[scope.]name`
    SystemVariable {
        scope: Option<VariableScope>,
        name: Ident,
        sigil: bool,
    },
}

impl SetTarget {
    /// Whether the target is the session's `sql_mode`.
    pub fn is_session_sql_mode(&self) -> bool {
        match self {
            SetTarget::SystemVariable { scope, name, .. } => {
                name.value.eq_ignore_ascii_case("sql_mode")
                    && scope.map_or(true, |scope| scope.affects_session())
            }
            SetTarget::UserVariable(_) => false,
        }
    }
}

/// `target = value` in a `SET` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetAssignment {
    pub target: SetTarget,
    pub value: Expr,
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    /// `DELIMITER $$`
    Delimiter { delimiter: String },
    /// `SET a = 1, @b := 2, GLOBAL c = DEFAULT`
    Set { assignments: Vec<SetAssignment> },
    /// `SET NAMES charset [COLLATE collation]`; `charset` is `None` for
    /// `SET NAMES DEFAULT`
    SetNames {
        charset: Option<Ident>,
        collation: Option<Ident>,
    },
    /// `SET {CHARACTER SET | CHARSET} {charset | DEFAULT}`
    SetCharacterSet { charset: Option<Ident> },
    /// A statement of `kind` kept as its source text, for statements parsed
    /// by no grammar of this crate.
    Opaque { kind: StatementKind, sql: String },
}

impl Statement {
    /// The kind of the statement, as the dispatcher classified it.
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Delimiter { .. } => StatementKind::Delimiter,
            Statement::Set { .. } => StatementKind::Set,
            Statement::SetNames { .. } => StatementKind::SetNames,
            Statement::SetCharacterSet { .. } => StatementKind::SetCharacterSet,
            Statement::Opaque { kind, .. } => *kind,
        }
    }
}
