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

//! Decides what kind of statement starts at the cursor and hands it to
//! the grammar that parses it.

use super::*;

/// How far to look for the object keyword of `CREATE` and `ALTER`, e.g.
/// past `OR REPLACE ALGORITHM = MERGE DEFINER = CURRENT_USER SQL SECURITY
/// INVOKER` to `VIEW`.
const OBJECT_LOOKAHEAD: usize = 16;

const CREATE_OBJECTS: &[Keyword] = &[
    Keyword::TABLE,
    Keyword::VIEW,
    Keyword::FUNCTION,
    Keyword::PROCEDURE,
    Keyword::TRIGGER,
    Keyword::EVENT,
    Keyword::INDEX,
    Keyword::DATABASE,
    Keyword::SCHEMA,
    Keyword::USER,
    Keyword::ROLE,
];

const ALTER_OBJECTS: &[Keyword] = &[
    Keyword::TABLE,
    Keyword::VIEW,
    Keyword::FUNCTION,
    Keyword::PROCEDURE,
    Keyword::EVENT,
    Keyword::DATABASE,
    Keyword::SCHEMA,
    Keyword::USER,
];

/// Parses the statements the directives of this crate do not cover.
pub trait StatementParser {
    /// Parse a statement of `kind` starting at the cursor, stopping at its
    /// end: a delimiter or the end of input.
    fn parse_statement(
        &self,
        parser: &mut Parser,
        kind: StatementKind,
    ) -> Result<Statement, ParserError>;
}

/// Keeps a statement as its source text.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpaqueStatementParser;

impl StatementParser for OpaqueStatementParser {
    fn parse_statement(
        &self,
        parser: &mut Parser,
        kind: StatementKind,
    ) -> Result<Statement, ParserError> {
        let start = parser.position();
        while !parser.at_statement_end() {
            let token = parser.next_token();
            if let Some(error) = token.error {
                return Err(ParserError::TokenizerError(error));
            }
        }
        let sql = parser.serialize_range(start, parser.position());
        Ok(Statement::Opaque {
            kind,
            sql: sql.trim().to_string(),
        })
    }
}

impl<'a> Parser<'a> {
    /// Decide the kind of the statement starting at the cursor. Consumes
    /// nothing.
    pub fn classify_statement(&self) -> StatementKind {
        let token = self.peek_token();
        if token.is_symbol("(") {
            return if self.query_starts_at(0) {
                StatementKind::Select
            } else {
                StatementKind::Unknown
            };
        }
        let next = self.peek_nth_token(1);
        let kind = match token.keyword {
            Keyword::SELECT => StatementKind::Select,
            Keyword::WITH => StatementKind::With,
            Keyword::VALUES => StatementKind::Values,
            Keyword::TABLE => StatementKind::Table,
            Keyword::INSERT => StatementKind::Insert,
            Keyword::REPLACE => StatementKind::Replace,
            Keyword::UPDATE => StatementKind::Update,
            Keyword::DELETE => StatementKind::Delete,
            Keyword::CREATE => self.classify_create(),
            Keyword::ALTER => self.classify_alter(),
            Keyword::DROP if next.is_keyword(Keyword::PREPARE) => StatementKind::Deallocate,
            Keyword::DROP => StatementKind::Drop,
            Keyword::RENAME => StatementKind::Rename,
            Keyword::TRUNCATE => StatementKind::Truncate,
            Keyword::SET => self.classify_set(),
            Keyword::DELIMITER => StatementKind::Delimiter,
            Keyword::USE => StatementKind::Use,
            Keyword::SHOW => StatementKind::Show,
            Keyword::EXPLAIN | Keyword::DESCRIBE | Keyword::DESC => StatementKind::Explain,
            Keyword::START if next.is_keyword(Keyword::TRANSACTION) => {
                StatementKind::StartTransaction
            }
            Keyword::BEGIN => StatementKind::StartTransaction,
            Keyword::COMMIT => StatementKind::Commit,
            Keyword::ROLLBACK => StatementKind::Rollback,
            Keyword::SAVEPOINT => StatementKind::Savepoint,
            Keyword::RELEASE if next.is_keyword(Keyword::SAVEPOINT) => StatementKind::Savepoint,
            Keyword::GRANT => StatementKind::Grant,
            Keyword::REVOKE => StatementKind::Revoke,
            Keyword::CALL => StatementKind::Call,
            Keyword::DO => StatementKind::Do,
            Keyword::LOCK => StatementKind::Lock,
            Keyword::UNLOCK => StatementKind::Unlock,
            Keyword::FLUSH => StatementKind::Flush,
            Keyword::KILL => StatementKind::Kill,
            Keyword::ANALYZE
            | Keyword::OPTIMIZE
            | Keyword::CHECK
            | Keyword::REPAIR
            | Keyword::CHECKSUM => StatementKind::TableMaintenance,
            Keyword::PREPARE => StatementKind::Prepare,
            Keyword::EXECUTE => StatementKind::Execute,
            Keyword::DEALLOCATE => StatementKind::Deallocate,
            Keyword::LOAD => StatementKind::Load,
            Keyword::HANDLER => StatementKind::Handler,
            _ => StatementKind::Unknown,
        };
        debug!("statement starting with {} is {:?}", token, kind);
        kind
    }

    fn classify_create(&self) -> StatementKind {
        match self.peek_first_keyword(CREATE_OBJECTS, OBJECT_LOOKAHEAD) {
            Some(Keyword::TABLE) => StatementKind::CreateTable,
            Some(Keyword::VIEW) => StatementKind::CreateView,
            Some(Keyword::FUNCTION) => StatementKind::CreateFunction,
            Some(Keyword::PROCEDURE) => StatementKind::CreateProcedure,
            Some(Keyword::TRIGGER) => StatementKind::CreateTrigger,
            Some(Keyword::EVENT) => StatementKind::CreateEvent,
            Some(Keyword::INDEX) => StatementKind::CreateIndex,
            Some(Keyword::DATABASE | Keyword::SCHEMA) => StatementKind::CreateDatabase,
            Some(Keyword::USER) => StatementKind::CreateUser,
            Some(Keyword::ROLE) => StatementKind::CreateRole,
            _ => StatementKind::Unknown,
        }
    }

    fn classify_alter(&self) -> StatementKind {
        match self.peek_first_keyword(ALTER_OBJECTS, OBJECT_LOOKAHEAD) {
            Some(Keyword::TABLE) => StatementKind::AlterTable,
            Some(Keyword::VIEW) => StatementKind::AlterView,
            Some(Keyword::FUNCTION) => StatementKind::AlterFunction,
            Some(Keyword::PROCEDURE) => StatementKind::AlterProcedure,
            Some(Keyword::EVENT) => StatementKind::AlterEvent,
            Some(Keyword::DATABASE | Keyword::SCHEMA) => StatementKind::AlterDatabase,
            Some(Keyword::USER) => StatementKind::AlterUser,
            _ => StatementKind::Unknown,
        }
    }

    fn classify_set(&self) -> StatementKind {
        let next = self.peek_nth_token(1);
        match next.keyword {
            Keyword::NAMES => StatementKind::SetNames,
            Keyword::CHARSET => StatementKind::SetCharacterSet,
            Keyword::CHARACTER if self.peek_nth_token(2).is_keyword(Keyword::SET) => {
                StatementKind::SetCharacterSet
            }
            Keyword::TRANSACTION => StatementKind::SetTransaction,
            Keyword::GLOBAL | Keyword::SESSION
                if self.peek_nth_token(2).is_keyword(Keyword::TRANSACTION) =>
            {
                StatementKind::SetTransaction
            }
            Keyword::PASSWORD => StatementKind::SetPassword,
            Keyword::ROLE => StatementKind::SetRole,
            Keyword::DEFAULT if self.peek_nth_token(2).is_keyword(Keyword::ROLE) => {
                StatementKind::SetRole
            }
            _ => StatementKind::Set,
        }
    }

    /// Parse one statement and its delimiter. Directives are parsed here;
    /// everything else goes to `statement_parser`.
    pub fn parse_statement(
        &mut self,
        statement_parser: &dyn StatementParser,
    ) -> Result<Statement, ParserError> {
        let kind = self.classify_statement();
        let statement = match kind {
            StatementKind::Delimiter => self.parse_delimiter()?,
            StatementKind::Set | StatementKind::SetNames | StatementKind::SetCharacterSet => {
                self.parse_set()?
            }
            _ => statement_parser.parse_statement(self, kind)?,
        };
        // a directive ends at the end of its line
        if kind != StatementKind::Delimiter {
            self.expect_end_of_statement()?;
        }
        if !self.peek_token().is_eof() {
            return self.expected("end of statement", self.peek_token());
        }
        Ok(statement)
    }

    /// Consume the delimiter ending a statement. At the end of input the
    /// delimiter may be missing if the options allow it.
    pub fn expect_end_of_statement(&mut self) -> Result<(), ParserError> {
        if self.accept(TokenKind::DELIMITER, None).is_some() {
            return Ok(());
        }
        let token = self.peek_token();
        if !token.is_eof() {
            return self.expected("end of statement", token);
        }
        if self.options.trailing_delimiter_optional {
            Ok(())
        } else {
            self.unexpected(vec![Expected::Kind(TokenKind::DELIMITER)])
        }
    }
}
