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

use crate::parser_err;

/// Most parts of a qualified name: `db.tbl.col`.
pub const MAX_NAME_PARTS: usize = 3;

impl<'a> Parser<'a> {
    /// Build an identifier from a name token, keeping its quote style.
    pub fn ident_from_token(token: &Token) -> Ident {
        if token.kind.contains(TokenKind::QUOTED) {
            let quote = token.source_text().chars().next().unwrap_or('`');
            Ident::with_quote(quote, token.text.clone())
        } else {
            Ident::new(token.source_text())
        }
    }

    /// Whether `token` may be used as a name where reserved words are not
    /// allowed.
    pub fn is_identifier_token(token: &Token) -> bool {
        token.kind.contains(TokenKind::NAME) && !token.kind.contains(TokenKind::RESERVED)
    }

    /// Parse a simple one-word identifier (possibly quoted, possibly a
    /// non-reserved keyword)
    pub fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        let token = self.peek_token();
        if Self::is_identifier_token(token) {
            let token = self.next_token();
            Ok(Self::ident_from_token(&token))
        } else {
            self.expected("identifier", token)
        }
    }

    /// Parse a name segment following a dot. Reserved words are names here.
    pub(super) fn parse_identifier_after_dot(&mut self) -> Result<Ident, ParserError> {
        match self.accept(TokenKind::NAME, None) {
            Some(token) => Ok(Self::ident_from_token(&token)),
            None => self.expected("identifier after '.'", self.peek_token()),
        }
    }

    /// Parse a possibly qualified name `name[.name[.name]]`.
    pub fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        self.parse_object_name_with_parts(MAX_NAME_PARTS)
    }

    /// Parse a name of at most `max_parts` dot-separated parts.
    pub fn parse_object_name_with_parts(
        &mut self,
        max_parts: usize,
    ) -> Result<ObjectName, ParserError> {
        let mut idents = vec![self.parse_identifier()?];
        while self.peek_symbol(".") {
            if idents.len() == max_parts {
                let location = self.peek_token().location;
                return parser_err!(format!("Name has more than {max_parts} parts"), location);
            }
            self.next_token();
            idents.push(self.parse_identifier_after_dot()?);
        }
        Ok(ObjectName(idents))
    }

    /// Parse a character set or collation name: any name, including
    /// reserved words such as `BINARY`, or a string.
    pub fn parse_charset_name(&mut self) -> Result<Ident, ParserError> {
        if let Some(token) = self.accept(TokenKind::NAME, None) {
            return Ok(Self::ident_from_token(&token));
        }
        self.parse_identifier_or_string()
    }

    /// Parse a name that may also be written as a string literal, such as
    /// a character set or a collation.
    pub fn parse_identifier_or_string(&mut self) -> Result<Ident, ParserError> {
        if let Some(token) = self.accept(TokenKind::STRING, None) {
            return Ok(Ident::with_quote('\'', token.text));
        }
        self.parse_identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::all_dialects;

    #[test]
    fn test_parse_object_name() {
        let name = all_dialects()
            .run_parser_method("db.`my tbl`.select", |parser| parser.parse_object_name())
            .unwrap();
        assert_eq!(
            name,
            ObjectName(vec![
                Ident::new("db"),
                Ident::with_quote('`', "my tbl"),
                Ident::new("select"),
            ])
        );
        assert_eq!(name.to_string(), "db.`my tbl`.select");
    }

    #[test]
    fn test_reserved_word_needs_a_dot() {
        let err = all_dialects()
            .run_parser_method("select.a", |parser| parser.parse_object_name())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "sql parser error: Expected: identifier, found: select at Line: 1, Column: 1"
        );
    }

    #[test]
    fn test_too_many_parts() {
        let err = all_dialects()
            .run_parser_method("a.b.c.d", |parser| parser.parse_object_name())
            .unwrap_err();
        assert!(matches!(err, ParserError::ParserError(..)));
        let name = all_dialects()
            .run_parser_method("a.b", |parser| parser.parse_object_name_with_parts(2))
            .unwrap();
        assert_eq!(name.to_string(), "a.b");
    }

    #[test]
    fn test_identifier_or_string() {
        all_dialects().run_parser_method("'utf8mb4_bin' latin1", |parser| {
            assert_eq!(
                parser.parse_identifier_or_string().unwrap(),
                Ident::with_quote('\'', "utf8mb4_bin")
            );
            assert_eq!(
                parser.parse_identifier_or_string().unwrap(),
                Ident::new("latin1")
            );
        });
    }
}
