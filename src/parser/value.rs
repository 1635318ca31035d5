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

impl<'a> Parser<'a> {
    /// Parse a literal value (numbers, strings, keyword literals)
    pub fn parse_value(&mut self) -> Result<Value, ParserError> {
        if let Some(value) = self.parse_keyword_value() {
            return Ok(value);
        }
        if let Some(value) = self.parse_introduced_string() {
            return Ok(value);
        }
        let token = self.peek_token();
        let kind = token.kind;
        if kind.contains(TokenKind::STRING) {
            let (value, national) = self.parse_string_literal();
            return Ok(if national {
                Value::NationalStringLiteral(value)
            } else {
                Value::SingleQuotedString(value)
            });
        }
        let text = token.text.clone();
        let value = if kind.contains(TokenKind::INTEGER) {
            Value::Integer(text)
        } else if kind.contains(TokenKind::DECIMAL) {
            Value::Decimal(text)
        } else if kind.contains(TokenKind::FLOAT) {
            Value::Float(text)
        } else if kind.contains(TokenKind::HEX) {
            Value::HexStringLiteral(text)
        } else if kind.contains(TokenKind::BIT) {
            Value::BitStringLiteral(text)
        } else if kind.contains(TokenKind::UUID) {
            Value::Uuid(text)
        } else if kind.contains(TokenKind::IPV4) {
            Value::Ipv4(text)
        } else {
            return self.expected("a literal", token);
        };
        self.next_token();
        Ok(value)
    }

    /// Parse `NULL`, `TRUE`, `FALSE`, `DEFAULT`, `ON` or `OFF` used as a
    /// value, i.e. not followed by `(` or `.`.
    #[must_use]
    pub fn parse_keyword_value(&mut self) -> Option<Value> {
        let value = match self.peek_token().keyword {
            Keyword::NULL => Value::Null,
            Keyword::TRUE => Value::Boolean(true),
            Keyword::FALSE => Value::Boolean(false),
            Keyword::DEFAULT => Value::Default,
            Keyword::ON => Value::On,
            Keyword::OFF => Value::Off,
            _ => return None,
        };
        let next = self.peek_nth_token(1);
        if next.is_symbol("(") || next.is_symbol(".") {
            return None;
        }
        self.next_token();
        Some(value)
    }

    /// Parse one string literal and any plain string literals directly
    /// following it, which are concatenated. Returns the value and whether
    /// the first literal was a national string. A second `N'..'` is not
    /// part of the run.
    fn parse_string_literal(&mut self) -> (String, bool) {
        let first = self.next_token();
        let national = first.kind.contains(TokenKind::NATIONAL);
        let mut value = first.text;
        while self.peek_token().kind == TokenKind::STRING {
            value.push_str(&self.next_token().text);
        }
        (value, national)
    }

    /// Parse a string with a character set introducer: `_utf8mb4'abc'`.
    pub(super) fn parse_introduced_string(&mut self) -> Option<Value> {
        let token = self.peek_token();
        let is_introducer = token.kind == TokenKind::NAME && token.text.starts_with('_');
        if !is_introducer || !self.peek_nth_token(1).kind.contains(TokenKind::STRING) {
            return None;
        }
        let charset = self.next_token().text;
        let (value, _) = self.parse_string_literal();
        Some(Value::IntroducedString { charset, value })
    }

    /// Parse an unsigned integer literal, e.g. a length.
    pub fn parse_literal_uint(&mut self) -> Result<u64, ParserError> {
        let token = self.peek_token();
        if token.kind.contains(TokenKind::INTEGER) {
            if let Ok(n) = token.text.parse::<u64>() {
                self.next_token();
                return Ok(n);
            }
        }
        self.expected("literal int", token)
    }

    /// Parse a literal string
    pub fn parse_literal_string(&mut self) -> Result<String, ParserError> {
        if self.peek_token().kind.contains(TokenKind::STRING) {
            Ok(self.parse_string_literal().0)
        } else {
            self.expected("literal string", self.peek_token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::all_dialects;

    fn value(sql: &str) -> Value {
        all_dialects()
            .run_parser_method(sql, |parser| parser.parse_value())
            .unwrap()
    }

    #[test]
    fn test_numbers_keep_their_text() {
        assert_eq!(value("42"), Value::Integer("42".into()));
        assert_eq!(value("-7"), Value::Integer("-7".into()));
        assert_eq!(
            value("3.14159265358979323846264338327950288"),
            Value::Decimal("3.14159265358979323846264338327950288".into())
        );
        assert_eq!(value(".5"), Value::Decimal("0.5".into()));
        assert_eq!(value("1e10"), Value::Float("1e10".into()));
        assert_eq!(value("0x1F"), Value::HexStringLiteral("1F".into()));
        assert_eq!(value("b'101'"), Value::BitStringLiteral("101".into()));
    }

    #[test]
    fn test_strings() {
        assert_eq!(value("'it''s'"), Value::SingleQuotedString("it's".into()));
        assert_eq!(
            value("'a' \"b\" 'c'"),
            Value::SingleQuotedString("abc".into())
        );
        assert_eq!(value("N'x'"), Value::NationalStringLiteral("x".into()));
        assert_eq!(
            value("N'x' 'y' 'z'"),
            Value::NationalStringLiteral("xyz".into())
        );
        assert_eq!(
            value("_utf8mb4'x' 'y'"),
            Value::IntroducedString {
                charset: "_utf8mb4".into(),
                value: "xy".into()
            }
        );
    }

    #[test]
    fn test_keyword_values() {
        assert_eq!(value("NULL"), Value::Null);
        assert_eq!(value("true"), Value::Boolean(true));
        assert_eq!(value("DEFAULT"), Value::Default);
        assert_eq!(value("off"), Value::Off);
        all_dialects().run_parser_method("DEFAULT(a)", |parser| {
            assert_eq!(parser.parse_keyword_value(), None);
            assert_eq!(parser.position(), 0);
        });
    }

    #[test]
    fn test_not_a_literal() {
        let err = all_dialects()
            .run_parser_method("a", |parser| parser.parse_value())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "sql parser error: Expected: a literal, found: a at Line: 1, Column: 1"
        );
    }
}
