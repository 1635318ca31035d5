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

/// Token matchers accepted by [`Parser::accept_any`] and [`Parser::expect_any`].
pub type Alternatives<'s> = &'s [Expected];

impl<'a> Parser<'a> {
    /// Index of the next unprocessed token, trivia included.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Move the cursor back (or forward) to a position returned by
    /// [`Parser::position`].
    pub fn rewind(&mut self, position: usize) {
        self.index = position.min(self.tokens.len());
    }

    /// Step back over the last `n` significant tokens.
    pub fn rewind_by(&mut self, n: usize) {
        for _ in 0..n {
            self.prev_token();
        }
    }

    /// Token kinds the cursor skips before every operation, by default
    /// [`TokenKind::TRIVIA`].
    pub fn skip_mask(&self) -> TokenKind {
        self.skip
    }

    /// Replace the skip mask, returning the previous one.
    pub fn set_skip_mask(&mut self, skip: TokenKind) -> TokenKind {
        std::mem::replace(&mut self.skip, skip)
    }

    fn token_at(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&self.eof)
    }

    /// Index of the first token at or after `index` that is not skipped.
    fn significant_index(&self, mut index: usize) -> usize {
        while index < self.tokens.len() && self.tokens[index].kind.intersects(self.skip) {
            index += 1;
        }
        index
    }

    /// Consume the token at `index`, which must be significant.
    fn consume_at(&mut self, index: usize) -> Token {
        let token = self.token_at(index).clone();
        self.index = (index + 1).min(self.tokens.len());
        token
    }

    /// Return the first significant token that has not yet been processed
    /// (or EOF if reached end-of-file)
    pub fn peek_token(&self) -> &Token {
        self.peek_nth_token(0)
    }

    /// Return nth significant token that has not yet been processed
    pub fn peek_nth_token(&self, mut n: usize) -> &Token {
        let mut index = self.significant_index(self.index);
        while n > 0 && index < self.tokens.len() {
            index = self.significant_index(index + 1);
            n -= 1;
        }
        self.token_at(index)
    }

    /// Return the first token, possibly trivia, that has not yet been processed
    pub fn peek_token_no_skip(&self) -> &Token {
        self.token_at(self.index)
    }

    /// Return the first significant token that has not yet been processed
    /// and mark it as processed. OK to call repeatedly after reaching EOF.
    pub fn next_token(&mut self) -> Token {
        let index = self.significant_index(self.index);
        self.consume_at(index)
    }

    /// Push back the last significant token. OK to call after
    /// `next_token()` indicates an EOF.
    pub fn prev_token(&mut self) {
        while self.index > 0 {
            self.index -= 1;
            if !self.tokens[self.index].kind.intersects(self.skip) {
                return;
            }
        }
    }

    /// Consume the next significant token if it has a facet of `kind` and,
    /// when given, the text `value` (compared case-insensitively).
    /// Otherwise, no tokens are consumed and returns [`None`].
    #[must_use]
    pub fn accept(&mut self, kind: TokenKind, value: Option<&str>) -> Option<Token> {
        let index = self.significant_index(self.index);
        let token = self.token_at(index);
        let matched = token.kind.intersects(kind)
            && value.map_or(true, |value| token.text.eq_ignore_ascii_case(value));
        if matched {
            Some(self.consume_at(index))
        } else {
            None
        }
    }

    /// Consume the next significant token if it has a facet of `kind` and,
    /// when given, the text `value`. Otherwise, return an error.
    pub fn expect(&mut self, kind: TokenKind, value: Option<&str>) -> Result<Token, ParserError> {
        if let Some(token) = self.accept(kind, value) {
            return Ok(token);
        }
        let expected = match value {
            Some(value) => Expected::Description(format!("{kind} {value}")),
            None => Expected::Kind(kind),
        };
        self.unexpected(vec![expected])
    }

    /// Consume the next significant token if any of `alternatives` matches
    /// it. Otherwise, no tokens are consumed and returns [`None`].
    #[must_use]
    pub fn accept_any(&mut self, alternatives: Alternatives) -> Option<Token> {
        let index = self.significant_index(self.index);
        let token = self.token_at(index);
        if alternatives.iter().any(|e| e.matches(token)) {
            Some(self.consume_at(index))
        } else {
            None
        }
    }

    /// Consume the next significant token if any of `alternatives` matches
    /// it. Otherwise, return an error listing all of them.
    pub fn expect_any(&mut self, alternatives: Alternatives) -> Result<Token, ParserError> {
        match self.accept_any(alternatives) {
            Some(token) => Ok(token),
            None => self.unexpected(alternatives.to_vec()),
        }
    }

    /// Whether one of the next `max_lookahead` significant tokens has a
    /// facet of `kind`. Consumes nothing.
    pub fn peek(&self, kind: TokenKind, max_lookahead: usize) -> bool {
        (0..max_lookahead).any(|n| self.peek_nth_token(n).kind.intersects(kind))
    }

    /// Whether one of the next `max_lookahead` significant tokens is
    /// `keyword`. Consumes nothing.
    pub fn peek_keyword(&self, keyword: Keyword, max_lookahead: usize) -> bool {
        (0..max_lookahead).any(|n| self.peek_nth_token(n).is_keyword(keyword))
    }

    /// The first of `keywords` met within the next `max_lookahead`
    /// significant tokens. Consumes nothing.
    pub fn peek_first_keyword(&self, keywords: &[Keyword], max_lookahead: usize) -> Option<Keyword> {
        (0..max_lookahead)
            .map(|n| self.peek_nth_token(n))
            .take_while(|token| !token.is_eof())
            .find_map(|token| keywords.iter().copied().find(|kw| token.is_keyword(*kw)))
    }

    /// Whether the next significant token is the symbol or operator `symbol`.
    pub fn peek_symbol(&self, symbol: &str) -> bool {
        self.peek_token().is_symbol(symbol)
    }

    /// Fail with the next significant token and what would have been
    /// accepted instead.
    pub fn unexpected<T>(&self, expected: Vec<Expected>) -> Result<T, ParserError> {
        let found = self.peek_token();
        Err(ParserError::UnexpectedToken {
            expected,
            found: found.to_string(),
            location: found.location,
        })
    }

    /// Report `found` was encountered instead of `expected`
    pub fn expected<T>(&self, expected: &str, found: &Token) -> Result<T, ParserError> {
        if let Some(error) = &found.error {
            return Err(ParserError::TokenizerError(error.clone()));
        }
        Err(ParserError::UnexpectedToken {
            expected: vec![Expected::Description(expected.to_string())],
            found: found.to_string(),
            location: found.location,
        })
    }

    /// If the current token is the `expected` keyword, consume it and returns
    /// true. Otherwise, no tokens are consumed and returns false.
    #[must_use]
    pub fn parse_keyword(&mut self, expected: Keyword) -> bool {
        self.parse_keyword_token(expected).is_some()
    }

    #[must_use]
    pub fn parse_keyword_token(&mut self, expected: Keyword) -> Option<Token> {
        self.accept_any(&[Expected::Keyword(expected)])
    }

    /// If the current and subsequent tokens exactly match the `keywords`
    /// sequence, consume them and returns true. Otherwise, no tokens are
    /// consumed and returns false
    #[must_use]
    pub fn parse_keywords(&mut self, keywords: &[Keyword]) -> bool {
        let index = self.index;
        for &keyword in keywords {
            if !self.parse_keyword(keyword) {
                // reset index and return immediately
                self.index = index;
                return false;
            }
        }
        true
    }

    /// If the current token is one of the given `keywords`, consume the token
    /// and return the keyword that matches. Otherwise, no tokens are consumed
    /// and returns [`None`].
    #[must_use]
    pub fn parse_one_of_keywords(&mut self, keywords: &[Keyword]) -> Option<Keyword> {
        let keyword = self.peek_token().keyword;
        if keyword != Keyword::NoKeyword && keywords.contains(&keyword) {
            self.next_token();
            Some(keyword)
        } else {
            None
        }
    }

    /// If the current token is one of the expected keywords, consume the token
    /// and return the keyword that matches. Otherwise, return an error.
    pub fn expect_one_of_keywords(&mut self, keywords: &[Keyword]) -> Result<Keyword, ParserError> {
        match self.parse_one_of_keywords(keywords) {
            Some(keyword) => Ok(keyword),
            None => self.unexpected(keywords.iter().map(|&kw| Expected::Keyword(kw)).collect()),
        }
    }

    /// If the current token is the `expected` keyword, consume the token.
    /// Otherwise, return an error.
    pub fn expect_keyword(&mut self, expected: Keyword) -> Result<Token, ParserError> {
        self.expect_any(&[Expected::Keyword(expected)])
    }

    /// If the current and subsequent tokens exactly match the `keywords`
    /// sequence, consume them and returns Ok. Otherwise, return an Error.
    pub fn expect_keywords(&mut self, expected: &[Keyword]) -> Result<(), ParserError> {
        for &kw in expected {
            self.expect_keyword(kw)?;
        }
        Ok(())
    }

    /// Consume the next token if it is the symbol or operator `expected`,
    /// otherwise return false
    #[must_use]
    pub fn consume_token(&mut self, expected: &str) -> bool {
        self.accept_any(&[Expected::Symbol(expected.to_string())])
            .is_some()
    }

    /// Bail out if the current token is not the symbol or operator
    /// `expected`, or consume it if it is
    pub fn expect_token(&mut self, expected: &str) -> Result<Token, ParserError> {
        self.expect_any(&[Expected::Symbol(expected.to_string())])
    }

    /// Run a parser method `f`, reverting back to the current position if unsuccessful.
    /// Returns `ParserError::RecursionLimitExceeded` if `f` returns a `RecursionLimitExceeded`.
    /// Returns `Ok(None)` if `f` returns any other error.
    pub fn maybe_parse<T, F>(&mut self, f: F) -> Result<Option<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    {
        match self.try_parse(f) {
            Ok(t) => Ok(Some(t)),
            Err(ParserError::RecursionLimitExceeded) => Err(ParserError::RecursionLimitExceeded),
            _ => Ok(None),
        }
    }

    /// Run a parser method `f`, reverting back to the current position if unsuccessful.
    pub fn try_parse<T, F>(&mut self, mut f: F) -> Result<T, ParserError>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    {
        let index = self.index;
        let placeholders = self.placeholders;
        match f(self) {
            Ok(t) => Ok(t),
            Err(e) => {
                // Unwind stack if limit exceeded
                self.index = index;
                self.placeholders = placeholders;
                Err(e)
            }
        }
    }

    /// Parse a comma-separated list of 1+ items accepted by `F`
    pub fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.consume_token(",") {
                break;
            }
        }
        Ok(values)
    }

    /// Consume tokens up to, not including, the first `)` closing no `(`
    /// consumed here, and return their source text. Placeholders among
    /// them are numbered. Fails at the end of the statement.
    pub fn parse_balanced_text(&mut self) -> Result<String, ParserError> {
        let start = self.index;
        let mut depth = 0usize;
        loop {
            let token = self.peek_token();
            if token.is_symbol(")") {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if token.is_symbol("(") {
                depth += 1;
            } else if token.kind.intersects(TokenKind::EOF | TokenKind::DELIMITER) {
                return self.expected("')'", token);
            } else if token.kind.contains(TokenKind::PLACEHOLDER) {
                self.placeholders += 1;
            }
            self.next_token();
        }
        Ok(self.serialize_range(start, self.index).trim().to_string())
    }

    /// Whether the cursor is at the end of the statement: at the end of
    /// input or at a delimiter.
    pub fn at_statement_end(&self) -> bool {
        self.peek_token()
            .kind
            .intersects(TokenKind::EOF | TokenKind::DELIMITER)
    }

    /// Reconstruct the exact source text of all tokens.
    pub fn serialize(&self) -> String {
        serialize_tokens(&self.tokens)
    }

    /// Reconstruct the exact source text of the tokens in positions
    /// `from..to`.
    pub fn serialize_range(&self, from: usize, to: usize) -> String {
        let to = to.min(self.tokens.len());
        let from = from.min(to);
        serialize_tokens(&self.tokens[from..to])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::all_dialects;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_peek_and_next_skip_trivia() {
        all_dialects().run_parser_method("SELECT /* c */ a -- x\n, b", |parser| {
            assert!(parser.peek_token().is_keyword(Keyword::SELECT));
            assert_eq!(parser.peek_nth_token(1).text, "a");
            assert_eq!(parser.peek_nth_token(2).text, ",");
            assert!(parser.peek_nth_token(9).is_eof());
            assert!(parser.next_token().is_keyword(Keyword::SELECT));
            assert_eq!(parser.next_token().text, "a");
            parser.prev_token();
            assert_eq!(parser.next_token().text, "a");
            assert!(parser.consume_token(","));
            assert_eq!(parser.next_token().text, "b");
            assert!(parser.next_token().is_eof());
            assert!(parser.next_token().is_eof());
        });
    }

    #[test]
    fn test_accept_and_expect() {
        all_dialects().run_parser_method("a = 1", |parser| {
            assert_eq!(parser.accept(TokenKind::NUMBER, None), None);
            assert_eq!(parser.position(), 0);
            let name = parser.expect(TokenKind::NAME, Some("A")).unwrap();
            assert_eq!(name.text, "a");
            let err = parser.expect(TokenKind::NAME, None).unwrap_err();
            assert_eq!(
                err,
                ParserError::UnexpectedToken {
                    expected: vec![Expected::Kind(TokenKind::NAME)],
                    found: "=".into(),
                    location: Location::new(2, 1, 3),
                }
            );
            assert!(parser.accept(TokenKind::OPERATOR, Some("=")).is_some());
            assert!(parser.accept(TokenKind::INTEGER, None).is_some());
            assert!(parser.at_statement_end());
        });
    }

    #[test]
    fn test_expect_any_lists_alternatives() {
        all_dialects().run_parser_method("42", |parser| {
            let err = parser
                .expect_any(&[
                    Expected::Keyword(Keyword::ALL),
                    Expected::Keyword(Keyword::ANY),
                    Expected::from("("),
                ])
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "sql parser error: Expected: one of ALL, ANY or '(', found: 42 at Line: 1, Column: 1"
            );
            let token = parser
                .expect_any(&[TokenKind::STRING.into(), TokenKind::INTEGER.into()])
                .unwrap();
            assert_eq!(token.text, "42");
        });
    }

    #[test]
    fn test_bounded_peek() {
        all_dialects().run_parser_method(
            "ALTER ALGORITHM = MERGE DEFINER = CURRENT_USER VIEW v AS SELECT 1",
            |parser| {
                assert!(parser.peek_keyword(Keyword::VIEW, 8));
                assert!(!parser.peek_keyword(Keyword::VIEW, 7));
                assert!(parser.peek(TokenKind::OPERATOR, 3));
                assert!(!parser.peek(TokenKind::OPERATOR, 2));
                assert_eq!(
                    parser.peek_first_keyword(&[Keyword::TABLE, Keyword::VIEW], 20),
                    Some(Keyword::VIEW)
                );
                assert_eq!(parser.position(), 0);
            },
        );
    }

    #[test]
    fn test_keyword_helpers_rewind() {
        all_dialects().run_parser_method("IS NOT NULL", |parser| {
            assert!(!parser.parse_keywords(&[Keyword::IS, Keyword::NULL]));
            assert_eq!(parser.position(), 0);
            assert_eq!(
                parser.parse_one_of_keywords(&[Keyword::NOT, Keyword::IS]),
                Some(Keyword::IS)
            );
            assert!(parser.expect_keyword(Keyword::NULL).is_err());
            assert!(parser.parse_keywords(&[Keyword::NOT, Keyword::NULL]));
        });
    }

    #[test]
    fn test_maybe_parse_rewinds() {
        all_dialects().run_parser_method("a b", |parser| {
            let parsed = parser
                .maybe_parse(|p| {
                    p.next_token();
                    p.expect_keyword(Keyword::SELECT)
                })
                .unwrap();
            assert_eq!(parsed, None);
            assert_eq!(parser.position(), 0);
        });
    }

    #[test]
    fn test_rewind_and_serialize() {
        let sql = "SELECT  a,/* x */b";
        all_dialects().run_parser_method(sql, |parser| {
            assert_eq!(parser.serialize(), sql);
            parser.next_token();
            let start = parser.position();
            parser.next_token();
            parser.next_token();
            parser.next_token();
            assert_eq!(parser.serialize_range(start, parser.position()), "  a,/* x */b");
            parser.rewind_by(2);
            assert_eq!(parser.next_token().text, ",");
            parser.rewind(0);
            assert!(parser.peek_token().is_keyword(Keyword::SELECT));
        });
    }

    #[test]
    fn test_skip_mask() {
        all_dialects().run_parser_method("a /* c */ b", |parser| {
            parser.next_token();
            let old = parser.set_skip_mask(TokenKind::WHITESPACE);
            assert_eq!(old, TokenKind::TRIVIA);
            assert!(parser.accept(TokenKind::COMMENT, None).is_some());
            parser.set_skip_mask(old);
            assert_eq!(parser.next_token().text, "b");
        });
    }
}
