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

use crate::keywords::KeywordEnum;

impl<'a> Parser<'a> {
    /// Consume the next token if it spells a member of `E`, and return
    /// that member. Otherwise, no tokens are consumed and returns [`None`].
    #[must_use]
    pub fn parse_keyword_enum<E: KeywordEnum>(&mut self) -> Option<E> {
        let member = E::from_keyword(self.peek_token().keyword)?;
        self.next_token();
        Some(member)
    }

    /// Consume the next token, which must spell a member of `E`.
    pub fn expect_keyword_enum<E: KeywordEnum>(&mut self) -> Result<E, ParserError> {
        match self.parse_keyword_enum() {
            Some(member) => Ok(member),
            None => self.unexpected(E::keywords().into_iter().map(Expected::Keyword).collect()),
        }
    }

    /// Parse a keyword-separated list of 1+ items accepted by `F`
    pub fn parse_keyword_separated<T, F>(
        &mut self,
        keyword: Keyword,
        mut f: F,
    ) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser<'a>) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.parse_keyword(keyword) {
                break;
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::all_dialects;

    #[test]
    fn test_parse_keyword_enum() {
        all_dialects().run_parser_method("unknown x", |parser| {
            assert_eq!(parser.parse_keyword_enum::<IntervalUnit>(), None);
            assert_eq!(parser.position(), 0);
            assert_eq!(
                parser.parse_keyword_enum::<TruthValue>(),
                Some(TruthValue::Unknown)
            );
        });
    }

    #[test]
    fn test_expect_keyword_enum_lists_members() {
        all_dialects().run_parser_method("NOW", |parser| {
            let err = parser.expect_keyword_enum::<Quantifier>().unwrap_err();
            assert_eq!(
                err.to_string(),
                "sql parser error: Expected: one of ALL, ANY or SOME, found: NOW at Line: 1, Column: 1"
            );
        });
    }

    #[test]
    fn test_parse_keyword_separated() {
        all_dialects().run_parser_method("a AND b AND c OR d", |parser| {
            let names = parser
                .parse_keyword_separated(Keyword::AND, |p| Ok(p.next_token().text))
                .unwrap();
            assert_eq!(names, vec!["a", "b", "c"]);
        });
    }
}
