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

use super::identifier::MAX_NAME_PARTS;
use super::*;

use crate::keywords::{KeywordEnum, NILADIC_FUNCTIONS};
use crate::parser_err;
use crate::settings::SqlMode;

/// Binding power of the operators, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `:=`
    Assign = 10,
    /// `OR`, `||` without `PIPES_AS_CONCAT`
    Or = 20,
    Xor = 24,
    /// `AND`, `&&`
    And = 30,
    /// Prefix `NOT`
    Not = 40,
    /// Comparisons and `IS [NOT] ...`
    Comparison = 60,
    /// `[NOT] BETWEEN`, `[NOT] LIKE`, `[NOT] REGEXP`, `[NOT] IN`,
    /// `SOUNDS LIKE`, `MEMBER OF`
    Predicate = 65,
    BitOr = 70,
    BitAnd = 80,
    Shift = 90,
    PlusMinus = 100,
    /// `*`, `/`, `%`, `DIV`, `MOD`
    MulDivMod = 110,
    BitXor = 120,
    /// `||` with `PIPES_AS_CONCAT`
    Concat = 125,
    /// Prefix `-`, `+`, `~`
    Unary = 130,
    /// `!`, and `NOT` with `HIGH_NOT_PRECEDENCE`
    HighNot = 140,
    /// `COLLATE`, prefix `BINARY`
    Collate = 150,
    /// `->`, `->>`
    Json = 160,
}

impl Precedence {
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Contents of a parenthesized group: either a subquery or expressions.
enum Parenthesized {
    Subquery(Subquery),
    Exprs(Vec<Expr>),
}

/// Join the source text of operator tokens with single spaces.
fn spelling_of(tokens: &[Token]) -> Spelling {
    let words: Vec<&str> = tokens.iter().map(Token::source_text).collect();
    Spelling(words.join(" "))
}

impl<'a> Parser<'a> {
    /// Parse a new expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(0)
    }

    /// Parse an expression without comparisons, logical operators or
    /// predicates, e.g. the operands of `BETWEEN`.
    pub fn parse_bit_expr(&mut self) -> Result<Expr, ParserError> {
        self.parse_subexpr(Precedence::Predicate.value())
    }

    /// Parse tokens until the precedence changes.
    pub fn parse_subexpr(&mut self, precedence: u8) -> Result<Expr, ParserError> {
        let _guard = self.recursion_counter.try_decrease()?;
        debug!("parsing expr");
        let mut expr = self.parse_prefix()?;
        debug!("prefix: {:?}", expr);
        loop {
            let next_precedence = self.get_next_precedence();
            debug!("next precedence: {:?}", next_precedence);

            if precedence >= next_precedence {
                break;
            }

            expr = self.parse_infix(expr, next_precedence)?;
        }
        Ok(expr)
    }

    /// Get the precedence of the next token, 0 if it does not continue an
    /// expression.
    pub fn get_next_precedence(&self) -> u8 {
        let token = self.peek_token();
        if token.kind.contains(TokenKind::OPERATOR) {
            let precedence = match token.text.as_str() {
                ":=" => Precedence::Assign,
                "||" if self.settings.has_mode(SqlMode::PIPES_AS_CONCAT) => Precedence::Concat,
                "||" => Precedence::Or,
                "&&" => Precedence::And,
                "=" | "<=>" | "<>" | "!=" | ">" | ">=" | "<" | "<=" => Precedence::Comparison,
                "|" => Precedence::BitOr,
                "&" => Precedence::BitAnd,
                "<<" | ">>" => Precedence::Shift,
                "+" | "-" => Precedence::PlusMinus,
                "*" | "/" | "%" => Precedence::MulDivMod,
                "^" => Precedence::BitXor,
                "->" | "->>" => Precedence::Json,
                _ => return 0,
            };
            return precedence.value();
        }
        let precedence = match token.keyword {
            Keyword::OR => Precedence::Or,
            Keyword::XOR => Precedence::Xor,
            Keyword::AND => Precedence::And,
            Keyword::IS => Precedence::Comparison,
            Keyword::BETWEEN
            | Keyword::LIKE
            | Keyword::REGEXP
            | Keyword::RLIKE
            | Keyword::IN
            | Keyword::SOUNDS => Precedence::Predicate,
            Keyword::NOT => match self.peek_nth_token(1).keyword {
                Keyword::BETWEEN | Keyword::LIKE | Keyword::REGEXP | Keyword::RLIKE | Keyword::IN => {
                    Precedence::Predicate
                }
                _ => return 0,
            },
            Keyword::MEMBER
                if self.dialect.supports_member_of()
                    && self.peek_nth_token(1).is_keyword(Keyword::OF) =>
            {
                Precedence::Predicate
            }
            Keyword::DIV | Keyword::MOD => Precedence::MulDivMod,
            Keyword::COLLATE => Precedence::Collate,
            _ => return 0,
        };
        precedence.value()
    }

    /// Parse an operator following an expression
    pub fn parse_infix(&mut self, expr: Expr, precedence: u8) -> Result<Expr, ParserError> {
        let token = self.next_token();
        debug!("infix: {}", token);
        let regular_binary_operator = if token.kind.contains(TokenKind::OPERATOR) {
            match token.text.as_str() {
                ":=" => Some(BinaryOperator::Assign),
                "||" if self.settings.has_mode(SqlMode::PIPES_AS_CONCAT) => {
                    Some(BinaryOperator::StringConcat)
                }
                "||" => Some(BinaryOperator::Or),
                "&&" => Some(BinaryOperator::And),
                "=" => Some(BinaryOperator::Eq),
                "<=>" => Some(BinaryOperator::NullSafeEq),
                "<>" | "!=" => Some(BinaryOperator::NotEq),
                ">" => Some(BinaryOperator::Gt),
                ">=" => Some(BinaryOperator::GtEq),
                "<" => Some(BinaryOperator::Lt),
                "<=" => Some(BinaryOperator::LtEq),
                "|" => Some(BinaryOperator::BitwiseOr),
                "&" => Some(BinaryOperator::BitwiseAnd),
                "^" => Some(BinaryOperator::BitwiseXor),
                "<<" => Some(BinaryOperator::ShiftLeft),
                ">>" => Some(BinaryOperator::ShiftRight),
                "+" => Some(BinaryOperator::Plus),
                "-" => Some(BinaryOperator::Minus),
                "*" => Some(BinaryOperator::Multiply),
                "/" => Some(BinaryOperator::Divide),
                "%" => Some(BinaryOperator::Modulo),
                "->" => Some(BinaryOperator::JsonExtract),
                "->>" => Some(BinaryOperator::JsonUnquoteExtract),
                _ => None,
            }
        } else {
            match token.keyword {
                Keyword::OR => Some(BinaryOperator::Or),
                Keyword::XOR => Some(BinaryOperator::Xor),
                Keyword::AND => Some(BinaryOperator::And),
                Keyword::DIV => Some(BinaryOperator::IntegerDivide),
                Keyword::MOD => Some(BinaryOperator::Modulo),
                Keyword::REGEXP | Keyword::RLIKE => Some(BinaryOperator::Regexp),
                _ => None,
            }
        };

        if let Some(op) = regular_binary_operator {
            let spelling = spelling_of(&[token]);
            if Self::is_comparison(op) {
                if let Some(quantifier) = self.parse_quantifier() {
                    self.expect_token("(")?;
                    let subquery = self.parse_required_subquery()?;
                    return Ok(Expr::Quantified {
                        left: Box::new(expr),
                        op,
                        spelling,
                        quantifier,
                        subquery,
                    });
                }
            }
            let right = match op {
                // right associative
                BinaryOperator::Assign => self.parse_subexpr(precedence - 1)?,
                BinaryOperator::JsonExtract | BinaryOperator::JsonUnquoteExtract => {
                    Expr::Value(Value::SingleQuotedString(self.parse_literal_string()?))
                }
                _ => self.parse_subexpr(precedence)?,
            };
            return Ok(Expr::BinaryOp {
                left: Box::new(expr),
                op,
                spelling,
                right: Box::new(right),
            });
        }

        match token.keyword {
            Keyword::IS => self.parse_is(expr, token),
            Keyword::NOT => {
                let next = self.next_token();
                let spelling = spelling_of(&[token, next.clone()]);
                match next.keyword {
                    Keyword::BETWEEN => self.parse_between(expr, true, spelling),
                    Keyword::LIKE => self.parse_like(expr, true, spelling),
                    Keyword::IN => self.parse_in(expr, true, spelling),
                    Keyword::REGEXP | Keyword::RLIKE => Ok(Expr::BinaryOp {
                        left: Box::new(expr),
                        op: BinaryOperator::NotRegexp,
                        spelling,
                        right: Box::new(self.parse_bit_expr()?),
                    }),
                    _ => self.expected("BETWEEN, LIKE, REGEXP or IN after NOT", &next),
                }
            }
            Keyword::BETWEEN => {
                let spelling = spelling_of(&[token]);
                self.parse_between(expr, false, spelling)
            }
            Keyword::LIKE => {
                let spelling = spelling_of(&[token]);
                self.parse_like(expr, false, spelling)
            }
            Keyword::IN => {
                let spelling = spelling_of(&[token]);
                self.parse_in(expr, false, spelling)
            }
            Keyword::SOUNDS => {
                let like = self.expect_keyword(Keyword::LIKE)?;
                Ok(Expr::BinaryOp {
                    left: Box::new(expr),
                    op: BinaryOperator::SoundsLike,
                    spelling: spelling_of(&[token, like]),
                    right: Box::new(self.parse_bit_expr()?),
                })
            }
            Keyword::MEMBER => {
                let of = self.expect_keyword(Keyword::OF)?;
                self.expect_token("(")?;
                let array = self.parse_expr()?;
                self.expect_token(")")?;
                Ok(Expr::BinaryOp {
                    left: Box::new(expr),
                    op: BinaryOperator::MemberOf,
                    spelling: spelling_of(&[token, of]),
                    right: Box::new(Expr::Nested(Box::new(array))),
                })
            }
            Keyword::COLLATE => Ok(Expr::Collate {
                expr: Box::new(expr),
                collation: self.parse_charset_name()?,
            }),
            // Can only happen if `get_next_precedence` got out of sync with this function
            _ => parser_err!(format!("No infix parser for token {token}"), token.location),
        }
    }

    fn is_comparison(op: BinaryOperator) -> bool {
        matches!(
            op,
            BinaryOperator::Eq
                | BinaryOperator::NullSafeEq
                | BinaryOperator::NotEq
                | BinaryOperator::Gt
                | BinaryOperator::GtEq
                | BinaryOperator::Lt
                | BinaryOperator::LtEq
        )
    }

    /// Consume `ALL`, `ANY` or `SOME` when a parenthesized subquery follows.
    fn parse_quantifier(&mut self) -> Option<Quantifier> {
        let quantifier = Quantifier::from_keyword(self.peek_token().keyword)?;
        if !self.peek_nth_token(1).is_symbol("(") || !self.query_starts_at(2) {
            return None;
        }
        self.next_token();
        Some(quantifier)
    }

    /// Parses `IS [NOT] {TRUE | FALSE | UNKNOWN | NULL}`, assuming the `IS`
    /// keyword was already consumed.
    pub fn parse_is(&mut self, expr: Expr, is: Token) -> Result<Expr, ParserError> {
        let mut tokens = vec![is];
        let negated = match self.parse_keyword_token(Keyword::NOT) {
            Some(not) => {
                tokens.push(not);
                true
            }
            None => false,
        };
        tokens.push(self.peek_token().clone());
        let value: TruthValue = self.expect_keyword_enum()?;
        let op = if negated {
            UnaryOperator::IsNot(value)
        } else {
            UnaryOperator::Is(value)
        };
        Ok(Expr::UnaryOp {
            op,
            spelling: spelling_of(&tokens),
            expr: Box::new(expr),
        })
    }

    /// Parses `BETWEEN <low> AND <high>`, assuming the `[NOT] BETWEEN`
    /// keywords were already consumed.
    pub fn parse_between(
        &mut self,
        expr: Expr,
        negated: bool,
        spelling: Spelling,
    ) -> Result<Expr, ParserError> {
        // Stop parsing subexpressions for <low> and <high> on tokens with
        // precedence lower than that of `BETWEEN`, such as `AND`, `IS`, etc.
        let low = self.parse_bit_expr()?;
        let and = self.expect_keyword(Keyword::AND)?;
        let high = self.parse_bit_expr()?;
        Ok(Expr::TernaryOp {
            op: if negated {
                TernaryOperator::NotBetween
            } else {
                TernaryOperator::Between
            },
            spelling: (spelling, spelling_of(&[and])),
            first: Box::new(expr),
            second: Box::new(low),
            third: Box::new(high),
        })
    }

    /// Parses `LIKE <pattern> [ESCAPE <escape>]`, assuming the `[NOT] LIKE`
    /// keywords were already consumed.
    pub fn parse_like(
        &mut self,
        expr: Expr,
        negated: bool,
        spelling: Spelling,
    ) -> Result<Expr, ParserError> {
        let pattern = self.parse_bit_expr()?;
        if let Some(escape) = self.parse_keyword_token(Keyword::ESCAPE) {
            let escape_char = self.parse_bit_expr()?;
            return Ok(Expr::TernaryOp {
                op: if negated {
                    TernaryOperator::NotLikeEscape
                } else {
                    TernaryOperator::LikeEscape
                },
                spelling: (spelling, spelling_of(&[escape])),
                first: Box::new(expr),
                second: Box::new(pattern),
                third: Box::new(escape_char),
            });
        }
        Ok(Expr::BinaryOp {
            left: Box::new(expr),
            op: if negated {
                BinaryOperator::NotLike
            } else {
                BinaryOperator::Like
            },
            spelling,
            right: Box::new(pattern),
        })
    }

    /// Parses the parens following the `[ NOT ] IN` operator.
    pub fn parse_in(
        &mut self,
        expr: Expr,
        negated: bool,
        spelling: Spelling,
    ) -> Result<Expr, ParserError> {
        self.expect_token("(")?;
        let in_op = match self.parse_parenthesized_body()? {
            Parenthesized::Subquery(subquery) => Expr::InSubquery {
                expr: Box::new(expr),
                subquery,
                negated,
                spelling,
            },
            Parenthesized::Exprs(list) => Expr::InList {
                expr: Box::new(expr),
                list,
                negated,
                spelling,
            },
        };
        Ok(in_op)
    }

    /// Parse an expression prefix.
    pub fn parse_prefix(&mut self) -> Result<Expr, ParserError> {
        if let Some(value) = self.parse_keyword_value() {
            return Ok(Expr::Value(value));
        }
        if self.peek_token().kind.intersects(TokenKind::LITERAL) {
            return Ok(Expr::Value(self.parse_value()?));
        }
        if let Some(value) = self.parse_introduced_string() {
            return Ok(Expr::Value(value));
        }

        let token = self.next_token();
        let kind = token.kind;
        if kind.contains(TokenKind::VARIABLE) {
            return Ok(Expr::UserVariable(Self::user_variable(token)));
        }
        if kind.contains(TokenKind::SYSTEM_VARIABLE) {
            let (scope, name) = self.parse_system_variable(token)?;
            return Ok(Expr::SystemVariable { scope, name });
        }
        if kind.contains(TokenKind::PLACEHOLDER) {
            return Ok(Expr::Placeholder(self.next_placeholder()));
        }
        if kind.contains(TokenKind::OPERATOR) {
            let (op, precedence) = match token.text.as_str() {
                "+" => (UnaryOperator::Plus, Precedence::Unary),
                "-" => (UnaryOperator::Minus, Precedence::Unary),
                "~" => (UnaryOperator::BitwiseNot, Precedence::Unary),
                "!" => (UnaryOperator::LogicalNot, Precedence::HighNot),
                _ => return self.expected("an expression", &token),
            };
            return Ok(Expr::UnaryOp {
                op,
                spelling: spelling_of(&[token]),
                expr: Box::new(self.parse_subexpr(precedence.value())?),
            });
        }
        if token.is_symbol("(") {
            return self.parse_parenthesized_prefix();
        }
        if token.is_symbol("{") {
            return self.parse_odbc_escape();
        }
        if kind.contains(TokenKind::NAME) {
            if let Some(expr) = self.parse_keyword_prefix(&token)? {
                return Ok(expr);
            }
            return self.parse_name_prefix(token);
        }
        self.expected("an expression", &token)
    }

    /// Parse the constructs introduced by a keyword, returning `None` when
    /// the keyword is used as a name.
    fn parse_keyword_prefix(&mut self, token: &Token) -> Result<Option<Expr>, ParserError> {
        let followed_by_paren = self.peek_symbol("(");
        let expr = match token.keyword {
            Keyword::NOT => self.parse_not(token)?,
            Keyword::BINARY => Expr::UnaryOp {
                op: UnaryOperator::Binary,
                spelling: spelling_of(&[token.clone()]),
                expr: Box::new(self.parse_subexpr(Precedence::Collate.value())?),
            },
            Keyword::EXISTS if followed_by_paren => {
                self.expect_token("(")?;
                Expr::Exists(self.parse_required_subquery()?)
            }
            Keyword::ROW if followed_by_paren => {
                self.expect_token("(")?;
                let exprs = self.parse_comma_separated(Parser::parse_expr)?;
                self.expect_token(")")?;
                Expr::Row {
                    exprs,
                    explicit: true,
                }
            }
            Keyword::INTERVAL => match self.maybe_parse(Parser::parse_interval)? {
                Some(interval) => interval,
                // INTERVAL(N, N1, ...) is a function
                None => return Ok(None),
            },
            Keyword::CASE => self.parse_case_expr()?,
            Keyword::MATCH if followed_by_paren => self.parse_match_against()?,
            Keyword::CAST if followed_by_paren => self.parse_cast_expr()?,
            Keyword::CONVERT if followed_by_paren => self.parse_convert_expr()?,
            Keyword::DATE | Keyword::TIME | Keyword::TIMESTAMP
                if self.peek_token().kind.contains(TokenKind::STRING) =>
            {
                Expr::TypedString {
                    data_type: token.text.clone(),
                    value: self.parse_literal_string()?,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(expr))
    }

    /// Parse the operand of a prefix `NOT`, assuming the keyword was
    /// already consumed.
    pub fn parse_not(&mut self, not: &Token) -> Result<Expr, ParserError> {
        let precedence = if self.settings.has_mode(SqlMode::HIGH_NOT_PRECEDENCE) {
            Precedence::HighNot
        } else {
            Precedence::Not
        };
        Ok(Expr::UnaryOp {
            op: UnaryOperator::Not,
            spelling: spelling_of(&[not.clone()]),
            expr: Box::new(self.parse_subexpr(precedence.value())?),
        })
    }

    /// Parse a column name, a qualified wildcard or a function call
    /// starting with `token`.
    fn parse_name_prefix(&mut self, token: Token) -> Result<Expr, ParserError> {
        let reserved = token.kind.contains(TokenKind::RESERVED);
        if self.peek_symbol("(") {
            let adjacent = self.peek_token_no_skip().is_symbol("(");
            if !reserved || adjacent || self.settings.has_mode(SqlMode::IGNORE_SPACE) {
                let name = ObjectName(vec![Self::ident_from_token(&token)]);
                return self.parse_function(name);
            }
        }
        if reserved {
            if NILADIC_FUNCTIONS.contains(&token.keyword) {
                return Ok(Expr::Function(Function {
                    name: ObjectName(vec![Self::ident_from_token(&token)]),
                    args: FunctionArgs::None,
                }));
            }
            return self.expected("an expression", &token);
        }

        let mut parts = vec![Self::ident_from_token(&token)];
        while self.peek_symbol(".") {
            let location = self.peek_token().location;
            self.next_token();
            if self.consume_token("*") {
                return Ok(Expr::Wildcard(parts));
            }
            if parts.len() == MAX_NAME_PARTS {
                return parser_err!(format!("Name has more than {MAX_NAME_PARTS} parts"), location);
            }
            parts.push(self.parse_identifier_after_dot()?);
        }
        if parts.len() > 1 && self.peek_symbol("(") {
            return self.parse_function(ObjectName(parts));
        }
        Ok(Expr::Identifier(ObjectName(parts)))
    }

    /// The name of a `@name` token, keeping its quote style.
    pub(super) fn user_variable(token: Token) -> Ident {
        let quote = token
            .source_text()
            .chars()
            .nth(1)
            .filter(|c| matches!(c, '\'' | '"' | '`'));
        match quote {
            Some(quote) => Ident::with_quote(quote, token.text),
            None => Ident::new(token.text),
        }
    }

    /// Parse `@@name` or `@@scope.name`, the first token already consumed.
    pub(super) fn parse_system_variable(
        &mut self,
        token: Token,
    ) -> Result<(Option<VariableScope>, Ident), ParserError> {
        let scope = VariableScope::from_keyword(Keyword::lookup(&token.text));
        match scope {
            Some(scope) if self.peek_token_no_skip().is_symbol(".") => {
                self.next_token();
                Ok((Some(scope), self.parse_identifier_after_dot()?))
            }
            _ => Ok((None, Ident::new(token.text))),
        }
    }

    /// Number the next `?` placeholder.
    pub fn next_placeholder(&mut self) -> usize {
        let n = self.placeholders;
        self.placeholders += 1;
        n
    }

    /// Parse a function call's parenthesized arguments, assuming the name
    /// was already consumed.
    pub fn parse_function(&mut self, name: ObjectName) -> Result<Expr, ParserError> {
        self.expect_token("(")?;
        if self.consume_token(")") {
            return Ok(Expr::Function(Function {
                name,
                args: FunctionArgs::List {
                    distinct: false,
                    args: vec![],
                },
            }));
        }
        let distinct = self.parse_keyword(Keyword::DISTINCT);
        let args = self.parse_comma_separated(Parser::parse_function_arg)?;
        self.expect_token(")")?;
        Ok(Expr::Function(Function {
            name,
            args: FunctionArgs::List { distinct, args },
        }))
    }

    fn parse_function_arg(&mut self) -> Result<Expr, ParserError> {
        if self.peek_symbol("*") {
            let next = self.peek_nth_token(1);
            if next.is_symbol(")") || next.is_symbol(",") {
                self.next_token();
                return Ok(Expr::Wildcard(vec![]));
            }
        }
        self.parse_expr()
    }

    /// Parse `INTERVAL <expr> <unit>`, assuming the `INTERVAL` keyword was
    /// already consumed.
    pub fn parse_interval(&mut self) -> Result<Expr, ParserError> {
        let value = self.parse_expr()?;
        let unit: IntervalUnit = self.expect_keyword_enum()?;
        Ok(Expr::Interval {
            value: Box::new(value),
            unit,
        })
    }

    pub fn parse_case_expr(&mut self) -> Result<Expr, ParserError> {
        let mut operand = None;
        if !self.parse_keyword(Keyword::WHEN) {
            operand = Some(Box::new(self.parse_expr()?));
            self.expect_keyword(Keyword::WHEN)?;
        }
        let mut branches = vec![];
        loop {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::THEN)?;
            let result = self.parse_expr()?;
            branches.push(CaseWhen { condition, result });
            if !self.parse_keyword(Keyword::WHEN) {
                break;
            }
        }
        let else_result = if self.parse_keyword(Keyword::ELSE) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::END)?;
        Ok(Expr::Case {
            operand,
            branches,
            else_result,
        })
    }

    /// Parse `MATCH (<col>, ...) AGAINST (<expr> [<modifier>])`, assuming
    /// the `MATCH` keyword was already consumed.
    pub fn parse_match_against(&mut self) -> Result<Expr, ParserError> {
        self.expect_token("(")?;
        let columns = self.parse_comma_separated(Parser::parse_object_name)?;
        self.expect_token(")")?;

        self.expect_keyword(Keyword::AGAINST)?;

        self.expect_token("(")?;

        // `IN` starts the modifier, not a predicate
        let against = self.parse_bit_expr()?;

        let in_natural_language_mode_keywords = &[
            Keyword::IN,
            Keyword::NATURAL,
            Keyword::LANGUAGE,
            Keyword::MODE,
        ];

        let with_query_expansion_keywords = &[Keyword::WITH, Keyword::QUERY, Keyword::EXPANSION];

        let in_boolean_mode_keywords = &[Keyword::IN, Keyword::BOOLEAN, Keyword::MODE];

        let modifier = if self.parse_keywords(in_natural_language_mode_keywords) {
            if self.parse_keywords(with_query_expansion_keywords) {
                Some(SearchModifier::InNaturalLanguageModeWithQueryExpansion)
            } else {
                Some(SearchModifier::InNaturalLanguageMode)
            }
        } else if self.parse_keywords(in_boolean_mode_keywords) {
            Some(SearchModifier::InBooleanMode)
        } else if self.parse_keywords(with_query_expansion_keywords) {
            Some(SearchModifier::WithQueryExpansion)
        } else {
            None
        };

        self.expect_token(")")?;

        Ok(Expr::Match {
            columns,
            against: Box::new(against),
            modifier,
        })
    }

    /// Parse `CAST(<expr> AS <type>)`, assuming the `CAST` keyword was
    /// already consumed.
    pub fn parse_cast_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token("(")?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::AS)?;
        let data_type = self.parse_verbatim_type()?;
        self.expect_token(")")?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parse `CONVERT(<expr>, <type>)` or `CONVERT(<expr> USING <charset>)`,
    /// assuming the `CONVERT` keyword was already consumed.
    pub fn parse_convert_expr(&mut self) -> Result<Expr, ParserError> {
        self.expect_token("(")?;
        let expr = self.parse_expr()?;
        let target = if self.parse_keyword(Keyword::USING) {
            ConvertTarget::Charset(self.parse_charset_name()?)
        } else {
            self.expect_token(",")?;
            ConvertTarget::DataType(self.parse_verbatim_type()?)
        };
        self.expect_token(")")?;
        Ok(Expr::Convert {
            expr: Box::new(expr),
            target,
        })
    }

    /// Capture a data type as written, up to the `)` closing the enclosing
    /// call.
    fn parse_verbatim_type(&mut self) -> Result<String, ParserError> {
        let data_type = self.parse_balanced_text()?;
        if data_type.is_empty() {
            return self.expected("a data type", self.peek_token());
        }
        Ok(data_type)
    }

    /// Parse `{<kind> <expr>}`, assuming the `{` was already consumed.
    fn parse_odbc_escape(&mut self) -> Result<Expr, ParserError> {
        let kind = self.parse_identifier()?;
        let expr = self.parse_expr()?;
        self.expect_token("}")?;
        Ok(Expr::OdbcEscape {
            kind,
            expr: Box::new(expr),
        })
    }

    /// Parse what follows a `(` in prefix position: a subquery, a nested
    /// expression or a tuple.
    fn parse_parenthesized_prefix(&mut self) -> Result<Expr, ParserError> {
        match self.parse_parenthesized_body()? {
            Parenthesized::Subquery(subquery) => Ok(Expr::Subquery(subquery)),
            Parenthesized::Exprs(mut exprs) => {
                if exprs.len() == 1 {
                    Ok(Expr::Nested(Box::new(exprs.remove(0))))
                } else {
                    Ok(Expr::Row {
                        exprs,
                        explicit: false,
                    })
                }
            }
        }
    }

    /// Parse the contents of a parenthesized group and its closing `)`,
    /// assuming the `(` was already consumed.
    fn parse_parenthesized_body(&mut self) -> Result<Parenthesized, ParserError> {
        if self.query_starts_at(0) {
            if !self.peek_symbol("(") {
                return Ok(Parenthesized::Subquery(self.parse_subquery_and_close()?));
            }
            // `((SELECT 1) + 1)` is an expression, `((SELECT 1) UNION (SELECT 2))` a query
            if let Some(exprs) = self.maybe_parse(Parser::parse_exprs_and_close)? {
                return Ok(Parenthesized::Exprs(exprs));
            }
            return Ok(Parenthesized::Subquery(self.parse_subquery_and_close()?));
        }
        Ok(Parenthesized::Exprs(self.parse_exprs_and_close()?))
    }

    fn parse_exprs_and_close(&mut self) -> Result<Vec<Expr>, ParserError> {
        let exprs = self.parse_comma_separated(Parser::parse_expr)?;
        self.expect_token(")")?;
        Ok(exprs)
    }

    fn parse_subquery_and_close(&mut self) -> Result<Subquery, ParserError> {
        let subquery = self.parse_subquery()?;
        self.expect_token(")")?;
        Ok(subquery)
    }

    /// Parse a subquery and its closing `)`, assuming the `(` was already
    /// consumed.
    fn parse_required_subquery(&mut self) -> Result<Subquery, ParserError> {
        if !self.query_starts_at(0) {
            return self.expected("a subquery", self.peek_token());
        }
        match self.parse_parenthesized_body()? {
            Parenthesized::Subquery(subquery) => Ok(subquery),
            Parenthesized::Exprs(mut exprs) => match exprs.pop() {
                Some(Expr::Subquery(subquery)) if exprs.is_empty() => Ok(subquery),
                _ => self.expected("a subquery", self.peek_token()),
            },
        }
    }

    /// Whether a query begins at the `n`th significant token, possibly
    /// behind more opening parentheses.
    pub fn query_starts_at(&self, mut n: usize) -> bool {
        while self.peek_nth_token(n).is_symbol("(") {
            n += 1;
        }
        match self.peek_nth_token(n).keyword {
            Keyword::SELECT | Keyword::WITH | Keyword::TABLE => true,
            Keyword::VALUES => self.peek_nth_token(n + 1).is_keyword(Keyword::ROW),
            _ => false,
        }
    }

    /// Hand the cursor to the subquery parser this parser was built with.
    pub fn parse_subquery(&mut self) -> Result<Subquery, ParserError> {
        let subquery_parser = self.subquery_parser;
        subquery_parser.parse_subquery(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_precedence_values_are_ordered() {
        assert!(Precedence::Assign < Precedence::Or);
        assert!(Precedence::Comparison < Precedence::Predicate);
        assert!(Precedence::BitXor < Precedence::Concat);
        assert!(Precedence::Concat < Precedence::Unary);
        assert!(Precedence::Collate < Precedence::Json);
    }

    #[test]
    fn test_or_binds_looser_than_and() {
        let expr = all_dialects().verified_expr("1 OR 0 AND 0");
        assert_eq!(
            expr,
            Expr::binary(
                number("1"),
                BinaryOperator::Or,
                Expr::binary(number("0"), BinaryOperator::And, number("0")),
            )
        );
    }

    #[test]
    fn test_between_stops_at_and() {
        let expr = all_dialects().verified_expr("a BETWEEN 1 AND 2 AND b");
        match expr {
            Expr::BinaryOp {
                left,
                op: BinaryOperator::And,
                right,
                ..
            } => {
                assert!(matches!(
                    *left,
                    Expr::TernaryOp {
                        op: TernaryOperator::Between,
                        ..
                    }
                ));
                assert_eq!(*right, ident("b"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plus_interval() {
        let expr = all_dialects().verified_expr("d + INTERVAL 1 DAY");
        assert_eq!(
            expr,
            Expr::binary(
                ident("d"),
                BinaryOperator::Plus,
                Expr::Interval {
                    value: Box::new(number("1")),
                    unit: IntervalUnit::Day,
                },
            )
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = all_dialects().verified_expr("@a := @b := 1");
        match expr {
            Expr::BinaryOp {
                op: BinaryOperator::Assign,
                right,
                ..
            } => assert!(matches!(
                *right,
                Expr::BinaryOp {
                    op: BinaryOperator::Assign,
                    ..
                }
            )),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_placeholders_are_numbered() {
        let expr = all_dialects().verified_expr("? + ?");
        assert_eq!(
            expr,
            Expr::binary(
                Expr::Placeholder(0),
                BinaryOperator::Plus,
                Expr::Placeholder(1)
            )
        );
    }

    #[test]
    fn test_reserved_word_is_not_an_expression() {
        let err = all_dialects().parse_expr("SELECT").unwrap_err();
        assert_eq!(
            err.to_string(),
            "sql parser error: Expected: an expression, found: SELECT at Line: 1, Column: 1"
        );
    }
}
