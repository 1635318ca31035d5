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

/// The source spelling of an operator, e.g. `NOT REGEXP`, `&&` or `mod`.
///
/// Tokens of multi-word operators are joined by a single space.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spelling(pub String);

impl Spelling {
    /// The default spelling of `op`, for trees built by hand.
    pub fn canonical(op: &impl fmt::Display) -> Self {
        Spelling(op.to_string())
    }
}

impl From<&str> for Spelling {
    fn from(s: &str) -> Self {
        Spelling(s.to_string())
    }
}

/// A subquery, parsed by the statement layer the expression parser was
/// given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subquery(pub Box<Statement>);

/// An SQL expression of any type.
///
/// The parser does not distinguish between expressions of different types
/// (e.g. boolean vs string), so the caller must handle expressions of
/// inappropriate type, like `WHERE 1` or `SELECT 1=1`, as necessary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// Column or other name, one to three parts: `col`, `t.col`, `db.t.col`
    Identifier(ObjectName),
    /// `*` in `COUNT(*)`, or a qualified `t.*`
    Wildcard(Vec<Ident>),
    /// A literal value, such as string, number or NULL
    Value(Value),
    /// `DATE '2020-01-01'`, `TIME '10:00'`, `TIMESTAMP '...'`
    TypedString { data_type: String, value: String },
    /// `@name`, `@'name'`
    UserVariable(Ident),
    /// `@@name`, `@@global.name`
    SystemVariable {
        scope: Option<VariableScope>,
        name: Ident,
    },
    /// `?`, numbered from 0 in order of appearance
    Placeholder(usize),
    /// Prefix `-a`, `NOT a`, `BINARY a` or postfix `a IS NOT NULL`
    UnaryOp {
        op: UnaryOperator,
        spelling: Spelling,
        expr: Box<Expr>,
    },
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        spelling: Spelling,
        right: Box<Expr>,
    },
    /// `a [NOT] BETWEEN b AND c`, `a [NOT] LIKE b ESCAPE c`
    TernaryOp {
        op: TernaryOperator,
        spelling: (Spelling, Spelling),
        first: Box<Expr>,
        second: Box<Expr>,
        third: Box<Expr>,
    },
    /// `a [NOT] IN (1, 2, 3)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
        spelling: Spelling,
    },
    /// `a [NOT] IN (SELECT ...)`
    InSubquery {
        expr: Box<Expr>,
        subquery: Subquery,
        negated: bool,
        spelling: Spelling,
    },
    /// `a > ALL (SELECT ...)`
    Quantified {
        left: Box<Expr>,
        op: BinaryOperator,
        spelling: Spelling,
        quantifier: Quantifier,
        subquery: Subquery,
    },
    /// `EXISTS (SELECT ...)`
    Exists(Subquery),
    /// A parenthesized subquery `(SELECT ...)`, used in an expression like
    /// `SELECT (subquery) AS x` or `WHERE (subquery) = x`
    Subquery(Subquery),
    /// Nested expression e.g. `(foo > bar)` or `(1)`
    Nested(Box<Expr>),
    /// `ROW(1, 2)` or the tuple `(1, 2)`
    Row { exprs: Vec<Expr>, explicit: bool },
    /// Scalar function call e.g. `LEFT(foo, 5)`
    Function(Function),
    /// `CASE [<operand>] WHEN <condition> THEN <result> ... [ELSE <result>] END`
    ///
    /// Note we only recognize a complete single expression as `<condition>`,
    /// not `< 0` nor `1, 2, 3` as allowed in a `<simple when clause>` per
    /// <https://jakewheat.github.io/sql-overview/sql-2011-foundation-grammar.html#simple-when-clause>
    Case {
        operand: Option<Box<Expr>>,
        branches: Vec<CaseWhen>,
        else_result: Option<Box<Expr>>,
    },
    /// `MATCH (col, ...) AGAINST (expr [modifier])`
    Match {
        columns: Vec<ObjectName>,
        against: Box<Expr>,
        modifier: Option<SearchModifier>,
    },
    /// `INTERVAL 1 DAY`
    Interval {
        value: Box<Expr>,
        unit: IntervalUnit,
    },
    /// `expr COLLATE name`
    Collate { expr: Box<Expr>, collation: Ident },
    /// `CAST(expr AS type)`, the type kept as written
    Cast { expr: Box<Expr>, data_type: String },
    /// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`
    Convert {
        expr: Box<Expr>,
        target: ConvertTarget,
    },
    /// ODBC escape such as `{d '2024-01-01'}`
    OdbcEscape { kind: Ident, expr: Box<Expr> },
}

impl Expr {
    /// A literal value.
    pub fn value(value: impl Into<Value>) -> Self {
        Expr::Value(value.into())
    }

    /// An unqualified column name.
    pub fn column(name: &str) -> Self {
        Expr::Identifier(ObjectName(vec![Ident::new(name)]))
    }

    /// A binary operation spelled the canonical way.
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(left),
            spelling: Spelling::canonical(&op),
            op,
            right: Box::new(right),
        }
    }

    /// A unary operation spelled the canonical way.
    pub fn unary(op: UnaryOperator, expr: Expr) -> Self {
        Expr::UnaryOp {
            spelling: Spelling::canonical(&op),
            op,
            expr: Box::new(expr),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

/// A function call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    pub name: ObjectName,
    pub args: FunctionArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionArgs {
    /// `CURRENT_TIMESTAMP` and other functions called without parentheses
    None,
    /// `(DISTINCT a, b)`
    List { distinct: bool, args: Vec<Expr> },
}

keyword_enum! {
    /// Quantifier of a comparison with a subquery.
    pub enum Quantifier {
        All = ALL,
        Any = ANY,
        Some = SOME,
    }
}

/// Search modifier of `MATCH ... AGAINST`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchModifier {
    /// `IN NATURAL LANGUAGE MODE`
    InNaturalLanguageMode,
    /// `IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION`
    InNaturalLanguageModeWithQueryExpansion,
    /// `IN BOOLEAN MODE`
    InBooleanMode,
    /// `WITH QUERY EXPANSION`
    WithQueryExpansion,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConvertTarget {
    /// `CONVERT(expr, CHAR(10))`
    DataType(String),
    /// `CONVERT(expr USING utf8mb4)`
    Charset(Ident),
}
