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

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::TruthValue;

/// Unary operators
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOperator {
    Plus,
    Minus,
    /// `~9`
    BitwiseNot,
    /// `NOT a`
    Not,
    /// `!a`
    LogicalNot,
    /// `BINARY 'a'`
    Binary,
    /// Postfix `IS TRUE`, `IS NULL`, ...
    Is(TruthValue),
    /// Postfix `IS NOT TRUE`, `IS NOT NULL`, ...
    IsNot(TruthValue),
}

impl UnaryOperator {
    /// Whether the operator follows its operand.
    pub fn is_postfix(&self) -> bool {
        matches!(self, UnaryOperator::Is(_) | UnaryOperator::IsNot(_))
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOperator::Plus => f.write_str("+"),
            UnaryOperator::Minus => f.write_str("-"),
            UnaryOperator::BitwiseNot => f.write_str("~"),
            UnaryOperator::Not => f.write_str("NOT"),
            UnaryOperator::LogicalNot => f.write_str("!"),
            UnaryOperator::Binary => f.write_str("BINARY"),
            UnaryOperator::Is(value) => write!(f, "IS {value}"),
            UnaryOperator::IsNot(value) => write!(f, "IS NOT {value}"),
        }
    }
}

/// Binary operators
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOperator {
    /// `@a := 1`
    Assign,
    Or,
    Xor,
    And,
    Eq,
    /// `<=>`
    NullSafeEq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Like,
    NotLike,
    /// `REGEXP` or `RLIKE`
    Regexp,
    NotRegexp,
    SoundsLike,
    /// `a MEMBER OF (json_array)`
    MemberOf,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    Plus,
    Minus,
    Multiply,
    Divide,
    /// `DIV`
    IntegerDivide,
    /// `%` or `MOD`
    Modulo,
    /// `||` with `PIPES_AS_CONCAT`
    StringConcat,
    /// `->`
    JsonExtract,
    /// `->>`
    JsonUnquoteExtract,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            BinaryOperator::Assign => ":=",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::And => "AND",
            BinaryOperator::Eq => "=",
            BinaryOperator::NullSafeEq => "<=>",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::NotLike => "NOT LIKE",
            BinaryOperator::Regexp => "REGEXP",
            BinaryOperator::NotRegexp => "NOT REGEXP",
            BinaryOperator::SoundsLike => "SOUNDS LIKE",
            BinaryOperator::MemberOf => "MEMBER OF",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::IntegerDivide => "DIV",
            BinaryOperator::Modulo => "%",
            BinaryOperator::StringConcat => "||",
            BinaryOperator::JsonExtract => "->",
            BinaryOperator::JsonUnquoteExtract => "->>",
        })
    }
}

/// Operators taking three operands, written with two separate words.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TernaryOperator {
    /// `a BETWEEN b AND c`
    Between,
    NotBetween,
    /// `a LIKE b ESCAPE c`
    LikeEscape,
    NotLikeEscape,
}

impl TernaryOperator {
    /// The words written before the second and the third operand.
    pub fn words(&self) -> (&'static str, &'static str) {
        match self {
            TernaryOperator::Between => ("BETWEEN", "AND"),
            TernaryOperator::NotBetween => ("NOT BETWEEN", "AND"),
            TernaryOperator::LikeEscape => ("LIKE", "ESCAPE"),
            TernaryOperator::NotLikeEscape => ("NOT LIKE", "ESCAPE"),
        }
    }
}

impl fmt::Display for TernaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (first, second) = self.words();
        write!(f, "{first} ... {second}")
    }
}
