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

/// Whether an operator spelled `spelling` must be separated from its
/// operand by a space, e.g. `NOT a` but `-a`.
fn is_word(spelling: &Spelling) -> bool {
    spelling
        .0
        .chars()
        .last()
        .map_or(false, |c| c.is_alphanumeric() || c == '_')
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Subquery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::Wildcard(qualifier) if qualifier.is_empty() => f.write_str("*"),
            Expr::Wildcard(qualifier) => write!(f, "{}.*", display_separated(qualifier, ".")),
            Expr::Value(v) => write!(f, "{v}"),
            Expr::TypedString { data_type, value } => {
                write!(f, "{data_type} '{}'", escape_quoted_string(value, '\''))
            }
            Expr::UserVariable(name) => write!(f, "@{name}"),
            Expr::SystemVariable { scope, name } => match scope {
                Some(scope) => write!(f, "@@{scope}.{name}"),
                None => write!(f, "@@{name}"),
            },
            Expr::Placeholder(_) => f.write_str("?"),
            Expr::UnaryOp { op, spelling, expr } => {
                if op.is_postfix() {
                    write!(f, "{expr} {spelling}")
                } else if is_word(spelling) {
                    write!(f, "{spelling} {expr}")
                } else {
                    write!(f, "{spelling}{expr}")
                }
            }
            Expr::BinaryOp {
                left,
                spelling,
                right,
                ..
            } => write!(f, "{left} {spelling} {right}"),
            Expr::TernaryOp {
                spelling: (first_word, second_word),
                first,
                second,
                third,
                ..
            } => write!(f, "{first} {first_word} {second} {second_word} {third}"),
            Expr::InList {
                expr,
                list,
                spelling,
                ..
            } => write!(f, "{expr} {spelling} ({})", display_comma_separated(list)),
            Expr::InSubquery {
                expr,
                subquery,
                spelling,
                ..
            } => write!(f, "{expr} {spelling} ({subquery})"),
            Expr::Quantified {
                left,
                spelling,
                quantifier,
                subquery,
                ..
            } => write!(f, "{left} {spelling} {quantifier} ({subquery})"),
            Expr::Exists(subquery) => write!(f, "EXISTS ({subquery})"),
            Expr::Subquery(subquery) => write!(f, "({subquery})"),
            Expr::Nested(expr) => write!(f, "({expr})"),
            Expr::Row { exprs, explicit } => {
                if *explicit {
                    f.write_str("ROW")?;
                }
                write_parenthesized(f, exprs)
            }
            Expr::Function(function) => write!(f, "{function}"),
            Expr::Case {
                operand,
                branches,
                else_result,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for branch in branches {
                    write!(f, " {branch}")?;
                }
                if let Some(else_result) = else_result {
                    write!(f, " ELSE {else_result}")?;
                }
                f.write_str(" END")
            }
            Expr::Match {
                columns,
                against,
                modifier,
            } => {
                write!(
                    f,
                    "MATCH ({}) AGAINST ({against}",
                    display_comma_separated(columns)
                )?;
                if let Some(modifier) = modifier {
                    write!(f, " {modifier}")?;
                }
                f.write_str(")")
            }
            Expr::Interval { value, unit } => write!(f, "INTERVAL {value} {unit}"),
            Expr::Collate { expr, collation } => write!(f, "{expr} COLLATE {collation}"),
            Expr::Cast { expr, data_type } => write!(f, "CAST({expr} AS {data_type})"),
            Expr::Convert { expr, target } => match target {
                ConvertTarget::DataType(data_type) => write!(f, "CONVERT({expr}, {data_type})"),
                ConvertTarget::Charset(charset) => write!(f, "CONVERT({expr} USING {charset})"),
            },
            Expr::OdbcEscape { kind, expr } => write!(f, "{{{kind} {expr}}}"),
        }
    }
}

impl fmt::Display for CaseWhen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, self.result)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match &self.args {
            FunctionArgs::None => Ok(()),
            FunctionArgs::List { distinct, args } => write!(
                f,
                "({}{})",
                if *distinct { "DISTINCT " } else { "" },
                display_comma_separated(args)
            ),
        }
    }
}

impl fmt::Display for SearchModifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SearchModifier::InNaturalLanguageMode => "IN NATURAL LANGUAGE MODE",
            SearchModifier::InNaturalLanguageModeWithQueryExpansion => {
                "IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION"
            }
            SearchModifier::InBooleanMode => "IN BOOLEAN MODE",
            SearchModifier::WithQueryExpansion => "WITH QUERY EXPANSION",
        })
    }
}
