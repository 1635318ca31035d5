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

//! Platform descriptors: which keywords are reserved, which operators
//! exist and which version guards hold for a given server.

mod mariadb;
mod mysql;

use core::any::{Any, TypeId};
use core::fmt::Debug;

pub use self::mariadb::MariaDbDialect;
pub use self::mysql::MySqlDialect;
pub use crate::keywords;
use crate::keywords::Keyword;

/// Encode a server version as the `XYYZZ` integer used by version guards
/// (`/*!80002 ... */`) and the keyword tables.
pub const fn server_version(major: u32, minor: u32, patch: u32) -> u32 {
    major * 10000 + minor * 100 + patch
}

/// Operator spellings understood by every dialect. The JSON path operators
/// are added by [`Dialect::is_operator`] where supported.
const OPERATORS: &[&str] = &[
    "=", ":=", "<=>", ">=", ">", "<=", "<", "<>", "!=", "!", "~", "^", "|", "||", "&", "&&",
    "<<", ">>", "+", "-", "*", "/", "%",
];

/// Encapsulates the differences between server flavors and versions.
///
/// The lexer asks it how to classify words and which conditional comments
/// are live; the expression parser asks it which constructs exist.
pub trait Dialect: Debug + Any {
    /// Determine the [`TypeId`] of this dialect.
    fn dialect(&self) -> TypeId {
        self.type_id()
    }

    /// Server version, encoded with [`server_version`].
    fn version(&self) -> u32;

    /// Whether `keyword` can not be used as a bare identifier.
    fn is_reserved(&self, keyword: Keyword) -> bool {
        keyword.is_reserved_in(self.version())
    }

    /// Whether `keyword` starts or continues an operator.
    fn is_operator_keyword(&self, keyword: Keyword) -> bool {
        keyword.is_operator()
    }

    /// Whether `text` is a complete operator. The lexer extends an operator
    /// one character at a time while this holds.
    fn is_operator(&self, text: &str) -> bool {
        OPERATORS.contains(&text)
            || (self.supports_json_path_operators() && (text == "->" || text == "->>"))
    }

    /// Whether code guarded by version `guard` is live.
    fn satisfies(&self, guard: u32) -> bool {
        self.version() >= guard
    }

    /// Markers following `/*` that open a conditional comment.
    fn conditional_comment_markers(&self) -> &'static [&'static str] {
        &["!"]
    }

    /// Determine if a character is a valid start character for an unquoted identifier
    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_' || ch == '$' || ch >= '\u{0080}'
    }

    /// Determine if a character is a valid unquoted identifier character
    fn is_identifier_part(&self, ch: char) -> bool {
        self.is_identifier_start(ch) || ch.is_ascii_digit()
    }

    /// `col -> '$.path'` and `col ->> '$.path'`
    fn supports_json_path_operators(&self) -> bool {
        false
    }

    /// `value MEMBER OF (json_array)`
    fn supports_member_of(&self) -> bool {
        false
    }
}

impl dyn Dialect {
    #[inline]
    pub fn is<T: Dialect>(&self) -> bool {
        // borrowed from `Any` implementation
        TypeId::of::<T>() == self.dialect()
    }
}

/// Returns the built in [`Dialect`] corresponding to `dialect_name`.
///
/// `mysql` is the newest supported MySQL, `mysql57` and `mysql80` pin a
/// release line, `mariadb` the newest supported MariaDB.
pub fn dialect_from_str(dialect_name: impl AsRef<str>) -> Option<Box<dyn Dialect>> {
    let dialect_name = dialect_name.as_ref();
    match dialect_name.to_lowercase().as_str() {
        "mysql" | "mysql80" => Some(Box::<MySqlDialect>::default()),
        "mysql57" => Some(Box::new(MySqlDialect::new(server_version(5, 7, 44)))),
        "mariadb" => Some(Box::<MariaDbDialect>::default()),
        _ => None,
    }
}
