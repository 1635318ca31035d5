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

//! # MySQL Lexer and Expression Parser
//!
//! Lexes MySQL and MariaDB SQL the way a given server version does, and
//! parses expressions and session directives into an abstract syntax tree
//! ([`ast`]). Statements the crate has no grammar for are classified and
//! kept as their source text, or handed to a caller supplied
//! [`parser::StatementParser`].
//!
//! # Example parsing a script
//!
//! ```
//! use mysqlparser::dialect::MySqlDialect;
//! use mysqlparser::session::Session;
//!
//! let sql = "SET sql_mode = 'ANSI_QUOTES';\n\
//!            DELIMITER //\n\
//!            SELECT \"a\" FROM t //";
//!
//! let dialect = MySqlDialect::default();
//! let results = Session::new(&dialect).parse(sql);
//! assert_eq!(results.len(), 3);
//! assert_eq!(results[2].as_ref().unwrap().to_string(), "SELECT \"a\" FROM t");
//! ```
//!
//! # Example parsing an expression
//!
//! ```
//! use mysqlparser::dialect::MySqlDialect;
//! use mysqlparser::parser::Parser;
//!
//! let dialect = MySqlDialect::default();
//! let expr = Parser::new(&dialect)
//!     .try_with_sql("a BETWEEN 1 AND 2 OR b LIKE 'x%'")
//!     .and_then(|mut parser| parser.parse_expr())
//!     .unwrap();
//! assert_eq!(expr.to_string(), "a BETWEEN 1 AND 2 OR b LIKE 'x%'");
//! ```
//!
//! Dialect settings that directives change (the delimiter and `sql_mode`)
//! live in a [`settings::SharedSettings`] cell shared by the lexer and the
//! parser of one session. A session is single threaded; independent
//! sessions may run on different threads.

#![warn(clippy::all)]
#![allow(clippy::upper_case_acronyms)]

// keyword_enum! is used by the modules declared after this one
#[macro_use]
pub mod keywords;

pub mod ast;
pub mod dialect;
pub mod parser;
pub mod session;
pub mod settings;
pub mod tokenizer;

#[doc(hidden)]
// This is required to make utilities accessible by both the crate-internal
// unit-tests and by the integration tests <https://stackoverflow.com/a/44541071/1026>
// External users are not supposed to rely on this module.
pub mod test_utils;
