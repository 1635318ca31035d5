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

//! Session settings shared by the lexer and the parsers of one session.
//!
//! `DELIMITER` and `SET` directives change these settings while a session
//! is being parsed; every statement lexed afterwards sees the new values.

use core::cell::{Ref, RefCell};
use core::fmt;
use core::ops::{BitOr, BitOrAssign};
use std::rc::Rc;

use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The set of active `sql_mode` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SqlMode(u32);

impl SqlMode {
    pub const NONE: SqlMode = SqlMode(0);
    /// `"..."` quotes identifiers instead of strings.
    pub const ANSI_QUOTES: SqlMode = SqlMode(1 << 0);
    /// Backslash is an ordinary character inside quotes.
    pub const NO_BACKSLASH_ESCAPES: SqlMode = SqlMode(1 << 1);
    /// `||` concatenates strings instead of being a logical `OR`.
    pub const PIPES_AS_CONCAT: SqlMode = SqlMode(1 << 2);
    /// `NOT a BETWEEN b AND c` negates `a` only.
    pub const HIGH_NOT_PRECEDENCE: SqlMode = SqlMode(1 << 3);
    /// Whitespace is allowed between a function name and `(`.
    pub const IGNORE_SPACE: SqlMode = SqlMode(1 << 4);
    pub const REAL_AS_FLOAT: SqlMode = SqlMode(1 << 5);
    pub const ONLY_FULL_GROUP_BY: SqlMode = SqlMode(1 << 6);
    pub const STRICT_TRANS_TABLES: SqlMode = SqlMode(1 << 7);
    pub const STRICT_ALL_TABLES: SqlMode = SqlMode(1 << 8);
    pub const NO_ZERO_IN_DATE: SqlMode = SqlMode(1 << 9);
    pub const NO_ZERO_DATE: SqlMode = SqlMode(1 << 10);
    pub const ERROR_FOR_DIVISION_BY_ZERO: SqlMode = SqlMode(1 << 11);
    pub const NO_ENGINE_SUBSTITUTION: SqlMode = SqlMode(1 << 12);
    pub const NO_AUTO_VALUE_ON_ZERO: SqlMode = SqlMode(1 << 13);
    pub const NO_UNSIGNED_SUBTRACTION: SqlMode = SqlMode(1 << 14);
    pub const NO_DIR_IN_CREATE: SqlMode = SqlMode(1 << 15);
    pub const PAD_CHAR_TO_FULL_LENGTH: SqlMode = SqlMode(1 << 16);
    pub const ALLOW_INVALID_DATES: SqlMode = SqlMode(1 << 17);
    pub const TIME_TRUNCATE_FRACTIONAL: SqlMode = SqlMode(1 << 18);

    pub const ANSI: SqlMode = SqlMode(
        Self::REAL_AS_FLOAT.0
            | Self::PIPES_AS_CONCAT.0
            | Self::ANSI_QUOTES.0
            | Self::IGNORE_SPACE.0
            | Self::ONLY_FULL_GROUP_BY.0,
    );
    pub const TRADITIONAL: SqlMode = SqlMode(
        Self::STRICT_TRANS_TABLES.0
            | Self::STRICT_ALL_TABLES.0
            | Self::NO_ZERO_IN_DATE.0
            | Self::NO_ZERO_DATE.0
            | Self::ERROR_FOR_DIVISION_BY_ZERO.0
            | Self::NO_ENGINE_SUBSTITUTION.0,
    );

    const NAMED: &'static [(&'static str, SqlMode)] = &[
        ("ANSI_QUOTES", Self::ANSI_QUOTES),
        ("NO_BACKSLASH_ESCAPES", Self::NO_BACKSLASH_ESCAPES),
        ("PIPES_AS_CONCAT", Self::PIPES_AS_CONCAT),
        ("HIGH_NOT_PRECEDENCE", Self::HIGH_NOT_PRECEDENCE),
        ("IGNORE_SPACE", Self::IGNORE_SPACE),
        ("REAL_AS_FLOAT", Self::REAL_AS_FLOAT),
        ("ONLY_FULL_GROUP_BY", Self::ONLY_FULL_GROUP_BY),
        ("STRICT_TRANS_TABLES", Self::STRICT_TRANS_TABLES),
        ("STRICT_ALL_TABLES", Self::STRICT_ALL_TABLES),
        ("NO_ZERO_IN_DATE", Self::NO_ZERO_IN_DATE),
        ("NO_ZERO_DATE", Self::NO_ZERO_DATE),
        ("ERROR_FOR_DIVISION_BY_ZERO", Self::ERROR_FOR_DIVISION_BY_ZERO),
        ("NO_ENGINE_SUBSTITUTION", Self::NO_ENGINE_SUBSTITUTION),
        ("NO_AUTO_VALUE_ON_ZERO", Self::NO_AUTO_VALUE_ON_ZERO),
        ("NO_UNSIGNED_SUBTRACTION", Self::NO_UNSIGNED_SUBTRACTION),
        ("NO_DIR_IN_CREATE", Self::NO_DIR_IN_CREATE),
        ("PAD_CHAR_TO_FULL_LENGTH", Self::PAD_CHAR_TO_FULL_LENGTH),
        ("ALLOW_INVALID_DATES", Self::ALLOW_INVALID_DATES),
        ("TIME_TRUNCATE_FRACTIONAL", Self::TIME_TRUNCATE_FRACTIONAL),
    ];

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: SqlMode) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: SqlMode) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: SqlMode) {
        self.0 &= !other.0;
    }

    /// Resolve a single mode name, including the `ANSI` and `TRADITIONAL`
    /// combinations.
    pub fn from_name(name: &str) -> Option<SqlMode> {
        let name = name.trim().to_ascii_uppercase();
        match name.as_str() {
            "ANSI" => Some(Self::ANSI),
            "TRADITIONAL" => Some(Self::TRADITIONAL),
            _ => Self::NAMED
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, mode)| *mode),
        }
    }

    /// Parse a comma separated list of mode names as found in
    /// `SET sql_mode = '...'`. Unknown names are logged and skipped.
    pub fn parse(text: &str) -> SqlMode {
        let mut mode = SqlMode::NONE;
        for name in text.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match SqlMode::from_name(name) {
                Some(m) => mode.insert(m),
                None => warn!("ignoring unknown sql_mode '{}'", name),
            }
        }
        mode
    }
}

impl BitOr for SqlMode {
    type Output = SqlMode;

    fn bitor(self, rhs: SqlMode) -> SqlMode {
        SqlMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for SqlMode {
    fn bitor_assign(&mut self, rhs: SqlMode) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for SqlMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut delim = "";
        for (name, mode) in Self::NAMED {
            if self.contains(*mode) {
                write!(f, "{delim}{name}")?;
                delim = ",";
            }
        }
        Ok(())
    }
}

/// Settings of one parse session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSettings {
    /// Statement delimiter, `;` unless changed by a `DELIMITER` directive.
    pub delimiter: String,
    pub sql_mode: SqlMode,
    /// Connection character set from `SET NAMES` / `SET CHARACTER SET`.
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            sql_mode: SqlMode::NONE,
            charset: None,
            collation: None,
        }
    }
}

impl SessionSettings {
    pub fn with_sql_mode(mut self, sql_mode: SqlMode) -> Self {
        self.sql_mode = sql_mode;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

/// A handle to the [`SessionSettings`] of one session.
///
/// Clones share the same settings. The handle is neither `Send` nor `Sync`:
/// each session owns its own cell and mutates it from one place at a time.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings(Rc<RefCell<SessionSettings>>);

impl SharedSettings {
    pub fn new(settings: SessionSettings) -> Self {
        Self(Rc::new(RefCell::new(settings)))
    }

    pub fn borrow(&self) -> Ref<'_, SessionSettings> {
        self.0.borrow()
    }

    /// Copy of the current settings.
    pub fn snapshot(&self) -> SessionSettings {
        self.0.borrow().clone()
    }

    pub fn sql_mode(&self) -> SqlMode {
        self.0.borrow().sql_mode
    }

    pub fn has_mode(&self, mode: SqlMode) -> bool {
        self.0.borrow().sql_mode.contains(mode)
    }

    pub fn delimiter(&self) -> String {
        self.0.borrow().delimiter.clone()
    }

    pub fn set_delimiter(&self, delimiter: impl Into<String>) {
        self.0.borrow_mut().delimiter = delimiter.into();
    }

    pub fn set_sql_mode(&self, sql_mode: SqlMode) {
        self.0.borrow_mut().sql_mode = sql_mode;
    }

    /// Apply `f` to the settings. `f` must not access this handle.
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionSettings) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}
