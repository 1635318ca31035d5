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

//! This module defines
//! 1) a list of constants for every keyword
//! 2) an `ALL_KEYWORDS` array with every keyword in it
//! 3) a `KEYWORD_TRAITS` table saying, per keyword, in which server
//!    versions it is reserved and whether it takes part in operators
//!
//! The tables are generated by `build.rs` from `src/keywords.txt`.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Half-open range `[since, until)` of server versions, encoded as `XYYZZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
    pub since: u32,
    pub until: u32,
}

impl VersionRange {
    pub const fn contains(&self, version: u32) -> bool {
        self.since <= version && version < self.until
    }
}

/// Static facts about a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeywordTraits {
    /// Versions in which the word may not be used as a bare identifier.
    pub reserved: Option<VersionRange>,
    /// Whether the word starts or continues an operator (`AND`, `LIKE`, ...).
    pub operator: bool,
}

include!(concat!(env!("OUT_DIR"), "/keyword_gen.rs"));

/// Functions that may be called without parentheses.
pub const NILADIC_FUNCTIONS: &[Keyword] = &[
    Keyword::CURRENT_DATE,
    Keyword::CURRENT_TIME,
    Keyword::CURRENT_TIMESTAMP,
    Keyword::CURRENT_USER,
    Keyword::LOCALTIME,
    Keyword::LOCALTIMESTAMP,
    Keyword::UTC_DATE,
    Keyword::UTC_TIME,
    Keyword::UTC_TIMESTAMP,
];

/// Reserved words that are complete literal operands on their own.
pub const VALUE_KEYWORDS: &[Keyword] = &[
    Keyword::NULL,
    Keyword::TRUE,
    Keyword::FALSE,
    Keyword::DEFAULT,
    Keyword::MAXVALUE,
];

/// Compound interval units, reserved and placed after an interval value.
pub const RESERVED_INTERVAL_UNITS: &[Keyword] = &[
    Keyword::DAY_HOUR,
    Keyword::DAY_MICROSECOND,
    Keyword::DAY_MINUTE,
    Keyword::DAY_SECOND,
    Keyword::HOUR_MICROSECOND,
    Keyword::HOUR_MINUTE,
    Keyword::HOUR_SECOND,
    Keyword::MINUTE_MICROSECOND,
    Keyword::MINUTE_SECOND,
    Keyword::SECOND_MICROSECOND,
    Keyword::YEAR_MONTH,
];

/// Longest keyword, used to skip the map lookup for long names.
const MAX_KEYWORD_LEN: usize = 32;

impl Keyword {
    /// Resolve `word` (any case) to a keyword, or `NoKeyword`.
    pub fn lookup(word: &str) -> Keyword {
        if word.is_empty() || word.len() > MAX_KEYWORD_LEN || !word.is_ascii() {
            return Keyword::NoKeyword;
        }
        let upper = word.to_ascii_uppercase();
        KEYWORD_MAP
            .get(upper.as_str())
            .copied()
            .unwrap_or(Keyword::NoKeyword)
    }

    pub fn traits(self) -> &'static KeywordTraits {
        &KEYWORD_TRAITS[self as usize]
    }

    /// Whether the keyword is reserved in server `version`.
    pub fn is_reserved_in(self, version: u32) -> bool {
        self.traits()
            .reserved
            .map_or(false, |range| range.contains(version))
    }

    pub fn is_operator(self) -> bool {
        self.traits().operator
    }

    /// Whether the word on its own can be the last token of an operand.
    pub fn ends_operand(self) -> bool {
        VALUE_KEYWORDS.contains(&self)
            || NILADIC_FUNCTIONS.contains(&self)
            || RESERVED_INTERVAL_UNITS.contains(&self)
    }

    /// Canonical upper-case spelling. Empty for `NoKeyword`.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::NoKeyword => "",
            kw => ALL_KEYWORDS[kw as usize - 1],
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed set of values, each spelled by one keyword.
///
/// Implemented through [`keyword_enum!`], which generates both directions of
/// the keyword mapping as exhaustive matches.
pub trait KeywordEnum: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const VARIANTS: &'static [Self];

    fn from_keyword(keyword: Keyword) -> Option<Self>;

    fn keyword(self) -> Keyword;

    /// Keywords of all members, for diagnostics.
    fn keywords() -> Vec<Keyword> {
        Self::VARIANTS.iter().map(|v| v.keyword()).collect()
    }
}

/// Declare an enum whose variants are spelled by keywords:
///
/// ```ignore
/// keyword_enum! {
///     pub enum TruthValue {
///         True = TRUE,
///         False = FALSE,
///     }
/// }
/// ```
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $kw:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),*
        }

        impl $crate::keywords::KeywordEnum for $name {
            const VARIANTS: &'static [Self] = &[ $( $name::$variant ),* ];

            fn from_keyword(keyword: $crate::keywords::Keyword) -> Option<Self> {
                match keyword {
                    $( $crate::keywords::Keyword::$kw => Some($name::$variant), )*
                    _ => None,
                }
            }

            fn keyword(self) -> $crate::keywords::Keyword {
                match self {
                    $( $name::$variant => $crate::keywords::Keyword::$kw ),*
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                use $crate::keywords::KeywordEnum;
                f.write_str(self.keyword().as_str())
            }
        }
    };
}
