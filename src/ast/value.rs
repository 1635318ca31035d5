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

/// Primitive SQL values such as number and string
///
/// Numbers keep the exact text they were written with: decimal literals
/// carry their full precision and are never coerced to floats.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// `42`, `-7`
    Integer(String),
    /// `1.50`, `.5` (kept as `0.5`)
    Decimal(String),
    /// `1e10`, `2.5E-3`
    Float(String),
    /// 'string value'; adjacent literals are concatenated
    SingleQuotedString(String),
    /// N'string value'
    NationalStringLiteral(String),
    /// A string with a character set introducer, e.g. `_utf8mb4'abc'`
    IntroducedString { charset: String, value: String },
    /// `0x1F` or `X'1F'`, hex digits only
    HexStringLiteral(String),
    /// `0b101` or `B'101'`, binary digits only
    BitStringLiteral(String),
    /// `123e4567-e89b-12d3-a456-426614174000`
    Uuid(String),
    /// `192.168.0.1`
    Ipv4(String),
    Boolean(bool),
    Null,
    Default,
    On,
    Off,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(v) | Value::Decimal(v) | Value::Float(v) => f.write_str(v),
            Value::SingleQuotedString(v) => write!(f, "'{}'", escape_quoted_string(v, '\'')),
            Value::NationalStringLiteral(v) => write!(f, "N'{}'", escape_quoted_string(v, '\'')),
            Value::IntroducedString { charset, value } => {
                write!(f, "{charset}'{}'", escape_quoted_string(value, '\''))
            }
            Value::HexStringLiteral(v) if v.is_empty() => f.write_str("X''"),
            Value::HexStringLiteral(v) => write!(f, "0x{v}"),
            Value::BitStringLiteral(v) if v.is_empty() => f.write_str("B''"),
            Value::BitStringLiteral(v) => write!(f, "0b{v}"),
            Value::Uuid(v) | Value::Ipv4(v) => f.write_str(v),
            Value::Boolean(v) => f.write_str(if *v { "TRUE" } else { "FALSE" }),
            Value::Null => f.write_str("NULL"),
            Value::Default => f.write_str("DEFAULT"),
            Value::On => f.write_str("ON"),
            Value::Off => f.write_str("OFF"),
        }
    }
}

pub struct EscapeQuotedString<'a> {
    string: &'a str,
    quote: char,
}

impl fmt::Display for EscapeQuotedString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.string.chars() {
            match c {
                c if c == self.quote => write!(f, "{q}{q}", q = self.quote)?,
                '\\' => f.write_str("\\\\")?,
                '\0' => f.write_str("\\0")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{1a}' => f.write_str("\\Z")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// Escape `string` for use between two `quote` characters.
pub fn escape_quoted_string(string: &str, quote: char) -> EscapeQuotedString<'_> {
    EscapeQuotedString { string, quote }
}

keyword_enum! {
    /// Right-hand side of `IS [NOT]`.
    pub enum TruthValue {
        True = TRUE,
        False = FALSE,
        Unknown = UNKNOWN,
        Null = NULL,
    }
}

keyword_enum! {
    /// Unit of an `INTERVAL expr unit` literal.
    pub enum IntervalUnit {
        Microsecond = MICROSECOND,
        Second = SECOND,
        Minute = MINUTE,
        Hour = HOUR,
        Day = DAY,
        Week = WEEK,
        Month = MONTH,
        Quarter = QUARTER,
        Year = YEAR,
        SecondMicrosecond = SECOND_MICROSECOND,
        MinuteMicrosecond = MINUTE_MICROSECOND,
        MinuteSecond = MINUTE_SECOND,
        HourMicrosecond = HOUR_MICROSECOND,
        HourSecond = HOUR_SECOND,
        HourMinute = HOUR_MINUTE,
        DayMicrosecond = DAY_MICROSECOND,
        DaySecond = DAY_SECOND,
        DayMinute = DAY_MINUTE,
        DayHour = DAY_HOUR,
        YearMonth = YEAR_MONTH,
    }
}
