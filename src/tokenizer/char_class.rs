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

//! Character classes of the ASCII range, computed at compile time.

pub(crate) const DIGIT: u8 = 1 << 0;
pub(crate) const HEX_DIGIT: u8 = 1 << 1;
pub(crate) const LETTER: u8 = 1 << 2;
/// Can appear in an unquoted identifier.
pub(crate) const IDENT: u8 = 1 << 3;
/// Can appear in an operator.
pub(crate) const OPERATOR: u8 = 1 << 4;
pub(crate) const SYMBOL: u8 = 1 << 5;
pub(crate) const WHITESPACE: u8 = 1 << 6;
/// Control character that may not appear outside quotes and comments.
pub(crate) const CONTROL: u8 = 1 << 7;

static CLASSES: [u8; 128] = build_classes();

const fn build_classes() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let c = i as u8;
        let mut class = 0;
        if c.is_ascii_digit() {
            class |= DIGIT | HEX_DIGIT | IDENT;
        }
        if c.is_ascii_alphabetic() {
            class |= LETTER | IDENT;
        }
        if matches!(c, b'a'..=b'f' | b'A'..=b'F') {
            class |= HEX_DIGIT;
        }
        if matches!(c, b'_' | b'$') {
            class |= IDENT;
        }
        if matches!(
            c,
            b'=' | b'<' | b'>' | b'!' | b'~' | b'^' | b'|' | b'&' | b'+' | b'-' | b'*' | b'/' | b'%'
        ) {
            class |= OPERATOR;
        }
        if matches!(
            c,
            b'(' | b')' | b',' | b';' | b'.' | b'[' | b']' | b'{' | b'}' | b':'
        ) {
            class |= SYMBOL;
        }
        if matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) {
            class |= WHITESPACE;
        } else if c < 0x20 || c == 0x7f {
            class |= CONTROL;
        }
        table[i] = class;
        i += 1;
    }
    table
}

/// Whether `ch` is ASCII and belongs to any of `classes`.
#[inline]
pub(crate) fn is(ch: char, classes: u8) -> bool {
    (ch as u32) < 128 && CLASSES[ch as usize] & classes != 0
}
