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

//! Generates the keyword tables from `src/keywords.txt`.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

struct KeywordDef {
    name: String,
    /// Half-open `[since, until)` version range in which the word is reserved.
    reserved: Option<(u32, u32)>,
    operator: bool,
}

fn parse_version(line: &str, text: &str) -> u32 {
    text.parse()
        .unwrap_or_else(|_| panic!("Invalid version '{}' in: {}", text, line))
}

fn parse_reservation(line: &str, marker: &str) -> (u32, u32) {
    let rest = &marker["reserved".len()..];
    if rest.is_empty() {
        return (0, u32::MAX);
    }
    if let Some(rest) = rest.strip_prefix(">=") {
        return match rest.split_once('<') {
            Some((since, until)) => (parse_version(line, since), parse_version(line, until)),
            None => (parse_version(line, rest), u32::MAX),
        };
    }
    if let Some(until) = rest.strip_prefix('<') {
        return (0, parse_version(line, until));
    }
    panic!("Invalid reservation marker: {}", line);
}

fn read_keywords() -> Vec<KeywordDef> {
    let path = Path::new("src").join("keywords.txt");
    if !path.is_file() {
        panic!("Missing src/keywords.txt");
    }

    let data = std::fs::read_to_string(path).expect("Error reading src/keywords.txt");

    data.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            let mut parts = line.split_ascii_whitespace();
            let name = parts.next()?.to_string();
            let mut def = KeywordDef {
                name,
                reserved: None,
                operator: false,
            };
            for part in parts {
                if part == "operator" {
                    def.operator = true;
                } else if part.starts_with("reserved") {
                    def.reserved = Some(parse_reservation(line, part));
                } else {
                    panic!("Invalid keyword: {}", line);
                }
            }
            Some(def)
        })
        .collect::<Vec<_>>()
}

fn write_keyword_enum<W>(file: &mut BufWriter<W>, keywords: &[KeywordDef])
where
    W: ?Sized + Write,
{
    let header = &[
        "/// A keyword of the MySQL grammar, or `NoKeyword` for plain names.\n",
        "#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]\n",
        "#[cfg_attr(feature = \"serde\", derive(Serialize, Deserialize))]\n",
        "#[allow(non_camel_case_types)]\n",
        "pub enum Keyword {\n",
        "    NoKeyword,\n",
    ];
    let header = header.join("");
    write!(file, "{}", header).unwrap();

    keywords.iter().for_each(|kw| {
        writeln!(file, "    {},", kw.name).unwrap();
    });

    writeln!(file, "}}\n").unwrap();
}

fn write_all_keywords<W>(file: &mut BufWriter<W>, keywords: &[KeywordDef])
where
    W: ?Sized + Write,
{
    writeln!(file, "/// Keyword spellings, in `Keyword` order without `NoKeyword`.").unwrap();
    writeln!(file, "pub const ALL_KEYWORDS: &[&str] = &[").unwrap();
    keywords.iter().for_each(|kw| {
        writeln!(file, "    \"{}\",", kw.name).unwrap();
    });
    writeln!(file, "];\n").unwrap();
}

fn write_keyword_traits<W>(file: &mut BufWriter<W>, keywords: &[KeywordDef])
where
    W: ?Sized + Write,
{
    writeln!(file, "/// Keyword traits, in `Keyword` order including `NoKeyword`.").unwrap();
    writeln!(file, "pub const KEYWORD_TRAITS: &[KeywordTraits] = &[").unwrap();
    writeln!(
        file,
        "    KeywordTraits {{ reserved: None, operator: false }},"
    )
    .unwrap();
    keywords.iter().for_each(|kw| {
        let reserved = match kw.reserved {
            Some((since, until)) => {
                format!("Some(VersionRange {{ since: {}, until: {} }})", since, until)
            }
            None => "None".to_string(),
        };
        writeln!(
            file,
            "    KeywordTraits {{ reserved: {}, operator: {} }},",
            reserved, kw.operator
        )
        .unwrap();
    });
    writeln!(file, "];\n").unwrap();
}

fn write_phf_map<W>(file: &mut BufWriter<W>, keywords: &[KeywordDef])
where
    W: ?Sized + Write,
{
    let map = phf_codegen::Map::new();
    let map = keywords.iter().fold(map, |mut map, kw| {
        map.entry(kw.name.as_str(), &format!("Keyword::{}", kw.name));
        map
    });

    write!(
        file,
        "static KEYWORD_MAP: phf::Map<&'static str, Keyword> = {}",
        map.build()
    )
    .unwrap();
    writeln!(file, ";").unwrap();
}

fn main() {
    println!("cargo:rerun-if-changed=src/keywords.txt");

    let keywords = read_keywords();
    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("keyword_gen.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());

    write_keyword_enum(&mut file, &keywords);
    write_all_keywords(&mut file, &keywords);
    write_keyword_traits(&mut file, &keywords);
    write_phf_map(&mut file, &keywords);
}
