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

#![warn(clippy::all)]

//! A small command-line app to run the parser.
//! Run with `cargo run --example cli`

use std::fs;
use std::io::{stdin, Read};

use mysqlparser::dialect::dialect_from_str;
use mysqlparser::session::Session;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().init().unwrap();

    let filename = std::env::args().nth(1).expect(
        r#"
No arguments provided!

Usage:
$ cargo run --example cli FILENAME.sql [--mysql|--mysql57|--mysql80|--mariadb]

To print the parse results as JSON:
$ cargo run --features json_example --example cli FILENAME.sql [--dialectname]

To read from stdin instead of a file:
$ cargo run --example cli - [--dialectname]

"#,
    );

    let dialect_arg = std::env::args().nth(2).unwrap_or_default();
    let dialect_name = dialect_arg.strip_prefix("--").unwrap_or("mysql");
    let dialect = dialect_from_str(dialect_name)
        .unwrap_or_else(|| panic!("Unexpected parameter: {dialect_arg}"));

    let contents = if filename == "-" {
        println!("Parsing from stdin using {dialect:?}");
        let mut buf = Vec::new();
        stdin()
            .read_to_end(&mut buf)
            .expect("failed to read from stdin");
        String::from_utf8(buf).expect("stdin content wasn't valid utf8")
    } else {
        println!("Parsing from file '{}' using {:?}", &filename, dialect);
        fs::read_to_string(&filename)
            .unwrap_or_else(|_| panic!("Unable to read the file {}", &filename))
    };
    let without_bom = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

    let session = Session::new(&*dialect);
    let results = session.parse(without_bom);
    let failures = results.iter().filter(|r| r.is_err()).count();

    for (n, result) in results.iter().enumerate() {
        match result {
            Ok(statement) => {
                println!("[{n}] {}: {statement}", statement.kind());
                if cfg!(feature = "json_example") {
                    #[cfg(feature = "json_example")]
                    {
                        let serialized = serde_json::to_string_pretty(statement).unwrap();
                        println!("{serialized}");
                    }
                } else {
                    println!("{statement:#?}");
                }
            }
            Err(e) => println!("[{n}] Error during parsing: {e}"),
        }
    }

    println!(
        "{} statements, {} failed, final settings: {:?}",
        results.len(),
        failures,
        session.settings().snapshot()
    );
    std::process::exit(if failures == 0 { 0 } else { 1 });
}
