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

use crate::dialect::{server_version, Dialect};
use crate::keywords::Keyword;

/// Reserved words of MariaDB follow the MySQL 5.7 line it forked from,
/// plus the words listed in [`MariaDbDialect::is_reserved`].
const MYSQL_BASELINE: u32 = server_version(5, 7, 99);

/// A [`Dialect`] for [MariaDB](https://mariadb.org/) at a given server version.
///
/// Besides `/*! ... */` it honors the MariaDB only `/*M! ... */` form of
/// conditional comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MariaDbDialect {
    version: u32,
}

impl MariaDbDialect {
    pub const fn new(version: u32) -> Self {
        Self { version }
    }
}

impl Default for MariaDbDialect {
    fn default() -> Self {
        Self::new(server_version(10, 11, 6))
    }
}

impl Dialect for MariaDbDialect {
    fn version(&self) -> u32 {
        self.version
    }

    fn is_reserved(&self, keyword: Keyword) -> bool {
        match keyword {
            Keyword::EXCEPT | Keyword::INTERSECT => self.version >= server_version(10, 3, 0),
            Keyword::OVER | Keyword::RECURSIVE | Keyword::ROWS => {
                self.version >= server_version(10, 2, 0)
            }
            _ => keyword.is_reserved_in(MYSQL_BASELINE),
        }
    }

    fn conditional_comment_markers(&self) -> &'static [&'static str] {
        &["M!", "!"]
    }
}
