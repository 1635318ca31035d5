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

/// A [`Dialect`] for [MySQL](https://www.mysql.com/) at a given server version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MySqlDialect {
    version: u32,
}

impl MySqlDialect {
    pub const fn new(version: u32) -> Self {
        Self { version }
    }
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new(server_version(8, 0, 36))
    }
}

impl Dialect for MySqlDialect {
    fn version(&self) -> u32 {
        self.version
    }

    // See https://dev.mysql.com/doc/refman/8.0/en/json.html#json-paths
    fn supports_json_path_operators(&self) -> bool {
        self.version >= server_version(5, 7, 9)
    }

    fn supports_member_of(&self) -> bool {
        self.version >= server_version(8, 0, 17)
    }
}
