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

#![no_main]
use libfuzzer_sys::fuzz_target;
use mysqlparser::dialect::{MariaDbDialect, MySqlDialect};
use mysqlparser::session::Session;

fuzz_target!(|data: String| {
    let mysql57 = MySqlDialect::new(mysqlparser::dialect::server_version(5, 7, 44));
    let mysql80 = MySqlDialect::default();
    let mariadb = MariaDbDialect::default();

    let _ = Session::new(&mysql57).parse(&data);
    let _ = Session::new(&mysql80).parse(&data);
    let _ = Session::new(&mariadb).parse(&data);
});
