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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mysqlparser::dialect::MySqlDialect;
use mysqlparser::parser::Parser;
use mysqlparser::session::Session;
use mysqlparser::tokenizer::Tokenizer;

const SCRIPT: &str = r#"
  -- Nightly order maintenance
  SET NAMES utf8mb4 COLLATE utf8mb4_0900_ai_ci;
  SET SESSION sql_mode = 'ANSI_QUOTES,PIPES_AS_CONCAT';

  /* Refresh aggregates */
  DELIMITER //
  CREATE PROCEDURE refresh_totals()
  BEGIN
    UPDATE totals SET amount = (SELECT SUM(price) FROM orders WHERE orders.customer_id = totals.customer_id);
    DELETE FROM totals WHERE amount IS NULL;
  END//
  DELIMITER ;

  SELECT o.id, "o"."total" || ' EUR', CASE WHEN o.total > 100 THEN 'large' ELSE 'small' END
  FROM orders o
  WHERE o.created_at >= NOW() - INTERVAL 7 DAY
    AND o.status IN ('open', 'pending', 'held')
    AND o.note NOT LIKE '%test%' ESCAPE '!'
  ORDER BY o.created_at DESC
  LIMIT 50;

  SET @threshold := (SELECT AVG(total) FROM orders), @@session.max_execution_time = 1000;
  /*!80017 SELECT 3 MEMBER OF ('[1, 2, 3]') */;
"#;

fn session_scripts(c: &mut Criterion) {
    let mut group = c.benchmark_group("mysqlparser session");
    let dialect = MySqlDialect::default();

    group.bench_function("session::script", |b| {
        b.iter(|| Session::new(&dialect).parse(black_box(SCRIPT)));
    });

    let long_script = (0..500)
        .map(|n| format!("SET @v{n} = @v{n} + {n} * 2; SELECT c_{n} FROM t_{n};"))
        .collect::<Vec<_>>()
        .join("\n");
    group.bench_function("session::long_script", |b| {
        b.iter(|| Session::new(&dialect).parse(black_box(&long_script)));
    });

    group.finish();
}

fn expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("mysqlparser expressions");
    let dialect = MySqlDialect::default();

    let simple = "a + b * c BETWEEN 1 AND 10 OR d LIKE 'x%'";
    group.bench_function("expr::simple", |b| {
        b.iter(|| {
            Parser::new(&dialect)
                .try_with_sql(black_box(simple))
                .and_then(|mut parser| parser.parse_expr())
        });
    });

    let wide = (0..1000)
        .map(|n| format!("(COL_{n} = {n} AND FN_{n}(COL_{n}, '{n}') IS NOT NULL)"))
        .collect::<Vec<_>>()
        .join(" OR ");
    group.bench_function("expr::wide", |b| {
        b.iter(|| {
            Parser::new(&dialect)
                .try_with_sql(black_box(&wide))
                .and_then(|mut parser| parser.parse_expr())
        });
    });

    group.finish();
}

fn tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenization");
    let dialect = MySqlDialect::default();

    let large = SCRIPT.repeat(200);
    group.bench_function("tokenize_script", |b| {
        b.iter(|| Tokenizer::new(&dialect, black_box(&large)).tokenize());
    });

    group.finish();
}

criterion_group!(benches, session_scripts, expressions, tokenization);
criterion_main!(benches);
