//! 规则引擎性能基准测试
//!
//! 覆盖解析、求值、合并三条主路径。

use criterion::{Criterion, criterion_group, criterion_main};
use rule_engine::{EvaluationContext, combine_rules, evaluate, parse_rule};
use serde_json::json;
use std::hint::black_box;

const SIMPLE_RULE: &str = "age > 30";
const MEDIUM_RULE: &str = "age > 30 AND department = 'Sales'";
const COMPLEX_RULE: &str =
    "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')) \
     AND salary > 20000 AND !blocked";

fn create_context() -> EvaluationContext {
    EvaluationContext::new(json!({
        "age": 35,
        "department": "Sales",
        "salary": 60000,
        "blocked": false,
    }))
}

/// 解析基准：不同复杂度的规则文本
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("simple", |b| b.iter(|| parse_rule(black_box(SIMPLE_RULE))));
    group.bench_function("medium", |b| b.iter(|| parse_rule(black_box(MEDIUM_RULE))));
    group.bench_function("complex", |b| {
        b.iter(|| parse_rule(black_box(COMPLEX_RULE)))
    });

    group.finish();
}

/// 求值基准：解析一次，重复求值
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let simple = parse_rule(SIMPLE_RULE).unwrap();
    let medium = parse_rule(MEDIUM_RULE).unwrap();
    let complex = parse_rule(COMPLEX_RULE).unwrap();
    let ctx = create_context();

    group.bench_function("simple", |b| {
        b.iter(|| evaluate(black_box(&simple), black_box(&ctx)))
    });
    group.bench_function("medium", |b| {
        b.iter(|| evaluate(black_box(&medium), black_box(&ctx)))
    });
    group.bench_function("complex", |b| {
        b.iter(|| evaluate(black_box(&complex), black_box(&ctx)))
    });

    group.finish();
}

/// 合并基准：不同规模的规则集
fn bench_combine(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine");

    let two = vec![SIMPLE_RULE.to_string(), MEDIUM_RULE.to_string()];
    let ten: Vec<String> = (0..10).map(|i| format!("field_{i} > {i}")).collect();

    group.bench_function("two_rules", |b| b.iter(|| combine_rules(black_box(&two))));
    group.bench_function("ten_rules", |b| b.iter(|| combine_rules(black_box(&ten))));

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_combine);
criterion_main!(benches);
