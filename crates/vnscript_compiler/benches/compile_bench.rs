//! Benchmarks for the vnscript pipeline.
//!
//! Run with: cargo bench -p vnscript_compiler

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vnscript_binder::Binder;
use vnscript_compiler::Compilation;
use vnscript_evaluator::{Evaluator, Variables};
use vnscript_lowering::Lowerer;
use vnscript_syntax::SyntaxTree;

const SMALL_SOURCE: &str = "{ var a = 0 (a = 10) * a }";

const LOOP_SOURCE: &str = r#"
{
    var result = 0
    for i = 1 to 100 {
        var j = i
        while j > 0 {
            if j / 2 * 2 == j
                result = result + 1
            else
                result = result - 1
            j = j - 1
        }
    }
    result
}
"#;

/// A block of `count` declarations, each using the previous one.
fn generate_declarations(count: usize) -> String {
    let mut source = String::from("{\n    var v0 = 1\n");
    for i in 1..count {
        source.push_str(&format!("    var v{} = v{} * 2 + {}\n", i, i - 1, i));
    }
    source.push_str(&format!("    v{}\n}}\n", count - 1));
    source
}

// ============================================================================
// Stage Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("small", |b| {
        b.iter(|| black_box(SyntaxTree::parse(black_box(SMALL_SOURCE))));
    });

    group.bench_function("loops", |b| {
        b.iter(|| black_box(SyntaxTree::parse(black_box(LOOP_SOURCE))));
    });

    group.finish();
}

fn bench_bind_and_lower(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind_and_lower");
    let tree = SyntaxTree::parse(LOOP_SOURCE);

    group.bench_function("bind", |b| {
        b.iter(|| black_box(Binder::bind_global_scope(None, black_box(tree.root()))));
    });

    let scope = Binder::bind_global_scope(None, tree.root());
    group.bench_function("lower", |b| {
        b.iter(|| black_box(Lowerer::lower(black_box(&scope.statement))));
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let tree = SyntaxTree::parse(LOOP_SOURCE);
    let scope = Binder::bind_global_scope(None, tree.root());
    let program = Lowerer::lower(&scope.statement);

    c.bench_function("evaluate_loops", |b| {
        b.iter(|| {
            let mut variables = Variables::default();
            black_box(Evaluator::new(&mut variables).evaluate(black_box(&program)))
        });
    });
}

// ============================================================================
// Full Pipeline Benchmarks
// ============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");

    for (name, source) in [("small", SMALL_SOURCE), ("loops", LOOP_SOURCE)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let compilation = Compilation::new(SyntaxTree::parse(black_box(source)));
                let mut variables = Variables::default();
                black_box(compilation.evaluate(&mut variables))
            });
        });
    }

    group.bench_function("session_of_ten", |b| {
        b.iter(|| {
            let mut variables = Variables::default();
            let mut compilation = Compilation::new(SyntaxTree::parse("var x0 = 0"));
            let _ = compilation.evaluate(&mut variables);
            for i in 1..10 {
                let text = format!("var x{} = x{} + 1", i, i - 1);
                compilation = compilation.continue_with(SyntaxTree::parse(&text));
                let _ = black_box(compilation.evaluate(&mut variables));
            }
        });
    });

    group.finish();
}

// ============================================================================
// Scaling Benchmarks
// ============================================================================

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [10, 100, 1000] {
        let source = generate_declarations(size);
        group.bench_with_input(BenchmarkId::new("declarations", size), &source, |b, source| {
            b.iter(|| {
                let compilation = Compilation::new(SyntaxTree::parse(black_box(source)));
                let mut variables = Variables::default();
                black_box(compilation.evaluate(&mut variables))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_bind_and_lower,
    bench_evaluate,
    bench_full_pipeline,
    bench_scaling,
);
criterion_main!(benches);
