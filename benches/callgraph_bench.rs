/// Benchmarks for the call graph pipeline.
///
/// Run with: `cargo bench`

use ast_consumer_matrix::domain::builder::{CallGraphBuilder, ModuleUnit};
use ast_consumer_matrix::domain::callgraph::AnalysisContext;
use ast_consumer_matrix::domain::matrix::MatrixAssembler;
use ast_consumer_matrix::infrastructure::TreeSitterPythonParser;
use ast_consumer_matrix::ports::SourceParser;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════════
// Synthetic Data Generators
// ═══════════════════════════════════════════════════════════════════════════

/// Python module with `classes` classes of `methods` methods, each calling
/// a sibling method and the next class.
fn synthetic_module(classes: usize, methods: usize) -> String {
    let mut src = String::from("import os\nfrom .util import helper\n\n");
    for c in 0..classes {
        src.push_str(&format!("class Class{}:\n", c));
        for m in 0..methods {
            src.push_str(&format!("    def method_{}(self, x):\n", m));
            src.push_str(&format!("        self.method_{}(x)\n", (m + 1) % methods));
            src.push_str(&format!("        Class{}().method_0(x)\n", (c + 1) % classes));
            src.push_str("        helper(os.path.join(x, 'y'))\n");
        }
        src.push('\n');
    }
    src
}

// ═══════════════════════════════════════════════════════════════════════════
// Pipeline Benchmarks
// ═══════════════════════════════════════════════════════════════════════════

fn bench_parse_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("callgraph/parse_and_build");

    for classes in [10, 50, 200].iter() {
        let source = synthetic_module(*classes, 10);
        group.throughput(Throughput::Bytes(source.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(classes), &source, |b, source| {
            let unit = ModuleUnit::new("bench", "pkg");
            let builder = CallGraphBuilder::default();
            b.iter(|| {
                let ast = TreeSitterPythonParser
                    .parse(Path::new("bench.py"), black_box(source))
                    .unwrap();
                let mut ctx = AnalysisContext::new("bench");
                builder.build(&unit, &ast, &mut ctx);
                black_box(ctx)
            });
        });
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("callgraph/assemble");

    for classes in [10, 50, 200].iter() {
        let source = synthetic_module(*classes, 10);
        let ast = TreeSitterPythonParser
            .parse(Path::new("bench.py"), &source)
            .unwrap();
        let mut ctx = AnalysisContext::new("bench");
        CallGraphBuilder::default().build(&ModuleUnit::new("bench", "pkg"), &ast, &mut ctx);
        let record = ctx.into_record();

        group.bench_with_input(BenchmarkId::from_parameter(classes), &record, |b, record| {
            b.iter(|| black_box(MatrixAssembler::assemble(black_box(record))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_and_build, bench_assemble);
criterion_main!(benches);
