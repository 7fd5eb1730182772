//! Benchmarks for the pointer analysis and the analysis pipeline
//!
//! Programs are synthetic call chains: each link allocates, stores into a
//! field and calls the next link, so PFG size and call edges grow linearly.

use codegraph_analysis::config::{AnalysisConfig, CallGraphAlgorithm, HeapModelKind, PtaConfig};
use codegraph_analysis::features::points_to::PointerAnalyzer;
use codegraph_analysis::shared::models::{
    Access, Exp, InvokeExp, MethodRef, Program, ProgramBuilder, Stmt, Type,
};
use codegraph_analysis::AnalysisPipeline;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn call_chain(depth: usize) -> Program {
    let mut b = ProgramBuilder::new();
    let node = b.add_class("Node", None);
    let next = b.add_field(node, "next", Type::Class(node), false);
    let subsig = |i: usize| format!("Node link{i}(Node)");

    for i in 0..depth {
        let m = b.add_method(node, &subsig(i), true);
        let p = b.new_var(m, "p", Type::Class(node));
        let o = b.new_var(m, "o", Type::Class(node));
        let r = b.new_var(m, "r", Type::Class(node));
        let mut stmts = vec![
            Stmt::Assign { lhs: o, rhs: Exp::New(Type::Class(node)) },
            Stmt::Store { target: Access::Field { base: Some(o), field: next }, rhs: p },
        ];
        if i + 1 < depth {
            stmts.push(Stmt::Invoke {
                lhs: Some(r),
                call: InvokeExp::new_static(MethodRef::new(node, subsig(i + 1)), vec![o]),
            });
        } else {
            stmts.push(Stmt::Assign {
                lhs: r,
                rhs: Exp::FieldAccess { base: Some(o), field: next },
            });
        }
        stmts.push(Stmt::Return { value: Some(r) });
        b.set_body(m, None, vec![p], stmts);
    }

    let main = b.add_method(node, "void main()", true);
    let head = b.new_var(main, "head", Type::Class(node));
    b.set_body(
        main,
        None,
        vec![],
        vec![
            Stmt::Assign { lhs: head, rhs: Exp::New(Type::Class(node)) },
            Stmt::Invoke {
                lhs: None,
                call: InvokeExp::new_static(MethodRef::new(node, subsig(0)), vec![head]),
            },
            Stmt::Return { value: None },
        ],
    );
    b.set_entry(main);
    b.build().expect("benchmark program")
}

fn bench_pointer_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_analysis");

    for depth in [10usize, 100, 1000] {
        let program = call_chain(depth);
        group.throughput(Throughput::Elements(depth as u64));

        for heap in [HeapModelKind::AllocationSite, HeapModelKind::TypeBased] {
            let analyzer = PointerAnalyzer::new(PtaConfig::default().heap_model(heap));
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", heap), depth),
                &program,
                |b, program| b.iter(|| black_box(analyzer.analyze(program))),
            );
        }
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let program = call_chain(200);

    for (name, algorithm, inter) in [
        ("pta_intra", CallGraphAlgorithm::Pta, false),
        ("cha_intra", CallGraphAlgorithm::Cha, false),
        ("cha_inter", CallGraphAlgorithm::Cha, true),
    ] {
        let pipeline = AnalysisPipeline::new(
            AnalysisConfig::default()
                .call_graph(|c| c.algorithm(algorithm))
                .constprop(|c| c.inter_procedural(inter)),
        );
        group.bench_function(name, |b| b.iter(|| black_box(pipeline.run(&program))));
    }

    group.finish();
}

criterion_group!(benches, bench_pointer_analysis, bench_pipeline);
criterion_main!(benches);
