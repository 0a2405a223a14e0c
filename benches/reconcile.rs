//! Benchmarks for controller reconciliation.
//!
//! Measures operation partitioning for controllers of growing size, and the
//! static parsing of a generated controller module.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tb_rest_merge::introspect::{self, Operation, Parameter};
use tb_rest_merge::phases::reconcile;

/// `count` operations; every third differs in pe and every fifth is pe-only.
fn editions(count: usize) -> (Vec<Operation>, Vec<Operation>) {
    let params = |names: &[&str]| -> Vec<Parameter> {
        names
            .iter()
            .map(|n| Parameter::parse(&format!("str {}: value (required)", n)))
            .collect()
    };

    let mut ce = Vec::with_capacity(count);
    let mut pe = Vec::with_capacity(count);
    for i in 0..count {
        let name = format!("operation_{}", i);
        if i % 5 != 0 {
            ce.push(Operation::new(name.clone(), "device_controller", params(&["id"])));
        }
        let pe_params = if i % 3 == 0 { params(&["id", "group"]) } else { params(&["id"]) };
        pe.push(Operation::new(name, "device_controller", pe_params));
    }
    (ce, pe)
}

fn controller_source(methods: usize) -> String {
    let mut source: String = (1..=19).map(|i| format!("# line {}\n", i)).collect();
    source.push_str("from swagger_client.api_client import ApiClient\n\n\n");
    source.push_str("class DeviceControllerApi(object):\n");
    for i in 0..methods {
        source.push_str(&format!(
            "    def operation_{i}(self, id, **kwargs):  # noqa: E501\n        \"\"\"Op {i}  # noqa: E501\n\n        :param async_req bool\n        :param str id: value (required)\n        :return: None\n        \"\"\"\n        pass\n\n"
        ));
    }
    source
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for size in [10, 100, 1000] {
        let (ce, pe) = editions(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &(ce, pe), |b, (ce, pe)| {
            b.iter(|| reconcile::classify(black_box(ce), black_box(pe)))
        });
    }
    group.finish();
}

fn bench_parse_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_controller");
    for methods in [10, 100] {
        let source = controller_source(methods);
        group.bench_with_input(BenchmarkId::from_parameter(methods), &source, |b, source| {
            b.iter(|| introspect::parse_controller("device_controller", black_box(source)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_parse_controller);
criterion_main!(benches);
