//! Benchmarks for the diff engine.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use datamap_tools::diff::DiffEngine;
use datamap_tools::model::{ClassRecord, FieldRecord, FieldType, ResolveMode, SaveFile};
use std::hint::black_box;

/// Generate a save file with `classes` classes of `fields` fields each.
///
/// `shift` moves every tenth field and `extra` appends classes, so two
/// generated files differ in a predictable way.
fn generate_save(version: &str, classes: usize, fields: usize, shift: u64, extra: usize) -> SaveFile {
    let records = (0..classes + extra)
        .map(|c| {
            (0..fields).fold(
                ClassRecord::new(format!("CClass{c}"), "server.dll"),
                |class, f| {
                    let offset = (f as u64) * 4 + if f % 10 == 0 { shift } else { 0 };
                    let ty = if f % 3 == 0 { FieldType::Float } else { FieldType::Integer };
                    class.with_field(FieldRecord::new(format!("m_field{f}"), ty, offset))
                },
            )
        })
        .collect();
    SaveFile::new("bench", version, records, ResolveMode::Resolve)
}

fn benchmark_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");

    for classes in [100, 1000, 4000] {
        let left = generate_save("1", classes, 24, 0, 0);
        let right = generate_save("2", classes, 24, 2, classes / 20);

        group.bench_with_input(BenchmarkId::new("full", classes), &classes, |b, _| {
            let engine = DiffEngine::new();
            b.iter(|| engine.diff(black_box(&left), black_box(&right)));
        });

        group.bench_with_input(BenchmarkId::new("classes_only", classes), &classes, |b, _| {
            let engine = DiffEngine::new().classes_only(true);
            b.iter(|| engine.diff(black_box(&left), black_box(&right)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_diff);
criterion_main!(benches);
