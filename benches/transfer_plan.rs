use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use echoplate::barcode::{BarcodeTable, SequencePolicy};
use echoplate::plate::PlateFormat;
use echoplate::transfer::generate_transfer_plan;

/// Build an in-memory barcode table covering a whole plate
fn full_plate_csv(format: PlateFormat) -> String {
    let mut csv = String::from("Well,Barcode_Name,Sequence\n");
    for (i, well) in format.wells().enumerate() {
        csv.push_str(&format!("{},BC{:03},ACGTACGTACGT\n", well, i + 1));
    }
    csv
}

/// Benchmark plan generation and CSV rendering
fn bench_transfer_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_plan");

    for format in [PlateFormat::Plate96, PlateFormat::Plate384] {
        let n = format.capacity();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(
            BenchmarkId::new("generate", format!("{}well", format)),
            &n,
            |b, &n| {
                b.iter(|| generate_transfer_plan(black_box(n), format, format, 100.0).unwrap())
            },
        );

        let plan = generate_transfer_plan(n, format, format, 100.0).unwrap();
        group.bench_with_input(
            BenchmarkId::new("write_csv", format!("{}well", format)),
            &plan,
            |b, plan| {
                b.iter(|| {
                    let mut out = Vec::with_capacity(n * 16);
                    plan.write_csv(&mut out).unwrap();
                    out
                })
            },
        );
    }

    group.finish();
}

/// Benchmark barcode table parsing and matrix export
fn bench_barcode_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("barcode_table");
    let csv = full_plate_csv(PlateFormat::Plate384);

    group.throughput(Throughput::Elements(384));
    group.bench_function("parse_384", |b| {
        b.iter(|| {
            BarcodeTable::from_reader(
                black_box(csv.as_bytes()),
                PlateFormat::Plate384,
                SequencePolicy::Required,
            )
            .unwrap()
        })
    });

    let table =
        BarcodeTable::from_reader(csv.as_bytes(), PlateFormat::Plate384, SequencePolicy::Required)
            .unwrap();
    group.bench_function("plate_matrix_384", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            table.write_plate_matrix(&mut out, PlateFormat::Plate384).unwrap();
            out
        })
    });

    group.finish();
}

criterion_group!(benches, bench_transfer_plan, bench_barcode_table);
criterion_main!(benches);
