use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csvstream::{CsvParser, Event, ParserOptions};

fn sample_csv(rows: usize) -> Vec<u8> {
    let mut data = b"id,name,value,notes\n".to_vec();
    for i in 0..rows {
        data.extend_from_slice(
            format!("{},name_{},{},\"note, with {} commas\"\n", i, i, i * 100, i).as_bytes(),
        );
    }
    data
}

fn benchmark_single_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_chunk");

    for size in [1_000, 10_000, 100_000].iter() {
        let data = sample_csv(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut parser = CsvParser::new(ParserOptions::new()).unwrap();
                parser.push(black_box(data)).unwrap();
                parser.finish().unwrap();
                let rows = parser
                    .events()
                    .filter(|e| matches!(e, Event::Row(_)))
                    .count();
                black_box(rows)
            });
        });
    }

    group.finish();
}

fn benchmark_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunked_8k");
    let data = sample_csv(100_000);

    for chunk_size in [512usize, 8 * 1024, 64 * 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut parser = CsvParser::new(ParserOptions::new()).unwrap();
                    for chunk in data.chunks(chunk_size) {
                        parser.push(black_box(chunk)).unwrap();
                        // Drain as we go, like a streaming consumer would.
                        let drained = parser.events().count();
                        black_box(drained);
                    }
                    parser.finish().unwrap();
                    black_box(parser.events().count())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_chunk, benchmark_chunked);
criterion_main!(benches);
