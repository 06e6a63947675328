use std::{collections::BTreeMap, hint::black_box};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tagwire::{
    Codec, CustomDateTime, GeometryLine, GeometryPoint, GeometryPolygon, RecordId, Table, Value,
};

fn polygon(points: usize) -> GeometryPolygon {
    let ring: GeometryLine = (0..points)
        .map(|i| GeometryPoint::new(i as f64 * 0.5, -(i as f64) * 0.25))
        .collect();
    GeometryPolygon::new(vec![ring])
}

/// Типичный ответ сервера: массив записей с id, датой и вложенной геометрией.
fn rpc_result(rows: usize) -> Value {
    let table = Table::new("person").expect("valid table");
    let rows = (0..rows as u64)
        .map(|i| {
            let mut row = BTreeMap::new();
            row.insert(
                "id".to_string(),
                Value::from(RecordId::new(table.clone(), i)),
            );
            row.insert(
                "created".to_string(),
                Value::from(CustomDateTime::from_unix(1_700_000_000 + i as i64, 0).expect("valid")),
            );
            row.insert("area".to_string(), Value::from(polygon(8)));
            row.insert("name".to_string(), Value::from(format!("user-{i}")));
            Value::Object(row)
        })
        .collect::<Vec<_>>();
    Value::Array(rows)
}

fn bench_encode(c: &mut Criterion) {
    let codec = Codec::standard().expect("standard codec");
    let mut group = c.benchmark_group("encode");
    for rows in [1usize, 100, 1000] {
        let value = rpc_result(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &value, |b, v| {
            b.iter(|| black_box(codec.encode(black_box(v)).unwrap()))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let codec = Codec::standard().expect("standard codec");
    let mut group = c.benchmark_group("decode");
    for rows in [1usize, 100, 1000] {
        let bytes = codec.encode(&rpc_result(rows)).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &bytes, |b, bytes| {
            b.iter(|| black_box(codec.decode(black_box(bytes)).unwrap()))
        });
    }
    group.finish();
}

fn bench_large_polygon(c: &mut Criterion) {
    let codec = Codec::standard().expect("standard codec");
    let value = Value::from(polygon(10_000));
    let bytes = codec.encode(&value).unwrap();
    c.bench_function("polygon 10k encode", |b| {
        b.iter(|| black_box(codec.encode(black_box(&value)).unwrap()))
    });
    c.bench_function("polygon 10k decode", |b| {
        b.iter(|| black_box(codec.decode(black_box(&bytes)).unwrap()))
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_large_polygon);
criterion_main!(benches);
