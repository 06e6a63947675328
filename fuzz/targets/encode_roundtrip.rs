#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagwire::{Codec, CustomDateTime, GeometryPoint, GeometryPolygon, RecordId, Value};

#[derive(Debug, Arbitrary)]
enum FuzzId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Arbitrary)]
struct FuzzRow {
    table: String,
    id: FuzzId,
    seconds: i64,
    nanos: u32,
    ring: Vec<(f64, f64)>,
}

fuzz_target!(|row: FuzzRow| {
    let codec = Codec::standard().expect("standard codec");

    let mut items = Vec::new();
    if let Ok(rid) = match row.id {
        FuzzId::Text(s) => RecordId::parse_table(row.table, s),
        FuzzId::Number(n) => RecordId::parse_table(row.table, n),
    } {
        items.push(Value::from(rid));
    }
    if let Some(dt) = CustomDateTime::from_unix(row.seconds, row.nanos) {
        items.push(Value::from(dt));
    }
    if row.ring.iter().all(|(lon, lat)| !lon.is_nan() && !lat.is_nan()) {
        let ring = row.ring.into_iter().map(GeometryPoint::from).collect();
        items.push(Value::from(GeometryPolygon::new(vec![ring])));
    }

    let value = Value::Array(items);
    let bytes = codec.encode(&value).expect("encoding a valid tree");
    assert_eq!(codec.decode(&bytes).expect("decoding own output"), value);
});
