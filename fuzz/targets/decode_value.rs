#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagwire::{diagnose, Codec, CodecSettings};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    max_depth: u8,
}

fuzz_target!(|input: FuzzInput| {
    let settings = CodecSettings {
        max_depth: usize::from(input.max_depth.clamp(1, 128)),
        ..CodecSettings::default()
    };
    let Ok(codec) = Codec::with_settings(settings) else {
        return;
    };

    // Декодер и диагностика не должны паниковать ни на каких данных.
    let decoded = std::panic::catch_unwind(|| codec.decode(&input.data));
    let Ok(decoded) = decoded else {
        panic!("Decoder panicked on input: {input:?}");
    };
    if std::panic::catch_unwind(|| diagnose(&input.data)).is_err() {
        panic!("Diagnostic printer panicked on input: {input:?}");
    }

    // Успешно декодированное значение должно кодироваться обратно и давать
    // то же дерево.
    if let Ok(value) = decoded {
        let bytes = codec.encode(&value).expect("re-encoding a decoded value");
        let again = codec.decode(&bytes).expect("decoding re-encoded bytes");
        if !contains_nan(&value) {
            assert_eq!(value, again);
        }
    }
});

fn contains_nan(value: &tagwire::Value) -> bool {
    use tagwire::{DomainValue, Identifier, Value};

    match value {
        Value::Float(f) => f.is_nan(),
        Value::Array(items) => items.iter().any(contains_nan),
        Value::Object(map) => map.values().any(contains_nan),
        Value::Domain(DomainValue::Point(p)) => p.lon.is_nan() || p.lat.is_nan(),
        Value::Domain(DomainValue::Line(line)) => {
            line.points().iter().any(|p| p.lon.is_nan() || p.lat.is_nan())
        }
        Value::Domain(DomainValue::Polygon(polygon)) => polygon
            .rings()
            .iter()
            .flat_map(|ring| ring.points())
            .any(|p| p.lon.is_nan() || p.lat.is_nan()),
        Value::Domain(DomainValue::RecordId(rid)) => match &rid.id {
            Identifier::Array(items) => items.iter().any(contains_nan),
            Identifier::Object(map) => map.values().any(contains_nan),
            _ => false,
        },
        _ => false,
    }
}
