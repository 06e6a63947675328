//! Генераторы для property-based тестирования кодека.
//!
//! Каждый генератор создаёт стратегии для случайных, но валидных значений
//! определённого типа с акцентом на граничные случаи.

use std::{collections::BTreeMap, ops::RangeInclusive};

use proptest::{collection::vec, prelude::*};
use tagwire::{
    CustomDateTime, GeometryLine, GeometryPoint, GeometryPolygon, Identifier, RecordId, Table,
    Value, NONE,
};

/// Размеры последовательностей: от пустых до средних.
const SEQ_SIZE: RangeInclusive<usize> = 0..=32;

/// Диапазон секунд, который гарантированно представим в `chrono`.
const SECONDS: RangeInclusive<i64> = -62_135_596_800..=253_402_300_799;

/// Конечные координаты, включая граничные значения.
pub fn coordinate_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(f64::MIN_POSITIVE),
        Just(f64::MAX),
        Just(f64::MIN),
        -180.0..=180.0f64,
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ]
}

pub fn point_strategy() -> impl Strategy<Value = GeometryPoint> {
    (coordinate_strategy(), coordinate_strategy()).prop_map(GeometryPoint::from)
}

pub fn line_strategy() -> impl Strategy<Value = GeometryLine> {
    vec(point_strategy(), SEQ_SIZE).prop_map(GeometryLine::new)
}

pub fn polygon_strategy() -> impl Strategy<Value = GeometryPolygon> {
    vec(line_strategy(), 0..=4).prop_map(GeometryPolygon::new)
}

pub fn datetime_strategy() -> impl Strategy<Value = CustomDateTime> {
    (SECONDS, 0u32..1_000_000_000).prop_map(|(s, ns)| {
        CustomDateTime::from_unix(s, ns).expect("seconds range is representable")
    })
}

pub fn table_strategy() -> impl Strategy<Value = Table> {
    "[a-z_][a-z0-9_]{0,15}".prop_map(|name| Table::new(name).expect("non-empty name"))
}

/// Листовые значения без доменных тегов.
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(NONE),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(Value::UInt),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        ".{0,16}".prop_map(Value::Text),
        vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
    ]
}

/// Произвольное дерево значений ограниченной глубины.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        4 => scalar_strategy(),
        1 => point_strategy().prop_map(Value::from),
        1 => datetime_strategy().prop_map(Value::from),
        1 => table_strategy().prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..8).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z]{1,8}", inner, 0..8).prop_map(Value::Object),
        ]
    })
}

pub fn identifier_strategy() -> impl Strategy<Value = Identifier> {
    prop_oneof![
        ".{0,16}".prop_map(Identifier::String),
        any::<u64>().prop_map(Identifier::Number),
        vec(scalar_strategy(), 0..6).prop_map(Identifier::Array),
        proptest::collection::btree_map("[a-z]{1,8}", scalar_strategy(), 0..6)
            .prop_map(|m: BTreeMap<String, Value>| Identifier::Object(m)),
    ]
}

pub fn record_id_strategy() -> impl Strategy<Value = RecordId> {
    (table_strategy(), identifier_strategy()).prop_map(|(table, id)| RecordId::new(table, id))
}
