//! Номера CBOR-тегов для доменных типов.
//!
//! Каждый доменный тип занимает ровно один тег. Используется в обработчиках
//! `handlers` и в стандартной таблице [`super::TagRegistry::standard`].

/// Явный маркер "нет значения" (содержимое: null)
pub const TAG_NONE: u64 = 6;
/// Имя таблицы (text)
pub const TAG_TABLE: u64 = 7;
/// Идентификатор записи ([table, id])
pub const TAG_RECORD_ID: u64 = 8;
/// Десятичное число (text)
pub const TAG_DECIMAL: u64 = 10;
/// Компактная дата-время ([seconds, nanoseconds])
pub const TAG_DATETIME_COMPACT: u64 = 12;
/// Компактная длительность ([seconds?, nanoseconds?])
pub const TAG_DURATION_COMPACT: u64 = 14;
/// UUID (16 байт)
pub const TAG_UUID: u64 = 37;
/// Точка ([lon, lat])
pub const TAG_GEOMETRY_POINT: u64 = 88;
/// Ломаная (массив точек)
pub const TAG_GEOMETRY_LINE: u64 = 89;
/// Полигон (массив ломаных)
pub const TAG_GEOMETRY_POLYGON: u64 = 90;
