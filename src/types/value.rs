//! Динамическое дерево значений payload.
//!
//! [`Value`] описывает всё, что может оказаться в параметрах RPC-запроса или в
//! ответе сервера: примитивы, контейнеры и доменные значения
//! ([`DomainValue`]). Сериализация живёт отдельно, в модуле `codec`.

use std::{collections::BTreeMap, fmt};

use tagwire_error::CodecError;

use super::{
    CustomDateTime, CustomDuration, Decimal, GeometryLine, GeometryPoint, GeometryPolygon,
    RecordId, Table, Uuid,
};

/// Значение payload.
///
/// Целые числа нормализованы: всё, что помещается в `i64`, хранится как
/// [`Value::Int`], а [`Value::UInt`] используется только для значений больше
/// `i64::MAX`. Конструкторы `From` и декодер соблюдают это правило, а
/// сравнение сопоставляет целые по числовому значению, поэтому вручную
/// собранный `UInt(5)` равен `Int(5)`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Нативный null формата (не путать с [`DomainValue::None`])
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    /// Доменное значение, кодируемое через таблицу тегов
    Domain(DomainValue),
}

/// Доменные значения с собственным тегом на проводе.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    /// Явный маркер "нет значения"
    None,
    Table(Table),
    RecordId(RecordId),
    DateTime(CustomDateTime),
    Duration(CustomDuration),
    Uuid(Uuid),
    Decimal(Decimal),
    Point(GeometryPoint),
    Line(GeometryLine),
    Polygon(GeometryPolygon),
}

/// Дискриминант [`DomainValue`], ключ таблицы кодировщиков.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DomainKind {
    None,
    Table,
    RecordId,
    DateTime,
    Duration,
    Uuid,
    Decimal,
    Point,
    Line,
    Polygon,
}

/// Явный маркер "нет значения" в виде [`Value`].
pub const NONE: Value = Value::Domain(DomainValue::None);

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Value {
    /// Короткое имя варианта (для сообщений об ошибках и логов).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Domain(d) => d.kind().name(),
        }
    }

    /// `true` для явного маркера "нет значения".
    pub fn is_none(&self) -> bool {
        matches!(self, Value::Domain(DomainValue::None))
    }

    /// `true` для нативного null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Целое значение независимо от варианта.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(i128::from(*i)),
            Value::UInt(u) => Some(i128::from(*u)),
            _ => None,
        }
    }

    /// Поле объекта по ключу; `None`, если это не объект или ключа нет.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }
}

impl DomainValue {
    pub fn kind(&self) -> DomainKind {
        match self {
            DomainValue::None => DomainKind::None,
            DomainValue::Table(_) => DomainKind::Table,
            DomainValue::RecordId(_) => DomainKind::RecordId,
            DomainValue::DateTime(_) => DomainKind::DateTime,
            DomainValue::Duration(_) => DomainKind::Duration,
            DomainValue::Uuid(_) => DomainKind::Uuid,
            DomainValue::Decimal(_) => DomainKind::Decimal,
            DomainValue::Point(_) => DomainKind::Point,
            DomainValue::Line(_) => DomainKind::Line,
            DomainValue::Polygon(_) => DomainKind::Polygon,
        }
    }
}

impl DomainKind {
    pub fn name(self) -> &'static str {
        match self {
            DomainKind::None => "none",
            DomainKind::Table => "table",
            DomainKind::RecordId => "record id",
            DomainKind::DateTime => "datetime",
            DomainKind::Duration => "duration",
            DomainKind::Uuid => "uuid",
            DomainKind::Decimal => "decimal",
            DomainKind::Point => "geometry point",
            DomainKind::Line => "geometry line",
            DomainKind::Polygon => "geometry polygon",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for DomainKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(u),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<DomainValue> for Value {
    fn from(d: DomainValue) -> Self {
        Value::Domain(d)
    }
}

/// `Option::None` превращается в нативный null, а не в маркер "нет
/// значения": отсутствие и явный `NONE` различаются.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl PartialEq for Value {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(_) | Value::UInt(_), Value::Int(_) | Value::UInt(_)) => {
                self.as_i128() == other.as_i128()
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Domain(a), Value::Domain(b)) => a == b,
            _ => false,
        }
    }
}

/// Связывает доменный тип с вариантом [`DomainValue`]: `From` в обе стороны
/// дерева и `TryFrom<Value>` для типизированного декодирования.
macro_rules! domain_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DomainValue {
                fn from(v: $ty) -> Self {
                    DomainValue::$variant(v)
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Domain(DomainValue::$variant(v))
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = CodecError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::Domain(DomainValue::$variant(v)) => Ok(v),
                        other => Err(CodecError::type_mismatch(
                            "typed decode",
                            DomainKind::$variant.name(),
                            other.type_name(),
                        )),
                    }
                }
            }
        )*
    };
}

domain_conversions! {
    Table => Table,
    RecordId => RecordId,
    DateTime => CustomDateTime,
    Duration => CustomDuration,
    Uuid => Uuid,
    Decimal => Decimal,
    Point => GeometryPoint,
    Line => GeometryLine,
    Polygon => GeometryPolygon,
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
