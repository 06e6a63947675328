use std::{collections::BTreeMap, fmt};

use tagwire_error::{CodecError, CodecResult};

use super::Value;

/// Имя таблицы. Всегда непустое.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Table(String);

/// Идентификатор записи: таблица плюс полиморфный id.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordId {
    pub table: Table,
    pub id: Identifier,
}

/// Вариант id внутри [`RecordId`]. Вариант сохраняется при декодировании
/// точно: `Number(7)` никогда не превращается в `String("7")`.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    String(String),
    Number(u64),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl Table {
    /// Создаёт таблицу; пустое имя отклоняется.
    pub fn new(name: impl Into<String>) -> CodecResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CodecError::malformed("table name must not be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl RecordId {
    pub fn new(
        table: Table,
        id: impl Into<Identifier>,
    ) -> Self {
        Self {
            table,
            id: id.into(),
        }
    }

    /// Сокращение для `RecordId::new(Table::new(table)?, id)`.
    pub fn parse_table(
        table: impl Into<String>,
        id: impl Into<Identifier>,
    ) -> CodecResult<Self> {
        Ok(Self::new(Table::new(table)?, id))
    }
}

impl Identifier {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Identifier::String(_) => "string",
            Identifier::Number(_) => "number",
            Identifier::Array(_) => "array",
            Identifier::Object(_) => "object",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for Table {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Table {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::String(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::String(s)
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Identifier::Number(n)
    }
}

impl From<Vec<Value>> for Identifier {
    fn from(items: Vec<Value>) -> Self {
        Identifier::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Identifier {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Identifier::Object(map)
    }
}
