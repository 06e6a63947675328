//! Обработчики доменных тегов.
//!
//! Каждый модуль экспортирует константы [`TagHandler`] и ничего не знает о
//! других доменных типах; вложенные произвольные значения кодируются через
//! контекст обхода.

pub mod geometry;
pub mod none;
pub mod record_id;
pub mod scalar;
pub mod temporal;

use tagwire_error::CodecError;

use super::TagHandler;
use crate::types::{DomainKind, DomainValue};

/// Все встроенные обработчики.
pub fn standard_handlers() -> Vec<TagHandler> {
    vec![
        none::NONE,
        record_id::TABLE,
        record_id::RECORD_ID,
        scalar::DECIMAL,
        temporal::DATETIME,
        temporal::DURATION,
        scalar::UUID,
        geometry::POINT,
        geometry::LINE,
        geometry::POLYGON,
    ]
}

/// Обработчик получил значение чужого вида (ошибка регистрации).
pub(crate) fn wrong_variant(
    value: &DomainValue,
    expected: DomainKind,
) -> CodecError {
    CodecError::type_mismatch("tag handler", expected.name(), value.kind().name())
}
