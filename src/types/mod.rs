//! Модель данных: доменные значения и динамическое дерево [`Value`].
//!
//! Типы здесь ничего не знают о проводном формате; кодирование описано в
//! модуле `codec`.

pub mod geometry;
pub mod record_id;
pub mod scalar;
pub mod temporal;
pub mod value;

pub use geometry::*;
pub use record_id::*;
pub use scalar::*;
pub use temporal::*;
pub use value::*;
