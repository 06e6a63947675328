//! Идентификатор записи (`[table, id]`) и имя таблицы.

use ciborium::value::Value as Cbor;
use tagwire_error::{CodecError, CodecResult};

use super::wrong_variant;
use crate::{
    codec::{
        tags::{TAG_RECORD_ID, TAG_TABLE},
        wire, DecodeContext, EncodeContext, TagHandler,
    },
    types::{DomainKind, DomainValue, Identifier, RecordId, Table},
};

pub const RECORD_ID: TagHandler = TagHandler {
    tag: TAG_RECORD_ID,
    kind: DomainKind::RecordId,
    encode: encode_record_id,
    decode: decode_record_id,
};

pub const TABLE: TagHandler = TagHandler {
    tag: TAG_TABLE,
    kind: DomainKind::Table,
    encode: encode_table,
    decode: decode_table,
};

/// `id` кодируется по своему варианту; вложенные значения проходят через
/// общий обход.
fn encode_record_id(
    value: &DomainValue,
    ctx: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    let DomainValue::RecordId(rid) = value else {
        return Err(wrong_variant(value, DomainKind::RecordId));
    };
    let id = match &rid.id {
        Identifier::String(s) => Cbor::Text(s.clone()),
        Identifier::Number(n) => wire::int(*n),
        Identifier::Array(items) => ctx.encode_array(items)?,
        Identifier::Object(map) => ctx.encode_object(map)?,
    };
    Ok(Cbor::Array(vec![Cbor::Text(rid.table.to_string()), id]))
}

/// Вариант `id` восстанавливается по проводному типу второго элемента.
fn decode_record_id(
    content: Cbor,
    ctx: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    let [table, id] = wire::expect_fixed::<2>(content, "record id")?;
    let table = Table::new(wire::expect_text(table, "record id table")?)?;

    let found = wire::kind_of(&id);
    let id = match id {
        Cbor::Text(s) => Identifier::String(s),
        Cbor::Integer(i) => Identifier::Number(u64::try_from(i).map_err(|_| {
            CodecError::type_mismatch("record id", "unsigned integer", found)
        })?),
        Cbor::Array(items) => Identifier::Array(ctx.decode_array(items)?),
        Cbor::Map(entries) => Identifier::Object(ctx.decode_object(entries)?),
        _ => {
            return Err(CodecError::type_mismatch(
                "record id",
                "text, unsigned integer, array or map",
                found,
            ))
        }
    };

    Ok(DomainValue::RecordId(RecordId { table, id }))
}

fn encode_table(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::Table(table) => Ok(Cbor::Text(table.to_string())),
        other => Err(wrong_variant(other, DomainKind::Table)),
    }
}

fn decode_table(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    let name = wire::expect_text(content, "table")?;
    Table::new(name).map(DomainValue::Table)
}
