//! Точка, ломаная и полигон.
//!
//! Ломаная состоит из тегированных точек, полигон из тегированных
//! ломаных. Все три уровня используют один и тот же примитив
//! последовательности из `wire`.

use ciborium::value::Value as Cbor;
use tagwire_error::CodecResult;

use super::wrong_variant;
use crate::{
    codec::{
        tags::{TAG_GEOMETRY_LINE, TAG_GEOMETRY_POINT, TAG_GEOMETRY_POLYGON},
        wire, DecodeContext, EncodeContext, TagHandler,
    },
    types::{DomainKind, DomainValue, GeometryLine, GeometryPoint, GeometryPolygon},
};

pub const POINT: TagHandler = TagHandler {
    tag: TAG_GEOMETRY_POINT,
    kind: DomainKind::Point,
    encode: encode_point,
    decode: decode_point,
};

pub const LINE: TagHandler = TagHandler {
    tag: TAG_GEOMETRY_LINE,
    kind: DomainKind::Line,
    encode: encode_line,
    decode: decode_line,
};

pub const POLYGON: TagHandler = TagHandler {
    tag: TAG_GEOMETRY_POLYGON,
    kind: DomainKind::Polygon,
    encode: encode_polygon,
    decode: decode_polygon,
};

////////////////////////////////////////////////////////////////////////////////
// Содержимое тегов
////////////////////////////////////////////////////////////////////////////////

fn point_content(p: &GeometryPoint) -> Cbor {
    Cbor::Array(vec![Cbor::Float(p.lon), Cbor::Float(p.lat)])
}

fn line_content(line: &GeometryLine) -> CodecResult<Cbor> {
    wire::encode_seq(line.points(), |p| {
        Ok(wire::tagged(TAG_GEOMETRY_POINT, point_content(p)))
    })
}

fn polygon_content(polygon: &GeometryPolygon) -> CodecResult<Cbor> {
    wire::encode_seq(polygon.rings(), |line| {
        Ok(wire::tagged(TAG_GEOMETRY_LINE, line_content(line)?))
    })
}

fn point_from(content: Cbor) -> CodecResult<GeometryPoint> {
    let [lon, lat] = wire::expect_fixed::<2>(content, "geometry point")?;
    Ok(GeometryPoint::new(
        wire::expect_f64(&lon, "geometry point longitude")?,
        wire::expect_f64(&lat, "geometry point latitude")?,
    ))
}

fn line_from(content: Cbor) -> CodecResult<GeometryLine> {
    wire::decode_seq(content, "geometry line", |el| {
        let point = wire::expect_tagged(
            el,
            TAG_GEOMETRY_POINT,
            "geometry point",
            "geometry line element",
        )?;
        point_from(point)
    })
    .map(GeometryLine::new)
}

fn polygon_from(content: Cbor) -> CodecResult<GeometryPolygon> {
    wire::decode_seq(content, "geometry polygon", |el| {
        let line = wire::expect_tagged(
            el,
            TAG_GEOMETRY_LINE,
            "geometry line",
            "geometry polygon ring",
        )?;
        line_from(line)
    })
    .map(GeometryPolygon::new)
}

////////////////////////////////////////////////////////////////////////////////
// Обработчики
////////////////////////////////////////////////////////////////////////////////

fn encode_point(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::Point(p) => Ok(point_content(p)),
        other => Err(wrong_variant(other, DomainKind::Point)),
    }
}

fn encode_line(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::Line(line) => line_content(line),
        other => Err(wrong_variant(other, DomainKind::Line)),
    }
}

fn encode_polygon(
    value: &DomainValue,
    _: &mut EncodeContext<'_>,
) -> CodecResult<Cbor> {
    match value {
        DomainValue::Polygon(polygon) => polygon_content(polygon),
        other => Err(wrong_variant(other, DomainKind::Polygon)),
    }
}

fn decode_point(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    point_from(content).map(DomainValue::Point)
}

fn decode_line(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    line_from(content).map(DomainValue::Line)
}

fn decode_polygon(
    content: Cbor,
    _: &mut DecodeContext<'_>,
) -> CodecResult<DomainValue> {
    polygon_from(content).map(DomainValue::Polygon)
}
