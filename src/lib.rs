/// CBOR codec: tag registry, generic value walk, domain tag handlers.
pub mod codec;
/// Codec limits loaded from defaults and `TAGWIRE_*` environment variables.
pub mod config;
/// Logging setup for binaries and tests.
pub mod logging;
/// Domain data model: `Value`, record ids, geometry, datetimes.
pub mod types;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Codec entry point and diagnostics.
pub use codec::{
    diagnose, diagnose_value, Codec, DecodeContext, EncodeContext, TagHandler, TagRegistry,
    TagRegistryBuilder,
};
/// Codec settings.
pub use config::{CodecSettings, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAYLOAD_SIZE};
/// Logging initialization.
pub use logging::init_logging;
/// Operation errors and result types.
pub use tagwire_error::{CodecError, CodecResult, ErrorExt, StatusCode};
/// Data types.
pub use types::{
    CustomDateTime, CustomDuration, Decimal, DomainKind, DomainValue, GeometryLine, GeometryPoint,
    GeometryPolygon, Identifier, RecordId, Table, Uuid, Value, NONE,
};
