//! Flowmatch Core - Typed Match-Field Value Layer
//!
//! This crate implements the value and codec layer underneath a packet-match
//! predicate system. Every matchable protocol value (addresses, port bitmasks,
//! composite signal identifiers) satisfies one uniform contract: fixed wire
//! length, element-wise masking, a total order, wire-order hashing, and exact
//! big-endian serialization. On top of that sits a catalog of match-field
//! identities, each bound to a value kind and to the prerequisite rules that
//! gate when the field may legally appear in a match predicate.
//!
//! Message framing, action encoding, version negotiation, and the match
//! predicate object itself are external collaborators; this crate defines
//! only the interfaces it needs from them.

use thiserror::Error;

pub mod field;
pub mod value;

pub use field::*;
pub use value::*;

/// Crate-level errors
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Mask error: {0}")]
    Mask(#[from] MaskError),

    #[error("Bit index error: {0}")]
    Index(#[from] BitIndexError),

    #[error("Unknown match field id: {0}")]
    UnknownField(u16),

    #[error("Duplicate match field id: {0:?}")]
    DuplicateField(FieldId),

    #[error("Field {field:?} requires {references:?}, which is not declared before it")]
    UndeclaredPrerequisite {
        field: FieldId,
        references: FieldId,
    },
}

/// Result type for match-field operations
pub type Result<T> = std::result::Result<T, MatchError>;
