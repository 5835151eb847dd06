//! Match-Value Contract and Wire Codecs
//!
//! Everything a match predicate can test against implements [`MatchValue`]:
//! - a fixed wire length, constant per type, never per instance
//! - pure element-wise masking via [`MatchValue::apply_mask`]
//! - a total order (`Ord`), most-significant unit first, agreeing with `Eq`
//! - wire-order hashing via [`MatchValue::content_hash`]
//! - exact big-endian serialization through a [`bytes`] cursor
//!
//! Decoding never reads a partial value: when fewer bytes remain than the
//! type's wire length, the read fails up front with [`ParseError::Truncated`]
//! and the cursor is left untouched.

pub mod addr;
pub mod any;
pub mod bitmask;
pub mod scalar;
pub mod signal;

pub use addr::*;
pub use any::*;
pub use bitmask::*;
pub use scalar::*;
pub use signal::*;

use bytes::{Buf, BufMut};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Wire decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("truncated {what}: need {need} bytes, got {got}")]
    Truncated {
        what: &'static str,
        need: usize,
        got: usize,
    },
}

/// Masking errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("mask bitmap too short: value carries {need} bytes, mask carries {got}")]
    LengthMismatch { need: usize, got: usize },

    #[error("mask kind mismatch: expected {expected:?}, got {got:?}")]
    KindMismatch { expected: ValueKind, got: ValueKind },
}

/// Bit index outside a mask's width
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("bit index {index} outside [0, {width})")]
pub struct BitIndexError {
    pub index: usize,
    pub width: usize,
}

/// Result type for wire decoding
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Contract satisfied by every matchable protocol value.
///
/// `Ord` is the wire-defined comparison: most-significant unit first,
/// unsigned lexicographic for byte-sequence sub-fields. Implementations must
/// keep it consistent with `Eq`, and [`MatchValue::content_hash`] must feed
/// the sink in wire byte order so equal values hash identically on every
/// platform.
pub trait MatchValue: Sized + Clone + Eq + Ord + Hash {
    /// Fixed wire byte count for this type.
    const WIRE_LENGTH: usize;

    /// Element-wise AND against a same-typed mask.
    ///
    /// Composite types mask each sub-field independently and report
    /// [`MaskError::LengthMismatch`] when the mask's byte-sequence sub-field
    /// is shorter than the value's. Fixed-layout types always succeed.
    fn apply_mask(&self, mask: &Self) -> std::result::Result<Self, MaskError>;

    /// Write exactly [`Self::WIRE_LENGTH`] bytes, big-endian.
    fn write_to<B: BufMut>(&self, buf: &mut B);

    /// Read exactly [`Self::WIRE_LENGTH`] bytes, or fail without consuming.
    fn read_from<B: Buf>(buf: &mut B) -> ParseResult<Self>;

    /// Feed the value's wire-order bytes into a hash accumulator.
    fn content_hash<H: Hasher>(&self, sink: &mut H);
}

pub(crate) fn ensure_remaining<B: Buf>(
    buf: &B,
    what: &'static str,
    need: usize,
) -> ParseResult<()> {
    let got = buf.remaining();
    if got < need {
        return Err(ParseError::Truncated { what, need, got });
    }
    Ok(())
}
