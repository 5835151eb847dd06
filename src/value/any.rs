//! Tagged Match-Value Union
//!
//! Field identities bind to exactly one value kind. [`FieldVal`] carries any
//! of the concrete value types through heterogeneous containers (match
//! contents, permitted-value sets) while keeping every operation checked
//! against the kind at the point of use.

use super::{
    BitMask128, BitMask256, BitMask512, MacAddr, MaskError, MatchValue, OduSignalId, ParseResult,
};
use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use std::hash::Hasher;
use std::net::{Ipv4Addr, Ipv6Addr};

/// The value kind a field identity binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    U8,
    U16,
    U32,
    U64,
    Mac,
    Ipv4,
    Ipv6,
    Mask128,
    Mask256,
    Mask512,
    OduSignal,
}

impl ValueKind {
    /// Fixed wire byte count for values of this kind.
    pub const fn wire_length(&self) -> usize {
        match self {
            ValueKind::U8 => u8::WIRE_LENGTH,
            ValueKind::U16 => u16::WIRE_LENGTH,
            ValueKind::U32 => u32::WIRE_LENGTH,
            ValueKind::U64 => u64::WIRE_LENGTH,
            ValueKind::Mac => MacAddr::WIRE_LENGTH,
            ValueKind::Ipv4 => Ipv4Addr::WIRE_LENGTH,
            ValueKind::Ipv6 => Ipv6Addr::WIRE_LENGTH,
            ValueKind::Mask128 => BitMask128::WIRE_LENGTH,
            ValueKind::Mask256 => BitMask256::WIRE_LENGTH,
            ValueKind::Mask512 => BitMask512::WIRE_LENGTH,
            ValueKind::OduSignal => OduSignalId::WIRE_LENGTH,
        }
    }
}

/// A match-field value of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldVal {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Mac(MacAddr),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Mask128(BitMask128),
    Mask256(BitMask256),
    Mask512(BitMask512),
    OduSignal(OduSignalId),
}

impl FieldVal {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldVal::U8(_) => ValueKind::U8,
            FieldVal::U16(_) => ValueKind::U16,
            FieldVal::U32(_) => ValueKind::U32,
            FieldVal::U64(_) => ValueKind::U64,
            FieldVal::Mac(_) => ValueKind::Mac,
            FieldVal::Ipv4(_) => ValueKind::Ipv4,
            FieldVal::Ipv6(_) => ValueKind::Ipv6,
            FieldVal::Mask128(_) => ValueKind::Mask128,
            FieldVal::Mask256(_) => ValueKind::Mask256,
            FieldVal::Mask512(_) => ValueKind::Mask512,
            FieldVal::OduSignal(_) => ValueKind::OduSignal,
        }
    }

    pub fn wire_length(&self) -> usize {
        self.kind().wire_length()
    }

    /// Element-wise AND against a mask of the same kind.
    pub fn apply_mask(&self, mask: &FieldVal) -> Result<FieldVal, MaskError> {
        match (self, mask) {
            (FieldVal::U8(v), FieldVal::U8(m)) => Ok(FieldVal::U8(v.apply_mask(m)?)),
            (FieldVal::U16(v), FieldVal::U16(m)) => Ok(FieldVal::U16(v.apply_mask(m)?)),
            (FieldVal::U32(v), FieldVal::U32(m)) => Ok(FieldVal::U32(v.apply_mask(m)?)),
            (FieldVal::U64(v), FieldVal::U64(m)) => Ok(FieldVal::U64(v.apply_mask(m)?)),
            (FieldVal::Mac(v), FieldVal::Mac(m)) => Ok(FieldVal::Mac(v.apply_mask(m)?)),
            (FieldVal::Ipv4(v), FieldVal::Ipv4(m)) => Ok(FieldVal::Ipv4(v.apply_mask(m)?)),
            (FieldVal::Ipv6(v), FieldVal::Ipv6(m)) => Ok(FieldVal::Ipv6(v.apply_mask(m)?)),
            (FieldVal::Mask128(v), FieldVal::Mask128(m)) => {
                Ok(FieldVal::Mask128(v.apply_mask(m)?))
            }
            (FieldVal::Mask256(v), FieldVal::Mask256(m)) => {
                Ok(FieldVal::Mask256(v.apply_mask(m)?))
            }
            (FieldVal::Mask512(v), FieldVal::Mask512(m)) => {
                Ok(FieldVal::Mask512(v.apply_mask(m)?))
            }
            (FieldVal::OduSignal(v), FieldVal::OduSignal(m)) => {
                Ok(FieldVal::OduSignal(v.apply_mask(m)?))
            }
            (value, mask) => Err(MaskError::KindMismatch {
                expected: value.kind(),
                got: mask.kind(),
            }),
        }
    }

    /// Write exactly [`FieldVal::wire_length`] bytes, big-endian.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        match self {
            FieldVal::U8(v) => v.write_to(buf),
            FieldVal::U16(v) => v.write_to(buf),
            FieldVal::U32(v) => v.write_to(buf),
            FieldVal::U64(v) => v.write_to(buf),
            FieldVal::Mac(v) => v.write_to(buf),
            FieldVal::Ipv4(v) => v.write_to(buf),
            FieldVal::Ipv6(v) => v.write_to(buf),
            FieldVal::Mask128(v) => v.write_to(buf),
            FieldVal::Mask256(v) => v.write_to(buf),
            FieldVal::Mask512(v) => v.write_to(buf),
            FieldVal::OduSignal(v) => v.write_to(buf),
        }
    }

    /// Read a value of `kind` from the cursor.
    pub fn read_from<B: Buf>(kind: ValueKind, buf: &mut B) -> ParseResult<FieldVal> {
        Ok(match kind {
            ValueKind::U8 => FieldVal::U8(u8::read_from(buf)?),
            ValueKind::U16 => FieldVal::U16(u16::read_from(buf)?),
            ValueKind::U32 => FieldVal::U32(u32::read_from(buf)?),
            ValueKind::U64 => FieldVal::U64(u64::read_from(buf)?),
            ValueKind::Mac => FieldVal::Mac(MacAddr::read_from(buf)?),
            ValueKind::Ipv4 => FieldVal::Ipv4(Ipv4Addr::read_from(buf)?),
            ValueKind::Ipv6 => FieldVal::Ipv6(Ipv6Addr::read_from(buf)?),
            ValueKind::Mask128 => FieldVal::Mask128(BitMask128::read_from(buf)?),
            ValueKind::Mask256 => FieldVal::Mask256(BitMask256::read_from(buf)?),
            ValueKind::Mask512 => FieldVal::Mask512(BitMask512::read_from(buf)?),
            ValueKind::OduSignal => FieldVal::OduSignal(OduSignalId::read_from(buf)?),
        })
    }

    /// Feed the value's wire-order bytes into a hash accumulator.
    pub fn content_hash<H: Hasher>(&self, sink: &mut H) {
        match self {
            FieldVal::U8(v) => v.content_hash(sink),
            FieldVal::U16(v) => v.content_hash(sink),
            FieldVal::U32(v) => v.content_hash(sink),
            FieldVal::U64(v) => v.content_hash(sink),
            FieldVal::Mac(v) => v.content_hash(sink),
            FieldVal::Ipv4(v) => v.content_hash(sink),
            FieldVal::Ipv6(v) => v.content_hash(sink),
            FieldVal::Mask128(v) => v.content_hash(sink),
            FieldVal::Mask256(v) => v.content_hash(sink),
            FieldVal::Mask512(v) => v.content_hash(sink),
            FieldVal::OduSignal(v) => v.content_hash(sink),
        }
    }
}

impl From<u8> for FieldVal {
    fn from(v: u8) -> Self {
        FieldVal::U8(v)
    }
}

impl From<u16> for FieldVal {
    fn from(v: u16) -> Self {
        FieldVal::U16(v)
    }
}

impl From<u32> for FieldVal {
    fn from(v: u32) -> Self {
        FieldVal::U32(v)
    }
}

impl From<u64> for FieldVal {
    fn from(v: u64) -> Self {
        FieldVal::U64(v)
    }
}

impl From<MacAddr> for FieldVal {
    fn from(v: MacAddr) -> Self {
        FieldVal::Mac(v)
    }
}

impl From<Ipv4Addr> for FieldVal {
    fn from(v: Ipv4Addr) -> Self {
        FieldVal::Ipv4(v)
    }
}

impl From<Ipv6Addr> for FieldVal {
    fn from(v: Ipv6Addr) -> Self {
        FieldVal::Ipv6(v)
    }
}

impl From<BitMask128> for FieldVal {
    fn from(v: BitMask128) -> Self {
        FieldVal::Mask128(v)
    }
}

impl From<BitMask256> for FieldVal {
    fn from(v: BitMask256) -> Self {
        FieldVal::Mask256(v)
    }
}

impl From<BitMask512> for FieldVal {
    fn from(v: BitMask512) -> Self {
        FieldVal::Mask512(v)
    }
}

impl From<OduSignalId> for FieldVal {
    fn from(v: OduSignalId) -> Self {
        FieldVal::OduSignal(v)
    }
}
