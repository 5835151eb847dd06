//! Composite ODU Signal Identifier
//!
//! Optical-transport tributary identifier carrying a tributary port number,
//! a time-slot count, and a 10-byte time-slot bitmap. The wire image is
//! padded to a 4-byte boundary: 16 bytes total, with a 2-byte pad that is
//! written as zero and discarded on read.

use super::{ensure_remaining, MaskError, MatchValue, ParseError};
use bytes::{Buf, BufMut};
use std::fmt;
use std::hash::Hasher;

/// ODU signal identifier.
///
/// Field order is the comparison order: `tpn`, then `tslen`, then `tsmap`
/// in unsigned lexicographic byte order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OduSignalId {
    tpn: u16,
    tslen: u16,
    tsmap: Vec<u8>,
}

impl OduSignalId {
    /// Fixed wire extent of the time-slot map.
    pub const TSMAP_WIRE_LEN: usize = 10;
    const PAD: usize = 2;

    /// `tsmap` is not length-checked here; values built for the wire carry
    /// a [`Self::TSMAP_WIRE_LEN`]-byte map, and [`MatchValue::write_to`]
    /// zero-fills the map's fixed extent beyond the stored bytes.
    pub fn new(tpn: u16, tslen: u16, tsmap: Vec<u8>) -> Self {
        OduSignalId { tpn, tslen, tsmap }
    }

    /// Tributary port number.
    pub fn tpn(&self) -> u16 {
        self.tpn
    }

    /// Time-slot count.
    pub fn tslen(&self) -> u16 {
        self.tslen
    }

    /// Time-slot bitmap.
    pub fn tsmap(&self) -> &[u8] {
        &self.tsmap
    }
}

impl Default for OduSignalId {
    /// The canonical default identifier: tpn 0, tslen 80, all-zero map.
    fn default() -> Self {
        OduSignalId::new(0, 80, vec![0; Self::TSMAP_WIRE_LEN])
    }
}

impl fmt::Display for OduSignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OduSignalId(tpn={}, tslen={}, tsmap={:02x?})",
            self.tpn, self.tslen, self.tsmap
        )
    }
}

impl MatchValue for OduSignalId {
    /// tpn(2) + tslen(2) + tsmap(10) + pad(2), independent of the semantic
    /// time-slot count.
    const WIRE_LENGTH: usize = 16;

    /// Sub-fields mask independently: integer AND for `tpn`/`tslen`,
    /// index-aligned byte AND for the map. A mask whose map is shorter than
    /// the value's cannot cover it and is a typed error.
    fn apply_mask(&self, mask: &Self) -> Result<Self, MaskError> {
        if mask.tsmap.len() < self.tsmap.len() {
            return Err(MaskError::LengthMismatch {
                need: self.tsmap.len(),
                got: mask.tsmap.len(),
            });
        }
        let tsmap = self
            .tsmap
            .iter()
            .zip(mask.tsmap.iter())
            .map(|(value, m)| value & m)
            .collect();
        Ok(OduSignalId {
            tpn: self.tpn & mask.tpn,
            tslen: self.tslen & mask.tslen,
            tsmap,
        })
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u16(self.tpn);
        buf.put_u16(self.tslen);
        // the map occupies a fixed 12-byte extent (map + pad), zero-filled
        // beyond the stored bytes
        let mut region = [0u8; Self::TSMAP_WIRE_LEN + Self::PAD];
        let stored = self.tsmap.len().min(Self::TSMAP_WIRE_LEN);
        region[..stored].copy_from_slice(&self.tsmap[..stored]);
        buf.put_slice(&region);
    }

    fn read_from<B: Buf>(buf: &mut B) -> Result<Self, ParseError> {
        ensure_remaining(buf, "odu signal id", Self::WIRE_LENGTH)?;
        let tpn = buf.get_u16();
        let tslen = buf.get_u16();
        let mut tsmap = vec![0u8; Self::TSMAP_WIRE_LEN];
        buf.copy_to_slice(&mut tsmap);
        // pad carries no information and is not validated
        buf.advance(Self::PAD);
        Ok(OduSignalId { tpn, tslen, tsmap })
    }

    fn content_hash<H: Hasher>(&self, sink: &mut H) {
        sink.write(&self.tpn.to_be_bytes());
        sink.write(&self.tslen.to_be_bytes());
        sink.write(&self.tsmap);
    }
}
