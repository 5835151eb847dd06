//! Address Match Values
//!
//! Ethernet and IP addresses as matchable values. IPv4/IPv6 reuse the
//! standard library address types; the wire form is the raw octets in
//! network order, and masking is byte-wise (prefix masks compose naturally).

use super::{ensure_remaining, MaskError, MatchValue, ParseError};
use bytes::{Buf, BufMut};
use std::fmt;
use std::hash::Hasher;
use std::net::{Ipv4Addr, Ipv6Addr};

/// 48-bit Ethernet MAC address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub const ZERO: MacAddr = MacAddr([0; 6]);
    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Group bit of the first octet; set for multicast and broadcast frames.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl MatchValue for MacAddr {
    const WIRE_LENGTH: usize = 6;

    fn apply_mask(&self, mask: &Self) -> Result<Self, MaskError> {
        let mut octets = [0u8; 6];
        for (i, byte) in octets.iter_mut().enumerate() {
            *byte = self.0[i] & mask.0[i];
        }
        Ok(MacAddr(octets))
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.0);
    }

    fn read_from<B: Buf>(buf: &mut B) -> Result<Self, ParseError> {
        ensure_remaining(buf, "mac address", Self::WIRE_LENGTH)?;
        let mut octets = [0u8; 6];
        buf.copy_to_slice(&mut octets);
        Ok(MacAddr(octets))
    }

    fn content_hash<H: Hasher>(&self, sink: &mut H) {
        sink.write(&self.0);
    }
}

impl MatchValue for Ipv4Addr {
    const WIRE_LENGTH: usize = 4;

    fn apply_mask(&self, mask: &Self) -> Result<Self, MaskError> {
        Ok(Ipv4Addr::from(u32::from(*self) & u32::from(*mask)))
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.octets());
    }

    fn read_from<B: Buf>(buf: &mut B) -> Result<Self, ParseError> {
        ensure_remaining(buf, "ipv4 address", Self::WIRE_LENGTH)?;
        Ok(Ipv4Addr::from(buf.get_u32()))
    }

    fn content_hash<H: Hasher>(&self, sink: &mut H) {
        sink.write(&self.octets());
    }
}

impl MatchValue for Ipv6Addr {
    const WIRE_LENGTH: usize = 16;

    fn apply_mask(&self, mask: &Self) -> Result<Self, MaskError> {
        Ok(Ipv6Addr::from(u128::from(*self) & u128::from(*mask)))
    }

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.octets());
    }

    fn read_from<B: Buf>(buf: &mut B) -> Result<Self, ParseError> {
        ensure_remaining(buf, "ipv6 address", Self::WIRE_LENGTH)?;
        Ok(Ipv6Addr::from(buf.get_u128()))
    }

    fn content_hash<H: Hasher>(&self, sink: &mut H) {
        sink.write(&self.octets());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_display() {
        let mac = MacAddr::new([0x00, 0x1B, 0x44, 0x11, 0x3A, 0xB7]);
        assert_eq!(mac.to_string(), "00:1b:44:11:3a:b7");
    }

    #[test]
    fn test_mac_round_trip() {
        let mac = MacAddr::new([0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01]);
        let mut buf = Vec::new();
        mac.write_to(&mut buf);
        assert_eq!(buf.len(), MacAddr::WIRE_LENGTH);

        let recovered = MacAddr::read_from(&mut &buf[..]).unwrap();
        assert_eq!(recovered, mac);
    }

    #[test]
    fn test_mac_masking() {
        let mac = MacAddr::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        let oui_only = MacAddr::new([0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00]);
        let masked = mac.apply_mask(&oui_only).unwrap();
        assert_eq!(masked.octets(), [0xAA, 0xBB, 0xCC, 0x00, 0x00, 0x00]);

        assert_eq!(mac.apply_mask(&MacAddr::BROADCAST).unwrap(), mac);
        assert_eq!(mac.apply_mask(&MacAddr::ZERO).unwrap(), MacAddr::ZERO);
    }

    #[test]
    fn test_mac_multicast_bit() {
        assert!(MacAddr::BROADCAST.is_multicast());
        assert!(!MacAddr::new([0x00, 0x1B, 0x44, 0x11, 0x3A, 0xB7]).is_multicast());
        assert!(MacAddr::new([0x01, 0x00, 0x5E, 0x00, 0x00, 0x01]).is_multicast());
    }

    #[test]
    fn test_ipv4_prefix_mask() {
        let addr: Ipv4Addr = "192.168.42.17".parse().unwrap();
        let netmask: Ipv4Addr = "255.255.255.0".parse().unwrap();
        let network = addr.apply_mask(&netmask).unwrap();
        assert_eq!(network, "192.168.42.0".parse::<Ipv4Addr>().unwrap());
    }

    #[test]
    fn test_ipv4_wire_order() {
        let addr: Ipv4Addr = "10.0.0.1".parse().unwrap();
        let mut buf = Vec::new();
        addr.write_to(&mut buf);
        assert_eq!(buf, [10, 0, 0, 1]);
        assert_eq!(Ipv4Addr::read_from(&mut &buf[..]).unwrap(), addr);
    }

    #[test]
    fn test_ipv6_round_trip() {
        let addr: Ipv6Addr = "fe80::1234:5678:9abc:def0".parse().unwrap();
        let mut buf = Vec::new();
        addr.write_to(&mut buf);
        assert_eq!(buf.len(), 16);
        assert_eq!(Ipv6Addr::read_from(&mut &buf[..]).unwrap(), addr);
    }

    #[test]
    fn test_ipv6_prefix_mask() {
        let addr: Ipv6Addr = "2001:db8:1:2:3:4:5:6".parse().unwrap();
        let prefix64: Ipv6Addr = "ffff:ffff:ffff:ffff::".parse().unwrap();
        let masked = addr.apply_mask(&prefix64).unwrap();
        assert_eq!(masked, "2001:db8:1:2::".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_truncated_address_reads() {
        let bytes = [1u8, 2, 3];
        let err = MacAddr::read_from(&mut &bytes[..]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Truncated {
                what: "mac address",
                need: 6,
                got: 3
            }
        );

        let err = Ipv6Addr::read_from(&mut &bytes[..]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Truncated {
                what: "ipv6 address",
                need: 16,
                got: 3
            }
        );
    }
}
