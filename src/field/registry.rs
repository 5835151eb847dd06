//! Match-Field Registry
//!
//! The process-wide catalog of field descriptors: one entry per identity,
//! built once before any lookup, never mutated afterward. Which fields
//! exist for a given protocol version is the caller's configuration;
//! [`FieldRegistry::standard`] is the built-in catalog.

use super::{FieldId, Match, MatchField, Prerequisite};
use crate::value::{ethertype, icmpv6, ip_proto, ValueKind};
use crate::{MatchError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Immutable catalog mapping field identity to descriptor.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: HashMap<FieldId, MatchField>,
    order: Vec<FieldId>,
}

impl FieldRegistry {
    /// Build a registry from an ordered descriptor list.
    ///
    /// A rule may only reference a field declared earlier in the list, which
    /// keeps the prerequisite graph acyclic by construction. Violations and
    /// duplicate identities fail instead of producing a partial catalog.
    pub fn from_fields(fields: Vec<MatchField>) -> Result<Self> {
        let mut map = HashMap::with_capacity(fields.len());
        let mut order = Vec::with_capacity(fields.len());
        for field in fields {
            let id = field.id();
            for rule in field.prerequisites() {
                if !map.contains_key(&rule.field()) {
                    return Err(MatchError::UndeclaredPrerequisite {
                        field: id,
                        references: rule.field(),
                    });
                }
            }
            if map.insert(id, field).is_some() {
                return Err(MatchError::DuplicateField(id));
            }
            order.push(id);
        }
        Ok(FieldRegistry { fields: map, order })
    }

    /// The built-in catalog, constructed on first use.
    pub fn standard() -> &'static FieldRegistry {
        static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            FieldRegistry::from_fields(standard_fields())
                .expect("standard catalog declares prerequisites in order")
        })
    }

    /// O(1) descriptor lookup.
    pub fn get(&self, id: FieldId) -> Option<&MatchField> {
        self.fields.get(&id)
    }

    /// Lookup from a raw wire identifier.
    pub fn by_raw(&self, raw: u16) -> Result<&MatchField> {
        let id = FieldId::try_from(raw).map_err(|_| {
            debug!(raw, "raw id does not name a known field");
            MatchError::UnknownField(raw)
        })?;
        self.fields.get(&id).ok_or_else(|| {
            debug!(?id, "field not in this catalog");
            MatchError::UnknownField(raw)
        })
    }

    /// Delegated prerequisite check for `id` against `m`.
    pub fn are_prerequisites_ok(&self, id: FieldId, m: &dyn Match) -> Result<bool> {
        let field = self
            .get(id)
            .ok_or(MatchError::UnknownField(id as u16))?;
        Ok(field.are_prerequisites_ok(m))
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchField> {
        self.order.iter().map(|id| &self.fields[id])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The built-in descriptor list. Declaration order respects prerequisite
/// references.
fn standard_fields() -> Vec<MatchField> {
    use FieldId::*;
    use ValueKind as K;

    let ip = || Prerequisite::one_of(EthType, [ethertype::IPV4, ethertype::IPV6]);
    let ipv4 = || Prerequisite::one_of(EthType, [ethertype::IPV4]);
    let ipv6 = || Prerequisite::one_of(EthType, [ethertype::IPV6]);
    let arp = || Prerequisite::one_of(EthType, [ethertype::ARP]);
    let mpls = || {
        Prerequisite::one_of(
            EthType,
            [ethertype::MPLS_UNICAST, ethertype::MPLS_MULTICAST],
        )
    };
    let proto = |p: u8| Prerequisite::one_of(IpProto, [p]);

    vec![
        MatchField::new(InPort, "in_port", K::U32),
        MatchField::new(InPhyPort, "in_phy_port", K::U32)
            .with_prerequisite(Prerequisite::presence(InPort)),
        MatchField::new(Metadata, "metadata", K::U64),
        MatchField::new(EthDst, "eth_dst", K::Mac),
        MatchField::new(EthSrc, "eth_src", K::Mac),
        MatchField::new(EthType, "eth_type", K::U16),
        MatchField::new(VlanVid, "vlan_vid", K::U16),
        MatchField::new(VlanPcp, "vlan_pcp", K::U8)
            .with_prerequisite(Prerequisite::presence(VlanVid)),
        MatchField::new(IpDscp, "ip_dscp", K::U8).with_prerequisite(ip()),
        MatchField::new(IpEcn, "ip_ecn", K::U8).with_prerequisite(ip()),
        MatchField::new(IpProto, "ip_proto", K::U8).with_prerequisite(ip()),
        MatchField::new(Ipv4Src, "ipv4_src", K::Ipv4).with_prerequisite(ipv4()),
        MatchField::new(Ipv4Dst, "ipv4_dst", K::Ipv4).with_prerequisite(ipv4()),
        MatchField::new(TcpSrc, "tcp_src", K::U16).with_prerequisite(proto(ip_proto::TCP)),
        MatchField::new(TcpDst, "tcp_dst", K::U16).with_prerequisite(proto(ip_proto::TCP)),
        MatchField::new(UdpSrc, "udp_src", K::U16).with_prerequisite(proto(ip_proto::UDP)),
        MatchField::new(UdpDst, "udp_dst", K::U16).with_prerequisite(proto(ip_proto::UDP)),
        MatchField::new(SctpSrc, "sctp_src", K::U16).with_prerequisite(proto(ip_proto::SCTP)),
        MatchField::new(SctpDst, "sctp_dst", K::U16).with_prerequisite(proto(ip_proto::SCTP)),
        MatchField::new(Icmpv4Type, "icmpv4_type", K::U8)
            .with_prerequisite(proto(ip_proto::ICMP)),
        MatchField::new(Icmpv4Code, "icmpv4_code", K::U8)
            .with_prerequisite(proto(ip_proto::ICMP)),
        MatchField::new(ArpOp, "arp_op", K::U16).with_prerequisite(arp()),
        MatchField::new(ArpSpa, "arp_spa", K::Ipv4).with_prerequisite(arp()),
        MatchField::new(ArpTpa, "arp_tpa", K::Ipv4).with_prerequisite(arp()),
        MatchField::new(ArpSha, "arp_sha", K::Mac).with_prerequisite(arp()),
        MatchField::new(ArpTha, "arp_tha", K::Mac).with_prerequisite(arp()),
        MatchField::new(Ipv6Src, "ipv6_src", K::Ipv6).with_prerequisite(ipv6()),
        MatchField::new(Ipv6Dst, "ipv6_dst", K::Ipv6).with_prerequisite(ipv6()),
        MatchField::new(Ipv6Flabel, "ipv6_flabel", K::U32).with_prerequisite(ipv6()),
        MatchField::new(Icmpv6Type, "icmpv6_type", K::U8)
            .with_prerequisite(proto(ip_proto::ICMPV6)),
        MatchField::new(Icmpv6Code, "icmpv6_code", K::U8)
            .with_prerequisite(proto(ip_proto::ICMPV6)),
        MatchField::new(Ipv6NdTarget, "ipv6_nd_target", K::Ipv6).with_prerequisite(
            Prerequisite::one_of(Icmpv6Type, [icmpv6::ND_SOLICIT, icmpv6::ND_ADVERT]),
        ),
        MatchField::new(Ipv6NdSll, "ipv6_nd_sll", K::Mac)
            .with_prerequisite(Prerequisite::one_of(Icmpv6Type, [icmpv6::ND_SOLICIT])),
        MatchField::new(Ipv6NdTll, "ipv6_nd_tll", K::Mac)
            .with_prerequisite(Prerequisite::one_of(Icmpv6Type, [icmpv6::ND_ADVERT])),
        MatchField::new(MplsLabel, "mpls_label", K::U32).with_prerequisite(mpls()),
        MatchField::new(MplsTc, "mpls_tc", K::U8).with_prerequisite(mpls()),
        MatchField::new(MplsBos, "mpls_bos", K::U8).with_prerequisite(mpls()),
        MatchField::new(TunnelId, "tunnel_id", K::U64),
        MatchField::new(Ipv6Exthdr, "ipv6_exthdr", K::U16).with_prerequisite(ipv6()),
        MatchField::new(PbbUca, "pbb_uca", K::U8)
            .with_prerequisite(Prerequisite::one_of(EthType, [ethertype::PBB])),
        MatchField::new(TcpFlags, "tcp_flags", K::U16).with_prerequisite(proto(ip_proto::TCP)),
        MatchField::new(InPorts128, "in_ports_128", K::Mask128),
        MatchField::new(InPorts512, "in_ports_512", K::Mask512),
        // eight user-defined field slots, all sharing one display name
        MatchField::new(Udf0, "udf", K::U32),
        MatchField::new(Udf1, "udf", K::U32),
        MatchField::new(Udf2, "udf", K::U32),
        MatchField::new(Udf3, "udf", K::U32),
        MatchField::new(Udf4, "udf", K::U32),
        MatchField::new(Udf5, "udf", K::U32),
        MatchField::new(Udf6, "udf", K::U32),
        MatchField::new(Udf7, "udf", K::U32),
        MatchField::new(OduSigId, "odu_sig_id", K::OduSignal),
        MatchField::new(OduSigtype, "odu_sigtype", K::U8),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldVal;
    use std::collections::HashMap;

    struct FakeMatch(HashMap<FieldId, FieldVal>);

    impl FakeMatch {
        fn empty() -> Self {
            FakeMatch(HashMap::new())
        }

        fn with(mut self, field: FieldId, value: impl Into<FieldVal>) -> Self {
            self.0.insert(field, value.into());
            self
        }
    }

    impl Match for FakeMatch {
        fn get_value(&self, field: FieldId) -> Option<&FieldVal> {
            self.0.get(&field)
        }
    }

    #[test]
    fn test_standard_catalog_lookups() {
        let registry = FieldRegistry::standard();
        assert_eq!(registry.len(), 53);
        assert!(!registry.is_empty());

        // every cataloged descriptor resolves by id and by raw id
        for field in registry.iter() {
            assert!(registry.get(field.id()).is_some());
            let by_raw = registry.by_raw(field.id() as u16).unwrap();
            assert_eq!(by_raw.id(), field.id());
        }
    }

    #[test]
    fn test_unknown_raw_id() {
        let registry = FieldRegistry::standard();
        assert!(matches!(
            registry.by_raw(999),
            Err(MatchError::UnknownField(999))
        ));
        // 40 is a gap in the numbering
        assert!(matches!(
            registry.by_raw(40),
            Err(MatchError::UnknownField(40))
        ));
    }

    #[test]
    fn test_nd_target_prerequisites() {
        let registry = FieldRegistry::standard();

        let empty = FakeMatch::empty();
        assert!(!registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &empty)
            .unwrap());

        let solicit = FakeMatch::empty().with(FieldId::Icmpv6Type, 135u8);
        assert!(registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &solicit)
            .unwrap());

        let advert = FakeMatch::empty().with(FieldId::Icmpv6Type, 136u8);
        assert!(registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &advert)
            .unwrap());

        let wrong = FakeMatch::empty().with(FieldId::Icmpv6Type, 3u8);
        assert!(!registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &wrong)
            .unwrap());
    }

    #[test]
    fn test_fields_own_value_does_not_count() {
        // whether the checked field itself is already set changes nothing
        let registry = FieldRegistry::standard();
        let target: std::net::Ipv6Addr = "fe80::1".parse().unwrap();

        let only_self = FakeMatch::empty().with(FieldId::Ipv6NdTarget, target);
        assert!(!registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &only_self)
            .unwrap());

        let both = FakeMatch::empty()
            .with(FieldId::Icmpv6Type, 135u8)
            .with(FieldId::Ipv6NdTarget, target);
        assert!(registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &both)
            .unwrap());
    }

    #[test]
    fn test_evaluation_is_shallow() {
        // icmpv6_type itself requires ip_proto, but checking nd_target only
        // consults nd_target's own direct rule
        let registry = FieldRegistry::standard();
        let m = FakeMatch::empty().with(FieldId::Icmpv6Type, 135u8);
        assert!(registry
            .are_prerequisites_ok(FieldId::Ipv6NdTarget, &m)
            .unwrap());
        assert!(!registry
            .are_prerequisites_ok(FieldId::Icmpv6Type, &m)
            .unwrap());
    }

    #[test]
    fn test_udf_slots_share_name_not_identity() {
        let registry = FieldRegistry::standard();
        let slots = [
            FieldId::Udf0,
            FieldId::Udf1,
            FieldId::Udf2,
            FieldId::Udf3,
            FieldId::Udf4,
            FieldId::Udf5,
            FieldId::Udf6,
            FieldId::Udf7,
        ];
        for slot in slots {
            let field = registry.get(slot).unwrap();
            assert_eq!(field.name(), "udf");
            assert_eq!(field.id(), slot);
            assert_eq!(field.value_kind(), ValueKind::U32);
        }
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let fields = vec![
            MatchField::new(FieldId::InPort, "in_port", ValueKind::U32),
            MatchField::new(FieldId::InPort, "in_port_again", ValueKind::U32),
        ];
        assert!(matches!(
            FieldRegistry::from_fields(fields),
            Err(MatchError::DuplicateField(FieldId::InPort))
        ));
    }

    #[test]
    fn test_forward_reference_rejected() {
        // vlan_pcp declared before the vlan_vid it references
        let fields = vec![MatchField::new(FieldId::VlanPcp, "vlan_pcp", ValueKind::U8)
            .with_prerequisite(Prerequisite::presence(FieldId::VlanVid))];
        assert!(matches!(
            FieldRegistry::from_fields(fields),
            Err(MatchError::UndeclaredPrerequisite {
                field: FieldId::VlanPcp,
                references: FieldId::VlanVid,
            })
        ));
    }

    #[test]
    fn test_unknown_field_in_prerequisite_check() {
        let registry = FieldRegistry::from_fields(vec![MatchField::new(
            FieldId::InPort,
            "in_port",
            ValueKind::U32,
        )])
        .unwrap();
        let err = registry
            .are_prerequisites_ok(FieldId::TcpSrc, &FakeMatch::empty())
            .unwrap_err();
        assert!(matches!(err, MatchError::UnknownField(13)));
    }
}
