//! Match-Field Identities and Descriptors
//!
//! A [`FieldId`] is the unique identity symbol of one matchable field; a
//! [`MatchField`] descriptor binds that identity to its value kind and to
//! the prerequisite rules gating its use. Descriptors are immutable after
//! construction and live for the whole process inside a
//! [`registry::FieldRegistry`].

pub mod prereq;
pub mod registry;

pub use prereq::*;
pub use registry::*;

use crate::value::{FieldVal, ValueKind};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Match-field identity symbols.
///
/// Discriminants are the stable wire-facing ids: 0-39 follow the standard
/// OXM numbering, the experimenter and vendor blocks sit above 40.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum FieldId {
    InPort = 0,
    InPhyPort = 1,
    Metadata = 2,
    EthDst = 3,
    EthSrc = 4,
    EthType = 5,
    VlanVid = 6,
    VlanPcp = 7,
    IpDscp = 8,
    IpEcn = 9,
    IpProto = 10,
    Ipv4Src = 11,
    Ipv4Dst = 12,
    TcpSrc = 13,
    TcpDst = 14,
    UdpSrc = 15,
    UdpDst = 16,
    SctpSrc = 17,
    SctpDst = 18,
    Icmpv4Type = 19,
    Icmpv4Code = 20,
    ArpOp = 21,
    ArpSpa = 22,
    ArpTpa = 23,
    ArpSha = 24,
    ArpTha = 25,
    Ipv6Src = 26,
    Ipv6Dst = 27,
    Ipv6Flabel = 28,
    Icmpv6Type = 29,
    Icmpv6Code = 30,
    Ipv6NdTarget = 31,
    Ipv6NdSll = 32,
    Ipv6NdTll = 33,
    MplsLabel = 34,
    MplsTc = 35,
    MplsBos = 36,
    TunnelId = 38,
    Ipv6Exthdr = 39,
    PbbUca = 41,
    TcpFlags = 42,

    // vendor block
    InPorts128 = 64,
    InPorts512 = 65,
    Udf0 = 66,
    Udf1 = 67,
    Udf2 = 68,
    Udf3 = 69,
    Udf4 = 70,
    Udf5 = 71,
    Udf6 = 72,
    Udf7 = 73,
    OduSigId = 74,
    OduSigtype = 75,
}

/// Immutable descriptor binding a field identity to its value kind and
/// prerequisite rules.
///
/// Display names are not unique across identities (the eight user-defined
/// field slots all render as "udf"); the [`FieldId`] is the only key.
#[derive(Debug, Clone)]
pub struct MatchField {
    id: FieldId,
    name: &'static str,
    kind: ValueKind,
    prerequisites: Vec<Prerequisite>,
}

impl MatchField {
    pub fn new(id: FieldId, name: &'static str, kind: ValueKind) -> Self {
        MatchField {
            id,
            name,
            kind,
            prerequisites: Vec::new(),
        }
    }

    pub fn with_prerequisite(mut self, rule: Prerequisite) -> Self {
        self.prerequisites.push(rule);
        self
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Display name; callers must not assume uniqueness.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_kind(&self) -> ValueKind {
        self.kind
    }

    /// The rules gating this field, read-only.
    pub fn prerequisites(&self) -> &[Prerequisite] {
        &self.prerequisites
    }

    /// Short-circuiting AND over this field's own direct rules.
    ///
    /// Evaluation is shallow: rules of the referenced fields are not
    /// re-verified here; they were enforced when those fields entered the
    /// match.
    pub fn are_prerequisites_ok(&self, m: &dyn Match) -> bool {
        self.prerequisites.iter().all(|rule| rule.is_satisfied(m))
    }
}

/// The evolving match predicate, supplied by the surrounding system.
///
/// This crate only reads from it during prerequisite evaluation; insertion
/// and removal belong to the collaborator.
pub trait Match {
    /// Current value for `field`, if the match constrains it.
    fn get_value(&self, field: FieldId) -> Option<&FieldVal>;
}
