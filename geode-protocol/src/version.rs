use std::fmt;

/// A protocol revision as negotiated during login. Fixed for the lifetime of
/// a connection; every serializer call is bound to exactly one of these.
///
/// Field presence and layout are gated by comparing against the named
/// milestone constants below. Gate sites never hardcode raw numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    pub const V1_14_60: ProtocolVersion = ProtocolVersion(389);
    pub const V1_16_0: ProtocolVersion = ProtocolVersion(407);
    pub const V1_16_100: ProtocolVersion = ProtocolVersion(419);
    pub const V1_16_220: ProtocolVersion = ProtocolVersion(431);
    pub const V1_17_0: ProtocolVersion = ProtocolVersion(440);
    pub const V1_17_30: ProtocolVersion = ProtocolVersion(465);
    pub const V1_17_40: ProtocolVersion = ProtocolVersion(471);
    pub const V1_18_0: ProtocolVersion = ProtocolVersion(475);
    pub const V1_18_30: ProtocolVersion = ProtocolVersion(503);
    pub const V1_19_0: ProtocolVersion = ProtocolVersion(527);
    pub const V1_19_10: ProtocolVersion = ProtocolVersion(534);

    pub const MIN_SUPPORTED: ProtocolVersion = Self::V1_14_60;
    pub const CURRENT: ProtocolVersion = Self::V1_19_10;

    /// Every known milestone, ascending.
    pub const MILESTONES: [(ProtocolVersion, &'static str); 11] = [
        (Self::V1_14_60, "1.14.60"),
        (Self::V1_16_0, "1.16.0"),
        (Self::V1_16_100, "1.16.100"),
        (Self::V1_16_220, "1.16.220"),
        (Self::V1_17_0, "1.17.0"),
        (Self::V1_17_30, "1.17.30"),
        (Self::V1_17_40, "1.17.40"),
        (Self::V1_18_0, "1.18.0"),
        (Self::V1_18_30, "1.18.30"),
        (Self::V1_19_0, "1.19.0"),
        (Self::V1_19_10, "1.19.10"),
    ];

    pub fn is_supported(self) -> bool {
        (Self::MIN_SUPPORTED..=Self::CURRENT).contains(&self)
    }

    /// Display name of this version if it is a known milestone.
    pub fn name(self) -> Option<&'static str> {
        Self::MILESTONES
            .iter()
            .find(|(version, _)| *version == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (protocol {})", name, self.0),
            None => write!(f, "protocol {}", self.0),
        }
    }
}
