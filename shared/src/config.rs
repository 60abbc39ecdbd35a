use crate::version::ProtocolVersion;

/// What registration does when a name is registered a second time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail the second registration with `MetaError::DuplicateAttribute`
    #[default]
    Reject,
    /// Keep both definitions; lookups by name return the first one
    FirstWins,
}

/// Settings fixed for the lifetime of a `MetaRegistry`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MetaConfig {
    /// Protocol version every slot table is resolved against
    pub protocol_version: ProtocolVersion,
    pub duplicate_policy: DuplicatePolicy,
}

impl MetaConfig {
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self {
            protocol_version,
            ..Self::default()
        }
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
