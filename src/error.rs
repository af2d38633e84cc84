//! Typed failures raised by dispatch and by string-to-variant factories.
//!
//! Both conditions are programming errors on the caller's side, so they are
//! surfaced as distinct variants rather than folded into a generic message.
//! Loaders that read configuration from disk wrap these in `anyhow::Error`
//! with file context.

use crate::capability::CapabilityKind;
use std::fmt;
use thiserror::Error;

/// Which string-keyed namespace a factory lookup was resolving.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupDomain {
    VehicleType,
    Provider,
    Capability,
    Ingredient,
}

impl LookupDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupDomain::VehicleType => "vehicle type",
            LookupDomain::Provider => "provider",
            LookupDomain::Capability => "capability",
            LookupDomain::Ingredient => "ingredient",
        }
    }
}

impl fmt::Display for LookupDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// `invoke` was called for a capability the entity never had assigned.
    #[error("{entity} has no {capability} provider assigned")]
    CapabilityNotAssigned {
        entity: String,
        capability: CapabilityKind,
    },

    /// A factory was handed a key outside its recognized set.
    #[error("unknown {domain} '{value}'")]
    UnknownDiscriminant { domain: LookupDomain, value: String },
}

impl DispatchError {
    pub(crate) fn unknown(domain: LookupDomain, value: impl Into<String>) -> Self {
        DispatchError::UnknownDiscriminant {
            domain,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity_and_domain() {
        let not_assigned = DispatchError::CapabilityNotAssigned {
            entity: "bus-7".to_string(),
            capability: CapabilityKind::Tire,
        };
        assert_eq!(not_assigned.to_string(), "bus-7 has no tire provider assigned");

        let unknown = DispatchError::unknown(LookupDomain::VehicleType, "tractor");
        assert_eq!(unknown.to_string(), "unknown vehicle type 'tractor'");
    }
}
