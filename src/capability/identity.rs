use crate::error::{DispatchError, LookupDomain};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Vehicle type selecting which concrete providers an entity uses
/// (e.g., `truck`, `car`, `bus`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Discriminant(pub String);

/// Stable identifier for a provider in the built-in catalogue
/// (e.g., `truck_tires`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(pub String);

/// The closed set of operations an entity can delegate to a provider.
///
/// Unlike catalog-style enums there is no `Other` variant: every kind needs a
/// matching service trait, so unknown strings are rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CapabilityKind {
    Tire,
    Transport,
    Repair,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 3] = [
        CapabilityKind::Tire,
        CapabilityKind::Transport,
        CapabilityKind::Repair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::Tire => "tire",
            CapabilityKind::Transport => "transport",
            CapabilityKind::Repair => "repair",
        }
    }
}

impl TryFrom<&str> for CapabilityKind {
    type Error = DispatchError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "tire" => Ok(CapabilityKind::Tire),
            "transport" => Ok(CapabilityKind::Transport),
            "repair" => Ok(CapabilityKind::Repair),
            other => Err(DispatchError::unknown(LookupDomain::Capability, other)),
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CapabilityKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CapabilityKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        CapabilityKind::try_from(value.as_str()).map_err(serde::de::Error::custom)
    }
}

impl Discriminant {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Discriminant {
    fn from(value: &str) -> Self {
        Discriminant(value.to_string())
    }
}

impl fmt::Display for Discriminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProviderId {
    fn from(value: &str) -> Self {
        ProviderId(value.to_string())
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
