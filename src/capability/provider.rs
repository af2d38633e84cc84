//! Capability traits, the `Provider` tag that carries them, and the built-in
//! provider catalogue.
//!
//! Each capability is its own trait so an implementation states exactly which
//! operation it serves. The entity-argument forms default to a no-op (`None`)
//! so providers only implement them when they actually inspect the vehicle.
//! Binaries and the table loader should resolve providers through
//! [`builtin_provider`] instead of naming the concrete types.

use crate::capability::entity::Vehicle;
use crate::capability::identity::{CapabilityKind, ProviderId};
use crate::error::{DispatchError, LookupDomain};
use std::fmt;
use std::sync::Arc;

/// Identity shared by every capability implementation.
pub trait Service: Send + Sync {
    /// Stable id used by provider tables and diagnostics.
    fn id(&self) -> &str;
}

pub trait TireService: Service {
    fn replace_tires(&self) -> String;

    fn replace_tires_for(&self, _vehicle: &Vehicle) -> Option<String> {
        None
    }
}

pub trait TransportService: Service {
    fn transport(&self) -> String;

    fn transport_for(&self, _vehicle: &Vehicle) -> Option<String> {
        None
    }
}

pub trait RepairService: Service {
    fn repair(&self) -> String;

    fn repair_for(&self, _vehicle: &Vehicle) -> Option<String> {
        None
    }
}

/// A provider tagged with the capability it serves.
///
/// The tag is the variant itself, so a provider cannot be filed under a kind
/// it does not implement. Cloning shares the underlying service.
#[derive(Clone)]
pub enum Provider {
    Tire(Arc<dyn TireService>),
    Transport(Arc<dyn TransportService>),
    Repair(Arc<dyn RepairService>),
}

impl Provider {
    pub fn tire(service: impl TireService + 'static) -> Self {
        Provider::Tire(Arc::new(service))
    }

    pub fn transport(service: impl TransportService + 'static) -> Self {
        Provider::Transport(Arc::new(service))
    }

    pub fn repair(service: impl RepairService + 'static) -> Self {
        Provider::Repair(Arc::new(service))
    }

    pub fn kind(&self) -> CapabilityKind {
        match self {
            Provider::Tire(_) => CapabilityKind::Tire,
            Provider::Transport(_) => CapabilityKind::Transport,
            Provider::Repair(_) => CapabilityKind::Repair,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Provider::Tire(service) => service.id(),
            Provider::Transport(service) => service.id(),
            Provider::Repair(service) => service.id(),
        }
    }

    /// Run the no-argument form of the capability.
    pub fn perform(&self) -> String {
        match self {
            Provider::Tire(service) => service.replace_tires(),
            Provider::Transport(service) => service.transport(),
            Provider::Repair(service) => service.repair(),
        }
    }

    /// Run the entity-argument form; `None` when the provider does not
    /// implement it.
    pub fn perform_for(&self, vehicle: &Vehicle) -> Option<String> {
        match self {
            Provider::Tire(service) => service.replace_tires_for(vehicle),
            Provider::Transport(service) => service.transport_for(vehicle),
            Provider::Repair(service) => service.repair_for(vehicle),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind())
            .field("id", &self.id())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Replaces tires on one vehicle type.
pub struct TireShop {
    id: &'static str,
    vehicle: &'static str,
}

impl TireShop {
    pub const fn truck() -> Self {
        Self {
            id: "truck_tires",
            vehicle: "truck",
        }
    }

    pub const fn car() -> Self {
        Self {
            id: "car_tires",
            vehicle: "car",
        }
    }

    pub const fn bus() -> Self {
        Self {
            id: "bus_tires",
            vehicle: "bus",
        }
    }
}

impl Service for TireShop {
    fn id(&self) -> &str {
        self.id
    }
}

impl TireService for TireShop {
    fn replace_tires(&self) -> String {
        format!("Replace tires in the {}", self.vehicle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Moves a fixed kind of load with one vehicle type.
pub struct Carrier {
    id: &'static str,
    vehicle: &'static str,
    load: &'static str,
}

impl Carrier {
    pub const fn truck() -> Self {
        Self {
            id: "truck_transport",
            vehicle: "truck",
            load: "goods",
        }
    }

    pub const fn car() -> Self {
        Self {
            id: "car_transport",
            vehicle: "car",
            load: "people",
        }
    }

    pub const fn bus() -> Self {
        Self {
            id: "bus_transport",
            vehicle: "bus",
            load: "passengers",
        }
    }
}

impl Service for Carrier {
    fn id(&self) -> &str {
        self.id
    }
}

impl TransportService for Carrier {
    fn transport(&self) -> String {
        format!("Transport {} in the {}", self.load, self.vehicle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Repairs one vehicle type; the entity form names the vehicle being fixed.
pub struct Workshop {
    id: &'static str,
    vehicle: &'static str,
}

impl Workshop {
    pub const fn truck() -> Self {
        Self {
            id: "truck_repair",
            vehicle: "truck",
        }
    }

    pub const fn car() -> Self {
        Self {
            id: "car_repair",
            vehicle: "car",
        }
    }

    pub const fn bus() -> Self {
        Self {
            id: "bus_repair",
            vehicle: "bus",
        }
    }
}

impl Service for Workshop {
    fn id(&self) -> &str {
        self.id
    }
}

impl RepairService for Workshop {
    fn repair(&self) -> String {
        format!("Repair the {}", self.vehicle)
    }

    fn repair_for(&self, vehicle: &Vehicle) -> Option<String> {
        Some(format!("Repair the {} {}", self.vehicle, vehicle.name()))
    }
}

struct ProviderSpec {
    id: &'static str,
    build: fn() -> Provider,
}

const PROVIDER_SPECS: &[ProviderSpec] = &[
    ProviderSpec {
        id: "truck_tires",
        build: || Provider::tire(TireShop::truck()),
    },
    ProviderSpec {
        id: "car_tires",
        build: || Provider::tire(TireShop::car()),
    },
    ProviderSpec {
        id: "bus_tires",
        build: || Provider::tire(TireShop::bus()),
    },
    ProviderSpec {
        id: "truck_transport",
        build: || Provider::transport(Carrier::truck()),
    },
    ProviderSpec {
        id: "car_transport",
        build: || Provider::transport(Carrier::car()),
    },
    ProviderSpec {
        id: "bus_transport",
        build: || Provider::transport(Carrier::bus()),
    },
    ProviderSpec {
        id: "truck_repair",
        build: || Provider::repair(Workshop::truck()),
    },
    ProviderSpec {
        id: "car_repair",
        build: || Provider::repair(Workshop::car()),
    },
    ProviderSpec {
        id: "bus_repair",
        build: || Provider::repair(Workshop::bus()),
    },
];

/// Resolve a built-in provider by id.
pub fn builtin_provider(id: &ProviderId) -> Result<Provider, DispatchError> {
    PROVIDER_SPECS
        .iter()
        .find(|spec| spec.id == id.as_str())
        .map(|spec| (spec.build)())
        .ok_or_else(|| DispatchError::unknown(LookupDomain::Provider, id.as_str()))
}

/// Ids of every built-in provider, in catalogue order.
pub fn builtin_provider_ids() -> Vec<&'static str> {
    PROVIDER_SPECS.iter().map(|spec| spec.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_follows_variant() {
        assert_eq!(Provider::tire(TireShop::bus()).kind(), CapabilityKind::Tire);
        assert_eq!(
            Provider::transport(Carrier::car()).kind(),
            CapabilityKind::Transport
        );
        assert_eq!(
            Provider::repair(Workshop::truck()).kind(),
            CapabilityKind::Repair
        );
    }

    #[test]
    fn builtin_catalogue_ids_match_provider_ids() {
        for id in builtin_provider_ids() {
            let provider = builtin_provider(&ProviderId::from(id)).expect("builtin resolves");
            assert_eq!(provider.id(), id);
        }
    }

    #[test]
    fn unknown_provider_id_is_rejected() {
        let err = builtin_provider(&ProviderId::from("tractor_tires")).unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownDiscriminant {
                domain: LookupDomain::Provider,
                value: "tractor_tires".to_string(),
            }
        );
    }

    #[test]
    fn services_without_entity_form_fall_back_to_none() {
        let vehicle = Vehicle::builder("Rig", "truck").build();
        let tires = Provider::tire(TireShop::truck());
        assert_eq!(tires.perform(), "Replace tires in the truck");
        assert_eq!(tires.perform_for(&vehicle), None);

        let repair = Provider::repair(Workshop::truck());
        assert_eq!(repair.perform_for(&vehicle).as_deref(), Some("Repair the truck Rig"));
    }
}
