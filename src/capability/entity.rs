//! The typed entity that forwards capability calls to its providers.
//!
//! A `Vehicle` keeps at most one provider per capability kind. Dispatch is a
//! single map lookup followed by the provider call; nothing is logged or
//! cached on that path. Construction from a discriminant goes through
//! [`Vehicle::from_table`], which resolves every provider up front so call
//! sites never branch on vehicle type.

use crate::capability::identity::{CapabilityKind, Discriminant};
use crate::capability::provider::Provider;
use crate::capability::table::ProviderTable;
use crate::error::DispatchError;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
/// Named entity of one discriminant with its assigned providers.
pub struct Vehicle {
    name: String,
    discriminant: Discriminant,
    providers: BTreeMap<CapabilityKind, Provider>,
}

impl Vehicle {
    /// Vehicle with no providers assigned.
    pub fn new(name: impl Into<String>, discriminant: impl Into<Discriminant>) -> Self {
        Self {
            name: name.into(),
            discriminant: discriminant.into(),
            providers: BTreeMap::new(),
        }
    }

    pub fn builder(
        name: impl Into<String>,
        discriminant: impl Into<Discriminant>,
    ) -> VehicleBuilder {
        VehicleBuilder {
            vehicle: Vehicle::new(name, discriminant),
        }
    }

    /// Build a vehicle whose providers come from the table entry for
    /// `discriminant`.
    ///
    /// Fails with `UnknownDiscriminant` when the table has no such entry;
    /// kinds the entry leaves empty stay unassigned.
    pub fn from_table(
        name: impl Into<String>,
        discriminant: impl Into<Discriminant>,
        table: &ProviderTable,
    ) -> Result<Self, DispatchError> {
        let discriminant = discriminant.into();
        let set = table.lookup(&discriminant)?;
        let mut vehicle = Vehicle::new(name, discriminant);
        for provider in set.providers() {
            vehicle.assign(provider.clone());
        }
        tracing::debug!(
            vehicle = %vehicle.name,
            discriminant = %vehicle.discriminant,
            assigned = vehicle.providers.len(),
            "resolved vehicle providers"
        );
        Ok(vehicle)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminant(&self) -> &Discriminant {
        &self.discriminant
    }

    /// Assign `provider` for the kind it serves, returning whatever was
    /// assigned for that kind before.
    pub fn assign(&mut self, provider: Provider) -> Option<Provider> {
        self.providers.insert(provider.kind(), provider)
    }

    /// Drop the provider for `kind`, if any.
    pub fn unassign(&mut self, kind: CapabilityKind) -> Option<Provider> {
        self.providers.remove(&kind)
    }

    pub fn provider(&self, kind: CapabilityKind) -> Option<&Provider> {
        self.providers.get(&kind)
    }

    pub fn has_capability(&self, kind: CapabilityKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Kinds with a provider assigned, in stable order.
    pub fn capabilities(&self) -> impl Iterator<Item = CapabilityKind> + '_ {
        self.providers.keys().copied()
    }

    /// Forward to the assigned provider's no-argument operation.
    pub fn invoke(&self, kind: CapabilityKind) -> Result<String, DispatchError> {
        Ok(self.assigned(kind)?.perform())
    }

    /// Forward to the assigned provider's entity-argument operation, passing
    /// this vehicle. `Ok(None)` means the provider leaves that form as a no-op.
    pub fn invoke_with(&self, kind: CapabilityKind) -> Result<Option<String>, DispatchError> {
        Ok(self.assigned(kind)?.perform_for(self))
    }

    fn assigned(&self, kind: CapabilityKind) -> Result<&Provider, DispatchError> {
        self.providers
            .get(&kind)
            .ok_or_else(|| DispatchError::CapabilityNotAssigned {
                entity: self.name.clone(),
                capability: kind,
            })
    }
}

/// Incremental construction of a [`Vehicle`]; the last provider given for a
/// kind wins.
#[derive(Debug)]
pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl VehicleBuilder {
    pub fn provider(mut self, provider: Provider) -> Self {
        self.vehicle.assign(provider);
        self
    }

    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}
