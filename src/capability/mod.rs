//! Capability dispatch: vehicles forward operations to per-type providers.
//!
//! `ProviderTable` maps a discriminant (vehicle type) to the providers that
//! type uses; `Vehicle` holds the providers it was assigned and forwards
//! `invoke` calls to them. Use `Vehicle::from_table` to resolve a vehicle's
//! providers once instead of branching on its type at each call site.

pub mod entity;
pub mod identity;
pub mod model;
pub mod provider;
pub mod table;

pub use entity::{Vehicle, VehicleBuilder};
pub use identity::{CapabilityKind, Discriminant, ProviderId};
pub use model::{ProviderAssignments, ProviderTableFile, load_table_file};
pub use provider::{
    Carrier, Provider, RepairService, Service, TireService, TireShop, TransportService, Workshop,
    builtin_provider, builtin_provider_ids,
};
pub use table::{PROVIDER_TABLE_ENV, ProviderSet, ProviderTable};
