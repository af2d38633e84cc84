//! Typed capability dispatch and decoration chains.
//!
//! The crate exposes two independent components:
//!
//! - [`capability`]: vehicles that forward tire, transport and repair
//!   operations to providers chosen by vehicle type, with the type-to-provider
//!   mapping held in a [`ProviderTable`] (built in, or loaded from JSON).
//! - [`decoration`]: immutable wrap chains whose description is the base text
//!   followed by each contributed ingredient, innermost first.
//!
//! Failures that callers must tell apart are [`DispatchError`] variants;
//! configuration loading reports `anyhow::Error` with file context.

pub mod capability;
pub mod decoration;
pub mod error;

pub use capability::{
    CapabilityKind, Discriminant, PROVIDER_TABLE_ENV, Provider, ProviderAssignments, ProviderId,
    ProviderSet, ProviderTable, ProviderTableFile, Vehicle, VehicleBuilder, builtin_provider,
    builtin_provider_ids, load_table_file,
};
pub use decoration::{Decoration, DescriptionSummary, Ingredient, Layer, parse_ingredients};
pub use error::{DispatchError, LookupDomain};
