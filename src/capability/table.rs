//! Discriminant to provider-set mapping.
//!
//! The table is the one place that knows which providers a vehicle type gets.
//! A built-in table covers `truck`, `car` and `bus`; a JSON file can replace
//! it. Loading is strict: the file must satisfy the embedded schema, declare
//! the expected schema version, and reference only built-in provider ids filed
//! under the capability they actually serve.

use crate::capability::identity::{CapabilityKind, Discriminant};
use crate::capability::model::{ProviderTableFile, load_table_file};
use crate::capability::provider::{Carrier, Provider, TireShop, Workshop, builtin_provider};
use crate::error::{DispatchError, LookupDomain};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable naming a provider table file to load instead of the
/// built-in table.
pub const PROVIDER_TABLE_ENV: &str = "PATTERNKIT_PROVIDER_TABLE";

// Only one table layout exists; anything else is rejected rather than guessed at.
const SCHEMA_VERSION: &str = "provider_table_v1";

const TABLE_SCHEMA: &str = include_str!("../../schema/provider_table.schema.json");

#[derive(Clone, Debug, Default)]
/// Providers for one discriminant, at most one per capability kind.
pub struct ProviderSet {
    providers: BTreeMap<CapabilityKind, Provider>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider under the kind it serves; replaces any earlier one.
    pub fn with(mut self, provider: Provider) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    pub fn get(&self, kind: CapabilityKind) -> Option<&Provider> {
        self.providers.get(&kind)
    }

    pub fn providers(&self) -> impl Iterator<Item = &Provider> {
        self.providers.values()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
/// Immutable lookup from discriminant to its provider set.
pub struct ProviderTable {
    entries: BTreeMap<Discriminant, ProviderSet>,
}

impl ProviderTable {
    /// Process-wide default table, built on first use.
    pub fn builtin() -> &'static ProviderTable {
        static BUILTIN: OnceLock<ProviderTable> = OnceLock::new();
        BUILTIN.get_or_init(builtin_table)
    }

    /// Load and validate a table file.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;
        let file = load_table_file(path).with_context(|| format!("loading {}", path.display()))?;
        let table = Self::from_file(&file)
            .with_context(|| format!("resolving provider table {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            discriminants = table.entries.len(),
            "loaded provider table"
        );
        Ok(table)
    }

    /// Use the file named by `PATTERNKIT_PROVIDER_TABLE` when set, otherwise a
    /// copy of the built-in table.
    pub fn from_env() -> Result<Self> {
        match env::var_os(PROVIDER_TABLE_ENV).filter(|value| !value.is_empty()) {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::load(&path).inspect_err(|err| {
                    tracing::warn!(path = %path.display(), error = %err, "rejected provider table");
                })
            }
            None => {
                tracing::debug!("{PROVIDER_TABLE_ENV} not set; using built-in provider table");
                Ok(Self::builtin().clone())
            }
        }
    }

    /// Resolve a parsed table file against the built-in provider catalogue.
    pub fn from_file(file: &ProviderTableFile) -> Result<Self> {
        validate_schema_version(&file.schema_version)?;
        if file.discriminants.is_empty() {
            bail!("provider table defines no discriminants");
        }

        let mut entries = BTreeMap::new();
        for (discriminant, assignments) in &file.discriminants {
            let mut set = ProviderSet::new();
            for (kind, id) in assignments.entries() {
                let provider = builtin_provider(id)
                    .with_context(|| format!("discriminant '{discriminant}' {kind} provider"))?;
                if provider.kind() != kind {
                    bail!(
                        "discriminant '{}' files provider '{}' under {}, but it serves {}",
                        discriminant,
                        id,
                        kind,
                        provider.kind()
                    );
                }
                set = set.with(provider);
            }
            entries.insert(discriminant.clone(), set);
        }
        Ok(Self { entries })
    }

    /// Add or replace the set for `discriminant` while building a table.
    pub fn insert(
        &mut self,
        discriminant: impl Into<Discriminant>,
        set: ProviderSet,
    ) -> Option<ProviderSet> {
        self.entries.insert(discriminant.into(), set)
    }

    pub fn lookup(&self, discriminant: &Discriminant) -> Result<&ProviderSet, DispatchError> {
        self.entries
            .get(discriminant)
            .ok_or_else(|| DispatchError::unknown(LookupDomain::VehicleType, discriminant.as_str()))
    }

    /// Discriminants in stable order.
    pub fn discriminants(&self) -> impl Iterator<Item = &Discriminant> {
        self.entries.keys()
    }
}

fn builtin_table() -> ProviderTable {
    let mut table = ProviderTable::default();
    table.insert(
        "truck",
        ProviderSet::new()
            .with(Provider::tire(TireShop::truck()))
            .with(Provider::transport(Carrier::truck()))
            .with(Provider::repair(Workshop::truck())),
    );
    table.insert(
        "car",
        ProviderSet::new()
            .with(Provider::tire(TireShop::car()))
            .with(Provider::transport(Carrier::car()))
            .with(Provider::repair(Workshop::car())),
    );
    table.insert(
        "bus",
        ProviderSet::new()
            .with(Provider::tire(TireShop::bus()))
            .with(Provider::transport(Carrier::bus()))
            .with(Provider::repair(Workshop::bus())),
    );
    table
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version != SCHEMA_VERSION {
        bail!(
            "schema_version '{}' not supported (expected {})",
            schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(())
}

fn validate_against_schema(table_path: &Path) -> Result<()> {
    let table_file = File::open(table_path)
        .with_context(|| format!("opening provider table {}", table_path.display()))?;
    let table_value: Value = serde_json::from_reader(BufReader::new(table_file))
        .with_context(|| format!("parsing provider table {}", table_path.display()))?;

    let schema: Value =
        serde_json::from_str(TABLE_SCHEMA).context("parsing embedded provider table schema")?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling provider table schema: {err}"))?;

    if let Err(errors) = compiled.validate(&table_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "provider table {} failed schema validation:\n{}",
            table_path.display(),
            details
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::identity::ProviderId;
    use crate::capability::model::ProviderAssignments;

    fn file_with(discriminant: &str, assignments: ProviderAssignments) -> ProviderTableFile {
        let mut discriminants = BTreeMap::new();
        discriminants.insert(Discriminant::from(discriminant), assignments);
        ProviderTableFile {
            schema_version: SCHEMA_VERSION.to_string(),
            discriminants,
        }
    }

    #[test]
    fn builtin_table_covers_every_kind_for_each_vehicle() {
        let table = ProviderTable::builtin();
        let names: Vec<_> = table.discriminants().map(|d| d.as_str()).collect();
        assert_eq!(names, vec!["bus", "car", "truck"]);
        for discriminant in table.discriminants() {
            let set = table.lookup(discriminant).unwrap();
            for kind in CapabilityKind::ALL {
                assert!(set.get(kind).is_some(), "{discriminant} lacks {kind}");
            }
        }
    }

    #[test]
    fn builtin_is_initialised_once() {
        assert!(std::ptr::eq(ProviderTable::builtin(), ProviderTable::builtin()));
    }

    #[test]
    fn lookup_rejects_unknown_discriminant() {
        let err = ProviderTable::builtin()
            .lookup(&Discriminant::from("tractor"))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownDiscriminant {
                domain: LookupDomain::VehicleType,
                value: "tractor".to_string(),
            }
        );
    }

    #[test]
    fn from_file_resolves_partial_sets() {
        let file = file_with(
            "van",
            ProviderAssignments {
                transport: Some(ProviderId::from("truck_transport")),
                ..Default::default()
            },
        );
        let table = ProviderTable::from_file(&file).expect("table resolves");
        let set = table.lookup(&Discriminant::from("van")).unwrap();
        assert_eq!(
            set.get(CapabilityKind::Transport).map(|p| p.id()),
            Some("truck_transport")
        );
        assert!(set.get(CapabilityKind::Tire).is_none());
    }

    #[test]
    fn from_file_rejects_misfiled_provider() {
        let file = file_with(
            "truck",
            ProviderAssignments {
                tire: Some(ProviderId::from("truck_repair")),
                ..Default::default()
            },
        );
        let err = ProviderTable::from_file(&file).unwrap_err();
        assert!(err.to_string().contains("serves repair"), "{err:#}");
    }

    #[test]
    fn from_file_rejects_unknown_provider_id() {
        let file = file_with(
            "truck",
            ProviderAssignments {
                repair: Some(ProviderId::from("moon_repair")),
                ..Default::default()
            },
        );
        let err = ProviderTable::from_file(&file).unwrap_err();
        let cause = err
            .downcast_ref::<DispatchError>()
            .expect("dispatch error preserved");
        assert!(matches!(
            cause,
            DispatchError::UnknownDiscriminant {
                domain: LookupDomain::Provider,
                ..
            }
        ));
    }

    #[test]
    fn from_file_rejects_unexpected_version_and_empty_tables() {
        let mut file = file_with("truck", ProviderAssignments::default());
        file.schema_version = "provider_table_v0".to_string();
        assert!(ProviderTable::from_file(&file).is_err());

        let empty = ProviderTableFile {
            schema_version: SCHEMA_VERSION.to_string(),
            discriminants: BTreeMap::new(),
        };
        assert!(ProviderTable::from_file(&empty).is_err());
    }
}
