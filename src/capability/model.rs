//! Deserializable representation of a provider table file.
//!
//! The types mirror `schema/provider_table.schema.json`. They carry provider
//! ids only; [`crate::ProviderTable`] resolves those ids and enforces the
//! remaining invariants.

use crate::capability::identity::{CapabilityKind, Discriminant, ProviderId};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full provider table as stored on disk.
pub struct ProviderTableFile {
    pub schema_version: String,
    pub discriminants: BTreeMap<Discriminant, ProviderAssignments>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
/// Provider ids for one discriminant; absent kinds stay unassigned.
pub struct ProviderAssignments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tire: Option<ProviderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<ProviderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair: Option<ProviderId>,
}

impl ProviderAssignments {
    /// Assigned ids paired with the kind they were filed under.
    pub fn entries(&self) -> impl Iterator<Item = (CapabilityKind, &ProviderId)> {
        [
            (CapabilityKind::Tire, self.tire.as_ref()),
            (CapabilityKind::Transport, self.transport.as_ref()),
            (CapabilityKind::Repair, self.repair.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, id)| id.map(|id| (kind, id)))
    }
}

/// Read and parse a provider table from disk without additional validation.
pub fn load_table_file(path: &Path) -> Result<ProviderTableFile> {
    let data = fs::read_to_string(path)?;
    let table: ProviderTableFile = serde_json::from_str(&data)?;
    Ok(table)
}
