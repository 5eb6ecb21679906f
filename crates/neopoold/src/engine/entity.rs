//! Entity metadata shared between the engine and integrations.
//!
//! Integrations announce each entity once at discovery time; the engine keeps
//! the metadata alongside the live state so API consumers can render it.

use serde::Serialize;

/// Platform kind of an entity, named as exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlatformKind {
    Sensor,
    BinarySensor,
    Switch,
    Number,
    Select,
    Button,
}

/// Static metadata for one entity, reported with `EntityDiscovered`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    /// Human-readable name.
    pub name: String,

    /// Platform kind, fixed for the entity's lifetime.
    pub kind: PlatformKind,

    /// Device class hint (e.g. "temperature", "problem"), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,

    /// Native unit of measurement, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}
