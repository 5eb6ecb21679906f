//! Entity descriptors and the per-entity runtime state machine.
//!
//! Each exposed controller field is described by one static [`EntityDescriptor`]
//! row in a platform catalog. At setup the integration creates one
//! [`EntityRuntime`] per descriptor; the runtime owns the entity's cached
//! value, its availability flag, and the subscription handles it holds while
//! attached.
//!
//! Lifecycle: detached -> attached(unavailable) -> attached(available), with
//! availability following the device's last-will signal. Telemetry that does
//! not resolve for an entity leaves its state untouched; a resolved value —
//! including zero — updates the cache and produces a notification.

use serde_json::Value;

use super::convert;
use super::document;
use super::subscription::SubscriptionHandle;
use super::topics;
use super::values;
use crate::engine::state::SensorValue;
use crate::engine::PlatformKind;

/// Device class hints forwarded to the host platform, named as exposed on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    Temperature,
    Ph,
    Voltage,
    Duration,
    Problem,
    Running,
    Connectivity,
}

/// Named pure transform applied to a resolved telemetry value.
///
/// Transforms are data, not closures, so the catalog stays declarative and
/// each transform can be tested in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTransform {
    /// Coerce to float.
    Float,
    /// Coerce to integer (rendered as a numeric value).
    Int,
    /// Strict 0/1 decode; anything else is no update.
    BitBool,
    /// Lenient integer-to-bool decode, always decided.
    IntBool,
    /// Parse the controller's runtime format into fractional hours.
    RuntimeHours,
    /// Map a pH alarm code to its label.
    PhAlarm,
    /// Map a pH pump code to its label.
    PhPump,
    /// Map a hydrolysis cell state string to its label.
    HydrolysisState,
}

/// A typed value produced by resolving and transforming telemetry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl EntityValue {
    /// Project into the shape a plain sensor reports.
    pub fn to_sensor_value(&self) -> SensorValue {
        match self {
            Self::Number(n) => SensorValue::Number(*n),
            Self::Text(s) => SensorValue::Text(s.clone()),
            Self::Bool(b) => SensorValue::Number(f64::from(u8::from(*b))),
        }
    }
}

/// Platform-specific configuration of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Platform {
    Sensor {
        path: &'static str,
        transform: Option<ValueTransform>,
    },
    BinarySensor {
        path: &'static str,
        transform: Option<ValueTransform>,
        /// Fields where the raw bit means the opposite of the entity's
        /// meaning (e.g. flow alarm bit vs. "water flowing").
        invert: bool,
    },
    Switch {
        path: &'static str,
        command: &'static str,
        payload_on: &'static str,
        payload_off: &'static str,
    },
    Number {
        path: &'static str,
        command: &'static str,
        min: f64,
        max: f64,
        step: f64,
        template: Option<&'static str>,
    },
    Select {
        path: &'static str,
        command: &'static str,
        options: &'static [(i64, &'static str)],
    },
    Button {
        command: &'static str,
        payload: &'static str,
    },
}

impl Platform {
    pub fn kind(&self) -> PlatformKind {
        match self {
            Self::Sensor { .. } => PlatformKind::Sensor,
            Self::BinarySensor { .. } => PlatformKind::BinarySensor,
            Self::Switch { .. } => PlatformKind::Switch,
            Self::Number { .. } => PlatformKind::Number,
            Self::Select { .. } => PlatformKind::Select,
            Self::Button { .. } => PlatformKind::Button,
        }
    }

    /// Telemetry path for inbound-state entities; buttons are write-only.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Self::Sensor { path, .. }
            | Self::BinarySensor { path, .. }
            | Self::Switch { path, .. }
            | Self::Number { path, .. }
            | Self::Select { path, .. } => Some(path),
            Self::Button { .. } => None,
        }
    }
}

/// Static configuration for one exposed field. Defined once per process in
/// the platform catalogs and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDescriptor {
    /// Stable key, used to build the persistent identifier.
    pub key: &'static str,

    /// Human-readable name.
    pub name: &'static str,

    pub platform: Platform,
    pub device_class: Option<DeviceClass>,
    pub unit: Option<&'static str>,
}

impl EntityDescriptor {
    pub fn info(&self) -> crate::engine::EntityInfo {
        crate::engine::EntityInfo {
            name: self.name.to_string(),
            kind: self.platform.kind(),
            device_class: self.device_class.map(|c| c.to_string()),
            unit: self.unit.map(str::to_string),
        }
    }
}

/// Live state for one attached entity.
pub struct EntityRuntime {
    pub descriptor: &'static EntityDescriptor,

    /// Persistent identifier, `neopool_mqtt_{nodeid}_{key}`.
    pub entity_id: String,

    /// Availability per the device's liveness signal. Buttons are stateless
    /// actuators and stay available regardless of the signal.
    pub available: bool,

    /// Last resolved value; `None` until the first successful resolution.
    pub value: Option<EntityValue>,

    /// Handles for every active topic subscription, released on detach.
    pub subscriptions: Vec<SubscriptionHandle>,
}

impl EntityRuntime {
    pub fn new(descriptor: &'static EntityDescriptor, nodeid: &str) -> Self {
        Self {
            descriptor,
            entity_id: topics::unique_id(nodeid, descriptor.key),
            available: matches!(descriptor.platform, Platform::Button { .. }),
            value: None,
            subscriptions: Vec::new(),
        }
    }

    /// Apply a liveness payload and return the availability to report.
    ///
    /// The payload may arrive as text or raw bytes; it is normalized before
    /// comparison. Exactly `"Online"` means available; anything else —
    /// `"Offline"` or an unrecognized payload — means unavailable. Every
    /// message produces a report, even when nothing changed.
    pub fn apply_liveness(&mut self, payload: &[u8]) -> bool {
        if matches!(self.descriptor.platform, Platform::Button { .. }) {
            return self.available;
        }

        let text = String::from_utf8_lossy(payload);
        self.available = text.trim() == topics::PAYLOAD_ONLINE;
        self.available
    }

    /// Apply a telemetry payload.
    ///
    /// Returns the new value when the entity's path resolved and transformed
    /// successfully; `None` means no update (malformed document, absent
    /// field, or a transform that declined the raw value) and leaves any
    /// previously cached value intact.
    pub fn apply_telemetry(&mut self, payload: &[u8]) -> Option<EntityValue> {
        let path = self.descriptor.platform.path()?;
        let document = document::parse_payload(payload)?;
        let raw = document::resolve_path(&document, path)?;

        let value = self.decode(raw)?;
        self.value = Some(value.clone());
        Some(value)
    }

    /// Decode a resolved raw value into this entity's typed value.
    fn decode(&self, raw: &Value) -> Option<EntityValue> {
        match self.descriptor.platform {
            Platform::Sensor { transform, .. } => apply_transform(transform, raw),
            Platform::BinarySensor {
                transform, invert, ..
            } => {
                let decoded = apply_transform(transform.or(Some(ValueTransform::BitBool)), raw)?;
                match decoded {
                    EntityValue::Bool(b) => Some(EntityValue::Bool(b != invert)),
                    other => Some(other),
                }
            }
            Platform::Switch { .. } => convert::bit_to_bool(raw).map(EntityValue::Bool),
            Platform::Number { .. } => convert::safe_float(raw).map(EntityValue::Number),
            Platform::Select { options, .. } => {
                let code = convert::safe_int(raw)?;
                convert::label_for(options, &code).map(|label| EntityValue::Text(label.to_string()))
            }
            Platform::Button { .. } => None,
        }
    }

    /// Payload for a switch turn-on/turn-off action.
    pub fn switch_payload(&self, on: bool) -> Option<(&'static str, String)> {
        match self.descriptor.platform {
            Platform::Switch {
                command,
                payload_on,
                payload_off,
                ..
            } => Some((command, if on { payload_on } else { payload_off }.to_string())),
            _ => None,
        }
    }

    /// Payload for a number set-value action. The value is clamped to the
    /// descriptor's bounds and rendered per its step policy.
    pub fn number_payload(&self, value: f64) -> Option<(&'static str, String)> {
        match self.descriptor.platform {
            Platform::Number {
                command,
                min,
                max,
                step,
                template,
                ..
            } => {
                let value = convert::clamp(value, min, max);
                Some((command, super::command::format_command_value(value, step, template)))
            }
            _ => None,
        }
    }

    /// Payload for a select option action; `None` for an unknown option.
    pub fn select_payload(&self, option: &str) -> Option<(&'static str, String)> {
        match self.descriptor.platform {
            Platform::Select {
                command, options, ..
            } => {
                let code = convert::lookup_by_value(options, option)?;
                Some((command, code.to_string()))
            }
            _ => None,
        }
    }

    /// Payload for a button press action.
    pub fn press_payload(&self) -> Option<(&'static str, String)> {
        match self.descriptor.platform {
            Platform::Button { command, payload } => Some((command, payload.to_string())),
            _ => None,
        }
    }
}

/// Apply a named transform, or the identity scalar mapping when none is
/// configured. Identity maps JSON scalars to their natural typed value and
/// declines structured nodes.
fn apply_transform(transform: Option<ValueTransform>, raw: &Value) -> Option<EntityValue> {
    let Some(transform) = transform else {
        return match raw {
            Value::Number(_) => convert::safe_float(raw).map(EntityValue::Number),
            Value::String(s) => Some(EntityValue::Text(s.clone())),
            Value::Bool(b) => Some(EntityValue::Bool(*b)),
            _ => None,
        };
    };

    match transform {
        ValueTransform::Float => convert::safe_float(raw).map(EntityValue::Number),
        ValueTransform::Int => convert::safe_int(raw).map(|i| EntityValue::Number(i as f64)),
        ValueTransform::BitBool => convert::bit_to_bool(raw).map(EntityValue::Bool),
        ValueTransform::IntBool => Some(EntityValue::Bool(convert::int_to_bool(raw))),
        ValueTransform::RuntimeHours => raw
            .as_str()
            .and_then(convert::parse_runtime_duration)
            .map(EntityValue::Number),
        ValueTransform::PhAlarm => {
            let code = convert::safe_int(raw)?;
            convert::label_for(values::PH_STATE, &code)
                .map(|label| EntityValue::Text(label.to_string()))
        }
        ValueTransform::PhPump => {
            let code = convert::safe_int(raw)?;
            convert::label_for(values::PH_PUMP, &code)
                .map(|label| EntityValue::Text(label.to_string()))
        }
        ValueTransform::HydrolysisState => {
            let state = raw.as_str()?;
            convert::label_for(values::HYDROLYSIS_STATE, &state)
                .map(|label| EntityValue::Text(label.to_string()))
        }
    }
}
