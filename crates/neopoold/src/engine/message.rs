//! Type-safe message system between the engine and integrations.
//!
//! Messages are split by direction to enforce correct usage at compile time:
//! - `FromIntegrationMessage`: events from integrations to the engine
//! - `ToIntegrationMessage`: commands from the engine to integrations

use super::device::Device;
use super::entity::EntityInfo;
use super::state::SensorValue;

/// Messages FROM integrations TO the engine (events/state updates)
#[derive(Debug)]
pub enum FromIntegrationMessage {
    /// A device was registered by an integration
    DeviceRegistered { device: Device },

    /// An entity was created and bound to its integration
    EntityDiscovered {
        entity_id: String,
        info: EntityInfo,
        integration_name: String,
    },

    /// An entity was removed
    EntityRemoved { entity_id: String },

    /// An entity's availability changed (or was re-announced; deliveries are
    /// idempotent and not de-duplicated)
    AvailabilityChanged { entity_id: String, available: bool },

    /// A sensor resolved a new reading
    SensorValueChanged {
        entity_id: String,
        value: SensorValue,
    },

    /// A binary sensor resolved a new on/off state
    BinarySensorChanged { entity_id: String, on: bool },

    /// A switch's reported state changed
    SwitchChanged { entity_id: String, on: bool },

    /// A number's reported value changed
    NumberChanged { entity_id: String, value: f64 },

    /// A select's reported option changed
    SelectChanged { entity_id: String, option: String },
}

/// Messages FROM the engine TO integrations (commands)
#[derive(Debug, Clone)]
pub enum ToIntegrationMessage {
    /// Turn a switch on or off
    SwitchCommand { entity_id: String, on: bool },

    /// Set a number entity's value
    NumberCommand { entity_id: String, value: f64 },

    /// Select an option on a select entity
    SelectCommand { entity_id: String, option: String },

    /// Press a button entity
    ButtonPress { entity_id: String },
}

impl ToIntegrationMessage {
    /// Entity the command is addressed to, used for routing.
    pub fn entity_id(&self) -> &str {
        match self {
            Self::SwitchCommand { entity_id, .. }
            | Self::NumberCommand { entity_id, .. }
            | Self::SelectCommand { entity_id, .. }
            | Self::ButtonPress { entity_id } => entity_id,
        }
    }
}
