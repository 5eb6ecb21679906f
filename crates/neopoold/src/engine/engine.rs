use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::entity::PlatformKind;
use super::integration::FromIntegrationReceiver;
use super::integration::FromIntegrationSender;
use super::integration::Integration;
use super::integration::IntegrationContext;
use super::integration::ToIntegrationSender;
use super::message::FromIntegrationMessage;
use super::message::ToIntegrationMessage;
use super::state::State;

/// neopoold engine
///
/// Owns the centralized view of the world. Integrations feed it entity,
/// availability, and state-change events; it routes user commands back to
/// the integration owning the addressed entity.
pub struct Engine {
    /// Centralized state snapshot (readers load the Arc, writer stores a new one)
    state: ArcSwap<State>,

    /// Map of entity_id -> integration name for routing commands
    entity_integration_map: std::sync::Mutex<HashMap<String, String>>,

    /// Communication channels to integrations (for commands)
    integration_channels: HashMap<String, ToIntegrationSender>,

    /// Receive messages from integrations (events)
    message_rx: Mutex<FromIntegrationReceiver>,

    /// Sender for integrations to report events back to the engine
    message_tx: FromIntegrationSender,

    /// Handles for integration tasks
    integration_handles: Vec<JoinHandle<()>>,
}

/// Capacity for the integration->engine message channel.
/// Provides backpressure when integrations send faster than the engine can
/// process.
const FROM_INTEGRATION_CHANNEL_SIZE: usize = 1024;

impl Engine {
    /// Create a new Engine instance
    pub fn new() -> Self {
        let (message_tx, message_rx) = mpsc::channel(FROM_INTEGRATION_CHANNEL_SIZE);
        Self {
            state: ArcSwap::new(Arc::default()),
            entity_integration_map: std::sync::Mutex::new(HashMap::new()),
            integration_channels: HashMap::new(),
            message_rx: Mutex::new(message_rx),
            message_tx,
            integration_handles: Vec::new(),
        }
    }

    /// Register integrations from configuration
    ///
    /// Walks the factory registry; factories return `None` when their config
    /// section is absent.
    pub fn register_integrations_from_config(
        &mut self,
        cfg: &crate::config::Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = IntegrationContext { config: cfg };
        for constr in super::integration::REGISTRY {
            let integration = match constr(&ctx) {
                Ok(Some(i)) => i,
                Err(e) => {
                    error!("failed to set up integration: {}", e);
                    continue;
                }
                Ok(None) => continue,
            };
            let name = integration.name().to_string();
            self.register_integration(name, integration);
        }

        Ok(())
    }

    /// Register an integration with the engine
    ///
    /// This spawns the integration in a background task, wires up channels,
    /// and starts its setup process.
    pub fn register_integration(&mut self, name: String, mut integration: Box<dyn Integration>) {
        let (to_integration_tx, mut to_integration_rx) = mpsc::unbounded_channel();
        let from_integration_tx = self.message_tx.clone();

        self.integration_channels
            .insert(name.clone(), to_integration_tx);

        // Spawn integration task
        let handle = tokio::spawn(async move {
            // Setup integration (gives it the sender for events)
            if let Err(e) = integration.setup(from_integration_tx).await {
                warn!("Integration '{}' setup failed: {}", name, e);
                return;
            }

            // Process commands from engine
            while let Some(msg) = to_integration_rx.recv().await {
                if let Err(e) = integration.handle_message(msg).await {
                    warn!("Integration '{}' failed to handle message: {}", name, e);
                }
            }

            if let Err(e) = integration.shutdown().await {
                warn!("Integration '{}' shutdown failed: {}", name, e);
            }
        });

        self.integration_handles.push(handle);
    }

    /// Send a command to the integration owning the addressed entity.
    pub fn send_command(&self, msg: ToIntegrationMessage) -> Result<(), Box<dyn Error + Send>> {
        let entity_id = msg.entity_id().to_string();

        let map = self
            .entity_integration_map
            .lock()
            .map_err(|e| -> Box<dyn Error + Send> {
                Box::new(std::io::Error::other(e.to_string()))
            })?;

        let integration_name = map
            .get(&entity_id)
            .ok_or_else(|| -> Box<dyn Error + Send> {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("No integration found for entity: {}", entity_id),
                ))
            })?;

        let tx = self.integration_channels.get(integration_name).ok_or_else(
            || -> Box<dyn Error + Send> {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Integration channel not found: {}", integration_name),
                ))
            },
        )?;

        tx.send(msg)
            .map_err(|e| -> Box<dyn Error + Send> { Box::new(e) })
    }

    /// Run the engine's main event loop
    ///
    /// Processes incoming events from integrations and updates state.
    pub async fn run(&self) -> Result<(), Box<dyn Error + Send>> {
        info!("Engine starting");

        let mut rx = self.message_rx.lock().await;
        while let Some(msg) = rx.recv().await {
            self.handle_event(msg);
        }

        info!("Engine shutting down");
        Ok(())
    }

    /// Get a snapshot of the current engine state.
    ///
    /// Clones the `Arc` (atomic refcount bump), essentially free.
    pub fn state_snapshot(&self) -> Arc<State> {
        self.state.load_full()
    }

    /// Handle an event from an integration
    fn handle_event(&self, msg: FromIntegrationMessage) {
        match msg {
            FromIntegrationMessage::DeviceRegistered { device } => {
                info!("Device registered: {} ({})", device.name, device.id);

                let mut state = State::clone(&self.state.load());
                state.devices.insert(device.id.clone(), device);
                self.state.store(Arc::new(state));
            }
            FromIntegrationMessage::EntityDiscovered {
                entity_id,
                info,
                integration_name,
            } => {
                info!(
                    "Entity discovered: {} [{}] (from {})",
                    entity_id, info.kind, integration_name
                );

                {
                    let mut state = State::clone(&self.state.load());
                    match info.kind {
                        PlatformKind::Sensor => {
                            state.sensors.entry(entity_id.clone()).or_default();
                        }
                        PlatformKind::BinarySensor => {
                            state.binary_sensors.entry(entity_id.clone()).or_default();
                        }
                        PlatformKind::Switch => {
                            state.switches.entry(entity_id.clone()).or_default();
                        }
                        PlatformKind::Number => {
                            state.numbers.entry(entity_id.clone()).or_default();
                        }
                        PlatformKind::Select => {
                            state.selects.entry(entity_id.clone()).or_default();
                        }
                        PlatformKind::Button => {
                            state.buttons.entry(entity_id.clone()).or_default();
                        }
                    }
                    state.entities.insert(entity_id.clone(), info);
                    self.state.store(Arc::new(state));
                }

                // Record which integration owns this entity for command routing.
                if let Ok(mut map) = self.entity_integration_map.lock() {
                    map.insert(entity_id, integration_name);
                }
            }
            FromIntegrationMessage::EntityRemoved { entity_id } => {
                info!("Entity removed: {}", entity_id);

                {
                    let mut state = State::clone(&self.state.load());
                    state.entities.remove(&entity_id);
                    state.sensors.remove(&entity_id);
                    state.binary_sensors.remove(&entity_id);
                    state.switches.remove(&entity_id);
                    state.numbers.remove(&entity_id);
                    state.selects.remove(&entity_id);
                    state.buttons.remove(&entity_id);
                    self.state.store(Arc::new(state));
                }

                if let Ok(mut map) = self.entity_integration_map.lock() {
                    map.remove(&entity_id);
                }
            }
            FromIntegrationMessage::AvailabilityChanged {
                entity_id,
                available,
            } => {
                let mut state = State::clone(&self.state.load());
                let kind = state.entities.get(&entity_id).map(|i| i.kind);
                match kind {
                    Some(PlatformKind::Sensor) => {
                        state.sensors.entry(entity_id).or_default().available = available;
                    }
                    Some(PlatformKind::BinarySensor) => {
                        state.binary_sensors.entry(entity_id).or_default().available = available;
                    }
                    Some(PlatformKind::Switch) => {
                        state.switches.entry(entity_id).or_default().available = available;
                    }
                    Some(PlatformKind::Number) => {
                        state.numbers.entry(entity_id).or_default().available = available;
                    }
                    Some(PlatformKind::Select) => {
                        state.selects.entry(entity_id).or_default().available = available;
                    }
                    Some(PlatformKind::Button) => {
                        state.buttons.entry(entity_id).or_default().available = available;
                    }
                    None => {
                        warn!("Availability for unknown entity: {}", entity_id);
                        return;
                    }
                }
                self.state.store(Arc::new(state));
            }
            FromIntegrationMessage::SensorValueChanged { entity_id, value } => {
                let mut state = State::clone(&self.state.load());
                state.sensors.entry(entity_id).or_default().value = Some(value);
                self.state.store(Arc::new(state));
            }
            FromIntegrationMessage::BinarySensorChanged { entity_id, on } => {
                let mut state = State::clone(&self.state.load());
                state.binary_sensors.entry(entity_id).or_default().on = Some(on);
                self.state.store(Arc::new(state));
            }
            FromIntegrationMessage::SwitchChanged { entity_id, on } => {
                let mut state = State::clone(&self.state.load());
                state.switches.entry(entity_id).or_default().on = Some(on);
                self.state.store(Arc::new(state));
            }
            FromIntegrationMessage::NumberChanged { entity_id, value } => {
                let mut state = State::clone(&self.state.load());
                state.numbers.entry(entity_id).or_default().value = Some(value);
                self.state.store(Arc::new(state));
            }
            FromIntegrationMessage::SelectChanged { entity_id, option } => {
                let mut state = State::clone(&self.state.load());
                state.selects.entry(entity_id).or_default().option = Some(option);
                self.state.store(Arc::new(state));
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entity::EntityInfo;
    use crate::engine::state::SensorValue;

    fn discovered(entity_id: &str, kind: PlatformKind) -> FromIntegrationMessage {
        FromIntegrationMessage::EntityDiscovered {
            entity_id: entity_id.to_string(),
            info: EntityInfo {
                name: "Test".to_string(),
                kind,
                device_class: None,
                unit: None,
            },
            integration_name: "neopool".to_string(),
        }
    }

    #[test]
    fn test_discovery_initializes_state() {
        let engine = Engine::new();
        engine.handle_event(discovered("sensor_1", PlatformKind::Sensor));
        engine.handle_event(discovered("button_1", PlatformKind::Button));

        let state = engine.state_snapshot();
        assert!(!state.sensors["sensor_1"].available);
        // Buttons are stateless actuators and start available.
        assert!(state.buttons["button_1"].available);
    }

    #[test]
    fn test_sensor_value_update() {
        let engine = Engine::new();
        engine.handle_event(discovered("sensor_1", PlatformKind::Sensor));
        engine.handle_event(FromIntegrationMessage::SensorValueChanged {
            entity_id: "sensor_1".to_string(),
            value: SensorValue::Number(28.5),
        });

        let state = engine.state_snapshot();
        assert_eq!(state.sensors["sensor_1"].value, Some(SensorValue::Number(28.5)));
    }

    #[test]
    fn test_availability_routed_by_kind() {
        let engine = Engine::new();
        engine.handle_event(discovered("switch_1", PlatformKind::Switch));
        engine.handle_event(FromIntegrationMessage::AvailabilityChanged {
            entity_id: "switch_1".to_string(),
            available: true,
        });

        let state = engine.state_snapshot();
        assert!(state.switches["switch_1"].available);
        assert_eq!(state.switches["switch_1"].on, None);
    }

    #[test]
    fn test_entity_removed_clears_state() {
        let engine = Engine::new();
        engine.handle_event(discovered("number_1", PlatformKind::Number));
        engine.handle_event(FromIntegrationMessage::EntityRemoved {
            entity_id: "number_1".to_string(),
        });

        let state = engine.state_snapshot();
        assert!(state.numbers.is_empty());
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_command_for_unknown_entity_fails() {
        let engine = Engine::new();
        let result = engine.send_command(ToIntegrationMessage::ButtonPress {
            entity_id: "nope".to_string(),
        });
        assert!(result.is_err());
    }
}
