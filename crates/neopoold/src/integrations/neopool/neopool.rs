use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::binary_sensor::BINARY_SENSOR_DESCRIPTIONS;
use super::button::BUTTON_DESCRIPTIONS;
use super::client::MqttClient;
use super::client::MqttMessage;
use super::client::QosLevel;
use super::config::Config;
use super::entity::EntityDescriptor;
use super::entity::EntityRuntime;
use super::entity::EntityValue;
use super::number::NUMBER_DESCRIPTIONS;
use super::select::SELECT_DESCRIPTIONS;
use super::sensor::SENSOR_DESCRIPTIONS;
use super::subscription::Delivery;
use super::subscription::TopicRouter;
use super::switch::SWITCH_DESCRIPTIONS;
use super::topics;
use crate::engine::Device;
use crate::engine::FromIntegrationMessage;
use crate::engine::FromIntegrationSender;
use crate::engine::Integration;
use crate::engine::PlatformKind;
use crate::engine::ToIntegrationMessage;

/// Type alias for the shared entity map, keyed by entity id
type EntitiesMap = Arc<Mutex<HashMap<String, Arc<Mutex<EntityRuntime>>>>>;

/// Every catalog row, in platform order.
fn catalog() -> impl Iterator<Item = &'static EntityDescriptor> {
    SENSOR_DESCRIPTIONS
        .iter()
        .chain(BINARY_SENSOR_DESCRIPTIONS)
        .chain(SWITCH_DESCRIPTIONS)
        .chain(NUMBER_DESCRIPTIONS)
        .chain(SELECT_DESCRIPTIONS)
        .chain(BUTTON_DESCRIPTIONS)
}

/// NeoPool bridge integration
///
/// Binds one Tasmota-bridged Sugar Valley controller into the engine's
/// entity model: telemetry and liveness flow in over the shared device
/// topics, entity commands flow out as Tasmota `NP*` commands.
pub struct NeoPoolIntegration<C: MqttClient> {
    client: Arc<Mutex<C>>,
    config: Config,
    router: Arc<TopicRouter>,
    entities: EntitiesMap,
    to_engine: Option<FromIntegrationSender>,
    /// Handle to the background message processing task
    _message_task: Option<JoinHandle<()>>,
}

impl<C: MqttClient> NeoPoolIntegration<C> {
    /// Create a new NeoPool integration
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client: Arc::new(Mutex::new(client)),
            config: config.clone(),
            router: Arc::new(TopicRouter::new()),
            entities: Arc::new(Mutex::new(HashMap::new())),
            to_engine: None,
            _message_task: None,
        }
    }

    /// Create every catalog entity, wire up its subscriptions, and announce
    /// it to the engine. Each entity holds its own subscription handles; the
    /// transport-level subscribe happens once per topic.
    async fn attach_entities_static(
        client: &Arc<Mutex<C>>,
        config: &Config,
        router: &TopicRouter,
        entities: &EntitiesMap,
        to_engine: &FromIntegrationSender,
    ) -> Result<(), Box<dyn Error + Send>> {
        let liveness_topic = topics::liveness(&config.device_topic);
        let telemetry_topic = topics::telemetry(&config.device_topic);

        let mut device = Device::new(config.node_id.clone(), config.device_name.clone());
        device.manufacturer = Some("Sugar Valley".to_string());
        device.model = Some("NeoPool Controller".to_string());
        device.sw_version = Some(env!("CARGO_PKG_VERSION").to_string());

        for descriptor in catalog() {
            let mut entity = EntityRuntime::new(descriptor, &config.node_id);
            let entity_id = entity.entity_id.clone();

            let (handle, first) = router.subscribe(&liveness_topic, &entity_id, Delivery::Liveness);
            if first {
                let mut client_guard = client.lock().await;
                client_guard
                    .subscribe(&liveness_topic, QosLevel::AtLeastOnce)
                    .await?;
            }
            entity.subscriptions.push(handle);

            if descriptor.platform.path().is_some() {
                let (handle, first) =
                    router.subscribe(&telemetry_topic, &entity_id, Delivery::Telemetry);
                if first {
                    let mut client_guard = client.lock().await;
                    client_guard
                        .subscribe(&telemetry_topic, QosLevel::AtMostOnce)
                        .await?;
                }
                entity.subscriptions.push(handle);
            }

            device.add_entity(entity_id.clone());

            let info = descriptor.info();
            {
                let mut entities_guard = entities.lock().await;
                entities_guard.insert(entity_id.clone(), Arc::new(Mutex::new(entity)));
            }

            let msg = FromIntegrationMessage::EntityDiscovered {
                entity_id,
                info,
                integration_name: "neopool".to_string(),
            };
            if let Err(e) = to_engine.send(msg).await {
                warn!("Failed to send EntityDiscovered message: {}", e);
            }
        }

        let msg = FromIntegrationMessage::DeviceRegistered { device };
        if let Err(e) = to_engine.send(msg).await {
            warn!("Failed to send DeviceRegistered message: {}", e);
        }

        Ok(())
    }

    /// Process incoming MQTT messages in a background task
    ///
    /// This is spawned as a separate tokio task in setup() so that
    /// handle_message() can process commands concurrently.
    async fn process_messages_task(
        client: Arc<Mutex<C>>,
        router: Arc<TopicRouter>,
        entities: EntitiesMap,
        to_engine: FromIntegrationSender,
    ) {
        loop {
            // Poll for a message with a short lock hold time so command
            // publishes are not starved.
            let msg = {
                let mut client_guard = client.lock().await;
                tokio::time::timeout(
                    std::time::Duration::from_millis(100),
                    client_guard.poll_message(),
                )
                .await
                .unwrap_or_default()
            };

            match msg {
                Some(msg) => {
                    Self::dispatch_message_static(&msg, &router, &entities, &to_engine).await;
                }
                None => {
                    // No message available, yield to allow other tasks
                    tokio::task::yield_now().await;
                }
            }
        }
    }

    /// Route one inbound message to every entity subscribed to its topic.
    ///
    /// A bad payload for one entity never affects another: each entity
    /// applies the message independently and silently skips what it cannot
    /// use.
    async fn dispatch_message_static(
        msg: &MqttMessage,
        router: &TopicRouter,
        entities: &EntitiesMap,
        to_engine: &FromIntegrationSender,
    ) {
        for (entity_id, delivery) in router.matches(&msg.topic) {
            let entity_arc = {
                let entities_guard = entities.lock().await;
                match entities_guard.get(&entity_id) {
                    Some(arc) => arc.clone(),
                    None => continue,
                }
            };

            let notification = {
                let mut entity = entity_arc.lock().await;
                match delivery {
                    Delivery::Liveness => {
                        let available = entity.apply_liveness(&msg.payload);
                        // Reported on every liveness message, changed or not.
                        Some(FromIntegrationMessage::AvailabilityChanged {
                            entity_id: entity_id.clone(),
                            available,
                        })
                    }
                    Delivery::Telemetry => {
                        let kind = entity.descriptor.platform.kind();
                        entity
                            .apply_telemetry(&msg.payload)
                            .and_then(|value| Self::state_message(kind, &entity_id, value))
                    }
                }
            };

            if let Some(notification) = notification {
                debug!("State update for {}", entity_id);
                if let Err(e) = to_engine.send(notification).await {
                    warn!("Failed to send state change message: {}", e);
                }
            }
        }
    }

    /// Project a typed entity value into the engine message for its platform.
    fn state_message(
        kind: PlatformKind,
        entity_id: &str,
        value: EntityValue,
    ) -> Option<FromIntegrationMessage> {
        let entity_id = entity_id.to_string();
        match (kind, value) {
            (PlatformKind::Sensor, value) => Some(FromIntegrationMessage::SensorValueChanged {
                entity_id,
                value: value.to_sensor_value(),
            }),
            (PlatformKind::BinarySensor, EntityValue::Bool(on)) => {
                Some(FromIntegrationMessage::BinarySensorChanged { entity_id, on })
            }
            (PlatformKind::Switch, EntityValue::Bool(on)) => {
                Some(FromIntegrationMessage::SwitchChanged { entity_id, on })
            }
            (PlatformKind::Number, EntityValue::Number(value)) => {
                Some(FromIntegrationMessage::NumberChanged { entity_id, value })
            }
            (PlatformKind::Select, EntityValue::Text(option)) => {
                Some(FromIntegrationMessage::SelectChanged { entity_id, option })
            }
            _ => None,
        }
    }

    /// Compute and publish the command payload for an entity action.
    async fn publish_entity_command(
        &self,
        entity_id: &str,
        action: impl FnOnce(&EntityRuntime) -> Option<(&'static str, String)>,
    ) -> Result<(), Box<dyn Error + Send>> {
        let entity_arc = {
            let entities_guard = self.entities.lock().await;
            entities_guard
                .get(entity_id)
                .cloned()
                .ok_or_else(|| -> Box<dyn Error + Send> {
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("Entity not found: {}", entity_id),
                    ))
                })?
        };

        let (command, payload) = {
            let entity = entity_arc.lock().await;
            action(&entity).ok_or_else(|| -> Box<dyn Error + Send> {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Command not applicable to entity: {}", entity_id),
                ))
            })?
        };

        let topic = topics::command(&self.config.device_topic, command);
        {
            let mut client = self.client.lock().await;
            client
                .publish(&topic, payload.as_bytes(), QosLevel::AtMostOnce, false)
                .await?;
        }

        info!("Sent command {} = {:?} for {}", command, payload, entity_id);
        Ok(())
    }

    /// Release an entity's subscriptions exactly once. Safe to call again;
    /// the handle list is drained on the first pass.
    async fn detach_entity(entity: &Arc<Mutex<EntityRuntime>>, router: &TopicRouter) {
        let mut entity = entity.lock().await;
        for handle in entity.subscriptions.drain(..) {
            router.unsubscribe(&handle);
        }
    }
}

#[async_trait]
impl<C: MqttClient + 'static> Integration for NeoPoolIntegration<C> {
    fn name(&self) -> &str {
        "neopool"
    }

    async fn setup(&mut self, tx: FromIntegrationSender) -> Result<(), Box<dyn Error + Send>> {
        self.to_engine = Some(tx.clone());

        info!(
            "Connecting to MQTT broker at {}:{}",
            self.config.broker, self.config.port
        );
        {
            let mut client = self.client.lock().await;
            client.connect().await?;
        }
        info!("Connected to MQTT broker");

        Self::attach_entities_static(&self.client, &self.config, &self.router, &self.entities, &tx)
            .await?;

        info!(
            "NeoPool integration attached {} entities for device '{}'",
            self.entities.lock().await.len(),
            self.config.device_name
        );

        // Spawn background task to process incoming MQTT messages
        let client = self.client.clone();
        let router = self.router.clone();
        let entities = self.entities.clone();
        let task = tokio::spawn(async move {
            Self::process_messages_task(client, router, entities, tx).await;
        });
        self._message_task = Some(task);

        Ok(())
    }

    async fn handle_message(
        &mut self,
        msg: ToIntegrationMessage,
    ) -> Result<(), Box<dyn Error + Send>> {
        match msg {
            ToIntegrationMessage::SwitchCommand { entity_id, on } => {
                self.publish_entity_command(&entity_id, |entity| entity.switch_payload(on))
                    .await
            }
            ToIntegrationMessage::NumberCommand { entity_id, value } => {
                self.publish_entity_command(&entity_id, |entity| entity.number_payload(value))
                    .await
            }
            ToIntegrationMessage::SelectCommand { entity_id, option } => {
                self.publish_entity_command(&entity_id, |entity| entity.select_payload(&option))
                    .await
            }
            ToIntegrationMessage::ButtonPress { entity_id } => {
                self.publish_entity_command(&entity_id, |entity| entity.press_payload())
                    .await
            }
        }
    }

    async fn shutdown(&mut self) -> Result<(), Box<dyn Error + Send>> {
        info!("NeoPool integration shutting down");

        if let Some(task) = self._message_task.take() {
            task.abort();
        }

        let entities: Vec<_> = {
            let mut entities_guard = self.entities.lock().await;
            entities_guard.drain().map(|(_, arc)| arc).collect()
        };
        for entity in &entities {
            Self::detach_entity(entity, &self.router).await;
        }

        Ok(())
    }
}
