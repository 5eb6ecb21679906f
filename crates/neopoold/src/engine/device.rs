//! Device identity records.

use serde::Serialize;

/// A physical or logical device that contains one or more entities.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    /// Stable identity, distinct per physical controller.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub sw_version: Option<String>,

    /// Entity ids belonging to this device.
    pub entity_ids: Vec<String>,
}

impl Device {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            manufacturer: None,
            model: None,
            sw_version: None,
            entity_ids: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity_id: String) {
        if !self.entity_ids.contains(&entity_id) {
            self.entity_ids.push(entity_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_entity_deduplicates() {
        let mut device = Device::new("ABC123".to_string(), "Pool".to_string());
        device.add_entity("neopool_mqtt_ABC123_light".to_string());
        device.add_entity("neopool_mqtt_ABC123_light".to_string());
        assert_eq!(device.entity_ids.len(), 1);
    }
}
