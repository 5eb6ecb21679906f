//! Binary sensor catalog: module presence, alarms, and relay states.
//!
//! Alarm-style fields report the raw bit with problem polarity; entities
//! whose meaning is the opposite of the raw bit carry `invert`.

use super::entity::DeviceClass;
use super::entity::EntityDescriptor;
use super::entity::Platform;
use super::entity::ValueTransform;

const fn module(key: &'static str, name: &'static str, path: &'static str) -> EntityDescriptor {
    EntityDescriptor {
        key,
        name,
        platform: Platform::BinarySensor {
            path,
            // A module field that fails to decode still means "not fitted",
            // so use the always-decided variant.
            transform: Some(ValueTransform::IntBool),
            invert: false,
        },
        device_class: Some(DeviceClass::Connectivity),
        unit: None,
    }
}

const fn relay(key: &'static str, name: &'static str, path: &'static str) -> EntityDescriptor {
    EntityDescriptor {
        key,
        name,
        platform: Platform::BinarySensor {
            path,
            transform: None,
            invert: false,
        },
        device_class: Some(DeviceClass::Running),
        unit: None,
    }
}

pub const BINARY_SENSOR_DESCRIPTIONS: &[EntityDescriptor] = &[
    module("modules_ph", "pH Module", "NeoPool.Modules.pH"),
    module("modules_redox", "Redox Module", "NeoPool.Modules.Redox"),
    module("modules_hydrolysis", "Hydrolysis Module", "NeoPool.Modules.Hydrolysis"),
    module("modules_chlorine", "Chlorine Module", "NeoPool.Modules.Chlorine"),
    module("modules_conductivity", "Conductivity Module", "NeoPool.Modules.Conductivity"),
    EntityDescriptor {
        key: "hydrolysis_water_flow",
        name: "Water Flow",
        platform: Platform::BinarySensor {
            path: "NeoPool.Hydrolysis.FL1",
            transform: None,
            // FL1=0 means flow OK
            invert: true,
        },
        device_class: Some(DeviceClass::Running),
        unit: None,
    },
    EntityDescriptor {
        key: "ph_tank_level",
        name: "pH Tank Level",
        platform: Platform::BinarySensor {
            path: "NeoPool.pH.Tank",
            transform: None,
            // Tank=0 means low
            invert: true,
        },
        device_class: Some(DeviceClass::Problem),
        unit: None,
    },
    relay("relay_ph_state", "pH Relay", "NeoPool.Relay.State.0"),
    relay("relay_filtration_state", "Filtration Relay", "NeoPool.Relay.State.1"),
    relay("relay_light_state", "Light Relay", "NeoPool.Relay.State.2"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn by_key(key: &str) -> &'static EntityDescriptor {
        BINARY_SENSOR_DESCRIPTIONS
            .iter()
            .find(|d| d.key == key)
            .unwrap_or_else(|| panic!("missing binary sensor: {key}"))
    }

    fn invert_of(desc: &EntityDescriptor) -> bool {
        match desc.platform {
            Platform::BinarySensor { invert, .. } => invert,
            _ => panic!("not a binary sensor"),
        }
    }

    #[test]
    fn test_modules_ph_description() {
        let desc = by_key("modules_ph");
        assert_eq!(desc.platform.path(), Some("NeoPool.Modules.pH"));
        assert!(!invert_of(desc));
    }

    #[test]
    fn test_water_flow_is_inverted() {
        let desc = by_key("hydrolysis_water_flow");
        assert_eq!(desc.device_class, Some(DeviceClass::Running));
        assert_eq!(desc.platform.path(), Some("NeoPool.Hydrolysis.FL1"));
        assert!(invert_of(desc));
    }

    #[test]
    fn test_ph_tank_level_is_inverted() {
        let desc = by_key("ph_tank_level");
        assert_eq!(desc.device_class, Some(DeviceClass::Problem));
        assert!(invert_of(desc));
    }

    #[test]
    fn test_relay_states_use_array_paths() {
        let relays: Vec<_> = BINARY_SENSOR_DESCRIPTIONS
            .iter()
            .filter(|d| d.key.starts_with("relay_"))
            .collect();
        assert!(relays.len() >= 3);

        let filtration = by_key("relay_filtration_state");
        assert_eq!(filtration.device_class, Some(DeviceClass::Running));
        assert_eq!(filtration.platform.path(), Some("NeoPool.Relay.State.1"));
    }

    #[test]
    fn test_all_descriptions_well_formed() {
        for desc in BINARY_SENSOR_DESCRIPTIONS {
            assert!(!desc.key.is_empty());
            assert!(desc.platform.path().is_some());
        }
    }
}
