//! Sensor catalog: read-only measurements and status text.

use super::entity::DeviceClass;
use super::entity::EntityDescriptor;
use super::entity::Platform;
use super::entity::ValueTransform;

pub const SENSOR_DESCRIPTIONS: &[EntityDescriptor] = &[
    EntityDescriptor {
        key: "water_temperature",
        name: "Water Temperature",
        platform: Platform::Sensor {
            path: "NeoPool.Temperature",
            transform: Some(ValueTransform::Float),
        },
        device_class: Some(DeviceClass::Temperature),
        unit: Some("°C"),
    },
    EntityDescriptor {
        key: "ph_data",
        name: "pH",
        platform: Platform::Sensor {
            path: "NeoPool.pH.Data",
            transform: Some(ValueTransform::Float),
        },
        device_class: Some(DeviceClass::Ph),
        unit: None,
    },
    EntityDescriptor {
        key: "redox_data",
        name: "Redox",
        platform: Platform::Sensor {
            path: "NeoPool.Redox.Data",
            // The probe reports whole millivolts.
            transform: Some(ValueTransform::Int),
        },
        device_class: Some(DeviceClass::Voltage),
        unit: Some("mV"),
    },
    EntityDescriptor {
        key: "hydrolysis_data",
        name: "Hydrolysis Production",
        platform: Platform::Sensor {
            path: "NeoPool.Hydrolysis.Data",
            transform: Some(ValueTransform::Float),
        },
        device_class: None,
        unit: Some("g/h"),
    },
    EntityDescriptor {
        key: "hydrolysis_percent",
        name: "Hydrolysis Level",
        platform: Platform::Sensor {
            path: "NeoPool.Hydrolysis.Percent.Data",
            transform: Some(ValueTransform::Float),
        },
        device_class: None,
        unit: Some("%"),
    },
    EntityDescriptor {
        key: "hydrolysis_runtime_total",
        name: "Hydrolysis Runtime Total",
        platform: Platform::Sensor {
            path: "NeoPool.Hydrolysis.Runtime.Total",
            transform: Some(ValueTransform::RuntimeHours),
        },
        device_class: Some(DeviceClass::Duration),
        unit: Some("h"),
    },
    EntityDescriptor {
        key: "hydrolysis_state",
        name: "Hydrolysis State",
        platform: Platform::Sensor {
            path: "NeoPool.Hydrolysis.State",
            transform: Some(ValueTransform::HydrolysisState),
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "ph_state",
        name: "pH Alarm",
        platform: Platform::Sensor {
            path: "NeoPool.pH.State",
            transform: Some(ValueTransform::PhAlarm),
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "ph_pump",
        name: "pH Pump",
        platform: Platform::Sensor {
            path: "NeoPool.pH.Pump",
            transform: Some(ValueTransform::PhPump),
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "controller_type",
        name: "Controller Type",
        platform: Platform::Sensor {
            path: "NeoPool.Type",
            transform: None,
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "powerunit_nodeid",
        name: "Power Unit Node ID",
        platform: Platform::Sensor {
            path: "NeoPool.Powerunit.NodeID",
            transform: None,
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "powerunit_version",
        name: "Power Unit Version",
        platform: Platform::Sensor {
            path: "NeoPool.Powerunit.Version",
            transform: None,
        },
        device_class: None,
        unit: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn by_key(key: &str) -> &'static EntityDescriptor {
        SENSOR_DESCRIPTIONS
            .iter()
            .find(|d| d.key == key)
            .unwrap_or_else(|| panic!("missing sensor: {key}"))
    }

    #[test]
    fn test_water_temperature_description() {
        let desc = by_key("water_temperature");
        assert_eq!(desc.device_class, Some(DeviceClass::Temperature));
        assert_eq!(desc.unit, Some("°C"));
        assert_eq!(desc.platform.path(), Some("NeoPool.Temperature"));
    }

    #[test]
    fn test_ph_data_description() {
        let desc = by_key("ph_data");
        assert_eq!(desc.device_class, Some(DeviceClass::Ph));
        assert_eq!(desc.platform.path(), Some("NeoPool.pH.Data"));
    }

    #[test]
    fn test_redox_data_description() {
        let desc = by_key("redox_data");
        assert_eq!(desc.device_class, Some(DeviceClass::Voltage));
        assert_eq!(desc.platform.path(), Some("NeoPool.Redox.Data"));
    }

    #[test]
    fn test_hydrolysis_runtime_description() {
        let desc = by_key("hydrolysis_runtime_total");
        assert_eq!(desc.device_class, Some(DeviceClass::Duration));
        assert_eq!(desc.platform.path(), Some("NeoPool.Hydrolysis.Runtime.Total"));
        assert!(matches!(
            desc.platform,
            Platform::Sensor {
                transform: Some(ValueTransform::RuntimeHours),
                ..
            }
        ));
    }

    #[test]
    fn test_all_descriptions_well_formed() {
        for desc in SENSOR_DESCRIPTIONS {
            assert!(!desc.key.is_empty());
            assert!(!desc.name.is_empty());
            assert!(desc.platform.path().is_some());
        }
    }
}
