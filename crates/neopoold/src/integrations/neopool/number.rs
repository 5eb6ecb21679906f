//! Number catalog: setpoints adjustable from the host platform.

use super::entity::DeviceClass;
use super::entity::EntityDescriptor;
use super::entity::Platform;

pub const NUMBER_DESCRIPTIONS: &[EntityDescriptor] = &[
    EntityDescriptor {
        key: "ph_min",
        name: "pH Min",
        platform: Platform::Number {
            path: "NeoPool.pH.Min",
            command: "NPpHMin",
            min: 0.0,
            max: 14.0,
            step: 0.1,
            template: None,
        },
        device_class: Some(DeviceClass::Ph),
        unit: None,
    },
    EntityDescriptor {
        key: "ph_max",
        name: "pH Max",
        platform: Platform::Number {
            path: "NeoPool.pH.Max",
            command: "NPpHMax",
            min: 0.0,
            max: 14.0,
            step: 0.1,
            template: None,
        },
        device_class: Some(DeviceClass::Ph),
        unit: None,
    },
    EntityDescriptor {
        key: "redox_setpoint",
        name: "Redox Setpoint",
        platform: Platform::Number {
            path: "NeoPool.Redox.Setpoint",
            command: "NPRedox",
            min: 0.0,
            max: 1000.0,
            step: 1.0,
            template: None,
        },
        device_class: Some(DeviceClass::Voltage),
        unit: Some("mV"),
    },
    EntityDescriptor {
        key: "hydrolysis_setpoint",
        name: "Hydrolysis Setpoint",
        platform: Platform::Number {
            path: "NeoPool.Hydrolysis.Percent.Setpoint",
            command: "NPHydrolysis",
            min: 0.0,
            max: 100.0,
            step: 1.0,
            template: Some("{value} %"),
        },
        device_class: None,
        unit: Some("%"),
    },
];
