//! Select catalog: enumerated controller modes.
//!
//! Inbound state maps the raw code through the option table; an outbound
//! option choice maps back through reverse lookup to the code the controller
//! expects.

use super::entity::EntityDescriptor;
use super::entity::Platform;
use super::values;

pub const SELECT_DESCRIPTIONS: &[EntityDescriptor] = &[
    EntityDescriptor {
        key: "filtration_mode",
        name: "Filtration Mode",
        platform: Platform::Select {
            path: "NeoPool.Filtration.Mode",
            command: "NPFiltrationmode",
            options: values::FILTRATION_MODE,
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "filtration_speed",
        name: "Filtration Speed",
        platform: Platform::Select {
            path: "NeoPool.Filtration.Speed",
            command: "NPFiltrationspeed",
            options: values::FILTRATION_SPEED,
        },
        device_class: None,
        unit: None,
    },
    EntityDescriptor {
        key: "boost",
        name: "Boost Mode",
        platform: Platform::Select {
            path: "NeoPool.Hydrolysis.Boost",
            command: "NPBoost",
            options: values::BOOST_MODE,
        },
        device_class: None,
        unit: None,
    },
];
