//! Switch catalog: relays the controller accepts direct on/off commands for.

use super::entity::EntityDescriptor;
use super::entity::Platform;

const fn switch(
    key: &'static str,
    name: &'static str,
    path: &'static str,
    command: &'static str,
) -> EntityDescriptor {
    EntityDescriptor {
        key,
        name,
        platform: Platform::Switch {
            path,
            command,
            payload_on: "1",
            payload_off: "0",
        },
        device_class: None,
        unit: None,
    }
}

pub const SWITCH_DESCRIPTIONS: &[EntityDescriptor] = &[
    switch("filtration", "Filtration", "NeoPool.Filtration.State", "NPFiltration"),
    switch("light", "Light", "NeoPool.Light", "NPLight"),
    switch("aux1", "AUX1", "NeoPool.Relay.Aux.0", "NPAux1"),
    switch("aux2", "AUX2", "NeoPool.Relay.Aux.1", "NPAux2"),
    switch("aux3", "AUX3", "NeoPool.Relay.Aux.2", "NPAux3"),
    switch("aux4", "AUX4", "NeoPool.Relay.Aux.3", "NPAux4"),
];
