//! Button catalog: stateless actuators.

use super::entity::EntityDescriptor;
use super::entity::Platform;

pub const BUTTON_DESCRIPTIONS: &[EntityDescriptor] = &[EntityDescriptor {
    key: "clear_error",
    name: "Clear Error",
    platform: Platform::Button {
        command: "NPEscape",
        payload: "",
    },
    device_class: None,
    unit: None,
}];
