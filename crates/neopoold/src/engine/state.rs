use std::collections::HashMap;

use serde::Serialize;

use super::device::Device;
use super::entity::EntityInfo;

/// Value carried by a plain sensor entity.
///
/// Sensors report either a numeric reading (temperature, redox) or a textual
/// one (hydrolysis cell state, controller type).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Number(f64),
    Text(String),
}

/// State of a sensor entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SensorState {
    /// Last resolved reading; `None` until the first successful resolution.
    pub value: Option<SensorValue>,
    pub available: bool,
}

/// State of a binary sensor entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BinarySensorState {
    pub on: Option<bool>,
    pub available: bool,
}

/// State of a switch entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SwitchState {
    pub on: Option<bool>,
    pub available: bool,
}

/// State of a number entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NumberState {
    pub value: Option<f64>,
    pub available: bool,
}

/// State of a select entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectState {
    pub option: Option<String>,
    pub available: bool,
}

/// State of a button entity. Buttons are stateless actuators and are always
/// available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonState {
    pub available: bool,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self { available: true }
    }
}

/// Centralized snapshot of the entire engine state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct State {
    pub devices: HashMap<String, Device>,
    pub entities: HashMap<String, EntityInfo>,
    pub sensors: HashMap<String, SensorState>,
    pub binary_sensors: HashMap<String, BinarySensorState>,
    pub switches: HashMap<String, SwitchState>,
    pub numbers: HashMap<String, NumberState>,
    pub selects: HashMap<String, SelectState>,
    pub buttons: HashMap<String, ButtonState>,
}
