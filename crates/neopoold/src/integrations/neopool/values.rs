//! State maps for the NeoPool controller's enumerated telemetry fields.
//!
//! Tables are ordered slices rather than hash maps: the order is part of the
//! catalog data and makes reverse lookup deterministic.

/// pH module alarm states (`NeoPool.pH.State`).
pub const PH_STATE: &[(i64, &str)] = &[
    (0, "No alarm"),
    (1, "pH too high"),
    (2, "pH too low"),
    (3, "Pump exceeded working time"),
    (4, "pH higher than setpoint"),
    (5, "pH lower than setpoint"),
    (6, "Tank level low"),
];

/// pH dosing pump states (`NeoPool.pH.Pump`).
pub const PH_PUMP: &[(i64, &str)] = &[(0, "Off"), (1, "On"), (2, "Flow alarm")];

/// Filtration modes (`NeoPool.Filtration.Mode`). The controller skips
/// 5 through 12; 13 is the service backwash program.
pub const FILTRATION_MODE: &[(i64, &str)] = &[
    (0, "Manual"),
    (1, "Auto"),
    (2, "Heating"),
    (3, "Smart"),
    (4, "Intelligent"),
    (13, "Backwash"),
];

/// Filtration pump speeds (`NeoPool.Filtration.Speed`).
pub const FILTRATION_SPEED: &[(i64, &str)] = &[(1, "Slow"), (2, "Medium"), (3, "Fast")];

/// Hydrolysis boost modes (`NeoPool.Hydrolysis.Boost`).
pub const BOOST_MODE: &[(i64, &str)] = &[(0, "Off"), (1, "On"), (2, "On (Redox)")];

/// Hydrolysis cell states (`NeoPool.Hydrolysis.State`), keyed by the literal
/// strings the firmware emits.
pub const HYDROLYSIS_STATE: &[(&str, &str)] = &[
    ("OFF", "Off"),
    ("FLOW", "No flow"),
    ("POL1", "Polarization 1"),
    ("POL2", "Polarization 2"),
];

/// Relay slot names, indexed by position in `NeoPool.Relay.State`.
#[allow(dead_code)]
pub const RELAY_NAMES: &[&str] = &["pH", "Filtration", "Light", "AUX1", "AUX2", "AUX3", "AUX4"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::neopool::convert::{label_for, lookup_by_value};

    #[test]
    fn test_ph_state_covers_alarm_codes() {
        assert!(PH_STATE.len() >= 7);
        assert_eq!(label_for(PH_STATE, &0), Some("No alarm"));
        assert_eq!(label_for(PH_STATE, &6), Some("Tank level low"));
    }

    #[test]
    fn test_filtration_mode_table() {
        assert_eq!(label_for(FILTRATION_MODE, &1), Some("Auto"));
        assert_eq!(label_for(FILTRATION_MODE, &13), Some("Backwash"));
        assert_eq!(lookup_by_value(FILTRATION_MODE, "Smart"), Some(3));
        assert_eq!(label_for(FILTRATION_MODE, &5), None);
    }

    #[test]
    fn test_filtration_speed_table() {
        assert_eq!(FILTRATION_SPEED.len(), 3);
        assert_eq!(lookup_by_value(FILTRATION_SPEED, "Fast"), Some(3));
    }

    #[test]
    fn test_hydrolysis_state_table() {
        assert_eq!(label_for(HYDROLYSIS_STATE, &"POL1"), Some("Polarization 1"));
        assert_eq!(label_for(HYDROLYSIS_STATE, &"UNKNOWN"), None);
    }

    #[test]
    fn test_relay_names() {
        assert_eq!(RELAY_NAMES.len(), 7);
        assert_eq!(RELAY_NAMES[1], "Filtration");
    }
}
