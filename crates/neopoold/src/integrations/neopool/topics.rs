//! Tasmota topic layout for the NeoPool bridge.
//!
//! The controller publishes telemetry and its last-will presence under
//! `tele/{device}/...` and accepts commands under `cmnd/{device}/{command}`.
//! Command acknowledgements appear on `stat/{device}/RESULT` but are not
//! consumed here.

/// Prefix for every persistent entity identifier.
///
/// The full identifier is `{prefix}_{nodeid}_{entity_key}`. This format backs
/// durable entity identity downstream and must stay stable across catalog
/// changes.
pub const UNIQUE_ID_PREFIX: &str = "neopool_mqtt";

/// Last-will payload announcing the device is reachable.
pub const PAYLOAD_ONLINE: &str = "Online";

/// Last-will payload announcing the device is gone.
pub const PAYLOAD_OFFLINE: &str = "Offline";

/// Topic carrying JSON telemetry documents.
pub fn telemetry(device: &str) -> String {
    format!("tele/{}/SENSOR", device)
}

/// Topic carrying the last-will presence payload.
pub fn liveness(device: &str) -> String {
    format!("tele/{}/LWT", device)
}

/// Topic a command is published to.
pub fn command(device: &str, command: &str) -> String {
    format!("cmnd/{}/{}", device, command)
}

/// Topic carrying command acknowledgements (not consumed by this bridge).
#[allow(dead_code)]
pub fn result(device: &str) -> String {
    format!("stat/{}/RESULT", device)
}

/// Build the persistent identifier for one entity.
pub fn unique_id(nodeid: &str, entity_key: &str) -> String {
    format!("{}_{}_{}", UNIQUE_ID_PREFIX, nodeid, entity_key)
}
