use serde::Deserialize;

fn default_port() -> u16 {
    1883
}

fn default_device_topic() -> String {
    "SmartPool".to_string()
}

fn default_device_name() -> String {
    "NeoPool".to_string()
}

/// Configuration for the NeoPool bridge integration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// MQTT broker hostname or IP address
    pub broker: String,

    /// MQTT broker port
    #[serde(default = "default_port")]
    pub port: u16,

    /// MQTT client ID
    pub client_id: String,

    /// Topic segment of the Tasmota bridge (default: "SmartPool"),
    /// i.e. the `%topic%` in `tele/%topic%/SENSOR`
    #[serde(default = "default_device_topic")]
    pub device_topic: String,

    /// Stable identity of the power unit, distinct per controller.
    /// Backs the persistent entity identifiers.
    pub node_id: String,

    /// Human-readable device name
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Optional username for authentication
    #[serde(default)]
    pub username: Option<String>,

    /// Optional password for authentication
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config: Config = toml::from_str(
            r#"
            broker = "localhost"
            client_id = "neopoold"
            node_id = "ABC123"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 1883);
        assert_eq!(config.device_topic, "SmartPool");
        assert_eq!(config.device_name, "NeoPool");
        assert_eq!(config.username, None);
    }

    #[test]
    fn test_full_section() {
        let config: Config = toml::from_str(
            r#"
            broker = "broker.local"
            port = 8883
            client_id = "neopoold"
            device_topic = "PoolBridge"
            node_id = "XYZ789"
            device_name = "Garden Pool"
            username = "user"
            password = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8883);
        assert_eq!(config.device_topic, "PoolBridge");
        assert_eq!(config.username.as_deref(), Some("user"));
    }
}
