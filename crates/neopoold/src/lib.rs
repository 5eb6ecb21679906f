pub mod api;
pub mod config;
mod engine;
mod integrations;

pub use config::Config;
pub use config::ConfigError;
pub use config::LogLevel;
pub use engine::Device;
pub use engine::Engine;
pub use engine::EntityInfo;
pub use engine::FromIntegrationMessage;
pub use engine::PlatformKind;
pub use engine::SensorValue;
pub use engine::State;
pub use engine::ToIntegrationMessage;
