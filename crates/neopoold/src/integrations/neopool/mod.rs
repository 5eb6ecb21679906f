mod binary_sensor;
mod button;
mod client;
mod command;
mod config;
mod convert;
mod document;
mod entity;
// Private module - module_inception is intentional here
#[allow(clippy::module_inception)]
mod neopool;
mod number;
mod select;
mod sensor;
mod subscription;
mod switch;
mod topics;
mod values;

use anyhow::Context;
pub use config::Config as NeoPoolConfig;
use linkme::distributed_slice;
pub use neopool::NeoPoolIntegration;

use crate::engine;

#[distributed_slice(engine::INTEGRATION_REGISTRY)]
fn init_neopool(ctx: &engine::IntegrationContext) -> engine::IntegrationFactoryResult {
    let neopool_config = if let Some(c) = &ctx.config.integrations.neopool {
        c
    } else {
        return Ok(None);
    };

    if !convert::validate_nodeid(Some(&neopool_config.node_id)) {
        anyhow::bail!(
            "NeoPool node id {:?} is unusable; read it from the power unit before configuring",
            neopool_config.node_id
        );
    }

    let client =
        client::RumqttcClient::new(neopool_config).context("Failed to create MQTT client")?;
    Ok(Some(Box::new(NeoPoolIntegration::new(
        client,
        neopool_config,
    ))))
}
