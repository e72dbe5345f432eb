mod core;
mod gateway;
mod provider;
mod store;

pub use core::Config;
pub use gateway::GatewayConfig;
pub use provider::ProviderConfig;
pub use store::{StoreBackend, StoreConfig};
