pub mod config;
pub mod config_loader;
pub mod error;
pub mod traits;

pub use config::{AppConfig, PayoutConfig, RiskConfig, RiskLevel};
pub use config_loader::ConfigLoader;
pub use error::{Error, Result};
pub use traits::{AddressValidator, ConfigProvider, ConfigValue, NotificationSink, NotifyEvent};
