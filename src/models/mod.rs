pub mod error;
pub mod event;
pub mod response;

pub use error::{AdapterError, ConfigError};
pub use event::{GatewayEvent, HeaderList};
pub use response::GatewayResponse;
