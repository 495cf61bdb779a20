mod chat_client;
mod secrets_lookup;
mod working_indicator;

pub use chat_client::*;
pub use secrets_lookup::*;
pub use working_indicator::*;
