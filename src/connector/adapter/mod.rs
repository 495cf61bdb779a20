mod perplexity_client;
mod secrets_file;

pub use perplexity_client::*;
pub use secrets_file::*;
