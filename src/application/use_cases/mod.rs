mod chat_session;
mod credentials;
mod respond;

pub use chat_session::*;
pub use credentials::*;
pub use respond::*;
