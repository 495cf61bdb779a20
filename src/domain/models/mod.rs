mod completion;
mod persona;
mod reply;
mod transcript;
pub mod utterance;

pub use completion::*;
pub use persona::*;
pub use reply::*;
pub use transcript::*;
