pub mod container;
pub mod terminal;

pub use container::{Container, ContainerConfig};
pub use terminal::{render_transcript, SpinnerIndicator, TerminalSurface};
