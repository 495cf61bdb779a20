/// A transient "working" signal shown while a reply is being produced.
///
/// The message is cosmetic; surfaces may ignore it.
pub trait WorkingIndicator {
    fn start(&self, message: &str);

    fn finish(&self);
}

/// Indicator that shows nothing.
pub struct NoopIndicator;

impl WorkingIndicator for NoopIndicator {
    fn start(&self, _message: &str) {}

    fn finish(&self) {}
}
