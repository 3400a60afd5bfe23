//! Step label delegate

/// Supplies the label text of each step
///
/// Asked once per marker when the stepper is mounted. Returning `None`
/// leaves that marker without a label.
///
/// The sequencer only keeps a weak reference; the owner decides how long the
/// delegate lives.
pub trait StepDescriber: Send + Sync {
    fn describe_step(&self, index: usize) -> Option<String>;
}

impl<F> StepDescriber for F
where
    F: Fn(usize) -> Option<String> + Send + Sync,
{
    fn describe_step(&self, index: usize) -> Option<String> {
        self(index)
    }
}
