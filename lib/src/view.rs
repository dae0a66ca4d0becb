//! The runtime half of `#[labeled_views]`: values paired with the source
//! text that produced them.

/// A value carrying the label it was built under.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Labeled<T> {
    pub label: &'static str,
    pub content: T,
}

/// Attaches a label to any value. Blanket-implemented; the
/// `#[labeled_views]` attribute brings it into scope inside rewritten
/// bodies.
pub trait LabeledView: Sized {
    fn labeled_view(self, label: &'static str) -> Labeled<Self> {
        Labeled { label, content: self }
    }
}

impl<T> LabeledView for T {}

/// Runs a rewritten body. A plain call today; a single place to hang
/// collection or instrumentation onto later.
pub fn labeled_views<R>(content: impl FnOnce() -> R) -> R {
    content()
}
