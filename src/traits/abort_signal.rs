/// A trait for signals which can abort a running minimization from outside the iteration loop.
///
/// The engine has no termination criteria beyond its fixed iteration count; an abort signal is an
/// external kill-switch, not a convergence test.
pub trait AbortSignal {
    /// Returns `true` if the signal received an abort request since the last [`reset`](Self::reset).
    fn is_aborted(&self) -> bool;
    /// Raise the abort request.
    fn abort(&self);
    /// Clear the abort request.
    fn reset(&self);
}

/// Shared signals delegate, so one signal can be held by both the engine and whatever raises it.
impl<T: AbortSignal + ?Sized> AbortSignal for std::sync::Arc<T> {
    fn is_aborted(&self) -> bool {
        self.as_ref().is_aborted()
    }

    fn abort(&self) {
        self.as_ref().abort()
    }

    fn reset(&self) {
        self.as_ref().reset()
    }
}
