//! Ambient state threaded through every conversion call.

use tokio_util::sync::CancellationToken;

///
/// Context
///
/// Carries the cooperative cancellation signal. Cloning shares the signal.
///

#[derive(Clone, Debug, Default)]
pub struct Context {
    cancel: CancellationToken,
}

impl Context {
    /// A context that is never cancelled unless [`Context::cancel`] is
    /// called on it or one of its clones.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// A context cancelled together with `self`, but cancellable on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_signal() {
        let ctx = Context::background();
        let clone = ctx.clone();

        assert!(!clone.is_cancelled());
        ctx.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn child_cancellation_does_not_reach_parent() {
        let parent = Context::background();
        let child = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());

        let other = parent.child();
        parent.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn wraps_external_token() {
        let token = CancellationToken::new();
        let ctx = Context::with_cancellation(token.clone());

        token.cancel();
        assert!(ctx.is_cancelled());
    }
}
