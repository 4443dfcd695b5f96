use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The activation flag shared by all handles of one collector.
///
/// Collectors start active. Clearing accumulated state does not touch the flag.
#[derive(Clone, Debug)]
pub(crate) struct Activation {
    active: Arc<AtomicBool>,
}

impl Activation {
    pub(crate) fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active() {
        let activation = Activation::new();
        assert!(activation.is_active());
    }

    #[test]
    fn set_active_round_trips() {
        let activation = Activation::new();

        activation.set_active(false);
        assert!(!activation.is_active());

        activation.set_active(true);
        assert!(activation.is_active());
    }

    #[test]
    fn clones_share_the_flag() {
        let activation = Activation::new();
        let clone = activation.clone();

        clone.set_active(false);
        assert!(!activation.is_active());
    }
}
