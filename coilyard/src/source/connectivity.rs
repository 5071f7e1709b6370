//! Connectivity signal consulted before each poll.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tells the source whether a network request is worth attempting.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// For hosts without a connectivity signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Online flag the host flips as its network state changes.
///
/// Clones share the same flag.
#[derive(Debug, Clone)]
pub struct SharedConnectivity {
    online: Arc<AtomicBool>,
}

impl SharedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }
}

impl Default for SharedConnectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for SharedConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_connectivity_clones_share_flag() {
        let connectivity = SharedConnectivity::default();
        let handle = connectivity.clone();
        assert!(connectivity.is_online());

        handle.set_online(false);
        assert!(!connectivity.is_online());
    }
}
