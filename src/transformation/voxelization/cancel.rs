use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Token used to cancel a voxelization in progress.
///
/// Clones share the same flag: cancelling any of them cancels all of them. The occupancy
/// classifier checks the token between batches of grid rows.
#[derive(Clone, Default, Debug)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Build a new token, which is initialized as "not cancelled".
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark this token as cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check if the token is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
