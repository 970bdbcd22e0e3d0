use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

/// Store seam between the verdict path and a blocklist backend.
///
/// The engine stays generic over where the blocklist actually lives, so
/// the same verdict code runs against the production store and against
/// plain test tables.
pub trait Blocklist {
	/// Handle to a matched entry's drop counter.
	type Counter: DropCounter;

	/// Exact-match lookup of a source address.
	///
	/// Read-only: a miss must not create an entry, and a hit hands back
	/// a counter without holding any lock.
	fn lookup(&self, saddr: u32) -> Option<Self::Counter>;
}

/// A live drop counter for one blocked address.
pub trait DropCounter {
	/// Atomically add one. Never blocks, never fails.
	fn increment(&self);
}

/// Shared handle to one entry's drop counter.
///
/// Cloning is a refcount bump, so handing a handle to the verdict path
/// costs no allocation, and a handle stays usable even if the control
/// plane removes the entry underneath it.
#[derive(Clone, Debug, Default)]
pub struct CounterHandle(Arc<AtomicU64>);

impl CounterHandle {
	pub fn new(initial: u64) -> Self {
		Self(Arc::new(AtomicU64::new(initial)))
	}

	/// Current count. Monitoring read, not used on the verdict path.
	pub fn count(&self) -> u64 {
		self.0.load(Ordering::Relaxed)
	}
}

impl DropCounter for CounterHandle {
	#[inline]
	fn increment(&self) {
		self.0.fetch_add(1, Ordering::Relaxed);
	}
}
