//! Long-lived shared blocklist for the verdict path.
//!
//! One [Tally] is created at process scope and shared by every receive
//! context. The verdict path only performs [Blocklist::lookup] and the
//! atomic increment behind it; entry lifetime (insert/remove) belongs to
//! the control plane alone.
//!
//! Keys are the big-endian value of the four address bytes, which is the
//! same value [std::net::Ipv4Addr] converts to, so addresses blocked
//! here always match source addresses lifted off the wire.

use std::net::Ipv4Addr;

use dashmap::{mapref::entry::Entry, DashMap};
use tracing::debug;
use turnstile::{Blocklist, CounterHandle};

/// Concurrent store of blocked IPv4 sources and their drop tallies.
///
/// Backed by a sharded map: lookups briefly take a shard read lock to
/// clone the counter handle out, administrative writes a shard write
/// lock. No lock is ever held while a counter is incremented.
#[derive(Debug, Default)]
pub struct Tally {
	entries: DashMap<u32, CounterHandle>,
}

impl Tally {
	pub fn new() -> Self {
		Self::default()
	}

	/// Block `addr`, starting its tally at `initial`.
	///
	/// Returns false and leaves the live tally untouched if the address
	/// is already blocked.
	pub fn insert(&self, addr: Ipv4Addr, initial: u64) -> bool {
		match self.entries.entry(u32::from(addr)) {
			Entry::Occupied(_) => false,
			Entry::Vacant(slot) => {
				slot.insert(CounterHandle::new(initial));
				debug!(%addr, initial, "blocked source");
				true
			},
		}
	}

	/// Unblock `addr`. Returns whether an entry was removed.
	pub fn remove(&self, addr: Ipv4Addr) -> bool {
		let removed = self.entries.remove(&u32::from(addr)).is_some();
		if removed {
			debug!(%addr, "unblocked source");
		}
		removed
	}

	/// Current tally for `addr`, if it is blocked.
	pub fn get(&self, addr: Ipv4Addr) -> Option<u64> {
		self.entries
			.get(&u32::from(addr))
			.map(|entry| entry.value().count())
	}

	/// Number of blocked addresses.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Point-in-time copy of every entry, for reporting.
	pub fn snapshot(&self) -> Vec<(Ipv4Addr, u64)> {
		self.entries
			.iter()
			.map(|entry| (Ipv4Addr::from(*entry.key()), entry.value().count()))
			.collect()
	}

	/// Sum of all drop tallies.
	pub fn total_drops(&self) -> u64 {
		self.entries.iter().map(|entry| entry.value().count()).sum()
	}
}

impl Blocklist for Tally {
	type Counter = CounterHandle;

	#[inline]
	fn lookup(&self, saddr: u32) -> Option<CounterHandle> {
		self.entries.get(&saddr).map(|entry| entry.value().clone())
	}
}
