use thiserror::Error;

use crate::{
	headers,
	map::{Blocklist, DropCounter},
	packet::{Cursor, Frame, OutOfBounds},
};

/// Outcome of classifying one frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
	/// Continue normal processing of the frame.
	Pass,
	/// Discard the frame.
	Drop,
}

/// Non-fatal reasons a frame stops mattering to the filter.
///
/// Every variant folds into [Verdict::Pass]: traffic the engine cannot
/// classify is let through rather than dropped.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum Bypass {
	#[error("frame too short for the header being parsed")]
	OutOfBounds(#[from] OutOfBounds),
	#[error("ethertype {0:#06x} is not IPv4")]
	UnsupportedEtherType(u16),
	#[error("source address is not blocked")]
	AddressNotBlocked,
}

/// Classify one received frame against the blocklist.
///
/// A single forward pass over the frame: Ethernet parse, ethertype gate,
/// IPv4 parse, exact-match source lookup. On a hit the entry's drop
/// counter advances by exactly one and the frame is dropped; every other
/// outcome, including any parse failure, passes the frame untouched.
///
/// The call performs no I/O and no allocation, and the only synchronised
/// operation is the single atomic increment on a match, so invocations
/// may run concurrently from any number of receive contexts.
pub fn classify<F: Frame, B: Blocklist>(frame: F, blocklist: &B) -> Verdict {
	match blocked_source(frame, blocklist) {
		Ok(counter) => {
			counter.increment();
			Verdict::Drop
		},
		Err(_) => Verdict::Pass,
	}
}

/// The non-terminal stages of the verdict pass.
fn blocked_source<F: Frame, B: Blocklist>(frame: F, blocklist: &B) -> Result<B::Counter, Bypass> {
	let mut cursor = Cursor::new(frame);

	let eth = headers::parse_ethernet(&mut cursor)?;
	if !eth.is_ipv4() {
		return Err(Bypass::UnsupportedEtherType(eth.ethertype));
	}

	let ip = headers::parse_ipv4(&mut cursor)?;

	blocklist.lookup(ip.saddr).ok_or(Bypass::AddressNotBlocked)
}
