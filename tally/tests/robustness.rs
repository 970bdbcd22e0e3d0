use std::net::Ipv4Addr;

use proptest::prelude::*;
use tally::Tally;
use turnstile::{classify, Verdict};

mod common;

use common::ipv4_frame;

proptest! {
	#[test]
	fn arbitrary_bytes_never_move_a_foreign_tally(
		frame in proptest::collection::vec(any::<u8>(), 0..512),
	) {
		let blocked = Ipv4Addr::new(10, 0, 0, 5);
		let tally = Tally::new();
		tally.insert(blocked, 0);

		let verdict = classify(frame.as_slice(), &tally);

		// Only a well-formed IPv4 frame sourced from the blocked address
		// may move the tally, and then by exactly one.
		let hit = frame.len() >= 34
			&& frame[12..14] == [0x08, 0x00]
			&& frame[26..30] == [10, 0, 0, 5];

		if hit {
			prop_assert_eq!(verdict, Verdict::Drop);
			prop_assert_eq!(tally.get(blocked), Some(1));
		} else {
			prop_assert_eq!(verdict, Verdict::Pass);
			prop_assert_eq!(tally.get(blocked), Some(0));
		}

		prop_assert_eq!(tally.len(), 1);
	}

	#[test]
	fn any_source_octets_round_trip_through_the_store(octets in any::<[u8; 4]>()) {
		let addr = Ipv4Addr::from(octets);
		let tally = Tally::new();
		tally.insert(addr, 0);

		let frame = ipv4_frame(addr, Ipv4Addr::new(192, 0, 2, 1));
		prop_assert_eq!(classify(frame.as_slice(), &tally), Verdict::Drop);
		prop_assert_eq!(tally.get(addr), Some(1));
	}
}
