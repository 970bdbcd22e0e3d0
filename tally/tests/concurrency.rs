use std::{net::Ipv4Addr, sync::Arc, thread};

use tally::Tally;
use turnstile::{classify, Verdict};

mod common;

use common::ipv4_frame;

const DST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

#[test]
fn concurrent_drops_lose_no_increments() {
	const THREADS: u64 = 8;
	const FRAMES_PER_THREAD: u64 = 2_000;

	let blocked = Ipv4Addr::new(10, 0, 0, 5);
	let tally = Arc::new(Tally::new());
	tally.insert(blocked, 3);

	let frame = ipv4_frame(blocked, DST);

	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let tally = Arc::clone(&tally);
			let frame = frame.clone();
			thread::spawn(move || {
				for _ in 0..FRAMES_PER_THREAD {
					assert_eq!(classify(frame.as_slice(), &*tally), Verdict::Drop);
				}
			})
		})
		.collect();

	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(tally.get(blocked), Some(3 + THREADS * FRAMES_PER_THREAD));
}

#[test]
fn parallel_queues_keep_tallies_separate() {
	const FRAMES_PER_THREAD: u64 = 1_000;

	let sources = [
		Ipv4Addr::new(10, 0, 0, 1),
		Ipv4Addr::new(10, 0, 0, 2),
		Ipv4Addr::new(10, 0, 0, 3),
		Ipv4Addr::new(10, 0, 0, 4),
	];

	let tally = Arc::new(Tally::new());
	for (i, src) in sources.iter().enumerate() {
		tally.insert(*src, i as u64);
	}

	let handles: Vec<_> = sources
		.iter()
		.map(|src| {
			let tally = Arc::clone(&tally);
			let frame = ipv4_frame(*src, DST);
			thread::spawn(move || {
				for _ in 0..FRAMES_PER_THREAD {
					assert_eq!(classify(frame.as_slice(), &*tally), Verdict::Drop);
				}
			})
		})
		.collect();

	for handle in handles {
		handle.join().unwrap();
	}

	for (i, src) in sources.iter().enumerate() {
		assert_eq!(tally.get(*src), Some(i as u64 + FRAMES_PER_THREAD));
	}
}

#[test]
fn mixed_traffic_under_contention_only_tallies_hits() {
	const THREADS: u64 = 4;
	const ROUNDS: u64 = 1_000;

	let blocked = Ipv4Addr::new(10, 0, 0, 5);
	let benign = Ipv4Addr::new(198, 51, 100, 23);
	let tally = Arc::new(Tally::new());
	tally.insert(blocked, 0);

	let hot = ipv4_frame(blocked, DST);
	let cold = ipv4_frame(benign, DST);

	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let tally = Arc::clone(&tally);
			let hot = hot.clone();
			let cold = cold.clone();
			thread::spawn(move || {
				for _ in 0..ROUNDS {
					assert_eq!(classify(hot.as_slice(), &*tally), Verdict::Drop);
					assert_eq!(classify(cold.as_slice(), &*tally), Verdict::Pass);
				}
			})
		})
		.collect();

	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(tally.get(blocked), Some(THREADS * ROUNDS));
	assert_eq!(tally.len(), 1);
	assert_eq!(tally.total_drops(), THREADS * ROUNDS);
}
