use std::{sync::Arc, thread, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver};
use tally::Tally;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use turnstile::Verdict;

use crate::config::{BlocklistFile, Cli};

mod config;
mod error;
mod traffic;

fn main() -> anyhow::Result<()> {
	let config = Cli::parse();

	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let store = Arc::new(Tally::new());

	if let Some(path) = &config.blocklist {
		let file = BlocklistFile::load(path)?;
		for (addr, count) in file.blocked {
			store.insert(addr, count);
		}
	}
	for addr in &config.block {
		store.insert(*addr, 0);
	}

	let attack_share = config.attack_share.clamp(0.0, 1.0);
	if store.is_empty() && attack_share > 0.0 {
		warn!("no blocked sources configured; every frame will pass");
	}

	let worker_count = config.workers.max(1);
	info!(
		blocked = store.len(),
		workers = worker_count,
		frames = config.frames,
		"starting replay"
	);

	let (frame_tx, frame_rx) = bounded::<Vec<u8>>(1024);

	let mut workers = Vec::with_capacity(worker_count);
	for i in 0..worker_count {
		let queue = frame_rx.clone();
		let store = Arc::clone(&store);
		let handle = thread::Builder::new()
			.name(format!("rxq{i}"))
			.spawn(move || drain_queue(&queue, &store))
			.context("failed to spawn worker thread")?;
		workers.push(handle);
	}
	drop(frame_rx);

	let attack_pool: Vec<_> = store.snapshot().into_iter().map(|(addr, _)| addr).collect();
	let frames = config.frames;
	let generator = thread::spawn(move || {
		traffic::feed_frames(&frame_tx, &attack_pool, frames, attack_share);
	});

	// Operator-style tally report while the queues drain; idle ticks
	// stay quiet.
	while !workers.iter().all(|worker| worker.is_finished()) {
		thread::sleep(Duration::from_secs(config.report_interval.max(1)));

		let total = store.total_drops();
		if total > 0 {
			info!(total, "dropped so far");
		}
	}

	generator.join().expect("generator thread panicked");

	let mut passed = 0u64;
	let mut dropped = 0u64;
	for worker in workers {
		let (queue_passed, queue_dropped) = worker.join().expect("worker thread panicked");
		passed += queue_passed;
		dropped += queue_dropped;
	}

	info!(passed, dropped, "replay complete");

	let mut snap = store.snapshot();
	snap.sort_by(|a, b| b.1.cmp(&a.1));
	for (addr, count) in snap {
		if count > 0 {
			info!(%addr, count, "drop tally");
		}
	}

	Ok(())
}

/// One emulated receive queue: classify everything that arrives, count
/// the verdicts.
fn drain_queue(queue: &Receiver<Vec<u8>>, store: &Tally) -> (u64, u64) {
	let mut passed = 0;
	let mut dropped = 0;

	while let Ok(frame) = queue.recv() {
		match turnstile::classify(frame.as_slice(), store) {
			Verdict::Pass => passed += 1,
			Verdict::Drop => dropped += 1,
		}
	}

	(passed, dropped)
}
