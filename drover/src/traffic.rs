use std::net::Ipv4Addr;

use crossbeam_channel::Sender;
use rand::{seq::SliceRandom, Rng};

/// Benign source pool (TEST-NET-2).
const BENIGN_SOURCES: [Ipv4Addr; 4] = [
	Ipv4Addr::new(198, 51, 100, 7),
	Ipv4Addr::new(198, 51, 100, 23),
	Ipv4Addr::new(198, 51, 100, 101),
	Ipv4Addr::new(198, 51, 100, 200),
];

const DST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

/// Synthesise `frames` frames and feed them down the queue.
///
/// Attack frames are sourced from `attack_pool`; the rest is benign
/// IPv4 seasoned with ARP and runt frames so the fail-open path sees
/// traffic too. Stops early if every worker has hung up.
pub fn feed_frames(
	queue: &Sender<Vec<u8>>,
	attack_pool: &[Ipv4Addr],
	frames: usize,
	attack_share: f64,
) {
	let mut rng = rand::thread_rng();

	for _ in 0..frames {
		let frame = match attack_pool.choose(&mut rng) {
			Some(&src) if rng.gen_bool(attack_share) => ipv4_frame(src, DST),
			_ => match rng.gen_range(0..20u8) {
				0 => arp_frame(),
				1 => runt_frame(&mut rng),
				_ => {
					let src = BENIGN_SOURCES[rng.gen_range(0..BENIGN_SOURCES.len())];
					ipv4_frame(src, DST)
				},
			},
		};

		if queue.send(frame).is_err() {
			break;
		}
	}
}

/// Untagged Ethernet header carrying `ethertype`, no payload.
fn ethernet_header(ethertype: u16) -> Vec<u8> {
	let mut frame = vec![];
	frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 1]);
	frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 2]);
	frame.extend_from_slice(&ethertype.to_be_bytes());
	frame
}

/// Untagged Ethernet header plus a 20-byte IPv4 header, no payload.
pub fn ipv4_frame(src: Ipv4Addr, dst: Ipv4Addr) -> Vec<u8> {
	let mut frame = ethernet_header(0x0800);

	frame.push(0x45);
	frame.push(0);
	frame.extend_from_slice(&20u16.to_be_bytes());
	frame.extend_from_slice(&[0, 0, 0x40, 0]);
	frame.push(64);
	frame.push(17);
	frame.extend_from_slice(&[0, 0]);
	frame.extend_from_slice(&src.octets());
	frame.extend_from_slice(&dst.octets());
	frame
}

/// Broadcast ARP request; the filter should wave these through.
pub fn arp_frame() -> Vec<u8> {
	let mut frame = vec![];
	frame.extend_from_slice(&[0xff; 6]);
	frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 2]);
	frame.extend_from_slice(&0x0806u16.to_be_bytes());
	frame.extend_from_slice(&[0; 28]);
	frame
}

/// Truncated junk shorter than an Ethernet header.
pub fn runt_frame(rng: &mut impl Rng) -> Vec<u8> {
	let len = rng.gen_range(0..14);
	(0..len).map(|_| rng.gen()).collect()
}
