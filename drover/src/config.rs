use std::{
	collections::HashMap,
	net::Ipv4Addr,
	path::{Path, PathBuf},
};

use clap::Parser;
use serde::Deserialize;

use crate::error::BlocklistLoadError;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
	#[clap(value_parser, long, short = 'b', num_args = 1..)]
	/// IPv4 source address[es] to block before traffic starts.
	pub block: Vec<Ipv4Addr>,

	#[clap(value_parser, long)]
	/// TOML file of blocked sources and their starting tallies.
	///
	/// Entries live under a `[blocked]` table, one `"addr" = count` pair
	/// per line. Addresses given with `--block` start at zero.
	pub blocklist: Option<PathBuf>,

	#[clap(value_parser, long, default_value_t = 4)]
	/// Number of worker threads emulating hardware receive queues.
	pub workers: usize,

	#[clap(value_parser, long, default_value_t = 100_000)]
	/// Total number of frames to synthesise.
	pub frames: usize,

	#[clap(value_parser, long, default_value_t = 0.3)]
	/// Likelihood that a synthesised frame comes from a blocked source.
	///
	/// Clamped to [0, 1]. The remainder of the traffic is benign IPv4
	/// with the odd ARP or runt frame mixed in.
	pub attack_share: f64,

	#[clap(value_parser, long, default_value_t = 2)]
	/// Seconds between drop-tally reports while traffic is flowing.
	pub report_interval: u64,
}

/// On-disk blocklist: address to starting tally.
#[derive(Debug, Default, Deserialize)]
pub struct BlocklistFile {
	#[serde(default)]
	pub blocked: HashMap<Ipv4Addr, u64>,
}

impl BlocklistFile {
	pub fn load(path: &Path) -> Result<Self, BlocklistLoadError> {
		let text = std::fs::read_to_string(path)
			.map_err(|e| BlocklistLoadError::Read(path.to_owned(), e))?;

		toml::from_str(&text).map_err(|e| BlocklistLoadError::Parse(path.to_owned(), e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cli_definition_is_consistent() {
		use clap::CommandFactory;

		Cli::command().debug_assert();
	}

	#[test]
	fn blocklist_file_round_trips() {
		let parsed: BlocklistFile = toml::from_str(
			r#"
[blocked]
"10.0.0.2" = 0
"203.0.113.7" = 3
"#,
		)
		.unwrap();

		assert_eq!(parsed.blocked.len(), 2);
		assert_eq!(parsed.blocked[&Ipv4Addr::new(10, 0, 0, 2)], 0);
		assert_eq!(parsed.blocked[&Ipv4Addr::new(203, 0, 113, 7)], 3);
	}

	#[test]
	fn missing_blocked_table_means_empty() {
		let parsed: BlocklistFile = toml::from_str("").unwrap();

		assert!(parsed.blocked.is_empty());
	}
}
