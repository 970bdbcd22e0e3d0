use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlocklistLoadError {
	#[error("couldn't read blocklist file {}", .0.display())]
	Read(PathBuf, #[source] IoError),
	#[error("couldn't parse blocklist file {}", .0.display())]
	Parse(PathBuf, #[source] toml::de::Error),
}
