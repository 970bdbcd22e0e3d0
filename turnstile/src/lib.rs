//! Inline verdict engine for Ethernet/IPv4 frames.
//!
//! One call per received frame: parse the Ethernet header, gate on the
//! IPv4 ethertype, parse the minimum IPv4 header, look the source
//! address up in a shared blocklist, and answer [Verdict::Pass] or
//! [Verdict::Drop]. Every parse failure is fail-open -- a frame the
//! engine cannot understand is passed, never dropped.
//!
//! The engine owns no state of its own. The blocklist lives behind the
//! [Blocklist] trait so the same verdict code runs against the sharded
//! store in the `tally` crate or against a test table.

pub mod engine;
pub mod headers;
pub mod map;
pub mod packet;

pub use self::{engine::*, headers::*, map::*, packet::*};
