//! Cadence command line tool
//!
//! Library half of the `cadence` binary: configuration loading, the
//! simulated audio device and the playback rehearsal driven over it.

pub mod config;
pub mod device;
pub mod rehearsal;
