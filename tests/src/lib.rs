//! # Sequencer-Inbox Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Wired handler, bus and in-memory adapters
//!     ├── flows.rs        # Poster, operator and force-inclusion flows over the bus
//!     └── properties.rs   # Property tests across both subsystems
//!
//! tests/benches/
//! └── inbox_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p si-tests
//!
//! # By category
//! cargo test -p si-tests integration::flows::
//! cargo test -p si-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p si-tests
//! ```

pub mod integration;
