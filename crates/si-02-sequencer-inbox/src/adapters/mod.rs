//! In-memory adapters for the Sequencer Inbox outbound ports.
//!
//! Interior mutability lets a test or an embedding node drive the outside
//! world (new delayed messages, block progress) while the service holds a
//! shared handle.

pub mod delayed_queue;
pub mod host;
pub mod posters;

pub use delayed_queue::InMemoryDelayedQueue;
pub use host::ManualHost;
pub use posters::StaticPosterRegistry;
