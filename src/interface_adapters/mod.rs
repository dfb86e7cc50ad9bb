// Interface adapters: serde payloads and observer implementations.

pub mod observer;
pub mod protocol;

pub use observer::TracingObserver;
pub use protocol::SegmentSnapshot;
