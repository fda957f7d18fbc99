// Time abstractions

pub mod source;

pub use source::{RealTimeSource, TimeSource};

#[cfg(any(test, feature = "testing-support"))]
pub use source::FixedTimeSource;
