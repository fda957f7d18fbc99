// Common utilities and constants shared across the engine

pub mod constants;
pub mod utils;
