#![forbid(unsafe_code)]

pub mod aggregate;
pub mod countdown;
pub mod entry;
pub mod format;
pub mod model;
pub mod repeat;
pub mod time;

pub use time::Clock;
