pub mod time;

pub use self::time::{format_timestamp, now_timestamp, TimestampError};
