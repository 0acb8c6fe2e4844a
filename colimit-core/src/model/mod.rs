//! Road segments carrying speed limit information
//!
//! A [`Way`] binds an ordered polyline of [`Location`](crate::Location)s to
//! the graph nodes it passes and to its limit metadata.

mod contains;
mod record;
mod way;

pub use contains::Containable;
pub use record::WayRecord;
pub use way::{Way, WayBuilder};
