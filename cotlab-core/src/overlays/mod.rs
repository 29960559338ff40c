//! Chart overlays computed locally from service data.
//!
//! Both units are pure functions over date-sorted slices. They keep no state
//! between calls and allocate fresh output every time.

pub mod composite;
pub mod zones;

pub use composite::{oscillation_at, reconstruct, select_active};
pub use zones::{extract, ExtractOptions, ZoneSignalExtractor};
