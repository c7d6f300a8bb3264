//! Vendor-L reader: header discovery, ping-frame parsing and unit/enum normalization
//! (spec.md §4.2-§4.5).
pub mod discover;
pub mod normalize;
pub mod parse;
pub mod schema_registry;

pub use discover::{discover_header, VendorLFileHeader};
pub use normalize::{normalize_pings, normalize_ping};
pub use parse::{parse_pings, VendorLPingRaw};
