//! This library is the foundation for the `sonar-in` and `sonar-out` crates. It can be built
//! either with serialization support, or in a slightly more lightweight manner without it (see
//! features).
#![allow(clippy::derive_partial_eq_without_eq)]
extern crate num;
#[macro_use]
extern crate num_derive;

#[cfg(any(feature = "to_json", feature = "serde"))]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod byte_reader;
pub mod enums;
pub mod errors;
pub mod ping;
pub mod schema;
pub mod settings;
pub mod vendor_h_schema;
#[cfg(test)]
mod tests;

pub use byte_reader::ByteReader;
pub use enums::*;
pub use errors::SonarError;
pub use ping::{PingRow, RecordingSummary, VENDOR_H_UNKNOWN_I32};
pub use schema::*;
pub use settings::ConversionSettings;
pub use vendor_h_schema::{VENDOR_H_CANDIDATE_HEADER_LENS, VENDOR_H_SON_REGISTRY};

/// Vendor-L file header magic number (spec.md §6.1).
pub const VENDOR_L_MAGIC: u32 = 0xB7E9_DA86;
/// Byte offset at which Vendor-L ping frames begin, after the tag-walked file header.
pub const VENDOR_L_HEAD_BYTES: u64 = 20480;
/// Fixed length, in bytes, of a Vendor-L ping preamble.
pub const VENDOR_L_PREAMBLE_LEN: usize = 37;
/// Total frame length, in bytes, when a ping preamble's `state` field is 1 (no body).
pub const VENDOR_L_STATE1_FRAME_LEN: u64 = 49;
/// Length, in bytes, of the trailing checksum block that follows every ping body.
pub const VENDOR_L_TRAILER_LEN: u64 = 12;
/// Vendor-L outer file header's terminating tag: once seen, the tag walk stops and ping
/// frames begin at [`VENDOR_L_HEAD_BYTES`].
pub const VENDOR_L_CHANNEL_INFO_TAG: u8 = 0x37;

/// Vendor-H SON/IDX frame header magic number (spec.md §6.2).
pub const VENDOR_H_HEAD_START: u32 = 0xC0DE_22E1;
/// Fixed trailer value terminating a Vendor-H frame header.
pub const VENDOR_H_HEAD_END: u32 = 33;
/// Canonical Vendor-H SON frame header length in bytes.
pub const VENDOR_H_FRAME_HEADER_SIZE: usize = 152;
/// Fixed length, in bytes, of a Vendor-H DAT summary record.
pub const VENDOR_H_DAT_RECORD_SIZE: usize = 96;
/// `filename` field width within the DAT summary record.
pub const VENDOR_H_DAT_FILENAME_LEN: usize = 12;

/// Semi-major axis, in metres, of the spherical-Mercator-like ellipsoid Vendor-L projects
/// coordinates against (spec.md §4.5).
pub const VENDOR_L_ELLIPSOID_RADIUS_M: f64 = 6_356_752.3142;
/// Semi-major axis, in metres, of the International 1924 ellipsoid Vendor-H projects
/// coordinates against (spec.md §4.6 step 1).
pub const VENDOR_H_ELLIPSOID_RADIUS_M: f64 = 6_378_388.0;
/// Eccentricity correction factor in Vendor-H's forward projection (spec.md §4.6 step 1).
pub const VENDOR_H_LAT_CORRECTION: f64 = 1.0067642927;
/// Degrees-per-radian constant used by Vendor-H's forward projection in place of the exact
/// `180.0 / PI` (spec.md §4.6 step 1: `lat/57.2957795130823`); preserved verbatim.
pub const VENDOR_H_DEG_PER_RAD: f64 = 57.2957795130823;
