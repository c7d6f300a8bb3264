//! Writers for recreational sonar logs: the Vendor-L -> Vendor-H Translator (spec.md §4.6),
//! the Vendor-H binary Emitter (spec.md §4.7) and the normalized metadata CSV Emitter
//! (spec.md §4.8).
//!
//! This crate only writes; the two source-format readers live in `sonar-in`, and the three
//! pure entry points that wire a reader to a writer live in `sonar-convert`.
extern crate num;

pub mod csv_emit;
pub mod emit_hum;
pub mod translate;

pub use csv_emit::{emit_metadata_csv_parallel, write_beam_csv};
pub use emit_hum::emit_vendor_h;
pub use translate::{synthesize_summary, translate_to_vendor_h};
