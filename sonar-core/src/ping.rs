//! The normalized ping-attribute row and per-recording summary, shared by every reader,
//! writer and translator.
use crate::enums::VendorHBeam;
use crate::schema::FieldValue;

/// Vendor-H fields with no Vendor-L source are stamped with this sentinel
/// (spec.md §9 "Sentinel constants").
pub const VENDOR_H_UNKNOWN_I32: i32 = -1582119980;

/// One normalized ping: the semantic fields spec.md §3 calls the "ping attribute row",
/// already through the Unit/Enumeration Normalizer (so `beam` is canonical, headings are
/// degree-tenths, etc).
#[derive(Debug, Clone)]
pub struct PingRow {
    /// Unique within a recording; monotone before translation, reassigned as a dense
    /// `0..numrecords` permutation after translation.
    pub record_num: u32,
    /// Milliseconds since the start of the recording.
    pub time_ms: i64,
    /// Projected easting in the source vendor's own coordinate system.
    pub utm_e: i32,
    /// Projected northing in the source vendor's own coordinate system.
    pub utm_n: i32,
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// Canonical beam: {low-freq-down=0, high-freq-down=1, port-ss=2, star-ss=3,
    /// down-image=4, combined-ss=5} (spec.md §3), which is also Vendor-H's own numbering.
    /// `None` when the source recording's raw channel/beam code has no canonical mapping
    /// (spec.md §4.6 step 3: "rows whose beam id is not in the canonical set are
    /// discarded") — the row is kept through normalization so the Translator's drop step,
    /// not the Normalizer, is what removes it.
    pub beam: Option<VendorHBeam>,
    pub instr_heading_deg_tenths: i32,
    pub speed_dm_per_s: i32,
    pub inst_dep_dm: i32,
    pub frequency_khz: u32,
    pub frequency_min_khz: u32,
    pub frequency_max_khz: u32,
    pub ping_sample_count: u32,
    /// Absolute byte offset of the frame's start in the source file.
    pub frame_offset: u64,
    /// Offset within the frame, from `frame_offset`, at which the sample payload begins.
    pub son_offset: u32,
    /// Set during the sidescan split (spec.md §4.6 step 2); governs whether the payload
    /// bytes must be reversed on emission.
    pub flip_port: bool,
    /// Raw fields with no canonical projection, kept only when
    /// `ConversionSettings::export_unknown` is set (spec.md §4.8).
    pub unknown: Vec<(String, FieldValue)>,
}

impl PingRow {
    /// Halves `ping_sample_count`, used by the sidescan split (spec.md §4.6 step 2). Returns
    /// the halved sample count so the caller can compute the starboard row's `son_offset`
    /// shift without re-deriving it.
    pub fn halved_sample_count(&self) -> u32 {
        self.ping_sample_count / 2
    }
}

/// Vendor-H's per-recording summary ("DAT") record (spec.md §3, §6.2).
#[derive(Debug, Clone)]
pub struct RecordingSummary {
    pub sp1: u8,
    pub water_code: u8,
    pub sp2: u8,
    pub unknown_1: u8,
    pub sonar_name: u32,
    pub unknown_2: u32,
    pub unknown_3: u32,
    pub unknown_4: u32,
    pub unix_time: u32,
    pub utm_e: i32,
    pub utm_n: i32,
    /// Space-padded to exactly 12 ASCII bytes on write.
    pub filename: String,
    pub numrecords: u32,
    pub recordlens_ms: u32,
    pub linesize: u32,
    pub unknown_5: u32,
    pub unknown_6: u32,
    pub unknown_7: u32,
    pub unknown_8: u32,
    pub unknown_9: u32,
    pub unknown_10: i32,
    pub unknown_11: i32,
    pub unknown_12: i32,
    pub unknown_13: i32,
    pub unknown_14: i32,
}

impl RecordingSummary {
    /// A summary with every constant field stamped per spec.md §6.2 and every
    /// recording-derived field zeroed; callers fill in the derived fields during synthesis.
    pub fn new_with_defaults() -> Self {
        RecordingSummary {
            sp1: 195,
            water_code: 1,
            sp2: 125,
            unknown_1: 1,
            sonar_name: 1029,
            unknown_2: 11,
            unknown_3: 0,
            unknown_4: 0,
            unix_time: 0,
            utm_e: 0,
            utm_n: 0,
            filename: String::new(),
            numrecords: 0,
            recordlens_ms: 0,
            linesize: 0,
            unknown_5: 5,
            unknown_6: 30,
            unknown_7: 1029,
            unknown_8: 1029,
            unknown_9: 0,
            unknown_10: VENDOR_H_UNKNOWN_I32,
            unknown_11: VENDOR_H_UNKNOWN_I32,
            unknown_12: VENDOR_H_UNKNOWN_I32,
            unknown_13: VENDOR_H_UNKNOWN_I32,
            unknown_14: VENDOR_H_UNKNOWN_I32,
        }
    }
}
