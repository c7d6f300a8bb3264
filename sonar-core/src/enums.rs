//! Enumerations shared across vendor formats: beams and frequency bands.
use num::FromPrimitive;
#[cfg(any(feature = "to_json", feature = "serde"))]
use serde::{Deserialize, Serialize};

/// A sonar channel, in Vendor-L's `channel_type`/`beam` numbering (0-5).
///
/// This is the *source* numbering used while a ping is still in Vendor-L form; see
/// [`VendorHBeam`] for the crosswalk used once a ping has been translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum VendorLBeam {
    Primary = 0,
    Secondary = 1,
    DownScan = 2,
    Port = 3,
    Star = 4,
    SideScan = 5,
}

impl VendorLBeam {
    pub fn new(code: u8) -> Option<Self> {
        FromPrimitive::from_u8(code)
    }

    /// Crosswalks a Vendor-L beam number to its Vendor-H channel number.
    ///
    /// `{0:0, 1:1, 2:4, 3:2, 4:3, 5:5}`, per SPEC_FULL.md / the original conversion source.
    pub fn to_vendor_h(self) -> u8 {
        use VendorLBeam::*;
        match self {
            Primary => 0,
            Secondary => 1,
            DownScan => 4,
            Port => 2,
            Star => 3,
            SideScan => 5,
        }
    }
}

/// A sonar channel, in Vendor-H's beam numbering.
///
/// After a sidescan (`VendorLBeam::SideScan`) ping is split, its halves become
/// [`VendorHBeam::Port`] and [`VendorHBeam::Star`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum VendorHBeam {
    Primary = 0,
    Secondary = 1,
    Port = 2,
    Star = 3,
    DownScan = 4,
    SideScan = 5,
}

impl VendorHBeam {
    pub fn new(code: u8) -> Option<Self> {
        FromPrimitive::from_u8(code)
    }
}

/// One entry of the frequency label table (spec.md §6.3): a human label plus the nominal,
/// minimum and maximum frequency in kHz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub label: &'static str,
    pub nominal_khz: u32,
    pub min_khz: u32,
    pub max_khz: u32,
}

/// The ordered frequency table. A Vendor-L recording's `frequency` raw field (see
/// SPEC_FULL.md's "Ping Raw Field Assignment") is used as an index into this table.
pub const FREQUENCY_TABLE: &[FrequencyBand] = &[
    FrequencyBand { label: "200kHz", nominal_khz: 200, min_khz: 200, max_khz: 200 },
    FrequencyBand { label: "50kHz", nominal_khz: 50, min_khz: 50, max_khz: 50 },
    FrequencyBand { label: "83kHz", nominal_khz: 83, min_khz: 83, max_khz: 83 },
    FrequencyBand { label: "455kHz", nominal_khz: 455, min_khz: 455, max_khz: 455 },
    FrequencyBand { label: "800kHz", nominal_khz: 800, min_khz: 800, max_khz: 800 },
    FrequencyBand { label: "38kHz", nominal_khz: 38, min_khz: 38, max_khz: 38 },
    FrequencyBand { label: "28kHz", nominal_khz: 28, min_khz: 28, max_khz: 28 },
    FrequencyBand { label: "130kHz_210kHz", nominal_khz: 170, min_khz: 130, max_khz: 210 },
    FrequencyBand { label: "90kHz_150kHz", nominal_khz: 120, min_khz: 90, max_khz: 150 },
    FrequencyBand { label: "40kHz_60kHz", nominal_khz: 50, min_khz: 40, max_khz: 60 },
    FrequencyBand { label: "25kHz_45kHz", nominal_khz: 35, min_khz: 25, max_khz: 45 },
];

/// Looks up a frequency band by its table index (the Vendor-L `frequency` raw code).
pub fn frequency_band_by_code(code: u16) -> Option<&'static FrequencyBand> {
    FREQUENCY_TABLE.get(code as usize)
}
