//! Readers for recreational sonar logs: Vendor-L's tag-discovered variable-layout binary log
//! and Vendor-H's tag-prefixed big-endian binary log plus its companion index file
//! (spec.md §2, components 1-5, plus the added Vendor-H reader of SPEC_FULL.md §4.9).
//!
//! This crate only reads; the L -> H translation and both emitters (Vendor-H binary,
//! normalized metadata CSV) live in `sonar-out`.
pub mod memory_map;
pub mod vendor_h;
pub mod vendor_l;

use std::path::Path;

use sonar_core::errors::SonarError;
use sonar_core::ping::PingRow;

use memory_map::MappedFile;
use vendor_l::{discover_header, normalize_pings, parse_pings, VendorLFileHeader};

/// A fully parsed and normalized Vendor-L recording: the discovered file header (carrying
/// the wall-clock recording-start timestamp the Translator needs) and every ping, already
/// through the Unit/Enumeration Normalizer.
pub struct VendorLRecording {
    pub header: VendorLFileHeader,
    pub pings: Vec<PingRow>,
}

/// Opens, discovers and parses a Vendor-L file in one call: the pipeline of spec.md §2's
/// Reader -> Discoverer -> Parser -> Normalizer stages.
pub fn read_vendor_l(path: &Path, export_unknown: bool) -> Result<VendorLRecording, SonarError> {
    let mapped = MappedFile::open(path)?;
    let data = mapped.as_slice();

    let mut header_reader = sonar_core::byte_reader::ByteReader::new(data);
    let header = discover_header(&mut header_reader)?;

    let raw = parse_pings(data, sonar_core::VENDOR_L_HEAD_BYTES)?;
    let pings = normalize_pings(&raw, export_unknown)?;

    Ok(VendorLRecording { header, pings })
}

/// Reads one Vendor-H beam's pings, given its `.SON` and `.IDX` file paths. Missing files
/// (a beam with no pings, spec.md §6.2) yield an empty row list rather than an error.
pub fn read_vendor_h_beam(son_path: &Path, idx_path: &Path) -> Result<Vec<PingRow>, SonarError> {
    if !son_path.exists() {
        return Ok(Vec::new());
    }
    let son = MappedFile::open(son_path)?;
    let idx = if idx_path.exists() {
        MappedFile::open(idx_path)?
    } else {
        return Err(SonarError::HeaderNotDetermined);
    };

    let header_len = vendor_h::discover_header_len(son.as_slice(), idx.as_slice())?;
    vendor_h::parse_beam_pings(son.as_slice(), header_len)
}

/// The conventional Vendor-H beam file stem (`B000`..`B004`), indexed by canonical beam id
/// (spec.md §6.2).
pub fn vendor_h_beam_stem(beam_id: u8) -> String {
    format!("B{:03}", beam_id)
}
