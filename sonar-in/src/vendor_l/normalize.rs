//! Unit/Enumeration Normalizer (spec.md §4.5): turns raw Vendor-L ping fields into the
//! canonical [`PingRow`] shape shared by every downstream consumer.
//!
//! The raw-field sourcing (which tag supplies `time`, `track_cog`, etc.) is not itemized in
//! spec.md's tag table by name; SPEC_FULL.md's "Ping Raw Field Assignment" resolves the
//! mapping and that resolution is implemented here exactly.
use log::warn;
use sonar_core::enums::{frequency_band_by_code, VendorHBeam, VendorLBeam, FREQUENCY_TABLE};
use sonar_core::errors::SonarError;
use sonar_core::ping::PingRow;
use sonar_core::schema::FieldValue;
use sonar_core::VENDOR_L_ELLIPSOID_RADIUS_M;

use super::parse::VendorLPingRaw;

/// Field names consumed by the canonical mapping below; everything else in a raw ping's
/// field table is "unknown" and only kept when `export_unknown` is set.
const CANONICAL_FIELD_NAMES: &[&str] = &[
    "bottom_depth_a",
    "bottom_depth_b",
    "track_cog_bits",
    "unknown_0d_b",
    "frequency_code",
    "gps_speed_bits",
    "unknown_15_b",
    "sample_cnt",
    "scposn_lat",
    "scposn_lon",
    "beam",
];

/// Converts Vendor-L's spherical-Mercator-like projection back to WGS-84 decimal degrees
/// (spec.md §4.5).
fn vendor_l_inverse_projection(utm_e: i32, utm_n: i32) -> (f64, f64) {
    let e = utm_e as f64;
    let n = utm_n as f64;
    let lon = e / VENDOR_L_ELLIPSOID_RADIUS_M * 180.0 / std::f64::consts::PI;
    let lat = (2.0 * (n / VENDOR_L_ELLIPSOID_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2)
        * 180.0
        / std::f64::consts::PI;
    (lat, lon)
}

/// Normalizes one raw Vendor-L ping into a [`PingRow`]. `record_num` is assigned by the
/// caller from file-parse order (spec.md §3: "monotone non-negative integer"); the
/// Vendor-L -> Vendor-H Translator reassigns it later (spec.md §4.6 step 4).
pub fn normalize_ping(
    raw: &VendorLPingRaw,
    record_num: u32,
    export_unknown: bool,
) -> Result<PingRow, SonarError> {
    let time_s = raw.recording_time_ms as f64 / 1000.0;
    let time_ms = (time_s * 1000.0).round() as i64;

    let track_cog_rad = raw.field_f32_bits("track_cog_bits").unwrap_or(0.0) as f64;
    let instr_heading_deg_tenths = (track_cog_rad.to_degrees() * 10.0).round() as i32;

    let gps_speed = raw.field_f32_bits("gps_speed_bits").unwrap_or(0.0) as f64;
    let speed_dm_per_s = (gps_speed * 10.0).round() as i32;

    // SPEC_FULL.md / spec.md §9 Open Question (b): multiplying a feet value by 10 and
    // calling the result decimeters is preserved verbatim, not "fixed".
    let depth_ft = raw.field_i64("bottom_depth_b").unwrap_or(0) as f64;
    let inst_dep_dm = (depth_ft * 10.0).round() as i32;

    let utm_e_raw = raw.field_u32_bits("scposn_lon").unwrap_or(0) as i32;
    let utm_n_raw = raw.field_u32_bits("scposn_lat").unwrap_or(0) as i32;
    let (lat_deg, lon_deg) = vendor_l_inverse_projection(utm_e_raw, utm_n_raw);

    // An unrecognized channel_type is not a parse failure: the original maps it to an
    // "unknown" beam and lets a later pass drop the ping, rather than aborting the whole
    // recording (spec.md §4.6 step 3 is what actually discards it, in the Translator).
    let channel_type = raw.field_i64("beam").unwrap_or(0) as u8;
    let beam = match VendorLBeam::new(channel_type) {
        Some(vendor_l_beam) => Some(
            VendorHBeam::new(vendor_l_beam.to_vendor_h())
                .expect("VendorLBeam::to_vendor_h always yields a valid VendorHBeam"),
        ),
        None => {
            warn!(
                "vendor-l ping at offset {}: unrecognized channel_type {}, beam left unmapped",
                raw.frame_offset, channel_type
            );
            None
        }
    };

    let frequency_code = raw.field_i64("frequency_code").unwrap_or(0) as u16;
    let (frequency_khz, frequency_min_khz, frequency_max_khz) =
        match frequency_band_by_code(frequency_code) {
            Some(band) => (band.nominal_khz, band.min_khz, band.max_khz),
            None => {
                warn!(
                    "vendor-l ping at offset {}: frequency code {} out of range (table has {} entries)",
                    raw.frame_offset, frequency_code, FREQUENCY_TABLE.len()
                );
                (0, 0, 0)
            }
        };

    let ping_sample_count = raw.field_i64("sample_cnt").unwrap_or(0) as u32;
    let son_offset = (raw.data_size as u32).saturating_sub(ping_sample_count);

    let unknown = if export_unknown {
        raw.fields
            .iter()
            .filter(|(name, _)| !CANONICAL_FIELD_NAMES.contains(&name.as_str()))
            .map(|(name, value): (&String, &FieldValue)| (name.clone(), *value))
            .collect()
    } else {
        Vec::new()
    };

    Ok(PingRow {
        record_num,
        time_ms,
        utm_e: utm_e_raw,
        utm_n: utm_n_raw,
        lat_deg,
        lon_deg,
        beam,
        instr_heading_deg_tenths,
        speed_dm_per_s,
        inst_dep_dm,
        frequency_khz,
        frequency_min_khz,
        frequency_max_khz,
        ping_sample_count,
        frame_offset: raw.frame_offset,
        son_offset,
        flip_port: false,
        unknown,
    })
}

/// Normalizes every raw ping in file-parse order, assigning `record_num` from position
/// (spec.md §5: "ping rows are produced in file order by the parser").
pub fn normalize_pings(
    raw: &[VendorLPingRaw],
    export_unknown: bool,
) -> Result<Vec<PingRow>, SonarError> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| normalize_ping(r, i as u32, export_unknown))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw_ping(mut fields: HashMap<String, FieldValue>, time_ms: u32, data_size: u16) -> VendorLPingRaw {
        fields.entry("sample_cnt".to_string()).or_insert(FieldValue::U32(0));
        VendorLPingRaw {
            frame_offset: 20480,
            channel_id: 0,
            data_size,
            recording_time_ms: time_ms,
            fields,
        }
    }

    #[test]
    fn heading_radians_to_degree_tenths() {
        let mut fields = HashMap::new();
        fields.insert(
            "track_cog_bits".to_string(),
            FieldValue::U32((std::f32::consts::FRAC_PI_2).to_bits()),
        );
        fields.insert("beam".to_string(), FieldValue::U8(0));
        let raw = raw_ping(fields, 0, 0);
        let row = normalize_ping(&raw, 0, false).unwrap();
        assert_eq!(row.instr_heading_deg_tenths, 900);
    }

    #[test]
    fn frequency_label_130_210() {
        let mut fields = HashMap::new();
        fields.insert("frequency_code".to_string(), FieldValue::U16(7));
        fields.insert("beam".to_string(), FieldValue::U8(0));
        let raw = raw_ping(fields, 0, 0);
        let row = normalize_ping(&raw, 0, false).unwrap();
        assert_eq!(
            (row.frequency_khz, row.frequency_min_khz, row.frequency_max_khz),
            (170, 130, 210)
        );
    }

    #[test]
    fn depth_feet_times_ten_decimeters() {
        let mut fields = HashMap::new();
        fields.insert("bottom_depth_b".to_string(), FieldValue::U16(12));
        fields.insert("beam".to_string(), FieldValue::U8(0));
        let raw = raw_ping(fields, 0, 0);
        let row = normalize_ping(&raw, 0, false).unwrap();
        assert_eq!(row.inst_dep_dm, 120);
    }

    #[test]
    fn unknown_beam_code_is_kept_unmapped_not_errored() {
        let mut fields = HashMap::new();
        fields.insert("beam".to_string(), FieldValue::U8(200));
        let raw = raw_ping(fields, 0, 0);
        let row = normalize_ping(&raw, 0, false).unwrap();
        assert_eq!(row.beam, None);
    }

    #[test]
    fn son_offset_is_data_size_minus_sample_count() {
        let mut fields = HashMap::new();
        fields.insert("sample_cnt".to_string(), FieldValue::U32(400));
        fields.insert("beam".to_string(), FieldValue::U8(0));
        let raw = raw_ping(fields, 0, 437);
        let row = normalize_ping(&raw, 0, false).unwrap();
        assert_eq!(row.son_offset, 37);
    }
}
