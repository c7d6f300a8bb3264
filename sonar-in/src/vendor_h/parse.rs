//! Vendor-H ping parser: walks SON frames using a discovered header length, pairing each
//! frame with its IDX entry (spec.md §6.2, SPEC_FULL.md §4.9).
use std::collections::HashMap;

use sonar_core::byte_reader::ByteReader;
use sonar_core::enums::VendorHBeam;
use sonar_core::errors::SonarError;
use sonar_core::ping::PingRow;
use sonar_core::schema::{lookup_tag, read_field, FieldValue};
use sonar_core::{
    VENDOR_H_DEG_PER_RAD, VENDOR_H_ELLIPSOID_RADIUS_M, VENDOR_H_HEAD_END, VENDOR_H_HEAD_START,
    VENDOR_H_LAT_CORRECTION, VENDOR_H_SON_REGISTRY,
};

/// Inverse of Vendor-H's forward projection (spec.md §4.6 step 1: `utm_n = a*ln(tan((atan(
/// tan(lat/57.2957795130823)/1.0067642927)+pi/2)/2))`, `utm_e = a*(pi/180)*lon`), algebraically
/// inverted so `hum2normalized` can recover WGS-84 coordinates from an existing Vendor-H
/// recording. Not itemized in spec.md (which only specifies the L -> H forward direction);
/// recorded as an implementation decision in DESIGN.md.
fn vendor_h_inverse_projection(utm_e: i32, utm_n: i32) -> (f64, f64) {
    let a = VENDOR_H_ELLIPSOID_RADIUS_M;
    let lon = (utm_e as f64) * 180.0 / (a * std::f64::consts::PI);
    let u = 2.0 * ((utm_n as f64) / a).exp().atan() - std::f64::consts::FRAC_PI_2;
    let lat_rad_scaled = (u.tan() * VENDOR_H_LAT_CORRECTION).atan();
    let lat = lat_rad_scaled * VENDOR_H_DEG_PER_RAD;
    (lat, lon)
}

/// Reads one Vendor-H SON frame header starting at the reader's current position, validating
/// `head_start`/`head_end` and every tag byte against [`VENDOR_H_SON_REGISTRY`].
///
/// The tag-value walk runs until one byte remains before `candidate_len` is exhausted; that
/// final byte is read bare, as the `head_end` sentinel (spec.md: "Framing fields `head_start`
/// and `head_end` carry no tag byte").
pub fn parse_son_header(
    reader: &mut ByteReader,
    candidate_len: u64,
) -> Result<HashMap<String, FieldValue>, SonarError> {
    let start = reader.position();
    let head_start = reader.read_u32_be()?;
    if head_start != VENDOR_H_HEAD_START {
        return Err(SonarError::BadMagic {
            offset: start,
            found: head_start,
        });
    }

    let mut fields = HashMap::new();
    while (reader.position() - start) < (candidate_len as usize - 1) {
        let tag_offset = reader.position();
        let tag = reader.read_u8()?;
        let entry = lookup_tag(VENDOR_H_SON_REGISTRY, tag).ok_or(SonarError::UnknownTag {
            offset: tag_offset,
            tag,
        })?;
        for (i, desc) in entry.fields.iter().enumerate() {
            let value = read_field(reader, desc)?;
            let name = if entry.fields.len() == 1 {
                desc.name.to_string()
            } else {
                format!("{}_{}", desc.name, i)
            };
            fields.insert(name, value);
        }
    }

    let head_end = reader.read_u8()? as u32;
    if head_end != VENDOR_H_HEAD_END {
        return Err(SonarError::BadMagic {
            offset: reader.position() - 1,
            found: head_end,
        });
    }

    Ok(fields)
}

/// Walks every frame of one beam's SON bytes using `header_len`, producing one [`PingRow`]
/// per frame. Vendor-H fields are already canonical (no unit conversion is needed, unlike
/// Vendor-L), so this plays the role spec.md gives jointly to the Ping Parser and the
/// Unit/Enumeration Normalizer, for the Vendor-H source format.
pub fn parse_beam_pings(son: &[u8], header_len: u64) -> Result<Vec<PingRow>, SonarError> {
    let mut rows = Vec::new();
    let mut offset = 0u64;
    let len = son.len() as u64;

    while offset < len {
        let frame_offset = offset;
        let mut reader = ByteReader::new(son);
        reader.seek(frame_offset as usize)?;

        let fields = parse_son_header(&mut reader, header_len)?;
        let get_u32 = |name: &str| -> u32 { fields.get(name).and_then(|v| v.as_i64()).unwrap_or(0) as u32 };
        let get_i32 = |name: &str| -> i32 { fields.get(name).and_then(|v| v.as_i64()).unwrap_or(0) as i32 };

        let ping_sample_count = get_u32("ping_sample_count");
        let beam_code = fields.get("beam").and_then(|v| v.as_i64()).unwrap_or(0) as u8;
        let beam = VendorHBeam::new(beam_code).ok_or(SonarError::UnknownTag {
            offset: frame_offset as usize,
            tag: beam_code,
        })?;

        let utm_e = get_i32("utm_e");
        let utm_n = get_i32("utm_n");
        let (lat_deg, lon_deg) = vendor_h_inverse_projection(utm_e, utm_n);

        let row = PingRow {
            record_num: get_u32("record_num"),
            time_ms: get_u32("time_ms") as i64,
            utm_e,
            utm_n,
            lat_deg,
            lon_deg,
            beam: Some(beam),
            instr_heading_deg_tenths: get_u32("instr_heading") as i32,
            speed_dm_per_s: get_u32("speed_dm") as i32,
            inst_dep_dm: get_i32("inst_dep_dm"),
            frequency_khz: get_u32("frequency_khz"),
            frequency_min_khz: get_u32("f_min"),
            frequency_max_khz: get_u32("f_max"),
            ping_sample_count,
            frame_offset,
            son_offset: header_len as u32,
            flip_port: false,
            unknown: Vec::new(),
        };

        let next_offset = frame_offset + header_len + ping_sample_count as u64;
        if next_offset > len {
            return Err(SonarError::TruncatedFrame {
                offset: frame_offset as usize,
            });
        }
        rows.push(row);
        offset = next_offset;
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::VENDOR_H_SON_REGISTRY as REG;

    fn build_frame(sample_count: u32, record_num: u32) -> Vec<u8> {
        let mut frame = vec![];
        frame.extend_from_slice(&VENDOR_H_HEAD_START.to_be_bytes());
        for entry in REG {
            frame.push(entry.tag);
            for desc in entry.fields {
                let bytes = vec![0u8; desc.width()];
                frame.extend_from_slice(&bytes);
            }
        }
        let len = frame.len();
        frame[len - 4..len].copy_from_slice(&sample_count.to_be_bytes());
        frame.push(VENDOR_H_HEAD_END as u8);
        // patch record_num: it's the first tagged field, at offset 4 (tag) + 1 = 5.
        frame[5..9].copy_from_slice(&record_num.to_be_bytes());
        frame.extend(std::iter::repeat(0u8).take(sample_count as usize));
        frame
    }

    #[test]
    fn parses_one_frame() {
        let son = build_frame(40, 7);
        let rows = parse_beam_pings(&son, 152).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record_num, 7);
        assert_eq!(rows[0].ping_sample_count, 40);
        assert_eq!(rows[0].son_offset, 152);
    }

    #[test]
    fn empty_beam_has_no_rows() {
        assert!(parse_beam_pings(&[], 152).unwrap().is_empty());
    }
}
