//! Ping Parser (L): iterates ping frames from the boot offset to EOF (spec.md §4.4).
use std::collections::HashMap;

use sonar_core::byte_reader::ByteReader;
use sonar_core::errors::SonarError;
use sonar_core::schema::{lookup_tag, read_field, FieldValue};
use sonar_core::{VENDOR_L_MAGIC, VENDOR_L_PREAMBLE_LEN, VENDOR_L_STATE1_FRAME_LEN, VENDOR_L_TRAILER_LEN};

use super::schema_registry::{PING_BODY_MAX_FIELDS, PING_BODY_REGISTRY};

/// One raw, not-yet-normalized Vendor-L ping: the preamble fields plus whichever outer body
/// tags this recording's frames declared.
#[derive(Debug, Clone)]
pub struct VendorLPingRaw {
    pub frame_offset: u64,
    pub channel_id: u8,
    pub data_size: u16,
    pub recording_time_ms: u32,
    pub fields: HashMap<String, FieldValue>,
}

impl VendorLPingRaw {
    pub fn field_i64(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(|v| v.as_i64())
    }

    pub fn field_f32_bits(&self, name: &str) -> Option<f32> {
        self.fields.get(name).and_then(|v| v.bits_as_f32())
    }

    /// Returns the raw unsigned 32-bit bit pattern stored for `name`, regardless of whether
    /// it was declared as a signed or unsigned field. Used to reinterpret `scposn_lat`/
    /// `scposn_lon` as signed coordinates (SPEC_FULL.md "Ping Raw Field Assignment").
    pub fn field_u32_bits(&self, name: &str) -> Option<u32> {
        match self.fields.get(name)? {
            FieldValue::U32(v) => Some(*v),
            FieldValue::I32(v) => Some(*v as u32),
            _ => None,
        }
    }
}

/// Walks every ping frame in `data` from `boot_offset` to EOF.
///
/// A `state == 1` frame carries no body; it is skipped (49 bytes total) and contributes no
/// row, per spec.md §4.4 step 2 / scenario 5.
pub fn parse_pings(data: &[u8], boot_offset: u64) -> Result<Vec<VendorLPingRaw>, SonarError> {
    let mut rows = Vec::new();
    let mut offset = boot_offset;
    let len = data.len() as u64;

    while offset < len {
        let frame_offset = offset;
        let mut reader = ByteReader::new(data);
        reader.seek(frame_offset as usize)?;

        if reader.remaining() < VENDOR_L_PREAMBLE_LEN {
            return Err(SonarError::TruncatedFrame {
                offset: frame_offset as usize,
            });
        }

        let _fcnt = reader.read_u8()?;
        let _fpf_0 = reader.read_u8()?;
        let magic = reader.read_u32_le()?;
        if magic != VENDOR_L_MAGIC {
            return Err(SonarError::BadMagic {
                offset: frame_offset as usize,
                found: magic,
            });
        }
        let _fpf_1 = reader.read_u8()?;
        let _fpf_1_len = reader.read_u8()?;
        let _fpf_1_fcnt = reader.read_u8()?;
        let _fps_0 = reader.read_u8()?;
        let state = reader.read_u8()?;
        let _fps_1 = reader.read_u8()?;
        let _data_info_cnt = reader.read_u8()?;
        let _data_info_len = reader.read_u8()?;
        let channel_id = reader.read_u8()?;
        let _marker_14 = reader.read_u8()?;
        let _sequence_cnt = reader.read_u32_le()?;
        let _marker_1c = reader.read_u8()?;
        let _data_crc = reader.read_u32_le()?;
        let _marker_22 = reader.read_u8()?;
        let data_size = reader.read_u16_le()?;
        let _marker_2c = reader.read_u8()?;
        let recording_time_ms = reader.read_u32_le()?;
        let _record_crc = reader.read_u32_le()?;

        if state == 1 {
            offset = frame_offset + VENDOR_L_STATE1_FRAME_LEN;
            continue;
        }

        let field_cnt = reader.read_u8()?;
        let known_field_cnt = field_cnt.min(PING_BODY_MAX_FIELDS);
        let mut fields = HashMap::new();
        for _ in 0..known_field_cnt {
            let tag_offset = reader.position();
            let tag = reader.read_u8()?;
            let entry = lookup_tag(PING_BODY_REGISTRY, tag).ok_or(SonarError::UnknownTag {
                offset: tag_offset,
                tag,
            })?;
            for (i, desc) in entry.fields.iter().enumerate() {
                let value = read_field(&mut reader, desc)?;
                fields.insert(
                    if entry.fields.len() == 1 {
                        desc.name.to_string()
                    } else {
                        format!("{}_{}", desc.name, i)
                    },
                    value,
                );
            }
        }
        // An appended beam-info composite (field_cnt > 13) has no documented field widths
        // (spec.md Open Question (c): this overlaps the partially-sketched Vendor-G reader).
        // Its contents are not needed for any normalized column, and the next frame offset is
        // computed from `data_size` below rather than from the cursor, so it is safe to not
        // walk it byte-exactly.

        let next_offset = frame_offset
            + VENDOR_L_PREAMBLE_LEN as u64
            + data_size as u64
            + VENDOR_L_TRAILER_LEN;
        if next_offset > len {
            return Err(SonarError::TruncatedFrame {
                offset: frame_offset as usize,
            });
        }

        rows.push(VendorLPingRaw {
            frame_offset,
            channel_id,
            data_size,
            recording_time_ms,
            fields,
        });

        offset = next_offset;
    }

    Ok(rows)
}
