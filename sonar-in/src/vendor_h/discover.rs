//! Vendor-H header-length discovery (SPEC_FULL.md §4.9): a Vendor-H beam file does not
//! self-describe its frame header length the way Vendor-L's bootstrap walk does, so the
//! reader tries a small ordered list of candidates and accepts the first that validates.
use sonar_core::byte_reader::ByteReader;
use sonar_core::errors::SonarError;
use sonar_core::{VENDOR_H_CANDIDATE_HEADER_LENS, VENDOR_H_HEAD_START};

use super::parse::parse_son_header;

/// Tries each candidate header length against `son` (a beam's SON file bytes) and `idx`
/// (its parallel IDX file bytes), returning the first that satisfies all three checks in
/// SPEC_FULL.md §4.9:
///
/// (a) `head_start` magic present at offset 0,
/// (b) `head_end` sentinel present at `candidate_len - 1`,
/// (c) the IDX file's first entry's second word equals `candidate_len + ping_sample_count`
///     of the first frame.
///
/// If the SON file is empty (a beam with no pings, spec.md scenario 1), any candidate is
/// accepted vacuously since there is nothing to validate against.
pub fn discover_header_len(son: &[u8], idx: &[u8]) -> Result<u64, SonarError> {
    if son.is_empty() {
        return Ok(VENDOR_H_CANDIDATE_HEADER_LENS[0]);
    }

    if son.len() < 4 {
        return Err(SonarError::UnsupportedVariant {
            msg: "beam file too short to carry a Vendor-H frame header".to_string(),
        });
    }
    let mut magic_reader = ByteReader::new(son);
    let magic = magic_reader.read_u32_be()?;
    if magic != VENDOR_H_HEAD_START {
        return Err(SonarError::UnsupportedVariant {
            msg: "beam file does not start with the Vendor-H head_start magic (Onix variant?)"
                .to_string(),
        });
    }

    for &candidate_len in VENDOR_H_CANDIDATE_HEADER_LENS {
        if (candidate_len as usize) > son.len() {
            continue;
        }
        let mut reader = ByteReader::new(son);
        let fields = match parse_son_header(&mut reader, candidate_len) {
            Ok(f) => f,
            Err(_) => continue,
        };
        let sample_count = fields
            .get("ping_sample_count")
            .and_then(|v| v.as_i64())
            .unwrap_or(0) as u64;

        if idx.len() < 8 {
            continue;
        }
        let mut idx_reader = ByteReader::new(idx);
        let _first_time_ms = idx_reader.read_u32_be()?;
        let first_byte_len = idx_reader.read_u32_be()? as u64;

        if first_byte_len == candidate_len + sample_count {
            return Ok(candidate_len);
        }
    }

    Err(SonarError::HeaderNotDetermined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::VENDOR_H_HEAD_END;

    fn build_frame(sample_count: u32) -> Vec<u8> {
        let mut frame = vec![];
        frame.extend_from_slice(&VENDOR_H_HEAD_START.to_be_bytes());
        // Fill every tag-prefixed field with zero, in registry order, so the header is
        // exactly 152 bytes before head_end.
        for entry in sonar_core::VENDOR_H_SON_REGISTRY {
            frame.push(entry.tag);
            for desc in entry.fields {
                for _ in 0..desc.width() {
                    frame.push(0);
                }
            }
        }
        // Patch in the real sample count (tag 160, last field before head_end).
        let len = frame.len();
        frame[len - 4..len].copy_from_slice(&sample_count.to_be_bytes());
        frame.push(VENDOR_H_HEAD_END as u8);
        frame.extend(std::iter::repeat(0u8).take(sample_count as usize));
        frame
    }

    #[test]
    fn discovers_152_byte_header() {
        let frame = build_frame(40);
        let header_len = 152u64;
        let mut idx = vec![];
        idx.extend_from_slice(&0u32.to_be_bytes());
        idx.extend_from_slice(&((header_len + 40) as u32).to_be_bytes());

        assert_eq!(discover_header_len(&frame, &idx).unwrap(), 152);
    }

    #[test]
    fn empty_beam_is_accepted() {
        assert_eq!(discover_header_len(&[], &[]).unwrap(), 152);
    }

    #[test]
    fn missing_magic_is_unsupported_variant() {
        let son = vec![0u8; 200];
        let idx = vec![0u8; 8];
        assert!(matches!(
            discover_header_len(&son, &idx),
            Err(SonarError::UnsupportedVariant { .. })
        ));
    }
}
