//! Header-Structure Discoverer (L): walks the tag-prefixed file header (spec.md §4.3).
use sonar_core::byte_reader::ByteReader;
use sonar_core::errors::SonarError;
use sonar_core::schema::{lookup_tag, read_field};
use sonar_core::VENDOR_L_CHANNEL_INFO_TAG;

use super::schema_registry::{FILE_HEADER_REGISTRY, FILE_INFO_REGISTRY};

/// The derived file header: device identity and the wall-clock recording-start timestamp.
#[derive(Debug, Clone, Default)]
pub struct VendorLFileHeader {
    pub header_fcnt: u8,
    pub magic_number: Option<u32>,
    pub format_version: Option<u16>,
    pub channel_count: Option<u32>,
    pub max_channel_count: Option<u8>,
    pub sw_version: Option<u16>,
    pub device_id: Option<u32>,
    pub product_number: Option<u16>,
    pub recording_start_epoch: Option<u32>,
}

/// Walks the file header starting at offset 0, stopping once the channel-information tag
/// (`0x37`) is reached. Its body is not parsed; the first ping frame begins at the fixed
/// boot offset regardless of where the walk stops.
pub fn discover_header(reader: &mut ByteReader) -> Result<VendorLFileHeader, SonarError> {
    let mut header = VendorLFileHeader {
        header_fcnt: reader.read_u8()?,
        ..Default::default()
    };

    loop {
        let offset = reader.position();
        let tag = reader.read_u8()?;
        if tag == VENDOR_L_CHANNEL_INFO_TAG {
            break;
        }
        if tag == 0x2F {
            let _length = reader.read_u8()?;
            let field_count = reader.read_u8()?;
            for _ in 0..field_count {
                let inner_offset = reader.position();
                let inner_tag = reader.read_u8()?;
                let entry = lookup_tag(FILE_INFO_REGISTRY, inner_tag).ok_or(SonarError::UnknownTag {
                    offset: inner_offset,
                    tag: inner_tag,
                })?;
                let value = read_field(reader, &entry.fields[0])?.as_i64().unwrap_or(0);
                match inner_tag {
                    0x02 => header.sw_version = Some(value as u16),
                    0x0C => header.device_id = Some(value as u32),
                    0x12 => header.product_number = Some(value as u16),
                    0x1C => header.recording_start_epoch = Some(value as u32),
                    _ => unreachable!("inner_tag validated against FILE_INFO_REGISTRY"),
                }
            }
            continue;
        }
        let entry = lookup_tag(FILE_HEADER_REGISTRY, tag).ok_or(SonarError::UnknownTag { offset, tag })?;
        let value = read_field(reader, &entry.fields[0])?.as_i64().unwrap_or(0);
        match tag {
            0x04 => header.magic_number = Some(value as u32),
            0x0A => header.format_version = Some(value as u16),
            0x14 => header.channel_count = Some(value as u32),
            0x19 => header.max_channel_count = Some(value as u8),
            _ => unreachable!("tag validated against FILE_HEADER_REGISTRY"),
        }
    }

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_tag_u32(buf: &mut Vec<u8>, tag: u8, v: u32) {
        buf.push(tag);
        buf.extend_from_slice(&v.to_le_bytes());
    }

    #[test]
    fn walks_until_channel_info_tag() {
        let mut buf = vec![3u8]; // header_fcnt
        push_tag_u32(&mut buf, 0x04, 0xB7E9_DA86);
        buf.push(0x0A);
        buf.extend_from_slice(&1u16.to_le_bytes());
        push_tag_u32(&mut buf, 0x14, 2);
        buf.push(VENDOR_L_CHANNEL_INFO_TAG);

        let mut reader = ByteReader::new(&buf);
        let header = discover_header(&mut reader).unwrap();
        assert_eq!(header.header_fcnt, 3);
        assert_eq!(header.magic_number, Some(0xB7E9_DA86));
        assert_eq!(header.channel_count, Some(2));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let buf = vec![0u8, 0xAA];
        let mut reader = ByteReader::new(&buf);
        assert!(matches!(
            discover_header(&mut reader),
            Err(SonarError::UnknownTag { tag: 0xAA, .. })
        ));
    }
}
