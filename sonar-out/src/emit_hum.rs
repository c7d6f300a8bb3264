//! Vendor-H Emitter (spec.md §4.7): writes the summary ("DAT") record, one frame file and one
//! index file per beam, and streams each frame's sample payload from the source recording.
use std::fs::{self, File};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use num::ToPrimitive;
use sonar_core::enums::VendorHBeam;
use sonar_core::errors::SonarError;
use sonar_core::ping::{PingRow, RecordingSummary};
use sonar_core::schema::write_field;
use sonar_core::settings::ConversionSettings;
use sonar_core::{VENDOR_H_HEAD_END, VENDOR_H_HEAD_START, VENDOR_H_SON_REGISTRY};

/// The five canonical Vendor-H beam ids, in the fixed file-naming order of spec.md §6.2.
const BEAM_IDS: [VendorHBeam; 5] = [
    VendorHBeam::Primary,
    VendorHBeam::Secondary,
    VendorHBeam::Port,
    VendorHBeam::Star,
    VendorHBeam::DownScan,
];

fn beam_stem(beam: VendorHBeam) -> String {
    format!("B{:03}", beam.to_u8().unwrap_or(0))
}

/// Writes the little-endian 96-byte DAT summary record (spec.md §6.2).
fn summary_as_bytes(summary: &RecordingSummary) -> Vec<u8> {
    let mut out = Vec::with_capacity(96);
    out.push(summary.sp1);
    out.push(summary.water_code);
    out.push(summary.sp2);
    out.push(summary.unknown_1);
    out.extend_from_slice(&summary.sonar_name.to_le_bytes());
    out.extend_from_slice(&summary.unknown_2.to_le_bytes());
    out.extend_from_slice(&summary.unknown_3.to_le_bytes());
    out.extend_from_slice(&summary.unknown_4.to_le_bytes());
    out.extend_from_slice(&summary.unix_time.to_le_bytes());
    out.extend_from_slice(&summary.utm_e.to_le_bytes());
    out.extend_from_slice(&summary.utm_n.to_le_bytes());
    let mut filename = summary.filename.as_bytes().to_vec();
    filename.resize(12, b' ');
    out.extend_from_slice(&filename[..12]);
    out.extend_from_slice(&summary.numrecords.to_le_bytes());
    out.extend_from_slice(&summary.recordlens_ms.to_le_bytes());
    out.extend_from_slice(&summary.linesize.to_le_bytes());
    out.extend_from_slice(&summary.unknown_5.to_le_bytes());
    out.extend_from_slice(&summary.unknown_6.to_le_bytes());
    out.extend_from_slice(&summary.unknown_7.to_le_bytes());
    out.extend_from_slice(&summary.unknown_8.to_le_bytes());
    out.extend_from_slice(&summary.unknown_9.to_le_bytes());
    out.extend_from_slice(&summary.unknown_10.to_le_bytes());
    out.extend_from_slice(&summary.unknown_11.to_le_bytes());
    out.extend_from_slice(&summary.unknown_12.to_le_bytes());
    out.extend_from_slice(&summary.unknown_13.to_le_bytes());
    out.extend_from_slice(&summary.unknown_14.to_le_bytes());
    out
}

pub fn write_dat_summary(summary: &RecordingSummary, path: &Path) -> Result<(), SonarError> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(&summary_as_bytes(summary))?;
    Ok(())
}

/// Raw bit-pattern source for one SON header field, by name. Fields with no Vendor-L
/// counterpart (the `unk_*`/`gps*`/error-budget entries of [`VENDOR_H_SON_REGISTRY`]) have
/// no assigned value and are written as zero.
fn field_source_value(row: &PingRow, name: &str) -> i64 {
    match name {
        "record_num" => row.record_num as i64,
        "time_ms" => row.time_ms,
        "utm_e" => row.utm_e as i64,
        "utm_n" => row.utm_n as i64,
        "instr_heading" => row.instr_heading_deg_tenths as i64,
        "speed_dm" => row.speed_dm_per_s as i64,
        "inst_dep_dm" => row.inst_dep_dm as i64,
        "beam" => row.beam.and_then(|b| b.to_u8()).unwrap_or(0) as i64,
        "frequency_khz" => row.frequency_khz as i64,
        "f_min" => row.frequency_min_khz as i64,
        "f_max" => row.frequency_max_khz as i64,
        "ping_sample_count" => row.ping_sample_count as i64,
        _ => 0,
    }
}

/// Builds one frame header (`head_start`, every tag-prefixed field in registry order,
/// `head_end`) for `row`.
fn frame_header_as_bytes(row: &PingRow) -> Vec<u8> {
    let mut out = Vec::with_capacity(152);
    out.extend_from_slice(&VENDOR_H_HEAD_START.to_be_bytes());
    for entry in VENDOR_H_SON_REGISTRY {
        out.push(entry.tag);
        for desc in entry.fields {
            write_field(&mut out, desc, field_source_value(row, desc.name));
        }
    }
    out.push(VENDOR_H_HEAD_END as u8);
    out
}

/// Copies `sample_count` bytes from `source`, positioned at `frame_offset + son_offset`, to
/// `out`. The common, unflipped case streams in `chunk_size`-sized reads (spec.md §5: the
/// emitter may buffer but the Resource policy favors streamed copies); a flipped payload
/// (spec.md §4.6 step 2's `flip_port`) must be reversed as a whole, so it is buffered in full.
fn copy_sample_payload<R: Read + Seek, W: Write>(
    source: &mut R,
    frame_offset: u64,
    son_offset: u32,
    sample_count: u32,
    flip: bool,
    out: &mut W,
    chunk_size: usize,
) -> Result<(), SonarError> {
    source.seek(SeekFrom::Start(frame_offset + son_offset as u64))?;
    if flip {
        let mut buf = vec![0u8; sample_count as usize];
        source.read_exact(&mut buf)?;
        buf.reverse();
        out.write_all(&buf)?;
    } else {
        let mut remaining = sample_count as usize;
        let mut buf = vec![0u8; chunk_size.max(1)];
        while remaining > 0 {
            let n = remaining.min(buf.len());
            source.read_exact(&mut buf[..n])?;
            out.write_all(&buf[..n])?;
            remaining -= n;
        }
    }
    Ok(())
}

/// Writes one beam's frame file and index file, streaming each frame's sample payload from
/// `source_path` (spec.md §4.7). `rows` must already be in `record_num` order.
fn write_beam(
    rows: &[&PingRow],
    source_path: &Path,
    son_path: &Path,
    idx_path: &Path,
    chunk_size: usize,
) -> Result<(), SonarError> {
    let mut source = File::open(source_path)?;
    let mut son = BufWriter::new(File::create(son_path)?);
    let mut idx = BufWriter::new(File::create(idx_path)?);
    let mut byte_length: u64 = 0;

    for row in rows {
        let header = frame_header_as_bytes(row);
        son.write_all(&header)?;
        copy_sample_payload(
            &mut source,
            row.frame_offset,
            row.son_offset,
            row.ping_sample_count,
            row.flip_port,
            &mut son,
            chunk_size,
        )?;
        byte_length += header.len() as u64 + row.ping_sample_count as u64;

        idx.write_all(&(row.time_ms as u32).to_be_bytes())?;
        idx.write_all(&(byte_length as u32).to_be_bytes())?;
    }

    son.flush()?;
    idx.flush()?;
    Ok(())
}

/// Writes the full Vendor-H output set: `<output_stem>.DAT` and the `<output_stem>/` directory
/// of per-beam SON/IDX files, including empty files for beams with no pings (spec.md §6.2).
pub fn emit_vendor_h(
    rows: &[PingRow],
    summary: &RecordingSummary,
    source_path: &Path,
    output_stem: &Path,
    settings: &ConversionSettings,
) -> Result<(), SonarError> {
    let dat_path = output_stem.with_extension("DAT");
    write_dat_summary(summary, &dat_path)?;

    fs::create_dir_all(output_stem)?;

    for &beam in &BEAM_IDS {
        let beam_rows: Vec<&PingRow> = rows.iter().filter(|r| r.beam == Some(beam)).collect();
        let stem = beam_stem(beam);
        let son_path = output_stem.join(format!("{}.SON", stem));
        let idx_path = output_stem.join(format!("{}.IDX", stem));
        write_beam(
            &beam_rows,
            source_path,
            &son_path,
            &idx_path,
            settings.get_chunk_size(),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::ping::VENDOR_H_UNKNOWN_I32;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn row(beam: VendorHBeam, sample_count: u32, frame_offset: u64, son_offset: u32) -> PingRow {
        PingRow {
            record_num: 0,
            time_ms: 10,
            utm_e: 1,
            utm_n: 2,
            lat_deg: 0.0,
            lon_deg: 0.0,
            beam: Some(beam),
            instr_heading_deg_tenths: 0,
            speed_dm_per_s: 0,
            inst_dep_dm: 0,
            frequency_khz: 200,
            frequency_min_khz: 200,
            frequency_max_khz: 200,
            ping_sample_count: sample_count,
            frame_offset,
            son_offset,
            flip_port: false,
            unknown: Vec::new(),
        }
    }

    #[test]
    fn summary_bytes_are_96_long_and_little_endian() {
        let mut summary = RecordingSummary::new_with_defaults();
        summary.unix_time = 0x0102_0304;
        let bytes = summary_as_bytes(&summary);
        assert_eq!(bytes.len(), 96);
        assert_eq!(&bytes[16..20], &0x0102_0304u32.to_le_bytes());
        assert_eq!(summary.unknown_10, VENDOR_H_UNKNOWN_I32);
    }

    #[test]
    fn frame_header_is_152_bytes_with_framing_sentinels() {
        let r = row(VendorHBeam::Primary, 40, 0, 152);
        let header = frame_header_as_bytes(&r);
        assert_eq!(header.len(), 152);
        assert_eq!(&header[..4], &VENDOR_H_HEAD_START.to_be_bytes());
        assert_eq!(header[151], VENDOR_H_HEAD_END as u8);
    }

    #[test]
    fn flipped_payload_is_reversed_on_copy() {
        let mut source = Cursor::new(vec![1u8, 2, 3, 4]);
        let mut out = Vec::new();
        copy_sample_payload(&mut source, 0, 0, 4, true, &mut out, 65536).unwrap();
        assert_eq!(out, vec![4, 3, 2, 1]);
    }

    #[test]
    fn missing_beam_produces_empty_son_and_idx_files() {
        let dir = tempdir().unwrap();
        let source_path = dir.path().join("source.bin");
        fs::write(&source_path, [0u8; 16]).unwrap();
        let output_stem = dir.path().join("survey");

        let rows = vec![row(VendorHBeam::Primary, 4, 0, 0)];
        let summary = RecordingSummary::new_with_defaults();
        emit_vendor_h(
            &rows,
            &summary,
            &source_path,
            &output_stem,
            &ConversionSettings::default(),
        )
        .unwrap();

        let star_son = output_stem.join("B003.SON");
        assert_eq!(fs::metadata(&star_son).unwrap().len(), 0);
    }
}
