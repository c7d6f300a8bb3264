//! Metadata CSV Emitter (spec.md §4.8): one CSV of normalized ping-attribute rows per beam,
//! column order following the derived schema plus the computed columns, with optional
//! `unknown_*` columns.
use std::collections::BTreeSet;
use std::path::Path;

use csv::Writer;
use num::ToPrimitive;
use rayon::prelude::*;
use sonar_core::enums::VendorHBeam;
use sonar_core::errors::SonarError;
use sonar_core::ping::PingRow;
use sonar_core::settings::ConversionSettings;

const FIXED_COLUMNS: &[&str] = &[
    "record_num",
    "time_ms",
    "utm_e",
    "utm_n",
    "lat_deg",
    "lon_deg",
    "beam",
    "instr_heading_deg_tenths",
    "speed_dm_per_s",
    "inst_dep_dm",
    "frequency_khz",
    "frequency_min_khz",
    "frequency_max_khz",
    "ping_sample_count",
];

fn fixed_values(row: &PingRow) -> Vec<String> {
    vec![
        row.record_num.to_string(),
        row.time_ms.to_string(),
        row.utm_e.to_string(),
        row.utm_n.to_string(),
        row.lat_deg.to_string(),
        row.lon_deg.to_string(),
        row.beam.and_then(|b| b.to_u8()).unwrap_or(0).to_string(),
        row.instr_heading_deg_tenths.to_string(),
        row.speed_dm_per_s.to_string(),
        row.inst_dep_dm.to_string(),
        row.frequency_khz.to_string(),
        row.frequency_min_khz.to_string(),
        row.frequency_max_khz.to_string(),
        row.ping_sample_count.to_string(),
    ]
}

/// Writes one beam's ping rows to `out_path`. When `export_unknown` is set, every distinct
/// unknown field name seen across `rows` becomes its own `unknown_<name>` column, present
/// (possibly empty) on every row so the CSV stays rectangular.
pub fn write_beam_csv(
    rows: &[PingRow],
    out_path: &Path,
    export_unknown: bool,
) -> Result<(), SonarError> {
    let mut writer = Writer::from_path(out_path).map_err(|e| SonarError::Csv(e.to_string()))?;

    let unknown_names: BTreeSet<String> = if export_unknown {
        rows.iter()
            .flat_map(|r| r.unknown.iter().map(|(name, _)| name.clone()))
            .collect()
    } else {
        BTreeSet::new()
    };

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|s| s.to_string()).collect();
    header.extend(unknown_names.iter().map(|n| format!("unknown_{}", n)));
    writer
        .write_record(&header)
        .map_err(|e| SonarError::Csv(e.to_string()))?;

    for row in rows {
        let mut record = fixed_values(row);
        if export_unknown {
            for name in &unknown_names {
                let value = row
                    .unknown
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.as_f64().map(|f| f.to_string()).unwrap_or_default())
                    .unwrap_or_default();
                record.push(value);
            }
        }
        writer
            .write_record(&record)
            .map_err(|e| SonarError::Csv(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

/// The five canonical beam ids, in file-naming order (spec.md §6.2).
const BEAM_IDS: [VendorHBeam; 5] = [
    VendorHBeam::Primary,
    VendorHBeam::Secondary,
    VendorHBeam::Port,
    VendorHBeam::Star,
    VendorHBeam::DownScan,
];

/// Writes one CSV per present beam, in parallel (spec.md §5: "each beam's ping-attribute
/// table is written independently to its own output file"). `parse_beam` is called once per
/// beam and must own its own reader end to end — no state is shared between calls, matching
/// spec.md §5's "no shared handles, no shared buffers" contract verbatim; `rayon` supplies
/// the fork/join.
pub fn emit_metadata_csv_parallel<F>(
    out_dir: &Path,
    settings: &ConversionSettings,
    parse_beam: F,
) -> Result<(), SonarError>
where
    F: Fn(VendorHBeam) -> Result<Vec<PingRow>, SonarError> + Sync,
{
    BEAM_IDS
        .par_iter()
        .map(|&beam| {
            let rows = parse_beam(beam)?;
            let out_path = out_dir.join(format!("B{:03}.csv", beam.to_u8().unwrap_or(0)));
            write_beam_csv(&rows, &out_path, settings.get_export_unknown())
        })
        .collect::<Result<Vec<()>, SonarError>>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::schema::FieldValue;
    use tempfile::tempdir;

    fn row(record_num: u32) -> PingRow {
        PingRow {
            record_num,
            time_ms: 0,
            utm_e: 0,
            utm_n: 0,
            lat_deg: 45.0,
            lon_deg: -70.0,
            beam: Some(VendorHBeam::Primary),
            instr_heading_deg_tenths: 0,
            speed_dm_per_s: 0,
            inst_dep_dm: 0,
            frequency_khz: 200,
            frequency_min_khz: 200,
            frequency_max_khz: 200,
            ping_sample_count: 0,
            frame_offset: 0,
            son_offset: 0,
            flip_port: false,
            unknown: vec![("gain".to_string(), FieldValue::U8(5))],
        }
    }

    #[test]
    fn writes_fixed_columns_only_by_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_beam_csv(&[row(0)], &path, false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, FIXED_COLUMNS.join(","));
    }

    #[test]
    fn unknown_columns_appear_when_requested() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_beam_csv(&[row(0)], &path, true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert!(header.ends_with("unknown_gain"));
    }

    #[test]
    fn parallel_emission_writes_one_file_per_beam() {
        let dir = tempdir().unwrap();
        emit_metadata_csv_parallel(dir.path(), &ConversionSettings::default(), |beam| {
            Ok(vec![PingRow {
                beam: Some(beam),
                ..row(0)
            }])
        })
        .unwrap();
        for beam in BEAM_IDS {
            let path = dir.path().join(format!("B{:03}.csv", beam.to_u8().unwrap_or(0)));
            assert!(path.exists());
        }
    }
}
