//! The three pure conversion entry points (spec.md §6.4): `low2normalized`, `hum2normalized`
//! and `low2hum`. Each wires one of `sonar-in`'s readers to one of `sonar-out`'s emitters
//! through `sonar-core`'s shared types; none of the three touch a CLI, a working directory,
//! or global state, leaving all of that to the caller (spec.md: "Out of scope. The core is
//! invoked as three pure functions ... Exit codes are caller-determined").
use std::fs;
use std::path::Path;

use log::warn;

use sonar_core::enums::VendorHBeam;
use sonar_core::errors::SonarError;
use sonar_core::settings::ConversionSettings;

/// Converts a Vendor-L recording into a normalized metadata CSV per beam under `out_dir`
/// (the L variant of spec.md §2's "L/H -> CSV" transform).
///
/// Each beam's CSV is produced by independently re-opening and re-parsing `input_file`
/// (spec.md §5: "the per-beam parse function ... owns its own reader; no shared handles, no
/// shared buffers"), so the single combined Vendor-L stream is walked once per beam rather
/// than shared in memory across the parallel fan-out.
pub fn low2normalized(
    input_file: &Path,
    out_dir: &Path,
    settings: &ConversionSettings,
) -> Result<(), SonarError> {
    fs::create_dir_all(out_dir)?;
    let export_unknown = settings.get_export_unknown();
    sonar_out::emit_metadata_csv_parallel(out_dir, settings, |beam| {
        let recording = sonar_in::read_vendor_l(input_file, export_unknown)?;
        Ok(recording
            .pings
            .into_iter()
            .filter(|row| row.beam == Some(beam))
            .collect())
    })
}

/// Converts a Vendor-H recording into a normalized metadata CSV per beam under `out_dir``
/// (the H variant of spec.md §2's "L/H -> CSV" transform).
///
/// Vendor-H already stores each beam in its own SON/IDX file pair, so here the per-beam
/// isolation spec.md §5 asks for falls out naturally: each closure invocation opens only
/// that one beam's files.
pub fn hum2normalized(
    input_file: &Path,
    out_dir: &Path,
    settings: &ConversionSettings,
) -> Result<(), SonarError> {
    fs::create_dir_all(out_dir)?;
    let base_dir = input_file.with_extension("");
    sonar_out::emit_metadata_csv_parallel(out_dir, settings, |beam| {
        let stem = beam_stem(beam);
        let son_path = base_dir.join(format!("{}.SON", stem));
        let idx_path = base_dir.join(format!("{}.IDX", stem));
        sonar_in::read_vendor_h_beam(&son_path, &idx_path)
    })
}

/// Converts a Vendor-L recording into a full Vendor-H output set at `output_stem`
/// (spec.md §2's "L -> H" transform): reads and normalizes the source, translates it through
/// the four ordered steps of spec.md §4.6, synthesizes the summary record, and emits the
/// binary artifacts of spec.md §4.7.
pub fn low2hum(
    input_file: &Path,
    output_stem: &Path,
    settings: &ConversionSettings,
) -> Result<(), SonarError> {
    let recording = sonar_in::read_vendor_l(input_file, settings.get_export_unknown())?;
    if recording.header.recording_start_epoch.is_none() {
        warn!(
            "{}: no recording_start_epoch in file header, stamping DAT unix_time as 0",
            input_file.display()
        );
    }
    let recording_start_epoch = recording.header.recording_start_epoch.unwrap_or(0);

    let rows = sonar_out::translate_to_vendor_h(recording.pings);
    let summary = sonar_out::synthesize_summary(&rows, recording_start_epoch);

    sonar_out::emit_vendor_h(&rows, &summary, input_file, output_stem, settings)
}

fn beam_stem(beam: VendorHBeam) -> String {
    use num::ToPrimitive;
    format!("B{:03}", beam.to_u8().unwrap_or(0))
}
