//! Vendor-L -> Vendor-H Translator (spec.md §4.6): reprojects coordinates, splits combined
//! sidescan, drops unrecognised beams, reassigns record numbers and synthesizes the summary
//! ("DAT") record. The step order below is the one spec.md specifies; later steps read
//! earlier steps' output and must not be reordered.
use num::ToPrimitive;
use sonar_core::enums::VendorHBeam;
use sonar_core::ping::{PingRow, RecordingSummary};
use sonar_core::{
    VENDOR_H_DAT_FILENAME_LEN, VENDOR_H_DEG_PER_RAD, VENDOR_H_ELLIPSOID_RADIUS_M,
    VENDOR_H_FRAME_HEADER_SIZE, VENDOR_H_LAT_CORRECTION,
};

/// Step 1's forward projection: Vendor-H UTM from WGS-84 decimal degrees, on the
/// International-1924 ellipsoid (spec.md §4.6 step 1).
fn vendor_h_forward_projection(lat_deg: f64, lon_deg: f64) -> (i32, i32) {
    let a = VENDOR_H_ELLIPSOID_RADIUS_M;
    let lat_rad_scaled = lat_deg / VENDOR_H_DEG_PER_RAD;
    let u = (lat_rad_scaled.tan() / VENDOR_H_LAT_CORRECTION).atan();
    let utm_n = a * ((u + std::f64::consts::FRAC_PI_2) / 2.0).tan().ln();
    let utm_e = a * (std::f64::consts::PI / 180.0) * lon_deg;
    (utm_e.round() as i32, utm_n.round() as i32)
}

/// Translates a normalized Vendor-L ping table into Vendor-H's attribute schema.
pub fn translate_to_vendor_h(rows: Vec<PingRow>) -> Vec<PingRow> {
    let mut rows = rows;

    // Step 1: coordinate conversion, applied before the split so a combined-sidescan row's
    // duplicated halves inherit already-converted coordinates.
    for row in &mut rows {
        let (utm_e, utm_n) = vendor_h_forward_projection(row.lat_deg, row.lon_deg);
        row.utm_e = utm_e;
        row.utm_n = utm_n;
    }

    // Step 2: sidescan split. A combined-sidescan ping becomes a port half (flipped on
    // emission, per spec.md §4.7's "flip_port" contract) and a starboard half, each with
    // half the sample count; the starboard half's sample payload starts immediately after
    // the port half's within the same source frame.
    let mut split = Vec::with_capacity(rows.len());
    for row in rows {
        if row.beam == Some(VendorHBeam::SideScan) {
            let halved = row.halved_sample_count();

            let mut port = row.clone();
            port.beam = Some(VendorHBeam::Port);
            port.ping_sample_count = halved;
            port.flip_port = true;

            let mut star = row;
            star.beam = Some(VendorHBeam::Star);
            star.ping_sample_count = halved;
            star.son_offset += halved;
            star.flip_port = false;

            split.push(port);
            split.push(star);
        } else {
            split.push(row);
        }
    }

    // Step 3: drop unrecognised beams. The Normalizer keeps a ping with no canonical beam
    // mapping around as `beam: None` (see `sonar_in::vendor_l::normalize`) instead of
    // aborting the whole recording; this is where such rows are actually discarded.
    let mut rows: Vec<PingRow> = split.into_iter().filter(|r| r.beam.is_some()).collect();

    // Step 4: record-number recomputation, after every addition/removal above.
    rows.sort_by_key(|r| {
        (
            r.time_ms,
            r.beam.and_then(|b| b.to_u8()).unwrap_or(0),
        )
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.record_num = i as u32;
    }

    rows
}

/// Step 5: summary synthesis, from the finalized ping table. `recording_start_epoch` comes
/// from the Vendor-L file header (`file_information`'s `recording_start_epoch` tag), the
/// only source for that field in a Vendor-L recording.
pub fn synthesize_summary(rows: &[PingRow], recording_start_epoch: u32) -> RecordingSummary {
    let mut summary = RecordingSummary::new_with_defaults();
    summary.numrecords = rows.len() as u32;
    summary.recordlens_ms = rows.last().map(|r| r.time_ms as u32).unwrap_or(0);
    summary.linesize = rows
        .first()
        .map(|r| VENDOR_H_FRAME_HEADER_SIZE as u32 + r.ping_sample_count)
        .unwrap_or(0);
    if let Some(first) = rows.first() {
        summary.utm_e = first.utm_e;
        summary.utm_n = first.utm_n;
    }
    summary.unix_time = recording_start_epoch;
    // The port-sidescan beam is always B002.SON, per spec.md §6.2's fixed beam/file naming.
    summary.filename = pad_filename("B002.SON");
    summary
}

/// Space-pads (or truncates) a filename to exactly [`VENDOR_H_DAT_FILENAME_LEN`] ASCII bytes
/// (spec.md §4.6 step 5 / §6.2).
fn pad_filename(name: &str) -> String {
    let mut bytes: Vec<u8> = name.bytes().take(VENDOR_H_DAT_FILENAME_LEN).collect();
    bytes.resize(VENDOR_H_DAT_FILENAME_LEN, b' ');
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time_ms: i64, beam: Option<VendorHBeam>, sample_count: u32) -> PingRow {
        PingRow {
            record_num: 0,
            time_ms,
            utm_e: 0,
            utm_n: 0,
            lat_deg: 45.0,
            lon_deg: -70.0,
            beam,
            instr_heading_deg_tenths: 0,
            speed_dm_per_s: 0,
            inst_dep_dm: 0,
            frequency_khz: 200,
            frequency_min_khz: 200,
            frequency_max_khz: 200,
            ping_sample_count: sample_count,
            frame_offset: 20480,
            son_offset: 0,
            flip_port: false,
            unknown: Vec::new(),
        }
    }

    #[test]
    fn sidescan_split_conserves_samples() {
        let rows = vec![row(0, Some(VendorHBeam::SideScan), 400)];
        let out = translate_to_vendor_h(rows);
        assert_eq!(out.len(), 2);
        let port = out.iter().find(|r| r.beam == Some(VendorHBeam::Port)).unwrap();
        let star = out.iter().find(|r| r.beam == Some(VendorHBeam::Star)).unwrap();
        assert_eq!(port.ping_sample_count, 200);
        assert_eq!(star.ping_sample_count, 200);
        assert_eq!(star.son_offset - port.son_offset, 200);
        assert!(port.flip_port);
        assert!(!star.flip_port);
    }

    #[test]
    fn record_numbers_are_a_dense_permutation_sorted_by_time_then_beam() {
        let rows = vec![
            row(100, Some(VendorHBeam::Secondary), 10),
            row(0, Some(VendorHBeam::Primary), 10),
            row(0, Some(VendorHBeam::Secondary), 10),
        ];
        let out = translate_to_vendor_h(rows);
        let mut record_nums: Vec<u32> = out.iter().map(|r| r.record_num).collect();
        record_nums.sort();
        assert_eq!(record_nums, vec![0, 1, 2]);
        assert_eq!(out[0].beam, Some(VendorHBeam::Primary));
        assert_eq!(out[1].beam, Some(VendorHBeam::Secondary));
        assert_eq!(out[2].time_ms, 100);
    }

    #[test]
    fn unrecognized_beam_is_dropped_not_emitted() {
        let rows = vec![
            row(0, Some(VendorHBeam::Primary), 10),
            row(0, None, 10),
        ];
        let out = translate_to_vendor_h(rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].beam, Some(VendorHBeam::Primary));
    }

    #[test]
    fn empty_recording_synthesizes_zeroed_summary() {
        let summary = synthesize_summary(&[], 0);
        assert_eq!(summary.numrecords, 0);
        assert_eq!(summary.recordlens_ms, 0);
    }

    #[test]
    fn summary_linesize_is_header_size_plus_first_sample_count() {
        let rows = translate_to_vendor_h(vec![row(0, Some(VendorHBeam::Primary), 400)]);
        let summary = synthesize_summary(&rows, 0);
        assert_eq!(summary.linesize, 152 + 400);
    }
}
