mod byte_reader {
    use crate::byte_reader::*;

    #[test]
    fn reads_little_and_big_endian() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16_le().unwrap(), 0x0201);
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u16_be().unwrap(), 0x0102);
    }

    #[test]
    fn advances_position() {
        let data = [0u8; 16];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.position(), 0);
        r.read_u32_le().unwrap();
        assert_eq!(r.position(), 4);
        assert_eq!(r.remaining(), 12);
    }

    #[test]
    fn seek_within_bounds() {
        let data = [0u8; 8];
        let mut r = ByteReader::new(&data);
        r.seek(8).unwrap();
        assert_eq!(r.remaining(), 0);
        assert!(r.seek(9).is_err());
    }

    #[test]
    fn read_past_end_errors_without_moving_cursor() {
        let data = [0u8; 2];
        let mut r = ByteReader::new(&data);
        assert!(r.read_u32_le().is_err());
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn read_bytes_gives_a_borrowed_slice() {
        let data = [9, 8, 7, 6];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_bytes(3).unwrap(), &[9, 8, 7]);
    }
}

mod schema {
    use crate::byte_reader::ByteReader;
    use crate::schema::*;

    #[test]
    fn width_matches_kind() {
        assert_eq!(FieldKind::U8.width(), 1);
        assert_eq!(FieldKind::I16.width(), 2);
        assert_eq!(FieldKind::U32.width(), 4);
        assert_eq!(FieldKind::F64.width(), 8);
    }

    #[test]
    fn read_field_little_endian_u32() {
        let desc = FieldDescriptor::new("x", FieldKind::U32, Endianness::Little);
        let data = [0x01, 0x00, 0x00, 0x00];
        let mut r = ByteReader::new(&data);
        let v = read_field(&mut r, &desc).unwrap();
        assert_eq!(v, FieldValue::U32(1));
    }

    #[test]
    fn read_field_big_endian_i16() {
        let desc = FieldDescriptor::new("x", FieldKind::I16, Endianness::Big);
        let data = [0xFF, 0xFE];
        let mut r = ByteReader::new(&data);
        let v = read_field(&mut r, &desc).unwrap();
        assert_eq!(v, FieldValue::I16(-2));
    }

    #[test]
    fn bits_as_f32_reinterprets_u32() {
        let bits = 1.5f32.to_bits();
        let v = FieldValue::U32(bits);
        assert_eq!(v.bits_as_f32(), Some(1.5));
    }

    #[test]
    fn as_i64_widens_signed_and_unsigned() {
        assert_eq!(FieldValue::U8(200).as_i64(), Some(200));
        assert_eq!(FieldValue::I8(-5).as_i64(), Some(-5));
        assert_eq!(FieldValue::F32(1.0).as_i64(), None);
    }

    #[test]
    fn lookup_tag_finds_entry() {
        const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new("a", FieldKind::U8, Endianness::Little)];
        const REGISTRY: &[TagEntry] = &[
            TagEntry { tag: 0x04, fields: FIELDS },
            TagEntry { tag: 0x0A, fields: FIELDS },
        ];
        assert!(lookup_tag(REGISTRY, 0x0A).is_some());
        assert!(lookup_tag(REGISTRY, 0xFF).is_none());
    }
}

mod enums {
    use crate::enums::*;

    #[test]
    fn vendor_l_beam_crosswalk_matches_table() {
        assert_eq!(VendorLBeam::Primary.to_vendor_h(), 0);
        assert_eq!(VendorLBeam::Secondary.to_vendor_h(), 1);
        assert_eq!(VendorLBeam::DownScan.to_vendor_h(), 4);
        assert_eq!(VendorLBeam::Port.to_vendor_h(), 2);
        assert_eq!(VendorLBeam::Star.to_vendor_h(), 3);
        assert_eq!(VendorLBeam::SideScan.to_vendor_h(), 5);
    }

    #[test]
    fn beam_from_primitive_round_trips() {
        assert_eq!(VendorLBeam::new(2), Some(VendorLBeam::DownScan));
        assert_eq!(VendorLBeam::new(6), None);
        assert_eq!(VendorHBeam::new(3), Some(VendorHBeam::Star));
    }

    #[test]
    fn frequency_table_lookup_by_code() {
        let band = frequency_band_by_code(0).unwrap();
        assert_eq!(band.label, "200kHz");
        assert_eq!(band.nominal_khz, 200);

        let band = frequency_band_by_code(7).unwrap();
        assert_eq!(band.label, "130kHz_210kHz");
        assert_eq!(band.min_khz, 130);
        assert_eq!(band.max_khz, 210);

        assert!(frequency_band_by_code(99).is_none());
    }
}

mod errors {
    use crate::errors::SonarError;

    #[test]
    fn display_is_human_readable() {
        let e = SonarError::UnexpectedEnd { wanted: 4, have: 1 };
        assert!(e.to_string().contains("4"));
        let e = SonarError::UnknownTag { offset: 10, tag: 0xAB };
        assert!(e.to_string().contains("AB"));
    }

    #[test]
    fn converts_to_string() {
        let e: String = SonarError::HeaderNotDetermined.into();
        assert!(!e.is_empty());
    }

    #[test]
    fn try_from_slice_error_converts() {
        let arr: Result<[u8; 4], _> = (&[1u8, 2, 3][..]).try_into();
        let err: SonarError = arr.unwrap_err().into();
        assert!(matches!(err, SonarError::TryFromSlice(_)));
    }
}

mod settings {
    use crate::settings::ConversionSettings;

    #[test]
    fn default_matches_documented_values() {
        let s = ConversionSettings::default();
        assert_eq!(s.get_chunk_size(), 65536);
        assert_eq!(s.get_temperature_c(), 10.0);
        assert!(!s.get_export_unknown());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let mut s = ConversionSettings::default();
        assert!(s.set_chunk_size(0).is_err());
        assert_eq!(s.get_chunk_size(), 65536);
    }

    #[test]
    fn setters_round_trip() {
        let mut s = ConversionSettings::default();
        s.set_chunk_size(4096).unwrap();
        s.set_temperature_c(18.5);
        s.set_export_unknown(true);
        assert_eq!(s.get_chunk_size(), 4096);
        assert_eq!(s.get_temperature_c(), 18.5);
        assert!(s.get_export_unknown());
    }
}

mod ping {
    use crate::enums::VendorHBeam;
    use crate::ping::{PingRow, RecordingSummary, VENDOR_H_UNKNOWN_I32};

    fn sample_row() -> PingRow {
        PingRow {
            record_num: 0,
            time_ms: 1000,
            utm_e: 0,
            utm_n: 0,
            lat_deg: 0.0,
            lon_deg: 0.0,
            beam: Some(VendorHBeam::SideScan),
            instr_heading_deg_tenths: 0,
            speed_dm_per_s: 0,
            inst_dep_dm: 0,
            frequency_khz: 455,
            frequency_min_khz: 455,
            frequency_max_khz: 455,
            ping_sample_count: 1000,
            frame_offset: 20480,
            son_offset: 8,
            flip_port: false,
            unknown: Vec::new(),
        }
    }

    #[test]
    fn halved_sample_count_truncates() {
        let mut row = sample_row();
        row.ping_sample_count = 1001;
        assert_eq!(row.halved_sample_count(), 500);
    }

    #[test]
    fn recording_summary_defaults_stamp_unknown_sentinels() {
        let s = RecordingSummary::new_with_defaults();
        assert_eq!(s.unknown_10, VENDOR_H_UNKNOWN_I32);
        assert_eq!(s.unknown_14, VENDOR_H_UNKNOWN_I32);
        assert_eq!(s.sp1, 195);
        assert_eq!(s.water_code, 1);
        assert_eq!(s.numrecords, 0);
    }
}
