//! Static tag tables for Vendor-L's file header and per-ping body (spec.md §6.1).
use sonar_core::schema::{Endianness::Little, FieldDescriptor as FD, FieldKind::*, TagEntry};

/// Outer file-header tags, excluding the `0x2F` file-information composite and the `0x37`
/// channel-information terminator, both of which are handled specially by `discover`.
pub const FILE_HEADER_REGISTRY: &[TagEntry] = &[
    TagEntry {
        tag: 0x04,
        fields: &[FD::new("magic_number", U32, Little)],
    },
    TagEntry {
        tag: 0x0A,
        fields: &[FD::new("format_version", U16, Little)],
    },
    TagEntry {
        tag: 0x14,
        fields: &[FD::new("channel_count", U32, Little)],
    },
    TagEntry {
        tag: 0x19,
        fields: &[FD::new("max_channel_count", U8, Little)],
    },
];

/// Inner tags of the `0x2F` file-information composite.
pub const FILE_INFO_REGISTRY: &[TagEntry] = &[
    TagEntry {
        tag: 0x02,
        fields: &[FD::new("sw_version", U16, Little)],
    },
    TagEntry {
        tag: 0x0C,
        fields: &[FD::new("device_id", U32, Little)],
    },
    TagEntry {
        tag: 0x12,
        fields: &[FD::new("product_number", U16, Little)],
    },
    TagEntry {
        tag: 0x1C,
        fields: &[FD::new("recording_start_epoch", U32, Little)],
    },
];

/// The up-to-13 known outer tags of a ping body (spec.md §6.1). Tags whose payload is a
/// composite carry more than one descriptor, read in order.
pub const PING_BODY_REGISTRY: &[TagEntry] = &[
    TagEntry {
        tag: 0x01,
        fields: &[FD::new("channel_id", U8, Little)],
    },
    TagEntry {
        tag: 0x0B,
        fields: &[
            FD::new("bottom_depth_a", U8, Little),
            FD::new("bottom_depth_b", U16, Little),
        ],
    },
    TagEntry {
        tag: 0x0D,
        fields: &[
            FD::new("track_cog_bits", U32, Little),
            FD::new("unknown_0d_b", U8, Little),
        ],
    },
    TagEntry {
        tag: 0x12,
        fields: &[FD::new("frequency_code", U16, Little)],
    },
    TagEntry {
        tag: 0x13,
        fields: &[
            FD::new("drawn_bottom_depth_a", U8, Little),
            FD::new("drawn_bottom_depth_b", U16, Little),
        ],
    },
    TagEntry {
        tag: 0x15,
        fields: &[
            FD::new("gps_speed_bits", U32, Little),
            FD::new("unknown_15_b", U8, Little),
        ],
    },
    TagEntry {
        tag: 0x19,
        fields: &[FD::new("first_sample_depth", U8, Little)],
    },
    TagEntry {
        tag: 0x23,
        fields: &[
            FD::new("last_sample_depth_a", U8, Little),
            FD::new("last_sample_depth_b", U16, Little),
        ],
    },
    TagEntry {
        tag: 0x29,
        fields: &[FD::new("gain", U8, Little)],
    },
    TagEntry {
        tag: 0x31,
        fields: &[FD::new("sample_status", U8, Little)],
    },
    TagEntry {
        tag: 0x3C,
        fields: &[FD::new("sample_cnt", U32, Little)],
    },
    TagEntry {
        tag: 0x41,
        fields: &[FD::new("shade_avail", U8, Little)],
    },
    TagEntry {
        tag: 0x4C,
        fields: &[FD::new("scposn_lat", U32, Little)],
    },
    TagEntry {
        tag: 0x54,
        fields: &[FD::new("scposn_lon", U32, Little)],
    },
    TagEntry {
        tag: 0x5C,
        fields: &[FD::new("water_temp", F32, Little)],
    },
    TagEntry {
        tag: 0x61,
        fields: &[FD::new("beam", U8, Little)],
    },
];

/// Maximum number of outer tag fields a ping body may declare before the excess is treated as
/// an appended beam-info composite (spec.md §4.4 step 3).
pub const PING_BODY_MAX_FIELDS: u8 = 13;
