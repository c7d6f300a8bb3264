//! Vendor-H's tag-prefixed SON frame header (spec.md §6.2), shared by the reader
//! (`sonar-in::vendor_h::parse`) and the writer (`sonar-out::emit_hum`) so the two can never
//! drift apart on tag bytes, widths or field order.
//!
//! Unlike Vendor-L's registry (keyed by outer tag byte only, discovered once per recording),
//! this table *is* the frame layout: every Vendor-H frame carries exactly these fields, in
//! this order, every time. It is still expressed as [`TagEntry`]s rather than a fixed struct
//! so the same tag-walking interpreter (`schema::read_field`/`lookup_tag`) drives both vendors
//! (design note §9, "tag-walked variable schema vs static struct").
use crate::schema::{Endianness::Big, FieldDescriptor as FD, FieldKind::*, TagEntry};

/// Tag-prefixed fields of a Vendor-H SON frame header, in wire order, *excluding* the bare
/// `head_start`/`head_end` framing sentinels (spec.md: "Framing fields `head_start` and
/// `head_end` carry no tag byte"). Tags 132 and 133 each introduce two consecutive values
/// with a single leading tag byte (SPEC_FULL.md's resolution of spec.md's "Note on tags 132
/// and 133 appearing twice").
pub const VENDOR_H_SON_REGISTRY: &[TagEntry] = &[
    TagEntry { tag: 128, fields: &[FD::new("record_num", U32, Big)] },
    TagEntry { tag: 129, fields: &[FD::new("time_ms", U32, Big)] },
    TagEntry { tag: 130, fields: &[FD::new("utm_e", I32, Big)] },
    TagEntry { tag: 131, fields: &[FD::new("utm_n", I32, Big)] },
    TagEntry {
        tag: 132,
        fields: &[FD::new("gps1", U16, Big), FD::new("instr_heading", U16, Big)],
    },
    TagEntry {
        tag: 133,
        fields: &[FD::new("gps2", U16, Big), FD::new("speed_dm", U16, Big)],
    },
    TagEntry { tag: 134, fields: &[FD::new("unk_134", U32, Big)] },
    TagEntry { tag: 135, fields: &[FD::new("inst_dep_dm", U32, Big)] },
    TagEntry { tag: 136, fields: &[FD::new("unk_136", I32, Big)] },
    TagEntry { tag: 137, fields: &[FD::new("unk_137", I32, Big)] },
    TagEntry { tag: 138, fields: &[FD::new("unk_138", I32, Big)] },
    TagEntry { tag: 139, fields: &[FD::new("unk_139", I32, Big)] },
    TagEntry { tag: 140, fields: &[FD::new("unk_140", I32, Big)] },
    TagEntry { tag: 141, fields: &[FD::new("unk_141", I32, Big)] },
    TagEntry { tag: 142, fields: &[FD::new("unk_142", I32, Big)] },
    TagEntry { tag: 143, fields: &[FD::new("unk_143", I32, Big)] },
    TagEntry { tag: 80, fields: &[FD::new("beam", U8, Big)] },
    TagEntry { tag: 81, fields: &[FD::new("volt_scale", U8, Big)] },
    TagEntry { tag: 146, fields: &[FD::new("frequency_khz", U32, Big)] },
    TagEntry { tag: 83, fields: &[FD::new("unk_83", U8, Big)] },
    TagEntry { tag: 84, fields: &[FD::new("unk_84", U8, Big)] },
    TagEntry { tag: 149, fields: &[FD::new("unk_149", U32, Big)] },
    TagEntry { tag: 86, fields: &[FD::new("e_err", U8, Big)] },
    TagEntry { tag: 87, fields: &[FD::new("n_err", U8, Big)] },
    TagEntry { tag: 152, fields: &[FD::new("unk_152", U32, Big)] },
    TagEntry { tag: 153, fields: &[FD::new("f_min", U32, Big)] },
    TagEntry { tag: 154, fields: &[FD::new("f_max", U32, Big)] },
    TagEntry { tag: 155, fields: &[FD::new("unk_155", U32, Big)] },
    TagEntry { tag: 156, fields: &[FD::new("unk_156", I32, Big)] },
    TagEntry { tag: 157, fields: &[FD::new("unk_157", I32, Big)] },
    TagEntry { tag: 158, fields: &[FD::new("unk_158", I32, Big)] },
    TagEntry { tag: 159, fields: &[FD::new("unk_159", I32, Big)] },
    TagEntry { tag: 160, fields: &[FD::new("ping_sample_count", U32, Big)] },
];

/// Vendor-H frame header candidate lengths tried by the reader (SPEC_FULL.md §4.9), longest
/// (and only fully-specified) first: 152 is what this crate's own emitter writes; 144 and 136
/// are shorter legacy layouts observed in the field and accepted if they validate.
pub const VENDOR_H_CANDIDATE_HEADER_LENS: &[u64] = &[152, 144, 136];
