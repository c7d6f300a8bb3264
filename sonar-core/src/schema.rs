//! Generic field descriptors used to interpret tag-discovered ping frames.
//!
//! Vendor-L's ping bodies are not a fixed C-style struct: which fields are present, and in
//! what order, is discovered once per recording by walking tag bytes (see `sonar-in`'s
//! `vendor_l::discover`). [`FieldDescriptor`] and [`FieldValue`] let the same interpreter
//! drive both that discovery walk and the per-ping parse.
use crate::byte_reader::ByteReader;
use crate::errors::SonarError;

/// Byte order of a field on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// The primitive shape of a field. The on-disk width is implied by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl FieldKind {
    /// Width of this field on disk, in bytes.
    pub fn width(self) -> usize {
        use FieldKind::*;
        match self {
            U8 | I8 => 1,
            U16 | I16 => 2,
            U32 | I32 | F32 => 4,
            U64 | I64 | F64 => 8,
        }
    }
}

/// A named, typed field at a known tag byte.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub endianness: Endianness,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind, endianness: Endianness) -> Self {
        FieldDescriptor {
            name,
            kind,
            endianness,
        }
    }

    pub fn width(&self) -> usize {
        self.kind.width()
    }
}

/// A decoded field value. Carries enough type information for CSV emission and for
/// bit-reinterpretation tricks used by a couple of Vendor-L fields (see SPEC_FULL.md's
/// "Ping Raw Field Assignment").
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl FieldValue {
    /// Reinterprets an unsigned integer field's bit pattern as an `f32`, used for the
    /// Vendor-L `track_cog`/`gps_speed` fields which share a tag slot with a `u4` encoding
    /// of an IEEE-754 float (see SPEC_FULL.md).
    pub fn bits_as_f32(self) -> Option<f32> {
        match self {
            FieldValue::U32(v) => Some(f32::from_bits(v)),
            FieldValue::I32(v) => Some(f32::from_bits(v as u32)),
            _ => None,
        }
    }

    pub fn as_i64(self) -> Option<i64> {
        match self {
            FieldValue::U8(v) => Some(v as i64),
            FieldValue::U16(v) => Some(v as i64),
            FieldValue::U32(v) => Some(v as i64),
            FieldValue::U64(v) => Some(v as i64),
            FieldValue::I8(v) => Some(v as i64),
            FieldValue::I16(v) => Some(v as i64),
            FieldValue::I32(v) => Some(v as i64),
            FieldValue::I64(v) => Some(v),
            FieldValue::F32(_) | FieldValue::F64(_) => None,
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            FieldValue::F32(v) => Some(v as f64),
            FieldValue::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }
}

/// Reads one field from `reader` according to `desc`.
pub fn read_field(reader: &mut ByteReader, desc: &FieldDescriptor) -> Result<FieldValue, SonarError> {
    use Endianness::*;
    use FieldKind::*;
    Ok(match (desc.kind, desc.endianness) {
        (U8, _) => FieldValue::U8(reader.read_u8()?),
        (I8, _) => FieldValue::I8(reader.read_i8()?),
        (U16, Little) => FieldValue::U16(reader.read_u16_le()?),
        (U16, Big) => FieldValue::U16(reader.read_u16_be()?),
        (I16, Little) => FieldValue::I16(reader.read_i16_le()?),
        (I16, Big) => FieldValue::I16(reader.read_i16_be()?),
        (U32, Little) => FieldValue::U32(reader.read_u32_le()?),
        (U32, Big) => FieldValue::U32(reader.read_u32_be()?),
        (I32, Little) => FieldValue::I32(reader.read_i32_le()?),
        (I32, Big) => FieldValue::I32(reader.read_i32_be()?),
        (U64, Little) => FieldValue::U64(reader.read_u64_le()?),
        (U64, Big) => FieldValue::U64(reader.read_u64_be()?),
        (I64, Little) => FieldValue::I64(i64::from_le_bytes(reader.read_bytes(8)?.try_into()?)),
        (I64, Big) => FieldValue::I64(i64::from_be_bytes(reader.read_bytes(8)?.try_into()?)),
        (F32, Little) => FieldValue::F32(reader.read_f32_le()?),
        (F32, Big) => FieldValue::F32(reader.read_f32_be()?),
        (F64, Little) => FieldValue::F64(reader.read_f64_le()?),
        (F64, Big) => FieldValue::F64(reader.read_f64_be()?),
    })
}

/// Writes `value`'s low bits into `buf` according to `desc`'s width and endianness. Used by
/// the Vendor-H emitter, which only ever writes integer-kinded fields (see
/// `vendor_h_schema::VENDOR_H_SON_REGISTRY`); floating-point descriptors are unsupported here.
pub fn write_field(buf: &mut Vec<u8>, desc: &FieldDescriptor, value: i64) {
    use Endianness::*;
    use FieldKind::*;
    match (desc.kind, desc.endianness) {
        (U8, _) | (I8, _) => buf.push(value as u8),
        (U16, Little) => buf.extend_from_slice(&(value as u16).to_le_bytes()),
        (U16, Big) => buf.extend_from_slice(&(value as u16).to_be_bytes()),
        (I16, Little) => buf.extend_from_slice(&(value as i16).to_le_bytes()),
        (I16, Big) => buf.extend_from_slice(&(value as i16).to_be_bytes()),
        (U32, Little) => buf.extend_from_slice(&(value as u32).to_le_bytes()),
        (U32, Big) => buf.extend_from_slice(&(value as u32).to_be_bytes()),
        (I32, Little) => buf.extend_from_slice(&(value as i32).to_le_bytes()),
        (I32, Big) => buf.extend_from_slice(&(value as i32).to_be_bytes()),
        (U64, Little) => buf.extend_from_slice(&(value as u64).to_le_bytes()),
        (U64, Big) => buf.extend_from_slice(&(value as u64).to_be_bytes()),
        (I64, Little) => buf.extend_from_slice(&value.to_le_bytes()),
        (I64, Big) => buf.extend_from_slice(&value.to_be_bytes()),
        (F32, _) | (F64, _) => unreachable!("no Vendor-H field is floating-point"),
    }
}

/// One entry of a tag-keyed schema registry: the tag byte and the ordered list of field
/// descriptors it introduces (most tags introduce exactly one field; a handful of Vendor-L
/// tags introduce a short composite of two or three, e.g. a one-byte length prefix followed
/// by the real value).
#[derive(Debug, Clone, Copy)]
pub struct TagEntry {
    pub tag: u8,
    pub fields: &'static [FieldDescriptor],
}

/// Looks up `tag` in a static registry table.
pub fn lookup_tag(registry: &'static [TagEntry], tag: u8) -> Option<&'static TagEntry> {
    registry.iter().find(|e| e.tag == tag)
}
