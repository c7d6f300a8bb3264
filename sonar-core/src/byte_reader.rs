//! A small bounds-checked cursor over a borrowed byte slice.
//!
//! [`ByteReader`] is deliberately generic over the slice's origin: a caller may back it
//! with a `memmap2::Mmap` deref or a plain `Vec<u8>`, so the parsing code in `sonar-in`
//! never has to know which.
use crate::errors::SonarError;

/// A cursor over a borrowed byte slice with bounds-checked typed reads.
///
/// All reads advance the internal position. Reads that would run past the end of `data`
/// return [`SonarError::UnexpectedEnd`] and leave the position unchanged.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Wraps `data`, with the cursor positioned at the start.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Total length of the underlying slice.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current absolute byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes still available after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Moves the cursor to an absolute offset.
    ///
    /// Seeking to `data.len()` exactly is allowed (an empty read range); seeking further
    /// returns [`SonarError::UnexpectedEnd`].
    pub fn seek(&mut self, absolute_offset: usize) -> Result<(), SonarError> {
        if absolute_offset > self.data.len() {
            return Err(SonarError::UnexpectedEnd {
                wanted: absolute_offset,
                have: self.data.len(),
            });
        }
        self.pos = absolute_offset;
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], SonarError> {
        if self.remaining() < n {
            return Err(SonarError::UnexpectedEnd {
                wanted: n,
                have: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads `n` raw bytes without interpreting them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], SonarError> {
        self.take(n)
    }

    pub fn read_u8(&mut self) -> Result<u8, SonarError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, SonarError> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, SonarError> {
        Ok(u16::from_le_bytes(self.take(2)?.try_into()?))
    }

    pub fn read_u16_be(&mut self) -> Result<u16, SonarError> {
        Ok(u16::from_be_bytes(self.take(2)?.try_into()?))
    }

    pub fn read_i16_le(&mut self) -> Result<i16, SonarError> {
        Ok(i16::from_le_bytes(self.take(2)?.try_into()?))
    }

    pub fn read_i16_be(&mut self) -> Result<i16, SonarError> {
        Ok(i16::from_be_bytes(self.take(2)?.try_into()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, SonarError> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into()?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, SonarError> {
        Ok(u32::from_be_bytes(self.take(4)?.try_into()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32, SonarError> {
        Ok(i32::from_le_bytes(self.take(4)?.try_into()?))
    }

    pub fn read_i32_be(&mut self) -> Result<i32, SonarError> {
        Ok(i32::from_be_bytes(self.take(4)?.try_into()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, SonarError> {
        Ok(u64::from_le_bytes(self.take(8)?.try_into()?))
    }

    pub fn read_u64_be(&mut self) -> Result<u64, SonarError> {
        Ok(u64::from_be_bytes(self.take(8)?.try_into()?))
    }

    pub fn read_f32_le(&mut self) -> Result<f32, SonarError> {
        Ok(f32::from_le_bytes(self.take(4)?.try_into()?))
    }

    pub fn read_f32_be(&mut self) -> Result<f32, SonarError> {
        Ok(f32::from_be_bytes(self.take(4)?.try_into()?))
    }

    pub fn read_f64_le(&mut self) -> Result<f64, SonarError> {
        Ok(f64::from_le_bytes(self.take(8)?.try_into()?))
    }

    pub fn read_f64_be(&mut self) -> Result<f64, SonarError> {
        Ok(f64::from_be_bytes(self.take(8)?.try_into()?))
    }
}
