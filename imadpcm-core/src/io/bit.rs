// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component B: a buffered, most-significant-bit-first bit reader and writer
//! over any `Read`/`Write` source, with an internal ~10 KiB staging buffer.
//!
//! Higher components never address a real file directly (file open/read/
//! write is an external collaborator per the scope note); in this crate the
//! `R`/`W` type parameter is always a cursor over an in-memory buffer, but
//! the abstraction is kept generic the way `symphonia_core::io`'s readers
//! are, so the buffering and refill logic is exercised the same way it would
//! be against a real file.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::errors::{insufficient_data_error, invalid_argument_error, Result};

/// Size of the internal staging buffer. Matches the ~10 KiB figure in §4.B.
const STAGING_CAPACITY: usize = 10 * 1024;

/// Reads individual bits, most-significant-bit first, out of an underlying
/// byte stream.
pub struct BitReader<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    len: usize,
    cur: u8,
    nbits: u32,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        BitReader { inner, buf: vec![0u8; STAGING_CAPACITY], pos: 0, len: 0, cur: 0, nbits: 0 }
    }

    fn refill(&mut self) -> Result<()> {
        if self.pos >= self.len {
            self.len = self.inner.read(&mut self.buf)?;
            self.pos = 0;
            if self.len == 0 {
                return insufficient_data_error();
            }
        }
        Ok(())
    }

    fn next_byte(&mut self) -> Result<u8> {
        self.refill()?;
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Gets the next `n` bits (1 <= n <= 64), right-aligned in the result,
    /// most-significant-bit first.
    pub fn get_bits(&mut self, n: u32) -> Result<u64> {
        if n == 0 || n > 64 {
            return invalid_argument_error("bit count must be in 1..=64");
        }

        let mut out: u64 = 0;
        let mut remaining = n;

        while remaining > 0 {
            if self.nbits == 0 {
                self.cur = self.next_byte()?;
                self.nbits = 8;
            }

            let take = remaining.min(self.nbits);
            let shift = self.nbits - take;
            let mask = if take == 8 { 0xffu8 } else { (1u8 << take) - 1 };
            let bits = (self.cur >> shift) & mask;

            out = (out << take) | u64::from(bits);
            self.nbits -= take;
            remaining -= take;
        }

        Ok(out)
    }

    /// Gets `k` little-endian bytes (1 <= k <= 8), i.e. the first byte read
    /// off the stream is the least-significant byte of the result. Defined
    /// as the byte-reversal of the `k * 8`-bit most-significant-bit-first
    /// read (§4.B's endianness helper).
    pub fn get_le_bytes(&mut self, k: u32) -> Result<u64> {
        if k == 0 || k > 8 {
            return invalid_argument_error("byte count must be in 1..=8");
        }

        let mut out: u64 = 0;
        for i in 0..k {
            let byte = self.get_bits(8)?;
            out |= byte << (8 * i);
        }
        Ok(out)
    }

    /// Discards any partially-consumed byte, realigning to the next byte
    /// boundary.
    pub fn realign(&mut self) {
        self.nbits = 0;
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Seeks the underlying stream. The buffer is invalidated; the next read
    /// refills from disk. `offset` is expressed in the caller's absolute
    /// view of the stream, adjusted here by the bytes already buffered but
    /// not yet handed out so the caller never has to account for buffering.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        // `self.pos` already accounts for the current partially-consumed byte
        // (it was pulled out of `buf` into `cur`), so the only bytes the
        // inner stream has read ahead of the caller's logical position are
        // the remaining, wholly-unread bytes in the buffer.
        let buffered_unconsumed = (self.len - self.pos) as i64;

        let adjusted = match pos {
            SeekFrom::Current(off) => SeekFrom::Current(off - buffered_unconsumed),
            other => other,
        };

        let new_pos = self.inner.seek(adjusted)?;
        self.pos = 0;
        self.len = 0;
        self.nbits = 0;
        self.cur = 0;

        Ok(new_pos)
    }
}

/// Assembles individual bits, most-significant-bit first, into bytes and
/// writes them to an underlying sink.
pub struct BitWriter<W> {
    inner: W,
    buf: Vec<u8>,
    stage: u8,
    nbits: u32,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        BitWriter { inner, buf: Vec::with_capacity(STAGING_CAPACITY), stage: 0, nbits: 0 }
    }

    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.buf.push(byte);
        if self.buf.len() >= STAGING_CAPACITY {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Puts the low `n` bits (1 <= n <= 64) of `value`, most-significant-bit
    /// first.
    pub fn put_bits(&mut self, n: u32, value: u64) -> Result<()> {
        if n == 0 || n > 64 {
            return invalid_argument_error("bit count must be in 1..=64");
        }

        let mut remaining = n;
        while remaining > 0 {
            let bit = (value >> (remaining - 1)) & 1;
            self.stage = (self.stage << 1) | bit as u8;
            self.nbits += 1;
            remaining -= 1;

            if self.nbits == 8 {
                let byte = self.stage;
                self.stage = 0;
                self.nbits = 0;
                self.push_byte(byte)?;
            }
        }

        Ok(())
    }

    /// Puts `k` little-endian bytes (1 <= k <= 8) of `value`, i.e. the
    /// least-significant byte is written to the stream first.
    pub fn put_le_bytes(&mut self, k: u32, value: u64) -> Result<()> {
        if k == 0 || k > 8 {
            return invalid_argument_error("byte count must be in 1..=8");
        }

        for i in 0..k {
            let byte = (value >> (8 * i)) & 0xff;
            self.put_bits(8, byte)?;
        }
        Ok(())
    }

    /// Zero-pads any partial byte to a byte boundary and writes out the
    /// remaining staged bytes.
    pub fn flush(&mut self) -> Result<()> {
        if self.nbits > 0 {
            let byte = self.stage << (8 - self.nbits);
            self.stage = 0;
            self.nbits = 0;
            self.buf.push(byte);
        }

        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }

        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn get_bits_reads_msb_first() {
        // 0b1011_0010
        let mut reader = BitReader::new(Cursor::new(vec![0b1011_0010u8]));
        assert_eq!(reader.get_bits(1).unwrap(), 1);
        assert_eq!(reader.get_bits(3).unwrap(), 0b011);
        assert_eq!(reader.get_bits(4).unwrap(), 0b0010);
    }

    #[test]
    fn get_bits_crosses_byte_boundary() {
        let mut reader = BitReader::new(Cursor::new(vec![0b1111_0000, 0b0000_1111]));
        assert_eq!(reader.get_bits(8).unwrap(), 0b1111_0000);
        assert_eq!(reader.get_bits(8).unwrap(), 0b0000_1111);
    }

    #[test]
    fn get_bits_12_spans_two_bytes() {
        let mut reader = BitReader::new(Cursor::new(vec![0xab, 0xcd]));
        assert_eq!(reader.get_bits(12).unwrap(), 0xabc);
        assert_eq!(reader.get_bits(4).unwrap(), 0xd);
    }

    #[test]
    fn rejects_out_of_range_bit_counts() {
        let mut reader = BitReader::new(Cursor::new(vec![0u8; 16]));
        assert!(reader.get_bits(0).is_err());
        assert!(reader.get_bits(65).is_err());
    }

    #[test]
    fn put_bits_assembles_bytes_msb_first() {
        let mut writer = BitWriter::new(Vec::new());
        writer.put_bits(1, 1).unwrap();
        writer.put_bits(3, 0b011).unwrap();
        writer.put_bits(4, 0b0010).unwrap();
        let out = writer.into_inner().unwrap();
        assert_eq!(out, vec![0b1011_0010]);
    }

    #[test]
    fn flush_pads_partial_byte_with_zeros() {
        let mut writer = BitWriter::new(Vec::new());
        writer.put_bits(3, 0b101).unwrap();
        let out = writer.into_inner().unwrap();
        assert_eq!(out, vec![0b1010_0000]);
    }

    #[test]
    fn le_bytes_round_trip() {
        let mut writer = BitWriter::new(Vec::new());
        writer.put_le_bytes(4, 0x1234_5678).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes, vec![0x78, 0x56, 0x34, 0x12]);

        let mut reader = BitReader::new(Cursor::new(bytes));
        assert_eq!(reader.get_le_bytes(4).unwrap(), 0x1234_5678);
    }

    #[test]
    fn seek_invalidates_buffer() {
        let mut reader = BitReader::new(Cursor::new(vec![0xaa, 0xbb, 0xcc, 0xdd]));
        assert_eq!(reader.get_bits(8).unwrap(), 0xaa);
        reader.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(reader.get_bits(8).unwrap(), 0xcc);
    }
}
