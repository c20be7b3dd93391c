// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared RIFF chunk plumbing used by both the linear-PCM and IMA-ADPCM
//! header parsers: the `RIFF`/`WAVE`/`fmt ` prologue, the fixed 16-byte
//! common `fmt ` fields, and the unknown-chunk-skipping search for `fact`/
//! `data`. Grounded on `symphonia-format-wav::chunks::ChunksReader`, adapted
//! from its generic tag-dispatch trait to a small sequential scan since this
//! crate only ever looks for two chunk kinds after `fmt `.

use std::io::Cursor;

use log::info;

use imadpcm_core::errors::{decode_error, insufficient_data_error, Result};
use imadpcm_core::io::ByteReader;

pub(crate) const TAG_RIFF: &[u8; 4] = b"RIFF";
pub(crate) const TAG_WAVE: &[u8; 4] = b"WAVE";
pub(crate) const TAG_FMT: &[u8; 4] = b"fmt ";
pub(crate) const TAG_FACT: &[u8; 4] = b"fact";
pub(crate) const TAG_DATA: &[u8; 4] = b"data";

/// A little-endian byte reader over an in-memory WAVE buffer that tracks its
/// own absolute position, so a parser can recover the offset at which
/// sample data begins without querying the bit layer's internal buffering.
pub(crate) struct WaveCursor<'a> {
    reader: ByteReader<Cursor<&'a [u8]>>,
    pos: usize,
    len: usize,
}

impl<'a> WaveCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        WaveCursor { reader: ByteReader::new(Cursor::new(data)), pos: 0, len: data.len() }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn require(&self, count: usize) -> Result<()> {
        if self.pos + count > self.len {
            return insufficient_data_error();
        }
        Ok(())
    }

    pub(crate) fn read_tag(&mut self) -> Result<[u8; 4]> {
        self.require(4)?;
        let tag = self.reader.read_tag()?;
        self.pos += 4;
        Ok(tag)
    }

    pub(crate) fn expect_tag(&mut self, expected: &[u8; 4]) -> Result<()> {
        let tag = self.read_tag()?;
        if &tag != expected {
            return decode_error("wav: missing expected riff chunk tag");
        }
        Ok(())
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16> {
        self.require(2)?;
        let value = self.reader.read_u16_le()?;
        self.pos += 2;
        Ok(value)
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32> {
        self.require(4)?;
        let value = self.reader.read_u32_le()?;
        self.pos += 4;
        Ok(value)
    }

    pub(crate) fn skip(&mut self, count: u32) -> Result<()> {
        self.require(count as usize)?;
        self.reader.ignore_bytes(u64::from(count))?;
        self.pos += count as usize;
        Ok(())
    }
}

/// The fixed, 16-byte common prefix of a `fmt ` chunk, present regardless of
/// format tag.
pub(crate) struct FmtCommon {
    pub(crate) format_tag: u16,
    pub(crate) num_channels: u16,
    pub(crate) sampling_rate: u32,
    pub(crate) byte_rate: u32,
    pub(crate) block_align: u16,
    pub(crate) bits_per_sample: u16,
}

/// Reads the `RIFF` size-prefixed envelope, the `WAVE` form tag, and the
/// `fmt ` chunk's common 16-byte prefix. Returns the parsed prefix and the
/// `fmt ` chunk's declared length (its caller uses this to know how much of
/// the chunk, if any, remains to be read as a format-specific extension).
pub(crate) fn read_fmt_common(cursor: &mut WaveCursor<'_>) -> Result<(FmtCommon, u32)> {
    cursor.expect_tag(TAG_RIFF)?;
    let _riff_size = cursor.read_u32_le()?;
    cursor.expect_tag(TAG_WAVE)?;

    cursor.expect_tag(TAG_FMT)?;
    let fmt_len = cursor.read_u32_le()?;
    if fmt_len < 16 {
        return decode_error("wav: malformed fmt chunk");
    }

    let format_tag = cursor.read_u16_le()?;
    let num_channels = cursor.read_u16_le()?;
    let sampling_rate = cursor.read_u32_le()?;
    let byte_rate = cursor.read_u32_le()?;
    let block_align = cursor.read_u16_le()?;
    let bits_per_sample = cursor.read_u16_le()?;

    Ok((
        FmtCommon { format_tag, num_channels, sampling_rate, byte_rate, block_align, bits_per_sample },
        fmt_len,
    ))
}

/// What was found while scanning chunks after `fmt `.
pub(crate) struct ChunksAfterFmt {
    /// Total sample count per channel, if a `fact` chunk was encountered.
    pub(crate) fact_num_samples: Option<u32>,
    /// Declared length of the `data` chunk.
    pub(crate) data_size: u32,
    /// Absolute byte offset of the first byte of sample data.
    pub(crate) data_offset: usize,
}

/// Skips unknown chunks (logging each one, as `ChunksReader::next` does)
/// until a `data` chunk is found, recording a `fact` chunk's sample count
/// along the way if one is seen first (§4.C).
pub(crate) fn scan_chunks_until_data(cursor: &mut WaveCursor<'_>) -> Result<ChunksAfterFmt> {
    let mut fact_num_samples = None;

    loop {
        let tag = cursor.read_tag()?;
        let len = cursor.read_u32_le()?;

        if &tag == TAG_FACT {
            if len != 4 {
                return decode_error("wav: malformed fact chunk");
            }
            fact_num_samples = Some(cursor.read_u32_le()?);
        }
        else if &tag == TAG_DATA {
            let data_offset = cursor.pos();
            return Ok(ChunksAfterFmt { fact_num_samples, data_size: len, data_offset });
        }
        else {
            info!(
                "imadpcm: ignoring unknown chunk: tag={}, len={}.",
                String::from_utf8_lossy(&tag),
                len
            );
            cursor.skip(len)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_skips_unknown_chunks_before_data() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(b"INFO");
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&10u32.to_le_bytes());

        let mut cursor = WaveCursor::new(&bytes);
        let found = scan_chunks_until_data(&mut cursor).unwrap();
        assert_eq!(found.data_size, 10);
        assert!(found.fact_num_samples.is_none());
    }

    #[test]
    fn scan_records_fact_chunk_seen_before_data() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"fact");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&2048u32.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&1031u32.to_le_bytes());

        let mut cursor = WaveCursor::new(&bytes);
        let found = scan_chunks_until_data(&mut cursor).unwrap();
        assert_eq!(found.fact_num_samples, Some(2048));
        assert_eq!(found.data_size, 1031);
    }
}
