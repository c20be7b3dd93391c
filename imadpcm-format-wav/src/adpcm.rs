// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IMA-ADPCM half of component C: parses and emits the envelope for format
//! tag 17. The `samples_per_block`/`bytes_per_sec` invariants here are the
//! same formulas `symphonia-format-wav`'s `WaveFormatChunk::packet_info`
//! computes for `CODEC_TYPE_ADPCM_IMA_WAV`; this crate keeps its own copy
//! rather than depending on the codec crate for it, the same separation the
//! teacher draws between its format and codec crates.

use imadpcm_core::errors::{decode_error, insufficient_buffer_error, invalid_argument_error, Result};
use imadpcm_core::io::ByteWriter;

use crate::chunks::{read_fmt_common, scan_chunks_until_data, WaveCursor, TAG_DATA, TAG_FACT, TAG_RIFF, TAG_WAVE};
use crate::WAVE_FORMAT_ADPCM_IMA;

/// Bits per sample an IMA-ADPCM stream always carries (§1, §3).
const ADPCM_BITS_PER_SAMPLE: u16 = 4;

/// Fixed size of the header this crate emits for IMA-ADPCM: `fmt ` with a
/// 2-byte extension (`samples_per_block`) plus a `fact` chunk (§4.C).
const ADPCM_HEADER_BYTES: usize = 60;

/// An IMA-ADPCM WAVE header (§3, "ADPCM header").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdpcmHeaderInfo {
    pub num_channels: u16,
    pub sampling_rate: u32,
    pub bytes_per_sec: u32,
    pub block_size: u16,
    pub bits_per_sample: u16,
    pub samples_per_block: u16,
    pub num_samples: u32,
    /// Byte offset from the start of the file at which sample data begins.
    /// Output-only on emit: always `ADPCM_HEADER_BYTES` for a header this
    /// crate writes itself.
    pub header_size: u32,
}

/// `samples_per_block = 1 + ((block_size - 4*num_channels) * 8) / (4*num_channels)`
/// (§3). `block_size` must be strictly greater than `4*num_channels` (room
/// for at least one per-channel header).
pub fn samples_per_block(block_size: u16, num_channels: u16) -> Result<u16> {
    let header_bytes = 4u32 * u32::from(num_channels);
    let block_size = u32::from(block_size);

    if block_size <= header_bytes {
        return invalid_argument_error("adpcm: block_size must exceed 4 * num_channels");
    }

    let value = 1 + ((block_size - header_bytes) * 8) / (4 * u32::from(num_channels));
    Ok(value as u16)
}

/// `data_chunk_size = block_size * num_blocks - tail_saved_bytes` (§4.C),
/// given:
/// ```text
/// num_blocks       = num_samples / samples_per_block + 1
/// tail_left        = samples_per_block - (num_samples mod samples_per_block)
/// tail_saved_bytes = ceil(tail_left * bits_per_sample / 8)
/// ```
/// Preserved verbatim from the spec, including its `+ 1` on `num_blocks`
/// (Design Notes' documented open question: this is the emit-side formula,
/// not the decode-side fallback estimate, and is not "fixed" here).
fn data_chunk_size(
    num_samples: u32,
    samples_per_block: u16,
    block_size: u16,
    bits_per_sample: u16,
) -> u32 {
    let samples_per_block = u64::from(samples_per_block);
    let num_samples = u64::from(num_samples);
    let num_blocks = num_samples / samples_per_block + 1;
    let tail_left = samples_per_block - (num_samples % samples_per_block);
    let tail_saved_bits = tail_left * u64::from(bits_per_sample);
    let tail_saved_bytes = (tail_saved_bits + 7) / 8;

    (u64::from(block_size) * num_blocks - tail_saved_bytes) as u32
}

impl AdpcmHeaderInfo {
    /// Derives a header from an encode configuration and the total sample
    /// count per channel (§3, "ADPCM encode parameters"; §4.G).
    pub fn for_encode(
        num_channels: u16,
        sampling_rate: u32,
        block_size: u16,
        num_samples: u32,
    ) -> Result<AdpcmHeaderInfo> {
        if !(1..=2).contains(&num_channels) {
            return invalid_argument_error("adpcm: num_channels must be 1 or 2");
        }

        let spb = samples_per_block(block_size, num_channels)?;
        let bytes_per_sec =
            (u64::from(block_size) * u64::from(sampling_rate) / u64::from(spb)) as u32;

        Ok(AdpcmHeaderInfo {
            num_channels,
            sampling_rate,
            bytes_per_sec,
            block_size,
            bits_per_sample: ADPCM_BITS_PER_SAMPLE,
            samples_per_block: spb,
            num_samples,
            header_size: ADPCM_HEADER_BYTES as u32,
        })
    }

    /// Bytes needed for the `data` chunk this header describes (§4.C).
    pub fn data_chunk_size(&self) -> u32 {
        data_chunk_size(self.num_samples, self.samples_per_block, self.block_size, self.bits_per_sample)
    }
}

/// Parses an IMA-ADPCM WAVE header. Requires format tag 17 and at most two
/// channels. Recovers the total per-channel sample count from a `fact`
/// chunk if present; otherwise falls back to
/// `(data_size / block_size + 1) * samples_per_block`, which over-counts by
/// up to one block (§4.C, §9's documented ambiguity — preserved, not fixed).
pub fn parse_adpcm_header(data: &[u8]) -> Result<AdpcmHeaderInfo> {
    let mut cursor = WaveCursor::new(data);
    let (common, fmt_len) = read_fmt_common(&mut cursor)?;

    if common.format_tag != WAVE_FORMAT_ADPCM_IMA {
        return decode_error("adpcm (wav): format tag is not IMA-ADPCM (17)");
    }
    if !(1..=2).contains(&common.num_channels) {
        return decode_error("adpcm (wav): num_channels must be 1 or 2");
    }
    if common.bits_per_sample != ADPCM_BITS_PER_SAMPLE {
        return decode_error("adpcm (wav): bits_per_sample must be 4");
    }
    if fmt_len != 20 {
        return decode_error("adpcm (wav): malformed fmt chunk, expected 20 bytes");
    }

    let extension_size = cursor.read_u16_le()?;
    if extension_size != 2 {
        return decode_error("adpcm (wav): fmt chunk extension size must be 2");
    }
    let samples_per_block = cursor.read_u16_le()?;

    let found = scan_chunks_until_data(&mut cursor)?;

    let num_samples = match found.fact_num_samples {
        Some(n) => n,
        None => (found.data_size / common.block_align + 1) * u32::from(samples_per_block),
    };

    Ok(AdpcmHeaderInfo {
        num_channels: common.num_channels,
        sampling_rate: common.sampling_rate,
        bytes_per_sec: common.byte_rate,
        block_size: common.block_align,
        bits_per_sample: common.bits_per_sample,
        samples_per_block,
        num_samples,
        header_size: found.data_offset as u32,
    })
}

/// Emits the fixed, 60-byte IMA-ADPCM WAVE header (`fmt ` with extension,
/// `fact`, `data`) into the front of `out`. Fails with `InvalidFormat` if
/// `bits_per_sample != 4`, and with `InsufficientBuffer` if `out` is
/// smaller than the fixed header size (§4.C).
pub fn emit_adpcm_header(header: &AdpcmHeaderInfo, out: &mut [u8]) -> Result<usize> {
    if header.bits_per_sample != ADPCM_BITS_PER_SAMPLE {
        return decode_error("adpcm (wav): bits_per_sample must be 4 to emit a header");
    }
    if out.len() < ADPCM_HEADER_BYTES {
        return insufficient_buffer_error();
    }

    let data_size = header.data_chunk_size();

    let mut writer = ByteWriter::new(Vec::with_capacity(ADPCM_HEADER_BYTES));

    writer.write_tag(TAG_RIFF)?;
    writer.write_u32_le(ADPCM_HEADER_BYTES as u32 - 8 + data_size)?;
    writer.write_tag(TAG_WAVE)?;

    writer.write_tag(b"fmt ")?;
    writer.write_u32_le(20)?;
    writer.write_u16_le(WAVE_FORMAT_ADPCM_IMA)?;
    writer.write_u16_le(header.num_channels)?;
    writer.write_u32_le(header.sampling_rate)?;
    writer.write_u32_le(header.bytes_per_sec)?;
    writer.write_u16_le(header.block_size)?;
    writer.write_u16_le(header.bits_per_sample)?;
    writer.write_u16_le(2)?;
    writer.write_u16_le(header.samples_per_block)?;

    writer.write_tag(TAG_FACT)?;
    writer.write_u32_le(4)?;
    writer.write_u32_le(header.num_samples)?;

    writer.write_tag(TAG_DATA)?;
    writer.write_u32_le(data_size)?;

    let bytes = writer.into_inner()?;
    debug_assert_eq!(bytes.len(), ADPCM_HEADER_BYTES);
    out[..bytes.len()].copy_from_slice(&bytes);

    Ok(bytes.len())
}
