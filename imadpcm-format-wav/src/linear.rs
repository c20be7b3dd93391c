// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear PCM half of component C: parses and emits the envelope for format
//! tag 1, the container the codec reads from on encode and writes to on
//! decode/residual.

use imadpcm_core::errors::{decode_error, insufficient_buffer_error, unsupported_error, Result};
use imadpcm_core::io::ByteWriter;

use crate::chunks::{read_fmt_common, scan_chunks_until_data, WaveCursor, TAG_DATA, TAG_RIFF, TAG_WAVE};
use crate::WAVE_FORMAT_PCM;

/// A linear PCM WAVE file's format and the derived sample count per channel
/// (§3, "PCM file"). `data_format` is implicitly `LinearPCM`: this struct is
/// only ever constructed by this module's parse/emit functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFileFormat {
    pub num_channels: u16,
    pub sampling_rate: u32,
    pub bits_per_sample: u16,
    pub num_samples: u32,
}

/// Fixed size of the header this crate emits for linear PCM: no extension,
/// no `fact` chunk (§4.C).
const LINEAR_HEADER_BYTES: usize = 44;

/// Parses a linear PCM WAVE header. Returns the parsed format and the
/// absolute byte offset at which the `data` chunk's sample bytes begin.
///
/// Requires format tag 1; any other format tag is `Unsupported` (mapped to
/// `InvalidFormat` at the driver boundary, §7). Unknown chunks between
/// `fmt ` and `data` are skipped (§4.C, E4).
pub fn parse_linear_pcm_header(data: &[u8]) -> Result<(WavFileFormat, usize)> {
    let mut cursor = WaveCursor::new(data);
    let (common, fmt_len) = read_fmt_common(&mut cursor)?;

    if common.format_tag != WAVE_FORMAT_PCM {
        return unsupported_error("wav: linear pcm reader requires format tag 1");
    }

    // The fmt chunk read so far accounts for the fixed 16-byte prefix; if
    // the chunk declares more, it is an extension this reader does not
    // interpret and skips (§4.C).
    if fmt_len > 16 {
        cursor.skip(fmt_len - 16)?;
    }

    let found = scan_chunks_until_data(&mut cursor)?;

    let bytes_per_frame = u32::from(common.bits_per_sample / 8) * u32::from(common.num_channels);
    if bytes_per_frame == 0 {
        return decode_error("wav: invalid bits-per-sample/channel combination");
    }
    let num_samples = found.data_size / bytes_per_frame;

    let format = WavFileFormat {
        num_channels: common.num_channels,
        sampling_rate: common.sampling_rate,
        bits_per_sample: common.bits_per_sample,
        num_samples,
    };

    Ok((format, found.data_offset))
}

/// Emits a fixed, 44-byte linear PCM WAVE header (`RIFF`/`WAVE`/`fmt `/
/// `data`, no extension, no `fact`) into the front of `out`. `data_size` is
/// the number of bytes that will follow in the `data` chunk. Returns the
/// number of header bytes written.
///
/// Fails with `InsufficientBuffer` if `out` is smaller than the fixed header
/// size (§4.C).
pub fn emit_linear_pcm_header(format: &WavFileFormat, data_size: u32, out: &mut [u8]) -> Result<usize> {
    if out.len() < LINEAR_HEADER_BYTES {
        return insufficient_buffer_error();
    }

    let mut writer = ByteWriter::new(Vec::with_capacity(LINEAR_HEADER_BYTES));

    let byte_rate =
        format.sampling_rate * u32::from(format.bits_per_sample / 8) * u32::from(format.num_channels);
    let block_align = (format.bits_per_sample / 8) * format.num_channels;

    writer.write_tag(TAG_RIFF)?;
    writer.write_u32_le(LINEAR_HEADER_BYTES as u32 - 8 + data_size)?;
    writer.write_tag(TAG_WAVE)?;

    writer.write_tag(b"fmt ")?;
    writer.write_u32_le(16)?;
    writer.write_u16_le(WAVE_FORMAT_PCM)?;
    writer.write_u16_le(format.num_channels)?;
    writer.write_u32_le(format.sampling_rate)?;
    writer.write_u32_le(byte_rate)?;
    writer.write_u16_le(block_align)?;
    writer.write_u16_le(format.bits_per_sample)?;

    writer.write_tag(TAG_DATA)?;
    writer.write_u32_le(data_size)?;

    let header = writer.into_inner()?;
    debug_assert_eq!(header.len(), LINEAR_HEADER_BYTES);
    out[..header.len()].copy_from_slice(&header);

    Ok(header.len())
}
