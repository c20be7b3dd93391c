// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Glue between component D (the PCM bit-depth converter) and the
//! ADPCM core's 16-bit sample domain: reading an interleaved packed-PCM
//! buffer into channel-major, canonical-narrowed-to-16-bit sample rows, and
//! the reverse for writing decoded/residual output.

use imadpcm_core::errors::{insufficient_data_error, Result};
use imadpcm_core::sample::BitDepth;
use imadpcm_format_wav::WavFileFormat;

/// Reads `format.num_samples` interleaved frames of `format.num_channels`
/// starting at `data_offset`, converts each sample to the canonical 32-bit
/// representation via `depth`, and narrows it to the 16-bit domain the
/// ADPCM core operates in (the "narrow to 16-bit" step of the encode data
/// flow, §2).
pub(crate) fn read_channels_narrowed_to_i16(
    pcm: &[u8],
    data_offset: usize,
    format: &WavFileFormat,
    depth: BitDepth,
) -> Result<Vec<Vec<i16>>> {
    let num_channels = format.num_channels as usize;
    let num_samples = format.num_samples as usize;
    let sample_bytes = depth.bytes();
    let frame_bytes = sample_bytes * num_channels;

    let required = data_offset + num_samples * frame_bytes;
    if pcm.len() < required {
        return insufficient_data_error();
    }

    let mut channels: Vec<Vec<i16>> = (0..num_channels).map(|_| Vec::with_capacity(num_samples)).collect();

    let mut pos = data_offset;
    for _frame in 0..num_samples {
        for channel in channels.iter_mut() {
            let canonical = depth.to_canonical(&pcm[pos..pos + sample_bytes]);
            channel.push((canonical >> 16) as i16);
            pos += sample_bytes;
        }
    }

    Ok(channels)
}

/// Widens channel-major 16-bit samples back to canonical 32-bit and packs
/// them, interleaved, at `depth` into `out` starting at `out_offset`.
pub(crate) fn write_channels_widened_from_i16(
    channels: &[Vec<i16>],
    depth: BitDepth,
    out: &mut [u8],
    out_offset: usize,
) {
    let num_channels = channels.len();
    let num_samples = channels.first().map_or(0, |c| c.len());
    let sample_bytes = depth.bytes();

    let mut pos = out_offset;
    for frame in 0..num_samples {
        for channel in channels {
            let canonical = i32::from(channel[frame]) << 16;
            depth.from_canonical(canonical, &mut out[pos..pos + sample_bytes]);
            pos += sample_bytes;
        }
    }
}
