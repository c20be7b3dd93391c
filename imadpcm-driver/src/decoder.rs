// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The decoder half of component G, re-expressing
//! `IMAADPCMWAVDecoder_DecodeWhole` (`examples/original_source/
//! ima_adpcm.h`) as a single entry point. Decoding never needs caller
//! configuration beyond the header it is handed (unlike the encoder, which
//! must be told the sampling rate and block size up front), so this handle
//! carries no state; it exists as a unit struct purely to keep the
//! encoder/decoder API pair symmetric.

use imadpcm_codec_adpcm::{decode_block_mono, decode_block_stereo, ChannelState};
use imadpcm_core::errors::{insufficient_buffer_error, invalid_argument_error, Result};
use imadpcm_format_wav::AdpcmHeaderInfo;

/// The ADPCM decoder handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdpcmDecoder;

impl AdpcmDecoder {
    pub fn new() -> Self {
        AdpcmDecoder
    }

    /// Decodes every block in `data` (the `data` chunk's payload, not the
    /// whole file) into `out`, one row per channel, stopping once
    /// `header.num_samples` samples have been produced per channel or `data`
    /// is exhausted, whichever comes first.
    ///
    /// Fails with `InvalidArgument` if `out`'s row count doesn't match
    /// `header.num_channels`, and `InsufficientBuffer` if any row is shorter
    /// than `header.num_samples` (§4.G).
    pub fn decode_whole(&self, header: &AdpcmHeaderInfo, data: &[u8], out: &mut [&mut [i16]]) -> Result<usize> {
        let num_channels = header.num_channels as usize;
        if out.len() != num_channels {
            return invalid_argument_error("adpcm decoder: output row count must match num_channels");
        }

        let total_samples = header.num_samples as usize;
        for row in out.iter() {
            if row.len() < total_samples {
                return insufficient_buffer_error();
            }
        }

        let block_size = header.block_size as usize;
        let mut cursor = 0usize;
        let mut produced = 0usize;

        match num_channels {
            1 => {
                let mut state = ChannelState::new();
                while cursor < data.len() && produced < total_samples {
                    let take_bytes = (data.len() - cursor).min(block_size);
                    let block = &data[cursor..cursor + take_bytes];
                    let want = (total_samples - produced).min(samples_in_block(take_bytes, 1));
                    let dest = &mut out[0][produced..produced + want];
                    let got = decode_block_mono(block, &mut state, dest)?;
                    produced += got;
                    cursor += take_bytes;
                }
            }
            2 => {
                let mut states = [ChannelState::new(), ChannelState::new()];
                while cursor < data.len() && produced < total_samples {
                    let take_bytes = (data.len() - cursor).min(block_size);
                    let block = &data[cursor..cursor + take_bytes];
                    let want = (total_samples - produced).min(samples_in_block(take_bytes, 2));

                    let (left_out, right_out) = out.split_at_mut(1);
                    let left_dest = &mut left_out[0][produced..produced + want];
                    let right_dest = &mut right_out[0][produced..produced + want];
                    let got = decode_block_stereo(block, &mut states, [left_dest, right_dest])?;
                    produced += got;
                    cursor += take_bytes;
                }
            }
            _ => return invalid_argument_error("adpcm decoder: num_channels must be 1 or 2"),
        }

        Ok(produced)
    }
}

/// Samples recoverable from a block of `data_size` bytes: one header sample
/// plus two nibbles per payload byte for mono; for stereo each payload byte
/// still yields two nibbles, but only for the one channel it belongs to (the
/// interleave alternates channels every 4 bytes), so per channel it is one
/// sample per payload byte, not per two (§4.F).
fn samples_in_block(data_size: usize, num_channels: usize) -> usize {
    let header_bytes = 4 * num_channels;
    if data_size <= header_bytes {
        return 0;
    }
    let payload = data_size - header_bytes;
    if num_channels == 1 {
        1 + payload * 2
    } else {
        1 + payload
    }
}
