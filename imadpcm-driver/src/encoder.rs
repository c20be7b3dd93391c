// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The encoder half of component G: a two-phase "configure, then drive"
//! handle, mirroring `IMAADPCMWAVEncoder_SetEncodeParameter` +
//! `IMAADPCMWAVEncoder_EncodeWhole` from the C reference
//! (`examples/original_source/ima_adpcm.h`). The handle owns no backing
//! buffer of its own (unlike the C reference's work-area placement-new):
//! per Design Notes, a safe owning struct replaces the work-buffer/
//! `_CalculateWorkSize` mechanics wholesale.

use imadpcm_codec_adpcm::{encode_block_mono, encode_block_stereo, ChannelState};
use imadpcm_core::errors::{insufficient_buffer_error, invalid_argument_error, Error, Result};
use imadpcm_format_wav::{emit_adpcm_header, AdpcmHeaderInfo};

/// The subset of an ADPCM header the caller controls; the rest (samples per
/// block, bytes per second, total sample count) is derived at encode time
/// (§3, "ADPCM encode parameters").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParameters {
    pub num_channels: u16,
    pub sampling_rate: u32,
    /// Always 4; kept as an explicit field (rather than hardcoded) so the
    /// encoder can reject a caller's mistaken value the way the block size
    /// and channel count are validated.
    pub bits_per_sample: u16,
    pub block_size: u16,
}

/// The ADPCM encoder handle. Must be configured via [`set_encode_parameter`]
/// before [`encode_whole`] is driven; doing otherwise is `ParameterNotSet`
/// (§4.G, §7).
///
/// [`set_encode_parameter`]: AdpcmEncoder::set_encode_parameter
/// [`encode_whole`]: AdpcmEncoder::encode_whole
#[derive(Debug, Default)]
pub struct AdpcmEncoder {
    params: Option<EncodeParameters>,
}

impl AdpcmEncoder {
    pub fn new() -> Self {
        AdpcmEncoder { params: None }
    }

    /// Validates and stores the encode configuration for subsequent calls
    /// to [`encode_whole`](Self::encode_whole) and
    /// [`header_for`](Self::header_for).
    pub fn set_encode_parameter(&mut self, params: EncodeParameters) -> Result<()> {
        if params.bits_per_sample != 4 {
            return invalid_argument_error("adpcm encoder: bits_per_sample must be 4");
        }
        if !(1..=2).contains(&params.num_channels) {
            return invalid_argument_error("adpcm encoder: num_channels must be 1 or 2");
        }
        self.params = Some(params);
        Ok(())
    }

    fn params(&self) -> Result<EncodeParameters> {
        match self.params {
            Some(params) => Ok(params),
            None => Err(Error::ParameterNotSet),
        }
    }

    /// Derives the ADPCM header this encoder would emit for `num_samples`
    /// samples per channel, given the stored configuration.
    pub fn header_for(&self, num_samples: u32) -> Result<AdpcmHeaderInfo> {
        let params = self.params()?;
        AdpcmHeaderInfo::for_encode(params.num_channels, params.sampling_rate, params.block_size, num_samples)
    }

    /// Encodes an entire file: the WAVE header followed by every block.
    /// `channels` is channel-major, one row per configured channel, each row
    /// the same length. Returns the number of bytes actually written to
    /// `out` (the caller's buffer may be larger than needed).
    ///
    /// Fails with `ParameterNotSet` if driven before configuration,
    /// `InvalidArgument` if `channels` doesn't match the configured channel
    /// count or its rows differ in length, and `InsufficientBuffer` if `out`
    /// cannot hold the header plus every block (§4.G).
    pub fn encode_whole(&self, channels: &[Vec<i16>], out: &mut [u8]) -> Result<usize> {
        let params = self.params()?;

        if channels.len() != params.num_channels as usize {
            return invalid_argument_error("adpcm encoder: channel count mismatch");
        }
        let num_samples = channels.first().map_or(0, |c| c.len());
        if channels.iter().any(|c| c.len() != num_samples) {
            return invalid_argument_error("adpcm encoder: channel rows must be equal length");
        }

        let header = AdpcmHeaderInfo::for_encode(
            params.num_channels,
            params.sampling_rate,
            params.block_size,
            num_samples as u32,
        )?;

        let required = header.header_size as usize + header.data_chunk_size() as usize;
        if out.len() < required {
            return insufficient_buffer_error();
        }

        let mut cursor = emit_adpcm_header(&header, out)?;
        let samples_per_block = header.samples_per_block as usize;
        let mut produced = 0usize;

        match params.num_channels {
            1 => {
                let mut state = ChannelState::new();
                while produced < num_samples {
                    let take = (num_samples - produced).min(samples_per_block);
                    let input = &channels[0][produced..produced + take];
                    let written = encode_block_mono(input, &mut state, &mut out[cursor..])?;
                    cursor += written;
                    produced += take;
                }
            }
            2 => {
                let mut states = [ChannelState::new(), ChannelState::new()];
                while produced < num_samples {
                    let take = (num_samples - produced).min(samples_per_block);
                    let left = &channels[0][produced..produced + take];
                    let right = &channels[1][produced..produced + take];
                    let written = encode_block_stereo([left, right], &mut states, &mut out[cursor..])?;
                    cursor += written;
                    produced += take;
                }
            }
            _ => unreachable!("validated to be 1 or 2 in set_encode_parameter"),
        }

        Ok(cursor)
    }
}
