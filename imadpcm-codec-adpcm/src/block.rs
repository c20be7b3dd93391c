// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component F: the mono and stereo ADPCM block framer.
//!
//! Grounded on `symphonia-codec-adpcm`'s `decode_mono`/`decode_stereo` for
//! the header layout and the stereo interleave arithmetic
//! (`channel = (index/4) & 1`, `offset = (index/8) * 8`,
//! `byte = index % 4`); the encode direction and the reserved-byte
//! rejection on decode have no teacher counterpart and are this crate's own
//! (§4.F, Design Notes).

use imadpcm_core::errors::{
    decode_error, insufficient_buffer_error, insufficient_data_error, invalid_argument_error,
    Result,
};

use crate::state::ChannelState;

/// Size of a mono block's per-channel header: 16-bit predictor, 8-bit step
/// index, 8-bit reserved.
pub const MONO_HEADER_BYTES: usize = 4;
/// Size of a stereo block's header: one `MONO_HEADER_BYTES` header per
/// channel.
pub const STEREO_HEADER_BYTES: usize = 2 * MONO_HEADER_BYTES;

fn read_channel_header(bytes: &[u8]) -> Result<(i16, i32, u8)> {
    let predictor = i16::from_le_bytes([bytes[0], bytes[1]]);
    let step_index = i32::from(bytes[2]);
    let reserved = bytes[3];
    Ok((predictor, step_index, reserved))
}

fn write_channel_header(out: &mut [u8], predictor: i16, step_index: i8) {
    out[0..2].copy_from_slice(&predictor.to_le_bytes());
    out[2] = step_index as u8;
    out[3] = 0;
}

/// Decodes one mono block. `out` is sized to the number of samples the
/// driver wants from this block (`min(remaining_total, samples_per_block)`);
/// writes beyond that length are never attempted. Returns the number of
/// samples actually written, which is `out.len()` unless `data` runs out
/// first.
pub fn decode_block_mono(data: &[u8], state: &mut ChannelState, out: &mut [i16]) -> Result<usize> {
    if data.len() < MONO_HEADER_BYTES {
        return insufficient_data_error();
    }
    if out.is_empty() {
        return insufficient_buffer_error();
    }

    let (predictor, step_index, reserved) = read_channel_header(&data[0..MONO_HEADER_BYTES])?;
    if reserved != 0 {
        return decode_error("adpcm (ima): reserved byte must be zero");
    }
    state.reset_from_header(predictor, step_index)?;

    out[0] = state.predictor;
    let mut produced = 1usize;

    let data_bytes = data.len() - MONO_HEADER_BYTES;
    for byte_idx in 0..data_bytes {
        let byte = data[MONO_HEADER_BYTES + byte_idx];

        let lo = state.decode_nibble(byte & 0x0f);
        let pos_lo = 1 + byte_idx * 2;
        if pos_lo < out.len() {
            out[pos_lo] = lo;
            produced = produced.max(pos_lo + 1);
        }

        let hi = state.decode_nibble(byte >> 4);
        let pos_hi = pos_lo + 1;
        if pos_hi < out.len() {
            out[pos_hi] = hi;
            produced = produced.max(pos_hi + 1);
        }
    }

    Ok(produced)
}

/// Encodes one mono block from `input` (length <= the caller's
/// `samples_per_block`). Returns the number of bytes written to `out`
/// (header plus packed nibbles).
pub fn encode_block_mono(input: &[i16], state: &mut ChannelState, out: &mut [u8]) -> Result<usize> {
    if input.is_empty() {
        return invalid_argument_error("encode_block_mono requires at least one sample");
    }
    if out.len() < MONO_HEADER_BYTES {
        return insufficient_buffer_error();
    }

    state.predictor = input[0];
    write_channel_header(&mut out[0..MONO_HEADER_BYTES], state.predictor, state.step_index);

    let new_samples = input.len() - 1;
    let data_bytes = (new_samples + 1) / 2;
    let required = MONO_HEADER_BYTES + data_bytes;
    if out.len() < required {
        return insufficient_buffer_error();
    }

    for byte_idx in 0..data_bytes {
        let i_lo = 1 + byte_idx * 2;
        let i_hi = i_lo + 1;

        let lo = state.encode_sample(input[i_lo]);
        // There is no mono-specific tail rule in §4.F (the block sizing
        // formula always yields an even `new_samples` for a full block),
        // but the last block of a file can be shorter; pad the same way the
        // stereo framer does, by repeating the final sample.
        let hi_sample = if i_hi < input.len() { input[i_hi] } else { input[input.len() - 1] };
        let hi = state.encode_sample(hi_sample);

        out[MONO_HEADER_BYTES + byte_idx] = (hi << 4) | lo;
    }

    Ok(required)
}

/// Decodes one stereo block. `out[0]`/`out[1]` are sized to the number of
/// samples the driver wants from this block, per channel.
pub fn decode_block_stereo(
    data: &[u8],
    states: &mut [ChannelState; 2],
    mut out: [&mut [i16]; 2],
) -> Result<usize> {
    if data.len() < STEREO_HEADER_BYTES {
        return insufficient_data_error();
    }
    if out[0].is_empty() || out[1].is_empty() {
        return insufficient_buffer_error();
    }

    for (ch, state) in states.iter_mut().enumerate() {
        let base = ch * MONO_HEADER_BYTES;
        let (predictor, step_index, reserved) =
            read_channel_header(&data[base..base + MONO_HEADER_BYTES])?;
        if reserved != 0 {
            return decode_error("adpcm (ima): reserved byte must be zero");
        }
        state.reset_from_header(predictor, step_index)?;
    }

    out[0][0] = states[0].predictor;
    out[1][0] = states[1].predictor;
    let mut produced = [1usize, 1usize];

    let data_bytes = data.len() - STEREO_HEADER_BYTES;
    for idx in 0..data_bytes {
        let channel = (idx / 4) % 2;
        let offset = (idx / 8) * 8;
        let slot = idx % 4;
        let byte = data[STEREO_HEADER_BYTES + idx];

        let lo = states[channel].decode_nibble(byte & 0x0f);
        let pos_lo = 1 + offset + slot * 2;
        if pos_lo < out[channel].len() {
            out[channel][pos_lo] = lo;
            produced[channel] = produced[channel].max(pos_lo + 1);
        }

        let hi = states[channel].decode_nibble(byte >> 4);
        let pos_hi = pos_lo + 1;
        if pos_hi < out[channel].len() {
            out[channel][pos_hi] = hi;
            produced[channel] = produced[channel].max(pos_hi + 1);
        }
    }

    Ok(produced[0].min(produced[1]))
}

/// Encodes one stereo block from `input[0]`/`input[1]` (each length <= the
/// caller's `samples_per_block`). Returns the number of bytes written.
///
/// Stereo tail edge case (§4.F, Design Notes): when `num_samples - 1` is not
/// a multiple of 8, a full 8-sample group is still encoded per channel; the
/// samples past the caller's input are the channel's final sample, repeated,
/// rather than zero or an over-read.
pub fn encode_block_stereo(
    input: [&[i16]; 2],
    states: &mut [ChannelState; 2],
    out: &mut [u8],
) -> Result<usize> {
    let num_samples = input[0].len().min(input[1].len());
    if num_samples == 0 {
        return invalid_argument_error("encode_block_stereo requires at least one sample");
    }
    if out.len() < STEREO_HEADER_BYTES {
        return insufficient_buffer_error();
    }

    for (ch, state) in states.iter_mut().enumerate() {
        state.predictor = input[ch][0];
        let base = ch * MONO_HEADER_BYTES;
        write_channel_header(&mut out[base..base + MONO_HEADER_BYTES], state.predictor, state.step_index);
    }

    let new_samples = num_samples - 1;
    let groups = (new_samples + 7) / 8;
    let data_bytes = groups * 8;
    let required = STEREO_HEADER_BYTES + data_bytes;
    if out.len() < required {
        return insufficient_buffer_error();
    }

    let padded_sample = |ch: usize, i: usize| -> i16 {
        if i < input[ch].len() { input[ch][i] } else { input[ch][input[ch].len() - 1] }
    };

    for idx in 0..data_bytes {
        let channel = (idx / 4) % 2;
        let offset = (idx / 8) * 8;
        let slot = idx % 4;

        let pos_lo = 1 + offset + slot * 2;
        let pos_hi = pos_lo + 1;

        let lo = states[channel].encode_sample(padded_sample(channel, pos_lo));
        let hi = states[channel].encode_sample(padded_sample(channel, pos_hi));

        out[STEREO_HEADER_BYTES + idx] = (hi << 4) | lo;
    }

    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_round_trips_a_full_block() {
        let input: Vec<i16> = (0..41).map(|i| (i * 137 - 2000) as i16).collect();
        let mut encoder = ChannelState::new();
        let mut out = vec![0u8; MONO_HEADER_BYTES + 32];
        let written = encode_block_mono(&input, &mut encoder, &mut out).unwrap();
        out.truncate(written);

        let mut decoder = ChannelState::new();
        let mut decoded = vec![0i16; input.len()];
        let produced = decode_block_mono(&out, &mut decoder, &mut decoded).unwrap();

        assert_eq!(produced, input.len());
        assert_eq!(decoded[0], input[0]);
        assert_eq!(encoder.predictor, decoder.predictor);
        assert_eq!(encoder.step_index, decoder.step_index);
    }

    #[test]
    fn mono_decode_rejects_nonzero_reserved_byte() {
        let mut state = ChannelState::new();
        let mut out = vec![0i16; 3];
        let data = [0x00, 0x00, 0x00, 0x01, 0x23];
        assert!(decode_block_mono(&data, &mut state, &mut out).is_err());
    }

    #[test]
    fn first_sample_is_header_predictor_verbatim() {
        let input = [1234i16, 1, 2, 3];
        let mut encoder = ChannelState::new();
        let mut out = vec![0u8; 16];
        let written = encode_block_mono(&input, &mut encoder, &mut out).unwrap();

        let mut decoder = ChannelState::new();
        let mut decoded = vec![0i16; 1];
        decode_block_mono(&out[..written], &mut decoder, &mut decoded).unwrap();
        assert_eq!(decoded[0], 1234);
    }

    #[test]
    fn stereo_round_trips_a_full_block() {
        let left: Vec<i16> = (0..17).map(|i| (i * 211 - 1000) as i16).collect();
        let right: Vec<i16> = (0..17).map(|i| (-i * 97 + 500) as i16).collect();

        let mut encoders = [ChannelState::new(), ChannelState::new()];
        let mut out = vec![0u8; STEREO_HEADER_BYTES + 64];
        let written = encode_block_stereo([&left, &right], &mut encoders, &mut out).unwrap();
        out.truncate(written);

        let mut decoders = [ChannelState::new(), ChannelState::new()];
        let mut decoded_l = vec![0i16; left.len()];
        let mut decoded_r = vec![0i16; right.len()];
        let produced =
            decode_block_stereo(&out, &mut decoders, [&mut decoded_l, &mut decoded_r]).unwrap();

        assert_eq!(produced, left.len());
        assert_eq!(decoded_l[0], left[0]);
        assert_eq!(decoded_r[0], right[0]);
    }

    #[test]
    fn stereo_tail_not_multiple_of_eight_stays_in_bounds() {
        // 12 new samples per channel: not a multiple of 8, exercises the
        // padded final group.
        let left: Vec<i16> = (0..13).map(|i| i as i16 * 10).collect();
        let right: Vec<i16> = (0..13).map(|i| -(i as i16) * 10).collect();

        let mut encoders = [ChannelState::new(), ChannelState::new()];
        let mut out = vec![0u8; STEREO_HEADER_BYTES + 64];
        let written = encode_block_stereo([&left, &right], &mut encoders, &mut out).unwrap();
        out.truncate(written);

        let mut decoders = [ChannelState::new(), ChannelState::new()];
        let mut decoded_l = vec![0i16; left.len()];
        let mut decoded_r = vec![0i16; right.len()];
        let produced =
            decode_block_stereo(&out, &mut decoders, [&mut decoded_l, &mut decoded_r]).unwrap();

        assert_eq!(produced, left.len());
    }
}
