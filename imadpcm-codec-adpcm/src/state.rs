// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component E: the IMA-ADPCM core, operating one sample at a time.

use imadpcm_core::errors::{decode_error, Result};

use crate::tables::{INDEX_ADJUST, MAX_STEP_INDEX, STEP_SIZE};

/// Per-channel codec state: the last reconstructed sample and the current
/// index into `STEP_SIZE` (§3's "Core codec state").
///
/// Zero-initialized at construction. For decode, overwritten at the start of
/// each block from that block's header. For encode, the first sample of
/// each block is copied in as `predictor`, and `step_index` carries over
/// from the previous block (it is what gets emitted as that block's header
/// value).
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelState {
    pub predictor: i16,
    pub step_index: i8,
}

impl ChannelState {
    pub fn new() -> Self {
        ChannelState { predictor: 0, step_index: 0 }
    }

    /// Loads state from a block header's predictor/step-index pair, as read
    /// by the block framer (§4.F). Rejects a step index outside `[0, 88]`.
    pub fn reset_from_header(&mut self, predictor: i16, step_index: i32) -> Result<()> {
        if !(0..=MAX_STEP_INDEX).contains(&step_index) {
            return decode_error("adpcm (ima): invalid step index");
        }
        self.predictor = predictor;
        self.step_index = step_index as i8;
        Ok(())
    }

    fn step(self) -> i32 {
        STEP_SIZE[self.step_index as usize]
    }

    /// The shared update path for both decode and encode (§4.E): given a
    /// 4-bit nibble, update `predictor` and `step_index` and return the
    /// reconstructed sample. Calling this with the nibble `encode_sample`
    /// just emitted is, by construction, what gives the encoder/decoder
    /// lock-step invariant (§8, property 2).
    fn apply_nibble(&mut self, nibble: u8) -> i16 {
        let step = self.step();
        let sign = (nibble & 0x08) != 0;
        let magnitude = i32::from(nibble & 0x07);

        let diff_mag = (step * (2 * magnitude + 1)) >> 3;

        let mut predictor = i32::from(self.predictor);
        predictor += if sign { -diff_mag } else { diff_mag };
        predictor = predictor.clamp(-32768, 32767);
        self.predictor = predictor as i16;

        let adjusted = i32::from(self.step_index) + INDEX_ADJUST[nibble as usize];
        self.step_index = adjusted.clamp(0, MAX_STEP_INDEX) as i8;

        self.predictor
    }

    /// Decodes one nibble into one reconstructed 16-bit sample.
    pub fn decode_nibble(&mut self, nibble: u8) -> i16 {
        self.apply_nibble(nibble & 0x0f)
    }

    /// Encodes one 16-bit sample into one nibble, mirroring the decoder's
    /// update exactly so the encoder's post-state matches what the decoder
    /// would produce from the emitted nibble.
    pub fn encode_sample(&mut self, sample: i16) -> u8 {
        let step = self.step();

        let diff = i32::from(sample) - i32::from(self.predictor);
        let sign = diff < 0;
        let abs_diff = diff.unsigned_abs() as i32;
        let magnitude = ((abs_diff << 2) / step).min(7);

        let nibble = (if sign { 0x08 } else { 0 }) | magnitude as u8;
        self.apply_nibble(nibble);
        nibble
    }
}
