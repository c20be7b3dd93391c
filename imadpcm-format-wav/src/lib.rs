// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component C: the RIFF/WAVE container codec.
//!
//! Parses and emits the WAVE envelope for linear PCM (format tag 1) and for
//! IMA-ADPCM (format tag 17), skipping unknown chunks between `fmt ` and
//! `data` the way `symphonia-format-wav`'s `ChunksReader` does, and
//! recovering the per-channel sample count from a `fact` chunk or, failing
//! that, from the `data` chunk length.

mod adpcm;
mod chunks;
mod linear;

pub use adpcm::{emit_adpcm_header, parse_adpcm_header, samples_per_block, AdpcmHeaderInfo};
pub use linear::{emit_linear_pcm_header, parse_linear_pcm_header, WavFileFormat};

/// WAVE format tag for linear PCM (§1).
pub const WAVE_FORMAT_PCM: u16 = 0x0001;
/// WAVE format tag for IMA-ADPCM (§1).
pub const WAVE_FORMAT_ADPCM_IMA: u16 = 0x0011;
