// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component G: the whole-file encode/decode/residual drivers.
//!
//! `encoder`/`decoder` re-express the original C reference's
//! `IMAADPCMWAVEncoder`/`IMAADPCMWAVDecoder` handles (`examples/
//! original_source/ima_adpcm.h`) as safe owning structs: a two-phase
//! "configure, then drive" lifecycle for the encoder (mirroring
//! `SetEncodeParameter` + `EncodeWhole`), and a single `DecodeWhole` entry
//! point for the decoder, since decoding never needs caller configuration
//! beyond the header it parses for itself.
//!
//! `pipeline` ties those handles to `imadpcm-format-wav`'s container codec
//! to implement the three file-level operations the CLI drives: encode,
//! decode, and the quantization-residual diagnostic.

mod decoder;
mod encoder;
mod pcm_samples;
mod pipeline;

pub use decoder::AdpcmDecoder;
pub use encoder::{AdpcmEncoder, EncodeParameters};
pub use pipeline::{decode_adpcm_to_wav, encode_wav_to_adpcm, residual_wav};

/// Default ADPCM block size (bytes), per §6.
pub const DEFAULT_BLOCK_SIZE: u16 = 1024;
/// Default PCM depth this crate emits for decode and residual output, per §6.
pub const DEFAULT_OUTPUT_BITS_PER_SAMPLE: u16 = 16;
