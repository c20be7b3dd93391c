// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The IMA-ADPCM codec: per-sample state machine (component E) and the
//! mono/stereo block framer (component F) built on top of it.

pub mod block;
pub mod state;
pub mod tables;

pub use block::{
    decode_block_mono, decode_block_stereo, encode_block_mono, encode_block_stereo,
    MONO_HEADER_BYTES, STEREO_HEADER_BYTES,
};
pub use state::ChannelState;
pub use tables::MAX_STEP_INDEX;
