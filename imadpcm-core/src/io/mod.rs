// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod bit;
pub mod byte;

pub use bit::{BitReader, BitWriter};
pub use byte::{ByteReader, ByteWriter};
