// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The three whole-file operations the CLI drives: encode, decode, and the
//! quantization-residual diagnostic (§2, §6). Each takes a complete file
//! buffer and returns a complete file buffer; none of them touch the
//! filesystem, mirroring `symphonia-play`'s split between its own I/O
//! plumbing and the decode loop it drives.

use log::info;

use imadpcm_core::errors::{invalid_argument_error, Result};
use imadpcm_core::sample::BitDepth;
use imadpcm_format_wav::{
    emit_linear_pcm_header, parse_adpcm_header, parse_linear_pcm_header, WavFileFormat,
};

use crate::decoder::AdpcmDecoder;
use crate::encoder::{AdpcmEncoder, EncodeParameters};
use crate::pcm_samples::{read_channels_narrowed_to_i16, write_channels_widened_from_i16};

/// Encodes a linear PCM WAVE file (`pcm`) to an IMA-ADPCM WAVE file, framed
/// into `block_size`-byte blocks (§2, "encode").
pub fn encode_wav_to_adpcm(pcm: &[u8], block_size: u16) -> Result<Vec<u8>> {
    let (format, data_offset) = parse_linear_pcm_header(pcm)?;
    let depth = match BitDepth::from_bits_per_sample(format.bits_per_sample) {
        Some(depth) => depth,
        None => return invalid_argument_error("adpcm encoder: unsupported pcm bit depth"),
    };

    info!(
        "imadpcm: encoding {} channel(s), {} samples at {} Hz into {}-byte blocks.",
        format.num_channels, format.num_samples, format.sampling_rate, block_size
    );

    let channels = read_channels_narrowed_to_i16(pcm, data_offset, &format, depth)?;

    let mut encoder = AdpcmEncoder::new();
    encoder.set_encode_parameter(EncodeParameters {
        num_channels: format.num_channels,
        sampling_rate: format.sampling_rate,
        bits_per_sample: 4,
        block_size,
    })?;

    let header = encoder.header_for(format.num_samples)?;
    let total = header.header_size as usize + header.data_chunk_size() as usize;
    let mut out = vec![0u8; total];
    let written = encoder.encode_whole(&channels, &mut out)?;
    out.truncate(written);

    Ok(out)
}

/// Decodes an IMA-ADPCM WAVE file (`adpcm`) to a linear PCM WAVE file at
/// `output_bits_per_sample` bits per sample (§2, "decode").
pub fn decode_adpcm_to_wav(adpcm: &[u8], output_bits_per_sample: u16) -> Result<Vec<u8>> {
    let header = parse_adpcm_header(adpcm)?;
    let depth = match BitDepth::from_bits_per_sample(output_bits_per_sample) {
        Some(depth) => depth,
        None => return invalid_argument_error("adpcm decoder: unsupported output pcm bit depth"),
    };

    info!(
        "imadpcm: decoding {} channel(s), {} samples at {} Hz to {}-bit pcm.",
        header.num_channels, header.num_samples, header.sampling_rate, output_bits_per_sample
    );

    let data = &adpcm[header.header_size as usize..];
    let num_samples = header.num_samples as usize;

    let mut rows: Vec<Vec<i16>> = (0..header.num_channels).map(|_| vec![0i16; num_samples]).collect();
    {
        let decoder = AdpcmDecoder::new();
        let mut row_refs: Vec<&mut [i16]> = rows.iter_mut().map(|r| r.as_mut_slice()).collect();
        decoder.decode_whole(&header, data, &mut row_refs)?;
    }

    let format = WavFileFormat {
        num_channels: header.num_channels,
        sampling_rate: header.sampling_rate,
        bits_per_sample: output_bits_per_sample,
        num_samples: header.num_samples,
    };

    let data_size = num_samples as u32 * depth.bytes() as u32 * u32::from(header.num_channels);
    let header_bytes = 44usize;
    let mut out = vec![0u8; header_bytes + data_size as usize];
    emit_linear_pcm_header(&format, data_size, &mut out)?;
    write_channels_widened_from_i16(&rows, depth, &mut out, header_bytes);

    Ok(out)
}

/// Encodes `pcm` to ADPCM and immediately decodes it back, emitting a 16-bit
/// PCM WAVE file whose samples are `original - reconstructed`, wrapping on
/// overflow the way a native `int16_t` subtraction would (§6,
/// "quantization residual").
pub fn residual_wav(pcm: &[u8], block_size: u16) -> Result<Vec<u8>> {
    let (format, data_offset) = parse_linear_pcm_header(pcm)?;
    let depth = match BitDepth::from_bits_per_sample(format.bits_per_sample) {
        Some(depth) => depth,
        None => return invalid_argument_error("adpcm residual: unsupported pcm bit depth"),
    };

    let original = read_channels_narrowed_to_i16(pcm, data_offset, &format, depth)?;

    let mut encoder = AdpcmEncoder::new();
    encoder.set_encode_parameter(EncodeParameters {
        num_channels: format.num_channels,
        sampling_rate: format.sampling_rate,
        bits_per_sample: 4,
        block_size,
    })?;
    let header = encoder.header_for(format.num_samples)?;
    let encoded_total = header.header_size as usize + header.data_chunk_size() as usize;
    let mut encoded = vec![0u8; encoded_total];
    let written = encoder.encode_whole(&original, &mut encoded)?;
    encoded.truncate(written);

    let parsed_header = parse_adpcm_header(&encoded)?;
    let num_samples = parsed_header.num_samples as usize;
    let mut reconstructed: Vec<Vec<i16>> =
        (0..parsed_header.num_channels).map(|_| vec![0i16; num_samples]).collect();
    {
        let decoder = AdpcmDecoder::new();
        let data = &encoded[parsed_header.header_size as usize..];
        let mut row_refs: Vec<&mut [i16]> = reconstructed.iter_mut().map(|r| r.as_mut_slice()).collect();
        decoder.decode_whole(&parsed_header, data, &mut row_refs)?;
    }

    let residual: Vec<Vec<i16>> = original
        .iter()
        .zip(reconstructed.iter())
        .map(|(orig, recon)| orig.iter().zip(recon.iter()).map(|(o, r)| o.wrapping_sub(*r)).collect())
        .collect();

    let out_format = WavFileFormat {
        num_channels: format.num_channels,
        sampling_rate: format.sampling_rate,
        bits_per_sample: 16,
        num_samples: format.num_samples,
    };
    let out_depth = BitDepth::Sixteen;
    let data_size = format.num_samples * out_depth.bytes() as u32 * u32::from(format.num_channels);
    let header_bytes = 44usize;
    let mut out = vec![0u8; header_bytes + data_size as usize];
    emit_linear_pcm_header(&out_format, data_size, &mut out)?;
    write_channels_widened_from_i16(&residual, out_depth, &mut out, header_bytes);

    Ok(out)
}
