// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

//! The CLI driving `imadpcm-driver`'s three whole-file operations. The
//! argument shape (`-e`/`-d`/`-r INPUT OUTPUT`) and the `pretty_env_logger`
//! wiring follow `symphonia-play`'s `main.rs`, rebuilt on `clap`'s modern
//! derive API rather than its older `App`/`Arg::with_name` builder.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use imadpcm_core::errors::ApiResult;
use imadpcm_driver::{decode_adpcm_to_wav, encode_wav_to_adpcm, residual_wav, DEFAULT_BLOCK_SIZE, DEFAULT_OUTPUT_BITS_PER_SAMPLE};

/// Encode, decode, or diff IMA-ADPCM WAVE audio.
#[derive(Parser, Debug)]
#[command(name = "imadpcm", version, about)]
struct Cli {
    /// Encode a linear PCM WAVE file to IMA-ADPCM.
    #[arg(short = 'e', long = "encode", conflicts_with_all = ["decode", "residual"])]
    encode: bool,

    /// Decode an IMA-ADPCM WAVE file to linear PCM.
    #[arg(short = 'd', long = "decode", conflicts_with_all = ["encode", "residual"])]
    decode: bool,

    /// Encode and decode, emitting the quantization residual as PCM.
    #[arg(short = 'r', long = "residual", conflicts_with_all = ["encode", "decode"])]
    residual: bool,

    /// ADPCM block size in bytes, used when encoding or computing a residual.
    #[arg(long = "block-size", default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: u16,

    /// Bits per sample of decoded or residual PCM output.
    #[arg(long = "bits-per-sample", default_value_t = DEFAULT_OUTPUT_BITS_PER_SAMPLE)]
    bits_per_sample: u16,

    /// Input file path.
    input: PathBuf,

    /// Output file path.
    output: PathBuf,
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = Cli::parse();

    if !cli.encode && !cli.decode && !cli.residual {
        error!("imadpcm: one of -e, -d, or -r is required.");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(result) => {
            error!("imadpcm: {}", result);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ApiResult> {
    let input = fs::read(&cli.input).map_err(|_| ApiResult::InsufficientData)?;

    let output = if cli.encode {
        encode_wav_to_adpcm(&input, cli.block_size).map_err(|err| ApiResult::from(&err))?
    } else if cli.decode {
        decode_adpcm_to_wav(&input, cli.bits_per_sample).map_err(|err| ApiResult::from(&err))?
    } else {
        residual_wav(&input, cli.block_size).map_err(|err| ApiResult::from(&err))?
    };

    fs::write(&cli.output, output).map_err(|_| ApiResult::Unknown)?;
    Ok(())
}
