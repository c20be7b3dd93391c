// imadpcm
// Copyright (c) 2026 The imadpcm Authors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the error type shared by every layer of the
//! codec, and the flat taxonomy the driver API exposes at its boundary.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::result;

/// `Error` enumerates every way a byte/bit I/O operation, a container parse,
/// or a codec step can fail.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred while reading, writing, or seeking.
    Io(io::Error),
    /// The stream contained malformed data and could not be decoded.
    Decode(&'static str),
    /// An unsupported container or codec feature was encountered.
    Unsupported(&'static str),
    /// A caller-supplied argument was invalid (wrong channel count, `n > 64`
    /// bits requested from the bit layer, etc).
    InvalidArgument(&'static str),
    /// A caller-supplied buffer was too small for the operation.
    InsufficientBuffer,
    /// The input ended, or a chunk was shorter than its declared length,
    /// before the operation could complete.
    InsufficientData,
    /// The encoder was driven before its encode parameters were set.
    ParameterNotSet,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {}", err),
            Error::Decode(msg) => write!(f, "malformed stream: {}", msg),
            Error::Unsupported(feature) => write!(f, "unsupported: {}", feature),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::InsufficientBuffer => write!(f, "buffer too small"),
            Error::InsufficientData => write!(f, "insufficient data"),
            Error::ParameterNotSet => write!(f, "encode parameters not set"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a decode error.
pub fn decode_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::Decode(desc))
}

/// Convenience function to create an unsupported-feature error.
pub fn unsupported_error<T>(feature: &'static str) -> Result<T> {
    Err(Error::Unsupported(feature))
}

/// Convenience function to create an invalid-argument error.
pub fn invalid_argument_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::InvalidArgument(desc))
}

/// Convenience function to create an insufficient-buffer error.
pub fn insufficient_buffer_error<T>() -> Result<T> {
    Err(Error::InsufficientBuffer)
}

/// Convenience function to create an insufficient-data error.
pub fn insufficient_data_error<T>() -> Result<T> {
    Err(Error::InsufficientData)
}

/// The flat result taxonomy exposed at the driver API boundary (§7). Every
/// internal `Error` maps 1:1 onto one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiResult {
    Ok,
    InvalidArgument,
    InvalidFormat,
    InsufficientBuffer,
    InsufficientData,
    ParameterNotSet,
    Unknown,
}

impl From<&Error> for ApiResult {
    fn from(err: &Error) -> ApiResult {
        match err {
            Error::InvalidArgument(_) => ApiResult::InvalidArgument,
            Error::Decode(_) | Error::Unsupported(_) => ApiResult::InvalidFormat,
            Error::InsufficientBuffer => ApiResult::InsufficientBuffer,
            Error::InsufficientData => ApiResult::InsufficientData,
            Error::ParameterNotSet => ApiResult::ParameterNotSet,
            Error::Io(_) => ApiResult::Unknown,
        }
    }
}

impl fmt::Display for ApiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiResult::Ok => "ok",
            ApiResult::InvalidArgument => "invalid argument",
            ApiResult::InvalidFormat => "invalid format",
            ApiResult::InsufficientBuffer => "insufficient buffer",
            ApiResult::InsufficientData => "insufficient data",
            ApiResult::ParameterNotSet => "parameter not set",
            ApiResult::Unknown => "unknown error",
        };
        f.write_str(s)
    }
}
