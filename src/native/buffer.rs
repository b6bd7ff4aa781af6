// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::DecodeError;

/// Capacity of a fresh buffer; large enough for the common event payload.
pub const DEFAULT_BUFFER_SIZE: usize = 16384;

const BOM_LE: [u8; 2] = [0xFF, 0xFE];
const BOM_BE: [u8; 2] = [0xFE, 0xFF];

/// Scratch memory handed to a native call that writes UTF-16 text.
///
/// The whole capacity is offered to the call; there is no separate length.
/// One buffer belongs to one call site and is reused across calls there.
#[derive(Debug, Clone)]
pub struct Buffer {
    storage: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            storage: vec![0; DEFAULT_BUFFER_SIZE],
        }
    }

    pub fn size(&self) -> usize {
        self.storage.len()
    }

    /// Resizes to `size` bytes (at least one), keeping the common prefix.
    pub fn update_size(&mut self, size: usize) {
        self.storage.resize(size.max(1), 0);
    }

    /// Output pointer for the native call.
    pub fn first_byte(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Decodes the first `offset` bytes and returns them as UTF-8.
    pub fn read_bytes(&self, offset: usize) -> Result<Vec<u8>, DecodeError> {
        self.read_string(offset).map(String::into_bytes)
    }

    pub fn read_string(&self, offset: usize) -> Result<String, DecodeError> {
        let bytes = self
            .storage
            .get(..offset)
            .ok_or(DecodeError::OutOfBounds {
                offset,
                capacity: self.size(),
            })?;
        decode_utf16(bytes)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes UTF-16 text, little-endian unless a big-endian BOM says otherwise.
/// A leading BOM is not part of the output.
pub fn decode_utf16(bytes: &[u8]) -> Result<String, DecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength(bytes.len()));
    }

    let (body, from_bytes): (&[u8], fn([u8; 2]) -> u16) =
        if let Some(rest) = bytes.strip_prefix(&BOM_LE[..]) {
            (rest, u16::from_le_bytes)
        } else if let Some(rest) = bytes.strip_prefix(&BOM_BE[..]) {
            (rest, u16::from_be_bytes)
        } else {
            (bytes, u16::from_le_bytes)
        };

    let units = body
        .chunks_exact(2)
        .map(|pair| from_bytes([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| DecodeError::UnpairedSurrogate(e.unpaired_surrogate()))
}

#[cfg(test)]
pub(crate) fn encode_utf16_le(text: &str, bom: bool) -> Vec<u8> {
    let prefix = if bom { &BOM_LE[..] } else { &[][..] };
    prefix
        .iter()
        .copied()
        .chain(text.encode_utf16().flat_map(u16::to_le_bytes))
        .collect()
}
