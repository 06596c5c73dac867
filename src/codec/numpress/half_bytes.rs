//! Variable-length integer coding on half bytes.
//!
//! A 32-bit integer is written as a header nibble followed by its significant
//! nibbles, least significant first:
//!
//! - header `0..=8`: that many leading zero nibbles were dropped;
//! - header `9..=15`: `header - 8` leading `0xf` nibbles were dropped
//!   (small negative numbers);
//! - header `0` with all eight nibbles for everything else.
//!
//! Nibbles are packed high half first. An odd count leaves a zero low half in
//! the final byte, which readers treat as padding.

use crate::error::{CodecError, Result};

const TOP_NIBBLE: u32 = 0xf000_0000;

/// Accumulates nibbles into bytes
#[derive(Debug, Default)]
pub(super) struct HalfByteWriter {
    bytes: Vec<u8>,
    pending: Option<u8>,
}

impl HalfByteWriter {
    pub(super) fn with_capacity(values: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(values * 2),
            pending: None,
        }
    }

    fn push(&mut self, nibble: u8) {
        match self.pending.take() {
            Some(high) => self.bytes.push((high << 4) | (nibble & 0x0f)),
            None => self.pending = Some(nibble & 0x0f),
        }
    }

    /// Append one integer
    pub(super) fn push_int(&mut self, value: i32) {
        let x = value as u32;
        let top = x & TOP_NIBBLE;

        let (header, dropped) = if top == 0 {
            let zeros = x.leading_zeros() / 4;
            (zeros as u8, zeros)
        } else if top == TOP_NIBBLE {
            let ones = ((!x).leading_zeros() / 4).min(7);
            (ones as u8 + 8, ones)
        } else {
            (0, 0)
        };

        self.push(header);
        for i in 0..(8 - dropped) {
            self.push(((x >> (4 * i)) & 0x0f) as u8);
        }
    }

    /// Flush a trailing half byte and return the packed bytes
    pub(super) fn finish(mut self) -> Vec<u8> {
        if let Some(high) = self.pending.take() {
            self.bytes.push(high << 4);
        }
        self.bytes
    }
}

/// Reads nibbles back out of a packed byte slice
#[derive(Debug)]
pub(super) struct HalfByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> HalfByteReader<'a> {
    pub(super) fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() * 2 - self.position
    }

    fn peek(&self) -> Option<u8> {
        let byte = *self.data.get(self.position / 2)?;
        Some(if self.position % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        })
    }

    fn next_nibble(&mut self) -> Option<u8> {
        let nibble = self.peek()?;
        self.position += 1;
        Some(nibble)
    }

    /// Whether another integer follows (a lone zero nibble at the end is padding)
    pub(super) fn has_more(&self) -> bool {
        match self.remaining() {
            0 => false,
            1 => self.peek() != Some(0),
            _ => true,
        }
    }

    /// Read one integer
    pub(super) fn read_int(&mut self) -> Result<i32> {
        let header = self
            .next_nibble()
            .ok_or_else(|| CodecError::CorruptNumpress("missing integer header".to_string()))?;

        let (kept_from, mut value) = if header <= 8 {
            (header as u32, 0u32)
        } else {
            let ones = (header - 8) as u32;
            let fill = (0..ones).fold(0u32, |acc, i| acc | (TOP_NIBBLE >> (4 * i)));
            (ones, fill)
        };

        for i in kept_from..8 {
            let nibble = self.next_nibble().ok_or_else(|| {
                CodecError::CorruptNumpress(format!(
                    "integer truncated at half byte {}",
                    self.position
                ))
            })?;
            value |= (nibble as u32) << ((i - kept_from) * 4);
        }

        Ok(value as i32)
    }
}
