//! Fixed-width packing of doubles
//!
//! 64-bit packing is lossless. 32-bit packing narrows each value with IEEE
//! round-to-nearest; values beyond the f32 range saturate to infinity.

use byteorder::{BigEndian, ByteOrder as Endianness, LittleEndian};

use crate::config::{ByteOrder, Precision};
use crate::error::{CodecError, Result};

/// Serialize values at the given precision and byte order.
///
/// The output holds exactly `values.len() * precision.byte_size()` bytes.
pub fn pack(values: &[f64], precision: Precision, byte_order: ByteOrder) -> Vec<u8> {
    match byte_order {
        ByteOrder::Little => pack_as::<LittleEndian>(values, precision),
        ByteOrder::Big => pack_as::<BigEndian>(values, precision),
    }
}

/// Interpret packed bytes as values of the given precision and byte order
pub fn unpack(bytes: &[u8], precision: Precision, byte_order: ByteOrder) -> Result<Vec<f64>> {
    let byte_size = precision.byte_size();
    if bytes.len() % byte_size != 0 {
        return Err(CodecError::InvalidLength {
            expected: bytes.len() / byte_size * byte_size,
            actual: bytes.len(),
        });
    }

    Ok(match byte_order {
        ByteOrder::Little => unpack_as::<LittleEndian>(bytes, precision),
        ByteOrder::Big => unpack_as::<BigEndian>(bytes, precision),
    })
}

fn pack_as<E: Endianness>(values: &[f64], precision: Precision) -> Vec<u8> {
    let byte_size = precision.byte_size();
    let mut bytes = vec![0u8; values.len() * byte_size];

    let slots = bytes.chunks_exact_mut(byte_size).zip(values);
    match precision {
        Precision::Float32 => {
            for (slot, &value) in slots {
                E::write_f32(slot, value as f32);
            }
        }
        Precision::Float64 => {
            for (slot, &value) in slots {
                E::write_f64(slot, value);
            }
        }
    }

    bytes
}

fn unpack_as<E: Endianness>(bytes: &[u8], precision: Precision) -> Vec<f64> {
    let chunks = bytes.chunks_exact(precision.byte_size());
    match precision {
        Precision::Float32 => chunks.map(|c| E::read_f32(c) as f64).collect(),
        Precision::Float64 => chunks.map(E::read_f64).collect(),
    }
}
