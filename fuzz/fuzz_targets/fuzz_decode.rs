#![no_main]

use libfuzzer_sys::fuzz_target;
use mzbinary::config::{ByteOrder, Compression, EncoderConfig, Numpress, Precision};

fuzz_target!(|data: &[u8]| {
    // First byte selects the configuration, the rest is the encoded text
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let numpress = match selector & 0b11 {
        0 => Numpress::None,
        1 => Numpress::Linear,
        2 => Numpress::Pic,
        _ => Numpress::Slof,
    };
    let config = EncoderConfig::default()
        .with_numpress(numpress)
        .with_compression(if selector & 0b100 != 0 {
            Compression::Zlib
        } else {
            Compression::None
        })
        .with_precision(if selector & 0b1000 != 0 {
            Precision::Float32
        } else {
            Precision::Float64
        })
        .with_byte_order(if selector & 0b1_0000 != 0 {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        });

    // Decoding arbitrary text must fail cleanly, never panic
    let _ = mzbinary::codec::decode(text, &config);

    // mzXML reading runs the same decoder behind an XML layer
    let _ = mzbinary::mzxml::read_peaks(text);
});
