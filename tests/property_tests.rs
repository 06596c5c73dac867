//! Property-based tests for the codec round-trip laws

use mzbinary::prelude::*;

fn finite_f64() -> impl proptest::strategy::Strategy<Value = f64> {
    use proptest::prelude::*;
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_compression() -> impl Strategy<Value = Compression> {
        prop_oneof![Just(Compression::None), Just(Compression::Zlib)]
    }

    fn any_byte_order() -> impl Strategy<Value = ByteOrder> {
        prop_oneof![Just(ByteOrder::Little), Just(ByteOrder::Big)]
    }

    proptest! {
        /// Any f64 array survives 64-bit packing bit for bit
        #[test]
        fn test_float64_lossless(
            values in prop::collection::vec(any::<f64>(), 0..200),
            compression in any_compression(),
            byte_order in any_byte_order(),
        ) {
            let config = EncoderConfig::default()
                .with_compression(compression)
                .with_byte_order(byte_order);
            let encoded = mzbinary::codec::encode(&values, &config).unwrap();
            let decoded = mzbinary::codec::decode(&encoded.text, &config).unwrap();

            prop_assert_eq!(decoded.len(), values.len());
            for (original, decoded) in values.iter().zip(decoded.iter()) {
                prop_assert_eq!(original.to_bits(), decoded.to_bits());
            }
        }

        /// 32-bit decoding equals narrowing each value, and is idempotent
        #[test]
        fn test_float32_narrowing(
            values in prop::collection::vec(finite_f64(), 0..200),
            compression in any_compression(),
            byte_order in any_byte_order(),
        ) {
            let config = EncoderConfig::default()
                .with_precision(Precision::Float32)
                .with_compression(compression)
                .with_byte_order(byte_order);
            let encoded = mzbinary::codec::encode(&values, &config).unwrap();
            let decoded = mzbinary::codec::decode(&encoded.text, &config).unwrap();

            let expected: Vec<f64> = values.iter().map(|&v| v as f32 as f64).collect();
            prop_assert_eq!(&decoded, &expected);

            let again = mzbinary::codec::encode(&decoded, &config).unwrap();
            prop_assert_eq!(again.text, encoded.text);
        }

        /// Compression changes the text but never the decoded values
        #[test]
        fn test_compression_transparent(values in prop::collection::vec(finite_f64(), 0..200)) {
            let plain = EncoderConfig::default();
            let zlib = EncoderConfig::default().with_compression(Compression::Zlib);

            let a = mzbinary::codec::encode(&values, &plain).unwrap();
            let b = mzbinary::codec::encode(&values, &zlib).unwrap();
            prop_assert_eq!(a.decompressed_byte_count, b.decompressed_byte_count);
            prop_assert_eq!(
                mzbinary::codec::decode(&a.text, &plain).unwrap(),
                mzbinary::codec::decode(&b.text, &zlib).unwrap()
            );
        }

        /// Linear prediction meets the tolerance on sorted m/z-like arrays
        #[test]
        fn test_linear_within_tolerance(
            start in 50.0f64..2000.0,
            steps in prop::collection::vec(0.0001f64..5.0, 0..300),
        ) {
            let mut values = vec![start];
            for step in steps {
                let last = values[values.len() - 1];
                values.push(last + step);
            }

            let config = EncoderConfig::default().with_numpress(Numpress::Linear);
            let encoded = mzbinary::codec::encode(&values, &config).unwrap();
            let decoded = mzbinary::codec::decode(&encoded.text, &encoded.config).unwrap();

            prop_assert_eq!(decoded.len(), values.len());
            for (o, d) in values.iter().zip(decoded.iter()) {
                prop_assert!((1.0 - d / o).abs() <= 1e-4);
            }
        }

        /// Slof either meets the tolerance or reports that it cannot
        #[test]
        fn test_slof_tolerance_law(values in prop::collection::vec(0.0f64..1e7, 0..200)) {
            let config = EncoderConfig::default()
                .with_numpress(Numpress::Slof)
                .with_error_tolerance(1e-3);

            match mzbinary::codec::encode(&values, &config) {
                Ok(encoded) => {
                    let decoded =
                        mzbinary::codec::decode(&encoded.text, &encoded.config).unwrap();
                    for (o, d) in values.iter().zip(decoded.iter()) {
                        if *o == 0.0 {
                            prop_assert_eq!(*d, 0.0);
                        } else {
                            prop_assert!((1.0 - d / o).abs() <= 1e-3);
                        }
                    }
                }
                Err(CodecError::NumpressToleranceUnattainable { .. }) => {}
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }

        /// Pic reproduces whole numbers exactly
        #[test]
        fn test_pic_integers_exact(values in prop::collection::vec(any::<u32>(), 0..200)) {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();
            let config = EncoderConfig::default().with_numpress(Numpress::Pic);
            let encoded = mzbinary::codec::encode(&values, &config).unwrap();
            let decoded = mzbinary::codec::decode(&encoded.text, &encoded.config).unwrap();
            prop_assert_eq!(decoded, values);
        }

        /// Arbitrary text never panics the decoder
        #[test]
        fn test_decode_arbitrary_text(text in ".{0,64}", numpress in 0usize..4, zlib in any::<bool>()) {
            let numpress = [Numpress::None, Numpress::Linear, Numpress::Pic, Numpress::Slof][numpress];
            let compression = if zlib { Compression::Zlib } else { Compression::None };
            let config = EncoderConfig::default()
                .with_numpress(numpress)
                .with_compression(compression);
            let _ = mzbinary::codec::decode(&text, &config);
        }
    }
}
