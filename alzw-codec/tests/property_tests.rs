use alzw_codec::{AlphabetTable, LzwConfig, LzwEncoder, PolicyKind, compress, decompress};
use proptest::prelude::*;

fn policy() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_roundtrip_any_policy(
        indices in prop::collection::vec(0..5usize, 0..600),
        policy in policy(),
        min_width in 3..6u8,
        extra in 0..5u8,
    ) {
        let symbols = b"vwxyz";
        let alphabet = AlphabetTable::new(*symbols).unwrap();
        let input: Vec<u8> = indices.iter().map(|&i| symbols[i]).collect();
        let config = LzwConfig::new(min_width, min_width + extra, policy);

        let compressed = compress(&input, &alphabet, config).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_byte_alphabet(
        input in prop::collection::vec(any::<u8>(), 0..800),
        policy in policy(),
        max_width in 9..12u8,
    ) {
        let alphabet = AlphabetTable::new(0..=255u8).unwrap();
        let config = LzwConfig::new(9, max_width, policy);

        let compressed = compress(&input, &alphabet, config).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_codeword_widths_in_bounds(
        indices in prop::collection::vec(0..3usize, 1..400),
        policy in policy(),
        extra in 0..4u8,
    ) {
        let alphabet = AlphabetTable::new(*b"abc").unwrap();
        let input: Vec<u8> = indices.iter().map(|&i| b"abc"[i]).collect();
        let config = LzwConfig::new(3, 3 + extra, policy);

        let mut encoder = LzwEncoder::new(alphabet, config).unwrap();
        encoder.set_trace(true);
        encoder.encode(&input).unwrap();
        for codeword in encoder.trace().unwrap() {
            prop_assert!(codeword.width >= config.min_width);
            prop_assert!(codeword.width <= config.max_width);
            prop_assert!(codeword.code < 1 << codeword.width);
        }
    }

    #[test]
    fn test_full_min_width_alphabet(
        indices in prop::collection::vec(0..4usize, 0..500),
        policy in policy(),
        extra in 1..5u8,
    ) {
        let alphabet = AlphabetTable::new(*b"acgt").unwrap();
        let input: Vec<u8> = indices.iter().map(|&i| b"acgt"[i]).collect();
        let config = LzwConfig::new(2, 2 + extra, policy);

        let mut encoder = LzwEncoder::new(alphabet, config).unwrap();
        encoder.set_trace(true);
        let compressed = encoder.encode(&input).unwrap();
        for codeword in encoder.trace().unwrap() {
            prop_assert!(codeword.code < 1 << codeword.width);
        }
        prop_assert_eq!(decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_foreign_symbol_always_rejected(
        prefix in prop::collection::vec(0..2usize, 0..200),
        foreign in b'c'..=b'z',
    ) {
        let alphabet = AlphabetTable::new(*b"ab").unwrap();
        let mut input: Vec<u8> = prefix.iter().map(|&i| b"ab"[i]).collect();
        input.push(foreign);
        prop_assert!(compress(&input, &alphabet, LzwConfig::default()).is_err());
    }
}
