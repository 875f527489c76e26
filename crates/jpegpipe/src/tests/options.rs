use rstest::rstest;

use crate::{ByteOffset, OptionsError, OutputMode, ScannerOptions};

#[rstest]
#[case::plain("300", 300)]
#[case::padded("  42", 42)]
#[case::plus_sign("+7", 7)]
#[case::trailing_text("250px", 250)]
#[case::fraction("12.9", 12)]
#[case::negative("-20", 0)]
#[case::negative_zero("-0", 0)]
#[case::above_max("1000001", 1_000_000)]
#[case::huge("99999999999999999999999", 1_000_000)]
#[case::empty("", 200)]
#[case::words("fast", 200)]
#[case::sign_only("-", 200)]
fn parse_lossy(#[case] text: &str, #[case] expected: usize) {
    assert_eq!(ByteOffset::parse_lossy(text).get(), expected);
}

#[rstest]
#[case(i64::MIN, 0)]
#[case(-1, 0)]
#[case(0, 0)]
#[case(1, 1)]
#[case(1_000_000, 1_000_000)]
#[case(i64::MAX, 1_000_000)]
fn byte_offset_is_clamped(#[case] n: i64, #[case] expected: usize) {
    assert_eq!(ByteOffset::new(n).get(), expected);
}

#[rstest]
#[case("singleBuffer", OutputMode::SingleBuffer)]
#[case("segment_list", OutputMode::SegmentList)]
#[case(" pooled-buffer ", OutputMode::PooledBuffer)]
fn output_mode_from_str(#[case] text: &str, #[case] expected: OutputMode) {
    assert_eq!(text.parse::<OutputMode>(), Ok(expected));
    assert_eq!(expected.to_string().parse::<OutputMode>(), Ok(expected));
}

#[test]
fn unknown_output_mode() {
    let err = "buffer".parse::<OutputMode>().unwrap_err();
    assert_eq!(err, OptionsError::UnknownOutputMode("buffer".into()));
    assert_eq!(err.to_string(), "unknown output mode 'buffer'");
}

#[test]
fn set_applies_each_key() {
    let mut options = ScannerOptions::default();
    options.set("byteOffset", "64").unwrap();
    options.set("output_mode", "pooledBuffer").unwrap();
    options.set("poolSize", "4").unwrap();
    assert_eq!(
        options,
        ScannerOptions {
            byte_offset: ByteOffset::new(64),
            output_mode: OutputMode::PooledBuffer,
            pool_size: 4,
        }
    );
}

#[rstest]
#[case("0", 2)]
#[case("1", 2)]
#[case("3", 3)]
#[case("many", 2)]
fn set_pool_size_is_clamped(#[case] value: &str, #[case] expected: usize) {
    let mut options = ScannerOptions::default();
    options.set("pool_size", value).unwrap();
    assert_eq!(options.pool_size, expected);
}

#[test]
fn set_rejects_unknown_keys_without_side_effects() {
    let mut options = ScannerOptions::default();
    let err = options.set("quality", "90").unwrap_err();
    assert_eq!(err, OptionsError::UnknownOption("quality".into()));
    assert_eq!(err.to_string(), "unknown option 'quality'");

    assert!(options.set("outputMode", "ring").is_err());
    assert_eq!(options, ScannerOptions::default());
}

#[test]
fn effective_pool_size() {
    let options = ScannerOptions {
        pool_size: 0,
        ..Default::default()
    };
    assert_eq!(options.effective_pool_size(), 2);
}

#[cfg(feature = "serde")]
mod serde_config {
    use rstest::rstest;

    use crate::{ByteOffset, OutputMode, ScannerOptions};

    #[test]
    fn empty_object_is_default() {
        let options: ScannerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ScannerOptions::default());
    }

    #[test]
    fn camel_case_fields() {
        let options: ScannerOptions = serde_json::from_str(
            r#"{"byteOffset": 0, "outputMode": "segmentList", "poolSize": 3}"#,
        )
        .unwrap();
        assert_eq!(
            options,
            ScannerOptions {
                byte_offset: ByteOffset::new(0),
                output_mode: OutputMode::SegmentList,
                pool_size: 3,
            }
        );
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"byteOffset":0,"outputMode":"segmentList","poolSize":3}"#
        );
    }

    #[rstest]
    #[case("-5", 0)]
    #[case("2000000", 1_000_000)]
    #[case("18446744073709551615", 1_000_000)]
    #[case("12.7", 12)]
    #[case(r#""300""#, 300)]
    #[case(r#""abc""#, 200)]
    #[case("null", 200)]
    #[case("true", 200)]
    #[case("[1]", 200)]
    fn lenient_byte_offset(#[case] json: &str, #[case] expected: usize) {
        let offset: ByteOffset = serde_json::from_str(json).unwrap();
        assert_eq!(offset.get(), expected);
    }

    #[test]
    fn unknown_output_mode_is_an_error() {
        assert!(serde_json::from_str::<ScannerOptions>(r#"{"outputMode": "ring"}"#).is_err());
    }
}
