//! Property tests for envelope encoding and decoding.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use x12_envelope::{
    chunk_transaction_sets, decode_interchange, encode_interchange_with_options, wrap_segments,
    ControlNumber, Delimiters, EncodeOptions, EnvelopeBuilder, EnvelopeConfig, FixedClock,
    UsageIndicator,
};

fn id_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z0-9]{2,15}").expect("valid regex")
}

fn control_strategy() -> impl Strategy<Value = ControlNumber> {
    (0u32..=999_999_999).prop_map(|n| ControlNumber::new(n).expect("in range"))
}

fn instant_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (1969i32..=2068, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60).prop_map(|(y, m, d, h, min)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid instant")
    })
}

fn usage_strategy() -> impl Strategy<Value = UsageIndicator> {
    prop_oneof![
        Just(UsageIndicator::Test),
        Just(UsageIndicator::Production),
        Just(UsageIndicator::Information),
    ]
}

/// A content segment whose tag is never a trailer.
fn body_segment_strategy() -> impl Strategy<Value = String> {
    (
        prop::string::string_regex("[A-Z][A-Z0-9]{1,2}").expect("valid regex"),
        prop::collection::vec(prop::string::string_regex("[A-Z0-9 .]{0,12}").expect("valid regex"), 0..6),
    )
        .prop_filter("trailer tags close envelopes", |(tag, _)| {
            !matches!(tag.as_str(), "SE" | "GE" | "IEA")
        })
        .prop_map(|(tag, elements)| {
            let mut segment = tag;
            for element in elements {
                segment.push('*');
                segment.push_str(&element);
            }
            segment.push('~');
            segment
        })
}

/// Segment lines for one or more complete transaction sets.
fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::collection::vec(body_segment_strategy(), 0..6), 1..5).prop_map(|sets| {
        let mut lines = Vec::new();
        for (n, body) in sets.into_iter().enumerate() {
            let control = format!("{:04}", n + 1);
            lines.push(format!("ST*837*{control}~"));
            let count = body.len() + 2;
            lines.extend(body);
            lines.push(format!("SE*{count}*{control}~"));
        }
        lines
    })
}

fn config_strategy() -> impl Strategy<Value = EnvelopeConfig> {
    (
        id_strategy(),
        id_strategy(),
        control_strategy(),
        control_strategy(),
        usage_strategy(),
        any::<bool>(),
    )
        .prop_map(|(sender, receiver, isa_control, gs_control, usage, ack)| {
            EnvelopeBuilder::new(sender, receiver)
                .interchange_control_number(isa_control)
                .group_control_number(gs_control)
                .functional_id_code("HC")
                .version("005010X", "222", "A1")
                .usage(usage)
                .acknowledgment_requested(ack)
                .build()
                .expect("complete config")
        })
}

fn layout_strategy() -> impl Strategy<Value = EncodeOptions> {
    prop_oneof![Just(EncodeOptions::new()), Just(EncodeOptions::wire())]
}

proptest! {
    #[test]
    fn prop_round_trip(
        lines in lines_strategy(),
        config in config_strategy(),
        now in instant_strategy(),
        options in layout_strategy(),
    ) {
        let sets = chunk_transaction_sets(&lines, &config.delimiters).unwrap();
        let interchange = config.envelope(sets, now);
        let text = encode_interchange_with_options(&interchange, options).unwrap();
        let decoded = decode_interchange(&text).unwrap();
        prop_assert_eq!(decoded, interchange);
    }

    #[test]
    fn prop_chunk_wrap_decode_preserves_sets(
        lines in lines_strategy(),
        config in config_strategy(),
        now in instant_strategy(),
    ) {
        let clock = FixedClock::new(now);
        let text = wrap_segments(&lines, &config, &clock, EncodeOptions::new()).unwrap();
        let decoded = decode_interchange(&text).unwrap();

        let rendered: String = decoded
            .transaction_sets()
            .iter()
            .map(|set| set.to_text(&decoded.delimiters))
            .collect();
        let expected: String = lines.iter().map(|line| format!("{line}\n")).collect();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn prop_padding_and_counts(
        lines in lines_strategy(),
        config in config_strategy(),
        now in instant_strategy(),
    ) {
        let clock = FixedClock::new(now);
        let text = wrap_segments(&lines, &config, &clock, EncodeOptions::new()).unwrap();
        let segments: Vec<&str> = text.lines().collect();

        let isa = segments[0];
        prop_assert_eq!(isa.len(), 106);
        prop_assert_eq!(&isa[3..4], "*");
        prop_assert_eq!(&isa[104..106], ":~");
        prop_assert_eq!(&isa[90..99], config.interchange.control_number.padded());

        let gs: Vec<&str> = segments[1].trim_end_matches('~').split('*').collect();
        prop_assert_eq!(gs[6], config.group.control_number.padded());

        let set_count = lines.iter().filter(|line| line.starts_with("SE*")).count();
        let ge = segments[segments.len() - 2];
        prop_assert_eq!(
            ge.to_string(),
            format!("GE*{}*{}~", set_count, config.group.control_number.value())
        );
        let iea = segments[segments.len() - 1];
        prop_assert_eq!(
            iea.to_string(),
            format!("IEA*1*{:09}~", config.interchange.control_number.value())
        );
    }

    #[test]
    fn prop_chunking_is_idempotent(lines in lines_strategy()) {
        let delimiters = Delimiters::default();
        let sets = chunk_transaction_sets(&lines, &delimiters).unwrap();
        for set in &sets {
            let text = set.to_text(&delimiters);
            let again = chunk_transaction_sets(text.lines(), &delimiters).unwrap();
            prop_assert_eq!(again.len(), 1);
            prop_assert_eq!(&again[0], set);
        }
    }
}
