//! Property tests for token segmentation.

use flightroute_core::{split_segments, Command, Segment};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("AUTO".to_string()),
        Just("RAND".to_string()),
        Just("auto".to_string()),
        "[A-Z][A-Z0-9]{0,4}",
    ]
}

proptest! {
    #[test]
    fn concatenated_segments_rebuild_the_input(tokens in prop::collection::vec(token(), 1..16)) {
        let segments = split_segments(&tokens).unwrap();
        let rebuilt: Vec<&str> = segments.iter().flat_map(|s| s.tokens()).collect();
        prop_assert_eq!(rebuilt, tokens.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn explicit_runs_are_maximal_and_non_empty(tokens in prop::collection::vec(token(), 1..16)) {
        let segments = split_segments(&tokens).unwrap();

        for segment in &segments {
            if let Segment::Explicit(run) = segment {
                prop_assert!(!run.is_empty());
                prop_assert!(run.iter().all(|t| Command::parse(t).is_none()));
            }
        }
        for pair in segments.windows(2) {
            let both_explicit = matches!(pair, [Segment::Explicit(_), Segment::Explicit(_)]);
            prop_assert!(!both_explicit, "adjacent explicit runs in {:?}", segments);
        }
    }

    #[test]
    fn every_command_token_is_its_own_segment(tokens in prop::collection::vec(token(), 1..16)) {
        let segments = split_segments(&tokens).unwrap();
        let commands = tokens.iter().filter(|t| Command::parse(t).is_some()).count();
        let command_segments = segments
            .iter()
            .filter(|s| matches!(s, Segment::Command(_)))
            .count();
        prop_assert_eq!(commands, command_segments);
    }
}
