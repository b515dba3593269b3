//! Property-based tests for id de-duplication
//!
//! Uses proptest to generate record lists with colliding ids

use std::collections::HashSet;

use proptest::prelude::*;
use sketchboard::gallery_app::aggregation::dedup_by_id;
use sketchboard::shared::ImageRecord;

fn records(pairs: Vec<(String, String)>) -> Vec<ImageRecord> {
    pairs
        .into_iter()
        .map(|(id, title)| {
            let mut record = ImageRecord::new(title, vec![], "<svg/>", "{}");
            record.id = id;
            record
        })
        .collect()
}

proptest! {
    #[test]
    fn test_dedup_is_idempotent(pairs in prop::collection::vec(("[a-e]", "[a-z]{1,6}"), 0..40)) {
        let once = dedup_by_id(records(pairs));
        let twice = dedup_by_id(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order(
        pairs in prop::collection::vec(("[a-e]", "[a-z]{1,6}"), 0..40),
    ) {
        let input = records(pairs);
        let output = dedup_by_id(input.clone());

        // Every kept record is the earliest input record with its id.
        let mut positions = Vec::new();
        for kept in &output {
            let first = input.iter().position(|r| r.id == kept.id).unwrap();
            prop_assert_eq!(kept, &input[first]);
            positions.push(first);
        }
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_dedup_output_ids_are_unique(pairs in prop::collection::vec(("[a-e]", "[a-z]{1,6}"), 0..40)) {
        let input = records(pairs);
        let distinct: HashSet<_> = input.iter().map(|r| r.id.clone()).collect();
        let output = dedup_by_id(input);

        prop_assert_eq!(output.len(), distinct.len());
    }
}
