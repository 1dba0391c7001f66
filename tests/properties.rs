use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use lexicon::{parse, Bucket, LetterFilter, LexiconIndex};

/// Lines that are sometimes valid records and sometimes garbage.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[A-Za-z0-9 ,'()?-]{0,12}", "[A-Za-z0-9_-]{1,8}").prop_map(|(w, id)| format!("{w},{id}")),
        "[ -~]{0,20}",
        Just(String::new()),
        Just(",".to_string()),
    ]
}

fn dataset() -> impl Strategy<Value = String> {
    prop::collection::vec(line(), 0..40).prop_map(|lines| {
        let mut text = String::from("word,videoId\n");
        for l in lines {
            text.push_str(&l);
            text.push('\n');
        }
        text
    })
}

proptest! {
    #[test]
    fn parse_accounts_for_every_data_line(raw in "(?s).{0,300}") {
        let report = parse(&raw);
        let data_lines = raw.lines().count().saturating_sub(1);
        prop_assert_eq!(report.accepted + report.rejected, data_lines);
        prop_assert_eq!(report.entries.len(), report.accepted);
    }

    #[test]
    fn parsed_entries_are_well_formed(raw in dataset()) {
        for e in parse(&raw).entries {
            prop_assert!(!e.word().is_empty());
            prop_assert_eq!(e.word().trim(), e.word());
            prop_assert!(!e.reference_id().is_empty());
            prop_assert!(e.reference_id().bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        }
    }

    #[test]
    fn list_all_is_source_order_and_idempotent(raw in dataset()) {
        let report = parse(&raw);
        let index = LexiconIndex::build(report.entries.clone());

        let first = index.list_all();
        prop_assert_eq!(&first, &index.list_all());

        let mut seen = HashSet::new();
        let expected: Vec<_> = report.entries.into_iter().filter(|e| seen.insert(e.clone())).collect();
        prop_assert_eq!(first.entries, expected);
    }

    #[test]
    fn buckets_are_ordered_subsets(raw in dataset(), c in "[A-Za-z]") {
        let index = LexiconIndex::build(parse(&raw).entries);
        let all = index.list_all().entries;
        let filter: LetterFilter = c.parse().unwrap();
        let bucket = index.list_by_letter(filter).entries;

        // subsequence of the full list, in order
        let mut rest = all.iter();
        for e in &bucket {
            prop_assert!(rest.any(|a| a == e));
            prop_assert_eq!(Some(e.bucket()), filter.bucket());
        }

        let other = index.list_by_letter(LetterFilter::Other).entries;
        prop_assert!(other.iter().all(|e| e.bucket() == Bucket::Other));
    }

    #[test]
    fn search_is_case_insensitive_containment(raw in dataset(), needle in "[A-Za-z ]{0,3}") {
        let index = LexiconIndex::build(parse(&raw).entries);
        let lower = index.search(&needle.to_lowercase());
        let upper = index.search(&needle.to_uppercase());
        prop_assert_eq!(&lower, &upper);

        let expected: Vec<_> = index
            .entries()
            .iter()
            .filter(|e| e.word().to_lowercase().contains(&needle.to_lowercase()))
            .cloned()
            .collect();
        prop_assert_eq!(lower.entries, expected);
    }

    #[test]
    fn sample_always_returns_an_entry(raw in dataset(), seed in any::<u64>()) {
        let index = LexiconIndex::build(parse(&raw).entries);
        prop_assume!(!index.is_empty());

        let all_words: HashSet<String> = index.entries().iter().map(|e| e.word().to_string()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = index.sample(&all_words, &mut rng).unwrap();
        prop_assert!(index.entries().contains(picked));
    }
}
