use proptest::prelude::*;

use kmer_lookup::{
    IndexConfig, KmerIndex, MatchResult, MatchingConfig, SequenceCollection, SequenceId,
    SubsequenceMatcher,
};

/// Brute-force scan for every exact occurrence of `query`
fn naive_find(sequences: &SequenceCollection, query: &[u8]) -> MatchResult {
    let mut result = MatchResult::new();
    for (id, residues) in sequences.iter() {
        if residues.len() < query.len() {
            continue;
        }
        for i in 0..=residues.len() - query.len() {
            if &residues[i..i + query.len()] == query {
                result.insert(id.clone(), i);
            }
        }
    }
    result
}

fn residues(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), 0..max_len)
}

fn collection(seqs: Vec<Vec<u8>>) -> SequenceCollection {
    seqs.into_iter()
        .enumerate()
        .map(|(i, s)| (format!("seq{i}"), s))
        .collect()
}

fn lenient() -> MatchingConfig {
    MatchingConfig {
        reject_empty_index: false,
        ..MatchingConfig::default()
    }
}

proptest! {
    #[test]
    fn finds_exactly_the_naive_occurrences(
        seqs in prop::collection::vec(residues(60), 1..4),
        query in residues(10),
        k in 1usize..5,
    ) {
        prop_assume!(query.len() >= k);

        let sequences = collection(seqs);
        let index = KmerIndex::build(&sequences, IndexConfig::new(k)).expect("index build succeeds");
        let matcher = SubsequenceMatcher::with_config(&index, lenient());

        let found = matcher.find(&query).expect("query is long enough");
        prop_assert_eq!(found, naive_find(&sequences, &query));
    }

    #[test]
    fn every_substring_is_found_at_its_offset(
        (reference, start, len) in (1usize..80)
            .prop_flat_map(|n| (prop::collection::vec(prop::sample::select(b"ACGT".to_vec()), n), 0..n, 1..=n))
            .prop_filter("substring must fit", |(r, s, l)| s + l <= r.len()),
        k in 1usize..6,
    ) {
        prop_assume!(len >= k);

        let query = reference[start..start + len].to_vec();
        let sequences = collection(vec![reference]);
        let index = KmerIndex::build(&sequences, IndexConfig::new(k)).expect("index build succeeds");
        let matcher = SubsequenceMatcher::new(&index);

        let found = matcher.find(&query).expect("query is long enough");
        let offsets = found.offsets(&SequenceId::new("seq0")).expect("substring is present");
        prop_assert!(offsets.contains(&start));
    }

    #[test]
    fn reported_offsets_match_the_query(
        seqs in prop::collection::vec(residues(60), 1..4),
        query in residues(8),
        k in 1usize..4,
    ) {
        prop_assume!(query.len() >= k);

        let sequences = collection(seqs);
        let index = KmerIndex::build(&sequences, IndexConfig::new(k)).expect("index build succeeds");
        let matcher = SubsequenceMatcher::with_config(&index, lenient());

        for (id, offset) in matcher.find(&query).expect("query is long enough").iter() {
            let residues = sequences.get(id).expect("hit on a known sequence");
            prop_assert_eq!(&residues[offset..offset + query.len()], query.as_slice());
        }
    }

    #[test]
    fn repeated_searches_agree(
        seqs in prop::collection::vec(residues(40), 1..3),
        query in residues(8),
        k in 1usize..4,
    ) {
        prop_assume!(query.len() >= k);

        let sequences = collection(seqs);
        let index = KmerIndex::build(&sequences, IndexConfig::legacy(k)).expect("index build succeeds");
        let matcher = SubsequenceMatcher::with_config(
            &index,
            MatchingConfig { reject_empty_index: false, ..MatchingConfig::legacy() },
        );

        let first = matcher.find(&query).expect("query is long enough");
        let second = matcher.find(&query).expect("query is long enough");
        prop_assert_eq!(first, second);
    }
}
