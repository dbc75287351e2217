use std::collections::HashMap;
use std::io::Cursor as IoCursor;

use bifmcore::search::backtracking;
use bifmcore::search_scheme::SearchScheme;
use bifmcore::{Alphabet, BiFmIndex, BuildOptions, FmIndex, Hit, HitPolicy};

fn counting_multiset(hits: &[Hit]) -> HashMap<Hit, usize> {
    let mut map = HashMap::new();
    for &hit in hits {
        *map.entry(hit).or_insert(0) += 1;
    }
    map
}

// Scenario A: single sequence, exact match.
#[test]
fn scenario_a_single_sequence_exact_match() {
    let alphabet = Alphabet::from_io_symbols(b"AC", 0);
    let index = FmIndex::construct(
        &[b"AAACAAACAAA"],
        alphabet,
        BuildOptions {
            suffix_array_sampling_rate: 1,
        },
    )
    .unwrap();

    let mut hits = index.locate(b"AC");
    hits.sort_by_key(|h| h.position);
    assert_eq!(
        hits,
        vec![
            Hit {
                sequence_id: 0,
                position: 2
            },
            Hit {
                sequence_id: 0,
                position: 6
            },
        ]
    );
}

// Scenario B: two sequences.
#[test]
fn scenario_b_two_sequences() {
    let alphabet = Alphabet::from_io_symbols(b"ABC", 0);
    let index = FmIndex::construct(
        &[b"AAACAAACAAA".as_slice(), b"AAABAAABAAA".as_slice()],
        alphabet,
        BuildOptions::default(),
    )
    .unwrap();

    let hits = index.locate(b"A");
    assert_eq!(hits.len(), 18);
    assert_eq!(hits.iter().filter(|h| h.sequence_id == 0).count(), 9);
    assert_eq!(hits.iter().filter(|h| h.sequence_id == 1).count(), 9);
}

// Scenario C: bidirectional equivalence.
#[test]
fn scenario_c_bidirectional_equivalence() {
    let alphabet = Alphabet::from_io_symbols(b"ACGT", 0);
    let index = BiFmIndex::construct(&[b"ACGTACGT"], alphabet.clone(), BuildOptions::default()).unwrap();

    let text = b"ACGTACGT";
    for window in text.windows(3) {
        let symbols: Vec<u8> = window
            .iter()
            .map(|&b| alphabet.io_to_dense_representation(b).unwrap())
            .collect();

        let mut left_to_right = index.full_interval();
        for &s in &symbols {
            left_to_right = index.extend_right(left_to_right, s);
        }

        let mut right_to_left = index.full_interval();
        for &s in symbols.iter().rev() {
            right_to_left = index.extend_left(right_to_left, s);
        }

        assert_eq!(left_to_right.count(), right_to_left.count());
        assert_eq!(
            index.locate(left_to_right).len(),
            index.locate(right_to_left).len()
        );
    }
}

// Scenario D: approximate search, 1 substitution, pigeonhole scheme.
#[test]
fn scenario_d_one_substitution_pigeonhole() {
    let alphabet = Alphabet::from_io_symbols(b"AC", 0);
    let index = BiFmIndex::construct(&[b"AAACAAA"], alphabet.clone(), BuildOptions::default()).unwrap();

    let query: Vec<u8> = b"AAAAAAA"
        .iter()
        .map(|&b| alphabet.io_to_dense_representation(b).unwrap())
        .collect();

    let scheme = SearchScheme::pigeonhole_one_error(query.len(), query.len() / 2);
    let results = backtracking::search(&index, &query, &scheme, HitPolicy::All);

    let total_hits: usize = results.iter().map(|r| r.hits.len()).sum();
    assert_eq!(total_hits, 1);
    let hit = results
        .iter()
        .find(|r| !r.hits.is_empty())
        .expect("expected one approximate hit");
    assert_eq!(hit.errors, 1);
    assert_eq!(
        hit.hits[0],
        Hit {
            sequence_id: 0,
            position: 0
        }
    );
}

// Scenario E: locate with sampling rate > 1, independent of the rate.
#[test]
fn scenario_e_locate_sampling_rate_independent() {
    let alphabet = Alphabet::from_io_symbols(b"A", 0);
    let text: &[u8] = b"AAAAAAAAAA";

    let rate1 = FmIndex::construct(
        &[text],
        alphabet.clone(),
        BuildOptions {
            suffix_array_sampling_rate: 1,
        },
    )
    .unwrap();
    let rate4 = FmIndex::construct(
        &[text],
        alphabet,
        BuildOptions {
            suffix_array_sampling_rate: 4,
        },
    )
    .unwrap();

    let mut hits1 = rate1.locate(b"AAA");
    let mut hits4 = rate4.locate(b"AAA");
    hits1.sort_by_key(|h| h.position);
    hits4.sort_by_key(|h| h.position);

    assert_eq!(hits1.len(), 8);
    assert_eq!(hits1, hits4);
    let positions: Vec<usize> = hits1.iter().map(|h| h.position).collect();
    assert_eq!(positions, (0..8).collect::<Vec<_>>());
}

// Scenario F: serialize/deserialize round-trip.
#[test]
fn scenario_f_serialize_deserialize_round_trip() {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let alphabet = Alphabet::from_io_symbols(b"ACGT", 0);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let text: Vec<u8> = (0..1000)
        .map(|_| b"ACGT"[rng.random_range(0..4)])
        .collect();

    let index = FmIndex::construct(&[text.as_slice()], alphabet.clone(), BuildOptions::default()).unwrap();

    let mut buffer = Vec::new();
    index.save_to_writer(&mut buffer).unwrap();
    let reloaded = FmIndex::load_from_reader(&mut IoCursor::new(buffer)).unwrap();

    for _ in 0..1000 {
        let start = rng.random_range(0..text.len() - 20);
        let query = &text[start..start + 20];

        let original = counting_multiset(&index.locate(query));
        let restored = counting_multiset(&reloaded.locate(query));
        assert_eq!(original, restored, "mismatch for query {query:?}");
    }
}
