/*! A succinct full-text index over one or more byte sequences: rank-supported bitvectors, an
 * FM-index and its bidirectional variant, and search-scheme driven approximate search on top.
 *
 * The library supports indexing a collection of texts over a runtime [alphabet], built on
 * suffix arrays from [`libsais`] (parallelized via [`rayon`]).
 *
 * ## Usage
 *
 * ```
 * use bifmcore::{FmIndexConfig, alphabet};
 *
 * let dna_n_alphabet = alphabet::ascii_dna_with_n();
 * let texts: [&[u8]; 2] = [b"aACGT", b"acGtn"];
 *
 * let index = FmIndexConfig::new()
 *     .construct_index(&texts, dna_n_alphabet)
 *     .unwrap();
 *
 * let query = b"GT";
 * assert_eq!(index.count(query), 2);
 *
 * for hit in index.locate(query) {
 *     println!(
 *         "Found query in text {} at position {}.",
 *         hit.sequence_id, hit.position
 *     );
 * }
 * ```
 *
 * For approximate matches under a search scheme, or bidirectional extension of a match, build a
 * [`BiFmIndex`] via [`FmIndexConfig::construct_bi_index`] and drive it through a [`Cursor`] or
 * the [`search`] module directly.
 *
 * [original paper]: https://doi.org/10.1109/SFCS.2000.892127
 */

/// Functions to create commonly used alphabets (DNA, DNA with ambiguity codes, IUPAC, protein).
pub mod alphabet;
pub mod bitvector;
mod config;
mod construction;
mod csa;
mod cursor;
pub mod error;
pub mod fm_index;
pub mod bi_fm_index;
pub mod rank_string;
pub mod search;
pub mod search_scheme;
mod text_id_lookup;

#[doc(inline)]
pub use alphabet::Alphabet;
#[doc(inline)]
pub use bi_fm_index::{BiFmIndex, BiInterval};
#[doc(inline)]
pub use config::FmIndexConfig;
#[doc(inline)]
pub use cursor::Cursor;
#[doc(inline)]
pub use error::{BuildError, DeserializeError};
#[doc(inline)]
pub use fm_index::{BuildOptions, FmIndex, Hit};
#[doc(inline)]
pub use rank_string::{InterleavedRankString, MultiBitvectorRankString, RankString, WaveletRankString};
#[doc(inline)]
pub use search::{ApproxHit, HitPolicy};
#[doc(inline)]
pub use search_scheme::{SchemePart, SearchScheme};
