//! Runtime alphabets mapping arbitrary input bytes onto a dense `[0, size)` symbol range.
//!
//! Symbol `0` is always reserved internally for the per-sequence sentinel. User-facing
//! alphabets therefore occupy dense symbols `[1, size)`.

use crate::error::BuildError;

const NO_SYMBOL: u8 = u8::MAX;

/// A dense mapping from input (`io`) bytes to the symbol range consumed by the index.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "savefile", derive(savefile::savefile_derive::Savefile))]
pub struct Alphabet {
    io_to_dense: [u8; 256],
    dense_to_io: Vec<u8>,
    // trailing `num_not_searched` dense symbols are excluded from search-scheme enumeration
    num_not_searched: usize,
}

impl Alphabet {
    /// Builds an alphabet where every byte in `symbols` maps to its own dense symbol.
    ///
    /// The last `num_not_searched` entries of `symbols` are valid for exact containment
    /// checks but are skipped when a search scheme enumerates "all other symbols" (e.g. an
    /// ambiguity code such as `N`).
    pub fn from_io_symbols(symbols: &[u8], num_not_searched: usize) -> Self {
        Self::from_ambiguous_io_symbols(symbols.iter().map(std::slice::from_ref), num_not_searched)
    }

    /// Builds an alphabet where each item of `groups` is a set of input bytes mapped onto the
    /// *same* dense symbol (e.g. IUPAC ambiguity codes folded onto a base).
    pub fn from_ambiguous_io_symbols<'a>(
        groups: impl IntoIterator<Item = &'a [u8]>,
        num_not_searched: usize,
    ) -> Self {
        let mut io_to_dense = [NO_SYMBOL; 256];
        let mut dense_to_io = Vec::new();

        // dense symbol 0 is reserved for the sentinel
        dense_to_io.push(0u8);

        for group in groups {
            assert!(!group.is_empty(), "alphabet group must not be empty");
            let dense = dense_to_io.len() as u8;
            dense_to_io.push(group[0]);
            for &byte in group {
                assert_eq!(
                    io_to_dense[byte as usize], NO_SYMBOL,
                    "byte {byte:#04x} assigned to more than one alphabet group"
                );
                io_to_dense[byte as usize] = dense;
            }
        }

        assert!(
            dense_to_io.len() >= 2,
            "alphabet must contain at least one searchable symbol"
        );

        Self {
            io_to_dense,
            dense_to_io,
            num_not_searched,
        }
    }

    /// Total number of dense symbols, including the reserved sentinel at 0.
    pub fn size(&self) -> usize {
        self.dense_to_io.len()
    }

    /// Number of dense symbols (excluding the sentinel) that participate in backward-search
    /// enumeration, i.e. `size() - 1 - num_not_searched`.
    pub fn num_searchable_symbols(&self) -> usize {
        self.dense_to_io.len() - 1 - self.num_not_searched
    }

    pub fn num_not_searched(&self) -> usize {
        self.num_not_searched
    }

    /// Translates an input byte to its dense symbol, or `None` if it is not part of the alphabet.
    pub fn io_to_dense_representation(&self, byte: u8) -> Option<u8> {
        let dense = self.io_to_dense[byte as usize];
        (dense != NO_SYMBOL).then_some(dense)
    }

    /// Translates a dense symbol back to its canonical input byte representation.
    pub fn dense_to_io_representation(&self, dense: u8) -> u8 {
        self.dense_to_io[dense as usize]
    }

    pub(crate) fn translate_sequence(
        &self,
        sequence: &[u8],
        sequence_index: usize,
    ) -> Result<Vec<u8>, BuildError> {
        sequence
            .iter()
            .enumerate()
            .map(|(position, &byte)| {
                if byte == 0 {
                    return Err(BuildError::InvalidSentinelUsage {
                        sequence_index,
                        position,
                    });
                }
                self.io_to_dense_representation(byte)
                    .ok_or(BuildError::InvalidAlphabet {
                        byte,
                        sequence_index,
                        position,
                    })
            })
            .collect()
    }
}

/// DNA alphabet over `ACGT`, case-insensitive.
pub fn ascii_dna() -> Alphabet {
    Alphabet::from_ambiguous_io_symbols([b"Aa".as_slice(), b"Cc", b"Gg", b"Tt"], 0)
}

/// DNA alphabet over `ACGT` plus a non-searched ambiguity symbol `N`, case-insensitive.
pub fn ascii_dna_with_n() -> Alphabet {
    Alphabet::from_ambiguous_io_symbols([b"Aa".as_slice(), b"Cc", b"Gg", b"Tt", b"Nn"], 1)
}

/// DNA alphabet with full IUPAC ambiguity codes, each mapped onto its own dense symbol,
/// case-insensitive.
pub fn ascii_dna_iupac() -> Alphabet {
    Alphabet::from_ambiguous_io_symbols(
        [
            b"Aa".as_slice(),
            b"Cc",
            b"Gg",
            b"Tt",
            b"Rr",
            b"Yy",
            b"Ss",
            b"Ww",
            b"Kk",
            b"Mm",
            b"Bb",
            b"Dd",
            b"Hh",
            b"Vv",
            b"Nn",
        ],
        11,
    )
}

/// The 20 standard amino acids plus the ambiguity codes `BJZX`, case-insensitive.
pub fn ascii_protein() -> Alphabet {
    Alphabet::from_ambiguous_io_symbols(
        [
            b"Aa".as_slice(),
            b"Cc",
            b"Dd",
            b"Ee",
            b"Ff",
            b"Gg",
            b"Hh",
            b"Ii",
            b"Kk",
            b"Ll",
            b"Mm",
            b"Nn",
            b"Pp",
            b"Qq",
            b"Rr",
            b"Ss",
            b"Tt",
            b"Vv",
            b"Ww",
            b"Yy",
            b"Bb",
            b"Jj",
            b"Zz",
            b"Xx",
        ],
        4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_roundtrip() {
        let alphabet = ascii_dna();
        assert_eq!(alphabet.size(), 5);
        assert_eq!(alphabet.num_searchable_symbols(), 4);

        for &byte in b"ACGT" {
            let dense = alphabet.io_to_dense_representation(byte).unwrap();
            assert_eq!(alphabet.dense_to_io_representation(dense), byte);
        }
        assert!(alphabet.io_to_dense_representation(b'N').is_none());
    }

    #[test]
    fn ambiguous_groups_share_a_symbol() {
        let alphabet =
            Alphabet::from_ambiguous_io_symbols([b"Aa".as_slice(), b"Cc".as_slice()], 0);
        assert_eq!(
            alphabet.io_to_dense_representation(b'A'),
            alphabet.io_to_dense_representation(b'a')
        );
    }

    #[test]
    fn sentinel_byte_is_rejected() {
        let alphabet = ascii_dna();
        let err = alphabet.translate_sequence(b"AC\0GT", 0).unwrap_err();
        assert!(matches!(err, BuildError::InvalidSentinelUsage { .. }));
    }
}
