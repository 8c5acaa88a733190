//! Fixed-width bitsets identifying bipartitions of the leaf set.

/// Machine word underlying a [Split] bitset.
pub type SplitWord = u64;

const BITS_PER_WORD: usize = SplitWord::BITS as usize;

// =#========================================================================#=
// SPLIT
// =#========================================================================#=
/// A bipartition of the leaf set, induced by removing one edge of a tree.
///
/// Leaf `i` is on one side of the edge exactly when bit `i` is set; bit `i`
/// of word `i / 64` is bit `i % 64`, counting from the least significant
/// bit. Bits in the final word beyond the leaf count are unused and always
/// zero; `mask` selects the used bits of that word.
///
/// Equality and ordering consider the raw words only (two splits over
/// different leaf counts never meaningfully compare), so a `BTreeSet<Split>`
/// is a canonical, edge-length-free identifier of a tree topology.
/// [is_equivalent](Split::is_equivalent) offers the weaker comparison that
/// also accepts the complemented bitset, for splits taken from trees rooted
/// on opposite sides of the same edge.
#[derive(Debug, Clone)]
pub struct Split {
    mask: SplitWord,
    words: Vec<SplitWord>,
    num_leaves: usize,
}

impl Split {
    /// Creates an all-zero split over `num_leaves` leaves.
    ///
    /// # Panics
    /// Panics if `num_leaves` is zero.
    pub fn new(num_leaves: usize) -> Self {
        assert!(num_leaves > 0, "a split needs at least one leaf");
        let num_words = 1 + (num_leaves - 1) / BITS_PER_WORD;
        let num_used_bits = num_leaves - (num_words - 1) * BITS_PER_WORD;
        let mask = if num_used_bits == BITS_PER_WORD {
            !0
        } else {
            (1 << num_used_bits) - 1
        };
        Split {
            mask,
            words: vec![0; num_words],
            num_leaves,
        }
    }

    /// Returns the number of leaves this split partitions.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Zeroes all bits, keeping the leaf count.
    pub fn clear(&mut self) {
        for w in &mut self.words {
            *w = 0;
        }
    }

    /// Returns the raw word at `word_index`.
    ///
    /// # Panics
    /// Panics if `word_index` is out of bounds.
    pub fn word(&self, word_index: usize) -> SplitWord {
        self.words[word_index]
    }

    /// Sets the bit for `leaf_index`.
    ///
    /// # Panics
    /// Panics if `leaf_index` is not below the leaf count.
    pub fn set_bit(&mut self, leaf_index: usize) {
        assert!(leaf_index < self.num_leaves);
        self.words[leaf_index / BITS_PER_WORD] |= 1 << (leaf_index % BITS_PER_WORD);
    }

    /// Returns the bit for `leaf_index`.
    ///
    /// # Panics
    /// Panics if `leaf_index` is not below the leaf count.
    pub fn bit_at(&self, leaf_index: usize) -> bool {
        assert!(leaf_index < self.num_leaves);
        self.words[leaf_index / BITS_PER_WORD] & (1 << (leaf_index % BITS_PER_WORD)) != 0
    }

    /// Unions `other` into this split.
    ///
    /// A node's split is the union of its children's splits, so building
    /// splits in a single reverse-preorder sweep needs only this operation.
    pub fn add(&mut self, other: &Split) {
        debug_assert_eq!(self.words.len(), other.words.len());
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
    }

    /// Returns whether `other` identifies the same bipartition, allowing
    /// for the two splits having been taken from opposite sides of the
    /// edge (all bits complemented).
    ///
    /// The first word fixes the polarity; every later word must then agree
    /// with that polarity exactly.
    pub fn is_equivalent(&self, other: &Split) -> bool {
        let num_words = self.words.len();
        debug_assert!(num_words > 0);

        // 1 means same side of the edge, 2 means complemented
        let mut polarity = 0u8;
        for i in 0..num_words {
            let a = self.words[i];
            let b = other.words[i];
            let a_equals_b = a == b;
            let a_equals_inverse_b = if i == num_words - 1 {
                a == !b & self.mask
            } else {
                a == !b
            };
            if !(a_equals_b || a_equals_inverse_b) {
                return false;
            }
            if polarity == 0 {
                polarity = if a_equals_b { 1 } else { 2 };
            } else if (polarity == 1 && !a_equals_b) || (polarity == 2 && !a_equals_inverse_b) {
                return false;
            }
        }
        true
    }

    /// Returns whether this split and `other` could coexist in one tree:
    /// their set sides must be nested or disjoint.
    pub fn is_compatible_with(&self, other: &Split) -> bool {
        for (&a, &b) in self.words.iter().zip(&other.words) {
            let a_and_b = a & b;
            if a_and_b != 0 && a_and_b != a && a_and_b != b {
                return false;
            }
        }
        true
    }

    /// Returns whether this split and `other` cannot coexist in one tree.
    pub fn conflicts_with(&self, other: &Split) -> bool {
        !self.is_compatible_with(other)
    }

    /// Renders the split as one character per leaf, `*` for a set bit and
    /// `-` for an unset one, leaf 0 first.
    pub fn pattern(&self) -> String {
        (0..self.num_leaves)
            .map(|i| if self.bit_at(i) { '*' } else { '-' })
            .collect()
    }
}

// Comparisons look at the words only, so splits are usable as ordered keys.
impl PartialEq for Split {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for Split {}

impl PartialOrd for Split {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Split {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.words.cmp(&other.words)
    }
}

#[cfg(test)]
mod tests {
    use super::Split;

    fn split_with_bits(num_leaves: usize, bits: &[usize]) -> Split {
        let mut s = Split::new(num_leaves);
        for &b in bits {
            s.set_bit(b);
        }
        s
    }

    #[test]
    fn test_set_and_get_bits() {
        let s = split_with_bits(70, &[0, 63, 64, 69]);
        assert!(s.bit_at(0));
        assert!(s.bit_at(63));
        assert!(s.bit_at(64));
        assert!(s.bit_at(69));
        assert!(!s.bit_at(1));
        assert!(!s.bit_at(65));
        assert_eq!(s.word(0), (1 << 63) | 1);
        assert_eq!(s.word(1), (1 << 5) | 1);
    }

    #[test]
    fn test_equivalence_with_complement() {
        let a = split_with_bits(6, &[0, 1]);
        let b = split_with_bits(6, &[2, 3, 4, 5]);
        assert_ne!(a, b);
        assert!(a.is_equivalent(&b));
        assert!(b.is_equivalent(&a));

        let c = split_with_bits(6, &[0, 2]);
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn test_equivalence_multiword_polarity() {
        // Complement equivalence must hold across all words, including the
        // masked final word
        let a = split_with_bits(70, &[0, 1, 2]);
        let b = split_with_bits(70, &(3..70).collect::<Vec<_>>());
        assert!(a.is_equivalent(&b));

        // Mixed polarity (first word complemented, second identical) is
        // not equivalence
        let mut mixed = Split::new(70);
        for i in 0..64 {
            if !a.bit_at(i) {
                mixed.set_bit(i);
            }
        }
        for i in 64..70 {
            if a.bit_at(i) {
                mixed.set_bit(i);
            }
        }
        assert!(!a.is_equivalent(&mixed));
    }

    #[test]
    fn test_compatibility() {
        let ab = split_with_bits(6, &[0, 1]);
        let abc = split_with_bits(6, &[0, 1, 2]);
        let de = split_with_bits(6, &[3, 4]);
        let bc = split_with_bits(6, &[1, 2]);

        // Nested and disjoint splits are compatible
        assert!(ab.is_compatible_with(&abc));
        assert!(abc.is_compatible_with(&ab));
        assert!(ab.is_compatible_with(&de));

        // Overlapping but non-nested splits conflict
        assert!(ab.conflicts_with(&bc));
        assert!(bc.conflicts_with(&ab));
    }

    #[test]
    fn test_pattern() {
        let s = split_with_bits(6, &[0, 3]);
        assert_eq!(s.pattern(), "*--*--");
    }

    #[test]
    fn test_ordering_over_words() {
        let a = split_with_bits(6, &[0]);
        let b = split_with_bits(6, &[1]);
        assert!(a < b);
        assert_eq!(a, split_with_bits(6, &[0]));
    }
}
