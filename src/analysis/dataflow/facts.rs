//! Fact vectors and per-instruction fact maps.
//!
//! A [`FactVector`] is a fixed-width boolean vector with one bit per domain
//! element, packed 64 bits to the word. All vectors participating in one
//! analysis run share the same width (the domain size); the set operations
//! here enforce that with assertions, while the fallible width checks live at
//! the meet and engine layers where a mismatch is a reportable contract
//! violation.

use std::fmt;

use crate::ir::InstrId;

/// A fixed-width boolean vector over an analysis domain.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FactVector {
    words: Vec<u64>,
    width: usize,
}

impl FactVector {
    /// Creates a vector of the given width with every fact cleared.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            words: vec![0; width.div_ceil(64)],
            width,
        }
    }

    /// Creates a vector of the given width with every fact set.
    #[must_use]
    pub fn full(width: usize) -> Self {
        let mut words = vec![u64::MAX; width.div_ceil(64)];
        // Clear the excess bits in the last word so equality stays bitwise.
        if width % 64 != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << (width % 64)) - 1;
            }
        }
        Self { words, width }
    }

    /// Returns the width of this vector (the domain size it is aligned to).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Sets the fact at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.width, "fact index out of bounds");
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Clears the fact at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn clear(&mut self, index: usize) {
        assert!(index < self.width, "fact index out of bounds");
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Returns `true` if the fact at the given index holds.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        assert!(index < self.width, "fact index out of bounds");
        (self.words[index / 64] & (1u64 << (index % 64))) != 0
    }

    /// Returns the number of facts that hold.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no fact holds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Sets every fact that holds in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ.
    pub fn union_with(&mut self, other: &Self) {
        assert_eq!(self.width, other.width, "fact vector widths differ");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= other_word;
        }
    }

    /// Clears every fact that does not hold in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ.
    pub fn intersect_with(&mut self, other: &Self) {
        assert_eq!(self.width, other.width, "fact vector widths differ");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= other_word;
        }
    }

    /// Clears every fact that holds in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the widths differ.
    pub fn difference_with(&mut self, other: &Self) {
        assert_eq!(self.width, other.width, "fact vector widths differ");
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= !other_word;
        }
    }

    /// Returns an iterator over the indices of the facts that hold.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).filter(move |&index| self.contains(index))
    }
}

impl fmt::Debug for FactVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactVector[")?;
        for index in 0..self.width {
            write!(f, "{}", u8::from(self.contains(index)))?;
        }
        write!(f, "]")
    }
}

/// The per-instruction output facts of one analysis run.
///
/// Maps every instruction of a function to the fact vector holding *after* it
/// executes (forward analyses) or *before* it (backward analyses). Owned
/// exclusively by the engine while it iterates; read-only once it appears in
/// an [`AnalysisSnapshot`](crate::analysis::dataflow::AnalysisSnapshot).
#[derive(Debug, Clone)]
pub struct FactMap {
    facts: Vec<FactVector>,
}

impl FactMap {
    pub(crate) fn new(instruction_count: usize, initial: FactVector) -> Self {
        Self {
            facts: vec![initial; instruction_count],
        }
    }

    /// Returns the output fact vector of the given instruction.
    ///
    /// # Panics
    ///
    /// Panics if the instruction does not belong to the analyzed function.
    #[must_use]
    pub fn get(&self, id: InstrId) -> &FactVector {
        &self.facts[id.index()]
    }

    pub(crate) fn set(&mut self, id: InstrId, vector: FactVector) {
        self.facts[id.index()] = vector;
    }

    /// Returns the number of instructions covered by this map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns `true` if the map covers no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
