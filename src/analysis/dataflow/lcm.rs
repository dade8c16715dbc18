//! The lazy code motion analysis pipeline.
//!
//! Three stages in a strict dependency chain, each fully converged before the
//! next starts:
//!
//! 1. **Anticipated expressions** — backward, from scratch.
//! 2. **Will-be-available expressions** — forward, over the anticipated
//!    domain, consuming the anticipated per-instruction facts.
//! 3. **Earliest placement** — no further iteration: an expression is
//!    placeable at a block's entry when it is anticipated there but will not
//!    already be available there, i.e.
//!    `anticipated-at-entry(B) ∧ ¬ will-be-available-at-entry(B)`.
//!
//! Anticipated-at-entry is the anticipated fact at the block's first
//! instruction (backward facts hold before the instruction);
//! will-be-available-at-entry is that analysis's boundary value for the
//! block. The code motion rewrite itself — inserting computations and
//! replacing the originals — is outside this crate's scope; the pipeline
//! delivers the placement data it would consume.

use crate::{
    analysis::dataflow::{
        AnalysisSnapshot, AnticipatedExpressions, Engine, Expression, FactVector, WillBeAvailable,
    },
    ir::{BlockId, Function},
    Error, Result,
};

/// The converged results of the lazy code motion pipeline.
pub struct LazyCodeMotion {
    anticipated: AnalysisSnapshot<Expression>,
    will_be_available: AnalysisSnapshot<Expression>,
    earliest: Vec<FactVector>,
}

impl LazyCodeMotion {
    /// Runs the pipeline over a function.
    ///
    /// # Errors
    ///
    /// Propagates any contract violation from the underlying analyses.
    pub fn analyze(function: &Function) -> Result<Self> {
        let anticipated = Engine::new(function, AnticipatedExpressions).run()?;
        let will_be_available =
            Engine::new(function, WillBeAvailable::new(&anticipated)).run()?;
        let earliest = Self::compute_earliest(function, &anticipated, &will_be_available)?;
        Ok(Self {
            anticipated,
            will_be_available,
            earliest,
        })
    }

    fn compute_earliest(
        function: &Function,
        anticipated: &AnalysisSnapshot<Expression>,
        will_be_available: &AnalysisSnapshot<Expression>,
    ) -> Result<Vec<FactVector>> {
        let mut placements = Vec::with_capacity(function.block_count());
        for block in function.blocks() {
            let entry = block
                .first_instruction()
                .expect("blocks are non-empty by construction");
            let anticipated_in = anticipated.fact(entry);
            let available_in = will_be_available.boundary(block.id());
            if anticipated_in.width() != available_in.width() {
                return Err(Error::FactWidthMismatch {
                    expected: anticipated_in.width(),
                    found: available_in.width(),
                });
            }
            let mut earliest = anticipated_in.clone();
            earliest.difference_with(available_in);
            placements.push(earliest);
        }
        Ok(placements)
    }

    /// Returns the anticipated expression snapshot.
    #[must_use]
    pub fn anticipated(&self) -> &AnalysisSnapshot<Expression> {
        &self.anticipated
    }

    /// Returns the will-be-available expression snapshot.
    #[must_use]
    pub fn will_be_available(&self) -> &AnalysisSnapshot<Expression> {
        &self.will_be_available
    }

    /// Returns the expressions earliest-placeable at the entry of a block.
    ///
    /// # Panics
    ///
    /// Panics if the block does not belong to the analyzed function.
    #[must_use]
    pub fn earliest(&self, block: BlockId) -> &FactVector {
        &self.earliest[block.index()]
    }

    /// Renders the per-block placement sets, mask-style.
    #[must_use]
    pub fn dump(&self, function: &Function) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        for block in function.blocks() {
            let _ = writeln!(
                out,
                "{}:  earliest {}",
                block.id(),
                self.anticipated.render(self.earliest(block.id()))
            );
        }
        out
    }
}
