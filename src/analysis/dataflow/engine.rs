//! The fixed-point engine.
//!
//! The engine owns the whole lifecycle of one analysis run:
//!
//! 1. **Domain construction** — every instruction is visited once in program
//!    order and offered to the analysis's [`populate`](Analysis::populate)
//!    hook (after seeding from [`seed_domain`](Analysis::seed_domain) for
//!    pipeline stages that inherit an upstream domain).
//! 2. **Initialization** — every instruction's output fact is set to the
//!    meet identity of width `|domain|`.
//! 3. **Sweeping** — full passes over all blocks in traversal order. Each
//!    block's boundary value is the meet over its neighbor contributions (or
//!    the identity when it has none); facts are then threaded through the
//!    block's instructions, updating the map immediately so the next
//!    instruction in the same block observes the fresh output.
//! 4. **Convergence** — the loop stops only when an *entire* sweep changes
//!    nothing. Convergence is a whole-sweep predicate; exiting early on a
//!    locally quiet prefix could stop one step shy of the fixed point.
//!
//! Termination follows from the usual argument: fact vectors form a finite
//! lattice and transfer plus meet are monotone. Monotonicity is a contract on
//! analysis authors, not something the engine enforces — but a sweep cap can
//! be set with [`Engine::with_sweep_limit`] so that test doubles violating it
//! fail loudly instead of spinning.

use std::fmt::Write as _;

use crate::{
    analysis::dataflow::{
        direction::TraversalPolicy, Direction, Domain, DomainElement, FactMap, FactVector, MeetOp,
    },
    ir::{BlockId, Function, InstrId, Instruction},
    Error, Result,
};

/// A dataflow analysis the engine can run.
///
/// Implementations supply the domain-population rule and the transfer
/// function; direction and meet operator are fixed per analysis as associated
/// constants. The engine stays a concrete type parameterized over this trait.
///
/// # Example
///
/// ```rust,ignore
/// use bitflow::analysis::dataflow::{Analysis, Direction, Domain, FactVector, MeetOp};
/// use bitflow::ir::Instruction;
///
/// struct MyAnalysis;
///
/// impl Analysis for MyAnalysis {
///     type Element = MyElement;
///     const DIRECTION: Direction = Direction::Forward;
///     const MEET: MeetOp = MeetOp::Intersect;
///
///     fn populate(&self, instr: &Instruction, domain: &mut Domain<MyElement>) {
///         // Append a distinct element for qualifying instructions.
///     }
///
///     fn transfer(
///         &self,
///         instr: &Instruction,
///         domain: &Domain<MyElement>,
///         incoming: &FactVector,
///     ) -> bitflow::Result<FactVector> {
///         // Derive the outgoing facts from the incoming ones.
///         Ok(incoming.clone())
///     }
/// }
/// ```
pub trait Analysis {
    /// The domain element this analysis tracks.
    type Element: DomainElement;

    /// The direction of this analysis.
    const DIRECTION: Direction;

    /// The meet operator of this analysis.
    const MEET: MeetOp;

    /// Returns the domain to start population from.
    ///
    /// Most analyses start empty; pipeline stages that reuse an upstream
    /// domain return a copy of it here.
    fn seed_domain(&self) -> Domain<Self::Element> {
        Domain::new()
    }

    /// Offers one instruction to domain population.
    ///
    /// Called exactly once per instruction, in program order, before any
    /// facts exist. May append a new distinct element to the domain.
    fn populate(&self, instr: &Instruction, domain: &mut Domain<Self::Element>);

    /// Computes the outgoing facts of one instruction from the incoming ones.
    ///
    /// `incoming` is the boundary value at the block-entry position (relative
    /// to the direction) or the previous instruction's freshly computed
    /// output. The engine compares the returned vector against the stored one
    /// to detect change.
    ///
    /// # Errors
    ///
    /// Returns an error on contract violations, e.g. an externally supplied
    /// fact vector whose width does not match the domain.
    fn transfer(
        &self,
        instr: &Instruction,
        domain: &Domain<Self::Element>,
        incoming: &FactVector,
    ) -> Result<FactVector>;
}

/// The fixed-point engine for one analysis run over one function.
pub struct Engine<'f, A: Analysis> {
    function: &'f Function,
    analysis: A,
    policy: &'static dyn TraversalPolicy,
    sweep_limit: Option<usize>,
}

impl<'f, A: Analysis> Engine<'f, A> {
    /// Creates an engine for the given function and analysis.
    #[must_use]
    pub fn new(function: &'f Function, analysis: A) -> Self {
        Self {
            function,
            analysis,
            policy: A::DIRECTION.policy(),
            sweep_limit: None,
        }
    }

    /// Caps the number of sweeps, turning non-convergence into
    /// [`Error::SweepLimitExceeded`].
    ///
    /// Intended for test harnesses exercising deliberately broken transfer
    /// functions; production analyses converge by monotonicity and need no
    /// cap.
    #[must_use]
    pub fn with_sweep_limit(mut self, limit: usize) -> Self {
        self.sweep_limit = Some(limit);
        self
    }

    /// Runs the analysis to its fixed point.
    ///
    /// # Errors
    ///
    /// Returns an error on fact-width contract violations or, with a sweep
    /// cap configured, on non-convergence.
    pub fn run(self) -> Result<AnalysisSnapshot<A::Element>> {
        let mut domain = self.analysis.seed_domain();
        for instr in self.function.instructions() {
            self.analysis.populate(instr, &mut domain);
        }

        let width = domain.len();
        let mut facts = FactMap::new(
            self.function.instruction_count(),
            A::MEET.identity(width),
        );

        let mut sweeps = 0;
        loop {
            sweeps += 1;
            if let Some(limit) = self.sweep_limit {
                if sweeps > limit {
                    return Err(Error::SweepLimitExceeded { limit });
                }
            }
            if !self.sweep(&domain, &mut facts)? {
                break;
            }
        }

        let mut boundaries = Vec::with_capacity(self.function.block_count());
        for block in self.function.blocks() {
            boundaries.push(self.boundary_value(&facts, block.id(), width)?);
        }

        Ok(AnalysisSnapshot {
            direction: A::DIRECTION,
            domain,
            facts,
            boundaries,
            sweeps,
        })
    }

    /// Performs one full sweep, returning `true` if any fact changed.
    fn sweep(&self, domain: &Domain<A::Element>, facts: &mut FactMap) -> Result<bool> {
        let width = domain.len();
        let mut changed = false;

        for block in self.policy.block_order(self.function) {
            let mut incoming = self.boundary_value(facts, block, width)?;
            for id in self.policy.instruction_order(self.function, block) {
                if incoming.width() != width {
                    return Err(Error::FactWidthMismatch {
                        expected: width,
                        found: incoming.width(),
                    });
                }

                let outgoing =
                    self.analysis
                        .transfer(self.function.instruction(id), domain, &incoming)?;
                if outgoing.width() != width {
                    return Err(Error::FactWidthMismatch {
                        expected: width,
                        found: outgoing.width(),
                    });
                }

                if outgoing != *facts.get(id) {
                    changed = true;
                }
                facts.set(id, outgoing.clone());
                incoming = outgoing;
            }
        }

        Ok(changed)
    }

    /// Computes a block's boundary value from the current facts: the meet
    /// over its neighbor contributions, or the identity if it has none.
    fn boundary_value(&self, facts: &FactMap, block: BlockId, width: usize) -> Result<FactVector> {
        let sources = self.policy.boundary_sources(self.function, block);
        A::MEET.combine_all(sources.iter().map(|id| facts.get(*id)), width)
    }
}

/// The finished, read-only result of one analysis run.
///
/// Holds everything a consumer (a pipeline stage, a report, a test) needs:
/// the domain, the per-instruction fact map, and the derived per-block
/// boundary values. Later pipeline stages copy what they need out of a
/// snapshot; nothing aliases the engine that produced it.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot<E> {
    direction: Direction,
    domain: Domain<E>,
    facts: FactMap,
    boundaries: Vec<FactVector>,
    sweeps: usize,
}

impl<E: DomainElement> AnalysisSnapshot<E> {
    /// Returns the finished domain.
    #[must_use]
    pub fn domain(&self) -> &Domain<E> {
        &self.domain
    }

    /// Returns the per-instruction fact map.
    #[must_use]
    pub fn facts(&self) -> &FactMap {
        &self.facts
    }

    /// Returns the output fact vector of the given instruction.
    ///
    /// For forward analyses this holds *after* the instruction, for backward
    /// analyses *before* it.
    ///
    /// # Panics
    ///
    /// Panics if the instruction does not belong to the analyzed function.
    #[must_use]
    pub fn fact(&self, id: InstrId) -> &FactVector {
        self.facts.get(id)
    }

    /// Returns the boundary value of the given block: its entry facts for
    /// forward analyses, its exit facts for backward analyses.
    ///
    /// # Panics
    ///
    /// Panics if the block does not belong to the analyzed function.
    #[must_use]
    pub fn boundary(&self, block: BlockId) -> &FactVector {
        &self.boundaries[block.index()]
    }

    /// Returns the direction the analysis ran in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the number of sweeps performed, including the final quiescent
    /// one.
    #[must_use]
    pub const fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Renders a fact vector against the domain, mask-style: only elements
    /// whose bit is set are printed.
    #[must_use]
    pub fn render(&self, vector: &FactVector) -> String {
        let elements: Vec<String> = vector
            .ones()
            .filter_map(|index| self.domain.get(index))
            .map(ToString::to_string)
            .collect();
        format!("{{{}}}", elements.join(", "))
    }

    /// Renders the whole run: each block's boundary value followed by every
    /// instruction with its output facts.
    ///
    /// Diagnostic output for humans and tests; not load-bearing.
    #[must_use]
    pub fn dump(&self, function: &Function) -> String {
        let mut out = String::new();
        for block in function.blocks() {
            let _ = writeln!(
                out,
                "{}:  boundary {}",
                block.id(),
                self.render(self.boundary(block.id()))
            );
            for &id in block.instructions() {
                let _ = writeln!(
                    out,
                    "  {}  {}",
                    function.instruction(id),
                    self.render(self.fact(id))
                );
            }
        }
        out
    }
}
