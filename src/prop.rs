//! Three-valued propositions [`Prop`] over quantifier [`Domains`](Domain).
//!
//! Closure properties such as reflexivity quantify over a whole type, which is in general
//! undecidable. Rather than returning a `bool`, every such property is built as a deferred
//! proposition that is later checked against a [`Budget`], yielding a [`Verdict`].
//!
//! Verdicts follow Kleene's strong three-valued logic. A universal statement over a finite domain
//! can be [proved](Verdict::Proved) or [refuted](Verdict::Refuted); over a sampled domain it can
//! only ever be refuted, and otherwise remains [unknown](Verdict::Unknown). Existential statements
//! behave dually.

use crate::prelude::*;

// -------------------- Verdicts -------------------- //

/// The outcome of checking a [`Prop`].
#[derive(Clone, Copy, Debug, derive_more::Display, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The proposition holds.
    #[display(fmt = "proved")]
    Proved,
    /// The proposition is false.
    #[display(fmt = "refuted")]
    Refuted,
    /// The proposition was neither proved nor refuted.
    #[display(fmt = "unknown")]
    Unknown,
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        if value {
            Self::Proved
        } else {
            Self::Refuted
        }
    }
}

/// Kleene negation. Swaps proofs and refutations, and leaves unknowns alone.
impl Not for Verdict {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Proved => Self::Refuted,
            Self::Refuted => Self::Proved,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl Verdict {
    /// Whether the proposition was proved.
    #[must_use]
    pub const fn is_proved(self) -> bool {
        matches!(self, Self::Proved)
    }

    /// Whether the proposition was refuted.
    #[must_use]
    pub const fn is_refuted(self) -> bool {
        matches!(self, Self::Refuted)
    }

    /// Whether the proposition was left undetermined.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Kleene conjunction.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Refuted, _) | (_, Self::Refuted) => Self::Refuted,
            (Self::Proved, Self::Proved) => Self::Proved,
            _ => Self::Unknown,
        }
    }

    /// Kleene disjunction.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Proved, _) | (_, Self::Proved) => Self::Proved,
            (Self::Refuted, Self::Refuted) => Self::Refuted,
            _ => Self::Unknown,
        }
    }

    /// Turns anything other than a proof into an error.
    ///
    /// ## Errors
    ///
    /// [`Error::Refuted`] or [`Error::Unprovable`].
    pub const fn into_result(self) -> Result<()> {
        match self {
            Self::Proved => Ok(()),
            Self::Refuted => Err(Error::Refuted),
            Self::Unknown => Err(Error::Unprovable),
        }
    }
}

// -------------------- Budget -------------------- //

/// Limits imposed on a single check of a [`Prop`].
///
/// Predicates are black boxes of unknown cost, and nested quantifiers multiply. Running out of
/// budget makes the check return [`Verdict::Unknown`] rather than hang.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Budget {
    /// Maximum number of quantifier instances evaluated.
    pub max_steps: usize,
    /// Maximum number of elements drawn from any sampled domain.
    pub max_samples: usize,
}

impl Default for Budget {
    fn default() -> Self {
        Self::new()
    }
}

impl Budget {
    /// Default value for [`Self::max_steps`].
    pub const DEFAULT_STEPS: usize = 1 << 22;

    /// Default value for [`Self::max_samples`].
    pub const DEFAULT_SAMPLES: usize = 1 << 10;

    /// The default budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_steps: Self::DEFAULT_STEPS,
            max_samples: Self::DEFAULT_SAMPLES,
        }
    }

    /// Sets the maximum number of steps.
    #[must_use]
    pub const fn with_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the maximum number of samples.
    #[must_use]
    pub const fn with_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }
}

// -------------------- Checker -------------------- //

/// State for a single check of a [`Prop`].
pub(crate) struct Checker {
    /// The limits for this check.
    budget: Budget,
    /// Quantifier instances evaluated so far.
    steps: usize,
    /// Whether running out of steps was already reported.
    exhausted: bool,
}

impl Checker {
    /// Initializes a checker with the given budget.
    const fn new(budget: Budget) -> Self {
        Self {
            budget,
            steps: 0,
            exhausted: false,
        }
    }

    /// Spends a step. Returns `false` once the budget has run out.
    fn tick(&mut self) -> bool {
        if self.steps >= self.budget.max_steps {
            if !self.exhausted {
                self.exhausted = true;
                tracing::debug!(steps = self.steps, "checking budget exhausted");
            }
            return false;
        }

        self.steps += 1;
        true
    }

    /// Universal quantification of `body` over `domain`.
    pub(crate) fn forall<T, F: FnMut(&mut Self, &T) -> Verdict>(
        &mut self,
        domain: &Domain<T>,
        mut body: F,
    ) -> Verdict {
        let mut verdict = Verdict::Proved;
        let mut index = 0;
        let complete = domain.visit(self.budget.max_samples, |x| {
            if !self.tick() {
                verdict = Verdict::Unknown;
                return ControlFlow::Break(());
            }

            let res = body(self, x);
            index += 1;
            match res {
                Verdict::Proved => ControlFlow::Continue(()),
                Verdict::Refuted => {
                    tracing::trace!(index, "counterexample found");
                    verdict = Verdict::Refuted;
                    ControlFlow::Break(())
                }
                Verdict::Unknown => {
                    verdict = Verdict::Unknown;
                    ControlFlow::Continue(())
                }
            }
        });

        // Not having found a counterexample is no proof for a domain we didn't exhaust.
        if verdict.is_proved() && !complete {
            Verdict::Unknown
        } else {
            verdict
        }
    }

    /// Existential quantification of `body` over `domain`.
    pub(crate) fn exists<T, F: FnMut(&mut Self, &T) -> Verdict>(
        &mut self,
        domain: &Domain<T>,
        mut body: F,
    ) -> Verdict {
        let mut verdict = Verdict::Refuted;
        let mut index = 0;
        let complete = domain.visit(self.budget.max_samples, |x| {
            if !self.tick() {
                verdict = Verdict::Unknown;
                return ControlFlow::Break(());
            }

            let res = body(self, x);
            index += 1;
            match res {
                Verdict::Proved => {
                    tracing::trace!(index, "witness found");
                    verdict = Verdict::Proved;
                    ControlFlow::Break(())
                }
                Verdict::Refuted => ControlFlow::Continue(()),
                Verdict::Unknown => {
                    verdict = Verdict::Unknown;
                    ControlFlow::Continue(())
                }
            }
        });

        if verdict.is_refuted() && !complete {
            Verdict::Unknown
        } else {
            verdict
        }
    }
}

// -------------------- Propositions -------------------- //

/// A proposition, checked lazily against a [`Budget`].
///
/// Propositions are cheap to clone, and close over the sets, relations and domains they talk
/// about without taking ownership of them.
#[derive(Clone)]
pub struct Prop(Rc<dyn Fn(&mut Checker) -> Verdict>);

impl Debug for Prop {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Prop").finish_non_exhaustive()
    }
}

impl Not for Prop {
    type Output = Self;

    fn not(self) -> Self {
        Self::new(move |c| !self.eval(c))
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Self::lift(value)
    }
}

impl Prop {
    /// Wraps a checking procedure.
    pub(crate) fn new<F: Fn(&mut Checker) -> Verdict + 'static>(check: F) -> Self {
        Self(Rc::new(check))
    }

    /// Evaluates the proposition within an ongoing check.
    pub(crate) fn eval(&self, checker: &mut Checker) -> Verdict {
        (self.0)(checker)
    }

    // -------------------- Atoms -------------------- //

    /// A proposition with a known truth value.
    #[must_use]
    pub fn lift(value: bool) -> Self {
        let verdict = Verdict::from(value);
        Self::new(move |_| verdict)
    }

    /// A proposition that is never established either way.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(|_| Verdict::Unknown)
    }

    // -------------------- Connectives -------------------- //

    /// Conjunction p ∧ q. Short-circuits on refutation.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::new(move |c| match self.eval(c) {
            Verdict::Refuted => Verdict::Refuted,
            verdict => verdict.and(other.eval(c)),
        })
    }

    /// Disjunction p ∨ q. Short-circuits on proof.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::new(move |c| match self.eval(c) {
            Verdict::Proved => Verdict::Proved,
            verdict => verdict.or(other.eval(c)),
        })
    }

    /// Implication p ⇒ q.
    #[must_use]
    pub fn implies(self, other: Self) -> Self {
        (!self).or(other)
    }

    /// Equivalence p ⇔ q.
    #[must_use]
    pub fn iff(self, other: Self) -> Self {
        Self::new(move |c| match (self.eval(c), other.eval(c)) {
            (Verdict::Unknown, _) | (_, Verdict::Unknown) => Verdict::Unknown,
            (p, q) => Verdict::from(p == q),
        })
    }

    /// Conjunction over an iterator. The empty conjunction is proved.
    pub fn conj<I: IntoIterator<Item = Self>>(props: I) -> Self {
        props
            .into_iter()
            .reduce(Self::and)
            .unwrap_or_else(|| Self::lift(true))
    }

    // -------------------- Quantifiers -------------------- //

    /// Universal quantification ∀x ∈ D. φ(x).
    pub fn forall<T: 'static, F: Fn(&T) -> Self + 'static>(domain: &Domain<T>, body: F) -> Self {
        let domain = domain.clone();
        Self::new(move |c| c.forall(&domain, |c, x| body(x).eval(c)))
    }

    /// Existential quantification ∃x ∈ D. φ(x).
    pub fn exists<T: 'static, F: Fn(&T) -> Self + 'static>(domain: &Domain<T>, body: F) -> Self {
        let domain = domain.clone();
        Self::new(move |c| c.exists(&domain, |c, x| body(x).eval(c)))
    }

    /// Universal quantification of a decidable predicate.
    pub fn all<T: 'static, P: Fn(&T) -> bool + 'static>(domain: &Domain<T>, pred: P) -> Self {
        let domain = domain.clone();
        Self::new(move |c| c.forall(&domain, |_, x| Verdict::from(pred(x))))
    }

    /// Existential quantification of a decidable predicate.
    pub fn any<T: 'static, P: Fn(&T) -> bool + 'static>(domain: &Domain<T>, pred: P) -> Self {
        let domain = domain.clone();
        Self::new(move |c| c.exists(&domain, |_, x| Verdict::from(pred(x))))
    }

    /// Universal quantification of a decidable binary predicate.
    pub fn all2<A: 'static, B: 'static, P: Fn(&A, &B) -> bool + 'static>(
        fst: &Domain<A>,
        snd: &Domain<B>,
        pred: P,
    ) -> Self {
        let (fst, snd) = (fst.clone(), snd.clone());
        Self::new(move |c| {
            c.forall(&fst, |c, x| {
                c.forall(&snd, |_, y| Verdict::from(pred(x, y)))
            })
        })
    }

    /// Universal quantification of a decidable ternary predicate.
    pub fn all3<A: 'static, B: 'static, C: 'static, P: Fn(&A, &B, &C) -> bool + 'static>(
        fst: &Domain<A>,
        snd: &Domain<B>,
        thd: &Domain<C>,
        pred: P,
    ) -> Self {
        let (fst, snd, thd) = (fst.clone(), snd.clone(), thd.clone());
        Self::new(move |c| {
            c.forall(&fst, |c, x| {
                c.forall(&snd, |c, y| {
                    c.forall(&thd, |_, z| Verdict::from(pred(x, y, z)))
                })
            })
        })
    }

    // -------------------- Checking -------------------- //

    /// Checks the proposition with the default [`Budget`].
    #[must_use]
    pub fn check(&self) -> Verdict {
        self.check_with(Budget::default())
    }

    /// Checks the proposition with a custom [`Budget`].
    #[must_use]
    pub fn check_with(&self, budget: Budget) -> Verdict {
        let mut checker = Checker::new(budget);
        let verdict = self.eval(&mut checker);
        tracing::trace!(%verdict, steps = checker.steps, "proposition checked");
        verdict
    }

    /// Whether the proposition is proved with the default [`Budget`].
    #[must_use]
    pub fn holds(&self) -> bool {
        self.check().is_proved()
    }

    /// Establishes the proposition with the default [`Budget`].
    ///
    /// ## Errors
    ///
    /// [`Error::Refuted`] if the proposition is false, [`Error::Unprovable`] if it could not be
    /// decided. These are never conflated.
    pub fn establish(&self) -> Result<()> {
        self.check().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERDICTS: [Verdict; 3] = [Verdict::Proved, Verdict::Refuted, Verdict::Unknown];

    /// A proposition with the given verdict.
    fn prop(verdict: Verdict) -> Prop {
        match verdict {
            Verdict::Proved => Prop::lift(true),
            Verdict::Refuted => Prop::lift(false),
            Verdict::Unknown => Prop::unknown(),
        }
    }

    /// Test the Kleene truth tables.
    #[test]
    fn kleene() {
        for p in VERDICTS {
            assert_eq!(!!p, p);
            for q in VERDICTS {
                assert_eq!(prop(p).and(prop(q)).check(), p.and(q));
                assert_eq!(prop(p).or(prop(q)).check(), p.or(q));
                assert_eq!(!(p.and(q)), (!p).or(!q), "De Morgan fail at {p}, {q}");
            }
        }

        assert_eq!(Prop::unknown().and(Prop::lift(false)).check(), Verdict::Refuted);
        assert_eq!(Prop::unknown().or(Prop::lift(true)).check(), Verdict::Proved);
        assert_eq!(Prop::lift(false).implies(Prop::unknown()).check(), Verdict::Proved);
        assert_eq!(Prop::unknown().iff(Prop::lift(true)).check(), Verdict::Unknown);
        assert_eq!(Prop::conj([]).check(), Verdict::Proved);
    }

    /// Test quantification over finite domains.
    #[test]
    fn finite() {
        let dom = Finite::new(0..10).domain();
        assert_eq!(Prop::all(&dom, |x| *x < 10).check(), Verdict::Proved);
        assert_eq!(Prop::all(&dom, |x| *x < 9).check(), Verdict::Refuted);
        assert_eq!(Prop::any(&dom, |x| *x == 3).check(), Verdict::Proved);
        assert_eq!(Prop::any(&dom, |x| *x == 10).check(), Verdict::Refuted);
        assert_eq!(
            Prop::all2(&dom, &dom, |x, y| x + y == y + x).check(),
            Verdict::Proved
        );

        let empty = Finite::<i32>::new([]).domain();
        assert_eq!(Prop::all(&empty, |_| false).check(), Verdict::Proved);
        assert_eq!(Prop::any(&empty, |_| true).check(), Verdict::Refuted);
    }

    /// Universal statements over unbounded domains are never proved.
    #[test]
    fn sampled() {
        let dom = Domain::sampled(|| 0u64.., 100);
        assert_eq!(Prop::all(&dom, |x| x * 2 >= *x).check(), Verdict::Unknown);
        assert_eq!(Prop::all(&dom, |x| *x < 50).check(), Verdict::Refuted);
        assert_eq!(Prop::any(&dom, |x| *x == 42).check(), Verdict::Proved);
        assert_eq!(Prop::any(&dom, |x| *x == 1000).check(), Verdict::Unknown);
        assert_eq!(
            Prop::all(&dom, |x| x * 2 >= *x).establish(),
            Err(Error::Unprovable)
        );
        assert_eq!(Prop::all(&dom, |x| *x < 50).establish(), Err(Error::Refuted));

        // A source that runs dry is exhausted, even right at the limit.
        let dom = Domain::sampled(|| 0u64..5, 100);
        assert_eq!(Prop::all(&dom, |x| *x < 5).check(), Verdict::Proved);
        let dom = Domain::sampled(|| 0u8..3, 3);
        assert_eq!(Prop::all(&dom, |x| *x < 3).check(), Verdict::Proved);
        assert_eq!(Prop::any(&dom, |x| *x == 3).check(), Verdict::Refuted);
    }

    /// Running out of budget is not a refutation.
    #[test]
    fn budget() {
        let dom = Finite::new(0..100).domain();
        let prop = Prop::all2(&dom, &dom, |_, _| true);
        assert_eq!(prop.check(), Verdict::Proved);
        assert_eq!(
            prop.check_with(Budget::new().with_steps(50)),
            Verdict::Unknown
        );

        let sampled = Domain::sampled(|| 0u64.., usize::MAX);
        assert_eq!(
            Prop::all(&sampled, |_| true).check_with(Budget::new().with_samples(10)),
            Verdict::Unknown
        );
    }
}
