//! Errors raised by the algebra.
//!
//! Every failure here is contractual. Evaluating a predicate never fails; what can fail is a
//! precondition on evidence, an attempt to establish a proposition, or an audit of the
//! extensionality postulate.

/// The precondition that was violated.
#[derive(Clone, Copy, Debug, derive_more::Display, PartialEq, Eq, Hash)]
pub enum Violation {
    /// No member of the powerset was found among the candidates.
    #[display(fmt = "the powerset has no member among the candidates")]
    NoMember,
    /// Two members of the powerset are not extensionally equal.
    #[display(fmt = "the powerset has two distinct members")]
    DistinctMembers,
    /// A supplied witness does not satisfy the predicate.
    #[display(fmt = "the witness does not satisfy the predicate")]
    NotAMember,
    /// Uniqueness evidence was issued for a different powerset.
    #[display(fmt = "the evidence was issued for another powerset")]
    ForeignEvidence,
    /// Two pieces of equality evidence don't share their middle term or their carriers.
    #[display(fmt = "the equalities do not chain")]
    Unchained,
}

/// An error within the algebra.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq, Hash)]
pub enum Error {
    /// A contract on evidence was broken. Fatal to the caller.
    #[error("precondition violated: {0}")]
    PreconditionViolation(Violation),

    /// The proposition could be neither proved nor refuted, either because its domain is
    /// unbounded or because the checking budget ran out.
    #[error("proposition not established")]
    Unprovable,

    /// The proposition is false.
    #[error("proposition refuted")]
    Refuted,

    /// An observer told apart two relations whose Leibniz equality was only postulated.
    #[error("extensionality gap: an observer distinguishes subset-equal relations")]
    ExtensionalityGap,
}

impl From<Violation> for Error {
    fn from(value: Violation) -> Self {
        Self::PreconditionViolation(value)
    }
}

/// Result type of the crate.
pub type Result<T> = std::result::Result<T, Error>;
