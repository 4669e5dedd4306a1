//! Sets of sets [`Powerset`], existentials [`Exists`] and the choice descriptor.
//!
//! A powerset is nothing but a [`Set`] whose elements are themselves sets. Membership `x ∈ X` is
//! [`Set::elem`] and non-emptiness over a family of candidates is [`Set::inhabited`]. This module
//! adds what's specific to sets of sets: generalized unions and intersections, uniqueness, and
//! the extraction of the unique member of a powerset.
//!
//! The existential is a plain value [`Exists`] carrying its witness, with explicit introduction
//! and elimination. The choice descriptor [`Powerset::the_set`] can only be called with
//! [`Unique`] evidence, which is either found by a bounded search over a finite family, or
//! vouched for by the caller.

use crate::prelude::*;

/// A set of sets.
pub type Powerset<T> = Set<Set<T>>;

// -------------------- Existentials -------------------- //

/// Existence of an element within a set, together with its witness.
#[derive(Clone, Debug)]
pub struct Exists<T> {
    /// The witness.
    witness: T,
}

impl<T: 'static> Exists<T> {
    /// Introduction: a witness belonging to the set proves that the set is inhabited.
    ///
    /// ## Errors
    ///
    /// [`Violation::NotAMember`] if the witness does not belong to the set.
    pub fn intro(witness: T, set: &Set<T>) -> Result<Self> {
        if set.elem(&witness) {
            Ok(Self { witness })
        } else {
            Err(Violation::NotAMember.into())
        }
    }

    /// Searches a carrier for a witness.
    pub fn search(set: &Set<T>, carrier: &Finite<T>) -> Option<Self>
    where
        T: Clone,
    {
        carrier.find(|x| set.elem(x)).map(|witness| Self {
            witness: witness.clone(),
        })
    }

    /// Elimination: anything that follows from an arbitrary member follows from existence.
    pub fn elim<A, F: FnOnce(T) -> A>(self, f: F) -> A {
        f(self.witness)
    }

    /// A reference to the witness.
    pub const fn witness(&self) -> &T {
        &self.witness
    }
}

// -------------------- Uniqueness -------------------- //

/// Evidence that a powerset has exactly one member, up to extensional equality.
///
/// The evidence remembers which powerset it was issued for.
pub struct Unique<T> {
    /// The powerset this evidence was issued for.
    powerset: Powerset<T>,
    /// Its member.
    witness: Set<T>,
}

impl<T> Clone for Unique<T> {
    fn clone(&self) -> Self {
        Self {
            powerset: self.powerset.clone(),
            witness: self.witness.clone(),
        }
    }
}

impl<T> Debug for Unique<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Unique").finish_non_exhaustive()
    }
}

impl<T: 'static> Unique<T> {
    /// Searches a finite family of candidates for the members of a powerset, and checks that
    /// they're all equal over `universe`.
    ///
    /// ## Errors
    ///
    /// [`Violation::NoMember`] if no candidate belongs to the powerset, and
    /// [`Violation::DistinctMembers`] if two members differ.
    pub fn find(
        powerset: &Powerset<T>,
        family: &Finite<Set<T>>,
        universe: &Finite<T>,
    ) -> Result<Self> {
        let members: SmallVec<&Set<T>> = family.iter().filter(|x| powerset.elem(x)).collect();
        let Some((fst, rest)) = members.split_first() else {
            tracing::debug!(candidates = family.len(), "no member found");
            return Err(Violation::NoMember.into());
        };

        if let Some(idx) = rest.iter().position(|x| !universe.seteq(fst, x)) {
            tracing::debug!(members = members.len(), idx, "distinct members found");
            return Err(Violation::DistinctMembers.into());
        }

        tracing::trace!(members = members.len(), "unique member found");
        Ok(Self {
            powerset: powerset.clone(),
            witness: (*fst).clone(),
        })
    }

    /// Builds evidence from an existential, for powersets whose members can't be enumerated.
    ///
    /// An existential doesn't remember the set it was introduced against, so membership of the
    /// witness in the powerset is checked again here.
    ///
    /// ## Contract
    ///
    /// The caller vouches that every member of the powerset is extensionally equal to the
    /// witness.
    ///
    /// ## Errors
    ///
    /// [`Violation::NotAMember`] if the witness does not belong to the powerset.
    pub fn assume(powerset: &Powerset<T>, exists: Exists<Set<T>>) -> Result<Self> {
        let witness = exists.elim(|x| x);
        if !powerset.elem(&witness) {
            tracing::debug!("assumed witness outside of the powerset");
            return Err(Violation::NotAMember.into());
        }

        Ok(Self {
            powerset: powerset.clone(),
            witness,
        })
    }

    /// The unique member.
    pub const fn witness(&self) -> &Set<T> {
        &self.witness
    }

    /// Forgets uniqueness.
    #[must_use]
    pub fn exists(&self) -> Exists<Set<T>> {
        Exists {
            witness: self.witness.clone(),
        }
    }
}

// -------------------- Powersets -------------------- //

impl<T: 'static> Powerset<T> {
    /// The powerset whose members are the sets equal over `universe` to one of `members`.
    pub fn family<I: IntoIterator<Item = Set<T>>>(members: I, universe: &Finite<T>) -> Self {
        let members: Vec<Set<T>> = members.into_iter().collect();
        let universe = universe.clone();
        Set::new(move |x| members.iter().any(|y| universe.seteq(x, y)))
    }

    /// Any two members of the powerset within `family` are equal over `universe`.
    #[must_use]
    pub fn single(&self, family: &Domain<Set<T>>, universe: &Finite<T>) -> Prop {
        let (powerset, universe) = (self.clone(), universe.clone());
        Prop::all2(family, family, move |x, y| {
            !(powerset.elem(x) && powerset.elem(y)) || universe.seteq(x, y)
        })
    }

    /// The powerset has exactly one member within `family`, up to equality over `universe`.
    #[must_use]
    pub fn unique(&self, family: &Domain<Set<T>>, universe: &Finite<T>) -> Prop {
        self.inhabited(family).and(self.single(family, universe))
    }

    /// The choice descriptor: the unique member of the powerset.
    ///
    /// The result belongs to the powerset, and every other member is extensionally equal to it.
    ///
    /// ## Errors
    ///
    /// [`Violation::ForeignEvidence`] if the evidence was issued for a different powerset.
    pub fn the_set(&self, evidence: &Unique<T>) -> Result<Set<T>> {
        if self.same(&evidence.powerset) {
            Ok(evidence.witness.clone())
        } else {
            Err(Violation::ForeignEvidence.into())
        }
    }

    /// Generalized union ⋃X, searching `family` for the members of the powerset.
    #[must_use]
    pub fn unions(&self, family: &Finite<Set<T>>) -> Set<T> {
        let (powerset, family) = (self.clone(), family.clone());
        Set::new(move |y| family.iter().any(|x| powerset.elem(x) && x.elem(y)))
    }

    /// Generalized intersection ⋂X, searching `family` for the members of the powerset.
    ///
    /// The intersection of an empty powerset is the full set.
    #[must_use]
    pub fn intersections(&self, family: &Finite<Set<T>>) -> Set<T> {
        let (powerset, family) = (self.clone(), family.clone());
        Set::new(move |y| family.iter().all(|x| !powerset.elem(x) || x.elem(y)))
    }
}
