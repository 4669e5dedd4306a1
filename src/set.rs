//! Sets as predicates [`Set`].

use crate::prelude::*;

/// A set, given by its characteristic predicate.
///
/// Membership may be an arbitrary computation, over a possibly infinite type. Because of this,
/// relations between sets such as [`subset`](Self::subset) or [`seteq`](Self::seteq) can't be
/// decided in general, and are instead given as propositions over a [`Domain`].
///
/// Sets are immutable and cheap to clone, as clones share the same predicate. Every construction
/// below shares its operands rather than consuming them.
pub struct Set<T>(Rc<dyn Fn(&T) -> bool>);

impl<T> Clone for Set<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Debug for Set<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Set").finish_non_exhaustive()
    }
}

impl<T: 'static> Default for Set<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static> Set<T> {
    // -------------------- Constructions -------------------- //

    /// Initializes a set from its characteristic predicate.
    pub fn new<P: Fn(&T) -> bool + 'static>(pred: P) -> Self {
        Self(Rc::new(pred))
    }

    /// Empty set Ø.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|_| false)
    }

    /// The full set, containing every value of the type.
    #[must_use]
    pub fn full() -> Self {
        Self::new(|_| true)
    }

    /// Union x ∪ y.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (fst, snd) = (self.clone(), other.clone());
        Self::new(move |x| fst.elem(x) || snd.elem(x))
    }

    /// Intersection x ∩ y.
    #[must_use]
    pub fn inter(&self, other: &Self) -> Self {
        let (fst, snd) = (self.clone(), other.clone());
        Self::new(move |x| fst.elem(x) && snd.elem(x))
    }

    /// Difference x - y.
    #[must_use]
    pub fn diff(&self, other: &Self) -> Self {
        let (fst, snd) = (self.clone(), other.clone());
        Self::new(move |x| fst.elem(x) && !snd.elem(x))
    }

    /// Complement.
    #[must_use]
    pub fn compl(&self) -> Self {
        let set = self.clone();
        Self::new(move |x| !set.elem(x))
    }

    /// Powerset P(x): the sets included in this one, as far as `universe` can tell.
    #[must_use]
    pub fn powerset(&self, universe: &Finite<T>) -> Powerset<T> {
        let (set, universe) = (self.clone(), universe.clone());
        Set::new(move |x| universe.subset(x, &set))
    }

    // -------------------- Relations -------------------- //

    /// Membership relation ∈.
    pub fn elem(&self, x: &T) -> bool {
        (self.0)(x)
    }

    /// Whether both sets share the same predicate.
    ///
    /// This is an intensional check: two sets built separately are never the same, even if
    /// they're extensionally equal.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0).cast::<()>(),
            Rc::as_ptr(&other.0).cast::<()>(),
        )
    }

    /// Subset relation ⊆, quantified over a domain.
    #[must_use]
    pub fn subset(&self, other: &Self, universe: &Domain<T>) -> Prop {
        let (fst, snd) = (self.clone(), other.clone());
        Prop::all(universe, move |x| !fst.elem(x) || snd.elem(x))
    }

    /// Extensional equality, quantified over a domain.
    #[must_use]
    pub fn seteq(&self, other: &Self, universe: &Domain<T>) -> Prop {
        let (fst, snd) = (self.clone(), other.clone());
        Prop::all(universe, move |x| fst.elem(x) == snd.elem(x))
    }

    /// Whether the set has some element within the domain.
    #[must_use]
    pub fn inhabited(&self, universe: &Domain<T>) -> Prop {
        let set = self.clone();
        Prop::any(universe, move |x| set.elem(x))
    }
}

impl<T: PartialEq + 'static> Set<T> {
    /// Singleton set {x}.
    #[must_use]
    pub fn singleton(x: T) -> Self {
        Self::new(move |y| *y == x)
    }

    /// A set in roster notation {x₀, x₁, …}.
    pub fn roster<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elems: Vec<T> = iter.into_iter().collect();
        Self::new(move |x| elems.contains(x))
    }
}
