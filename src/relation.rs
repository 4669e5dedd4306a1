//! Binary relations as predicates [`Relation`].

use crate::prelude::*;

/// A binary relation between `T` and `U`, given by its characteristic predicate.
///
/// Like [`Set`], relations are immutable and cheap to clone, and every construction shares its
/// operands. Whenever a construction has to search for an intermediate value, as in
/// [`compose`](Self::compose) or [`dom`](Self::dom), it does so over an explicit [`Finite`]
/// carrier. Closure properties and inclusions quantify over a [`Domain`] and are returned as
/// propositions.
pub struct Relation<T, U = T>(Rc<dyn Fn(&T, &U) -> bool>);

impl<T, U> Clone for Relation<T, U> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T, U> Debug for Relation<T, U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Relation").finish_non_exhaustive()
    }
}

impl<T: 'static, U: 'static> Default for Relation<T, U> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static, U: 'static> Relation<T, U> {
    // -------------------- Constructions -------------------- //

    /// Initializes a relation from its characteristic predicate.
    pub fn new<R: Fn(&T, &U) -> bool + 'static>(rel: R) -> Self {
        Self(Rc::new(rel))
    }

    /// The empty relation, relating nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|_, _| false)
    }

    /// The full relation, relating everything.
    #[must_use]
    pub fn full() -> Self {
        Self::new(|_, _| true)
    }

    /// Cartesian product x × y.
    #[must_use]
    pub fn prod(fst: &Set<T>, snd: &Set<U>) -> Self {
        let (fst, snd) = (fst.clone(), snd.clone());
        Self::new(move |x, y| fst.elem(x) && snd.elem(y))
    }

    /// The converse relation, swapping both arguments.
    #[must_use]
    pub fn converse(&self) -> Relation<U, T> {
        let rel = self.clone();
        Relation::new(move |y, x| rel.holds(x, y))
    }

    /// Union of relations.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (fst, snd) = (self.clone(), other.clone());
        Self::new(move |x, y| fst.holds(x, y) || snd.holds(x, y))
    }

    /// Intersection of relations.
    #[must_use]
    pub fn inter(&self, other: &Self) -> Self {
        let (fst, snd) = (self.clone(), other.clone());
        Self::new(move |x, y| fst.holds(x, y) && snd.holds(x, y))
    }

    /// Relational composition: `x` is related to `z` iff there's some `y` in `via` with
    /// `self(x, y)` and `other(y, z)`.
    #[must_use]
    pub fn compose<V: 'static>(&self, other: &Relation<U, V>, via: &Finite<U>) -> Relation<T, V> {
        let (fst, snd, via) = (self.clone(), other.clone(), via.clone());
        Relation::new(move |x, z| via.iter().any(|y| fst.holds(x, y) && snd.holds(y, z)))
    }

    // -------------------- Evaluation -------------------- //

    /// Whether `x` is related to `y`.
    pub fn holds(&self, x: &T, y: &U) -> bool {
        (self.0)(x, y)
    }

    /// Whether both relations share the same predicate. See [`Set::same`].
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0).cast::<()>(),
            Rc::as_ptr(&other.0).cast::<()>(),
        )
    }

    /// The intermediate value witnessing that `x` is related to `z` in the composition with
    /// `other` through `via`, if any.
    pub fn witness<'a, V: 'static>(
        &self,
        other: &Relation<U, V>,
        via: &'a Finite<U>,
        x: &T,
        z: &V,
    ) -> Option<&'a U> {
        via.find(|y| self.holds(x, y) && other.holds(y, z))
    }

    /// Domain: the values related to something in `cod`.
    #[must_use]
    pub fn dom(&self, cod: &Finite<U>) -> Set<T> {
        let (rel, cod) = (self.clone(), cod.clone());
        Set::new(move |x| cod.iter().any(|y| rel.holds(x, y)))
    }

    /// Range: the values something in `dom` is related to.
    #[must_use]
    pub fn ran(&self, dom: &Finite<T>) -> Set<U> {
        let (rel, dom) = (self.clone(), dom.clone());
        Set::new(move |y| dom.iter().any(|x| rel.holds(x, y)))
    }

    /// Tabulates the relation over two carriers.
    #[must_use]
    pub fn tabulate(&self, dom: &Finite<T>, cod: &Finite<U>) -> Table {
        Table::new(self, dom, cod)
    }

    // -------------------- Inclusion -------------------- //

    /// Subrelation: every pair related by `self` is related by `other`.
    ///
    /// This is a preorder with [`Self::empty`] as its least element and [`Self::full`] as its
    /// greatest.
    #[must_use]
    pub fn subrel(&self, other: &Self, dom: &Domain<T>, cod: &Domain<U>) -> Prop {
        let (fst, snd) = (self.clone(), other.clone());
        Prop::all2(dom, cod, move |x, y| !fst.holds(x, y) || snd.holds(x, y))
    }

    /// Extensional equality: inclusion both ways.
    ///
    /// This is the equality the algebra works with. Upgrading it to Leibniz equality requires the
    /// [`Extensionality`] postulate.
    #[must_use]
    pub fn releq(&self, other: &Self, dom: &Domain<T>, cod: &Domain<U>) -> Prop {
        self.subrel(other, dom, cod).and(other.subrel(self, dom, cod))
    }

    /// Proper subrelation: inclusion without equality.
    ///
    /// This is a strict order: irreflexive, antisymmetric and transitive.
    #[must_use]
    pub fn psubrel(&self, other: &Self, dom: &Domain<T>, cod: &Domain<U>) -> Prop {
        self.subrel(other, dom, cod).and(!self.releq(other, dom, cod))
    }
}

impl<T: PartialEq + 'static, U: PartialEq + 'static> Relation<T, U> {
    /// A relation in roster notation, listing its pairs.
    pub fn roster<I: IntoIterator<Item = (T, U)>>(pairs: I) -> Self {
        let pairs: Vec<(T, U)> = pairs.into_iter().collect();
        Self::new(move |x, y| pairs.iter().any(|(a, b)| a == x && b == y))
    }
}

impl<T: PartialEq + 'static> Relation<T, T> {
    /// The identity relation.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(|x, y| x == y)
    }

    /// Antisymmetry: x R y and y R x imply x = y.
    #[must_use]
    pub fn antisymmetric(&self, dom: &Domain<T>) -> Prop {
        let rel = self.clone();
        Prop::all2(dom, dom, move |x, y| {
            !(rel.holds(x, y) && rel.holds(y, x)) || x == y
        })
    }
}

impl<T: 'static> Relation<T, T> {
    // -------------------- Closure properties -------------------- //

    /// Reflexivity: x R x.
    #[must_use]
    pub fn reflexive(&self, dom: &Domain<T>) -> Prop {
        let rel = self.clone();
        Prop::all(dom, move |x| rel.holds(x, x))
    }

    /// Irreflexivity: never x R x.
    #[must_use]
    pub fn irreflexive(&self, dom: &Domain<T>) -> Prop {
        let rel = self.clone();
        Prop::all(dom, move |x| !rel.holds(x, x))
    }

    /// Symmetry: x R y implies y R x.
    #[must_use]
    pub fn symmetric(&self, dom: &Domain<T>) -> Prop {
        let rel = self.clone();
        Prop::all2(dom, dom, move |x, y| !rel.holds(x, y) || rel.holds(y, x))
    }

    /// Transitivity: x R y and y R z imply x R z.
    #[must_use]
    pub fn transitive(&self, dom: &Domain<T>) -> Prop {
        let rel = self.clone();
        Prop::all3(dom, dom, dom, move |x, y, z| {
            !(rel.holds(x, y) && rel.holds(y, z)) || rel.holds(x, z)
        })
    }

    /// Equivalence: reflexive, symmetric and transitive.
    #[must_use]
    pub fn equivalence(&self, dom: &Domain<T>) -> Prop {
        Prop::conj([
            self.reflexive(dom),
            self.symmetric(dom),
            self.transitive(dom),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test [`Relation::compose`] on a small cycle.
    #[test]
    fn compose() {
        let u = Finite::new(1..=3);
        let r1 = Relation::roster([(1, 2)]);
        let r2 = Relation::roster([(2, 3)]);
        let r3 = Relation::roster([(3, 1)]);

        let lhs = r1.compose(&r2.compose(&r3, &u), &u);
        let rhs = r1.compose(&r2, &u).compose(&r3, &u);
        for x in &u {
            for y in &u {
                let expected = (*x, *y) == (1, 1);
                assert_eq!(lhs.holds(x, y), expected, "left composition fail at {x}, {y}");
                assert_eq!(rhs.holds(x, y), expected, "right composition fail at {x}, {y}");
            }
        }

        assert_eq!(r1.witness(&r2, &u, &1, &3), Some(&2));
        assert_eq!(r2.witness(&r1, &u, &2, &2), None);
        assert!(lhs.releq(&rhs, &u.domain(), &u.domain()).holds());
    }

    /// Composing with the empty relation yields the empty relation.
    #[test]
    fn compose_empty() {
        let u = Finite::new(0..5);
        let d = u.domain();
        let r = Relation::new(|x: &i32, y: &i32| x <= y);
        let e = Relation::empty();

        assert!(r.compose(&e, &u).releq(&e, &d, &d).holds());
        assert!(e.compose(&r, &u).releq(&e, &d, &d).holds());
    }

    /// The identity relation is an equivalence whose domain and range are everything.
    #[test]
    fn identity() {
        let u = Finite::new(-10..=10);
        let d = u.domain();
        let id = Relation::<i32>::identity();

        assert!(id.reflexive(&d).holds());
        assert!(id.symmetric(&d).holds());
        assert!(id.transitive(&d).holds());
        assert!(id.equivalence(&d).holds());
        assert!(id.antisymmetric(&d).holds());
        assert!(u.seteq(&id.dom(&u), &Set::full()));
        assert!(u.seteq(&id.ran(&u), &Set::full()));
    }

    /// Closure properties over unbounded domains are never established, only refuted.
    #[test]
    fn unbounded() {
        let d = Domain::sampled(|| 0i64.., 64);
        let id = Relation::<i64>::identity();
        let lt = Relation::new(|x: &i64, y: &i64| x < y);

        assert_eq!(id.reflexive(&d).check(), Verdict::Unknown);
        assert_eq!(id.reflexive(&d).establish(), Err(Error::Unprovable));
        assert_eq!(lt.reflexive(&d).check(), Verdict::Refuted);
        assert_eq!(lt.symmetric(&d).establish(), Err(Error::Refuted));
    }

    /// Test the remaining constructions.
    #[test]
    fn constructions() {
        let u = Finite::new(0..4);
        let d = u.domain();
        let lt = Relation::new(|x: &i32, y: &i32| x < y);
        let gt = lt.converse();

        assert!(gt.holds(&3, &1) && !gt.holds(&1, &3));
        assert!(lt.irreflexive(&d).holds());
        assert!(lt.transitive(&d).holds());
        assert!(!lt.symmetric(&d).holds());
        assert!(lt.union(&gt).symmetric(&d).holds());
        assert!(lt.inter(&gt).releq(&Relation::empty(), &d, &d).holds());

        let evens = Set::new(|x: &i32| x % 2 == 0);
        let prod = Relation::prod(&evens, &Set::full());
        assert!(prod.holds(&2, &3) && !prod.holds(&1, &3));
        assert!(u.seteq(&prod.dom(&u), &evens));
        assert!(u.seteq(&prod.ran(&u), &Set::full()));
        assert!(u.seteq(&lt.dom(&u), &Set::roster([0, 1, 2])));
        assert!(u.seteq(&lt.ran(&u), &Set::roster([1, 2, 3])));
    }
}
