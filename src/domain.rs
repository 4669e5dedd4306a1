//! Finite carriers [`Finite`] and quantifier domains [`Domain`].
//!
//! Sets and relations are arbitrary predicates, so nothing about them can be computed by
//! inspection. Every construction that needs to search for a witness, such as the domain of a
//! relation or a composition, does so over a [`Finite`] carrier, which is exact. Propositions
//! quantify over a [`Domain`], which may also be [sampled](Sampler) from an unbounded source.

use crate::prelude::*;

// -------------------- Finite carriers -------------------- //

/// A finite carrier: an exact enumeration of values.
///
/// Carriers are cheap to clone, as clones share the same elements.
pub struct Finite<T>(Rc<[T]>);

impl<T> Clone for Finite<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Debug> Debug for Finite<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for Finite<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Finite<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Finite<T> {
    /// Initializes a carrier from an iterator.
    pub fn new<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect()
    }

    /// The carrier as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the carrier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the elements of the carrier.
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.0.iter()
    }

    /// The carrier as a quantifier domain.
    #[must_use]
    pub fn domain(&self) -> Domain<T> {
        Domain::Finite(self.clone())
    }

    /// Finds the first element satisfying a predicate.
    pub fn find<P: FnMut(&T) -> bool>(&self, mut pred: P) -> Option<&T> {
        self.iter().find(|x| pred(x))
    }

    /// Position of an element within the carrier.
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|y| y == x)
    }
}

impl<T: 'static> Finite<T> {
    /// The characteristic vector of a set within the carrier.
    #[must_use]
    pub fn tabulate(&self, set: &Set<T>) -> BitVec {
        self.iter().map(|x| set.elem(x)).collect()
    }

    /// Set specification: the elements of the carrier belonging to a set.
    #[must_use]
    pub fn select(&self, set: &Set<T>) -> Self
    where
        T: Clone,
    {
        self.iter().filter(|x| set.elem(x)).cloned().collect()
    }

    /// Subset relation ⊆, restricted to the carrier.
    #[must_use]
    pub fn subset(&self, fst: &Set<T>, snd: &Set<T>) -> bool {
        self.iter().all(|x| !fst.elem(x) || snd.elem(x))
    }

    /// Extensional equality of sets, restricted to the carrier.
    #[must_use]
    pub fn seteq(&self, fst: &Set<T>, snd: &Set<T>) -> bool {
        self.iter().all(|x| fst.elem(x) == snd.elem(x))
    }
}

impl<T: Clone + PartialEq + 'static> Finite<T> {
    /// Every subset of the carrier, each exactly once.
    ///
    /// The `i`-th subset contains the `j`-th element iff the `j`-th bit of `i` is set. Returns
    /// `None` if the number of subsets doesn't fit in a `usize`.
    #[must_use]
    pub fn subsets(&self) -> Option<Finite<Set<T>>> {
        let count = 1usize.checked_shl(u32::try_from(self.len()).ok()?)?;
        let subsets = (0..count)
            .map(|mut i| {
                let mut elems = Vec::new();
                for x in self {
                    if i % 2 == 1 {
                        elems.push(x.clone());
                    }
                    i /= 2;
                }

                Set::roster(elems)
            })
            .collect();

        Some(subsets)
    }
}

// -------------------- Domains -------------------- //

/// Draws elements from a possibly infinite source, up to a limit.
pub struct Sampler<T> {
    /// Restarts the source from the beginning.
    source: Rc<dyn Fn() -> Box<dyn Iterator<Item = T>>>,
    /// The maximum number of elements drawn per quantifier.
    limit: usize,
}

impl<T> Clone for Sampler<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            limit: self.limit,
        }
    }
}

impl<T> Sampler<T> {
    /// Initializes a sampler from a function restarting some iterator.
    pub fn new<F, I>(source: F, limit: usize) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Self {
            source: Rc::new(move || -> Box<dyn Iterator<Item = T>> { Box::new(source()) }),
            limit,
        }
    }

    /// The maximum number of elements drawn per quantifier.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

/// The range of a quantifier.
///
/// A universal statement over a [`Sampled`](Self::Sampled) domain can be refuted by a
/// counterexample, but never proved, unless its source runs dry within the limit.
#[derive(derive_more::From)]
pub enum Domain<T> {
    /// An exact, finite domain.
    Finite(Finite<T>),
    /// A domain sampled from an unbounded source.
    Sampled(Sampler<T>),
}

impl<T> Clone for Domain<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Finite(set) => Self::Finite(set.clone()),
            Self::Sampled(sampler) => Self::Sampled(sampler.clone()),
        }
    }
}

impl<T> Debug for Domain<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Finite(set) => write!(f, "Finite({} elements)", set.len()),
            Self::Sampled(sampler) => write!(f, "Sampled(limit {})", sampler.limit),
        }
    }
}

impl<T> Domain<T> {
    /// A domain sampled from an unbounded source. See [`Sampler::new`].
    pub fn sampled<F, I>(source: F, limit: usize) -> Self
    where
        F: Fn() -> I + 'static,
        I: Iterator<Item = T> + 'static,
    {
        Self::Sampled(Sampler::new(source, limit))
    }

    /// Whether the domain is known to be finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Calls `f` on the elements of the domain until it breaks. At most `cap` elements are drawn
    /// from a sampled domain.
    ///
    /// Returns whether every element of the domain was visited.
    pub(crate) fn visit<F: FnMut(&T) -> ControlFlow<()>>(&self, cap: usize, mut f: F) -> bool {
        match self {
            Self::Finite(set) => set.iter().all(|x| f(x).is_continue()),
            Self::Sampled(sampler) => {
                let mut iter = (sampler.source)();
                for _ in 0..sampler.limit.min(cap) {
                    match iter.next() {
                        Some(x) => {
                            if f(&x).is_break() {
                                return false;
                            }
                        }
                        None => return true,
                    }
                }

                // A source of exactly `limit` elements is still exhausted.
                iter.next().is_none()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test [`Finite::subsets`].
    #[test]
    fn subsets() {
        let carrier = Finite::new(1..=4);
        let subsets = carrier.subsets().unwrap();
        assert_eq!(subsets.len(), 16);

        // Pairwise distinct.
        for (i, fst) in subsets.iter().enumerate() {
            for (j, snd) in subsets.iter().enumerate() {
                assert_eq!(i == j, carrier.seteq(fst, snd), "subsets fail at {i}, {j}");
            }
        }

        assert_eq!(Finite::<u8>::new([]).subsets().unwrap().len(), 1);
        assert_eq!(Finite::new(0..17).subsets().unwrap().len(), 1 << 17);

        // Too many subsets to count.
        let bits = usize::BITS as usize;
        assert!(Finite::new(0..bits).subsets().is_none());
    }

    /// Test [`Finite::tabulate`] and [`Finite::select`].
    #[test]
    fn tabulate() {
        let carrier = Finite::new(0..6);
        let even = Set::new(|x: &i32| x % 2 == 0);
        let bits = carrier.tabulate(&even);
        assert_eq!(bits.count_ones(), 3);
        assert!(bits[0] && !bits[1]);
        assert_eq!(carrier.select(&even).as_slice(), &[0, 2, 4]);
    }

    /// Test [`Domain::visit`] on sampled domains.
    #[test]
    fn visit() {
        let dom = Domain::sampled(|| 0.., 3);
        let mut seen = Vec::new();
        let complete = dom.visit(usize::MAX, |x| {
            seen.push(*x);
            ControlFlow::Continue(())
        });
        assert!(!complete);
        assert_eq!(seen, [0, 1, 2]);

        let dom = Domain::sampled(|| 0..2, 3);
        assert!(dom.visit(usize::MAX, |_| ControlFlow::Continue(())));

        // Running dry right at the limit.
        let dom = Domain::sampled(|| 0..3, 3);
        assert!(dom.visit(usize::MAX, |_| ControlFlow::Continue(())));
        assert!(!dom.visit(2, |_| ControlFlow::Continue(())));
        assert!(!dom.is_finite());
    }
}
