//! Equality of relations: extensional [`RelEq`] and Leibniz [`LeibnizEq`].
//!
//! Two relations are extensionally equal when each includes the other. They're Leibniz equal when
//! no [`Observer`] can tell them apart. Leibniz equality implies extensional equality, as
//! membership of a pair is itself an observation. The converse is the principle of
//! extensionality, which is not something we can check: an observer is an arbitrary function, and
//! may well inspect pairs outside of any carrier we've looked at.
//!
//! We don't pretend otherwise. [`Extensionality`] is an explicit token that upgrades extensional
//! equality to Leibniz equality, and the resulting [`LeibnizEq`] remembers that it was
//! postulated. Should an observer ever distinguish two postulated-equal relations, transport
//! fails with [`Error::ExtensionalityGap`] rather than silently returning a wrong answer.

use crate::prelude::*;

/// A property of relations.
pub struct Observer<T, U = T>(Rc<dyn Fn(&Relation<T, U>) -> bool>);

impl<T, U> Clone for Observer<T, U> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T, U> Debug for Observer<T, U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Observer").finish_non_exhaustive()
    }
}

impl<T: 'static, U: 'static> Observer<T, U> {
    /// Initializes an observer from a predicate on relations.
    pub fn new<P: Fn(&Relation<T, U>) -> bool + 'static>(pred: P) -> Self {
        Self(Rc::new(pred))
    }

    /// Observes whether `x` is related to `y`.
    pub fn membership(x: T, y: U) -> Self {
        Self::new(move |rel| rel.holds(&x, &y))
    }

    /// Observes a relation.
    pub fn observe(&self, rel: &Relation<T, U>) -> bool {
        (self.0)(rel)
    }

    /// Every membership observer over the given carriers.
    #[must_use]
    pub fn memberships(dom: &Finite<T>, cod: &Finite<U>) -> Finite<Self>
    where
        T: Clone,
        U: Clone,
    {
        dom.iter()
            .flat_map(|x| cod.iter().map(move |y| Self::membership(x.clone(), y.clone())))
            .collect()
    }
}

impl<T: 'static, U: 'static> Relation<T, U> {
    /// Leibniz equality: every observer within `observers` agrees on both relations.
    #[must_use]
    pub fn leibniz_eq(&self, other: &Self, observers: &Domain<Observer<T, U>>) -> Prop {
        let (fst, snd) = (self.clone(), other.clone());
        Prop::all(observers, move |obs| obs.observe(&fst) == obs.observe(&snd))
    }
}

// -------------------- Extensional equality -------------------- //

/// Evidence that two relations are extensionally equal over two finite carriers.
pub struct RelEq<T, U = T> {
    /// Left-hand side.
    lhs: Relation<T, U>,
    /// Right-hand side.
    rhs: Relation<T, U>,
    /// The domain carrier the equality was checked over.
    dom: Finite<T>,
    /// The codomain carrier the equality was checked over.
    cod: Finite<U>,
}

impl<T, U> Clone for RelEq<T, U> {
    fn clone(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            dom: self.dom.clone(),
            cod: self.cod.clone(),
        }
    }
}

impl<T, U> Debug for RelEq<T, U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RelEq")
            .field("dom", &self.dom.len())
            .field("cod", &self.cod.len())
            .finish_non_exhaustive()
    }
}

impl<T: 'static, U: 'static> RelEq<T, U> {
    /// Reflexivity: a relation is extensionally equal to itself over any carriers.
    #[must_use]
    pub fn refl(rel: &Relation<T, U>, dom: &Finite<T>, cod: &Finite<U>) -> Self {
        Self {
            lhs: rel.clone(),
            rhs: rel.clone(),
            dom: dom.clone(),
            cod: cod.clone(),
        }
    }

    /// Checks that two relations are extensionally equal over the given carriers.
    ///
    /// ## Errors
    ///
    /// [`Error::Refuted`] if some pair is related by one relation and not the other, or
    /// [`Error::Unprovable`] if the check ran out of budget.
    pub fn establish(
        lhs: &Relation<T, U>,
        rhs: &Relation<T, U>,
        dom: &Finite<T>,
        cod: &Finite<U>,
    ) -> Result<Self> {
        lhs.releq(rhs, &dom.domain(), &cod.domain()).establish()?;
        Ok(Self {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            dom: dom.clone(),
            cod: cod.clone(),
        })
    }

    /// Left-hand side.
    pub const fn lhs(&self) -> &Relation<T, U> {
        &self.lhs
    }

    /// Right-hand side.
    pub const fn rhs(&self) -> &Relation<T, U> {
        &self.rhs
    }

    /// The carriers the equality was checked over.
    pub const fn carriers(&self) -> (&Finite<T>, &Finite<U>) {
        (&self.dom, &self.cod)
    }

    /// Symmetry.
    #[must_use]
    pub fn symm(self) -> Self {
        Self {
            lhs: self.rhs,
            rhs: self.lhs,
            dom: self.dom,
            cod: self.cod,
        }
    }
}

impl<T: PartialEq + 'static, U: PartialEq + 'static> RelEq<T, U> {
    /// Transitivity: `lhs = rhs` and `rhs = other` give `lhs = other`.
    ///
    /// ## Errors
    ///
    /// [`Violation::Unchained`] if the right-hand side of `self` isn't the left-hand side of
    /// `other`, or if both were checked over different carriers.
    pub fn trans(self, other: Self) -> Result<Self> {
        if !self.rhs.same(&other.lhs)
            || self.dom.as_slice() != other.dom.as_slice()
            || self.cod.as_slice() != other.cod.as_slice()
        {
            return Err(Violation::Unchained.into());
        }

        Ok(Self {
            lhs: self.lhs,
            rhs: other.rhs,
            dom: self.dom,
            cod: self.cod,
        })
    }
}

// -------------------- Leibniz equality -------------------- //

/// Evidence that no observer distinguishes two relations.
pub struct LeibnizEq<T, U = T> {
    /// Left-hand side.
    lhs: Relation<T, U>,
    /// Right-hand side.
    rhs: Relation<T, U>,
    /// Whether this was obtained through [`Extensionality`].
    postulated: bool,
}

impl<T, U> Clone for LeibnizEq<T, U> {
    fn clone(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            postulated: self.postulated,
        }
    }
}

impl<T, U> Debug for LeibnizEq<T, U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LeibnizEq")
            .field("postulated", &self.postulated)
            .finish_non_exhaustive()
    }
}

impl<T: 'static, U: 'static> LeibnizEq<T, U> {
    /// Reflexivity: a relation is Leibniz equal to itself.
    #[must_use]
    pub fn refl(rel: &Relation<T, U>) -> Self {
        Self {
            lhs: rel.clone(),
            rhs: rel.clone(),
            postulated: false,
        }
    }

    /// Whether this equality rests on the [`Extensionality`] postulate.
    #[must_use]
    pub const fn is_postulated(&self) -> bool {
        self.postulated
    }

    /// Left-hand side.
    pub const fn lhs(&self) -> &Relation<T, U> {
        &self.lhs
    }

    /// Right-hand side.
    pub const fn rhs(&self) -> &Relation<T, U> {
        &self.rhs
    }

    /// Symmetry.
    #[must_use]
    pub fn symm(self) -> Self {
        Self {
            lhs: self.rhs,
            rhs: self.lhs,
            postulated: self.postulated,
        }
    }

    /// Transport: the observation on the left-hand side, which equals that on the right-hand side.
    ///
    /// ## Errors
    ///
    /// [`Error::ExtensionalityGap`] if the observer distinguishes both sides. This can only
    /// happen for postulated equalities.
    pub fn transport(&self, obs: &Observer<T, U>) -> Result<bool> {
        let (fst, snd) = (obs.observe(&self.lhs), obs.observe(&self.rhs));
        if fst == snd {
            Ok(fst)
        } else {
            tracing::warn!(
                postulated = self.postulated,
                lhs = fst,
                rhs = snd,
                "observer distinguishes Leibniz equal relations"
            );
            Err(Error::ExtensionalityGap)
        }
    }

    /// Extensional equality over the given carriers, by transporting every membership observer.
    ///
    /// ## Errors
    ///
    /// [`Error::ExtensionalityGap`] if a postulated equality fails on some pair in the carriers.
    pub fn to_releq(&self, dom: &Finite<T>, cod: &Finite<U>) -> Result<RelEq<T, U>>
    where
        T: Clone,
        U: Clone,
    {
        for obs in &Observer::memberships(dom, cod) {
            self.transport(obs)?;
        }

        Ok(RelEq {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            dom: dom.clone(),
            cod: cod.clone(),
        })
    }
}

/// The principle of extensionality for relations, as an explicit postulate.
///
/// This can't be checked, only assumed. Every use is logged.
#[derive(Debug)]
pub struct Extensionality(());

impl Extensionality {
    /// Assumes extensionality.
    #[must_use]
    pub fn postulate() -> Self {
        tracing::warn!("extensionality postulated");
        Self(())
    }

    /// Upgrades extensional equality to Leibniz equality.
    ///
    /// Observers that only look at pairs within the carriers of `eq` never distinguish both
    /// sides. Any other observer may, in which case [`LeibnizEq::transport`] reports it.
    #[must_use]
    pub fn upgrade<T: 'static, U: 'static>(&self, eq: &RelEq<T, U>) -> LeibnizEq<T, U> {
        tracing::debug!(
            dom = eq.dom.len(),
            cod = eq.cod.len(),
            "extensional equality upgraded"
        );
        LeibnizEq {
            lhs: eq.lhs.clone(),
            rhs: eq.rhs.clone(),
            postulated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The carrier {1, 2, 3}.
    fn carrier() -> Finite<i32> {
        Finite::new(1..=3)
    }

    /// Test [`RelEq`] and its upgrade within the carriers.
    #[test]
    fn upgrade() {
        let u = carrier();
        let le = Relation::new(|x: &i32, y: &i32| x <= y);
        let lt_or_eq = Relation::new(|x: &i32, y: &i32| x < y || x == y);

        let eq = RelEq::establish(&le, &lt_or_eq, &u, &u).unwrap();
        let leib = Extensionality::postulate().upgrade(&eq);
        assert!(leib.is_postulated());
        assert_eq!(leib.transport(&Observer::membership(1, 2)), Ok(true));
        assert_eq!(leib.transport(&Observer::membership(2, 1)), Ok(false));

        let back = leib.clone().symm().to_releq(&u, &u).unwrap();
        assert!(back.lhs().same(&lt_or_eq));
        assert!(back.rhs().same(&le));

        assert_eq!(
            RelEq::establish(&le, &Relation::full(), &u, &u).unwrap_err(),
            Error::Refuted
        );
    }

    /// Test [`RelEq::refl`] and [`RelEq::trans`].
    #[test]
    fn chain() {
        let u = carrier();
        let le = Relation::new(|x: &i32, y: &i32| x <= y);
        let lt_or_eq = Relation::new(|x: &i32, y: &i32| x < y || x == y);
        let not_gt = Relation::new(|x: &i32, y: &i32| !x.gt(y));

        let fst = RelEq::establish(&le, &lt_or_eq, &u, &u).unwrap();
        let snd = RelEq::establish(&lt_or_eq, &not_gt, &u, &u).unwrap();
        let eq = fst.clone().trans(snd.clone()).unwrap();
        assert!(eq.lhs().same(&le));
        assert!(eq.rhs().same(&not_gt));
        assert!(eq.lhs().releq(eq.rhs(), &u.domain(), &u.domain()).holds());

        let refl = RelEq::refl(&le, &u, &u);
        assert!(refl.trans(fst.clone()).unwrap().rhs().same(&lt_or_eq));

        // The middle terms must agree.
        assert_eq!(
            snd.clone().trans(fst.clone()).unwrap_err(),
            Error::PreconditionViolation(Violation::Unchained)
        );

        // So must the carriers.
        let wider = Finite::new(0..=3);
        let other = RelEq::establish(&lt_or_eq, &not_gt, &wider, &wider).unwrap();
        assert_eq!(
            fst.trans(other).unwrap_err(),
            Error::PreconditionViolation(Violation::Unchained)
        );
    }

    /// Relations equal over {1, 2, 3} but not at (4, 4) are caught by an observer looking there.
    #[test]
    fn gap() {
        let u = carrier();
        let id = Relation::<i32>::identity();
        let small = Relation::new(|x: &i32, y: &i32| x == y && *x <= 3);

        let eq = RelEq::establish(&id, &small, &u, &u).unwrap();
        let leib = Extensionality::postulate().upgrade(&eq);
        assert!(leib.to_releq(&u, &u).is_ok());
        assert_eq!(
            leib.transport(&Observer::membership(4, 4)),
            Err(Error::ExtensionalityGap)
        );

        let wider = Finite::new(1..=4);
        assert_eq!(
            leib.to_releq(&wider, &wider).unwrap_err(),
            Error::ExtensionalityGap
        );
    }

    /// Leibniz equality implies extensional equality.
    #[test]
    fn leibniz_releq() {
        let u = carrier();
        let le = Relation::new(|x: &i32, y: &i32| x <= y);
        let ge = le.converse();
        let observers = Observer::memberships(&u, &u).domain();

        assert!(le.leibniz_eq(&le.clone(), &observers).holds());
        assert!(le.leibniz_eq(&ge, &observers).check().is_refuted());

        let refl = LeibnizEq::refl(&le);
        assert!(!refl.is_postulated());
        assert!(refl.to_releq(&u, &u).is_ok());

        // Arbitrary observers are fine too.
        let reflexive = Observer::new(move |r: &Relation<i32>| r.holds(&7, &7));
        assert_eq!(refl.transport(&reflexive), Ok(true));
    }
}
