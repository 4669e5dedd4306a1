//! The algebraic laws of sets and relations, as checkable propositions.
//!
//! Each law is a function building a [`Prop`] from its operands and the domains it quantifies
//! over. Over finite domains, every law should be [proved](Verdict::Proved) for any choice of
//! operands. Over sampled domains, they should never be refuted.

use crate::prelude::*;

// -------------------- Inclusion -------------------- //

/// R ⊆ R.
#[must_use]
pub fn subrel_reflexive<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    r.subrel(r, dom, cod)
}

/// R ⊆ S and S ⊆ T imply R ⊆ T.
#[must_use]
pub fn subrel_transitive<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    s: &Relation<T, U>,
    t: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    r.subrel(s, dom, cod)
        .and(s.subrel(t, dom, cod))
        .implies(r.subrel(t, dom, cod))
}

/// Ø ⊆ R ⊆ 1.
#[must_use]
pub fn subrel_bounds<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    Relation::empty()
        .subrel(r, dom, cod)
        .and(r.subrel(&Relation::full(), dom, cod))
}

// -------------------- Equality -------------------- //

/// R = S iff S = R.
#[must_use]
pub fn releq_symmetric<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    s: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    r.releq(s, dom, cod).iff(s.releq(r, dom, cod))
}

/// R = S and S = T imply R = T.
#[must_use]
pub fn releq_transitive<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    s: &Relation<T, U>,
    t: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    r.releq(s, dom, cod)
        .and(s.releq(t, dom, cod))
        .implies(r.releq(t, dom, cod))
}

/// Leibniz equality implies extensional equality, as long as the observers include the
/// membership observers over the carriers.
#[must_use]
pub fn leibniz_releq<T: Clone + 'static, U: Clone + 'static>(
    r: &Relation<T, U>,
    s: &Relation<T, U>,
    dom: &Finite<T>,
    cod: &Finite<U>,
) -> Prop {
    let observers = Observer::memberships(dom, cod).domain();
    r.leibniz_eq(s, &observers)
        .implies(r.releq(s, &dom.domain(), &cod.domain()))
}

// -------------------- Proper inclusion -------------------- //

/// R ⊄ R.
#[must_use]
pub fn psubrel_irreflexive<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    !r.psubrel(r, dom, cod)
}

/// R ⊂ S and S ⊂ R can't both hold.
#[must_use]
pub fn psubrel_antisymmetric<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    s: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    !r.psubrel(s, dom, cod).and(s.psubrel(r, dom, cod))
}

/// R ⊂ S and S ⊂ T imply R ⊂ T.
#[must_use]
pub fn psubrel_transitive<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    s: &Relation<T, U>,
    t: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    r.psubrel(s, dom, cod)
        .and(s.psubrel(t, dom, cod))
        .implies(r.psubrel(t, dom, cod))
}

/// Ø ⊂ R iff R ≠ Ø.
#[must_use]
pub fn psubrel_empty<T: 'static, U: 'static>(
    r: &Relation<T, U>,
    dom: &Domain<T>,
    cod: &Domain<U>,
) -> Prop {
    let empty = Relation::empty();
    empty
        .psubrel(r, dom, cod)
        .iff(!r.releq(&empty, dom, cod))
}

// -------------------- Composition -------------------- //

/// R₁ ∘ (R₂ ∘ R₃) ⊆ (R₁ ∘ R₂) ∘ R₃.
///
/// For every pair in the left-hand side, the intermediate witnesses are extracted left to right,
/// and then reassembled into a witness for the right-hand side.
#[must_use]
pub fn compose_assoc_forward<A: 'static, B: 'static, C: 'static, D: 'static>(
    r1: &Relation<A, B>,
    r2: &Relation<B, C>,
    r3: &Relation<C, D>,
    (b, c): (&Finite<B>, &Finite<C>),
    dom: &Domain<A>,
    cod: &Domain<D>,
) -> Prop {
    let inner = r2.compose(r3, c);
    let outer = r1.compose(r2, b);
    let (r1, r2, r3, b, c) = (r1.clone(), r2.clone(), r3.clone(), b.clone(), c.clone());

    Prop::all2(dom, cod, move |x, w| match r1.witness(&inner, &b, x, w) {
        None => true,
        Some(y) => r2
            .witness(&r3, &c, y, w)
            .is_some_and(|z| outer.holds(x, z) && r3.holds(z, w)),
    })
}

/// (R₁ ∘ R₂) ∘ R₃ ⊆ R₁ ∘ (R₂ ∘ R₃).
///
/// For every pair in the left-hand side, the intermediate witnesses are extracted right to left,
/// and then reassembled into a witness for the right-hand side.
#[must_use]
pub fn compose_assoc_backward<A: 'static, B: 'static, C: 'static, D: 'static>(
    r1: &Relation<A, B>,
    r2: &Relation<B, C>,
    r3: &Relation<C, D>,
    (b, c): (&Finite<B>, &Finite<C>),
    dom: &Domain<A>,
    cod: &Domain<D>,
) -> Prop {
    let inner = r2.compose(r3, c);
    let outer = r1.compose(r2, b);
    let (r1, r2, r3, b, c) = (r1.clone(), r2.clone(), r3.clone(), b.clone(), c.clone());

    Prop::all2(dom, cod, move |x, w| match outer.witness(&r3, &c, x, w) {
        None => true,
        Some(z) => r1
            .witness(&r2, &b, x, z)
            .is_some_and(|y| r1.holds(x, y) && inner.holds(y, w)),
    })
}

/// R₁ ∘ (R₂ ∘ R₃) = (R₁ ∘ R₂) ∘ R₃, as two separate inclusions.
#[must_use]
pub fn compose_assoc<A: 'static, B: 'static, C: 'static, D: 'static>(
    r1: &Relation<A, B>,
    r2: &Relation<B, C>,
    r3: &Relation<C, D>,
    via: (&Finite<B>, &Finite<C>),
    dom: &Domain<A>,
    cod: &Domain<D>,
) -> Prop {
    compose_assoc_forward(r1, r2, r3, via, dom, cod)
        .and(compose_assoc_backward(r1, r2, r3, via, dom, cod))
}

/// R ∘ Ø = Ø ∘ R = Ø.
#[must_use]
pub fn compose_with_empty<T: 'static>(r: &Relation<T>, carrier: &Finite<T>) -> Prop {
    let empty = Relation::empty();
    let dom = carrier.domain();
    r.compose(&empty, carrier)
        .releq(&empty, &dom, &dom)
        .and(empty.compose(r, carrier).releq(&empty, &dom, &dom))
}

// -------------------- Powersets -------------------- //

/// x ∈ X implies x ⊆ ⋃X.
#[must_use]
pub fn unions_upper_bound<T: 'static>(
    powerset: &Powerset<T>,
    family: &Finite<Set<T>>,
    universe: &Finite<T>,
) -> Prop {
    let (powerset, universe) = (powerset.clone(), universe.clone());
    let unions = powerset.unions(family);
    Prop::all(&family.domain(), move |x| {
        !powerset.elem(x) || universe.subset(x, &unions)
    })
}

/// x ∈ X implies ⋂X ⊆ x.
#[must_use]
pub fn intersections_lower_bound<T: 'static>(
    powerset: &Powerset<T>,
    family: &Finite<Set<T>>,
    universe: &Finite<T>,
) -> Prop {
    let (powerset, universe) = (powerset.clone(), universe.clone());
    let intersections = powerset.intersections(family);
    Prop::all(&family.domain(), move |x| {
        !powerset.elem(x) || universe.subset(&intersections, x)
    })
}
