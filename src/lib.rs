//! # Predicate sets and relations
//!
//! Sets and binary relations over arbitrary types, represented by their characteristic
//! predicates. Everything built from them, such as unions, domains or compositions, is again a
//! predicate.
//!
//! Since predicates are opaque, questions like inclusion or reflexivity can't be decided in
//! general. They're instead returned as [propositions](prop::Prop), quantified over explicit
//! [domains](domain::Domain) and checked against a [budget](prop::Budget), with three-valued
//! [verdicts](prop::Verdict). Searches for witnesses always run over [finite
//! carriers](domain::Finite).
//!
//! ```
//! use predset::prelude::*;
//!
//! let carrier = Finite::new(0..4);
//! let dom = carrier.domain();
//! let lt = Relation::new(|x: &i32, y: &i32| x < y);
//! let le = lt.union(&Relation::identity());
//!
//! assert!(le.transitive(&dom).holds());
//! assert!(lt.psubrel(&le, &dom, &dom).holds());
//! assert_eq!(lt.tabulate(&carrier, &carrier).to_string(), "[0111; 0011; 0001; 0000]");
//! ```

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod domain;
pub mod error;
pub mod laws;
pub mod leibniz;
pub mod powerset;
pub mod prelude;
pub mod prop;
pub mod relation;
pub mod set;
pub mod table;

pub use error::{Error, Result};

/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 4]>;
