//! Crate prelude.

// The actual prelude.
pub use crate::{
    domain::{Domain, Finite, Sampler},
    error::{Error, Result, Violation},
    leibniz::{Extensionality, LeibnizEq, Observer, RelEq},
    powerset::{Exists, Powerset, Unique},
    prop::{Budget, Prop, Verdict},
    relation::Relation,
    set::Set,
    table::Table,
};

// Convenient imports within the crate.
pub(crate) use crate::SmallVec;
pub(crate) use bitvec::vec::BitVec;
pub(crate) use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult, Write},
    ops::{ControlFlow, Not},
    rc::Rc,
};
