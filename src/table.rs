//! Tabulated relations [`Table`].
//!
//! A relation restricted to two finite carriers is just a Boolean matrix. Tabulating it once makes
//! repeated queries cheap, and gives a concrete value that can be compared, printed and composed
//! without going back through the predicate.

use crate::prelude::*;

/// A relation between two finite carriers, stored as a row-major bit matrix.
///
/// The entry `(i, j)` records whether the `i`-th element of the domain is related to the `j`-th
/// element of the codomain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    /// Size of the domain.
    rows: usize,
    /// Size of the codomain.
    cols: usize,
    /// The entries, row by row.
    bits: BitVec,
}

/// Tables are displayed row by row, as in `[010; 001; 000]`.
impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_char('[')?;
        for i in 0..self.rows {
            if i != 0 {
                f.write_str("; ")?;
            }
            for j in 0..self.cols {
                f.write_char(if self.at(i, j) { '1' } else { '0' })?;
            }
        }
        f.write_char(']')
    }
}

impl Table {
    /// Tabulates a relation over the given carriers.
    pub fn new<T: 'static, U: 'static>(
        rel: &Relation<T, U>,
        dom: &Finite<T>,
        cod: &Finite<U>,
    ) -> Self {
        let bits = dom
            .iter()
            .flat_map(|x| cod.iter().map(move |y| rel.holds(x, y)))
            .collect();

        Self {
            rows: dom.len(),
            cols: cod.len(),
            bits,
        }
    }

    /// The empty table with the given dimensions.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            bits: BitVec::repeat(false, rows * cols),
        }
    }

    /// Size of the domain.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Size of the codomain.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The entry at `(i, j)`, assuming it's in bounds.
    fn at(&self, i: usize, j: usize) -> bool {
        self.bits[i * self.cols + j]
    }

    /// The entry at `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        (i < self.rows && j < self.cols).then(|| self.at(i, j))
    }

    /// Number of related pairs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether no pair is related.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// The converse table, its transpose.
    #[must_use]
    pub fn converse(&self) -> Self {
        let bits = (0..self.cols)
            .flat_map(|j| (0..self.rows).map(move |i| self.at(i, j)))
            .collect();

        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Boolean matrix product. Returns `None` if the codomain of `self` doesn't have the size of
    /// the domain of `other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Option<Self> {
        if self.cols != other.rows {
            return None;
        }

        let mut res = Self::empty(self.rows, other.cols);
        for i in 0..self.rows {
            for j in (0..self.cols).filter(|&j| self.at(i, j)) {
                for k in (0..other.cols).filter(|&k| other.at(j, k)) {
                    res.bits.set(i * res.cols + k, true);
                }
            }
        }

        Some(res)
    }

    /// Entrywise inclusion. Returns `None` if the dimensions don't match.
    #[must_use]
    pub fn subrel(&self, other: &Self) -> Option<bool> {
        if (self.rows, self.cols) != (other.rows, other.cols) {
            return None;
        }

        Some(
            self.bits
                .iter()
                .by_vals()
                .zip(other.bits.iter().by_vals())
                .all(|(x, y)| !x || y),
        )
    }

    /// Reads the table back as a relation over the given carriers. Values outside of the carriers
    /// are related to nothing.
    ///
    /// The carriers should have as many elements as the table has rows and columns.
    #[must_use]
    pub fn relation<T: PartialEq + 'static, U: PartialEq + 'static>(
        &self,
        dom: &Finite<T>,
        cod: &Finite<U>,
    ) -> Relation<T, U> {
        debug_assert_eq!(dom.len(), self.rows, "domain size mismatch");
        debug_assert_eq!(cod.len(), self.cols, "codomain size mismatch");

        let (table, dom, cod) = (self.clone(), dom.clone(), cod.clone());
        Relation::new(move |x, y| match (dom.index_of(x), cod.index_of(y)) {
            (Some(i), Some(j)) => table.get(i, j).unwrap_or(false),
            _ => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test [`Table::new`] and its display.
    #[test]
    fn display() {
        let u = Finite::new(0..3);
        let succ = Relation::new(|x: &i32, y: &i32| x + 1 == *y);
        let table = succ.tabulate(&u, &u);

        assert_eq!(table.to_string(), "[010; 001; 000]");
        assert_eq!(table.count(), 2);
        assert_eq!(table.get(0, 1), Some(true));
        assert_eq!(table.get(1, 0), Some(false));
        assert_eq!(table.get(3, 0), None);
        assert_eq!(Table::empty(0, 0).to_string(), "[]");
        assert!(Table::empty(2, 3).is_empty());
    }

    /// Table operations agree with relation operations.
    #[test]
    fn agrees() {
        let u = Finite::new(0..4);
        let d = u.domain();
        let succ = Relation::new(|x: &i32, y: &i32| x + 1 == *y);
        let le = Relation::new(|x: &i32, y: &i32| x <= y);
        let (ts, tl) = (succ.tabulate(&u, &u), le.tabulate(&u, &u));

        assert_eq!(
            ts.compose(&ts),
            Some(succ.compose(&succ, &u).tabulate(&u, &u))
        );
        assert_eq!(ts.converse(), succ.converse().tabulate(&u, &u));
        assert_eq!(ts.subrel(&tl), Some(true));
        assert_eq!(tl.subrel(&ts), Some(false));
        assert!(ts.relation(&u, &u).releq(&succ, &d, &d).holds());
        assert!(!ts.relation(&u, &u).holds(&3, &4));
    }

    /// Mismatched dimensions are reported.
    #[test]
    fn dimensions() {
        let a = Table::empty(2, 3);
        let b = Table::empty(3, 2);
        assert_eq!(a.compose(&b).map(|t| (t.rows(), t.cols())), Some((2, 2)));
        assert_eq!(a.compose(&a), None);
        assert_eq!(a.subrel(&b), None);
        assert_eq!(a.converse(), b);
    }
}
