//! Engine-level term identity
//!
//! Patterns and targets compiled by the same engine share one dense `u32`
//! id space for terms, so grounding vectors and domains are plain integer
//! arrays. Alongside each id the table keeps a comparison key (numeric when
//! the term's name parses as a number, textual otherwise) so that built-in
//! ordering constraints never touch the interner during search.

use crate::logic::{Interner, Term};
use indexmap::IndexSet;
use std::cmp::Ordering;

/// Comparison key of a term, resolved once at intern time
#[derive(Debug, Clone)]
struct OrdKey {
    text: String,
    number: Option<f64>,
}

/// Bidirectional map between `Term`s and dense term ids
#[derive(Debug, Default)]
pub struct TermTable {
    terms: IndexSet<Term>,
    keys: Vec<OrdKey>,
}

impl TermTable {
    pub fn new() -> Self {
        TermTable {
            terms: IndexSet::new(),
            keys: Vec::new(),
        }
    }

    /// Intern a term, returning its dense id
    pub fn intern(&mut self, term: Term, interner: &Interner) -> u32 {
        if let Some(id) = self.terms.get_index_of(&term) {
            return id as u32;
        }
        let name = term.name(interner);
        self.keys.push(OrdKey {
            text: name.to_string(),
            number: name.parse::<f64>().ok(),
        });
        let (id, _) = self.terms.insert_full(term);
        id as u32
    }

    /// Look up the id of an already-interned term
    pub fn get(&self, term: &Term) -> Option<u32> {
        self.terms.get_index_of(term).map(|i| i as u32)
    }

    /// Resolve a dense id back to its term
    pub fn resolve(&self, id: u32) -> Term {
        *self
            .terms
            .get_index(id as usize)
            .expect("term id out of range")
    }

    /// Compare two terms by value: numerically when both names are numeric,
    /// lexicographically otherwise.
    pub fn compare(&self, a: u32, b: u32) -> Ordering {
        let ka = &self.keys[a as usize];
        let kb = &self.keys[b as usize];
        match (ka.number, kb.number) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => ka.text.cmp(&kb.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Constant, Term};

    fn constant(interner: &mut Interner, name: &str) -> Term {
        Term::Constant(Constant::new(interner.intern_constant(name)))
    }

    #[test]
    fn intern_is_stable() {
        let mut interner = Interner::new();
        let mut table = TermTable::new();
        let a = constant(&mut interner, "a");
        let id1 = table.intern(a, &interner);
        let id2 = table.intern(a, &interner);
        assert_eq!(id1, id2);
        assert_eq!(table.resolve(id1), a);
    }

    #[test]
    fn numeric_comparison() {
        let mut interner = Interner::new();
        let mut table = TermTable::new();
        let two = table.intern(constant(&mut interner, "2"), &interner);
        let ten = table.intern(constant(&mut interner, "10"), &interner);
        // Numeric, not lexicographic: 2 < 10
        assert_eq!(table.compare(two, ten), Ordering::Less);

        let apple = table.intern(constant(&mut interner, "apple"), &interner);
        let pear = table.intern(constant(&mut interner, "pear"), &interner);
        assert_eq!(table.compare(apple, pear), Ordering::Less);
        // Mixed numeric/text falls back to text ordering
        assert_eq!(table.compare(ten, apple), Ordering::Less);
    }
}
