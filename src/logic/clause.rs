//! Clauses of the matching language
//!
//! A clause is a duplicate-free list of literals. Construction collapses
//! repeated literals while preserving first-occurrence order, so clauses
//! behave as literal sets with a stable iteration order.

use crate::logic::interner::Interner;
use crate::logic::literal::Literal;
use crate::logic::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A clause: a set of literals over variables and constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    /// Create a clause, dropping duplicate literals
    pub fn new(literals: Vec<Literal>) -> Self {
        let mut seen = HashSet::new();
        let mut deduped = Vec::with_capacity(literals.len());
        for lit in literals {
            if seen.insert(lit.clone()) {
                deduped.push(lit);
            }
        }
        Clause { literals: deduped }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// Distinct variables of the clause, in first-occurrence order
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for lit in &self.literals {
            for term in &lit.args {
                if let Term::Variable(v) = term {
                    if seen.insert(*v) {
                        out.push(*v);
                    }
                }
            }
        }
        out
    }

    /// Distinct terms of the clause, in first-occurrence order
    pub fn terms(&self) -> Vec<Term> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for lit in &self.literals {
            for term in &lit.args {
                if seen.insert(*term) {
                    out.push(*term);
                }
            }
        }
        out
    }

    /// Distinct predicate symbols (with polarity folded out)
    pub fn predicates(&self) -> HashSet<crate::logic::literal::PredicateSymbol> {
        self.literals.iter().map(|l| l.predicate).collect()
    }

    /// The clause without one literal
    pub fn without(&self, literal: &Literal) -> Clause {
        Clause::new(
            self.literals
                .iter()
                .filter(|l| *l != literal)
                .cloned()
                .collect(),
        )
    }

    /// Apply a variable substitution given as parallel template/image slices.
    ///
    /// Terms not mentioned in the template (constants, unlisted variables)
    /// are left unchanged. Duplicate literals created by the substitution
    /// collapse through `Clause::new`.
    pub fn substitute(&self, template: &[Term], image: &[Term]) -> Clause {
        let map: HashMap<Term, Term> = template
            .iter()
            .copied()
            .zip(image.iter().copied())
            .filter(|(from, _)| from.is_variable())
            .collect();
        Clause::new(
            self.literals
                .iter()
                .map(|lit| Literal {
                    predicate: lit.predicate,
                    negated: lit.negated,
                    args: lit
                        .args
                        .iter()
                        .map(|t| map.get(t).copied().unwrap_or(*t))
                        .collect(),
                })
                .collect(),
        )
    }

    /// Decompose the clause into connected components.
    ///
    /// Two literals are connected when they share a variable; constants do
    /// not link literals. Ground literals form singleton components.
    pub fn connected_components(&self) -> Vec<Clause> {
        let n = self.literals.len();
        if n == 0 {
            return Vec::new();
        }

        // Variable -> literal indices mentioning it
        let mut by_var: HashMap<Variable, Vec<usize>> = HashMap::new();
        for (i, lit) in self.literals.iter().enumerate() {
            for term in &lit.args {
                if let Term::Variable(v) = term {
                    by_var.entry(*v).or_default().push(i);
                }
            }
        }

        let mut component = vec![usize::MAX; n];
        let mut count = 0;
        for start in 0..n {
            if component[start] != usize::MAX {
                continue;
            }
            let id = count;
            count += 1;
            let mut queue = vec![start];
            component[start] = id;
            while let Some(i) = queue.pop() {
                for term in &self.literals[i].args {
                    if let Term::Variable(v) = term {
                        for &j in &by_var[v] {
                            if component[j] == usize::MAX {
                                component[j] = id;
                                queue.push(j);
                            }
                        }
                    }
                }
            }
        }

        let mut parts: Vec<Vec<Literal>> = vec![Vec::new(); count];
        for (i, lit) in self.literals.iter().enumerate() {
            parts[component[i]].push(lit.clone());
        }
        parts.into_iter().map(Clause::new).collect()
    }

    /// Format this clause with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            interner,
        }
    }
}

/// Display wrapper for Clause that includes an interner for name resolution
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    interner: &'a Interner,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.clause.literals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lit.display(self.interner))?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
