//! Compiled target representation
//!
//! A target clause is compiled once into read-only membership indices,
//! partitioned by literal shape:
//!
//! - literals of arity up to the configured threshold go into a masked-tuple
//!   set: every subsequence of argument positions is stored wildcard-masked,
//!   so a membership query under any partial binding is one set lookup;
//! - higher-arity literals keep a per-(predicate, position, value) index of
//!   the contiguous range of candidate literals, intersected across bound
//!   positions and then scanned, avoiding the exponential masked expansion;
//! - completely symmetric predicates index term -> literal occurrences and
//!   answer queries by intersecting the occurrence sets of the bound terms.
//!
//! Negated literals of the target are not indexed at all: a negated pattern
//! literal is satisfied when its ground image is *absent* from the positive
//! facts.

use crate::error::MatchError;
use crate::logic::{Clause, Interner, LiteralKind, SpecialOp};
use crate::subsumption::domain::TermSet;
use crate::subsumption::term_table::TermTable;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Wildcard marker inside masked tuples (never a valid term id)
const WILDCARD: u32 = u32::MAX;

/// A positive target literal in compiled form
#[derive(Debug, Clone)]
pub(crate) struct TargetLiteral {
    pub predicate: u32,
    pub args: Vec<u32>,
}

/// Masked-tuple membership index for low-arity literals
#[derive(Debug, Default)]
struct LowArityIndex {
    /// Keys are [predicate, arg0, arg1, ...] with WILDCARD holes
    tuples: HashSet<Vec<u32>>,
}

impl LowArityIndex {
    fn insert(&mut self, lit: &TargetLiteral) {
        let arity = lit.args.len();
        for mask in 0..(1u32 << arity) {
            let mut key = Vec::with_capacity(arity + 1);
            key.push(lit.predicate);
            for (j, &arg) in lit.args.iter().enumerate() {
                key.push(if mask & (1 << j) != 0 { arg } else { WILDCARD });
            }
            self.tuples.insert(key);
        }
    }

    fn matches(&self, predicate: u32, bound: &[Option<u32>]) -> bool {
        let mut key = Vec::with_capacity(bound.len() + 1);
        key.push(predicate);
        for b in bound {
            key.push(b.unwrap_or(WILDCARD));
        }
        self.tuples.contains(&key)
    }
}

/// Range index for high-arity literals
#[derive(Debug, Default)]
struct HighArityIndex {
    literals: Vec<TargetLiteral>,
    /// (predicate, position, value) -> first and last literal index holding
    /// that value at that position
    bounds: HashMap<(u32, usize, u32), (usize, usize)>,
}

impl HighArityIndex {
    fn insert(&mut self, lit: TargetLiteral) {
        let idx = self.literals.len();
        for (j, &arg) in lit.args.iter().enumerate() {
            let entry = self
                .bounds
                .entry((lit.predicate, j, arg))
                .or_insert((idx, idx));
            entry.0 = entry.0.min(idx);
            entry.1 = entry.1.max(idx);
        }
        self.literals.push(lit);
    }

    fn matches(&self, predicate: u32, bound: &[Option<u32>]) -> bool {
        if self.literals.is_empty() {
            return false;
        }
        let mut lo = 0usize;
        let mut hi = self.literals.len() - 1;
        for (j, b) in bound.iter().enumerate() {
            if let Some(value) = b {
                match self.bounds.get(&(predicate, j, *value)) {
                    Some(&(first, last)) => {
                        lo = lo.max(first);
                        hi = hi.min(last);
                    }
                    None => return false,
                }
            }
        }
        if lo > hi {
            return false;
        }
        'candidates: for lit in self.literals[lo..=hi].iter() {
            if lit.predicate != predicate || lit.args.len() != bound.len() {
                continue;
            }
            for (j, b) in bound.iter().enumerate() {
                if let Some(value) = b {
                    if lit.args[j] != *value {
                        continue 'candidates;
                    }
                }
            }
            return true;
        }
        false
    }
}

/// Occurrence index for completely symmetric predicates
#[derive(Debug, Default)]
struct SymmetricIndex {
    /// predicate -> term -> indices of literals containing the term
    by_pred: HashMap<u32, HashMap<u32, TermSet>>,
}

impl SymmetricIndex {
    fn build(literals: &[(TargetLiteral, LiteralKind)]) -> SymmetricIndex {
        let mut raw: HashMap<u32, HashMap<u32, Vec<u32>>> = HashMap::new();
        for (idx, (lit, kind)) in literals.iter().enumerate() {
            if kind.is_symmetric() {
                let per_term = raw.entry(lit.predicate).or_default();
                for &arg in &lit.args {
                    per_term.entry(arg).or_default().push(idx as u32);
                }
            }
        }
        let by_pred = raw
            .into_iter()
            .map(|(p, terms)| {
                (
                    p,
                    terms
                        .into_iter()
                        .map(|(t, occs)| (t, TermSet::from_values(occs)))
                        .collect(),
                )
            })
            .collect();
        SymmetricIndex { by_pred }
    }

    /// Some target literal of the predicate contains all bound terms
    fn matches(&self, predicate: u32, bound: &[Option<u32>]) -> bool {
        let per_term = match self.by_pred.get(&predicate) {
            Some(m) => m,
            None => return false,
        };
        let mut domain: Option<TermSet> = None;
        for b in bound {
            if let Some(value) = b {
                let occurrences = match per_term.get(value) {
                    Some(s) => s,
                    None => return false,
                };
                domain = Some(match domain {
                    None => occurrences.clone(),
                    Some(d) => TermSet::intersection(&d, occurrences),
                });
                if domain.as_ref().is_some_and(|d| d.is_empty()) {
                    return false;
                }
            }
        }
        domain.is_some()
    }
}

/// Read-only compiled form of a target clause
#[derive(Debug)]
pub struct TargetStructure {
    /// Positive literals, in clause order
    literals: Vec<TargetLiteral>,
    /// Predicate ids of the positive literals
    predicates: TermSet,
    /// (predicate, position) -> candidate terms at that position
    position_domains: HashMap<(u32, usize), TermSet>,
    /// type id -> terms carrying that type annotation
    typed_terms: HashMap<u32, TermSet>,
    /// Every term of the clause
    all_terms: TermSet,
    low_arity: LowArityIndex,
    high_arity: HighArityIndex,
    symmetric: SymmetricIndex,
    low_arity_threshold: usize,
}

impl TargetStructure {
    /// Compile a target clause against the engine's term table.
    ///
    /// Fails with [`MatchError::Contradiction`] when the clause contains a
    /// literal together with its exact complement.
    pub(crate) fn compile(
        clause: &Clause,
        interner: &Interner,
        terms: &mut TermTable,
        low_arity_threshold: usize,
    ) -> Result<TargetStructure, MatchError> {
        let literal_set: HashSet<_> = clause.literals().iter().collect();
        for lit in clause.literals() {
            if literal_set.contains(&lit.negation()) {
                return Err(MatchError::Contradiction(format!(
                    "clause asserts both polarities of {}",
                    lit.display(interner)
                )));
            }
        }

        let mut compiled: Vec<(TargetLiteral, LiteralKind)> = Vec::new();
        let mut predicate_ids = Vec::new();
        for lit in clause.literals() {
            if lit.negated {
                continue;
            }
            let kind = lit.kind(interner);
            let args: Vec<u32> = lit
                .args
                .iter()
                .map(|t| terms.intern(*t, interner))
                .collect();
            let predicate = lit.predicate.id.as_u32();
            predicate_ids.push(predicate);
            compiled.push((TargetLiteral { predicate, args }, kind));
        }

        let mut position_domains_raw: HashMap<(u32, usize), Vec<u32>> = HashMap::new();
        for (lit, kind) in &compiled {
            let arity = lit.args.len();
            if kind.is_symmetric() {
                // Order-insensitive: every term is a candidate at every position
                for i in 0..arity {
                    let entry = position_domains_raw.entry((lit.predicate, i)).or_default();
                    entry.extend(lit.args.iter().copied());
                }
            } else {
                for (j, &arg) in lit.args.iter().enumerate() {
                    position_domains_raw
                        .entry((lit.predicate, j))
                        .or_default()
                        .push(arg);
                }
            }
        }
        let position_domains = position_domains_raw
            .into_iter()
            .map(|(k, v)| (k, TermSet::from_values(v)))
            .collect();

        let symmetric = SymmetricIndex::build(&compiled);
        let mut low_arity = LowArityIndex::default();
        let mut high_arity = HighArityIndex::default();
        for (lit, _) in &compiled {
            if lit.args.len() <= low_arity_threshold {
                low_arity.insert(lit);
            } else {
                high_arity.insert(lit.clone());
            }
        }

        let mut all_terms_raw = Vec::new();
        let mut typed_raw: HashMap<u32, Vec<u32>> = HashMap::new();
        for term in clause.terms() {
            let id = terms.intern(term, interner);
            all_terms_raw.push(id);
            if let Some(type_id) = term.type_id() {
                typed_raw.entry(type_id.as_u32()).or_default().push(id);
            }
        }

        Ok(TargetStructure {
            literals: compiled.into_iter().map(|(l, _)| l).collect(),
            predicates: TermSet::from_values(predicate_ids),
            position_domains,
            typed_terms: typed_raw
                .into_iter()
                .map(|(k, v)| (k, TermSet::from_values(v)))
                .collect(),
            all_terms: TermSet::from_values(all_terms_raw),
            low_arity,
            high_arity,
            symmetric,
            low_arity_threshold,
        })
    }

    pub(crate) fn predicates(&self) -> &TermSet {
        &self.predicates
    }

    pub(crate) fn literals(&self) -> &[TargetLiteral] {
        &self.literals
    }

    pub(crate) fn all_terms(&self) -> &TermSet {
        &self.all_terms
    }

    pub(crate) fn position_domain(&self, predicate: u32, position: usize) -> Option<&TermSet> {
        self.position_domains.get(&(predicate, position))
    }

    pub(crate) fn typed_terms(&self, type_id: u32) -> TermSet {
        self.typed_terms
            .get(&type_id)
            .cloned()
            .unwrap_or_else(TermSet::empty)
    }

    /// Check one pattern literal against the target under a partial grounding.
    ///
    /// `bound` holds the grounding of the literal's arguments in order
    /// (`None` = still unbound). Negated literals invert the positive check
    /// once fully ground and are vacuously satisfiable before that.
    pub(crate) fn check_literal(
        &self,
        predicate: u32,
        kind: LiteralKind,
        negated: bool,
        bound: &[Option<u32>],
        terms: &TermTable,
    ) -> bool {
        if negated {
            if bound.iter().all(|b| b.is_some()) {
                !self.match_literal(predicate, kind, bound, terms)
            } else {
                true
            }
        } else {
            self.match_literal(predicate, kind, bound, terms)
        }
    }

    /// Positive membership / built-in constraint check
    fn match_literal(
        &self,
        predicate: u32,
        kind: LiteralKind,
        bound: &[Option<u32>],
        terms: &TermTable,
    ) -> bool {
        match kind {
            LiteralKind::Special(op) => eval_special(op, bound, terms),
            LiteralKind::Symmetric => self.symmetric.matches(predicate, bound),
            LiteralKind::Normal => {
                if bound.len() <= self.low_arity_threshold {
                    self.low_arity.matches(predicate, bound)
                } else {
                    self.high_arity.matches(predicate, bound)
                }
            }
        }
    }
}

/// Evaluate a built-in constraint on the bound arguments.
///
/// Binary comparisons defer (accept) until both arguments are bound;
/// `@alldiff` rejects as soon as two bound arguments coincide.
fn eval_special(op: SpecialOp, bound: &[Option<u32>], terms: &TermTable) -> bool {
    match op {
        SpecialOp::AllDiff => {
            let mut seen = HashSet::new();
            for b in bound.iter().flatten() {
                if !seen.insert(*b) {
                    return false;
                }
            }
            true
        }
        _ => {
            let (a, b) = match (bound.first().copied().flatten(), bound.get(1).copied().flatten())
            {
                (Some(a), Some(b)) => (a, b),
                // Not yet decidable on a partial grounding
                _ => return true,
            };
            match op {
                SpecialOp::Eq => a == b,
                SpecialOp::Neq => a != b,
                SpecialOp::Gt => terms.compare(a, b) == Ordering::Greater,
                SpecialOp::Geq => terms.compare(a, b) != Ordering::Less,
                SpecialOp::Lt => terms.compare(a, b) == Ordering::Less,
                SpecialOp::Leq => terms.compare(a, b) != Ordering::Greater,
                SpecialOp::AllDiff => unreachable!(),
            }
        }
    }
}
