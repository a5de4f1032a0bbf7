//! Compiled pattern representation
//!
//! A pattern clause is compiled once into integer-indexed arrays: a literal
//! table over dense slot ids, per-slot occurrence and neighbour indices, and
//! per-slot domains. Every distinct term of the pattern, variable or
//! constant, owns a slot; constant slots keep a singleton domain and stay
//! grounded for the structure's lifetime.
//!
//! The structure is immutable once built except for the grounding vector and
//! the domain handles, which the search mutates under a strict
//! snapshot/restore discipline: domains are saved before a branch and
//! restored verbatim on backtrack, so sibling branches never observe each
//! other's filtering. One `PatternStructure` therefore supports exactly one
//! search at a time.

use crate::error::MatchError;
use crate::logic::{Clause, Interner, LiteralKind, Term};
use crate::subsumption::domain::TermSet;
use crate::subsumption::target::TargetStructure;
use crate::subsumption::term_table::TermTable;
use indexmap::IndexSet;
use std::collections::HashMap;

/// A pattern literal over slot ids
#[derive(Debug, Clone)]
pub(crate) struct PatternLiteral {
    pub predicate: u32,
    pub negated: bool,
    pub kind: LiteralKind,
    /// Slot id per argument position
    pub args: Vec<usize>,
}

/// What a slot stands for
#[derive(Debug, Clone, Copy)]
pub(crate) enum SlotKind {
    Variable {
        /// Named with a leading underscore: exempt from selective object identity
        dont_care: bool,
    },
    Constant {
        /// The constant's own id in the engine term table
        term_id: u32,
    },
}

/// Static per-slot data
#[derive(Debug)]
pub(crate) struct Slot {
    pub term: Term,
    pub kind: SlotKind,
    /// Raw type id, if the term is typed
    pub type_id: Option<u32>,
    /// Literal indices mentioning this slot, ascending
    pub contained_in: Vec<usize>,
    /// Argument positions mentioning this slot (constants count once)
    pub occurrences: u32,
    /// Slots co-occurring with this one in some literal, ascending
    pub neighbours: Vec<usize>,
}

impl Slot {
    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SlotKind::Variable { .. })
    }

    pub fn dont_care(&self) -> bool {
        matches!(self.kind, SlotKind::Variable { dont_care: true })
    }
}

/// Compiled form of a pattern clause
#[derive(Debug)]
pub struct PatternStructure {
    pub(crate) literals: Vec<PatternLiteral>,
    /// Non-negated, non-special predicate ids (for the fast refutation check)
    pub(crate) predicates: TermSet,
    pub(crate) slots: Vec<Slot>,
    /// Current candidate domain per slot (search-mutable)
    pub(crate) domains: Vec<TermSet>,
    /// Current grounding per slot (search-mutable)
    pub(crate) grounded: Vec<Option<u32>>,
}

impl PatternStructure {
    /// Compile a pattern clause against the engine's term table.
    pub(crate) fn compile(
        clause: &Clause,
        interner: &Interner,
        terms: &mut TermTable,
    ) -> Result<PatternStructure, MatchError> {
        // One variable name must not carry two different type annotations
        let mut var_types: HashMap<u32, Option<u32>> = HashMap::new();
        for term in clause.terms() {
            if let Term::Variable(v) = term {
                let type_id = v.type_id.map(|t| t.as_u32());
                match var_types.get(&v.id.as_u32()) {
                    Some(&prev) if prev != type_id => {
                        return Err(MatchError::Malformed(format!(
                            "variable {} used with conflicting types",
                            interner.resolve_variable(v.id)
                        )));
                    }
                    _ => {
                        var_types.insert(v.id.as_u32(), type_id);
                    }
                }
            }
        }

        let mut slot_ids: IndexSet<Term> = IndexSet::new();
        let mut literals = Vec::with_capacity(clause.len());
        let mut predicate_ids = Vec::new();
        for lit in clause.literals() {
            let kind = lit.kind(interner);
            if let LiteralKind::Special(op) = kind {
                if op.is_binary() && lit.arity() != 2 {
                    return Err(MatchError::Malformed(format!(
                        "{} expects 2 arguments, got {}",
                        lit.predicate.name(interner),
                        lit.arity()
                    )));
                }
            }
            if !lit.negated && !kind.is_special() {
                predicate_ids.push(lit.predicate.id.as_u32());
            }
            let args: Vec<usize> = lit
                .args
                .iter()
                .map(|t| slot_ids.insert_full(*t).0)
                .collect();
            literals.push(PatternLiteral {
                predicate: lit.predicate.id.as_u32(),
                negated: lit.negated,
                kind,
                args,
            });
        }

        let slot_count = slot_ids.len();
        let mut contained_in: Vec<Vec<usize>> = vec![Vec::new(); slot_count];
        let mut occurrences = vec![0u32; slot_count];
        for (lit_idx, lit) in literals.iter().enumerate() {
            for &slot in &lit.args {
                if !contained_in[slot].contains(&lit_idx) {
                    contained_in[slot].push(lit_idx);
                }
            }
        }
        for (slot, term) in slot_ids.iter().enumerate() {
            if term.is_variable() {
                for lit in &literals {
                    occurrences[slot] += lit.args.iter().filter(|&&s| s == slot).count() as u32;
                }
            } else {
                occurrences[slot] = 1;
            }
        }

        let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); slot_count];
        for (slot, nbs) in neighbours.iter_mut().enumerate() {
            let mut set = Vec::new();
            for &lit_idx in &contained_in[slot] {
                for &other in &literals[lit_idx].args {
                    if other != slot && !set.contains(&other) {
                        set.push(other);
                    }
                }
            }
            set.sort_unstable();
            *nbs = set;
        }

        let mut slots = Vec::with_capacity(slot_count);
        let mut grounded = Vec::with_capacity(slot_count);
        for (i, term) in slot_ids.iter().enumerate() {
            let kind = match term {
                Term::Variable(v) => SlotKind::Variable {
                    dont_care: interner.resolve_variable(v.id).starts_with('_'),
                },
                Term::Constant(_) => SlotKind::Constant {
                    term_id: terms.intern(*term, interner),
                },
            };
            grounded.push(match kind {
                SlotKind::Constant { term_id } => Some(term_id),
                SlotKind::Variable { .. } => None,
            });
            slots.push(Slot {
                term: *term,
                kind,
                type_id: term.type_id().map(|t| t.as_u32()),
                contained_in: std::mem::take(&mut contained_in[i]),
                occurrences: occurrences[i],
                neighbours: std::mem::take(&mut neighbours[i]),
            });
        }

        Ok(PatternStructure {
            literals,
            predicates: TermSet::from_values(predicate_ids),
            domains: vec![TermSet::empty(); slot_count],
            grounded,
            slots,
        })
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot terms in slot order, the template row of every enumeration
    pub(crate) fn template(&self) -> Vec<Term> {
        self.slots.iter().map(|s| s.term).collect()
    }

    /// Recompute all domains against a target and ground the constant slots.
    ///
    /// Returns `false` when subsumption is refuted without search: an empty
    /// domain, a missing (predicate, position) candidate set, or a constant
    /// whose literals cannot be matched.
    pub(crate) fn initialize(&mut self, target: &TargetStructure, terms: &TermTable) -> bool {
        for i in 0..self.slots.len() {
            let domain = match self.slots[i].kind {
                SlotKind::Variable { .. } => {
                    match self.variable_domain(i, target) {
                        Some(d) => d,
                        None => return false,
                    }
                }
                SlotKind::Constant { term_id } => {
                    match self.slots[i].type_id {
                        Some(t) if !target.typed_terms(t).contains(term_id) => TermSet::empty(),
                        _ => TermSet::singleton(term_id),
                    }
                }
            };
            if domain.is_empty() {
                return false;
            }
            self.domains[i] = domain;
        }

        for g in self.grounded.iter_mut() {
            *g = None;
        }
        for i in 0..self.slots.len() {
            if let SlotKind::Constant { term_id } = self.slots[i].kind {
                if !self.ground(i, term_id, target, terms) {
                    return false;
                }
            }
        }
        true
    }

    /// Intersection of the target's per-position candidate sets over all
    /// non-negated, non-special occurrences of the slot; negated and special
    /// occurrences contribute the typed/universal term set only when nothing
    /// else constrains the slot.
    fn variable_domain(&self, slot: usize, target: &TargetStructure) -> Option<TermSet> {
        let type_id = self.slots[slot].type_id;
        let mut domain: Option<TermSet> = None;
        for &lit_idx in &self.slots[slot].contained_in {
            let lit = &self.literals[lit_idx];
            let unconstrained = lit.negated || lit.kind.is_special();
            for (j, &arg) in lit.args.iter().enumerate() {
                if arg != slot {
                    continue;
                }
                match &mut domain {
                    None => {
                        let base = if unconstrained {
                            match type_id {
                                None => target.all_terms().clone(),
                                Some(t) => target.typed_terms(t),
                            }
                        } else {
                            let positional = target.position_domain(lit.predicate, j)?;
                            match type_id {
                                None => positional.clone(),
                                Some(t) => {
                                    TermSet::intersection(positional, &target.typed_terms(t))
                                }
                            }
                        };
                        domain = Some(base);
                    }
                    Some(current) => {
                        if !unconstrained {
                            let positional = target.position_domain(lit.predicate, j)?;
                            *current = TermSet::intersection(current, positional);
                        }
                    }
                }
            }
        }
        domain
    }

    /// Bind a slot and re-check every literal mentioning it.
    ///
    /// Returns `false` when some literal is proved unmatchable under the
    /// extended grounding; the caller must `unground` either way.
    pub(crate) fn ground(
        &mut self,
        slot: usize,
        value: u32,
        target: &TargetStructure,
        terms: &TermTable,
    ) -> bool {
        self.grounded[slot] = Some(value);
        for i in 0..self.slots[slot].contained_in.len() {
            let lit_idx = self.slots[slot].contained_in[i];
            if !self.check_literal(lit_idx, target, terms) {
                return false;
            }
        }
        true
    }

    /// `ground` plus one-step lookahead: every unbound neighbour sharing a
    /// multi-occurrence literal must still have some workable value.
    pub(crate) fn ground_fc(
        &mut self,
        slot: usize,
        value: u32,
        target: &TargetStructure,
        terms: &TermTable,
    ) -> bool {
        if !self.ground(slot, value, target, terms) {
            return false;
        }
        'neighbours: for i in 0..self.slots[slot].neighbours.len() {
            let nb = self.slots[slot].neighbours[i];
            if self.grounded[nb].is_some() || self.slots[nb].contained_in.len() <= 1 {
                continue;
            }
            let domain = self.domains[nb].clone();
            for v in domain.iter() {
                let ok = self.ground(nb, v, target, terms);
                self.unground(nb);
                if ok {
                    continue 'neighbours;
                }
            }
            return false;
        }
        true
    }

    /// Clear a slot's grounding (no-op for constant slots)
    pub(crate) fn unground(&mut self, slot: usize) {
        if self.slots[slot].is_variable() {
            self.grounded[slot] = None;
        }
    }

    /// Clear every variable slot's grounding
    pub(crate) fn unground_all(&mut self) {
        for slot in 0..self.slots.len() {
            self.unground(slot);
        }
    }

    /// Snapshot the current domains (O(slots) handle copies)
    pub(crate) fn save_domains(&self) -> Vec<TermSet> {
        self.domains.clone()
    }

    /// Replace the live domains with a snapshot
    pub(crate) fn restore_domains(&mut self, saved: Vec<TermSet>) {
        self.domains = saved;
    }

    /// Check one literal of the pattern under the current grounding
    fn check_literal(&self, lit_idx: usize, target: &TargetStructure, terms: &TermTable) -> bool {
        let lit = &self.literals[lit_idx];
        let bound: Vec<Option<u32>> = lit.args.iter().map(|&s| self.grounded[s]).collect();
        target.check_literal(lit.predicate, lit.kind, lit.negated, &bound, terms)
    }

    /// AC-3 revise: the subset of `domain1` values for `var1` that can be
    /// extended by some `domain2` value for `var2` so the literal holds.
    pub(crate) fn revise(
        &mut self,
        domain1: &[u32],
        var1: usize,
        domain2: &[u32],
        var2: usize,
        lit_idx: usize,
        target: &TargetStructure,
        terms: &TermTable,
    ) -> Vec<u32> {
        match (self.grounded[var1], self.grounded[var2]) {
            (Some(v), _) => vec![v],
            (None, None) => {
                let mut filtered = Vec::new();
                for &d1 in domain1 {
                    self.grounded[var1] = Some(d1);
                    for &d2 in domain2 {
                        self.grounded[var2] = Some(d2);
                        let ok = self.check_literal(lit_idx, target, terms);
                        self.unground(var2);
                        if ok {
                            filtered.push(d1);
                            break;
                        }
                    }
                    self.unground(var1);
                }
                filtered
            }
            (None, Some(_)) => {
                let mut filtered = Vec::new();
                for &d1 in domain1 {
                    self.grounded[var1] = Some(d1);
                    if self.check_literal(lit_idx, target, terms) {
                        filtered.push(d1);
                    }
                    self.unground(var1);
                }
                filtered
            }
        }
    }
}
