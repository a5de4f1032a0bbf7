//! Batch-matching orchestrator
//!
//! `Matching` wraps a [`SubsumptionEngine`] to evaluate one pattern clause
//! against a cached batch of compiled targets. It decomposes patterns into
//! connected components (every component must be proved; one refuted
//! component refutes the whole pattern), reuses learned variable orders
//! across examples, and A/B-tests the arc-consistency activation threshold
//! on random halves of each batch, keeping whichever adjustment made the
//! faster half.
//!
//! On top of the decision/enumeration calls it provides the derived
//! operations callers need: theta-reduction, isomorphism testing,
//! non-isomorphic filtering, and true-grounding enumeration.

use crate::config::{EngineConfig, RestartSequence, SubsumptionMode};
use crate::error::MatchError;
use crate::logic::{Clause, Interner, Literal, PredicateSymbol, Term};
use crate::subsumption::engine::{Outcome, SubsumptionEngine, Substitutions};
use crate::subsumption::pattern::PatternStructure;
use crate::subsumption::rng::Lcg;
use crate::subsumption::target::TargetStructure;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Per-example coverage verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Yes,
    No,
    Undecided,
}

/// Counters collected across coverage evaluations
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationStats {
    /// Pattern-against-example decisions issued
    pub decisions: usize,
    pub proved: usize,
    pub refuted: usize,
    pub undecided: usize,
    /// Decisions that needed backtracking search
    pub searched: usize,
    /// Wall-clock spent inside the engine
    #[serde(serialize_with = "serialize_secs")]
    pub search_time: Duration,
    /// Current (possibly adapted) arc-consistency activation restart
    pub arc_consistency_from: u32,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl EvaluationStats {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Matching orchestrator over a batch of precompiled examples
pub struct Matching {
    engine: SubsumptionEngine,
    targets: Vec<TargetStructure>,
    adapt_propagation_strength: bool,
    learn_variable_ordering: bool,
    rng: Lcg,
    stats: EvaluationStats,
}

impl Default for Matching {
    fn default() -> Self {
        Matching::new()
    }
}

impl Matching {
    pub fn new() -> Self {
        let mut engine = SubsumptionEngine::new(EngineConfig::default());
        engine.set_restart_sequence(RestartSequence::Exponential {
            scale: 50,
            base: 2,
            offset: 500,
        });
        Matching {
            engine,
            targets: Vec::new(),
            adapt_propagation_strength: false,
            learn_variable_ordering: true,
            rng: Lcg::new(12345),
            stats: EvaluationStats::default(),
        }
    }

    /// Create an orchestrator and precompile the given examples
    pub fn with_examples(examples: &[Clause], interner: &Interner) -> Result<Self, MatchError> {
        let mut matching = Matching::new();
        for example in examples {
            matching.add_example(example, interner)?;
        }
        Ok(matching)
    }

    /// Compile and cache one example; returns its index
    pub fn add_example(
        &mut self,
        example: &Clause,
        interner: &Interner,
    ) -> Result<usize, MatchError> {
        let compiled = self.engine.compile_target(example, interner)?;
        self.targets.push(compiled);
        Ok(self.targets.len() - 1)
    }

    pub fn example_count(&self) -> usize {
        self.targets.len()
    }

    pub fn engine(&self) -> &SubsumptionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SubsumptionEngine {
        &mut self.engine
    }

    pub fn stats(&self) -> &EvaluationStats {
        &self.stats
    }

    pub fn set_subsumption_mode(&mut self, mode: SubsumptionMode) {
        self.engine.set_subsumption_mode(mode);
    }

    pub fn set_restart_sequence(&mut self, sequence: RestartSequence) {
        self.engine.set_restart_sequence(sequence);
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.engine.set_timeout(timeout);
    }

    pub fn set_forward_checking_from(&mut self, restart: u32) {
        self.engine.set_forward_checking_from(restart);
    }

    pub fn set_arc_consistency_from(&mut self, restart: u32) {
        self.engine.set_arc_consistency_from(restart);
    }

    pub fn set_adapt_propagation_strength(&mut self, adapt: bool) {
        self.adapt_propagation_strength = adapt;
    }

    pub fn set_learn_variable_ordering(&mut self, learn: bool) {
        self.learn_variable_ordering = learn;
        self.engine.set_learn_variable_order(learn);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Lcg::new(seed);
        self.engine.set_seed(seed.wrapping_add(1));
    }

    /// Decide subsumption between two clauses.
    ///
    /// The pattern is decomposed into connected components: one refuted
    /// component refutes the whole pattern, any undecided component leaves
    /// the pattern undecided, and the pattern is proved only when every
    /// component is.
    pub fn subsumption(
        &mut self,
        pattern: &Clause,
        target: &Clause,
        interner: &Interner,
    ) -> Result<Outcome, MatchError> {
        let compiled_target = self.engine.compile_target(target, interner)?;
        let mut saw_undecided = false;
        for component in pattern.connected_components() {
            let mut compiled = self.engine.compile_pattern(&component, interner)?;
            match self.engine.decide(&mut compiled, &compiled_target) {
                Outcome::Refuted => return Ok(Outcome::Refuted),
                Outcome::Undecided => saw_undecided = true,
                Outcome::Proved => {}
            }
        }
        if saw_undecided {
            Ok(Outcome::Undecided)
        } else {
            Ok(Outcome::Proved)
        }
    }

    /// Decide subsumption against a cached example
    pub fn subsumption_against(
        &mut self,
        pattern: &Clause,
        example: usize,
        interner: &Interner,
    ) -> Result<Outcome, MatchError> {
        let mut saw_undecided = false;
        for component in pattern.connected_components() {
            let mut compiled = self.engine.compile_pattern(&component, interner)?;
            let target = &self.targets[example];
            match self.engine.decide(&mut compiled, target) {
                Outcome::Refuted => return Ok(Outcome::Refuted),
                Outcome::Undecided => saw_undecided = true,
                Outcome::Proved => {}
            }
        }
        if saw_undecided {
            Ok(Outcome::Undecided)
        } else {
            Ok(Outcome::Proved)
        }
    }

    /// Evaluate one hypothesis against every cached example.
    ///
    /// `mask[i] = false` skips example `i` (its verdict stays `Undecided`),
    /// useful for specialization/generalization search loops where some
    /// verdicts are already implied by a previous hypothesis.
    pub fn evaluate_on_examples(
        &mut self,
        hypothesis: &Clause,
        mask: &[bool],
        interner: &Interner,
    ) -> Result<Vec<Coverage>, MatchError> {
        assert_eq!(mask.len(), self.targets.len(), "mask length");
        let components = hypothesis.connected_components();
        let mut active = mask.to_vec();
        let mut refuted = vec![false; mask.len()];
        let mut undecided = vec![false; mask.len()];

        if components.is_empty() {
            // The empty pattern subsumes everything in the mask
            return Ok(mask
                .iter()
                .map(|&m| if m { Coverage::Yes } else { Coverage::Undecided })
                .collect());
        }

        for component in &components {
            let outcomes = self.evaluate_component(component, &active, interner)?;
            for (i, outcome) in outcomes.iter().enumerate() {
                match outcome {
                    Some(Outcome::Refuted) => {
                        refuted[i] = true;
                        // No later component can change a refutation
                        active[i] = false;
                    }
                    Some(Outcome::Undecided) => undecided[i] = true,
                    Some(Outcome::Proved) | None => {}
                }
            }
        }

        Ok((0..mask.len())
            .map(|i| {
                if !mask[i] {
                    Coverage::Undecided
                } else if refuted[i] {
                    Coverage::No
                } else if undecided[i] {
                    Coverage::Undecided
                } else {
                    Coverage::Yes
                }
            })
            .collect())
    }

    /// Evaluate one connected component against the active examples,
    /// A/B-testing an arc-consistency threshold shift on a random half.
    fn evaluate_component(
        &mut self,
        component: &Clause,
        active: &[bool],
        interner: &Interner,
    ) -> Result<Vec<Option<Outcome>>, MatchError> {
        let mut pattern = self.engine.compile_pattern(component, interner)?;
        let mut outcomes: Vec<Option<Outcome>> = vec![None; active.len()];

        self.engine.set_first_variable_order(None);
        let shift_up = self.rng.next_bool();
        let in_first_half = self.rng.bool_vector(active.len());
        let baseline = self.engine.arc_consistency_from();
        let mut searched = 0usize;
        let mut max_restart = 0u32;

        // First half runs with the threshold nudged in the trial direction
        if self.adapt_propagation_strength {
            let shifted = if shift_up {
                baseline + 1
            } else {
                baseline.saturating_sub(1).max(1)
            };
            self.engine.set_arc_consistency_from(shifted);
        }
        let first_start = Instant::now();
        let mut first_count = 0usize;
        for i in 0..active.len() {
            if active[i] && in_first_half[i] {
                first_count += 1;
                outcomes[i] =
                    Some(self.decide_one(&mut pattern, i, &mut searched, &mut max_restart));
            }
        }
        let first_time = first_start.elapsed();

        // Second half runs at the baseline
        if self.adapt_propagation_strength {
            self.engine.set_arc_consistency_from(baseline);
        }
        let second_start = Instant::now();
        let mut second_count = 0usize;
        for i in 0..active.len() {
            if active[i] && !in_first_half[i] {
                second_count += 1;
                outcomes[i] =
                    Some(self.decide_one(&mut pattern, i, &mut searched, &mut max_restart));
            }
        }
        let second_time = second_start.elapsed();

        // Keep the shift when its half was faster per example
        if self.adapt_propagation_strength && first_count > 0 && second_count > 0 {
            let t1 = first_time.as_secs_f64() / first_count as f64;
            let t2 = second_time.as_secs_f64() / second_count as f64;
            if t1 < t2 {
                let current = self.engine.arc_consistency_from();
                if shift_up {
                    if max_restart > current && current > 1 {
                        self.engine.set_arc_consistency_from(current + 1);
                    }
                } else {
                    self.engine.set_arc_consistency_from(current.saturating_sub(1).max(1));
                }
            }
        }

        self.stats.searched += searched;
        self.stats.search_time += first_time + second_time;
        self.stats.arc_consistency_from = self.engine.arc_consistency_from();
        Ok(outcomes)
    }

    /// One engine decision against a cached example, with order learning
    fn decide_one(
        &mut self,
        pattern: &mut PatternStructure,
        example: usize,
        searched: &mut usize,
        max_restart: &mut u32,
    ) -> Outcome {
        if *searched > 0 && self.learn_variable_ordering {
            let last = self.engine.last_variable_order().map(|o| o.to_vec());
            self.engine.set_first_variable_order(last);
        }
        let target = &self.targets[example];
        let outcome = self.engine.decide(pattern, target);
        *max_restart = (*max_restart).max(self.engine.last_restart_count());
        if !self.engine.solved_without_search() {
            *searched += 1;
        }
        self.stats.decisions += 1;
        match outcome {
            Outcome::Proved => self.stats.proved += 1,
            Outcome::Refuted => self.stats.refuted += 1,
            Outcome::Undecided => self.stats.undecided += 1,
        }
        outcome
    }

    /// All (or at most `max_count`) substitutions under which `pattern`
    /// subsumes `target`
    pub fn all_substitutions(
        &mut self,
        pattern: &Clause,
        target: &Clause,
        max_count: usize,
        interner: &Interner,
    ) -> Result<Substitutions, MatchError> {
        let compiled_target = self.engine.compile_target(target, interner)?;
        let mut compiled = self.engine.compile_pattern(pattern, interner)?;
        Ok(self
            .engine
            .enumerate(&mut compiled, &compiled_target, max_count))
    }

    /// As [`all_substitutions`](Self::all_substitutions), against a cached example
    pub fn all_substitutions_against(
        &mut self,
        pattern: &Clause,
        example: usize,
        max_count: usize,
        interner: &Interner,
    ) -> Result<Substitutions, MatchError> {
        let mut compiled = self.engine.compile_pattern(pattern, interner)?;
        let target = &self.targets[example];
        Ok(self.engine.enumerate(&mut compiled, target, max_count))
    }

    /// Groundings of the clause's variables under which the clause, read as
    /// a disjunction, is true in the example: all assignments minus those
    /// satisfying the sign-flipped clause.
    pub fn all_true_groundings(
        &mut self,
        clause: &Clause,
        example: usize,
        interner: &mut Interner,
    ) -> Result<Substitutions, MatchError> {
        // A negated dummy literal per variable enumerates the full
        // assignment space without constraining it
        let dummy = PredicateSymbol::new(interner.intern_predicate("$grounding"), 1);
        let aux = Clause::new(
            clause
                .variables()
                .iter()
                .map(|v| Literal::negative(dummy, vec![Term::Variable(*v)]))
                .collect(),
        );
        let all = self.all_substitutions_against(&aux, example, usize::MAX, interner)?;

        let flipped = Clause::new(
            clause
                .literals()
                .iter()
                .map(|lit| lit.negation())
                .collect(),
        );
        let falsifying =
            self.all_substitutions_against(&flipped, example, usize::MAX, interner)?;

        // Project the falsifying assignments onto the aux template order;
        // every clause variable occurs in the flipped clause's template
        let projection: Option<Vec<usize>> = all
            .template
            .iter()
            .map(|t| falsifying.template.iter().position(|u| u == t))
            .collect();
        let falsified: HashSet<Vec<Term>> = match projection {
            Some(projection) => falsifying
                .groundings
                .iter()
                .map(|g| projection.iter().map(|&i| g[i]).collect())
                .collect(),
            None => HashSet::new(),
        };

        let groundings = all
            .groundings
            .into_iter()
            .filter(|g| !falsified.contains(g))
            .collect();
        Ok(Substitutions {
            template: all.template,
            groundings,
        })
    }

    /// Iteratively drop literals entailed by the rest of the clause until no
    /// literal is removable (theta-reduction).
    pub fn theta_reduction(
        &mut self,
        clause: &Clause,
        interner: &Interner,
    ) -> Result<Clause, MatchError> {
        let mut current = clause.clone();
        'fixpoint: loop {
            if current.len() <= 1 {
                return Ok(current);
            }
            for lit in current.literals().to_vec() {
                let rest = current.without(&lit);
                let subs = self.all_substitutions(&current, &rest, 1, interner)?;
                if let Some(grounding) = subs.groundings.first() {
                    current = current.substitute(&subs.template, grounding);
                    continue 'fixpoint;
                }
            }
            return Ok(current);
        }
    }

    /// Isomorphism test: equal literal and variable counts, equal predicate
    /// sets, and mutual OI-subsumption after renaming predicates into a
    /// polarity-prefixed positive form (so positive and negative literals
    /// can never match each other).
    pub fn isomorphic(
        &mut self,
        a: &Clause,
        b: &Clause,
        interner: &mut Interner,
    ) -> Result<bool, MatchError> {
        if a.variables().len() != b.variables().len()
            || a.len() != b.len()
            || a.predicates() != b.predicates()
        {
            return Ok(false);
        }

        let a = rename_for_isomorphism(a, interner);
        let b = rename_for_isomorphism(b, interner);

        let mut inner = self.spawn_oi_matching();
        let forward = inner.subsumption(&a, &b, interner)?;
        if forward != Outcome::Proved {
            return Ok(false);
        }
        let backward = inner.subsumption(&b, &a, interner)?;
        Ok(backward == Outcome::Proved)
    }

    /// Drop clauses isomorphic to an earlier clause of the collection.
    ///
    /// Clauses are bucketed by (literal count, variable count) first; only
    /// clauses within a bucket are pairwise tested.
    pub fn nonisomorphic(
        &mut self,
        clauses: Vec<Clause>,
        interner: &mut Interner,
    ) -> Result<Vec<Clause>, MatchError> {
        let mut buckets: IndexMap<(usize, usize), Vec<Clause>> = IndexMap::new();
        for clause in clauses {
            let key = (clause.len(), clause.variables().len());
            buckets.entry(key).or_default().push(clause);
        }
        let mut kept = Vec::new();
        for (_, bucket) in buckets {
            let mut filtered_out = vec![false; bucket.len()];
            for i in 0..bucket.len() {
                if filtered_out[i] {
                    continue;
                }
                for j in (i + 1)..bucket.len() {
                    if !filtered_out[j] && self.isomorphic(&bucket[i], &bucket[j], interner)? {
                        filtered_out[j] = true;
                    }
                }
            }
            for (clause, dropped) in bucket.into_iter().zip(filtered_out) {
                if !dropped {
                    kept.push(clause);
                }
            }
        }
        Ok(kept)
    }

    /// A fresh orchestrator in OI mode carrying over this one's tuning
    fn spawn_oi_matching(&self) -> Matching {
        let mut inner = Matching::new();
        inner.set_subsumption_mode(SubsumptionMode::ObjectIdentity);
        inner.set_adapt_propagation_strength(self.adapt_propagation_strength);
        inner.set_forward_checking_from(self.engine.forward_checking_from());
        inner.set_arc_consistency_from(self.engine.arc_consistency_from());
        inner.set_learn_variable_ordering(self.learn_variable_ordering);
        inner.set_restart_sequence(self.engine.config().restart_sequence);
        inner.set_timeout(self.engine.config().timeout);
        inner
    }
}

/// Fold polarity into the predicate name and make every literal positive:
/// `p(..)` becomes `~p(..)`, `!p(..)` becomes `~!p(..)`.
fn rename_for_isomorphism(clause: &Clause, interner: &mut Interner) -> Clause {
    Clause::new(
        clause
            .literals()
            .iter()
            .map(|lit| {
                let name = interner.resolve_predicate(lit.predicate.id).to_string();
                let renamed = if lit.negated {
                    format!("~!{}", name)
                } else {
                    format!("~{}", name)
                };
                let predicate =
                    PredicateSymbol::new(interner.intern_predicate(&renamed), lit.predicate.arity);
                Literal::positive(predicate, lit.args.clone())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_clause;

    fn clause(text: &str, interner: &mut Interner) -> Clause {
        parse_clause(text, interner).unwrap()
    }

    #[test]
    fn component_wise_subsumption() {
        let mut interner = Interner::new();
        let mut m = Matching::new();
        let c = clause("p(X), q(Y)", &mut interner);
        let e1 = clause("p(a), q(b)", &mut interner);
        let e2 = clause("p(a)", &mut interner);
        assert_eq!(m.subsumption(&c, &e1, &interner).unwrap(), Outcome::Proved);
        // The q-component is refuted
        assert_eq!(m.subsumption(&c, &e2, &interner).unwrap(), Outcome::Refuted);
    }

    #[test]
    fn coverage_evaluation_tracks_verdicts() {
        let mut interner = Interner::new();
        let examples = vec![
            clause("p(a), q(a, b)", &mut interner),
            clause("p(a), q(c, d)", &mut interner),
            clause("r(a)", &mut interner),
        ];
        let mut m = Matching::with_examples(&examples, &interner).unwrap();
        let hypothesis = clause("p(X), q(X, Y)", &mut interner);
        let coverage = m
            .evaluate_on_examples(&hypothesis, &[true, true, true], &interner)
            .unwrap();
        assert_eq!(coverage, vec![Coverage::Yes, Coverage::No, Coverage::No]);
        assert_eq!(m.stats().decisions, 3);
        // Masked-out examples stay undecided
        let masked = m
            .evaluate_on_examples(&hypothesis, &[true, false, false], &interner)
            .unwrap();
        assert_eq!(
            masked,
            vec![Coverage::Yes, Coverage::Undecided, Coverage::Undecided]
        );
    }

    #[test]
    fn adaptation_never_changes_verdicts() {
        let mut interner = Interner::new();
        let examples: Vec<Clause> = (0..8)
            .map(|i| {
                let text = if i % 2 == 0 {
                    "e(a, b), e(b, c), p(a)".to_string()
                } else {
                    "e(a, b), e(b, a)".to_string()
                };
                clause(&text, &mut interner)
            })
            .collect();
        let hypothesis = clause("e(X, Y), e(Y, Z), p(X)", &mut interner);

        let mut plain = Matching::with_examples(&examples, &interner).unwrap();
        let baseline = plain
            .evaluate_on_examples(&hypothesis, &[true; 8], &interner)
            .unwrap();

        let mut adaptive = Matching::with_examples(&examples, &interner).unwrap();
        adaptive.set_adapt_propagation_strength(true);
        for _ in 0..4 {
            let adapted = adaptive
                .evaluate_on_examples(&hypothesis, &[true; 8], &interner)
                .unwrap();
            assert_eq!(adapted, baseline);
        }
    }

    #[test]
    fn theta_reduction_collapses_entailed_literals() {
        let mut interner = Interner::new();
        let mut m = Matching::new();
        // Duplicate literals already collapse at parse; reduction removes
        // the entailed generalization p(Y) as well
        let c = clause("p(X), p(Y), q(X)", &mut interner);
        let reduced = m.theta_reduction(&c, &interner).unwrap();
        assert_eq!(reduced.len(), 2);
        let printed = format!("{}", reduced.display(&interner));
        assert!(printed.contains("p("));
        assert!(printed.contains("q("));

        let irreducible = clause("p(X), q(X)", &mut interner);
        let same = m.theta_reduction(&irreducible, &interner).unwrap();
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn duplicate_literal_reduction_scenario() {
        let mut interner = Interner::new();
        let mut m = Matching::new();
        // p(X), p(X), q(X): the duplicate is gone and nothing else reduces
        let c = clause("p(X), p(X), q(X)", &mut interner);
        let reduced = m.theta_reduction(&c, &interner).unwrap();
        assert_eq!(reduced.len(), 2);
    }

    #[test]
    fn isomorphism_detects_renamings() {
        let mut interner = Interner::new();
        let mut m = Matching::new();
        let a = clause("e(X, Y), e(Y, Z)", &mut interner);
        let b = clause("e(U, V), e(V, W)", &mut interner);
        let c = clause("e(X, Y), e(Z, Y)", &mut interner);
        assert!(m.isomorphic(&a, &b, &mut interner).unwrap());
        assert!(!m.isomorphic(&a, &c, &mut interner).unwrap());
    }

    #[test]
    fn isomorphism_respects_polarity() {
        let mut interner = Interner::new();
        let mut m = Matching::new();
        let pos = clause("p(X), q(X)", &mut interner);
        let neg = clause("p(X), !q(X)", &mut interner);
        assert!(!m.isomorphic(&pos, &neg, &mut interner).unwrap());
        let neg2 = clause("p(Y), !q(Y)", &mut interner);
        assert!(m.isomorphic(&neg, &neg2, &mut interner).unwrap());
    }

    #[test]
    fn nonisomorphic_filters_within_buckets() {
        let mut interner = Interner::new();
        let mut m = Matching::new();
        let clauses = vec![
            clause("e(X, Y), e(Y, Z)", &mut interner),
            clause("e(U, V), e(V, W)", &mut interner), // isomorphic to the first
            clause("e(X, Y), e(Y, X)", &mut interner), // different shape
            clause("p(X)", &mut interner),             // different bucket
        ];
        let kept = m.nonisomorphic(clauses, &mut interner).unwrap();
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn true_groundings_of_unit_clause() {
        let mut interner = Interner::new();
        let example = clause("p(a), p(b), q(c)", &mut interner);
        let mut m = Matching::with_examples(&[example], &interner).unwrap();
        let c = clause("p(X)", &mut interner);
        let result = m.all_true_groundings(&c, 0, &mut interner).unwrap();
        let mut names: Vec<&str> = result
            .groundings
            .iter()
            .map(|g| g[0].name(&interner))
            .collect();
        names.sort();
        // p(X) holds exactly for X in {a, b}
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn stats_serialize() {
        let mut interner = Interner::new();
        let examples = vec![clause("p(a)", &mut interner)];
        let mut m = Matching::with_examples(&examples, &interner).unwrap();
        let hypothesis = clause("p(X)", &mut interner);
        m.evaluate_on_examples(&hypothesis, &[true], &interner)
            .unwrap();
        let json = m.stats().to_json();
        assert_eq!(json["decisions"], 1);
        assert_eq!(json["proved"], 1);
    }
}
