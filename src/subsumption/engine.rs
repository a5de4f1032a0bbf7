//! Randomized restart-based subsumption search
//!
//! The engine decides whether a compiled pattern subsumes a compiled target
//! by depth-first assignment of target terms to pattern slots, with forward
//! checking, optional arc-consistency preprocessing, and a restart loop with
//! escalating node budgets. Each restart re-randomizes the variable and
//! value orders; when neither a solution nor an exhausted search tree is
//! reached within the budget, the decision is [`Outcome::Undecided`], a
//! first-class result, not an error.
//!
//! One engine owns the term-id space shared by every pattern and target it
//! compiles; structures are only meaningful together with their engine.

use crate::config::{EngineConfig, RestartSequence, SubsumptionMode};
use crate::error::MatchError;
use crate::logic::{Clause, Interner, Term};
use crate::subsumption::domain::TermSet;
use crate::subsumption::pattern::PatternStructure;
use crate::subsumption::rng::Lcg;
use crate::subsumption::target::TargetStructure;
use crate::subsumption::term_table::TermTable;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Result of a subsumption decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A substitution mapping the pattern into the target exists
    Proved,
    /// No such substitution exists
    Refuted,
    /// Neither proved nor refuted within the configured budget
    Undecided,
}

impl Outcome {
    pub fn is_proved(self) -> bool {
        self == Outcome::Proved
    }
}

/// Result of one bounded search attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStatus {
    /// All slots assigned consistently
    Solved,
    /// The whole tree of this restart was explored without a solution
    Exhausted,
    /// Node budget or deadline hit; the attempt is inconclusive
    Cutoff,
}

/// Enumerated solutions of a subsumption problem.
///
/// `template[i]` is the pattern term of slot `i`; each grounding assigns a
/// target term to every slot, aligned with the template.
#[derive(Debug, Clone)]
pub struct Substitutions {
    pub template: Vec<Term>,
    pub groundings: Vec<Vec<Term>>,
}

impl Substitutions {
    pub fn is_empty(&self) -> bool {
        self.groundings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groundings.len()
    }
}

/// The subsumption engine: compiled-structure factory plus search state
#[derive(Debug)]
pub struct SubsumptionEngine {
    config: EngineConfig,
    rng: Lcg,
    terms: TermTable,
    // Per-call search state
    explored_nodes: u64,
    current_cutoff: u64,
    forced_variable: Option<usize>,
    first_variable_order: Option<Vec<usize>>,
    last_variable_order: Option<Vec<usize>>,
    solved_without_search: bool,
    last_restart_count: u32,
}

impl SubsumptionEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = Lcg::new(config.seed);
        SubsumptionEngine {
            config,
            rng,
            terms: TermTable::new(),
            explored_nodes: 0,
            current_cutoff: u64::MAX,
            forced_variable: None,
            first_variable_order: None,
            last_variable_order: None,
            solved_without_search: false,
            last_restart_count: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_subsumption_mode(&mut self, mode: SubsumptionMode) {
        self.config.subsumption_mode = mode;
    }

    pub fn set_restart_sequence(&mut self, sequence: RestartSequence) {
        self.config.restart_sequence = sequence;
    }

    pub fn set_timeout(&mut self, timeout: Option<std::time::Duration>) {
        self.config.timeout = timeout;
    }

    pub fn set_max_restarts(&mut self, max_restarts: u32) {
        self.config.max_restarts = max_restarts;
    }

    pub fn forward_checking_from(&self) -> u32 {
        self.config.forward_checking_from
    }

    pub fn set_forward_checking_from(&mut self, restart: u32) {
        self.config.forward_checking_from = restart;
    }

    pub fn arc_consistency_from(&self) -> u32 {
        self.config.arc_consistency_from
    }

    pub fn set_arc_consistency_from(&mut self, restart: u32) {
        self.config.arc_consistency_from = restart.max(1);
    }

    pub fn set_learn_variable_order(&mut self, learn: bool) {
        self.config.learn_variable_order = learn;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Lcg::new(seed);
    }

    /// Whether the last decision finished without entering backtracking search
    pub fn solved_without_search(&self) -> bool {
        self.solved_without_search
    }

    /// Number of restarts the last decision used
    pub fn last_restart_count(&self) -> u32 {
        self.last_restart_count
    }

    /// The variable order used by the most recent search
    pub fn last_variable_order(&self) -> Option<&[usize]> {
        self.last_variable_order.as_deref()
    }

    /// Install an initial variable order for the next search (in place of the
    /// ordering heuristic). Ignored when it does not fit the next pattern.
    pub fn set_first_variable_order(&mut self, order: Option<Vec<usize>>) {
        self.first_variable_order = order;
    }

    /// Compile a pattern clause
    pub fn compile_pattern(
        &mut self,
        clause: &Clause,
        interner: &Interner,
    ) -> Result<PatternStructure, MatchError> {
        PatternStructure::compile(clause, interner, &mut self.terms)
    }

    /// Compile a target clause
    pub fn compile_target(
        &mut self,
        clause: &Clause,
        interner: &Interner,
    ) -> Result<TargetStructure, MatchError> {
        TargetStructure::compile(clause, interner, &mut self.terms, self.config.low_arity)
    }

    /// Decide whether the pattern subsumes the target under the configured
    /// mode and budgets.
    pub fn decide(
        &mut self,
        pattern: &mut PatternStructure,
        target: &TargetStructure,
    ) -> Outcome {
        self.last_restart_count = 0;
        self.solved_without_search = true;

        // Fast refutation: a predicate used positively in the pattern but
        // absent from the target
        if !pattern.predicates.is_subset_of(target.predicates()) {
            return Outcome::Refuted;
        }
        if !pattern.initialize(target, &self.terms) {
            return Outcome::Refuted;
        }
        if pattern.literals.is_empty() {
            return Outcome::Proved;
        }

        self.solved_without_search = false;
        let deadline = self.config.timeout.map(|t| Instant::now() + t);
        let mut ac_baseline: Option<Vec<TermSet>> = None;
        let mut restart: u32 = 1;
        loop {
            self.explored_nodes = 0;
            self.current_cutoff = self
                .config
                .restart_sequence
                .cutoff(restart)
                .saturating_add(2 * pattern.slot_count() as u64);

            let order = if restart % 2 == 0 && self.forced_variable.is_some() {
                let forced = self.forced_variable;
                self.variable_order(pattern, target, forced, true)
            } else {
                self.variable_order(pattern, target, None, true)
            };

            pattern.unground_all();
            if let Some(base) = &ac_baseline {
                pattern.restore_domains(base.clone());
            }
            if ac_baseline.is_none() && restart >= self.config.arc_consistency_from {
                if !self.arc_consistency(pattern, target) {
                    self.last_restart_count = restart;
                    return Outcome::Refuted;
                }
                ac_baseline = Some(pattern.save_domains());
            }

            let mut oi_used = HashSet::new();
            let status =
                self.solve(pattern, target, 0, &order, restart, &mut oi_used, deadline);
            self.last_restart_count = restart;
            match status {
                SearchStatus::Solved => return Outcome::Proved,
                SearchStatus::Exhausted => return Outcome::Refuted,
                SearchStatus::Cutoff => {}
            }

            restart += 1;
            let out_of_time = deadline.is_some_and(|d| Instant::now() >= d);
            if restart > self.config.max_restarts || out_of_time {
                self.first_variable_order = None;
                return Outcome::Undecided;
            }
        }
    }

    /// Enumerate substitutions proving subsumption, up to `max_count`.
    ///
    /// Unlike [`decide`](Self::decide) this is a complete traversal: no
    /// restarts, no node budget, natural value order.
    pub fn enumerate(
        &mut self,
        pattern: &mut PatternStructure,
        target: &TargetStructure,
        max_count: usize,
    ) -> Substitutions {
        let template = pattern.template();
        if max_count == 0 {
            return Substitutions {
                template,
                groundings: Vec::new(),
            };
        }
        if !pattern.predicates.is_subset_of(target.predicates())
            || !pattern.initialize(target, &self.terms)
        {
            self.solved_without_search = true;
            return Substitutions {
                template,
                groundings: Vec::new(),
            };
        }
        self.solved_without_search = false;
        if pattern.slot_count() == 0 {
            return Substitutions {
                template,
                groundings: vec![Vec::new()],
            };
        }
        let order = self.variable_order(pattern, target, None, false);
        let mut solutions = Vec::new();
        let mut oi_used = HashSet::new();
        self.solve_all(
            pattern,
            target,
            0,
            &order,
            &mut oi_used,
            &mut solutions,
            max_count,
        );
        Substitutions {
            template,
            groundings: solutions,
        }
    }

    /// One bounded depth-first attempt
    #[allow(clippy::too_many_arguments)]
    fn solve(
        &mut self,
        pattern: &mut PatternStructure,
        target: &TargetStructure,
        var_index: usize,
        order: &[usize],
        restart: u32,
        oi_used: &mut HashSet<u32>,
        deadline: Option<Instant>,
    ) -> SearchStatus {
        if var_index == order.len() {
            return SearchStatus::Solved;
        }
        self.explored_nodes += 1;
        if self.explored_nodes >= self.current_cutoff {
            return SearchStatus::Cutoff;
        }
        // The wall clock is only consulted every 100th node
        if self.explored_nodes % 100 == 0 && deadline.is_some_and(|d| Instant::now() >= d) {
            return SearchStatus::Cutoff;
        }

        let slot = order[var_index];
        let enforce_oi = self.enforce_oi(pattern, slot);
        let values = self.value_order(pattern, slot, restart);
        for v in values {
            if enforce_oi && oi_used.contains(&v) {
                continue;
            }
            let saved = pattern.save_domains();
            let ok = if restart < self.config.forward_checking_from {
                pattern.ground(slot, v, target, &self.terms)
            } else {
                pattern.ground_fc(slot, v, target, &self.terms)
            };
            if ok {
                if enforce_oi {
                    oi_used.insert(v);
                }
                let status = self.solve(
                    pattern,
                    target,
                    var_index + 1,
                    order,
                    restart,
                    oi_used,
                    deadline,
                );
                match status {
                    SearchStatus::Solved | SearchStatus::Cutoff => return status,
                    SearchStatus::Exhausted => {}
                }
                if enforce_oi {
                    oi_used.remove(&v);
                }
            } else {
                // Remember the conflict variable: every other restart starts here
                self.forced_variable = Some(slot);
            }
            pattern.unground(slot);
            pattern.restore_domains(saved);
        }
        SearchStatus::Exhausted
    }

    /// Complete enumeration; returns `true` once `max_count` is reached
    #[allow(clippy::too_many_arguments)]
    fn solve_all(
        &mut self,
        pattern: &mut PatternStructure,
        target: &TargetStructure,
        var_index: usize,
        order: &[usize],
        oi_used: &mut HashSet<u32>,
        solutions: &mut Vec<Vec<Term>>,
        max_count: usize,
    ) -> bool {
        if var_index == order.len() {
            let solution = (0..pattern.slot_count())
                .map(|i| {
                    let id = pattern.grounded[i].expect("complete grounding at leaf");
                    self.terms.resolve(id)
                })
                .collect();
            solutions.push(solution);
            return solutions.len() >= max_count;
        }

        let slot = order[var_index];
        let enforce_oi = self.enforce_oi(pattern, slot);
        let values = self.value_order(pattern, slot, 1);
        for v in values {
            if enforce_oi && oi_used.contains(&v) {
                continue;
            }
            let saved = pattern.save_domains();
            if pattern.ground_fc(slot, v, target, &self.terms) {
                if enforce_oi {
                    oi_used.insert(v);
                }
                let stop = self.solve_all(
                    pattern,
                    target,
                    var_index + 1,
                    order,
                    oi_used,
                    solutions,
                    max_count,
                );
                if enforce_oi {
                    oi_used.remove(&v);
                }
                if stop {
                    pattern.unground(slot);
                    pattern.restore_domains(saved);
                    return true;
                }
            }
            pattern.unground(slot);
            pattern.restore_domains(saved);
        }
        false
    }

    /// Whether object identity constrains this slot under the current mode
    fn enforce_oi(&self, pattern: &PatternStructure, slot: usize) -> bool {
        match self.config.subsumption_mode {
            SubsumptionMode::Theta => false,
            SubsumptionMode::ObjectIdentity => true,
            SubsumptionMode::SelectiveObjectIdentity => !pattern.slots[slot].dont_care(),
        }
    }

    /// Domain values in trial order: natural on the first restart, shuffled
    /// afterwards; a grounded slot yields its single value.
    fn value_order(&mut self, pattern: &PatternStructure, slot: usize, restart: u32) -> Vec<u32> {
        match pattern.grounded[slot] {
            Some(v) => vec![v],
            None => {
                let mut values = pattern.domains[slot].values().to_vec();
                if restart != 1 {
                    self.rng.shuffle(&mut values);
                }
                values
            }
        }
    }

    /// Greedy weighted-connectivity variable ordering.
    ///
    /// Seeds with `forced` or a random slot weighted by occurrence-count over
    /// domain-size, then repeatedly takes the unplaced slot with the largest
    /// heuristic mass accumulated from placed neighbours, ties broken at
    /// random. With `defer_singletons`, single-occurrence slots move to the
    /// tail of the order since they cannot contribute to propagation.
    ///
    /// A learned order from the previous search is reused verbatim when
    /// order learning is on.
    fn variable_order(
        &mut self,
        pattern: &PatternStructure,
        target: &TargetStructure,
        forced: Option<usize>,
        defer_singletons: bool,
    ) -> Vec<usize> {
        if self.config.learn_variable_order {
            if let Some(order) = self.first_variable_order.take() {
                // Must be a permutation of this pattern's slots
                let mut seen = vec![false; pattern.slot_count()];
                let fits = order.len() == pattern.slot_count()
                    && order
                        .iter()
                        .all(|&s| s < pattern.slot_count() && !std::mem::replace(&mut seen[s], true));
                if fits {
                    self.last_variable_order = Some(order.clone());
                    return order;
                }
            }
        }

        let mut predicate_counts: HashMap<u32, u32> = HashMap::new();
        for lit in target.literals() {
            *predicate_counts.entry(lit.predicate).or_insert(0) += 1;
        }

        let n = pattern.slot_count();
        let mut weights = vec![0f64; n];
        for (i, w) in weights.iter_mut().enumerate() {
            *w = pattern.slots[i].contained_in.len() as f64
                / pattern.domains[i].len().max(1) as f64;
        }

        let mut order = Vec::with_capacity(n);
        let mut deferred = Vec::new();
        let mut heuristic = vec![0f64; n];

        let seed = forced.unwrap_or_else(|| self.rng.weighted_index(&weights));
        order.push(seed);
        heuristic[seed] = -1.0;
        for &lit_idx in &pattern.slots[seed].contained_in {
            for &arg in &pattern.literals[lit_idx].args {
                if heuristic[arg] != -1.0 {
                    heuristic[arg] += weights[arg];
                }
            }
        }

        for _ in 1..n {
            let selected = self.max_index_with_tie_breaking(&heuristic);
            heuristic[selected] = -1.0;
            if defer_singletons && pattern.slots[selected].occurrences <= 1 {
                deferred.push(selected);
            } else {
                order.push(selected);
            }
            for &lit_idx in &pattern.slots[selected].contained_in {
                let count = predicate_counts
                    .get(&pattern.literals[lit_idx].predicate)
                    .copied()
                    .unwrap_or(1)
                    .max(1) as f64;
                for &arg in &pattern.literals[lit_idx].args {
                    if heuristic[arg] != -1.0 {
                        heuristic[arg] += weights[arg] / count;
                    }
                }
            }
        }

        order.extend(deferred);
        self.last_variable_order = Some(order.clone());
        order
    }

    /// Index of the maximum value, choosing uniformly among ties
    fn max_index_with_tie_breaking(&mut self, values: &[f64]) -> usize {
        let mut max = f64::NEG_INFINITY;
        let mut ties: Vec<usize> = Vec::new();
        for (i, &v) in values.iter().enumerate() {
            if v > max {
                max = v;
                ties.clear();
                ties.push(i);
            } else if v == max {
                ties.push(i);
            }
        }
        if ties.len() > 1 {
            ties[self.rng.next_index(ties.len())]
        } else {
            ties[0]
        }
    }

    /// AC-3 fixpoint over the binary co-occurrence projections of the
    /// pattern's multi-argument literals. Returns `false` when some domain
    /// empties, refuting the target outright; otherwise installs the filtered
    /// domains as the new baseline.
    fn arc_consistency(
        &mut self,
        pattern: &mut PatternStructure,
        target: &TargetStructure,
    ) -> bool {
        let mut stack: Vec<(usize, usize, usize)> = Vec::new();
        let mut pending: HashSet<(usize, usize, usize)> = HashSet::new();
        let mut domains: HashMap<usize, Vec<u32>> = HashMap::new();

        for (lit_idx, lit) in pattern.literals.iter().enumerate() {
            if lit.args.len() > 1 {
                for &a in &lit.args {
                    for &b in &lit.args {
                        if a != b {
                            let triple = (a, b, lit_idx);
                            if pending.insert(triple) {
                                stack.push(triple);
                            }
                            domains
                                .entry(a)
                                .or_insert_with(|| pattern.domains[a].values().to_vec());
                        }
                    }
                }
            }
        }

        while let Some(triple) = stack.pop() {
            pending.remove(&triple);
            let (x, y, lit_idx) = triple;
            let dx = match domains.get(&x) {
                Some(d) => d.clone(),
                None => pattern.domains[x].values().to_vec(),
            };
            let dy = match domains.get(&y) {
                Some(d) => d.clone(),
                None => pattern.domains[y].values().to_vec(),
            };
            let filtered = pattern.revise(&dx, x, &dy, y, lit_idx, target, &self.terms);
            if filtered.len() < dx.len() {
                if filtered.is_empty() {
                    return false;
                }
                for nb_pos in 0..pattern.slots[x].neighbours.len() {
                    let nb = pattern.slots[x].neighbours[nb_pos];
                    if nb == x {
                        continue;
                    }
                    for lit_pos in 0..pattern.slots[nb].contained_in.len() {
                        let nb_lit = pattern.slots[nb].contained_in[lit_pos];
                        let new_triple = (nb, x, nb_lit);
                        if pending.insert(new_triple) {
                            stack.push(new_triple);
                        }
                    }
                }
                domains.insert(x, filtered);
            }
        }

        for (slot, values) in domains {
            pattern.domains[slot] = TermSet::from_values(values);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_clause;

    struct Fixture {
        interner: Interner,
        engine: SubsumptionEngine,
    }

    impl Fixture {
        fn new() -> Fixture {
            Fixture {
                interner: Interner::new(),
                engine: SubsumptionEngine::new(EngineConfig::default()),
            }
        }

        fn with_mode(mode: SubsumptionMode) -> Fixture {
            let mut f = Fixture::new();
            f.engine.set_subsumption_mode(mode);
            f
        }

        fn decide(&mut self, pattern: &str, target: &str) -> Outcome {
            let p = parse_clause(pattern, &mut self.interner).unwrap();
            let t = parse_clause(target, &mut self.interner).unwrap();
            let target = self.engine.compile_target(&t, &self.interner).unwrap();
            let mut pattern = self.engine.compile_pattern(&p, &self.interner).unwrap();
            self.engine.decide(&mut pattern, &target)
        }

        fn enumerate(&mut self, pattern: &str, target: &str, max: usize) -> Substitutions {
            let p = parse_clause(pattern, &mut self.interner).unwrap();
            let t = parse_clause(target, &mut self.interner).unwrap();
            let target = self.engine.compile_target(&t, &self.interner).unwrap();
            let mut pattern = self.engine.compile_pattern(&p, &self.interner).unwrap();
            self.engine.enumerate(&mut pattern, &target, max)
        }
    }

    #[test]
    fn proves_simple_subsumption() {
        let mut f = Fixture::new();
        assert_eq!(f.decide("p(X), q(X, Y)", "p(a), q(a, b)"), Outcome::Proved);
    }

    #[test]
    fn unique_substitution_is_found() {
        let mut f = Fixture::new();
        let subs = f.enumerate("p(X), q(X, Y)", "p(a), q(a, b)", usize::MAX);
        assert_eq!(subs.len(), 1);
        let grounding = &subs.groundings[0];
        // X -> a, Y -> b in template slot order
        let names: Vec<&str> = grounding.iter().map(|t| t.name(&f.interner)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn refutes_on_missing_predicate() {
        let mut f = Fixture::new();
        assert_eq!(f.decide("p(X), r(X)", "p(a)"), Outcome::Refuted);
        assert!(f.engine.solved_without_search());
    }

    #[test]
    fn refutes_through_builtin_inequality() {
        let mut f = Fixture::new();
        assert_eq!(f.decide("@neq(X, a), p(X)", "p(a)"), Outcome::Refuted);
        assert_eq!(f.decide("@neq(X, a), p(X)", "p(a), p(b)"), Outcome::Proved);
    }

    #[test]
    fn symmetric_predicate_matches_both_directions() {
        let mut f = Fixture::new();
        let subs = f.enumerate("sym_edge(X, Y)", "sym_edge(a, b)", usize::MAX);
        let groundings: Vec<Vec<&str>> = subs
            .groundings
            .iter()
            .map(|g| g.iter().map(|t| t.name(&f.interner)).collect())
            .collect();
        // Membership is order-insensitive, so both orientations are solutions
        assert!(groundings.contains(&vec!["a", "b"]));
        assert!(groundings.contains(&vec!["b", "a"]));
    }

    #[test]
    fn negated_literal_requires_absence() {
        let mut f = Fixture::new();
        assert_eq!(f.decide("p(X), !q(X)", "p(a), q(a)"), Outcome::Refuted);
        assert_eq!(f.decide("p(X), !q(X)", "p(a), p(b), q(a)"), Outcome::Proved);
    }

    #[test]
    fn alldiff_constrains_groundings() {
        let mut f = Fixture::new();
        assert_eq!(
            f.decide("@alldiff(X, Y), p(X), p(Y)", "p(a)"),
            Outcome::Refuted
        );
        assert_eq!(
            f.decide("@alldiff(X, Y), p(X), p(Y)", "p(a), p(b)"),
            Outcome::Proved
        );
    }

    #[test]
    fn theta_mode_allows_merging_variables() {
        let mut f = Fixture::new();
        assert_eq!(f.decide("e(X, Y), e(Y, Z)", "e(a, a)"), Outcome::Proved);
    }

    #[test]
    fn object_identity_requires_injectivity() {
        let mut f = Fixture::with_mode(SubsumptionMode::ObjectIdentity);
        assert_eq!(f.decide("e(X, Y), e(Y, Z)", "e(a, a)"), Outcome::Refuted);
        assert_eq!(
            f.decide("e(X, Y), e(Y, Z)", "e(a, b), e(b, c)"),
            Outcome::Proved
        );
    }

    #[test]
    fn oi_groundings_are_injective() {
        let mut f = Fixture::with_mode(SubsumptionMode::ObjectIdentity);
        let subs = f.enumerate("p(X), p(Y)", "p(a), p(b)", usize::MAX);
        for grounding in &subs.groundings {
            let distinct: HashSet<_> = grounding.iter().collect();
            assert_eq!(distinct.len(), grounding.len());
        }
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn selective_oi_exempts_underscore_variables() {
        let mut f = Fixture::with_mode(SubsumptionMode::SelectiveObjectIdentity);
        // _Y is exempt from injectivity, so both may land on a
        assert_eq!(f.decide("p(X), q(X, _Y)", "p(a), q(a, a)"), Outcome::Proved);
        // Plain variables still collide
        assert_eq!(f.decide("p(X), p(Y)", "p(a)"), Outcome::Refuted);
    }

    #[test]
    fn typed_variables_restrict_domains() {
        let mut f = Fixture::new();
        assert_eq!(
            f.decide("p(person:X)", "p(person:alice), p(city:prague)"),
            Outcome::Proved
        );
        assert_eq!(f.decide("p(animal:X)", "p(person:alice)"), Outcome::Refuted);
    }

    #[test]
    fn empty_pattern_subsumes_anything() {
        let mut f = Fixture::new();
        assert_eq!(f.decide("", "p(a)"), Outcome::Proved);
        let subs = f.enumerate("", "p(a)", usize::MAX);
        assert_eq!(subs.len(), 1);
        assert!(subs.groundings[0].is_empty());
    }

    #[test]
    fn enumeration_respects_max_count() {
        let mut f = Fixture::new();
        let subs = f.enumerate("p(X)", "p(a), p(b), p(c)", 2);
        assert_eq!(subs.len(), 2);
        let none = f.enumerate("p(X)", "p(a)", 0);
        assert!(none.is_empty());
    }

    #[test]
    fn arc_consistency_refutes_unsatisfiable_chain() {
        let mut f = Fixture::new();
        // Force arc consistency from the first restart
        f.engine.set_arc_consistency_from(1);
        assert_eq!(
            f.decide("e(X, Y), e(Y, X)", "e(a, b), e(b, c)"),
            Outcome::Refuted
        );
        assert_eq!(
            f.decide("e(X, Y), e(Y, X)", "e(a, b), e(b, a)"),
            Outcome::Proved
        );
    }

    // A 5-cycle pattern has no homomorphism into a directed 4-cycle, but
    // refuting that takes more than a dozen search nodes.
    const FIVE_CYCLE: &str = "e(X0, X1), e(X1, X2), e(X2, X3), e(X3, X4), e(X4, X0)";
    const FOUR_CYCLE: &str = "e(a, b), e(b, c), e(c, d), e(d, a)";

    #[test]
    fn tight_budget_yields_undecided() {
        let mut f = Fixture::new();
        f.engine.set_restart_sequence(RestartSequence::Constant(1));
        f.engine.set_max_restarts(1);
        // Cutoff = 1 + 2*slots = 11 explored nodes: not enough to refute
        assert_eq!(f.decide(FIVE_CYCLE, FOUR_CYCLE), Outcome::Undecided);
    }

    #[test]
    fn raising_budget_turns_undecided_into_refuted() {
        let mut f = Fixture::new();
        f.engine.set_restart_sequence(RestartSequence::Exponential {
            scale: 1,
            base: 2,
            offset: 0,
        });
        f.engine.set_max_restarts(64);
        assert_eq!(f.decide(FIVE_CYCLE, FOUR_CYCLE), Outcome::Refuted);
    }

    #[test]
    fn compilation_is_idempotent() {
        let mut f = Fixture::new();
        let p = parse_clause("p(X), q(X, Y)", &mut f.interner).unwrap();
        let t = parse_clause("p(a), q(a, b)", &mut f.interner).unwrap();
        let target1 = f.engine.compile_target(&t, &f.interner).unwrap();
        let target2 = f.engine.compile_target(&t, &f.interner).unwrap();
        let mut pat1 = f.engine.compile_pattern(&p, &f.interner).unwrap();
        let mut pat2 = f.engine.compile_pattern(&p, &f.interner).unwrap();
        assert_eq!(f.engine.decide(&mut pat1, &target1), Outcome::Proved);
        assert_eq!(f.engine.decide(&mut pat2, &target2), Outcome::Proved);
        let s1 = f.engine.enumerate(&mut pat1, &target1, usize::MAX);
        let s2 = f.engine.enumerate(&mut pat2, &target2, usize::MAX);
        assert_eq!(s1.groundings, s2.groundings);
    }

    #[test]
    fn repeated_decisions_reset_state() {
        let mut f = Fixture::new();
        let p = parse_clause("p(X), q(X, Y)", &mut f.interner).unwrap();
        let t = parse_clause("p(a), q(a, b)", &mut f.interner).unwrap();
        let target = f.engine.compile_target(&t, &f.interner).unwrap();
        let mut pattern = f.engine.compile_pattern(&p, &f.interner).unwrap();
        for _ in 0..5 {
            assert_eq!(f.engine.decide(&mut pattern, &target), Outcome::Proved);
        }
        // Interleave with enumeration: same structure, fully reset in between
        let subs = f.engine.enumerate(&mut pattern, &target, usize::MAX);
        assert_eq!(subs.len(), 1);
        assert_eq!(f.engine.decide(&mut pattern, &target), Outcome::Proved);
    }
}
