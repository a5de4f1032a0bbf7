//! End-to-end subsumption scenarios through the public API

use clausematch::{
    parse_clause, EngineConfig, Interner, Matching, Outcome, RestartSequence, SubsumptionEngine,
    SubsumptionMode, Term,
};

fn engine() -> SubsumptionEngine {
    SubsumptionEngine::new(EngineConfig::default())
}

fn decide(pattern: &str, target: &str) -> Outcome {
    let mut interner = Interner::new();
    let p = parse_clause(pattern, &mut interner).unwrap();
    let t = parse_clause(target, &mut interner).unwrap();
    let mut engine = engine();
    let target = engine.compile_target(&t, &interner).unwrap();
    let mut pattern = engine.compile_pattern(&p, &interner).unwrap();
    engine.decide(&mut pattern, &target)
}

#[test]
fn scenario_unique_substitution() {
    // p(X), q(X,Y) against p(a), q(a,b): proved with X -> a, Y -> b
    let mut interner = Interner::new();
    let p = parse_clause("p(X), q(X, Y)", &mut interner).unwrap();
    let t = parse_clause("p(a), q(a, b)", &mut interner).unwrap();
    let mut engine = engine();
    let target = engine.compile_target(&t, &interner).unwrap();
    let mut pattern = engine.compile_pattern(&p, &interner).unwrap();

    assert_eq!(engine.decide(&mut pattern, &target), Outcome::Proved);

    let subs = engine.enumerate(&mut pattern, &target, usize::MAX);
    assert_eq!(subs.len(), 1);
    let assignment: Vec<(String, String)> = subs
        .template
        .iter()
        .zip(&subs.groundings[0])
        .map(|(from, to)| {
            (
                from.name(&interner).to_string(),
                to.name(&interner).to_string(),
            )
        })
        .collect();
    assert_eq!(
        assignment,
        vec![
            ("X".to_string(), "a".to_string()),
            ("Y".to_string(), "b".to_string())
        ]
    );
}

#[test]
fn scenario_missing_predicate_refutes() {
    assert_eq!(decide("p(X), r(X)", "p(a)"), Outcome::Refuted);
}

#[test]
fn scenario_builtin_inequality_refutes() {
    assert_eq!(decide("@neq(X, a), p(X)", "p(a)"), Outcome::Refuted);
}

#[test]
fn scenario_symmetric_enumeration() {
    let mut interner = Interner::new();
    let p = parse_clause("sym(X, Y)", &mut interner).unwrap();
    let t = parse_clause("sym(a, b)", &mut interner).unwrap();
    let mut engine = engine();
    let target = engine.compile_target(&t, &interner).unwrap();
    let mut pattern = engine.compile_pattern(&p, &interner).unwrap();

    let subs = engine.enumerate(&mut pattern, &target, usize::MAX);
    let groundings: Vec<Vec<&str>> = subs
        .groundings
        .iter()
        .map(|g| g.iter().map(|t| t.name(&interner)).collect())
        .collect();
    // Both orientations of the symmetric fact are solutions
    assert!(groundings.contains(&vec!["a", "b"]));
    assert!(groundings.contains(&vec!["b", "a"]));
}

#[test]
fn scenario_theta_reduction_of_duplicates() {
    let mut interner = Interner::new();
    let mut matching = Matching::new();
    let c = parse_clause("p(X), p(X), q(X)", &mut interner).unwrap();
    let reduced = matching.theta_reduction(&c, &interner).unwrap();
    assert_eq!(reduced.len(), 2);
}

#[test]
fn symmetric_target_permutation_invariance() {
    // Permuting the argument order of a symmetric target literal never
    // changes the outcome
    let permutations = [
        "sym_r(a, b, c)",
        "sym_r(a, c, b)",
        "sym_r(b, a, c)",
        "sym_r(b, c, a)",
        "sym_r(c, a, b)",
        "sym_r(c, b, a)",
    ];
    for target in permutations {
        assert_eq!(decide("sym_r(X, b, Z)", target), Outcome::Proved, "{target}");
        assert_eq!(decide("sym_r(a, c, b)", target), Outcome::Proved, "{target}");
        assert_eq!(decide("sym_r(X, d, Z)", target), Outcome::Refuted, "{target}");
    }
}

/// If decide proves subsumption, the first enumerated substitution really
/// maps every pattern literal into the target.
#[test]
fn proved_outcomes_are_witnessed() {
    let cases = [
        ("p(X), q(X, Y)", "p(a), q(a, b), q(b, c)"),
        ("e(X, Y), e(Y, Z)", "e(a, b), e(b, a)"),
        ("p(X), p(Y), q(X, Y)", "p(a), p(b), q(a, b)"),
        ("q(X, X)", "q(a, b), q(b, b)"),
    ];
    for (pattern_text, target_text) in cases {
        let mut interner = Interner::new();
        let p = parse_clause(pattern_text, &mut interner).unwrap();
        let t = parse_clause(target_text, &mut interner).unwrap();
        let mut engine = engine();
        let target = engine.compile_target(&t, &interner).unwrap();
        let mut pattern = engine.compile_pattern(&p, &interner).unwrap();

        assert_eq!(engine.decide(&mut pattern, &target), Outcome::Proved);
        let subs = engine.enumerate(&mut pattern, &target, 1);
        assert_eq!(subs.len(), 1);

        let image = p.substitute(&subs.template, &subs.groundings[0]);
        for literal in image.literals() {
            assert!(
                literal.args.iter().all(Term::is_constant),
                "grounding is not complete for {pattern_text}"
            );
            assert!(
                t.contains(literal),
                "literal {} not in target {target_text}",
                literal.display(&interner)
            );
        }
    }
}

#[test]
fn restart_monotonicity() {
    // Tightening budgets may cost decisions but never flips them
    let pattern = "e(X0, X1), e(X1, X2), e(X2, X3), e(X3, X4), e(X4, X0)";
    let target = "e(a, b), e(b, c), e(c, d), e(d, a)";

    let strict = {
        let mut interner = Interner::new();
        let p = parse_clause(pattern, &mut interner).unwrap();
        let t = parse_clause(target, &mut interner).unwrap();
        let mut engine = engine();
        engine.set_restart_sequence(RestartSequence::Constant(1));
        engine.set_max_restarts(1);
        let target = engine.compile_target(&t, &interner).unwrap();
        let mut pattern = engine.compile_pattern(&p, &interner).unwrap();
        engine.decide(&mut pattern, &target)
    };
    assert_eq!(strict, Outcome::Undecided);

    let relaxed = {
        let mut interner = Interner::new();
        let p = parse_clause(pattern, &mut interner).unwrap();
        let t = parse_clause(target, &mut interner).unwrap();
        let mut engine = engine();
        let target = engine.compile_target(&t, &interner).unwrap();
        let mut pattern = engine.compile_pattern(&p, &interner).unwrap();
        engine.decide(&mut pattern, &target)
    };
    assert_eq!(relaxed, Outcome::Refuted);
}

#[test]
fn selective_oi_mixes_injective_and_plain_variables() {
    let mut interner = Interner::new();
    let p = parse_clause("q(X, Y), q(Y, _Z)", &mut interner).unwrap();
    let t = parse_clause("q(a, b), q(b, b)", &mut interner).unwrap();
    let mut engine = engine();
    engine.set_subsumption_mode(SubsumptionMode::SelectiveObjectIdentity);
    let target = engine.compile_target(&t, &interner).unwrap();
    let mut pattern = engine.compile_pattern(&p, &interner).unwrap();

    // X -> a, Y -> b, _Z -> b: _Z may reuse b because it is a don't-care
    assert_eq!(engine.decide(&mut pattern, &target), Outcome::Proved);

    let subs = engine.enumerate(&mut pattern, &target, usize::MAX);
    for grounding in &subs.groundings {
        // X and Y (slots 0 and 1) must stay distinct
        assert_ne!(grounding[0], grounding[1]);
    }
}
