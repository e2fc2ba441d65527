//! Integration tests for the prover on propositional problems

use prooftrace::{parse_tptp, prove, ProofResult, Prover, ProverConfig, QueueOrder, Rule, StopReason};

fn proves(tptp: &str) -> bool {
    let problem = parse_tptp(tptp, &[]).unwrap();
    prove(problem).unwrap()
}

fn conjecture(formula: &str) -> String {
    format!("fof(goal, conjecture, {}).", formula)
}

#[test]
fn test_smoke() {
    assert!(proves(&conjecture("p | ~p")));
    assert!(!proves(&conjecture("p")));
    assert!(!proves(&conjecture("~(p | ~p)")));
    assert!(proves(&conjecture("(a => b) | (b => a)")));
    assert!(proves(&conjecture("(a => (b => c)) => ((a => b) => (a => c))")));
}

#[test]
fn test_boolean_constants() {
    assert!(proves(&conjecture("$true")));
    assert!(!proves(&conjecture("~$true")));
    assert!(!proves(&conjecture("$false")));
    assert!(proves(&conjecture("~$false")));
}

#[test]
fn test_all_connectives() {
    assert!(proves(&conjecture("(p <=> q) <=> (q <=> p)")));
    assert!(proves(&conjecture("(p <~> q) <=> ~(p <=> q)")));
    assert!(proves(&conjecture("(p ~& q) <=> ~(p & q)")));
    assert!(proves(&conjecture("(p ~| q) <=> ~(p | q)")));
    assert!(proves(&conjecture("(p <= q) <=> (q => p)")));
    assert!(!proves(&conjecture("(p => q) => (q => p)")));
}

#[test]
fn test_modus_ponens() {
    let tptp = "
        fof(p, axiom, p).
        fof(p_implies_q, axiom, p => q).
        fof(goal, conjecture, q).
    ";
    assert!(proves(tptp));

    let tptp = "
        fof(p, axiom, p).
        fof(goal, conjecture, q).
    ";
    assert!(!proves(tptp));
}

#[test]
fn test_multiple_conjectures_must_all_follow() {
    let both = "
        fof(ax, axiom, p & q).
        fof(g1, conjecture, p).
        fof(g2, conjecture, q).
    ";
    assert!(proves(both));

    let one = "
        fof(ax, axiom, p).
        fof(g1, conjecture, p).
        fof(g2, conjecture, q).
    ";
    assert!(!proves(one));
}

#[test]
fn test_cnf_input() {
    let tptp = "
        cnf(c1, axiom, p | q).
        cnf(c2, axiom, ~p | q).
        cnf(c3, negated_conjecture, ~q).
    ";
    assert!(proves(tptp));
}

#[test]
fn test_golden_trace() {
    let problem = parse_tptp(&conjecture("p | ~p"), &[]).unwrap();
    let mut prover = Prover::new(problem, ProverConfig::default());
    assert_eq!(prover.prove().unwrap(), ProofResult::Proved);

    let steps = prover.trace();
    let expected = "\
1. ~(p | ~p)  (negated conjecture)
2. ~p         (from 1 by applying alpha1 rule)
3. ~~p        (from 1 by applying alpha2 rule)
4. p          (from 3 by applying double negation rule)
5. $false     (from 4 and 2 by applying resolution rule)
";
    assert_eq!(prover.display_trace(&steps).to_string(), expected);
}

#[test]
fn test_trace_is_monotone_and_duplicate_free() {
    let tptp = conjecture("((a => b) & (b => c)) => (a => c)");
    for order in [QueueOrder::ShortestFirst, QueueOrder::Fifo] {
        let problem = parse_tptp(&tptp, &[]).unwrap();
        let config = ProverConfig {
            queue_order: order,
            ..ProverConfig::default()
        };
        let mut prover = Prover::new(problem, config);
        assert!(prover.prove().unwrap().is_proved());

        let steps = prover.trace();
        let mut seen = std::collections::HashSet::new();
        for (position, step) in steps.iter().enumerate() {
            assert_eq!(step.index, position + 1);
            assert!(step.origin.iter().all(|&p| p < step.index));
            assert!(seen.insert(step.literals.clone()), "duplicate clause at {}", step.index);
        }
        assert!(steps.last().unwrap().is_empty());
        assert_eq!(steps.last().unwrap().rule, Rule::Resolution);
    }
}

#[test]
fn test_iteration_limit() {
    let problem = parse_tptp(&conjecture("(a => (b => c)) => ((a => b) => (a => c))"), &[]).unwrap();
    let config = ProverConfig {
        max_iterations: 1,
        ..ProverConfig::default()
    };
    let mut prover = Prover::new(problem, config);
    assert_eq!(
        prover.prove().unwrap(),
        ProofResult::Inconclusive(StopReason::IterationLimit)
    );
    assert_eq!(prover.stats().resolution.iterations, 1);
}

#[test]
fn test_clause_limit() {
    let problem = parse_tptp(&conjecture("(a => (b => c)) => ((a => b) => (a => c))"), &[]).unwrap();
    let config = ProverConfig {
        max_clauses: 3,
        ..ProverConfig::default()
    };
    let mut prover = Prover::new(problem, config);
    assert_eq!(
        prover.prove().unwrap(),
        ProofResult::Inconclusive(StopReason::ClauseLimit)
    );
}

#[test]
fn test_cancel_from_another_thread() {
    let problem = parse_tptp(&conjecture("p | ~p"), &[]).unwrap();
    let mut prover = Prover::new(problem, ProverConfig::default());
    let cancel = prover.cancel_handle();
    std::thread::spawn(move || cancel.store(true, std::sync::atomic::Ordering::Relaxed))
        .join()
        .unwrap();
    assert_eq!(
        prover.prove().unwrap(),
        ProofResult::Inconclusive(StopReason::Cancelled)
    );
}

#[test]
fn test_recorded_tautology_appears_once() {
    // {p, q} and {~p, ~q} only resolve to tautologies
    let tptp = "
        cnf(c1, axiom, p | q).
        cnf(c2, axiom, ~p | ~q).
    ";
    let problem = parse_tptp(tptp, &[]).unwrap();
    let config = ProverConfig {
        record_tautologies: true,
        ..ProverConfig::default()
    };
    let mut prover = Prover::new(problem, config);
    assert_eq!(prover.prove().unwrap(), ProofResult::NotProved);

    let steps = prover.trace();
    let text = prover.display_trace(&steps).to_string();
    assert_eq!(text.matches("$true").count(), 1, "{}", text);
    assert_eq!(prover.stats().resolution.tautologies, 2);
}
