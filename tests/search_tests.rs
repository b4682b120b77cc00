//! Search engine integration tests on small explicit graphs.

use turn_planner::cost::NaturalOrder;
use turn_planner::games::tactics::{Board, RandomBoardSpec, TacticsAction, TacticsProblem};
use turn_planner::search::{search, FnProblem, SearchConfig, SearchEngine, Step, Termination};
use turn_planner::{Personality, PersonalityWeights};

/// Directed weighted graph over `u8` nodes. Actions name the target node.
fn graph(
    edges: &'static [(u8, u8, u32)],
    goal: u8,
    heuristic: fn(&u8) -> u32,
) -> FnProblem<u8, u8, u32> {
    FnProblem::new(
        move |s| {
            edges
                .iter()
                .filter(|(from, _, _)| from == s)
                .map(|(_, to, _)| *to)
                .collect()
        },
        move |_, s| *s == goal,
        heuristic,
        move |_, from, to, _| {
            edges
                .iter()
                .find(|(f, t, _)| f == from && t == to)
                .map_or(u32::MAX, |(_, _, w)| *w)
        },
        move |s, to| edges.iter().any(|(f, t, _)| f == s && t == to).then_some(*to),
    )
}

fn zero(_: &u8) -> u32 {
    0
}

fn plan_cost(edges: &[(u8, u8, u32)], start: u8, plan: &[u8]) -> u32 {
    let mut at = start;
    let mut total = 0;
    for &next in plan {
        let (_, _, w) = edges
            .iter()
            .find(|(f, t, _)| *f == at && *t == next)
            .unwrap();
        total += w;
        at = next;
    }
    total
}

// =============================================================================
// Basic Scenarios
// =============================================================================

#[test]
fn test_trivial_one_step_goal() {
    static EDGES: [(u8, u8, u32); 1] = [(0, 1, 1)];
    let problem = graph(&EDGES, 1, zero);

    let outcome = search(&problem, 0, &NaturalOrder).unwrap();

    assert!(outcome.found);
    assert_eq!(outcome.actions, vec![1]);
    assert_eq!(outcome.termination, Termination::GoalReached);
}

#[test]
fn test_unreachable_goal() {
    let problem = graph(&[], 9, zero);
    let mut engine = SearchEngine::new(SearchConfig::default());

    let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();

    assert!(!outcome.found);
    assert!(outcome.actions.is_empty());
    assert_eq!(outcome.termination, Termination::FrontierExhausted);

    let report = engine.last_report().unwrap();
    assert_eq!(report.stats.processed, 1);
    assert_eq!(report.stats.open, 0);
}

#[test]
fn test_start_is_goal() {
    static EDGES: [(u8, u8, u32); 1] = [(0, 1, 1)];
    let problem = graph(&EDGES, 0, zero);
    let mut engine = SearchEngine::new(SearchConfig::default());

    let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();

    assert!(outcome.found);
    assert!(outcome.actions.is_empty());
    assert_eq!(engine.last_report().unwrap().stats.processed, 0);
}

#[test]
fn test_finds_cheapest_plan() {
    static EDGES: [(u8, u8, u32); 6] = [
        (0, 1, 7),
        (0, 2, 2),
        (2, 3, 2),
        (3, 1, 2),
        (1, 4, 1),
        (2, 4, 9),
    ];
    let problem = graph(&EDGES, 4, zero);

    let outcome = search(&problem, 0, &NaturalOrder).unwrap();

    assert_eq!(outcome.actions, vec![2, 3, 1, 4]);
    assert_eq!(plan_cost(&EDGES, 0, &outcome.actions), 7);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_tie_break_follows_action_order() {
    static AB: [(u8, u8, u32); 2] = [(0, 1, 1), (0, 2, 1)];
    static BA: [(u8, u8, u32); 2] = [(0, 2, 1), (0, 1, 1)];

    let is_leaf = |_: &u8, s: &u8| *s != 0;
    let ab = FnProblem::new(
        |s: &u8| AB.iter().filter(|e| e.0 == *s).map(|e| e.1).collect(),
        is_leaf,
        |_| 0u32,
        |_, _, _, _| 1u32,
        |_, to| Some(*to),
    );
    let ba = FnProblem::new(
        |s: &u8| BA.iter().filter(|e| e.0 == *s).map(|e| e.1).collect(),
        is_leaf,
        |_| 0u32,
        |_, _, _, _| 1u32,
        |_, to| Some(*to),
    );

    for _ in 0..5 {
        assert_eq!(search(&ab, 0, &NaturalOrder).unwrap().actions, vec![1]);
        assert_eq!(search(&ba, 0, &NaturalOrder).unwrap().actions, vec![2]);
    }
}

#[test]
fn test_search_is_idempotent() {
    static EDGES: [(u8, u8, u32); 5] = [(0, 1, 1), (0, 2, 1), (1, 3, 2), (2, 3, 2), (3, 4, 1)];
    let problem = graph(&EDGES, 4, zero);
    let mut engine = SearchEngine::new(SearchConfig::default());

    let first = engine.search(&problem, 0, &NaturalOrder).unwrap();
    let first_table = engine.last_report().unwrap().cost_table.clone();
    let first_processed = engine.last_report().unwrap().stats.processed;

    let second = engine.search(&problem, 0, &NaturalOrder).unwrap();
    let report = engine.last_report().unwrap();

    assert_eq!(first, second);
    assert_eq!(first_table, report.cost_table);
    assert_eq!(first_processed, report.stats.processed);
}

// =============================================================================
// Relaxation Tests
// =============================================================================

/// Admissible but inconsistent: h(1) = 5 while the cheapest way on from 1
/// costs 6, yet 2 is reached via 1 for only 1 more.
fn inconsistent(s: &u8) -> u32 {
    if *s == 1 {
        5
    } else {
        0
    }
}

static DETOUR: [(u8, u8, u32); 4] = [(0, 1, 1), (0, 2, 4), (1, 2, 1), (2, 3, 5)];

#[test]
fn test_closed_state_never_reopened_by_default() {
    let problem = graph(&DETOUR, 3, inconsistent);
    let mut engine = SearchEngine::new(SearchConfig::default());

    let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();

    // Valid, but not the cheapest (0-1-2-3 costs 7).
    assert_eq!(outcome.actions, vec![2, 3]);
    assert_eq!(plan_cost(&DETOUR, 0, &outcome.actions), 9);

    let stats = &engine.last_report().unwrap().stats;
    assert_eq!(stats.reopened, 0);
    assert_eq!(stats.closed_skips, 1);
}

#[test]
fn test_reopen_closed_finds_optimum() {
    let problem = graph(&DETOUR, 3, inconsistent);
    let mut engine = SearchEngine::new(SearchConfig::default().with_reopen_closed(true));

    let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();

    assert_eq!(outcome.actions, vec![1, 2, 3]);
    assert_eq!(plan_cost(&DETOUR, 0, &outcome.actions), 7);
    assert_eq!(engine.last_report().unwrap().stats.reopened, 1);
}

#[test]
fn test_self_loops_ignored() {
    static EDGES: [(u8, u8, u32); 3] = [(0, 0, 1), (0, 1, 3), (1, 1, 1)];
    let problem = graph(&EDGES, 2, zero);
    let mut engine = SearchEngine::new(SearchConfig::default());

    let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();

    assert!(!outcome.found);
    let stats = &engine.last_report().unwrap().stats;
    assert_eq!(stats.processed, 2);
    assert_eq!(stats.closed_skips, 2);
}

// =============================================================================
// Step-wise & Introspection Tests
// =============================================================================

#[test]
fn test_stepwise_counters() {
    static EDGES: [(u8, u8, u32); 4] = [(0, 1, 1), (0, 2, 5), (1, 3, 1), (3, 4, 1)];
    let problem = graph(&EDGES, 4, zero);
    let engine = SearchEngine::new(SearchConfig::default());
    let mut session = engine.start(&problem, 0, &NaturalOrder);

    assert_eq!(session.processed_count(), 0);
    assert_eq!(session.open_count(), 1);
    assert!(session.best_candidate().is_none());

    assert_eq!(session.step().unwrap(), Step::Continue);
    assert_eq!(session.processed_count(), 1);
    assert_eq!(session.open_count(), 2);
    assert_eq!(session.g_score(&1), 1);
    assert_eq!(session.g_score(&2), 5);
    assert_eq!(session.g_score(&4), u32::MAX);

    assert_eq!(session.step().unwrap(), Step::Continue);
    let best = session.best_candidate().unwrap();
    assert_eq!(best.action, 1);
    assert_eq!(best.cost, 1);

    let outcome = session.run().unwrap();
    assert_eq!(outcome.actions, vec![1, 3, 4]);
    assert!(session.is_finished());
    assert_eq!(session.best_candidate().unwrap().cost, 3);

    // Stepping a finished session repeats the outcome.
    assert_eq!(session.step().unwrap(), Step::Done(outcome));
}

#[test]
fn test_expansion_budget() {
    static EDGES: [(u8, u8, u32); 3] = [(0, 1, 1), (1, 2, 1), (2, 3, 1)];
    let problem = graph(&EDGES, 3, zero);
    let mut engine = SearchEngine::new(SearchConfig::default().with_max_expansions(2));

    let outcome = engine.search(&problem, 0, &NaturalOrder).unwrap();

    assert!(!outcome.found);
    assert_eq!(outcome.termination, Termination::ExpansionBudget);
    assert_eq!(engine.last_report().unwrap().stats.expansions, 2);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_parallel_searches_match_sequential() {
    let spec = RandomBoardSpec {
        width: 4,
        height: 3,
        allies: 1,
        enemies: 2,
        ..RandomBoardSpec::default()
    };
    let boards: Vec<Board> = (0..4).map(|seed| Board::random(seed, &spec).unwrap()).collect();
    let problem = TacticsProblem::default();
    let personality = Personality::new(PersonalityWeights::default()).unwrap();

    let sequential: Vec<_> = boards
        .iter()
        .map(|b| search(&problem, b.clone(), &personality).unwrap())
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = boards
            .iter()
            .map(|b| {
                let problem = &problem;
                let personality = &personality;
                scope.spawn(move || search(problem, b.clone(), personality).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
    for outcome in &sequential {
        assert!(outcome.found);
        assert_eq!(outcome.actions.last(), Some(&TacticsAction::EndTurn));
    }
}
