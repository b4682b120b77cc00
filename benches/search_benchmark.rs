use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use turn_planner::cost::{Lexicographic, NaturalOrder, Personality, PersonalityWeights};
use turn_planner::games::tactics::{Board, RandomBoardSpec, TacticsProblem};
use turn_planner::games::three_in_row::{Grid, Mark, ThreeInRowProblem, ThreeInRowTuning};
use turn_planner::search::{search, SearchConfig, SearchEngine};

// ---------------------------------------------------------------------------
// Tactics: vector cost under different comparators
// ---------------------------------------------------------------------------

fn bench_tactics(c: &mut Criterion) {
    let mut group = c.benchmark_group("tactics");
    group.sample_size(30);

    let problem = TacticsProblem::default();
    let personality = Personality::new(PersonalityWeights::default()).expect("non-zero weights");
    let lexicographic = Lexicographic::default();

    for (allies, enemies) in [(1, 1), (2, 2), (2, 3)] {
        let spec = RandomBoardSpec {
            allies,
            enemies,
            ..RandomBoardSpec::default()
        };
        let board = Board::random(7, &spec).expect("valid board spec");
        let label = format!("{allies}v{enemies}");

        group.bench_with_input(BenchmarkId::new("personality", &label), &board, |b, board| {
            b.iter(|| search(&problem, black_box(board.clone()), &personality));
        });
        group.bench_with_input(BenchmarkId::new("lexicographic", &label), &board, |b, board| {
            b.iter(|| search(&problem, black_box(board.clone()), &lexicographic));
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Engine reuse and the cost-table snapshot
// ---------------------------------------------------------------------------

fn bench_engine_reuse(c: &mut Criterion) {
    let problem = TacticsProblem::default();
    let personality = Personality::default();
    let board = Board::random(3, &RandomBoardSpec::default()).expect("valid board spec");

    let mut group = c.benchmark_group("engine");
    for record in [true, false] {
        let mut engine = SearchEngine::new(SearchConfig::default().with_cost_table(record));
        group.bench_function(BenchmarkId::new("cost_table", record), |b| {
            b.iter(|| engine.search(&problem, black_box(board.clone()), &personality));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Scalar cost
// ---------------------------------------------------------------------------

fn bench_three_in_row(c: &mut Criterion) {
    let problem = ThreeInRowProblem::new(Mark::X, ThreeInRowTuning::default());
    c.bench_function("three_in_row/empty", |b| {
        b.iter(|| search(&problem, black_box(Grid::new()), &NaturalOrder));
    });
}

criterion_group!(benches, bench_tactics, bench_engine_reuse, bench_three_in_row);
criterion_main!(benches);
