//! Core best-first search algorithm.
//!
//! A* over an implicit graph: states are discovered on demand through the
//! problem's `actions`/`apply` policies and never materialized up front.
//!
//! One deliberate departure from textbook A*: by default a closed state is
//! never re-opened, even if a cheaper path to it turns up later. With a
//! consistent heuristic this changes nothing; with an inconsistent one the
//! plan stays valid but may not be optimal. Set
//! [`SearchConfig::reopen_closed`] for the strict behaviour.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::cost::{Cost, CostBounds, CostComparator};
use crate::error::{Result, SearchError};

use super::arena::{StateArena, StateId};
use super::config::SearchConfig;
use super::frontier::Frontier;
use super::problem::SearchProblem;
use super::stats::SearchStats;

/// Why a search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// A goal state was selected for expansion.
    GoalReached,
    /// The frontier emptied without reaching a goal.
    FrontierExhausted,
    /// The configured expansion budget ran out.
    ExpansionBudget,
}

/// Result of a completed search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome<A> {
    /// Whether a goal was reached.
    pub found: bool,

    /// Actions from the start state to the goal, in order.
    /// Empty when nothing was found (or the start already was a goal).
    pub actions: Vec<A>,

    /// Why the search stopped.
    pub termination: Termination,
}

impl<A> SearchOutcome<A> {
    fn reached(actions: Vec<A>) -> Self {
        Self {
            found: true,
            actions,
            termination: Termination::GoalReached,
        }
    }

    fn failed(termination: Termination) -> Self {
        Self {
            found: false,
            actions: Vec::new(),
            termination,
        }
    }

    /// The first action of the plan, if any.
    #[must_use]
    pub fn first_action(&self) -> Option<&A> {
        self.actions.first()
    }
}

/// The current best choice: the first action toward the most promising
/// state, with that state's fScore.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate<A, C> {
    /// First action on the path from the start state.
    pub action: A,
    /// fScore of the state the path leads to.
    pub cost: C,
}

/// Result of one step of a [`SearchSession`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<A> {
    /// One state was expanded; more work remains.
    Continue,
    /// The search is over.
    Done(SearchOutcome<A>),
}

/// Introspection snapshot retained after a run.
#[derive(Clone, Debug)]
pub struct SearchReport<S, A, C> {
    /// Final counters.
    pub stats: SearchStats,
    /// Best candidate at the last completed step.
    pub best: Option<Candidate<A, C>>,
    /// fScore of every scored state, in discovery order.
    /// Empty if [`SearchConfig::record_cost_table`] is off.
    pub cost_table: Vec<(S, C)>,
}

/// Per-state bookkeeping, indexed by [`StateId`].
#[derive(Clone, Debug)]
struct NodeRecord<A, C> {
    g: Option<C>,
    f: Option<C>,
    parent: Option<(StateId, A)>,
    closed: bool,
}

impl<A, C> Default for NodeRecord<A, C> {
    fn default() -> Self {
        Self {
            g: None,
            f: None,
            parent: None,
            closed: false,
        }
    }
}

/// A search in progress.
///
/// Owns every table of one search invocation. Drive it with
/// [`step`](Self::step) for incremental execution, or [`run`](Self::run) to
/// completion. The introspection methods are valid between steps.
pub struct SearchSession<'a, P: SearchProblem, K: ?Sized> {
    problem: &'a P,
    comparator: &'a K,
    config: SearchConfig,
    bounds: CostBounds<P::Cost>,
    arena: StateArena<P::State>,
    records: Vec<NodeRecord<P::Action, P::Cost>>,
    frontier: Frontier,
    best: Option<Candidate<P::Action, P::Cost>>,
    stats: SearchStats,
    outcome: Option<SearchOutcome<P::Action>>,
    started: Instant,
}

impl<'a, P, K> SearchSession<'a, P, K>
where
    P: SearchProblem,
    K: CostComparator<P::Cost> + ?Sized,
{
    /// Open a session with `start` as the only frontier member.
    pub fn new(
        problem: &'a P,
        start: P::State,
        comparator: &'a K,
        config: SearchConfig,
        bounds: CostBounds<P::Cost>,
    ) -> Self {
        let mut arena = StateArena::new();
        let (start_id, _) = arena.intern(start);

        let h = problem.heuristic(arena.get(start_id));
        let records = vec![NodeRecord {
            g: Some(bounds.identity.clone()),
            f: Some(bounds.identity.combine(&h)),
            parent: None,
            closed: false,
        }];

        let mut frontier = Frontier::new();
        frontier.push(start_id);

        debug!(start = ?arena.get(start_id), "search started");

        let mut session = Self {
            problem,
            comparator,
            config,
            bounds,
            arena,
            records,
            frontier,
            best: None,
            stats: SearchStats::default(),
            outcome: None,
            started: Instant::now(),
        };
        session.sync_stats();
        session
    }

    /// Perform one selection/expansion step.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::CorruptHistory`] if a goal is found but its
    /// predecessor chain does not lead back to the start state.
    pub fn step(&mut self) -> Result<Step<P::Action>> {
        if let Some(outcome) = &self.outcome {
            return Ok(Step::Done(outcome.clone()));
        }

        if self.config.budget_exhausted(self.stats.expansions) {
            return Ok(Step::Done(self.finish(SearchOutcome::failed(Termination::ExpansionBudget))));
        }

        let Some(current) = self.select() else {
            return Ok(Step::Done(self.finish(SearchOutcome::failed(Termination::FrontierExhausted))));
        };

        self.best = self.candidate_for(current);

        let start = self.arena.get(StateId::START);
        if self.problem.is_goal(start, self.arena.get(current)) {
            let actions = match self.reconstruct(current) {
                Ok(actions) => actions,
                Err(e) => {
                    self.sync_stats();
                    return Err(e);
                }
            };
            return Ok(Step::Done(self.finish(SearchOutcome::reached(actions))));
        }

        self.expand(current);
        self.sync_stats();
        Ok(Step::Continue)
    }

    /// Step until the search is over.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn run(&mut self) -> Result<SearchOutcome<P::Action>> {
        loop {
            if let Step::Done(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Frontier member with the least fScore; earliest wins ties.
    fn select(&self) -> Option<StateId> {
        let records = &self.records;
        let maximum = &self.bounds.maximum;
        let comparator = self.comparator;
        self.frontier.select_by(|a, b| {
            let fa = records[a.index()].f.as_ref().unwrap_or(maximum);
            let fb = records[b.index()].f.as_ref().unwrap_or(maximum);
            comparator.less(fa, fb)
        })
    }

    /// Close `current` and relax every successor.
    fn expand(&mut self, current: StateId) {
        self.frontier.remove(current);
        self.records[current.index()].closed = true;
        self.stats.processed += 1;
        self.stats.expansions += 1;

        let current_state = self.arena.get(current).clone();
        let g_current = match &self.records[current.index()].g {
            Some(g) => g.clone(),
            None => self.bounds.maximum.clone(),
        };

        let actions = self.problem.actions(&current_state);
        trace!(
            state = ?current_state,
            actions = actions.len(),
            "expanding"
        );

        for action in actions {
            let Some(next_state) = self.problem.apply(&current_state, &action) else {
                self.stats.rejected_applications += 1;
                continue;
            };
            self.stats.generated += 1;

            let known = self.arena.id_of(&next_state);
            let was_closed = known.is_some_and(|id| self.records[id.index()].closed);
            if was_closed && !self.config.reopen_closed {
                self.stats.closed_skips += 1;
                continue;
            }

            let next = match known {
                Some(id) => id,
                None => {
                    let (id, _) = self.arena.intern(next_state);
                    self.records.push(NodeRecord::default());
                    id
                }
            };

            let start = self.arena.get(StateId::START);
            let next_ref = self.arena.get(next);
            let weight = self.problem.weigh(start, &current_state, next_ref, &action);
            let tentative = g_current.combine(&weight);

            // An unscored state sits at the maximum sentinel.
            let improves = match &self.records[next.index()].g {
                None => self.comparator.less(&tentative, &self.bounds.maximum),
                Some(g) => self.comparator.less(&tentative, g),
            };
            if !improves {
                if was_closed {
                    self.stats.closed_skips += 1;
                }
                continue;
            }

            let h = self.problem.heuristic(next_ref);
            let record = &mut self.records[next.index()];
            if was_closed {
                record.closed = false;
                self.stats.processed -= 1;
                self.stats.reopened += 1;
            }
            record.parent = Some((current, action));
            record.f = Some(tentative.combine(&h));
            record.g = Some(tentative);
            self.stats.relaxations += 1;

            self.frontier.push(next);
        }
    }

    /// Walk the predecessor chain from `goal` back to the start.
    fn reconstruct(&self, goal: StateId) -> Result<Vec<P::Action>> {
        let limit = self.arena.len();
        let mut stack = Vec::new();
        let mut node = goal;

        while node != StateId::START {
            if stack.len() >= limit {
                error!(depth = stack.len(), "predecessor chain loops");
                return Err(SearchError::CorruptHistory { depth: stack.len() });
            }
            match &self.records[node.index()].parent {
                Some((parent, action)) => {
                    stack.push(action.clone());
                    node = *parent;
                }
                None => {
                    error!(depth = stack.len(), state = %node, "predecessor chain broken");
                    return Err(SearchError::CorruptHistory { depth: stack.len() });
                }
            }
        }

        stack.reverse();
        Ok(stack)
    }

    /// First action toward `id` together with its fScore.
    fn candidate_for(&self, id: StateId) -> Option<Candidate<P::Action, P::Cost>> {
        let mut node = id;
        let mut first = None;
        for _ in 0..self.arena.len() {
            let (parent, action) = self.records[node.index()].parent.as_ref()?;
            first = Some(action);
            if *parent == StateId::START {
                break;
            }
            node = *parent;
        }
        Some(Candidate {
            action: first?.clone(),
            cost: self.records[id.index()].f.clone()?,
        })
    }

    fn finish(&mut self, outcome: SearchOutcome<P::Action>) -> SearchOutcome<P::Action> {
        self.sync_stats();
        debug!(
            found = outcome.found,
            termination = ?outcome.termination,
            plan_len = outcome.actions.len(),
            processed = self.stats.processed,
            open = self.stats.open,
            "search finished"
        );
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn sync_stats(&mut self) {
        self.stats.open = self.frontier.len();
        self.stats.frontier_high_water = self.frontier.high_water();
        self.stats.time_us = self.started.elapsed().as_micros() as u64;
    }

    // === Introspection ===

    /// Number of states in the closed set.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.stats.processed
    }

    /// Number of states in the frontier.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.stats.open
    }

    /// Best candidate as of the last completed step.
    #[must_use]
    pub fn best_candidate(&self) -> Option<&Candidate<P::Action, P::Cost>> {
        self.best.as_ref()
    }

    /// Counters as of the last completed step.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best known cost from the start to `state`; the maximum sentinel if
    /// the state has not been reached.
    #[must_use]
    pub fn g_score(&self, state: &P::State) -> P::Cost {
        self.arena
            .id_of(state)
            .and_then(|id| self.records[id.index()].g.clone())
            .unwrap_or_else(|| self.bounds.maximum.clone())
    }

    /// fScore of `state`, if it has been scored.
    #[must_use]
    pub fn f_score(&self, state: &P::State) -> Option<&P::Cost> {
        self.arena
            .id_of(state)
            .and_then(|id| self.records[id.index()].f.as_ref())
    }

    /// Check if `state` is in the frontier.
    #[must_use]
    pub fn is_open(&self, state: &P::State) -> bool {
        self.arena
            .id_of(state)
            .is_some_and(|id| self.frontier.contains(id))
    }

    /// Check if `state` is in the closed set.
    #[must_use]
    pub fn is_closed(&self, state: &P::State) -> bool {
        self.arena
            .id_of(state)
            .is_some_and(|id| self.records[id.index()].closed)
    }

    /// Snapshot of every scored state's fScore, in discovery order.
    #[must_use]
    pub fn cost_table(&self) -> Vec<(P::State, P::Cost)> {
        self.arena
            .iter()
            .filter_map(|(id, state)| {
                self.records[id.index()]
                    .f
                    .as_ref()
                    .map(|f| (state.clone(), f.clone()))
            })
            .collect()
    }

    /// The outcome, once the search is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&SearchOutcome<P::Action>> {
        self.outcome.as_ref()
    }

    /// Check if the search is over.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Consume the session, keeping only the introspection snapshot.
    #[must_use]
    pub fn into_report(self) -> SearchReport<P::State, P::Action, P::Cost> {
        let cost_table = if self.config.record_cost_table {
            self.cost_table()
        } else {
            Vec::new()
        };
        SearchReport {
            stats: self.stats,
            best: self.best,
            cost_table,
        }
    }
}

/// Reusable search driver.
///
/// Holds configuration and cost bounds, and keeps the introspection report
/// of the last run until the next run replaces it.
pub struct SearchEngine<P: SearchProblem> {
    config: SearchConfig,
    bounds: CostBounds<P::Cost>,
    last_report: Option<SearchReport<P::State, P::Action, P::Cost>>,
}

impl<P: SearchProblem> SearchEngine<P> {
    /// Create an engine using the cost type's own bounds.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            bounds: CostBounds::natural(),
            last_report: None,
        }
    }

    /// Override the identity and maximum sentinels.
    #[must_use]
    pub fn with_bounds(mut self, identity: P::Cost, maximum: P::Cost) -> Self {
        self.bounds = CostBounds::new(identity, maximum);
        self
    }

    /// Open a step-wise session. The engine's cached report is untouched.
    pub fn start<'a, K>(
        &self,
        problem: &'a P,
        start: P::State,
        comparator: &'a K,
    ) -> SearchSession<'a, P, K>
    where
        K: CostComparator<P::Cost> + ?Sized,
    {
        SearchSession::new(
            problem,
            start,
            comparator,
            self.config.clone(),
            self.bounds.clone(),
        )
    }

    /// Run a search to completion and cache its report.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::CorruptHistory`] on a broken predecessor chain.
    /// The report is cached either way.
    pub fn search<K>(
        &mut self,
        problem: &P,
        start: P::State,
        comparator: &K,
    ) -> Result<SearchOutcome<P::Action>>
    where
        K: CostComparator<P::Cost> + ?Sized,
    {
        let mut session = self.start(problem, start, comparator);
        let result = session.run();
        self.last_report = Some(session.into_report());
        result
    }

    /// Report of the last completed run.
    #[must_use]
    pub fn last_report(&self) -> Option<&SearchReport<P::State, P::Action, P::Cost>> {
        self.last_report.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the configuration for live changes between runs.
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Get the cost bounds.
    pub fn bounds(&self) -> &CostBounds<P::Cost> {
        &self.bounds
    }
}

/// Run one search with the default configuration.
///
/// # Errors
///
/// Returns [`SearchError::CorruptHistory`] on a broken predecessor chain.
pub fn search<P, K>(problem: &P, start: P::State, comparator: &K) -> Result<SearchOutcome<P::Action>>
where
    P: SearchProblem,
    K: CostComparator<P::Cost> + ?Sized,
{
    SearchSession::new(
        problem,
        start,
        comparator,
        SearchConfig::default(),
        CostBounds::natural(),
    )
    .run()
}
