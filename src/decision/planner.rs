//! Search-backed decision making with a fallback.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::CostComparator;
use crate::error::Result;
use crate::search::{SearchConfig, SearchEngine, SearchProblem, Termination};

use super::strategy::DecisionStrategy;

/// Where a decision came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionSource {
    /// The search reached a goal.
    Searched,
    /// No goal was reachable; the configured fallback was used.
    Fallback,
}

/// The actions a planner chose for one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision<A> {
    /// Actions to execute, in order.
    pub actions: Vec<A>,
    /// Where the actions came from.
    pub source: DecisionSource,
    /// Why the underlying search stopped.
    pub termination: Termination,
}

impl<A> Decision<A> {
    /// Check if the search found a plan.
    #[must_use]
    pub fn is_searched(&self) -> bool {
        self.source == DecisionSource::Searched
    }
}

/// Owns a problem, a comparator and an engine, and turns states into
/// decisions.
///
/// "No plan found" is a normal outcome for a game AI. If a fallback action
/// is set (typically "end turn") it is returned in that case; otherwise the
/// decision is empty.
///
/// ## Example
///
/// ```
/// use turn_planner::cost::NaturalOrder;
/// use turn_planner::decision::{DecisionSource, DecisionStrategy, Planner};
/// use turn_planner::search::{FnProblem, SearchConfig};
///
/// // Nothing can be done from any state.
/// let problem = FnProblem::new(
///     |_: &u8| Vec::<&'static str>::new(),
///     |_, _| false,
///     |_| 0u32,
///     |_, _, _, _| 1u32,
///     |_, _| None,
/// );
///
/// let mut planner = Planner::new(problem, NaturalOrder, SearchConfig::default())
///     .with_fallback("end_turn");
///
/// let decision = planner.decide(0).unwrap();
/// assert_eq!(decision.source, DecisionSource::Fallback);
/// assert_eq!(decision.actions, vec!["end_turn"]);
/// assert_eq!(planner.processed_count(), 1);
/// ```
pub struct Planner<P: SearchProblem, K> {
    problem: P,
    comparator: K,
    engine: SearchEngine<P>,
    fallback: Option<P::Action>,
}

impl<P, K> Planner<P, K>
where
    P: SearchProblem,
    K: CostComparator<P::Cost>,
{
    /// Create a planner.
    pub fn new(problem: P, comparator: K, config: SearchConfig) -> Self {
        Self {
            problem,
            comparator,
            engine: SearchEngine::new(config),
            fallback: None,
        }
    }

    /// Set the action used when no goal is reachable.
    #[must_use]
    pub fn with_fallback(mut self, action: P::Action) -> Self {
        self.fallback = Some(action);
        self
    }

    /// Run a fresh search from `state` and produce a decision.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchError::CorruptHistory`](crate::SearchError::CorruptHistory)
    /// from the engine.
    pub fn decide(&mut self, state: P::State) -> Result<Decision<P::Action>> {
        let outcome = self.engine.search(&self.problem, state, &self.comparator)?;

        if outcome.found {
            return Ok(Decision {
                actions: outcome.actions,
                source: DecisionSource::Searched,
                termination: outcome.termination,
            });
        }

        debug!(
            termination = ?outcome.termination,
            has_fallback = self.fallback.is_some(),
            "no plan found, falling back"
        );
        Ok(Decision {
            actions: self.fallback.iter().cloned().collect(),
            source: DecisionSource::Fallback,
            termination: outcome.termination,
        })
    }

    /// Get the problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Get the problem for tuning between decisions.
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }

    /// Get the comparator.
    pub fn comparator(&self) -> &K {
        &self.comparator
    }

    /// Replace the comparator (e.g. switch personality).
    pub fn set_comparator(&mut self, comparator: K) {
        self.comparator = comparator;
    }

    /// Get the engine (and through it, the last report).
    pub fn engine(&self) -> &SearchEngine<P> {
        &self.engine
    }
}

impl<P, K> DecisionStrategy for Planner<P, K>
where
    P: SearchProblem,
    K: CostComparator<P::Cost>,
{
    fn processed_count(&self) -> usize {
        self.engine
            .last_report()
            .map_or(0, |report| report.stats.processed)
    }

    fn open_count(&self) -> usize {
        self.engine.last_report().map_or(0, |report| report.stats.open)
    }

    fn debug_info(&self) -> String {
        match self.engine.last_report() {
            None => "no search yet".to_string(),
            Some(report) => match &report.best {
                Some(best) => format!(
                    "best {:?} at {:?} (processed {}, open {})",
                    best.action, best.cost, report.stats.processed, report.stats.open
                ),
                None => format!(
                    "no candidate (processed {}, open {})",
                    report.stats.processed, report.stats.open
                ),
            },
        }
    }
}
