//! The decision-problem contract.
//!
//! Domains plug into the engine by supplying five policies:
//! - What actions exist in a state
//! - Whether a state is a goal
//! - How far a state is from a goal (heuristic)
//! - How much a transition costs (weigh)
//! - What state an action produces (apply)
//!
//! The engine calls into these but never interprets domain concepts.

use std::fmt::Debug;
use std::hash::Hash;

use crate::cost::Cost;

/// Search problem trait.
///
/// ## Implementation Notes
///
/// - `actions`: must return a finite list; an empty list marks a dead end
/// - `apply`: return `None` on failure, never the unchanged input as a
///   stand-in
/// - All five policies must be deterministic and must not mutate anything a
///   caller can observe, or search traces stop being reproducible
/// - `heuristic` should never overestimate for optimal plans; an
///   overestimating heuristic still yields a valid (just not optimal) plan
pub trait SearchProblem {
    /// One complete snapshot of the decision problem.
    type State: Clone + Eq + Hash + Debug;

    /// One atomic choice applicable to a state.
    type Action: Clone + PartialEq + Debug;

    /// Path cost.
    type Cost: Cost;

    /// Enumerate the actions available in `state`.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Check if `state` satisfies the goal of a search begun at `start`.
    fn is_goal(&self, start: &Self::State, state: &Self::State) -> bool;

    /// Estimate the remaining cost from `state` to a goal.
    fn heuristic(&self, state: &Self::State) -> Self::Cost;

    /// Cost of taking `action` from `from` to reach `to`.
    fn weigh(
        &self,
        start: &Self::State,
        from: &Self::State,
        to: &Self::State,
        action: &Self::Action,
    ) -> Self::Cost;

    /// Apply `action` to `state`, or `None` if it cannot be applied.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Option<Self::State>;
}

type ActionsFn<S, A> = Box<dyn Fn(&S) -> Vec<A> + Send + Sync>;
type GoalFn<S> = Box<dyn Fn(&S, &S) -> bool + Send + Sync>;
type HeuristicFn<S, C> = Box<dyn Fn(&S) -> C + Send + Sync>;
type WeighFn<S, A, C> = Box<dyn Fn(&S, &S, &S, &A) -> C + Send + Sync>;
type ApplyFn<S, A> = Box<dyn Fn(&S, &A) -> Option<S> + Send + Sync>;

/// A [`SearchProblem`] assembled from five independent closures.
///
/// Handy when a domain already has its policies as free functions, or in
/// tests.
///
/// ```
/// use turn_planner::cost::NaturalOrder;
/// use turn_planner::search::{search, FnProblem};
///
/// // Count from 0 up to 3 in steps of 1 or 2.
/// let problem = FnProblem::new(
///     |_: &u8| vec![1u8, 2],
///     |_, s| *s == 3,
///     |s| u32::from(3u8.saturating_sub(*s)),
///     |_, _, _, _| 1u32,
///     |s, step| (s + step <= 3).then(|| s + step),
/// );
///
/// let outcome = search(&problem, 0, &NaturalOrder).unwrap();
/// assert!(outcome.found);
/// assert_eq!(outcome.actions.len(), 2);
/// ```
pub struct FnProblem<S, A, C> {
    actions: ActionsFn<S, A>,
    is_goal: GoalFn<S>,
    heuristic: HeuristicFn<S, C>,
    weigh: WeighFn<S, A, C>,
    apply: ApplyFn<S, A>,
}

impl<S, A, C> FnProblem<S, A, C> {
    /// Assemble a problem from its five policies.
    pub fn new(
        actions: impl Fn(&S) -> Vec<A> + Send + Sync + 'static,
        is_goal: impl Fn(&S, &S) -> bool + Send + Sync + 'static,
        heuristic: impl Fn(&S) -> C + Send + Sync + 'static,
        weigh: impl Fn(&S, &S, &S, &A) -> C + Send + Sync + 'static,
        apply: impl Fn(&S, &A) -> Option<S> + Send + Sync + 'static,
    ) -> Self {
        Self {
            actions: Box::new(actions),
            is_goal: Box::new(is_goal),
            heuristic: Box::new(heuristic),
            weigh: Box::new(weigh),
            apply: Box::new(apply),
        }
    }
}

impl<S, A, C> SearchProblem for FnProblem<S, A, C>
where
    S: Clone + Eq + Hash + Debug,
    A: Clone + PartialEq + Debug,
    C: Cost,
{
    type State = S;
    type Action = A;
    type Cost = C;

    fn actions(&self, state: &S) -> Vec<A> {
        (self.actions)(state)
    }

    fn is_goal(&self, start: &S, state: &S) -> bool {
        (self.is_goal)(start, state)
    }

    fn heuristic(&self, state: &S) -> C {
        (self.heuristic)(state)
    }

    fn weigh(&self, start: &S, from: &S, to: &S, action: &A) -> C {
        (self.weigh)(start, from, to, action)
    }

    fn apply(&self, state: &S, action: &A) -> Option<S> {
        (self.apply)(state, action)
    }
}
