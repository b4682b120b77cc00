//! Tactics turn as a search problem.

use serde::{Deserialize, Serialize};

use crate::cost::{PenaltyKind, PenaltyVector, Personality};
use crate::decision::Planner;
use crate::search::{SearchConfig, SearchProblem};

use super::board::{Board, Side, TacticsAction};

/// Tuning for the tactics adapter.
///
/// Multipliers applied to the raw penalty counts before any comparator sees
/// them. Owned by the problem, never global.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticsTuning {
    /// Charged as `Actions` for every non-final action.
    pub step_penalty: u32,
    /// `AlliesLost` charged per ally lost during the turn.
    pub loss_penalty: u32,
    /// `AlliesAtRisk` charged per ally left within enemy reach.
    pub risk_penalty: u32,
    /// Heuristic `AlliesAtRisk` per ally currently within enemy reach.
    ///
    /// Non-zero values overestimate (an ally may still retreat) and trade
    /// optimality for fewer expansions. 0 keeps the heuristic admissible.
    pub threat_bias: u32,
}

impl Default for TacticsTuning {
    fn default() -> Self {
        Self {
            step_penalty: 1,
            loss_penalty: 1,
            risk_penalty: 1,
            threat_bias: 0,
        }
    }
}

impl TacticsTuning {
    /// Set the cost of each intermediate action.
    #[must_use]
    pub fn with_step_penalty(mut self, penalty: u32) -> Self {
        self.step_penalty = penalty;
        self
    }

    /// Set the penalty per ally lost during the turn.
    #[must_use]
    pub fn with_loss_penalty(mut self, penalty: u32) -> Self {
        self.loss_penalty = penalty;
        self
    }

    /// Set the penalty per ally left within enemy reach.
    #[must_use]
    pub fn with_risk_penalty(mut self, penalty: u32) -> Self {
        self.risk_penalty = penalty;
        self
    }

    /// Set the heuristic weight per ally currently within enemy reach.
    #[must_use]
    pub fn with_threat_bias(mut self, bias: u32) -> Self {
        self.threat_bias = bias;
        self
    }
}

/// Plans one allied turn on a [`Board`].
///
/// The goal is any board whose turn has ended. Intermediate actions cost
/// `step_penalty` each; ending the turn costs the evaluation of the final
/// board relative to the start of the turn.
#[derive(Clone, Debug, Default)]
pub struct TacticsProblem {
    tuning: TacticsTuning,
}

impl TacticsProblem {
    /// Create a problem with the given tuning.
    #[must_use]
    pub fn new(tuning: TacticsTuning) -> Self {
        Self { tuning }
    }

    /// Get the tuning.
    #[must_use]
    pub fn tuning(&self) -> &TacticsTuning {
        &self.tuning
    }

    /// Get mutable access to the tuning.
    pub fn tuning_mut(&mut self) -> &mut TacticsTuning {
        &mut self.tuning
    }

    /// Penalties for ending the turn on `board`, having started on `start`.
    #[must_use]
    pub fn evaluate(&self, start: &Board, board: &Board) -> PenaltyVector {
        let enemies_left = count(board.side(Side::Enemy).count());
        let enemy_health = board.side(Side::Enemy).map(|u| u32::from(u.hp)).sum();
        let allies_lost = count(
            start
                .side(Side::Ally)
                .count()
                .saturating_sub(board.side(Side::Ally).count()),
        );
        let at_risk = count(board.allies_at_risk());

        PenaltyVector::zero()
            .with(PenaltyKind::EnemiesLeft, enemies_left)
            .with(PenaltyKind::EnemyHealth, enemy_health)
            .with(
                PenaltyKind::AlliesLost,
                allies_lost.saturating_mul(self.tuning.loss_penalty),
            )
            .with(
                PenaltyKind::AlliesAtRisk,
                at_risk.saturating_mul(self.tuning.risk_penalty),
            )
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl SearchProblem for TacticsProblem {
    type State = Board;
    type Action = TacticsAction;
    type Cost = PenaltyVector;

    fn actions(&self, state: &Board) -> Vec<TacticsAction> {
        state.legal_actions()
    }

    fn is_goal(&self, _start: &Board, state: &Board) -> bool {
        state.is_turn_over()
    }

    /// Enemies no allied unit can still strike this turn are certain to
    /// remain at full health, so they are charged up front. The optional
    /// threat bias is added on top.
    fn heuristic(&self, state: &Board) -> PenaltyVector {
        if state.is_turn_over() {
            return PenaltyVector::zero();
        }

        let mut estimate = PenaltyVector::zero();
        for enemy in state.side(Side::Enemy) {
            let reachable = state
                .side(Side::Ally)
                .any(|ally| ally.pos.distance(enemy.pos) <= ally.strike_reach());
            if !reachable {
                estimate[PenaltyKind::EnemiesLeft] += 1;
                estimate[PenaltyKind::EnemyHealth] += u32::from(enemy.hp);
            }
        }

        if self.tuning.threat_bias > 0 {
            estimate[PenaltyKind::AlliesAtRisk] =
                count(state.allies_at_risk()).saturating_mul(self.tuning.threat_bias);
        }
        estimate
    }

    fn weigh(
        &self,
        start: &Board,
        _from: &Board,
        to: &Board,
        action: &TacticsAction,
    ) -> PenaltyVector {
        match action {
            TacticsAction::EndTurn => self.evaluate(start, to),
            _ => PenaltyVector::of(PenaltyKind::Actions, self.tuning.step_penalty),
        }
    }

    fn apply(&self, state: &Board, action: &TacticsAction) -> Option<Board> {
        state.apply(action)
    }
}

/// A tactics planner that ends the turn when nothing better is found.
pub fn tactics_planner(
    tuning: TacticsTuning,
    personality: Personality,
    config: SearchConfig,
) -> Planner<TacticsProblem, Personality> {
    Planner::new(TacticsProblem::new(tuning), personality, config)
        .with_fallback(TacticsAction::EndTurn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tactics::{Pos, Unit};

    #[test]
    fn test_evaluate_counts_losses_from_start() {
        let start = Board::new(4, 1)
            .with_unit(Unit::new(0, Side::Ally, Pos::new(0, 0)).with_hp(1))
            .with_unit(Unit::new(1, Side::Ally, Pos::new(3, 0)))
            .with_unit(Unit::new(2, Side::Enemy, Pos::new(1, 0)).with_hp(2).with_attack(2));
        let after = start.apply(&TacticsAction::Attack { unit: 0, target: 2 }).unwrap();

        let problem = TacticsProblem::default();
        let eval = problem.evaluate(&start, &after);

        assert_eq!(eval.get(PenaltyKind::EnemiesLeft), 1);
        assert_eq!(eval.get(PenaltyKind::EnemyHealth), 1);
        assert_eq!(eval.get(PenaltyKind::AlliesLost), 1);
        // Unit 1 is two cells from the enemy.
        assert_eq!(eval.get(PenaltyKind::AlliesAtRisk), 1);
        assert_eq!(eval.get(PenaltyKind::Actions), 0);
    }

    #[test]
    fn test_tuning_scales_penalties() {
        let start = Board::new(3, 1)
            .with_unit(Unit::new(0, Side::Ally, Pos::new(0, 0)))
            .with_unit(Unit::new(1, Side::Enemy, Pos::new(2, 0)));
        let problem = TacticsProblem::new(TacticsTuning::default().with_risk_penalty(7));

        assert_eq!(problem.evaluate(&start, &start).get(PenaltyKind::AlliesAtRisk), 7);

        let step = problem.weigh(
            &start,
            &start,
            &start,
            &TacticsAction::Move { unit: 0, to: Pos::new(1, 0) },
        );
        assert_eq!(step, PenaltyVector::of(PenaltyKind::Actions, 1));
    }

    #[test]
    fn test_heuristic_charges_unreachable_enemies() {
        let board = Board::new(8, 1)
            .with_unit(Unit::new(0, Side::Ally, Pos::new(0, 0)))
            .with_unit(Unit::new(1, Side::Enemy, Pos::new(2, 0)).with_hp(2))
            .with_unit(Unit::new(2, Side::Enemy, Pos::new(7, 0)).with_hp(3));
        let problem = TacticsProblem::default();

        let h = problem.heuristic(&board);
        assert_eq!(h.get(PenaltyKind::EnemiesLeft), 1);
        assert_eq!(h.get(PenaltyKind::EnemyHealth), 3);

        let ended = board.apply(&TacticsAction::EndTurn).unwrap();
        assert!(problem.heuristic(&ended).is_zero());
    }

    #[test]
    fn test_threat_bias() {
        let board = Board::new(3, 1)
            .with_unit(Unit::new(0, Side::Ally, Pos::new(0, 0)))
            .with_unit(Unit::new(1, Side::Enemy, Pos::new(1, 0)));

        let plain = TacticsProblem::default();
        let biased = TacticsProblem::new(TacticsTuning::default().with_threat_bias(4));

        assert_eq!(plain.heuristic(&board).get(PenaltyKind::AlliesAtRisk), 0);
        assert_eq!(biased.heuristic(&board).get(PenaltyKind::AlliesAtRisk), 4);
    }

    #[test]
    fn test_goal_is_turn_over() {
        let board = Board::new(2, 2);
        let problem = TacticsProblem::default();

        assert!(!problem.is_goal(&board, &board));
        let ended = problem.apply(&board, &TacticsAction::EndTurn).unwrap();
        assert!(problem.is_goal(&board, &ended));
    }
}
