//! Tactics board state and rules.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, SearchError};

/// Which side a unit fights for. The searching side is always `Ally`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Ally,
    Enemy,
}

/// Grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Manhattan distance.
    #[must_use]
    pub fn distance(self, other: Pos) -> u8 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

/// A unit on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub id: u8,
    pub side: Side,
    pub pos: Pos,
    pub hp: u8,
    pub attack: u8,
    pub move_range: u8,
    /// Has moved this turn.
    pub moved: bool,
    /// Has attacked this turn (also forbids moving afterwards).
    pub acted: bool,
}

impl Unit {
    /// Create a fresh unit with no actions spent.
    #[must_use]
    pub fn new(id: u8, side: Side, pos: Pos) -> Self {
        Self {
            id,
            side,
            pos,
            hp: 3,
            attack: 1,
            move_range: 1,
            moved: false,
            acted: false,
        }
    }

    #[must_use]
    pub fn with_hp(mut self, hp: u8) -> Self {
        self.hp = hp;
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: u8) -> Self {
        self.attack = attack;
        self
    }

    #[must_use]
    pub fn with_move_range(mut self, range: u8) -> Self {
        self.move_range = range;
        self
    }

    /// Whether the unit may still move this turn.
    #[must_use]
    pub fn can_move(&self) -> bool {
        !self.moved && !self.acted
    }

    /// Farthest distance this unit can still strike from this turn.
    #[must_use]
    pub fn strike_reach(&self) -> u8 {
        if self.acted {
            0
        } else if self.can_move() {
            self.move_range.saturating_add(1)
        } else {
            1
        }
    }

    /// Distance at which an enemy unit threatens others on its next turn.
    #[must_use]
    pub fn threat_reach(&self) -> u8 {
        self.move_range.saturating_add(1)
    }
}

/// One atomic choice during the allied turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TacticsAction {
    /// Move an allied unit to an empty cell within its range.
    Move { unit: u8, to: Pos },
    /// Strike an adjacent enemy. A surviving target strikes back.
    Attack { unit: u8, target: u8 },
    /// Finish the turn.
    EndTurn,
}

/// Complete state of one allied turn.
///
/// Units are kept sorted by id so equal positions hash equally no matter
/// which order the actions were taken in. Dead units are removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    units: SmallVec<[Unit; 8]>,
    turn_over: bool,
}

/// Parameters for [`Board::random`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomBoardSpec {
    pub width: u8,
    pub height: u8,
    pub allies: u8,
    pub enemies: u8,
    pub max_hp: u8,
    pub max_attack: u8,
}

impl Default for RandomBoardSpec {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            allies: 2,
            enemies: 2,
            max_hp: 3,
            max_attack: 2,
        }
    }
}

impl RandomBoardSpec {
    /// Check that the spec describes a board [`Board::random`] can fill.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the board is narrower than
    /// two columns, either half cannot hold its side, there are more than
    /// 255 units in total, or `max_hp`/`max_attack` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width < 2 {
            return Err(SearchError::InvalidConfig(format!(
                "random board needs at least 2 columns, got {}",
                self.width
            )));
        }
        if self.max_hp == 0 || self.max_attack == 0 {
            return Err(SearchError::InvalidConfig(
                "random units need max_hp and max_attack of at least 1".to_string(),
            ));
        }
        let total = u16::from(self.allies) + u16::from(self.enemies);
        if total > u16::from(u8::MAX) {
            return Err(SearchError::InvalidConfig(format!(
                "at most 255 units fit in a unit id, got {total}"
            )));
        }

        let half = self.width / 2;
        let height = usize::from(self.height);
        for (side, count, columns) in [
            ("allies", self.allies, usize::from(half)),
            ("enemies", self.enemies, usize::from(self.width - half)),
        ] {
            let cells = columns * height;
            if usize::from(count) > cells {
                return Err(SearchError::InvalidConfig(format!(
                    "{count} {side} do not fit in {cells} cells"
                )));
            }
        }
        Ok(())
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            units: SmallVec::new(),
            turn_over: false,
        }
    }

    /// Add a unit, builder style.
    ///
    /// # Panics
    ///
    /// Panics if the id is taken, or the cell is occupied or off the board.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        assert!(self.in_bounds(unit.pos), "unit {} placed off the board", unit.id);
        assert!(self.unit_at(unit.pos).is_none(), "cell {:?} already occupied", unit.pos);
        assert!(self.unit(unit.id).is_none(), "unit id {} already used", unit.id);
        self.units.push(unit);
        self.units.sort_by_key(|u| u.id);
        self
    }

    /// Generate a deterministic scenario from a seed.
    ///
    /// Allies are placed in the left half, enemies in the right half. Each
    /// unit takes a cell drawn from the cells of its half still free.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the spec fails
    /// [`RandomBoardSpec::validate`].
    pub fn random(seed: u64, spec: &RandomBoardSpec) -> Result<Self> {
        spec.validate()?;

        let half = spec.width / 2;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::new(spec.width, spec.height);
        let mut next_id = 0u8;

        for (side, count, columns) in [
            (Side::Ally, spec.allies, 0..half),
            (Side::Enemy, spec.enemies, half..spec.width),
        ] {
            let mut free: Vec<Pos> = columns
                .flat_map(|x| (0..spec.height).map(move |y| Pos::new(x, y)))
                .collect();
            for _ in 0..count {
                let pos = free.swap_remove(rng.gen_range(0..free.len()));
                let unit = Unit::new(next_id, side, pos)
                    .with_hp(rng.gen_range(1..=spec.max_hp))
                    .with_attack(rng.gen_range(1..=spec.max_attack));
                board = board.with_unit(unit);
                next_id = next_id.saturating_add(1);
            }
        }

        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the allied turn has ended.
    #[must_use]
    pub fn is_turn_over(&self) -> bool {
        self.turn_over
    }

    /// All living units, sorted by id.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Living units of one side.
    pub fn side(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.side == side)
    }

    /// Get a unit by id.
    #[must_use]
    pub fn unit(&self, id: u8) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Get the unit standing on a cell.
    #[must_use]
    pub fn unit_at(&self, pos: Pos) -> Option<&Unit> {
        self.units.iter().find(|u| u.pos == pos)
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Legal actions for the allied side. Empty once the turn is over.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<TacticsAction> {
        if self.turn_over {
            return Vec::new();
        }

        let mut actions = Vec::new();
        for unit in self.side(Side::Ally) {
            if unit.can_move() {
                for y in 0..self.height {
                    for x in 0..self.width {
                        let to = Pos::new(x, y);
                        let dist = unit.pos.distance(to);
                        if dist > 0 && dist <= unit.move_range && self.unit_at(to).is_none() {
                            actions.push(TacticsAction::Move { unit: unit.id, to });
                        }
                    }
                }
            }
            if !unit.acted {
                for enemy in self.side(Side::Enemy) {
                    if unit.pos.distance(enemy.pos) == 1 {
                        actions.push(TacticsAction::Attack {
                            unit: unit.id,
                            target: enemy.id,
                        });
                    }
                }
            }
        }
        actions.push(TacticsAction::EndTurn);
        actions
    }

    /// Apply an action, returning the resulting board or `None` if illegal.
    #[must_use]
    pub fn apply(&self, action: &TacticsAction) -> Option<Board> {
        if self.turn_over {
            return None;
        }

        let mut next = self.clone();
        match *action {
            TacticsAction::Move { unit, to } => {
                let mover = self.unit(unit)?;
                let dist = mover.pos.distance(to);
                if mover.side != Side::Ally
                    || !mover.can_move()
                    || dist == 0
                    || dist > mover.move_range
                    || !self.in_bounds(to)
                    || self.unit_at(to).is_some()
                {
                    return None;
                }
                let m = next.unit_mut(unit)?;
                m.pos = to;
                m.moved = true;
            }
            TacticsAction::Attack { unit, target } => {
                let attacker = self.unit(unit)?;
                let defender = self.unit(target)?;
                if attacker.side != Side::Ally
                    || defender.side != Side::Enemy
                    || attacker.acted
                    || attacker.pos.distance(defender.pos) != 1
                {
                    return None;
                }

                let defender_hp = defender.hp.saturating_sub(attacker.attack);
                let attacker_hp = if defender_hp > 0 {
                    attacker.hp.saturating_sub(defender.attack)
                } else {
                    attacker.hp
                };

                let a = next.unit_mut(unit)?;
                a.hp = attacker_hp;
                a.acted = true;
                next.unit_mut(target)?.hp = defender_hp;
                next.units.retain(|u| u.hp > 0);
            }
            TacticsAction::EndTurn => {
                next.turn_over = true;
            }
        }
        Some(next)
    }

    /// Number of allies within an enemy's threat reach.
    #[must_use]
    pub fn allies_at_risk(&self) -> usize {
        self.side(Side::Ally)
            .filter(|ally| {
                self.side(Side::Enemy)
                    .any(|enemy| ally.pos.distance(enemy.pos) <= enemy.threat_reach())
            })
            .count()
    }

    fn unit_mut(&mut self, id: u8) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }
}
