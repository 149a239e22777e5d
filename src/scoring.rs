// Move scoring
//
// A candidate move is scored from two additive components (space, food) and three
// multipliers (head-to-head, tail, hazard):
//
//   score = (space * w_space + food * w_food) / (w_space + w_food)
//         * head_to_head * tail * hazard
//
// Every component lies in [0, 1], so the composite does too.

use serde::Serialize;
use std::fmt;

use crate::config::ScoringConfig;
use crate::flood_fill::{flood_fill, Visit};
use crate::grid::Grid;
use crate::position::surrounding;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Everything a score function reads. Borrowed for the length of one decision.
pub struct ScoreContext<'a> {
    pub grid: &'a Grid<'a>,
    pub board: &'a Board,
    pub you: &'a Battlesnake,
    pub hazard_damage_per_turn: i32,
    pub config: &'a ScoringConfig,
}

/// Why a candidate scored zero without being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    OutOfBounds,
    SnakeBody,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OutOfBounds => write!(f, "cell is out of bounds"),
            Rejection::SnakeBody => write!(f, "cell contains snake"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceScore {
    pub score: f64,
    pub open: usize,
    pub danger: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodScore {
    pub score: f64,
    /// Manhattan distance to the nearest reachable food, 0 when none is reachable
    pub distance: i32,
    pub nearest: Option<Coord>,
    pub food: f64,
    pub health: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadScore {
    pub score: f64,
    pub dangerous_heads: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub space: SpaceScore,
    pub food: FoodScore,
    pub head_to_head: HeadToHeadScore,
    pub tail: f64,
    pub hazard: f64,
    pub additive: f64,
    pub multiplicative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evaluation {
    Rejected { reason: Rejection },
    Scored(ScoreBreakdown),
}

/// One scored candidate move
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveScore {
    pub direction: Direction,
    /// Normalized target, `None` when it lies off the board
    pub target: Option<Coord>,
    pub score: f64,
    pub evaluation: Evaluation,
}

impl fmt::Display for MoveScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.4}", self.direction.as_str(), self.score)?;
        match &self.evaluation {
            Evaluation::Rejected { reason } => write!(f, " ({})", reason),
            Evaluation::Scored(b) => write!(
                f,
                " [space {:.3} open={} danger={} | food {:.3} dist={} | h2h {:.2} | tail {:.1} | hazard {:.1}]",
                b.space.score,
                b.space.open,
                b.space.danger,
                b.food.score,
                b.food.distance,
                b.head_to_head.score,
                b.tail,
                b.hazard
            ),
        }
    }
}

/// (1 - value)^exp, so small values map close to 1
fn inverse_power(value: f64, exp: i32) -> f64 {
    (1.0 - value.max(0.0).min(1.0)).powi(exp)
}

/// Reachable area from `pos`. Snake bodies bound the fill and are not counted.
/// Hazards and passable tails count as danger, worth a fraction of an open cell.
pub fn score_space(ctx: &ScoreContext, pos: Coord) -> SpaceScore {
    let mut open = 0;
    let mut danger = 0;

    let _: Option<()> = flood_fill(ctx.grid, pos, |grid, p| {
        if grid.is_blocked(p) {
            return Visit::SkipNeighbors;
        }

        if grid.is_hazard(p) || grid.snake_at(p).is_some() {
            danger += 1;
        } else {
            open += 1;
        }
        Visit::Continue
    });

    let area = ctx.grid.area().max(1) as f64;
    SpaceScore {
        score: (open as f64 + danger as f64 / ctx.config.danger_divisor) / area,
        open,
        danger,
    }
}

/// Finds the nearest food by BFS, then weighs its distance against current health.
/// Hazards are only crossed when our head already sits in one.
pub fn score_food(ctx: &ScoreContext, pos: Coord) -> FoodScore {
    let in_hazard = ctx.grid.is_hazard(ctx.you.head);

    let nearest = flood_fill(ctx.grid, pos, |grid, p| {
        let cell = match grid.cell(p) {
            Some(c) => c,
            None => return Visit::SkipNeighbors,
        };

        if cell.snake.is_some() || (cell.hazard && !in_hazard) {
            return Visit::SkipNeighbors;
        }
        if cell.food {
            return Visit::Stop(p);
        }
        Visit::Continue
    });

    let distance = nearest.map_or(0, |food| pos.manhattan(&food));
    let span = (ctx.grid.width() + ctx.grid.height()).max(1) as f64;
    let food = inverse_power(distance as f64 / span, ctx.config.food_exponent);
    let health = inverse_power(ctx.you.health as f64 / 100.0, ctx.config.health_exponent);

    FoodScore {
        score: food * health,
        distance,
        nearest,
        food,
        health,
    }
}

/// Opposing heads next to `pos` that would win or tie a head-on collision.
///
/// The divisor is the full snake count, ourselves included, so the multiplier
/// never reaches 0 even when every opponent is adjacent.
pub fn score_head_to_head(ctx: &ScoreContext, pos: Coord) -> HeadToHeadScore {
    let dangerous_heads = surrounding(pos)
        .iter()
        .filter_map(|(_, next)| ctx.grid.adjust(*next))
        .filter(|cell| match ctx.grid.snake_at(*cell) {
            Some(snake) => {
                snake.id != ctx.you.id && snake.head == *cell && snake.length >= ctx.you.length
            }
            None => false,
        })
        .count();

    let snakes = ctx.board.snakes.len();
    let score = if snakes == 0 {
        1.0
    } else {
        1.0 - dangerous_heads as f64 / snakes as f64
    };

    HeadToHeadScore {
        score: score.max(0.0),
        dangerous_heads,
    }
}

/// A tail may stay put if its snake eats this turn
fn score_tail(ctx: &ScoreContext, pos: Coord) -> f64 {
    if ctx.grid.is_passable_tail(pos) {
        ctx.config.tail_multiplier
    } else {
        1.0
    }
}

/// Hazards are a last resort, and never entered when the damage would kill us
fn score_hazard(ctx: &ScoreContext, pos: Coord) -> f64 {
    if !ctx.grid.is_hazard(pos) {
        1.0
    } else if ctx.you.health > ctx.hazard_damage_per_turn {
        ctx.config.hazard_multiplier
    } else {
        ctx.config.lethal_hazard_multiplier
    }
}

/// Scores moving in `direction` onto the unadjusted coordinate `pos`
pub fn score_move(ctx: &ScoreContext, direction: Direction, pos: Coord) -> MoveScore {
    let target = match ctx.grid.adjust(pos) {
        Some(t) => t,
        None => {
            return MoveScore {
                direction,
                target: None,
                score: 0.0,
                evaluation: Evaluation::Rejected {
                    reason: Rejection::OutOfBounds,
                },
            }
        }
    };

    if ctx.grid.is_blocked(target) {
        return MoveScore {
            direction,
            target: Some(target),
            score: 0.0,
            evaluation: Evaluation::Rejected {
                reason: Rejection::SnakeBody,
            },
        };
    }

    let space = score_space(ctx, target);
    let food = score_food(ctx, target);
    let head_to_head = score_head_to_head(ctx, target);
    let tail = score_tail(ctx, target);
    let hazard = score_hazard(ctx, target);

    let cfg = ctx.config;
    let total_weight = cfg.total_additive_weight();
    let additive = space.score * (cfg.space_weight / total_weight)
        + food.score * (cfg.food_weight / total_weight);
    let multiplicative = head_to_head.score * tail * hazard;

    MoveScore {
        direction,
        target: Some(target),
        score: (additive * multiplicative).max(0.0),
        evaluation: Evaluation::Scored(ScoreBreakdown {
            space,
            food,
            head_to_head,
            tail,
            hazard,
            additive,
            multiplicative,
        }),
    }
}
