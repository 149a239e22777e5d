// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Each turn is decided fresh from the request: build a grid, score the four
// moves, take the best. Nothing carries over between turns.

use log::{debug, info};
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::{Config, ScoringConfig};
use crate::debug_logger::DebugLogger;
use crate::grid::Grid;
use crate::position::surrounding;
use crate::scoring::{score_move, MoveScore, ScoreContext};
use crate::types::{Battlesnake, Board, Direction, Game, GameState, RulesetKind};

/// Result of one move decision
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    pub score: f64,
    /// All four candidates, best first
    pub candidates: Vec<MoveScore>,
}

impl Decision {
    /// Short diagnostic for the `shout` field
    pub fn summary(&self) -> String {
        format!("{} {:.3}", self.direction.as_str(), self.score)
    }
}

/// Scores every move from our head and picks the highest.
///
/// Candidates are sorted with a stable sort, so ties go to the earlier of
/// right, left, up, down. When every move scores 0 the first one is still
/// returned; a trapped snake moves rather than failing the request.
pub fn choose_move(state: &GameState, config: &ScoringConfig, verbose: bool) -> Decision {
    let ruleset = RulesetKind::from_name(&state.game.ruleset.name);
    let grid = Grid::build(&state.board, ruleset);
    let ctx = ScoreContext {
        grid: &grid,
        board: &state.board,
        you: &state.you,
        hazard_damage_per_turn: state.game.ruleset.settings.hazard_damage_per_turn,
        config,
    };

    let mut candidates: Vec<MoveScore> = surrounding(state.you.head)
        .iter()
        .map(|(direction, pos)| score_move(&ctx, *direction, *pos))
        .collect();
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    for candidate in &candidates {
        if verbose {
            info!("Turn {}: {}", state.turn, candidate);
        } else {
            debug!("Turn {}: {}", state.turn, candidate);
        }
    }

    Decision {
        direction: candidates[0].direction,
        score: candidates[0].score,
        candidates,
    }
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that writes every decision to `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "GAME START {} ({} ruleset, {}x{}, {} snakes)",
            game.id,
            game.ruleset.name,
            board.width,
            board.height,
            board.snakes.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction and a short diagnostic
    pub fn get_move(&self, state: &GameState) -> Value {
        let start_time = Instant::now();

        let decision = choose_move(
            state,
            &self.config.scoring,
            self.config.debug.verbose_decisions,
        );

        info!(
            "[{}] Head: ({}, {}) | Move: {} {:.4} | time: {}us",
            state.turn,
            state.you.head.x,
            state.you.head.y,
            decision.direction.as_str(),
            decision.score,
            start_time.elapsed().as_micros()
        );

        self.debug_logger
            .log_move(state, &decision, self.config.scoring.version);

        json!({ "move": decision.direction.as_str(), "shout": decision.summary() })
    }
}
