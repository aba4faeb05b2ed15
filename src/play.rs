// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matches: a game session together with whoever is playing it.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    ai::Strategist,
    config::{MatchConfig, PlayMode},
    core::Color,
    game::{GameError, GameSession, MoveResult},
};

/// Plays one full turn for the side to move, using `strategist` to pick every move. A capture that leaves the piece
/// obliged to keep capturing is followed up until the turn passes or the game ends.
pub fn play_turn<R: Rng + ?Sized>(
    session: &mut GameSession,
    strategist: &Strategist,
    rng: &mut R,
) -> Result<Vec<MoveResult>, GameError> {
    let mut results = Vec::new();
    loop {
        if session.is_over() {
            return Err(GameError::IllegalStateTransition("the game is over"));
        }

        let moves = session.legal_moves();
        let mov = strategist
            .choose_move(&moves, session.board(), rng)
            .ok_or(GameError::IllegalStateTransition("no legal moves"))?;

        let from = mov.source();
        let to = mov.destination();
        session.select(from.row() as i32, from.col() as i32)?;
        let mut result = session.move_to(to.row() as i32, to.col() as i32)?;
        while result.chain_continues {
            results.push(result);
            result = session.advance_chain()?;
        }

        let must_continue = result.must_continue;
        results.push(result);
        if !must_continue {
            return Ok(results);
        }
    }
}

/// A game session with an optional computer-controlled seat.
#[derive(Clone, Debug)]
pub struct Match {
    session: GameSession,
    mode: PlayMode,
    ai: Option<(Color, Strategist)>,
    rng: SmallRng,
}

impl Match {
    pub fn new(config: &MatchConfig) -> Match {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let ai = config
            .mode
            .ai_seat()
            .map(|(color, difficulty)| (color, Strategist::new(difficulty)));

        tracing::info!(
            "new match: {:?}, {} moves first",
            config.mode,
            config.first_to_move
        );
        Match {
            session: GameSession::new(config.first_to_move),
            mode: config.mode,
            ai,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Whether the computer is the side to move.
    pub fn ai_to_move(&self) -> bool {
        match self.ai {
            Some((color, _)) => !self.session.is_over() && self.session.turn() == color,
            None => false,
        }
    }

    /// Lets the computer play its whole turn.
    pub fn play_ai_turn(&mut self) -> Result<Vec<MoveResult>, GameError> {
        let strategist = match self.ai {
            Some((color, strategist)) if self.session.turn() == color => strategist,
            _ => return Err(GameError::IllegalStateTransition("it is not the AI's turn")),
        };

        play_turn(&mut self.session, &strategist, &mut self.rng)
    }
}
