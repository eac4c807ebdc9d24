use chrono::NaiveDate;
use daily_domain::{GameResult, GameResultAttributes, Player};
use rand::{Rng, RngCore};

use super::{Factory, State};

/// Results for one game and one player, played on a fixed date.
#[derive(Debug, Clone)]
pub struct GameResultFactory {
    game_id: String,
    player: Player,
    played_on: NaiveDate,
}

impl GameResultFactory {
    pub fn new(game_id: impl Into<String>, player: Player, played_on: NaiveDate) -> Self {
        Self {
            game_id: game_id.into(),
            player,
            played_on,
        }
    }

    pub fn completed() -> State<GameResultAttributes> {
        State::new("completed", |attrs: GameResultAttributes| attrs.completed(true))
    }

    /// Gave up: incomplete with no score.
    pub fn abandoned() -> State<GameResultAttributes> {
        State::new("abandoned", |attrs: GameResultAttributes| {
            attrs.completed(false).score(0)
        })
    }
}

impl Factory for GameResultFactory {
    type Entity = GameResult;

    fn definition(&mut self, rng: &mut dyn RngCore) -> GameResultAttributes {
        GameResultAttributes::default()
            .game_id(self.game_id.clone())
            .for_player(self.player.clone())
            .score(rng.gen_range(0..=1000i64))
            .completed(rng.gen_bool(0.7))
            .played_on(self.played_on)
    }
}
