use daily_domain::{Game, GameAttributes};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde_json::json;

use super::Factory;

const ADJECTIVES: &[&str] = &["daily", "quick", "clever", "tiny", "lucky", "bright"];
const NOUNS: &[&str] = &["puzzle", "quiz", "grid", "riddle", "ladder", "match"];

/// Games with a random kebab-case slug and a small config object.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameFactory;

impl Factory for GameFactory {
    type Entity = Game;

    fn definition(&mut self, rng: &mut dyn RngCore) -> GameAttributes {
        let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("daily");
        let noun = NOUNS.choose(rng).copied().unwrap_or("puzzle");
        let suffix: u32 = rng.gen_range(1000..10000);

        GameAttributes::default()
            .slug(format!("{adjective}-{noun}-{suffix}"))
            .name(format!("{} {}", capitalize(adjective), capitalize(noun)))
            .description(format!("A {adjective} {noun} for every day."))
            .config(json!({ "max_attempts": rng.gen_range(3..=6) }))
    }
}

pub(super) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::FactoryBuilder;
    use daily_domain::game::is_valid_slug;

    #[test]
    fn definition_builds_valid_games() {
        let mut builder = FactoryBuilder::seeded(GameFactory, 3);
        for _ in 0..20 {
            let game = builder.make(GameAttributes::default()).unwrap();
            assert!(is_valid_slug(&game.slug), "bad slug {}", game.slug);
            let attempts = game.setting("max_attempts").unwrap();
            assert!((3..=6).contains(&attempts));
        }
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("quiz"), "Quiz");
    }
}
