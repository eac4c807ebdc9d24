use chrono::Days;
use daily_domain::word_scramble::scramble;
use daily_domain::WordScrambleAttributes;

use super::catalog::{game_id, WORD_SCRAMBLE};
use super::SeedContext;
use crate::factory::{WordScrambleFactory, WORD_BANK};
use crate::persistence::{EntityStore, PersistenceError, Repositories};

/// Days of puzzles before today.
pub(super) const PAST_DAYS: u64 = 7;
/// Total puzzles seeded, starting `PAST_DAYS` before today.
pub(super) const PUZZLE_COUNT: usize = 14;

pub(super) async fn run<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    let first_date = ctx
        .today
        .checked_sub_days(Days::new(PAST_DAYS))
        .unwrap_or(ctx.today);
    let mut builder = ctx.builder(WordScrambleFactory::new(game_id(WORD_SCRAMBLE), first_date));

    for &(word, hint) in WORD_BANK.iter().take(PUZZLE_COUNT) {
        let overrides = WordScrambleAttributes::default()
            .word(word)
            .scrambled(scramble(word, ctx.rng()))
            .hint(hint.to_string());
        builder.create(repos.puzzles(), overrides).await?;
    }
    Ok(PUZZLE_COUNT.min(WORD_BANK.len()))
}
