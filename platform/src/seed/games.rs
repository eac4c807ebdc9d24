use daily_domain::GameAttributes;
use serde_json::json;

use super::catalog::{game_id, GAMES};
use super::SeedContext;
use crate::factory::GameFactory;
use crate::persistence::{EntityStore, PersistenceError, Repositories};

pub(super) async fn run<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    let mut builder = ctx.builder(GameFactory);
    for game in GAMES {
        let attributes = builder.raw(
            GameAttributes::default()
                .slug(game.slug)
                .name(game.name)
                .description(game.description)
                .config(json!({ "max_attempts": game.max_attempts })),
        );
        let seeded = repos
            .games()
            .create_with_id(game_id(game.slug), attributes)
            .await?;
        tracing::debug!(
            slug = %seeded.slug,
            max_attempts = ?seeded.setting("max_attempts"),
            "Seeded game"
        );
    }
    Ok(GAMES.len())
}
