use daily_domain::BadgeAttributes;

use super::catalog::{badge_id, game_id, BADGES};
use super::SeedContext;
use crate::factory::BadgeFactory;
use crate::persistence::{EntityStore, PersistenceError, Repositories};

/// Catalog badges. The referenced games must already exist.
pub(super) async fn run<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    for badge in BADGES {
        let attributes = ctx.builder(BadgeFactory::for_game(game_id(badge.game))).raw(
            BadgeAttributes::default()
                .slug(badge.slug)
                .name(badge.name)
                .description(badge.description)
                .threshold(badge.threshold),
        );
        repos
            .badges()
            .create_with_id(badge_id(badge.slug), attributes)
            .await?;
    }
    Ok(BADGES.len())
}
