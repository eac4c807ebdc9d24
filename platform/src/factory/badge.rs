use daily_domain::{Badge, BadgeAttributes, UserBadge, UserBadgeAttributes};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::game::capitalize;
use super::Factory;

const THEMES: &[&str] = &["streak", "speed", "master", "rookie", "marathon", "perfect"];

/// Badges belonging to one game.
#[derive(Debug, Clone)]
pub struct BadgeFactory {
    game_id: String,
}

impl BadgeFactory {
    pub fn for_game(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
        }
    }
}

impl Factory for BadgeFactory {
    type Entity = Badge;

    fn definition(&mut self, rng: &mut dyn RngCore) -> BadgeAttributes {
        let theme = THEMES.choose(rng).copied().unwrap_or("streak");
        let threshold: i64 = rng.gen_range(1..=30);
        let suffix: u32 = rng.gen_range(1000..10000);

        BadgeAttributes::default()
            .game_id(self.game_id.clone())
            .slug(format!("{theme}-{threshold}-{suffix}"))
            .name(format!("{} {threshold}", capitalize(theme)))
            .description(format!("Reach {threshold} qualifying plays."))
            .threshold(threshold)
    }
}

/// Awards of one badge to one user.
#[derive(Debug, Clone)]
pub struct UserBadgeFactory {
    user_id: String,
    badge_id: String,
}

impl UserBadgeFactory {
    pub fn award(user_id: impl Into<String>, badge_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            badge_id: badge_id.into(),
        }
    }
}

impl Factory for UserBadgeFactory {
    type Entity = UserBadge;

    fn definition(&mut self, _rng: &mut dyn RngCore) -> UserBadgeAttributes {
        UserBadgeAttributes::default()
            .user_id(self.user_id.clone())
            .badge_id(self.badge_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{FactoryBuilder, GameFactory, UserFactory};
    use crate::persistence::{ConstraintKind, Database, Repositories, Repository, SqliteStore};
    use daily_domain::{GameAttributes, UserAttributes};

    #[test]
    fn badge_definition_is_valid() {
        let mut builder = FactoryBuilder::seeded(BadgeFactory::for_game("g1"), 9);
        for _ in 0..20 {
            let badge = builder.make(BadgeAttributes::default()).unwrap();
            assert_eq!(badge.game_id, "g1");
            assert!(badge.threshold >= 1);
            assert!(badge.is_earned_by(badge.threshold));
        }
    }

    #[tokio::test]
    async fn award_is_persisted_once() {
        let db = Database::new_in_memory().await.unwrap();
        let repos = Repositories::bind(SqliteStore::from_database(&db));
        let game = FactoryBuilder::new(GameFactory)
            .create(repos.games(), GameAttributes::default())
            .await
            .unwrap();
        let badge = FactoryBuilder::new(BadgeFactory::for_game(&game.id))
            .create(repos.badges(), BadgeAttributes::default())
            .await
            .unwrap();
        let user = FactoryBuilder::new(UserFactory::new())
            .create(repos.users(), UserAttributes::default())
            .await
            .unwrap();

        let mut awards = FactoryBuilder::new(UserBadgeFactory::award(&user.id, &badge.id));
        let award = awards
            .create(repos.user_badges(), UserBadgeAttributes::default())
            .await
            .unwrap();
        assert_eq!(repos.user_badges().all().await.unwrap(), vec![award]);

        let err = awards
            .create(repos.user_badges(), UserBadgeAttributes::default())
            .await
            .unwrap_err();
        assert_eq!(err.constraint(), Some(ConstraintKind::Unique));
    }
}
