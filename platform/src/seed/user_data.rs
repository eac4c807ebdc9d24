//! Play history, awards and extra accounts so the app has something to show.

use chrono::{Days, Duration, NaiveDate};
use daily_domain::{
    GameResultAttributes, GuestAttributes, Player, User, UserAttributes, UserBadgeAttributes,
};
use rand::seq::SliceRandom;
use rand::Rng;

use super::catalog::{game_id, GAMES, WORD_SCRAMBLE};
use super::word_scramble::PAST_DAYS;
use super::{SeedContext, TEST_USER_EMAIL};
use crate::factory::{
    GameResultFactory, GuestFactory, UserBadgeFactory, UserFactory, EXPIRED_AGE_DAYS,
};
use crate::persistence::{EntityStore, PersistenceError, Repositories};

const USER_COUNT: usize = 10;
const UNVERIFIED_USERS: usize = 2;
const GUEST_COUNT: usize = 5;
const EXPIRED_GUESTS: usize = 2;
const MAX_PLAYS_PER_USER: usize = 3;

pub(super) async fn run<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    let test_user = match ctx.test_user.clone() {
        Some(user) => user,
        None => repos.users().find_by_email(TEST_USER_EMAIL).await?,
    };

    let mut created = test_user_history(repos, ctx, &test_user).await?;
    created += users(repos, ctx).await?;
    created += guests(repos, ctx).await?;
    Ok(created)
}

/// A solved scramble on each of the last `PAST_DAYS` days, plus every word
/// scramble badge whose threshold that history reaches.
async fn test_user_history<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
    user: &User,
) -> Result<usize, PersistenceError> {
    let scramble_game = game_id(WORD_SCRAMBLE);
    let puzzles = repos
        .puzzles()
        .where_column("game_id", scramble_game.as_str())
        .await?;

    let mut created = 0;
    let mut solved = 0;
    for days_ago in (1..=PAST_DAYS).rev() {
        let date = days_before(ctx.today, days_ago);
        let puzzle_id = puzzles
            .iter()
            .find(|puzzle| puzzle.puzzle_date == date)
            .map(|puzzle| puzzle.id.clone());
        let played_at = date
            .and_hms_opt(12, 0, 0)
            .map_or(ctx.now, |noon| noon.and_utc());

        let result = ctx
            .builder(GameResultFactory::new(
                &scramble_game,
                Player::User(user.id.clone()),
                date,
            ))
            .state(GameResultFactory::completed())
            .create(
                repos.results(),
                GameResultAttributes::default()
                    .puzzle_id(puzzle_id)
                    .created_at(played_at),
            )
            .await?;
        created += 1;
        if result.completed {
            solved += 1;
        }
    }

    let badges = repos
        .badges()
        .where_column("game_id", scramble_game.as_str())
        .await?;
    for badge in badges.iter().filter(|badge| badge.is_earned_by(solved)) {
        ctx.builder(UserBadgeFactory::award(&user.id, &badge.id))
            .create(
                repos.user_badges(),
                UserBadgeAttributes::default().awarded_at(ctx.now),
            )
            .await?;
        created += 1;
    }
    Ok(created)
}

async fn users<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    let mut users = ctx
        .builder(UserFactory::new())
        .create_many(
            repos.users(),
            USER_COUNT - UNVERIFIED_USERS,
            UserAttributes::default(),
        )
        .await?;
    users.extend(
        ctx.builder(UserFactory::new())
            .state(UserFactory::unverified())
            .create_many(repos.users(), UNVERIFIED_USERS, UserAttributes::default())
            .await?,
    );

    let mut created = users.len();
    for user in &users {
        let plays = ctx.rng().gen_range(1..=MAX_PLAYS_PER_USER);
        for _ in 0..plays {
            let slug = GAMES
                .choose(ctx.rng())
                .map_or(WORD_SCRAMBLE, |game| game.slug);
            let date = days_before(ctx.today, ctx.rng().gen_range(0..=PAST_DAYS));
            ctx.builder(GameResultFactory::new(
                game_id(slug),
                Player::User(user.id.clone()),
                date,
            ))
            .create(repos.results(), GameResultAttributes::default())
            .await?;
            created += 1;
        }
    }
    Ok(created)
}

/// Active guests with one play today, and expired guests with an abandoned
/// play from the day they were created.
async fn guests<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    let trivia = game_id(super::catalog::DAILY_TRIVIA);
    let active = ctx
        .builder(GuestFactory)
        .create_many(repos.guests(), GUEST_COUNT, GuestAttributes::default())
        .await?;
    let expired = ctx
        .builder(GuestFactory)
        .state(GuestFactory::expired(ctx.now))
        .create_many(repos.guests(), EXPIRED_GUESTS, GuestAttributes::default())
        .await?;

    let mut created = active.len() + expired.len();
    for guest in &active {
        ctx.builder(GameResultFactory::new(
            &trivia,
            Player::Guest(guest.id.clone()),
            ctx.today,
        ))
        .create(repos.results(), GameResultAttributes::default())
        .await?;
        created += 1;
    }

    let stale_day = (ctx.now - Duration::days(EXPIRED_AGE_DAYS)).date_naive();
    for guest in &expired {
        ctx.builder(GameResultFactory::new(
            &trivia,
            Player::Guest(guest.id.clone()),
            stale_day,
        ))
        .state(GameResultFactory::abandoned())
        .create(
            repos.results(),
            GameResultAttributes::default().created_at(guest.created_at),
        )
        .await?;
        created += 1;
    }
    Ok(created)
}

fn days_before(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(days)).unwrap_or(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::catalog::{badge_id, FIRST_SCRAMBLE, SCRAMBLE_STREAK};
    use crate::persistence::{Database, Repository, SqliteStore};
    use crate::seed::{DatabaseSeeder, SeedUnit};

    async fn seeded() -> (Database, Repositories) {
        let db = Database::new_in_memory().await.unwrap();
        let repos = Repositories::bind(SqliteStore::from_database(&db));
        DatabaseSeeder::new(Some(21)).run(&repos).await.unwrap();
        (db, repos)
    }

    #[tokio::test]
    async fn test_user_has_a_week_of_linked_wins() {
        let (_db, repos) = seeded().await;
        let user = repos.users().find_by_email(TEST_USER_EMAIL).await.unwrap();

        let history = repos
            .results()
            .where_column("user_id", user.id.as_str())
            .await
            .unwrap();
        assert_eq!(history.len(), PAST_DAYS as usize);
        assert!(history.iter().all(|r| r.completed && r.puzzle_id.is_some()));

        let awards = repos
            .user_badges()
            .where_column("user_id", user.id.as_str())
            .await
            .unwrap();
        let mut badge_ids: Vec<_> = awards.into_iter().map(|a| a.badge_id).collect();
        badge_ids.sort();
        let mut expected = vec![badge_id(FIRST_SCRAMBLE), badge_id(SCRAMBLE_STREAK)];
        expected.sort();
        assert_eq!(badge_ids, expected);
    }

    #[tokio::test]
    async fn extra_users_and_guests_are_created() {
        let (_db, repos) = seeded().await;
        let users = repos.users().all().await.unwrap();
        assert_eq!(users.len(), USER_COUNT + 1);
        assert_eq!(users.iter().filter(|u| !u.is_verified()).count(), UNVERIFIED_USERS);

        let now = daily_domain::now();
        assert_eq!(repos.guests().count().await.unwrap(), (GUEST_COUNT + EXPIRED_GUESTS) as u64);
        assert_eq!(repos.guests().expired(now).await.unwrap().len(), EXPIRED_GUESTS);

        let before = repos.results().count().await.unwrap();
        assert_eq!(repos.guests().prune_expired(now).await.unwrap(), EXPIRED_GUESTS);
        assert_eq!(
            repos.results().count().await.unwrap(),
            before - EXPIRED_GUESTS as u64
        );
    }

    #[tokio::test]
    async fn runs_without_puzzles() {
        let db = Database::new_in_memory().await.unwrap();
        let repos = Repositories::bind(SqliteStore::from_database(&db));
        let units = vec![
            SeedUnit::TestUser,
            SeedUnit::Games,
            SeedUnit::Badges,
            SeedUnit::UserData,
        ];
        DatabaseSeeder::with_units(units, None)
            .run(&repos)
            .await
            .unwrap();
        assert_eq!(repos.puzzles().count().await.unwrap(), 0);
        assert!(repos
            .results()
            .find_where(|r| r.puzzle_id.is_some())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_user_gets_no_awards_without_badges() {
        let db = Database::new_in_memory().await.unwrap();
        let repos = Repositories::bind(SqliteStore::from_database(&db));
        let units = vec![SeedUnit::TestUser, SeedUnit::Games, SeedUnit::UserData];
        DatabaseSeeder::with_units(units, None)
            .run(&repos)
            .await
            .unwrap();

        let user = repos.users().find_by_email(TEST_USER_EMAIL).await.unwrap();
        assert!(repos
            .user_badges()
            .where_column("user_id", user.id.as_str())
            .await
            .unwrap()
            .is_empty());
    }
}
