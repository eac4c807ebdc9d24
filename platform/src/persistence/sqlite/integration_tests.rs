use chrono::NaiveDate;
use daily_domain::{
    BadgeAttributes, Game, GameAttributes, GameResultAttributes, Guest, GuestAttributes, Player,
    User, UserAttributes, UserBadgeAttributes, WordScrambleAttributes,
};

use super::{Database, SqliteStore};
use crate::persistence::{ConstraintKind, Repositories, Repository};

async fn test_repos() -> (Database, Repositories) {
    let db = Database::new_in_memory().await.unwrap();
    let repos = Repositories::bind(SqliteStore::from_database(&db));
    (db, repos)
}

async fn sample_game(repos: &Repositories) -> Game {
    repos
        .games()
        .create(
            GameAttributes::default()
                .slug("word-scramble")
                .name("Word Scramble"),
        )
        .await
        .unwrap()
}

async fn sample_user(repos: &Repositories, email: &str) -> User {
    repos
        .users()
        .create(
            UserAttributes::default()
                .name("Sample")
                .email(email)
                .password("password")
                .unwrap(),
        )
        .await
        .unwrap()
}

fn badge_attrs(game_id: &str, slug: &str) -> BadgeAttributes {
    BadgeAttributes::default()
        .game_id(game_id)
        .slug(slug)
        .name("First Scramble")
        .threshold(1)
}

#[tokio::test]
async fn badge_for_missing_game_is_referential_violation() {
    let (_db, repos) = test_repos().await;
    let err = repos
        .badges()
        .create(badge_attrs("no-such-game", "first-scramble"))
        .await
        .unwrap_err();
    assert_eq!(err.constraint(), Some(ConstraintKind::Referential));
    assert_eq!(repos.badges().count().await.unwrap(), 0);
}

#[tokio::test]
async fn game_with_badges_cannot_be_deleted() {
    let (_db, repos) = test_repos().await;
    let game = sample_game(&repos).await;
    repos
        .badges()
        .create(badge_attrs(&game.id, "first-scramble"))
        .await
        .unwrap();

    let err = repos.games().delete(&game.id).await.unwrap_err();
    assert_eq!(err.constraint(), Some(ConstraintKind::Referential));
    assert!(repos.games().find_by_id(&game.id).await.is_ok());
}

#[tokio::test]
async fn user_badge_pairs_are_unique() {
    let (_db, repos) = test_repos().await;
    let game = sample_game(&repos).await;
    let badge = repos
        .badges()
        .create(badge_attrs(&game.id, "first-scramble"))
        .await
        .unwrap();
    let user = sample_user(&repos, "a@example.com").await;

    let award = UserBadgeAttributes::default()
        .user_id(user.id.clone())
        .badge_id(badge.id.clone());
    repos.user_badges().create(award.clone()).await.unwrap();
    let err = repos.user_badges().create(award).await.unwrap_err();
    assert_eq!(err.constraint(), Some(ConstraintKind::Unique));
}

#[tokio::test]
async fn deleting_a_user_cascades_to_owned_data() {
    let (_db, repos) = test_repos().await;
    let game = sample_game(&repos).await;
    let user = sample_user(&repos, "a@example.com").await;
    let other = sample_user(&repos, "b@example.com").await;

    for owner in [&user, &other] {
        repos
            .results()
            .create(
                GameResultAttributes::default()
                    .game_id(game.id.clone())
                    .score(120)
                    .completed(true)
                    .for_player(Player::User(owner.id.clone())),
            )
            .await
            .unwrap();
    }

    repos.users().delete(&user.id).await.unwrap();

    let remaining = repos.results().all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id.as_deref(), Some(other.id.as_str()));
}

#[tokio::test]
async fn pruning_guests_removes_their_results() {
    let (_db, repos) = test_repos().await;
    let game = sample_game(&repos).await;
    let now = daily_domain::now();
    let stale = repos
        .guests()
        .create(
            GuestAttributes::default()
                .token(Guest::generate_token())
                .created_at(now - chrono::Duration::days(31)),
        )
        .await
        .unwrap();
    repos
        .results()
        .create(
            GameResultAttributes::default()
                .game_id(game.id.clone())
                .for_player(Player::Guest(stale.id.clone())),
        )
        .await
        .unwrap();

    assert_eq!(repos.guests().prune_expired(now).await.unwrap(), 1);
    assert_eq!(repos.results().count().await.unwrap(), 0);
}

#[tokio::test]
async fn puzzle_dates_are_unique_and_results_link_to_puzzles() {
    let (_db, repos) = test_repos().await;
    let game = sample_game(&repos).await;
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let attrs = WordScrambleAttributes::default()
        .game_id(game.id.clone())
        .word("planet")
        .scrambled("tenalp")
        .puzzle_date(date);

    let puzzle = repos.puzzles().create(attrs.clone()).await.unwrap();
    let err = repos.puzzles().create(attrs).await.unwrap_err();
    assert_eq!(err.constraint(), Some(ConstraintKind::Unique));

    let user = sample_user(&repos, "a@example.com").await;
    let result = repos
        .results()
        .create(
            GameResultAttributes::default()
                .game_id(game.id.clone())
                .puzzle_id(Some(puzzle.id.clone()))
                .played_on(date)
                .for_player(Player::User(user.id.clone())),
        )
        .await
        .unwrap();

    let by_puzzle = repos
        .results()
        .where_column("puzzle_id", puzzle.id.as_str())
        .await
        .unwrap();
    assert_eq!(by_puzzle, vec![result]);

    let unlinked = repos
        .results()
        .where_column("puzzle_id", None::<String>)
        .await
        .unwrap();
    assert!(unlinked.is_empty());
}
