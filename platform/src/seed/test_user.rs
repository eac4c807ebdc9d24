use daily_domain::UserAttributes;

use super::{SeedContext, TEST_USER_EMAIL, TEST_USER_NAME, TEST_USER_PASSWORD};
use crate::factory::UserFactory;
use crate::persistence::{EntityStore, PersistenceError, Repositories};

/// The well-known account for local logins. Fails if it already exists.
pub(super) async fn run<S: EntityStore>(
    repos: &Repositories<S>,
    ctx: &mut SeedContext,
) -> Result<usize, PersistenceError> {
    let overrides = UserAttributes::default()
        .name(TEST_USER_NAME)
        .email(TEST_USER_EMAIL)
        .password(TEST_USER_PASSWORD)?;
    let user = ctx
        .builder(UserFactory::new())
        .create(repos.users(), overrides)
        .await?;

    ctx.notice(format!("Test user created: {}", user.email));
    ctx.test_user = Some(user);
    Ok(1)
}
