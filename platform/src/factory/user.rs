use daily_domain::user::hash_password;
use daily_domain::{now, User, UserAttributes};
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{Factory, State};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances", "Ken", "Margaret", "Linus",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen", "Thompson",
    "Hamilton", "Torvalds",
];

/// Password every factory user can log in with.
pub const DEFAULT_PASSWORD: &str = "password";

/// Verified users with a unique email and the default password.
#[derive(Debug, Default, Clone)]
pub struct UserFactory {
    password_hash: Option<String>,
}

impl UserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unverified() -> State<UserAttributes> {
        State::new("unverified", UserAttributes::unverified)
    }

    // Hashing once keeps bulk creation cheap. A failed hash leaves the field
    // unset so validation rejects the user.
    fn password_hash(&mut self) -> Option<String> {
        if self.password_hash.is_none() {
            self.password_hash = hash_password(DEFAULT_PASSWORD).ok();
        }
        self.password_hash.clone()
    }
}

impl Factory for UserFactory {
    type Entity = User;

    fn definition(&mut self, rng: &mut dyn RngCore) -> UserAttributes {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ada");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Lovelace");
        let tag: u32 = rng.gen();
        let token: String = (0..10)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();

        let mut attributes = UserAttributes::default()
            .name(format!("{first} {last}"))
            .email(format!(
                "{}.{}.{tag:08x}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            ))
            .email_verified_at(now())
            .remember_token(token);
        attributes.password_hash = self.password_hash();
        attributes
    }
}
