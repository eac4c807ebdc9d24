//! Synthetic entity generation for seeding and tests.
//!
//! A [`Factory`] produces a complete, valid attribute set for its entity. A
//! [`FactoryBuilder`] wraps a factory with an RNG and an ordered list of named
//! [`State`]s, and materializes entities by layering, lowest precedence first:
//!
//! 1. the factory definition,
//! 2. each applied state, in the order applied,
//! 3. the caller's explicit overrides.
//!
//! Building attributes is pure; only [`FactoryBuilder::create`] and
//! [`FactoryBuilder::create_many`] touch the store.

mod badge;
mod game;
mod game_result;
mod guest;
mod user;
mod word_scramble;

pub use badge::{BadgeFactory, UserBadgeFactory};
pub use game::GameFactory;
pub use game_result::GameResultFactory;
pub use guest::{GuestFactory, EXPIRED_AGE_DAYS};
pub use user::{UserFactory, DEFAULT_PASSWORD};
pub use word_scramble::{WordScrambleFactory, WORD_BANK};

use daily_domain::{new_id, Attributes, Model, ValidationError};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::persistence::{BaseRepository, EntityStore, PersistenceError, Record, Repository};

/// Attribute set of the entity a factory builds.
pub type AttributesOf<F> = <<F as Factory>::Entity as Model>::Attributes;

/// Produces default attributes for one entity type.
pub trait Factory: Send {
    type Entity: Record;

    /// A complete attribute set: every required field populated and valid.
    fn definition(&mut self, rng: &mut dyn RngCore) -> AttributesOf<Self>;
}

/// A named transformation of an attribute set.
pub struct State<A> {
    name: &'static str,
    apply: Box<dyn Fn(A) -> A + Send + Sync>,
}

impl<A> State<A> {
    pub fn new(name: &'static str, apply: impl Fn(A) -> A + Send + Sync + 'static) -> Self {
        Self {
            name,
            apply: Box::new(apply),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, attributes: A) -> A {
        (self.apply)(attributes)
    }
}

impl<A> std::fmt::Debug for State<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").field("name", &self.name).finish()
    }
}

/// A factory together with its RNG and the states to apply.
pub struct FactoryBuilder<F: Factory> {
    factory: F,
    states: Vec<State<AttributesOf<F>>>,
    rng: StdRng,
}

impl<F: Factory> FactoryBuilder<F> {
    pub fn new(factory: F) -> Self {
        Self::with_rng(factory, StdRng::from_entropy())
    }

    /// Reproducible output for a given seed.
    pub fn seeded(factory: F, seed: u64) -> Self {
        Self::with_rng(factory, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(factory: F, rng: StdRng) -> Self {
        Self {
            factory,
            states: Vec::new(),
            rng,
        }
    }

    /// Apply `state` after any states already added.
    pub fn state(mut self, state: State<AttributesOf<F>>) -> Self {
        self.states.push(state);
        self
    }

    pub fn state_names(&self) -> Vec<&'static str> {
        self.states.iter().map(State::name).collect()
    }

    /// Definition, then states, then `overrides`, without persisting.
    pub fn raw(&mut self, overrides: AttributesOf<F>) -> AttributesOf<F> {
        let definition = self.factory.definition(&mut self.rng);
        let staged = self
            .states
            .iter()
            .fold(definition, |attributes, state| state.apply(attributes));
        staged.merge(overrides)
    }

    /// Build an unsaved entity with a fresh id.
    pub fn make(&mut self, overrides: AttributesOf<F>) -> Result<F::Entity, ValidationError> {
        <F::Entity as Model>::from_attributes(new_id(), self.raw(overrides))
    }

    /// Build and persist one entity.
    pub async fn create<S: EntityStore>(
        &mut self,
        repository: &BaseRepository<F::Entity, S>,
        overrides: AttributesOf<F>,
    ) -> Result<F::Entity, PersistenceError> {
        let attributes = self.raw(overrides);
        repository.create(attributes).await
    }

    /// Build and persist `count` entities, each from a fresh definition.
    pub async fn create_many<S: EntityStore>(
        &mut self,
        repository: &BaseRepository<F::Entity, S>,
        count: usize,
        overrides: AttributesOf<F>,
    ) -> Result<Vec<F::Entity>, PersistenceError> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            created.push(self.create(repository, overrides.clone()).await?);
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{Database, SqliteStore};
    use daily_domain::{Game, GameAttributes};
    use proptest::prelude::*;
    use serde_json::json;

    fn renamed() -> State<GameAttributes> {
        State::new("renamed", |attrs: GameAttributes| {
            attrs.name("From State").description("state description")
        })
    }

    #[test]
    fn states_apply_in_order_and_overrides_win() {
        let mut builder = FactoryBuilder::seeded(GameFactory, 7)
            .state(renamed())
            .state(State::new("later", |attrs: GameAttributes| {
                attrs.name("Later State")
            }));
        assert_eq!(builder.state_names(), vec!["renamed", "later"]);

        let attrs = builder.raw(GameAttributes::default().description("override"));
        assert_eq!(attrs.name.as_deref(), Some("Later State"));
        assert_eq!(attrs.description.as_deref(), Some("override"));
        assert!(attrs.slug.is_some());
    }

    #[test]
    fn seeded_builders_are_reproducible() {
        let a = FactoryBuilder::seeded(GameFactory, 42).raw(GameAttributes::default());
        let b = FactoryBuilder::seeded(GameFactory, 42).raw(GameAttributes::default());
        assert_eq!(a.slug, b.slug);
        assert_eq!(a.config, b.config);
    }

    #[tokio::test]
    async fn create_persists_with_overrides() {
        let db = Database::new_in_memory().await.unwrap();
        let repo = BaseRepository::<Game>::new(SqliteStore::from_database(&db));
        let mut builder = FactoryBuilder::new(GameFactory).state(renamed());

        let game = builder
            .create(&repo, GameAttributes::default().config(json!({"max_attempts": 3})))
            .await
            .unwrap();
        assert_eq!(game.name, "From State");
        assert_eq!(game.config, json!({"max_attempts": 3}));
        assert_eq!(repo.find_by_id(&game.id).await.unwrap(), game);

        let many = builder
            .create_many(&repo, 4, GameAttributes::default())
            .await
            .unwrap();
        assert_eq!(many.len(), 4);
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    proptest! {
        #[test]
        fn overrides_take_precedence_over_definition_and_states(
            slug in "[a-z]{1,8}(-[a-z]{1,8}){0,2}",
            name in "[A-Za-z][A-Za-z ]{0,20}",
            description in ".{0,40}",
            attempts in 1i64..20,
            seed in any::<u64>(),
            override_name in any::<bool>(),
        ) {
            let mut overrides = GameAttributes::default()
                .slug(slug.clone())
                .description(description.clone())
                .config(json!({"max_attempts": attempts}));
            if override_name {
                overrides = overrides.name(name.clone());
            }

            let mut builder = FactoryBuilder::seeded(GameFactory, seed).state(renamed());
            let game: Game = builder.make(overrides).unwrap();

            prop_assert_eq!(game.slug, slug);
            prop_assert_eq!(game.description, description);
            prop_assert_eq!(game.config, json!({"max_attempts": attempts}));
            if override_name {
                prop_assert_eq!(game.name, name);
            } else {
                prop_assert_eq!(game.name, "From State");
            }
        }
    }
}
