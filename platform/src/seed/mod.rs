//! Ordered database seeding.
//!
//! A [`DatabaseSeeder`] runs a list of [`SeedUnit`]s one after another against
//! a bound set of repositories. The declared order is the dependency order:
//! each unit may rely on rows created by the units before it. The first
//! failing unit stops the run; rows written by earlier units stay in place.
//!
//! ```text
//!  NotStarted ──run──▶ Running{unit} ──ok, more units──▶ Running{next}
//!                           │                                  │
//!                           │ error                            │ last unit ok
//!                           ▼                                  ▼
//!                     Failed{unit}                         Completed
//! ```

pub mod catalog;
mod badges;
mod games;
mod test_user;
mod user_data;
mod word_scramble;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use daily_domain::User;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::Instrument;

use crate::factory::{Factory, FactoryBuilder};
use crate::persistence::{EntityStore, PersistenceError, Repositories};

pub const TEST_USER_NAME: &str = "Test User";
pub const TEST_USER_EMAIL: &str = "test@example.com";
pub const TEST_USER_PASSWORD: &str = "password";

pub const COMPLETED_NOTICE: &str = "Database seeding completed successfully.";

/// One named step of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedUnit {
    TestUser,
    Games,
    Badges,
    WordScramble,
    UserData,
}

impl SeedUnit {
    pub const DEFAULT_ORDER: [SeedUnit; 5] = [
        SeedUnit::TestUser,
        SeedUnit::Games,
        SeedUnit::Badges,
        SeedUnit::WordScramble,
        SeedUnit::UserData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeedUnit::TestUser => "TestUser",
            SeedUnit::Games => "GameSeeder",
            SeedUnit::Badges => "BadgeSeeder",
            SeedUnit::WordScramble => "WordScrambleSeeder",
            SeedUnit::UserData => "UserDataSeeder",
        }
    }

    /// Run this unit, returning how many rows it created.
    async fn run<S: EntityStore>(
        self,
        repos: &Repositories<S>,
        ctx: &mut SeedContext,
    ) -> Result<usize, PersistenceError> {
        match self {
            SeedUnit::TestUser => test_user::run(repos, ctx).await,
            SeedUnit::Games => games::run(repos, ctx).await,
            SeedUnit::Badges => badges::run(repos, ctx).await,
            SeedUnit::WordScramble => word_scramble::run(repos, ctx).await,
            SeedUnit::UserData => user_data::run(repos, ctx).await,
        }
    }
}

impl fmt::Display for SeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRunState {
    NotStarted,
    Running { unit: SeedUnit },
    Completed,
    Failed { unit: SeedUnit },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{unit} failed")]
    UnitFailed {
        unit: SeedUnit,
        #[source]
        source: PersistenceError,
    },

    #[error("seeder has already been run")]
    AlreadyStarted,
}

impl SeedError {
    pub fn unit(&self) -> Option<SeedUnit> {
        match self {
            SeedError::UnitFailed { unit, .. } => Some(*unit),
            SeedError::AlreadyStarted => None,
        }
    }
}

/// Shared state handed from unit to unit during one run.
pub struct SeedContext {
    rng: StdRng,
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
    pub test_user: Option<User>,
    pub notices: Vec<String>,
}

impl SeedContext {
    fn new(seed: Option<u64>) -> Self {
        let now = daily_domain::now();
        Self {
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
            now,
            today: now.date_naive(),
            test_user: None,
            notices: Vec::new(),
        }
    }

    /// A factory builder whose RNG is derived from the run's RNG.
    pub fn builder<F: Factory>(&mut self, factory: F) -> FactoryBuilder<F> {
        FactoryBuilder::with_rng(factory, StdRng::seed_from_u64(self.rng.gen()))
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn notice(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(notice = %message, "Seed notice");
        self.notices.push(message);
    }
}

/// What a successful run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub units: Vec<(SeedUnit, usize)>,
    pub notices: Vec<String>,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.units.iter().map(|(_, created)| created).sum()
    }
}

/// Runs seed units in order, once.
pub struct DatabaseSeeder {
    units: Vec<SeedUnit>,
    seed: Option<u64>,
    state: SeedRunState,
}

impl DatabaseSeeder {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_units(SeedUnit::DEFAULT_ORDER.to_vec(), seed)
    }

    pub fn with_units(units: Vec<SeedUnit>, seed: Option<u64>) -> Self {
        Self {
            units,
            seed,
            state: SeedRunState::NotStarted,
        }
    }

    pub fn units(&self) -> &[SeedUnit] {
        &self.units
    }

    pub fn state(&self) -> SeedRunState {
        self.state
    }

    pub async fn run<S: EntityStore>(
        &mut self,
        repos: &Repositories<S>,
    ) -> Result<SeedSummary, SeedError> {
        if self.state != SeedRunState::NotStarted {
            return Err(SeedError::AlreadyStarted);
        }

        let mut ctx = SeedContext::new(self.seed);
        let mut summary = SeedSummary::default();

        for &unit in &self.units {
            self.state = SeedRunState::Running { unit };
            let result = unit
                .run(repos, &mut ctx)
                .instrument(tracing::info_span!("seed_unit", unit = unit.name()))
                .await;

            match result {
                Ok(created) => {
                    tracing::info!(unit = unit.name(), created, "Seed unit finished");
                    summary.units.push((unit, created));
                }
                Err(source) => {
                    tracing::error!(unit = unit.name(), error = %source, "Seed unit failed");
                    self.state = SeedRunState::Failed { unit };
                    return Err(SeedError::UnitFailed { unit, source });
                }
            }
        }

        self.state = SeedRunState::Completed;
        ctx.notice(COMPLETED_NOTICE);
        summary.notices = ctx.notices;
        Ok(summary)
    }
}
