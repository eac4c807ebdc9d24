use chrono::{DateTime, Duration, Utc};
use daily_domain::{Guest, GuestAttributes};
use rand::RngCore;

use super::{Factory, State};

/// Age given to guests built with the `expired` state.
pub const EXPIRED_AGE_DAYS: i64 = 31;

/// Guests with a fresh random token.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuestFactory;

impl GuestFactory {
    /// Created and last updated `EXPIRED_AGE_DAYS` before `reference`.
    pub fn expired(reference: DateTime<Utc>) -> State<GuestAttributes> {
        State::new("expired", move |attrs: GuestAttributes| {
            let stamp = reference - Duration::days(EXPIRED_AGE_DAYS);
            attrs.created_at(stamp).updated_at(stamp)
        })
    }
}

impl Factory for GuestFactory {
    type Entity = Guest;

    fn definition(&mut self, rng: &mut dyn RngCore) -> GuestAttributes {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let token = uuid::Builder::from_random_bytes(bytes).into_uuid();
        GuestAttributes::default().token(token.to_string())
    }
}
