//! Per-intent response generators.
//!
//! Every handler takes the session context explicitly, mutates at most the
//! collections its intent owns, and returns the formatted markdown reply.

pub mod dates;
pub mod format;
pub mod notes;
pub mod quiz;
pub mod smalltalk;
pub mod summarize;
pub mod tasks;
pub mod tips;
mod text;

use chrono::NaiveDateTime;
use rand::RngCore;

use crate::session::Session;

/// Everything a handler may read or change while producing one reply.
pub struct Context<'a> {
    pub session: &'a mut Session,
    /// Wall-clock time of the submission.
    pub now: NaiveDateTime,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> Context<'a> {
    pub fn new(session: &'a mut Session, now: NaiveDateTime, rng: &'a mut dyn RngCore) -> Self {
        Self { session, now, rng }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub(crate) struct Fixture {
        pub session: Session,
        pub now: NaiveDateTime,
        pub rng: StdRng,
    }

    impl Fixture {
        pub fn ctx(&mut self) -> Context<'_> {
            Context::new(&mut self.session, self.now, &mut self.rng)
        }
    }

    // Monday 2024-05-06, 09:30.
    pub(crate) fn fixture() -> Fixture {
        let now = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Fixture {
            session: Session::new(now),
            now,
            rng: StdRng::seed_from_u64(7),
        }
    }
}
