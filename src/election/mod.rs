//! Election Module
//!
//! CRUD surface for the election database: candidates and the parties they run
//! under. The wire envelopes here predate this service and existing clients
//! parse them literally, so the handlers reproduce them field for field.

mod handler;
mod lib;
mod routes;

pub use lib::*;
pub use routes::routes;

/// Returns the migrations for the election module, applied at startup.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "election_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
