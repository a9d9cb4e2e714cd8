//! Event routing: one platform event in, rendered deliveries out.

pub mod router;

pub use router::{EventOutcome, EventRouter};
