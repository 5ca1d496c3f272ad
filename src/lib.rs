//! Cron schedule expression parser and next execution time calculator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a small crate, intended to:
//! - parse the classic five-field cron schedule format, with an optional timezone token;
//! - compute the next execution time strictly after a given basis instant.
//!
//! It has a single runtime dependency worth mentioning - [chrono](https://crates.io/crates/chrono).
//!
//! _This is not a cron jobs scheduler or runner._ It owns no timers, queues or
//! dispatching: callers ask "when should this fire next" and do the rest
//! themselves.
//!
//! ## Schedule format
//!
//! An expression consists of five mandatory whitespace-separated fields and an
//! optional trailing timezone token:
//!
//! ```text
//! <minute> <hour> <day-of-month> <month> <day-of-week> [<timezone>]
//! ```
//!
//! | Field        | Required | Allowed values           | Allowed special characters |
//! |--------------|----------|--------------------------|----------------------------|
//! | Minute       | Yes      | 0-59                     | * , - /                    |
//! | Hour         | Yes      | 0-23                     | * , - /                    |
//! | Day of Month | Yes      | 1-31                     | * , - /                    |
//! | Month        | Yes      | 1-12                     | * , - /                    |
//! | Day of Week  | Yes      | 0-6, `0` is Sunday       | * , - /                    |
//! | Timezone     | No       | single opaque token      |                            |
//!
//! Patterns meanings:
//! - `*` - the field imposes no constraint;
//! - `,` - list of values or patterns, i.e. `1,7,12`;
//! - `-` - inclusive range of values, i.e. `0-15` (no wraparound);
//! - `/` - every value of the field's range evenly divisible by the step, i.e.
//!   `*/15` for minutes is `0,15,30,45`; the base of `base/step` is accepted
//!   but ignored, so `7/15` means the same.
//!
//! The timezone token is carried through uninterpreted; resolving it to a
//! calendar offset is up to the caller.
//!
//! All five fields are mandatory: a shorter expression fails validation with a
//! missing-field error rather than defaulting the absent columns to `*`.
//!
//! ## How to use
//!
//! The single public entity of the crate is the [`CronExpression`] structure:
//! - [new()](CronExpression::new): parses and validates an expression;
//! - [parse()](CronExpression::parse): same, with validation optionally suppressed;
//! - [next_occurrence()](CronExpression::next_occurrence): the next execution
//!   time strictly after a basis instant;
//! - [schedule()](CronExpression::schedule): a labeled series of upcoming
//!   execution times;
//! - [iter()](CronExpression::iter): an endless `Iterator` over occurrences.
//!
//! ### Example with `next_occurrence`
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cronfig::{CronExpression, Result};
//!
//! fn next() -> Result<()> {
//!     let expression = CronExpression::new("*/10 * * * *")?;
//!     let basis = Utc.with_ymd_and_hms(2024, 5, 27, 0, 0, 0).unwrap();
//!
//!     let next = expression.next_occurrence(&basis);
//!     assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 27, 0, 10, 0).unwrap());
//!
//!     // each result is the basis of the following one
//!     let after = expression.next_occurrence(&next);
//!     assert_eq!(after, Utc.with_ymd_and_hms(2024, 5, 27, 0, 20, 0).unwrap());
//!
//!     Ok(())
//! }
//! # next().unwrap();
//! ```
//!
//! ### Example with `schedule`
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cronfig::{CronExpression, Result};
//!
//! fn plan() -> Result<()> {
//!     let expression = CronExpression::new("00 12 * * 1")?;
//!     let basis = Utc.with_ymd_and_hms(2024, 5, 24, 0, 0, 0).unwrap();
//!
//!     // Next three Monday noons, tagged with the job name.
//!     let entries = expression.schedule(&basis, 3, "weekly-report");
//!     assert_eq!(entries.len(), 3);
//!     entries.iter().for_each(|e| println!("{}: {}", e.label, e.at));
//!
//!     Ok(())
//! }
//! # plan().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html)
//!   and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html)
//!   trait implementation for [`CronExpression`].

/// Crate specific Error implementation.
pub mod error;
/// Cron schedule expression parser and next occurrence calculator.
pub mod expression;

mod calendar;
mod field;

// Re-export of public entities.
pub use error::CronError;
pub use expression::{CronExpression, ScheduleEntry};
pub use field::FieldKind;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;
