//! Core domain entities.
//!
//! Entities are plain data structures without persistence or HTTP concerns.
//! Creation inputs use separate structs (`NewTemplate`, `NewUser`) and the
//! profile edit form is modelled by [`ProfileUpdate`].

pub mod interview;
pub mod template;
pub mod user;

pub use interview::{Interview, InterviewTotals, MonthlyScore};
pub use template::{NewTemplate, Template};
pub use user::{NewUser, ProfileUpdate, User};
