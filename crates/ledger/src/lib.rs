//! Monthly dues tracking.
//!
//! Status bookkeeping only; there is no payment gateway behind this.

pub mod payment;

pub use payment::{Payment, PaymentDraft, PaymentPatch, PaymentStatus};
