//! `clubhouse-auth` — identity and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the policy is
//! a pure function over already-loaded data, and token verification is
//! deterministic given a clock value.

pub mod actor;
pub mod claims;
pub mod password;
pub mod policy;
pub mod roles;
pub mod token;
pub mod user;

pub use actor::Actor;
pub use password::{hash_password, verify_password};
pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use policy::{Action, AuthzError, Channel, ResourceSnapshot, can_perform};
pub use roles::Role;
pub use token::{SESSION_TTL_DAYS, TokenError, TokenService};
pub use user::{Registration, User};
