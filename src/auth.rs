//! Bearer-token domain: redacted secrets, expiring access tokens, and the per-client cache.

pub mod cache;
pub mod secret;
pub mod token;

pub use cache::*;
pub use secret::*;
pub use token::*;
