//! Authentication and authorization module

pub mod gate;
pub mod hasher;
pub mod token;
pub mod user;

// Re-export main components
pub use gate::{authenticate, require_auth, Identity};
pub use hasher::PasswordHasher;
pub use token::{Claims, TokenIssuer};
pub use user::{User, UserRecord};
