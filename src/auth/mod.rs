//! Authentication: password hashing, session tokens and the access gate

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, require_token, AuthContext};
pub use password::PasswordHasher;
