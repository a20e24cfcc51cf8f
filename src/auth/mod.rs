pub mod claims;
pub mod header;
pub mod jwks;
pub mod middleware;
pub mod verifier;

pub use claims::ClaimSet;
pub use header::{extract_bearer, AuthorizationSource};
pub use jwks::{Jwk, KeySet, KeySetResolver};
pub use middleware::RequireAuth;
pub use verifier::TokenVerifier;
