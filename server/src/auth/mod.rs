mod crypto;
mod extractor;
mod google;
mod session;

pub use crypto::{hash_password, verify_password};
pub use extractor::AuthUser;
pub use google::{GoogleTokenVerifier, IdentityVerifier, VerifiedIdentity};
pub use session::{create_session, destroy_session, get_user_from_token};
