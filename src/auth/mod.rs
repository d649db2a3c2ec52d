pub mod middleware;
pub mod passcode;
pub mod session;

pub use middleware::PasscodeMiddleware;
pub use passcode::PasscodeVerifier;
pub use session::{session_from_context, AuthorizedSession, SessionKey};
