//! Authentication stage types.

use serde::{Deserialize, Serialize};

/// The authentication stage of the session.
///
/// `Splash` always precedes every other stage exactly once at startup; the
/// transition out of it is timed, with no user input possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthStage {
    Splash,
    Login,
    Signup,
    Authenticated,
}

/// Social sign-in providers offered on the login screen.
///
/// All of them are unconditional-success stubs; see
/// `glowup-application`'s simulated authenticator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialProvider {
    Google,
    Apple,
    Instagram,
}
