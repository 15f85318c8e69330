//! Basic authentication action hook.

use std::fmt;

use async_trait::async_trait;
use base64::Engine;

use wireup_core::{Error, Result};

use crate::context::ActionContext;
use crate::hook::ActionHook;

/// Adds an `Authorization: Basic <base64(user:pass)>` header to the
/// request.
///
/// Both credentials are validated at construction, before any request
/// exists, and the encoded form is computed once. The hook contributes no
/// after-request behavior; its `Debug`/`Display` forms mask the secret.
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    encoded: String,
}

impl BasicAuth {
    /// Create the hook from a username and password.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when either credential is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.is_empty() {
            return Err(Error::configuration("basic auth username must not be empty"));
        }
        if password.is_empty() {
            return Err(Error::configuration("basic auth password must not be empty"));
        }

        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        Ok(Self { username, encoded })
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("credentials", &"***")
            .finish()
    }
}

impl fmt::Display for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Basic {}:***", self.username)
    }
}

#[async_trait]
impl ActionHook for BasicAuth {
    async fn before_request(&self, context: &mut ActionContext) -> Result<()> {
        context
            .request_mut()
            .set_header("Authorization", format!("Basic {}", self.encoded));
        Ok(())
    }
}
