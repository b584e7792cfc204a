//! Authentication against a fixed list of users from the configuration.
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::auth::{AuthError, Authenticator, User};

/// A user accepted by the [`StaticAuthenticator`]
#[derive(Clone, Debug, Deserialize)]
pub struct StaticUser {
	/// Login name
	pub username: String,
	/// Password
	pub password: SecretString,
	/// Display name, defaults to the username
	#[serde(default)]
	pub full_name: Option<String>,
	/// Email address
	#[serde(default)]
	pub email: String,
}

/// Authenticates users against a list held in memory.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
	/// Accepted users
	users: Vec<StaticUser>,
}

impl StaticAuthenticator {
	/// Create a [`StaticAuthenticator`] accepting the given users.
	#[must_use]
	pub fn new(users: Vec<StaticUser>) -> Self {
		Self { users }
	}
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
	async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
		let Some(user) = self.users.iter().find(|user| user.username == username) else {
			tracing::debug!(username, "Unknown user");
			return Err(AuthError::new(username));
		};
		if !bool::from(user.password.expose_secret().as_bytes().ct_eq(password.as_bytes())) {
			tracing::debug!(username, "Wrong password");
			return Err(AuthError::new(username));
		}

		Ok(User {
			username: username.to_owned(),
			full_name: user.full_name.clone().unwrap_or_else(|| username.to_owned()),
			email: user.email.clone(),
		})
	}
}
