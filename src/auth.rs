//! The interface shared by all authentication backends.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::error::AuthError;

/// A successfully authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// The name the user logged in with
	pub username: String,
	/// Display name of the user
	pub full_name: String,
	/// Email address, empty if unknown
	pub email: String,
}

/// A backend able to verify a username and password.
///
/// Implementations must return the same [`AuthError`] for every kind of
/// failure so that callers cannot learn whether a user exists.
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
	/// Authenticate the given user with the given password.
	async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;
}
