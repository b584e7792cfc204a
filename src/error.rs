//! Error codes

use tracing::Level;

/// The only error returned to callers of
/// [`Authenticator::authenticate`](crate::auth::Authenticator::authenticate).
///
/// Every cause of a failed login maps to this error so that callers cannot
/// tell an unknown user apart from a wrong password or an unreachable server.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid user '{username}' or invalid password")]
pub struct AuthError {
	/// The username that was rejected
	pub username: String,
}

impl AuthError {
	/// Create an error rejecting the given username.
	#[must_use]
	pub fn new(username: impl Into<String>) -> Self {
		Self { username: username.into() }
	}
}

/// Reasons a login attempt against the directory server failed. These never
/// leave the crate; they are logged and then collapsed into an [`AuthError`].
#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
	/// The configured security mode has no implementation.
	#[error("Unsupported security mode {0:?}")]
	UnsupportedSecurity(String),
	/// The server and port do not form a valid LDAP URL.
	#[error("Invalid LDAP server address: {0}")]
	InvalidServer(#[from] url::ParseError),
	/// The server could not be reached.
	#[error("Couldn't connect with LDAP server: {0}")]
	Connect(#[source] ldap3::LdapError),
	/// The service account credentials were rejected.
	#[error("Couldn't bind with LDAP service account: {0}")]
	ServiceBind(#[source] ldap3::LdapError),
	/// The user search failed at the protocol level.
	#[error("LDAP search failed: {0}")]
	Search(#[source] ldap3::LdapError),
	/// No entry matched the user filter.
	#[error("Couldn't find user in LDAP")]
	UserNotFound,
	/// More than one entry matched the user filter.
	#[error("User filter matched {0} entries")]
	AmbiguousUser(usize),
	/// Binding with the user's DN and the supplied password failed.
	#[error("Couldn't bind with LDAP as user: {0}")]
	PasswordRejected(#[source] ldap3::LdapError),
}

impl Error {
	/// Severity at which this error is logged. Problems an operator has to fix
	/// are warnings, ordinary failed logins are debug output.
	pub(crate) fn level(&self) -> Level {
		match self {
			Error::UnsupportedSecurity(_)
			| Error::InvalidServer(_)
			| Error::Connect(_)
			| Error::ServiceBind(_) => Level::WARN,
			Error::Search(_)
			| Error::UserNotFound
			| Error::AmbiguousUser(_)
			| Error::PasswordRejected(_) => Level::DEBUG,
		}
	}

	/// Log this error and replace it with the generic [`AuthError`].
	pub(crate) fn into_auth_error(self, username: &str) -> AuthError {
		if self.level() == Level::WARN {
			tracing::warn!(username, "{self}");
		} else {
			tracing::debug!(username, "{self}");
		}
		AuthError::new(username)
	}
}

#[cfg(test)]
mod tests {
	#![allow(clippy::unwrap_used)]

	use std::{
		fmt, io,
		sync::{Arc, Mutex},
	};

	use tracing::{
		field::{Field, Visit},
		Event, Level, Subscriber,
	};
	use tracing_subscriber::{
		layer::{Context, SubscriberExt},
		Layer,
	};

	use super::{AuthError, Error};

	fn io_error() -> ldap3::LdapError {
		ldap3::LdapError::from(io::Error::from(io::ErrorKind::ConnectionRefused))
	}

	/// Every failure cause, paired with the level it has to be logged at
	fn causes() -> Vec<(Error, Level)> {
		vec![
			(Error::UnsupportedSecurity("starttls".to_owned()), Level::WARN),
			(Error::InvalidServer(url::ParseError::EmptyHost), Level::WARN),
			(Error::Connect(io_error()), Level::WARN),
			(Error::ServiceBind(io_error()), Level::WARN),
			(Error::Search(io_error()), Level::DEBUG),
			(Error::UserNotFound, Level::DEBUG),
			(Error::AmbiguousUser(2), Level::DEBUG),
			(Error::PasswordRejected(io_error()), Level::DEBUG),
		]
	}

	/// Records the level and message of every event
	#[derive(Clone, Default)]
	struct Events(Arc<Mutex<Vec<(Level, String)>>>);

	/// Extracts the formatted message of an event
	struct Message(String);

	impl Visit for Message {
		fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
			if field.name() == "message" {
				self.0 = format!("{value:?}");
			}
		}
	}

	impl<S: Subscriber> Layer<S> for Events {
		fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
			let mut message = Message(String::new());
			event.record(&mut message);
			self.0.lock().unwrap().push((*event.metadata().level(), message.0));
		}
	}

	#[test]
	fn auth_error_message() {
		assert_eq!(
			AuthError::new("alice").to_string(),
			"invalid user 'alice' or invalid password"
		);
	}

	#[test]
	fn every_cause_collapses_to_the_same_error() {
		for (cause, _) in causes() {
			assert_eq!(cause.into_auth_error("bob"), AuthError::new("bob"));
		}
	}

	#[test]
	fn operator_problems_are_warnings() {
		for (cause, level) in causes() {
			assert_eq!(cause.level(), level, "{cause:?}");
		}
	}

	#[test]
	fn causes_are_logged_at_their_level() {
		let events = Events::default();
		let subscriber = tracing_subscriber::registry().with(events.clone());

		tracing::subscriber::with_default(subscriber, || {
			let _ = Error::ServiceBind(io_error()).into_auth_error("alice");
			let _ = Error::UserNotFound.into_auth_error("alice");
		});

		let events = events.0.lock().unwrap().clone();
		assert_eq!(events.len(), 2);
		assert_eq!(events[0].0, Level::WARN);
		assert!(
			events[0].1.starts_with("Couldn't bind with LDAP service account"),
			"{}",
			events[0].1
		);
		assert_eq!(events[1], (Level::DEBUG, "Couldn't find user in LDAP".to_owned()));
	}
}
