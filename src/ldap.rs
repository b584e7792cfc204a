//! Authenticate users against an LDAP directory server

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use crate::{
	auth::{AuthError, Authenticator, User},
	config::Config,
	directory::{Connector, DirectorySession, LdapConnector},
	entry::SearchEntryExt,
	error::Error,
};

/// Verifies passwords by binding to a directory server as the user.
///
/// Each call to [`Authenticator::authenticate`] opens its own connection,
/// binds as the configured service account, looks up the entry of the user and
/// finally binds with that entry's DN and the supplied password. The
/// connection is closed again before returning.
#[derive(Debug, Clone)]
pub struct LdapAuthenticator<C = LdapConnector> {
	/// The configuration of the LDAP client.
	config: Config,
	/// Used to open connections to the server.
	connector: C,
}

impl LdapAuthenticator {
	/// Create a new [`LdapAuthenticator`] with the given configuration.
	#[must_use]
	pub fn new(config: Config) -> Self {
		Self::with_connector(config, LdapConnector)
	}
}

impl<C: Connector> LdapAuthenticator<C> {
	/// Create a new [`LdapAuthenticator`] which opens connections through the
	/// given [`Connector`].
	#[must_use]
	pub fn with_connector(config: Config, connector: C) -> Self {
		Self { config, connector }
	}

	/// Create a connection to the ldap server based on the settings and
	/// address specified in the configuration.
	async fn connect(&self) -> Result<C::Session, Error> {
		let url = self.config.url()?;
		self.connector
			.connect(&url, self.config.connection.to_settings())
			.await
			.map_err(Error::Connect)
	}

	/// Resolve the user's entry and verify the password on an open session.
	async fn login(
		&self,
		session: &mut C::Session,
		username: &str,
		password: &str,
	) -> Result<User, Error> {
		session
			.bind(&self.config.bind_user, self.config.bind_password.expose_secret())
			.await
			.map_err(Error::ServiceBind)?;

		let filter = self.config.searches.user_filter(username);
		let mut entries = session
			.search(&self.config.searches.user_base, &filter)
			.await
			.map_err(Error::Search)?;
		let entry = match entries.pop() {
			Some(entry) if entries.is_empty() => entry,
			Some(_) => return Err(Error::AmbiguousUser(entries.len() + 1)),
			None => return Err(Error::UserNotFound),
		};
		debug!(dn = %entry.dn, "Found user entry");

		session.bind(&entry.dn, password).await.map_err(Error::PasswordRejected)?;

		Ok(entry.to_user(username))
	}
}

#[async_trait]
impl<C: Connector> Authenticator for LdapAuthenticator<C> {
	async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
		let mut session = self.connect().await.map_err(|err| err.into_auth_error(username))?;

		let result = self
			.login(&mut session, username, password)
			.await
			.map_err(|err| err.into_auth_error(username));

		if let Err(err) = session.close().await {
			warn!("Couldn't close LDAP connection: {err}");
		}
		result
	}
}
