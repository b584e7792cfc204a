//! Config for the LDAP authenticator.
use std::{fmt, time::Duration};

use ldap3::LdapConnSettings;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::{
	auth::Authenticator,
	error::Error,
	ldap::LdapAuthenticator,
	simple::{StaticAuthenticator, StaticUser},
};

/// LDAP configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
	/// Host name or address of the directory server
	pub server: String,
	/// Port the directory server listens on
	#[serde(default = "default_port")]
	pub port: u16,
	/// Transport security to use for the connection
	#[serde(default)]
	pub security: Security,
	/// The DN of the service account used to search for users
	pub bind_user: String,
	/// The password for the service account
	pub bind_password: SecretString,
	/// Base and filter components used to look up users
	pub searches: Searches,
	/// Connection settings.
	#[serde(default)]
	pub connection: ConnectionConfig,
}

/// Default LDAP port
fn default_port() -> u16 {
	389
}

impl Config {
	/// Build the URL of the directory server. Fails without touching the
	/// network if the security mode is not supported or the host is invalid.
	pub(crate) fn url(&self) -> Result<Url, Error> {
		match &self.security {
			Security::None => Ok(Url::parse(&format!("ldap://{}:{}", self.server, self.port))?),
			Security::Unsupported(mode) => Err(Error::UnsupportedSecurity(mode.clone())),
		}
	}
}

/// Transport security of the connection to the directory server. Only
/// unencrypted connections are implemented; any other value is preserved so
/// that it can be reported when a connection is attempted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Security {
	/// Plain `ldap://` without TLS
	#[default]
	None,
	/// Any mode other than `none`
	Unsupported(String),
}

impl From<String> for Security {
	fn from(mode: String) -> Self {
		if mode == "none" {
			Security::None
		} else {
			Security::Unsupported(mode)
		}
	}
}

impl fmt::Display for Security {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Security::None => f.write_str("none"),
			Security::Unsupported(mode) => f.write_str(mode),
		}
	}
}

/// Configurable base and filter components to use for user lookups
#[derive(Clone, Debug, Deserialize)]
pub struct Searches {
	/// The search base under which users are looked up
	pub user_base: String,
	/// Object class every user entry has
	#[serde(default = "default_user_object_class")]
	pub user_object_class: String,
	/// Attribute holding the login name of a user
	#[serde(default = "default_user_attribute")]
	pub user_attribute: String,
}

/// Default object class of user entries
fn default_user_object_class() -> String {
	"person".to_owned()
}

/// Default attribute holding the login name
fn default_user_attribute() -> String {
	"sAMAccountName".to_owned()
}

impl Searches {
	/// The search filter matching the entry of the given user.
	///
	/// The username is inserted verbatim, so filter metacharacters in it are
	/// interpreted by the server. Callers that accept untrusted usernames
	/// should reject such input or escape it with [`ldap3::ldap_escape`].
	#[must_use]
	pub fn user_filter(&self, username: &str) -> String {
		format!(
			"(&(objectClass={})({}={}))",
			self.user_object_class, self.user_attribute, username
		)
	}
}

/// Configuration for how to connect to the LDAP server
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConnectionConfig {
	/// Timeout to establish a connection in seconds. No timeout is applied
	/// if unset.
	#[serde(default)]
	pub timeout: Option<u64>,
}

impl ConnectionConfig {
	/// Create a [`LdapConnSettings`] based on this [`ConnectionConfig`]
	pub(crate) fn to_settings(&self) -> LdapConnSettings {
		let mut settings = LdapConnSettings::new();
		if let Some(timeout) = self.timeout {
			settings = settings.set_conn_timeout(Duration::from_secs(timeout));
		}
		settings
	}
}

/// Selects the authentication backend at startup.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "driver", rename_all = "snake_case")]
pub enum Driver {
	/// Authenticate against a directory server
	Ldap(Config),
	/// Authenticate against a fixed list of users
	Simple {
		/// The accepted users
		users: Vec<StaticUser>,
	},
}

impl Driver {
	/// Construct the configured backend.
	#[must_use]
	pub fn into_authenticator(self) -> Box<dyn Authenticator> {
		match self {
			Driver::Ldap(config) => Box::new(LdapAuthenticator::new(config)),
			Driver::Simple { users } => Box::new(StaticAuthenticator::new(users)),
		}
	}
}
