//! Authenticate users with a username and password against an LDAP directory
//! server.
//!
//! A login is verified by connecting to the server, binding as a service
//! account, searching for the single entry of the user and then binding again
//! with that entry's DN and the password supplied by the user. Only the
//! success of this last bind proves the password correct.
//!
//! All backends implement [`Authenticator`], and every failure is reported as
//! the same [`AuthError`], whether the server is unreachable, the user does not
//! exist or the password is wrong. The actual cause is logged with [`tracing`]:
//! problems with the server or the configuration as warnings, ordinary failed
//! logins at debug level.
//!
//! For a general primer on LDAP, the [introduction] in the `ldap3` crate which
//! is used here for interfacing with LDAP is an excellent resource.
//!
//! [introduction]: https://github.com/inejge/ldap3/blob/master/LDAP-primer.md
//!
//! # Getting started
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use ldap_authenticator::{
//!     config::{Config, ConnectionConfig, Searches, Security},
//!     Authenticator, LdapAuthenticator,
//! };
//! use secrecy::SecretString;
//!
//! // Configuration can also be deserialized with serde. It's hand-constructed
//! // here for demonstration purposes.
//! let config = Config {
//!     server: "localhost".to_owned(),
//!     port: 389,
//!     security: Security::None,
//!     bind_user: "cn=admin,dc=example,dc=com".to_owned(),
//!     bind_password: SecretString::new("verysecret".to_owned()),
//!     searches: Searches {
//!         user_base: "ou=people,dc=example,dc=com".to_owned(),
//!         user_object_class: "person".to_owned(),
//!         user_attribute: "uid".to_owned(),
//!     },
//!     connection: ConnectionConfig::default(),
//! };
//!
//! let authenticator = LdapAuthenticator::new(config);
//! let user = authenticator.authenticate("alice", "correct horse").await?;
//! println!("Logged in as {} <{}>", user.full_name, user.email);
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//! * Only unencrypted connections are supported. Any other configured
//!   security mode makes every login fail before a connection is attempted.
//! * The username is inserted into the search filter without escaping, so a
//!   username containing filter syntax such as `*` or `)(` changes the
//!   search. The exactly-one-match rule still applies, but callers should
//!   validate usernames until escaping is decided on.
//! * Empty passwords are not rejected. Many servers treat a bind with a DN and
//!   an empty password as an unauthenticated bind which succeeds, so callers
//!   must refuse empty passwords themselves.
//! * No timeout is applied to any operation unless
//!   [`ConnectionConfig::timeout`](config::ConnectionConfig::timeout) is set,
//!   and that only covers establishing the connection.

pub mod auth;
pub mod config;
pub mod directory;
pub mod entry;
mod error;
pub mod ldap;
pub mod simple;

pub use ldap3::{self, SearchEntry};

pub use crate::{
	auth::{AuthError, Authenticator, User},
	config::{Config, ConnectionConfig, Driver, Searches, Security},
	directory::{Connector, DirectorySession, LdapConnector, LdapSession},
	entry::SearchEntryExt,
	ldap::LdapAuthenticator,
	simple::{StaticAuthenticator, StaticUser},
};
