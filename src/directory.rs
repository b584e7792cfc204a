//! The directory client operations the authenticator needs, and their
//! implementation on top of [`ldap3`].
use async_trait::async_trait;
use ldap3::{LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};
use tokio::task::JoinHandle;
use tracing::warn;
use url::Url;

/// Opens sessions with a directory server.
#[async_trait]
pub trait Connector: Send + Sync + std::fmt::Debug {
	/// The session type produced by this connector.
	type Session: DirectorySession;

	/// Open a connection to the server at `url`.
	async fn connect(&self, url: &Url, settings: LdapConnSettings)
		-> Result<Self::Session, LdapError>;
}

/// A single connection to a directory server.
#[async_trait]
pub trait DirectorySession: Send {
	/// Authenticate the connection with a simple bind.
	async fn bind(&mut self, dn: &str, password: &str) -> Result<(), LdapError>;

	/// Search the subtree rooted at `base`, returning all user attributes of
	/// every matching entry.
	async fn search(&mut self, base: &str, filter: &str) -> Result<Vec<SearchEntry>, LdapError>;

	/// Close the connection.
	async fn close(&mut self) -> Result<(), LdapError>;
}

/// [`Connector`] for real LDAP servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LdapConnector;

/// A connection established by [`LdapConnector`].
pub struct LdapSession {
	/// Handle used to issue operations
	ldap: ldap3::Ldap,
	/// Task driving the connection
	driver: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for LdapSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LdapSession").field("driver", &self.driver).finish_non_exhaustive()
	}
}

#[async_trait]
impl Connector for LdapConnector {
	type Session = LdapSession;

	async fn connect(
		&self,
		url: &Url,
		settings: LdapConnSettings,
	) -> Result<LdapSession, LdapError> {
		let (conn, ldap) = LdapConnAsync::from_url_with_settings(settings, url).await?;
		let driver = tokio::spawn(async move {
			if let Err(err) = conn.drive().await {
				warn!("Ldap connection error {err}");
			}
		});
		Ok(LdapSession { ldap, driver: Some(driver) })
	}
}

#[async_trait]
impl DirectorySession for LdapSession {
	async fn bind(&mut self, dn: &str, password: &str) -> Result<(), LdapError> {
		self.ldap.simple_bind(dn, password).await?.success()?;
		Ok(())
	}

	async fn search(&mut self, base: &str, filter: &str) -> Result<Vec<SearchEntry>, LdapError> {
		let (entries, _res) =
			self.ldap.search(base, Scope::Subtree, filter, vec!["*"]).await?.success()?;
		Ok(entries.into_iter().map(SearchEntry::construct).collect())
	}

	async fn close(&mut self) -> Result<(), LdapError> {
		let unbind = self.ldap.unbind().await;
		if let Some(driver) = self.driver.take() {
			if let Err(err) = driver.await {
				warn!("Failed to join background task: {err}");
			}
		}
		unbind
	}
}
