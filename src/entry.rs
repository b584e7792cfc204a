//! Helper methods for extracting data from search results.
use ldap3::SearchEntry;

use crate::auth::User;

/// Attribute holding the email address of a user
pub const MAIL_ATTRIBUTE: &str = "mail";

/// An extension trait for [`SearchEntry`] that provides convenience methods for
/// extracting data.
pub trait SearchEntryExt {
	/// Get the first value of an attribute. Will return `None` if attribute
	/// value is not valid UTF-8.
	fn attr_first(&self, attr: &str) -> Option<&str>;

	/// Build the [`User`] record for the entry the given username resolved to.
	/// The display name is always the username; the email address is the
	/// first `mail` value, or empty.
	fn to_user(&self, username: &str) -> User {
		User {
			username: username.to_owned(),
			full_name: username.to_owned(),
			email: self.attr_first(MAIL_ATTRIBUTE).unwrap_or_default().to_owned(),
		}
	}
}

impl SearchEntryExt for SearchEntry {
	fn attr_first(&self, attr: &str) -> Option<&str> {
		self.attrs.get(attr)?.first().map(String::as_str)
	}
}
