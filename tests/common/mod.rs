use std::error::Error;

use ldap3::LdapConnAsync;
use ldap_authenticator::{
	config::{Config, ConnectionConfig, Searches, Security},
	LdapAuthenticator,
};
use secrecy::SecretString;

pub const ADMIN_DN: &str = "cn=admin,dc=example,dc=org";
pub const ADMIN_PASSWORD: &str = "adminpassword";

pub fn ldap_config() -> Config {
	Config {
		server: "localhost".to_owned(),
		port: 1389,
		security: Security::None,
		bind_user: ADMIN_DN.to_owned(),
		bind_password: SecretString::new(ADMIN_PASSWORD.to_owned()),
		searches: Searches {
			user_base: "ou=users,dc=example,dc=org".to_owned(),
			user_object_class: "inetOrgPerson".to_owned(),
			user_attribute: "uid".to_owned(),
		},
		connection: ConnectionConfig { timeout: Some(5) },
	}
}

#[must_use]
pub fn setup_authenticator() -> LdapAuthenticator {
	LdapAuthenticator::new(ldap_config())
}

pub async fn ldap_add_organizational_unit(
	ldap: &mut ldap3::Ldap,
	ou: &str,
) -> Result<(), Box<dyn Error>> {
	ldap.add(
		&format!("ou={},dc=example,dc=org", ou),
		vec![("objectClass", ["organizationalUnit"].into())],
	)
	.await?
	.success()?;
	Ok(())
}

pub async fn ldap_delete_organizational_unit(
	ldap: &mut ldap3::Ldap,
	ou: &str,
) -> Result<(), Box<dyn Error>> {
	ldap.delete(&format!("ou={},dc=example,dc=org", ou)).await?.success()?;
	Ok(())
}

pub async fn ldap_connect() -> Result<ldap3::Ldap, Box<dyn Error>> {
	let (conn, mut ldap) = LdapConnAsync::new("ldap://localhost:1389").await?;
	let _handle = tokio::spawn(async move {
		if let Err(err) = conn.drive().await {
			panic!("Ldap connection error {err}");
		}
	});
	ldap.simple_bind(ADMIN_DN, ADMIN_PASSWORD).await?.success()?;
	Ok(ldap)
}

/// Add a user below `ou` with the given password and optional email address.
pub async fn ldap_add_user(
	ldap: &mut ldap3::Ldap,
	ou: &str,
	uid: &str,
	password: &str,
	mail: Option<&str>,
) -> Result<(), Box<dyn Error>> {
	let mut attrs = vec![
		("objectClass", ["inetOrgPerson"].into()),
		("uid", [uid].into()),
		("cn", [uid].into()),
		("sn", [uid].into()),
		("userPassword", [password].into()),
	];
	if let Some(mail) = mail {
		attrs.push(("mail", [mail].into()));
	}
	ldap.add(&format!("uid={},ou={},dc=example,dc=org", uid, ou), attrs).await?.success()?;
	Ok(())
}

pub async fn ldap_delete_user(
	ldap: &mut ldap3::Ldap,
	ou: &str,
	uid: &str,
) -> Result<(), Box<dyn Error>> {
	ldap.delete(&format!("uid={},ou={},dc=example,dc=org", uid, ou)).await?.success()?;
	Ok(())
}
