use secrecy::SecretString;

/// Router login credentials.
///
/// Immutable for the lifetime of a [`RouterClient`](crate::RouterClient).
/// The password stays wrapped so it never lands in a `Debug` dump.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}
