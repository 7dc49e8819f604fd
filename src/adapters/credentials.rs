use crate::core::{CredentialVerifier, UserCredential};

/// Allow-list of exactly one configured username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    credential: UserCredential,
}

impl StaticCredentialVerifier {
    pub fn new(credential: UserCredential) -> Self {
        Self { credential }
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    fn validate(&self, username: &str, password: &str) -> bool {
        self.credential.username == username && self.credential.password == password
    }
}
