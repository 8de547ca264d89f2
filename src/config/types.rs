//! Configuration types.

use std::fmt;

/// Settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TCP port the server listens on.
    pub port: u16,
    /// PostgreSQL connection string for the deduction store.
    pub database_url: String,
    /// Credentials guarding the admin routes.
    pub admin: AdminCredentials,
}

impl AppConfig {
    /// Returns the socket address to bind, on all interfaces.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Username and password accepted by admin basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl AdminCredentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let credentials = AdminCredentials::new("adminTax", "secret");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("adminTax"));
        assert!(!debug.contains("secret"));
    }
}
