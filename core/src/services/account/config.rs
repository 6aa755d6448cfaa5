//! Configuration for the account service

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Maximum accepted password length; bcrypt ignores bytes past 72
    pub max_password_length: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: 8,
            max_password_length: 72,
        }
    }
}

impl AccountServiceConfig {
    /// Cheapest bcrypt cost, for tests
    pub fn fast() -> Self {
        Self {
            bcrypt_cost: 4,
            ..Default::default()
        }
    }
}
