//! Account entity shared by affiliates and administrators.

use chrono::{DateTime, Utc};

/// Referral code carried by administrator accounts.
///
/// Admins never hand out referral links; the sentinel keeps the
/// `referral_code` column non-null and unique without generating a code.
pub const ADMIN_REFERRAL_CODE: &str = "admin";

/// Distinguishes affiliate accounts from administrator accounts.
///
/// The role is fixed at creation time; no use-case changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Affiliate,
    Admin,
}

impl Role {
    /// Storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Affiliate => "affiliate",
            Role::Admin => "admin",
        }
    }

    /// Parses a storage value back into a role.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "affiliate" => Some(Role::Affiliate),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account: an affiliate promoting a referral link, or an
/// administrator adjudicating payouts.
///
/// Email and referral code are unique across all accounts regardless of
/// role.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id digest in PHC string format. Never the plaintext.
    pub password_hash: String,
    pub referral_code: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new Account instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        name: String,
        email: String,
        password_hash: String,
        referral_code: String,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            referral_code,
            role,
            created_at,
            updated_at,
        }
    }

    pub fn is_affiliate(&self) -> bool {
        self.role == Role::Affiliate
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub referral_code: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(role: Role) -> Account {
        let now = Utc::now();
        Account::new(
            1,
            "Asha Rao".to_string(),
            "asha@example.com".to_string(),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            "asha0001123".to_string(),
            role,
            now,
            now,
        )
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse("affiliate"), Some(Role::Affiliate));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::Affiliate.as_str(), "affiliate");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_account_role_predicates() {
        assert!(account(Role::Affiliate).is_affiliate());
        assert!(!account(Role::Affiliate).is_admin());
        assert!(account(Role::Admin).is_admin());
        assert!(!account(Role::Admin).is_affiliate());
    }

    #[test]
    fn test_new_account_creation() {
        let new_account = NewAccount {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "digest".to_string(),
            referral_code: "asha0001123".to_string(),
            role: Role::Affiliate,
        };

        assert_eq!(new_account.email, "asha@example.com");
        assert_eq!(new_account.role, Role::Affiliate);
    }
}
