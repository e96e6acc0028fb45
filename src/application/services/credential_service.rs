//! Password hashing, verification, and admin bootstrap.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use std::sync::Arc;

use crate::domain::entities::{NewAccount, Role, ADMIN_REFERRAL_CODE};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// Service for password credential handling.
///
/// Passwords are hashed with Argon2id using a fresh random salt per
/// hash. The digest is stored in PHC string format, so the verifier
/// recovers the salt and cost parameters from the digest itself.
pub struct CredentialService {
    accounts: Arc<dyn AccountRepository>,
}

impl CredentialService {
    /// Creates a new credential service.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Hashes a plaintext password into a PHC-format Argon2id digest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing failed");
                AppError::internal("Password hashing failed")
            })
    }

    /// Verifies a plaintext password against a stored digest.
    ///
    /// A digest that fails to parse verifies as `false` rather than
    /// erroring; a corrupt stored hash must not let anyone in.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Ensures an administrator account exists for the given email.
    ///
    /// Idempotent: if any account already holds the email, nothing is
    /// written. Otherwise an admin-role account is created with the
    /// fixed referral-code sentinel. Called once at process start.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        if self.accounts.find_by_email(email).await?.is_some() {
            tracing::debug!(email, "admin account already present, bootstrap skipped");
            return Ok(());
        }

        let password_hash = self.hash(password)?;

        self.accounts
            .create(NewAccount {
                name: "Administrator".to_string(),
                email: email.to_string(),
                password_hash,
                referral_code: ADMIN_REFERRAL_CODE.to_string(),
                role: Role::Admin,
            })
            .await?;

        tracing::info!(email, "admin account created");

        Ok(())
    }
}
