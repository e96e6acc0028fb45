//! Session authority: token hashing, identity slots, guard lookups.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{Account, NewSession, SessionRecord};
use crate::domain::repositories::{AccountRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::codes::generate_session_token;

type HmacSha256 = Hmac<Sha256>;

/// The identities a session currently carries.
///
/// Both slots resolved to full accounts; a slot whose stored id no
/// longer resolves is reported as unset.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentities {
    pub affiliate: Option<Account>,
    pub admin: Option<Account>,
}

/// Service managing browser sessions and their two identity slots.
///
/// Cookie tokens are hashed with HMAC-SHA256 (keyed by `session_secret`)
/// before storage and lookup. An attacker with read-only access to the
/// database cannot impersonate a session without the server-side secret.
///
/// The affiliate and admin slots are fully independent: one browser
/// session may hold both identities at once, and logging out of one side
/// leaves the other intact.
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    accounts: Arc<dyn AccountRepository>,
    session_secret: String,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `sessions` - session repository for DB operations
    /// - `accounts` - account repository used to resolve slot ids
    /// - `session_secret` - HMAC key; rotating it invalidates all sessions
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        accounts: Arc<dyn AccountRepository>,
        session_secret: String,
    ) -> Self {
        Self {
            sessions,
            accounts,
            session_secret,
        }
    }

    /// Hashes a raw cookie token with HMAC-SHA256 using the session
    /// secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.session_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves a cookie token to the identities its session carries.
    ///
    /// Unknown tokens resolve to empty identities rather than an error;
    /// every public page tolerates an anonymous visitor. A slot id that
    /// no longer resolves to an account is reported unset (the stored
    /// row is left as-is).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, token: &str) -> Result<SessionIdentities, AppError> {
        let Some(session) = self.find_session(token).await? else {
            return Ok(SessionIdentities::default());
        };

        let affiliate = match session.affiliate_id {
            Some(id) => self.accounts.find_by_id(id).await?,
            None => None,
        };
        let admin = match session.admin_id {
            Some(id) => self.accounts.find_by_id(id).await?,
            None => None,
        };

        Ok(SessionIdentities { affiliate, admin })
    }

    /// Binds an affiliate identity to a session.
    ///
    /// Reuses the session row behind `existing_token` when it resolves,
    /// so that an admin identity already held by the browser survives;
    /// otherwise creates a fresh session. Returns the raw token the
    /// cookie must carry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn establish_affiliate(
        &self,
        existing_token: Option<&str>,
        account_id: i64,
    ) -> Result<String, AppError> {
        self.establish(existing_token, Some(account_id), None).await
    }

    /// Binds an admin identity to a session.
    ///
    /// Counterpart of [`Self::establish_affiliate`] for the admin slot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn establish_admin(
        &self,
        existing_token: Option<&str>,
        account_id: i64,
    ) -> Result<String, AppError> {
        self.establish(existing_token, None, Some(account_id)).await
    }

    /// Clears the affiliate slot of the session behind `token`.
    ///
    /// A token that resolves to no session is a no-op: logout is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn clear_affiliate(&self, token: &str) -> Result<(), AppError> {
        if let Some(session) = self.find_session(token).await? {
            self.sessions.set_affiliate(session.id, None).await?;
        }
        Ok(())
    }

    /// Clears the admin slot of the session behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn clear_admin(&self, token: &str) -> Result<(), AppError> {
        if let Some(session) = self.find_session(token).await? {
            self.sessions.set_admin(session.id, None).await?;
        }
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<SessionRecord>, AppError> {
        let token_hash = self.hash_token(token);
        self.sessions.find_by_token_hash(&token_hash).await
    }

    async fn establish(
        &self,
        existing_token: Option<&str>,
        affiliate_id: Option<i64>,
        admin_id: Option<i64>,
    ) -> Result<String, AppError> {
        if let Some(token) = existing_token {
            if let Some(session) = self.find_session(token).await? {
                if let Some(id) = affiliate_id {
                    self.sessions.set_affiliate(session.id, Some(id)).await?;
                }
                if let Some(id) = admin_id {
                    self.sessions.set_admin(session.id, Some(id)).await?;
                }
                return Ok(token.to_string());
            }
        }

        let token = generate_session_token();
        self.sessions
            .create(NewSession {
                token_hash: self.hash_token(&token),
                affiliate_id,
                admin_id,
            })
            .await?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, SessionRecord};
    use crate::domain::repositories::{MockAccountRepository, MockSessionRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-session-secret".to_string()
    }

    fn account(id: i64, role: Role) -> Account {
        let now = Utc::now();
        Account::new(
            id,
            "Asha Rao".to_string(),
            format!("user{id}@example.com"),
            "digest".to_string(),
            format!("code{id}"),
            role,
            now,
            now,
        )
    }

    fn session(id: i64, affiliate_id: Option<i64>, admin_id: Option<i64>) -> SessionRecord {
        let now = Utc::now();
        SessionRecord::new(id, "stored-hash".to_string(), affiliate_id, admin_id, now, now)
    }

    #[tokio::test]
    async fn test_resolve_unknown_token_is_anonymous() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(MockAccountRepository::new()),
            test_secret(),
        );

        let identities = service.resolve("nonexistent").await.unwrap();

        assert!(identities.affiliate.is_none());
        assert!(identities.admin.is_none());
    }

    #[tokio::test]
    async fn test_resolve_fills_both_slots() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(Some(session(1, Some(5), Some(9)))));

        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_id()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(Some(account(5, Role::Affiliate))));
        mock_accounts
            .expect_find_by_id()
            .withf(|id| *id == 9)
            .times(1)
            .returning(|_| Ok(Some(account(9, Role::Admin))));

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(mock_accounts),
            test_secret(),
        );

        let identities = service.resolve("token").await.unwrap();

        assert_eq!(identities.affiliate.unwrap().id, 5);
        assert_eq!(identities.admin.unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_resolve_stale_slot_reads_as_unset() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(Some(session(1, Some(5), None))));

        let mut mock_accounts = MockAccountRepository::new();
        mock_accounts
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(mock_accounts),
            test_secret(),
        );

        let identities = service.resolve("token").await.unwrap();

        assert!(identities.affiliate.is_none());
    }

    #[tokio::test]
    async fn test_establish_affiliate_reuses_existing_session() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(Some(session(3, None, Some(9)))));
        mock_sessions
            .expect_set_affiliate()
            .withf(|session_id, affiliate_id| *session_id == 3 && *affiliate_id == Some(5))
            .times(1)
            .returning(|_, _| Ok(()));
        mock_sessions.expect_create().times(0);

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(MockAccountRepository::new()),
            test_secret(),
        );

        let token = service
            .establish_affiliate(Some("existing-token"), 5)
            .await
            .unwrap();

        assert_eq!(token, "existing-token");
    }

    #[tokio::test]
    async fn test_establish_affiliate_creates_session_without_cookie() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_create()
            .withf(|new_session| {
                new_session.affiliate_id == Some(5) && new_session.admin_id.is_none()
            })
            .times(1)
            .returning(|new_session| {
                let now = Utc::now();
                Ok(SessionRecord::new(
                    1,
                    new_session.token_hash.clone(),
                    new_session.affiliate_id,
                    new_session.admin_id,
                    now,
                    now,
                ))
            });

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(MockAccountRepository::new()),
            test_secret(),
        );

        let token = service.establish_affiliate(None, 5).await.unwrap();

        assert_eq!(token.len(), 32);
    }

    #[tokio::test]
    async fn test_clear_affiliate_leaves_admin_slot_alone() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(Some(session(3, Some(5), Some(9)))));
        mock_sessions
            .expect_set_affiliate()
            .withf(|session_id, affiliate_id| *session_id == 3 && affiliate_id.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        mock_sessions.expect_set_admin().times(0);

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(MockAccountRepository::new()),
            test_secret(),
        );

        service.clear_affiliate("token").await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_on_unknown_token_is_noop() {
        let mut mock_sessions = MockSessionRepository::new();
        mock_sessions
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(None));
        mock_sessions.expect_set_admin().times(0);

        let service = SessionService::new(
            Arc::new(mock_sessions),
            Arc::new(MockAccountRepository::new()),
            test_secret(),
        );

        service.clear_admin("token").await.unwrap();
    }
}
