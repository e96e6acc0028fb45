//! PostgreSQL repository implementations.

pub mod pg_account_repository;
pub mod pg_click_repository;
pub mod pg_payout_repository;
pub mod pg_session_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_click_repository::PgClickRepository;
pub use pg_payout_repository::PgPayoutRepository;
pub use pg_session_repository::PgSessionRepository;
