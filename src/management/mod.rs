mod auth;
mod storage;

pub use auth::AUTH_STATE_KEY;
pub use auth::ACCESS_TOKEN_KEY;
pub use auth::CODE_VERIFIER_KEY;
pub use auth::CredentialStore;
pub use auth::EXPIRES_AT_KEY;
pub use auth::REFRESH_TOKEN_KEY;
pub use storage::FileStore;
pub use storage::KeyValueStore;
pub use storage::MemoryStore;
