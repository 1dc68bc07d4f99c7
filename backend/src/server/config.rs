//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use noticeboard::outbound::accounts::AccountsLoginService;
use noticeboard::outbound::news_seed::NewsSeed;
use noticeboard::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) accounts: AccountsLoginService,
    pub(crate) news_seed: Vec<NewsSeed>,
}

impl ServerConfig {
    /// Configuration with in-memory storage and no accounts.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            accounts: AccountsLoginService::default(),
            news_seed: Vec::new(),
        }
    }

    /// Store notes, news, and comments in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Accounts accepted by the login endpoint.
    #[must_use]
    pub fn with_accounts(mut self, accounts: AccountsLoginService) -> Self {
        self.accounts = accounts;
        self
    }

    /// News items inserted before the server accepts traffic.
    #[must_use]
    pub fn with_news_seed(mut self, seed: Vec<NewsSeed>) -> Self {
        self.news_seed = seed;
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
