//! Assemble the HTTP state from either in-memory or Diesel repositories.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use noticeboard::domain::ports::{CommentRepository, NewsRepository, NoteRepository};
use noticeboard::domain::{NewsService, NotesService};
use noticeboard::inbound::http::state::HttpState;
use noticeboard::outbound::memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
};
use noticeboard::outbound::news_seed::seed_news;
use noticeboard::outbound::persistence::{
    DieselCommentRepository, DieselNewsRepository, DieselNoteRepository,
};

use super::ServerConfig;

/// Wire services over concrete repositories, seeding news first.
async fn assemble<N, W, C>(
    config: &ServerConfig,
    notes: N,
    news: W,
    comments: C,
) -> std::io::Result<HttpState>
where
    N: NoteRepository + 'static,
    W: NewsRepository + 'static,
    C: CommentRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let news = Arc::new(news);
    if !config.news_seed.is_empty() {
        seed_news(news.as_ref(), config.news_seed.clone(), clock.as_ref())
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
    }

    let notes_service = Arc::new(NotesService::new(Arc::new(notes)));
    let news_service = Arc::new(NewsService::new(news, Arc::new(comments), clock));
    Ok(HttpState::new(
        Arc::new(config.accounts.clone()),
        notes_service.clone(),
        notes_service,
        news_service.clone(),
        news_service,
    ))
}

/// Build HTTP state using Diesel repositories when a pool is configured and
/// in-memory repositories otherwise.
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            assemble(
                config,
                DieselNoteRepository::new(pool.clone()),
                DieselNewsRepository::new(pool.clone()),
                DieselCommentRepository::new(pool.clone()),
            )
            .await?
        }
        None => {
            info!("no database configured; using in-memory storage");
            assemble(
                config,
                InMemoryNoteRepository::default(),
                InMemoryNewsRepository::default(),
                InMemoryCommentRepository::default(),
            )
            .await?
        }
    };
    Ok(web::Data::new(state))
}
