//! Aviso Counter API
//!
//! Client for the verificaciones endpoints and the spawner the counter uses
//! to run the round trip off the event handler.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{UiError, UiResult};
use crate::models::AvisoAction;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Header the server checks to answer 204 instead of redirecting
pub const FETCH_HEADER: (&str, &str) = ("X-Requested-With", "fetch");

#[async_trait(?Send)]
pub trait AvisoApi {
    /// Apply `action` to the counter of expediente `id`
    async fn post_action(&self, id: &str, action: AvisoAction) -> UiResult<()>;
}

/// `POST {base}/{id}/verificaciones/{action}`
pub fn action_url(base: &str, id: &str, action: AvisoAction) -> String {
    format!(
        "{}/{}/verificaciones/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(id.trim(), PATH_SEGMENT),
        action.as_str()
    )
}

pub struct HttpAvisoApi {
    base_url: String,
}

impl HttpAvisoApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl AvisoApi for HttpAvisoApi {
    async fn post_action(&self, id: &str, action: AvisoAction) -> UiResult<()> {
        let url = action_url(&self.base_url, id, action);
        log::debug!("[Avisos] POST {}", url);

        let response = Request::post(&url)
            .header(FETCH_HEADER.0, FETCH_HEADER.1)
            .send()
            .await
            .map_err(|e| UiError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(UiError::Status { status, body })
    }
}

/// Runs `!Send` futures on the page's event loop
pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

pub struct BrowserSpawner;

impl TaskSpawner for BrowserSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}
