// Live page source: plain HTTP GET with the stored session cookies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info};

use super::{Page, PageSource, SessionState};
use crate::error::FfmError;
use crate::sources::{LeagueRef, SourceKind};

pub struct LivePages {
    http: reqwest::Client,
    league: LeagueRef,
    session: Option<SessionState>,
    settle_delay: Duration,
}

impl LivePages {
    pub fn new(
        league: LeagueRef,
        session: Option<SessionState>,
        user_agent: &str,
        settle_delay: Duration,
    ) -> Result<Self, FfmError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FfmError::fetch("http client", e))?;
        Ok(LivePages {
            http,
            league,
            session,
            settle_delay,
        })
    }

    fn cookie_for(&self, url: &reqwest::Url) -> Option<String> {
        let host = url.host_str()?;
        self.session.as_ref()?.cookie_header(host)
    }
}

#[async_trait]
impl PageSource for LivePages {
    async fn fetch(&self, source: SourceKind, page: &Page) -> Result<String, FfmError> {
        let url = source
            .page_url(&self.league, page)
            .ok_or_else(|| {
                FfmError::fetch(page.to_string(), format!("{source} has no web page for it"))
            })?;
        let url = reqwest::Url::parse(&url).map_err(|e| FfmError::fetch(url.as_str(), e))?;

        let mut request = self.http.get(url.clone());
        match self.cookie_for(&url) {
            Some(cookie) => request = request.header(reqwest::header::COOKIE, cookie),
            None => debug!("no session cookies for {url}, requesting anonymously"),
        }

        info!("fetching {page}: {url}");
        let response = request
            .send()
            .await
            .map_err(|e| FfmError::fetch(url.as_str(), e))?;
        check_status(response.status(), url.as_str())?;
        let body = response
            .text()
            .await
            .map_err(|e| FfmError::fetch(url.as_str(), e))?;

        // Fixed settle wait after every navigation.
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        Ok(body)
    }
}

fn check_status(status: StatusCode, url: &str) -> Result<(), FfmError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(FfmError::Authentication(format!(
            "{url} returned {status}; import a fresh session"
        )));
    }
    if !status.is_success() {
        return Err(FfmError::fetch(url, format!("HTTP {status}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
