use crate::config::ScrapeConfig;
use crate::error::FetchError;
use crate::harvest::SearchPage;
use crate::pipeline::DetailFetcher;
use crate::site;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value, json};
use std::time::Duration;

/// An exclusively-owned rendering-engine session.
///
/// Wraps one WebDriver client for the lifetime of a run. The session is
/// passed by reference into the harvester and the pipeline driver; there
/// is no ambient shared browser state anywhere in the crate.
pub struct Session {
    client: Client,
    detail_wait: Duration,
    supplier_settle: Duration,
}

impl Session {
    /// Attach to the WebDriver endpoint with the configured Firefox
    /// options.
    pub async fn connect(config: &ScrapeConfig) -> Result<Self, NewSessionError> {
        let mut firefox = Map::new();
        let mut args = Vec::new();
        if config.headless {
            args.push(Value::from("-headless"));
        }
        if !args.is_empty() {
            firefox.insert("args".to_string(), Value::Array(args));
        }
        if config.disable_images {
            firefox.insert("prefs".to_string(), json!({"permissions.default.image": 2}));
        }
        if let Some(binary) = &config.firefox_binary {
            firefox.insert("binary".to_string(), json!(binary));
        }

        let mut capabilities = Map::new();
        capabilities.insert("moz:firefoxOptions".to_string(), Value::Object(firefox));

        let client = ClientBuilder::native()
            .capabilities(capabilities)
            .connect(&config.webdriver_url)
            .await?;
        ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);

        Ok(Self {
            client,
            detail_wait: config.detail_wait(),
            supplier_settle: config.supplier_settle(),
        })
    }

    /// Navigate without waiting for any particular content.
    pub async fn goto(&self, url: &str) -> Result<(), FetchError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| FetchError::classify(e, url))
    }

    /// Navigate and block until `ready` is present or `wait` elapses.
    pub async fn goto_ready(
        &self,
        url: &str,
        ready: &str,
        wait: Duration,
    ) -> Result<(), FetchError> {
        self.goto(url).await?;
        self.client
            .wait()
            .at_most(wait)
            .for_element(Locator::Css(ready))
            .await
            .map(|_| ())
            .map_err(|e| FetchError::classify(e, ready))
    }

    /// Trigger an element's click handler from script, bypassing normal
    /// interactability checks. The supplier disclosure control needs
    /// this: an ordinary click can be rejected while the control is laid
    /// out under an overlay. Returns whether the element existed.
    pub async fn force_click(&self, selector: &str) -> bool {
        const SCRIPT: &str = "var el = document.querySelector(arguments[0]); \
             if (el) { el.click(); return true; } return false;";
        match self.client.execute(SCRIPT, vec![json!(selector)]).await {
            Ok(value) => value.as_bool().unwrap_or(false),
            Err(err) => {
                ::log::debug!("Force click on {} failed: {}", selector, err);
                false
            }
        }
    }

    /// End the session, logging rather than propagating close failures.
    pub async fn close(self) {
        if let Err(err) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", err);
        }
    }

    fn classify(err: CmdError, context: &str) -> FetchError {
        FetchError::classify(err, context)
    }
}

impl SearchPage for Session {
    async fn await_results(&mut self, wait: Duration) -> Result<(), FetchError> {
        self.client
            .wait()
            .at_most(wait)
            .for_element(Locator::Css(site::RESULT_LINKS))
            .await
            .map(|_| ())
            .map_err(|e| Self::classify(e, site::RESULT_LINKS))
    }

    async fn refresh(&mut self) -> Result<(), FetchError> {
        self.client
            .refresh()
            .await
            .map_err(|e| Self::classify(e, "refresh"))
    }

    async fn read_links(&mut self) -> Result<Vec<String>, FetchError> {
        let elements = self
            .client
            .find_all(Locator::Css(site::RESULT_LINKS))
            .await
            .map_err(|e| Self::classify(e, site::RESULT_LINKS))?;
        let mut links = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(href) = element
                .attr("href")
                .await
                .map_err(|e| Self::classify(e, site::RESULT_LINKS))?
            {
                links.push(href);
            }
        }
        Ok(links)
    }

    async fn next_page(&mut self, wait: Duration) -> Result<bool, FetchError> {
        let element = match self
            .client
            .wait()
            .at_most(wait)
            .for_element(Locator::Css(site::NEXT_PAGE))
            .await
        {
            Ok(element) => element,
            Err(err) => {
                return match Self::classify(err, site::NEXT_PAGE) {
                    FetchError::Timeout(_) | FetchError::NotFound(_) => Ok(false),
                    other => Err(other),
                };
            }
        };
        match element.click().await {
            Ok(_) => Ok(true),
            Err(err) => {
                // Present but not clickable counts as the end of the
                // result set, same as an absent control.
                ::log::debug!("Next-page control not clickable: {}", err);
                Ok(false)
            }
        }
    }
}

impl DetailFetcher for Session {
    /// Load a detail page, disclose the supplier block when present, and
    /// return the rendered source for static extraction.
    async fn detail_page_source(&mut self, url: &str) -> Result<String, FetchError> {
        self.goto_ready(url, site::DETAIL_READY, self.detail_wait)
            .await?;
        if self.force_click(site::SUPPLIER_TOGGLE).await {
            tokio::time::sleep(self.supplier_settle).await;
        }
        self.client
            .source()
            .await
            .map_err(|e| Self::classify(e, url))
    }
}
