use async_trait::async_trait;
use std::time::Duration;
use thirtyfour::prelude::*;
use thirtyfour::error::{WebDriverError, WebDriverResult};
use thirtyfour::ChromiumLikeCapabilities;
use tracing::{debug, info};

use crate::error::QueryError;
use crate::models::{Query, QueryDialect};
use crate::page::{PageElement, PageQuery};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Live browser session driven over the WebDriver protocol.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    /// Open a new Chrome session against a running WebDriver server.
    pub async fn connect(server_url: &str, headless: bool) -> WebDriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()?;
        }
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;

        let driver = WebDriver::new(server_url, caps).await?;
        info!("Opened WebDriver session on {}", server_url);
        Ok(Self { driver })
    }

    pub async fn goto(&self, url: &str) -> WebDriverResult<()> {
        debug!("Navigating to {}", url);
        self.driver.goto(url).await
    }

    pub async fn quit(self) -> WebDriverResult<()> {
        self.driver.quit().await
    }
}

fn to_by(query: &Query) -> By {
    match query.by {
        QueryDialect::ClassName => By::ClassName(query.value.as_str()),
        QueryDialect::Css => By::Css(query.value.as_str()),
        QueryDialect::XPath => By::XPath(query.value.as_str()),
    }
}

fn driver_error(e: WebDriverError) -> QueryError {
    QueryError::Driver(e.to_string())
}

struct BrowserElement(WebElement);

#[async_trait]
impl PageElement for BrowserElement {
    async fn text(&self) -> Result<String, QueryError> {
        let text = self.0.text().await.map_err(driver_error)?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl PageQuery for WebDriverPage {
    async fn wait_for(
        &self,
        query: &Query,
        timeout: Duration,
    ) -> Result<Option<Box<dyn PageElement>>, QueryError> {
        let found = self
            .driver
            .query(to_by(query))
            .wait(timeout, POLL_INTERVAL)
            .first_opt()
            .await
            .map_err(driver_error)?;

        match found {
            Some(element) => Ok(Some(Box::new(BrowserElement(element)))),
            None => Err(QueryError::Timeout(timeout)),
        }
    }

    async fn find_all(&self, query: &Query) -> Result<Vec<Box<dyn PageElement>>, QueryError> {
        let elements = self.driver.find_all(to_by(query)).await.map_err(driver_error)?;
        Ok(elements
            .into_iter()
            .map(|element| Box::new(BrowserElement(element)) as Box<dyn PageElement>)
            .collect())
    }
}
