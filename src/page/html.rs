use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::error::QueryError;
use crate::models::{Query, QueryDialect};
use crate::page::{PageElement, PageQuery, TextElement};
use crate::parsers::collapse_whitespace;

/// Static HTML document. Every query re-parses the source, so the handle can
/// be shared across tasks.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    html: String,
}

impl HtmlPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    fn select_texts(&self, query: &Query) -> Result<Vec<String>, QueryError> {
        let selector = to_selector(query)?;
        let document = Html::parse_document(&self.html);

        Ok(document
            .select(&selector)
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .collect())
    }
}

fn to_selector(query: &Query) -> Result<Selector, QueryError> {
    let css = match query.by {
        QueryDialect::Css => query.value.clone(),
        // `a b` as a class name means an element carrying both classes.
        QueryDialect::ClassName => query
            .value
            .split_whitespace()
            .map(|class| format!(".{}", class))
            .collect::<String>(),
        QueryDialect::XPath => return Err(QueryError::UnsupportedDialect(QueryDialect::XPath)),
    };

    Selector::parse(&css).map_err(|_| QueryError::InvalidSelector(query.value.clone()))
}

#[async_trait]
impl PageQuery for HtmlPage {
    async fn wait_for(
        &self,
        query: &Query,
        _timeout: Duration,
    ) -> Result<Option<Box<dyn PageElement>>, QueryError> {
        // A static document never changes, so there is nothing to wait for.
        let first = self.select_texts(query)?.into_iter().next();
        Ok(first.map(|text| Box::new(TextElement(text)) as Box<dyn PageElement>))
    }

    async fn find_all(&self, query: &Query) -> Result<Vec<Box<dyn PageElement>>, QueryError> {
        Ok(self
            .select_texts(query)?
            .into_iter()
            .map(|text| Box::new(TextElement(text)) as Box<dyn PageElement>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="product-price-container">
            <span class="prc-org">1.499,90 TL</span>
            <span class="prc-dsc">1.299,90 TL</span>
          </div>
          <div class="sp-itm">S</div>
          <div class="sp-itm so">M</div>
          <div class="sp-itm"> L </div>
        </body></html>
    "#;

    async fn texts(page: &HtmlPage, query: &Query) -> Vec<String> {
        let mut out = Vec::new();
        for element in page.find_all(query).await.unwrap() {
            out.push(element.text().await.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn class_name_lookup() {
        let page = HtmlPage::new(PAGE);
        let element = page
            .wait_for(&Query::class_name("prc-dsc"), Duration::from_secs(1))
            .await
            .unwrap()
            .expect("price element");
        assert_eq!(element.text().await.unwrap(), "1.299,90 TL");
    }

    #[tokio::test]
    async fn css_exclusion_filters_sold_out() {
        let page = HtmlPage::new(PAGE);
        assert_eq!(texts(&page, &Query::css("div.sp-itm:not(.so)")).await, vec!["S", "L"]);
        assert_eq!(texts(&page, &Query::class_name("sp-itm so")).await, vec!["M"]);
    }

    #[tokio::test]
    async fn entities_are_decoded_once() {
        let page = HtmlPage::new(r#"<div class="sp-itm">S&amp;lt;M</div><div class="sp-itm">XS&amp;S</div>"#);
        assert_eq!(texts(&page, &Query::class_name("sp-itm")).await, vec!["S&lt;M", "XS&S"]);
    }

    #[tokio::test]
    async fn missing_element_is_none() {
        let page = HtmlPage::new(PAGE);
        let found = page
            .wait_for(&Query::class_name("current-price-elem"), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn xpath_is_unsupported() {
        let page = HtmlPage::new(PAGE);
        let err = page.find_all(&Query::xpath("//div")).await.err();
        assert_eq!(err, Some(QueryError::UnsupportedDialect(QueryDialect::XPath)));
    }

    #[tokio::test]
    async fn invalid_css_is_reported() {
        let page = HtmlPage::new(PAGE);
        let err = page.find_all(&Query::css("div[")).await.err();
        assert_eq!(err, Some(QueryError::InvalidSelector("div[".to_string())));
    }
}
