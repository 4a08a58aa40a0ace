use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use price_tracker::models::Store;
use price_tracker::page::HtmlPage;
use price_tracker::scrapers::ScraperFactory;
use price_tracker::utils::http::{create_client, fetch_product_page};

const PRODUCT_PAGE: &str = r#"<html><body>
  <span class="prc-dsc">2.149,00 TL</span>
  <div class="sp-itm so">38</div>
  <div class="sp-itm">40</div>
</body></html>"#;

#[tokio::test]
async fn fetched_page_feeds_the_scraper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mavi/jean-p-42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PRODUCT_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client("price-tracker-test").unwrap();
    let html = fetch_product_page(&client, Store::Trendyol, &format!("{}/mavi/jean-p-42", server.uri()), 1)
        .await
        .unwrap();

    let scraper = ScraperFactory::new()
        .resolve(
            "Trendyol",
            Arc::new(HtmlPage::new(html)),
            Store::Trendyol.default_selectors(),
        )
        .unwrap()
        .unwrap();

    assert!((scraper.get_price().await - 2149.0).abs() < 1e-9);
    assert_eq!(scraper.get_sizes().await, vec!["40"]);
    assert_eq!(scraper.get_unavailable_sizes().await, vec!["38"]);
}

#[tokio::test]
async fn http_errors_name_the_store_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client("price-tracker-test").unwrap();
    let url = format!("{}/tr/jean-c0p1.html", server.uri());
    let err = fetch_product_page(&client, Store::Bershka, &url, 1)
        .await
        .unwrap_err();

    let message = format!("{:#}", err);
    assert!(
        message.starts_with(&format!("Could not fetch Bershka product page {} after 1 attempts", url)),
        "{}",
        message
    );
    assert!(message.contains("503"), "{}", message);
}
