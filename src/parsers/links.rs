use once_cell::sync::Lazy;
use regex::Regex;

static TRENDYOL_PRODUCT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"trendyol\.com/[^/]+/[^/?#]*-p-[0-9]+")
        .expect("Invalid Trendyol product regex")
});

/// True for Trendyol product detail URLs (`/<brand>/<slug>-p-<id>`).
pub fn is_valid_trendyol_url(url: &str) -> bool {
    TRENDYOL_PRODUCT_REGEX.is_match(&url.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_product_urls() {
        assert!(is_valid_trendyol_url(
            "https://www.trendyol.com/mavi/erkek-jean-pantolon-p-123456789"
        ));
        assert!(is_valid_trendyol_url(
            "https://www.Trendyol.com/Mavi/jean-p-42?boutiqueId=61&merchantId=1"
        ));
    }

    #[test]
    fn rejects_other_pages() {
        assert!(!is_valid_trendyol_url("https://www.trendyol.com/"));
        assert!(!is_valid_trendyol_url("https://www.trendyol.com/erkek-jean-x-g2-c119"));
        assert!(!is_valid_trendyol_url("https://www.bershka.com/tr/jean-p-123.html"));
    }
}
