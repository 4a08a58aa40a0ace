pub mod price;
pub mod links;

pub use price::*;
pub use links::*;

/// Collapse runs of whitespace into single spaces and trim the ends. Entities
/// are left alone: text read from a parsed document is already decoded.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(collapse_whitespace("  1.299,90\n\t TL "), "1.299,90 TL");
        assert_eq!(collapse_whitespace("S&lt;M"), "S&lt;M");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
