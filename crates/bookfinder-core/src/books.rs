use serde::{Deserialize, Serialize};

/// Author shown when a volume carries no `authors` array.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Price label for volumes whose saleability is anything but `FOR_SALE`.
pub const NOT_FOR_SALE: &str = "Not for sale";

/// One search result, extracted from a `volumes` response item.
///
/// Records have no identity beyond their position in the result list and are
/// replaced wholesale on every new query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    /// Small thumbnail link, when the volume has `imageLinks`.
    pub image_url: Option<String>,
    /// Link to the volume's detail page.
    pub info_url: String,
    /// `"<amount><currency>"`, [`NOT_FOR_SALE`], or empty when the price
    /// structure could not be read.
    pub price_label: String,
}

impl BookRecord {
    /// Returns `true` when the record carries a concrete retail price.
    #[must_use]
    pub fn has_price(&self) -> bool {
        !self.price_label.is_empty() && self.price_label != NOT_FOR_SALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price_label: &str) -> BookRecord {
        BookRecord {
            title: "Android Programming".to_string(),
            author: "Bill Phillips".to_string(),
            image_url: None,
            info_url: "https://books.google.com/books?id=abc".to_string(),
            price_label: price_label.to_string(),
        }
    }

    #[test]
    fn has_price_true_for_formatted_price() {
        assert!(record("9.99USD").has_price());
    }

    #[test]
    fn has_price_false_when_not_for_sale() {
        assert!(!record(NOT_FOR_SALE).has_price());
    }

    #[test]
    fn has_price_false_when_price_unreadable() {
        assert!(!record("").has_price());
    }

    #[test]
    fn serializes_missing_image_as_null() {
        let json = serde_json::to_value(record("")).unwrap();
        assert!(json["image_url"].is_null());
        assert_eq!(json["title"], "Android Programming");
    }
}
