//! Extraction of [`BookRecord`]s from a volumes search response.
//!
//! The response is walked as a [`serde_json::Value`] rather than deserialized
//! into typed structs: each item has optional fields with fallbacks, and a bad
//! price block must only blank the price label, not drop the item.
//!
//! Failure granularity:
//! - malformed JSON or a non-array `items` aborts the whole parse;
//! - an item missing `volumeInfo`, `title`, or `infoLink` is skipped;
//! - an unreadable `saleInfo` leaves that item's price label empty.

use bookfinder_core::{BookRecord, NOT_FOR_SALE, UNKNOWN_AUTHOR};
use serde_json::Value;
use thiserror::Error;

use crate::error::ParseError;

/// Saleability value that carries a retail price.
const FOR_SALE: &str = "FOR_SALE";

/// A required or price-related field was absent or had the wrong type.
#[derive(Debug, Error)]
#[error("missing or invalid field `{0}`")]
pub(crate) struct ItemError(&'static str);

/// Parses a raw response body into book records.
///
/// Returns `Ok(None)` for an empty (or whitespace-only) body and
/// `Ok(Some(vec![]))` for an object with no `items` key. Output order follows
/// the `items` array; items that fail extraction are logged and omitted.
///
/// # Errors
///
/// - [`ParseError::Json`] if the body is not valid JSON.
/// - [`ParseError::Structure`] if the top level is not an object or `items`
///   is not an array.
pub fn parse_books(body: &str) -> Result<Option<Vec<BookRecord>>, ParseError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let root: Value = serde_json::from_str(body)?;
    let root = root
        .as_object()
        .ok_or_else(|| ParseError::Structure("top-level value is not an object".to_owned()))?;

    let Some(items) = root.get("items") else {
        return Ok(Some(Vec::new()));
    };
    let items = items
        .as_array()
        .ok_or_else(|| ParseError::Structure("`items` is not an array".to_owned()))?;

    let books = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match extract_book(item) {
            Ok(book) => Some(book),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed book item");
                None
            }
        })
        .collect();

    Ok(Some(books))
}

/// Extracts one record from an `items[]` element.
fn extract_book(item: &Value) -> Result<BookRecord, ItemError> {
    let info = item
        .get("volumeInfo")
        .filter(|v| v.is_object())
        .ok_or(ItemError("volumeInfo"))?;

    let title = str_field(info, "title").ok_or(ItemError("volumeInfo.title"))?;

    let author = info
        .get("authors")
        .and_then(|a| a.get(0))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_owned();

    let image_url = info
        .get("imageLinks")
        .and_then(|links| str_field(links, "smallThumbnail"));

    let info_url = str_field(info, "infoLink").ok_or(ItemError("volumeInfo.infoLink"))?;

    let price_label = price_label(item.get("saleInfo")).unwrap_or_else(|e| {
        tracing::warn!(title = %title, error = %e, "unable to read sale info");
        String::new()
    });

    Ok(BookRecord {
        title,
        author,
        image_url,
        info_url,
        price_label,
    })
}

/// Derives the price label from a `saleInfo` object.
fn price_label(sale_info: Option<&Value>) -> Result<String, ItemError> {
    let sale_info = sale_info.ok_or(ItemError("saleInfo"))?;
    let saleability =
        str_field(sale_info, "saleability").ok_or(ItemError("saleInfo.saleability"))?;

    if saleability != FOR_SALE {
        return Ok(NOT_FOR_SALE.to_owned());
    }

    let retail = sale_info
        .get("retailPrice")
        .ok_or(ItemError("saleInfo.retailPrice"))?;
    let amount = scalar_text(retail.get("amount")).ok_or(ItemError("retailPrice.amount"))?;
    let currency =
        str_field(retail, "currencyCode").ok_or(ItemError("retailPrice.currencyCode"))?;

    Ok(format!("{amount}{currency}"))
}

fn str_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Renders a string or number as text; the live API sends `amount` as a number.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
