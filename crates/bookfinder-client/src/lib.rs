pub mod client;
pub mod error;
pub mod loader;
pub mod parse;
pub mod query;

pub use client::BooksClient;
pub use error::{FetchError, LoadError, ParseError};
pub use loader::{BookLoader, Delivery};
pub use parse::parse_books;
pub use query::{build_query_url, parse_request_url};
