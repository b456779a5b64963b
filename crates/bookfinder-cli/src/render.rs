use bookfinder_client::LoadError;
use bookfinder_core::BookRecord;

const TITLE_WIDTH: usize = 40;
const AUTHOR_WIDTH: usize = 24;
const PRICE_WIDTH: usize = 14;

/// What the user should see for one fetch cycle.
#[derive(Debug)]
pub(crate) enum Outcome {
    Books(Vec<BookRecord>),
    NoBooks,
    Unreachable(LoadError),
    Failed(LoadError),
}

impl From<Result<Option<Vec<BookRecord>>, LoadError>> for Outcome {
    fn from(result: Result<Option<Vec<BookRecord>>, LoadError>) -> Self {
        match result {
            Ok(Some(books)) if !books.is_empty() => Outcome::Books(books),
            Ok(_) => Outcome::NoBooks,
            Err(e) if e.is_connectivity() => Outcome::Unreachable(e),
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Prints an outcome to stdout.
///
/// # Errors
///
/// Returns an error for failed loads, or if JSON serialization fails.
pub(crate) fn print_outcome(outcome: Outcome, json: bool) -> anyhow::Result<()> {
    match outcome {
        Outcome::Books(books) if json => println!("{}", serde_json::to_string_pretty(&books)?),
        Outcome::Books(books) => print!("{}", format_table(&books)),
        Outcome::NoBooks if json => println!("[]"),
        Outcome::NoBooks => println!("no books found"),
        Outcome::Unreachable(e) => {
            return Err(anyhow::Error::new(e).context("could not reach the book service"));
        }
        Outcome::Failed(e) => return Err(e.into()),
    }
    Ok(())
}

/// Renders books as a fixed-width table followed by each detail link.
pub(crate) fn format_table(books: &[BookRecord]) -> String {
    let mut out = format!(
        "{:<TITLE_WIDTH$}  {:<AUTHOR_WIDTH$}  {:<PRICE_WIDTH$}  LINK\n",
        "TITLE", "AUTHOR", "PRICE"
    );
    for book in books {
        let price = if book.price_label.is_empty() {
            "\u{2014}"
        } else {
            book.price_label.as_str()
        };
        out.push_str(&format!(
            "{:<TITLE_WIDTH$}  {:<AUTHOR_WIDTH$}  {:<PRICE_WIDTH$}  {}\n",
            truncate(&book.title, TITLE_WIDTH),
            truncate(&book.author, AUTHOR_WIDTH),
            price,
            book.info_url
        ));
    }
    out
}

/// Shortens `s` to at most `width` characters, marking the cut with `...`.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        format!("{}...", s.chars().take(width - 3).collect::<String>())
    } else {
        s.to_owned()
    }
}
