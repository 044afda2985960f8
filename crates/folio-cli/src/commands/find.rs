use folio_core::error::FolioError;
use std::path::Path;

use super::load_document;

pub fn run(path: &Path, start: &str, end: Option<&str>, layout: bool) -> Result<(), FolioError> {
    let document = load_document(path, layout)?;
    let span = document.find_span(start, end)?;
    if span.is_empty() {
        eprintln!("No match for '{}'", start);
    } else {
        println!("{span}");
    }
    Ok(())
}
