use folio_core::config::Config;
use folio_core::error::FolioError;

use super::{load_document, DocumentOptions};
use crate::output;

pub fn run(doc: &DocumentOptions, output_format: &str) -> Result<(), FolioError> {
    let document = load_document(&doc.path, doc.layout)?;
    let (toc_start, toc_end) = doc.toc_range(&Config::default());
    let sections = folio_core::list_sections(&document, toc_start, toc_end);

    match output_format {
        "json" => output::json::print(&sections)?,
        _ => output::table::print_sections(&sections),
    }
    Ok(())
}
