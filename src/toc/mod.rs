mod events;
mod extractor;
mod naming;

use events::for_each_event;
use extractor::TocExtractor;

pub use extractor::Extraction;

/// Runs a full extraction over an HTML document.
pub fn extract_links(html: &str, marker: &str) -> Extraction {
    let mut extractor = TocExtractor::new(marker);
    for_each_event(html, |event| extractor.handle(event));
    extractor.finish()
}
