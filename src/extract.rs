//! Local readable-text extraction, used when the extraction provider is unavailable and the
//! fetcher had to fall back to the raw HTML of a page.

use dom_smoothie::{Article, CandidateSelectMode, Config, Readability, TextMode};
use html2md;
use scraper::{Html, Selector as ScraperSelector};

use crate::TextBy;
use crate::error::{Error, Result};

/// Extracts readable markdown from the given HTML content.
///
/// # Arguments
///
/// * `html` - The HTML content of the webpage.
/// * `text_by` - The method to use for text extraction (dom_smoothie or fast_html2md).
/// * `selector` - An optional CSS selector to limit the HTML subset from which content is extracted.
///
/// # Errors
///
/// Returns `Extraction` if readability parsing fails or the result is blank.
pub fn extract_readable(
    html: &str,
    text_by: &TextBy,
    selector: Option<&ScraperSelector>,
) -> Result<String> {
    let selected;
    let selected_html = if let Some(sel) = selector {
        let document = Html::parse_document(html);
        selected = document
            .select(sel)
            .map(|el| el.html())
            .collect::<Vec<String>>()
            .join("\n");
        selected.as_str()
    } else {
        html
    };

    let text = match text_by {
        TextBy::DomSmoothie => {
            let config = Config {
                text_mode: TextMode::Markdown,
                candidate_select_mode: CandidateSelectMode::DomSmoothie,
                ..Default::default()
            };

            let mut readability = Readability::new(selected_html, None, Some(config))
                .map_err(|e| Error::Extraction(e.to_string()))?;
            let article: Article = readability
                .parse()
                .map_err(|e| Error::Extraction(e.to_string()))?;
            article.text_content.to_string()
        }
        TextBy::FastHtml2Md => html2md::parse_html(selected_html, false),
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Extraction("no readable text in page".to_string()));
    }
    Ok(text.to_string())
}
