//! HTML assembly for the digest email. Pure string building; no I/O.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use kwr_core::{KeywordReport, Platform, PlatformSection, ReportWindow};

/// Only spaces (plus control characters) are escaped in the search link, so
/// the keyword stays readable in the URL.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ');

/// Link labels are cut to this many characters before the ellipsis.
const LABEL_BUDGET: usize = 60;

/// Render the complete HTML document for a run.
#[must_use]
pub fn render_html(reports: &[KeywordReport], window: &ReportWindow) -> String {
    let mut document = String::from("<html><body>");
    for report in reports {
        document.push_str(&render_keyword_section(report, window));
    }
    document.push_str("</body></html>");
    document
}

fn render_keyword_section(report: &KeywordReport, window: &ReportWindow) -> String {
    let mut block = format!("<h2>{}</h2>", report.keyword);
    block.push_str(&format!(
        "<p><b>Analysis from:</b> {}</p>",
        window.display_range()
    ));

    block.push_str(&render_platform(Platform::Twitter, &report.twitter));
    block.push_str(&render_platform(Platform::Reddit, &report.reddit));

    block.push_str(&format!(
        "<p><b>Overall sentiment:</b> {}</p>",
        report.overall_sentiment()
    ));
    block.push_str(&format!(
        "<p><a href=\"{}\">View on Twitter</a></p>",
        search_url(&report.keyword)
    ));
    block
}

fn render_platform(platform: Platform, section: &PlatformSection) -> String {
    let mut block = format!(
        "<p><b>{platform} posts analysed:</b> {}</p>",
        section.post_count
    );

    match &section.summary {
        Some(summary) => {
            block.push_str(&format!("<p>{summary}</p>"));
            if !section.top_links.is_empty() {
                let items: String = section
                    .top_links
                    .iter()
                    .map(|(url, label)| {
                        format!("<li><a href=\"{url}\">{}</a></li>", truncate_label(label))
                    })
                    .collect();
                block.push_str(&format!("<ul>{items}</ul>"));
            }
        }
        None => {
            block.push_str(&format!("<p>No {platform} data available.</p>"));
        }
    }

    block
}

/// Static "search this keyword" link with spaces percent-encoded.
fn search_url(keyword: &str) -> String {
    format!(
        "https://twitter.com/search?q={}&src=typed_query",
        utf8_percent_encode(keyword, QUERY_ENCODE_SET)
    )
}

/// Cut a link label to the display budget and append an ellipsis.
fn truncate_label(label: &str) -> String {
    let cut: String = label.chars().take(LABEL_BUDGET).collect();
    format!("{cut}...")
}
