use std::collections::HashSet;
use std::sync::LazyLock;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// Tried in order; the first selector that yields any text wins.
static PARAGRAPH_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["article p", "main p", r#"div[role="main"] p"#, "p"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Paragraph texts in document order, preferring article content.
pub fn paragraphs(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    for selector in PARAGRAPH_SELECTORS.iter() {
        let texts: Vec<String> = doc
            .select(selector)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();
        if !texts.is_empty() {
            return texts;
        }
    }
    Vec::new()
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Links on the page that stay on the seed's host, resolved and
/// de-duplicated, at most `limit` of them.
pub fn same_domain_links(seed: &Url, html: &str, limit: usize) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for a in doc.select(&ANCHOR_SELECTOR) {
        if found.len() >= limit {
            break;
        }
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let Ok(mut full) = seed.join(href.trim()) else {
            continue;
        };
        full.set_fragment(None);
        if !matches!(full.scheme(), "http" | "https") {
            continue;
        }
        if !seen.insert(full.to_string()) {
            continue;
        }
        if !same_host(seed, &full) {
            continue;
        }
        found.push(full.to_string());
    }
    found
}

/// Host plus explicit port. `port()` is `None` for the scheme default, so
/// `http://host/` and `https://host/` still count as one site.
fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(x), Some(y)) => x.eq_ignore_ascii_case(y) && a.port() == b.port(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn prefers_article_paragraphs() {
        let paras = paragraphs(&fixture("article"));
        assert_eq!(
            paras,
            vec![
                "హైదరాబాద్ లో భారీ వర్షాలు కురుస్తున్నాయి".to_string(),
                "నగరంలోని పలు ప్రాంతాల్లో రోడ్లు జలమయం అయ్యాయి".to_string(),
                "మరిన్ని వివరాల కోసం Click here".to_string(),
            ]
        );
    }

    #[test]
    fn falls_back_to_main_then_bare_p() {
        let html = r#"<html><body><main><p>ప్రధాన వార్త</p></main><p>ఫుటర్</p></body></html>"#;
        assert_eq!(paragraphs(html), vec!["ప్రధాన వార్త".to_string()]);

        let html = r#"<html><body><div role="main"><p>ముఖ్య</p></div><p>ఇతర</p></body></html>"#;
        assert_eq!(paragraphs(html), vec!["ముఖ్య".to_string()]);

        let html = "<html><body><p>ఒకటి</p><div><p> రెండు </p></div></body></html>";
        assert_eq!(paragraphs(html), vec!["ఒకటి".to_string(), "రెండు".to_string()]);
    }

    #[test]
    fn empty_article_paragraphs_fall_through() {
        let html = "<html><body><article><p>  </p></article><p>బయటి పేరా</p></body></html>";
        assert_eq!(paragraphs(html), vec!["బయటి పేరా".to_string()]);
    }

    #[test]
    fn nested_inline_text_joined_with_space() {
        let html = "<article><p>ఈ రోజు<b>ముఖ్యమైన</b> <a href='#'>వార్త</a></p></article>";
        assert_eq!(paragraphs(html), vec!["ఈ రోజు ముఖ్యమైన వార్త".to_string()]);
    }

    #[test]
    fn no_paragraphs() {
        assert!(paragraphs("<html><body><div>text</div></body></html>").is_empty());
        assert!(paragraphs("").is_empty());
    }

    #[test]
    fn collects_same_domain_links() {
        let seed = Url::parse("https://news.example.com/telangana/").unwrap();
        let links = same_domain_links(&seed, &fixture("listing"), 20);
        assert_eq!(
            links,
            vec![
                "https://news.example.com/telangana/story-1".to_string(),
                "https://news.example.com/andhra/story-2".to_string(),
                "https://news.example.com/story-3".to_string(),
                "http://news.example.com/story-4".to_string(),
            ]
        );
    }

    #[test]
    fn other_port_is_another_site() {
        let seed = Url::parse("https://news.example.com/").unwrap();
        let html = r#"<a href="https://news.example.com:8080/a">a</a>
            <a href="https://news.example.com:443/b">b</a>
            <a href="http://news.example.com/c">c</a>"#;
        assert_eq!(
            same_domain_links(&seed, html, 10),
            vec![
                "https://news.example.com/b".to_string(),
                "http://news.example.com/c".to_string(),
            ]
        );

        let seed = Url::parse("http://news.example.com:8080/").unwrap();
        let html = r#"<a href="/x">x</a><a href="http://news.example.com/y">y</a>"#;
        assert_eq!(
            same_domain_links(&seed, html, 10),
            vec!["http://news.example.com:8080/x".to_string()]
        );
    }

    #[test]
    fn respects_limit() {
        let seed = Url::parse("https://news.example.com/telangana/").unwrap();
        let links = same_domain_links(&seed, &fixture("listing"), 2);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], "https://news.example.com/telangana/story-1");
    }
}
