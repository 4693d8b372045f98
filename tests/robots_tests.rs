use llmstxt::normalize;
use llmstxt::robots::{extract_sitemap_urls, resolve_from_robots};
use llmstxt::state::Trace;
use spectral::assert_that;
use wiremock::MockServer;

use crate::extras::{fetcher_for, serve};

mod extras;

#[test]
fn sitemap_directive_is_extracted() {
    let body = "User-agent: *\nSitemap: https://a.com/s1.xml\nDisallow: /x";

    assert_that(&extract_sitemap_urls(body)).is_equal_to(vec!["https://a.com/s1.xml".to_string()]);
}

#[test]
fn body_without_user_agent_yields_nothing() {
    let body = "Sitemap: https://a.com/s1.xml\n";

    assert!(extract_sitemap_urls(body).is_empty());
}

#[test]
fn directives_match_case_insensitively_in_file_order() {
    let body = "user-AGENT: *\n  SITEMAP:   https://a.com/b.xml  \nsitemap: https://a.com/a.xml\n";

    assert_that(&extract_sitemap_urls(body)).is_equal_to(vec![
        "https://a.com/b.xml".to_string(),
        "https://a.com/a.xml".to_string(),
    ]);
}

#[test]
fn malformed_entries_are_dropped() {
    let body = "User-agent: *\nSitemap: not a url\nSitemap:\nSitemap: /relative.xml\nSitemap: https://a.com/ok.xml\n";

    assert_that(&extract_sitemap_urls(body)).is_equal_to(vec!["https://a.com/ok.xml".to_string()]);
}

#[tokio::test]
async fn robots_file_is_read_from_the_origin() {
    let server = MockServer::start().await;
    let base = server.uri();
    serve(
        &server,
        "/robots.txt",
        &format!("User-agent: *\nDisallow: /admin\nSitemap: {base}/sitemap_index.xml\n"),
    )
    .await;
    let root = normalize(&format!("{base}/docs/")).expect("mock URI should normalize");

    let mut trace = Trace::default();
    let sitemaps = resolve_from_robots(&root, &fetcher_for(&server), &mut trace).await;

    assert_that(&sitemaps).is_equal_to(vec![format!("{base}/sitemap_index.xml")]);
    assert!(trace.contains("Found 1 sitemaps in robots.txt"));
}

#[tokio::test]
async fn missing_robots_file_fails_softly() {
    let server = MockServer::start().await;
    let root = normalize(&server.uri()).expect("mock URI should normalize");

    let mut trace = Trace::default();
    let sitemaps = resolve_from_robots(&root, &fetcher_for(&server), &mut trace).await;

    assert!(sitemaps.is_empty());
    assert!(trace.contains("Failed to fetch robots.txt: HTTP 404"));
}
