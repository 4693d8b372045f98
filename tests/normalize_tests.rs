use llmstxt::{Error, normalize};
use spectral::assert_that;

#[test]
fn bare_host_gets_https() {
    let root = normalize("example.com").expect("bare host should normalize");

    assert_that(&root.as_str()).is_equal_to("https://example.com");
    assert_that(&root.hostname()).is_equal_to("example.com");
}

#[test]
fn explicit_http_is_kept() {
    let root = normalize("http://example.com/").expect("http URL should normalize");

    assert_that(&root.as_str()).is_equal_to("http://example.com");
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let root = normalize("  https://example.com/docs/ \n").expect("padded URL should normalize");

    assert_that(&root.as_str()).is_equal_to("https://example.com/docs");
}

#[test]
fn robots_txt_lives_at_the_origin() {
    let root = normalize("https://example.com/docs").expect("URL with path should normalize");

    let robots = root.robots_txt().expect("robots URL should build");

    assert_that(&robots.as_str()).is_equal_to("https://example.com/robots.txt");
    assert_that(&root.with_path("/sitemap.xml"))
        .is_equal_to("https://example.com/docs/sitemap.xml".to_string());
}

#[test]
fn unparseable_input_is_rejected() {
    assert!(matches!(normalize("http://"), Err(Error::InvalidUrl(_))));
    assert!(matches!(normalize(""), Err(Error::InvalidUrl(_))));
    assert!(matches!(normalize("https://exa mple.com"), Err(Error::InvalidUrl(_))));
}
