use llmstxt::RunState;
use llmstxt::state::enrichment_progress;
use spectral::assert_that;

#[test]
fn enrichment_fills_the_last_forty_percent() {
    assert_that(&enrichment_progress(0, 4)).is_equal_to(60);
    assert_that(&enrichment_progress(1, 4)).is_equal_to(70);
    assert_that(&enrichment_progress(1, 3)).is_equal_to(73);
    assert_that(&enrichment_progress(4, 4)).is_equal_to(100);
    assert_that(&enrichment_progress(0, 0)).is_equal_to(60);
}

#[test]
fn begin_discards_the_previous_run() {
    let mut state = RunState::default();
    state.begin();
    state.urls.push("https://site.test/a".to_string());
    state.mark_processed("https://site.test/a", 1);
    state.fail("boom");

    state.begin();

    assert!(state.loading);
    assert_that(&state.progress).is_equal_to(0);
    assert!(state.urls.is_empty());
    assert!(state.processed.is_empty());
    assert_that(&state.error).is_equal_to(None);
    assert!(state.trace.is_empty());
}

#[test]
fn failure_keeps_progress_and_stops_loading() {
    let mut state = RunState::default();
    state.begin();
    state.progress = 40;

    state.fail("No URLs found in sitemaps");

    assert!(!state.loading);
    assert_that(&state.progress).is_equal_to(40);
    assert_that(&state.error).is_equal_to(Some("No URLs found in sitemaps".to_string()));
    assert!(state.trace.contains("Error: No URLs found in sitemaps"));
}

#[test]
fn finish_reaches_one_hundred() {
    let mut state = RunState::default();
    state.begin();

    state.finish("[]".to_string());

    assert!(!state.loading);
    assert_that(&state.progress).is_equal_to(100);
    assert_that(&state.result).is_equal_to(Some("[]".to_string()));
}

#[test]
fn trace_renders_one_timestamped_line_per_entry() {
    let mut state = RunState::default();
    state.trace.info("first");
    state.trace.debug("second");

    let rendered = state.trace.to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_that(&lines.len()).is_equal_to(2);
    assert!(lines.first().is_some_and(|line| line.ends_with("Z: first")));
    assert!(lines.get(1).is_some_and(|line| line.ends_with("Z: second")));
}
