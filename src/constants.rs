pub const EXTRACTOR_API_KEY_ENV_NAME: &str = "LLMSTXT_EXTRACTOR_API_KEY";
pub const HYPERBOLIC_API_KEY_ENV_NAME: &str = "LLMSTXT_HYPERBOLIC_API_KEY";
pub const GROQ_API_KEY_ENV_NAME: &str = "LLMSTXT_GROQ_API_KEY";

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; llmstxt/0.1)";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const DEFAULT_EXTRACTOR_URL: &str = "https://md.dhr.wtf/";

/// Extraction responses with fewer characters than this are treated as failures.
pub const MIN_EXTRACTED_LEN: usize = 10;

/// Sitemap indexes nested deeper than this contribute no URLs.
pub const MAX_SITEMAP_DEPTH: usize = 5;

/// Resolved URLs containing this token are dropped.
pub const URL_BLOCKLIST_TOKEN: &str = "script";

pub const DEFAULT_DELAY_MS: u64 = 1000;

pub(crate) const HYPERBOLIC_BASE_URL: &str = "https://api.hyperbolic.xyz/v1/";
pub(crate) const HYPERBOLIC_MODEL: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct";
pub(crate) const GROQ_MODEL: &str = "llama-3.2-1b-preview";
pub(crate) const SUMMARY_MAX_TOKENS: u32 = 200;
pub(crate) const SUMMARY_TEMPERATURE: f32 = 0.7;
pub(crate) const SUMMARY_TOP_P: f32 = 0.9;

pub(crate) const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";
pub(crate) const SUMMARY_MARKER: &str = r"<summary>([\s\S]*?)</summary>";

pub(crate) const DEFAULT_PROMPT_TEMPLATE: &str = r#"Generate a concise 1-sentence summary of this webpage content. Wrap your summary in <summary> tags.

URL: {url}
Content: {text}

Example response format:
<summary>This is a clear and concise one-sentence summary of the webpage.</summary>"#;

/// Paths probed, in order, when robots.txt declares no sitemap.
/// `{hostname}` is replaced with the root's host.
pub(crate) const CONVENTIONAL_SITEMAP_PATHS: [&str; 14] = [
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap.php",
    "/sitemap/{hostname}-sitemap.xml",
    "/wp-sitemap.xml",
    "/sitemap/sitemap-index.xml",
    "/blog-sitemap.xml",
    "/post-sitemap.xml",
    "/page-sitemap.xml",
    "/category-sitemap.xml",
    "/sitemap/master-sitemap.xml",
    "/sitemapindex.xml",
    "/sitemap.gz",
    "/sitemap.txt",
];
