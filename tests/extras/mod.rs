#![allow(dead_code)]

use llm::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Tool},
    error::LLMError,
};
use llmstxt::{Fetcher, FetcherConfig, TextBy};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the stub extraction provider is mounted under on the mock server.
pub(crate) const EXTRACT_PATH: &str = "/extract";

#[macro_export]
macro_rules! assert_responses {
    (
        $(
            $test_name:ident : response => $response:expr, result => $result:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let stub = StubLlmProvider::new($response.to_owned());
                let context = llmstxt::summarize::SummarizeContext {
                    provider: llmstxt::Provider::Hyperbolic,
                    model: &stub,
                    prompt_template: None,
                };
                let result = llmstxt::summarize::summarize_page("", "", &context)
                    .await
                    .expect("Expected successful processing.");

                assert_that(&result).is_equal_to($result.to_owned());
            }
        )+
    }
}

pub(crate) fn fetcher_for(server: &MockServer) -> Fetcher {
    fetcher_with_key(server, None)
}

pub(crate) fn fetcher_with_key(server: &MockServer, key: Option<&str>) -> Fetcher {
    Fetcher::new(FetcherConfig {
        extractor_url: Url::parse(&format!("{}{EXTRACT_PATH}", server.uri()))
            .expect("Mock server URI should parse"),
        extractor_key: key.map(str::to_string),
        text_by: TextBy::DomSmoothie,
        selector: None,
    })
    .expect("Fetcher should build")
}

/// Serves `body` with status 200 at `route`.
pub(crate) async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Makes the stub extraction provider answer `content` for `page_url`.
pub(crate) async fn serve_extracted(server: &MockServer, page_url: &str, content: &str) {
    Mock::given(method("GET"))
        .and(path(EXTRACT_PATH))
        .and(query_param("url", page_url))
        .respond_with(ResponseTemplate::new(200).set_body_string(content))
        .mount(server)
        .await;
}

pub(crate) fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <url><loc>{loc}</loc></url>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</urlset>"
    )
}

pub(crate) fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("  <sitemap><loc>{loc}</loc></sitemap>\n"))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</sitemapindex>"
    )
}

pub(crate) struct StubLlmProvider {
    response_content: String,
    fail_for: Option<String>,
}

impl StubLlmProvider {
    pub fn new(response_content: String) -> Self {
        StubLlmProvider {
            response_content,
            fail_for: None,
        }
    }

    /// Fails every chat whose messages mention `needle`.
    pub fn failing_for(response_content: String, needle: &str) -> Self {
        StubLlmProvider {
            response_content,
            fail_for: Some(needle.to_string()),
        }
    }
}

impl ChatProvider for StubLlmProvider {
    fn chat<'life0, 'life1, 'async_trait>(
        &'life0 self,
        messages: &'life1 [ChatMessage],
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let fails = self.fail_for.as_deref().is_some_and(|needle| {
            messages
                .iter()
                .any(|message| message.content.contains(needle))
        });

        Box::pin(async move {
            #[derive(Debug)]
            struct StringResponse(String);

            impl ChatResponse for StringResponse {
                fn text(&self) -> Option<String> {
                    Some(self.0.clone())
                }

                fn tool_calls(&self) -> Option<Vec<llm::ToolCall>> {
                    panic!()
                }

                fn thinking(&self) -> Option<String> {
                    None
                }

                fn usage(&self) -> Option<llm::chat::Usage> {
                    None
                }
            }

            impl std::fmt::Display for StringResponse {
                fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(formatter, "{}", self.0)
                }
            }

            if fails {
                return Err(LLMError::ProviderError("stub provider failure".to_string()));
            }

            Ok(Box::new(StringResponse(self.response_content.clone())) as Box<dyn ChatResponse>)
        })
    }

    fn chat_with_tools<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _messages: &'life1 [ChatMessage],
        _tools: Option<&'life2 [Tool]>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Box<dyn ChatResponse>, LLMError>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!()
    }
}
