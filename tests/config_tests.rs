use std::time::Duration;

use llmstxt::{Error, Provider, ProviderConfig};
use spectral::assert_that;

#[test]
fn defaults_to_one_second_delay_and_no_provider() {
    let config = ProviderConfig::default();

    assert_that(&config.delay).is_equal_to(Duration::from_millis(1000));
    assert_that(&config.active()).is_equal_to(None);
}

#[test]
fn nothing_selected_is_a_configuration_error() {
    let config = ProviderConfig::new(Duration::ZERO);

    let Err(Error::Configuration(message)) = config.validate() else {
        panic!("expected a configuration error");
    };
    assert_that(&message.as_str())
        .is_equal_to("Please enable and provide an API key for at least one LLM provider");
}

#[test]
fn blank_key_is_a_configuration_error() {
    let mut config = ProviderConfig::default();
    config.select(Provider::Groq, "   ");

    assert!(matches!(config.validate(), Err(Error::Configuration(_))));
}

#[test]
fn selecting_replaces_the_previous_provider() {
    let mut config = ProviderConfig::default();
    config.select(Provider::Hyperbolic, "hyperbolic-key");
    config.select(Provider::Groq, "groq-key");

    let (provider, key) = config.validate().expect("groq should be usable");

    assert_that(&provider).is_equal_to(Provider::Groq);
    assert_that(&key).is_equal_to("groq-key");
}

#[test]
fn deselecting_disables_the_provider() {
    let mut config = ProviderConfig::default();
    config.select(Provider::Hyperbolic, "key");
    config.deselect();

    assert!(config.validate().is_err());
}

#[test]
fn provider_names_parse_case_insensitively() {
    assert_that(&"GROQ".parse::<Provider>()).is_equal_to(Ok(Provider::Groq));
    assert_that(&"hyperbolic".parse::<Provider>()).is_equal_to(Ok(Provider::Hyperbolic));
    assert!("openai".parse::<Provider>().is_err());
}
