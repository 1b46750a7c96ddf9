use sl_domain::config::{Config, StoreBackend};

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
}

#[test]
fn empty_file_matches_default() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.store.backend, StoreBackend::File);
    assert_eq!(config.search.default_limit, 8);
    assert_eq!(config.stream.keepalive_secs, 15);
}

#[test]
fn default_cors_allows_only_localhost() {
    let config = Config::default();
    assert!(config.server.cors.allowed_origins.contains(&"http://localhost:*".to_string()));
    assert!(config.server.cors.allowed_origins.contains(&"http://127.0.0.1:*".to_string()));
}

#[test]
fn full_file_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 9100
api_token_env = "SESSION_LOG_SECRET"

[store]
backend = "file"
path = "/var/lib/session-logger/sessions.json"

[search]
default_limit = 5
max_limit = 20

[stream]
keepalive_secs = 30
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.api_token_env, "SESSION_LOG_SECRET");
    assert_eq!(
        config.store.path,
        std::path::PathBuf::from("/var/lib/session-logger/sessions.json")
    );
    assert_eq!(config.search.effective_limit(None), 5);
    assert_eq!(config.search.effective_limit(Some(50)), 20);
    assert_eq!(config.stream.keepalive_secs, 30);
    assert!(config.validate().is_empty());
}

#[test]
fn api_token_env_default() {
    let config = Config::default();
    assert_eq!(config.server.api_token_env, "SL_API_TOKEN");
}
