use chatline_core::config::{Config, resolve_env};
use chatline_core::error::ChatlineError;
use chatline_core::provider::deepseek::DeepSeekProvider;

#[test]
fn test_config_from_json() {
    let json = r#"{
        "env": {
            "DEEPSEEK_API_KEY": "sk-from-file",
            "INTERNLM_API_TOKEN": "puyu"
        }
    }"#;

    let config = Config::from_json(json).unwrap();
    assert_eq!(config.env.len(), 2);
    assert_eq!(config.env["DEEPSEEK_API_KEY"], "sk-from-file");
}

#[test]
fn test_config_without_env_table() {
    let config = Config::from_json("{}").unwrap();
    assert!(config.env.is_empty());
}

#[test]
fn test_config_invalid_json() {
    let err = Config::from_json("{ env: ").unwrap_err();
    assert!(matches!(err, ChatlineError::Config { .. }));
}

#[test]
fn test_config_env_resolution() {
    // SAFETY: test-only, unique variable name
    unsafe { std::env::set_var("CHATLINE_TEST_SECRET", "secret-123") };
    assert_eq!(resolve_env("${CHATLINE_TEST_SECRET}"), "secret-123");
    assert_eq!(resolve_env("plain-value"), "plain-value");

    let config = Config::isolated().with_env("CHATLINE_TEST_INDIRECT", "${CHATLINE_TEST_SECRET}");
    assert_eq!(
        config.get_env("CHATLINE_TEST_INDIRECT").as_deref(),
        Some("secret-123")
    );

    unsafe { std::env::remove_var("CHATLINE_TEST_SECRET") };
}

#[test]
fn test_unresolved_reference_counts_as_missing() {
    let config = Config::isolated().with_env("CHATLINE_TEST_DANGLING", "${CHATLINE_TEST_NOT_SET}");
    assert!(config.get_env_required("CHATLINE_TEST_DANGLING").is_err());
}

#[test]
fn test_config_from_file_feeds_init() {
    let path = std::env::temp_dir().join(format!("chatline-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"env": {"DEEPSEEK_API_KEY": "sk-file"}}"#).unwrap();

    let loaded = Config::from_file(path.to_str().unwrap()).unwrap();
    let mut config = Config::isolated();
    config.env = loaded.env;

    let mut adapter = DeepSeekProvider::create();
    adapter.init("deepseek", &config).unwrap();
    assert_eq!(adapter.get_client().unwrap().expose_api_key(), "sk-file");

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_config_missing_file() {
    let err = Config::from_file("/nonexistent/chatline.json").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[cfg(feature = "config-toml")]
#[test]
fn test_config_from_toml() {
    let toml = r#"
[env]
DEEPSEEK_API_KEY = "sk-toml"
"#;
    let config = Config::from_toml(toml).unwrap();
    assert_eq!(config.env["DEEPSEEK_API_KEY"], "sk-toml");
}

#[cfg(feature = "config-yaml")]
#[test]
fn test_config_from_yaml() {
    let yaml = "env:\n  INTERNLM_API_TOKEN: puyu-yaml\n";
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.env["INTERNLM_API_TOKEN"], "puyu-yaml");
}

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("chatline-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[cfg(feature = "config-toml")]
#[test]
fn test_config_toml_file_by_extension() {
    let path = write_temp("ext.toml", "[env]\nDEEPSEEK_API_KEY = \"sk-toml-file\"\n");
    let config = Config::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config.env["DEEPSEEK_API_KEY"], "sk-toml-file");
    std::fs::remove_file(&path).ok();
}

#[cfg(not(feature = "config-toml"))]
#[test]
fn test_config_toml_file_needs_feature() {
    let path = write_temp("ext.toml", "[env]\nDEEPSEEK_API_KEY = \"sk-toml-file\"\n");
    let err = Config::from_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ChatlineError::Config { .. }));
    assert!(err.to_string().contains("config-toml"));
    std::fs::remove_file(&path).ok();
}

#[cfg(feature = "config-yaml")]
#[test]
fn test_config_yaml_file_by_extension() {
    let path = write_temp("ext.yml", "env:\n  INTERNLM_API_TOKEN: puyu-file\n");
    let config = Config::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config.env["INTERNLM_API_TOKEN"], "puyu-file");
    std::fs::remove_file(&path).ok();
}

#[cfg(not(feature = "config-yaml"))]
#[test]
fn test_config_yaml_file_needs_feature() {
    let path = write_temp("ext.yml", "env:\n  INTERNLM_API_TOKEN: puyu-file\n");
    let err = Config::from_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ChatlineError::Config { .. }));
    assert!(err.to_string().contains("config-yaml"));
    std::fs::remove_file(&path).ok();
}
