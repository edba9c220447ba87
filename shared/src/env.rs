pub enum Environment {
    Development,
    Production,
}

/// Decides the runtime environment from the `ENV` variable.
/// Anything other than `production` falls back to development.
pub fn which() -> Environment {
    #[cfg(debug_assertions)]
    let default_env = "development".to_string();
    #[cfg(not(debug_assertions))]
    let default_env = "production".to_string();

    match std::env::var("ENV").unwrap_or(default_env).as_str() {
        "production" => Environment::Production,
        _ => Environment::Development,
    }
}
