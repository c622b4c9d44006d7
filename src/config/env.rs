use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    SeedPath,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "PORT",
            EnvKey::SeedPath => "MOVIES_SEED_PATH",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => parse_or(&val, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr>(raw: &str, default: T) -> T {
    raw.trim().parse::<T>().unwrap_or(default)
}
