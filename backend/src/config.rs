use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_HOST: &str = "0.0.0.0";
const CONTAINER_FRONTEND_DIR: &str = "/usr/src/app/frontend/dist";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host = lookup("BIND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let frontend_dir = match lookup("FRONTEND_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => match lookup("CARGO_MANIFEST_DIR") {
                Some(manifest_dir) => PathBuf::from(format!("{}/../frontend/dist", manifest_dir)),
                None => PathBuf::from(CONTAINER_FRONTEND_DIR),
            },
        };

        let assets_dir = lookup("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| frontend_dir.join("static"));

        Ok(Self {
            host,
            port,
            frontend_dir,
            assets_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn index_file(&self) -> PathBuf {
        self.frontend_dir.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.frontend_dir, PathBuf::from("/usr/src/app/frontend/dist"));
        assert_eq!(config.assets_dir, PathBuf::from("/usr/src/app/frontend/dist/static"));
    }

    #[test]
    fn frontend_dir_follows_manifest_dir() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("CARGO_MANIFEST_DIR", "/work/backend")]))
                .unwrap();
        assert_eq!(config.frontend_dir, PathBuf::from("/work/backend/../frontend/dist"));
    }

    #[test]
    fn explicit_values_win() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("BIND_HOST", "127.0.0.1"),
            ("FRONTEND_DIR", "/srv/site"),
            ("ASSETS_DIR", "/srv/logos"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.index_file(), PathBuf::from("/srv/site/index.html"));
        assert_eq!(config.assets_dir, PathBuf::from("/srv/logos"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref raw) if raw == "eighty"));
    }
}
