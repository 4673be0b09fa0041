use error_stack::{Report, ResultExt};
use kernel::KernelError;
use std::path::PathBuf;

const CATALOG_STORE: &str = "CATALOG_STORE";
const CATALOG_PORT: &str = "CATALOG_PORT";
const CATALOG_LOG_DIR: &str = "CATALOG_LOG_DIR";

const DEFAULT_PORT: u16 = 3200;
const DEFAULT_LOG_DIR: &str = "./logs/";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServerConfig {
    port: u16,
    store: StoreBackend,
    log_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let store = match lookup(CATALOG_STORE).as_deref().map(str::trim) {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(Report::new(KernelError::Internal).attach_printable(format!(
                    "`{CATALOG_STORE}` must be `postgres` or `memory`, got `{other}`"
                )))
            }
        };
        let port = match lookup(CATALOG_PORT) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .change_context_lazy(|| KernelError::Internal)
                .attach_printable_lazy(|| format!("`{CATALOG_PORT}` is not a port: `{port}`"))?,
            None => DEFAULT_PORT,
        };
        let log_dir = lookup(CATALOG_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        Ok(Self {
            port,
            store,
            log_dir,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> StoreBackend {
        self.store
    }

    pub fn log_dir(&self) -> &PathBuf {
        &self.log_dir
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use kernel::KernelError;

    use super::{ServerConfig, StoreBackend};

    fn config(vars: &[(&str, &str)]) -> error_stack::Result<ServerConfig, KernelError> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port(), 3200);
        assert_eq!(config.store(), StoreBackend::Postgres);
        assert_eq!(config.log_dir(), &PathBuf::from("./logs/"));
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("CATALOG_STORE", "memory"),
            ("CATALOG_PORT", "8080"),
            ("CATALOG_LOG_DIR", "/tmp/catalog"),
        ])
        .unwrap();
        assert_eq!(config.port(), 8080);
        assert_eq!(config.store(), StoreBackend::Memory);
        assert_eq!(config.log_dir(), &PathBuf::from("/tmp/catalog"));
    }

    #[test]
    fn rejects_bad_values() {
        let report = config(&[("CATALOG_STORE", "sqlite")]).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        let report = config(&[("CATALOG_PORT", "eighty")]).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
