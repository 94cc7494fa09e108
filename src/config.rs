// Runtime configuration
// Read once at startup from the environment (and `.env` through dotenv)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);
const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Where the data files live and how the server runs
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub cache_ttl: Duration,
    pub files: DataFiles,
}

/// Paths of the spreadsheets backing each table
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub users: PathBuf,
    pub sales: PathBuf,
    pub goals: PathBuf,
    pub weekly_goals: PathBuf,
    pub actions: PathBuf,
    pub collections: PathBuf,
}

impl DataFiles {
    /// Default file names under one directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            users: dir.join("usuarios.xlsx"),
            sales: dir.join("diario_bordo.xlsx"),
            goals: dir.join("metas_colecao.xlsx"),
            weekly_goals: dir.join("metas_semanais.xlsx"),
            actions: dir.join("acoes.xlsx"),
            collections: dir.join("colecoes.xlsx"),
        }
    }
}

impl AppConfig {
    /// Config for a data directory with default settings
    pub fn for_data_dir(dir: impl Into<PathBuf>, jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            jwt_secret: jwt_secret.into(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            files: DataFiles::in_dir(dir),
        }
    }

    /// Reads the configuration, falling back to defaults with a warning
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| {
            tracing::warn!("DATA_DIR not set, using ./data");
            "data".to_string()
        }));

        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|raw| match raw.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!("Invalid BIND_ADDR {:?}: {}", raw, e);
                    None
                }
            })
            .unwrap_or(DEFAULT_BIND_ADDR);

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            "dev-secret-key".to_string()
        });

        let cache_ttl_secs = std::env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let defaults = DataFiles::in_dir(&data_dir);
        let file = |var: &str, default: PathBuf| {
            std::env::var(var)
                .map(|name| data_dir.join(name))
                .unwrap_or(default)
        };

        Self {
            bind_addr,
            jwt_secret,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            files: DataFiles {
                users: file("USERS_FILE", defaults.users),
                sales: file("SALES_FILE", defaults.sales),
                goals: file("GOALS_FILE", defaults.goals),
                weekly_goals: file("WEEKLY_GOALS_FILE", defaults.weekly_goals),
                actions: file("ACTIONS_FILE", defaults.actions),
                collections: file("COLLECTIONS_FILE", defaults.collections),
            },
        }
    }
}
