//! Process settings read once from the environment (and an optional `.env`).

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8000;

/// Local development origins allowed by CORS when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Which table service the handlers talk to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendSettings {
    /// Managed table REST API (PostgREST, as exposed by Supabase).
    Rest { url: String, key: String },
    /// Direct SQL against the same Postgres database.
    Postgres { database_url: String, schema: String },
    /// In-process tables; nothing survives a restart.
    Memory,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub backend: BackendSettings,
    pub port: u16,
    pub debug: bool,
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingVar(key));

        let backend = match get("BACKEND").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("rest") | Some("supabase") => BackendSettings::Rest {
                url: require("SUPABASE_URL")?.trim_end_matches('/').to_string(),
                key: require("SUPABASE_KEY")?,
            },
            Some("postgres") => BackendSettings::Postgres {
                database_url: require("DATABASE_URL")?,
                schema: get("DB_SCHEMA").unwrap_or_else(|| "public".into()),
            },
            Some("memory") => BackendSettings::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidVar {
                    var: "BACKEND",
                    reason: format!("unknown backend '{}' (expected rest, postgres or memory)", other),
                })
            }
        };

        let port = match get("APP_PORT") {
            Some(p) => p.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                var: "APP_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        // Only the literal "True" turns debug on.
        let debug = get("DEBUG").as_deref() == Some("True");

        let cors_origins = match get("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Settings {
            backend,
            port,
            debug,
            cors_origins,
        })
    }

    /// Default tracing directive for this process.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "brew_journal=debug"
        } else {
            "brew_journal=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn rest_backend_requires_url_and_key() {
        let err = Settings::from_lookup(lookup(&[("SUPABASE_KEY", "k")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SUPABASE_URL")));

        let err = Settings::from_lookup(lookup(&[("SUPABASE_URL", "https://x.supabase.co")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SUPABASE_KEY")));
    }

    #[test]
    fn defaults_apply() {
        let s = Settings::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co/"),
            ("SUPABASE_KEY", "secret"),
        ]))
        .unwrap();
        assert_eq!(
            s.backend,
            BackendSettings::Rest {
                url: "https://x.supabase.co".into(),
                key: "secret".into()
            }
        );
        assert_eq!(s.port, DEFAULT_PORT);
        assert!(!s.debug);
        assert_eq!(s.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());
        assert_eq!(s.log_directive(), "brew_journal=info");
    }

    #[test]
    fn debug_flag_is_exact() {
        let on = Settings::from_lookup(lookup(&[("BACKEND", "memory"), ("DEBUG", "True")])).unwrap();
        assert!(on.debug);
        let off = Settings::from_lookup(lookup(&[("BACKEND", "memory"), ("DEBUG", "true")])).unwrap();
        assert!(!off.debug);
    }

    #[test]
    fn postgres_backend_and_custom_origins() {
        let s = Settings::from_lookup(lookup(&[
            ("BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/brew"),
            ("APP_PORT", "9090"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(
            s.backend,
            BackendSettings::Postgres {
                database_url: "postgres://localhost/brew".into(),
                schema: "public".into()
            }
        );
        assert_eq!(s.port, 9090);
        assert_eq!(s.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn bad_port_and_unknown_backend_fail() {
        let err = Settings::from_lookup(lookup(&[("BACKEND", "memory"), ("APP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "APP_PORT", .. }));
        let err = Settings::from_lookup(lookup(&[("BACKEND", "mongo")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "BACKEND", .. }));
    }
}
