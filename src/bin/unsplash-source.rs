use std::{env, fs, io, path::Path, process};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use unsplash_source::{PhotoQuery, source};

const ENV_EXAMPLE: &str = include_str!("../../.env.example");

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Env(#[from] dotenvy::Error),

    #[error("{0}")]
    Source(#[from] source::Error),

    #[error("Could not locate the configuration directory")]
    NoConfigDir,

    #[error("A default configuration file has been created, please review it before proceeding")]
    RequiresConfigure,
}

type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    query: PhotoQuery,
}

fn configure<P: AsRef<Path>>(config_folder: P) -> Result<PhotoQuery> {
    let config_folder = config_folder.as_ref();

    if !config_folder.exists() {
        fs::create_dir_all(config_folder)?;
    }

    let env_path = config_folder.join(".env");
    let config_path = config_folder.join("config.json");
    let requires_config = !env_path.exists() || !config_path.exists();

    if requires_config {
        if !env_path.exists() {
            fs::write(&env_path, ENV_EXAMPLE)?;
        }

        if !config_path.exists() {
            let content = serde_json::to_string_pretty(&Config::default())?;

            fs::write(&config_path, content)?;
        }

        tracing::info!("wrote default configuration to {}", config_folder.display());

        return Err(Error::RequiresConfigure);
    }

    dotenvy::from_path(&env_path)?;

    let config: Config = {
        let content = fs::read_to_string(&config_path)?;

        serde_json::from_str(&content)?
    };

    tracing::info!("loaded query from {}", config_path.display());

    let query = match env::var("UNSPLASH_SOURCE_URL") {
        Ok(base) if !base.is_empty() => {
            tracing::debug!(%base, "overriding service root");
            config.query.with_base(base)?
        }

        _ => config.query,
    };

    Ok(query)
}

fn main() {
    fn run() -> Result<()> {
        let path = dirs::config_dir()
            .ok_or(Error::NoConfigDir)?
            .join("UnsplashSource");

        let query = configure(&path)?;

        println!("{}", query.fetch());

        Ok(())
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "unsplash_source=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let code = report(run());
    if code != 0 {
        process::exit(code);
    }
}

fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,

        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, sync::Mutex};

    use unsplash_source::source::DEFAULT_BASE;

    use super::*;

    // `configure` reads the process environment, which every test shares.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE: &str = "UNSPLASH_SOURCE_URL";

    fn scratch(name: &str) -> PathBuf {
        let folder = env::temp_dir().join(format!(
            "unsplash-source-{}-{}",
            process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&folder);

        folder
    }

    fn clear_override() {
        // SAFETY: callers hold ENV_LOCK, so no other test touches the environment.
        unsafe { env::remove_var(OVERRIDE) };
    }

    fn write_config(folder: &Path, env_file: &str, query: &str) {
        fs::create_dir_all(folder).unwrap();
        fs::write(folder.join(".env"), env_file).unwrap();
        fs::write(
            folder.join("config.json"),
            format!("{{ \"query\": {query} }}"),
        )
        .unwrap();
    }

    #[test]
    fn first_run_writes_defaults_and_stops() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_override();
        let folder = scratch("first-run");

        let result = configure(&folder);
        assert!(matches!(result, Err(Error::RequiresConfigure)), "{result:?}");

        let env_file = fs::read_to_string(folder.join(".env")).unwrap();
        assert_eq!(env_file, ENV_EXAMPLE);

        let content = fs::read_to_string(folder.join("config.json")).unwrap();
        let config: Config = serde_json::from_str(&content).unwrap();
        assert_eq!(config.query, PhotoQuery::new());

        // Both files are in place now, so the next run goes through.
        let query = configure(&folder).unwrap();
        assert_eq!(query.fetch(), format!("{DEFAULT_BASE}/random"));

        fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn stored_query_is_loaded() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_override();
        let folder = scratch("stored");
        write_config(
            &folder,
            ENV_EXAMPLE,
            r#"{ "user": "erondu", "width": 800, "height": 600, "interval": "daily" }"#,
        );

        let query = configure(&folder).unwrap();
        assert_eq!(query.fetch(), format!("{DEFAULT_BASE}/user/erondu/800x600/daily"));

        fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn env_file_overrides_service_root() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_override();
        let folder = scratch("override");
        write_config(
            &folder,
            "UNSPLASH_SOURCE_URL=http://localhost:9000/\n",
            r#"{ "scope": "featured" }"#,
        );

        let query = configure(&folder);
        clear_override();

        assert_eq!(query.unwrap().fetch(), "http://localhost:9000/featured/random");

        fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn invalid_override_is_reported() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_override();
        let folder = scratch("invalid-override");
        write_config(&folder, "UNSPLASH_SOURCE_URL=ftp://example.com\n", "{}");

        let result = configure(&folder);
        clear_override();

        assert!(
            matches!(
                &result,
                Err(Error::Source(source::Error::InvalidBaseUrl(base))) if base == "ftp://example.com"
            ),
            "{result:?}"
        );

        fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn failures_exit_non_zero() {
        assert_eq!(report(Ok(())), 0);
        assert_eq!(report(Err(Error::RequiresConfigure)), 1);
        assert_eq!(report(Err(Error::NoConfigDir)), 1);
    }
}
