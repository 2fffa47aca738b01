//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["socratic.toml", ".socratic.toml"];
const ENV_PREFIX: &str = "SOCRATIC_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `SOCRATIC_*`, e.g. `SOCRATIC_MODEL__NAME=gpt4o`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./socratic.toml` or `./.socratic.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/socratic-chat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|path| path.exists());
        let project = Self::project_config_path();
        Self::load_layers(global.as_deref(), project.as_deref(), config_path)
    }

    /// Merge the given files over the defaults, then the environment.
    ///
    /// An explicit path must exist; discovered paths are only passed in
    /// when they do.
    fn load_layers(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/socratic-chat/config.toml if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("socratic-chat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* variables", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./socratic.toml or ./.socratic.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socratic_domain::Model;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.model.to_model(), Model::default());
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("socratic-chat"));
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_explicit_file_merges_over_defaults() {
        let file = toml_file(
            r#"
[model]
name = "gpt4o"

[behavior]
timeout_seconds = 30
"#,
        );

        let config = ConfigLoader::load_layers(None, None, Some(file.path())).unwrap();
        assert_eq!(config.model.to_model(), Model::new("openai", "gpt4o"));
        assert_eq!(config.behavior.timeout_seconds, Some(30));
        assert_eq!(config.behavior.stream_pacing_ms, 50);
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let project = toml_file("[model]\nname = \"from-project\"\n[repl]\nshow_progress = false");
        let explicit = toml_file("[model]\nname = \"from-explicit\"");

        let config =
            ConfigLoader::load_layers(None, Some(project.path()), Some(explicit.path())).unwrap();
        assert_eq!(config.model.name, "from-explicit");
        assert!(!config.repl.show_progress);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = ConfigLoader::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let file = toml_file("[behavior]\nstream_pacing_ms = \"fast\"");

        assert!(ConfigLoader::load_layers(None, None, Some(file.path())).is_err());
    }
}
