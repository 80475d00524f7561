use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::server::GalleryServerOptions;

const CONFIG_FILE_NAME: &str = "icon-gallery.toml";

/// `icons_path = "src/icons"` or `icons_path = ["src/icons", "lib/icons"]`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IconsPath {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl IconsPath {
    pub fn into_vec(self) -> Vec<PathBuf> {
        match self {
            IconsPath::One(path) => vec![path],
            IconsPath::Many(paths) => paths,
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub icons_path: Option<IconsPath>,
    pub port: Option<u16>,
    pub open: Option<bool>,
    pub host: Option<IpAddr>,
    pub gallery_dir: Option<PathBuf>,
    pub max_port_attempts: Option<u32>,
}

/// Merge CLI flags, file config and defaults, in that order of precedence.
pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> GalleryServerOptions {
    let file = file.unwrap_or_default();
    let defaults = GalleryServerOptions::default();

    let icons_path = if args.paths.is_empty() {
        file.icons_path.map(IconsPath::into_vec).unwrap_or(defaults.icons_path)
    } else {
        args.paths.clone()
    };

    GalleryServerOptions {
        icons_path,
        port: args.port.or(file.port).unwrap_or(defaults.port),
        open: !args.no_open && file.open.unwrap_or(defaults.open),
        host: args.host.or(file.host).unwrap_or(defaults.host),
        gallery_dir: args
            .gallery_dir
            .clone()
            .or(file.gallery_dir)
            .unwrap_or(defaults.gallery_dir),
        max_port_attempts: file.max_port_attempts.unwrap_or(defaults.max_port_attempts),
    }
}

/// Where a config file was found, in search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named with `--config`; used even if it does not exist so the read error surfaces.
    Flag,
    /// `./icon-gallery.toml`
    WorkingDir,
    /// `<config_dir>/icon-gallery/config.toml`
    UserDir,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConfigSource::Flag => "--config",
            ConfigSource::WorkingDir => "working directory",
            ConfigSource::UserDir => "user config directory",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Resolve the config file for this run: the `--config` path if given,
/// otherwise the first default location that exists.
pub fn find_config_file(explicit: Option<&Path>) -> Option<ConfigLocation> {
    let mut candidates = vec![(ConfigSource::WorkingDir, PathBuf::from(CONFIG_FILE_NAME))];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push((ConfigSource::UserDir, config_dir.join("icon-gallery").join("config.toml")));
    }
    search_config(explicit, candidates)
}

/// First existing candidate, unless an explicit path short-circuits the search.
pub fn search_config<I>(explicit: Option<&Path>, candidates: I) -> Option<ConfigLocation>
where
    I: IntoIterator<Item = (ConfigSource, PathBuf)>,
{
    if let Some(path) = explicit {
        return Some(ConfigLocation { path: path.to_owned(), source: ConfigSource::Flag });
    }
    candidates
        .into_iter()
        .find(|(_, path)| path.is_file())
        .map(|(source, path)| ConfigLocation { path, source })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {} (from {source_kind}): {error}", .path.display())]
    Io {
        path: PathBuf,
        source_kind: ConfigSource,
        #[source]
        error: std::io::Error,
    },
    #[error("invalid config {} (from {source_kind}): {error}", .path.display())]
    Parse {
        path: PathBuf,
        source_kind: ConfigSource,
        #[source]
        error: toml::de::Error,
    },
}

pub fn load_config(location: &ConfigLocation) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(&location.path).map_err(|error| ConfigError::Io {
        path: location.path.clone(),
        source_kind: location.source,
        error,
    })?;
    toml::from_str(&content).map_err(|error| ConfigError::Parse {
        path: location.path.clone(),
        source_kind: location.source,
        error,
    })
}
