use crate::config::{Mode, ResolverConfig, JAVA_HOME_VAR, SOFTWARE_KEY};
use crate::error::{LaunchError, Result};
use crate::registry::{Registry, RegistryKey};
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const CURRENT_VERSION: &str = "CurrentVersion";
const JAVA_HOME_VALUE: &str = "JavaHome";

/// where a resolved java home came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// already set in the calling environment
    Environment,
    /// bundled runtime next to the application
    Bundled,
    /// installer registry entry for `version`
    Registry { version: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaHome {
    pub path: PathBuf,
    pub source: Source,
}

pub struct Resolver<'a, R> {
    config: &'a ResolverConfig,
    registry: R,
    working_dir: PathBuf,
}

impl<'a, R: Registry> Resolver<'a, R> {
    #[must_use]
    pub fn new(config: &'a ResolverConfig, registry: R, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            registry,
            working_dir: working_dir.into(),
        }
    }

    /// Resolve the java home for `mode`.
    ///
    /// `preset` is the current value of the home variable, if any. It wins
    /// unconditionally and nothing else is consulted. In `Mode::Jre` the
    /// bundled runtime is probed next; a missing directory silently falls
    /// through. The registry comes last and any failure there is final.
    /// # Errors
    /// Any missing key or value in the registry chain, or a value longer
    /// than `max_path_len`.
    pub fn resolve(&self, mode: Mode, preset: Option<OsString>) -> Result<JavaHome> {
        if let Some(home) = preset {
            info!("Using {JAVA_HOME_VAR} from environment");
            return Ok(JavaHome {
                path: home.into(),
                source: Source::Environment,
            });
        }

        if mode == Mode::Jre {
            if let Some(path) = self.bundled_runtime() {
                info!("Using bundled runtime {}", path.display());
                return Ok(JavaHome {
                    path,
                    source: Source::Bundled,
                });
            }
        }

        let (version, path) = self.registry_lookup(mode)?;
        info!("Using {} {version} from registry", mode.product_key());
        Ok(JavaHome {
            path: path.into(),
            source: Source::Registry { version },
        })
    }

    fn bundled_runtime(&self) -> Option<PathBuf> {
        let path = self.working_dir.join(Path::new(&self.config.bundled_runtime));
        if path.exists() {
            Some(path)
        } else {
            debug!("no bundled runtime at {}", path.display());
            None
        }
    }

    /// walk vendor, product, version; returns (version, home)
    fn registry_lookup(&self, mode: Mode) -> Result<(String, String)> {
        let software = self.registry.open(SOFTWARE_KEY)?;
        let vendor = software.open_subkey(&self.config.vendor_key)?;
        let product = vendor.open_subkey(mode.product_key())?;
        let version = self.read_value(&product, CURRENT_VERSION)?;
        debug!("{} {CURRENT_VERSION} = {version}", product.path());

        let installed = product.open_subkey(&version)?;
        let home = self.read_value(&installed, JAVA_HOME_VALUE)?;
        debug!("{} {JAVA_HOME_VALUE} = {home}", installed.path());
        Ok((version, home))
    }

    fn read_value<K: RegistryKey>(&self, key: &K, name: &str) -> Result<String> {
        let value = key.string_value(name)?;
        let len = value.chars().count();
        if len > self.config.max_path_len {
            return Err(LaunchError::ValueTooLong {
                path: key.path().into(),
                name: name.into(),
                len,
                max: self.config.max_path_len,
            });
        }
        Ok(value)
    }
}
