use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

// installation kind
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Java Runtime Environment
    Jre,
    /// Java Development Kit
    Jdk,
}

impl Mode {
    /// registry product key written by the Java installer for this kind
    #[must_use]
    pub fn product_key(self) -> &'static str {
        match self {
            Mode::Jre => "Java Runtime Environment",
            Mode::Jdk => "Java Development Kit",
        }
    }
}

/// variable the java home is read from and exported as
pub const JAVA_HOME_VAR: &str = "JAVA_HOME";

/// top-level key the installer chain lives under
pub const SOFTWARE_KEY: &str = "SOFTWARE";

// resolver config
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub bundled_runtime: String,
    pub vendor_key: String,
    pub max_path_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bundled_runtime: "../../jre".into(),
            vendor_key: "JavaSoft".into(),
            max_path_len: 260,
        }
    }
}

impl ResolverConfig {
    /// Read a TOML file; fields it leaves out keep their defaults.
    /// # Errors
    /// Fails when the file cannot be read or is not valid TOML for this struct.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        let config = toml::from_str(&config)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

#[test]
fn test_mode_product_key() {
    assert_eq!(Mode::Jre.product_key(), "Java Runtime Environment");
    assert_eq!(Mode::Jdk.product_key(), "Java Development Kit");
}

#[test]
fn test_mode_is_case_sensitive() {
    assert_eq!(Mode::from_str("jdk", false), Ok(Mode::Jdk));
    assert_eq!(Mode::from_str("jre", false), Ok(Mode::Jre));
    assert!(Mode::from_str("JDK", false).is_err());
    assert!(Mode::from_str("java", false).is_err());
}

#[test]
fn test_load_partial_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("javaenv.toml");
    fs::write(&path, "vendor_key = \"Eclipse Adoptium\"\nmax_path_len = 32767\n").unwrap();

    let config = ResolverConfig::load(&path).unwrap();
    assert_eq!(config.vendor_key, "Eclipse Adoptium");
    assert_eq!(config.max_path_len, 32767);
    assert_eq!(config.bundled_runtime, "../../jre");
}

#[test]
fn test_load_rejects_fixed_names() {
    let dir = tempfile::tempdir().unwrap();
    for (file, line) in [
        ("home.toml", "home_var = \"JRE_HOME\"\n"),
        ("software.toml", "software_key = \"SOFTWARE\\\\WOW6432Node\"\n"),
    ] {
        let path = dir.path().join(file);
        fs::write(&path, line).unwrap();
        let err = ResolverConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains(file));
    }
}

#[test]
fn test_load_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResolverConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
