//! read-only access to the machine registry
use crate::error::Result;

#[cfg(test)]
pub mod memory;

/// A hive that keys can be opened from by full path.
pub trait Registry {
    type Key: RegistryKey;

    /// open `path` below the hive root
    /// # Errors
    /// `LaunchError::KeyNotFound` when the key is absent or cannot be opened.
    fn open(&self, path: &str) -> Result<Self::Key>;
}

/// An open key. Dropping it releases the underlying handle.
pub trait RegistryKey: Sized {
    /// full path of this key below the hive root
    fn path(&self) -> &str;

    /// # Errors
    /// `LaunchError::KeyNotFound` naming the full path of the subkey.
    fn open_subkey(&self, name: &str) -> Result<Self>;

    /// # Errors
    /// `LaunchError::ValueNotFound` or `LaunchError::ValueNotString`.
    fn string_value(&self, name: &str) -> Result<String>;
}

#[cfg(any(windows, test))]
fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}\\{name}")
    }
}

#[cfg(windows)]
pub use self::windows::{LocalMachine, MachineKey};

#[cfg(windows)]
mod windows {
    use super::{join_path, Registry, RegistryKey};
    use crate::error::{LaunchError, Result};
    use log::debug;
    use registry::{Data, Hive, RegKey, Security};

    /// `HKEY_LOCAL_MACHINE`
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalMachine;

    pub struct MachineKey {
        key: RegKey,
        path: String,
    }

    impl Registry for LocalMachine {
        type Key = MachineKey;

        fn open(&self, path: &str) -> Result<MachineKey> {
            let key = Hive::LocalMachine
                .open(path, Security::Read)
                .map_err(|e| {
                    debug!("open HKLM\\{path}: {e}");
                    LaunchError::KeyNotFound { path: path.into() }
                })?;
            Ok(MachineKey {
                key,
                path: path.into(),
            })
        }
    }

    impl RegistryKey for MachineKey {
        fn path(&self) -> &str {
            &self.path
        }

        fn open_subkey(&self, name: &str) -> Result<Self> {
            let path = join_path(&self.path, name);
            let key = self.key.open(name, Security::Read).map_err(|e| {
                debug!("open HKLM\\{path}: {e}");
                LaunchError::KeyNotFound { path: path.clone() }
            })?;
            Ok(MachineKey { key, path })
        }

        fn string_value(&self, name: &str) -> Result<String> {
            let data = self.key.value(name).map_err(|e| {
                debug!("read {name} from HKLM\\{}: {e}", self.path);
                LaunchError::ValueNotFound {
                    path: self.path.clone(),
                    name: name.into(),
                }
            })?;
            match data {
                Data::String(s) | Data::ExpandString(s) => Ok(s.to_string_lossy()),
                _ => Err(LaunchError::ValueNotString {
                    path: self.path.clone(),
                    name: name.into(),
                }),
            }
        }
    }
}

#[cfg(not(windows))]
pub use self::unavailable::{LocalMachine, MachineKey};

#[cfg(not(windows))]
mod unavailable {
    use super::{Registry, RegistryKey};
    use crate::error::{LaunchError, Result};

    /// Stand-in for `HKEY_LOCAL_MACHINE` on hosts without a registry.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalMachine;

    /// No key can ever be opened here.
    pub enum MachineKey {}

    impl Registry for LocalMachine {
        type Key = MachineKey;

        fn open(&self, _path: &str) -> Result<MachineKey> {
            Err(LaunchError::RegistryUnavailable)
        }
    }

    impl RegistryKey for MachineKey {
        fn path(&self) -> &str {
            match *self {}
        }

        fn open_subkey(&self, _name: &str) -> Result<Self> {
            match *self {}
        }

        fn string_value(&self, _name: &str) -> Result<String> {
            match *self {}
        }
    }
}

#[test]
fn test_join_path() {
    assert_eq!(join_path("", "SOFTWARE"), "SOFTWARE");
    assert_eq!(join_path("SOFTWARE", "JavaSoft"), "SOFTWARE\\JavaSoft");
}

#[cfg(not(windows))]
#[test]
fn test_local_machine_unavailable() {
    let err = LocalMachine.open("SOFTWARE").err().unwrap();
    assert!(matches!(err, crate::error::LaunchError::RegistryUnavailable));
}
