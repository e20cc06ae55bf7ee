use super::{join_path, Registry, RegistryKey};
use crate::error::{LaunchError, Result};
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    rc::Rc,
};

#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    Dword(u32),
}

/// In-memory hive. Keys are stored by full path; every open and every
/// release is recorded so tests can check handle lifetimes.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    keys: HashSet<String>,
    values: HashMap<(String, String), Value>,
    live: Rc<Cell<usize>>,
    opened: Rc<RefCell<Vec<String>>>,
}

impl MemoryRegistry {
    /// add `path` and all of its parents
    #[must_use]
    pub fn key(mut self, path: &str) -> Self {
        let mut current = String::new();
        for part in path.split('\\') {
            current = join_path(&current, part);
            self.keys.insert(current.clone());
        }
        self
    }

    #[must_use]
    pub fn string(self, path: &str, name: &str, value: &str) -> Self {
        self.value(path, name, Value::Str(value.into()))
    }

    #[must_use]
    pub fn value(mut self, path: &str, name: &str, value: Value) -> Self {
        self = self.key(path);
        self.values.insert((path.into(), name.into()), value);
        self
    }

    /// A complete installer chain for `product` resolving to `home`.
    #[must_use]
    pub fn java(self, product: &str, version: &str, home: &str) -> Self {
        let product_path = format!("SOFTWARE\\JavaSoft\\{product}");
        let version_path = format!("{product_path}\\{version}");
        self.string(&product_path, "CurrentVersion", version)
            .string(&version_path, "JavaHome", home)
    }

    /// handles currently open
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.live.get()
    }

    /// every path opened so far, in order
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    fn handle(&self, path: String) -> Result<MemoryKey<'_>> {
        if !self.keys.contains(&path) {
            return Err(LaunchError::KeyNotFound { path });
        }
        self.opened.borrow_mut().push(path.clone());
        self.live.set(self.live.get() + 1);
        Ok(MemoryKey {
            registry: self,
            path,
        })
    }
}

pub struct MemoryKey<'a> {
    registry: &'a MemoryRegistry,
    path: String,
}

impl Drop for MemoryKey<'_> {
    fn drop(&mut self) {
        self.registry.live.set(self.registry.live.get() - 1);
    }
}

impl<'a> Registry for &'a MemoryRegistry {
    type Key = MemoryKey<'a>;

    fn open(&self, path: &str) -> Result<MemoryKey<'a>> {
        (*self).handle(path.into())
    }
}

impl RegistryKey for MemoryKey<'_> {
    fn path(&self) -> &str {
        &self.path
    }

    fn open_subkey(&self, name: &str) -> Result<Self> {
        self.registry.handle(join_path(&self.path, name))
    }

    fn string_value(&self, name: &str) -> Result<String> {
        match self.registry.values.get(&(self.path.clone(), name.to_owned())) {
            Some(Value::Str(s)) => Ok(s.clone()),
            Some(Value::Dword(_)) => Err(LaunchError::ValueNotString {
                path: self.path.clone(),
                name: name.into(),
            }),
            None => Err(LaunchError::ValueNotFound {
                path: self.path.clone(),
                name: name.into(),
            }),
        }
    }
}

#[test]
fn test_memory_registry_tracks_handles() {
    let registry = MemoryRegistry::default().string("SOFTWARE\\JavaSoft", "Flag", "on");
    let hive = &registry;
    {
        let software = hive.open("SOFTWARE").unwrap();
        let vendor = software.open_subkey("JavaSoft").unwrap();
        assert_eq!(vendor.path(), "SOFTWARE\\JavaSoft");
        assert_eq!(vendor.string_value("Flag").unwrap(), "on");
        assert_eq!(registry.live_handles(), 2);
    }
    assert_eq!(registry.live_handles(), 0);
    assert_eq!(registry.opened(), vec!["SOFTWARE", "SOFTWARE\\JavaSoft"]);
}
