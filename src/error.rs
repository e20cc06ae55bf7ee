use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Unable to open registry key {path}")]
    KeyNotFound { path: String },

    #[error("Unable to read registry value {name} from {path}")]
    ValueNotFound { path: String, name: String },

    #[error("Registry value {name} in {path} is not a string")]
    ValueNotString { path: String, name: String },

    #[error("Registry value {name} in {path} is {len} characters long, limit is {max}")]
    ValueTooLong {
        path: String,
        name: String,
        len: usize,
        max: usize,
    },

    #[error("Windows registry is not available on this system")]
    RegistryUnavailable,

    #[error("Unable to start command interpreter {interpreter}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Every failure of this program terminates with the same status.
    pub const EXIT_CODE: i32 = 1;
}

pub type Result<T> = std::result::Result<T, LaunchError>;
