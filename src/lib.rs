pub mod error;
pub mod language;
pub mod output;
pub mod registry;
pub mod runtime;
pub mod settings;
pub mod tables;

pub use error::{AliasKind, RegistryError, RegistryResult, SettingsError};
pub use language::Language;
pub use output::{Output, StderrOutput};
pub use registry::{Canonical, Registry, RegistryTables, registry};
pub use runtime::WorkerRuntime;
pub use settings::{
    FUNCTIONS_WORKER_RUNTIME, LOCAL_SETTINGS_FILE, LocalSettingsFile, MemorySettings,
    SettingsStore,
};
