//! Execution backends a function app can target.

use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;
use crate::registry::registry;

/// Closed set of worker runtimes.
///
/// `None` is the unset sentinel. It is never a valid target for a template
/// or a deployment, and it has no entry in the runtime alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkerRuntime {
    #[default]
    None,
    Dotnet,
    DotnetIsolated,
    Node,
    Python,
    Java,
    Powershell,
    Custom,
}

impl WorkerRuntime {
    /// Every runtime, sentinel included.
    pub const ALL: [WorkerRuntime; 8] = [
        WorkerRuntime::None,
        WorkerRuntime::Dotnet,
        WorkerRuntime::DotnetIsolated,
        WorkerRuntime::Node,
        WorkerRuntime::Python,
        WorkerRuntime::Java,
        WorkerRuntime::Powershell,
        WorkerRuntime::Custom,
    ];

    /// Enumeration name. Each runtime except `None` is an implicit alias of itself.
    pub fn name(self) -> &'static str {
        match self {
            WorkerRuntime::None => "None",
            WorkerRuntime::Dotnet => "dotnet",
            WorkerRuntime::DotnetIsolated => "dotnetIsolated",
            WorkerRuntime::Node => "node",
            WorkerRuntime::Python => "python",
            WorkerRuntime::Java => "java",
            WorkerRuntime::Powershell => "powershell",
            WorkerRuntime::Custom => "custom",
        }
    }

    /// The exact string persisted to the settings store.
    ///
    /// Total: this never fails, so it is safe on display and logging paths.
    pub fn moniker(self) -> &'static str {
        match self {
            WorkerRuntime::DotnetIsolated => "dotnet-isolated",
            other => other.name(),
        }
    }

    /// Text shown when offering runtimes to a user.
    pub fn display_string(self) -> &'static str {
        match self {
            WorkerRuntime::Dotnet => "dotnet (in-process model)",
            WorkerRuntime::DotnetIsolated => "dotnet (isolated worker model)",
            other => other.name(),
        }
    }

    pub fn is_dotnet(self) -> bool {
        matches!(self, WorkerRuntime::Dotnet | WorkerRuntime::DotnetIsolated)
    }

    pub fn is_dotnet_isolated(self) -> bool {
        self == WorkerRuntime::DotnetIsolated
    }
}

impl fmt::Display for WorkerRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkerRuntime {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry().normalize_runtime(s)
    }
}
