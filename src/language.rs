//! Canonical language identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;
use crate::registry::registry;
use crate::runtime::WorkerRuntime;

/// The single normalized identifier for a project's source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    CSharp,
    CSharpIsolated,
    FSharp,
    FSharpIsolated,
    JavaScript,
    TypeScript,
    Python,
    Powershell,
    Java,
    Custom,
}

impl Language {
    /// Every canonical language.
    pub const ALL: [Language; 10] = [
        Language::CSharp,
        Language::CSharpIsolated,
        Language::FSharp,
        Language::FSharpIsolated,
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Powershell,
        Language::Java,
        Language::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::CSharpIsolated => "csharp-isolated",
            Language::FSharp => "fsharp",
            Language::FSharpIsolated => "fsharp-isolated",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Powershell => "powershell",
            Language::Java => "java",
            Language::Custom => "custom",
        }
    }

    /// The runtime that owns this language.
    pub fn runtime(self) -> WorkerRuntime {
        match self {
            Language::CSharp | Language::FSharp => WorkerRuntime::Dotnet,
            Language::CSharpIsolated | Language::FSharpIsolated => WorkerRuntime::DotnetIsolated,
            Language::JavaScript | Language::TypeScript => WorkerRuntime::Node,
            Language::Python => WorkerRuntime::Python,
            Language::Powershell => WorkerRuntime::Powershell,
            Language::Java => WorkerRuntime::Java,
            Language::Custom => WorkerRuntime::Custom,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry().normalize_language(s)
    }
}
