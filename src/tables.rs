//! Built-in association lists the registry is loaded from.
//!
//! Each runtime (except `None`) and each language is also reachable by its own
//! name; those self-aliases are added by the registry and are not listed here.

use crate::language::Language;
use crate::runtime::WorkerRuntime;

/// Runtimes in the order they are offered to users, with their extra aliases.
pub const RUNTIME_ALIASES: &[(WorkerRuntime, &[&str])] = &[
    (
        WorkerRuntime::DotnetIsolated,
        &[
            "dotnet-isolated",
            "c#-isolated",
            "csharp-isolated",
            "f#-isolated",
            "fsharp-isolated",
        ],
    ),
    (WorkerRuntime::Dotnet, &["c#", "csharp", "f#", "fsharp"]),
    (
        WorkerRuntime::Node,
        &["js", "javascript", "typescript", "ts"],
    ),
    (WorkerRuntime::Python, &["py"]),
    (WorkerRuntime::Java, &[]),
    (WorkerRuntime::Powershell, &["pwsh"]),
    (WorkerRuntime::Custom, &[]),
];

// `node` resolves to javascript rather than typescript.
pub const LANGUAGE_ALIASES: &[(Language, &[&str])] = &[
    (Language::JavaScript, &["js", "node"]),
    (Language::TypeScript, &["ts"]),
    (Language::Python, &["py"]),
    (Language::Powershell, &["pwsh"]),
    (Language::CSharp, &["dotnet"]),
    (
        Language::CSharpIsolated,
        &["dotnet-isolated", "dotnetIsolated"],
    ),
    (Language::FSharp, &[]),
    (Language::FSharpIsolated, &[]),
    (Language::Java, &[]),
    (Language::Custom, &[]),
];

/// Runtimes hidden from the advertised option list.
pub const HIDDEN_RUNTIMES: &[WorkerRuntime] = &[WorkerRuntime::Java];

pub const DEFAULT_LANGUAGES: &[(WorkerRuntime, Language)] = &[
    (WorkerRuntime::Dotnet, Language::CSharp),
    (WorkerRuntime::DotnetIsolated, Language::CSharpIsolated),
    (WorkerRuntime::Node, Language::JavaScript),
    (WorkerRuntime::Python, Language::Python),
    (WorkerRuntime::Powershell, Language::Powershell),
    (WorkerRuntime::Custom, Language::Custom),
];

pub const SUPPORTED_LANGUAGES: &[(WorkerRuntime, &[Language])] = &[
    (
        WorkerRuntime::Node,
        &[Language::JavaScript, Language::TypeScript],
    ),
    (WorkerRuntime::Dotnet, &[Language::CSharp, Language::FSharp]),
    (
        WorkerRuntime::DotnetIsolated,
        &[Language::CSharpIsolated, Language::FSharpIsolated],
    ),
];
