//! Runtime and language canonicalization.
//!
//! The registry owns two case-insensitive alias tables (runtime, language),
//! the default-language map and the supported-language map. All of them are
//! built once from the association lists in [`crate::tables`] and never
//! mutated afterwards, so a single [`Registry`] is shared process-wide via
//! [`registry()`].
//!
//! Two failure policies live side by side here:
//! - strict: [`Registry::normalize`], [`Registry::default_language`] and
//!   [`Registry::set_runtime`] return errors to the caller;
//! - best-effort: [`Registry::current_runtime`] degrades to
//!   [`WorkerRuntime::None`] through [`Registry::try_normalize_runtime`].

use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{AliasKind, RegistryError, RegistryResult};
use crate::language::Language;
use crate::output::Output;
use crate::runtime::WorkerRuntime;
use crate::settings::{FUNCTIONS_WORKER_RUNTIME, SettingsStore};
use crate::tables;

/// Static source tables a [`Registry`] is built from.
#[derive(Debug, Clone, Copy)]
pub struct RegistryTables {
    pub runtime_aliases: &'static [(WorkerRuntime, &'static [&'static str])],
    pub language_aliases: &'static [(Language, &'static [&'static str])],
    pub hidden_runtimes: &'static [WorkerRuntime],
    pub default_languages: &'static [(WorkerRuntime, Language)],
    pub supported_languages: &'static [(WorkerRuntime, &'static [Language])],
}

impl RegistryTables {
    pub const BUILTIN: RegistryTables = RegistryTables {
        runtime_aliases: tables::RUNTIME_ALIASES,
        language_aliases: tables::LANGUAGE_ALIASES,
        hidden_runtimes: tables::HIDDEN_RUNTIMES,
        default_languages: tables::DEFAULT_LANGUAGES,
        supported_languages: tables::SUPPORTED_LANGUAGES,
    };
}

/// Result of [`Registry::normalize`], tagged by the table consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonical {
    Runtime(WorkerRuntime),
    Language(Language),
}

/// Case-insensitive alias table.
#[derive(Debug)]
struct AliasTable<V> {
    kind: AliasKind,
    /// Aliases as written, in table order.
    entries: Vec<(&'static str, V)>,
    /// Lowercased alias -> value
    index: HashMap<String, V>,
}

impl<V: Copy + PartialEq> AliasTable<V> {
    fn build(
        kind: AliasKind,
        groups: impl IntoIterator<Item = (V, &'static str, &'static [&'static str])>,
    ) -> RegistryResult<Self> {
        let mut table = Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for (value, own_name, aliases) in groups {
            table.insert(own_name, value)?;
            for alias in aliases {
                table.insert(*alias, value)?;
            }
        }
        Ok(table)
    }

    fn insert(&mut self, alias: &'static str, value: V) -> RegistryResult<()> {
        let key = alias.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(RegistryError::duplicate_alias(self.kind, alias));
        }
        self.index.insert(key, value);
        self.entries.push((alias, value));
        Ok(())
    }

    fn lookup(&self, alias: &str) -> Option<V> {
        self.index.get(&alias.to_lowercase()).copied()
    }

    fn aliases_of(&self, value: V) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, v)| *v == value)
            .map(|(alias, _)| *alias)
    }

    /// Shared blank-input and no-match handling for both tables.
    fn resolve(
        &self,
        alias: Option<&str>,
        options: impl FnOnce() -> String,
    ) -> RegistryResult<V> {
        let alias = match alias {
            Some(a) if !a.trim().is_empty() => a,
            _ => return Err(RegistryError::empty_input(self.kind)),
        };
        self.lookup(alias)
            .ok_or_else(|| RegistryError::unrecognized(self.kind, alias, options()))
    }
}

/// Process-wide runtime/language registry.
#[derive(Debug)]
pub struct Registry {
    runtimes: AliasTable<WorkerRuntime>,
    languages: AliasTable<Language>,
    /// Runtimes offered to users, in table order.
    available: Vec<WorkerRuntime>,
    default_languages: HashMap<WorkerRuntime, Language>,
    supported_languages: HashMap<WorkerRuntime, &'static [Language]>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::from_tables(&RegistryTables::BUILTIN)
        .unwrap_or_else(|err| panic!("built-in registry tables are inconsistent: {err}"))
});

/// The registry built from the built-in tables.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    /// Load the registry from association lists.
    ///
    /// Fails with [`RegistryError::DuplicateAlias`] if any alias (compared
    /// case-insensitively, self-names included) appears twice within a table.
    pub fn from_tables(tables: &RegistryTables) -> RegistryResult<Self> {
        let runtimes = AliasTable::build(
            AliasKind::Runtime,
            tables
                .runtime_aliases
                .iter()
                .map(|(runtime, aliases)| (*runtime, runtime.name(), *aliases)),
        )?;
        let languages = AliasTable::build(
            AliasKind::Language,
            tables
                .language_aliases
                .iter()
                .map(|(language, aliases)| (*language, language.as_str(), *aliases)),
        )?;

        let available = tables
            .runtime_aliases
            .iter()
            .map(|(runtime, _)| *runtime)
            .filter(|runtime| !tables.hidden_runtimes.contains(runtime))
            .collect();

        Ok(Self {
            runtimes,
            languages,
            available,
            default_languages: tables.default_languages.iter().copied().collect(),
            supported_languages: tables.supported_languages.iter().copied().collect(),
        })
    }

    /// Resolve a free-form string against the table selected by `kind`.
    ///
    /// Matching is case-insensitive and exact; nothing is trimmed. A missing
    /// or whitespace-only input is [`RegistryError::EmptyInput`].
    pub fn normalize<'a>(
        &self,
        alias: impl Into<Option<&'a str>>,
        kind: AliasKind,
    ) -> RegistryResult<Canonical> {
        let alias = alias.into();
        match kind {
            AliasKind::Runtime => self
                .runtimes
                .resolve(alias, || self.available_runtimes_string())
                .map(Canonical::Runtime),
            AliasKind::Language => self
                .languages
                .resolve(alias, || self.language_options_string())
                .map(Canonical::Language),
        }
    }

    pub fn normalize_runtime(&self, alias: &str) -> RegistryResult<WorkerRuntime> {
        let runtime = self
            .runtimes
            .resolve(Some(alias), || self.available_runtimes_string())?;
        debug!(target: "worker_runtime::registry", "Normalized '{}' to runtime {}", alias, runtime);
        Ok(runtime)
    }

    pub fn normalize_language(&self, alias: &str) -> RegistryResult<Language> {
        let language = self
            .languages
            .resolve(Some(alias), || self.language_options_string())?;
        debug!(target: "worker_runtime::registry", "Normalized '{}' to language {}", alias, language);
        Ok(language)
    }

    /// Best-effort variant of [`Self::normalize_runtime`]: `None` instead of an error.
    pub fn try_normalize_runtime(&self, alias: Option<&str>) -> Option<WorkerRuntime> {
        match self.runtimes.resolve(alias, || self.available_runtimes_string()) {
            Ok(runtime) => Some(runtime),
            Err(RegistryError::EmptyInput { .. }) => None,
            Err(err) => {
                warn!(target: "worker_runtime::registry", "Ignoring worker runtime setting: {}", err);
                None
            }
        }
    }

    /// Default template language for `runtime`.
    pub fn default_language(&self, runtime: WorkerRuntime) -> RegistryResult<Language> {
        self.default_languages
            .get(&runtime)
            .copied()
            .ok_or_else(|| RegistryError::unsupported_for_templates(runtime))
    }

    /// Languages `runtime` accepts. Empty when the runtime has no entry.
    pub fn supported_languages(&self, runtime: WorkerRuntime) -> &[Language] {
        self.supported_languages
            .get(&runtime)
            .copied()
            .unwrap_or_default()
    }

    /// Every runtime alias resolving to `runtime`. Order is unspecified.
    pub fn aliases_of(&self, runtime: WorkerRuntime) -> impl Iterator<Item = &'static str> + '_ {
        self.runtimes.aliases_of(runtime)
    }

    pub fn available_runtimes(&self) -> &[WorkerRuntime] {
        &self.available
    }

    /// Comma-separated monikers of the available runtimes.
    pub fn available_runtimes_string(&self) -> String {
        self.available
            .iter()
            .map(|runtime| runtime.moniker())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `(runtime, display text)` for every available runtime.
    pub fn display_strings(&self) -> Vec<(WorkerRuntime, &'static str)> {
        self.available
            .iter()
            .map(|runtime| (*runtime, runtime.display_string()))
            .collect()
    }

    fn language_options_string(&self) -> String {
        let mut aliases: Vec<_> = self.languages.entries.iter().map(|(a, _)| *a).collect();
        aliases.sort_unstable();
        aliases.join(", ")
    }

    /// Detect the project's runtime from the process environment, then `store`.
    ///
    /// Never fails: a missing or unrecognized value yields [`WorkerRuntime::None`].
    ///
    /// A variable that is set always wins over the store, even when it is empty
    /// or not valid UTF-8; such values simply fail to normalize.
    pub fn current_runtime<S: SettingsStore + ?Sized>(&self, store: &S) -> WorkerRuntime {
        let env_value = std::env::var_os(FUNCTIONS_WORKER_RUNTIME)
            .map(|value| value.to_string_lossy().into_owned());
        self.detect_runtime(env_value, store)
    }

    /// [`Self::current_runtime`] with the environment value supplied by the caller.
    pub fn detect_runtime<S: SettingsStore + ?Sized>(
        &self,
        env_value: Option<String>,
        store: &S,
    ) -> WorkerRuntime {
        let setting = match env_value {
            Some(value) => {
                debug!(target: "worker_runtime::registry", "Worker runtime taken from environment");
                Some(value)
            }
            None => {
                debug!(
                    target: "worker_runtime::registry",
                    "Worker runtime taken from settings at {}",
                    store.location()
                );
                store.get_value(FUNCTIONS_WORKER_RUNTIME)
            }
        };
        self.try_normalize_runtime(setting.as_deref())
            .unwrap_or(WorkerRuntime::None)
    }

    /// Persist the runtime named by `value` and tell the user.
    ///
    /// Strict: normalization and store failures propagate and nothing is printed.
    pub fn set_runtime<S, O>(
        &self,
        store: &mut S,
        output: &mut O,
        value: &str,
    ) -> RegistryResult<WorkerRuntime>
    where
        S: SettingsStore + ?Sized,
        O: Output + ?Sized,
    {
        let runtime = self.normalize_runtime(value)?;
        let moniker = runtime.moniker();
        store.set_value(FUNCTIONS_WORKER_RUNTIME, moniker)?;
        info!(
            target: "worker_runtime::registry",
            "Persisted worker runtime '{}' to {}",
            moniker,
            store.location()
        );

        output.warning("A worker runtime is required for your project and is kept in its settings.");
        output.warning(&format!(
            "Worker runtime '{}' has been set in '{}'.",
            moniker,
            store.location()
        ));
        Ok(runtime)
    }
}
