use clap::{Parser, Subcommand};
use std::path::PathBuf;
use worker_runtime::{
    AliasKind, Canonical, LOCAL_SETTINGS_FILE, LocalSettingsFile, RegistryResult, StderrOutput,
    WorkerRuntime, registry,
};

/// Resolve and persist the worker runtime of a function app project
#[derive(Parser)]
#[command(name = "worker-runtime")]
#[command(version)]
#[command(about = "Resolve and persist the worker runtime of a function app project")]
struct Cli {
    /// Settings file the runtime is read from and written to
    #[arg(
        long,
        global = true,
        env = "WORKER_RUNTIME_SETTINGS",
        default_value = LOCAL_SETTINGS_FILE
    )]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the runtime detected from the environment or the settings file
    Current,
    /// Persist a runtime (any alias, e.g. py, c#-isolated) to the settings file
    Set {
        value: String,
    },
    /// Print the canonical form of a runtime or language alias
    Normalize {
        value: String,

        /// Resolve against the language table instead of the runtime table
        #[arg(long)]
        language: bool,
    },
    /// Print every alias of a runtime
    Aliases {
        runtime: String,
    },
    /// Print the languages a runtime supports
    Languages {
        runtime: String,
    },
    /// Print the default template language of a runtime
    DefaultLanguage {
        runtime: String,
    },
    /// List the runtimes offered for new projects
    List,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> RegistryResult<()> {
    let registry = registry();
    let mut store = LocalSettingsFile::new(cli.settings);

    match cli.command {
        Commands::Current => {
            println!("{}", registry.current_runtime(&store).moniker());
        }
        Commands::Set { value } => {
            let runtime = registry.set_runtime(&mut store, &mut StderrOutput, &value)?;
            println!("{}", runtime.moniker());
        }
        Commands::Normalize { value, language } => {
            let kind = if language {
                AliasKind::Language
            } else {
                AliasKind::Runtime
            };
            match registry.normalize(value.as_str(), kind)? {
                Canonical::Runtime(runtime) => println!("{}", runtime.moniker()),
                Canonical::Language(language) => println!("{}", language),
            }
        }
        Commands::Aliases { runtime } => {
            let runtime: WorkerRuntime = runtime.parse()?;
            let mut aliases: Vec<_> = registry.aliases_of(runtime).collect();
            aliases.sort_unstable();
            for alias in aliases {
                println!("{}", alias);
            }
        }
        Commands::Languages { runtime } => {
            let runtime: WorkerRuntime = runtime.parse()?;
            for language in registry.supported_languages(runtime) {
                println!("{}", language);
            }
        }
        Commands::DefaultLanguage { runtime } => {
            let runtime: WorkerRuntime = runtime.parse()?;
            println!("{}", registry.default_language(runtime)?);
        }
        Commands::List => {
            for (runtime, display) in registry.display_strings() {
                println!("{:<16} {}", runtime.moniker(), display);
            }
        }
    }
    Ok(())
}
