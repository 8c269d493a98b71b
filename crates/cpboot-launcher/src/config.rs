//! Command line and environment configuration.

use std::path::PathBuf;

use clap::Parser;
use cpboot_module::{ConflictPolicy, IgnoreRules, MergeSpec, ModulePlanner};

use crate::classpath::load_legacy_classpath;
use crate::context::DEFAULT_CONTEXT_NAME;
use crate::error::LaunchResult;

/// Entries dropped unless overridden.
pub const DEFAULT_IGNORE_LIST: &str = "asm,securejarhandler";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cpboot")]
#[command(about = "Turn a legacy classpath into modules and launch the registered entry point")]
#[command(version)]
pub struct BootstrapArgs {
    /// Classpath to use instead of any other source
    #[arg(long, env = "CPBOOT_CLASSPATH")]
    pub classpath: Option<String>,

    /// File listing one classpath entry per line
    #[arg(long, env = "CPBOOT_CLASSPATH_FILE")]
    pub classpath_file: Option<PathBuf>,

    #[arg(long = "ambient-classpath", env = "CLASSPATH", hide = true)]
    pub ambient_classpath: Option<String>,

    /// Comma-separated substrings; matching entries are skipped
    #[arg(long, env = "CPBOOT_IGNORE_LIST", default_value = DEFAULT_IGNORE_LIST)]
    pub ignore_list: String,

    /// Merge groups, e.g. "name=a.jar,b.jar;c.jar,d.jar"
    #[arg(long, env = "CPBOOT_MERGE_MODULES")]
    pub merge_modules: Option<String>,

    /// first-claim-wins or reject
    #[arg(long, env = "CPBOOT_CONFLICT_POLICY", default_value_t = ConflictPolicy::FirstClaimWins)]
    pub conflict_policy: ConflictPolicy,

    /// Name of the loading context
    #[arg(long, default_value = DEFAULT_CONTEXT_NAME)]
    pub context_name: String,

    /// Verbose diagnostics on stderr
    #[arg(long, env = "CPBOOT_DEBUG")]
    pub debug: bool,

    /// Arguments handed to the entry point unchanged. Only arguments after
    /// `--` are forwarded; unknown flags before it are rejected
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Fully resolved bootstrap settings.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub classpath: Vec<PathBuf>,
    pub planner: ModulePlanner,
    pub context_name: String,
    pub args: Vec<String>,
}

impl BootstrapConfig {
    pub fn from_args(args: BootstrapArgs) -> LaunchResult<Self> {
        let classpath = load_legacy_classpath(
            args.classpath.as_deref(),
            args.classpath_file.as_deref(),
            args.ambient_classpath.as_deref(),
        )?;

        let planner = ModulePlanner::new(
            IgnoreRules::parse(&args.ignore_list),
            args.merge_modules
                .as_deref()
                .map(MergeSpec::parse)
                .unwrap_or_default(),
            args.conflict_policy,
        );

        Ok(Self {
            classpath,
            planner,
            context_name: args.context_name,
            args: args.args,
        })
    }

    /// Settings for an already known classpath, with default rules.
    pub fn new(classpath: Vec<PathBuf>) -> Self {
        Self {
            classpath,
            planner: ModulePlanner::new(
                IgnoreRules::parse(DEFAULT_IGNORE_LIST),
                MergeSpec::default(),
                ConflictPolicy::default(),
            ),
            context_name: DEFAULT_CONTEXT_NAME.to_string(),
            args: Vec::new(),
        }
    }

    pub fn with_planner(mut self, planner: ModulePlanner) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}
