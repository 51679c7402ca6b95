use anyhow::{Context, bail};
use clap::ArgMatches;
use sigbrowse_core::dispatch::DEFAULT_WORKERS;
use sigbrowse_core::signature::find_sig_files;
use sigbrowse_core::{
    CheckExecutor, DispatchSummary, Dispatcher, DryRunOpener, Opener, ReconError,
    SignatureTable, SystemOpener, TargetIdentity, expand_paths,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub specifiers: Vec<String>,
    pub target: TargetIdentity,
    pub workers: usize,
    pub dry_run: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            specifiers: Vec::new(),
            target: TargetIdentity::default(),
            workers: DEFAULT_WORKERS,
            dry_run: false,
            verbose: false,
        }
    }
}

impl RunConfig {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let sigs = matches.get_one::<String>("sigs").map(String::as_str).unwrap_or("");
        let domain = matches.get_one::<String>("domain").cloned().unwrap_or_default();
        let company = matches.get_one::<String>("company").cloned().unwrap_or_default();
        let workers = matches
            .get_one::<usize>("max-threads")
            .copied()
            .unwrap_or(DEFAULT_WORKERS);

        let mut target = TargetIdentity::new(domain, company);
        if let Some(asset) = matches.get_one::<String>("asset") {
            target = target.with_asset(asset);
        }

        let config = Self {
            specifiers: split_specifiers(sigs),
            target,
            workers,
            dry_run: matches.get_flag("dry-run"),
            verbose: matches.get_flag("verbose"),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.specifiers.is_empty() {
            bail!(ReconError::Config(
                "Signature files must be provided.".to_string()
            ));
        }
        if self.workers == 0 {
            bail!(ReconError::Config(
                "Max threads must be at least 1.".to_string()
            ));
        }
        Ok(())
    }
}

/// Rewrite the single-dash `-mt` spelling to `--mt` so clap accepts it.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.strip_prefix("-mt") {
            Some("") => "--mt".to_string(),
            Some(rest) if rest.starts_with('=') => format!("--mt{}", rest),
            _ => arg,
        })
        .collect()
}

/// Split the `-s` value on commas, dropping blank entries and expanding `~`.
pub fn split_specifiers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|specifier| {
            if specifier.is_empty() {
                debug!("Ignoring empty path specifier");
                false
            } else {
                true
            }
        })
        .map(|specifier| shellexpand::tilde(specifier).into_owned())
        .collect()
}

/// Install a stderr subscriber when verbose; otherwise diagnostics go nowhere.
pub fn init_logging(verbose: bool) {
    if !verbose {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Discover, load and dispatch every signature for `config`.
pub async fn run(config: &RunConfig, opener: Arc<dyn Opener>) -> anyhow::Result<DispatchSummary> {
    config.validate()?;

    debug!("Loop through each path to discover all files");
    let files = expand_paths(&config.specifiers)?;

    let sig_files = find_sig_files(&files);
    info!("Number of signature files found: {}", sig_files.len());

    let table = SignatureTable::load(&sig_files)?;

    let executor = CheckExecutor::new(opener, config.target.clone());
    let dispatcher = Dispatcher::new(executor)
        .with_workers(config.workers)
        .with_progress_callback(Arc::new(|worker_id: usize, id: &str| {
            debug!("Worker {} running signature {}", worker_id, id);
        }));

    let summary = dispatcher
        .run(Arc::new(table))
        .await
        .context("signature dispatch failed")?;
    Ok(summary)
}

pub async fn handle_run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = RunConfig::from_matches(matches)?;
    init_logging(config.verbose);

    if config.target.domain.is_empty() {
        warn!("[!] Note: Domain not provided");
    }
    if config.target.company.is_empty() {
        warn!("[!] Note: Company not provided");
    }

    let opener: Arc<dyn Opener> = if config.dry_run {
        Arc::new(DryRunOpener)
    } else {
        Arc::new(SystemOpener)
    };

    let summary = run(&config, opener).await?;
    info!(
        "Ran {} checks from {} signatures, opened {} URLs",
        summary.checks, summary.signatures, summary.opened
    );
    Ok(())
}
