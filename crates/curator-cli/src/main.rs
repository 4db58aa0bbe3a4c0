mod settings;
mod telemetry;

use std::path::PathBuf;

use anyhow::{Context, bail};
use curator_core::impls::{LocalPushChannel, store};
use curator_core::reconcile::{dedup_values, partition};
use curator_core::{AlivenessMap, CatalogRefresher, RefreshOutcome};
use tracing::info;

use crate::settings::Settings;

const USAGE: &str = "usage: curator-cli [refresh | dedup <tasks.json> | split <proxies.json>]";

/// Subcommands. No argument parser: `refresh` is the default.
enum Command {
    Refresh,
    Dedup(PathBuf),
    Split(PathBuf),
}

impl Command {
    fn from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let command = match args.next().as_deref() {
            None | Some("refresh") => Command::Refresh,
            Some("dedup") => Command::Dedup(args.next().context(USAGE)?.into()),
            Some("split") => Command::Split(args.next().context(USAGE)?.into()),
            Some(other) => bail!("unknown command '{other}'\n{USAGE}"),
        };
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{extra}'\n{USAGE}");
        }
        Ok(command)
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("failed to load settings")?;
    telemetry::init_telemetry(&settings.log.filter);

    match Command::from_args(std::env::args().skip(1))? {
        Command::Refresh => refresh(&settings),
        Command::Dedup(path) => {
            let raw = store::load_list(&path)?;
            let tasks = dedup_values(raw);
            info!(count = tasks.len(), "deduplicated tasks");
            println!("{}", serde_json::to_string_pretty(&tasks)?);
            Ok(())
        }
        Command::Split(path) => {
            let (checked, skipped) = partition(store::load_list(&path)?);
            info!(checked = checked.len(), skipped = skipped.len(), "partitioned proxies");
            let out = serde_json::json!({ "checked": checked, "skipped": skipped });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
    }
}

fn refresh(settings: &Settings) -> anyhow::Result<()> {
    let catalog_path = &settings.catalog.path;
    let mut catalog = store::load_catalog(catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;
    info!(path = %catalog_path.display(), domains = catalog.domains.len(), "catalog loaded");

    let alive: Option<AlivenessMap> = settings
        .aliveness
        .path
        .as_ref()
        .map(|path| {
            store::load_aliveness(path)
                .with_context(|| format!("failed to load aliveness {}", path.display()))
        })
        .transpose()?;

    let push = LocalPushChannel::new(&settings.push.root);
    let mut refresher = CatalogRefresher::new().with_push(&push);
    if settings.catalog.persist {
        refresher = refresher.persist_to(catalog_path);
    }

    match refresher.refresh(Some(&mut catalog), alive.as_ref())? {
        RefreshOutcome::Skipped(reason) => println!("skipped: {reason}"),
        RefreshOutcome::Delivered {
            domains,
            persisted,
            delivered,
        } => println!("refreshed: domains={domains} persisted={persisted} delivered={delivered}"),
    }
    Ok(())
}
