use super::Host;
use super::common::{CommonArgs, init_logging};
use super::config::Config;
use crate::Result;
use crate::keys::{FileKeySource, KeySource};
use crate::pipeline::{ClusterInfo, Pipeline};
use crate::rules::load_rule_stanzas;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

const LOG_TARGET: &str = "     build";

#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Saved statistics keys response from the cluster
    #[arg(long, value_name = "PATH")]
    pub keys: Utf8PathBuf,

    /// Tag rule definitions (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    pub tag_rules: Option<Utf8PathBuf>,

    /// Category rule definitions (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    pub category_rules: Option<Utf8PathBuf>,

    /// Where to write the dataset (overrides the configuration file)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Cluster release recorded in the dataset
    #[arg(long, value_name = "VERSION")]
    pub release: Option<String>,

    /// Cluster host recorded in the dataset
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Leave the cluster host out of the dataset
    #[arg(long)]
    pub anon_host: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Build the browser dataset from a key dump and the rule files
pub fn build_dataset_file<H: Host>(host: &mut H, args: &BuildArgs) -> Result<()> {
    init_logging(args.common.log_level, args.common.log_file.as_deref())?;

    let config = Config::load(Utf8Path::new("."), args.common.config.as_ref())?;
    let tag_rules = args.tag_rules.as_ref().unwrap_or(&config.tag_rules);
    let category_rules = args.category_rules.as_ref().unwrap_or(&config.category_rules);
    let output = args.output.as_ref().unwrap_or(&config.output);

    let tag_stanzas = load_rule_stanzas(tag_rules)?;
    let category_stanzas = load_rule_stanzas(category_rules)?;
    let pipeline = Pipeline::new(&tag_stanzas, &category_stanzas).into_app_err("validating rule definitions")?;

    let raw = FileKeySource::new(args.keys.clone()).fetch()?;

    let store_host = config.store_host && !args.anon_host;
    let cluster = ClusterInfo::new(args.release.as_deref(), args.host.as_deref().filter(|_| store_host));
    if args.host.is_some() && !store_host {
        log::debug!(target: LOG_TARGET, "Leaving cluster host out of the dataset");
    }

    let (dataset, unmapped) = pipeline.run_with_diagnostics(raw, cluster);
    for diagnostic in &unmapped {
        log::warn!(target: LOG_TARGET, "{diagnostic}");
    }

    dataset.write(output)?;

    let _ = writeln!(
        host.output(),
        "Wrote {} keys in {} top-level categories with {} tags to {output}",
        dataset.keys.len(),
        dataset.categories.len(),
        dataset.tags.len()
    );

    if !unmapped.is_empty() {
        let _ = writeln!(host.error(), "{} descriptions could not be generalized", unmapped.len());
    }

    Ok(())
}
