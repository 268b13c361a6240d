use super::Host;
use super::common::{CommonArgs, init_logging};
use super::config::Config;
use crate::Result;
use crate::categories::Categorizer;
use crate::rules::load_rule_stanzas;
use crate::tagging::Tagger;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Tag rule definitions (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    pub tag_rules: Option<Utf8PathBuf>,

    /// Category rule definitions (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    pub category_rules: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

struct RuleSummary {
    tag_rules: usize,
    tags: usize,
    category_rules: usize,
    categories: usize,
}

fn validate_rules_inner(args: &ValidateArgs) -> Result<RuleSummary> {
    let config = Config::load(Utf8Path::new("."), args.common.config.as_ref())?;
    let tag_rules = args.tag_rules.as_ref().unwrap_or(&config.tag_rules);
    let category_rules = args.category_rules.as_ref().unwrap_or(&config.category_rules);

    let tagger = Tagger::new(&load_rule_stanzas(tag_rules)?).into_app_err_with(|| format!("validating tag rules in '{tag_rules}'"))?;
    let categorizer = Categorizer::new(&load_rule_stanzas(category_rules)?)
        .into_app_err_with(|| format!("validating category rules in '{category_rules}'"))?;

    Ok(RuleSummary {
        tag_rules: tagger.rules().len(),
        tags: tagger.tag_list().len(),
        category_rules: categorizer.rules().len(),
        categories: categorizer.category_names().len(),
    })
}

/// Check that both rule files load and are structurally valid
pub fn validate_rules<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    init_logging(args.common.log_level, args.common.log_file.as_deref())?;

    match validate_rules_inner(args) {
        Ok(summary) => {
            let _ = writeln!(host.output(), "Rule definitions are valid");
            let _ = writeln!(host.output(), "Tag rules: {} ({} distinct tags)", summary.tag_rules, summary.tags);
            let _ = writeln!(
                host.output(),
                "Category rules: {} ({} category names)",
                summary.category_rules,
                summary.categories
            );
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Rule validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
