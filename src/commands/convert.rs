use super::Host;
use crate::Result;
use crate::rules::hexa::parse_rule_document;
use crate::rules::stanzas_to_json;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Rule document to convert
    #[arg(value_name = "INPUT")]
    pub input: Utf8PathBuf,

    /// Where to write the JSON stanza list (default is standard output)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<Utf8PathBuf>,
}

/// Convert a hand-written rule document into the equivalent JSON stanza list
pub fn convert_rules<H: Host>(host: &mut H, args: &ConvertArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input).into_app_err_with(|| format!("reading rule document '{}'", args.input))?;
    let stanzas = parse_rule_document(&text).into_app_err_with(|| format!("parsing rule document '{}'", args.input))?;
    let json = stanzas_to_json(&stanzas)?;

    if let Some(output) = &args.output {
        fs::write(output, format!("{json}\n")).into_app_err_with(|| format!("writing rule definitions to '{output}'"))?;
        let _ = writeln!(host.output(), "Converted {} stanzas to {output}", stanzas.len());
    } else {
        let _ = writeln!(host.output(), "{json}");
    }

    Ok(())
}
