use crate::clipboard::{CommandClipboard, Osc52Clipboard};
use crate::config::Config;
use crate::fixture::PageFixture;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use copyedit_editor::{
    Clipboard, CopyEditStore, EditableSpan, FallbackClipboard, MemoryClipboard, Notice,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page fixture (JSON) describing the mounted spans
    pub page: PathBuf,

    /// Edit a span before exporting (repeatable); "\n" in VALUE is a line break
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub edits: Vec<(String, String)>,

    /// Output format for stdout
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Copy the report to the clipboard instead of printing it
    #[arg(long)]
    pub copy: bool,

    /// Config file (defaults to copyedit.config.json in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `key=value`
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))?;

    if key.trim().is_empty() {
        return Err(format!("empty key in `{}`", raw));
    }

    Ok((key.trim().to_string(), value.replace("\\n", "\n")))
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd, args.config.as_deref())?;
    let fixture = PageFixture::load(&args.page)?;

    let clipboard: Box<dyn Clipboard> = if args.copy {
        Box::new(FallbackClipboard::new(
            Box::new(CommandClipboard::new(config.clipboard_command.clone())),
            Box::new(Osc52Clipboard::stderr()),
        ))
    } else {
        Box::new(MemoryClipboard::new())
    };

    let store = CopyEditStore::builder()
        .config(config.editor.clone())
        .page(fixture.page())
        .clipboard(clipboard)
        .notifier(Box::new(print_notice))
        .build();

    let mut spans = fixture.mount(&store)?;
    apply_edits(&store, &mut spans, &args.edits)?;

    if args.copy {
        store.export_content()?;
        return Ok(());
    }

    let report = store.build_report();
    match args.format {
        ReportFormat::Text => println!("{}", report),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Apply each edit through a real editing session, then leave edit mode
pub fn apply_edits(
    store: &CopyEditStore,
    spans: &mut [EditableSpan],
    edits: &[(String, String)],
) -> Result<()> {
    if edits.is_empty() {
        return Ok(());
    }

    store.set_edit_mode(true);

    for (key, value) in edits {
        let span = spans
            .iter_mut()
            .rev()
            .find(|s| s.key().as_str() == key)
            .ok_or_else(|| anyhow!("No span mounted for key: {}", key))?;

        span.activate();
        span.input(value.as_str());
        span.blur();
    }

    store.set_edit_mode(false);
    Ok(())
}

fn print_notice(notice: &Notice) {
    if notice.is_success() {
        eprintln!("{} {}", "✓".green(), notice.message());
    } else {
        eprintln!("{} {}", "✗".red(), notice.message());
    }
}
