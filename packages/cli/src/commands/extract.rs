use anyhow::{Context, Result};
use clap::Args;
use copyedit_content::{extract as extract_text, ContentNode};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// JSON content tree file ("-" reads stdin)
    pub input: PathBuf,

    /// Print the text as a JSON string
    #[arg(long)]
    pub json: bool,
}

pub fn extract(args: ExtractArgs, _cwd: &str) -> Result<()> {
    let source = read_input(&args.input)?;
    let text = extract_source(&source)?;

    if args.json {
        println!("{}", serde_json::to_string(&text)?);
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }

    std::fs::read_to_string(input).with_context(|| format!("Cannot read {}", input.display()))
}

/// Decode a JSON content tree and flatten it
pub fn extract_source(source: &str) -> Result<String> {
    let node: ContentNode = serde_json::from_str(source).context("Content tree is not valid JSON")?;
    Ok(extract_text(&node))
}
