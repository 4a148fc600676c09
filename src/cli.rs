use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_OUTPUT: &str = "WebDefines.h";
pub const DEFAULT_MARKER: &str = "FEBio User Manual";
pub const DEFAULT_SUFFIX: &str = "_HTML";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "webdefines",
    version,
    about = "Generate help-URL #defines from the FEBio User Manual table of contents"
)]
pub struct Cli {
    /// HTML table-of-contents page.
    pub input: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Text that marks the start of the manual TOC.
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Write names as resolved, without upper-casing or suffix.
    #[arg(long, default_value_t = false)]
    pub raw_names: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
