use clap::Parser;
use std::path::PathBuf;

use crate::settings::Overrides;

/// View a PDF page and pick pixel regions on it
#[derive(Debug, Parser)]
#[command(name = "snipview", version, about)]
pub struct Cli {
    /// PDF file to open on startup
    pub file: Option<PathBuf>,

    /// Page to show first (one-based)
    #[arg(short, long, value_name = "N")]
    pub page: Option<usize>,

    /// Pixels per PDF point when rendering
    #[arg(short, long)]
    pub scale: Option<f32>,

    /// off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Directory containing the PDFium shared library
    #[arg(long, value_name = "DIR")]
    pub pdfium_dir: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            render_scale: self.scale,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            pdfium_library_dir: self.pdfium_dir.clone(),
        }
    }
}
