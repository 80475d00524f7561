use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "icon-gallery",
    about = "Preview the SVG icon components of a Vue project in the browser",
    long_about = None,
    version,
)]
pub struct Args {
    /// Directories containing icon components [default: src/components/app-svg]
    pub paths: Vec<PathBuf>,

    /// Preferred HTTP port; the next free port is used if it is taken [default: 3002]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Do not open the gallery in a browser after startup
    #[arg(long)]
    pub no_open: bool,

    /// Address to listen on [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Directory with the built gallery UI [default: dist/gallery]
    #[arg(long, value_name = "DIR")]
    pub gallery_dir: Option<PathBuf>,

    /// Path to TOML config file (overrides default search: ./icon-gallery.toml, ~/.config/icon-gallery/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
