use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vidgate")]
#[command(author, version, about = "Resolve video URLs to their best progressive file and proxy the download", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    Run {
        /// Port to listen on (overrides the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a cookies file for restricted content
        #[arg(short, long)]
        cookies: Option<String>,
    },

    /// Print the installed yt-dlp version and exit
    CheckYtdlp,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
