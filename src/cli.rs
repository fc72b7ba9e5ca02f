use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Extract endpoints from a website", long_about = None)]
pub struct Cli {
    /// Target website URL
    pub url: String,

    /// Output file name
    #[arg(short = 'o', long, default_value = "endpoints.txt")]
    pub output: String,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
