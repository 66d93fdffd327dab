use clap::Parser;

/// Fetch a landscape photo from Unsplash and set it as the wallpaper
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show verbose debug information
    #[arg(short, long)]
    pub verbose: bool,

    /// Unsplash access key
    #[arg(short, long)]
    pub access_key: Option<String>,

    /// Tag to search for (repeat for several)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Minimum image width
    #[arg(short = 'x', long = "min-resolution-x", value_name = "PIXELS")]
    pub min_width: Option<u32>,

    /// Minimum image height
    #[arg(short = 'y', long = "min-resolution-y", value_name = "PIXELS")]
    pub min_height: Option<u32>,

    /// Maximum image width
    #[arg(short = 'X', long = "max-resolution-x", value_name = "PIXELS")]
    pub max_width: Option<u32>,

    /// Maximum image height
    #[arg(short = 'Y', long = "max-resolution-y", value_name = "PIXELS")]
    pub max_height: Option<u32>,

    /// Directory to save images to (defaults to a folder in the temp directory)
    #[arg(short = 'p', long, value_name = "DIR")]
    pub save_path: Option<String>,

    /// Command that sets the wallpaper (%s for relative path, %S for absolute path)
    #[arg(short = 's', long, value_name = "COMMAND")]
    pub set_command: Option<String>,

    /// Print one JSON object per event
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
