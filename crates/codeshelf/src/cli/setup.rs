use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codeshelf", bin_name = "codeshelf", version)]
#[command(about = "A local catalog of reusable HTML and CSS snippets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the catalog (overrides config and environment)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List snippets
    #[command(alias = "ls")]
    List {
        /// Only snippets in this category ("all" for every snippet)
        #[arg(short, long)]
        category: Option<String>,

        /// Print the snippets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a snippet with its code
    #[command(alias = "view")]
    Show { id: String },

    /// Add a snippet. Code comes from --code, --code-file or stdin
    Add(AddArgs),

    /// Edit fields of a snippet
    Edit(EditArgs),

    /// Delete snippets
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Manage banners
    Banner {
        #[command(subcommand)]
        action: BannerCommands,
    },

    /// Export the catalog (or the given snippets) to a JSON file
    Export {
        /// Snippet ids to export; everything when omitted
        ids: Vec<String>,

        /// Output file (default: dated file in the export directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Replace the catalog with the contents of an export file
    Import { path: PathBuf },

    /// Delete everything and restore the default catalog
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show where data, exports and configuration live
    Paths,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,

    #[arg(short, long)]
    pub description: String,

    /// HTML or CSS
    #[arg(short, long)]
    pub language: String,

    /// Category name (default: the first category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Cover image URL
    #[arg(long, value_name = "URL")]
    pub cover: Option<String>,

    #[command(flatten)]
    pub code: CodeSource,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub language: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long, value_name = "URL")]
    pub cover: Option<String>,

    #[command(flatten)]
    pub code: CodeSource,
}

#[derive(Args, Debug)]
pub struct CodeSource {
    /// Code as text
    #[arg(long, conflicts_with = "code_file")]
    pub code: Option<String>,

    /// Read the code from a file
    #[arg(long, value_name = "PATH")]
    pub code_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with their snippet counts
    List,

    /// Add a category
    Add {
        name: String,

        /// Icon name (Code, Layout, ShoppingCart, FileCode, Database, Globe, Package, Settings, Terminal, Folder)
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Rename a category. Its snippets move to General
    Rename { id: String, name: String },

    /// Change a category's icon
    Icon { id: String, icon: String },

    /// Delete a category. Its snippets move to General
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BannerCommands {
    /// List banners
    List {
        /// Only active banners
        #[arg(long)]
        active: bool,
    },

    /// Add a banner
    Add {
        image_url: String,

        #[arg(long, value_name = "URL")]
        link: Option<String>,

        /// Add the banner switched off
        #[arg(long)]
        inactive: bool,
    },

    /// Set a banner's link, or clear it when no URL is given
    Link { id: String, url: Option<String> },

    /// Switch a banner on or off
    Toggle { id: String },

    /// Delete a banner
    Delete { id: String },
}
