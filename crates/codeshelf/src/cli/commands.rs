//! # CLI Layer
//!
//! One UI client for codeshelf. This is the only place that parses
//! arguments, reads stdin, writes to the terminal and picks exit codes.
//!
//! 1. Parse arguments with clap ([`super::setup::Cli`]).
//! 2. Load configuration and start logging.
//! 3. Build the API over the data directory.
//! 4. Dispatch to a `handle_*` function, which calls the API and prints the
//!    returned `CmdResult`.

use super::logging;
use super::render::{
    print_messages, render_banners, render_categories, render_snippet_full, render_snippet_list,
};
use super::setup::{AddArgs, BannerCommands, CategoryCommands, Cli, CodeSource, Commands, EditArgs};
use chrono::Utc;
use clap::Parser;
use codeshelfapp::api::{CodeshelfApi, SnippetFilter};
use codeshelfapp::config::CodeshelfConfig;
use codeshelfapp::error::{CodeshelfError, Result};
use codeshelfapp::init::{config_file_path, initialize_with, try_load_config};
use codeshelfapp::model::{SnippetDraft, SnippetPatch};
use codeshelfapp::storage::fs::FsStore;
use log::{debug, warn};
use std::io::{IsTerminal, Read};
use std::path::Path;

struct AppContext {
    api: CodeshelfApi<FsStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let loaded = try_load_config();
    let level = logging::resolve_level(
        cli.verbose,
        loaded.as_ref().ok().map(|c| c.log_level.as_str()),
    );
    let _logger = logging::init(level);
    let config = loaded.unwrap_or_else(|e| {
        warn!("could not load configuration, using defaults: {}", e);
        CodeshelfConfig::default()
    });

    let mut ctx = AppContext {
        api: initialize_with(config, cli.data_dir.clone()).api,
    };
    debug!("running {:?}", cli.command);

    match cli.command {
        Some(Commands::List { category, json }) => handle_list(&ctx, category, json),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Add(args)) => handle_add(&mut ctx, args),
        Some(Commands::Edit(args)) => handle_edit(&mut ctx, args),
        Some(Commands::Delete { ids }) => {
            let result = ctx.api.delete_snippets(&ids)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Category { action }) => handle_category(&mut ctx, action),
        Some(Commands::Banner { action }) => handle_banner(&mut ctx, action),
        Some(Commands::Export { ids, output }) => {
            let result = ctx.api.export_to_file(&ids, output.as_deref())?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Import { path }) => {
            let result = ctx.api.import_file(&path)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Reset { yes }) => {
            let result = ctx.api.reset(yes)?;
            print_messages(&result.messages);
            Ok(())
        }
        Some(Commands::Paths) => handle_paths(&ctx),
        None => handle_list(&ctx, None, false),
    }
}

fn handle_list(ctx: &AppContext, category: Option<String>, json: bool) -> Result<()> {
    let filter = SnippetFilter { category };
    let result = ctx.api.list_snippets(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.listed_snippets)?);
        return Ok(());
    }

    print!("{}", render_snippet_list(&result.listed_snippets, Utc::now()));
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_snippet(id)?;
    for snippet in &result.listed_snippets {
        print!("{}", render_snippet_full(snippet, Utc::now()));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let code = read_code(&args.code, true)?.unwrap_or_default();
    let draft = SnippetDraft {
        title: args.title,
        description: args.description,
        code,
        language: args.language,
        cover_image: args.cover.unwrap_or_default(),
        category: args.category.unwrap_or_default(),
    };
    let result = ctx.api.create_snippet(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, args: EditArgs) -> Result<()> {
    let patch = SnippetPatch {
        title: args.title,
        description: args.description,
        code: read_code(&args.code, false)?,
        language: args.language,
        cover_image: args.cover,
        category: args.category,
    };
    let result = ctx.api.update_snippet(&args.id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

/// Code from `--code`, `--code-file`, or (when `allow_stdin`) piped stdin,
/// in that order.
fn read_code(source: &CodeSource, allow_stdin: bool) -> Result<Option<String>> {
    if let Some(code) = &source.code {
        return Ok(Some(code.clone()));
    }
    if let Some(path) = &source.code_file {
        return read_code_file(path).map(Some);
    }

    let stdin = std::io::stdin();
    if !allow_stdin || stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}

fn read_code_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        CodeshelfError::Api(format!("could not read {}: {}", path.display(), e))
    })
}

fn handle_category(ctx: &mut AppContext, action: CategoryCommands) -> Result<()> {
    let result = match action {
        CategoryCommands::List => {
            let result = ctx.api.list_categories()?;
            print!(
                "{}",
                render_categories(&result.listed_categories, ctx.api.store().snippets())
            );
            result
        }
        CategoryCommands::Add { name, icon } => ctx.api.add_category(&name, icon.as_deref())?,
        CategoryCommands::Rename { id, name } => ctx.api.rename_category(&id, &name)?,
        CategoryCommands::Icon { id, icon } => ctx.api.set_category_icon(&id, &icon)?,
        CategoryCommands::Delete { id } => ctx.api.delete_category(&id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_banner(ctx: &mut AppContext, action: BannerCommands) -> Result<()> {
    let result = match action {
        BannerCommands::List { active } => {
            let result = ctx.api.list_banners(active)?;
            print!("{}", render_banners(&result.listed_banners));
            result
        }
        BannerCommands::Add {
            image_url,
            link,
            inactive,
        } => ctx.api.add_banner(image_url, link, !inactive)?,
        BannerCommands::Link { id, url } => ctx.api.set_banner_link(&id, url)?,
        BannerCommands::Toggle { id } => ctx.api.toggle_banner(&id)?,
        BannerCommands::Delete { id } => ctx.api.delete_banner(&id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &AppContext) -> Result<()> {
    let paths = ctx.api.paths();
    println!("data:    {}", paths.data_dir.display());
    println!("exports: {}", paths.export_dir.display());
    match config_file_path() {
        Some(path) => println!("config:  {}", path.display()),
        None => println!("config:  (no config directory)"),
    }
    Ok(())
}
