mod clipboard;

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use obenseuer_core::core_api::input::{parse_amount_input, parse_stat_value_input};
use obenseuer_core::core_api::stat_table::{self, DEFAULT_STAT_VALUE, StatGroup};
use obenseuer_core::core_api::{
    CategoryFilter, ConsoleCommand, CopyTarget, CoreError, JsonFileStore, Session, SortKey,
    ViewAction,
};
use obenseuer_render::{
    TextRenderOptions, categories_to_json, render_catalog_text, render_category_menu,
    render_console_panel, render_view_json,
};
use serde_json::Value as JsonValue;
use tracing_subscriber::EnvFilter;

use crate::clipboard::{ManualCopy, SystemClipboard};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Item catalog exported from the game.
    #[arg(
        long,
        global = true,
        env = "OBENSEUER_CATALOG",
        default_value = "items.json",
        value_name = "ITEMS.JSON"
    )]
    catalog: PathBuf,
    /// Where the theme and favorites are kept between runs.
    #[arg(
        long,
        global = true,
        env = "OBENSEUER_PREFS",
        default_value = ".obenseuer-items.json",
        value_name = "PATH"
    )]
    prefs: PathBuf,
    /// Also copy generated console commands to the clipboard.
    #[arg(long, global = true)]
    copy: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search, filter and sort the catalog.
    List {
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, short)]
        category: Option<String>,
        /// id, title, or anything else to keep catalog order.
        #[arg(long, default_value = "id")]
        sort: String,
        #[arg(long)]
        json: bool,
        #[arg(long, short)]
        verbose: bool,
    },
    /// Categories with item counts.
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Add an item to the favorites, or remove it if already there.
    Favorite { id: i64 },
    /// Favorite items present in the catalog.
    Favorites {
        #[arg(long)]
        json: bool,
    },
    /// Show or change the stored theme.
    Theme { mode: Option<ThemeArg> },
    /// Build an `add_item` command.
    Item {
        id: i64,
        #[arg(long, short, default_value = "1", value_parser = parse_amount_arg)]
        amount: u32,
    },
    /// Build a `player_stats` command.
    Stat {
        stat: String,
        #[arg(allow_hyphen_values = true, value_parser = parse_stat_value_arg)]
        value: Option<i64>,
    },
    /// Stats accepted by `stat`.
    Stats,
    /// Show the console command panel.
    Console,
    GodMode,
    Noclip,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut session = Session::new(JsonFileStore::open(&cli.prefs));

    if let Err(e) = run(&cli, &mut session) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli, session: &mut Session<JsonFileStore>) -> Result<(), CoreError> {
    match &cli.command {
        Command::List {
            search,
            category,
            sort,
            json,
            verbose,
        } => {
            load_catalog(session, &cli.catalog)?;
            if let Some(search) = search {
                session.dispatch(ViewAction::SetSearch(search.clone()));
            }
            if let Some(category) = category {
                session.dispatch(ViewAction::SelectCategory(CategoryFilter::from_name(
                    category,
                )));
            }
            session.dispatch(ViewAction::SetSortKey(SortKey::parse(sort)));

            if *json {
                print_json(&render_view_json(session));
            } else {
                let options = TextRenderOptions { verbose: *verbose };
                print!("{}", render_catalog_text(session, options, Instant::now()));
            }
        }
        Command::Categories { json } => {
            load_catalog(session, &cli.catalog)?;
            let view = session.view();
            if *json {
                print_json(&categories_to_json(&view.categories));
            } else {
                print!(
                    "{}",
                    render_category_menu(
                        &view.categories,
                        &session.view_state().selected_category
                    )
                );
            }
        }
        Command::Favorite { id } => {
            let now_favorite = session.toggle_favorite(*id)?;
            let verb = if now_favorite { "added" } else { "removed" };
            println!("{verb} favorite {id}");
            println!(
                "favorites={}",
                format_ids(session.preferences().favorite_ids.as_slice())
            );
        }
        Command::Favorites { json } => {
            load_catalog(session, &cli.catalog)?;
            let favorites = session.favorite_items();
            if *json {
                let value = render_view_json(session);
                print_json(&value["favorites"]);
            } else if favorites.is_empty() {
                println!("none");
            } else {
                for item in favorites {
                    println!("{}\t{}", item.id, item.title_str());
                }
            }
        }
        Command::Theme { mode } => {
            match mode {
                Some(ThemeArg::Dark) => session.set_dark_mode(true)?,
                Some(ThemeArg::Light) => session.set_dark_mode(false)?,
                Some(ThemeArg::Toggle) => {
                    session.toggle_dark_mode()?;
                }
                None => {}
            }
            let theme = if session.preferences().dark_mode {
                "dark"
            } else {
                "light"
            };
            println!("theme={theme}");
        }
        Command::Item { id, amount } => {
            session.dispatch(ViewAction::SetAmount {
                id: *id,
                amount: *amount,
            });
            let command = session.item_command(*id);
            emit_command(cli, session, &command, CopyTarget::Item(*id))?;
        }
        Command::Stat { stat, value } => {
            session.dispatch(ViewAction::SelectStat(stat.clone()));
            session.dispatch(ViewAction::SetStatValue(value.unwrap_or(DEFAULT_STAT_VALUE)));
            let command = session.stat_command()?;
            emit_command(cli, session, &command, CopyTarget::ConsolePanel)?;
        }
        Command::Stats => {
            for group in StatGroup::ALL {
                println!("{group}");
                for stat in stat_table::in_group(group) {
                    println!("  {:<16}{}", stat.id, stat.label);
                }
            }
        }
        Command::Console => {
            print!(
                "{}",
                render_console_panel(session.view_state(), Instant::now())
            );
        }
        Command::GodMode => {
            emit_command(cli, session, &ConsoleCommand::GodMode, CopyTarget::ConsolePanel)?;
        }
        Command::Noclip => {
            emit_command(cli, session, &ConsoleCommand::Noclip, CopyTarget::ConsolePanel)?;
        }
    }
    Ok(())
}

fn load_catalog(session: &mut Session<JsonFileStore>, path: &Path) -> Result<(), CoreError> {
    session.load_catalog_file(path)?;
    Ok(())
}

fn emit_command(
    cli: &Cli,
    session: &mut Session<JsonFileStore>,
    command: &ConsoleCommand,
    target: CopyTarget,
) -> Result<(), CoreError> {
    println!("{command}");
    if cli.copy {
        session.copy_command(
            command,
            target,
            &mut SystemClipboard,
            &mut ManualCopy,
            Instant::now(),
        )?;
    }
    Ok(())
}

fn print_json(value: &JsonValue) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Error serializing JSON output: {e}");
            process::exit(1);
        }
    }
}

fn format_ids(ids: &[i64]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_amount_arg(value: &str) -> Result<u32, String> {
    parse_amount_input(value)
        .ok_or_else(|| format!("invalid amount '{value}', expected a whole number of at least 1"))
}

fn parse_stat_value_arg(value: &str) -> Result<i64, String> {
    parse_stat_value_input(value).ok_or_else(|| format!("invalid stat value '{value}'"))
}
