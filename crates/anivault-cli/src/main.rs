use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{activity, bookmark, browse, clear, config, fortune, history, remind, schedule, search, stats, watch};

mod commands;
mod logging;
mod notify;
mod output;

#[derive(Parser)]
#[command(name = "anivault")]
#[command(about = "AniVault - Your local anime watching companion")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an episode as watched
    #[command(long_about = "Fetch an episode from the catalog, show its streaming link, and record it at the top of the local watch history. Every recorded episode also counts towards the daily activity log. Use --offline to record without touching the network.")]
    Watch {
        /// Episode ID as the catalog names it (e.g. 'jjk-episode-12')
        episode_id: String,

        /// Seconds of the episode watched so far
        #[arg(long, value_name = "SECONDS")]
        progress: Option<u32>,

        /// Total episode length in seconds
        #[arg(long, value_name = "SECONDS")]
        duration: Option<u32>,

        /// Record without fetching the episode from the catalog
        #[arg(long, action = ArgAction::SetTrue, requires = "title")]
        offline: bool,

        /// Episode title (required with --offline)
        #[arg(long)]
        title: Option<String>,

        /// Poster URL to store with the entry (only used with --offline)
        #[arg(long)]
        poster: Option<String>,
    },
    /// Show or edit the watch history
    #[command(long_about = "List, prune, or export the local watch history. The history keeps the most recent episodes, newest first; rewatching an episode moves it back to the top. Running without a subcommand lists it.")]
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,
    },
    /// Manage bookmarked anime
    #[command(long_about = "Bookmark anime to find them again later. Adding a bookmark fetches the current title, poster, score, and status from the catalog; adding one that already exists is a no-op.")]
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Episode release reminders
    #[command(long_about = "Set reminders for upcoming episodes and get notified in the terminal when they are due. Without --at, the release time is derived from the weekly schedule published by the catalog. The first reminder command asks once whether notifications are wanted; the answer is stored in the config file.")]
    Remind {
        #[command(subcommand)]
        command: RemindCommands,
    },
    /// Draw today's omikuji
    #[command(long_about = "Draw the daily fortune: a grade, a lucky color, and a lucky anime picked from the ongoing listing. One draw per day; running it again shows the same result until the day rolls over.")]
    Fortune,
    /// Show the daily watch activity grid
    #[command(long_about = "Render a contribution-style grid of episodes watched per day, one column per week with the current week on the right.")]
    Activity {
        /// Number of weeks to show
        #[arg(long, default_value_t = 52)]
        weeks: u32,
    },
    /// Watching statistics and level
    #[command(long_about = "Summarize the profile: lifetime episodes, estimated time watched, active days, bookmark and reminder counts, and progress towards the next watcher level.")]
    Stats,
    /// Search the catalog
    Search {
        /// Search query
        query: String,
    },
    /// Weekly release schedule
    #[command(long_about = "Show the catalog's weekly release schedule, with the next local release time for each day. Days are labeled as the catalog labels them, which may be English or Indonesian.")]
    Schedule {
        /// Only show one day (as the catalog labels it, e.g. 'Monday' or 'Senin')
        #[arg(long)]
        day: Option<String>,
    },
    /// Browse catalog listings
    #[command(long_about = "Browse the catalog without searching: the home rails, the ongoing and completed listings, and anime by genre.")]
    Browse {
        #[command(subcommand)]
        command: BrowseCommands,
    },
    /// View or edit configuration
    #[command(long_about = "Manage the config file: catalog endpoint, notification consent, and reminder cadence. 'config init' walks through every setting interactively.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored profile data
    #[command(long_about = "Delete stored profile data per slot or all at once. Use --history, --bookmarks, --reminders, --activity, --fortune, or --all.")]
    Clear {
        /// Clear every slot
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["history", "bookmarks", "reminders", "activity", "fortune"])]
        all: bool,

        /// Clear the watch history
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear bookmarks
        #[arg(long, action = ArgAction::SetTrue)]
        bookmarks: bool,

        /// Clear reminders
        #[arg(long, action = ArgAction::SetTrue)]
        reminders: bool,

        /// Clear the activity log
        #[arg(long, action = ArgAction::SetTrue)]
        activity: bool,

        /// Clear the stored daily fortune
        #[arg(long, action = ArgAction::SetTrue)]
        fortune: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List the watch history (default)
    List,
    /// Remove one episode from the history
    Remove {
        /// Episode ID to remove
        episode_id: String,
    },
    /// Clear the whole history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Export the history as CSV
    Export {
        /// File to write
        #[arg(long, value_name = "FILE", default_value = "anivault-history.csv")]
        file: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum BookmarkCommands {
    /// Bookmark an anime by its catalog ID
    Add {
        /// Anime ID as the catalog names it (e.g. 'one-piece')
        anime_id: String,
    },
    /// Remove a bookmark
    Remove {
        /// Anime ID to remove
        anime_id: String,
    },
    /// List all bookmarks
    List,
}

#[derive(Subcommand)]
enum RemindCommands {
    /// Set a reminder for an anime's next episode
    #[command(long_about = "Set a reminder for an anime. By default the target time comes from the weekly schedule: the next occurrence of the anime's release day at 20:00 local time. Pass --at to pick the moment yourself.")]
    Set {
        /// Anime ID as the catalog names it
        anime_id: String,

        /// Fire at an explicit time instead (RFC 3339, e.g. 2026-09-01T20:00:00+07:00)
        #[arg(long, value_name = "WHEN")]
        at: Option<String>,

        /// Title to store with the reminder (only used with --at; defaults to the anime ID)
        #[arg(long, requires = "at")]
        title: Option<String>,
    },
    /// Remove a reminder
    Remove {
        /// Anime ID whose reminder to remove
        anime_id: String,
    },
    /// List pending reminders
    List,
    /// Check for due reminders once and notify
    Check,
    /// Keep checking until interrupted
    #[command(long_about = "Run in the foreground and check for due reminders on the configured interval, notifying in the terminal as they fire. Stop with Ctrl-C.")]
    Watch {
        /// Log to the data directory instead of stderr
        #[arg(long, action = ArgAction::SetTrue)]
        log_file: bool,
    },
}

#[derive(Subcommand)]
enum BrowseCommands {
    /// The home rails: latest ongoing and completed releases
    Home,
    /// Ongoing anime
    Ongoing {
        /// Listing page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Completed anime
    Completed {
        /// Listing page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// All genres
    Genres,
    /// Anime in one genre
    Genre {
        /// Genre ID as the catalog names it (e.g. 'action')
        genre_id: String,

        /// Listing page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Interactive configuration wizard
    Init,
    /// Record notification consent without the prompt
    Consent {
        /// New consent value
        #[arg(value_enum)]
        value: ConsentArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConsentArg {
    Granted,
    Denied,
    Unset,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // remind watch may want its logs out of the way of the notifications
    let log_file = match &cli.command {
        Commands::Remind {
            command: RemindCommands::Watch { log_file: true },
        } => Some(anivault_config::PathManager::default().watch_log_file()),
        _ => None,
    };
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Watch {
            episode_id,
            progress,
            duration,
            offline,
            title,
            poster,
        } => watch::run_watch(&episode_id, progress, duration, offline, title, poster, &output).await,
        Commands::History { command } => {
            let command = command.unwrap_or(HistoryCommands::List);
            history::run_history(command, &output).await
        }
        Commands::Bookmark { command } => bookmark::run_bookmark(command, &output).await,
        Commands::Remind { command } => remind::run_remind(command, &output).await,
        Commands::Fortune => fortune::run_fortune(&output).await,
        Commands::Activity { weeks } => activity::run_activity(weeks, &output).await,
        Commands::Stats => stats::run_stats(&output).await,
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Schedule { day } => schedule::run_schedule(day, &output).await,
        Commands::Browse { command } => browse::run_browse(command, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output).await
        }
        Commands::Clear {
            all,
            history,
            bookmarks,
            reminders,
            activity,
            fortune,
            yes,
        } => clear::run_clear(all, history, bookmarks, reminders, activity, fortune, yes, &output).await,
    }
}
