use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotistats::{
    cli::{self, PlaylistSource, Selection},
    config::{self, Config},
    error,
    management::FileStore,
    spotify::SpotifyClient,
    types::TimeRange,
    utils,
    view::{DEFAULT_PLAYLIST_DESCRIPTION, DEFAULT_PLAYLIST_NAME, ItemSource, PlaylistRequest},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth(AuthOptions),

    /// Forget stored credentials
    Logout,

    /// Show authentication status
    Status,

    /// Your top tracks, artists and genres
    Top(TopOptions),

    /// Recently played tracks
    Recent(RecentOptions),

    #[clap(about = "Create a playlist from selected tracks")]
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Log in again even if the current session is still valid
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    #[command(subcommand)]
    pub command: TopSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TopSubcommand {
    /// Most listened tracks
    Tracks(RangeOptions),
    /// Most listened artists
    Artists(RangeOptions),
    /// Genres of the most listened artists
    Genres(RangeOptions),
}

#[derive(Parser, Debug, Clone)]
pub struct RangeOptions {
    /// Time window the statistics are computed over
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub time_range: TimeRange,

    /// Number of items to fetch (1-50)
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct RecentOptions {
    /// Number of items to fetch (1-50)
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Listing to pick tracks from
    #[clap(long, value_enum, default_value_t = PlaylistSource::TopTracks)]
    pub from: PlaylistSource,

    #[clap(flatten)]
    pub range: RangeOptions,

    /// Ranks of the listed tracks to include, e.g. 1,3,5-8
    #[clap(long, value_parser = utils::parse_ranks, conflicts_with = "all", required_unless_present = "all")]
    pub select: Option<utils::Ranks>,

    /// Include every listed track
    #[clap(long)]
    pub all: bool,

    #[clap(long, default_value = DEFAULT_PLAYLIST_NAME)]
    pub name: String,

    #[clap(long, default_value = DEFAULT_PLAYLIST_DESCRIPTION)]
    pub description: String,

    /// Make the playlist public
    #[clap(long)]
    pub public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPOTISTATS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let client = Arc::new(SpotifyClient::new(
        config,
        Arc::new(FileStore::default_location()),
    ));

    match cli.command {
        Command::Auth(opt) => cli::auth(Arc::clone(&client), opt.force).await,
        Command::Logout => cli::logout(&client).await,
        Command::Status => cli::status(&client).await,
        Command::Top(opt) => match opt.command {
            TopSubcommand::Tracks(r) => {
                cli::list(&client, ItemSource::TopTracks, r.time_range, r.limit).await
            }
            TopSubcommand::Artists(r) => {
                cli::list(&client, ItemSource::TopArtists, r.time_range, r.limit).await
            }
            TopSubcommand::Genres(r) => cli::genres(&client, r.time_range, r.limit).await,
        },
        Command::Recent(opt) => {
            cli::list(
                &client,
                ItemSource::RecentlyPlayed,
                TimeRange::default(),
                opt.limit,
            )
            .await
        }
        Command::Playlist(opt) => {
            let selection = match opt.select {
                Some(ranks) if !opt.all => Selection::Ranks(ranks.0),
                _ => Selection::All,
            };
            let request = PlaylistRequest {
                name: opt.name,
                description: opt.description,
                public: opt.public,
            };
            cli::playlist(
                &client,
                opt.from,
                opt.range.time_range,
                opt.range.limit,
                selection,
                request,
            )
            .await
        }
        Command::Completions(_) => {}
    }
}
