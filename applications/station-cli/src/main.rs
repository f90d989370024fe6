/// Station - catalog and show playlist tool
use clap::{Parser, Subcommand};
use station_cli::{commands, format::normalize_path, App, StationConfig};
use station_core::{PlaylistId, SongId, SongQuery};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "station")]
#[command(about = "Radio station catalog and duration-budgeted playlists", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./station.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import one audio file into the catalog
    Import {
        /// Audio file path
        path: String,
    },
    /// Import every audio file in a folder
    ImportIncoming {
        /// Folder to scan (default: import.incoming_path)
        dir: Option<String>,
    },
    /// Search the catalog
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        album: Option<String>,
        /// Exact tag name
        #[arg(long)]
        tag: Option<String>,
        #[arg(long, requires = "year_to")]
        year_from: Option<i32>,
        #[arg(long, requires = "year_from")]
        year_to: Option<i32>,
        #[arg(long, default_value_t = SongQuery::DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Manage show playlists
    #[command(subcommand)]
    Playlist(PlaylistCommands),
    /// List the playlist budget presets
    Presets,
}

#[derive(Subcommand)]
enum PlaylistCommands {
    /// Create an empty playlist
    Create {
        #[arg(long)]
        show: String,
        #[arg(long)]
        name: String,
        /// One of 30min, 1h, 1h30, 2h
        #[arg(long)]
        budget: String,
    },
    /// Append a song if it fits the budget
    Add { playlist: PlaylistId, song: SongId },
    /// Show a playlist and its entries
    Show { playlist: PlaylistId },
    /// List all playlists
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "station=info,station_cli=info,station_playlist=info,station_importer=info,station_storage=warn"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    // Presets need no database
    if let Commands::Presets = cli.command {
        println!("{}", commands::presets(json)?);
        return Ok(());
    }

    let config = StationConfig::load(cli.config.as_deref())?;
    let app = App::open(config).await?;

    let output = match cli.command {
        Commands::Import { path } => app.import_file(&normalize_path(&path), json).await?,
        Commands::ImportIncoming { dir } => {
            let dir = dir.map(|d| normalize_path(&d));
            app.import_incoming(dir.as_deref(), json).await?
        }
        Commands::Search {
            title,
            artist,
            album,
            tag,
            year_from,
            year_to,
            limit,
        } => {
            let mut query = SongQuery::new().limit(limit);
            query.title = title;
            query.artist = artist;
            query.album = album;
            query.tag = tag;
            if let (Some(from), Some(to)) = (year_from, year_to) {
                query = query.years(from, to);
            }
            app.search(&query, json).await?
        }
        Commands::Playlist(command) => match command {
            PlaylistCommands::Create { show, name, budget } => {
                app.playlist_create(&show, &name, &budget, json).await?
            }
            PlaylistCommands::Add { playlist, song } => app.playlist_add(playlist, song, json).await?,
            PlaylistCommands::Show { playlist } => app.playlist_show(playlist, json).await?,
            PlaylistCommands::List => app.playlist_list(json).await?,
        },
        Commands::Presets => commands::presets(json)?,
    };

    println!("{}", output);
    Ok(())
}
