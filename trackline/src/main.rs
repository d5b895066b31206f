mod config;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use config::Config;
use trackline_core::{
    self as tc, Resolution,
    columns::Column,
    trackline_state::{Track, TrackId},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Playlist file, a JSON array of tracks. Defaults to `general.playlist` from the config
    #[arg(short, long, global = true)]
    playlist: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the playlist
    Show {
        /// Id of the track to mark as playing
        #[arg(long)]
        playing: Option<u32>,
    },
    /// Print the playlist statistics
    Stats,
    /// Print the row holding a track id, or -1 if it isn't in the playlist
    Find { id: u32 },
    /// Drag rows to a new position
    Move {
        /// Selected rows, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        rows: Vec<usize>,
        /// Row the drag started from
        #[arg(long)]
        from: usize,
        /// Row the selection is dropped on
        #[arg(long, allow_negative_numbers = true)]
        to: i64,
        /// Write the result back to the playlist file
        #[arg(long)]
        write: bool,
    },
    /// Drop files into the playlist
    Add {
        /// Row the files are dropped on
        #[arg(long, allow_negative_numbers = true)]
        row: i64,
        #[arg(required = true)]
        paths: Vec<String>,
        /// Write the result back to the playlist file
        #[arg(long)]
        write: bool,
    },
    /// Print the rows to repaint when the playing track changes
    NowPlaying {
        /// Id of the track that was playing
        #[arg(long)]
        previous: Option<u32>,
        /// Id of the track now playing
        current: u32,
    },
    /// Write the default config to the working directory
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.general.log_filter)
            }),
        )
        .init();

    if let Command::InitConfig = args.command {
        return Config::default().save();
    }

    let path = args
        .playlist
        .or_else(|| config.general.playlist.clone())
        .context("No playlist given; pass --playlist or set general.playlist in the config")?;

    let stats = tc::SharedStats::new();
    let mut model = tc::PlaylistModel::new(stats.clone());
    let mut events = model.subscribe();
    let mut transport = tc::MemoryTransport::new(read_playlist(&path)?);
    model.replace(transport.tracks().to_vec());

    match args.command {
        Command::Show { playing } => {
            if let Some(id) = playing {
                model.update_current(TrackId(id));
            }
            print_table(&model, &config.display);
        }
        Command::Stats => {
            let stats = stats.snapshot();
            println!("Artists: {}", stats.artists);
            println!("Albums:  {}", stats.albums);
            println!("Songs:   {}", stats.songs);
            println!("Time:    {}", tc::util::seconds_to_total_string(stats.time));
        }
        Command::Find { id } => {
            println!("{}", model.row_of(TrackId(id)).map_or(-1, |row| row as i64));
        }
        Command::Move {
            rows,
            from,
            to,
            write,
        } => {
            model.clicked(from);
            match model.drop_rows(rows, to) {
                Resolution::Ignored => println!("Drop is outside the playlist; nothing moved"),
                Resolution::Unchanged => println!("Nothing to move"),
                Resolution::Move(instruction) => {
                    println!("{}", serde_json::to_string_pretty(&instruction)?);
                    model.apply_move(&mut transport, &instruction)?;
                    print_table(&model, &config.display);
                    if write {
                        write_playlist(&path, model.tracks().as_slice())?;
                    }
                }
            }
        }
        Command::Add { row, paths, write } => match model.drop_files(paths, row) {
            Some(request) => {
                model.apply_insert(&mut transport, &request)?;
                print_table(&model, &config.display);
                if write {
                    write_playlist(&path, model.tracks().as_slice())?;
                }
            }
            None => println!("Drop is outside the playlist; nothing added"),
        },
        Command::NowPlaying { previous, current } => {
            if let Some(previous) = previous {
                model.update_current(TrackId(previous));
            }
            for span in model.update_current(TrackId(current)).spans() {
                println!(
                    "row {} columns {}..={}",
                    span.row,
                    span.columns.start(),
                    span.columns.end()
                );
            }
        }
        Command::InitConfig => unreachable!("handled before the playlist is loaded"),
    }

    while let Ok(event) = events.try_recv() {
        tracing::debug!("playlist event: {event:?}");
    }

    Ok(())
}

fn read_playlist(path: &Path) -> anyhow::Result<Vec<Track>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse playlist {}", path.display()))
}

fn write_playlist(path: &Path, tracks: &[Track]) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(tracks)?)
        .with_context(|| format!("Failed to write playlist {}", path.display()))?;
    tracing::info!("saved playlist to {}", path.display());
    Ok(())
}

fn print_table(model: &tc::PlaylistModel, display: &config::Display) {
    let cells: Vec<Vec<String>> = model
        .tracks()
        .iter()
        .map(|track| {
            Column::ALL
                .iter()
                .map(|column| column.cell(track).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = Column::ALL.iter().map(|c| c.header().len()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let marker_width = display.playing_marker.chars().count();
    let format_row = |lead: &str, row: &[String]| {
        let mut line = format!("{lead:marker_width$} ");
        for (cell, &width) in row.iter().zip(&widths) {
            line.push_str(&format!("{cell:width$}  "));
        }
        line.trim_end().to_string()
    };

    if display.show_header {
        let header: Vec<String> = Column::ALL.iter().map(|c| c.header().to_string()).collect();
        println!("{}", format_row("", &header));
    }
    for (row, cells) in cells.iter().enumerate() {
        let lead = if model.is_playing_row(row) {
            display.playing_marker.as_str()
        } else {
            ""
        };
        println!("{}", format_row(lead, cells));
    }
}
