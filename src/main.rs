// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use songlingo::app_config::{self, Config};
use songlingo::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the supported learning languages
    Languages,

    /// Upload a song and add its words to the vocabulary
    AddSong {
        /// Song title
        #[arg(long)]
        title: String,

        /// Song artist
        #[arg(long)]
        artist: String,

        /// Language code of the lyrics (e.g., 'ko', 'es', 'spa')
        #[arg(short, long)]
        language: String,

        /// Lyrics text
        #[arg(long, conflicts_with = "lyrics_file", required_unless_present = "lyrics_file")]
        lyrics: Option<String>,

        /// File containing the lyrics
        #[arg(long)]
        lyrics_file: Option<PathBuf>,
    },

    /// List the songs of a language, newest first
    Songs {
        /// Language code
        #[arg(short, long)]
        language: String,
    },

    /// Show the vocabulary of a language, most frequent first
    Vocab {
        /// Language code
        #[arg(short, long)]
        language: String,

        /// Show at most this many words
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Look up translations for the listed words and store them
        #[arg(long)]
        translate: bool,
    },

    /// Show the reading progress of a song
    Progress {
        /// Song id
        #[arg(long)]
        song: i64,
    },

    /// Record a reading position for a song
    RecordProgress {
        /// Song id
        #[arg(long)]
        song: i64,

        /// Zero-based line index
        #[arg(long)]
        line: i64,

        /// Mark the song as completed
        #[arg(long)]
        completed: bool,
    },

    /// Finish a line and move to the next one
    CompleteLine {
        /// Song id
        #[arg(long)]
        song: i64,

        /// Zero-based index of the finished line
        #[arg(long)]
        line: i64,
    },

    /// Translate a word or a lyric line
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Language code of the text
        #[arg(short, long)]
        language: String,
    },

    /// Show store and cache statistics
    Stats,

    /// Generate shell completions for songlingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Songlingo - learn a language from the songs you love
///
/// Upload lyrics in the language you study, build a vocabulary from them
/// and keep track of how far you got in every song.
#[derive(Parser, Debug)]
#[command(name = "songlingo")]
#[command(version = "0.1.0")]
#[command(about = "Song-lyrics vocabulary trainer")]
#[command(long_about = "Songlingo turns song lyrics into a study vocabulary and tracks your reading progress.

EXAMPLES:
    songlingo languages                                       # List supported languages
    songlingo add-song --title T --artist A -l es --lyrics-file song.txt
    songlingo vocab -l es --limit 10 --translate              # Top words with translations
    songlingo complete-line --song 1 --line 0                 # Advance to the next line
    songlingo translate \"mi corazón\" -l es                    # Translate a line
    songlingo completions bash > songlingo.bash               # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("[x]", "\x1B[1;31m"),
            Level::Warn => ("[!]", "\x1B[1;33m"),
            Level::Info => ("   ", "\x1B[1;32m"),
            Level::Debug => ("[?]", "\x1B[1;36m"),
            Level::Trace => ("[.]", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                colour,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept every level here; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "songlingo", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(Path::new(&cli.config_path))?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller
        .initialize()
        .context("Failed to open the learning store")?;

    let outcome = run_command(&controller, cli.command).await;
    let closed = controller.close();

    outcome?;
    closed
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Languages => {
            for language in controller.list_languages()? {
                println!("{:>3}  {}  {}", language.id, language.code, language.name);
            }
        }
        Commands::AddSong {
            title,
            artist,
            language,
            lyrics,
            lyrics_file,
        } => {
            let lyrics = match (lyrics, lyrics_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read lyrics file: {}", path.display()))?,
                (None, None) => return Err(anyhow!("Either --lyrics or --lyrics-file is required")),
            };

            let language = controller.language_by_code(&language)?;
            let (song_id, report) =
                controller.add_song_with_report(&title, &artist, language.id, &lyrics)?;
            info!(
                "Added '{}' by {} as song {} ({} new words, {} recorded)",
                title, artist, song_id, report.new_words, report.recorded_words
            );
            println!("{}", song_id);
        }
        Commands::Songs { language } => {
            let language = controller.language_by_code(&language)?;
            let songs = controller.songs_for(language.id)?;
            if songs.is_empty() {
                warn!("No songs uploaded for {} yet", language.name);
            }
            for song in songs {
                println!("{:>4}  {} - {}", song.id, song.artist, song.title);
            }
        }
        Commands::Vocab {
            language,
            limit,
            translate,
        } => {
            let language = controller.language_by_code(&language)?;
            let entries = controller.vocabulary_for(language.id)?;
            for entry in entries.into_iter().take(limit) {
                let translation = if translate {
                    controller
                        .translate_vocabulary(&entry, &language.code)
                        .await?
                        .text
                } else {
                    entry.translation.clone()
                };
                println!(
                    "{:>4}  {:<20} {}",
                    entry.frequency_count, entry.word, translation
                );
            }
        }
        Commands::Progress { song } => match controller.progress_for(song)? {
            Some(progress) => println!(
                "line {}  completed: {}  sessions: {}  last: {}",
                progress.current_line,
                progress.completed,
                progress.practice_sessions,
                progress.last_accessed
            ),
            None => warn!("No progress recorded for song {}", song),
        },
        Commands::RecordProgress {
            song,
            line,
            completed,
        } => {
            let progress = controller.record_progress(song, line, completed)?;
            info!(
                "Song {} at line {} ({} sessions)",
                progress.song_id, progress.current_line, progress.practice_sessions
            );
        }
        Commands::CompleteLine { song, line } => {
            let progress = controller.complete_line(song, line)?;
            if progress.completed {
                info!("Song {} completed", progress.song_id);
            } else {
                info!("Song {} now at line {}", progress.song_id, progress.current_line);
            }
        }
        Commands::Translate { text, language } => {
            let language = controller.language_by_code(&language)?;
            let result = controller.translate(&text, &language.code).await;
            println!("{}  ({}, confidence {:.1})", result.text, result.source, result.confidence);
        }
        Commands::Stats => {
            let stats = controller.stats()?;
            let cache = controller.cache_stats();
            println!("languages:    {}", stats.language_count);
            println!("songs:        {}", stats.song_count);
            println!("vocabulary:   {}", stats.vocabulary_count);
            println!("progress:     {}", stats.progress_count);
            println!("snapshot:     {} bytes", stats.snapshot_bytes);
            println!(
                "cache:        {}/{} entries, hit rate {:.0}%",
                cache.len,
                cache.capacity,
                cache.hit_rate * 100.0
            );
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
