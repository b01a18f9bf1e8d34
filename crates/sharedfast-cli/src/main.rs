//! CLI entry point for SharedFast note folders.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use sharedfast_core::log::{self, LogConfig};
use sharedfast_core::{
    app_data_dir, load_config, set_notes_root, status, zip_folder, Camera, CommandCamera, Config,
    CreateOutcome, FileCamera, FileRow, FolderScreen, HomeScreen, ImportSource, Layout,
    MemorySource, PathSource, ShareTarget, SkipReason,
};

#[derive(Parser)]
#[command(name = "sharedfast")]
#[command(about = "SharedFast: note folders you can fill and share")]
struct Cli {
    /// Base directory holding SharedFastNotes/ (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Directory for share archives (overrides config).
    #[arg(long, global = true, value_name = "DIR")]
    cache: Option<PathBuf>,
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show backend status (for dev).
    Status,
    /// Show where SharedFast stores its config and folders.
    DataDir,
    /// Persist the base directory for note folders.
    SetRoot {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// List folders with their creation date.
    Folders {
        #[arg(long)]
        json: bool,
    },
    /// Create a folder. Blank or existing names are ignored.
    Create {
        name: String,
    },
    /// List the files of a folder, newest first.
    Files {
        folder: String,
        #[arg(long)]
        json: bool,
    },
    /// Copy files into a folder. Use `-` to read one file from stdin.
    Import {
        folder: String,
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Name for stdin input; a random id is used when omitted.
        #[arg(long)]
        name: Option<String>,
    },
    /// Take a photo into a folder with the configured camera program.
    Capture {
        folder: String,
        /// Use an existing image instead of the camera program.
        #[arg(long, value_name = "IMAGE")]
        from: Option<PathBuf>,
    },
    /// Zip a folder into the cache dir and hand it to an app.
    Share {
        folder: String,
        /// facebook, whatsapp, gmail, bluetooth or chooser.
        #[arg(long, default_value = "chooser")]
        to: String,
    },
    /// Zip a folder to an explicit path.
    Zip {
        folder: String,
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    log::init(LogConfig::from_verbosity(cli.verbose));

    let mut config = load_config();
    if let Some(root) = &cli.root {
        config.notes_root = Some(root.to_string_lossy().into_owned());
    }
    if let Some(cache) = &cli.cache {
        config.cache_dir = Some(cache.to_string_lossy().into_owned());
    }
    let layout = Layout::from_config(&config);

    match run(cli.command.unwrap_or(Commands::Status), &config, layout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config, layout: Layout) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Status => {
            println!("SharedFast backend");
            println!("  core: {}", status());
            println!("  folders: {}", layout.root.display());
            println!("  cache: {}", layout.cache.display());
        }
        Commands::DataDir => match app_data_dir() {
            Some(p) => println!("{}", p.display()),
            None => eprintln!("Could not determine app data directory."),
        },
        Commands::SetRoot { path } => {
            set_notes_root(&path)?;
            println!("Notes root set to {}", path.display());
        }
        Commands::Folders { json } => {
            let home = HomeScreen::load(layout);
            if json {
                println!("{}", serde_json::to_string_pretty(home.folders())?);
            } else if home.folders().is_empty() {
                println!("No folders under {}", home.layout().root.display());
            } else {
                for folder in home.folders() {
                    println!("{}  Created: {}", folder.title, folder.created_time);
                }
            }
        }
        Commands::Create { name } => {
            let mut home = HomeScreen::load(layout);
            home.open_dialog();
            home.set_dialog_name(name);
            match home.confirm_dialog()? {
                CreateOutcome::Created(folder) => {
                    println!("Created {}  Created: {}", folder.title, folder.created_time)
                }
                CreateOutcome::Skipped(SkipReason::Blank) => {
                    tracing::debug!("blank folder name ignored")
                }
                CreateOutcome::Skipped(SkipReason::AlreadyExists) => {
                    tracing::debug!("folder already exists")
                }
            }
        }
        Commands::Files { folder, json } => {
            let screen = FolderScreen::open(&layout, &folder)?;
            if json {
                println!("{}", serde_json::to_string_pretty(screen.files())?);
            } else {
                println!("{} ({} files)", screen.title(), screen.files().len());
                for row in screen.rows() {
                    match row {
                        FileRow::Image { name, date } => println!("[img] {}  Date: {}", name, date),
                        FileRow::Plain { name } => println!("      {}", name),
                    }
                }
            }
        }
        Commands::Import { folder, paths, name } => {
            check_single_stdin(&paths)?;
            let mut screen = FolderScreen::open(&layout, &folder)?;
            for path in paths {
                let source: Box<dyn ImportSource> = if is_stdin(&path) {
                    let mut data = Vec::new();
                    std::io::stdin().read_to_end(&mut data)?;
                    Box::new(MemorySource::new(name.clone(), data))
                } else {
                    Box::new(PathSource::new(path))
                };
                println!("{}", screen.import(source.as_ref()));
            }
        }
        Commands::Capture { folder, from } => {
            let camera: Box<dyn Camera> = match (from, config.capture.command.clone()) {
                (Some(image), _) => Box::new(FileCamera::new(image)),
                (None, Some(argv)) => match CommandCamera::new(argv) {
                    Some(camera) => Box::new(camera),
                    None => return Err("capture.command is empty".into()),
                },
                (None, None) => {
                    return Err("no camera configured: set capture.command or pass --from".into())
                }
            };
            let mut screen = FolderScreen::open(&layout, &folder)?;
            println!("{}", screen.capture(camera.as_ref()));
        }
        Commands::Share { folder, to } => {
            let target: ShareTarget = to.parse()?;
            let handler = sharedfast_core::CommandShareHandler::from_config(&config.share);
            let mut home = HomeScreen::load(layout);
            home.toggle_selected(&folder);
            match home.share_selected(target, &handler) {
                Some(notice) => println!("{}", notice),
                None => return Err(format!("no folder named {folder:?}").into()),
            }
        }
        Commands::Zip { folder, output } => {
            sharedfast_core::folders::validate_title(&folder)?;
            let summary = zip_folder(&layout.folder_dir(&folder), &output)?;
            println!(
                "Wrote {} entr{} to {}",
                summary.entries.len(),
                if summary.entries.len() == 1 { "y" } else { "ies" },
                summary.output.display()
            );
        }
    }
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Stdin can only be drained once, so at most one `-` is allowed.
fn check_single_stdin(paths: &[PathBuf]) -> Result<(), String> {
    if paths.iter().filter(|p| is_stdin(p)).count() > 1 {
        return Err("`-` (stdin) may be given only once".to_string());
    }
    Ok(())
}
