//! Trip Tales CLI
//!
//! ```bash
//! trip-tales serve                       # Start HTTP server (port 8000)
//! trip-tales styles                      # List render styles
//! trip-tales storyboard a.jpg b.mp4      # Print the frame plan of a story
//! trip-tales upload a.jpg b.mp4          # Upload media to a running server
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trip_tales::{
    build_storyboard, client::DEFAULT_SERVER, select_media, Settings, StoryMedia, StoryOptions,
    UploadClient, ALL_STYLES,
};

#[derive(Parser)]
#[command(name = "trip-tales")]
#[command(about = "Turn travel photos and clips into short video stories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Address to bind (overrides TRIP_TALES_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides TRIP_TALES_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List render styles and their aliases
    Styles,

    /// Print the storyboard of a story as JSON
    Storyboard {
        /// Photos and clips, in story order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Title shown on the intro card
        #[arg(short, long)]
        title: Option<String>,

        /// Render style name or preset label
        #[arg(short, long, default_value = "cinematic")]
        style: String,
    },

    /// Upload photos and clips to a running server
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Server base URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,

        /// Link the files to this trip
        #[arg(long)]
        trip_id: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(host, port).await,
        Commands::Styles => cmd_styles(),
        Commands::Storyboard { files, title, style } => cmd_storyboard(&files, title, style),
        Commands::Upload { files, server, trip_id } => cmd_upload(&files, &server, trip_id).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::from_env()?;
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    trip_tales::server::start_server(settings).await
}

fn cmd_styles() -> Result<(), Box<dyn std::error::Error>> {
    for style in ALL_STYLES {
        let grading = style.grading();
        println!("  🎨 {:<16} {}", style.as_str(), style.description());
        println!(
            "     saturation {:.1}  brightness {:.1}  vignette {:.1}  contrast {}",
            grading.saturation,
            grading.brightness,
            grading.vignette,
            grading.clip_limit.map_or("-".to_string(), |c| format!("{:.1}", c)),
        );
    }
    println!();
    println!("  Aliases: memory_lane → vintage, instagram → vibrant");
    Ok(())
}

fn cmd_storyboard(
    files: &[PathBuf],
    title: Option<String>,
    style: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    let (media, skipped) = select_media(files);
    for path in &skipped {
        eprintln!("⚠️  Skipping {} (not a photo or clip)", path.display());
    }

    let items: Vec<StoryMedia> = media
        .iter()
        .map(|m| StoryMedia {
            path: m.path.display().to_string(),
            filename: m.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
            kind: m.mime.split('/').next().unwrap_or_default().to_string(),
        })
        .collect();

    let options = StoryOptions {
        title,
        style: Some(style),
        intro: true,
        outro: true,
    };
    let board = build_storyboard(&items, &options, &settings.video);
    eprintln!(
        "🎬 {} segments, {} frames, {:.1}s",
        board.segments.len(),
        board.total_frames(),
        board.duration()
    );
    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}

async fn cmd_upload(
    files: &[PathBuf],
    server: &str,
    trip_id: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (media, skipped) = select_media(files);
    for path in &skipped {
        eprintln!("⚠️  Skipping {} (not a photo or clip)", path.display());
    }

    let client = UploadClient::new(server);
    eprintln!("📤 Uploading {} files to {}", media.len(), client.upload_url());
    let receipt = client.upload(&media, trip_id).await?;

    for name in &receipt.uploaded {
        eprintln!("   ✓ {}", name);
    }
    eprintln!("✅ Uploaded {} files", receipt.count);
    Ok(())
}
