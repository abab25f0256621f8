use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webp_convert::app::App;

#[derive(Debug, Parser)]
#[command(name = "webp-convert")]
#[command(about = "Convert a PNG, JPEG or WebP image to WebP, written to stdout")]
struct CliArgs {
    /// Image file to convert.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Encoder quality from 1 to 100 (defaults to WEBP_QUALITY or 75).
    #[arg(short, long, allow_negative_numbers = true)]
    quality: Option<i32>,

    /// Declared MIME type; sniffed from the file when omitted.
    #[arg(long, value_name = "MIME")]
    content_type: Option<String>,

    /// Print a JSON summary of the conversion to stderr.
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webp_convert=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    match app
        .convert_path(&args.input, args.content_type, args.quality)
        .await
    {
        Ok((buffer, summary)) => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(buffer.get_ref()).await?;
            stdout.flush().await?;

            if args.summary {
                eprintln!("{}", serde_json::to_string_pretty(&summary)?);
            }
            info!("Conversion completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_parse_minimal_args() {
        let args = CliArgs::try_parse_from(["webp-convert", "photo.png"]).unwrap();
        assert_eq!(args.input.to_string_lossy(), "photo.png");
        assert_eq!(args.quality, None);
        assert_eq!(args.content_type, None);
        assert!(!args.summary);
    }

    #[test]
    fn test_parse_all_args() {
        let args = CliArgs::try_parse_from([
            "webp-convert",
            "photo.jpg",
            "--quality",
            "90",
            "--content-type",
            "image/jpeg",
            "--summary",
        ])
        .unwrap();
        assert_eq!(args.quality, Some(90));
        assert_eq!(args.content_type.as_deref(), Some("image/jpeg"));
        assert!(args.summary);
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(CliArgs::try_parse_from(["webp-convert"]).is_err());
    }
}
