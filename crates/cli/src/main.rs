use anyhow::Context;
use clap::{Parser, Subcommand};
use smm2::asset::{self, AssetInfo};
use smm2::compression;
use smm2::{
    Iv, LevelDecryptOptions, LevelEncryptOptions, Seed, Smm2Error, ThumbnailOptions,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SMM2_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "smm2",
    version,
    about = "Decrypt, verify and re-encrypt Super Mario Maker 2 course and thumbnail files"
)]
struct Cli {
    /// Log at debug level unless SMM2_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decrypt and verify a course container
    DecryptLevel {
        input: PathBuf,
        output: Option<PathBuf>,
        /// Keep the 16-byte header in front of the payload
        #[arg(long)]
        with_header: bool,
    },
    /// Encrypt a decrypted course payload (with or without header)
    EncryptLevel {
        input: PathBuf,
        output: Option<PathBuf>,
        /// Generator seed as 32 hex digits
        #[arg(long)]
        seed: Option<Seed>,
        /// AES-CBC IV as 32 hex digits
        #[arg(long)]
        iv: Option<Iv>,
        /// Draw seed and IV from the OS RNG
        #[arg(long, conflicts_with_all = ["seed", "iv"])]
        random: bool,
        /// JSON file with `seed` and `iv`
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Seal a JPEG into a thumbnail container
    EncryptThumbnail {
        input: PathBuf,
        output: Option<PathBuf>,
        /// Generator seed as 32 hex digits
        #[arg(long)]
        seed: Option<Seed>,
        /// Draw the seed from the OS RNG
        #[arg(long, conflicts_with = "seed")]
        random: bool,
        /// JSON file with `seed` and `qualities`
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Check the marker and HMAC of a thumbnail container
    VerifyThumbnail { input: PathBuf },
    /// Extract the JPEG from a thumbnail container
    ExtractThumbnail {
        input: PathBuf,
        output: Option<PathBuf>,
        /// Decode and re-encode the picture instead of verifying the container
        #[arg(long)]
        reencode: bool,
    },
    /// Print header and trailer fields of a container as JSON
    Inspect { input: PathBuf },
    /// Wrap a file in a zlib stream
    Compress {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// Unwrap a zlib stream
    Decompress {
        input: PathBuf,
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        if let Some(hint) = err
            .downcast_ref::<Smm2Error>()
            .and_then(Smm2Error::suggestion)
        {
            warn!("hint: {hint}");
        }
        return Err(err);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default.into()))
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::DecryptLevel {
            input,
            output,
            with_header,
        } => {
            let options = LevelDecryptOptions {
                include_header: with_header,
            };
            let payload = asset::decrypt_level_file(&input, &options)
                .with_context(|| format!("failed to decrypt {}", input.display()))?;
            emit(output.as_deref(), &payload)
        }
        Commands::EncryptLevel {
            input,
            output,
            seed,
            iv,
            random,
            options,
        } => {
            let mut resolved: LevelEncryptOptions = match &options {
                Some(path) => load_options(path)?,
                None => LevelEncryptOptions::default(),
            };
            if random {
                resolved = LevelEncryptOptions::random();
            }
            if let Some(seed) = seed {
                resolved.seed = seed;
            }
            if let Some(iv) = iv {
                resolved.iv = iv;
            }
            debug!(seed = %resolved.seed, iv = %resolved.iv, "course encryption options");

            match output {
                Some(output) => asset::encrypt_level_file(&input, &output, &resolved)
                    .with_context(|| format!("failed to encrypt {}", input.display())),
                None => {
                    let payload = asset::read_asset(&input)?;
                    let container =
                        smm2::encrypt_level(&payload, &resolved).map_err(Smm2Error::from)?;
                    emit(None, &container)
                }
            }
        }
        Commands::EncryptThumbnail {
            input,
            output,
            seed,
            random,
            options,
        } => {
            let mut resolved: ThumbnailOptions = match &options {
                Some(path) => load_options(path)?,
                None => ThumbnailOptions::default(),
            };
            if random {
                resolved.seed = ThumbnailOptions::random().seed;
            }
            if let Some(seed) = seed {
                resolved.seed = seed;
            }

            match output {
                Some(output) => {
                    asset::encrypt_thumbnail_file(&input, &output, &resolved)
                        .with_context(|| format!("failed to seal {}", input.display()))?;
                    Ok(())
                }
                None => {
                    let jpeg = asset::read_asset(&input)?;
                    let container =
                        smm2::encrypt_thumbnail(&jpeg, &resolved).map_err(Smm2Error::from)?;
                    emit(None, &container)
                }
            }
        }
        Commands::VerifyThumbnail { input } => {
            let container = asset::read_asset(&input)?;
            smm2::verify_thumbnail(&container)
                .map_err(Smm2Error::from)
                .with_context(|| format!("{} failed verification", input.display()))?;
            info!(path = %input.display(), "thumbnail HMAC is valid");
            Ok(())
        }
        Commands::ExtractThumbnail {
            input,
            output,
            reencode,
        } => {
            let jpeg = if reencode {
                let container = asset::read_asset(&input)?;
                smm2::unpack_thumbnail(&container).map_err(Smm2Error::from)?
            } else {
                asset::decrypt_thumbnail_file(&input)
                    .with_context(|| format!("failed to extract {}", input.display()))?
            };
            emit(output.as_deref(), &jpeg)
        }
        Commands::Inspect { input } => {
            let bytes = asset::read_asset(&input)?;
            let info: AssetInfo = asset::inspect(&bytes)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        Commands::Compress { input, output } => {
            let data = fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;
            emit(output.as_deref(), &compression::compress(&data)?)
        }
        Commands::Decompress { input, output } => {
            let data = fs::read(&input).with_context(|| format!("failed to read {}", input.display()))?;
            let decompressed = compression::decompress(&data)
                .with_context(|| format!("{} is not a zlib stream", input.display()))?;
            emit(output.as_deref(), &decompressed)
        }
    }
}

fn load_options<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid options file {}", path.display()))
}

/// Write to `output`, or to stdout when no path is given
fn emit(output: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            asset::write_atomic(path, bytes)?;
            info!(path = %path.display(), size = bytes.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encrypt_level_seed() {
        let cli = Cli::parse_from([
            "smm2",
            "encrypt-level",
            "course.dec",
            "--seed",
            "0102030405060708090a0b0c0d0e0f10",
        ]);
        match cli.command {
            Commands::EncryptLevel { seed, random, .. } => {
                assert_eq!(seed, Some(Seed::default()));
                assert!(!random);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_random_conflicts_with_seed() {
        let result = Cli::try_parse_from([
            "smm2",
            "encrypt-level",
            "course.dec",
            "--random",
            "--seed",
            "0102030405060708090a0b0c0d0e0f10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        assert!(Cli::try_parse_from(["smm2", "encrypt-thumbnail", "a.jpg", "--seed", "00"]).is_err());
    }
}
