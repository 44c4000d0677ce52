// comp40img - a lossy codec for the "COMP40 Compressed image format 2"
// container. Two subcommands: compress an RGB PPM into the container,
// or decompress a container back into an RGB PPM. Input is a named file
// or stdin; output always goes to stdout.

mod array2d;
mod bitpack;
mod chroma;
mod codeword;
mod colorspace;
mod container;
mod dct;
mod error;
mod pipeline;
mod pixel;
mod ppm;
mod quant;
mod util;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use error::Comp40Error;

#[derive(Parser)]
#[command(name = "comp40img")]
#[command(about = "Compress or decompress images in COMP40 Compressed image format 2", long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compress an RGB PPM (P6) image into the container format
  Compress {
    /// Input PPM path; reads stdin if omitted
    input: Option<PathBuf>,
  },
  /// Decompress a container back into an RGB PPM
  Decompress {
    /// Input container path; reads stdin if omitted
    input: Option<PathBuf>,
  },
}

fn open_input(path: &Option<PathBuf>) -> io::Result<Box<dyn Read>> {
  match path {
    Some(path) => Ok(Box::new(File::open(path)?)),
    None => Ok(Box::new(io::stdin())),
  }
}

fn run() -> Result<(), Comp40Error> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Compress { input } => {
      log::info!("compressing {:?}", input.as_deref().unwrap_or(std::path::Path::new("<stdin>")));
      let mut reader = open_input(&input)?;
      let image = ppm::read_ppm(&mut reader)?;
      let compressed = pipeline::compress(&image);

      let stdout = io::stdout();
      let mut handle = stdout.lock();
      handle.write_all(&compressed)?;
      Ok(())
    }
    Commands::Decompress { input } => {
      log::info!("decompressing {:?}", input.as_deref().unwrap_or(std::path::Path::new("<stdin>")));
      let mut reader = open_input(&input)?;
      let mut bytes = Vec::new();
      reader.read_to_end(&mut bytes)?;
      let image = pipeline::decompress(&bytes)?;

      let stdout = io::stdout();
      let mut handle = stdout.lock();
      ppm::write_ppm(&mut handle, &image)?;
      Ok(())
    }
  }
}

fn main() -> ExitCode {
  env_logger::init();

  match run() {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("comp40img: {}", err);
      ExitCode::FAILURE
    }
  }
}
