//! Command-line driver: compress or decompress a file or stdin to a file
//! or stdout in either wire format.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use snapframe::{stream_compress, stream_decompress, Framing};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snapframe", version, about = "snapframe driver")]
struct Args {
    /// Input file (defaults to standard input)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output file (defaults to standard output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read size for streaming reads
    #[arg(short, long, default_value_t = 65536)]
    bytesize: usize,

    /// Compress the input instead of decompressing it
    #[arg(short, long, conflicts_with = "decompress")]
    compress: bool,

    /// Decompress the input (the default direction)
    #[arg(short, long)]
    decompress: bool,

    /// Framing format
    #[arg(short = 't', long, value_enum, default_value_t = FramingArg::Framing2)]
    framing: FramingArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FramingArg {
    #[value(name = "framing2")]
    Framing2,
    #[value(name = "hadoop")]
    Hadoop,
}

impl From<FramingArg> for Framing {
    fn from(arg: FramingArg) -> Self {
        match arg {
            FramingArg::Framing2 => Framing::Framing2,
            FramingArg::Hadoop => Framing::Hadoop,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut input: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let framing = Framing::from(args.framing);
    if args.compress {
        stream_compress(&mut input, &mut output, framing, args.bytesize)
            .context("compression failed")?;
    } else {
        stream_decompress(&mut input, &mut output, framing, args.bytesize)
            .context("decompression failed")?;
    }
    Ok(())
}
