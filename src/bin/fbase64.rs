use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, bail};
use clap::Parser;

use fb64::base64::core as b64;
use fb64::common::io::{FileData, read_file, read_stdin};
use fb64::common::path::make_full_name;
use fb64::common::{format_byte_count, io_error_msg};

/// Room for a resolved `-C DIR FILE` path, terminator included.
const PATH_CAPACITY: usize = 4096;

#[derive(Parser)]
#[command(
    name = "base64",
    about = "Base64 encode or decode FILE, or standard input, to standard output.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        The data are encoded as described for the base64 alphabet in RFC 4648.\n\
        When decoding, the input may contain newlines in addition to the bytes of\n\
        the formal base64 alphabet.  Use --ignore-garbage to attempt to recover\n\
        from any other non-alphabet bytes in the encoded stream.",
    version
)]
struct Cli {
    /// Decode data
    #[arg(short = 'd', long = "decode", conflicts_with = "validate")]
    decode: bool,

    /// Check that the input is well-formed and print its decoded size
    #[arg(long = "validate")]
    validate: bool,

    /// When decoding or validating, ignore non-alphabet characters
    #[arg(short = 'i', long = "ignore-garbage")]
    ignore_garbage: bool,

    /// Wrap encoded lines after COLS character (default 76).
    /// Use 0 to disable line wrapping
    #[arg(short = 'w', long = "wrap", value_name = "COLS", default_value = "76")]
    wrap: usize,

    /// Resolve FILE relative to DIR
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    directory: Option<String>,

    /// File to process (reads stdin if omitted or -)
    file: Option<String>,
}

fn main() {
    fb64::common::reset_sigpipe();

    let cli = Cli::parse();
    let filename = cli.file.as_deref().unwrap_or("-");

    let path = match resolve_path(cli.directory.as_deref(), filename) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("base64: {:#}", e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(1024 * 1024, stdout.lock());
    let result = run(&cli, path.as_ref(), &mut out).and_then(|()| out.flush());

    if let Err(e) = result {
        if e.kind() == io::ErrorKind::BrokenPipe {
            process::exit(0);
        }
        match &path {
            Some(p) if e.kind() != io::ErrorKind::InvalidData => {
                eprintln!("base64: {}: {}", p.display(), io_error_msg(&e))
            }
            _ => eprintln!("base64: {}", io_error_msg(&e)),
        }
        process::exit(1);
    }
}

/// `None` means standard input.
fn resolve_path(dir: Option<&str>, filename: &str) -> anyhow::Result<Option<PathBuf>> {
    if filename == "-" {
        if dir.is_some() {
            bail!("--directory requires a FILE operand");
        }
        return Ok(None);
    }
    if dir.is_none() {
        return Ok(Some(PathBuf::from(filename)));
    }

    let mut buf = [0u8; PATH_CAPACITY];
    let len = make_full_name(&mut buf, dir, filename)
        .with_context(|| format!("cannot resolve '{}'", filename))?;
    let joined = std::str::from_utf8(&buf[..len]).context("path is not valid UTF-8")?;
    Ok(Some(PathBuf::from(joined)))
}

fn run(cli: &Cli, path: Option<&PathBuf>, out: &mut impl Write) -> io::Result<()> {
    let data = match path {
        Some(p) => read_file(p)?,
        None => FileData::Owned(read_stdin()?),
    };

    if cli.validate {
        let count = b64::validate_input(&data, cli.ignore_garbage);
        if count == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid input"));
        }
        return writeln!(out, "{} ({})", count, format_byte_count(count as u64));
    }

    if cli.decode {
        return b64::decode_to_writer(&data, cli.ignore_garbage, out);
    }

    b64::encode_to_writer(&data, cli.wrap, out)
}
