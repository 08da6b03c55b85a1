//! Command-line parsing and execution.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use s3lite_client::{FailFast, FileZoneIo, S3FileZone};

const USAGE: &str = "usage: s3lite <buckets | exists ZONE | ls ZONE | put ZONE NAME [FILE] | \
                     get ZONE NAME [FILE] | rm ZONE NAME>";

/// One file zone command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Buckets,
    Exists { zone: String },
    List { zone: String },
    Put { zone: String, name: String, file: Option<PathBuf> },
    Get { zone: String, name: String, file: Option<PathBuf> },
    Remove { zone: String, name: String },
}

impl Command {
    /// Parse the arguments that follow the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match args.as_slice() {
            ["buckets"] => Self::Buckets,
            ["exists", zone] => Self::Exists { zone: (*zone).to_owned() },
            ["ls", zone] => Self::List { zone: (*zone).to_owned() },
            ["put", zone, name, rest @ ..] if rest.len() <= 1 => Self::Put {
                zone: (*zone).to_owned(),
                name: (*name).to_owned(),
                file: rest.first().map(PathBuf::from),
            },
            ["get", zone, name, rest @ ..] if rest.len() <= 1 => Self::Get {
                zone: (*zone).to_owned(),
                name: (*name).to_owned(),
                file: rest.first().map(PathBuf::from),
            },
            ["rm", zone, name] => Self::Remove {
                zone: (*zone).to_owned(),
                name: (*name).to_owned(),
            },
            _ => bail!("{USAGE}"),
        };
        Ok(command)
    }

    /// Run against `store`. Returns `Ok(false)` when the command completed with
    /// a negative answer (missing zone or file, rejected upload).
    pub fn run(self, store: &S3FileZone) -> Result<bool> {
        let mut fail_fast = FailFast::new();
        let mut on_error = |e| fail_fast.record(e);

        let success = match self {
            Self::Buckets => {
                let text = store.client().get_all_buckets(&mut on_error);
                println!("{text}");
                true
            }
            Self::Exists { zone } => store.client().head_bucket(&zone, &mut on_error),
            Self::List { zone } => {
                for name in store.get_all_file_names(&zone, &mut on_error) {
                    println!("{name}");
                }
                true
            }
            Self::Put { zone, name, file } => {
                let (source, length) = open_source(file.as_deref())?;
                store.upload_file(&zone, &name, source, length, &mut on_error)
            }
            Self::Get { zone, name, file } => {
                let mut out: Box<dyn Write> = match &file {
                    Some(path) => Box::new(BufWriter::new(
                        File::create(path)
                            .with_context(|| format!("cannot create {}", path.display()))?,
                    )),
                    None => Box::new(io::stdout().lock()),
                };
                let found = store.get_file(&zone, &name, &mut out, &mut on_error);
                out.flush().context("failed to flush output")?;
                found
            }
            Self::Remove { zone, name } => {
                store.delete_file(&zone, &name, &mut on_error);
                true
            }
        };

        fail_fast.finish(success).map_err(Into::into)
    }
}

/// Open an upload source. Files report their length so the upload carries a
/// `Content-Length`; stdin is sent chunked.
fn open_source(file: Option<&Path>) -> Result<(Box<dyn Read + Send>, Option<u64>)> {
    let Some(path) = file else {
        return Ok((Box::new(io::stdin()), None));
    };
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let length = file
        .metadata()
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    Ok((Box::new(file), Some(length)))
}
