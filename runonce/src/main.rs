mod cli;

use clap::Parser;
use cli::Cli;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use runonce_core::{try_run_once, try_run_once_concurrent, SyncMemo};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::thread;

fn main() -> ExitCode {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().filter_or("LOG", "runonce=info"))
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();
    match real_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{e}");
            ExitCode::from(2)
        }
    }
}

fn real_main(cli: &Cli) -> Result<(), Error> {
    let input: Box<dyn BufRead + Send> = match &cli.file {
        Some(path) => {
            let file = std::fs::File::open(path)
                .map_err(|e| Error::Io(Some(path.display().to_string()), e))?;
            Box::new(io::BufReader::new(file))
        }
        None => Box::new(io::BufReader::new(io::stdin())),
    };
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let lines = replay(cli, input, &mut out)?;
    log::debug!("read {lines} lines");
    out.flush()?;
    Ok(())
}

/// Output the lines of `input` as often as given by `cli`.
///
/// Return the number of lines that were read from `input`.
fn replay(cli: &Cli, input: impl BufRead + Send, out: &mut impl Write) -> Result<usize, Error> {
    let reads = AtomicUsize::new(0);
    let lines = input.lines().inspect(|_| {
        reads.fetch_add(1, Ordering::Relaxed);
    });

    let threads = cli.threads.get();
    if threads > 1 {
        let memo = try_run_once_concurrent(lines);
        passes(cli, out, || traverse_concurrent(&memo, threads))?;
    } else {
        let memo = try_run_once(lines);
        passes(cli, out, || memo.try_iter().collect())?;
    }
    Ok(reads.into_inner())
}

/// Run `pass` as often as given by `cli`, writing every result to `out`.
fn passes<'m>(
    cli: &Cli,
    out: &mut impl Write,
    mut pass: impl FnMut() -> io::Result<Vec<&'m String>>,
) -> Result<(), Error> {
    for i in 0..cli.passes {
        let lines = pass()?;
        log::debug!("pass {i} yielded {} lines", lines.len());
        if cli.count {
            writeln!(out, "{}", lines.len())?;
            continue;
        }
        for (n, line) in lines.iter().enumerate() {
            if cli.number {
                write!(out, "{n}\t")?;
            }
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Traverse `memo` with several threads at the same time.
fn traverse_concurrent<'m>(
    memo: &'m SyncMemo<String, io::Error>,
    threads: usize,
) -> io::Result<Vec<&'m String>> {
    let results = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| s.spawn(move || memo.try_iter().collect::<io::Result<Vec<_>>>()))
            .collect();
        let joined = handles.into_iter().map(|h| match h.join() {
            Ok(lines) => lines,
            Err(panic) => std::panic::resume_unwind(panic),
        });
        joined.collect::<io::Result<Vec<_>>>()
    })?;
    debug_assert!(results.windows(2).all(|w| w[0] == w[1]));
    Ok(results.into_iter().next().unwrap_or_default())
}

#[derive(Debug)]
enum Error {
    Io(Option<String>, io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(None, e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(prefix, e) => {
                write!(f, "Error: ")?;
                if let Some(p) = prefix {
                    write!(f, "{p}: ")?;
                }
                writeln!(f, "{e}")
            }
        }
    }
}
