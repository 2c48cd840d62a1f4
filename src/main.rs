use {
    clap::Parser,
    log::LevelFilter,
    mounted::ReadOptions,
    std::{
        io,
        path::PathBuf,
        process::ExitCode,
    },
};

/// List the mounted file systems
#[derive(Debug, Parser)]
#[command(name = "fstab", about, version)]
struct Args {
    /// Mount table to read instead of /proc/mounts (linux only)
    #[arg(long, env = "MOUNTED_TABLE")]
    mount_table: Option<PathBuf>,

    /// Log to stderr, repeat for more details
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> Result<(), fern::InitError> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.verbose) {
        eprintln!("failed to set up logging: {e}");
    }
    let mut options = ReadOptions::default();
    if let Some(path) = args.mount_table {
        options = options.mount_table(path);
    }
    match mounted::read_file_systems(&options) {
        Ok(file_systems) => {
            for fs in file_systems {
                println!("{fs}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("fail to get mounted file systems, {e}");
            ExitCode::FAILURE
        }
    }
}
