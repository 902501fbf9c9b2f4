use log::*;
use std::{error::Error as _, io::Write, path::PathBuf};
use structopt::StructOpt;
use triview_cli::Error;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "triview",
    about = "Estimates scenes seen from viewpoint triples and fuses them into one"
)]
struct Opt {
    /// The number of estimation iterations to run for every triple.
    #[structopt(short, long, default_value = "50")]
    iterations: usize,
    /// The file where settings are specified.
    ///
    /// This is JSON in the format of `triview_core::Settings`. Missing fields take their defaults.
    #[structopt(short, long, parse(from_os_str))]
    settings: Option<PathBuf>,
    /// The file to write the fused scene points to.
    ///
    /// If this is not provided, then the scene goes to stdout.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// The file to write the fused viewpoint centers to.
    #[structopt(short, long, parse(from_os_str))]
    centers: Option<PathBuf>,
    /// Azimuth files, three per viewpoint triple.
    ///
    /// Each following triple must start with the last two viewpoints of the one before it.
    #[structopt(parse(from_os_str), required = true)]
    inputs: Vec<PathBuf>,
}

fn run(opt: Opt) -> Result<(), Error> {
    let settings = triview_cli::load_settings(opt.settings.as_deref())?;
    let triples = triview_cli::read_triples(&opt.inputs)?;
    info!("read {} viewpoint triples", triples.len());

    let model = triview_cli::reconstruct(&triples, &settings, opt.iterations)?;

    if let Some(path) = &opt.centers {
        triview_cli::write_points(path, &model.centers)?;
    }
    match &opt.output {
        Some(path) => triview_cli::write_points(path, &model.scene)?,
        None => std::io::stdout()
            .lock()
            .write_all(triview_cli::format_points(&model.scene).as_bytes())
            .map_err(|source| Error::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })?,
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();
    if let Err(e) = run(opt) {
        error!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            error!("caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
