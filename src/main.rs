mod labforge;

use anyhow::Result;
use clap::Parser;
use log::debug;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

use labforge::compose::BuildSpec;

#[derive(Parser)]
#[command(name = "labforge")]
#[command(about="Build a JupyterLab docker image with required kernels.", long_about=None)]
#[command(version = "0.2.0")]
pub struct App {
    // Kernels to include; no selection means the default set.
    #[arg(long = "kernel", short = 'k', num_args = 0.., help = "Specify required kernels")]
    kernel: Vec<String>,

    #[arg(long, help = "List supported kernels")]
    list_kernels: bool,

    #[arg(long, default_value = "24.04", help = "Ubuntu base image version")]
    ubuntu_version: String,

    #[arg(long, short, default_value_os_t = PathBuf::from("Dockerfile.jupyter"), help = "Output file path")]
    output: PathBuf,

    #[arg(long, short, help = "Build the container")]
    build: bool,

    #[arg(long, short, default_value = "jupyter", help = "Specify image tag")]
    tag: String,

    #[arg(long, short, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let app = App::parse();

    let level = if app.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    if app.list_kernels {
        println!("{}", labforge::kernel::kernel_names().join(", "));
        return Ok(());
    }

    let spec = BuildSpec {
        kernels: app.kernel,
        ubuntu_version: app.ubuntu_version,
        output: app.output,
        build: app.build,
        tag: app.tag,
    };

    let dockerfile = labforge::compose::compose(&spec)?;
    std::fs::write(&spec.output, dockerfile)?;
    debug!("Wrote {}", spec.output.display());

    if spec.build {
        labforge::docker::build(&spec.output, &spec.tag)?;
    }

    Ok(())
}
