use structopt::StructOpt;

#[derive(StructOpt)]
pub struct Opts {
    /// Composite cubemap image in the 4x3 horizontal-cross layout.
    #[structopt(default_value = "Cubemap_Sky_15-512x512.png")]
    source: std::path::PathBuf,
    /// Directory the face images are written to.
    #[structopt(short, long, default_value = ".")]
    output_dir: std::path::PathBuf,
    /// Output image format, given as a file extension.
    #[structopt(short, long, default_value = "jpg")]
    format: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::from_args();

    let written = cubemap_tools::split_cubemap(&opts.source, &opts.output_dir, &opts.format)?;

    println!(
        "Split {} into {} cubemap faces",
        opts.source.display(),
        written.len()
    );

    Ok(())
}
