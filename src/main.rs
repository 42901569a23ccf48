use clap::Parser;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use transformer::{Config, Request, process};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Rewrites an AMP document into its canonical, server-side-rendered form.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Transformer preset: default, none or validation.
    #[arg(long, default_value = "default")]
    config: Config,

    /// Comma-separated transformer names; overrides --config.
    #[arg(long, value_delimiter = ',')]
    transformers: Option<Vec<String>>,

    /// AMP runtime version used for the runtime stylesheet.
    #[arg(long)]
    rtv: Option<String>,

    /// File holding the runtime CSS to inline into <style amp-runtime>.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    css: Option<PathBuf>,

    /// Absolute URL the document is served from.
    document_url: String,

    /// Input document; stdin when omitted.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let html = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let css = args.css.as_ref().map(fs::read_to_string).transpose()?;

    let mut request = Request::new(html, args.document_url);
    request.rtv = args.rtv;
    request.css = css;
    request.config = match args.transformers {
        Some(names) => Config::Custom(names),
        None => args.config,
    };

    let output = process(&request)?;
    log::info!(target: "ampcanon", "transformed with version {}", output.version);
    io::stdout().write_all(output.html.as_bytes())?;
    Ok(())
}
