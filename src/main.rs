//! One-shot drafting CLI.
//!
//! ```text
//! patternkit "<garment description>" <brand> [fit] [gravity] [distortion]
//!     [--page a4|letter] [--out DIR]
//! ```
//!
//! Drafts the garment once and writes `<style>.dxf` and `<style>.pdf`
//! next to each other. Brands: `atelier` (angular), `flux` (organic).

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use patternkit::{
    assemble, init_logging, write_dxf, write_tiled_pdf, BrandStyle, DesignParameters, PageFormat,
};

struct Args {
    garment: String,
    brand: BrandStyle,
    params: DesignParameters,
    page: PageFormat,
    out_dir: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut positional: Vec<String> = Vec::new();
    let mut page = PageFormat::A4;
    let mut out_dir = PathBuf::from(".");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--page" => {
                let value = args.next().ok_or_else(|| anyhow!("--page needs a value"))?;
                page = PageFormat::parse(&value)
                    .ok_or_else(|| anyhow!("unknown page format '{}' (a4, letter)", value))?;
            }
            "--out" => {
                let value = args.next().ok_or_else(|| anyhow!("--out needs a value"))?;
                out_dir = PathBuf::from(value);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        print_usage();
        bail!("missing garment description");
    }
    let garment = positional[0].clone();
    let brand = match positional.get(1) {
        Some(s) => BrandStyle::parse(s)
            .ok_or_else(|| anyhow!("unknown brand '{}' (atelier, flux)", s))?,
        None => BrandStyle::Atelier,
    };

    let slider = |index: usize, default: f64| -> Result<f64> {
        match positional.get(index) {
            Some(s) => s
                .parse::<f64>()
                .with_context(|| format!("invalid slider value '{}'", s)),
            None => Ok(default),
        }
    };
    let params = DesignParameters::new(slider(2, 50.0)?, slider(3, 0.0)?, slider(4, 0.0)?);

    Ok(Args {
        garment,
        brand,
        params,
        page,
        out_dir,
    })
}

fn print_usage() {
    eprintln!(
        "usage: patternkit \"<garment description>\" [atelier|flux] \
         [fit 0-100] [gravity 0-100] [distortion 0-100] [--page a4|letter] [--out DIR]"
    );
}

fn main() -> Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let doc = assemble(&args.garment, args.brand, &args.params)?;
    info!(
        style = %doc.style_name,
        pieces = doc.pieces.len(),
        fabric = %doc.fabric_yield,
        "drafted"
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {}", args.out_dir.display()))?;

    let dxf_path = write_dxf(&doc, &args.out_dir)?;
    let pdf_path = write_tiled_pdf(&doc, args.page, &args.out_dir)?;
    println!("{}", dxf_path.display());
    println!("{}", pdf_path.display());

    Ok(())
}
