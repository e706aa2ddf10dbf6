//! Render every sample mesh to a standalone interactive HTML document.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use mesh_format::{DataCatalog, MeshLoader};
use surface_plot::{render_loaded, write_html, SegmentedColormap};
use surface_types::{is_named_background, MeshFormat, RenderConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Ply,
}

impl From<FormatArg> for MeshFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => MeshFormat::CarModelJson,
            FormatArg::Ply => MeshFormat::Ply,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Render triangulated surfaces colored by height")]
struct Args {
    /// Directory holding `car_models_json/` and `ply_data/`.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[arg(long, default_value = "Output")]
    output_dir: PathBuf,

    /// Only render files of this kind.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Only render this identifier.
    #[arg(long, requires = "format")]
    name: Option<String>,

    #[arg(long, default_value = "snow")]
    background: String,

    #[arg(long, default_value_t = 900)]
    width: u32,

    #[arg(long, default_value_t = 500)]
    height: u32,

    #[arg(long)]
    no_axes: bool,

    #[arg(long)]
    wireframe: bool,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            background: self.background.clone(),
            width: self.width,
            height: self.height,
            show_axes: !self.no_axes,
            wireframe: self.wireframe,
            ..RenderConfig::default()
        }
    }

    fn formats(&self) -> Vec<MeshFormat> {
        match self.format {
            Some(format) => vec![format.into()],
            None => MeshFormat::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    written: Vec<PathBuf>,
    failed: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let summary = run(&args)?;

    println!(
        "\n{} documents written to {}/",
        summary.written.len(),
        args.output_dir.display()
    );
    if !summary.failed.is_empty() {
        bail!(
            "{} file(s) failed: {}",
            summary.failed.len(),
            summary.failed.join(", ")
        );
    }
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<Summary> {
    if !is_named_background(&args.background) {
        bail!("unknown background color {:?}", args.background);
    }
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let catalog = DataCatalog::under(&args.data_dir);
    let config = args.render_config();
    let colormap = SegmentedColormap::rd_bu();
    let mut summary = Summary::default();
    let mut used_names = HashSet::new();

    for format in args.formats() {
        let names = match &args.name {
            Some(name) => vec![name.clone()],
            None => match catalog.list(format) {
                Ok(names) => names,
                Err(e) => {
                    warn!(format = %format, error = %e, "skipping data directory");
                    continue;
                }
            },
        };
        let loader = catalog.loader(format);

        for name in names {
            let document = document_name(&mut used_names, &name, format);
            let rendered = render_one(
                loader.as_ref(),
                &name,
                &document,
                &config,
                &colormap,
                &args.output_dir,
            );
            match rendered {
                Ok(path) => summary.written.push(path),
                Err(e) => {
                    error!(
                        identifier = %name,
                        format = %format,
                        error = %format!("{e:#}"),
                        "render failed"
                    );
                    summary.failed.push(format!("{name}.{}", format.extension()));
                }
            }
        }
    }
    Ok(summary)
}

/// Output stem for `name`, unique among `used`. A stem taken by an earlier
/// file gets a `_<ext>` suffix, then a counter.
fn document_name(used: &mut HashSet<String>, name: &str, format: MeshFormat) -> String {
    let mut document = name.to_string();
    let mut attempt = 1;
    while !used.insert(document.clone()) {
        document = match attempt {
            1 => format!("{name}_{}", format.extension()),
            n => format!("{name}_{}{n}", format.extension()),
        };
        attempt += 1;
    }
    document
}

fn render_one(
    loader: &dyn MeshLoader,
    identifier: &str,
    document: &str,
    config: &RenderConfig,
    colormap: &SegmentedColormap,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let loaded = loader.load(identifier)?;
    let scene = render_loaded(&loaded, config, colormap)?;
    let path = write_html(&scene, output_dir, document)?;

    let (z_min, z_max) = loaded
        .mesh
        .bounds()
        .map_or((f64::NAN, f64::NAN), |(lo, hi)| (lo.z, hi.z));
    info!(
        identifier,
        vertices = loaded.mesh.vertex_count(),
        faces = loaded.mesh.face_count(),
        z_min,
        z_max,
        path = %path.display(),
        "rendered"
    );
    Ok(path)
}
