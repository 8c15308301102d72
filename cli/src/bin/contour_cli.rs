use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use cli::{PaintConfig, parse_point};
use color_eyre::eyre::Result;
use contours::{
    Algorithm, Analysis, AnalysisBuilder, BruteForceMode, Extraction, contour_mask,
    io::{self, load_gray, save_gray, save_rgb, with_suffix},
    render::{self, Color},
};
use morphotree::{Connectivity, Domain, Point, format_image, format_mask};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare incremental contours with brute force on every node
    Check {
        /// Grayscale input image (the built-in 7x7 disk when omitted)
        #[arg(short, long)]
        image: Option<PathBuf>,
        /// Tree adjacency: 4 or 8
        #[arg(long, default_value = "4")]
        tree: Connectivity,
        /// Contour adjacency: 4 or 8
        #[arg(long, default_value = "4")]
        contour: Connectivity,
        /// Reference definition: level or region
        #[arg(long, default_value = "level")]
        mode: BruteForceMode,
    },
    /// Time one contour algorithm over the whole tree
    Perf {
        #[arg(short, long)]
        image: PathBuf,
        /// incremental, brute_force or trace
        #[arg(short, long, default_value = "incremental")]
        algorithm: Algorithm,
        /// Tree adjacency: 4 or 8 (default 8 for trace, 4 otherwise)
        #[arg(long)]
        tree: Option<Connectivity>,
        #[arg(long, default_value = "4")]
        contour: Connectivity,
        /// Render the traced node under the image center (trace only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print tree shape and contour size statistics
    TreeData {
        /// Grayscale input image (a built-in 7x7 example when omitted)
        #[arg(short, long)]
        image: Option<PathBuf>,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Paint the contours and regions of selected nodes
    Paint {
        /// TOML or JSON configuration; flags override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output path, written as <name>-contour and <name>-node
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Filter out nodes with this area or less
        #[arg(short, long)]
        area: Option<u32>,
        /// Pixel selecting a node, as X,Y (repeatable)
        #[arg(short, long = "point", value_parser = parse_point)]
        points: Vec<Point>,
        #[arg(long)]
        tree: Option<Connectivity>,
        #[arg(long)]
        contour: Option<Connectivity>,
        /// Also write the first node's contour in red over the input
        #[arg(long)]
        highlight: bool,
    },
    /// Time every algorithm and verify the incremental result
    Bench {
        #[arg(short, long)]
        image: PathBuf,
        #[arg(long, default_value = "8")]
        tree: Connectivity,
        #[arg(long, default_value = "4")]
        contour: Connectivity,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { image, tree, contour, mode } => check(image.as_deref(), tree, contour, mode)?,
        Commands::Perf { image, algorithm, tree, contour, output } => {
            let tree = tree.unwrap_or_else(|| algorithm.default_tree_connectivity());
            perf(&image, algorithm, tree, contour, output.as_deref())?
        }
        Commands::TreeData { image, json } => tree_data(image.as_deref(), json)?,
        Commands::Paint {
            config,
            input,
            output,
            area,
            points,
            tree,
            contour,
            highlight,
        } => {
            let mut paint_config = match config {
                Some(path) => PaintConfig::from_file(path)?,
                None => PaintConfig::default(),
            };
            paint_config.input = input.or(paint_config.input);
            paint_config.output = output.or(paint_config.output);
            paint_config.area = area.or(paint_config.area);
            if !points.is_empty() {
                paint_config.points = points;
            }
            paint_config.tree = tree.unwrap_or(paint_config.tree);
            paint_config.contour = contour.unwrap_or(paint_config.contour);
            paint_config.highlight |= highlight;
            paint(&paint_config)?
        }
        Commands::Bench { image, tree, contour } => bench(&image, tree, contour)?,
    }

    Ok(())
}

fn load_or_default(image: Option<&Path>, default: fn() -> (Domain, Vec<u8>)) -> Result<(Domain, Vec<u8>)> {
    match image {
        Some(path) => Ok(load_gray(path)?),
        None => Ok(default()),
    }
}

fn check(image: Option<&Path>, tree: Connectivity, contour: Connectivity, mode: BruteForceMode) -> Result<()> {
    let (domain, f) = load_or_default(image, io::disk_image)?;
    let analysis = AnalysisBuilder::new()
        .tree_connectivity(tree)
        .contour_connectivity(contour)
        .mode(mode)
        .build(domain, f)?;

    let report = analysis.verify()?;
    match image {
        Some(path) => println!("{report} for {} and tree-{tree} contour-{contour}.", path.display()),
        None => println!("{report}."),
    }
    Ok(())
}

fn perf(
    image: &Path,
    algorithm: Algorithm,
    tree: Connectivity,
    contour: Connectivity,
    output: Option<&Path>,
) -> Result<()> {
    let (domain, f) = load_gray(image)?;
    let analysis = AnalysisBuilder::new()
        .tree_connectivity(tree)
        .contour_connectivity(contour)
        .build(domain, f)?;
    info!("{}", analysis.info());

    let (extraction, timing) = analysis.run(algorithm)?;
    println!("time elapsed: {}", timing.millis());

    if let Some(output) = output {
        match extraction {
            Extraction::Traced(traced) => {
                let center = Point::new(domain.width() as i32 / 2, domain.height() as i32 / 2);
                let node = analysis.node_at(center)?;
                let rendered = render::render_traced_node(analysis.tree(), node, &traced[node]);
                save_gray(output, &domain, &rendered)?;
                info!(node, path = %output.display(), "rendered traced node");
            }
            Extraction::Sets(_) => warn!(%algorithm, "--output only applies to the trace algorithm"),
        }
    }
    Ok(())
}

fn tree_data(image: Option<&Path>, json: bool) -> Result<()> {
    let analysis = match image {
        Some(path) => {
            let (domain, f) = load_gray(path)?;
            AnalysisBuilder::new().build(domain, f)?
        }
        None => {
            let (domain, f) = io::two_level_image();
            println!("{}", format_image(&f, &domain));
            let analysis = AnalysisBuilder::new().build(domain, f)?;
            print_nodes(&analysis)?;
            analysis
        }
    };

    let stats = analysis.stats()?;
    if json {
        println!("{}", stats.to_json()?);
    } else {
        println!("{stats}");
    }
    Ok(())
}

fn print_nodes(analysis: &Analysis<u8>) -> Result<()> {
    let contours = analysis.contours()?;
    let domain = analysis.domain();
    analysis.tree().traverse(|node| {
        let contour = &contours[node.id()];
        println!("node.id= {}", node.id());
        println!("nchildren= {}", node.children().len());
        println!("ncontour= {}", contour.len());
        println!("{}", format_mask(&contour_mask(contour, domain), domain));
    });
    Ok(())
}

fn paint(config: &PaintConfig) -> Result<()> {
    let output = config.output()?;
    let (domain, f) = load_gray(config.input()?)?;

    let mut builder = AnalysisBuilder::new()
        .tree_connectivity(config.tree)
        .contour_connectivity(config.contour);
    if let Some(area) = config.area {
        builder = builder.area_threshold(area);
    }
    let analysis = builder.build(domain, f.clone())?;
    let contours = analysis.contours()?;

    let selected = config
        .points
        .iter()
        .map(|&p| analysis.node_at(p))
        .collect::<contours::Result<Vec<_>>>()?;

    let painted = render::paint_nodes(
        analysis.image(),
        analysis.tree(),
        &contours,
        &selected,
        config.saturation,
        config.value,
    );
    save_rgb(with_suffix(output, "-contour"), &domain, &painted.contour)?;
    save_rgb(with_suffix(output, "-node"), &domain, &painted.node)?;

    if config.highlight {
        match selected.first() {
            Some(&id) => {
                let highlighted = render::highlight_contour(&f, &contours[id], Color::RED);
                save_rgb(with_suffix(output, "-highlight"), &domain, &highlighted)?;
            }
            None => warn!("--highlight needs at least one --point"),
        }
    }

    println!(
        "number of nodes: {}, number of displayed nodes: {}",
        analysis.tree().num_nodes(),
        selected.len()
    );
    Ok(())
}

fn bench(image: &Path, tree: Connectivity, contour: Connectivity) -> Result<()> {
    let (domain, f) = load_gray(image)?;
    let analysis = AnalysisBuilder::new()
        .tree_connectivity(tree)
        .contour_connectivity(contour)
        .build(domain, f)?;
    info!("{}", analysis.info());

    for timing in analysis.benchmark()? {
        println!("{timing}");
    }

    let report = analysis.verify()?;
    println!("{report}");
    Ok(())
}
