mod app;
mod atlas;
mod engine;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON dataset to explore; the built-in mathematics graph is used when absent.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let graph = match &args.data {
        Some(path) => match atlas::load_dataset(path) {
            Ok(graph) => graph,
            Err(error) => {
                eprintln!("failed to load dataset: {error:#}");
                std::process::exit(1);
            }
        },
        None => atlas::builtin_graph(),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "math-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(app::AtlasApp::new(cc, graph)))),
    )
}
