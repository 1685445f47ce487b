//! The `render` command: build a rack, resolve it and export the scene

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use bracket_core::{AnchorGraph, Rack, RenderSettings};
use tracing::{debug, info};

use crate::FrontendError;
use crate::config::AppConfig;
use crate::scene::RonSceneWriter;

/// Options of a single render run
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCommand {
    /// Use finer tessellation settings
    pub production: bool,
    /// Number of rack segments
    pub units: u8,
    /// Output file; `-` writes to stdout
    pub output: PathBuf,
}

impl Default for RenderCommand {
    fn default() -> Self {
        Self {
            production: false,
            units: 3,
            output: PathBuf::from("-"),
        }
    }
}

impl RenderCommand {
    /// Settings actually used for this run
    pub fn settings(&self, config: &AppConfig) -> RenderSettings {
        if self.production {
            RenderSettings::production()
        } else {
            config.render
        }
    }

    /// Build, resolve and write the scene to the configured output
    pub fn run(&self, config: &AppConfig) -> Result<(), FrontendError> {
        debug!("Starting to render {:?}", self.output);
        let started = Instant::now();

        let graph = self.build(config)?;
        self.publish(&graph, config)?;

        debug!("Done rendering in {:?}", started.elapsed());
        Ok(())
    }

    /// Build the rack and resolve it from its foot
    pub fn build(&self, config: &AppConfig) -> Result<AnchorGraph, FrontendError> {
        let mut graph = AnchorGraph::new();
        let rack = Rack::build(&mut graph, self.units)?;
        if let Some(root) = rack.root() {
            graph.resolve(root, &config.resolve)?;
        }
        info!("Rendering {} solids", graph.len());
        Ok(graph)
    }

    /// Write the scene of a resolved `graph` to `writer`
    pub fn write_scene<W: Write>(
        &self,
        graph: &AnchorGraph,
        config: &AppConfig,
        writer: W,
    ) -> Result<(), FrontendError> {
        let mut renderer = RonSceneWriter::new(writer).with_origin(Rack::scene_origin());
        graph.render_with(&mut renderer, &self.settings(config))
    }

    /// Build, resolve and write the scene to `writer`
    pub fn render_to<W: Write>(&self, config: &AppConfig, writer: W) -> Result<(), FrontendError> {
        let graph = self.build(config)?;
        self.write_scene(&graph, config, writer)
    }

    /// Render into memory, then open the output and write the finished scene
    fn publish(&self, graph: &AnchorGraph, config: &AppConfig) -> Result<(), FrontendError> {
        let mut scene = Vec::new();
        self.write_scene(graph, config, &mut scene)?;

        let mut output = self.open_output()?;
        output.write_all(&scene)?;
        output.flush()?;
        Ok(())
    }

    fn open_output(&self) -> Result<Box<dyn Write>, FrontendError> {
        if self.output == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout().lock())));
        }
        let file = File::create(&self.output)?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
