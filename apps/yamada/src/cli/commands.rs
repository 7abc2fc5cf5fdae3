//! # CLI Command Implementations
//!
//! Each `cmd_*` function loads its inputs, runs the engine and returns a
//! report. Reports render as text through `Display` or as JSON through
//! serde; printing is left to the caller.

use crate::config::{Config, StrategyName};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use yamada_core::primitives::DEFAULT_MAX_FLIPS;
use yamada_core::{
    BuildOptions, Classifier, DiagramRecord, EnumerationOptions, HPolyCache, Label, Result,
    SpatialGraphDiagram, YamadaError, crossing_assignments, crossing_change_distance,
    from_pd_code, has_r1, has_r2, has_r3, has_r6, parse_pd_code, read_planar_code,
    reidemeister_simplify_with,
};

// =============================================================================
// FILE HANDLING
// =============================================================================

/// Maximum size of a diagram file (16 MB).
const MAX_DIAGRAM_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum size of a planar_code stream (512 MB).
const MAX_PLANAR_CODE_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// How a diagram file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Interchange record (`vertices`, `edges`, `crossings`, `connections`).
    Json,
    /// Planar diagram code, e.g. `[[1,5,2,4],[3,1,4,6],[5,3,6,2]]`.
    Pd,
}

impl InputFormat {
    /// `.pd` files are PD codes; everything else is read as JSON.
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("pd") => Self::Pd,
            _ => Self::Json,
        }
    }
}

fn validate_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        YamadaError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(YamadaError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }
    if metadata.len() > max_size {
        return Err(YamadaError::InvalidInput(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Load a diagram, reporting any repairs as warnings.
pub fn load_diagram(path: &Path, format: Option<InputFormat>) -> Result<SpatialGraphDiagram> {
    validate_file_size(path, MAX_DIAGRAM_FILE_SIZE)?;
    let text = std::fs::read_to_string(path).map_err(|e| {
        YamadaError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    let diagram = match format.unwrap_or_else(|| InputFormat::detect(path)) {
        InputFormat::Json => {
            let record: DiagramRecord = serde_json::from_str(&text).map_err(|e| {
                YamadaError::InvalidInput(format!("Invalid diagram record: {e}"))
            })?;
            SpatialGraphDiagram::from_record(&record, BuildOptions::default())?
        }
        InputFormat::Pd => from_pd_code(&parse_pd_code(&text)?)?,
    };
    for warning in diagram.warnings() {
        tracing::warn!(file = %path.display(), "{}", warning);
    }
    tracing::debug!(
        file = %path.display(),
        elements = diagram.len(),
        crossings = diagram.crossing_count(),
        "diagram loaded"
    );
    Ok(diagram)
}

/// Write a diagram as a pretty-printed interchange record.
pub fn write_record(path: &Path, diagram: &SpatialGraphDiagram) -> Result<()> {
    let text = serde_json::to_string_pretty(&diagram.to_record())
        .map_err(|e| YamadaError::InvalidInput(format!("Cannot encode record: {e}")))?;
    std::fs::write(path, text).map_err(|e| {
        YamadaError::IoError(format!("Cannot write '{}': {}", path.display(), e))
    })
}

fn label_pairs(pairs: &[(Label, Label)]) -> Vec<[String; 2]> {
    pairs
        .iter()
        .map(|(a, b)| [a.to_string(), b.to_string()])
        .collect()
}

// =============================================================================
// POLY COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolyReport {
    pub normalized: bool,
    pub crossings: usize,
    pub polynomial: String,
}

impl fmt::Display for PolyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.polynomial)
    }
}

/// Yamada polynomial of a diagram file, normalized unless `raw`.
pub fn cmd_poly(path: &Path, format: Option<InputFormat>, raw: bool) -> Result<PolyReport> {
    let diagram = load_diagram(path, format)?;
    let mut cache = HPolyCache::new();
    let poly = if raw {
        diagram.yamada_polynomial_with_cache(&mut cache)?
    } else {
        diagram.normalized_yamada_polynomial_with_cache(&mut cache)?
    };
    tracing::debug!(
        entries = cache.len(),
        hits = cache.hits(),
        misses = cache.misses(),
        "h-poly cache"
    );
    Ok(PolyReport {
        normalized: !raw,
        crossings: diagram.crossing_count(),
        polynomial: poly.to_string(),
    })
}

// =============================================================================
// SIMPLIFY COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifyReport {
    pub crossings_before: usize,
    pub crossings_after: usize,
    pub r1: usize,
    pub r2: usize,
    pub r3: usize,
    pub output: Option<PathBuf>,
}

impl fmt::Display for SimplifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Moves:     R1={} R2={} R3={}", self.r1, self.r2, self.r3)?;
        write!(
            f,
            "Crossings: {} -> {}",
            self.crossings_before, self.crossings_after
        )?;
        if let Some(output) = &self.output {
            write!(f, "\nWritten:   {}", output.display())?;
        }
        Ok(())
    }
}

/// Run the simplification driver, optionally saving the result.
pub fn cmd_simplify(
    config: &Config,
    path: &Path,
    format: Option<InputFormat>,
    tries: Option<usize>,
    strategy: Option<StrategyName>,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<SimplifyReport> {
    let diagram = load_diagram(path, format)?;
    let options = config.simplify_options(tries, strategy, seed);
    tracing::debug!(?options, "simplifying");
    let outcome = reidemeister_simplify_with(&diagram, &options)?;
    tracing::info!(
        r1 = outcome.r1,
        r2 = outcome.r2,
        r3 = outcome.r3,
        crossings = outcome.diagram.crossing_count(),
        "simplification finished"
    );
    if let Some(output) = output {
        write_record(output, &outcome.diagram)?;
    }
    Ok(SimplifyReport {
        crossings_before: diagram.crossing_count(),
        crossings_after: outcome.diagram.crossing_count(),
        r1: outcome.r1,
        r2: outcome.r2,
        r3: outcome.r3,
        output: output.map(Path::to_path_buf),
    })
}

// =============================================================================
// INFO COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoReport {
    pub vertices: usize,
    pub edges: usize,
    pub crossings: usize,
    pub faces: usize,
    pub planar: bool,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub r1: Vec<String>,
    pub r2: Vec<[String; 2]>,
    pub r3: usize,
    pub r6: Vec<[String; 2]>,
    pub warnings: Vec<String>,
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = |list: &[[String; 2]]| {
            list.iter()
                .map(|[a, b]| format!("{a}-{b}"))
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(f, "Spatial Graph Diagram")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Vertices:   {}", self.vertices)?;
        writeln!(f, "Edges:      {}", self.edges)?;
        writeln!(f, "Crossings:  {}", self.crossings)?;
        writeln!(f, "Faces:      {}", self.faces)?;
        writeln!(f, "Planar:     {}", self.planar)?;
        writeln!(
            f,
            "Graph:      {} nodes, {} edges",
            self.graph_nodes, self.graph_edges
        )?;
        writeln!(f)?;
        writeln!(f, "R1: {}", self.r1.join(" "))?;
        writeln!(f, "R2: {}", pairs(&self.r2))?;
        writeln!(f, "R3: {} candidate(s)", self.r3)?;
        write!(f, "R6: {}", pairs(&self.r6))
    }
}

/// Structure and move candidates of a diagram file.
pub fn cmd_info(path: &Path, format: Option<InputFormat>) -> Result<InfoReport> {
    let diagram = load_diagram(path, format)?;
    let graph = diagram.underlying_graph()?;
    Ok(InfoReport {
        vertices: diagram.vertices().count(),
        edges: diagram.edges().count(),
        crossings: diagram.crossing_count(),
        faces: diagram.faces()?.len(),
        planar: diagram.is_planar()?,
        graph_nodes: graph.node_count(),
        graph_edges: graph.edge_count(),
        r1: has_r1(&diagram)?.iter().map(ToString::to_string).collect(),
        r2: label_pairs(&has_r2(&diagram)?),
        r3: has_r3(&diagram)?.len(),
        r6: label_pairs(&has_r6(&diagram)?),
        warnings: diagram.warnings().iter().map(ToString::to_string).collect(),
    })
}

// =============================================================================
// ENUMERATE COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    pub polynomial: String,
    pub representative: DiagramRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumerateReport {
    /// Maps decoded from the stream.
    pub maps: usize,
    /// Maps skipped before assignment (wrong crossing count or unusable).
    pub skipped_maps: usize,
    pub examined: usize,
    pub accepted: usize,
    pub rejected: BTreeMap<String, usize>,
    pub classes: Vec<ClassSummary>,
}

impl fmt::Display for EnumerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Maps: {} ({} skipped)  Candidates: {}  Accepted: {}",
            self.maps, self.skipped_maps, self.examined, self.accepted
        )?;
        for (reason, count) in &self.rejected {
            writeln!(f, "  rejected, {reason}: {count}")?;
        }
        write!(f, "Classes: {}", self.classes.len())?;
        for class in &self.classes {
            write!(f, "\n  {}", class.polynomial)?;
        }
        Ok(())
    }
}

/// Enumeration inputs gathered from the command line.
#[derive(Debug, Clone)]
pub struct EnumerateArgs {
    pub planar_code: PathBuf,
    pub graph: PathBuf,
    pub graph_format: Option<InputFormat>,
    pub crossings: usize,
    pub reject_r6: Option<bool>,
    pub mirror_symmetric: Option<bool>,
}

/// Classify every assignment of every shadow in a planar_code stream.
pub fn cmd_enumerate(config: &Config, args: &EnumerateArgs) -> Result<EnumerateReport> {
    let target = load_diagram(&args.graph, args.graph_format)?.underlying_graph()?;
    let (reject_r6, mirror_symmetric) =
        config.enumerate_flags(args.reject_r6, args.mirror_symmetric);

    validate_file_size(&args.planar_code, MAX_PLANAR_CODE_FILE_SIZE)?;
    let bytes = std::fs::read(&args.planar_code).map_err(|e| {
        YamadaError::IoError(format!(
            "Cannot read '{}': {}",
            args.planar_code.display(),
            e
        ))
    })?;
    let maps = read_planar_code(&bytes)?;
    tracing::info!(maps = maps.len(), crossings = args.crossings, "enumerating");

    let mut classifier = Classifier::new(
        target,
        EnumerationOptions {
            crossings: args.crossings,
            reject_r6,
        },
    );
    let mut skipped_maps = 0;
    for (index, map) in maps.iter().enumerate() {
        let shadow = match map.to_shadow() {
            Ok(shadow) => shadow,
            Err(e) => {
                tracing::warn!(map = index, "skipping map: {}", e);
                skipped_maps += 1;
                continue;
            }
        };
        if shadow.crossing_count() != args.crossings {
            tracing::debug!(map = index, crossings = shadow.crossing_count(), "wrong size");
            skipped_maps += 1;
            continue;
        }
        for candidate in crossing_assignments(&shadow, mirror_symmetric)? {
            classifier.examine(candidate?)?;
        }
    }
    tracing::debug!(
        entries = classifier.cache().len(),
        hits = classifier.cache().hits(),
        "h-poly cache"
    );

    let report = classifier.finish();
    Ok(EnumerateReport {
        maps: maps.len(),
        skipped_maps,
        examined: report.examined,
        accepted: report.accepted,
        rejected: report
            .rejected
            .iter()
            .map(|(reason, count)| (reason.to_string(), *count))
            .collect(),
        classes: report
            .classes
            .iter()
            .map(|(poly, diagram)| ClassSummary {
                polynomial: poly.to_string(),
                representative: diagram.to_record(),
            })
            .collect(),
    })
}

// =============================================================================
// DISTANCE COMMAND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceReport {
    pub max_flips: usize,
    /// `None` when no subset within `max_flips` reaches the target.
    pub distance: Option<usize>,
    pub flips: Vec<String>,
}

impl fmt::Display for DistanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distance {
            Some(d) => write!(f, "Distance: {} ({})", d, self.flips.join(" ")),
            None => write!(f, "Distance: more than {}", self.max_flips),
        }
    }
}

/// Fewest crossing changes taking `path` to the polynomial of `target`.
pub fn cmd_distance(
    path: &Path,
    format: Option<InputFormat>,
    target: &Path,
    max_flips: Option<usize>,
) -> Result<DistanceReport> {
    let diagram = load_diagram(path, format)?;
    let target = load_diagram(target, None)?;
    let max_flips = max_flips.unwrap_or(DEFAULT_MAX_FLIPS);
    let found = crossing_change_distance(&diagram, &target, max_flips)?;
    Ok(match found {
        Some(result) => DistanceReport {
            max_flips,
            distance: Some(result.distance()),
            flips: result.flips.iter().map(ToString::to_string).collect(),
        },
        None => DistanceReport {
            max_flips,
            distance: None,
            flips: Vec::new(),
        },
    })
}
