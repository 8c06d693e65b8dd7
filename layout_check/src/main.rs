//! Layout collision checker
//!
//! Loads a saved room layout, registers every item with the collision
//! engine, and prints the same report the editor shows before saving.
//! With `--resolve`, colliding items are moved to the nearest clear spot
//! the ring search finds.
//!
//! Exits with 0 when the layout is clear, 1 when collisions remain, and 2 on
//! usage or load errors.

use std::path::PathBuf;
use std::process::ExitCode;

use placement_engine::foundation::logging;
use placement_engine::prelude::*;

const USAGE: &str = "\
usage: layout_check <layout.toml|layout.ron> [options]

options:
    --config <path>   placement settings (.toml or .ron); defaults to
                      placement.toml beside the layout, if present
    --resolve         move colliding items to nearby clear spots
    --output <path>   write the (possibly resolved) layout here";

/// Settings file looked up beside the layout when `--config` is not given
const DEFAULT_SETTINGS: &str = "placement.toml";

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("invalid placement settings: {0}")]
    Settings(#[source] ConfigError),

    #[error("invalid room boundary: {0}")]
    Room(#[from] RoomBoundaryError),

    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

#[derive(Debug, Default)]
struct Options {
    layout: PathBuf,
    config: Option<PathBuf>,
    resolve: bool,
    output: Option<PathBuf>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        let mut layout = None;
        let mut options = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--resolve" => options.resolve = true,
                "--config" => options.config = Some(Self::value_for(&arg, args.next())?),
                "--output" => options.output = Some(Self::value_for(&arg, args.next())?),
                flag if flag.starts_with("--") => {
                    return Err(AppError::Usage(format!("unknown option `{flag}`")));
                }
                _ if layout.is_none() => layout = Some(PathBuf::from(arg)),
                _ => return Err(AppError::Usage(format!("unexpected argument `{arg}`"))),
            }
        }

        options.layout = layout.ok_or_else(|| AppError::Usage("missing layout file".to_string()))?;
        Ok(options)
    }

    fn value_for(flag: &str, value: Option<String>) -> Result<PathBuf, AppError> {
        value
            .map(PathBuf::from)
            .ok_or_else(|| AppError::Usage(format!("`{flag}` needs a path")))
    }
}

fn load_settings(options: &Options) -> Result<PlacementConfig, AppError> {
    let config = match &options.config {
        Some(path) => PlacementConfig::load_from_file(path).map_err(|source| AppError::Load {
            path: path.clone(),
            source,
        })?,
        None => {
            let path = options.layout.with_file_name(DEFAULT_SETTINGS);
            PlacementConfig::load_or_default(&path).map_err(|source| AppError::Load { path, source })?
        }
    };
    config.validate().map_err(AppError::Settings)?;
    Ok(config)
}

fn collect_report(detector: &CollisionDetector, layout: &SceneLayout) -> CollisionReport {
    CollisionReport::collect(
        detector,
        layout.items.iter().map(|item| (item.id.as_str(), item.name.as_str())),
    )
}

/// Move every item named in `report` to a clear spot near where it stands
///
/// Returns how many items actually moved.
fn relocate(
    detector: &mut CollisionDetector,
    layout: &mut SceneLayout,
    nodes: &mut [SceneNode],
    report: &CollisionReport,
) -> usize {
    let attempts = detector.config().search.attempts;
    let mut moved = 0;

    for warning in &report.warnings {
        let id = warning.id.as_str();
        let Some(index) = layout.items.iter().position(|item| item.id == id) else {
            continue;
        };
        let node = &mut nodes[index];
        let current = node.position();

        match detector.find_valid_position(id, current, &*node, attempts) {
            Some(position) if position == current => {
                log::debug!("'{}' is clear now that its neighbours moved", warning.name);
            }
            Some(position) => {
                node.set_position(position);
                detector.update_box(id, &*node);
                layout.items[index].position = position;
                moved += 1;
                log::info!("Moved '{}' from {:?} to {:?}", warning.name, current, position);
            }
            None => {
                log::warn!("No clear spot near '{}', leaving it in place", warning.name);
            }
        }
    }
    moved
}

fn resolve_summary(moved: usize, remaining: &CollisionReport) -> String {
    format!("{moved} moved, {} still colliding", remaining.len())
}

fn run(options: &Options) -> Result<bool, AppError> {
    let config = load_settings(options)?;
    logging::init_with_filter(&config.logging.level);

    let mut layout = SceneLayout::load_from_file(&options.layout).map_err(|source| AppError::Load {
        path: options.layout.clone(),
        source,
    })?;
    log::info!("Loaded {} item(s) from {}", layout.items.len(), options.layout.display());

    let mut detector = CollisionDetector::with_config(config.collision.clone());
    if config.debug.show_bounds {
        detector.set_observer(Box::new(BoundsDebugVisualizer::new()));
    }
    match &layout.room {
        Some(room) => detector.set_boundary_from(room)?,
        None => log::warn!("Layout has no room boundary, only furniture overlaps are checked"),
    }

    let mut nodes: Vec<SceneNode> = layout.items.iter().map(LayoutItem::to_node).collect();
    for (item, node) in layout.items.iter().zip(&nodes) {
        detector.update_box(item.id.as_str(), node);
    }

    let mut report = collect_report(&detector, &layout);
    println!("{}", report.summary());
    if !report.is_clear() {
        println!("{report}");
    }

    if options.resolve && !report.is_clear() {
        let moved = relocate(&mut detector, &mut layout, &mut nodes, &report);
        report = collect_report(&detector, &layout);
        println!("{}", resolve_summary(moved, &report));
        if !report.is_clear() {
            println!("{report}");
        }
    }

    if let Some(visualizer) = detector.observer::<BoundsDebugVisualizer>() {
        log::info!("{} debug box(es) mirrored", visualizer.debug_draw().shape_count());
    }

    if let Some(output) = &options.output {
        layout.save_to_file(output).map_err(|source| AppError::Save {
            path: output.clone(),
            source,
        })?;
        log::info!("Saved layout to {}", output.display());
    }

    Ok(report.is_clear())
}

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>().into_iter()
    }

    fn layout(toml: &str) -> SceneLayout {
        SceneLayout::from_str_as(toml, placement_engine::config::ConfigFormat::Toml).unwrap()
    }

    fn register(detector: &mut CollisionDetector, layout: &SceneLayout) -> Vec<SceneNode> {
        let nodes: Vec<SceneNode> = layout.items.iter().map(LayoutItem::to_node).collect();
        for (item, node) in layout.items.iter().zip(&nodes) {
            detector.update_box(item.id.as_str(), node);
        }
        nodes
    }

    const CROWDED: &str = r#"
        [room]
        min_x = 0.0
        max_x = 10.0
        min_y = 0.0
        max_y = 3.0
        min_z = 0.0
        max_z = 10.0

        [[items]]
        id = "post"
        name = "Post"
        position = [5.0, 0.0, 5.0]
        size = [0.2, 2.0, 0.2]

        [[items]]
        id = "stool"
        name = "Stool"
        position = [5.0, 0.0, 5.0]
        size = [0.2, 0.5, 0.2]
    "#;

    #[test]
    fn test_parse_options() {
        let options = Options::parse(args(&["room.toml", "--resolve", "--output", "out.ron"])).unwrap();
        assert_eq!(options.layout, PathBuf::from("room.toml"));
        assert!(options.resolve);
        assert_eq!(options.output, Some(PathBuf::from("out.ron")));
        assert!(options.config.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(matches!(Options::parse(args(&[])), Err(AppError::Usage(_))));
        assert!(matches!(Options::parse(args(&["a.toml", "--config"])), Err(AppError::Usage(_))));
        assert!(matches!(Options::parse(args(&["a.toml", "--fast"])), Err(AppError::Usage(_))));
        assert!(matches!(Options::parse(args(&["a.toml", "b.toml"])), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_sample_layout_report() {
        let layout = layout(include_str!("../layouts/living_room.toml"));
        let mut detector = CollisionDetector::new();
        detector.set_boundary_from(layout.room.as_ref().unwrap()).unwrap();
        register(&mut detector, &layout);

        let report = collect_report(&detector, &layout);
        assert_eq!(report.summary(), "Found 3 collision(s)");
        assert_eq!(
            report.to_string(),
            "Coffee Table is colliding with: armchair-2\n\
             Armchair is colliding with: coffee-table-1\n\
             Bookshelf is colliding with: room"
        );
    }

    #[test]
    fn test_relocate_clears_stacked_items() {
        let mut layout = layout(CROWDED);
        let mut detector = CollisionDetector::new();
        detector.set_boundary_from(layout.room.as_ref().unwrap()).unwrap();
        let mut nodes = register(&mut detector, &layout);

        let report = collect_report(&detector, &layout);
        assert_eq!(report.len(), 2);

        // The post moves first, which already frees the stool
        let moved = relocate(&mut detector, &mut layout, &mut nodes, &report);
        assert_eq!(moved, 1);
        assert_eq!(layout.items[0].position, Vec3::new(5.5, 0.0, 5.0));
        assert_eq!(layout.items[1].position, Vec3::new(5.0, 0.0, 5.0));
        let remaining = collect_report(&detector, &layout);
        assert!(remaining.is_clear());
        assert_eq!(resolve_summary(moved, &remaining), "1 moved, 0 still colliding");
    }

    #[test]
    fn test_resolve_summary_counts_items_left_colliding() {
        let layout = layout(include_str!("../layouts/living_room.toml"));
        let mut detector = CollisionDetector::new();
        detector.set_boundary_from(layout.room.as_ref().unwrap()).unwrap();
        register(&mut detector, &layout);

        let report = collect_report(&detector, &layout);
        assert_eq!(resolve_summary(0, &report), "0 moved, 3 still colliding");
    }

    #[test]
    fn test_settings_default_to_file_beside_layout() {
        let dir = std::env::temp_dir().join(format!("layout_check-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let _ = std::fs::remove_file(dir.join(DEFAULT_SETTINGS));
        let options = Options {
            layout: dir.join("room.toml"),
            ..Options::default()
        };

        // Nothing beside the layout yet
        let config = load_settings(&options).unwrap();
        assert_eq!(config.collision.search.attempts, 8);

        std::fs::write(dir.join(DEFAULT_SETTINGS), "[collision.search]\nradius = 1.0\nattempts = 3\n").unwrap();
        let config = load_settings(&options).unwrap();
        assert_eq!(config.collision.search.attempts, 3);

        std::fs::write(dir.join(DEFAULT_SETTINGS), "[collision.search]\nradius = 1.0\nattempts = 0\n").unwrap();
        assert!(matches!(load_settings(&options), Err(AppError::Settings(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
