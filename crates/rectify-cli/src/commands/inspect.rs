use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use rectify::core::dna::HelixSpec;
use rectify::core::io::{scene::SceneFormat, traits::SceneFile};
use rectify::core::models::topology::Topology;
use rectify::core::physics::relaxation::RelaxationWorld;
use rectify::engine::error::EngineError;
use tracing::info;

pub async fn run(args: InspectArgs) -> Result<()> {
    let spec = match &args.helix_params {
        Some(path) => HelixSpec::load(path).map_err(|e| CliError::file(path, e))?,
        None => HelixSpec::default(),
    };

    info!("Loading scene from {:?}", &args.input);
    let (description, metadata) =
        SceneFormat::read_from_path(&args.input).map_err(|e| CliError::file(&args.input, e))?;

    let mut world = RelaxationWorld::default();
    let topology =
        Topology::from_description(&mut world, spec, &description).map_err(EngineError::from)?;

    for line in &metadata.header_lines {
        println!("# {}", line);
    }
    print!("{}", summarize(&topology, &world, args.helices));
    Ok(())
}

/// Human-readable report of a topology as built, before any settling. One line per entry, each
/// terminated by a newline.
pub(crate) fn summarize(topology: &Topology, world: &RelaxationWorld, list_helices: bool) -> String {
    let counts = topology.base_counts();
    let mut lines = vec![format!(
        "Vertices: {}, path entries: {} ({}), helices: {}",
        topology.vertices().len(),
        topology.path().len(),
        if topology.is_closed() { "closed" } else { "open" },
        topology.len()
    )];
    if let (Some(min), Some(max)) = (counts.iter().min(), counts.iter().max()) {
        let bases: u64 = counts.iter().map(|&c| u64::from(c)).sum();
        lines.push(format!("Bases: {} total, {} to {} per helix", bases, min, max));
    }
    lines.push(format!("Separation: {}", topology.separation_stats(world)));

    if list_helices {
        lines.extend(topology.helices().iter().map(|helix| {
            let partners: Vec<String> = helix
                .connections()
                .map(|(point, connection)| format!("{}→{}", point, connection.helix))
                .collect();
            format!(
                "  {:>4}  {:>4} bases  [{}]",
                helix.id(),
                helix.base_count(),
                partners.join(", ")
            )
        }));
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}
