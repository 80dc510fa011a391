use rectify::core::dna::HelixSpec;
use rectify::core::physics::relaxation::RelaxationParams;
use rectify::engine::config::RelaxationConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub trace_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub helix_spec: HelixSpec,
    pub physics: RelaxationParams,
    pub core_config: RelaxationConfig,
}
