use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::scene::SceneError;
use crate::core::models::topology::TopologyError;
use crate::core::physics::PhysicsError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Physics collaborator failed: {source}")]
    Physics {
        #[from]
        source: PhysicsError,
    },

    #[error("Topology error: {source}")]
    Topology {
        #[from]
        source: TopologyError,
    },

    #[error("Scene error: {source}")]
    Scene {
        #[from]
        source: SceneError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::scene::SceneParseErrorKind;

    #[test]
    fn sources_convert_and_keep_their_message() {
        let err: EngineError = PhysicsError::Simulation("solver diverged".to_string()).into();
        assert!(matches!(err, EngineError::Physics { .. }));
        assert!(err.to_string().contains("solver diverged"));

        let err: EngineError = ConfigError::MissingParameter("strategy").into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Missing required parameter: strategy"
        );

        let err: EngineError = SceneError::Parse {
            line: 4,
            kind: SceneParseErrorKind::ZeroIndex,
        }
        .into();
        assert!(err.to_string().contains("line 4"));
    }
}
