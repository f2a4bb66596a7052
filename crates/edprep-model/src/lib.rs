pub mod classification;
pub mod config;
pub mod enums;
pub mod error;
pub mod table;

pub use classification::Classification;
pub use config::{DATA_DIR_ENV_VAR, PipelineConfig, ReferencePaths};
pub use enums::{CareUnitGroup, Gender, IcdVersion, RaceGroup, TopicLabel};
pub use error::{EdprepError, Result};
pub use table::TableKind;
