pub mod contents;
pub mod diplomacy;
pub mod error;
pub mod id;
pub mod race;
pub mod random;
pub mod scenario;
pub mod serializer;
pub mod settings;
pub mod template;
pub mod zone;

pub use contents::{MapTemplateContents, MapTemplateScenarioVariables, ScenarioVariable};
pub use diplomacy::{MapTemplateDiplomacy, Relation};
pub use error::{Result, TemplateError};
pub use id::MidgardId;
pub use race::RaceType;
pub use random::{RandomGenerator, SeededRandom};
pub use scenario::ScenarioVariables;
pub use serializer::{Record, RecordWriter, Serializer};
pub use settings::{MapTemplateSettings, TemplateCustomParameter};
pub use template::MapTemplate;
