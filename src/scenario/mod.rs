pub mod variables;

pub use variables::ScenarioVariables;
