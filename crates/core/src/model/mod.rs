mod choices;
mod problem;
mod record;
mod settings;

pub use choices::{ChoiceError, ChoiceSet};
pub use problem::{Difficulty, FactorRange, Problem, ProblemError};
pub use record::{GlobalProgress, RecordError, RoundRecord};
pub use settings::{RoundSettings, SettingsError};
