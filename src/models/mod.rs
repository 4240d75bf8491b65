mod id;
mod line;
mod section;
mod station;

pub use id::{LineId, StationId};
pub use line::Line;
pub use section::Section;
pub use station::{Station, StationRegistry};
