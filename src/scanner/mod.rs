//! Entity scanning on top of the validated accessor

mod entities;
#[cfg(windows)]
mod sonar;

pub use self::entities::{read_entity, ready_state, scan_entities, Entity};
#[cfg(windows)]
pub use self::sonar::Sonar;
