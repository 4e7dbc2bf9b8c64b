pub mod effects;
pub mod labels;
pub mod markers;
pub mod regions;
pub mod symbology;

pub use effects::*;
pub use labels::*;
pub use markers::*;
pub use regions::*;
pub use symbology::*;
