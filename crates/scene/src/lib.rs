pub mod index;
pub mod node;
pub mod picking;
pub mod selection;

pub use index::*;
pub use node::*;
pub use selection::*;
