pub mod config;
pub mod events;
pub mod projection;
pub mod view;

pub use config::ViewConfig;
pub use events::InteractionEvent;
pub use view::MapView;

pub use formats::{RegionCollection, load_region_collection};
pub use layers::markers::{Poi, PoiStatus};
