mod catalog;
mod group;
mod ids;
mod track;

pub use catalog::{Catalog, CatalogSection};
pub use group::Group;
pub use ids::TrackId;
pub use track::Track;
