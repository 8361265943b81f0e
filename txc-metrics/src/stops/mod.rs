mod area_code;
mod stop_coordinate;
mod stop_index;

pub use area_code::{normalize_local_authority_code, normalize_region_code};
pub use stop_coordinate::StopCoordinate;
pub use stop_index::StopIndex;
