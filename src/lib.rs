pub mod encoder;
pub mod error;
pub mod index;
pub mod loader;
pub mod metrics;
pub mod params;
pub mod recommender;
pub mod types;

pub use encoder::{ColumnEncoder, EncodingTable};
pub use error::{Error, Result};
pub use index::NeighborIndex;
pub use loader::{load_path, load_reader, LoadReport, RowRejection};
pub use params::{Params, TOP_K};
pub use recommender::Recommender;
pub use types::{Column, DestinationRecord, FeatureVector, Match, Neighbor, Preferences, Recommendation};
