pub mod algorithms;
pub mod error;

pub use algorithms::elbow::{select_k, KSelection};
pub use algorithms::kmeans::{KMeansConfig, KMeansFit};
pub use algorithms::mds::{MdsConfig, MdsEmbedding};
pub use algorithms::pca::Pca;
pub use error::AnalyticsError;
