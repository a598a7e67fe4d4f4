//! Pre-trained artifacts: classifier, numeric scaler and ability encoder

mod classifier;
mod encoder;
mod scaler;
mod store;

pub use classifier::LinearClassifier;
pub use encoder::MultiLabelEncoder;
pub use scaler::StandardScaler;
pub use store::{
    sha256_hex, ArtifactStore, Artifacts, CHECKSUM_EXTENSION, CLASSIFIER_FILE, ENCODER_FILE,
    SCALER_FILE,
};
