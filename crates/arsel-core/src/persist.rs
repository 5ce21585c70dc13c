use std::path::Path;

use arsel_model::AliasPair;

/// Storage for the selected list as ordered raw/alias pairs.
///
/// The on-disk format belongs to the implementation. A load either returns
/// every pair or fails; the session never applies a partial result.
pub trait PairStore {
    fn load_pairs(&self, source: &Path) -> anyhow::Result<Vec<AliasPair>>;

    fn save_pairs(&self, destination: &Path, pairs: &[AliasPair]) -> anyhow::Result<()>;
}
