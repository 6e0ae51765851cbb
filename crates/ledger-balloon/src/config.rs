/// Coordinator configuration that depends on the hasher's output length
/// rather than being hardcoded, since the hash algorithm is pluggable.
#[derive(Debug, Clone, Copy)]
pub struct BalloonConfig {
    /// Bit-width of the hyper tree; normally `8 * hasher.output_len()`.
    pub num_bits: u16,
    /// Hyper-tree subtrees at or above this height are cached; below it
    /// they're recomputed from the key-value store on every query.
    /// Defaults to half the tree's depth.
    pub cache_height: u16,
}

impl BalloonConfig {
    pub fn for_output_len(output_len: usize) -> Self {
        let num_bits = (output_len * 8) as u16;
        Self {
            num_bits,
            cache_height: num_bits / 2,
        }
    }

    pub fn with_cache_height(mut self, cache_height: u16) -> Self {
        self.cache_height = cache_height;
        self
    }
}
