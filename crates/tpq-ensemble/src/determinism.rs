use tpq_core::derive_substream_seed;

/// Derives the deterministic seed used for a specific bootstrap replica.
pub fn replica_seed(master_seed: u64, replica_index: usize) -> u64 {
    derive_substream_seed(master_seed, replica_index as u64)
}

/// Derives the deterministic seed for one sector's draw within a replica.
///
/// Every (replica, sector) pair runs on its own substream, so a draw does not
/// depend on how many values earlier draws consumed.
pub fn draw_seed(master_seed: u64, replica_index: usize, sector_index: usize) -> u64 {
    derive_substream_seed(replica_seed(master_seed, replica_index), sector_index as u64)
}
