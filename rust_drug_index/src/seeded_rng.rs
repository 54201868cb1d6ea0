use blake2::{Blake2b512, Digest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Make a random number generator for one column of
/// synthetic orders.
///
/// Every column (drug names, orderers, dates, ...) gets its
/// own generator, derived from one global seed and the column
/// id, so adding a new column does not change the values drawn
/// for the existing ones.
///
/// The column id and global seed are concatenated and hashed;
/// the first 32 bytes of the hash seed the generator.
///
pub fn make_rng(global_seed: u64, column_id: &str) -> ChaCha8Rng {
    let message = format!("{column_id}{global_seed}");
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    ChaCha8Rng::from_seed(seed)
}
