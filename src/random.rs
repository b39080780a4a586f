use rand::Rng;

/// Bounded random draw with the firmware RNG's contract: uniform in
/// `[1, range]`, and a range of 0 yields 0 rather than an error.
pub fn roll(rng: &mut impl Rng, range: u16) -> u16 {
    if range == 0 {
        return 0;
    }
    rng.gen_range(1..=range)
}
