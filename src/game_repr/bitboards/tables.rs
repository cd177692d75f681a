/// Precomputed neighbour tables
/// NEIGHBOR_MASK[cell] returns a bitboard of the (up to) eight cells touching that cell
pub static NEIGHBOR_MASK: [u64; 64] = generate_neighbor_masks();

/// Generate the neighbour table at compile time
const fn generate_neighbor_masks() -> [u64; 64] {
    let mut masks = [0u64; 64];
    let mut sq = 0;

    while sq < 64 {
        let x = (sq / 8) as i8;
        let y = (sq % 8) as i8;
        let mut mask = 0u64;

        let mut dx = -1i8;
        while dx <= 1 {
            let mut dy = -1i8;
            while dy <= 1 {
                let nx = x + dx;
                let ny = y + dy;
                if (dx != 0 || dy != 0) && nx >= 0 && nx < 8 && ny >= 0 && ny < 8 {
                    mask |= 1u64 << (nx * 8 + ny);
                }
                dy += 1;
            }
            dx += 1;
        }

        masks[sq] = mask;
        sq += 1;
    }

    masks
}
