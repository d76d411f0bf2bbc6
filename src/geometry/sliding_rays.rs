//! Full-length ray tables for rooks, bishops and queens.
//!
//! Rays run to the board edge and ignore occupancy. Blockers are applied later by
//! the rules engine when it walks the path between two squares.

pub const ROOK_RAYS: [u64; 64] = generate_rook_rays();
pub const BISHOP_RAYS: [u64; 64] = generate_bishop_rays();
pub const QUEEN_RAYS: [u64; 64] = generate_queen_rays();

const fn generate_rook_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let sq_i = sq as i32;
        let mut rays = 0u64;

        rays |= trace_ray_const(sq_i, 0, 1);
        rays |= trace_ray_const(sq_i, 0, -1);
        rays |= trace_ray_const(sq_i, 1, 0);
        rays |= trace_ray_const(sq_i, -1, 0);

        table[sq] = rays;
        sq += 1;
    }

    table
}

const fn generate_bishop_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let sq_i = sq as i32;
        let mut rays = 0u64;

        rays |= trace_ray_const(sq_i, 1, 1);
        rays |= trace_ray_const(sq_i, 1, -1);
        rays |= trace_ray_const(sq_i, -1, 1);
        rays |= trace_ray_const(sq_i, -1, -1);

        table[sq] = rays;
        sq += 1;
    }

    table
}

const fn generate_queen_rays() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = BISHOP_RAYS[sq] | ROOK_RAYS[sq];
        sq += 1;
    }

    table
}

const fn trace_ray_const(square: i32, row_step: i32, column_step: i32) -> u64 {
    let mut row = (square / 8) + row_step;
    let mut column = (square % 8) + column_step;
    let mut squares = 0u64;

    while row >= 0 && row < 8 && column >= 0 && column < 8 {
        squares |= 1u64 << (row * 8 + column);
        row += row_step;
        column += column_step;
    }

    squares
}
