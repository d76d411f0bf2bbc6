//! Fixed-capacity arena of packed boards.
//!
//! Boards are addressed through `BoardHandle`s handed out by `acquire`. A handle is
//! move-only and `release` consumes it, so a handle cannot be released twice or
//! used after release. `ScopedBoard` releases its handle on drop, which keeps every
//! early-return path leak free. Each slot also carries a generation counter that
//! debug builds check on every access, catching handles from another pool.
//!
//! The pool is single-threaded: it uses `RefCell` internally and is `!Sync`.

use std::cell::RefCell;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, trace};

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{CastlingSide, Color, Piece, PieceKind};
use crate::game_state::packed_board::PackedBoard;
use crate::geometry::square::Square;

/// Default slot count. Search holds roughly one successor per ply plus a scratch
/// board for validation, so this leaves headroom well beyond practical depths.
pub const DEFAULT_POOL_CAPACITY: usize = 32;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(0);

/// Owned reference to one pool slot.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "board handles must be released back to their pool"]
pub struct BoardHandle {
    slot: usize,
    generation: u32,
    pool_id: u64,
}

impl BoardHandle {
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}

#[derive(Debug)]
struct PoolSlots {
    boards: Vec<PackedBoard>,
    generations: Vec<u32>,
    free: Vec<usize>,
}

#[derive(Debug)]
pub struct BoardPool {
    id: u64,
    capacity: usize,
    slots: RefCell<PoolSlots>,
}

impl Default for BoardPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardPool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            capacity,
            slots: RefCell::new(PoolSlots {
                boards: vec![PackedBoard::empty(); capacity],
                generations: vec![0; capacity],
                // Popped from the back, so slot 0 is handed out first.
                free: (0..capacity).rev().collect(),
            }),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of free slots.
    #[inline]
    pub fn available(&self) -> usize {
        self.slots.borrow().free.len()
    }

    #[inline]
    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }

    /// Takes a free slot. The board's contents are whatever the slot last held.
    pub fn acquire(&self) -> ChessResult<BoardHandle> {
        let mut slots = self.slots.borrow_mut();
        let Some(slot) = slots.free.pop() else {
            error!(capacity = self.capacity, "board pool exhausted");
            return Err(ChessErrors::PoolExhausted {
                capacity: self.capacity,
            });
        };
        trace!(slot, free = slots.free.len(), "acquired board");
        Ok(BoardHandle {
            slot,
            generation: slots.generations[slot],
            pool_id: self.id,
        })
    }

    /// Acquires a slot that is released again when the guard drops.
    pub fn acquire_scoped(&self) -> ChessResult<ScopedBoard<'_>> {
        let handle = self.acquire()?;
        Ok(ScopedBoard {
            pool: self,
            handle: Some(handle),
        })
    }

    /// Returns a slot to the free set. The handle is consumed.
    pub fn release(&self, handle: BoardHandle) {
        let mut slots = self.slots.borrow_mut();
        let slot = self.checked_slot(&slots, &handle);
        slots.generations[slot] = slots.generations[slot].wrapping_add(1);
        slots.free.push(slot);
        trace!(slot, free = slots.free.len(), "released board");
    }

    /// Duplicates the full state of `source` into `destination`.
    pub fn copy(&self, source: &BoardHandle, destination: &BoardHandle) {
        let mut slots = self.slots.borrow_mut();
        let from = self.checked_slot(&slots, source);
        let to = self.checked_slot(&slots, destination);
        let board = slots.boards[from];
        slots.boards[to] = board;
    }

    /// Resets a board to the standard opening position.
    pub fn initialize(&self, handle: &BoardHandle) {
        self.load(handle, PackedBoard::opening());
    }

    /// Overwrites a board with an externally built record.
    pub fn load(&self, handle: &BoardHandle, board: PackedBoard) {
        self.write(handle, |slot| *slot = board);
    }

    /// Copy of the board's current record.
    pub fn snapshot(&self, handle: &BoardHandle) -> PackedBoard {
        self.read(handle, |board| *board)
    }

    /// Runs `f` against the board behind `handle`.
    ///
    /// `f` must not call back into the pool.
    pub fn read<R>(&self, handle: &BoardHandle, f: impl FnOnce(&PackedBoard) -> R) -> R {
        let slots = self.slots.borrow();
        let slot = self.checked_slot(&slots, handle);
        f(&slots.boards[slot])
    }

    fn write<R>(&self, handle: &BoardHandle, f: impl FnOnce(&mut PackedBoard) -> R) -> R {
        let mut slots = self.slots.borrow_mut();
        let slot = self.checked_slot(&slots, handle);
        f(&mut slots.boards[slot])
    }

    #[inline]
    fn checked_slot(&self, slots: &PoolSlots, handle: &BoardHandle) -> usize {
        debug_assert_eq!(
            handle.pool_id, self.id,
            "board handle used with a pool that did not issue it"
        );
        debug_assert_eq!(
            slots.generations[handle.slot], handle.generation,
            "stale board handle for slot {}",
            handle.slot
        );
        handle.slot
    }

    pub fn active_color(&self, handle: &BoardHandle) -> Color {
        self.read(handle, PackedBoard::active_color)
    }

    pub fn set_active_color(&self, handle: &BoardHandle, color: Color) {
        self.write(handle, |board| board.set_active_color(color));
    }

    pub fn king_square(&self, handle: &BoardHandle, color: Color) -> &'static Square {
        self.read(handle, |board| board.king_square(color))
    }

    pub fn can_castle(&self, handle: &BoardHandle, color: Color, side: CastlingSide) -> bool {
        self.read(handle, |board| board.can_castle(color, side))
    }

    pub fn set_castling_right(
        &self,
        handle: &BoardHandle,
        color: Color,
        side: CastlingSide,
        allowed: bool,
    ) {
        self.write(handle, |board| board.set_castling_right(color, side, allowed));
    }

    pub fn en_passant_column(&self, handle: &BoardHandle) -> Option<u8> {
        self.read(handle, PackedBoard::en_passant_column)
    }

    pub fn set_en_passant_column(&self, handle: &BoardHandle, column: Option<u8>) {
        self.write(handle, |board| board.set_en_passant_column(column));
    }

    pub fn occupant(&self, handle: &BoardHandle, square: &Square) -> Option<Piece> {
        self.read(handle, |board| board.occupant(square))
    }

    pub fn set_occupant(&self, handle: &BoardHandle, square: &Square, occupant: Option<Piece>) {
        self.write(handle, |board| board.set_occupant(square, occupant));
    }

    /// Applies an already-validated move. See [`PackedBoard::commit_move`].
    pub fn commit_move(
        &self,
        handle: &BoardHandle,
        from: &Square,
        to: &Square,
        promotion: Option<PieceKind>,
    ) {
        self.write(handle, |board| board.commit_move(from, to, promotion));
    }
}

/// A pool slot that is released when dropped.
#[derive(Debug)]
pub struct ScopedBoard<'p> {
    pool: &'p BoardPool,
    handle: Option<BoardHandle>,
}

impl ScopedBoard<'_> {
    #[inline]
    pub fn handle(&self) -> &BoardHandle {
        match &self.handle {
            Some(handle) => handle,
            None => unreachable!("scoped board has already given up its handle"),
        }
    }

    /// Transfers ownership of the slot to the caller, who must release it.
    pub fn into_handle(mut self) -> BoardHandle {
        match self.handle.take() {
            Some(handle) => handle,
            None => unreachable!("scoped board has already given up its handle"),
        }
    }
}

impl Deref for ScopedBoard<'_> {
    type Target = BoardHandle;

    fn deref(&self) -> &BoardHandle {
        self.handle()
    }
}

impl Drop for ScopedBoard<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.pool.release(handle);
        }
    }
}
