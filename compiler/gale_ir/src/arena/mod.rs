//! Bump arena for process-lifetime byte storage.
//!
//! Memory is handed out from slabs in 8-byte aligned, zeroed blocks and is
//! never freed individually. A [`Block`] names a region by slab and offset,
//! so it stays valid however many slabs are added later.
//!
//! # Growth
//!
//! Slabs start at [`ArenaConfig::slab_size`] bytes. Once the arena has
//! reserved [`ArenaConfig::growth_threshold`] bytes in total, new slabs are
//! [`ArenaConfig::large_slab_size`] bytes instead, which keeps the number of
//! system allocations low on large compilation units. A request bigger than
//! the current slab size gets a slab of its own size.

use std::alloc::{handle_alloc_error, Layout};

/// Alignment of every block handed out by the arena.
pub const ALIGN: usize = 8;

/// Convert a length or index to `u32`, aborting on overflow.
///
/// Arenas index with `u32` handles; four billion entries is far beyond any
/// compilation unit, so overflow is an internal error.
#[inline]
pub fn to_u32(n: usize, what: &str) -> u32 {
    match u32::try_from(n) {
        Ok(v) => v,
        Err(_) => gale_diagnostic::ice(format_args!("{what} overflowed u32 ({n})")),
    }
}

/// Slab growth parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArenaConfig {
    /// Size of a slab before the growth threshold is reached.
    pub slab_size: usize,
    /// Size of a slab after the growth threshold is reached.
    pub large_slab_size: usize,
    /// Cumulative reserved bytes after which large slabs are used.
    pub growth_threshold: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            slab_size: 50_000,
            large_slab_size: 500_000,
            growth_threshold: 500_000,
        }
    }
}

/// A region of arena memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Block {
    slab: u32,
    offset: u32,
    len: u32,
}

impl Block {
    /// Length of the block in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Whether the block is zero-sized.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Growable slab allocator.
pub struct BumpArena {
    slabs: Vec<Box<[u8]>>,
    /// Bytes used in the last slab.
    cursor: usize,
    /// Total bytes reserved across all slabs.
    reserved: usize,
    config: ArenaConfig,
}

impl Default for BumpArena {
    fn default() -> Self {
        Self::new()
    }
}

impl BumpArena {
    /// Create an empty arena with the default growth policy.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    /// Create an empty arena with a custom growth policy.
    pub fn with_config(config: ArenaConfig) -> Self {
        BumpArena {
            slabs: Vec::new(),
            cursor: 0,
            reserved: 0,
            config,
        }
    }

    /// Number of slabs allocated so far.
    pub fn slab_count(&self) -> usize {
        self.slabs.len()
    }

    /// Total bytes reserved from the system.
    pub fn reserved_bytes(&self) -> usize {
        self.reserved
    }

    /// Room left in the current slab.
    fn remaining(&self) -> usize {
        self.slabs.last().map_or(0, |s| s.len() - self.cursor)
    }

    /// Size of the next slab under the growth policy.
    fn next_slab_size(&self, request: usize) -> usize {
        let policy = if self.reserved >= self.config.growth_threshold {
            self.config.large_slab_size
        } else {
            self.config.slab_size
        };
        policy.max(request)
    }

    fn grow(&mut self, request: usize) {
        let size = self.next_slab_size(request);
        let mut buf: Vec<u8> = Vec::new();
        if buf.try_reserve_exact(size).is_err() {
            tracing::error!(size, reserved = self.reserved, "out of memory");
            let layout = Layout::array::<u8>(size)
                .unwrap_or_else(|_| gale_diagnostic::ice("arena slab size overflow"));
            handle_alloc_error(layout);
        }
        buf.resize(size, 0);
        tracing::trace!(size, slabs = self.slabs.len() + 1, "arena slab");
        self.slabs.push(buf.into_boxed_slice());
        self.cursor = 0;
        self.reserved += size;
    }

    /// Allocate `size` zeroed bytes, 8-byte aligned.
    pub fn alloc(&mut self, size: usize) -> Block {
        let aligned = self.cursor.next_multiple_of(ALIGN);
        let fits = self
            .slabs
            .last()
            .is_some_and(|s| aligned <= s.len() && s.len() - aligned >= size);
        if fits {
            self.cursor = aligned;
        } else {
            self.grow(size);
        }
        let block = Block {
            slab: to_u32(self.slabs.len() - 1, "arena slab index"),
            offset: to_u32(self.cursor, "arena offset"),
            len: to_u32(size, "arena block length"),
        };
        self.cursor += size;
        block
    }

    /// Resize a block.
    ///
    /// Extends in place when `block` is the most recent allocation and the
    /// slab has room; otherwise copies into a fresh block. Callers must use
    /// the returned block from then on.
    pub fn realloc(&mut self, block: Block, new_size: usize) -> Block {
        let last = self.slabs.len().checked_sub(1);
        let is_last = last == Some(block.slab as usize)
            && block.offset as usize + block.len() == self.cursor;
        if new_size <= block.len() {
            let shrunk = Block {
                len: to_u32(new_size, "arena block length"),
                ..block
            };
            if is_last {
                // Released bytes are handed out again and must read as zero.
                self.bytes_mut(block)[new_size..].fill(0);
                self.cursor = block.offset as usize + new_size;
            }
            return shrunk;
        }
        let extra = new_size - block.len();
        if is_last && self.remaining() >= extra {
            self.cursor += extra;
            return Block {
                len: to_u32(new_size, "arena block length"),
                ..block
            };
        }

        let old = self.bytes(block).to_vec();
        let fresh = self.alloc(new_size);
        self.bytes_mut(fresh)[..old.len()].copy_from_slice(&old);
        fresh
    }

    /// The bytes of a block.
    pub fn bytes(&self, block: Block) -> &[u8] {
        let Some(slab) = self.slabs.get(block.slab as usize) else {
            gale_diagnostic::ice(format_args!("dangling arena block {block:?}"));
        };
        let start = block.offset as usize;
        &slab[start..start + block.len()]
    }

    /// The bytes of a block, mutably.
    pub fn bytes_mut(&mut self, block: Block) -> &mut [u8] {
        let Some(slab) = self.slabs.get_mut(block.slab as usize) else {
            gale_diagnostic::ice(format_args!("dangling arena block {block:?}"));
        };
        let start = block.offset as usize;
        &mut slab[start..start + block.len()]
    }

    /// Copy a string into the arena.
    pub fn alloc_str(&mut self, s: &str) -> Block {
        let block = self.alloc(s.len());
        self.bytes_mut(block).copy_from_slice(s.as_bytes());
        block
    }

    /// Append `s` to a string block, growing it in place when possible.
    pub fn append_str(&mut self, block: Block, s: &str) -> Block {
        let old_len = block.len();
        let grown = self.realloc(block, old_len + s.len());
        self.bytes_mut(grown)[old_len..].copy_from_slice(s.as_bytes());
        grown
    }

    /// Read back a string block.
    pub fn str(&self, block: Block) -> &str {
        match std::str::from_utf8(self.bytes(block)) {
            Ok(s) => s,
            Err(e) => gale_diagnostic::ice(format_args!("arena block {block:?} is not UTF-8: {e}")),
        }
    }
}

#[cfg(test)]
mod tests;
