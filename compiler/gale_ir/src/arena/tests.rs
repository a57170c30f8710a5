use super::*;
use pretty_assertions::assert_eq;

fn small() -> ArenaConfig {
    ArenaConfig {
        slab_size: 64,
        large_slab_size: 256,
        growth_threshold: 128,
    }
}

#[test]
fn alloc_is_zeroed_and_aligned() {
    let mut arena = BumpArena::with_config(small());
    let a = arena.alloc(3);
    let b = arena.alloc(5);
    assert_eq!(arena.bytes(a), &[0, 0, 0]);
    assert_eq!(arena.bytes(b), &[0; 5]);
    assert_eq!(b.offset as usize % ALIGN, 0);
    assert_ne!(a, b);
}

#[test]
fn shrunk_bytes_are_zero_when_reused() {
    let mut arena = BumpArena::with_config(small());
    let b = arena.alloc_str("hello");
    let empty = arena.realloc(b, 0);
    assert_eq!(empty.len(), 0);
    let next = arena.alloc(5);
    assert_eq!(next.offset, b.offset);
    assert_eq!(arena.bytes(next), &[0; 5]);

    let s = arena.alloc_str("abcdef");
    let short = arena.realloc(s, 2);
    assert_eq!(arena.str(short), "ab");
    let regrown = arena.realloc(short, 6);
    assert_eq!(regrown.offset, s.offset);
    assert_eq!(arena.bytes(regrown), b"ab\0\0\0\0");
}

#[test]
fn strings_round_trip() {
    let mut arena = BumpArena::new();
    let hello = arena.alloc_str("hello");
    let world = arena.alloc_str("world");
    assert_eq!(arena.str(hello), "hello");
    assert_eq!(arena.str(world), "world");
}

#[test]
fn realloc_last_block_extends_in_place() {
    let mut arena = BumpArena::with_config(small());
    let block = arena.alloc_str("ab");
    let grown = arena.append_str(block, "cd");
    assert_eq!(grown.slab, block.slab);
    assert_eq!(grown.offset, block.offset);
    assert_eq!(arena.str(grown), "abcd");
}

#[test]
fn realloc_older_block_copies() {
    let mut arena = BumpArena::with_config(small());
    let first = arena.alloc_str("ab");
    let _second = arena.alloc_str("xy");
    let grown = arena.append_str(first, "cd");
    assert_ne!(grown.offset, first.offset);
    assert_eq!(arena.str(grown), "abcd");
    // The original block is left untouched.
    assert_eq!(arena.str(first), "ab");
}

#[test]
fn realloc_without_room_copies_to_new_slab() {
    let mut arena = BumpArena::with_config(small());
    let block = arena.alloc(60);
    let grown = arena.realloc(block, 100);
    assert_ne!(grown.slab, block.slab);
    assert_eq!(grown.len(), 100);
}

#[test]
fn slabs_grow_after_threshold() {
    let mut arena = BumpArena::with_config(small());
    arena.alloc(64);
    arena.alloc(64);
    assert_eq!(arena.reserved_bytes(), 128);
    arena.alloc(1);
    // Third slab comes from the large size.
    assert_eq!(arena.slab_count(), 3);
    assert_eq!(arena.reserved_bytes(), 128 + 256);
}

#[test]
fn oversized_request_gets_its_own_slab() {
    let mut arena = BumpArena::with_config(small());
    let big = arena.alloc(1000);
    assert_eq!(big.len(), 1000);
    assert_eq!(arena.reserved_bytes(), 1000);
}

#[test]
fn blocks_survive_growth() {
    let mut arena = BumpArena::with_config(small());
    let blocks: Vec<Block> = (0..50).map(|i| arena.alloc_str(&format!("s{i}"))).collect();
    for (i, b) in blocks.iter().enumerate() {
        assert_eq!(arena.str(*b), format!("s{i}"));
    }
}

#[test]
fn empty_block() {
    let mut arena = BumpArena::new();
    let b = arena.alloc(0);
    assert!(b.is_empty());
    assert_eq!(arena.str(b), "");
}

#[test]
fn to_u32_in_range() {
    assert_eq!(to_u32(7, "test"), 7);
}
