//! Demo tiles: a numbered id and a colour from a fixed palette.

use rand::seq::SliceRandom;
use rand::Rng;

/// 24-bit colour, kept renderer-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn hex(v: u32) -> Self {
        Rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Perceived brightness in `[0, 255]`, used to pick a readable label colour.
    pub fn luma(self) -> u8 {
        let Rgb(r, g, b) = self;
        ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
    }
}

/// Material 500 shades, red through deep orange.
pub const PALETTE: [Rgb; 16] = [
    Rgb::hex(0xF44336),
    Rgb::hex(0xE91E63),
    Rgb::hex(0x9C27B0),
    Rgb::hex(0x673AB7),
    Rgb::hex(0x3F51B5),
    Rgb::hex(0x2196F3),
    Rgb::hex(0x03A9F4),
    Rgb::hex(0x00BCD4),
    Rgb::hex(0x009688),
    Rgb::hex(0x4CAF50),
    Rgb::hex(0x8BC34A),
    Rgb::hex(0xCDDC39),
    Rgb::hex(0xFFEB3B),
    Rgb::hex(0xFFC107),
    Rgb::hex(0xFF9800),
    Rgb::hex(0xFF5722),
];

/// One grid tile.  `id` is the stable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub color: Rgb,
}

impl Item {
    pub fn key(&self) -> u32 {
        self.id
    }
}

/// Items `1..=count`, coloured by `id % 16`.
pub fn create_items(count: usize) -> Vec<Item> {
    (1..=count as u32)
        .map(|id| Item {
            id,
            color: PALETTE[id as usize % PALETTE.len()],
        })
        .collect()
}

/// Random permutation of `items`.
pub fn shuffled<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Vec<Item> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
