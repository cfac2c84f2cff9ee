//! Preeti <-> Hisab re-keying.
//!
//! The two fonts share every letter key and differ only in which digit row
//! carries the numerals: Preeti types them shifted (`!@#...`), Hisab types
//! them on the plain digit keys. Swapping the rows converts either way.

/// Exchanges a key on the digit row with its shifted counterpart.
pub fn swap_char(c: char) -> char {
    match c {
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        _ => c,
    }
}

pub struct LegacySwapConverter;

impl LegacySwapConverter {
    pub fn preeti_to_hisab(text: &str) -> String {
        text.chars().map(swap_char).collect()
    }

    pub fn hisab_to_preeti(text: &str) -> String {
        text.chars().map(swap_char).collect()
    }
}
