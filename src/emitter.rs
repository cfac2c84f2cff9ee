use crate::reorder::OrderedUnit;

#[derive(Default)]
pub struct UnicodeEmitter;

impl UnicodeEmitter {
    pub fn new() -> Self {
        UnicodeEmitter
    }

    pub fn emit(&self, units: &[OrderedUnit<'_>]) -> String {
        let total_len: usize = units
            .iter()
            .map(|unit| match unit {
                OrderedUnit::Cluster(c) => c.fragments().map(str::len).sum::<usize>(),
                OrderedUnit::Standalone(t) => t.fragment.len(),
            })
            .sum();

        let mut result = String::with_capacity(total_len);
        for unit in units {
            match unit {
                OrderedUnit::Cluster(c) => c.fragments().for_each(|f| result.push_str(f)),
                OrderedUnit::Standalone(t) => result.push_str(t.fragment),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph_table::{GlyphRole, Token};

    #[test]
    fn emits_standalone_fragments_in_order() {
        let units = [
            OrderedUnit::Standalone(Token { raw: "!", role: GlyphRole::Numeral, fragment: "१" }),
            OrderedUnit::Standalone(Token { raw: "x", role: GlyphRole::Unrecognized, fragment: "x" }),
        ];
        assert_eq!(UnicodeEmitter::new().emit(&units), "१x");
    }

    #[test]
    fn empty_emits_empty() {
        assert_eq!(UnicodeEmitter::new().emit(&[]), "");
    }
}
