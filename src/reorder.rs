use crate::glyph_table::Token;
use crate::segmenter::{ClusterPart, Slot, SyllableCluster, Unit};

/// A syllable's glyphs in logical (Unicode) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderedCluster<'a> {
    glyphs: Vec<Token<'a>>,
}

impl<'a> ReorderedCluster<'a> {
    pub fn glyphs(&self) -> &[Token<'a>] {
        &self.glyphs
    }

    pub fn fragments(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.glyphs.iter().map(|g| g.fragment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderedUnit<'a> {
    Cluster(ReorderedCluster<'a>),
    Standalone(Token<'a>),
}

fn get_prio(part: &ClusterPart<'_>) -> i32 {
    match part.slot {
        Slot::Reph => 10,
        Slot::Stack => 20,
        Slot::PreSign => 30,
        Slot::PostSign => 40,
        Slot::Modifier => 50,
        Slot::Displaced => 60,
    }
}

#[derive(Default)]
pub struct ClusterReorderer;

impl ClusterReorderer {
    pub fn new() -> Self {
        ClusterReorderer
    }

    /// Typing order to logical order: reph, conjunct stack, vowel signs,
    /// modifiers. Ties keep typing order.
    pub fn reorder<'a>(&self, cluster: &SyllableCluster<'a>) -> ReorderedCluster<'a> {
        let mut parts = cluster.parts().to_vec();
        if parts.len() > 1 {
            parts.sort_by(|a, b| {
                let prio_a = get_prio(a);
                let prio_b = get_prio(b);
                if prio_a != prio_b {
                    prio_a.cmp(&prio_b)
                } else {
                    a.index.cmp(&b.index)
                }
            });
        }
        ReorderedCluster { glyphs: parts.into_iter().map(|p| p.token).collect() }
    }

    pub fn reorder_units<'a>(&self, units: Vec<Unit<'a>>) -> Vec<OrderedUnit<'a>> {
        units
            .into_iter()
            .map(|unit| match unit {
                Unit::Cluster(cluster) => OrderedUnit::Cluster(self.reorder(&cluster)),
                Unit::Standalone(token) => OrderedUnit::Standalone(token),
            })
            .collect()
    }
}
