use log::trace;

use crate::glyph_table::{GlyphRole, Token};

/// Where a glyph sits inside its syllable once reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Reph,
    /// Conjunct chain and anchor, kept in typing order.
    Stack,
    PreSign,
    PostSign,
    Modifier,
    /// A sign pushed out of its slot by a later one of the same kind.
    Displaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterPart<'a> {
    pub token: Token<'a>,
    pub slot: Slot,
    pub index: usize,
}

/// One akshara in typing order. Holds exactly one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableCluster<'a> {
    parts: Vec<ClusterPart<'a>>,
    anchor: usize,
}

impl<'a> SyllableCluster<'a> {
    fn new() -> Self {
        SyllableCluster { parts: Vec::with_capacity(8), anchor: 0 }
    }

    fn push(&mut self, token: Token<'a>, slot: Slot) -> usize {
        let index = self.parts.len();
        self.parts.push(ClusterPart { token, slot, index });
        index
    }

    fn displace(&mut self, index: usize) {
        let part = &mut self.parts[index];
        trace!("displacing duplicate sign {:?}", part.token.raw);
        part.slot = Slot::Displaced;
        part.token = part.token.degrade();
    }

    pub fn parts(&self) -> &[ClusterPart<'a>] {
        &self.parts
    }

    pub fn anchor(&self) -> &Token<'a> {
        &self.parts[self.anchor].token
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.parts.iter().any(|p| p.slot == slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit<'a> {
    Cluster(SyllableCluster<'a>),
    Standalone(Token<'a>),
}

pub struct ClusterSegmenter {
    attach_reph: bool,
}

impl Default for ClusterSegmenter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ClusterSegmenter {
    pub fn new(attach_reph: bool) -> Self {
        ClusterSegmenter { attach_reph }
    }

    pub fn segment<'a>(&self, tokens: &[Token<'a>]) -> Vec<Unit<'a>> {
        let mut units = Vec::with_capacity(tokens.len());
        let mut pending: Option<Token<'a>> = None;
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];
            match token.role {
                GlyphRole::DependentVowelSignPre => {
                    if let Some(old) = pending.replace(token) {
                        trace!("pre sign {:?} replaced before its anchor", old.raw);
                        units.push(Unit::Standalone(old.degrade()));
                    }
                    i += 1;
                }
                GlyphRole::Consonant | GlyphRole::IndependentVowel | GlyphRole::ConjunctTrigger => {
                    let (cluster, next) = self.cluster_at(tokens, i, pending.take());
                    units.push(Unit::Cluster(cluster));
                    i = next;
                }
                _ => {
                    if let Some(orphan) = pending.take() {
                        trace!("pre sign {:?} has no anchor", orphan.raw);
                        units.push(Unit::Standalone(orphan.degrade()));
                    }
                    units.push(Unit::Standalone(standalone(token)));
                    i += 1;
                }
            }
        }

        if let Some(orphan) = pending {
            trace!("trailing pre sign {:?}", orphan.raw);
            units.push(Unit::Standalone(orphan.degrade()));
        }
        units
    }

    fn cluster_at<'a>(
        &self,
        tokens: &[Token<'a>],
        start: usize,
        pre_sign: Option<Token<'a>>,
    ) -> (SyllableCluster<'a>, usize) {
        let mut cluster = SyllableCluster::new();
        if let Some(sign) = pre_sign {
            cluster.push(sign, Slot::PreSign);
        }

        let mut i = start;
        let mut anchor: Option<usize> = None;
        let mut stacked = 0;
        let mut last = 0;

        // Conjunct stack: half forms, the anchor, and anything joined after it.
        while let Some(&token) = tokens.get(i) {
            match (token.role, anchor) {
                (GlyphRole::ConjunctTrigger, None) | (GlyphRole::Consonant, None) => {
                    last = cluster.push(token, Slot::Stack);
                    if token.role == GlyphRole::Consonant {
                        anchor = Some(last);
                    }
                }
                (GlyphRole::IndependentVowel, None) if stacked == 0 => {
                    last = cluster.push(token, Slot::Stack);
                    anchor = Some(last);
                }
                (GlyphRole::HalfFormJoiner, Some(a)) if cluster.parts[a].token.role == GlyphRole::Consonant => {
                    last = cluster.push(token, Slot::Stack);
                    if token.is_bare_virama() {
                        i += 1;
                        stacked += 1;
                        if !starts_chain(tokens, i) {
                            // dead consonant
                            break;
                        }
                        anchor = None;
                        continue;
                    }
                }
                _ => break,
            }
            stacked += 1;
            i += 1;
        }

        // Half forms with nothing to lean on: the last one stands as the anchor.
        cluster.anchor = anchor.unwrap_or(last);

        let mut post: Option<usize> = None;
        let mut has_reph = false;
        while let Some(&token) = tokens.get(i) {
            match token.role {
                GlyphRole::DependentVowelSignPost => {
                    if let Some(prev) = post {
                        cluster.displace(prev);
                    }
                    post = Some(cluster.push(token, Slot::PostSign));
                }
                GlyphRole::VowelModifier => {
                    cluster.push(token, Slot::Modifier);
                }
                GlyphRole::Reph if self.attach_reph && !has_reph => {
                    has_reph = true;
                    cluster.push(token, Slot::Reph);
                }
                _ => break,
            }
            i += 1;
        }

        (cluster, i)
    }
}

fn starts_chain(tokens: &[Token<'_>], i: usize) -> bool {
    matches!(
        tokens.get(i).map(|t| t.role),
        Some(GlyphRole::Consonant) | Some(GlyphRole::ConjunctTrigger)
    )
}

// Numerals, punctuation and unknown keys keep their glyph. Marks that lost
// their anchor fall back to the raw key; an unattached reph is still र्.
fn standalone(token: Token<'_>) -> Token<'_> {
    if token.role.is_standalone() || token.role == GlyphRole::Reph {
        token
    } else {
        trace!("orphan {:?} {:?}", token.role, token.raw);
        token.degrade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph_table::GlyphTable;

    fn segment(text: &str) -> Vec<Unit<'_>> {
        let tokens = GlyphTable::preeti().tokenize(text);
        ClusterSegmenter::default().segment(&tokens)
    }

    fn slots<'a>(unit: &Unit<'a>) -> Vec<(Slot, &'a str)> {
        match unit {
            Unit::Cluster(c) => c.parts().iter().map(|p| (p.slot, p.token.raw)).collect(),
            Unit::Standalone(_) => panic!("expected a cluster"),
        }
    }

    #[test]
    fn pre_sign_joins_next_anchor() {
        let units = segment("ls");
        assert_eq!(units.len(), 1);
        assert_eq!(slots(&units[0]), vec![(Slot::PreSign, "l"), (Slot::Stack, "s")]);
    }

    #[test]
    fn virama_chain_repeats() {
        let units = segment("s\\t\\o");
        assert_eq!(units.len(), 1);
        if let Unit::Cluster(c) = &units[0] {
            assert_eq!(c.anchor().raw, "o");
            assert!(c.parts().iter().all(|p| p.slot == Slot::Stack));
            assert_eq!(c.parts().len(), 5);
        }
    }

    #[test]
    fn trailing_virama_is_dead_consonant() {
        let units = segment("s\\ ");
        assert_eq!(units.len(), 2);
        assert_eq!(slots(&units[0]), vec![(Slot::Stack, "s"), (Slot::Stack, "\\")]);
    }

    #[test]
    fn half_forms_stack_before_anchor() {
        let units = segment("Sof");
        assert_eq!(
            slots(&units[0]),
            vec![(Slot::Stack, "S"), (Slot::Stack, "o"), (Slot::PostSign, "f")]
        );
    }

    #[test]
    fn lone_half_form_is_anchor() {
        let units = segment(":");
        if let Unit::Cluster(c) = &units[0] {
            assert_eq!(c.anchor().fragment, "स्");
        } else {
            panic!("expected a cluster");
        }
    }

    #[test]
    fn reph_attaches_to_previous_syllable() {
        let units = segment("ud{");
        assert_eq!(units.len(), 2);
        assert_eq!(slots(&units[1]), vec![(Slot::Stack, "d"), (Slot::Reph, "{")]);
    }

    #[test]
    fn reph_stays_when_disabled() {
        let tokens = GlyphTable::preeti().tokenize("d{");
        let units = ClusterSegmenter::new(false).segment(&tokens);
        assert_eq!(units.len(), 2);
        assert!(matches!(units[1], Unit::Standalone(t) if t.fragment == "र्"));
    }

    #[test]
    fn second_post_sign_displaces_first() {
        let units = segment("sfL");
        assert_eq!(
            slots(&units[0]),
            vec![(Slot::Stack, "s"), (Slot::Displaced, "f"), (Slot::PostSign, "L")]
        );
    }

    #[test]
    fn orphan_signs_pass_through_raw() {
        let units = segment(" ]");
        assert_eq!(units.len(), 2);
        match units[1] {
            Unit::Standalone(t) => {
                assert_eq!(t.role, GlyphRole::Unrecognized);
                assert_eq!(t.fragment, "]");
            }
            _ => panic!("expected passthrough"),
        }
    }

    #[test]
    fn doubled_pre_sign_keeps_the_later() {
        let units = segment("lls");
        assert_eq!(units.len(), 2);
        assert!(matches!(units[0], Unit::Standalone(t) if t.fragment == "l"));
        assert!(matches!(&units[1], Unit::Cluster(c) if c.has_slot(Slot::PreSign)));
    }

    #[test]
    fn numerals_are_standalone() {
        let units = segment("!@");
        assert!(units.iter().all(|u| matches!(u, Unit::Standalone(t) if t.role == GlyphRole::Numeral)));
    }
}
