//! Running transcript of a pipeline run
//!
//! Each step appends one labeled section. Later prompts include the rendered
//! transcript so the model sees everything gathered so far, and the final
//! rendering is returned to the caller as the pitch.

/// How a section is laid out when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionLayout {
    /// `Label: body` on a single line
    Inline,
    /// `Label:` followed by the body on the next line
    Block,
}

/// One labeled entry in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    label: String,
    body: String,
    layout: SectionLayout,
}

impl Section {
    fn render(&self) -> String {
        match self.layout {
            SectionLayout::Inline => format!("{}: {}", self.label, self.body),
            SectionLayout::Block => format!("{}:\n{}", self.label, self.body),
        }
    }
}

/// Append-only list of labeled sections, seeded with the goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    sections: Vec<Section>,
}

impl Transcript {
    pub const GOAL: &'static str = "Goal";
    pub const SEARCH_QUERIES: &'static str = "Search queries";
    pub const SEARCH_A: &'static str = "Search A results";
    pub const SEARCH_B: &'static str = "Search B results";
    pub const MARKET_GAPS: &'static str = "Market Gaps";
    pub const NAME_IDEAS: &'static str = "Name ideas";
    pub const BRAND_NAME: &'static str = "Chosen brand name";
    pub const TAGLINE: &'static str = "Tagline";
    pub const PRICING: &'static str = "Pricing CSV";
    pub const EMAIL: &'static str = "Cold email";

    /// Start a transcript for `goal`
    pub fn new(goal: &str) -> Self {
        let mut transcript = Self {
            sections: Vec::new(),
        };
        transcript.push_inline(Self::GOAL, goal);
        transcript
    }

    /// Append a one-line section
    pub fn push_inline(&mut self, label: &str, body: impl Into<String>) {
        self.push(label, body.into(), SectionLayout::Inline);
    }

    /// Append a multi-line section
    pub fn push_block(&mut self, label: &str, body: impl Into<String>) {
        self.push(label, body.into(), SectionLayout::Block);
    }

    fn push(&mut self, label: &str, body: String, layout: SectionLayout) {
        self.sections.push(Section {
            label: label.to_string(),
            body,
            layout,
        });
    }

    /// Render every section, separated by a blank line
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(Section::render)
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_seeded_with_goal() {
        let transcript = Transcript::new("AI bookkeeping for bakeries");
        assert_eq!(transcript.render(), "Goal: AI bookkeeping for bakeries");
    }

    #[test]
    fn test_render_inline_and_block_sections() {
        let mut transcript = Transcript::new("dog walking app");
        transcript.push_inline(Transcript::SEARCH_QUERIES, "1) dog walkers 2) pet apps");
        transcript.push_block(Transcript::MARKET_GAPS, "Owners lack trust.\nPricing is opaque.");
        transcript.push_inline(Transcript::BRAND_NAME, "Leashly");

        assert_eq!(
            transcript.render(),
            "Goal: dog walking app\n\n\
             Search queries: 1) dog walkers 2) pet apps\n\n\
             Market Gaps:\nOwners lack trust.\nPricing is opaque.\n\n\
             Chosen brand name: Leashly"
        );
    }

    #[test]
    fn test_sections_keep_insertion_order() {
        let mut transcript = Transcript::new("g");
        transcript.push_block(Transcript::SEARCH_B, "[]");
        transcript.push_block(Transcript::SEARCH_A, "[]");
        assert_eq!(
            transcript.render(),
            "Goal: g\n\nSearch B results:\n[]\n\nSearch A results:\n[]"
        );
    }
}
