//! Citation panel state.
//!
//! The panel shows the citation set of the latest answer. Its visibility
//! rule is asymmetric: installing a non-empty citation set forces the panel
//! open, but nothing ever closes it automatically. Closing is exclusively
//! a user action.

use super::message::Citation;

/// The currently displayed citation set and panel visibility.
#[derive(Debug, Clone, Default)]
pub struct CitationPanel {
    citations: Vec<Citation>,
    open: bool,
}

impl CitationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed citations, in the order the backend returned them.
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Replaces the citation set wholesale, never merging with the previous
    /// set. A non-empty set forces the panel open, regardless of any prior
    /// manual close; an empty set leaves visibility untouched.
    pub fn install(&mut self, citations: Vec<Citation>) {
        self.citations = citations;
        if !self.citations.is_empty() {
            self.open = true;
        }
    }

    /// User-initiated visibility toggle, available at any time.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Thread reset: drops the citations and closes the panel.
    pub fn clear(&mut self) {
        self.citations.clear();
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn citation(id: u32) -> Citation {
        Citation(json!({ "id": id }))
    }

    #[test]
    fn install_replaces_wholesale() {
        let mut panel = CitationPanel::new();
        panel.install(vec![citation(1)]);
        panel.install(vec![citation(2), citation(3)]);

        assert_eq!(panel.citations(), &[citation(2), citation(3)]);
    }

    #[test]
    fn non_empty_install_opens_panel() {
        let mut panel = CitationPanel::new();
        assert!(!panel.is_open());

        panel.install(vec![citation(1)]);
        assert!(panel.is_open());
    }

    #[test]
    fn install_reopens_after_manual_close() {
        let mut panel = CitationPanel::new();
        panel.install(vec![citation(1)]);
        panel.toggle(); // user closes
        assert!(!panel.is_open());

        panel.install(vec![citation(2)]);
        assert!(panel.is_open());
    }

    #[test]
    fn empty_install_never_touches_visibility() {
        // Documented asymmetry: there is no automatic close.
        let mut panel = CitationPanel::new();
        panel.install(vec![citation(1)]);
        assert!(panel.is_open());

        panel.install(Vec::new());
        assert!(panel.citations().is_empty());
        assert!(panel.is_open());
    }

    #[test]
    fn toggle_is_independent_of_content() {
        let mut panel = CitationPanel::new();
        panel.toggle();
        assert!(panel.is_open());
        panel.toggle();
        assert!(!panel.is_open());
    }
}
