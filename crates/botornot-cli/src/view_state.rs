//! Presentation state of the chat and expert panels.
//!
//! Owned by the rendering layer and reset for every new answer. Nothing here
//! affects extraction or attribution.

use crate::error::{CliError, Result};
use botornot_domain::Source;

/// Highlighted source, selected expert and detail panel state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    highlighted: Option<Source>,
    selected_expert: Option<usize>,
    detail_open: bool,
}

impl ViewState {
    /// Fresh state with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently highlighted source
    pub fn highlight(&self) -> Option<&Source> {
        self.highlighted.as_ref()
    }

    /// Highlight the `n`-th entry (1-based) of `legend`
    pub fn highlight_nth(&mut self, legend: &[Source], n: usize) -> Result<&Source> {
        let source = n
            .checked_sub(1)
            .and_then(|i| legend.get(i))
            .ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "No source [{}]; choose between 1 and {}",
                    n,
                    legend.len()
                ))
            })?;
        Ok(self.highlighted.insert(source.clone()))
    }

    /// Remove the highlight
    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Select the `n`-th expert (1-based) out of `count`; selecting the open
    /// expert again closes its detail panel
    pub fn toggle_expert(&mut self, n: usize, count: usize) -> Result<()> {
        if n == 0 || n > count {
            return Err(CliError::InvalidInput(format!(
                "No expert {}; choose between 1 and {}",
                n, count
            )));
        }

        let index = n - 1;
        if self.detail_open && self.selected_expert == Some(index) {
            self.detail_open = false;
        } else {
            self.selected_expert = Some(index);
            self.detail_open = true;
        }
        Ok(())
    }

    /// Index of the expert whose detail panel is open
    pub fn open_expert(&self) -> Option<usize> {
        if self.detail_open {
            self.selected_expert
        } else {
            None
        }
    }

    /// Close the detail panel, keeping the selection
    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    /// Forget everything; used when a new answer arrives
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend() -> Vec<Source> {
        vec![Source::new("https://a.io"), Source::tool("Wikipedia")]
    }

    #[test]
    fn test_highlight_by_position() {
        let mut view = ViewState::new();
        assert!(view.highlight().is_none());

        let chosen = view.highlight_nth(&legend(), 2).unwrap().clone();
        assert_eq!(chosen, Source::tool("Wikipedia"));
        assert_eq!(view.highlight(), Some(&Source::tool("Wikipedia")));

        view.clear_highlight();
        assert!(view.highlight().is_none());
    }

    #[test]
    fn test_highlight_out_of_range() {
        let mut view = ViewState::new();
        assert!(view.highlight_nth(&legend(), 0).is_err());
        assert!(view.highlight_nth(&legend(), 3).is_err());
        assert!(view.highlight().is_none());
    }

    #[test]
    fn test_expert_toggle() {
        let mut view = ViewState::new();
        view.toggle_expert(2, 3).unwrap();
        assert_eq!(view.open_expert(), Some(1));

        view.toggle_expert(2, 3).unwrap();
        assert_eq!(view.open_expert(), None);

        view.toggle_expert(2, 3).unwrap();
        view.toggle_expert(3, 3).unwrap();
        assert_eq!(view.open_expert(), Some(2));

        assert!(view.toggle_expert(4, 3).is_err());
        view.close_detail();
        assert_eq!(view.open_expert(), None);
    }

    #[test]
    fn test_reset() {
        let mut view = ViewState::new();
        view.highlight_nth(&legend(), 1).unwrap();
        view.toggle_expert(1, 1).unwrap();
        view.reset();
        assert_eq!(view, ViewState::default());
    }
}
