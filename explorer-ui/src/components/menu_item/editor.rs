/// Longest name the inline editor accepts, in characters.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCommit {
    pub name: String,
    pub index: usize,
}

/// Inline rename state for one experiment entry.
///
/// The name is seeded once from the parent and owned here afterwards; later
/// parent renders never overwrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEditor {
    mode: EditMode,
    current_name: String,
}

impl NameEditor {
    pub fn new(initial_name: impl Into<String>) -> Self {
        Self {
            mode: EditMode::Viewing,
            current_name: initial_name.into(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    pub fn activate(&mut self) {
        self.mode = EditMode::Editing;
    }

    /// One keystroke in the name field. Returns the name to broadcast, if any.
    pub fn type_text(&mut self, value: &str) -> Option<String> {
        if !self.is_editing() {
            return None;
        }
        self.current_name = value.chars().take(MAX_NAME_LEN).collect();
        Some(self.current_name.clone())
    }

    /// Enter pressed. Yields the commit for the parent at most once per edit session.
    pub fn confirm(&mut self, index: usize) -> Option<RenameCommit> {
        if !self.is_editing() {
            return None;
        }
        self.mode = EditMode::Viewing;
        Some(RenameCommit {
            name: self.current_name.clone(),
            index,
        })
    }

    /// Leave edit mode without committing. The typed name is kept locally.
    pub fn dismiss(&mut self) {
        self.mode = EditMode::Viewing;
    }
}
