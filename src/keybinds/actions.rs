//! Action types for overlay keybinds.

/// Actions that can be triggered by keybinds while the overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerAction {
    /// Close the overlay - Esc
    Close,
    /// Show the next item, wrapping to the first - Right
    Next,
    /// Show the previous item, wrapping to the last - Left
    Prev,
}

impl ViewerAction {
    /// All actions, in help order
    pub const ALL: [Self; 3] = [Self::Close, Self::Next, Self::Prev];

    /// Configuration name of the action
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Next => "next",
            Self::Prev => "prev",
        }
    }

    /// Returns a human-readable description of the action.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Close => "Close the viewer",
            Self::Next => "Next item",
            Self::Prev => "Previous item",
        }
    }

    /// Parse a configuration name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ViewerAction::from_name("next"), Some(ViewerAction::Next));
        assert_eq!(ViewerAction::from_name("zoom"), None);
    }

    #[test]
    fn test_description() {
        assert_eq!(ViewerAction::Close.description(), "Close the viewer");
    }
}
