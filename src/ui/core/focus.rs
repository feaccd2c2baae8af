//! Single focus holder per tab.
//!
//! Focus is one value, either a panel or an input surface, so two surfaces
//! can never hold it at once. Widgets read their focus flag from here.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus<P, I> {
    Panel(P),
    Input(I),
}

#[derive(Debug, Clone)]
pub struct FocusManager<P, I> {
    primary: P,
    current: Focus<P, I>,
}

impl<P: Copy + Eq, I: Copy + Eq> FocusManager<P, I> {
    /// Start with the primary panel focused.
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            current: Focus::Panel(primary),
        }
    }

    pub fn current(&self) -> Focus<P, I> {
        self.current
    }

    pub fn primary(&self) -> P {
        self.primary
    }

    pub fn focus_panel(&mut self, panel: P) {
        self.current = Focus::Panel(panel);
    }

    /// Blurs every panel.
    pub fn focus_input(&mut self, input: I) {
        self.current = Focus::Input(input);
    }

    /// Used when a wizard or input is dismissed.
    pub fn return_to_primary(&mut self) {
        self.current = Focus::Panel(self.primary);
    }

    pub fn is_panel_focused(&self, panel: P) -> bool {
        self.current == Focus::Panel(panel)
    }

    pub fn is_input_focused(&self, input: I) -> bool {
        self.current == Focus::Input(input)
    }

    pub fn focused_panel(&self) -> Option<P> {
        match self.current {
            Focus::Panel(panel) => Some(panel),
            Focus::Input(_) => None,
        }
    }

    pub fn focused_input(&self) -> Option<I> {
        match self.current {
            Focus::Input(input) => Some(input),
            Focus::Panel(_) => None,
        }
    }
}
