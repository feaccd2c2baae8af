//! Per-tab view selection: the list, a detail sub-view or a wizard.

/// A detail sub-view. `ALL` is the cycle order.
pub trait SubView: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn title(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View<D, W> {
    #[default]
    List,
    Detail(D),
    Wizard(W),
}

#[derive(Debug, Clone)]
pub struct ViewState<D, W> {
    current: View<D, W>,
}

impl<D, W> Default for ViewState<D, W> {
    fn default() -> Self {
        Self { current: View::List }
    }
}

impl<D: SubView, W: Copy + Eq> ViewState<D, W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View<D, W> {
        self.current
    }

    pub fn is_list(&self) -> bool {
        self.current == View::List
    }

    pub fn detail(&self) -> Option<D> {
        match self.current {
            View::Detail(d) => Some(d),
            _ => None,
        }
    }

    pub fn wizard(&self) -> Option<W> {
        match self.current {
            View::Wizard(w) => Some(w),
            _ => None,
        }
    }

    /// List → first sub-view. Returns whether the view changed.
    pub fn select(&mut self) -> bool {
        match (self.current, D::ALL.first()) {
            (View::List, Some(first)) => {
                self.current = View::Detail(*first);
                true
            }
            _ => false,
        }
    }

    /// Next sub-view, wrapping inside Detail.
    pub fn next(&mut self) {
        self.cycle(1);
    }

    /// Previous sub-view, wrapping inside Detail.
    pub fn previous(&mut self) {
        self.cycle(D::ALL.len().saturating_sub(1));
    }

    fn cycle(&mut self, step: usize) {
        if let View::Detail(d) = self.current {
            let len = D::ALL.len();
            let index = D::ALL.iter().position(|v| *v == d).unwrap_or(0);
            self.current = View::Detail(D::ALL[(index + step) % len]);
        }
    }

    pub fn open_wizard(&mut self, wizard: W) {
        self.current = View::Wizard(wizard);
    }

    /// Back to the list from anywhere.
    pub fn back(&mut self) {
        self.current = View::List;
    }
}
