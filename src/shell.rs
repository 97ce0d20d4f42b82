//! Minimal application shell: the baseline behavior the dispatch bus falls
//! back to when no page controller claims an intent.

use crate::intent::{Action, NavTarget, ScrollDirection};

/// Fraction of the viewport moved by one spoken "scroll up/down"
pub const SCROLL_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Search,
    Settings,
    Profile,
}

impl Route {
    fn from_target(target: NavTarget) -> Option<Self> {
        match target {
            NavTarget::Home => Some(Route::Home),
            NavTarget::Search => Some(Route::Search),
            NavTarget::Settings => Some(Route::Settings),
            NavTarget::Profile => Some(Route::Profile),
            NavTarget::Back | NavTarget::NextPage => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppShell {
    route: Route,
    history: Vec<Route>,
    /// 1-based result page on the current route
    page: u32,
    scroll_offset: f64,
    viewport_height: f64,
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new(900.0)
    }
}

impl AppShell {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            route: Route::Home,
            history: Vec::new(),
            page: 1,
            scroll_offset: 0.0,
            viewport_height,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Run the built-in default for `action`. Returns false when it has none.
    pub fn apply_default(&mut self, action: &Action) -> bool {
        match action {
            Action::Navigate { target } => {
                self.navigate(*target);
                true
            }
            Action::Scroll {
                direction: direction @ (ScrollDirection::Up | ScrollDirection::Down),
            } => {
                self.scroll_by_viewport(*direction);
                true
            }
            _ => false,
        }
    }

    pub fn navigate(&mut self, target: NavTarget) {
        match target {
            NavTarget::Back => {
                if let Some(previous) = self.history.pop() {
                    self.enter(previous);
                }
            }
            NavTarget::NextPage => {
                self.page += 1;
                self.scroll_offset = 0.0;
            }
            _ => {
                if let Some(route) = Route::from_target(target) {
                    self.history.push(self.route);
                    self.enter(route);
                }
            }
        }
        tracing::debug!(route = ?self.route, page = self.page, "shell navigated");
    }

    pub fn scroll_by_viewport(&mut self, direction: ScrollDirection) {
        let delta = self.viewport_height * SCROLL_FRACTION;
        self.scroll_offset = match direction {
            ScrollDirection::Up => (self.scroll_offset - delta).max(0.0),
            ScrollDirection::Down => self.scroll_offset + delta,
            ScrollDirection::Top => 0.0,
            ScrollDirection::Bottom => self.scroll_offset,
        };
    }

    fn enter(&mut self, route: Route) {
        self.route = route;
        self.page = 1;
        self.scroll_offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_and_back() {
        let mut shell = AppShell::default();
        shell.navigate(NavTarget::Search);
        shell.navigate(NavTarget::NextPage);
        assert_eq!(shell.route(), Route::Search);
        assert_eq!(shell.page(), 2);

        shell.navigate(NavTarget::Settings);
        shell.navigate(NavTarget::Back);
        assert_eq!(shell.route(), Route::Search);
        assert_eq!(shell.page(), 1);

        shell.navigate(NavTarget::Back);
        shell.navigate(NavTarget::Back);
        assert_eq!(shell.route(), Route::Home);
    }

    #[test]
    fn test_scroll_by_viewport_fraction() {
        let mut shell = AppShell::new(1000.0);
        shell.scroll_by_viewport(ScrollDirection::Down);
        shell.scroll_by_viewport(ScrollDirection::Down);
        assert_eq!(shell.scroll_offset(), 1600.0);
        shell.scroll_by_viewport(ScrollDirection::Up);
        assert_eq!(shell.scroll_offset(), 800.0);
        shell.scroll_by_viewport(ScrollDirection::Up);
        shell.scroll_by_viewport(ScrollDirection::Up);
        assert_eq!(shell.scroll_offset(), 0.0);
    }

    #[test]
    fn test_only_nav_and_up_down_have_defaults() {
        let mut shell = AppShell::default();
        assert!(shell.apply_default(&Action::scroll(ScrollDirection::Down)));
        assert!(!shell.apply_default(&Action::scroll(ScrollDirection::Top)));
        assert!(!shell.apply_default(&Action::ResetFilters));
    }
}
