//! Search box and filter dropdowns shown under the header.
//!
//! Neither narrows the catalog yet; queries and selections are only logged.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> DropdownOption {
    DropdownOption { value, label }
}

pub const COLLECTIONS: [DropdownOption; 6] = [
    option("all", "Barchasi"),
    option("durovscap", "Durov's Cap"),
    option("plushpepe", "Plush Pepe"),
    option("skullflower", "Skull Flower"),
    option("starnotepad", "Star Notepad"),
    option("deskcalendar", "Desk Calendar"),
];

pub const SORT_ORDERS: [DropdownOption; 3] = [
    option("newest", "Eng yangi"),
    option("price-asc", "Arzonroq"),
    option("price-desc", "Qimmatroq"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Dropdown {
    title: &'static str,
    options: &'static [DropdownOption],
    selected: usize,
    highlighted: usize,
    open: bool,
}

impl Dropdown {
    pub fn new(title: &'static str, options: &'static [DropdownOption]) -> Self {
        Self {
            title,
            options,
            selected: 0,
            highlighted: 0,
            open: false,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn options(&self) -> &'static [DropdownOption] {
        self.options
    }

    pub fn selected(&self) -> Option<&DropdownOption> {
        self.options.get(self.selected)
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
        self.highlighted = self.selected;
    }
}

/// Filters and search area. Only one dropdown is open at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBar {
    query: String,
    dropdowns: Vec<Dropdown>,
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new(vec![
            Dropdown::new("Kolleksiya", &COLLECTIONS),
            Dropdown::new("Saralash", &SORT_ORDERS),
        ])
    }
}

impl FilterBar {
    pub fn new(dropdowns: Vec<Dropdown>) -> Self {
        Self {
            query: String::new(),
            dropdowns,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dropdowns(&self) -> &[Dropdown] {
        &self.dropdowns
    }

    pub fn open_dropdown(&self) -> Option<usize> {
        self.dropdowns.iter().position(Dropdown::is_open)
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        tracing::info!(query = %self.query, "Search query");
    }

    pub fn pop_char(&mut self) {
        if self.query.pop().is_some() {
            tracing::info!(query = %self.query, "Search query");
        }
    }

    /// Open or close dropdown `index`, closing any other. Returns whether it
    /// is open afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.dropdowns.len() {
            return false;
        }
        let opening = !self.dropdowns[index].open;
        self.close_all();
        self.dropdowns[index].open = opening;
        opening
    }

    pub fn close_all(&mut self) {
        for dropdown in &mut self.dropdowns {
            dropdown.close();
        }
    }

    /// Move the highlight inside the open dropdown, wrapping at the ends.
    pub fn move_highlight(&mut self, step: i64) {
        let Some(index) = self.open_dropdown() else {
            return;
        };
        let dropdown = &mut self.dropdowns[index];
        let len = dropdown.options.len() as i64;
        if len == 0 {
            return;
        }
        dropdown.highlighted = (dropdown.highlighted as i64 + step).rem_euclid(len) as usize;
    }

    /// Select the highlighted option of the open dropdown and close it.
    pub fn confirm(&mut self) -> Option<&'static str> {
        let index = self.open_dropdown()?;
        let highlighted = self.dropdowns[index].highlighted;
        self.select(index, highlighted)
    }

    pub fn select(&mut self, index: usize, option: usize) -> Option<&'static str> {
        let dropdown = self.dropdowns.get_mut(index)?;
        let value = dropdown.options.get(option)?.value;
        dropdown.selected = option;
        dropdown.close();
        tracing::info!(filter = dropdown.title, value, "Selected");
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_edits() {
        let mut bar = FilterBar::default();
        for c in "pepe".chars() {
            bar.push_char(c);
        }
        assert_eq!(bar.query(), "pepe");

        bar.pop_char();
        assert_eq!(bar.query(), "pep");

        let mut empty = FilterBar::default();
        empty.pop_char();
        assert_eq!(empty.query(), "");
    }

    #[test]
    fn test_opening_one_dropdown_closes_the_other() {
        let mut bar = FilterBar::default();
        assert!(bar.toggle(0));
        assert_eq!(bar.open_dropdown(), Some(0));

        assert!(bar.toggle(1));
        assert_eq!(bar.open_dropdown(), Some(1));
        assert!(!bar.dropdowns()[0].is_open());

        assert!(!bar.toggle(1));
        assert_eq!(bar.open_dropdown(), None);
        assert!(!bar.toggle(7));
    }

    #[test]
    fn test_highlight_wraps_and_confirm_selects() {
        let mut bar = FilterBar::default();
        bar.toggle(1);
        bar.move_highlight(-1);
        assert_eq!(bar.dropdowns()[1].highlighted(), 2);

        assert_eq!(bar.confirm(), Some("price-desc"));
        assert_eq!(bar.open_dropdown(), None);
        assert_eq!(bar.dropdowns()[1].selected().unwrap().label, "Qimmatroq");
        assert_eq!(bar.confirm(), None);
    }

    #[test]
    fn test_closing_discards_highlight() {
        let mut bar = FilterBar::default();
        bar.toggle(0);
        bar.move_highlight(2);
        bar.close_all();

        assert_eq!(bar.dropdowns()[0].selected().unwrap().value, "all");
        bar.toggle(0);
        assert_eq!(bar.dropdowns()[0].highlighted(), 0);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut bar = FilterBar::default();
        assert_eq!(bar.select(0, 99), None);
        assert_eq!(bar.select(5, 0), None);
        assert_eq!(bar.select(0, 3), Some("skullflower"));
    }
}
