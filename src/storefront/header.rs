/// Hides the header and filter bar while scrolling down, shows them again on
/// the way up or near the top.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCollapse {
    header_height: f32,
    last_scroll_top: f32,
    hidden: bool,
}

impl HeaderCollapse {
    pub fn new(header_height: f32) -> Self {
        Self {
            header_height,
            last_scroll_top: 0.0,
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn on_scroll(&mut self, scroll_top: f32) -> bool {
        let half = self.header_height / 2.0;
        let scrolling_down = scroll_top > self.last_scroll_top;

        if scrolling_down && scroll_top > half {
            self.hidden = true;
        } else if !scrolling_down || scroll_top <= half {
            self.hidden = false;
        }

        self.last_scroll_top = scroll_top.max(0.0);
        self.hidden
    }

    pub fn reset(&mut self) {
        self.last_scroll_top = 0.0;
        self.hidden = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hides_when_scrolling_down_past_half() {
        let mut header = HeaderCollapse::new(48.0);
        assert!(!header.on_scroll(16.0));
        assert!(header.on_scroll(32.0));
        assert!(header.on_scroll(200.0));
    }

    #[test]
    fn test_shows_when_scrolling_up() {
        let mut header = HeaderCollapse::new(48.0);
        header.on_scroll(200.0);
        assert!(header.is_hidden());
        assert!(!header.on_scroll(180.0));
    }

    #[test]
    fn test_overscroll_clamps_last_position() {
        let mut header = HeaderCollapse::new(48.0);
        header.on_scroll(-20.0);
        assert!(!header.is_hidden());
        assert!(!header.on_scroll(10.0));
        assert!(header.on_scroll(30.0));
    }
}
