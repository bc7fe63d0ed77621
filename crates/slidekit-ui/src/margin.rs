/// Keeps a fixed margin free when the slider is measured, so a fully
/// expanded slider never covers the whole container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinVerticalMargin {
    margin: i32,
}

impl MinVerticalMargin {
    pub fn new(margin: i32) -> Self {
        Self {
            margin: margin.max(0),
        }
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Returns `true` when the margin changed and the host needs a new
    /// measure pass.
    pub fn set_margin(&mut self, margin: i32) -> bool {
        let margin = margin.max(0);
        let changed = self.margin != margin;
        self.margin = margin;
        changed
    }

    /// Height budget left for the content out of `max_height`.
    pub fn constrain(&self, max_height: i32) -> i32 {
        if self.margin > 0 {
            (max_height - self.margin).max(0)
        } else {
            max_height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_taken_from_the_budget() {
        let margin = MinVerticalMargin::new(120);
        assert_eq!(margin.constrain(800), 680);
        assert_eq!(margin.constrain(100), 0);
        assert_eq!(MinVerticalMargin::default().constrain(800), 800);
    }

    #[test]
    fn set_margin_reports_changes() {
        let mut margin = MinVerticalMargin::default();
        assert!(margin.set_margin(24));
        assert!(!margin.set_margin(24));
        assert!(margin.set_margin(-5));
        assert_eq!(margin.margin(), 0);
    }
}
