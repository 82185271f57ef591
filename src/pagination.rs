//! Splits a form's top-level fields into pages and tracks the respondent's position.
//!
//! Page breaks only split the root sequence; a page break nested in a container is ignored.
//! The break itself is not rendered: its label names the page that follows it.

use crate::field::{Field, FieldType};
use serde::Serialize;

pub const FIRST_STEP_LABEL: &str = "Start";
pub const LAST_STEP_LABEL: &str = "Submit";

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub label: String,
    pub fields: Vec<&'a Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<'a> {
    pub pages: Vec<Page<'a>>,
    /// `"Start"`, the label of every page break, then `"Submit"`.
    pub step_labels: Vec<String>,
    pub has_progress_tracker: bool,
}

/// Shown at the top of a multi-page form that contains a progress tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressIndicator {
    /// Zero-based.
    pub current_step: usize,
    pub total_steps: usize,
    pub label: String,
}

impl ProgressIndicator {
    /// `"Step 2 of 3"`.
    pub fn title(&self) -> String {
        format!("Step {} of {}", self.current_step + 1, self.total_steps)
    }

    pub fn fraction(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        self.current_step as f64 / self.total_steps as f64
    }
}

/// Splits `fields` at top-level page breaks.
///
/// There is always at least one page, possibly empty. Progress trackers are recorded in
/// `has_progress_tracker` and kept out of the pages.
pub fn paginate(fields: &[Field]) -> Pagination<'_> {
    let mut pages = Vec::new();
    let mut step_labels = vec![FIRST_STEP_LABEL.to_string()];
    let mut has_progress_tracker = false;
    let mut current = Page {
        label: FIRST_STEP_LABEL.to_string(),
        fields: Vec::new(),
    };

    for field in fields {
        match field.field_type() {
            FieldType::PageBreak => {
                step_labels.push(field.label.clone());
                let next = Page {
                    label: field.label.clone(),
                    fields: Vec::new(),
                };
                pages.push(std::mem::replace(&mut current, next));
            }
            FieldType::ProgressTrackerField => has_progress_tracker = true,
            _ => current.fields.push(field),
        }
    }
    pages.push(current);
    step_labels.push(LAST_STEP_LABEL.to_string());

    Pagination {
        pages,
        step_labels,
        has_progress_tracker,
    }
}

impl<'a> Pagination<'a> {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_multi_page(&self) -> bool {
        self.pages.len() > 1
    }

    pub fn page(&self, index: usize) -> Option<&Page<'a>> {
        self.pages.get(index)
    }

    /// The indicator for page `current`, or `None` without a tracker or on a single page.
    pub fn progress(&self, current: usize) -> Option<ProgressIndicator> {
        if !self.has_progress_tracker || !self.is_multi_page() {
            return None;
        }
        let current_step = current.min(self.page_count() - 1);
        Some(ProgressIndicator {
            current_step,
            total_steps: self.page_count(),
            label: self.step_labels.get(current_step).cloned().unwrap_or_default(),
        })
    }
}

/// Linear page navigation: one step forward or back at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigator {
    current: usize,
    page_count: usize,
}

impl PageNavigator {
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 0,
            page_count: page_count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.page_count
    }

    /// On the last page the form offers "Submit" instead of "Next".
    pub fn is_last(&self) -> bool {
        !self.can_go_next()
    }

    /// Moves forward one page; returns whether it moved.
    pub fn next(&mut self) -> bool {
        let moved = self.can_go_next();
        if moved {
            self.current += 1;
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.can_go_back();
        if moved {
            self.current -= 1;
        }
        moved
    }

    /// Adopts a new page count, returning to the first page when it changes.
    pub fn resize(&mut self, page_count: usize) {
        let page_count = page_count.max(1);
        if page_count != self.page_count {
            self.page_count = page_count;
            self.current = 0;
        }
    }
}
