//! The preview runtime: a form as a respondent fills it in.

use crate::field::FieldId;
use crate::form::SavedForm;
use crate::logic::{FormState, QueryParams, evaluate, seed_values};
use crate::pagination::{PageNavigator, Pagination, ProgressIndicator, paginate};
use crate::render::{FieldView, ValueChange, visible_views};
use crate::tree::FieldTree;
use crate::validation::{ValidationIssue, validate_page};
use crate::value::{InputValues, Value};

/// Input values, derived state and page position of one run of a form.
///
/// Derived state is recomputed wholesale after every change.
#[derive(Debug, Clone)]
pub struct FormRun {
    fields: FieldTree,
    values: InputValues,
    state: FormState,
    navigator: PageNavigator,
}

impl FormRun {
    /// Seeds values from defaults and URL parameters, then evaluates.
    pub fn new(form: &SavedForm, params: &QueryParams) -> Self {
        let fields = form.fields.clone();
        let values = seed_values(&fields, &form.form_settings, params);
        let state = evaluate(&fields, &values);
        let navigator = PageNavigator::new(paginate(fields.fields()).page_count());
        Self {
            fields,
            values,
            state,
            navigator,
        }
    }

    pub fn fields(&self) -> &FieldTree {
        &self.fields
    }

    pub fn values(&self) -> &InputValues {
        &self.values
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn set_value(&mut self, field_id: impl Into<FieldId>, value: Value) -> &FormState {
        self.values.insert(field_id.into(), value);
        self.state = evaluate(&self.fields, &self.values);
        &self.state
    }

    pub fn apply(&mut self, change: ValueChange) -> &FormState {
        self.set_value(change.field_id, change.value)
    }

    /// Swaps in an edited tree, keeping entered values and returning to the first page when
    /// the number of pages changed.
    pub fn reload(&mut self, fields: FieldTree) {
        self.fields = fields;
        self.state = evaluate(&self.fields, &self.values);
        self.navigator
            .resize(paginate(self.fields.fields()).page_count());
    }

    pub fn pagination(&self) -> Pagination<'_> {
        paginate(self.fields.fields())
    }

    pub fn current_page(&self) -> usize {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    /// Views of the current page's visible fields.
    pub fn current_page_views(&self) -> Vec<FieldView<'_>> {
        let pagination = self.pagination();
        match pagination.page(self.navigator.current()) {
            Some(page) => visible_views(page.fields.iter().copied(), &self.state),
            None => Vec::new(),
        }
    }

    pub fn progress(&self) -> Option<ProgressIndicator> {
        self.pagination().progress(self.navigator.current())
    }

    pub fn next_page(&mut self) -> bool {
        self.navigator.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigator.previous()
    }

    pub fn is_last_page(&self) -> bool {
        self.navigator.is_last()
    }

    pub fn validate_current_page(&self) -> Vec<ValidationIssue> {
        validate_page(&self.current_page_views())
    }

    /// Advances only if the current page validates. Returns whether the page changed.
    pub fn next_page_validated(&mut self) -> Result<bool, Vec<ValidationIssue>> {
        let issues = self.validate_current_page();
        if issues.is_empty() {
            Ok(self.next_page())
        } else {
            Err(issues)
        }
    }
}
