//! Form state management and the tax form struct

use super::field::{FieldKind, FieldPresenter, FormField, SelectOption};

/// Placeholder entry of the state select
pub const STATE_PLACEHOLDER: &str = "Select State";
/// Placeholder entry of the district select
pub const DISTRICT_PLACEHOLDER: &str = "Select District";

/// Number of focusable rows: five fields plus the submit button
const ROW_COUNT: usize = 6;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// The lead submission form: name, contact details and the state/district pair
#[derive(Debug, Clone)]
pub struct TaxForm {
    pub full_name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub state: FormField,
    pub district: FormField,
    /// Anti-forgery token, submitted with the fields and as a header
    pub csrf_token: String,
    pub active_field_index: usize,
}

impl TaxForm {
    pub const STATE_INDEX: usize = 3;
    #[cfg(test)]
    pub const DISTRICT_INDEX: usize = 4;
    /// Row index of the submit button
    pub const SUBMIT_INDEX: usize = 5;

    pub fn new(csrf_token: impl Into<String>) -> Self {
        Self {
            full_name: FormField::input("fullName", "Full Name", FieldKind::Text).required(),
            email: FormField::input("email", "Email", FieldKind::Email).required(),
            phone: FormField::input("phone", "Phone", FieldKind::Tel).required(),
            state: FormField::select("state", "State", STATE_PLACEHOLDER).required(),
            district: FormField::select("district", "District", DISTRICT_PLACEHOLDER).required(),
            csrf_token: csrf_token.into(),
            active_field_index: 0,
        }
    }

    /// Replace the parent select entries, keeping the placeholder first
    pub fn set_state_options(&mut self, options: impl IntoIterator<Item = SelectOption>) {
        let mut all = vec![SelectOption::placeholder(STATE_PLACEHOLDER)];
        all.extend(options);
        self.state.set_options(all);
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == Self::SUBMIT_INDEX
    }

    pub fn fields(&self) -> [&FormField; 5] {
        [
            &self.full_name,
            &self.email,
            &self.phone,
            &self.state,
            &self.district,
        ]
    }

    pub fn fields_mut(&mut self) -> [&mut FormField; 5] {
        [
            &mut self.full_name,
            &mut self.email,
            &mut self.phone,
            &mut self.state,
            &mut self.district,
        ]
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields_mut().into_iter().nth(index)
    }

    /// Indices of fields carrying the `required` attribute
    pub fn required_indices(&self) -> Vec<usize> {
        self.fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.required)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the first field showing an error annotation
    pub fn first_error_index(&self) -> Option<usize> {
        self.fields().iter().position(|f| f.has_error())
    }

    /// Name/value pairs in form order, hidden token last
    pub fn form_data(&self) -> Vec<(String, String)> {
        let mut data: Vec<(String, String)> = self
            .fields()
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect();
        data.push(("csrf_token".to_string(), self.csrf_token.clone()));
        data
    }

    /// Clear every value and annotation. The hidden token survives.
    pub fn reset(&mut self) {
        for field in self.fields_mut() {
            field.clear();
            field.clear_field_error();
        }
        self.active_field_index = 0;
    }
}

impl Default for TaxForm {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Form for TaxForm {
    fn field_count(&self) -> usize {
        ROW_COUNT
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::SUBMIT_INDEX);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let index = self.active_field_index;
        self.field_mut(index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_form() -> TaxForm {
        let mut form = TaxForm::new("token-123");
        form.full_name.value = "Asha Rawat".to_string();
        form.email.value = "asha@example.com".to_string();
        form.phone.value = "9876543210".to_string();
        form.set_state_options([SelectOption::new("uttarakhand", "Uttarakhand")]);
        form.state.value = "uttarakhand".to_string();
        form.district.set_options(vec![
            SelectOption::placeholder(DISTRICT_PLACEHOLDER),
            SelectOption::new("almora", "Almora"),
        ]);
        form.district.value = "almora".to_string();
        form
    }

    #[test]
    fn test_new_has_correct_defaults() {
        let form = TaxForm::new("t");
        assert_eq!(form.active_field_index, 0);
        assert_eq!(form.full_name.name, "fullName");
        assert_eq!(form.phone.kind, FieldKind::Tel);
        assert!(form.fields().iter().all(|f| f.required));
        assert_eq!(form.district.display_value(), DISTRICT_PLACEHOLDER);
    }

    #[test]
    fn test_field_count_includes_submit_row() {
        let form = TaxForm::default();
        assert_eq!(form.field_count(), 6);
    }

    #[test]
    fn test_next_field_cycles() {
        let mut form = TaxForm::default();
        for _ in 0..6 {
            form.next_field();
        }
        assert_eq!(form.active_field_index, 0);
    }

    #[test]
    fn test_prev_field_cycles_to_submit() {
        let mut form = TaxForm::default();
        form.prev_field();
        assert!(form.is_submit_active());
        assert!(form.get_active_field_mut().is_none());
    }

    #[test]
    fn test_set_active_field_clamps() {
        let mut form = TaxForm::default();
        form.set_active_field(100);
        assert_eq!(form.active_field_index, TaxForm::SUBMIT_INDEX);
    }

    #[test]
    fn test_get_field_returns_correct_fields() {
        let form = TaxForm::default();
        assert_eq!(form.get_field(0).unwrap().name, "fullName");
        assert_eq!(form.get_field(1).unwrap().name, "email");
        assert_eq!(form.get_field(2).unwrap().name, "phone");
        assert_eq!(form.get_field(3).unwrap().name, "state");
        assert_eq!(form.get_field(4).unwrap().name, "district");
        assert!(form.get_field(5).is_none());
    }

    #[test]
    fn test_form_data_carries_token_last() {
        let form = filled_form();
        let data = form.form_data();
        assert_eq!(
            data,
            vec![
                ("fullName".to_string(), "Asha Rawat".to_string()),
                ("email".to_string(), "asha@example.com".to_string()),
                ("phone".to_string(), "9876543210".to_string()),
                ("state".to_string(), "uttarakhand".to_string()),
                ("district".to_string(), "almora".to_string()),
                ("csrf_token".to_string(), "token-123".to_string()),
            ]
        );
    }

    #[test]
    fn test_reset_clears_values_and_errors_but_keeps_token() {
        let mut form = filled_form();
        form.email.show_field_error("bad");
        form.active_field_index = 3;
        form.reset();

        assert!(form.fields().iter().all(|f| f.value.is_empty()));
        assert!(form.fields().iter().all(|f| !f.has_error()));
        assert_eq!(form.csrf_token, "token-123");
        assert_eq!(form.active_field_index, 0);
    }

    #[test]
    fn test_first_error_index() {
        let mut form = TaxForm::default();
        assert_eq!(form.first_error_index(), None);
        form.district.show_field_error("x");
        form.email.show_field_error("y");
        assert_eq!(form.first_error_index(), Some(1));
    }
}
