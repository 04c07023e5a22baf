//! Form field value objects

/// Input kind of a field, deciding which format check applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
}

/// A single entry of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The leading "Select ..." entry, which carries an empty value
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new(String::new(), label)
    }
}

/// Show/clear surface for a field's inline validation message
pub trait FieldPresenter {
    /// Replace any existing annotation with `message`
    fn show_field_error(&mut self, message: &str);

    /// Remove the annotation, if any
    fn clear_field_error(&mut self);
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    /// Select entries; the first one is the placeholder. Empty for inputs.
    pub options: Vec<SelectOption>,
    /// Inline error message currently shown beside the field
    pub error: Option<String>,
}

impl FormField {
    /// Create a new input field of the given kind
    pub fn input(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            value: String::new(),
            options: Vec::new(),
            error: None,
        }
    }

    /// Create a new select field holding only its placeholder
    pub fn select(name: &str, label: &str, placeholder: &str) -> Self {
        Self {
            options: vec![SelectOption::placeholder(placeholder)],
            ..Self::input(name, label, FieldKind::Select)
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_select(&self) -> bool {
        self.kind == FieldKind::Select
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Label shown to the user, with a marker on required fields
    pub fn display_label(&self) -> String {
        if self.required && !self.label.contains('*') {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Push a character to the field value (inputs only)
    pub fn push_char(&mut self, c: char) {
        if !self.is_select() {
            self.value.push(c);
        }
    }

    /// Remove the last character from the field value (inputs only)
    pub fn pop_char(&mut self) {
        if !self.is_select() {
            self.value.pop();
        }
    }

    /// Clear the field value; selects fall back to their placeholder
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Replace the option list and reset the selection to the placeholder
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.value.clear();
    }

    fn selected_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| o.value == self.value)
            .unwrap_or(0)
    }

    /// Move the selection forward, wrapping around. Returns true if it changed.
    pub fn select_next(&mut self) -> bool {
        if self.options.len() < 2 {
            return false;
        }
        let next = (self.selected_index() + 1) % self.options.len();
        self.value = self.options[next].value.clone();
        true
    }

    /// Move the selection backward, wrapping around. Returns true if it changed.
    pub fn select_prev(&mut self) -> bool {
        if self.options.len() < 2 {
            return false;
        }
        let current = self.selected_index();
        let prev = if current == 0 {
            self.options.len() - 1
        } else {
            current - 1
        };
        self.value = self.options[prev].value.clone();
        true
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.is_select() {
            self.options
                .get(self.selected_index())
                .map(|o| o.label.clone())
                .unwrap_or_default()
        } else {
            self.value.clone()
        }
    }
}

impl FieldPresenter for FormField {
    fn show_field_error(&mut self, message: &str) {
        self.clear_field_error();
        self.error = Some(message.to_string());
    }

    fn clear_field_error(&mut self) {
        self.error = None;
    }
}
