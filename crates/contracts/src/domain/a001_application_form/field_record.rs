use crate::shared::metadata::FieldConstraints;

/// Get/set access to field values by name
pub trait FieldRepository {
    fn value(&self, name: &str) -> Option<&str>;

    /// Returns `false` when no field has that name
    fn set_value(&mut self, name: &str, value: &str) -> bool;

    /// Name/value pairs in declaration order
    fn entries(&self) -> Vec<(&str, &str)>;
}

/// Declaration and current value of one form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    /// Owning step; `None` for fields not shown on any step
    pub step: Option<usize>,
    pub constraints: FieldConstraints,
    pub value: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            step: None,
            constraints: FieldConstraints::none(),
            value: String::new(),
        }
    }

    pub fn on_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_constraints(mut self, constraints: FieldConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// All fields of the form, in declaration order. Names are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    fields: Vec<FieldDef>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Redeclaring a name replaces the earlier declaration
    /// in place.
    pub fn register(&mut self, field: FieldDef) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn with(mut self, field: FieldDef) -> Self {
        self.register(field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required fields shown on `step`, in declaration order
    pub fn required_on_step(&self, step: usize) -> impl Iterator<Item = &FieldDef> {
        self.fields
            .iter()
            .filter(move |f| f.step == Some(step) && f.constraints.is_required())
    }
}

impl FieldRepository for FormFields {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|f| f.value.as_str())
    }

    fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect()
    }
}
