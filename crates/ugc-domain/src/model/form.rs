//! Free-text form fields with character limits

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProductName,
    TargetAudience,
    ManualDescription,
    CustomMessage,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::ProductName,
        FormField::TargetAudience,
        FormField::ManualDescription,
        FormField::CustomMessage,
    ];

    /// Maximum number of characters
    pub fn limit(self) -> usize {
        match self {
            FormField::ProductName => 100,
            FormField::TargetAudience => 200,
            FormField::ManualDescription => 1000,
            FormField::CustomMessage => 300,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::ProductName => "Product Name",
            FormField::TargetAudience => "Target Audience",
            FormField::ManualDescription => "Product Description",
            FormField::CustomMessage => "Custom Hook Message",
        }
    }
}

/// Counter colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStatus {
    Normal,
    /// Above 80% of the limit
    Warning,
    /// Above the limit
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    pub count: usize,
    pub limit: usize,
    pub status: CounterStatus,
}

impl CharCounter {
    pub fn for_text(text: &str, limit: usize) -> Self {
        let count = text.chars().count();
        let status = if count > limit {
            CounterStatus::Error
        } else if count * 10 > limit * 8 {
            CounterStatus::Warning
        } else {
            CounterStatus::Normal
        };
        Self {
            count,
            limit,
            status,
        }
    }
}

impl std::fmt::Display for CharCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.count, self.limit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormFields {
    pub product_name: String,
    pub target_audience: String,
    pub manual_description: String,
    pub custom_message: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ProductName => &self.product_name,
            FormField::TargetAudience => &self.target_audience,
            FormField::ManualDescription => &self.manual_description,
            FormField::CustomMessage => &self.custom_message,
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::ProductName => &mut self.product_name,
            FormField::TargetAudience => &mut self.target_audience,
            FormField::ManualDescription => &mut self.manual_description,
            FormField::CustomMessage => &mut self.custom_message,
        };
        *slot = value.to_string();
    }

    pub fn counter(&self, field: FormField) -> CharCounter {
        CharCounter::for_text(self.get(field), field.limit())
    }

    /// Fields whose text exceeds the limit
    pub fn over_limit(&self) -> Vec<FormField> {
        FormField::ALL
            .iter()
            .copied()
            .filter(|f| self.counter(*f).status == CounterStatus::Error)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_thresholds() {
        assert_eq!(CharCounter::for_text(&"a".repeat(80), 100).status, CounterStatus::Normal);
        assert_eq!(CharCounter::for_text(&"a".repeat(81), 100).status, CounterStatus::Warning);
        assert_eq!(CharCounter::for_text(&"a".repeat(100), 100).status, CounterStatus::Warning);
        assert_eq!(CharCounter::for_text(&"a".repeat(101), 100).status, CounterStatus::Error);
    }

    #[test]
    fn test_counter_counts_chars_not_bytes() {
        let counter = CharCounter::for_text("héllo", 100);
        assert_eq!(counter.count, 5);
        assert_eq!(counter.to_string(), "5/100");
    }

    #[test]
    fn test_over_limit() {
        let mut form = FormFields::default();
        form.set(FormField::CustomMessage, &"x".repeat(301));
        assert_eq!(form.over_limit(), vec![FormField::CustomMessage]);
    }
}
