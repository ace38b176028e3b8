//! Descriptive metadata: dataset description and variable listing.

/// Separator between `title` and `summary` in a dataset description.
pub const DESCRIPTION_SEPARATOR: &str = "\n\n";

/// Descriptive attributes of one variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableInfo {
    pub name: String,
    /// Dimension names, outermost first
    pub dimensions: Vec<String>,
    pub long_name: Option<String>,
    pub standard_name: Option<String>,
    pub units: Option<String>,
}

impl VariableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Dimension names joined by `,`, or `None` for scalar variables.
    pub fn dimensions_label(&self) -> Option<String> {
        (!self.dimensions.is_empty()).then(|| self.dimensions.join(","))
    }

    /// `long_name` and `standard_name` joined by `,`, whichever are present.
    pub fn description(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.long_name, &self.standard_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        (!parts.is_empty()).then(|| parts.join(","))
    }
}

/// Dataset-level descriptive metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetMetadata {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub variables: Vec<VariableInfo>,
}

impl DatasetMetadata {
    /// `title` and `summary` separated by a blank line, whichever are present.
    pub fn description(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.title, &self.summary]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        (!parts.is_empty()).then(|| parts.join(DESCRIPTION_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_joins_title_and_summary() {
        let meta = DatasetMetadata {
            title: Some("NORA3 wave hindcast".to_string()),
            summary: Some("Hourly wave parameters".to_string()),
            variables: Vec::new(),
        };
        assert_eq!(
            meta.description().as_deref(),
            Some("NORA3 wave hindcast\n\nHourly wave parameters")
        );
    }

    #[test]
    fn test_description_absent_without_attributes() {
        assert_eq!(DatasetMetadata::default().description(), None);

        let summary_only = DatasetMetadata {
            summary: Some("Only a summary".to_string()),
            ..Default::default()
        };
        assert_eq!(summary_only.description().as_deref(), Some("Only a summary"));
    }

    #[test]
    fn test_variable_labels() {
        let mut var = VariableInfo::new("hs");
        var.dimensions = vec!["time".to_string(), "rlat".to_string(), "rlon".to_string()];
        var.long_name = Some("Significant wave height".to_string());
        var.standard_name = Some("sea_surface_wave_significant_height".to_string());

        assert_eq!(var.dimensions_label().as_deref(), Some("time,rlat,rlon"));
        assert_eq!(
            var.description().as_deref(),
            Some("Significant wave height,sea_surface_wave_significant_height")
        );
    }

    #[test]
    fn test_scalar_variable_has_no_dimensions() {
        let var = VariableInfo::new("projection_ob_tran");
        assert_eq!(var.dimensions_label(), None);
        assert_eq!(var.description(), None);
    }
}
