use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One structured attachment row of a valve entry (not a file upload).
///
/// Every field is free text and independently optional. Deserialization
/// accepts the legacy `设备等级` key for the grade, preferring it over
/// `device_grade` when both are present and non-empty.
#[derive(Debug, Clone, Default, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AttachmentRecord {
    pub attachment_type: String,
    pub name: String,
    pub device_grade: String,
    pub model: String,
    pub manufacturer: String,
}

/// The five editable inputs of an attachment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentField {
    Type,
    Name,
    Grade,
    Model,
    Manufacturer,
}

impl AttachmentField {
    pub const ALL: [Self; 5] = [
        Self::Type,
        Self::Name,
        Self::Grade,
        Self::Model,
        Self::Manufacturer,
    ];

    /// Input name used by the row template.
    #[must_use]
    pub const fn input_name(self) -> &'static str {
        match self {
            Self::Type => "attachment_type",
            Self::Name => "attachment_name",
            Self::Grade => "attachment_grade",
            Self::Model => "attachment_model",
            Self::Manufacturer => "attachment_manufacturer",
        }
    }

    #[must_use]
    pub fn from_input_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.input_name() == name)
    }
}

impl AttachmentRecord {
    #[must_use]
    pub fn field(&self, field: AttachmentField) -> &str {
        match field {
            AttachmentField::Type => &self.attachment_type,
            AttachmentField::Name => &self.name,
            AttachmentField::Grade => &self.device_grade,
            AttachmentField::Model => &self.model,
            AttachmentField::Manufacturer => &self.manufacturer,
        }
    }

    pub fn set_field(&mut self, field: AttachmentField, value: impl Into<String>) {
        let slot = match field {
            AttachmentField::Type => &mut self.attachment_type,
            AttachmentField::Name => &mut self.name,
            AttachmentField::Grade => &mut self.device_grade,
            AttachmentField::Model => &mut self.model,
            AttachmentField::Manufacturer => &mut self.manufacturer,
        };
        *slot = value.into();
    }

    /// Copy with every field trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            attachment_type: self.attachment_type.trim().to_string(),
            name: self.name.trim().to_string(),
            device_grade: self.device_grade.trim().to_string(),
            model: self.model.trim().to_string(),
            manufacturer: self.manufacturer.trim().to_string(),
        }
    }

    /// True when every field is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        AttachmentField::ALL
            .into_iter()
            .all(|field| self.field(field).trim().is_empty())
    }
}

#[derive(Deserialize)]
struct RawAttachment {
    #[serde(default)]
    attachment_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    device_grade: Option<String>,
    #[serde(default, rename = "设备等级")]
    legacy_grade: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    manufacturer: Option<String>,
}

impl From<RawAttachment> for AttachmentRecord {
    fn from(raw: RawAttachment) -> Self {
        let device_grade = raw
            .legacy_grade
            .filter(|grade| !grade.is_empty())
            .or(raw.device_grade)
            .unwrap_or_default();
        Self {
            attachment_type: raw.attachment_type.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            device_grade,
            model: raw.model.unwrap_or_default(),
            manufacturer: raw.manufacturer.unwrap_or_default(),
        }
    }
}

impl<'de> Deserialize<'de> for AttachmentRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAttachment::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn legacy_grade_key_populates_device_grade() {
        let record: AttachmentRecord =
            serde_json::from_str(r#"{"attachment_type":"positioner","设备等级":"A"}"#).unwrap();
        assert_eq!(record.device_grade, "A");
        assert_eq!(record.attachment_type, "positioner");
        assert_eq!(record.name, "");
    }

    #[test]
    fn legacy_grade_wins_over_canonical() {
        let record: AttachmentRecord =
            serde_json::from_str(r#"{"device_grade":"B","设备等级":"A"}"#).unwrap();
        assert_eq!(record.device_grade, "A");
    }

    #[test]
    fn empty_legacy_grade_falls_back_to_canonical() {
        let record: AttachmentRecord =
            serde_json::from_str(r#"{"device_grade":"B","设备等级":""}"#).unwrap();
        assert_eq!(record.device_grade, "B");
    }

    #[test]
    fn serializes_canonical_names_only() {
        let record = AttachmentRecord {
            device_grade: "A".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["device_grade"], "A");
        assert!(json.get("设备等级").is_none());
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        let mut record = AttachmentRecord::default();
        record.set_field(AttachmentField::Model, "   ");
        assert!(record.is_blank());
        record.set_field(AttachmentField::Manufacturer, " acme ");
        assert!(!record.is_blank());
        assert_eq!(record.trimmed().manufacturer, "acme");
    }

    #[test]
    fn input_names_map_back_to_fields() {
        for field in AttachmentField::ALL {
            assert_eq!(AttachmentField::from_input_name(field.input_name()), Some(field));
        }
        assert_eq!(AttachmentField::from_input_name("attachment_color"), None);
    }
}
