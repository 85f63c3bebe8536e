use super::enums::PanelType;

/// One required numeric input of a panel: static schema only, no user data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Unique key within the panel; also the JSON field name on submission.
    pub key: &'static str,
    /// Input label shown next to the field.
    pub label: &'static str,
    /// Unit suffix appended to the raw value in the report table.
    pub unit: &'static str,
    /// Expected-range text shown in the report table.
    pub expected_range: &'static str,
}

const FBC_FIELDS: &[Field] = &[
    Field {
        key: "whiteBloodCells",
        label: "White Blood Cells (10^9/L)",
        unit: "x 10⁹/L",
        expected_range: "4.0-11.0 x 10⁹/L",
    },
    Field {
        key: "redBloodCells",
        label: "Red Blood Cells (10^12/L)",
        unit: "x 10¹²/L",
        expected_range: "4.5-5.9 x 10¹²/L",
    },
    Field {
        key: "hemoglobin",
        label: "Hemoglobin (g/L)",
        unit: "g/L",
        expected_range: "130-180 g/L",
    },
    Field {
        key: "platelets",
        label: "Platelets (10^9/L)",
        unit: "x 10⁹/L",
        expected_range: "150-450 x 10⁹/L",
    },
];

const LIPID_FIELDS: &[Field] = &[
    Field {
        key: "cholesterol",
        label: "Cholesterol (mg/dL)",
        unit: "mg/dL",
        expected_range: "Less than 200 mg/dL",
    },
    Field {
        key: "triglycerides",
        label: "Triglycerides (mg/dL)",
        unit: "mg/dL",
        expected_range: "Less than 150 mg/dL",
    },
    Field {
        key: "hdl",
        label: "HDL (mg/dL)",
        unit: "mg/dL",
        expected_range: "60 mg/dL or higher",
    },
    Field {
        key: "ldl",
        label: "LDL (mg/dL)",
        unit: "mg/dL",
        expected_range: "Less than 100 mg/dL",
    },
];

const LIVER_FIELDS: &[Field] = &[
    Field {
        key: "alt",
        label: "ALT (U/L)",
        unit: "U/L",
        expected_range: "7 - 56 U/L",
    },
    Field {
        key: "ast",
        label: "AST (U/L)",
        unit: "U/L",
        expected_range: "10 - 40 U/L",
    },
    Field {
        key: "alp",
        label: "ALP (U/L)",
        unit: "U/L",
        expected_range: "44 - 147 U/L",
    },
    Field {
        key: "bilirubin",
        label: "Bilirubin (mg/dL)",
        unit: "mg/dL",
        expected_range: "0.1 - 1.2 mg/dL",
    },
];

const THYROID_FIELDS: &[Field] = &[
    Field {
        key: "tsh",
        label: "TSH (mIU/L)",
        unit: "mIU/L",
        expected_range: "0.4 - 4.0 mIU/L",
    },
    Field {
        key: "t3",
        label: "T3 (ng/mL)",
        unit: "ng/mL",
        expected_range: "0.8 - 2.0 ng/mL",
    },
    Field {
        key: "t4",
        label: "T4 (µg/dL)",
        unit: "µg/dL",
        expected_range: "4.5 - 12.0 µg/dL",
    },
];

/// The ordered, immutable field schema for a panel.
///
/// Order matters: report rows are emitted in this order, and it is the
/// fallback binding order for interpretation records without a usable
/// `test` key.
pub fn field_set(panel: PanelType) -> &'static [Field] {
    match panel {
        PanelType::Fbc => FBC_FIELDS,
        PanelType::LipidPanel => LIPID_FIELDS,
        PanelType::LiverFunction => LIVER_FIELDS,
        PanelType::ThyroidFunction => THYROID_FIELDS,
    }
}
