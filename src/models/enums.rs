use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(PanelType {
    Fbc => "fbc",
    LipidPanel => "lipid_panel",
    LiverFunction => "liver_function",
    ThyroidFunction => "thyroid_function",
});

str_enum!(StatusColor {
    Red => "red",
    Green => "green",
    Blue => "blue",
});

impl PanelType {
    /// Analysis route for this panel on the backend.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Fbc => "/api/analyzeFBC",
            Self::LipidPanel => "/api/analyzeLipidPanel",
            Self::LiverFunction => "/api/analyzeLFT",
            Self::ThyroidFunction => "/api/analyzeTFT",
        }
    }

    /// Human-readable panel name for report titles.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Fbc => "Full Blood Count",
            Self::LipidPanel => "Lipid Panel",
            Self::LiverFunction => "Liver Function Tests",
            Self::ThyroidFunction => "Thyroid Function Tests",
        }
    }
}

impl StatusColor {
    /// Classification the color stands for in the report legend.
    pub fn meaning(&self) -> &'static str {
        match self {
            Self::Red => "High",
            Self::Green => "Normal",
            Self::Blue => "Low",
        }
    }
}
