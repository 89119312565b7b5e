use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Язык, на котором модель заполняет документы планировки и анализа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "fi")]
    Finnish,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            Language::Finnish => &FINNISH,
            Language::English => &ENGLISH,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Finnish => "fi",
            Language::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fi" | "finnish" => Ok(Language::Finnish),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("unknown language '{}' (expected 'fi' or 'en')", other)),
        }
    }
}

/// Имена ключей JSON-документа планировки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutKeys {
    pub name: &'static str,
    pub iteration: &'static str,
    pub dimensions: &'static str,
    pub improvements: &'static str,
    pub cabinets: &'static str,
    pub appliances: &'static str,
    /// Ширина размещаемого элемента, мм
    pub item_width: &'static str,
    pub dimension_width: &'static str,
    pub dimension_depth: &'static str,
    pub dimension_height: &'static str,
    /// Префикс текста `improvements` по умолчанию ("Iteration 3")
    pub iteration_label: &'static str,
}

/// Имена ключей JSON-документа анализа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisKeys {
    pub feasible: &'static str,
    pub problems: &'static str,
    pub suggestions: &'static str,
    pub next_step: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub language: Language,
    pub layout: LayoutKeys,
    pub analysis: AnalysisKeys,
}

pub static FINNISH: Vocabulary = Vocabulary {
    language: Language::Finnish,
    layout: LayoutKeys {
        name: "nimi",
        iteration: "iteraatio",
        dimensions: "mitat",
        improvements: "parannukset",
        cabinets: "kaapit",
        appliances: "kodinkoneet",
        item_width: "leveys_mm",
        dimension_width: "leveys_mm",
        dimension_depth: "syvyys_mm",
        dimension_height: "korkeus_mm",
        iteration_label: "Iteraatio",
    },
    analysis: AnalysisKeys {
        feasible: "toimiva",
        problems: "ongelmat",
        suggestions: "parannusehdotukset",
        next_step: "seuraava_askel",
    },
};

pub static ENGLISH: Vocabulary = Vocabulary {
    language: Language::English,
    layout: LayoutKeys {
        name: "name",
        iteration: "iteration",
        dimensions: "dimensions",
        improvements: "improvements",
        cabinets: "cabinets",
        appliances: "appliances",
        item_width: "width_mm",
        dimension_width: "width",
        dimension_depth: "depth",
        dimension_height: "height",
        iteration_label: "Iteration",
    },
    analysis: AnalysisKeys {
        feasible: "feasible",
        problems: "problems",
        suggestions: "suggestions",
        next_step: "next_step",
    },
};
