//! URLs and iframe snippets for OEC's hosted visualizations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::build_call;
use crate::schema::TradeParams;

/// Languages the visualizations can be rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ar,
    De,
    El,
    Es,
    Fr,
    He,
    Hi,
    It,
    Ja,
    Ko,
    Mn,
    Nl,
    Pt,
    Ru,
    Tr,
    Vi,
    ZhCn,
}

impl Language {
    pub const ALL: [Language; 18] = [
        Language::En,
        Language::Ar,
        Language::De,
        Language::El,
        Language::Es,
        Language::Fr,
        Language::He,
        Language::Hi,
        Language::It,
        Language::Ja,
        Language::Ko,
        Language::Mn,
        Language::Nl,
        Language::Pt,
        Language::Ru,
        Language::Tr,
        Language::Vi,
        Language::ZhCn,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
            Language::De => "de",
            Language::El => "el",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::He => "he",
            Language::Hi => "hi",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Mn => "mn",
            Language::Nl => "nl",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Tr => "tr",
            Language::Vi => "vi",
            Language::ZhCn => "zh_cn",
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
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| format!("Unknown visualization language: {s}"))
    }
}

/// How a visualization is drawn. Defaults match the OEC site: an English
/// 930x400 tree map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualOptions {
    pub visualization: String,
    pub language: Language,
    pub width: u32,
    pub height: u32,
    pub name: Option<String>,
    pub id: Option<String>,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            visualization: "tree_map".to_string(),
            language: Language::En,
            width: 930,
            height: 400,
            name: None,
            id: None,
        }
    }
}

impl VisualOptions {
    pub fn new() -> Self {
        VisualOptions::default()
    }
    pub fn visualization(mut self, visualization: impl Into<String>) -> Self {
        self.visualization = visualization.into();
        self
    }
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Browser URL for a visualization; `embed` selects the chrome-less variant.
///
/// Note the year comes last here, unlike in trade data calls.
pub fn url_visual(base: &str, params: &TradeParams, options: &VisualOptions, embed: bool) -> String {
    let language = options.language.code();
    let mut parts = vec![language, "visualize"];
    if embed {
        parts.push("embed");
    }
    parts.extend([
        options.visualization.as_str(),
        params.classification.as_str(),
        params.trade_flow.as_str(),
        params.origin.as_str(),
        params.destination.as_str(),
        params.product.as_str(),
        params.year.as_str(),
    ]);
    build_call(base, parts)
}

/// HTML for embedding a visualization in a page as an iframe.
pub fn embed_visual(base: &str, params: &TradeParams, options: &VisualOptions) -> String {
    let src = url_visual(base, params, options, true);
    let mut iframe = format!(
        "<iframe src=\"{src}\" width={} height={}",
        options.width, options.height
    );
    if let Some(name) = &options.name {
        iframe.push_str(&format!(" name=\"{name}\""));
    }
    if let Some(id) = &options.id {
        iframe.push_str(&format!(" id=\"{id}\""));
    }
    iframe.push_str("></iframe>");
    iframe
}
