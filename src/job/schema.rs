//! JSON schema types for label jobs.

use serde::Deserialize;

/// Top-level job document.
#[derive(Debug, Deserialize)]
pub struct JobDocument {
    /// Commands to send, in order.
    pub steps: Vec<JobStep>,
}

/// A symbolic value that may be written as a string or a bare number
/// (`"size": 24` and `"size": "24"` are the same).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JobSymbol {
    Text(String),
    Number(i64),
}

impl JobSymbol {
    pub fn to_symbol(&self) -> String {
        match self {
            JobSymbol::Text(s) => s.clone(),
            JobSymbol::Number(n) => n.to_string(),
        }
    }
}

/// Tab positions, or the keyword `"clear"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JobTabStops {
    Keyword(String),
    Positions(Vec<i64>),
}

/// A single command in the job.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum JobStep {
    // Mode and system
    RasterMode,
    TemplateMode,
    CommandMode,
    Initialize,
    SelectCharset {
        charset: String,
    },
    SelectCharCodeTable {
        table: String,
    },
    CutSetting {
        cut: String,
    },
    PrintPage {
        cut: String,
    },

    // Format
    RotatedPrinting {
        action: String,
    },
    Alignment {
        align: String,
    },
    /// `"1/8"`, `"1/6"`, `"n/180"` or `"n/60"`
    FeedAmount {
        amount: String,
    },
    PageLength {
        length: i64,
    },
    PageFormat {
        top: i64,
        bottom: i64,
    },
    LeftMargin {
        margin: i64,
    },
    RightMargin {
        margin: i64,
    },
    HorizontalTabs {
        positions: JobTabStops,
    },
    VerticalTabs {
        positions: JobTabStops,
    },

    // Position and line control
    ForwardFeed {
        amount: i64,
    },
    AbsVertPos {
        position: i64,
    },
    AbsHorzPos {
        position: i64,
    },
    RelHorzPos {
        offset: i64,
    },
    CarriageReturn,
    LineFeed,
    PageFeed,
    HorzTab,
    VertTab,

    // Text
    Bold {
        action: String,
    },
    Italic {
        action: String,
    },
    DoubleStrike {
        action: String,
    },
    DoubleWidth {
        action: String,
    },
    CompressedChar {
        action: String,
    },
    Frame {
        action: String,
    },
    /// `"off"` or a style number
    Underline {
        action: JobSymbol,
    },
    SelectFont {
        font: String,
    },
    CharSize {
        size: JobSymbol,
    },
    CharStyle {
        style: String,
    },
    PicaPitch,
    ElitePitch,
    MicronPitch,
    ProportionalChar {
        action: String,
    },
    CharSpacing {
        spacing: i64,
    },

    Barcode(JobBarcode),

    // Template mode
    TemplatePrint,
    ChooseTemplate {
        template: i64,
    },
    MachineOp {
        operation: String,
    },
    TemplateInit,
    PrintStartTrigger {
        #[serde(rename = "type")]
        trigger: String,
    },
    PrintStartCommand {
        command: String,
    },
    ReceivedCharCount {
        count: i64,
    },
    SelectDelim {
        delim: String,
    },
    SelectObj {
        name: String,
    },
    InsertIntoObj {
        #[serde(default)]
        data: Option<String>,
    },
    SelectAndInsert {
        name: String,
        #[serde(default)]
        data: Option<String>,
    },

    /// Literal label text
    Text {
        content: String,
    },
}

/// Barcode step. Omitted options keep the printer defaults.
#[derive(Debug, Deserialize)]
pub struct JobBarcode {
    pub data: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub parentheses: Option<String>,
    #[serde(default)]
    pub ratio: Option<String>,
    #[serde(default)]
    pub equalize: Option<String>,
    #[serde(default)]
    pub rss_symbol: Option<String>,
    #[serde(default)]
    pub horiz_char_rss: Option<i64>,
}
