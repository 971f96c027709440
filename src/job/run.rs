//! Running a job document through a session.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::schema::*;
use crate::error::PrintError;
use crate::protocol::barcode::BarcodeOptions;
use crate::protocol::commands::TabStops;
use crate::protocol::options::Switch;
use crate::session::{Advisory, PrinterSession};
use crate::transport::Transport;

/// Errors from loading or running a job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid job document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A step failed; every earlier step was already sent.
    #[error("step {index} ({op}): {source}")]
    Step {
        index: usize,
        op: &'static str,
        #[source]
        source: PrintError,
    },
}

/// Advisory raised by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepAdvisory {
    pub index: usize,
    pub advisory: Advisory,
}

/// Outcome of a completed job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub steps_sent: usize,
    pub advisories: Vec<StepAdvisory>,
}

impl JobDocument {
    pub fn from_json(json: &str) -> Result<Self, JobError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, JobError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| JobError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate and send each step in order, stopping at the first failure.
    pub fn run<T: Transport>(&self, session: &mut PrinterSession<T>) -> Result<JobReport, JobError> {
        let mut report = JobReport::default();
        for (index, step) in self.steps.iter().enumerate() {
            debug!(index, op = step.op(), "running step");
            let advisory = step.apply(session).map_err(|source| JobError::Step {
                index,
                op: step.op(),
                source,
            })?;
            if let Some(advisory) = advisory {
                report.advisories.push(StepAdvisory { index, advisory });
            }
            report.steps_sent += 1;
        }
        Ok(report)
    }
}

// ============ Step Dispatch ============

impl JobStep {
    /// Operation name, as written in the `op` field.
    pub fn op(&self) -> &'static str {
        match self {
            JobStep::RasterMode => "raster_mode",
            JobStep::TemplateMode => "template_mode",
            JobStep::CommandMode => "command_mode",
            JobStep::Initialize => "initialize",
            JobStep::SelectCharset { .. } => "select_charset",
            JobStep::SelectCharCodeTable { .. } => "select_char_code_table",
            JobStep::CutSetting { .. } => "cut_setting",
            JobStep::PrintPage { .. } => "print_page",
            JobStep::RotatedPrinting { .. } => "rotated_printing",
            JobStep::Alignment { .. } => "alignment",
            JobStep::FeedAmount { .. } => "feed_amount",
            JobStep::PageLength { .. } => "page_length",
            JobStep::PageFormat { .. } => "page_format",
            JobStep::LeftMargin { .. } => "left_margin",
            JobStep::RightMargin { .. } => "right_margin",
            JobStep::HorizontalTabs { .. } => "horizontal_tabs",
            JobStep::VerticalTabs { .. } => "vertical_tabs",
            JobStep::ForwardFeed { .. } => "forward_feed",
            JobStep::AbsVertPos { .. } => "abs_vert_pos",
            JobStep::AbsHorzPos { .. } => "abs_horz_pos",
            JobStep::RelHorzPos { .. } => "rel_horz_pos",
            JobStep::CarriageReturn => "carriage_return",
            JobStep::LineFeed => "line_feed",
            JobStep::PageFeed => "page_feed",
            JobStep::HorzTab => "horz_tab",
            JobStep::VertTab => "vert_tab",
            JobStep::Bold { .. } => "bold",
            JobStep::Italic { .. } => "italic",
            JobStep::DoubleStrike { .. } => "double_strike",
            JobStep::DoubleWidth { .. } => "double_width",
            JobStep::CompressedChar { .. } => "compressed_char",
            JobStep::Frame { .. } => "frame",
            JobStep::Underline { .. } => "underline",
            JobStep::SelectFont { .. } => "select_font",
            JobStep::CharSize { .. } => "char_size",
            JobStep::CharStyle { .. } => "char_style",
            JobStep::PicaPitch => "pica_pitch",
            JobStep::ElitePitch => "elite_pitch",
            JobStep::MicronPitch => "micron_pitch",
            JobStep::ProportionalChar { .. } => "proportional_char",
            JobStep::CharSpacing { .. } => "char_spacing",
            JobStep::Barcode(_) => "barcode",
            JobStep::TemplatePrint => "template_print",
            JobStep::ChooseTemplate { .. } => "choose_template",
            JobStep::MachineOp { .. } => "machine_op",
            JobStep::TemplateInit => "template_init",
            JobStep::PrintStartTrigger { .. } => "print_start_trigger",
            JobStep::PrintStartCommand { .. } => "print_start_command",
            JobStep::ReceivedCharCount { .. } => "received_char_count",
            JobStep::SelectDelim { .. } => "select_delim",
            JobStep::SelectObj { .. } => "select_obj",
            JobStep::InsertIntoObj { .. } => "insert_into_obj",
            JobStep::SelectAndInsert { .. } => "select_and_insert",
            JobStep::Text { .. } => "text",
        }
    }

    /// Send this step through `session`.
    pub fn apply<T: Transport>(
        &self,
        session: &mut PrinterSession<T>,
    ) -> Result<Option<Advisory>, PrintError> {
        match self {
            JobStep::RasterMode => session.raster_mode()?,
            JobStep::TemplateMode => session.template_mode()?,
            JobStep::CommandMode => session.command_mode()?,
            JobStep::Initialize => session.initialize()?,
            JobStep::SelectCharset { charset } => session.select_charset(charset.parse()?)?,
            JobStep::SelectCharCodeTable { table } => {
                session.select_char_code_table(table.parse()?)?
            }
            JobStep::CutSetting { cut } => session.cut_setting(cut.parse()?)?,
            JobStep::PrintPage { cut } => session.print_page(cut.parse()?)?,

            JobStep::RotatedPrinting { action } => session.rotated_printing(action.parse()?)?,
            JobStep::Alignment { align } => session.alignment(align.parse()?)?,
            JobStep::FeedAmount { amount } => session.feed_amount(amount.parse()?)?,
            JobStep::PageLength { length } => {
                session.page_length(unsigned("page_length", *length)?)?
            }
            JobStep::PageFormat { top, bottom } => session.page_format(
                unsigned("page_format.top", *top)?,
                unsigned("page_format.bottom", *bottom)?,
            )?,
            JobStep::LeftMargin { margin } => {
                session.left_margin(unsigned("left_margin", *margin)?)?
            }
            JobStep::RightMargin { margin } => {
                session.right_margin(unsigned("right_margin", *margin)?)?
            }
            JobStep::HorizontalTabs { positions } => {
                session.horizontal_tabs(&tab_stops("horizontal_tabs", positions)?)?
            }
            JobStep::VerticalTabs { positions } => {
                session.vertical_tabs(&tab_stops("vertical_tabs", positions)?)?
            }

            JobStep::ForwardFeed { amount } => {
                session.forward_feed(unsigned("forward_feed", *amount)?)?
            }
            JobStep::AbsVertPos { position } => {
                session.abs_vert_pos(unsigned("abs_vert_pos", *position)?)?
            }
            JobStep::AbsHorzPos { position } => {
                session.abs_horz_pos(unsigned("abs_horz_pos", *position)?)?
            }
            JobStep::RelHorzPos { offset } => {
                session.rel_horz_pos(unsigned("rel_horz_pos", *offset)?)?
            }
            JobStep::CarriageReturn => session.carriage_return()?,
            JobStep::LineFeed => session.line_feed()?,
            JobStep::PageFeed => session.page_feed()?,
            JobStep::HorzTab => session.horz_tab()?,
            JobStep::VertTab => session.vert_tab()?,

            JobStep::Bold { action } => session.bold(switch("bold", action)?)?,
            JobStep::Italic { action } => session.italic(switch("italic", action)?)?,
            JobStep::DoubleStrike { action } => {
                session.double_strike(switch("double_strike", action)?)?
            }
            JobStep::DoubleWidth { action } => {
                session.double_width(switch("double_width", action)?)?
            }
            JobStep::CompressedChar { action } => {
                session.compressed_char(switch("compressed_char", action)?)?
            }
            JobStep::Frame { action } => session.frame(switch("frame", action)?)?,
            JobStep::Underline { action } => session.underline(&action.to_symbol().parse()?)?,
            JobStep::SelectFont { font } => session.select_font(font.parse()?)?,
            JobStep::CharSize { size } => return session.char_size(size.to_symbol().parse()?),
            JobStep::CharStyle { style } => session.char_style(style.parse()?)?,
            JobStep::PicaPitch => session.pica_pitch()?,
            JobStep::ElitePitch => session.elite_pitch()?,
            JobStep::MicronPitch => session.micron_pitch()?,
            JobStep::ProportionalChar { action } => {
                session.proportional_char(switch("proportional_char", action)?)?
            }
            JobStep::CharSpacing { spacing } => {
                session.char_spacing(unsigned("char_spacing", *spacing)?)?
            }

            JobStep::Barcode(step) => session.barcode(step.data.as_bytes(), &step.options()?)?,

            JobStep::TemplatePrint => session.template_print()?,
            JobStep::ChooseTemplate { template } => {
                session.choose_template(unsigned("choose_template", *template)?)?
            }
            JobStep::MachineOp { operation } => session.machine_op(operation.parse()?)?,
            JobStep::TemplateInit => session.template_init()?,
            JobStep::PrintStartTrigger { trigger } => {
                session.print_start_trigger(trigger.parse()?)?
            }
            JobStep::PrintStartCommand { command } => {
                session.print_start_command(command.as_bytes())?
            }
            JobStep::ReceivedCharCount { count } => {
                session.received_char_count(unsigned("received_char_count", *count)?)?
            }
            JobStep::SelectDelim { delim } => session.select_delim(delim.as_bytes())?,
            JobStep::SelectObj { name } => session.select_obj(name.as_bytes())?,
            JobStep::InsertIntoObj { data } => {
                session.insert_into_obj(data.as_deref().map(str::as_bytes))?
            }
            JobStep::SelectAndInsert { name, data } => {
                session.select_and_insert(name.as_bytes(), data.as_deref().map(str::as_bytes))?
            }

            JobStep::Text { content } => session.send_text(content.as_bytes())?,
        }
        Ok(None)
    }
}

impl JobBarcode {
    fn options(&self) -> Result<BarcodeOptions, PrintError> {
        let mut options = match &self.format {
            Some(format) => BarcodeOptions::new(format.parse()?),
            None => BarcodeOptions::default(),
        };
        if let Some(characters) = &self.characters {
            options.characters = Switch::parse_for("barcode", "characters", characters)?;
        }
        if let Some(height) = self.height {
            options.height = unsigned("barcode.height", height)?;
        }
        if let Some(width) = &self.width {
            options.width = width.parse()?;
        }
        if let Some(parentheses) = &self.parentheses {
            options.parentheses = Switch::parse_for("barcode", "parentheses", parentheses)?;
        }
        if let Some(ratio) = &self.ratio {
            options.ratio = ratio.parse()?;
        }
        if let Some(equalize) = &self.equalize {
            options.equalize = Switch::parse_for("barcode", "equalize", equalize)?;
        }
        if let Some(rss_symbol) = &self.rss_symbol {
            options.rss_symbol = rss_symbol.parse()?;
        }
        if let Some(count) = self.horiz_char_rss {
            options.rss_horizontal_chars = unsigned("barcode.rss_horizontal_chars", count)?;
        }
        Ok(options)
    }
}

fn switch(operation: &'static str, action: &str) -> Result<Switch, PrintError> {
    Switch::parse_for(operation, "action", action)
}

/// JSON numbers are signed; anything negative is out of range everywhere.
fn unsigned(parameter: &'static str, value: i64) -> Result<u32, PrintError> {
    u32::try_from(value).map_err(|_| PrintError::OutOfRange {
        parameter,
        value,
        min: 0,
        max: i64::from(u32::MAX),
    })
}

fn tab_stops(operation: &'static str, stops: &JobTabStops) -> Result<TabStops, PrintError> {
    match stops {
        JobTabStops::Keyword(keyword) if keyword == "clear" => Ok(TabStops::Clear),
        JobTabStops::Keyword(keyword) => Err(PrintError::InvalidOption {
            operation,
            field: "positions",
            value: keyword.clone(),
        }),
        JobTabStops::Positions(positions) => positions
            .iter()
            .map(|&position| {
                u32::try_from(position).map_err(|_| PrintError::InvalidOption {
                    operation,
                    field: "position",
                    value: position.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TabStops::At),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::options::{CharSize, FontCategory};

    fn run(json: &str) -> (Result<JobReport, JobError>, Vec<u8>) {
        let mut session = PrinterSession::in_memory();
        let result = JobDocument::from_json(json).and_then(|doc| doc.run(&mut session));
        (result, session.into_inner())
    }

    #[test]
    fn test_runs_steps_in_order() {
        let (result, bytes) = run(
            r#"{"steps": [
                {"op": "command_mode"},
                {"op": "initialize"},
                {"op": "bold", "action": "on"},
                {"op": "text", "content": "Hi"},
                {"op": "bold", "action": "off"}
            ]}"#,
        );
        let report = result.unwrap();
        assert_eq!(report.steps_sent, 5);
        assert!(report.advisories.is_empty());
        assert_eq!(
            bytes,
            vec![0x1B, b'i', b'a', b'0', 0x1B, b'@', 0x1B, b'E', b'H', b'i', 0x1B, b'F']
        );
    }

    #[test]
    fn test_collects_advisories() {
        let (result, _) = run(
            r#"{"steps": [
                {"op": "select_font", "font": "helsinkibit"},
                {"op": "char_size", "size": 24},
                {"op": "char_size", "size": "44"}
            ]}"#,
        );
        let report = result.unwrap();
        assert_eq!(report.steps_sent, 3);
        assert_eq!(
            report.advisories,
            vec![StepAdvisory {
                index: 2,
                advisory: Advisory::FontCategoryMismatch {
                    size: CharSize::Dots44,
                    selected: FontCategory::Bitmap,
                    required: FontCategory::Outline,
                },
            }]
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        let (result, bytes) = run(
            r#"{"steps": [
                {"op": "line_feed"},
                {"op": "page_length", "length": 12000},
                {"op": "line_feed"}
            ]}"#,
        );
        match result.unwrap_err() {
            JobError::Step { index, op, source } => {
                assert_eq!(index, 1);
                assert_eq!(op, "page_length");
                assert!(matches!(source, PrintError::OutOfRange { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(bytes, vec![0x0A]);
    }

    #[test]
    fn test_negative_number_is_out_of_range() {
        let (result, bytes) = run(r#"{"steps": [{"op": "left_margin", "margin": -1}]}"#);
        assert!(matches!(
            result,
            Err(JobError::Step {
                source: PrintError::OutOfRange { value: -1, .. },
                ..
            })
        ));
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_switch_errors_name_operation() {
        let (result, _) = run(r#"{"steps": [{"op": "italic", "action": "yes"}]}"#);
        match result.unwrap_err() {
            JobError::Step {
                source:
                    PrintError::InvalidOption {
                        operation, value, ..
                    },
                ..
            } => {
                assert_eq!(operation, "italic");
                assert_eq!(value, "yes");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tab_keyword() {
        let (result, bytes) = run(r#"{"steps": [{"op": "horizontal_tabs", "positions": "clear"}]}"#);
        result.unwrap();
        assert_eq!(bytes, vec![0x1B, b'D', 0]);

        let (result, _) = run(r#"{"steps": [{"op": "horizontal_tabs", "positions": "none"}]}"#);
        assert!(matches!(
            result,
            Err(JobError::Step {
                source: PrintError::InvalidOption { field: "positions", .. },
                ..
            })
        ));
    }

    #[test]
    fn test_barcode_step_overrides_defaults() {
        let (result, bytes) = run(
            r#"{"steps": [{"op": "barcode", "data": "12345", "format": "code128", "height": 256}]}"#,
        );
        result.unwrap();
        assert_eq!(&bytes[..4], &[0x1B, b'i', b't', b'a']);
        assert!(bytes.ends_with(b"12345\\\\\\"));
        let h = bytes.iter().position(|&b| b == b'h').unwrap();
        assert_eq!(&bytes[h + 1..h + 3], &[0x00, 0x01]);
    }

    #[test]
    fn test_template_steps() {
        let (result, bytes) = run(
            r#"{"steps": [
                {"op": "template_mode"},
                {"op": "choose_template", "template": 3},
                {"op": "select_and_insert", "name": "title", "data": "AB"},
                {"op": "template_print"}
            ]}"#,
        );
        result.unwrap();
        let mut expected = vec![0x1B, b'i', b'a', b'3'];
        expected.extend(b"^TS003");
        expected.extend(b"^ONtitle\0");
        expected.extend(b"^DI\x02\x00AB");
        expected.extend(b"^FF");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            JobDocument::from_json("{\"steps\": 3}"),
            Err(JobError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = JobDocument::from_path("/nonexistent/job.json").unwrap_err();
        assert!(matches!(err, JobError::Io { .. }));
    }
}
