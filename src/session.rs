//! # Printer Session
//!
//! [`PrinterSession`] is the validated, stateful front end to the protocol
//! builders. Each method checks its inputs, builds exactly one command and
//! hands it to the transport. A failed check means nothing was sent.
//!
//! ## State
//!
//! The session remembers two things about the printer:
//!
//! - the **font family** of the last selected font (reset to bitmap by
//!   [`initialize`](PrinterSession::initialize)), used to flag character
//!   sizes the font cannot render;
//! - the **command mode** last entered through one of the mode switches,
//!   used to catch escape commands sent in template mode and vice versa.
//!
//! ## Example
//!
//! ```
//! use brotherprint::protocol::options::{CharSize, Font};
//! use brotherprint::session::{Advisory, PrinterSession};
//!
//! let mut session = PrinterSession::new(Vec::new());
//! session.command_mode()?;
//! session.select_font(Font::HelsinkiBit)?;
//!
//! // Sent, but the printer will not render an outline size with a bitmap font.
//! let advisory = session.char_size(CharSize::Dots11)?;
//! assert!(matches!(advisory, Some(Advisory::FontCategoryMismatch { .. })));
//!
//! # Ok::<(), brotherprint::PrintError>(())
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::error::{PrintError, Result};
use crate::protocol::barcode::{self, BarcodeOptions};
use crate::protocol::commands::{self, FeedAmount, TabStops};
use crate::protocol::options::{
    Alignment, CharCodeTable, CharSize, CharStyle, Charset, CutMode, Font, FontCategory,
    MachineOp, Rotation, Switch, TriggerType,
};
use crate::protocol::template;
use crate::protocol::text::{self, Underline};
use crate::transport::Transport;

/// Command mode the printer was last switched into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrinterMode {
    /// No mode switch sent yet on this session
    #[default]
    Unknown,
    Raster,
    Template,
    Command,
}

impl PrinterMode {
    pub const fn name(self) -> &'static str {
        match self {
            PrinterMode::Unknown => "unknown",
            PrinterMode::Raster => "raster",
            PrinterMode::Template => "template",
            PrinterMode::Command => "ESC/P",
        }
    }
}

impl fmt::Display for PrinterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which dialect a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    /// ESC/P; needs command mode
    Escape,
    /// `^` commands; needs template mode
    Template,
    /// Mode switches, reset, raw text
    Any,
}

impl Dialect {
    fn required_mode(self) -> Option<PrinterMode> {
        match self {
            Dialect::Escape => Some(PrinterMode::Command),
            Dialect::Template => Some(PrinterMode::Template),
            Dialect::Any => None,
        }
    }
}

/// Session behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// Reject commands that belong to a different mode than the one last
    /// entered, instead of only logging a warning.
    pub enforce_modes: bool,
}

/// A condition worth reporting about a command that was sent anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// The requested size belongs to the other font family.
    FontCategoryMismatch {
        size: CharSize,
        selected: FontCategory,
        required: FontCategory,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::FontCategoryMismatch {
                size,
                selected,
                required,
            } => write!(
                f,
                "size {size} is {required}-only but the current font is {selected}"
            ),
        }
    }
}

/// Validated command front end over a [`Transport`].
///
/// Every operation takes `&mut self`; share a session between threads only
/// behind a lock.
pub struct PrinterSession<T: Transport> {
    transport: T,
    font_category: FontCategory,
    mode: PrinterMode,
    config: SessionConfig,
}

impl<T: Transport> PrinterSession<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    pub fn with_config(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            font_category: FontCategory::Bitmap,
            mode: PrinterMode::Unknown,
            config,
        }
    }

    /// Font family of the most recently selected font.
    pub fn font_category(&self) -> FontCategory {
        self.font_category
    }

    pub fn mode(&self) -> PrinterMode {
        self.mode
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    fn check_mode(&self, operation: &'static str, dialect: Dialect) -> Result<()> {
        let Some(required) = dialect.required_mode() else {
            return Ok(());
        };
        if self.mode == PrinterMode::Unknown || self.mode == required {
            return Ok(());
        }
        if self.config.enforce_modes {
            return Err(PrintError::WrongMode {
                operation,
                required: required.name(),
                current: self.mode.name(),
            });
        }
        warn!(
            operation,
            required = required.name(),
            current = self.mode.name(),
            "command sent outside its mode"
        );
        Ok(())
    }

    /// Check mode, build, transmit.
    fn emit<F>(&mut self, operation: &'static str, dialect: Dialect, build: F) -> Result<()>
    where
        F: FnOnce() -> Result<Vec<u8>>,
    {
        self.check_mode(operation, dialect)?;
        let cmd = build()?;
        debug!(operation, bytes = cmd.len(), "sending command");
        self.transport.send(&cmd)?;
        Ok(())
    }

    fn switch_mode(&mut self, operation: &'static str, mode: PrinterMode, cmd: Vec<u8>) -> Result<()> {
        self.emit(operation, Dialect::Any, || Ok(cmd))?;
        self.mode = mode;
        Ok(())
    }

    /// Send bytes verbatim (label text between commands).
    pub fn send_text(&mut self, data: &[u8]) -> Result<()> {
        self.emit("text", Dialect::Any, || Ok(data.to_vec()))
    }

    // ========================================================================
    // MODE SELECTION AND SYSTEM SETTINGS
    // ========================================================================

    pub fn raster_mode(&mut self) -> Result<()> {
        self.switch_mode("raster_mode", PrinterMode::Raster, commands::raster_mode())
    }

    pub fn template_mode(&mut self) -> Result<()> {
        self.switch_mode("template_mode", PrinterMode::Template, commands::template_mode())
    }

    pub fn command_mode(&mut self) -> Result<()> {
        self.switch_mode("command_mode", PrinterMode::Command, commands::command_mode())
    }

    /// Reset the printer (ESC @) and the session's font family to bitmap.
    pub fn initialize(&mut self) -> Result<()> {
        self.emit("initialize", Dialect::Any, || Ok(commands::init()))?;
        self.font_category = FontCategory::Bitmap;
        Ok(())
    }

    pub fn select_charset(&mut self, charset: Charset) -> Result<()> {
        self.emit("select_charset", Dialect::Escape, || {
            Ok(commands::select_charset(charset))
        })
    }

    pub fn select_char_code_table(&mut self, table: CharCodeTable) -> Result<()> {
        self.emit("select_char_code_table", Dialect::Escape, || {
            Ok(commands::select_char_code_table(table))
        })
    }

    pub fn cut_setting(&mut self, cut: CutMode) -> Result<()> {
        self.emit("cut_setting", Dialect::Escape, || Ok(commands::cut_setting(cut)))
    }

    /// Cut setting, then page feed.
    pub fn print_page(&mut self, cut: CutMode) -> Result<()> {
        self.emit("print_page", Dialect::Escape, || Ok(commands::print_page(cut)))
    }

    // ========================================================================
    // FORMAT
    // ========================================================================

    pub fn rotated_printing(&mut self, rotation: Rotation) -> Result<()> {
        self.emit("rotated_printing", Dialect::Escape, || {
            Ok(commands::rotated_printing(rotation))
        })
    }

    pub fn alignment(&mut self, align: Alignment) -> Result<()> {
        self.emit("alignment", Dialect::Escape, || Ok(commands::alignment(align)))
    }

    pub fn feed_amount(&mut self, amount: FeedAmount) -> Result<()> {
        self.emit("feed_amount", Dialect::Escape, || Ok(commands::feed_amount(amount)))
    }

    pub fn page_length(&mut self, dots: u32) -> Result<()> {
        self.emit("page_length", Dialect::Escape, || commands::page_length(dots))
    }

    pub fn page_format(&mut self, top: u32, bottom: u32) -> Result<()> {
        self.emit("page_format", Dialect::Escape, || commands::page_format(top, bottom))
    }

    pub fn left_margin(&mut self, margin: u32) -> Result<()> {
        self.emit("left_margin", Dialect::Escape, || commands::left_margin(margin))
    }

    pub fn right_margin(&mut self, margin: u32) -> Result<()> {
        self.emit("right_margin", Dialect::Escape, || commands::right_margin(margin))
    }

    pub fn horizontal_tabs(&mut self, stops: &TabStops) -> Result<()> {
        self.emit("horizontal_tabs", Dialect::Escape, || commands::horizontal_tabs(stops))
    }

    pub fn vertical_tabs(&mut self, stops: &TabStops) -> Result<()> {
        self.emit("vertical_tabs", Dialect::Escape, || commands::vertical_tabs(stops))
    }

    // ========================================================================
    // PRINT POSITION AND LINE CONTROL
    // ========================================================================

    pub fn forward_feed(&mut self, amount: u32) -> Result<()> {
        self.emit("forward_feed", Dialect::Escape, || commands::forward_feed(amount))
    }

    pub fn abs_vert_pos(&mut self, position: u32) -> Result<()> {
        self.emit("abs_vert_pos", Dialect::Escape, || commands::abs_vert_pos(position))
    }

    pub fn abs_horz_pos(&mut self, position: u32) -> Result<()> {
        self.emit("abs_horz_pos", Dialect::Escape, || commands::abs_horz_pos(position))
    }

    pub fn rel_horz_pos(&mut self, offset: u32) -> Result<()> {
        self.emit("rel_horz_pos", Dialect::Escape, || commands::rel_horz_pos(offset))
    }

    pub fn carriage_return(&mut self) -> Result<()> {
        self.emit("carriage_return", Dialect::Escape, || Ok(commands::carriage_return()))
    }

    pub fn line_feed(&mut self) -> Result<()> {
        self.emit("line_feed", Dialect::Escape, || Ok(commands::line_feed()))
    }

    pub fn page_feed(&mut self) -> Result<()> {
        self.emit("page_feed", Dialect::Escape, || Ok(commands::page_feed()))
    }

    pub fn horz_tab(&mut self) -> Result<()> {
        self.emit("horz_tab", Dialect::Escape, || Ok(commands::horz_tab()))
    }

    pub fn vert_tab(&mut self) -> Result<()> {
        self.emit("vert_tab", Dialect::Escape, || Ok(commands::vert_tab()))
    }

    // ========================================================================
    // TEXT STYLING
    // ========================================================================

    pub fn bold(&mut self, action: Switch) -> Result<()> {
        self.emit("bold", Dialect::Escape, || Ok(text::bold(action)))
    }

    pub fn italic(&mut self, action: Switch) -> Result<()> {
        self.emit("italic", Dialect::Escape, || Ok(text::italic(action)))
    }

    pub fn double_strike(&mut self, action: Switch) -> Result<()> {
        self.emit("double_strike", Dialect::Escape, || Ok(text::double_strike(action)))
    }

    pub fn double_width(&mut self, action: Switch) -> Result<()> {
        self.emit("double_width", Dialect::Escape, || Ok(text::double_width(action)))
    }

    pub fn compressed_char(&mut self, action: Switch) -> Result<()> {
        self.emit("compressed_char", Dialect::Escape, || Ok(text::compressed_char(action)))
    }

    pub fn frame(&mut self, action: Switch) -> Result<()> {
        self.emit("frame", Dialect::Escape, || Ok(text::frame(action)))
    }

    pub fn underline(&mut self, setting: &Underline) -> Result<()> {
        self.emit("underline", Dialect::Escape, || Ok(text::underline(setting)))
    }

    /// Select a resident font and record its family.
    pub fn select_font(&mut self, font: Font) -> Result<()> {
        self.emit("select_font", Dialect::Escape, || Ok(text::select_font(font)))?;
        self.font_category = font.category();
        Ok(())
    }

    /// Set the character size.
    ///
    /// The command is always sent. If the size belongs to the other font
    /// family than the current font, an [`Advisory`] is returned: the printer
    /// accepts the command but the output will not be what was asked for.
    pub fn char_size(&mut self, size: CharSize) -> Result<Option<Advisory>> {
        self.emit("char_size", Dialect::Escape, || Ok(text::char_size(size)))?;

        let required = size.category();
        if required == self.font_category {
            return Ok(None);
        }
        let advisory = Advisory::FontCategoryMismatch {
            size,
            selected: self.font_category,
            required,
        };
        warn!(%advisory, "font size does not match font family");
        Ok(Some(advisory))
    }

    pub fn char_style(&mut self, style: CharStyle) -> Result<()> {
        self.emit("char_style", Dialect::Escape, || Ok(text::char_style(style)))
    }

    pub fn pica_pitch(&mut self) -> Result<()> {
        self.emit("pica_pitch", Dialect::Escape, || Ok(text::pica_pitch()))
    }

    pub fn elite_pitch(&mut self) -> Result<()> {
        self.emit("elite_pitch", Dialect::Escape, || Ok(text::elite_pitch()))
    }

    pub fn micron_pitch(&mut self) -> Result<()> {
        self.emit("micron_pitch", Dialect::Escape, || Ok(text::micron_pitch()))
    }

    pub fn proportional_char(&mut self, action: Switch) -> Result<()> {
        self.emit("proportional_char", Dialect::Escape, || {
            Ok(text::proportional_char(action))
        })
    }

    pub fn char_spacing(&mut self, dots: u32) -> Result<()> {
        self.emit("char_spacing", Dialect::Escape, || text::char_spacing(dots))
    }

    // ========================================================================
    // BARCODE
    // ========================================================================

    pub fn barcode(&mut self, data: &[u8], options: &BarcodeOptions) -> Result<()> {
        self.emit("barcode", Dialect::Escape, || barcode::barcode(data, options))
    }

    // ========================================================================
    // TEMPLATE MODE
    // ========================================================================

    pub fn template_print(&mut self) -> Result<()> {
        self.emit("template_print", Dialect::Template, || Ok(template::template_print()))
    }

    pub fn choose_template(&mut self, number: u32) -> Result<()> {
        self.emit("choose_template", Dialect::Template, || {
            template::choose_template(number)
        })
    }

    pub fn machine_op(&mut self, operation: MachineOp) -> Result<()> {
        self.emit("machine_op", Dialect::Template, || Ok(template::machine_op(operation)))
    }

    pub fn template_init(&mut self) -> Result<()> {
        self.emit("template_init", Dialect::Template, || Ok(template::template_init()))
    }

    pub fn print_start_trigger(&mut self, trigger: TriggerType) -> Result<()> {
        self.emit("print_start_trigger", Dialect::Template, || {
            Ok(template::print_start_trigger(trigger))
        })
    }

    pub fn print_start_command(&mut self, command: &[u8]) -> Result<()> {
        self.emit("print_start_command", Dialect::Template, || {
            template::print_start_command(command)
        })
    }

    pub fn received_char_count(&mut self, count: u32) -> Result<()> {
        self.emit("received_char_count", Dialect::Template, || {
            template::received_char_count(count)
        })
    }

    pub fn select_delim(&mut self, delim: &[u8]) -> Result<()> {
        self.emit("select_delim", Dialect::Template, || template::select_delim(delim))
    }

    pub fn select_obj(&mut self, name: &[u8]) -> Result<()> {
        self.emit("select_obj", Dialect::Template, || Ok(template::select_obj(name)))
    }

    /// Fill the selected object. `None` sends an empty insert.
    pub fn insert_into_obj(&mut self, data: Option<&[u8]>) -> Result<()> {
        self.emit("insert_into_obj", Dialect::Template, || {
            template::insert_into_obj(data)
        })
    }

    pub fn select_and_insert(&mut self, name: &[u8], data: Option<&[u8]>) -> Result<()> {
        self.emit("select_and_insert", Dialect::Template, || {
            template::select_and_insert(name, data)
        })
    }
}

impl PrinterSession<Vec<u8>> {
    /// Session that captures commands in memory.
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    /// Take every byte captured so far.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.transport)
    }
}
