//! Command line front end

use std::fmt::Write as _;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use fontbridge_core::{
    convert, Font, FontConfig, FontContext, FontError, FontStyle, GraphicsUnit, LogFont,
};

#[derive(Parser, Debug)]
#[command(name = "fontbridge", about = "Build a font and show how it crosses the native bridge")]
pub struct Cli {
    /// Family name to resolve
    #[arg(default_value = "Arial")]
    pub family: String,

    #[arg(short, long, default_value_t = 10.0)]
    pub size: f32,

    #[arg(short, long, value_enum, default_value_t = UnitArg::Point)]
    pub unit: UnitArg,

    #[arg(long)]
    pub bold: bool,

    #[arg(long)]
    pub italic: bool,

    #[arg(long)]
    pub underline: bool,

    #[arg(long)]
    pub strikeout: bool,

    /// Host resolution used for Pixel and World units
    #[arg(long, default_value_t = 96.0)]
    pub dpi: f32,

    /// Also print the size converted to this unit
    #[arg(long = "to", value_enum)]
    pub convert_to: Option<UnitArg>,

    /// Print the serialized font record instead
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum UnitArg {
    World,
    Display,
    Pixel,
    Point,
    Inch,
    Document,
    Millimeter,
}

impl From<UnitArg> for GraphicsUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::World => GraphicsUnit::World,
            UnitArg::Display => GraphicsUnit::Display,
            UnitArg::Pixel => GraphicsUnit::Pixel,
            UnitArg::Point => GraphicsUnit::Point,
            UnitArg::Inch => GraphicsUnit::Inch,
            UnitArg::Document => GraphicsUnit::Document,
            UnitArg::Millimeter => GraphicsUnit::Millimeter,
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl Cli {
    pub fn style(&self) -> FontStyle {
        let mut style = FontStyle::REGULAR;
        style.set(FontStyle::BOLD, self.bold);
        style.set(FontStyle::ITALIC, self.italic);
        style.set(FontStyle::UNDERLINE, self.underline);
        style.set(FontStyle::STRIKEOUT, self.strikeout);
        style
    }

    pub fn config(&self) -> FontConfig {
        FontConfig::new().with_dpi(self.dpi, self.dpi)
    }
}

/// Build the requested font in `ctx` and render a report about it.
pub fn describe(ctx: &Arc<FontContext>, cli: &Cli) -> Result<String, CliError> {
    tracing::debug!("Describing {} {} {:?} at {} dpi", cli.family, cli.size, cli.unit, cli.dpi);
    let font = Font::builder(&cli.family, cli.size)
        .style(cli.style())
        .unit(cli.unit.into())
        .build(ctx)?;

    if cli.json {
        return Ok(serde_json::to_string_pretty(&font.to_record())?);
    }

    let mut log_font = LogFont::default();
    font.to_log_font(&mut log_font)?;

    let mut out = String::new();
    writeln!(out, "{font}")?;
    writeln!(out, "Requested: {} ({})", font.original_name(), font.style())?;
    writeln!(out, "Size in points: {}", font.size_in_points())?;
    writeln!(out, "Line height: {} px", font.height()?)?;
    writeln!(out, "Platform handle: {:#x}", font.to_hfont()?.0)?;
    writeln!(
        out,
        "Log font: face={} height={} weight={} charset={}",
        log_font.face_name(),
        log_font.height,
        log_font.weight,
        log_font.char_set
    )?;
    if let Some(target) = cli.convert_to {
        let target = GraphicsUnit::from(target);
        let converted = convert(font.size(), font.unit(), target, ctx.config().dpi_x);
        writeln!(out, "Size in {target}: {converted}")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontbridge_core::dummy_engine::DummyEngine;
    use fontbridge_core::{InstalledFamilies, PlatformKind};

    fn context(cli: &Cli) -> Arc<FontContext> {
        FontContext::builder(Arc::new(DummyEngine::new()), Arc::new(InstalledFamilies::new(["Arial"])))
            .config(cli.config().with_platform(PlatformKind::Posix))
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["fontbridge"]).unwrap();
        assert_eq!(cli.family, "Arial");
        assert_eq!(cli.size, 10.0);
        assert_eq!(cli.unit, UnitArg::Point);
        assert_eq!(cli.style(), FontStyle::REGULAR);
    }

    #[test]
    fn test_style_flags() {
        let cli = Cli::try_parse_from(["fontbridge", "--bold", "--strikeout"]).unwrap();
        assert_eq!(cli.style(), FontStyle::BOLD | FontStyle::STRIKEOUT);
    }

    #[test]
    fn test_describe_report() {
        let cli = Cli::try_parse_from(["fontbridge", "Arial", "-s", "12", "--italic", "--to", "pixel"]).unwrap();
        let report = describe(&context(&cli), &cli).unwrap();
        assert!(report.starts_with("[Font: Name=Arial, Size=12, Units=3, GdiCharSet=1"));
        assert!(report.contains("Log font: face=Arial height=-16 weight=400 charset=1"));
        assert!(report.contains("Size in Pixel: 16"));
    }

    #[test]
    fn test_describe_json() {
        let cli = Cli::try_parse_from(["fontbridge", "Arial", "--json", "--bold", "-u", "inch", "-s", "1"]).unwrap();
        let json = describe(&context(&cli), &cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Style"], 1);
        assert_eq!(value["Unit"], 4);
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let cli = Cli::try_parse_from(["fontbridge", "--dpi", "0"]).unwrap();
        let result = FontContext::builder(Arc::new(DummyEngine::new()), Arc::new(InstalledFamilies::new(["Arial"])))
            .config(cli.config().with_platform(PlatformKind::Posix))
            .build();
        assert_eq!(result.unwrap_err(), FontError::InvalidResolution { dpi_x: 0.0, dpi_y: 0.0 });
    }

    #[test]
    fn test_invalid_size_reported() {
        let cli = Cli::try_parse_from(["fontbridge", "--size", "0"]).unwrap();
        let err = describe(&context(&cli), &cli).unwrap_err();
        assert!(matches!(err, CliError::Font(FontError::NativeFailure(_))));
    }
}
