use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner;

/// Events on this target are screen output, printed without decoration.
pub const PRINT_TARGET: &str = "medscan::print";

const CRATES: &[&str] = &["medscan_cli", "medscan_core", "medscan_common"];

pub struct MedscanFormatter;

impl<S, N> FormatEvent<S, N> for MedscanFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the flags when set. Screen output is never filtered.
pub fn init(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let level: &str = match (quiet, verbose) {
        (1.., _) => "warn",
        (0, 0) => "info",
        (0, 1) => "debug",
        _ => "trace",
    };

    let directives: String = CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<String>>()
        .join(",");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{directives}")))
        .add_directive(format!("{PRINT_TARGET}=info").parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| spinner::SpinnerWriter)
        .event_format(MedscanFormatter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
