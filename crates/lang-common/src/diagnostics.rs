//! Ariadne-based rendering of a fatal `TypeError`.
//!
//! The core itself never prints anything -- it returns `Result`s up to
//! the module driver, which is the only place `fatal` semantics apply
//! (see spec.md section 4.7). This module is the diagnostic sink that
//! driver/CLI code reaches for.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::error::TypeError;

/// Renders a fatal `TypeError` as an ariadne report against `source`,
/// writing to `out`. Since the core's `Location` is a (file, line,
/// column) triple rather than a byte offset, the rendered report carries
/// the location in its message rather than as a precise highlighted
/// span -- a byte-offset-aware caller (a real parser) can upgrade this
/// once it has span information to offer.
pub fn report_fatal(err: &TypeError, source_name: &str, source_text: &str, out: &mut dyn std::io::Write) {
    let report = Report::build(ReportKind::Error, source_name, 0)
        .with_message(format!("{} ({})", err.message, err.code))
        .with_label(
            Label::new((source_name, 0..source_text.len().max(1)))
                .with_message(format!("at {}", err.location))
                .with_color(Color::Red),
        )
        .finish();

    let mut buf = Vec::new();
    let _ = report.write((source_name, Source::from(source_text)), &mut buf);
    let _ = out.write_all(&buf);
}

/// A stable, short diagnostic code for each `ErrorCode`, useful when a
/// caller wants to grep/sort by failure class rather than full message.
pub fn short_code(err: &TypeError) -> &'static str {
    err.code.code_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    #[test]
    fn report_fatal_does_not_panic_on_empty_source() {
        let err = TypeError::incompatible("boom", Location::synthetic());
        let mut buf = Vec::new();
        report_fatal(&err, "<test>", "", &mut buf);
        assert!(!buf.is_empty());
    }
}
