use dxil_container::FeatureInfo;

use crate::report::Report;

/// Lists the optional features an `SFI0` part requests.
///
/// Writes nothing when the flag word is zero. Set bits without a name still
/// produce the surrounding header.
pub fn render_feature_info(report: &mut Report, info: &FeatureInfo) {
    if info.raw == 0 {
        return;
    }
    report.blank();
    report.line(" Note: shader requires additional functionality:");
    for name in info.names() {
        report.line(format_args!("       {name}"));
    }
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_flags_print_nothing() {
        let mut report = Report::new(';');
        render_feature_info(&mut report, &FeatureInfo { raw: 0 });
        assert_eq!(report.as_str(), "");
    }

    #[test]
    fn set_bits_print_in_order() {
        let mut report = Report::new(';');
        render_feature_info(
            &mut report,
            &FeatureInfo {
                raw: (1 << 14) | 1 | (1 << 40),
            },
        );
        assert_eq!(
            report.as_str(),
            ";\n\
             ; Note: shader requires additional functionality:\n\
             ;       Double-precision floating point\n\
             ;       Wave level operations\n\
             ;\n"
        );
    }
}
