//! Outbound command payload formatting.

/// Render a numeric command value according to the entity's step size.
///
/// A whole-number step means the controller expects an integer payload, so
/// the value's integer part is rendered (values arrive pre-rounded to the
/// step granularity by the host UI). A fractional step renders the natural
/// decimal representation without padding.
///
/// If a template with a `{value}` placeholder is configured, the rendered
/// value is substituted into it; otherwise it is the payload verbatim.
pub fn format_command_value(value: f64, step: f64, template: Option<&str>) -> String {
    let rendered = if step.fract() == 0.0 {
        format!("{}", value.trunc() as i64)
    } else {
        format!("{}", value)
    };

    match template {
        Some(template) => template.replace("{value}", &rendered),
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_step_renders_integer() {
        assert_eq!(format_command_value(750.0, 1.0, None), "750");
        assert_eq!(format_command_value(750.0, 1.0_f64, None), "750");
        assert_eq!(format_command_value(60.4, 1.0, None), "60");
    }

    #[test]
    fn test_fractional_step_renders_float() {
        assert_eq!(format_command_value(7.25, 0.1, None), "7.25");
        assert_eq!(format_command_value(7.2, 0.1, None), "7.2");
        assert_eq!(format_command_value(7.0, 0.1, None), "7");
    }

    #[test]
    fn test_template_substitution() {
        assert_eq!(format_command_value(60.0, 1.0, Some("{value} %")), "60 %");
        assert_eq!(format_command_value(7.5, 0.5, Some("pH {value}")), "pH 7.5");
    }
}
