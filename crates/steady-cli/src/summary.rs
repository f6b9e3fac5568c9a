use std::path::Path;

use console::Style;
use steady_core::pipeline::config::DetectOptions;
use steady_core::pipeline::DetectionOutput;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    warning: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warning: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_detection_summary(options: &DetectOptions, output: &DetectionOutput, path: &Path) {
    let s = Styles::new();
    let config = &output.config;

    println!();
    println!("  {}", s.title.apply_to("Motion Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!(
        "  {:<16}{}",
        s.label.apply_to("Algorithm"),
        s.method.apply_to(options.algorithm)
    );
    println!(
        "  {:<16}{} / {}",
        s.label.apply_to("Shaky / Acc."),
        s.value.apply_to(options.shakiness),
        s.value.apply_to(options.accuracy)
    );
    println!(
        "  {:<16}{} px (step {})",
        s.label.apply_to("Max shift"),
        s.value.apply_to(config.max_shift),
        s.value.apply_to(options.step_size)
    );
    println!(
        "  {:<16}{} of {} (size {} px)",
        s.label.apply_to("Fields"),
        s.value.apply_to(config.max_fields),
        s.value.apply_to(config.field_count),
        s.value.apply_to(config.field_size)
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(output.transforms.len())
    );

    if output.warnings.is_empty() {
        println!("  {:<16}{}", s.label.apply_to("Warnings"), s.value.apply_to(0));
    } else {
        println!(
            "  {:<16}{}",
            s.label.apply_to("Warnings"),
            s.warning.apply_to(output.warnings.len())
        );
        for warning in output.warnings.iter().take(10) {
            println!("  {:<16}{}", "", s.warning.apply_to(warning));
        }
    }

    println!();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Transforms"),
        s.path.apply_to(path.display())
    );
    println!();
}
