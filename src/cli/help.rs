use super::context::ClirkContext;
use crate::utils::plural::plural_with_template;
use colored::Colorize;

/// `<package name> v<package version>`
pub fn generate_version_message(context: &ClirkContext) -> String {
    format!("{} v{}", context.package.name, context.package.version)
}

/// Full help text. Sections are separated by blank lines; the parameters and
/// options sections are left out when empty.
pub fn generate_help_message(context: &ClirkContext) -> String {
    let sections: Vec<String> = header(context)
        .into_iter()
        .chain(usage(context))
        .chain(parameters(context))
        .chain(options(context))
        .collect();
    format!("\n{}\n", sections.join("\n\n"))
}

fn header(context: &ClirkContext) -> Vec<String> {
    let icon = context
        .icon
        .as_deref()
        .map(|icon| format!("{} ", icon))
        .unwrap_or_default();
    let title = format!("{} — {}", context.name, context.title).cyan().bold();

    let homepage = context
        .package
        .homepage
        .as_deref()
        .filter(|homepage| !homepage.is_empty())
        .map(|homepage| format!("\n{}", homepage.underline().dimmed()))
        .unwrap_or_default();

    vec![
        format!("{}{}", icon, title),
        format!(
            "{} v{}{}",
            context.package.name, context.package.version, homepage
        ),
        context.description.join("\n"),
    ]
}

fn usage(context: &ClirkContext) -> Vec<String> {
    let mut output = vec![
        format!("{}:", context.usage_label).bold().to_string(),
        format!("  {}", context.examples.join("\n  ").yellow()),
    ];
    if !context.usage.is_empty() {
        output.push(format!("  {}", context.usage.join("\n  ")));
    }
    output
}

fn parameters(context: &ClirkContext) -> Vec<String> {
    if context.parameters.is_empty() {
        return Vec::new();
    }

    let mut output = vec![format!("{}:", context.parameters_label).bold().to_string()];
    for (key, parameter) in &context.parameters {
        output.push(format!(
            "  {}\n    {}",
            key.yellow(),
            parameter.description.join("\n    ")
        ));
    }
    output
}

fn options(context: &ClirkContext) -> Vec<String> {
    if context.options.is_empty() {
        return Vec::new();
    }

    let mut output = vec![format!("{}:", context.options_label).bold().to_string()];
    for (key, option) in &context.options {
        let value = if option.is_string {
            "=<VALUE>".dimmed().to_string()
        } else {
            String::new()
        };
        let mut entry = format!(
            "  {}{}\n    {}",
            format!("--{}", key).yellow(),
            value,
            option.description.join("\n    ")
        );

        if !option.aliases.is_empty() {
            let alias_list = option
                .aliases
                .iter()
                .map(|alias| {
                    if alias.chars().count() == 1 {
                        format!("-{}", alias)
                    } else {
                        format!("--{}", alias)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            let label = plural_with_template(option.aliases.len() as i64, "Alias", Some("Aliases"), "%s");
            entry.push_str(&format!("\n    {}", format!("{}: {}", label, alias_list).dimmed()));
        }
        output.push(entry);
    }
    output
}
