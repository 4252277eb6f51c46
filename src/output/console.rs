use crate::config::{PullSource, SourceSettings};
use crate::description::{Author, SourceDescription, SourceMetadata};
use crate::limits::ReadLimits;

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn pull_source_label(pull_source: PullSource) -> &'static str {
    if pull_source.is_specified() {
        pull_source.as_str()
    } else {
        "(any)"
    }
}

fn push_authors(output: &mut String, authors: &[Author]) {
    if authors.is_empty() {
        output.push_str("  Authors:         -\n");
        return;
    }
    output.push_str(&format!("  Authors:         {}\n", authors.len()));
    for author in authors {
        let email = if author.email.is_empty() {
            String::new()
        } else {
            format!(" <{}>", author.email)
        };
        output.push_str(&format!(
            "    [{}] {}{}\n",
            author.author_type, author.name, email
        ));
    }
}

/// Render validated settings as a readable summary.
pub fn render_settings(settings: &SourceSettings) -> String {
    let mut output = String::from("\n  Source configuration is valid.\n\n");

    output.push_str(&format!("  Name:            {}\n", or_dash(settings.name.as_deref())));
    output.push_str(&format!("  Version:         {}\n", or_dash(settings.version.as_deref())));
    output.push_str(&format!("  Supplier:        {}\n", or_dash(settings.supplier.as_deref())));
    push_authors(&mut output, &settings.authors);
    output.push_str(&format!("  Source:          {}\n", or_dash(settings.source.as_deref())));
    output.push_str(&format!(
        "  Base path:       {}\n",
        settings
            .base_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".into())
    ));

    let digests = if settings.digests.is_empty() {
        "none".to_string()
    } else {
        settings.digests.join(", ")
    };
    output.push_str(&format!("  File digests:    {}\n", digests));
    output.push_str(&format!(
        "  Pull source:     {}\n",
        pull_source_label(settings.image.default_pull_source)
    ));

    let limit = match settings.image.max_layer_size {
        Some(bytes) => format!("{} bytes", bytes),
        None => format!("{} bytes (default)", ReadLimits::DEFAULT_PER_FILE),
    };
    output.push_str(&format!("  Max layer size:  {}\n\n", limit));

    output
}

/// Render a source description as a readable summary.
pub fn render_description(description: &SourceDescription) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n  Source {}\n\n", description.id()));
    output.push_str(&format!("  Name:            {}\n", or_dash(description.name.as_deref())));
    output.push_str(&format!(
        "  Version:         {}\n",
        or_dash(description.version.as_deref())
    ));
    output.push_str(&format!(
        "  Supplier:        {}\n",
        or_dash(description.supplier.as_deref())
    ));
    push_authors(&mut output, &description.authors);

    output.push_str(&format!("  Kind:            {}\n", description.metadata.kind()));
    match &description.metadata {
        SourceMetadata::Directory { path, base } => {
            output.push_str(&format!("  Path:            {}\n", path.display()));
            if let Some(base) = base {
                output.push_str(&format!("  Base:            {}\n", base.display()));
            }
        }
        SourceMetadata::File { path, digests } => {
            output.push_str(&format!("  Path:            {}\n", path.display()));
            output.push_str(&format!("  Digests:         {}\n", digests.join(", ")));
        }
        SourceMetadata::Image {
            user_input,
            pull_source,
        } => {
            output.push_str(&format!("  Image:           {}\n", user_input));
            output.push_str(&format!(
                "  Pull source:     {}\n",
                pull_source_label(*pull_source)
            ));
        }
    }
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageSettings;
    use crate::description::AuthorType;

    #[test]
    fn settings_summary_lists_fields() {
        let settings = SourceSettings {
            name: Some("app".into()),
            authors: vec![Author {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                author_type: AuthorType::Person,
            }],
            digests: vec!["sha1".into(), "sha256".into()],
            image: ImageSettings {
                default_pull_source: PullSource::Docker,
                max_layer_size: Some(1000),
            },
            ..Default::default()
        };
        let text = render_settings(&settings);
        assert!(text.contains("Name:            app"));
        assert!(text.contains("[Person] Jane <jane@example.com>"));
        assert!(text.contains("sha1, sha256"));
        assert!(text.contains("Pull source:     docker"));
        assert!(text.contains("1000 bytes"));
    }

    #[test]
    fn unset_limit_shows_default() {
        let text = render_settings(&SourceSettings::default());
        assert!(text.contains("(default)"));
        assert!(text.contains("Pull source:     (any)"));
        assert!(text.contains("File digests:    none"));
    }

    #[test]
    fn description_summary_shows_image() {
        let description = SourceDescription::new(
            &SourceSettings::default(),
            SourceMetadata::Image {
                user_input: "alpine:latest".into(),
                pull_source: PullSource::Registry,
            },
        )
        .unwrap();
        let text = render_description(&description);
        assert!(text.contains(description.id()));
        assert!(text.contains("Kind:            image"));
        assert!(text.contains("Image:           alpine:latest"));
    }
}
