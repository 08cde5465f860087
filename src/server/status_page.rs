use crate::config::Config;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {message}")]
    Read { path: String, message: String },

    #[error("Unclosed action at byte {offset}")]
    Unclosed { offset: usize },

    #[error("Unknown template field: {0}")]
    UnknownField(String),
}

/// Values substituted into the status page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    pub service: String,
    pub revision: String,
}

impl From<&Config> for PageData {
    fn from(config: &Config) -> Self {
        Self {
            service: config.service.clone(),
            revision: config.revision.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Service,
    Revision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
}

/// An HTML page with `{{.Service}}` and `{{.Revision}}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let action = &rest[start + 2..];
            let end = action.find("}}").ok_or(TemplateError::Unclosed {
                offset: offset + start,
            })?;
            let field = match action[..end].trim() {
                ".Service" => Field::Service,
                ".Revision" => Field::Revision,
                other => return Err(TemplateError::UnknownField(other.to_string())),
            };
            segments.push(Segment::Field(field));

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn render(&self, data: &PageData) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(Field::Service) => push_escaped(&mut out, &data.service),
                Segment::Field(Field::Revision) => push_escaped(&mut out, &data.revision),
            }
        }
        out
    }
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// The page served at `/`. A template that failed to load is kept as an
/// error and reported on every render.
#[derive(Debug, Clone)]
pub struct StatusPage {
    template: Result<Template, TemplateError>,
    data: PageData,
}

impl StatusPage {
    pub fn new(template: Template, data: PageData) -> Self {
        Self {
            template: Ok(template),
            data,
        }
    }

    pub fn load(path: impl AsRef<Path>, data: PageData) -> Self {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path)
            .map_err(|e| TemplateError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
            .and_then(|source| Template::parse(&source));

        match &template {
            Ok(_) => info!(path = %path.display(), "Status page template loaded"),
            Err(e) => error!(path = %path.display(), error = %e, "Status page template unavailable"),
        }
        Self { template, data }
    }

    pub fn render(&self) -> Result<String, TemplateError> {
        self.template
            .as_ref()
            .map(|template| template.render(&self.data))
            .map_err(Clone::clone)
    }
}
