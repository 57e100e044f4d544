//! Resource kinds and their URL templates.
//!
//! Every template is relative to the configured host (which ends in `/`).
//! Placeholders are `{name}` and are filled from [`PathParams`] after
//! percent-encoding.

use std::fmt;
use std::str::FromStr;

use crate::errors::{AmaraError, Result};

/// How a resource's request and response bodies are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Json,
    /// Body is sent as-is and no JSON content headers are added.
    Raw,
}

macro_rules! resource_kinds {
    ($($variant:ident => $name:literal, $template:literal;)+) => {
        /// Every endpoint shape the API exposes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ResourceKind {
            $($variant,)+
        }

        impl ResourceKind {
            pub const ALL: &'static [ResourceKind] = &[$(ResourceKind::$variant,)+];

            /// Identifier used by [`FromStr`].
            pub fn name(&self) -> &'static str {
                match self {
                    $(ResourceKind::$variant => $name,)+
                }
            }

            /// URL template relative to the host.
            pub fn template(&self) -> &'static str {
                match self {
                    $(ResourceKind::$variant => $template,)+
                }
            }
        }

        impl FromStr for ResourceKind {
            type Err = AmaraError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($name => Ok(ResourceKind::$variant),)+
                    other => Err(AmaraError::UnknownResource(other.to_string())),
                }
            }
        }
    };
}

resource_kinds! {
    Videos => "videos", "videos/";
    Video => "video", "videos/{video_id}/";
    VideoUrls => "video_urls", "videos/{video_id}/urls/";
    VideoUrl => "video_url", "videos/{video_id}/urls/{url_id}/";
    VideoActivity => "video_activity", "videos/{video_id}/activity/";
    Languages => "languages", "videos/{video_id}/languages/";
    Language => "language", "videos/{video_id}/languages/{language}/";
    Subtitles => "subtitles", "videos/{video_id}/languages/{language}/subtitles/";
    SubtitleActions => "subtitle_actions", "videos/{video_id}/languages/{language}/subtitles/actions/";
    SubtitleNotes => "subtitle_notes", "videos/{video_id}/languages/{language}/subtitles/notes/";
    SupportedLanguages => "supported_languages", "languages/";
    Teams => "teams", "teams/";
    Team => "team", "teams/{team}/";
    TeamMembers => "team_members", "teams/{team}/members/";
    TeamMember => "team_member", "teams/{team}/members/{username}/";
    Projects => "projects", "teams/{team}/projects/";
    Project => "project", "teams/{team}/projects/{project}/";
    Tasks => "tasks", "teams/{team}/tasks/";
    Task => "task", "teams/{team}/tasks/{task_id}/";
    Jobs => "jobs", "teams/{team}/subtitle-requests/";
    Job => "job", "teams/{team}/subtitle-requests/{job_id}/";
    Applications => "applications", "teams/{team}/applications/";
    Application => "application", "teams/{team}/applications/{application_id}/";
    TeamActivity => "team_activity", "teams/{team}/activity/";
    User => "user", "users/{username}/";
    UserActivity => "user_activity", "users/{username}/activity/";
    Message => "message", "message/";
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key fields substituted into a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    pub video_id: Option<String>,
    pub language: Option<String>,
    pub url_id: Option<String>,
    pub team: Option<String>,
    pub username: Option<String>,
    pub project: Option<String>,
    pub task_id: Option<String>,
    pub job_id: Option<String>,
    pub application_id: Option<String>,
}

impl PathParams {
    /// Resolve a placeholder to its static name and the supplied value, if
    /// any. `None` means the placeholder is not a known field.
    fn lookup(&self, name: &str) -> Option<(&'static str, Option<&str>)> {
        let (key, field) = match name {
            "video_id" => ("video_id", &self.video_id),
            "language" => ("language", &self.language),
            "url_id" => ("url_id", &self.url_id),
            "team" => ("team", &self.team),
            "username" => ("username", &self.username),
            "project" => ("project", &self.project),
            "task_id" => ("task_id", &self.task_id),
            "job_id" => ("job_id", &self.job_id),
            "application_id" => ("application_id", &self.application_id),
            _ => return None,
        };
        Some((key, field.as_deref().filter(|v| !v.is_empty())))
    }
}

/// A resource kind plus the fields its template needs.
///
/// ```
/// use amara::{Resource, ResourceKind};
///
/// let r = Resource::new(ResourceKind::Subtitles).video("abc123").language("pt-br");
/// assert_eq!(
///     r.url("https://amara.org/api/").unwrap(),
///     "https://amara.org/api/videos/abc123/languages/pt-br/subtitles/"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    params: PathParams,
    content: ContentType,
}

impl Resource {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            params: PathParams::default(),
            content: ContentType::Json,
        }
    }

    /// Look a resource up by its string identifier.
    pub fn named(name: &str) -> Result<Self> {
        Ok(Self::new(name.parse()?))
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn content(&self) -> ContentType {
        self.content
    }

    pub fn with_params(mut self, params: PathParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_content(mut self, content: ContentType) -> Self {
        self.content = content;
        self
    }

    pub fn video(mut self, id: impl Into<String>) -> Self {
        self.params.video_id = Some(id.into());
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.params.language = Some(code.into());
        self
    }

    pub fn url_id(mut self, id: impl Into<String>) -> Self {
        self.params.url_id = Some(id.into());
        self
    }

    pub fn team(mut self, slug: impl Into<String>) -> Self {
        self.params.team = Some(slug.into());
        self
    }

    pub fn username(mut self, name: impl Into<String>) -> Self {
        self.params.username = Some(name.into());
        self
    }

    pub fn project(mut self, slug: impl Into<String>) -> Self {
        self.params.project = Some(slug.into());
        self
    }

    pub fn task(mut self, id: impl Into<String>) -> Self {
        self.params.task_id = Some(id.into());
        self
    }

    pub fn job(mut self, id: impl Into<String>) -> Self {
        self.params.job_id = Some(id.into());
        self
    }

    pub fn application(mut self, id: impl Into<String>) -> Self {
        self.params.application_id = Some(id.into());
        self
    }

    /// Render the full URL under `host`.
    pub fn url(&self, host: &str) -> Result<String> {
        let template = self.kind.template();
        let mut out = String::with_capacity(host.len() + template.len() + 32);
        out.push_str(host);

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').unwrap_or(after.len());
            let name = &after[..close];

            let value = match self.params.lookup(name) {
                Some((_, Some(value))) => value,
                Some((param, None)) => {
                    return Err(AmaraError::MissingParameter {
                        resource: self.kind.name(),
                        param,
                    })
                }
                None => {
                    return Err(AmaraError::MissingParameter {
                        resource: self.kind.name(),
                        param: "unknown placeholder",
                    })
                }
            };
            out.push_str(&urlencoding::encode(value));

            rest = after.get(close + 1..).unwrap_or("");
        }
        out.push_str(rest);

        Ok(out)
    }
}

impl From<ResourceKind> for Resource {
    fn from(kind: ResourceKind) -> Self {
        Resource::new(kind)
    }
}
