//! Server-rendered catalog page: tool cards, search and filters, the result
//! overlay and the notify form.

use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{error, warn};

use crate::format::format_output;
use crate::notifications::{NotificationError, NotificationRequest, INTEREST_OPTIONS};
use crate::registries::{find_tool, page_meta, visible_tools, CatalogFilter, ToolDescriptor};
use crate::service::RunError;
use crate::tools::date::INPUT_DATE_FORMAT;
use crate::tools::{Payload, ToolError};
use crate::usage::{today, LIMIT_REACHED_MESSAGE};
use crate::AppState;

const FILTERS: [(&str, &str); 4] = [
    ("v1", "Toolsv1"),
    ("v2", "Toolsv2"),
    ("v3", "Toolsv3"),
    ("all", "All Tools"),
];

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub filter: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolForm {
    pub text: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotifyForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub interest_v2: Option<String>,
    pub interest_v3: Option<String>,
    pub interest_pro: Option<String>,
}

impl NotifyForm {
    fn interests(&self) -> Vec<String> {
        let checked = [&self.interest_v2, &self.interest_v3, &self.interest_pro];
        INTEREST_OPTIONS
            .iter()
            .zip(checked)
            .filter(|(_, checked)| checked.is_some())
            .map(|((_, label), _)| label.to_string())
            .collect()
    }
}

enum Overlay {
    Result { title: String, text: String },
    Notice { title: String, message: String },
}

struct PageView<'a> {
    filter: CatalogFilter,
    query: String,
    today: NaiveDate,
    overlay: Option<Overlay>,
    submitted: Option<(&'a str, &'a ToolForm)>,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub async fn index(State(state): State<Arc<AppState>>, Query(query): Query<PageQuery>) -> Html<String> {
    let filter = query
        .filter
        .unwrap_or_else(|| state.config.default_filter.clone());
    let search = query.q.unwrap_or_default();

    state.analytics.track_page_view("home");
    state.analytics.track_filter_usage(&filter);
    state.analytics.track_search_query(&search);

    Html(render_page(&PageView {
        filter: CatalogFilter::parse(&filter),
        query: search,
        today: today(),
        overlay: None,
        submitted: None,
    }))
}

pub async fn run_tool(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<ToolForm>,
) -> Response {
    let today = today();
    let payload = match &form.text {
        Some(text) => Payload::text(text.clone()),
        None => Payload::dates(
            form.start.clone().unwrap_or_default(),
            form.end.clone().unwrap_or_default(),
        ),
    };
    let title = find_tool(&id)
        .map(|tool| tool.name.to_string())
        .unwrap_or_else(|| id.clone());

    let (status, overlay) = match state.tools.run(&id, &payload, form.mode.as_deref(), today) {
        Ok(run) => {
            state.analytics.track_modal_open("result");
            (
                StatusCode::OK,
                Overlay::Result {
                    title: format!("{} Result", run.tool.name),
                    text: format_output(&run.output),
                },
            )
        }
        Err(RunError::LimitReached { .. }) => (
            StatusCode::TOO_MANY_REQUESTS,
            Overlay::Notice {
                title: "Daily limit".to_string(),
                message: LIMIT_REACHED_MESSAGE.to_string(),
            },
        ),
        Err(RunError::Tool(e)) => {
            warn!("Tool {} failed: {}", id, e);
            let status = match e {
                ToolError::NotFound(_) => StatusCode::NOT_FOUND,
                ToolError::InvalidMode(_) | ToolError::InvalidInput(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            };
            (
                status,
                Overlay::Notice {
                    title,
                    message: e.to_string(),
                },
            )
        }
        Err(RunError::Store(e)) => {
            error!("Failed to record usage for {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Overlay::Notice {
                    title,
                    message: "Something went wrong, please try again.".to_string(),
                },
            )
        }
    };

    let page = render_page(&PageView {
        filter: CatalogFilter::parse(&state.config.default_filter),
        query: String::new(),
        today,
        overlay: Some(overlay),
        submitted: Some((id.as_str(), &form)),
    });
    (status, Html(page)).into_response()
}

pub async fn notify(State(state): State<Arc<AppState>>, Form(form): Form<NotifyForm>) -> Response {
    let request = NotificationRequest {
        interests: form.interests(),
        name: form.name,
        email: form.email,
        source: None,
    };

    let (status, message) = match state.notifications.subscribe(request, Utc::now()) {
        Ok(signup) => {
            state
                .analytics
                .track_notification_signup(&signup.email, &signup.interests);
            (StatusCode::OK, signup.thank_you_message())
        }
        Err(NotificationError::InvalidEmail) => (
            StatusCode::BAD_REQUEST,
            NotificationError::InvalidEmail.to_string(),
        ),
        Err(NotificationError::Store(e)) => {
            error!("Failed to store notification signup: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong, please try again.".to_string(),
            )
        }
    };

    let page = render_page(&PageView {
        filter: CatalogFilter::parse(&state.config.default_filter),
        query: String::new(),
        today: today(),
        overlay: Some(Overlay::Notice {
            title: "Get notified".to_string(),
            message,
        }),
        submitted: None,
    });
    (status, Html(page)).into_response()
}

fn render_page(view: &PageView<'_>) -> String {
    let meta = page_meta(view.filter.as_str());
    let tools = visible_tools(&view.filter, &view.query);

    let mut html = String::new();
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
</head>
<body>
<header>
<h1>MicroToolsHub</h1>
<nav>"#,
        title = escape_html(meta.title),
        description = escape_html(meta.description),
    ));

    for (key, label) in FILTERS {
        let active = if view.filter.as_str() == key { " active" } else { "" };
        html.push_str(&format!(
            r#"<a class="nav-item{active}" data-filter="{key}" href="/?filter={key}">{label}</a>"#
        ));
    }

    html.push_str(&format!(
        r#"</nav>
<form method="get" action="/" role="search">
<input type="hidden" name="filter" value="{filter}">
<input type="search" id="searchTools" name="q" value="{query}" placeholder="Search tools..." aria-label="Search tools">
</form>
</header>
<main id="toolsGrid">"#,
        filter = escape_html(view.filter.as_str()),
        query = escape_html(&view.query),
    ));

    if tools.is_empty() {
        html.push_str(r#"<p class="empty-state">No tools match yet. Get notified when new tools launch.</p>"#);
    }
    for tool in tools {
        let submitted = view
            .submitted
            .filter(|(id, _)| *id == tool.id)
            .map(|(_, form)| form);
        render_card(&mut html, tool, view.today, submitted);
    }
    html.push_str("</main>\n");

    render_notify_form(&mut html);
    if let Some(overlay) = &view.overlay {
        render_overlay(&mut html, overlay);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_card(html: &mut String, tool: &ToolDescriptor, today: NaiveDate, submitted: Option<&ToolForm>) {
    let id = tool.id;
    let name = escape_html(tool.name);
    html.push_str(&format!(
        r#"<article class="tool-card" data-tool-id="{id}" aria-labelledby="tool-title-{id}">
<div class="tool-header">
<div class="tool-icon" style="background:{color}" aria-hidden="true"><i class="{icon}"></i></div>
<h4 id="tool-title-{id}">{name}</h4>
</div>
<p class="tool-desc">{description}</p>
<form method="post" action="/tools/{id}">
"#,
        color = escape_html(tool.color),
        icon = escape_html(tool.icon),
        description = escape_html(tool.description),
    ));

    if tool.kind.takes_dates() {
        let default = today.format(INPUT_DATE_FORMAT).to_string();
        let start = submitted.and_then(|f| f.start.as_deref()).unwrap_or(&default);
        let end = submitted.and_then(|f| f.end.as_deref()).unwrap_or(&default);
        html.push_str(&format!(
            r#"<div class="date-inputs" aria-label="Date inputs for {name}">
<input type="date" id="start-date-{id}" name="start" class="tool-input" value="{start}" aria-label="Start date">
<input type="date" id="end-date-{id}" name="end" class="tool-input" value="{end}" aria-label="End date">
</div>
"#,
            start = escape_html(start),
            end = escape_html(end),
        ));
    } else {
        let text = submitted.and_then(|f| f.text.as_deref()).unwrap_or("");
        html.push_str(&format!(
            r#"<textarea id="text-input-{id}" name="text" class="tool-input" placeholder="Enter your text here..." aria-label="Text input for {name}">{text}</textarea>
"#,
            text = escape_html(text),
        ));
    }

    if tool.kind.takes_mode() {
        html.push_str(&format!(
            r#"<div class="tool-actions">
<button class="primary-btn" type="submit" name="mode" value="upper" style="background:{color}" aria-label="Convert to uppercase">UPPERCASE</button>
<button class="secondary-btn" type="submit" name="mode" value="lower" aria-label="Convert to lowercase">lowercase</button>
</div>
"#,
            color = escape_html(tool.color),
        ));
    } else {
        html.push_str(&format!(
            r#"<div class="tool-actions">
<button class="primary-btn" type="submit" style="background:{color};width:100%" aria-label="Use {name}">Use This Tool</button>
</div>
"#,
            color = escape_html(tool.color),
        ));
    }

    html.push_str(&format!(
        r#"</form>
<div class="tool-keywords"><strong>Keywords:</strong> {keywords}</div>
</article>
"#,
        keywords = escape_html(&tool.keywords.join(", ")),
    ));
}

fn render_notify_form(html: &mut String) {
    html.push_str(
        r#"<section id="notify" aria-labelledby="notify-title">
<h3 id="notify-title">Get notified about new tools</h3>
<form method="post" action="/notify">
<input type="text" id="notifyName" name="name" placeholder="Your name (optional)">
<input type="email" id="notifyEmail" name="email" placeholder="you@example.com" required>
<div class="interest-checkboxes">
"#,
    );
    for (i, (field, label)) in INTEREST_OPTIONS.iter().enumerate() {
        let checked = if i == 0 { " checked" } else { "" };
        html.push_str(&format!(
            r#"<label><input type="checkbox" name="{field}" value="on"{checked}> <span>{label}</span></label>
"#,
            label = escape_html(label),
        ));
    }
    html.push_str("</div>\n<button class=\"primary-btn\" type=\"submit\">Notify Me</button>\n</form>\n</section>\n");
}

fn render_overlay(html: &mut String, overlay: &Overlay) {
    match overlay {
        Overlay::Result { title, text } => {
            html.push_str(&format!(
                r#"<div class="modal-overlay" id="resultModal" style="display:flex;">
<div class="modal">
<div class="modal-header"><h3>{title}</h3><a class="modal-close" href="/">&times;</a></div>
<div class="modal-body">
<div id="resultText" style="white-space:pre-line;">{text}</div>
<div class="result-actions">
<button class="primary-btn" type="button" onclick="navigator.clipboard.writeText(document.getElementById('resultText').innerText)">Copy Result</button>
<a class="secondary-btn" href="/">Close</a>
</div>
</div>
</div>
</div>
"#,
                title = escape_html(title),
                text = escape_html(text),
            ));
        }
        Overlay::Notice { title, message } => {
            html.push_str(&format!(
                r#"<div class="modal-overlay" id="noticeModal" role="alert" style="display:flex;">
<div class="modal">
<div class="modal-header"><h3>{title}</h3><a class="modal-close" href="/">&times;</a></div>
<div class="modal-body"><p>{message}</p></div>
</div>
</div>
"#,
                title = escape_html(title),
                message = escape_html(message),
            ));
        }
    }
}
