//! Building pages from plain strings.

use actix_web::{http::StatusCode, HttpResponse};
use licensing_common::validation::FieldErrors;
use std::fmt::Write;

/// Escape text for use in element content and quoted attribute values.
pub fn escape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            c => result.push(c),
        }
    }
    result
}

const NAVIGATION: &[(&str, &str)] = &[
    ("/license/", "Dashboard"),
    ("/license/users/", "Users"),
    ("/license/licensors/", "Licensors"),
    ("/license/licensees/", "Licensees"),
    ("/license/softwares/", "Softwares"),
    ("/license/agreements/", "Agreements"),
];

/// Wrap content into a complete document, `content` must already be escaped.
pub fn page(status: StatusCode, title: &str, content: &str) -> HttpResponse {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | Software Licensing</title></head>
<body>
<nav>"#,
        title = escape(title)
    );
    for (href, label) in NAVIGATION {
        let _ = write!(html, r#"<a href="{href}">{label}</a> "#);
    }
    let _ = write!(
        html,
        "</nav>\n<main>\n<h1>{}</h1>\n{content}\n</main>\n</body>\n</html>\n",
        escape(title)
    );

    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Redirect after a successful submission.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// A table with a header row, cells must already be escaped.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>\n<tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr>\n");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{cell}</td>");
        }
        html.push_str("</tr>\n");
    }
    if rows.is_empty() {
        let _ = write!(
            html,
            r#"<tr><td colspan="{}">Nothing here yet.</td></tr>"#,
            headers.len()
        );
    }
    html.push_str("</table>");
    html
}

pub fn link(href: &str, label: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape(href), escape(label))
}

/// Collects the fields of a form, along with the messages of each field.
pub struct Form<'a> {
    html: String,
    errors: &'a FieldErrors,
}

impl<'a> Form<'a> {
    pub fn new(action: &str, errors: &'a FieldErrors) -> Self {
        let mut html = String::new();
        for message in errors.get("non_field_errors") {
            let _ = write!(html, r#"<p class="error">{}</p>"#, escape(message));
        }
        let _ = write!(html, r#"<form method="post" action="{}">"#, escape(action));
        Self { html, errors }
    }

    fn field(&mut self, name: &str, label: &str, control: String) -> &mut Self {
        let _ = write!(
            self.html,
            "\n<p><label for=\"{name}\">{}</label> {control}",
            escape(label)
        );
        for message in self.errors.get(name) {
            let _ = write!(self.html, r#" <span class="error">{}</span>"#, escape(message));
        }
        self.html.push_str("</p>");
        self
    }

    pub fn input(&mut self, kind: &str, name: &str, label: &str, value: &str) -> &mut Self {
        let control = format!(
            r#"<input type="{kind}" id="{name}" name="{name}" value="{}">"#,
            escape(value)
        );
        self.field(name, label, control)
    }

    pub fn text(&mut self, name: &str, label: &str, value: &str) -> &mut Self {
        self.input("text", name, label, value)
    }

    pub fn textarea(&mut self, name: &str, label: &str, value: &str) -> &mut Self {
        let control = format!(
            r#"<textarea id="{name}" name="{name}">{}</textarea>"#,
            escape(value)
        );
        self.field(name, label, control)
    }

    pub fn checkbox(&mut self, name: &str, label: &str, checked: bool) -> &mut Self {
        let control = format!(
            r#"<input type="checkbox" id="{name}" name="{name}" value="on"{}>"#,
            if checked { " checked" } else { "" }
        );
        self.field(name, label, control)
    }

    /// A drop-down of `(value, label)` options.
    pub fn select(
        &mut self,
        name: &str,
        label: &str,
        options: &[(String, String)],
        selected: &str,
    ) -> &mut Self {
        let mut control = format!(r#"<select id="{name}" name="{name}"><option value="">---------</option>"#);
        for (value, text) in options {
            let _ = write!(
                control,
                r#"<option value="{}"{}>{}</option>"#,
                escape(value),
                if value == selected { " selected" } else { "" },
                escape(text)
            );
        }
        control.push_str("</select>");
        self.field(name, label, control)
    }

    pub fn finish(&mut self, submit: &str) -> String {
        let _ = write!(
            self.html,
            "\n<p><button type=\"submit\">{}</button></p>\n</form>",
            escape(submit)
        );
        std::mem::take(&mut self.html)
    }
}

/// The choices of the status field of a form.
pub fn status_options() -> Vec<(String, String)> {
    ["Active", "Inactive"]
        .iter()
        .map(|status| (status.to_string(), status.to_string()))
        .collect()
}
